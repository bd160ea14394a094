use std::io::Write;

use ke_core::prelude::*;

#[derive(clap::Args, Debug, Default)]
pub struct Args {
    #[arg(value_name = "DEPLOYMENT_NAME", long_help = "name of the deployment to edit")]
    pub names: Vec<String>,

    #[arg(long, long_help = "number of replicas to set", allow_negative_numbers = true)]
    pub replicas: Option<i32>,

    #[arg(long = "rhl", long_help = "revision history limit to set", allow_negative_numbers = true)]
    pub revision_history_limit: Option<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditDeployOptions {
    pub name: String,
    pub replicas: Option<i32>,
    pub revision_history_limit: Option<i32>,

    args: Vec<String>,
}

impl EditDeployOptions {
    pub fn complete(args: &Args) -> anyhow::Result<EditDeployOptions> {
        let Some(name) = args.names.first().filter(|n| !n.is_empty()) else {
            return Err(EditError::usage("deployment name not specified"));
        };

        Ok(EditDeployOptions {
            name: name.clone(),
            replicas: args.replicas,
            revision_history_limit: args.revision_history_limit,
            args: args.names.clone(),
        })
    }

    pub fn validate(&self) -> EmptyResult {
        if self.args.len() != 1 {
            return Err(EditError::usage(&format!(
                "exactly one deployment name is allowed, got {}: {}",
                self.args.len(),
                self.args.join(" ")
            )));
        }

        if let Some(replicas) = self.replicas
            && replicas <= 0
        {
            return Err(EditError::usage(&format!("invalid number of replicas: {replicas} (must be positive)")));
        }

        if let Some(limit) = self.revision_history_limit
            && limit < 0
        {
            return Err(EditError::usage(&format!(
                "invalid revision history limit: {limit} (must be non-negative)"
            )));
        }

        Ok(())
    }

    // Nothing to write means the caller just wants to look
    pub fn is_view_only(&self) -> bool {
        self.replicas.is_none() && self.revision_history_limit.is_none()
    }

    // Only the fields the caller asked for are touched; everything else keeps whatever value
    // the freshly-fetched object has
    pub fn apply(&self, mut depl: appsv1::Deployment) -> appsv1::Deployment {
        let spec = depl.spec.get_or_insert_with(Default::default);
        if let Some(replicas) = self.replicas {
            spec.replicas = Some(replicas);
        }
        if let Some(limit) = self.revision_history_limit {
            spec.revision_history_limit = Some(limit);
        }
        depl
    }

    pub async fn run<S>(&self, store: &S, policy: &RetryPolicy, out: &mut impl Write) -> EmptyResult
    where
        S: ObjectStore<appsv1::Deployment> + ?Sized,
    {
        if self.is_view_only() {
            let depl = match store.get(&self.name).await {
                Ok(depl) => depl,
                Err(StoreError::NotFound(msg)) => return Err(EditError::not_found(&msg)),
                Err(e) => return Err(e.into()),
            };
            writeln!(out, "deployment.apps/{} {}", self.name, describe(&depl))?;
            return Ok(());
        }

        let depl = update_with_retry(store, &self.name, policy, |depl| self.apply(depl)).await?;
        writeln!(out, "deployment.apps/{} updated ({})", self.name, describe(&depl))?;
        Ok(())
    }
}

fn describe(depl: &appsv1::Deployment) -> String {
    let spec = depl.spec.as_ref();
    let show = |val: Option<i32>| val.map_or("<unset>".into(), |v| v.to_string());
    format!(
        "replicas: {}, revisionHistoryLimit: {}",
        show(spec.and_then(|s| s.replicas)),
        show(spec.and_then(|s| s.revision_history_limit)),
    )
}
