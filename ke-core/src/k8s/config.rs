use std::path::PathBuf;
use std::time::Duration;

use kube::config::{
    KubeConfigOptions,
    Kubeconfig,
};
use tracing::*;

use crate::prelude::*;

// The kubectl-style connection flags every plugin accepts; flatten these into the plugin's
// own clap command.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct KubeConfigFlags {
    #[arg(long, long_help = "path to the kubeconfig file to use", help_heading = "Cluster")]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long, long_help = "name of the kubeconfig context to use", help_heading = "Cluster")]
    pub context: Option<String>,

    #[arg(
        short = 'n',
        long,
        long_help = "namespace to operate in; defaults to the context's namespace, then \"default\"",
        help_heading = "Cluster"
    )]
    pub namespace: Option<String>,

    #[arg(
        long,
        long_help = "give up retrying the update after this long (e.g. 5s, 1m)",
        value_parser = humantime::parse_duration,
        help_heading = "Cluster"
    )]
    pub timeout: Option<Duration>,
}

pub struct ClusterConnection {
    pub client: kube::Client,
    pub namespace: String,
}

impl KubeConfigFlags {
    pub async fn connect(&self) -> anyhow::Result<ClusterConnection> {
        let options = KubeConfigOptions { context: self.context.clone(), ..Default::default() };

        let (config, context_ns) = match self.load_kubeconfig() {
            Ok(kubeconfig) => {
                let context_ns = context_namespace(&kubeconfig, self.context.as_deref());
                (kube::Config::from_custom_kubeconfig(kubeconfig, &options).await?, context_ns)
            },
            // A kubeconfig given on the command line that we can't read is an error; otherwise
            // we might be running inside a pod, so fall back to the service account config
            Err(err) if self.kubeconfig.is_some() => return Err(err),
            Err(err) => {
                debug!("no usable kubeconfig ({err}), trying in-cluster config");
                let config = kube::Config::incluster()?;
                let sa_ns = config.default_namespace.clone();
                (config, Some(sa_ns))
            },
        };

        let namespace = resolve_namespace(self.namespace.as_deref(), context_ns.as_deref());
        info!("using namespace {namespace}");

        Ok(ClusterConnection { client: kube::Client::try_from(config)?, namespace })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_deadline(self.timeout)
    }

    fn load_kubeconfig(&self) -> anyhow::Result<Kubeconfig> {
        Ok(match &self.kubeconfig {
            Some(path) => Kubeconfig::read_from(path)?,
            None => Kubeconfig::read()?,
        })
    }
}

// An explicit namespace always wins, then whatever the active context is bound to, and
// finally the cluster default.  Empty strings count as unset.
pub fn resolve_namespace(flag_ns: Option<&str>, context_ns: Option<&str>) -> String {
    flag_ns
        .filter(|ns| !ns.is_empty())
        .or(context_ns.filter(|ns| !ns.is_empty()))
        .unwrap_or(DEFAULT_NAMESPACE)
        .into()
}

pub fn context_namespace(kubeconfig: &Kubeconfig, context_override: Option<&str>) -> Option<String> {
    let context_name = context_override.or(kubeconfig.current_context.as_deref())?;
    kubeconfig
        .contexts
        .iter()
        .find(|named| named.name == context_name)?
        .context
        .as_ref()?
        .namespace
        .clone()
}
