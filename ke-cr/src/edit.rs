use std::io::Write;

use ke_core::prelude::*;

use crate::rules::{
    build_rule,
    split_api_groups,
    split_list,
};

#[derive(clap::Args, Debug, Default)]
pub struct Args {
    #[arg(value_name = "CLUSTER_ROLE_NAME", long_help = "name of the cluster role to append a rule to")]
    pub names: Vec<String>,

    #[arg(long, default_value = "", long_help = "comma-separated verbs the new rule allows")]
    pub verbs: String,

    #[arg(long, default_value = "", long_help = "comma-separated resources the new rule applies to")]
    pub resources: String,

    #[arg(
        long,
        long_help = "comma-separated API groups the resources belong to; omit or leave empty for the core group"
    )]
    pub groups: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditClusterRoleOptions {
    pub name: String,
    pub verbs: Vec<String>,
    pub resources: Vec<String>,
    pub api_groups: Vec<String>,

    args: Vec<String>,
}

impl EditClusterRoleOptions {
    pub fn complete(args: &Args) -> anyhow::Result<EditClusterRoleOptions> {
        let Some(name) = args.names.first().filter(|n| !n.is_empty()) else {
            return Err(EditError::usage("cluster role name not specified"));
        };

        Ok(EditClusterRoleOptions {
            name: name.clone(),
            verbs: split_list(&args.verbs),
            resources: split_list(&args.resources),
            api_groups: split_api_groups(args.groups.as_deref()),
            args: args.names.clone(),
        })
    }

    pub fn validate(&self) -> EmptyResult {
        if self.args.len() != 1 {
            return Err(EditError::usage(&format!(
                "exactly one cluster role name is allowed, got {}: {}",
                self.args.len(),
                self.args.join(" ")
            )));
        }

        if self.verbs.is_empty() {
            return Err(EditError::usage("no verbs specified; pass --verbs=v1,v2,..."));
        }

        if self.resources.is_empty() {
            return Err(EditError::usage("no resources specified; pass --resources=r1,r2,..."));
        }

        Ok(())
    }

    // Always an append: existing rules are left alone, even ones identical to the new rule
    pub fn apply(&self, mut role: rbacv1::ClusterRole) -> rbacv1::ClusterRole {
        role.rules
            .get_or_insert_with(Vec::new)
            .push(build_rule(&self.verbs, &self.resources, &self.api_groups));
        role
    }

    pub async fn run<S>(&self, store: &S, policy: &RetryPolicy, out: &mut impl Write) -> EmptyResult
    where
        S: ObjectStore<rbacv1::ClusterRole> + ?Sized,
    {
        let role = update_with_retry(store, &self.name, policy, |role| self.apply(role)).await?;
        let count = role.rules.as_ref().map_or(0, Vec::len);
        writeln!(out, "clusterrole.rbac.authorization.k8s.io/{} updated ({count} rules)", self.name)?;
        Ok(())
    }
}
