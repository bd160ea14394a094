mod edit;
mod rules;

use clap::Parser;
use ke_core::logging;
use ke_core::prelude::*;
use tracing::*;

const EXAMPLES: &str = "Examples:
  # allow updating and deleting two custom resources
  kubectl edit-cr data-editor --verbs=update,delete --resources=downloads,links --groups=data.example.io

  # allow listing and watching configmaps in the core group
  kubectl edit-cr viewer --verbs=list,watch --resources=configmaps";

#[derive(Parser)]
#[command(
    name = "kubectl-edit_cr",
    about = "append an access rule to a cluster role",
    after_help = EXAMPLES,
    version
)]
struct EditClusterRoleCommand {
    #[command(flatten)]
    args: edit::Args,

    #[command(flatten)]
    kube: KubeConfigFlags,

    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> EmptyResult {
    let cmd = EditClusterRoleCommand::parse();
    logging::setup_for_cli(&cmd.verbosity);

    let opts = edit::EditClusterRoleOptions::complete(&cmd.args)?;
    opts.validate()?;

    // Cluster roles aren't namespaced, so the resolved namespace is ignored
    let conn = cmd.kube.connect().await?;
    debug!("appending rule to clusterrole {}", opts.name);
    let role_api = kube::Api::<rbacv1::ClusterRole>::all(conn.client);

    opts.run(&role_api, &cmd.kube.retry_policy(), &mut std::io::stdout())
        .await
}

#[cfg(test)]
mod tests;
