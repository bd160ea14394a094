mod edit;

use clap::Parser;
use ke_core::logging;
use ke_core::prelude::*;
use tracing::*;

const EXAMPLES: &str = "Examples:
  # set the number of replicas of a deployment in the current namespace
  kubectl edit-deploy web --replicas=5

  # set the revision history limit of a deployment in another namespace
  kubectl edit-deploy web --rhl=3 -n team-a

  # show the current values without changing anything
  kubectl edit-deploy web";

#[derive(Parser)]
#[command(
    name = "kubectl-edit_deploy",
    about = "view or edit the replicas and revision history limit of a deployment",
    after_help = EXAMPLES,
    version
)]
struct EditDeployCommand {
    #[command(flatten)]
    args: edit::Args,

    #[command(flatten)]
    kube: KubeConfigFlags,

    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> EmptyResult {
    let cmd = EditDeployCommand::parse();
    logging::setup_for_cli(&cmd.verbosity);

    // Argument problems are reported before we go anywhere near the cluster
    let opts = edit::EditDeployOptions::complete(&cmd.args)?;
    opts.validate()?;

    let conn = cmd.kube.connect().await?;
    debug!("editing deployment {}/{}", conn.namespace, opts.name);
    let depl_api = kube::Api::<appsv1::Deployment>::namespaced(conn.client, &conn.namespace);

    opts.run(&depl_api, &cmd.kube.retry_policy(), &mut std::io::stdout())
        .await
}

#[cfg(test)]
mod tests;
