use clap::Parser;

use super::*;

#[rstest]
fn test_parse_all_flags() {
    let cmd = EditClusterRoleCommand::try_parse_from([
        "kubectl-edit_cr",
        "data-editor",
        "--verbs=update,delete",
        "--resources=downloads,links",
        "--groups=data.example.io",
        "--context",
        "staging",
    ])
    .unwrap();

    assert_eq!(cmd.args.names, vec!["data-editor".to_string()]);
    assert_eq!(cmd.args.verbs, "update,delete");
    assert_eq!(cmd.args.resources, "downloads,links");
    assert_eq!(cmd.args.groups.as_deref(), Some("data.example.io"));
    assert_eq!(cmd.kube.context.as_deref(), Some("staging"));
    assert_none!(cmd.kube.timeout);
}

#[rstest]
fn test_parse_empty_groups_is_core_group() {
    let cmd = EditClusterRoleCommand::try_parse_from([
        "kubectl-edit_cr",
        "viewer",
        "--verbs=list,watch",
        "--resources=configmaps",
        "--groups=",
    ])
    .unwrap();
    assert_eq!(cmd.args.groups.as_deref(), Some(""));

    let opts = edit::EditClusterRoleOptions::complete(&cmd.args).unwrap();
    assert_eq!(opts.api_groups, vec!["".to_string()]);
}

#[rstest]
fn test_parse_defaults() {
    let cmd = EditClusterRoleCommand::try_parse_from(["kubectl-edit_cr", "viewer"]).unwrap();

    assert_eq!(cmd.args.verbs, "");
    assert_eq!(cmd.args.resources, "");
    assert_none!(cmd.args.groups);
    assert_eq!(cmd.verbosity, "warn");
}

#[rstest]
fn test_parse_rejects_unknown_flag() {
    assert!(EditClusterRoleCommand::try_parse_from(["kubectl-edit_cr", "viewer", "--verb=get"]).is_err());
}
