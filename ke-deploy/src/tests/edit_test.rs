use httpmock::Method::*;

use super::*;
use crate::edit::{
    Args,
    EditDeployOptions,
};

fn args(names: &[&str], replicas: Option<i32>, revision_history_limit: Option<i32>) -> Args {
    Args {
        names: names.iter().map(|n| n.to_string()).collect(),
        replicas,
        revision_history_limit,
    }
}

fn options(replicas: Option<i32>, revision_history_limit: Option<i32>) -> EditDeployOptions {
    EditDeployOptions::complete(&args(&[TEST_DEPLOYMENT], replicas, revision_history_limit)).unwrap()
}

fn usage_message(res: anyhow::Result<impl std::fmt::Debug>) -> String {
    let err = res.unwrap_err();
    assert!(matches!(err.downcast_ref::<EditError>(), Some(EditError::Usage(_))));
    format!("{err}")
}

fn no_jitter() -> RetryPolicy {
    RetryPolicy { jitter: 0.0, ..Default::default() }
}

#[rstest]
#[case::no_args(&[])]
#[case::empty_name(&[""])]
fn test_complete_missing_name(#[case] names: &[&str]) {
    let msg = usage_message(EditDeployOptions::complete(&args(names, Some(3), None)));
    assert_eq!(msg, "deployment name not specified");
}

#[rstest]
fn test_validate_too_many_args() {
    let opts = EditDeployOptions::complete(&args(&["web", "api"], Some(3), None)).unwrap();
    assert_starts_with!(usage_message(opts.validate()), "exactly one deployment name is allowed, got 2");
}

#[rstest]
#[case::zero_replicas(Some(0), None, "invalid number of replicas")]
#[case::negative_replicas(Some(-2), None, "invalid number of replicas")]
#[case::negative_history_limit(None, Some(-1), "invalid revision history limit")]
fn test_validate_bad_values(
    #[case] replicas: Option<i32>,
    #[case] revision_history_limit: Option<i32>,
    #[case] expected: &str,
) {
    let opts = options(replicas, revision_history_limit);
    assert_starts_with!(usage_message(opts.validate()), expected);
}

#[rstest]
#[case::replicas_only(Some(1), None)]
#[case::history_limit_zero(None, Some(0))]
#[case::both(Some(5), Some(3))]
#[case::neither(None, None)]
fn test_validate_ok(#[case] replicas: Option<i32>, #[case] revision_history_limit: Option<i32>) {
    options(replicas, revision_history_limit).validate().unwrap();
}

#[rstest]
#[case::replicas_only(Some(5), None, Some(5), Some(TEST_REVISION_HISTORY_LIMIT))]
#[case::history_limit_only(None, Some(2), Some(TEST_REPLICAS), Some(2))]
#[case::both(Some(5), Some(2), Some(5), Some(2))]
fn test_apply_field_independence(
    test_deployment: appsv1::Deployment,
    #[case] replicas: Option<i32>,
    #[case] revision_history_limit: Option<i32>,
    #[case] expected_replicas: Option<i32>,
    #[case] expected_limit: Option<i32>,
) {
    let depl = options(replicas, revision_history_limit).apply(test_deployment.clone());
    let spec = depl.spec.unwrap();
    assert_eq!(spec.replicas, expected_replicas);
    assert_eq!(spec.revision_history_limit, expected_limit);
    assert_eq!(depl.metadata, test_deployment.metadata);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_updates_replicas(test_deployment: appsv1::Deployment) {
    let store = FakeStore::new(test_deployment);
    let mut out: Vec<u8> = vec![];

    options(Some(5), None).run(&store, &no_jitter(), &mut out).await.unwrap();

    let spec = store.object().unwrap().spec.unwrap();
    assert_eq!(spec.replicas, Some(5));
    assert_eq!(spec.revision_history_limit, Some(TEST_REVISION_HISTORY_LIMIT));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("deployment.apps/{TEST_DEPLOYMENT} updated (replicas: 5, revisionHistoryLimit: 10)\n")
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_twice_is_idempotent(test_deployment: appsv1::Deployment) {
    let store = FakeStore::new(test_deployment);
    let opts = options(Some(5), None);

    opts.run(&store, &no_jitter(), &mut std::io::sink()).await.unwrap();
    let first = store.object().unwrap().spec;
    opts.run(&store, &no_jitter(), &mut std::io::sink()).await.unwrap();

    assert_eq!(store.object().unwrap().spec, first);
    assert_eq!(store.writes(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_merges_onto_concurrent_writes(test_deployment: appsv1::Deployment) {
    let store = FakeStore::new(test_deployment).with_interlopers(2, |depl: &mut appsv1::Deployment| {
        depl.spec.as_mut().unwrap().revision_history_limit = Some(42);
    });

    options(Some(5), None).run(&store, &no_jitter(), &mut std::io::sink()).await.unwrap();

    let spec = store.object().unwrap().spec.unwrap();
    assert_eq!(spec.replicas, Some(5));
    assert_eq!(spec.revision_history_limit, Some(42));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_conflicts_exhausted(test_deployment: appsv1::Deployment) {
    let store = FakeStore::new(test_deployment).with_interlopers(100, |_: &mut appsv1::Deployment| {});
    let mut out: Vec<u8> = vec![];

    let err = options(Some(5), None)
        .run(&store, &no_jitter(), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err.downcast_ref::<EditError>(), Some(EditError::ConflictExhausted(_))));
    assert_eq!(store.object().unwrap().spec.unwrap().replicas, Some(TEST_REPLICAS));
    assert_is_empty!(out);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_view_only(test_deployment: appsv1::Deployment) {
    let store = FakeStore::new(test_deployment);
    let mut out: Vec<u8> = vec![];

    options(None, None).run(&store, &no_jitter(), &mut out).await.unwrap();

    assert_eq!(store.replaces(), 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("deployment.apps/{TEST_DEPLOYMENT} replicas: 3, revisionHistoryLimit: 10\n")
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_run_view_only_not_found() {
    let store = FakeStore::<appsv1::Deployment>::empty();

    let err = options(None, None).run(&store, &no_jitter(), &mut std::io::sink()).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<EditError>(), Some(EditError::NotFound(_))));
}

#[rstest]
#[tokio::test]
async fn test_run_against_apiserver(test_deployment: appsv1::Deployment) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let mut updated = test_deployment.clone();
    updated.spec.as_mut().unwrap().replicas = Some(5);
    fake_apiserver
        .handle(move |when, then| {
            when.method(GET).path(deployment_path(TEST_NAMESPACE, TEST_DEPLOYMENT));
            then.json_body_obj(&test_deployment);
        })
        .handle(move |when, then| {
            when.method(PUT)
                .path(deployment_path(TEST_NAMESPACE, TEST_DEPLOYMENT))
                .body_matches("\"replicas\":5")
                .body_matches("\"revisionHistoryLimit\":10");
            then.json_body_obj(&updated);
        })
        .build();
    let depl_api = kube::Api::<appsv1::Deployment>::namespaced(client, TEST_NAMESPACE);

    options(Some(5), None).run(&depl_api, &Default::default(), &mut std::io::sink()).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_run_against_apiserver_not_found() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle_not_found(deployment_path(TEST_NAMESPACE, TEST_DEPLOYMENT))
        .build();
    let depl_api = kube::Api::<appsv1::Deployment>::namespaced(client, TEST_NAMESPACE);

    let err = options(Some(5), None)
        .run(&depl_api, &Default::default(), &mut std::io::sink())
        .await
        .unwrap_err();

    fake_apiserver.assert();
    assert!(matches!(err.downcast_ref::<EditError>(), Some(EditError::NotFound(_))));
}
