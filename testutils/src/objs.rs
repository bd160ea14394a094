use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::api::rbac::v1 as rbacv1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::fixture;

use crate::constants::*;

#[fixture]
pub fn test_deployment(#[default(TEST_DEPLOYMENT)] name: &str) -> appsv1::Deployment {
    appsv1::Deployment {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            namespace: Some(TEST_NAMESPACE.into()),
            resource_version: Some(TEST_RESOURCE_VERSION.into()),
            ..Default::default()
        },
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(TEST_REPLICAS),
            revision_history_limit: Some(TEST_REVISION_HISTORY_LIMIT),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn policy_rule(verbs: &[&str], resources: &[&str], api_groups: &[&str]) -> rbacv1::PolicyRule {
    rbacv1::PolicyRule {
        verbs: verbs.iter().map(|v| v.to_string()).collect(),
        resources: Some(resources.iter().map(|r| r.to_string()).collect()),
        api_groups: Some(api_groups.iter().map(|g| g.to_string()).collect()),
        ..Default::default()
    }
}

#[fixture]
pub fn test_cluster_role(#[default(TEST_CLUSTER_ROLE)] name: &str) -> rbacv1::ClusterRole {
    rbacv1::ClusterRole {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            resource_version: Some(TEST_RESOURCE_VERSION.into()),
            ..Default::default()
        },
        rules: Some(vec![policy_rule(&["get"], &["pods"], &[""])]),
        ..Default::default()
    }
}
