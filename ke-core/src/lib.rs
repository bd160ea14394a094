pub mod constants;
pub mod errors;
pub mod k8s;
pub mod logging;

pub mod prelude {
    pub use k8s_openapi::api::apps::v1 as appsv1;
    pub use k8s_openapi::api::rbac::v1 as rbacv1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kube::ResourceExt;

    pub use crate::constants::*;
    pub use crate::errors::{
        EditError,
        EmptyResult,
    };
    #[cfg(any(test, feature = "testutils"))]
    pub use crate::k8s::testutils::*;
    pub use crate::k8s::{
        KubeConfigFlags,
        ObjectStore,
        RetryPolicy,
        StoreError,
        update_with_retry,
    };
}
