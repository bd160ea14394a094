pub const TEST_DEPLOYMENT: &str = "the-deployment";
pub const TEST_CLUSTER_ROLE: &str = "the-cluster-role";
pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_RESOURCE_VERSION: &str = "1234";

pub const TEST_REPLICAS: i32 = 3;
pub const TEST_REVISION_HISTORY_LIMIT: i32 = 10;
