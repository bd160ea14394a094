// Namespace used when neither the command line nor the kubeconfig context names one
pub const DEFAULT_NAMESPACE: &str = "default";

// Conflict retry defaults; these match the usual client-side "default retry" policy
pub const DEFAULT_RETRY_STEPS: u32 = 5;
pub const DEFAULT_RETRY_DELAY_MILLIS: u64 = 10;
pub const DEFAULT_RETRY_FACTOR: f64 = 1.0;
pub const DEFAULT_RETRY_JITTER: f64 = 0.1;

// HTTP status codes returned by the apiserver that we care about
pub const HTTP_NOT_FOUND: u16 = 404;
pub const HTTP_CONFLICT: u16 = 409;
