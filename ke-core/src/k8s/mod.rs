mod config;
mod retry;
mod store;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use config::*;
pub use retry::*;
pub use store::*;

#[cfg(test)]
mod tests;
