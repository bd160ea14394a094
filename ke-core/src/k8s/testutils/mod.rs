mod fake_store;

pub use fake_store::*;
