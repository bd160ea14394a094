use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::PostParams;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::prelude::*;

// The three outcomes the retry loop needs to tell apart; anything that isn't a
// missing object or a stale resourceVersion is passed through untouched.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<kube::Error> for StoreError {
    fn from(err: kube::Error) -> StoreError {
        match err {
            kube::Error::Api(resp) if resp.code == HTTP_NOT_FOUND => StoreError::NotFound(resp.message),
            kube::Error::Api(resp) if resp.code == HTTP_CONFLICT => StoreError::Conflict(resp.message),
            e => StoreError::Other(e.into()),
        }
    }
}

/// A named, versioned object store.  The kind (and namespace, for namespaced kinds) is bound
/// into the store itself, so callers only ever deal in object names.
///
/// `replace` must reject an object whose resourceVersion doesn't match the stored one with
/// [`StoreError::Conflict`] instead of overwriting it.
#[async_trait]
pub trait ObjectStore<K>: Send + Sync {
    async fn get(&self, name: &str) -> Result<K, StoreError>;
    async fn replace(&self, name: &str, obj: &K) -> Result<K, StoreError>;
}

#[async_trait]
impl<K> ObjectStore<K> for kube::Api<K>
where
    K: Clone + Debug + DeserializeOwned + Serialize + Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<K, StoreError> {
        Ok(kube::Api::get(self, name).await?)
    }

    async fn replace(&self, name: &str, obj: &K) -> Result<K, StoreError> {
        Ok(kube::Api::replace(self, name, &PostParams::default(), obj).await?)
    }
}
