use std::sync::Mutex;

use async_trait::async_trait;
use kube::Resource;

use crate::prelude::*;

type Interloper<K> = Box<dyn Fn(&mut K) + Send + Sync>;

// In-memory stand-in for the apiserver that enforces resourceVersion checks.  It can also
// simulate other writers racing with us: each "interloper" write lands between our get and
// our replace, so the replace we send carries a stale version and gets rejected.
pub struct FakeStore<K> {
    state: Mutex<FakeStoreState<K>>,
}

struct FakeStoreState<K> {
    object: Option<K>,
    version: u64,
    interlopers: usize,
    interloper: Option<Interloper<K>>,
    get_error: Option<String>,
    replace_error: Option<String>,
    gets: usize,
    replaces: usize,
    writes: usize,
}

impl<K> FakeStore<K>
where
    K: Resource + Clone + Send + Sync,
{
    pub fn new(object: K) -> FakeStore<K> {
        FakeStore::with_object(Some(object))
    }

    pub fn empty() -> FakeStore<K> {
        FakeStore::with_object(None)
    }

    fn with_object(object: Option<K>) -> FakeStore<K> {
        let mut store = FakeStore {
            state: Mutex::new(FakeStoreState {
                object,
                version: 1,
                interlopers: 0,
                interloper: None,
                get_error: None,
                replace_error: None,
                gets: 0,
                replaces: 0,
                writes: 0,
            }),
        };
        store.state.get_mut().unwrap().stamp_version();
        store
    }

    // The next `count` replace calls each lose a race against a concurrent writer that applies
    // `write` to the stored object first
    pub fn with_interlopers<F>(self, count: usize, write: F) -> FakeStore<K>
    where
        F: Fn(&mut K) + Send + Sync + 'static,
    {
        {
            let mut state = self.state.lock().unwrap();
            state.interlopers = count;
            state.interloper = Some(Box::new(write));
        }
        self
    }

    // Every get call fails with a non-not-found error
    pub fn with_get_error(self, msg: &str) -> FakeStore<K> {
        self.state.lock().unwrap().get_error = Some(msg.into());
        self
    }

    // Every replace call fails with a non-conflict error
    pub fn with_replace_error(self, msg: &str) -> FakeStore<K> {
        self.state.lock().unwrap().replace_error = Some(msg.into());
        self
    }

    pub fn object(&self) -> Option<K> {
        self.state.lock().unwrap().object.clone()
    }

    pub fn version(&self) -> u64 {
        self.state.lock().unwrap().version
    }

    pub fn gets(&self) -> usize {
        self.state.lock().unwrap().gets
    }

    pub fn replaces(&self) -> usize {
        self.state.lock().unwrap().replaces
    }

    // Number of writes that actually landed, including interloper writes
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

impl<K: Resource> FakeStoreState<K> {
    fn stamp_version(&mut self) {
        let version = self.version.to_string();
        if let Some(obj) = self.object.as_mut() {
            obj.meta_mut().resource_version = Some(version);
        }
    }

    fn commit(&mut self, obj: K) {
        self.object = Some(obj);
        self.version += 1;
        self.writes += 1;
        self.stamp_version();
    }
}

#[async_trait]
impl<K> ObjectStore<K> for FakeStore<K>
where
    K: Resource + Clone + Send + Sync,
{
    async fn get(&self, name: &str) -> Result<K, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.gets += 1;

        if let Some(msg) = &state.get_error {
            return Err(StoreError::Other(anyhow::anyhow!("{msg}")));
        }
        state
            .object
            .clone()
            .ok_or_else(|| StoreError::NotFound(format!("\"{name}\" not found")))
    }

    async fn replace(&self, name: &str, obj: &K) -> Result<K, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.replaces += 1;

        if let Some(msg) = &state.replace_error {
            return Err(StoreError::Other(anyhow::anyhow!("{msg}")));
        }

        if state.interlopers > 0 {
            state.interlopers -= 1;
            let mut current = state
                .object
                .clone()
                .ok_or_else(|| StoreError::NotFound(format!("\"{name}\" not found")))?;
            if let Some(write) = &state.interloper {
                write(&mut current);
            }
            state.commit(current);
        }

        let Some(current) = &state.object else {
            return Err(StoreError::NotFound(format!("\"{name}\" not found")));
        };
        if obj.meta().resource_version != current.meta().resource_version {
            return Err(StoreError::Conflict(format!(
                "the object has been modified; please apply your changes to the latest version ({name})"
            )));
        }

        state.commit(obj.clone());
        Ok(state.object.clone().expect("object was just written"))
    }
}
