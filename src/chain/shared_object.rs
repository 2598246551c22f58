//! Shared-object reference cache.
//!
//! Entry functions take shared objects by `(id, initial_shared_version,
//! mutable)`. The initial shared version never changes after an object is
//! shared, so resolutions are memoized for the lifetime of the client — one
//! RPC round-trip per object id, ever. The cache lives on the client
//! instance; separate clients never share entries.

use crate::chain::rpc::{ChainRpc, SharedObjectInfo};
use crate::chain::types::ObjectArg;
use crate::error::SdkError;
use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct SharedObjectCache {
    entries: RwLock<HashMap<String, SharedObjectInfo>>,
}

impl SharedObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a shared object into a call argument.
    ///
    /// Mutability is applied per call on top of the cached resolution, so the
    /// same object can be passed read-only to one entry function and mutable
    /// to another.
    pub async fn resolve(
        &self,
        rpc: &Arc<dyn ChainRpc>,
        object_id: &str,
        mutable: bool,
    ) -> Result<ObjectArg, SdkError> {
        if object_id.is_empty() {
            return Err(SdkError::Validation(
                "shared object id is empty".to_string(),
            ));
        }

        {
            let cache = self.entries.read().await;
            if let Some(info) = cache.get(object_id) {
                return Ok(as_arg(info, mutable));
            }
        }

        let info = rpc
            .get_shared_object(object_id)
            .await
            .map_err(SdkError::Chain)?;
        tracing::debug!(object_id, version = info.initial_shared_version, "cached shared object");
        self.entries
            .write()
            .await
            .insert(object_id.to_string(), info);
        Ok(as_arg(&info, mutable))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn as_arg(info: &SharedObjectInfo, mutable: bool) -> ObjectArg {
    ObjectArg::Shared {
        id: info.object_id,
        initial_shared_version: info.initial_shared_version,
        mutable,
    }
}
