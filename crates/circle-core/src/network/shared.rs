//! A cloneable, thread-safe handle to one [`SocialNetwork`].

use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use super::SocialNetwork;
use crate::config::NetworkConfig;

/// Shared ownership of a network behind a reader/writer lock.
///
/// Readers run concurrently; each `write` call is one exclusive mutation.
/// Network mutations validate before they write, so a panic in another
/// holder cannot leave the indices half-updated and a poisoned lock is
/// recovered rather than propagated.
#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    inner: Arc<RwLock<SocialNetwork>>,
}

impl SharedNetwork {
    #[must_use]
    pub fn new(network: SocialNetwork) -> Self {
        Self {
            inner: Arc::new(RwLock::new(network)),
        }
    }

    #[must_use]
    pub fn with_config(config: NetworkConfig) -> Self {
        Self::new(SocialNetwork::with_config(config))
    }

    /// Run `f` under the shared lock.
    pub fn read<T>(&self, f: impl FnOnce(&SocialNetwork) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(|poisoned| {
            warn!("network lock poisoned; recovering for read");
            PoisonError::into_inner(poisoned)
        });
        f(&guard)
    }

    /// Run `f` under the exclusive lock.
    pub fn write<T>(&self, f: impl FnOnce(&mut SocialNetwork) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| {
            warn!("network lock poisoned; recovering for write");
            PoisonError::into_inner(poisoned)
        });
        f(&mut guard)
    }
}

impl From<SocialNetwork> for SharedNetwork {
    fn from(network: SocialNetwork) -> Self {
        Self::new(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use std::thread;

    #[test]
    fn concurrent_writers_get_distinct_ids() {
        let shared = SharedNetwork::default();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.write(|net| {
                        net.add_profile(format!("user-{n}"), "", "")
                            .map(|p| p.id())
                            .expect("unique triple")
                    })
                })
            })
            .collect();

        let mut ids: Vec<UserId> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(shared.read(SocialNetwork::len), 8);
        assert!(shared.read(SocialNetwork::audit).is_ok());
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = SharedNetwork::default();
        shared
            .write(|net| net.add_profile("Anna", "", "").map(|p| p.id()))
            .expect("add");

        let poisoner = shared.clone();
        let result = thread::spawn(move || {
            poisoner.write(|net| {
                if !net.is_empty() {
                    panic!("boom");
                }
            });
        })
        .join();
        assert!(result.is_err());

        assert_eq!(shared.read(SocialNetwork::len), 1);
        let id = shared
            .write(|net| net.add_profile("Boris", "", "").map(|p| p.id()))
            .expect("add after poison");
        assert_eq!(id, UserId::new(2));
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedNetwork>();
    }
}
