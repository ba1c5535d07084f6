use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockKey = (String, String);

/// In-process mutual exclusion keyed by (user, trading symbol).
///
/// Two SIPs targeting the same holding must not interleave their
/// read-merge-write, or one purchase is lost. Entries are dropped once no
/// guard or waiter refers to them.
#[derive(Clone, Default)]
pub struct HoldingLocks {
    locks: Arc<DashMap<LockKey, Arc<Mutex<()>>>>,
}

/// Exclusive access to one holding, released on drop.
pub struct HoldingGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<LockKey, Arc<Mutex<()>>>>,
    key: LockKey,
}

impl HoldingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the holding of `user_id` in `trading_symbol`.
    pub async fn acquire(&self, user_id: &str, trading_symbol: &str) -> HoldingGuard {
        let key = (user_id.to_string(), trading_symbol.to_string());
        let lock = self.locks.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        HoldingGuard {
            guard: Some(guard),
            locks: self.locks.clone(),
            key,
        }
    }

    /// Number of (user, symbol) pairs currently tracked.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for HoldingGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map holds the lock now: nobody is waiting on it. New
        // acquirers clone under the same shard lock, so the check cannot race.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
