use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::types::{LookupKey, UserId};

type Slot = AsyncMutex<()>;

/// Per-(user, key) async locks so identical lookups run one at a time.
///
/// Slots are held weakly: once every holder and waiter is gone the slot is
/// pruned on the next acquire.
#[derive(Default)]
pub struct InflightLocks {
    slots: Mutex<HashMap<(UserId, LookupKey), Weak<Slot>>>,
}

/// Released on drop
pub struct InflightGuard {
    _guard: OwnedMutexGuard<()>,
}

impl InflightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other lookup for (user, key) is running
    pub async fn acquire(&self, user: &UserId, key: &LookupKey) -> InflightGuard {
        let slot = self.slot(user, key);
        InflightGuard {
            _guard: slot.lock_owned().await,
        }
    }

    fn slot(&self, user: &UserId, key: &LookupKey) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.retain(|_, weak| weak.strong_count() > 0);

        let id = (user.clone(), key.clone());
        if let Some(existing) = slots.get(&id).and_then(Weak::upgrade) {
            return existing;
        }

        let slot = Arc::new(AsyncMutex::new(()));
        slots.insert(id, Arc::downgrade(&slot));
        slot
    }

    /// Number of keys with a live holder or waiter
    pub fn active(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.values().filter(|weak| weak.strong_count() > 0).count()
    }
}
