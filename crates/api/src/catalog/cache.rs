//! Optimistic cache for the admin painting projection.
//!
//! Modelled as an explicit cache entry with snapshot/restore operations:
//! every speculative write captures a pre-image first, and an epoch counter
//! invalidates any fill that raced a mutation. One reorder in flight per
//! session is assumed; overlapping reorders are last-writer-wins on the
//! persisted side and epoch-safe on the cache side.

use tokio::sync::RwLock;

use atelier_db::models::painting::{PaintingWithImages, SortUpdate};

#[derive(Default)]
struct Slot {
    /// Bumped by every mutation; a fill tagged with an older epoch is stale
    /// and discarded.
    epoch: u64,
    /// Whether `list` reflects the store as of the last fill or patch.
    fresh: bool,
    list: Option<Vec<PaintingWithImages>>,
}

/// Pre-image of the cache taken before a speculative write.
pub struct ReorderSnapshot {
    list: Option<Vec<PaintingWithImages>>,
}

/// Cached admin projection with optimistic reorder support.
#[derive(Default)]
pub struct AdminCache {
    inner: RwLock<Slot>,
}

impl AdminCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached list, if it is fresh.
    pub async fn get_fresh(&self) -> Option<Vec<PaintingWithImages>> {
        let slot = self.inner.read().await;
        if slot.fresh {
            slot.list.clone()
        } else {
            None
        }
    }

    /// Start a fill: returns the epoch to pass back to [`fill`].
    pub async fn begin_fill(&self) -> u64 {
        self.inner.read().await.epoch
    }

    /// Complete a fill started at `epoch`. Ignored if a mutation bumped the
    /// epoch in the meantime (the fill is stale).
    pub async fn fill(&self, epoch: u64, list: Vec<PaintingWithImages>) {
        let mut slot = self.inner.write().await;
        if slot.epoch == epoch {
            slot.list = Some(list);
            slot.fresh = true;
        }
    }

    /// Mark the cache stale so the next read refetches. The list is kept
    /// (a rolled-back pre-image stays visible until the refetch lands).
    pub async fn invalidate(&self) {
        let mut slot = self.inner.write().await;
        slot.epoch += 1;
        slot.fresh = false;
    }

    /// Speculatively apply a reorder: snapshot the current list, patch the
    /// new sort indexes in, and re-sort. Bumps the epoch so any in-flight
    /// fill is discarded. The caller restores the snapshot if persistence
    /// fails, and invalidates after settling either way.
    pub async fn apply_sort_order(&self, updates: &[SortUpdate]) -> ReorderSnapshot {
        let mut slot = self.inner.write().await;
        slot.epoch += 1;

        let snapshot = ReorderSnapshot {
            list: slot.list.clone(),
        };

        if let Some(list) = slot.list.as_mut() {
            for painting in list.iter_mut() {
                if let Some(update) = updates.iter().find(|u| u.id == painting.painting.id) {
                    painting.painting.sort_index = update.sort_index;
                }
            }
            // Stable sort: ties keep their previous relative order, which
            // already encodes the created_at-descending tiebreak.
            list.sort_by_key(|p| p.painting.sort_index);
            slot.fresh = true;
        }

        snapshot
    }

    /// Restore a pre-image captured by [`apply_sort_order`].
    pub async fn restore(&self, snapshot: ReorderSnapshot) {
        let mut slot = self.inner.write().await;
        slot.epoch += 1;
        slot.list = snapshot.list;
        slot.fresh = slot.list.is_some();
    }
}
