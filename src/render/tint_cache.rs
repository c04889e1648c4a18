use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::render::{WHITE_TINT, round_color};
use crate::texture::{BaseTexture, PixelBuffer};

/// Channel quantization step for cache keys.
pub const TINT_ROUND_STEP: u8 = 8;
pub const DEFAULT_TINT_CACHE_CAPACITY: usize = 256;

/// Bounded cache of tinted copies of base texture pixels.
///
/// Keys are `(base texture id, rounded tint)`. When full, the oldest entry is
/// evicted first.
#[derive(Debug, Clone)]
pub struct TintCache {
    capacity: usize,
    entries: IndexMap<(u64, u32), Rc<PixelBuffer>>,
    hits: u64,
    misses: u64,
}

impl Default for TintCache {
    fn default() -> Self {
        Self::new(DEFAULT_TINT_CACHE_CAPACITY)
    }
}

impl TintCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity.min(DEFAULT_TINT_CACHE_CAPACITY)),
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.shift_remove_index(0);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    #[must_use]
    pub fn contains(&self, base_id: u64, tint: u32) -> bool {
        self.entries
            .contains_key(&(base_id, round_color(tint, TINT_ROUND_STEP)))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Tinted pixels of `base`, or `None` when it has no resource yet.
    pub fn get_or_tint(&mut self, base: &BaseTexture, tint: u32) -> Option<Rc<PixelBuffer>> {
        let source = base.drawable_source()?;
        let rounded = round_color(tint & WHITE_TINT, TINT_ROUND_STEP);
        let key = (base.id(), rounded);

        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            return Some(Rc::clone(cached));
        }

        self.misses += 1;
        let tinted = Rc::new(source.tinted(rounded));
        if self.capacity == 0 {
            return Some(tinted);
        }
        if self.entries.len() >= self.capacity {
            if let Some(((evicted_id, evicted_tint), _)) = self.entries.shift_remove_index(0) {
                trace!(evicted_id, evicted_tint, "evict tinted texture");
            }
        }
        trace!(base_id = base.id(), tint = rounded, "cache tinted texture");
        self.entries.insert(key, Rc::clone(&tinted));
        Some(tinted)
    }
}
