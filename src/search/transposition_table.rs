//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct indexing (`key mod size`) with depth-preferred replacement: a slot
//! is overwritten when it holds another position or when the new result was
//! searched at least as deep.

use crate::moves::draughts_move::MoveKey;

/// How the stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    /// Fail-low: the true score is at most `score`.
    Alpha,
    /// Fail-high: the true score is at least `score`.
    Beta,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub score: i32,
    pub depth: i32,
    pub flag: TTFlag,
    pub best_move: MoveKey,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl TranspositionTable {
    pub const DEFAULT_SIZE_BITS: u32 = 24;

    /// Table with `2^size_bits` slots.
    pub fn with_size_bits(size_bits: u32) -> Self {
        let count = 1usize << size_bits.min(usize::BITS - 1);
        Self {
            entries: vec![None; count],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(key)].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        let replace = match self.entries[idx] {
            None => true,
            Some(existing) => existing.key != entry.key || entry.depth >= existing.depth,
        };
        if replace {
            self.entries[idx] = Some(entry);
        }
    }
}
