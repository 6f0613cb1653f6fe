use crate::moves::types::Move;

// Make sure MATE_THRESHOLD matches what we define in search.rs (30000)
pub const MATE_THRESHOLD: i32 = 30000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeType {
    Exact = 0,
    LowerBound = 1, // Beta cutoff (failed high)
    UpperBound = 2, // Alpha cutoff (failed low)
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Option<Move>,
    pub score: i16,
    pub depth: u8,
    pub bound: u8, // 0=Exact, 1=Lower, 2=Upper
    pub generation: u8,
}

const EMPTY_ENTRY: TTEntry = TTEntry {
    key: 0,
    best_move: None,
    score: 0,
    depth: 0,
    bound: 0,
    generation: 0,
};

/// Two slots per bucket: `depth_preferred` only yields to an entry that is
/// at least as deep (or from a stale generation), `always_replace` takes
/// whatever was just evicted from its sibling. Keeps shallow, frequently
/// revisited positions (near the root, in repetitive lines) from being
/// bumped out by a single deep probe elsewhere with the same index.
#[derive(Clone, Copy)]
struct Bucket {
    depth_preferred: TTEntry,
    always_replace: TTEntry,
}

const EMPTY_BUCKET: Bucket = Bucket {
    depth_preferred: EMPTY_ENTRY,
    always_replace: EMPTY_ENTRY,
};

pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    pub generation: u8,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        // Allocate TT based on size in MB.
        let bucket_size = std::mem::size_of::<Bucket>();
        let num_buckets = (size_mb * 1024 * 1024) / bucket_size;

        // Round down to power of 2
        let mut capacity = 1;
        while capacity * 2 <= num_buckets {
            capacity *= 2;
        }

        Self {
            buckets: vec![EMPTY_BUCKET; capacity],
            generation: 0,
        }
    }

    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = EMPTY_BUCKET;
        }
        self.generation = 0;
    }

    pub fn save(
        &mut self,
        key: u64,
        mv: Option<Move>,
        score: i32,
        depth: u8,
        bound: u8,
        _ply: i32,
    ) {
        // Safety clamp
        let score_i16 = score.clamp(-32000, 32000) as i16;

        let index = (key as usize) & (self.buckets.len() - 1);
        let bucket = &mut self.buckets[index];
        let generation = self.generation;

        let preferred = &mut bucket.depth_preferred;
        if preferred.key == 0
            || preferred.key == key
            || depth >= preferred.depth
            || preferred.generation != generation
        {
            let best_move = if mv.is_some() { mv } else { preferred.best_move };
            let evicted = *preferred;
            *preferred = TTEntry {
                key,
                best_move,
                score: score_i16,
                depth,
                bound,
                generation,
            };
            if evicted.key != 0 && evicted.key != key {
                bucket.always_replace = evicted;
            }
            return;
        }

        let slot = &mut bucket.always_replace;
        let best_move = if mv.is_some() {
            mv
        } else if slot.key == key {
            slot.best_move
        } else {
            None
        };
        *slot = TTEntry {
            key,
            best_move,
            score: score_i16,
            depth,
            bound,
            generation,
        };
    }

    pub fn probe(
        &self,
        key: u64,
        _depth: u8,
        _alpha: i32,
        _beta: i32,
        _ply: i32,
    ) -> Option<(Option<Move>, i32, u8, u8)> {
        let index = (key as usize) & (self.buckets.len() - 1);
        let bucket = &self.buckets[index];

        if bucket.depth_preferred.key == key {
            let entry = &bucket.depth_preferred;
            return Some((entry.best_move, entry.score as i32, entry.depth, entry.bound));
        }
        if bucket.always_replace.key == key {
            let entry = &bucket.always_replace;
            return Some((entry.best_move, entry.score as i32, entry.depth, entry.bound));
        }
        None
    }
}
