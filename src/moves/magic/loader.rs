//! Obtains a ready-to-use `MagicTables`, generating it if necessary.

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;

/// Fixed seed used under the `deterministic_magic` feature so that builds
/// produce byte-identical tables (and therefore identical perft timing
/// characteristics) across machines.
const DETERMINISTIC_SEED: u64 = 0x4d61_6769_6331_3233; // "Magic123" in ascii hex

#[cfg(feature = "load_magic")]
const CACHE_PATH: &str = "magic_tables.bin";

/// Loads the magic bitboard tables, generating them from scratch on first
/// use. With the `load_magic` feature enabled, a serialized copy is cached
/// on disk so repeated process launches skip the magic-number search.
pub fn load_magic_tables() -> MagicTables {
    #[cfg(feature = "load_magic")]
    {
        if let Some(tables) = try_read_cache() {
            return tables;
        }
        let tables = generate(seed());
        let _ = write_cache(&tables);
        return tables;
    }

    #[cfg(not(feature = "load_magic"))]
    generate(seed())
}

fn seed() -> MagicTableSeed {
    if cfg!(feature = "deterministic_magic") {
        MagicTableSeed::Fixed(DETERMINISTIC_SEED)
    } else {
        MagicTableSeed::Random
    }
}

fn generate(seed: MagicTableSeed) -> MagicTables {
    generate_magic_tables(seed).expect("magic number search should always converge")
}

#[cfg(feature = "load_magic")]
fn try_read_cache() -> Option<MagicTables> {
    let bytes = std::fs::read(CACHE_PATH).ok()?;
    bincode::deserialize(&bytes).ok()
}

#[cfg(feature = "load_magic")]
fn write_cache(tables: &MagicTables) -> std::io::Result<()> {
    let bytes = bincode::serialize(tables).map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(CACHE_PATH, bytes)
}
