//! Seed sources and persistence.
//!
//! A session has one active seed. It comes from the wall clock by default
//! or from the user (command line, seed file, or the interactive prompt),
//! and can be written back out as plain decimal text.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, TerrainError};

/// Default file name for "Download Seed".
pub const DEFAULT_SEED_FILE: &str = "seed.txt";

/// Seconds since the Unix epoch. Two sessions started in the same second
/// get the same terrain.
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// A fresh generator for `seed`. Every regeneration builds a new one, so
/// the terrain depends on the seed alone.
pub fn rng_for_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Parse a user-supplied seed. Surrounding whitespace is ignored.
pub fn parse_seed(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    trimmed.parse::<u64>().map_err(|source| TerrainError::SeedParse {
        input: trimmed.to_string(),
        source,
    })
}

/// Write `seed` as decimal text, replacing the file.
pub fn save_seed(path: impl AsRef<Path>, seed: u64) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, seed.to_string()).map_err(|e| TerrainError::io(path, e))?;
    tracing::info!("Seed {} saved to {}", seed, path.display());
    Ok(())
}

/// Read a seed previously written by [`save_seed`].
pub fn load_seed(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| TerrainError::io(path, e))?;
    parse_seed(&contents)
}

/// Ask for a seed on `output` and read one line from `input`.
pub fn prompt_seed<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<u64> {
    write!(output, "Enter seed: ").map_err(TerrainError::Prompt)?;
    output.flush().map_err(TerrainError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(TerrainError::Prompt)?;
    parse_seed(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("terrain_viewer_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("  1700000000\n").unwrap(), 1_700_000_000);
        assert!(matches!(parse_seed("-1"), Err(TerrainError::SeedParse { .. })));
        assert!(matches!(parse_seed("abc"), Err(TerrainError::SeedParse { .. })));
        assert!(matches!(parse_seed(""), Err(TerrainError::SeedParse { .. })));
    }

    #[test]
    fn test_save_writes_plain_decimal() {
        let path = temp_path("plain.txt");
        save_seed(&path, 12345).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "12345");
        assert_eq!(load_seed(&path).unwrap(), 12345);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_overwrites() {
        let path = temp_path("overwrite.txt");
        save_seed(&path, 99999999).unwrap();
        save_seed(&path, 7).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let path = temp_path("no_such_dir").join("seed.txt");
        assert!(matches!(save_seed(&path, 1), Err(TerrainError::Io { .. })));
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut out = Vec::new();
        let seed = prompt_seed(Cursor::new("314\n271\n"), &mut out).unwrap();

        assert_eq!(seed, 314);
        assert_eq!(String::from_utf8(out).unwrap(), "Enter seed: ");
    }

    #[test]
    fn test_prompt_rejects_garbage() {
        let result = prompt_seed(Cursor::new("not a seed\n"), Vec::new());
        assert!(matches!(result, Err(TerrainError::SeedParse { .. })));
    }

    #[test]
    fn test_clock_seed_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(clock_seed() > 1_577_836_800);
    }

    #[test]
    fn test_rng_for_seed_is_reproducible() {
        use rand::Rng;
        let mut a = rng_for_seed(5);
        let mut b = rng_for_seed(5);
        for _ in 0..8 {
            assert_eq!(a.gen::<u32>(), b.gen::<u32>());
        }
    }
}
