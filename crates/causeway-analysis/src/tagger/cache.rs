//! On-disk cache of matcher output.
//!
//! Layout: `<root>/<pattern dir>/<xxh3 of input trees, hex>`. The pattern
//! directory is the query text with `/` replaced by `\`; names longer than
//! 255 bytes keep a 235-byte prefix followed by the decimal xxh3 of the
//! full name.

use std::io::Write;
use std::path::{Path, PathBuf};

use causeway_core::constants::{MAX_PATTERN_DIR_LEN, TRUNCATED_PATTERN_DIR_LEN};
use causeway_core::errors::TaggerError;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Clone)]
pub struct MatchCache {
    root: PathBuf,
}

impl MatchCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem-safe directory name for a query.
    pub fn pattern_dir_name(pattern: &str) -> String {
        let escaped = pattern.replace('/', "\\");
        if escaped.len() <= MAX_PATTERN_DIR_LEN {
            return escaped;
        }
        let mut cut = TRUNCATED_PATTERN_DIR_LEN;
        while !escaped.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}{}", &escaped[..cut], xxh3_64(escaped.as_bytes()))
    }

    /// Where output for `pattern` over `input` lives.
    pub fn entry_path(&self, pattern: &str, input: &[u8]) -> PathBuf {
        self.root
            .join(Self::pattern_dir_name(pattern))
            .join(format!("{:016x}", xxh3_64(input)))
    }

    /// Store output atomically. Concurrent writers of the same entry race
    /// harmlessly: the content is identical and the last rename wins.
    pub fn store(&self, entry: &Path, output: &[u8]) -> Result<(), TaggerError> {
        let dir = entry.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).map_err(|e| TaggerError::cache_io(dir, e))?;
        let mut scratch = tempfile::NamedTempFile::new_in(dir).map_err(|e| TaggerError::cache_io(dir, e))?;
        scratch
            .write_all(output)
            .and_then(|()| scratch.flush())
            .map_err(|e| TaggerError::cache_io(scratch.path(), e))?;
        scratch
            .persist(entry)
            .map_err(|e| TaggerError::cache_io(entry, e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashes_are_escaped() {
        assert_eq!(MatchCache::pattern_dir_name("/^a_[0-9]+$/=x"), "\\^a_[0-9]+$\\=x");
    }

    #[test]
    fn long_names_are_truncated_and_hashed() {
        let long_a = format!("{}a", "x".repeat(300));
        let long_b = format!("{}b", "x".repeat(300));
        let a = MatchCache::pattern_dir_name(&long_a);
        let b = MatchCache::pattern_dir_name(&long_b);
        assert!(a.len() <= MAX_PATTERN_DIR_LEN);
        assert!(a.starts_with(&"x".repeat(TRUNCATED_PATTERN_DIR_LEN)));
        assert_ne!(a, b);
    }

    #[test]
    fn entries_differ_by_input() {
        let cache = MatchCache::new("/cache");
        let one = cache.entry_path("p", b"(a)\n");
        let two = cache.entry_path("p", b"(b)\n");
        assert_eq!(one.parent(), two.parent());
        assert_ne!(one, two);
    }

    #[test]
    fn store_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MatchCache::new(dir.path());
        let entry = cache.entry_path("(A < B)", b"trees");
        cache.store(&entry, b"1:\n\n").unwrap();
        cache.store(&entry, b"1:\n\n").unwrap();
        assert_eq!(std::fs::read(&entry).unwrap(), b"1:\n\n");
    }
}
