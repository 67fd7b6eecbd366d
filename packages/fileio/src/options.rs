//! Per-handle configuration.
//!
//! `FileOptions` is a plain value: construct it in code, or deserialize it
//! out of a host application's own configuration file.
//!
//! ```rust,ignore
//! let options = FileOptions::default()
//!     .with_json_indent(2)
//!     .with_backup_clock(BackupClock::Utc);
//! let file = FileHandle::with_options(["data", "report.json"], options);
//! ```

use serde::{Deserialize, Serialize};

/// Which clock stamps backup file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupClock {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Spaces per indentation level in written JSON.
    pub json_indent: usize,
    /// Bytes read per chunk while hashing; zero means the default. Read it
    /// through [`FileOptions::hash_chunk_size`].
    pub hash_chunk_size: usize,
    pub backup_clock: BackupClock,
}

impl FileOptions {
    pub const DEFAULT_JSON_INDENT: usize = 4;
    pub const DEFAULT_HASH_CHUNK_SIZE: usize = 4096;

    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    pub fn with_hash_chunk_size(mut self, size: usize) -> Self {
        self.hash_chunk_size = size;
        self
    }

    /// The chunk size hashing uses. A configured zero falls back to the
    /// default, however the options were built.
    pub fn hash_chunk_size(&self) -> usize {
        if self.hash_chunk_size == 0 {
            Self::DEFAULT_HASH_CHUNK_SIZE
        } else {
            self.hash_chunk_size
        }
    }

    pub fn with_backup_clock(mut self, clock: BackupClock) -> Self {
        self.backup_clock = clock;
        self
    }
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            json_indent: Self::DEFAULT_JSON_INDENT,
            hash_chunk_size: Self::DEFAULT_HASH_CHUNK_SIZE,
            backup_clock: BackupClock::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let options = FileOptions::default();
        assert_eq!(options.json_indent, 4);
        assert_eq!(options.hash_chunk_size, 4096);
        assert_eq!(options.backup_clock, BackupClock::Local);
    }

    #[test]
    fn zero_chunk_size_falls_back() {
        let options = FileOptions::default().with_hash_chunk_size(0);
        assert_eq!(options.hash_chunk_size(), FileOptions::DEFAULT_HASH_CHUNK_SIZE);

        let options = FileOptions::default().with_hash_chunk_size(512);
        assert_eq!(options.hash_chunk_size(), 512);
    }

    #[test]
    fn deserialized_zero_chunk_size_falls_back() {
        let options: FileOptions =
            serde_json::from_value(json!({"hash_chunk_size": 0})).unwrap();
        assert_eq!(options.hash_chunk_size(), FileOptions::DEFAULT_HASH_CHUNK_SIZE);
    }

    #[test]
    fn deserialize_partial_config() {
        let options: FileOptions =
            serde_json::from_value(json!({"backup_clock": "utc"})).unwrap();
        assert_eq!(options.backup_clock, BackupClock::Utc);
        assert_eq!(options.json_indent, 4);
        assert_eq!(options.hash_chunk_size, 4096);
    }
}
