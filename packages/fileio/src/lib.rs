//! # pz-fileio
//!
//! One value, one file: [`FileHandle`] wraps a path and an optional read
//! stream and exposes everything commonly done to a single file through it.
//!
//! ## Operations
//!
//! ```text
//! lifecycle   open / close / scope / with_open
//! queries     exists / basename / dirname / absolute_path / file_size /
//!             mime_type / is_empty
//! mutation    create / delete / recreate / append / overwrite
//! text        read / read_lines
//! json        read_as_json / read_json_as / write_as_json
//! csv         read_as_csv / write_as_csv
//! integrity   hash / hash_named / backup
//! ```
//!
//! Every fallible operation returns [`Result`]; operations that change the
//! file return `&mut FileHandle` so they chain with `?`. Nothing touches the
//! disk until an operation is called.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pz_fileio::{FileHandle, HashAlgorithm};
//!
//! let mut file = FileHandle::new(["reports", "daily.json"]);
//! file.create()?.write_as_json(&serde_json::json!({"rows": 12}))?;
//!
//! let report = file.with_open(|f| f.read_as_json())?;
//! let checksum = file.hash(HashAlgorithm::Sha256)?;
//! let backup_path = file.backup()?;
//! ```
//!
//! Diagnostics go through the `log` facade; install any logger to see them.

pub mod backup;
pub mod delimited;
pub mod digest;
pub mod error;
pub mod handle;
pub mod json;
pub mod options;
pub mod scope;

pub use digest::HashAlgorithm;
pub use error::{Error, Result};
pub use handle::FileHandle;
pub use options::{BackupClock, FileOptions};
pub use scope::OpenScope;
