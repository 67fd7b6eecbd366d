//! Content hashing.
//!
//! Files are streamed through the digest in fixed-size chunks
//! (`FileOptions::hash_chunk_size()`, 4096 bytes by default), so hashing never
//! holds the whole file in memory.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::str::FromStr;

use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::error::{Error, Result};
use crate::handle::FileHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b,
    Blake2s,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 12] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Blake2s,
    ];

    /// `blake2b` is the 512-bit variant and `blake2s` the 256-bit one.

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_224 => "sha3_224",
            HashAlgorithm::Sha3_256 => "sha3_256",
            HashAlgorithm::Sha3_384 => "sha3_384",
            HashAlgorithm::Sha3_512 => "sha3_512",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake2s => "blake2s",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; `-` and `_` are ignored, so `SHA-256` parses too.
impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let normalized = normalize_name(name);

        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| normalize_name(algorithm.name()) == normalized)
            .ok_or_else(|| Error::UnsupportedAlgorithm {
                name: name.to_string(),
            })
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

impl FileHandle {
    /// Lowercase hex digest of the file's bytes.
    pub fn hash(&self, algorithm: HashAlgorithm) -> Result<String> {
        let file = File::open(self.path()).map_err(|err| {
            let err = Error::io(self.path(), err);
            log::warn!("Error hashing file: {}", err);
            err
        })?;

        let chunk_size = self.options().hash_chunk_size();
        let digest = match algorithm {
            HashAlgorithm::Md5 => hex_digest::<Md5>(file, chunk_size),
            HashAlgorithm::Sha1 => hex_digest::<Sha1>(file, chunk_size),
            HashAlgorithm::Sha224 => hex_digest::<Sha224>(file, chunk_size),
            HashAlgorithm::Sha256 => hex_digest::<Sha256>(file, chunk_size),
            HashAlgorithm::Sha384 => hex_digest::<Sha384>(file, chunk_size),
            HashAlgorithm::Sha512 => hex_digest::<Sha512>(file, chunk_size),
            HashAlgorithm::Sha3_224 => hex_digest::<Sha3_224>(file, chunk_size),
            HashAlgorithm::Sha3_256 => hex_digest::<Sha3_256>(file, chunk_size),
            HashAlgorithm::Sha3_384 => hex_digest::<Sha3_384>(file, chunk_size),
            HashAlgorithm::Sha3_512 => hex_digest::<Sha3_512>(file, chunk_size),
            HashAlgorithm::Blake2b => hex_digest::<Blake2b512>(file, chunk_size),
            HashAlgorithm::Blake2s => hex_digest::<Blake2s256>(file, chunk_size),
        };
        digest.map_err(|err| Error::io(self.path(), err))
    }

    /// [`hash`](Self::hash) with the algorithm given by name.
    pub fn hash_named(&self, algorithm: &str) -> Result<String> {
        self.hash(algorithm.parse()?)
    }
}

fn hex_digest<D: Digest>(mut reader: impl Read, chunk_size: usize) -> io::Result<String> {
    let mut hasher = D::new();
    let mut chunk = vec![0u8; chunk_size];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => hasher.update(&chunk[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(hex, "{byte:02x}");
    }
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FileOptions;
    use std::path::Path;
    use tempfile::TempDir;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn abc_file(dir: &TempDir, options: FileOptions) -> FileHandle {
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, "abc").unwrap();
        FileHandle::with_options([path], options)
    }

    #[test]
    fn parse_names() {
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("sha_1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!("sha3_256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_256);
        assert_eq!("SHA3-512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_512);
        assert_eq!("blake2b".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake2b);
        assert_eq!("BLAKE2s".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake2s);
    }

    #[test]
    fn parse_unknown_name() {
        let err = "whirlpool".parse::<HashAlgorithm>().unwrap_err();
        match err {
            Error::UnsupportedAlgorithm { name } => assert_eq!(name, "whirlpool"),
            other => panic!("Expected unsupported algorithm, got {:?}", other),
        }
    }

    #[test]
    fn names_round_trip_through_display() {
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<HashAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn known_digests() {
        let dir = TempDir::new().unwrap();
        let file = abc_file(&dir, FileOptions::default());

        assert_eq!(file.hash(HashAlgorithm::default()).unwrap(), ABC_SHA256);
        assert_eq!(
            file.hash(HashAlgorithm::Md5).unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            file.hash_named("sha1").unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn digest_lengths() {
        let dir = TempDir::new().unwrap();
        let file = abc_file(&dir, FileOptions::default());

        assert_eq!(file.hash(HashAlgorithm::Sha224).unwrap().len(), 56);
        assert_eq!(file.hash(HashAlgorithm::Sha384).unwrap().len(), 96);
        assert_eq!(file.hash(HashAlgorithm::Sha512).unwrap().len(), 128);
        assert_eq!(file.hash(HashAlgorithm::Sha3_384).unwrap().len(), 96);
        assert_eq!(file.hash(HashAlgorithm::Sha3_512).unwrap().len(), 128);
    }

    #[test]
    fn known_sha3_and_blake2_digests() {
        let dir = TempDir::new().unwrap();
        let file = abc_file(&dir, FileOptions::default());

        assert_eq!(
            file.hash_named("sha3_224").unwrap(),
            "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf"
        );
        assert_eq!(
            file.hash_named("sha3_256").unwrap(),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(
            file.hash_named("blake2b").unwrap(),
            concat!(
                "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1",
                "7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
            )
        );
        assert_eq!(
            file.hash_named("blake2s").unwrap(),
            "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
        );
    }

    #[test]
    fn empty_file_sha3() {
        let dir = TempDir::new().unwrap();
        let mut file = FileHandle::new([dir.path(), Path::new("empty")]);
        file.create().unwrap();
        assert_eq!(
            file.hash(HashAlgorithm::Sha3_256).unwrap(),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn deserialized_zero_chunk_size_hashes_normally() {
        let dir = TempDir::new().unwrap();
        let options: FileOptions =
            serde_json::from_value(serde_json::json!({"hash_chunk_size": 0})).unwrap();
        let file = abc_file(&dir, options);
        assert_eq!(file.options().hash_chunk_size(), FileOptions::DEFAULT_HASH_CHUNK_SIZE);
        assert_eq!(file.hash(HashAlgorithm::Sha256).unwrap(), ABC_SHA256);
    }

    #[test]
    fn chunk_size_does_not_change_digest() {
        let dir = TempDir::new().unwrap();
        let file = abc_file(&dir, FileOptions::default().with_hash_chunk_size(1));
        assert_eq!(file.hash(HashAlgorithm::Sha256).unwrap(), ABC_SHA256);
    }

    #[test]
    fn empty_file() {
        let dir = TempDir::new().unwrap();
        let mut file = FileHandle::new([dir.path(), Path::new("empty")]);
        file.create().unwrap();
        assert_eq!(
            file.hash(HashAlgorithm::Sha256).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = FileHandle::new([dir.path(), Path::new("missing")]);
        assert!(file.hash(HashAlgorithm::Sha256).unwrap_err().is_not_found());
    }

    #[test]
    fn unknown_name_does_not_touch_disk() {
        let file = FileHandle::from("/definitely/not/here");
        assert!(matches!(
            file.hash_named("crc32"),
            Err(Error::UnsupportedAlgorithm { .. })
        ));
    }
}
