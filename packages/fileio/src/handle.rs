//! The `FileHandle` value object.
//!
//! A handle owns one path and, optionally, one buffered read stream over
//! that path. Constructing a handle never touches the disk; the stream is
//! acquired with [`FileHandle::open`] or [`FileHandle::scope`] and released
//! with [`FileHandle::close`], at the end of a scope, or on drop.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::FileOptions;

#[derive(Debug, Default)]
pub struct FileHandle {
    path: PathBuf,
    /// Always `path` opened for reading, never a stale path.
    content: Option<BufReader<File>>,
    options: FileOptions,
}

impl FileHandle {
    /// Join `segments` into one path. An absolute segment restarts the path,
    /// and no segments at all yields the empty path.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        Self::with_options(segments, FileOptions::default())
    }

    pub fn with_options<I, S>(segments: I, options: FileOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let path = segments
            .into_iter()
            .fold(PathBuf::new(), |mut joined, segment| {
                joined.push(segment);
                joined
            });

        Self {
            path,
            content: None,
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    /// Open (or reopen) the path for reading.
    ///
    /// On any failure the held stream is cleared, so a failed reopen never
    /// leaves an old stream behind.
    pub fn open(&mut self) -> Result<&mut Self> {
        self.content = None;

        if !self.exists() {
            log::warn!("File not found: {}", self.path.display());
            return Err(Error::NotFound {
                path: self.path.clone(),
            });
        }

        let file = File::open(&self.path).map_err(|err| {
            log::warn!("Error opening {}: {}", self.path.display(), err);
            Error::io(&self.path, err)
        })?;

        log::debug!("Opened {}", self.path.display());
        self.content = Some(BufReader::new(file));
        Ok(self)
    }

    pub fn close(&mut self) {
        if self.content.take().is_some() {
            log::debug!("Closed {}", self.path.display());
        }
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Final path component, or an empty string when there is none.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Everything before the final component; empty for a bare file name.
    pub fn dirname(&self) -> PathBuf {
        self.path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// The path made absolute against the current directory, with `.` and
    /// `..` resolved lexically. Symlinks are not followed.
    pub fn absolute_path(&self) -> Result<PathBuf> {
        let joined = if self.path.is_absolute() {
            self.path.clone()
        } else {
            std::env::current_dir()
                .map_err(|err| Error::io(&self.path, err))?
                .join(&self.path)
        };
        Ok(normalize_lexically(&joined))
    }

    /// Size in bytes, or `None` if nothing exists at the path.
    pub fn file_size(&self) -> Result<Option<u64>> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io(&self.path, err)),
        }
    }

    /// Guessed from the extension alone.
    pub fn mime_type(&self) -> Option<String> {
        mime_guess::from_path(&self.path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }

    /// A missing file counts as empty.
    pub fn is_empty(&self) -> bool {
        self.file_size().ok().flatten().map_or(true, |len| len == 0)
    }

    /// Create the parent directories and an empty file. An existing file is
    /// left untouched.
    pub fn create(&mut self) -> Result<&mut Self> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
            }
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => log::debug!("Created {}", self.path.display()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(Error::io(&self.path, err)),
        }

        Ok(self)
    }

    /// Remove the file, closing the held stream first if there is one.
    ///
    /// Deleting a file that is already gone is not an error.
    pub fn delete(&mut self) -> Result<&mut Self> {
        if !self.exists() {
            log::warn!("File not found: {}", self.path.display());
            return Ok(self);
        }

        self.close();

        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Deleted {}", self.path.display());
                Ok(self)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("File not found: {}", self.path.display());
                Ok(self)
            }
            Err(err) => {
                let err = Error::io(&self.path, err);
                log::warn!("Error deleting file: {}", err);
                Err(err)
            }
        }
    }

    /// Replace the file with a fresh empty one and open it.
    pub fn recreate(&mut self) -> Result<&mut Self> {
        if self.exists() {
            self.delete()?;
        }
        self.create()?;
        self.open()
    }

    /// Entire content of the held stream, read from the start.
    pub fn read(&mut self) -> Result<String> {
        let (path, reader) = self.stream()?;
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| Error::io(path, err))?;
        Ok(text)
    }

    /// Lines of the held stream, each keeping its terminator, so joining
    /// them reproduces the file. Only a final unterminated line lacks `\n`.
    pub fn read_lines(&mut self) -> Result<Vec<String>> {
        let (path, reader) = self.stream()?;
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .map_err(|err| Error::io(path, err))?;
            if read == 0 {
                break;
            }
            lines.push(line);
        }
        Ok(lines)
    }

    /// Append each line plus `\n`, creating the file if it is missing.
    pub fn append<I, S>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|err| Error::io(&self.path, err))?;
        self.write_lines(file, lines)?;
        Ok(self)
    }

    /// Truncate the file and write each line plus `\n`.
    pub fn overwrite<I, S>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let file = File::create(&self.path).map_err(|err| Error::io(&self.path, err))?;
        self.write_lines(file, lines)?;
        Ok(self)
    }

    fn write_lines<I, S>(&self, file: File, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut writer = BufWriter::new(file);
        let to_error = |err| Error::io(&self.path, err);
        for line in lines {
            writer.write_all(line.as_ref().as_bytes()).map_err(to_error)?;
            writer.write_all(b"\n").map_err(to_error)?;
        }
        writer.flush().map_err(to_error)?;
        log::debug!("Wrote {}", self.path.display());
        Ok(())
    }

    /// The held stream rewound to its start, alongside the path it reads.
    pub(crate) fn stream(&mut self) -> Result<(&Path, &mut BufReader<File>)> {
        let FileHandle { path, content, .. } = self;
        let reader = content
            .as_mut()
            .ok_or_else(|| Error::NotOpen { path: path.clone() })?;
        reader.rewind().map_err(|err| Error::io(&*path, err))?;
        Ok((path.as_path(), reader))
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<PathBuf> for FileHandle {
    fn from(path: PathBuf) -> Self {
        Self::new([path])
    }
}

impl From<&Path> for FileHandle {
    fn from(path: &Path) -> Self {
        Self::new([path])
    }
}

impl From<&str> for FileHandle {
    fn from(path: &str) -> Self {
        Self::new([path])
    }
}

impl From<String> for FileHandle {
    fn from(path: String) -> Self {
        Self::new([path])
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
