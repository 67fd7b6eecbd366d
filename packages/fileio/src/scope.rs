//! Scoped acquisition of a handle's read stream.
//!
//! ```rust,ignore
//! let mut file = FileHandle::from("settings.json");
//! {
//!     let mut scoped = file.scope()?;
//!     let settings = scoped.read_as_json()?;
//! } // stream closed here, even if the block returned early
//! ```

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::handle::FileHandle;

/// Borrows a `FileHandle` with its stream open and closes the stream on drop.
#[derive(Debug)]
pub struct OpenScope<'a> {
    handle: &'a mut FileHandle,
}

impl FileHandle {
    /// Open the stream unless it already is, and close it when the returned
    /// guard goes out of scope.
    pub fn scope(&mut self) -> Result<OpenScope<'_>> {
        if !self.is_open() {
            self.open()?;
        }
        Ok(OpenScope { handle: self })
    }

    /// Run `f` with the stream open, closing it afterwards whatever `f`
    /// returns.
    pub fn with_open<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut FileHandle) -> Result<T>,
    {
        let mut scoped = self.scope()?;
        f(&mut *scoped)
    }
}

impl Deref for OpenScope<'_> {
    type Target = FileHandle;

    fn deref(&self) -> &FileHandle {
        self.handle
    }
}

impl DerefMut for OpenScope<'_> {
    fn deref_mut(&mut self) -> &mut FileHandle {
        self.handle
    }
}

impl Drop for OpenScope<'_> {
    fn drop(&mut self) {
        self.handle.close();
    }
}
