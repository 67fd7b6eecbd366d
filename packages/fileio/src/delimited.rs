//! Comma-separated reads and writes on a `FileHandle`.
//!
//! Rows are plain string sequences: no header row, and rows may differ in
//! length. Written rows end in CRLF; reads accept either line ending. Both
//! directions go through the path rather than the held stream.

use std::fs::{self, File};

use crate::error::{Error, Result};
use crate::handle::FileHandle;

impl FileHandle {
    pub fn read_as_csv(&self) -> Result<Vec<Vec<String>>> {
        let file = File::open(self.path()).map_err(|err| {
            let err = Error::io(self.path(), err);
            log::warn!("Error reading file as CSV: {}", err);
            err
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| {
                log::warn!("Error reading {} as CSV: {}", self.path().display(), err);
                Error::Csv(err)
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Overwrite the file with `rows`.
    ///
    /// Every row is encoded before the file is opened, so an encoding
    /// failure leaves the previous content in place.
    pub fn write_as_csv<I, R, F>(&mut self, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        let encoded = encode_rows(rows).map_err(|err| {
            log::warn!("Error writing {} as CSV: {}", self.path().display(), err);
            err
        })?;

        fs::write(self.path(), encoded).map_err(|err| {
            let err = Error::io(self.path(), err);
            log::warn!("Error writing file as CSV: {}", err);
            err
        })?;

        log::debug!("Wrote CSV to {}", self.path().display());
        Ok(self)
    }
}

fn encode_rows<I, R, F>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::Csv(csv::Error::from(err.into_error())))
}
