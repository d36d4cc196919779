//! Append-only action log file.
//!
//! Entries are framed as
//! ```text
//! [u32 little-endian length][bincode ActionLogEntry]
//! [u32 little-endian length][bincode ActionLogEntry]
//! ...
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::{ActionLogEntry, RepositoryError, Result};

/// Writer for a session's action log.
pub struct FileActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next entry.
    offset: u64,
    /// `(nonce, offset)` of every entry written through this handle.
    index: Vec<(u64, u64)>,
}

impl FileActionLog {
    /// Create a new log file.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            offset: 0,
            index: Vec::new(),
        })
    }

    /// Append one entry and flush it; returns the offset it was written at.
    pub fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        let bytes = bincode::serialize(entry)?;
        let len = u32::try_from(bytes.len()).map_err(|_| {
            RepositoryError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                "log entry larger than 4 GiB",
            ))
        })?;

        let at = self.offset;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        self.offset += 4 + u64::from(len);
        self.index.push((entry.nonce, at));
        Ok(at)
    }

    /// Cut the file back to the entries with a nonce below `nonce`.
    ///
    /// Returns the number of entries dropped.
    pub fn truncate_from(&mut self, nonce: u64) -> Result<usize> {
        let Some(keep) = self.index.iter().position(|&(n, _)| n >= nonce) else {
            return Ok(0);
        };
        let at = self.index[keep].1;

        self.writer.flush()?;
        let file = self.writer.get_mut();
        file.set_len(at)?;
        file.seek(SeekFrom::Start(at))?;

        let dropped = self.index.len() - keep;
        self.index.truncate(keep);
        self.offset = at;
        Ok(dropped)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry of a log file in order.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<ActionLogEntry>> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut entries = Vec::new();
        let mut offset = 0u64;

        loop {
            let mut len = [0u8; 4];
            match reader.read_exact(&mut len) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            let len = u32::from_le_bytes(len);

            let mut bytes = vec![0u8; len as usize];
            reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => RepositoryError::Truncated { offset },
                _ => e.into(),
            })?;
            entries.push(bincode::deserialize(&bytes)?);
            offset += 4 + u64::from(len);
        }

        Ok(entries)
    }
}
