//! Batch files - saved strategies for later import
//!
//! Layout, all little-endian:
//!
//! ```text
//! b"NTAC"  u32 version  u32 count
//! count x { u32 name_len  [u8; name_len]  u32 weight_count  [f32; weight_count] }
//! ```
//!
//! Layer shapes are not stored; the importer supplies them and
//! [`Network::from_weights`] rejects mismatched weight counts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use neurotac_core::Strategy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::{Network, NetworkError};

const MAGIC: &[u8; 4] = b"NTAC";
const VERSION: u32 = 1;

// Caps up-front allocation when a header lies about its sizes
const PREALLOC_LIMIT: usize = 1 << 16;

/// Batch file errors
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a batch file (bad magic)")]
    BadMagic,

    #[error("unsupported batch version {0}")]
    UnsupportedVersion(u32),

    #[error("strategy name is not valid UTF-8")]
    BadName(#[from] std::string::FromUtf8Error),

    #[error("{0} does not fit in the format")]
    TooLarge(&'static str),
}

/// A named weight vector as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub name: String,
    pub weights: Vec<f32>,
}

impl BatchEntry {
    pub fn new(name: impl Into<String>, weights: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// Snapshot of any strategy
    pub fn from_strategy(strategy: &dyn Strategy) -> Self {
        Self::new(strategy.name(), strategy.weights())
    }

    /// Rebuild a network with the given layer shape
    pub fn into_network(self, layers: &[usize]) -> Result<Network, NetworkError> {
        Network::from_weights(self.name, layers, self.weights)
    }
}

fn write_len<W: Write>(writer: &mut W, len: usize, what: &'static str) -> Result<(), BatchError> {
    let len = u32::try_from(len).map_err(|_| BatchError::TooLarge(what))?;
    writer.write_u32::<LE>(len)?;
    Ok(())
}

/// Write entries to any writer
pub fn write_batch<W: Write>(writer: &mut W, entries: &[BatchEntry]) -> Result<(), BatchError> {
    writer.write_all(MAGIC)?;
    writer.write_u32::<LE>(VERSION)?;
    write_len(writer, entries.len(), "entry count")?;
    for entry in entries {
        write_len(writer, entry.name.len(), "name")?;
        writer.write_all(entry.name.as_bytes())?;
        write_len(writer, entry.weights.len(), "weight vector")?;
        for &w in &entry.weights {
            writer.write_f32::<LE>(w)?;
        }
    }
    Ok(())
}

/// Read entries from any reader
pub fn read_batch<R: Read>(reader: &mut R) -> Result<Vec<BatchEntry>, BatchError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(BatchError::BadMagic);
    }
    let version = reader.read_u32::<LE>()?;
    if version != VERSION {
        return Err(BatchError::UnsupportedVersion(version));
    }

    let count = reader.read_u32::<LE>()? as usize;
    let mut entries = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        let name_len = reader.read_u32::<LE>()? as usize;
        let mut name = Vec::with_capacity(name_len.min(PREALLOC_LIMIT));
        reader.by_ref().take(name_len as u64).read_to_end(&mut name)?;
        if name.len() != name_len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        let name = String::from_utf8(name)?;

        let weight_count = reader.read_u32::<LE>()? as usize;
        let mut weights = Vec::with_capacity(weight_count.min(PREALLOC_LIMIT));
        for _ in 0..weight_count {
            weights.push(reader.read_f32::<LE>()?);
        }
        entries.push(BatchEntry { name, weights });
    }
    Ok(entries)
}

/// Save entries to a file, replacing it
pub fn save_batch(path: impl AsRef<Path>, entries: &[BatchEntry]) -> Result<(), BatchError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_batch(&mut writer, entries)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), count = entries.len(), "saved batch");
    Ok(())
}

/// Load every entry of one file
pub fn load_batch(path: impl AsRef<Path>) -> Result<Vec<BatchEntry>, BatchError> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    read_batch(&mut reader)
}

/// Load several files, skipping (and logging) the ones that fail
pub fn load_batches(paths: &[PathBuf]) -> Vec<BatchEntry> {
    let mut entries = Vec::new();
    for path in paths {
        match load_batch(path) {
            Ok(batch) => {
                tracing::debug!(path = %path.display(), count = batch.len(), "loaded batch");
                entries.extend(batch);
            }
            Err(err) => tracing::warn!(path = %path.display(), "skipping batch: {}", err),
        }
    }
    tracing::info!("total imported strategies: {}", entries.len());
    for entry in &entries {
        tracing::debug!("imported {}", entry.name);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Vec<BatchEntry> {
        vec![
            BatchEntry::new("iron-wolf-g3", vec![0.5, -1.25, 3.0]),
            BatchEntry::new("", Vec::new()),
            BatchEntry::new("jade-moon-g0", vec![f32::MAX, f32::MIN_POSITIVE]),
        ]
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.ntac");
        save_batch(&path, &sample()).unwrap();
        assert_eq!(load_batch(&path).unwrap(), sample());
    }

    #[test]
    fn test_layout_is_little_endian() {
        let mut buf = Vec::new();
        write_batch(&mut buf, &[BatchEntry::new("ab", vec![1.0])]).unwrap();
        assert_eq!(&buf[..4], b"NTAC");
        assert_eq!(&buf[4..8], &[1, 0, 0, 0]);
        assert_eq!(&buf[8..12], &[1, 0, 0, 0]);
        assert_eq!(&buf[12..16], &[2, 0, 0, 0]);
        assert_eq!(&buf[16..18], b"ab");
        assert_eq!(&buf[18..22], &[1, 0, 0, 0]);
        assert_eq!(&buf[22..26], &1.0f32.to_le_bytes());
        assert_eq!(buf.len(), 26);
    }

    #[test]
    fn test_bad_magic_and_version() {
        let err = read_batch(&mut Cursor::new(b"GOB!\x01\0\0\0\0\0\0\0".to_vec())).unwrap_err();
        assert!(matches!(err, BatchError::BadMagic));

        let err = read_batch(&mut Cursor::new(b"NTAC\x02\0\0\0\0\0\0\0".to_vec())).unwrap_err();
        assert!(matches!(err, BatchError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_truncated_file_is_io_error() {
        let mut buf = Vec::new();
        write_batch(&mut buf, &sample()).unwrap();
        buf.truncate(buf.len() - 2);
        assert!(matches!(read_batch(&mut Cursor::new(buf)), Err(BatchError::Io(_))));
    }

    #[test]
    fn test_load_batches_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.ntac");
        let junk = dir.path().join("junk.ntac");
        save_batch(&good, &sample()).unwrap();
        std::fs::write(&junk, b"not a batch").unwrap();

        let paths = vec![good.clone(), dir.path().join("missing.ntac"), junk, good];
        let entries = load_batches(&paths);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[3].name, "iron-wolf-g3");
    }

    #[test]
    fn test_entry_into_network_checks_shape() {
        let entry = BatchEntry::new("n", vec![0.0; 10]);
        assert!(entry.clone().into_network(&[9, 1]).is_ok());
        assert!(entry.into_network(&[10, 1]).is_err());
    }
}
