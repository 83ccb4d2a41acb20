use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::NestError;
use crate::geometry::NestedRegion;

/// Persisted NFP of a pair of shapes, in the canonical frame:
/// the stationary shape's centroid at the origin, the orbiting shape referenced by its centroid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NfpRecord {
    pub stationary: Vec<[f64; 2]>,
    pub orbiting: Vec<[f64; 2]>,
    pub nfp: NestedRegion,
}

/// Append-only record store for computed NFPs
pub trait NfpStore {
    /// Returns all records stored so far
    fn load(&self) -> Result<Vec<NfpRecord>, NestError>;

    /// Appends a record
    fn store(&mut self, record: &NfpRecord) -> Result<(), NestError>;
}

/// In-memory store. Clones share the same records.
#[derive(Clone, Debug, Default)]
pub struct MemoryNfpStore {
    records: Rc<RefCell<Vec<NfpRecord>>>,
}

impl MemoryNfpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl NfpStore for MemoryNfpStore {
    fn load(&self) -> Result<Vec<NfpRecord>, NestError> {
        Ok(self.records.borrow().clone())
    }

    fn store(&mut self, record: &NfpRecord) -> Result<(), NestError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

/// File backed store, one JSON record per line.
/// The file is opened for every load and every append. A missing file holds no records.
#[derive(Clone, Debug)]
pub struct JsonLinesNfpStore {
    path: PathBuf,
}

impl JsonLinesNfpStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLinesNfpStore { path: path.into() }
    }
}

impl NfpStore for JsonLinesNfpStore {
    fn load(&self) -> Result<Vec<NfpRecord>, NestError> {
        if !self.path.exists() {
            debug!("[NFP] no history at {}", self.path.display());
            return Ok(vec![]);
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        debug!(
            "[NFP] read {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn store(&mut self, record: &NfpRecord) -> Result<(), NestError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        Ok(())
    }
}
