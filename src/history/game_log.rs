use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use super::record::{CsvRow, GameRecord};
use crate::error::HistoryError;

/// In-memory copy of the CSV game log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLog {
    records: Vec<GameRecord>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<GameRecord>) -> Self {
        GameLog { records }
    }

    /// Read every record from a CSV file with a header row.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let file = File::open(path).map_err(|e| HistoryError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            records.push(GameRecord::try_from(row?)?);
        }
        Ok(GameLog { records })
    }

    /// Load the log, treating a missing or unreadable file as "no history".
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(log) => log,
            Err(HistoryError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::info!("no game log at '{}', starting without history", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("ignoring game log '{}': {e}", path.display());
                Self::new()
            }
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id for the next game to be appended.
    pub fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    /// Append one finished game to the file at `path` and to this log.
    pub fn append(&mut self, path: &Path, record: GameRecord) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let write_header = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(CsvRow::from(&record))?;
        writer.flush()?;

        self.records.push(record);
        Ok(())
    }

    /// Write `records` to a fresh CSV file, replacing any existing one.
    pub fn write_all(path: &Path, records: &[GameRecord]) -> Result<(), HistoryError> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in records {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}
