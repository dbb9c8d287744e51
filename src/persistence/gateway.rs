//! File-backed roster and history storage.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::core::AppConfig;
use crate::roster::Roster;

use super::history::HistoryRecord;
use super::roster_file::{read_roster, write_default_roster};

/// I/O failures from the roster or history files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Summary of a history replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryLoad {
    /// Lines replayed onto the roster.
    pub races: usize,
    /// Malformed lines that were skipped.
    pub skipped: usize,
}

/// Reads and writes the roster CSV and the history file.
#[derive(Clone, Debug)]
pub struct PersistenceGateway {
    roster_path: PathBuf,
    history_path: PathBuf,
}

impl PersistenceGateway {
    pub fn new(roster_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            roster_path: roster_path.into(),
            history_path: history_path.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.roster_path.clone(), config.history_path.clone())
    }

    #[must_use]
    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    #[must_use]
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Load the roster.
    ///
    /// A missing file yields the default roster, which is also written
    /// out so the next session finds it. Unusable rows are skipped.
    pub fn load_roster(&self) -> Result<Roster, PersistenceError> {
        let path = &self.roster_path;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "roster file not found, using the default roster");
                if let Err(err) = self.write_default_roster() {
                    warn!(%err, "could not write the default roster file");
                }
                return Ok(Roster::default_roster());
            }
            Err(err) => return Err(PersistenceError::io(path, err)),
        };

        let (roster, skipped) =
            read_roster(BufReader::new(file)).map_err(|err| PersistenceError::csv(path, err))?;
        info!(path = %path.display(), racers = roster.len(), skipped, "roster loaded");
        Ok(roster)
    }

    /// Write the built-in roster to the roster path.
    pub fn write_default_roster(&self) -> Result<(), PersistenceError> {
        let path = &self.roster_path;
        let file = File::create(path).map_err(|err| PersistenceError::io(path, err))?;
        write_default_roster(BufWriter::new(file)).map_err(|err| PersistenceError::csv(path, err))
    }

    /// Read every well-formed history record. Missing file means no history.
    pub fn read_history(&self) -> Result<(Vec<HistoryRecord>, usize), PersistenceError> {
        let path = &self.history_path;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no history file yet, it will be created on save");
                return Ok((Vec::new(), 0));
            }
            Err(err) => return Err(PersistenceError::io(path, err)),
        };

        let mut records = Vec::new();
        let mut skipped = 0;
        for (number, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let raw = raw.map_err(|err| PersistenceError::io(path, err))?;
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(err) => {
                    warn!(line = number + 1, %err, "skipping history line that is not UTF-8");
                    skipped += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<HistoryRecord>() {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(line = number + 1, %err, "skipping malformed history line");
                    skipped += 1;
                }
            }
        }

        Ok((records, skipped))
    }

    /// Replay the history file onto the roster's career stats.
    ///
    /// Each line is parsed completely before it touches any racer, so a
    /// bad line never leaves partial stats behind.
    pub fn load_history(&self, roster: &mut Roster) -> Result<HistoryLoad, PersistenceError> {
        let (records, skipped) = self.read_history()?;
        for record in &records {
            record.apply_to(roster);
        }

        let load = HistoryLoad {
            races: records.len(),
            skipped,
        };
        info!(races = load.races, skipped = load.skipped, "history loaded");
        Ok(load)
    }

    /// Append records to the history file, creating it if needed.
    pub fn append_history(&self, records: &[HistoryRecord]) -> Result<(), PersistenceError> {
        if records.is_empty() {
            return Ok(());
        }

        let path = &self.history_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| PersistenceError::io(parent, err))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| PersistenceError::io(path, err))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{record}").map_err(|err| PersistenceError::io(path, err))?;
        }
        writer.flush().map_err(|err| PersistenceError::io(path, err))?;

        info!(path = %path.display(), races = records.len(), "history saved");
        Ok(())
    }
}
