//! Input Loading
//!
//! Reads the persona, affinity and roster tables from JSON record arrays.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use social_records::{AffinityRecord, PersonaRecord, RosterRow};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_personas(path: impl AsRef<Path>) -> Result<Vec<PersonaRecord>, LoadError> {
    read_records(path.as_ref())
}

pub fn load_affinities(path: impl AsRef<Path>) -> Result<Vec<AffinityRecord>, LoadError> {
    read_records(path.as_ref())
}

pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<RosterRow>, LoadError> {
    read_records(path.as_ref())
}
