use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::ranking::render_json;
use crate::records::{RawGameTeamRecord, RawPlayerSeasonRecord};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input file not found: {0} (run the stats crawler first)")]
    MissingInput(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("input file {0} holds no records")]
    EmptyInput(PathBuf),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn load_team_records(path: &Path) -> Result<Vec<RawGameTeamRecord>, DatasetError> {
    load_records(path)
}

pub fn load_player_records(path: &Path) -> Result<Vec<RawPlayerSeasonRecord>, DatasetError> {
    load_records(path)
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::MissingInput(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<T> = serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if rows.is_empty() {
        return Err(DatasetError::EmptyInput(path.to_path_buf()));
    }
    info!(path = %path.display(), records = rows.len(), "loaded records");
    Ok(rows)
}

/// Replace `path` with the JSON array `rows`, via a temp file and rename.
pub fn write_ranked_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DatasetError> {
    let json = render_json(rows)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| DatasetError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = rows.len(), "wrote ranked output");
    Ok(())
}
