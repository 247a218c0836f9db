//! Output Writer
//!
//! Writes a finished run to an output directory:
//!
//! - `graph.json` - nodes and directed edges for a renderer
//! - `cells.json` - decision cells with their sheet addresses
//! - `report.json` - run id, seed, summary, missing handles, skipped pairs
//! - `config.toml` - the configuration the run used

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use social_records::{CellLayout, CellSheet, FollowCell, GraphExport, RunReport};

use crate::config::{Config, ConfigError};

pub const GRAPH_FILE: &str = "graph.json";
pub const CELLS_FILE: &str = "cells.json";
pub const REPORT_FILE: &str = "report.json";
pub const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Creates the directory if it doesn't exist.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, OutputError> {
        fs::create_dir_all(output_dir.as_ref())?;
        Ok(Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write_graph(&self, graph: &GraphExport) -> Result<PathBuf, OutputError> {
        self.write_json(GRAPH_FILE, graph)
    }

    pub fn write_cells(
        &self,
        cells: &[FollowCell],
        layout: CellLayout,
    ) -> Result<PathBuf, OutputError> {
        self.write_json(CELLS_FILE, &CellSheet::from_cells(layout, cells))
    }

    pub fn write_report(&self, report: &RunReport) -> Result<PathBuf, OutputError> {
        self.write_json(REPORT_FILE, report)
    }

    pub fn write_config(&self, config: &Config) -> Result<PathBuf, OutputError> {
        let path = self.output_dir.join(CONFIG_FILE);
        fs::write(&path, config.to_toml()?)?;
        Ok(path)
    }

    /// Writes every output file.
    pub fn write_all(
        &self,
        graph: &GraphExport,
        cells: &[FollowCell],
        report: &RunReport,
        config: &Config,
    ) -> Result<(), OutputError> {
        self.write_graph(graph)?;
        self.write_cells(cells, config.layout)?;
        self.write_report(report)?;
        self.write_config(config)?;
        tracing::info!("Wrote run output to {}", self.output_dir.display());
        Ok(())
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, OutputError> {
        let path = self.output_dir.join(name);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        Ok(path)
    }
}
