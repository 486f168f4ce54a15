// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for project I/O, directory scanning and clip export.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a saved project. Nothing is adopted when this is returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read project file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML project file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure to write a project file.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("cannot write project file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode project as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode project as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Preconditions that refuse an export before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("no working directory selected; open a folder of videos first")]
    NoWorkingDirectory,

    #[error("no output directory selected")]
    NoOutputDirectory,

    #[error("the project has no regions to export")]
    NothingToExport,
}

/// Failure while cutting a single clip out of a source video.
#[derive(Error, Debug)]
pub enum SliceError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("source video not found: {0}")]
    MissingSource(PathBuf),

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One region that could not be exported. Collected, never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub video: PathBuf,
    pub region_id: u64,
    pub cause: String,
}

impl std::fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (region {}): {}",
            self.video.display(),
            self.region_id,
            self.cause
        )
    }
}
