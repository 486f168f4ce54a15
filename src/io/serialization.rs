// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project file serialization and deserialization.
//!
//! Projects are stored as JSON by default. A `.yaml` or `.yml` extension
//! selects YAML with the same schema.

use crate::error::{LoadError, SaveError};
use crate::models::project::Project;
use std::path::Path;

/// Storage format of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Json,
    Yaml,
}

impl ProjectFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Encode a project in the given format.
pub fn encode(project: &Project, format: ProjectFormat) -> Result<String, SaveError> {
    Ok(match format {
        ProjectFormat::Json => serde_json::to_string_pretty(project)?,
        ProjectFormat::Yaml => serde_yaml::to_string(project)?,
    })
}

/// Decode a project and restore its session state (id counter, no current
/// region).
pub fn decode(content: &str, format: ProjectFormat) -> Result<Project, LoadError> {
    let mut project: Project = match format {
        ProjectFormat::Json => serde_json::from_str(content)?,
        ProjectFormat::Yaml => serde_yaml::from_str(content)?,
    };
    project.restore_session_state();
    Ok(project)
}

/// Write the project to `path`, format chosen by extension.
pub fn save_project(project: &Project, path: &Path) -> Result<(), SaveError> {
    let content = encode(project, ProjectFormat::from_path(path))?;
    std::fs::write(path, content).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Saved project with {} regions to {}",
        project.total_regions(),
        path.display()
    );
    Ok(())
}

/// Read a project from `path`, format chosen by extension.
///
/// On error nothing is returned, so the caller keeps its current project.
pub fn load_project(path: &Path) -> Result<Project, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let project = decode(&content, ProjectFormat::from_path(path))?;
    log::info!(
        "Loaded project with {} videos and {} regions from {}",
        project.video_files.len(),
        project.total_regions(),
        path.display()
    );
    Ok(project)
}
