// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media discovery and probing.
//!
//! This module lists the videos of a working directory and reads a video's
//! duration with `ffprobe`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use walkdir::WalkDir;

/// List the files directly inside `dir` accepted by `is_video`.
///
/// Entries come back in directory listing order, unsorted.
pub fn scan_videos(dir: &Path, is_video: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut videos = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && is_video(path) {
            videos.push(path.to_path_buf());
        }
    }
    log::info!("Found {} videos in {}", videos.len(), dir.display());
    Ok(videos)
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse the JSON printed by `ffprobe -show_entries format=duration -of json`.
fn parse_probe_output(json: &str) -> Result<f64> {
    let output: ProbeOutput = serde_json::from_str(json).context("Unexpected ffprobe output")?;
    let duration = output
        .format
        .duration
        .context("ffprobe reported no duration")?;
    duration
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid duration '{}'", duration))
}

/// Duration of `video` in seconds.
pub fn probe_duration(ffprobe: &Path, video: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
        .arg(video)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {}", ffprobe.display()))?;

    if !output.status.success() {
        anyhow::bail!(
            "{} failed on {}: {}",
            ffprobe.display(),
            video.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let duration = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
    log::debug!("{} lasts {:.3}s", video.display(), duration);
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_mp4(path: &Path) -> bool {
        path.extension().map(|ext| ext.eq_ignore_ascii_case("mp4")).unwrap_or(false)
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mp4", "B.MP4", "notes.txt", "c.mov"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();
        std::fs::write(dir.path().join("nested.mp4").join("deep.mp4"), b"").unwrap();

        let mut found: Vec<String> = scan_videos(dir.path(), is_mp4)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        found.sort();
        assert_eq!(found, vec!["B.MP4", "a.mp4"]);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        assert!(scan_videos(Path::new("/no/such/dir/anywhere"), is_mp4).is_err());
    }

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{"format": {"duration": "12.480000"}}"#;
        assert!((parse_probe_output(json).unwrap() - 12.48).abs() < 1e-9);
    }

    #[test]
    fn test_parse_probe_output_without_duration() {
        assert!(parse_probe_output(r#"{"format": {}}"#).is_err());
        assert!(parse_probe_output(r#"{"format": {"duration": "N/A"}}"#).is_err());
        assert!(parse_probe_output("").is_err());
    }
}
