// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings are read from a JSON file: the path in `CLIPMARK_CONFIG`, else
//! `clipmark.json` in the working directory if it exists. Every field has a
//! default, so a partial file (or none at all) is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CLIPMARK_CONFIG";

/// File picked up from the current directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "clipmark.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// ffmpeg executable used to cut clips.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_path: PathBuf,

    /// ffprobe executable used to read video durations.
    #[serde(default = "default_ffprobe")]
    pub ffprobe_path: PathBuf,

    /// Encoder for the video stream of exported clips.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Encoder for the audio stream of exported clips.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// File extensions (without dot, any case) listed as videos.
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// Timeline widget dimensions in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_handle_width")]
    pub handle_width: f32,
    #[serde(default = "default_slider_height")]
    pub slider_height: f32,
    #[serde(default = "default_timeline_height")]
    pub height: f32,
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_video_extensions() -> Vec<String> {
    ["mp4", "mov", "mkv", "avi", "webm", "m4v", "mpg", "mpeg", "wmv", "flv"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_handle_width() -> f32 {
    6.0
}

fn default_slider_height() -> f32 {
    12.0
}

fn default_timeline_height() -> f32 {
    72.0
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            handle_width: default_handle_width(),
            slider_height: default_slider_height(),
            height: default_timeline_height(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg(),
            ffprobe_path: default_ffprobe(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            video_extensions: default_video_extensions(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the configured location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_file(local)
                } else {
                    log::debug!("No configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.video_extensions.is_empty() {
            anyhow::bail!("video_extensions must list at least one extension");
        }
        if self.timeline.handle_width <= 0.0 || self.timeline.slider_height <= 0.0 {
            anyhow::bail!("timeline handle_width and slider_height must be positive");
        }
        Ok(())
    }

    /// Whether `path` has one of the configured video extensions.
    pub fn is_video(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.video_extensions
                    .iter()
                    .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.video_codec, "libx264");
        assert_eq!(config.audio_codec, "aac");
        assert_eq!(config.timeline.handle_width, 6.0);
        assert_eq!(config.timeline.slider_height, 12.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ffmpeg_path": "/opt/ffmpeg/bin/ffmpeg", "timeline": {{"height": 90}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.ffprobe_path, PathBuf::from("ffprobe"));
        assert_eq!(config.timeline.height, 90.0);
        assert_eq!(config.timeline.handle_width, 6.0);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"video_extensions": []}}"#).unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_is_video_ignores_case() {
        let config = AppConfig::default();
        assert!(config.is_video(Path::new("/a/b/Clip.MP4")));
        assert!(config.is_video(Path::new("take.mov")));
        assert!(!config.is_video(Path::new("notes.txt")));
        assert!(!config.is_video(Path::new("README")));
    }
}
