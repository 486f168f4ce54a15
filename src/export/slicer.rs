// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cutting one time range out of a source video.

use crate::config::AppConfig;
use crate::error::SliceError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// How much of ffmpeg's stderr is kept in an error.
const STDERR_TAIL: usize = 600;

/// Writes `[start, end]` of `source` to `output`.
pub trait ClipSlicer {
    fn slice(&self, source: &Path, start: f64, end: f64, output: &Path) -> Result<(), SliceError>;
}

/// Re-encodes clips with an `ffmpeg` executable.
#[derive(Debug, Clone, PartialEq)]
pub struct FfmpegSlicer {
    program: PathBuf,
    video_codec: String,
    audio_codec: String,
}

impl FfmpegSlicer {
    pub fn new(program: impl Into<PathBuf>, video_codec: &str, audio_codec: &str) -> Self {
        Self {
            program: program.into(),
            video_codec: video_codec.to_string(),
            audio_codec: audio_codec.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.ffmpeg_path, &config.video_codec, &config.audio_codec)
    }

    /// Build the ffmpeg command arguments.
    pub fn args(&self, source: &Path, start: f64, end: f64, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error"]
            .iter()
            .map(OsString::from)
            .collect();

        // Input seeking; accurate because the streams are re-encoded.
        args.push("-ss".into());
        args.push(format!("{:.3}", start).into());
        args.push("-i".into());
        args.push(source.into());
        args.push("-t".into());
        args.push(format!("{:.3}", (end - start).max(0.0)).into());

        args.push("-c:v".into());
        args.push(self.video_codec.as_str().into());
        args.push("-c:a".into());
        args.push(self.audio_codec.as_str().into());

        args.push(output.into());
        args
    }
}

fn tail(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().rev().nth(max.saturating_sub(1)) {
        Some((index, _)) if index > 0 => format!("...{}", &text[index..]),
        _ => text.to_string(),
    }
}

impl ClipSlicer for FfmpegSlicer {
    fn slice(&self, source: &Path, start: f64, end: f64, output: &Path) -> Result<(), SliceError> {
        if !source.is_file() {
            return Err(SliceError::MissingSource(source.to_path_buf()));
        }

        let program = self.program.display().to_string();
        log::debug!("{} {:?}", program, self.args(source, start, end, output));

        let result = Command::new(&self.program)
            .args(self.args(source, start, end, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| SliceError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(SliceError::Failed {
                program,
                status: result.status,
                stderr: tail(&String::from_utf8_lossy(&result.stderr), STDERR_TAIL),
            });
        }
        Ok(())
    }
}
