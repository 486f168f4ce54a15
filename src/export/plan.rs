// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export planning: which clip goes where.
//!
//! A plan is a deep copy of every region to export together with its output
//! path, so the export worker never looks at the live project.

use crate::error::ExportError;
use crate::models::project::Project;
use crate::models::region::Region;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One clip to cut.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTask {
    pub video: PathBuf,
    pub region: Region,
    pub output: PathBuf,
}

/// Ordered list of clips to cut under one output root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportPlan {
    pub out_root: PathBuf,
    pub tasks: Vec<ExportTask>,
}

/// Make a category usable as a single path component.
fn path_component(category: &str) -> String {
    let cleaned: String = category
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// `<stem>_<category>_<seq>.<ext>`, keeping the source extension.
pub fn clip_file_name(video: &Path, category: &str, seq: usize) -> String {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    let category = path_component(category);
    match video.extension() {
        Some(ext) => format!("{}_{}_{}.{}", stem, category, seq, ext.to_string_lossy()),
        None => format!("{}_{}_{}", stem, category, seq),
    }
}

/// `<out_root>/<category>/<stem>_<category>_<seq>.<ext>`.
pub fn clip_path(out_root: &Path, video: &Path, category: &str, seq: usize) -> PathBuf {
    out_root
        .join(path_component(category))
        .join(clip_file_name(video, category, seq))
}

impl ExportPlan {
    /// Plan the export of every region in `project`.
    ///
    /// Refused up front without a working directory, an output directory, or
    /// anything to export.
    pub fn build(project: &Project, out_root: Option<&Path>) -> Result<Self, ExportError> {
        if project.dir.is_none() {
            return Err(ExportError::NoWorkingDirectory);
        }
        let out_root = out_root.ok_or(ExportError::NoOutputDirectory)?;
        if project.regions.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        // Listed videos first, in list order; then videos that only appear in
        // the region map.
        let mut videos: Vec<(&Path, &[Region])> = project
            .video_files
            .iter()
            .map(|video| (video.as_path(), project.regions(video)))
            .collect();
        for (video, regions) in project.regions.iter() {
            if !project.video_files.iter().any(|listed| listed == video) {
                videos.push((video, regions));
            }
        }

        Ok(Self::from_regions(out_root, videos))
    }

    /// Number clips per (video, category) in region-list order.
    ///
    /// Categories that clean to the same path component share one sequence,
    /// and a path already taken in this plan (e.g. two videos with the same
    /// stem) moves on to the next free number.
    pub fn from_regions<'a>(
        out_root: &Path,
        videos: impl IntoIterator<Item = (&'a Path, &'a [Region])>,
    ) -> Self {
        let mut tasks = Vec::new();
        let mut taken: HashSet<PathBuf> = HashSet::new();
        for (video, regions) in videos {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for region in regions {
                let seq = counts.entry(path_component(&region.category)).or_insert(0);
                let output = loop {
                    *seq += 1;
                    let output = clip_path(out_root, video, &region.category, *seq);
                    if taken.insert(output.clone()) {
                        break output;
                    }
                };
                tasks.push(ExportTask {
                    video: video.to_path_buf(),
                    region: region.clone(),
                    output,
                });
            }
        }
        Self {
            out_root: out_root.to_path_buf(),
            tasks,
        }
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }
}
