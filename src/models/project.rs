// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! The project owns the working directory, its videos, the category labels and
//! the per-video region lists. It is also the only place region ids come from.

use super::region::Region;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Region lists keyed by video path, kept in insertion order.
///
/// Serialized as a map whose key order is the order videos first received
/// regions, so a load/save cycle reproduces the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionsByVideo {
    entries: Vec<(PathBuf, Vec<Region>)>,
}

impl RegionsByVideo {
    pub fn get(&self, video: &Path) -> Option<&Vec<Region>> {
        self.entries
            .iter()
            .find(|(path, _)| path == video)
            .map(|(_, regions)| regions)
    }

    pub fn get_mut(&mut self, video: &Path) -> Option<&mut Vec<Region>> {
        self.entries
            .iter_mut()
            .find(|(path, _)| path == video)
            .map(|(_, regions)| regions)
    }

    /// Region list for `video`, created empty at the end of the map if absent.
    pub fn entry(&mut self, video: &Path) -> &mut Vec<Region> {
        let index = match self.entries.iter().position(|(path, _)| path == video) {
            Some(index) => index,
            None => {
                self.entries.push((video.to_path_buf(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[Region])> {
        self.entries
            .iter()
            .map(|(path, regions)| (path.as_path(), regions.as_slice()))
    }

    pub fn all(&self) -> impl Iterator<Item = &Region> {
        self.entries.iter().flat_map(|(_, regions)| regions.iter())
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.entries.iter_mut().flat_map(|(_, regions)| regions.iter_mut())
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, regions)| regions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Serialize for RegionsByVideo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, regions) in &self.entries {
            map.serialize_entry(path, regions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionsByVideo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = RegionsByVideo;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of video paths to region lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut result = RegionsByVideo::default();
                while let Some((path, regions)) = access.next_entry::<PathBuf, Vec<Region>>()? {
                    // A repeated key extends the first occurrence.
                    result.entry(&path).extend(regions);
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Complete project state. The serialized fields form the project file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Working directory the videos were discovered in.
    pub dir: Option<PathBuf>,
    pub video_files: Vec<PathBuf>,
    pub categories: Vec<String>,
    /// Most recently used category, offered first in the category menu.
    #[serde(default)]
    pub last_category: Option<String>,
    #[serde(rename = "timestamps_by_video")]
    pub regions: RegionsByVideo,

    #[serde(skip)]
    id_counter: u64,
    #[serde(skip)]
    pub current_video: Option<PathBuf>,
    /// Id of the last region touched by the pointer.
    #[serde(skip)]
    pub current_region: Option<u64>,
}

impl Project {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next region id. Ids are never handed out twice.
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset session-only state after deserializing: the id counter resumes
    /// from the largest stored id and no region is current. Regions with
    /// invalid edges are repaired.
    pub fn restore_session_state(&mut self) {
        for region in self.regions.all_mut() {
            let (start, end) = (region.start, region.end);
            if region.repair() {
                log::warn!(
                    "Region {} had invalid edges [{}, {}], clamped to [{:.3}, {:.3}]",
                    region.id,
                    start,
                    end,
                    region.start,
                    region.end
                );
            }
        }
        self.id_counter = self.regions.all().map(|r| r.id).max().unwrap_or(0);
        self.current_region = None;
        self.current_video = None;
    }

    /// Replace the working directory and its video list.
    pub fn set_directory(&mut self, dir: PathBuf, video_files: Vec<PathBuf>) {
        log::info!("Working directory {} with {} videos", dir.display(), video_files.len());
        self.dir = Some(dir);
        self.video_files = video_files;
        self.current_video = None;
        self.current_region = None;
    }

    /// Make `video` the one the timeline operates on.
    pub fn select_video(&mut self, video: Option<PathBuf>) {
        if self.current_video != video {
            self.current_region = None;
        }
        self.current_video = video;
    }

    /// Add a category label and make it the most recently used one.
    /// Returns false for blank or duplicate names.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.categories.iter().any(|c| c == name) {
            return false;
        }
        self.categories.push(name.to_string());
        self.last_category = Some(name.to_string());
        log::info!("Added category '{}'", name);
        true
    }

    /// Remove a category label. Regions already tagged with it keep the label.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != name);
        if self.last_category.as_deref() == Some(name) {
            self.last_category = None;
        }
        let removed = self.categories.len() != before;
        if removed {
            log::info!("Removed category '{}'", name);
        }
        removed
    }

    pub fn mark_category_used(&mut self, name: &str) {
        self.last_category = Some(name.to_string());
    }

    /// Categories with the most recently used one first.
    pub fn categories_by_recency(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = Vec::with_capacity(self.categories.len());
        if let Some(last) = self.last_category.as_deref() {
            if self.categories.iter().any(|c| c == last) {
                ordered.push(last);
            }
        }
        ordered.extend(
            self.categories
                .iter()
                .map(String::as_str)
                .filter(|c| Some(*c) != self.last_category.as_deref()),
        );
        ordered
    }

    /// Regions of `video` in creation order.
    pub fn regions(&self, video: &Path) -> &[Region] {
        self.regions.get(video).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn regions_mut(&mut self, video: &Path) -> Option<&mut Vec<Region>> {
        self.regions.get_mut(video)
    }

    pub fn region(&self, video: &Path, id: u64) -> Option<&Region> {
        self.regions(video).iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, video: &Path, id: u64) -> Option<&mut Region> {
        self.regions.get_mut(video)?.iter_mut().find(|r| r.id == id)
    }

    /// Append a region to the end of `video`'s list.
    pub fn push_region(&mut self, video: &Path, region: Region) {
        log::info!(
            "Created region {} '{}' [{:.2}s, {:.2}s] on {}",
            region.id,
            region.category,
            region.start,
            region.end,
            video.display()
        );
        self.regions.entry(video).push(region);
    }

    /// Remove region `id` from `video`, keeping the order of the others.
    pub fn remove_region(&mut self, video: &Path, id: u64) -> Option<Region> {
        let regions = self.regions.get_mut(video)?;
        let index = regions.iter().position(|r| r.id == id)?;
        let removed = regions.remove(index);
        if self.current_region == Some(id) {
            self.current_region = None;
        }
        log::info!("Deleted region {} from {}", id, video.display());
        Some(removed)
    }

    /// The region last touched on the current video, if it still exists.
    pub fn current_region(&self) -> Option<&Region> {
        let video = self.current_video.as_deref()?;
        self.region(video, self.current_region?)
    }

    pub fn total_regions(&self) -> usize {
        self.regions.total()
    }
}
