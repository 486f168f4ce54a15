// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Region data structures.
//!
//! A region is one labelled time interval on one video. Every edit goes
//! through a clamping helper so a region always satisfies
//! `0 <= start < end <= duration` with at least [`MIN_REGION_LENGTH`] seconds
//! between its edges.

use serde::{Deserialize, Serialize};

/// Smallest width a region may be resized to, in seconds.
pub const MIN_REGION_LENGTH: f64 = 0.1;

/// Length of a region created from the category menu, in seconds.
pub const DEFAULT_REGION_LENGTH: f64 = 2.0;

/// How far a pasted region is shifted from the copied one, in seconds.
pub const PASTE_OFFSET: f64 = 1.0;

/// A labelled time interval on a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    pub category: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    #[serde(default)]
    pub selected: bool,
}

impl Region {
    /// Create a region at `start`, at most `length` seconds long and ending no
    /// later than `duration`.
    ///
    /// `start` is pulled back when it sits too close to the end of the video
    /// to leave room for the minimum width.
    pub fn new(id: u64, category: impl Into<String>, start: f64, length: f64, duration: f64) -> Self {
        let start = start.min(duration - MIN_REGION_LENGTH).max(0.0);
        let end = (start + length.max(MIN_REGION_LENGTH)).min(duration);
        Self {
            id,
            category: category.into(),
            start,
            end,
            selected: false,
        }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Shift the whole region so it starts at `start`, keeping its length.
    pub fn move_to(&mut self, start: f64, duration: f64) {
        let length = self.length();
        let start = start.min(duration - length).max(0.0);
        self.start = start;
        self.end = start + length;
    }

    /// Move the start edge, never past `end - MIN_REGION_LENGTH`.
    pub fn set_start(&mut self, start: f64) {
        self.start = start.min(self.end - MIN_REGION_LENGTH).max(0.0);
    }

    /// Move the end edge, never before `start + MIN_REGION_LENGTH`.
    pub fn set_end(&mut self, end: f64, duration: f64) {
        self.start = self.start.min(duration - MIN_REGION_LENGTH).max(0.0);
        self.end = end.max(self.start + MIN_REGION_LENGTH).min(duration);
    }

    /// Copy of this region with a new id, shifted by [`PASTE_OFFSET`].
    ///
    /// A copy longer than the target video is shortened to fit it.
    pub fn pasted(&self, id: u64, duration: f64) -> Self {
        let length = self.length().min(duration).max(MIN_REGION_LENGTH);
        let start = (self.start + PASTE_OFFSET).min(duration - length).max(0.0);
        Self {
            id,
            category: self.category.clone(),
            start,
            end: start + length,
            selected: false,
        }
    }

    /// Bring edges read from a file back into `0 <= start < end` with the
    /// minimum width. Returns true if anything changed.
    pub fn repair(&mut self) -> bool {
        let (start, end) = (self.start, self.end);
        if !self.start.is_finite() || self.start < 0.0 {
            self.start = 0.0;
        }
        if !self.end.is_finite() || self.end < self.start + MIN_REGION_LENGTH {
            self.end = self.start + MIN_REGION_LENGTH;
        }
        start != self.start || end != self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(region: &Region, duration: f64) {
        assert!(region.start >= 0.0, "start {} below zero", region.start);
        assert!(region.end <= duration + 1e-9, "end {} past {}", region.end, duration);
        assert!(
            region.length() >= MIN_REGION_LENGTH - 1e-9,
            "length {} too short",
            region.length()
        );
    }

    #[test]
    fn test_new_region_default_length() {
        let region = Region::new(1, "kick", 5.0, DEFAULT_REGION_LENGTH, 30.0);
        assert_eq!(region.start, 5.0);
        assert_eq!(region.end, 7.0);
        assert!(!region.selected);
    }

    #[test]
    fn test_new_region_truncated_at_duration() {
        let region = Region::new(1, "kick", 29.0, DEFAULT_REGION_LENGTH, 30.0);
        assert_eq!(region.start, 29.0);
        assert_eq!(region.end, 30.0);
    }

    #[test]
    fn test_new_region_at_very_end_keeps_min_width() {
        let region = Region::new(1, "kick", 30.0, DEFAULT_REGION_LENGTH, 30.0);
        assert_valid(&region, 30.0);
        assert_eq!(region.end, 30.0);
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut region = Region::new(1, "a", 10.0, 2.0, 30.0);
        region.move_to(-5.0, 30.0);
        assert_eq!((region.start, region.end), (0.0, 2.0));
        region.move_to(100.0, 30.0);
        assert_eq!((region.start, region.end), (28.0, 30.0));
    }

    #[test]
    fn test_resize_start_cannot_cross_end() {
        let mut region = Region::new(1, "a", 10.0, 2.0, 30.0);
        region.set_start(50.0);
        assert!((region.start - 11.9).abs() < 1e-9);
        region.set_start(-3.0);
        assert_eq!(region.start, 0.0);
        assert_valid(&region, 30.0);
    }

    #[test]
    fn test_resize_end_cannot_cross_start() {
        let mut region = Region::new(1, "a", 10.0, 2.0, 30.0);
        region.set_end(0.0, 30.0);
        assert!((region.end - 10.1).abs() < 1e-9);
        region.set_end(99.0, 30.0);
        assert_eq!(region.end, 30.0);
        assert_valid(&region, 30.0);
    }

    #[test]
    fn test_pasted_region_shifted_by_one_second() {
        let region = Region::new(1, "A", 10.0, 2.0, 30.0);
        let copy = region.pasted(2, 30.0);
        assert_eq!(copy.id, 2);
        assert_eq!(copy.category, "A");
        assert_eq!((copy.start, copy.end), (11.0, 13.0));
    }

    #[test]
    fn test_pasted_region_clamped_to_duration() {
        let region = Region::new(1, "A", 28.0, 2.0, 30.0);
        let copy = region.pasted(2, 30.0);
        assert_eq!((copy.start, copy.end), (28.0, 30.0));
    }

    #[test]
    fn test_paste_onto_shorter_video_fits_it() {
        let region = Region::new(1, "A", 0.0, 20.0, 60.0);
        let copy = region.pasted(2, 10.0);
        assert_valid(&copy, 10.0);
        assert_eq!((copy.start, copy.end), (0.0, 10.0));

        let region = Region::new(3, "A", 40.0, 8.0, 60.0);
        let copy = region.pasted(4, 10.0);
        assert_valid(&copy, 10.0);
        assert_eq!((copy.start, copy.end), (2.0, 10.0));
    }

    #[test]
    fn test_resize_end_from_start_past_duration() {
        let mut region = Region {
            id: 1,
            category: "a".into(),
            start: 50.0,
            end: 52.0,
            selected: false,
        };
        region.set_end(45.0, 30.0);
        assert_valid(&region, 30.0);
        assert_eq!(region.end, 30.0);
    }

    #[test]
    fn test_repair_negative_start_and_inverted_edges() {
        let mut region = Region {
            id: 1,
            category: "a".into(),
            start: -2.0,
            end: 3.0,
            selected: false,
        };
        assert!(region.repair());
        assert_eq!((region.start, region.end), (0.0, 3.0));

        region.start = 5.0;
        region.end = 4.0;
        assert!(region.repair());
        assert_eq!(region.start, 5.0);
        assert!((region.end - 5.1).abs() < 1e-9);

        assert!(!region.repair());
    }

    #[test]
    fn test_selected_defaults_when_missing() {
        let json = r#"{"id": 3, "category": "x", "start": 1.0, "end": 2.5}"#;
        let region: Region = serde_json::from_str(json).unwrap();
        assert!(!region.selected);
        assert_eq!(region.id, 3);
    }
}
