// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the mapping between timeline x coordinates and media
//! time, and the hit rectangles of a region. Painting, hit-testing and drag
//! math all go through the same [`TimeMap`] so a click lands exactly where the
//! region was drawn.

use crate::models::region::Region;
use egui::{pos2, Pos2, Rect};

/// Height of the band under the region bodies used for tick and edge labels.
pub const LABEL_BAND: f32 = 14.0;

/// Affine map between media time (seconds) and screen x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMap {
    left: f32,
    width: f32,
    duration: f64,
}

impl TimeMap {
    /// `playback_duration` may be zero before media metadata arrives; the map
    /// then spans one second.
    pub fn new(left: f32, width: f32, playback_duration: f64) -> Self {
        Self {
            left,
            width: width.max(1.0),
            duration: playback_duration.max(1.0),
        }
    }

    /// Duration the map spans, never below one second.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn time_to_x(&self, time: f64) -> f32 {
        self.left + (self.width as f64 * (time / self.duration)) as f32
    }

    pub fn x_to_time(&self, x: f32) -> f64 {
        ((x - self.left) as f64 / self.width as f64) * self.duration
    }
}

/// Part of a region under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPart {
    StartHandle,
    EndHandle,
    Slider,
    Body,
}

/// Result of a hit test against the regions of one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionHit {
    pub region_id: u64,
    pub part: RegionPart,
}

/// Screen rectangles of one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionShape {
    /// Full body span `[x(start), x(end)]`, drawn under the handles.
    pub body: Rect,
    /// Drag strip directly above the body.
    pub slider: Rect,
    pub start_handle: Rect,
    pub end_handle: Rect,
}

impl RegionShape {
    /// Clickable part of the body, which excludes the two handles.
    pub fn body_hit_area(&self) -> Rect {
        Rect::from_min_max(
            pos2(self.start_handle.max.x, self.body.min.y),
            pos2(self.end_handle.min.x, self.body.max.y),
        )
    }
}

/// Vertical layout of the timeline strip plus its time map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    pub map: TimeMap,
    pub rect: Rect,
    pub handle_width: f32,
    pub slider_height: f32,
}

impl TimelineLayout {
    pub fn new(rect: Rect, playback_duration: f64, handle_width: f32, slider_height: f32) -> Self {
        Self {
            map: TimeMap::new(rect.left(), rect.width(), playback_duration),
            rect,
            handle_width,
            slider_height,
        }
    }

    pub fn duration(&self) -> f64 {
        self.map.duration()
    }

    pub fn time_at(&self, pos: Pos2) -> f64 {
        self.map.x_to_time(pos.x)
    }

    fn body_top(&self) -> f32 {
        self.rect.top() + self.slider_height
    }

    fn body_bottom(&self) -> f32 {
        (self.rect.bottom() - LABEL_BAND).max(self.body_top())
    }

    pub fn shape(&self, region: &Region) -> RegionShape {
        let x1 = self.map.time_to_x(region.start);
        let x2 = self.map.time_to_x(region.end);
        let top = self.body_top();
        let bottom = self.body_bottom();
        RegionShape {
            body: Rect::from_min_max(pos2(x1, top), pos2(x2, bottom)),
            slider: Rect::from_min_max(pos2(x1, self.rect.top()), pos2(x2, top)),
            start_handle: Rect::from_min_max(pos2(x1, top), pos2(x1 + self.handle_width, bottom)),
            end_handle: Rect::from_min_max(pos2(x2 - self.handle_width, top), pos2(x2, bottom)),
        }
    }

    /// Find the region part under `pos`.
    ///
    /// Handles win over sliders, sliders over bodies. Within each kind the
    /// regions are searched newest first.
    pub fn hit_test(&self, regions: &[Region], pos: Pos2) -> Option<RegionHit> {
        let shapes: Vec<(u64, RegionShape)> = regions
            .iter()
            .rev()
            .map(|region| (region.id, self.shape(region)))
            .collect();

        find_part(&shapes, |shape| {
            if shape.start_handle.contains(pos) {
                Some(RegionPart::StartHandle)
            } else if shape.end_handle.contains(pos) {
                Some(RegionPart::EndHandle)
            } else {
                None
            }
        })
        .or_else(|| find_part(&shapes, |shape| shape.slider.contains(pos).then_some(RegionPart::Slider)))
        .or_else(|| {
            find_part(&shapes, |shape| {
                shape.body_hit_area().contains(pos).then_some(RegionPart::Body)
            })
        })
    }
}

fn find_part(
    shapes: &[(u64, RegionShape)],
    test: impl Fn(&RegionShape) -> Option<RegionPart>,
) -> Option<RegionHit> {
    shapes.iter().find_map(|(id, shape)| {
        test(shape).map(|part| RegionHit {
            region_id: *id,
            part,
        })
    })
}
