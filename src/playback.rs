// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback transport.
//!
//! The timeline only needs a playhead it can query, seek, start and stop.
//! [`ClockPlayback`] is a wall-clock transport: it advances the playhead in
//! real time while playing and knows the media duration from a probe.

use std::time::Instant;

/// Minimal transport the timeline drives.
pub trait Playback {
    /// Media duration in seconds, 0.0 while unknown.
    fn duration(&self) -> f64;
    /// Playhead position in seconds.
    fn position(&self) -> f64;
    fn seek(&mut self, seconds: f64);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

/// Transport that follows the wall clock.
#[derive(Debug, Clone)]
pub struct ClockPlayback {
    duration: f64,
    /// Position at the moment playback last started or was seeked.
    anchor_position: f64,
    /// Set while playing.
    anchor_instant: Option<Instant>,
}

impl Default for ClockPlayback {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPlayback {
    pub fn new() -> Self {
        Self {
            duration: 0.0,
            anchor_position: 0.0,
            anchor_instant: None,
        }
    }

    /// Load new media: stopped at the beginning.
    pub fn load(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.anchor_position = 0.0;
        self.anchor_instant = None;
    }

    /// Stop at the end of the media once the clock runs past it.
    pub fn tick(&mut self) {
        if self.is_playing() && self.duration > 0.0 && self.position() >= self.duration {
            self.anchor_position = self.duration;
            self.anchor_instant = None;
        }
    }
}

impl Playback for ClockPlayback {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn position(&self) -> f64 {
        let elapsed = self
            .anchor_instant
            .map(|instant| instant.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        let position = self.anchor_position + elapsed;
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }

    fn seek(&mut self, seconds: f64) {
        let upper = if self.duration > 0.0 { self.duration } else { f64::MAX };
        self.anchor_position = seconds.clamp(0.0, upper);
        if self.anchor_instant.is_some() {
            self.anchor_instant = Some(Instant::now());
        }
    }

    fn play(&mut self) {
        if self.anchor_instant.is_none() {
            self.anchor_instant = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.anchor_position = self.position();
        self.anchor_instant = None;
    }

    fn is_playing(&self) -> bool {
        self.anchor_instant.is_some()
    }
}

/// Transport with no clock, for exercising the timeline in tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct ManualPlayback {
    pub duration: f64,
    pub position: f64,
    pub playing: bool,
    pub seeks: Vec<f64>,
}

#[cfg(test)]
impl Playback for ManualPlayback {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
        self.seeks.push(seconds);
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
