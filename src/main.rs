// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clipmark - video region marking and clip export
//!
//! A cross-platform desktop application for marking categorized time
//! regions on a folder of videos and cutting them into clips with ffmpeg.

mod app;
mod config;
mod error;
mod export;
mod io;
mod models;
mod playback;
mod timeline;
mod ui;
mod util;

use anyhow::Result;
use app::ClipmarkApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Clipmark - Video Region Marking"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Clipmark",
        options,
        Box::new(|_cc| Ok(Box::new(ClipmarkApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
