// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Central preview area: transport readout, scrub bar and status line.

use crate::models::project::Project;
use crate::playback::Playback;
use crate::util::format_time;

/// Severity of the status line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Display the preview area. Returns a position when the user scrubbed.
pub fn show(ui: &mut egui::Ui, project: &Project, playback: &dyn Playback) -> Option<f64> {
    let mut seek = None;

    let Some(video) = project.current_video.as_deref() else {
        // Welcome message until a video is selected
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Clipmark")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("Mark regions of videos and export them as clips")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                let hint = if project.dir.is_some() {
                    "Select a video from the list"
                } else {
                    "Open a folder of videos to begin"
                };
                ui.label(egui::RichText::new(hint).color(egui::Color32::from_gray(180)));
            });
        });
        return None;
    };

    ui.vertical(|ui| {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.heading(name);
        ui.label(egui::RichText::new(video.display().to_string()).weak().small());
        ui.add_space(12.0);

        let duration = playback.duration();
        let position = playback.position();
        ui.label(
            egui::RichText::new(format!("{} / {}", format_time(position), format_time(duration)))
                .monospace()
                .size(20.0),
        );
        ui.label(if playback.is_playing() { "Playing" } else { "Paused" });

        if duration > 0.0 {
            let mut scrub = position;
            let response = ui.add(
                egui::Slider::new(&mut scrub, 0.0..=duration)
                    .show_value(false)
                    .text("Position"),
            );
            if response.changed() {
                seek = Some(scrub);
            }
        } else {
            ui.label(egui::RichText::new("Reading duration...").weak());
        }

        ui.add_space(12.0);
        match project.current_region() {
            Some(region) => {
                ui.label(format!(
                    "Looping '{}' {} to {}",
                    region.category,
                    format_time(region.start),
                    format_time(region.end)
                ));
            }
            None => {
                ui.label(egui::RichText::new("No region selected").weak());
            }
        }
    });

    seek
}

/// Display the status line.
pub fn status_bar(ui: &mut egui::Ui, project: &Project, status: Option<&Status>) {
    ui.horizontal(|ui| {
        match status {
            Some(Status::Info(message)) => {
                ui.label(message);
            }
            Some(Status::Error(message)) => {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
            }
            None => {
                ui.label("Ready");
            }
        }
        ui.separator();
        ui.label(format!(
            "{} videos, {} regions",
            project.video_files.len(),
            project.total_regions()
        ));
    });
}
