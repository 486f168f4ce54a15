// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Side panel listing the videos and categories of the project.

use crate::models::project::Project;
use std::path::PathBuf;

/// Result of video list interaction.
pub enum VideoListAction {
    None,
    SelectVideo(PathBuf),
}

/// Display the video list and the category overview.
pub fn show(ui: &mut egui::Ui, project: &Project) -> VideoListAction {
    let mut action = VideoListAction::None;

    ui.heading("Videos");
    match &project.dir {
        Some(dir) => {
            ui.label(egui::RichText::new(dir.display().to_string()).weak().small());
        }
        None => {
            ui.label(egui::RichText::new("No folder open").weak());
        }
    }
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("video_list")
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            for video in &project.video_files {
                let name = video
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| video.display().to_string());
                let count = project.regions(video).len();
                let label = if count > 0 {
                    format!("{} ({})", name, count)
                } else {
                    name
                };
                let selected = project.current_video.as_deref() == Some(video.as_path());
                if ui.selectable_label(selected, label).clicked() && !selected {
                    action = VideoListAction::SelectVideo(video.clone());
                }
            }
        });

    ui.add_space(12.0);
    ui.heading("Categories");
    ui.separator();
    if project.categories.is_empty() {
        ui.label(egui::RichText::new("No categories yet").weak());
    }
    for category in &project.categories {
        let used = project
            .regions
            .all()
            .filter(|region| &region.category == category)
            .count();
        ui.horizontal(|ui| {
            ui.label(category);
            ui.label(egui::RichText::new(format!("× {}", used)).weak());
        });
    }

    ui.separator();
    ui.label(format!("Total regions: {}", project.total_regions()));

    action
}
