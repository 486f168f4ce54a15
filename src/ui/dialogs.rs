// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal-style windows: adding a category and export progress.

use crate::export::{ExportProgress, ExportSummary};
use egui::{Align2, Key, Vec2};
use std::path::Path;

/// State of a dialog after this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Pending,
    Confirmed(T),
    Cancelled,
}

/// Ask for a new category name.
pub fn add_category(ctx: &egui::Context, name: &mut String) -> DialogOutcome<String> {
    let mut outcome = DialogOutcome::Pending;

    egui::Window::new("Add category")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            let edit = ui.add(egui::TextEdit::singleline(name).hint_text("Category name"));
            if !edit.has_focus() && name.is_empty() {
                edit.request_focus();
            }
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let valid = !name.trim().is_empty();

            ui.horizontal(|ui| {
                if ui.add_enabled(valid, egui::Button::new("Add")).clicked() || (submitted && valid) {
                    outcome = DialogOutcome::Confirmed(name.trim().to_string());
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancelled;
                }
            });
        });

    if outcome == DialogOutcome::Pending && ctx.input(|i| i.key_pressed(Key::Escape)) {
        outcome = DialogOutcome::Cancelled;
    }
    outcome
}

/// Snapshot of a running export for display.
pub struct ExportProgressView<'a> {
    pub progress: Option<&'a ExportProgress>,
    pub total: usize,
    pub cancelling: bool,
}

/// Show export progress. Returns true when Cancel was clicked.
pub fn export_progress(ctx: &egui::Context, view: &ExportProgressView<'_>) -> bool {
    let mut cancel = false;

    egui::Window::new("Exporting clips")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_width(340.0);
            let completed = view.progress.map_or(0, |p| p.completed);
            let fraction = view.progress.map_or(0.0, ExportProgress::fraction);
            ui.label(format!("Exporting {} of {} regions", completed, view.total));
            ui.add(
                egui::ProgressBar::new(fraction)
                    .desired_width(ui.available_width())
                    .show_percentage(),
            );
            if let Some(progress) = view.progress {
                let message = match &progress.result {
                    Ok(path) => format!("Wrote {}", path.display()),
                    Err(failure) => failure.to_string(),
                };
                ui.label(egui::RichText::new(message).weak().small());
            }

            ui.add_space(6.0);
            if view.cancelling {
                ui.label(egui::RichText::new("Cancelling after the current clip...").italics());
            } else if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });

    cancel
}

/// Show the outcome of a finished export. Returns true once dismissed.
pub fn export_results(ctx: &egui::Context, out_root: &Path, summary: &ExportSummary) -> bool {
    let mut close = false;

    egui::Window::new("Export finished")
        .collapsible(false)
        .resizable(true)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!(
                "Exported {} of {} clips to {}",
                summary.exported.len(),
                summary.total,
                out_root.display()
            ));
            if summary.cancelled {
                ui.label(format!("Cancelled, {} regions skipped", summary.skipped()));
            }

            if !summary.failures.is_empty() {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 80),
                    format!("{} clips failed:", summary.failures.len()),
                );
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for failure in &summary.failures {
                        ui.label(egui::RichText::new(failure.to_string()).small());
                    }
                });
            }

            ui.separator();
            if ui.button("OK").clicked() {
                close = true;
            }
        });

    close
}
