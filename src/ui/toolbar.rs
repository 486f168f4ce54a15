// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with transport and project actions.
//!
//! The toolbar only reports what was clicked; the application performs the
//! action.

/// Button pressed on the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Play,
    Pause,
    OpenFolder,
    AddCategory,
    SaveProject,
    LoadProject,
    Export,
}

/// What the toolbar needs to know to enable its buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolbarState {
    pub has_video: bool,
    pub is_playing: bool,
    pub exporting: bool,
}

/// Display the toolbar buttons.
pub fn show(ui: &mut egui::Ui, state: ToolbarState) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let can_play = state.has_video && !state.is_playing;
        if ui.add_enabled(can_play, egui::Button::new("▶ Play")).clicked() {
            action = Some(ToolbarAction::Play);
        }
        if ui
            .add_enabled(state.is_playing, egui::Button::new("⏸ Pause"))
            .clicked()
        {
            action = Some(ToolbarAction::Pause);
        }

        ui.separator();

        if ui.button("📂 Open folder").clicked() {
            action = Some(ToolbarAction::OpenFolder);
        }
        if ui.button("➕ Add category").clicked() {
            action = Some(ToolbarAction::AddCategory);
        }

        ui.separator();

        if ui.button("💾 Save").clicked() {
            action = Some(ToolbarAction::SaveProject);
        }
        if ui.button("📄 Load").clicked() {
            action = Some(ToolbarAction::LoadProject);
        }

        ui.separator();

        if ui
            .add_enabled(!state.exporting, egui::Button::new("✂ Export clips"))
            .clicked()
        {
            action = Some(ToolbarAction::Export);
        }

        ui.separator();

        let hint = if state.has_video {
            "Right-click the timeline to add a region, Ctrl+C / Ctrl+V to copy and paste"
        } else {
            "Open a folder of videos to begin"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
