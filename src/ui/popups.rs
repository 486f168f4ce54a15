// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Context popups opened from the timeline.
//!
//! Both popups are floating areas anchored at the pointer. They close on
//! Escape, on a press outside of them, or once the user picks something.

use crate::timeline::{CategoryMenuRequest, MenuResolution};
use egui::{Id, Key, Order, Pos2, Rect};

/// Open category menu.
pub struct CategoryMenu {
    request: CategoryMenuRequest,
    pos: Pos2,
    new_name: String,
    /// Opened this frame; the opening click must not dismiss it.
    fresh: bool,
}

impl CategoryMenu {
    pub fn new(request: CategoryMenuRequest, pos: Pos2) -> Self {
        Self {
            request,
            pos,
            new_name: String::new(),
            fresh: true,
        }
    }

    pub fn request(&self) -> CategoryMenuRequest {
        self.request
    }
}

/// Open delete confirmation for one region.
pub struct DeletePrompt {
    pub region_id: u64,
    pos: Pos2,
    fresh: bool,
}

impl DeletePrompt {
    pub fn new(region_id: u64, pos: Pos2) -> Self {
        Self {
            region_id,
            pos,
            fresh: true,
        }
    }
}

fn pressed_outside(ctx: &egui::Context, rect: Rect) -> bool {
    ctx.input(|i| {
        i.pointer.any_pressed()
            && i
                .pointer
                .interact_pos()
                .map_or(false, |pos| !rect.contains(pos))
    })
}

fn escape_pressed(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.key_pressed(Key::Escape))
}

/// Show the category menu. `categories` come most recently used first.
///
/// Returns the user's choice once the menu closes.
pub fn category_menu(
    ctx: &egui::Context,
    menu: &mut CategoryMenu,
    categories: &[&str],
) -> Option<MenuResolution> {
    let mut resolution = None;

    let area = egui::Area::new(Id::new("category_menu"))
        .order(Order::Foreground)
        .fixed_pos(menu.pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(180.0);
                ui.label(egui::RichText::new("New region").strong());
                ui.separator();

                if categories.is_empty() {
                    ui.label(egui::RichText::new("No categories yet").weak());
                }
                for category in categories {
                    if ui.button(*category).clicked() {
                        resolution = Some(MenuResolution::Selected(category.to_string()));
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut menu.new_name)
                            .hint_text("Add new category")
                            .desired_width(120.0),
                    );
                    let submitted =
                        edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                    let can_add = !menu.new_name.trim().is_empty();
                    if ui.add_enabled(can_add, egui::Button::new("Add")).clicked()
                        || (submitted && can_add)
                    {
                        resolution = Some(MenuResolution::AddedNew(menu.new_name.trim().to_string()));
                    }
                });

                if !categories.is_empty() {
                    ui.collapsing("Delete category", |ui| {
                        for category in categories {
                            if ui.button(format!("🗑 {}", category)).clicked() {
                                resolution =
                                    Some(MenuResolution::DeletedCategory(category.to_string()));
                            }
                        }
                    });
                }

                ui.separator();
                if ui.button("Cancel").clicked() {
                    resolution = Some(MenuResolution::Dismissed);
                }
            });
        });

    if resolution.is_none() {
        let outside = !menu.fresh && pressed_outside(ctx, area.response.rect);
        if outside || escape_pressed(ctx) {
            resolution = Some(MenuResolution::Dismissed);
        }
    }
    menu.fresh = false;
    resolution
}

/// Ask whether to delete a region. Returns the answer once given.
pub fn confirm_delete(ctx: &egui::Context, prompt: &mut DeletePrompt) -> Option<bool> {
    let mut answer = None;

    let area = egui::Area::new(Id::new("delete_region_prompt"))
        .order(Order::Foreground)
        .fixed_pos(prompt.pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label("Delete this region?");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
        });

    if answer.is_none() {
        let outside = !prompt.fresh && pressed_outside(ctx, area.response.rect);
        if outside || escape_pressed(ctx) {
            answer = Some(false);
        }
    }
    prompt.fresh = false;
    answer
}
