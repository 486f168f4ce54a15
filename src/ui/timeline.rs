// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline with region editing.
//!
//! This module paints the regions of the current video over a time ruler and
//! turns raw pointer input into [`PointerEvent`]s for the interaction engine.

use crate::config::TimelineConfig;
use crate::models::project::Project;
use crate::timeline::{Effect, PointerButton, PointerEvent, TimelineEngine};
use crate::util::geometry::{RegionPart, TimelineLayout, LABEL_BAND};
use egui::{pos2, vec2, Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke};

const TICKS: usize = 5;

const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 250);
const TICK_COLOR: Color32 = Color32::from_rgb(150, 150, 150);
const SLIDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const HANDLE_COLOR: Color32 = Color32::from_rgb(120, 120, 120);
const PLAYHEAD_COLOR: Color32 = Color32::from_rgb(255, 0, 0);

fn body_color(selected: bool) -> Color32 {
    if selected {
        Color32::from_rgba_unmultiplied(255, 180, 100, 200)
    } else {
        Color32::from_rgba_unmultiplied(100, 200, 255, 160)
    }
}

/// Pointer effects produced this frame, with where the pointer was.
pub struct TimelineOutput {
    pub effects: Vec<Effect>,
    pub pointer: Option<Pos2>,
}

/// Display the timeline and feed pointer input to `engine`.
///
/// When `interactive` is false (a popup is open) presses are ignored, but a
/// release still ends any drag.
pub fn show(
    ui: &mut egui::Ui,
    project: &mut Project,
    engine: &mut TimelineEngine,
    options: &TimelineConfig,
    position: f64,
    duration: f64,
    interactive: bool,
) -> TimelineOutput {
    let size = vec2(ui.available_width(), options.height);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let layout = TimelineLayout::new(rect, duration, options.handle_width, options.slider_height);

    let (primary, secondary, released, moving, pointer) = ui.input(|i| {
        (
            i.pointer.button_pressed(egui::PointerButton::Primary),
            i.pointer.button_pressed(egui::PointerButton::Secondary),
            i.pointer.any_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
            i.pointer.latest_pos(),
        )
    });

    let mut events = Vec::new();
    if interactive && response.hovered() {
        if let Some(pos) = pointer {
            if primary {
                events.push(PointerEvent::Pressed {
                    pos,
                    button: PointerButton::Primary,
                });
            } else if secondary {
                events.push(PointerEvent::Pressed {
                    pos,
                    button: PointerButton::Secondary,
                });
            }
        }
    }
    if engine.state().is_dragging() && moving {
        if let Some(pos) = pointer {
            events.push(PointerEvent::Moved { pos });
        }
    }
    if released {
        events.push(PointerEvent::Released);
    }

    let mut effects = Vec::new();
    for event in events {
        effects.extend(engine.handle(event, project, &layout));
    }

    if response.hovered() {
        update_cursor(ui, project, engine, &layout, pointer);
    }

    paint(ui, project, &layout, position);

    TimelineOutput { effects, pointer }
}

fn update_cursor(
    ui: &egui::Ui,
    project: &Project,
    engine: &TimelineEngine,
    layout: &TimelineLayout,
    pointer: Option<Pos2>,
) {
    let icon = if engine.state().is_dragging() {
        Some(CursorIcon::Grabbing)
    } else {
        let hit = match (project.current_video.as_deref(), pointer) {
            (Some(video), Some(pos)) => layout.hit_test(project.regions(video), pos),
            _ => None,
        };
        hit.map(|hit| match hit.part {
            RegionPart::StartHandle | RegionPart::EndHandle => CursorIcon::ResizeHorizontal,
            RegionPart::Slider => CursorIcon::Grab,
            RegionPart::Body => CursorIcon::PointingHand,
        })
    };
    if let Some(icon) = icon {
        ui.ctx().set_cursor_icon(icon);
    }
}

fn paint(ui: &egui::Ui, project: &Project, layout: &TimelineLayout, position: f64) {
    let rect = layout.rect;
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);

    // Time ruler
    let duration = layout.duration();
    for i in 0..=TICKS {
        let t = i as f64 * duration / TICKS as f64;
        let x = layout.map.time_to_x(t);
        painter.line_segment(
            [pos2(x, rect.bottom() - 6.0), pos2(x, rect.bottom())],
            Stroke::new(1.0, TICK_COLOR),
        );
        let anchor = match i {
            0 => Align2::LEFT_BOTTOM,
            i if i == TICKS => Align2::RIGHT_BOTTOM,
            _ => Align2::CENTER_BOTTOM,
        };
        painter.text(
            pos2(x, rect.bottom() - 6.0),
            anchor,
            format!("{:.1}s", t),
            FontId::proportional(9.0),
            TICK_COLOR,
        );
    }

    if let Some(video) = project.current_video.as_deref() {
        for region in project.regions(video) {
            let shape = layout.shape(region);
            painter.rect_filled(shape.body, 0.0, body_color(region.selected));
            painter.rect_filled(shape.slider, 0.0, SLIDER_COLOR);
            painter.rect_filled(shape.start_handle, 0.0, HANDLE_COLOR);
            painter.rect_filled(shape.end_handle, 0.0, HANDLE_COLOR);

            let label_clip = shape.body.shrink2(vec2(layout.handle_width, 0.0));
            if label_clip.width() > 4.0 {
                ui.painter_at(label_clip.intersect(rect)).text(
                    label_clip.left_top() + vec2(3.0, 2.0),
                    Align2::LEFT_TOP,
                    &region.category,
                    FontId::proportional(11.0),
                    Color32::BLACK,
                );
            }

            let edge_y = shape.body.bottom() + 1.0;
            let edge_font = FontId::proportional(8.0);
            painter.text(
                pos2(shape.body.left() + 3.0, edge_y),
                Align2::LEFT_TOP,
                format!("{:.1}s", region.start),
                edge_font.clone(),
                Color32::DARK_GRAY,
            );
            painter.text(
                pos2(shape.body.right() - 3.0, edge_y),
                Align2::RIGHT_TOP,
                format!("{:.1}s", region.end),
                edge_font,
                Color32::DARK_GRAY,
            );
        }
    }

    // Playhead
    let x = layout.map.time_to_x(position);
    painter.line_segment(
        [pos2(x, rect.top()), pos2(x, rect.bottom() - LABEL_BAND / 2.0)],
        Stroke::new(1.5, PLAYHEAD_COLOR),
    );

    if project.current_video.is_none() {
        painter.text(
            Rect::from_min_max(rect.min, pos2(rect.max.x, rect.max.y - LABEL_BAND)).center(),
            Align2::CENTER_CENTER,
            "Select a video to start marking regions",
            FontId::proportional(12.0),
            Color32::GRAY,
        );
    }
}
