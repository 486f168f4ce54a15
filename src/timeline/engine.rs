// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline interaction state machine.
//!
//! Pointer events from the timeline widget are resolved against the regions of
//! the current video by [`step`], a transition function from
//! `(state, event)` to `(state, effects)`. The project is mutated in place;
//! everything the caller has to do afterwards (seek the transport, show a
//! menu) comes back as an [`Effect`].

use crate::models::project::Project;
use crate::models::region::{Region, DEFAULT_REGION_LENGTH};
use crate::playback::Playback;
use crate::util::geometry::{RegionPart, TimelineLayout};
use egui::Pos2;

/// Drag in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Whole-region move; `offset` is pointer time minus region start.
    Move { region_id: u64, offset: f64 },
    /// `offset` is the start edge time minus pointer time.
    ResizeStart { region_id: u64, offset: f64 },
    /// `offset` is the end edge time minus pointer time.
    ResizeEnd { region_id: u64, offset: f64 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    pub fn region_id(&self) -> Option<u64> {
        match *self {
            DragState::Idle => None,
            DragState::Move { region_id, .. }
            | DragState::ResizeStart { region_id, .. }
            | DragState::ResizeEnd { region_id, .. } => Some(region_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { pos: Pos2, button: PointerButton },
    Moved { pos: Pos2 },
    Released,
}

/// Where the category menu was opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMenuRequest {
    /// Pointer time; a region created from the menu starts here.
    pub time: f64,
    pub duration: f64,
}

/// Work left to the caller after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Seek(f64),
    SeekAndPlay(f64),
    /// Ask the user whether to delete the region.
    ConfirmDeleteRegion { region_id: u64 },
    OpenCategoryMenu(CategoryMenuRequest),
}

/// What the user picked in the category menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuResolution {
    Selected(String),
    AddedNew(String),
    DeletedCategory(String),
    Dismissed,
}

/// Resolve one pointer event.
pub fn step(
    state: DragState,
    event: PointerEvent,
    project: &mut Project,
    layout: &TimelineLayout,
) -> (DragState, Vec<Effect>) {
    match event {
        PointerEvent::Pressed { pos, button } => press(project, layout, pos, button),
        PointerEvent::Moved { pos } => drag(state, project, layout, pos),
        PointerEvent::Released => (DragState::Idle, Vec::new()),
    }
}

fn press(
    project: &mut Project,
    layout: &TimelineLayout,
    pos: Pos2,
    button: PointerButton,
) -> (DragState, Vec<Effect>) {
    let time = layout.time_at(pos);
    let hit = match project.current_video.as_deref() {
        Some(video) => layout.hit_test(project.regions(video), pos),
        None => None,
    };
    project.current_region = hit.map(|h| h.region_id);

    let Some(hit) = hit else {
        return match button {
            PointerButton::Secondary => (
                DragState::Idle,
                vec![Effect::OpenCategoryMenu(CategoryMenuRequest {
                    time,
                    duration: layout.duration(),
                })],
            ),
            PointerButton::Primary => (DragState::Idle, vec![Effect::SeekAndPlay(time)]),
        };
    };

    if button == PointerButton::Secondary {
        return (
            DragState::Idle,
            vec![Effect::ConfirmDeleteRegion {
                region_id: hit.region_id,
            }],
        );
    }

    let Some(region) = current_region_mut(project, hit.region_id) else {
        return (DragState::Idle, Vec::new());
    };
    let (start, end) = (region.start, region.end);

    let next = match hit.part {
        RegionPart::Body => return (DragState::Idle, vec![Effect::Seek(start)]),
        RegionPart::Slider => DragState::Move {
            region_id: hit.region_id,
            offset: time - start,
        },
        RegionPart::StartHandle => DragState::ResizeStart {
            region_id: hit.region_id,
            offset: start - time,
        },
        RegionPart::EndHandle => DragState::ResizeEnd {
            region_id: hit.region_id,
            offset: end - time,
        },
    };

    select_only(project, hit.region_id);
    log::debug!("Drag started: {:?}", next);

    let effects = match next {
        DragState::Move { .. } => vec![Effect::Seek(start)],
        _ => Vec::new(),
    };
    (next, effects)
}

fn drag(
    state: DragState,
    project: &mut Project,
    layout: &TimelineLayout,
    pos: Pos2,
) -> (DragState, Vec<Effect>) {
    let Some(region_id) = state.region_id() else {
        return (state, Vec::new());
    };
    let Some(region) = current_region_mut(project, region_id) else {
        return (DragState::Idle, Vec::new());
    };

    let time = layout.time_at(pos);
    let duration = layout.duration();
    let seek_to = match state {
        DragState::Move { offset, .. } => {
            region.move_to(time - offset, duration);
            region.start
        }
        DragState::ResizeStart { offset, .. } => {
            region.set_start(time + offset);
            region.start
        }
        DragState::ResizeEnd { offset, .. } => {
            region.set_end(time + offset, duration);
            region.end
        }
        DragState::Idle => return (state, Vec::new()),
    };
    (state, vec![Effect::Seek(seek_to)])
}

fn current_region_mut(project: &mut Project, region_id: u64) -> Option<&mut Region> {
    let video = project.current_video.clone()?;
    project.region_mut(&video, region_id)
}

/// Mark `region_id` as the only selected region of the current video.
fn select_only(project: &mut Project, region_id: u64) {
    let Some(video) = project.current_video.clone() else {
        return;
    };
    if let Some(regions) = project.regions_mut(&video) {
        for region in regions.iter_mut() {
            region.selected = region.id == region_id;
        }
    }
}

/// Timeline interaction state for one editing session.
#[derive(Debug, Default)]
pub struct TimelineEngine {
    state: DragState,
    clipboard: Option<Region>,
}

impl TimelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Feed one pointer event through the state machine.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        project: &mut Project,
        layout: &TimelineLayout,
    ) -> Vec<Effect> {
        let (next, effects) = step(self.state, event, project, layout);
        self.state = next;
        effects
    }

    /// Abandon any drag, e.g. when the current video changes.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Delete a region after the user confirmed it.
    pub fn confirm_delete(&mut self, project: &mut Project, region_id: u64) -> Option<Region> {
        let video = project.current_video.clone()?;
        if self.state.region_id() == Some(region_id) {
            self.state = DragState::Idle;
        }
        project.remove_region(&video, region_id)
    }

    /// Apply the category menu choice. Returns the id of a created region.
    pub fn resolve_category_menu(
        &mut self,
        project: &mut Project,
        request: CategoryMenuRequest,
        resolution: MenuResolution,
    ) -> Option<u64> {
        let category = match resolution {
            MenuResolution::Selected(category) => category,
            MenuResolution::AddedNew(category) => {
                let category = category.trim().to_string();
                if category.is_empty() {
                    return None;
                }
                project.add_category(&category);
                category
            }
            MenuResolution::DeletedCategory(category) => {
                project.remove_category(&category);
                return None;
            }
            MenuResolution::Dismissed => return None,
        };

        project.mark_category_used(&category);
        let Some(video) = project.current_video.clone() else {
            log::warn!("No video selected, region '{}' not created", category);
            return None;
        };
        let id = project.next_id();
        let region = Region::new(id, category, request.time, DEFAULT_REGION_LENGTH, request.duration);
        project.push_region(&video, region);
        Some(id)
    }

    /// Snapshot the current region by value. Returns false if none is current.
    pub fn copy(&mut self, project: &Project) -> bool {
        match project.current_region() {
            Some(region) => {
                log::debug!("Copied region {}", region.id);
                self.clipboard = Some(region.clone());
                true
            }
            None => false,
        }
    }

    /// Paste the copied region one second later on the current video.
    pub fn paste(&mut self, project: &mut Project, duration: f64) -> Option<u64> {
        let copied = self.clipboard.as_ref()?;
        let video = project.current_video.clone()?;
        let id = project.next_id();
        let region = copied.pasted(id, duration.max(1.0));
        project.push_region(&video, region);
        Some(id)
    }

    /// Loop policy, evaluated on every playhead update: once the playhead
    /// passes the end of the current region it jumps back to the start.
    pub fn loop_target(&self, project: &Project, position: f64) -> Option<f64> {
        let region = project.current_region()?;
        (position > region.end).then_some(region.start)
    }

    /// Apply the loop policy to a playing transport. Returns true if it
    /// jumped back.
    pub fn follow_playhead(&self, project: &Project, playback: &mut dyn Playback) -> bool {
        if !playback.is_playing() {
            return false;
        }
        match self.loop_target(project, playback.position()) {
            Some(start) => {
                playback.seek(start);
                true
            }
            None => false,
        }
    }

    /// A seek the user made outside the timeline. Leaving the current region
    /// ends its loop.
    pub fn manual_seek(&mut self, project: &mut Project, position: f64) {
        if let Some(region) = project.current_region() {
            if !region.contains(position) {
                log::debug!("Seek left region {}, loop released", region.id);
                project.current_region = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::MIN_REGION_LENGTH;
    use crate::playback::ManualPlayback;
    use egui::{pos2, Rect};
    use std::path::{Path, PathBuf};

    const DURATION: f64 = 30.0;
    const BODY_Y: f32 = 40.0;
    const SLIDER_Y: f32 = 5.0;

    /// 10 px per second, slider 0..12, body 12..58.
    fn layout() -> TimelineLayout {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 72.0));
        TimelineLayout::new(rect, DURATION, 6.0, 12.0)
    }

    fn video() -> PathBuf {
        PathBuf::from("clip.mp4")
    }

    fn project_with(regions: &[(&str, f64, f64)]) -> Project {
        let mut project = Project::new();
        project.add_category("A");
        project.select_video(Some(video()));
        for (category, start, end) in regions {
            let id = project.next_id();
            project.push_region(&video(), Region::new(id, *category, *start, end - start, DURATION));
        }
        project
    }

    fn x(seconds: f64) -> f32 {
        (seconds * 10.0) as f32
    }

    fn press(engine: &mut TimelineEngine, project: &mut Project, pos: Pos2, button: PointerButton) -> Vec<Effect> {
        engine.handle(PointerEvent::Pressed { pos, button }, project, &layout())
    }

    fn move_to(engine: &mut TimelineEngine, project: &mut Project, pos: Pos2) -> Vec<Effect> {
        engine.handle(PointerEvent::Moved { pos }, project, &layout())
    }

    fn region(project: &Project, id: u64) -> Region {
        project.region(&video(), id).cloned().unwrap()
    }

    fn assert_valid(region: &Region) {
        assert!(region.start >= 0.0);
        assert!(region.end <= DURATION + 1e-9);
        assert!(region.end - region.start >= MIN_REGION_LENGTH - 1e-9);
    }

    #[test]
    fn test_slider_press_starts_move_and_seeks() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(11.0), SLIDER_Y), PointerButton::Primary);

        assert_eq!(effects, vec![Effect::Seek(10.0)]);
        assert!(matches!(engine.state(), DragState::Move { region_id: 1, offset } if (offset - 1.0).abs() < 1e-6));
        assert!(region(&project, 1).selected);
        assert_eq!(project.current_region, Some(1));
    }

    #[test]
    fn test_move_keeps_length_and_clamps() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(11.0), SLIDER_Y), PointerButton::Primary);

        let effects = move_to(&mut engine, &mut project, pos2(x(16.0), SLIDER_Y));
        let moved = region(&project, 1);
        assert!((moved.start - 15.0).abs() < 1e-4);
        assert!((moved.length() - 2.0).abs() < 1e-9);
        assert_eq!(effects, vec![Effect::Seek(moved.start)]);

        move_to(&mut engine, &mut project, pos2(x(40.0), SLIDER_Y));
        let moved = region(&project, 1);
        assert!((moved.start - 28.0).abs() < 1e-9);
        assert!((moved.end - 30.0).abs() < 1e-9);

        move_to(&mut engine, &mut project, pos2(-50.0, SLIDER_Y));
        let moved = region(&project, 1);
        assert_eq!(moved.start, 0.0);
        assert!((moved.end - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_press_seeks_without_drag() {
        let mut project = project_with(&[("A", 10.0, 20.0)]);
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(15.0), BODY_Y), PointerButton::Primary);
        assert_eq!(effects, vec![Effect::Seek(10.0)]);
        assert_eq!(engine.state(), DragState::Idle);
        assert_eq!(project.current_region, Some(1));
    }

    #[test]
    fn test_resize_start_clamps_before_end() {
        let mut project = project_with(&[("A", 10.0, 20.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(10.0) + 2.0, BODY_Y), PointerButton::Primary);
        assert!(matches!(engine.state(), DragState::ResizeStart { region_id: 1, .. }));

        let effects = move_to(&mut engine, &mut project, pos2(x(25.0), BODY_Y));
        let resized = region(&project, 1);
        assert!((resized.start - (20.0 - MIN_REGION_LENGTH)).abs() < 1e-9);
        assert_eq!(resized.end, 20.0);
        assert_eq!(effects, vec![Effect::Seek(resized.start)]);

        move_to(&mut engine, &mut project, pos2(-100.0, BODY_Y));
        assert_eq!(region(&project, 1).start, 0.0);
    }

    #[test]
    fn test_resize_end_clamps_after_start() {
        let mut project = project_with(&[("A", 10.0, 20.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(20.0) - 2.0, BODY_Y), PointerButton::Primary);
        assert!(matches!(engine.state(), DragState::ResizeEnd { region_id: 1, .. }));

        move_to(&mut engine, &mut project, pos2(x(2.0), BODY_Y));
        let resized = region(&project, 1);
        assert!((resized.end - (10.0 + MIN_REGION_LENGTH)).abs() < 1e-9);

        let effects = move_to(&mut engine, &mut project, pos2(x(90.0), BODY_Y));
        assert_eq!(region(&project, 1).end, DURATION);
        assert_eq!(effects, vec![Effect::Seek(DURATION)]);
    }

    #[test]
    fn test_release_always_returns_to_idle() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(11.0), SLIDER_Y), PointerButton::Primary);
        assert!(engine.state().is_dragging());
        engine.handle(PointerEvent::Released, &mut project, &layout());
        assert_eq!(engine.state(), DragState::Idle);

        let before = region(&project, 1);
        let effects = move_to(&mut engine, &mut project, pos2(x(25.0), SLIDER_Y));
        assert!(effects.is_empty());
        assert_eq!(region(&project, 1), before);
    }

    #[test]
    fn test_empty_primary_press_seeks_and_plays() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        project.current_region = Some(1);
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(25.0), BODY_Y), PointerButton::Primary);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::SeekAndPlay(t) if (t - 25.0).abs() < 1e-4));
        assert_eq!(project.current_region, None);
    }

    #[test]
    fn test_secondary_on_region_asks_to_delete() {
        let mut project = project_with(&[("A", 10.0, 12.0), ("A", 14.0, 16.0), ("A", 20.0, 22.0)]);
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(15.0), BODY_Y), PointerButton::Secondary);
        assert_eq!(effects, vec![Effect::ConfirmDeleteRegion { region_id: 2 }]);

        let removed = engine.confirm_delete(&mut project, 2).unwrap();
        assert_eq!(removed.id, 2);
        let ids: Vec<u64> = project.regions(&video()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let request = CategoryMenuRequest { time: 1.0, duration: DURATION };
        let new_id = engine.resolve_category_menu(&mut project, request, MenuResolution::Selected("A".into()));
        assert_eq!(new_id, Some(4));
    }

    #[test]
    fn test_secondary_on_empty_opens_menu_and_creates_region() {
        let mut project = project_with(&[]);
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(5.0), BODY_Y), PointerButton::Secondary);
        let Effect::OpenCategoryMenu(request) = effects[0] else {
            panic!("expected category menu, got {:?}", effects);
        };
        assert!((request.time - 5.0).abs() < 1e-4);

        let id = engine
            .resolve_category_menu(&mut project, request, MenuResolution::Selected("A".into()))
            .unwrap();
        let created = region(&project, id);
        assert_eq!(created.category, "A");
        assert_eq!(created.start, request.time);
        assert!((created.end - (request.time + 2.0)).abs() < 1e-9);
        assert_eq!(project.last_category.as_deref(), Some("A"));
    }

    #[test]
    fn test_region_created_near_end_is_truncated() {
        let mut project = project_with(&[]);
        let mut engine = TimelineEngine::new();
        let request = CategoryMenuRequest { time: 29.0, duration: DURATION };
        let id = engine
            .resolve_category_menu(&mut project, request, MenuResolution::Selected("A".into()))
            .unwrap();
        let created = region(&project, id);
        assert_eq!((created.start, created.end), (29.0, 30.0));
    }

    #[test]
    fn test_menu_add_new_category_creates_region() {
        let mut project = project_with(&[]);
        let mut engine = TimelineEngine::new();
        let request = CategoryMenuRequest { time: 3.0, duration: DURATION };
        let id = engine
            .resolve_category_menu(&mut project, request, MenuResolution::AddedNew(" snare ".into()))
            .unwrap();
        assert_eq!(region(&project, id).category, "snare");
        assert_eq!(project.categories, vec!["A", "snare"]);
        assert_eq!(project.categories_by_recency(), vec!["snare", "A"]);
    }

    #[test]
    fn test_menu_delete_and_dismiss_create_nothing() {
        let mut project = project_with(&[("A", 1.0, 3.0)]);
        let mut engine = TimelineEngine::new();
        let request = CategoryMenuRequest { time: 10.0, duration: DURATION };
        assert_eq!(
            engine.resolve_category_menu(&mut project, request, MenuResolution::DeletedCategory("A".into())),
            None
        );
        assert_eq!(engine.resolve_category_menu(&mut project, request, MenuResolution::Dismissed), None);
        assert!(project.categories.is_empty());
        assert_eq!(project.total_regions(), 1);
        assert_eq!(project.regions(&video())[0].category, "A");
    }

    #[test]
    fn test_copy_paste_shifts_one_second() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(11.0), BODY_Y), PointerButton::Primary);
        assert!(engine.copy(&project));

        let id = engine.paste(&mut project, DURATION).unwrap();
        assert_ne!(id, 1);
        let pasted = region(&project, id);
        assert_eq!(pasted.category, "A");
        assert_eq!((pasted.start, pasted.end), (11.0, 13.0));
    }

    #[test]
    fn test_paste_without_copy_is_noop() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        assert!(!engine.copy(&project));
        assert_eq!(engine.paste(&mut project, DURATION), None);
        assert_eq!(project.total_regions(), 1);
    }

    #[test]
    fn test_loop_returns_to_region_start() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(11.0), BODY_Y), PointerButton::Primary);
        assert_eq!(engine.loop_target(&project, 11.5), None);
        assert_eq!(engine.loop_target(&project, 12.0), None);
        assert_eq!(engine.loop_target(&project, 12.05), Some(10.0));
    }

    #[test]
    fn test_playing_transport_loops_region() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        press(&mut engine, &mut project, pos2(x(11.0), BODY_Y), PointerButton::Primary);

        let mut playback = ManualPlayback {
            duration: DURATION,
            position: 12.2,
            ..ManualPlayback::default()
        };
        assert!(!engine.follow_playhead(&project, &mut playback));
        assert!(playback.seeks.is_empty());

        playback.play();
        assert!(engine.follow_playhead(&project, &mut playback));
        assert_eq!(playback.position(), 10.0);
        assert!(!engine.follow_playhead(&project, &mut playback));

        playback.seek(20.0);
        engine.manual_seek(&mut project, playback.position());
        assert!(!engine.follow_playhead(&project, &mut playback));
        assert_eq!(playback.seeks, vec![10.0, 20.0]);
    }

    #[test]
    fn test_paste_onto_shorter_video_stays_inside_it() {
        let mut project = project_with(&[("A", 0.0, 20.0)]);
        let mut engine = TimelineEngine::new();
        project.current_region = Some(1);
        assert!(engine.copy(&project));

        let short = PathBuf::from("short.mp4");
        project.select_video(Some(short.clone()));
        engine.reset();
        let id = engine.paste(&mut project, 10.0).unwrap();
        let pasted = project.region(&short, id).unwrap();
        assert_eq!((pasted.start, pasted.end), (0.0, 10.0));
    }

    #[test]
    fn test_manual_seek_outside_releases_loop() {
        let mut project = project_with(&[("A", 10.0, 12.0)]);
        let mut engine = TimelineEngine::new();
        project.current_region = Some(1);
        engine.manual_seek(&mut project, 11.0);
        assert_eq!(project.current_region, Some(1));
        engine.manual_seek(&mut project, 20.0);
        assert_eq!(project.current_region, None);
        assert_eq!(engine.loop_target(&project, 25.0), None);
    }

    #[test]
    fn test_no_video_selected_creates_nothing() {
        let mut project = Project::new();
        project.add_category("A");
        let mut engine = TimelineEngine::new();
        let effects = press(&mut engine, &mut project, pos2(x(5.0), BODY_Y), PointerButton::Primary);
        assert!(matches!(effects[0], Effect::SeekAndPlay(_)));
        let request = CategoryMenuRequest { time: 5.0, duration: DURATION };
        assert_eq!(
            engine.resolve_category_menu(&mut project, request, MenuResolution::Selected("A".into())),
            None
        );
        assert_eq!(project.total_regions(), 0);
        assert!(project.regions(Path::new("clip.mp4")).is_empty());
    }

    #[test]
    fn test_arbitrary_drags_keep_regions_valid() {
        let mut project = project_with(&[("A", 0.5, 2.5), ("A", 10.0, 10.2), ("A", 27.0, 30.0)]);
        let mut engine = TimelineEngine::new();
        let targets = [-80.0, 0.0, 3.0, 55.0, 101.0, 150.0, 299.0, 300.0, 420.0, 1.0];

        let starts: Vec<(u64, Pos2)> = {
            let layout = layout();
            project
                .regions(&video())
                .iter()
                .flat_map(|r| {
                    let shape = layout.shape(r);
                    [
                        (r.id, shape.slider.center()),
                        (r.id, pos2(shape.start_handle.min.x + 1.0, BODY_Y)),
                        (r.id, pos2(shape.end_handle.max.x - 1.0, BODY_Y)),
                    ]
                })
                .collect()
        };

        for (_, grab) in starts {
            press(&mut engine, &mut project, grab, PointerButton::Primary);
            for target in targets {
                move_to(&mut engine, &mut project, pos2(target, grab.y));
                for region in project.regions(&video()) {
                    assert_valid(region);
                }
            }
            engine.handle(PointerEvent::Released, &mut project, &layout());
        }
    }
}
