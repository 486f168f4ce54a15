// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and UI logic.
//!
//! This module contains the core application structure that wires the
//! project model, the timeline engine, the playback transport and the export
//! worker to the egui panels.

use crate::config::AppConfig;
use crate::error::ExportError;
use crate::export::{
    spawn_export, ExportEvent, ExportHandle, ExportPlan, ExportProgress, ExportSummary, FfmpegSlicer,
};
use crate::io::{media, serialization};
use crate::models::project::Project;
use crate::playback::{ClockPlayback, Playback};
use crate::timeline::{Effect, MenuResolution, TimelineEngine};
use crate::ui::dialogs::{self, DialogOutcome, ExportProgressView};
use crate::ui::popups::{self, CategoryMenu, DeletePrompt};
use crate::ui::preview::{self, Status};
use crate::ui::toolbar::{self, ToolbarAction, ToolbarState};
use crate::ui::timeline;
use crate::ui::video_list::{self, VideoListAction};
use egui::{Key, Pos2};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Background ffprobe run for the selected video.
struct DurationProbe {
    video: PathBuf,
    receiver: Receiver<Result<f64, String>>,
}

/// Export running on the worker thread.
struct ExportJob {
    handle: ExportHandle,
    out_root: PathBuf,
    total: usize,
    /// Latest progress report, none before the first clip is done
    progress: Option<ExportProgress>,
}

/// Main application state.
pub struct ClipmarkApp {
    config: AppConfig,

    /// Project being edited
    project: Project,

    /// Timeline drag state and region clipboard
    engine: TimelineEngine,

    playback: ClockPlayback,

    /// Receiver for the duration of the selected video
    duration_probe: Option<DurationProbe>,

    category_menu: Option<CategoryMenu>,
    delete_prompt: Option<DeletePrompt>,

    /// Name typed into the add category dialog, while it is open
    new_category: Option<String>,

    export_job: Option<ExportJob>,
    export_result: Option<(PathBuf, ExportSummary)>,

    status: Option<Status>,
}

impl ClipmarkApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            project: Project::new(),
            engine: TimelineEngine::new(),
            playback: ClockPlayback::new(),
            duration_probe: None,
            category_menu: None,
            delete_prompt: None,
            new_category: None,
            export_job: None,
            export_result: None,
            status: None,
        }
    }

    fn info(&mut self, message: String) {
        log::info!("{}", message);
        self.status = Some(Status::Info(message));
    }

    fn error(&mut self, message: String) {
        log::error!("{}", message);
        self.status = Some(Status::Error(message));
    }

    fn popup_open(&self) -> bool {
        self.category_menu.is_some() || self.delete_prompt.is_some() || self.new_category.is_some()
    }

    /// Make `video` current: stopped at 0, duration read in the background.
    fn select_video(&mut self, video: Option<PathBuf>) {
        self.engine.reset();
        self.category_menu = None;
        self.delete_prompt = None;
        self.playback.load(0.0);
        self.project.select_video(video.clone());
        self.duration_probe = None;

        let Some(video) = video else {
            return;
        };
        log::info!("Selected {}", video.display());

        let (sender, receiver) = channel();
        let ffprobe = self.config.ffprobe_path.clone();
        let path = video.clone();
        std::thread::spawn(move || {
            let result = media::probe_duration(&ffprobe, &path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
        self.duration_probe = Some(DurationProbe { video, receiver });
    }

    fn poll_duration_probe(&mut self) {
        let Some(probe) = &self.duration_probe else {
            return;
        };
        let result = match probe.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("probe worker exited".to_string()),
        };
        let Some(probe) = self.duration_probe.take() else {
            return;
        };
        if self.project.current_video.as_deref() != Some(probe.video.as_path()) {
            return;
        }

        match result {
            Ok(duration) => {
                log::info!("{}: {:.3}s", probe.video.display(), duration);
                self.playback.load(duration);
            }
            Err(e) => self.error(format!(
                "Could not read the duration of {}: {}",
                probe.video.display(),
                e
            )),
        }
    }

    fn open_folder(&mut self) {
        let Some(dir) = rfd::FileDialog::new().set_title("Open video folder").pick_folder() else {
            return;
        };
        let config = &self.config;
        match media::scan_videos(&dir, |path| config.is_video(path)) {
            Ok(videos) => {
                let first = videos.first().cloned();
                let count = videos.len();
                self.project.set_directory(dir.clone(), videos);
                self.select_video(first);
                self.info(format!("Found {} videos in {}", count, dir.display()));
            }
            Err(e) => self.error(format!("{:#}", e)),
        }
    }

    fn save_project(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Project", &["json", "yaml", "yml"])
            .set_file_name("project.json")
            .save_file()
        else {
            return;
        };
        match serialization::save_project(&self.project, &path) {
            Ok(()) => self.info(format!("Saved project to {}", path.display())),
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Replace the project from a file. A file that fails to load leaves the
    /// current project untouched.
    fn load_project(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Project", &["json", "yaml", "yml"])
            .pick_file()
        else {
            return;
        };
        match serialization::load_project(&path) {
            Ok(project) => {
                let first = project.video_files.first().cloned();
                self.project = project;
                self.select_video(first);
                self.info(format!(
                    "Loaded {} regions from {}",
                    self.project.total_regions(),
                    path.display()
                ));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn start_export(&mut self) {
        if self.export_job.is_some() {
            return;
        }
        if self.project.dir.is_none() {
            self.error(ExportError::NoWorkingDirectory.to_string());
            return;
        }
        let out_root = rfd::FileDialog::new().set_title("Export clips to").pick_folder();

        match ExportPlan::build(&self.project, out_root.as_deref()) {
            Ok(plan) => {
                self.playback.pause();
                let out_root = plan.out_root.clone();
                let total = plan.total();
                let handle = spawn_export(plan, FfmpegSlicer::from_config(&self.config));
                self.export_job = Some(ExportJob {
                    handle,
                    out_root,
                    total,
                    progress: None,
                });
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn poll_export(&mut self) {
        let Some(job) = &mut self.export_job else {
            return;
        };

        let mut finished = None;
        while let Some(event) = job.handle.try_recv() {
            match event {
                ExportEvent::Progress(progress) => {
                    job.progress = Some(progress);
                }
                ExportEvent::Finished(summary) => {
                    finished = Some(summary);
                    break;
                }
            }
        }

        let Some(summary) = finished else {
            return;
        };
        let Some(job) = self.export_job.take() else {
            return;
        };
        let message = format!(
            "Export finished: {} exported, {} failed",
            summary.exported.len(),
            summary.failures.len()
        );
        if summary.is_success() {
            self.info(message);
        } else {
            self.error(message);
        }
        self.export_result = Some((job.out_root, summary));
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Play => self.playback.play(),
            ToolbarAction::Pause => self.playback.pause(),
            ToolbarAction::OpenFolder => self.open_folder(),
            ToolbarAction::AddCategory => self.new_category = Some(String::new()),
            ToolbarAction::SaveProject => self.save_project(),
            ToolbarAction::LoadProject => self.load_project(),
            ToolbarAction::Export => self.start_export(),
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, pointer: Option<Pos2>) {
        let pos = pointer.unwrap_or_default();
        for effect in effects {
            match effect {
                Effect::Seek(t) => self.playback.seek(t),
                Effect::SeekAndPlay(t) => {
                    self.playback.seek(t);
                    self.playback.play();
                }
                Effect::ConfirmDeleteRegion { region_id } => {
                    self.delete_prompt = Some(DeletePrompt::new(region_id, pos));
                }
                Effect::OpenCategoryMenu(request) => {
                    self.category_menu = Some(CategoryMenu::new(request, pos));
                }
            }
        }
    }

    /// Ctrl+C / Ctrl+V copy and paste the current region. Text fields keep
    /// the shortcuts while they have focus.
    ///
    /// The windowing backend only reports Ctrl+V when the system clipboard
    /// holds text, so a copy also puts a description of the region there.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.popup_open() {
            return;
        }
        let (copy, paste) = ctx.input(|i| {
            let copy = i.events.iter().any(|e| matches!(e, egui::Event::Copy))
                || (i.modifiers.command && i.key_pressed(Key::C));
            let paste = i.events.iter().any(|e| matches!(e, egui::Event::Paste(_)))
                || (i.modifiers.command && i.key_pressed(Key::V));
            (copy, paste)
        });

        if copy && self.engine.copy(&self.project) {
            if let Some(region) = self.project.current_region() {
                let text = format!("{} {:.3}-{:.3}", region.category, region.start, region.end);
                ctx.output_mut(|o| o.copied_text = text);
            }
            self.info("Copied region".to_string());
        }
        if paste {
            let duration = self.playback.duration();
            if let Some(id) = self.engine.paste(&mut self.project, duration) {
                self.info(format!("Pasted region {}", id));
            }
        }
    }

    fn show_popups(&mut self, ctx: &egui::Context) {
        if let Some(menu) = self.category_menu.as_mut() {
            let categories = self.project.categories_by_recency();
            let resolution = popups::category_menu(ctx, menu, &categories);
            if let Some(resolution) = resolution {
                let request = menu.request();
                self.category_menu = None;
                self.resolve_category_menu(request, resolution);
            }
        }

        if let Some(prompt) = self.delete_prompt.as_mut() {
            if let Some(confirmed) = popups::confirm_delete(ctx, prompt) {
                let region_id = prompt.region_id;
                self.delete_prompt = None;
                if confirmed && self.engine.confirm_delete(&mut self.project, region_id).is_some() {
                    self.info(format!("Deleted region {}", region_id));
                }
            }
        }

        if let Some(name) = self.new_category.as_mut() {
            match dialogs::add_category(ctx, name) {
                DialogOutcome::Pending => {}
                DialogOutcome::Cancelled => self.new_category = None,
                DialogOutcome::Confirmed(name) => {
                    self.new_category = None;
                    if self.project.add_category(&name) {
                        self.info(format!("Added category '{}'", name));
                    } else {
                        self.error(format!("Category '{}' already exists", name));
                    }
                }
            }
        }
    }

    fn resolve_category_menu(
        &mut self,
        request: crate::timeline::CategoryMenuRequest,
        resolution: MenuResolution,
    ) {
        let deleted = match &resolution {
            MenuResolution::DeletedCategory(name) => Some(name.clone()),
            _ => None,
        };
        if let Some(id) = self
            .engine
            .resolve_category_menu(&mut self.project, request, resolution)
        {
            self.info(format!("Created region {}", id));
        } else if let Some(name) = deleted {
            self.info(format!("Deleted category '{}'", name));
        }
    }

    fn show_export_windows(&mut self, ctx: &egui::Context) {
        if let Some(job) = &self.export_job {
            let view = ExportProgressView {
                progress: job.progress.as_ref(),
                total: job.total,
                cancelling: job.handle.is_cancelling(),
            };
            if dialogs::export_progress(ctx, &view) {
                log::info!("Export cancel requested");
                job.handle.cancel();
            }
        }

        if let Some((out_root, summary)) = &self.export_result {
            if dialogs::export_results(ctx, out_root, summary) {
                self.export_result = None;
            }
        }
    }
}

impl eframe::App for ClipmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_duration_probe();
        self.poll_export();

        self.playback.tick();
        self.engine.follow_playhead(&self.project, &mut self.playback);

        self.handle_shortcuts(ctx);

        // Toolbar
        let state = ToolbarState {
            has_video: self.project.current_video.is_some(),
            is_playing: self.playback.is_playing(),
            exporting: self.export_job.is_some(),
        };
        let mut toolbar_action = None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar_action = toolbar::show(ui, state);
        });
        if let Some(action) = toolbar_action {
            self.handle_toolbar(action);
        }

        // Video list
        let mut selected = None;
        egui::SidePanel::left("video_list")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                if let VideoListAction::SelectVideo(video) = video_list::show(ui, &self.project) {
                    selected = Some(video);
                }
            });
        if let Some(video) = selected {
            self.select_video(Some(video));
        }

        // Status line and timeline
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            preview::status_bar(ui, &self.project, self.status.as_ref());
        });

        let interactive = !self.popup_open() && self.export_job.is_none();
        let position = self.playback.position();
        let duration = self.playback.duration();
        let mut output = None;
        egui::TopBottomPanel::bottom("timeline")
            .resizable(false)
            .show(ctx, |ui| {
                output = Some(timeline::show(
                    ui,
                    &mut self.project,
                    &mut self.engine,
                    &self.config.timeline,
                    position,
                    duration,
                    interactive,
                ));
            });
        if let Some(output) = output {
            self.apply_effects(output.effects, output.pointer);
        }

        // Preview
        let mut seek = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            seek = preview::show(ui, &self.project, &self.playback);
        });
        if let Some(position) = seek {
            self.playback.seek(position);
            self.engine.manual_seek(&mut self.project, position);
        }

        self.show_popups(ctx);
        self.show_export_windows(ctx);

        if self.playback.is_playing() || self.export_job.is_some() || self.duration_probe.is_some() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::Region;
    use std::path::Path;

    fn app_with_region() -> ClipmarkApp {
        let mut app = ClipmarkApp::new(AppConfig::default());
        let video = PathBuf::from("/in/clip.mp4");
        app.project.select_video(Some(video.clone()));
        app.playback.load(30.0);
        let id = app.project.next_id();
        app.project.push_region(&video, Region::new(id, "kick", 10.0, 2.0, 30.0));
        app.project.current_region = Some(id);
        app
    }

    fn run_shortcuts(ctx: &egui::Context, app: &mut ClipmarkApp, events: Vec<egui::Event>) -> egui::FullOutput {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        ctx.run(input, |ctx| app.handle_shortcuts(ctx))
    }

    #[test]
    fn test_copy_writes_system_clipboard_and_paste_creates_region() {
        let ctx = egui::Context::default();
        let mut app = app_with_region();

        let output = run_shortcuts(&ctx, &mut app, vec![egui::Event::Copy]);
        let text = output.platform_output.copied_text;
        assert_eq!(text, "kick 10.000-12.000");

        run_shortcuts(&ctx, &mut app, vec![egui::Event::Paste(text)]);
        assert_eq!(app.project.total_regions(), 2);
        let pasted = &app.project.regions(Path::new("/in/clip.mp4"))[1];
        assert_eq!((pasted.start, pasted.end), (11.0, 13.0));
        assert_eq!(pasted.category, "kick");
    }

    #[test]
    fn test_copy_without_current_region_leaves_clipboard_alone() {
        let ctx = egui::Context::default();
        let mut app = app_with_region();
        app.project.current_region = None;

        let output = run_shortcuts(&ctx, &mut app, vec![egui::Event::Copy]);
        assert!(output.platform_output.copied_text.is_empty());
        run_shortcuts(&ctx, &mut app, vec![egui::Event::Paste("x".into())]);
        assert_eq!(app.project.total_regions(), 1);
    }
}
