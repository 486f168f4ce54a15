// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export pipeline: cut every planned clip, report progress, honour cancel.
//!
//! [`ExportRun`] is the pipeline itself, a lazy iterator yielding one
//! [`ExportProgress`] per processed region. [`spawn_export`] drives a run on a
//! background thread and forwards its progress over a channel.

use super::plan::{ExportPlan, ExportTask};
use super::slicer::ClipSlicer;
use crate::error::{ExportFailure, SliceError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Handle for cancelling an in-progress export.
#[derive(Debug, Clone, Default)]
pub struct ExportCancel(Arc<AtomicBool>);

impl ExportCancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of one processed region.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Regions processed so far, successful or not, including this one.
    pub completed: usize,
    pub total: usize,
    pub result: Result<PathBuf, ExportFailure>,
}

impl ExportProgress {
    /// Completion fraction (0.0 to 1.0).
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f32 / self.total as f32
    }
}

/// What an export run did.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub total: usize,
    pub exported: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
    /// Stopped early by a cancel request.
    pub cancelled: bool,
}

impl ExportSummary {
    pub fn processed(&self) -> usize {
        self.exported.len() + self.failures.len()
    }

    /// Regions never attempted because the run was cancelled.
    pub fn skipped(&self) -> usize {
        self.total - self.processed()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// One pass over an export plan.
pub struct ExportRun<S> {
    tasks: std::vec::IntoIter<ExportTask>,
    slicer: S,
    cancel: ExportCancel,
    summary: ExportSummary,
}

impl<S: ClipSlicer> ExportRun<S> {
    pub fn new(plan: ExportPlan, slicer: S, cancel: ExportCancel) -> Self {
        let summary = ExportSummary {
            total: plan.total(),
            ..ExportSummary::default()
        };
        Self {
            tasks: plan.tasks.into_iter(),
            slicer,
            cancel,
            summary,
        }
    }

    /// Drain whatever is left and return the summary.
    pub fn finish(mut self) -> ExportSummary {
        for _ in self.by_ref() {}
        self.summary
    }

    fn export_one(&self, task: &ExportTask) -> Result<(), SliceError> {
        if let Some(dir) = task.output.parent() {
            std::fs::create_dir_all(dir).map_err(|source| SliceError::OutputDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        self.slicer
            .slice(&task.video, task.region.start, task.region.end, &task.output)
    }
}

impl<S: ClipSlicer> Iterator for ExportRun<S> {
    type Item = ExportProgress;

    fn next(&mut self) -> Option<ExportProgress> {
        if self.cancel.is_cancelled() {
            if !self.summary.cancelled && self.summary.skipped() > 0 {
                log::warn!(
                    "Export cancelled after {} of {} regions",
                    self.summary.processed(),
                    self.summary.total
                );
                self.summary.cancelled = true;
            }
            return None;
        }

        let task = self.tasks.next()?;
        let result = match self.export_one(&task) {
            Ok(()) => {
                log::info!("Exported {}", task.output.display());
                self.summary.exported.push(task.output.clone());
                Ok(task.output)
            }
            Err(err) => {
                let failure = ExportFailure {
                    video: task.video,
                    region_id: task.region.id,
                    cause: err.to_string(),
                };
                log::error!("Export failed: {}", failure);
                self.summary.failures.push(failure.clone());
                Err(failure)
            }
        };

        Some(ExportProgress {
            completed: self.summary.processed(),
            total: self.summary.total,
            result,
        })
    }
}

/// Message from the export worker.
#[derive(Debug, Clone)]
pub enum ExportEvent {
    Progress(ExportProgress),
    Finished(ExportSummary),
}

/// Running export on a background thread.
pub struct ExportHandle {
    receiver: Receiver<ExportEvent>,
    cancel: ExportCancel,
    thread: Option<JoinHandle<()>>,
}

impl ExportHandle {
    /// Ask the worker to stop before the next region.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Next event without blocking; `None` if nothing is pending.
    pub fn try_recv(&self) -> Option<ExportEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Next event, waiting for it; `None` once the worker is gone.
    pub fn recv(&self) -> Option<ExportEvent> {
        self.receiver.recv().ok()
    }
}

/// Cancels the worker. A worker still inside a clip is detached rather than
/// joined, so dropping never waits for ffmpeg; it stops after that clip.
impl Drop for ExportHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        let Some(thread) = self.thread.take() else {
            return;
        };
        if !thread.is_finished() {
            log::info!("Export worker detached, it stops after the current clip");
            return;
        }
        if thread.join().is_err() {
            log::error!("Export worker panicked");
        }
    }
}

/// Run `plan` on a worker thread.
pub fn spawn_export<S>(plan: ExportPlan, slicer: S) -> ExportHandle
where
    S: ClipSlicer + Send + 'static,
{
    let (sender, receiver) = channel();
    let cancel = ExportCancel::new();
    let worker_cancel = cancel.clone();

    log::info!(
        "Exporting {} clips to {}",
        plan.total(),
        plan.out_root.display()
    );

    let thread = std::thread::spawn(move || {
        let mut run = ExportRun::new(plan, slicer, worker_cancel);
        for progress in run.by_ref() {
            if sender.send(ExportEvent::Progress(progress)).is_err() {
                return;
            }
        }
        let summary = run.finish();
        log::info!(
            "Export finished: {} exported, {} failed, {} skipped",
            summary.exported.len(),
            summary.failures.len(),
            summary.skipped()
        );
        let _ = sender.send(ExportEvent::Finished(summary));
    });

    ExportHandle {
        receiver,
        cancel,
        thread: Some(thread),
    }
}
