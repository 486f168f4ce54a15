// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Batch export of regions as individual clips, grouped by category.

pub mod pipeline;
pub mod plan;
pub mod slicer;

pub use pipeline::{spawn_export, ExportEvent, ExportHandle, ExportProgress, ExportSummary};
pub use plan::ExportPlan;
pub use slicer::FfmpegSlicer;
