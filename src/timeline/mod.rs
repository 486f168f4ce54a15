// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline interaction: pointer events to region edits.

pub mod engine;

pub use engine::{
    CategoryMenuRequest, Effect, MenuResolution, PointerButton, PointerEvent, TimelineEngine,
};
