// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Clipmark application.

pub mod dialogs;
pub mod popups;
pub mod preview;
pub mod timeline;
pub mod toolbar;
pub mod video_list;
