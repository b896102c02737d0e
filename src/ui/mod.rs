// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the deck builder and the presenter.

pub mod canvas;
pub mod images;
pub mod properties;
pub mod timeline;
pub mod toolbar;
