// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation playback: the registry, slide composition, the advance
//! timer and the player state machine.

pub mod player;
pub mod registry;
pub mod render;
pub mod timer;
