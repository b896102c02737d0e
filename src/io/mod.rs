// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media, audio and deck files.

pub mod audio;
pub mod media;
pub mod serialization;
