// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deck and slide data model.

pub mod deck;
pub mod slide;
