// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Flywheel Core
//!
//! The feedback-weighted content generation loop: engagement metrics are
//! scored, critiqued by an analyst model, persisted with an embedding into
//! the content library, and retrieved later to condition the next
//! generation request.
//!
//! # Architecture
//!
//! - **Layer:** Content Learning Loop
//! - **Purpose:** score -> critique -> persist -> retrieve -> generate

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
