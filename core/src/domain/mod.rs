// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Domain layer for the content learning loop

pub mod content;
pub mod critique;
pub mod llm;
pub mod scoring;
pub mod strategy;

pub use content::*;
pub use critique::*;
pub use llm::*;
pub use scoring::*;
pub use strategy::*;
