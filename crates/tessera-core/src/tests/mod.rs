//! Test module for determinism and gameplay scenario tests.
//!
//! These exercise the grid end to end:
//! - **Determinism tests**: same level, seed and input produce identical runs
//! - **Scenario tests**: small puzzles covering each terrain and actor rule
//! - **Helper functions**: utilities for building levels and driving frames
//!
//! # Test Structure
//!
//! - `determinism.rs`: Seed, recording and replay checks
//! - `scenarios.rs`: Gameplay rules through the public grid API
//! - `helpers.rs`: Level setup utilities and factory functions

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
