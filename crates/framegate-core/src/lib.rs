// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Framegate classification-gated dispatcher.
//!
//! This crate provides the shared data model (frames, routing decisions,
//! dispatch results), the error taxonomy, and the seam traits implemented by
//! the oracle client and the handler adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FramegateError;
pub use types::{
    DispatchResult, DispatchStatus, Frame, HandlerResponse, OraclePrompt, RoutingDecision,
    RoutingLabel, VisualSource,
};

pub use traits::{HandlerAdapter, RoutingOracle};
