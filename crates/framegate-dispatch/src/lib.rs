// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The classification-gated dispatch pipeline.
//!
//! Composes the oracle client, decision codec, and handler registry into a
//! single `dispatch` operation: classify a frame, gate the decision on
//! confidence, and invoke the matching handler. The pipeline is total; every
//! frame produces a [`framegate_core::DispatchResult`], never an error.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
