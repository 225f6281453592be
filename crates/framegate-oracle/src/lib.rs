// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reasoning oracle client for the Framegate dispatcher.
//!
//! Implements [`framegate_core::RoutingOracle`] against a Gemini-style
//! `generateContent` HTTP API, isolating all oracle-specific request and
//! response framing behind the trait so the oracle can be swapped.

pub mod client;
pub mod types;

pub use client::GeminiOracle;
