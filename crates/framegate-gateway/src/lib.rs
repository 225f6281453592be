// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway exposing the Framegate dispatch pipeline.
//!
//! The ingress adapter: translates HTTP requests (JSON or multipart) into
//! frames, runs them through the dispatcher, and serializes the outcome back
//! to the producer. Also exposes forced-route endpoints that bypass
//! classification entirely.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
