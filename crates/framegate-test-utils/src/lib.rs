// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Framegate integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockOracle`] - Mock routing oracle with pre-configured replies
//! - [`MockHandler`] - Mock handler adapter with scripted results and
//!   invocation capture

pub mod mock_handler;
pub mod mock_oracle;

pub use mock_handler::MockHandler;
pub use mock_oracle::MockOracle;
