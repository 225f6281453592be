// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait for the external reasoning oracle.

use async_trait::async_trait;

use crate::error::FramegateError;
use crate::types::OraclePrompt;

/// The reasoning oracle seam.
///
/// Implementations send a composed prompt (text plus optional image) to a
/// prompt-completion service and return its raw free-text reply. The oracle
/// never decides the routing outcome itself: transport failures, timeouts,
/// and non-2xx statuses surface as typed errors, and the dispatcher converts
/// them into a malformed decision so the confidence gate applies uniformly.
#[async_trait]
pub trait RoutingOracle: Send + Sync {
    /// Sends the prompt and returns the oracle's raw text reply.
    async fn classify(&self, prompt: &OraclePrompt) -> Result<String, FramegateError>;
}
