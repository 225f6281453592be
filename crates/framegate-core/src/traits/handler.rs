// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait for downstream specialist handler adapters.

use async_trait::async_trait;

use crate::error::FramegateError;
use crate::types::{Frame, HandlerResponse, RoutingLabel};

/// Adapter for one downstream specialist service.
///
/// Each adapter knows how to shape a service-specific request from a frame
/// (including which inputs are required) and how to normalize that service's
/// response into a flat field-to-value mapping, so the dispatcher never
/// learns service-specific wire shapes.
///
/// Adapters are constructed once at startup from configuration and shared
/// read-only across all dispatches.
#[async_trait]
pub trait HandlerAdapter: Send + Sync {
    /// The routing label this adapter serves.
    fn label(&self) -> RoutingLabel;

    /// Shapes a request from the frame, invokes the downstream service, and
    /// returns the normalized response.
    async fn invoke(&self, frame: &Frame) -> Result<HandlerResponse, FramegateError>;
}
