// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits for the two external collaborators: the reasoning oracle and
//! the downstream specialist handlers.

pub mod handler;
pub mod oracle;

pub use handler::HandlerAdapter;
pub use oracle::RoutingOracle;
