// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry mapping routing labels to handler adapters.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use framegate_core::{HandlerAdapter, RoutingLabel};

/// Immutable-after-startup mapping from routing label to adapter.
///
/// Adding a destination means registering another adapter here; the
/// dispatcher's control flow never changes.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: HashMap<RoutingLabel, Arc<dyn HandlerAdapter>>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("labels", &self.labels())
            .finish()
    }
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own label.
    ///
    /// Registering under [`RoutingLabel::None`] is a configuration mistake;
    /// the entry would be unreachable because lookup refuses `none`.
    pub fn register(&mut self, adapter: Arc<dyn HandlerAdapter>) {
        let label = adapter.label();
        if label == RoutingLabel::None {
            tracing::warn!("ignoring handler registered under label `none`");
            return;
        }
        self.entries.insert(label, adapter);
    }

    /// Look up the adapter for a label.
    ///
    /// `none` always misses by design: there is nothing to dispatch to.
    pub fn lookup(&self, label: RoutingLabel) -> Option<Arc<dyn HandlerAdapter>> {
        if label == RoutingLabel::None {
            return None;
        }
        self.entries.get(&label).cloned()
    }

    /// The labels with a registered handler, sorted.
    pub fn labels(&self) -> BTreeSet<RoutingLabel> {
        self.entries.keys().copied().collect()
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use framegate_core::{Frame, FramegateError, HandlerResponse};

    use super::*;

    struct StubHandler {
        label: RoutingLabel,
    }

    #[async_trait]
    impl HandlerAdapter for StubHandler {
        fn label(&self) -> RoutingLabel {
            self.label
        }

        async fn invoke(&self, _frame: &Frame) -> Result<HandlerResponse, FramegateError> {
            Ok(HandlerResponse::new())
        }
    }

    #[test]
    fn register_and_lookup_roundtrip() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler {
            label: RoutingLabel::FaceRecognition,
        }));

        assert!(registry.lookup(RoutingLabel::FaceRecognition).is_some());
        assert!(registry.lookup(RoutingLabel::SignLanguage).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn none_label_never_resolves() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler {
            label: RoutingLabel::None,
        }));

        assert!(registry.lookup(RoutingLabel::None).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn labels_reflect_registered_set() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler {
            label: RoutingLabel::SignLanguage,
        }));
        registry.register(Arc::new(StubHandler {
            label: RoutingLabel::FaceRecognition,
        }));

        let labels = registry.labels();
        assert!(labels.contains(&RoutingLabel::FaceRecognition));
        assert!(labels.contains(&RoutingLabel::SignLanguage));
        assert!(!labels.contains(&RoutingLabel::None));
    }
}
