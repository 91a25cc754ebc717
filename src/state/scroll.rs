//! Scroll Observer
//!
//! Subscribes to the viewport's scroll and resize events and turns each one
//! into a fresh [`ScrollMetrics`] sample. Nothing is buffered: every event
//! reads the viewport at that moment, so the last event always carries the
//! latest position.
//!
//! The subscription lives exactly as long as the [`ScrollObserver`]; dropping
//! or detaching it unsubscribes.

use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::ScrollMetrics;
use crate::viewport::{SubscriptionId, Viewport, ViewportEvent, ViewportEvents};

/// Read the viewport's current scroll position and height.
pub fn read_metrics(viewport: &dyn Viewport) -> Result<ScrollMetrics> {
    ScrollMetrics::new(viewport.scroll_y(), viewport.viewport_height())
}

/// Sample the viewport for `event`. Rejected samples are logged and dropped.
pub fn sample_metrics(viewport: &dyn Viewport, event: ViewportEvent) -> Option<ScrollMetrics> {
    match read_metrics(viewport) {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(?event, "dropping viewport sample: {}", e);
            None
        }
    }
}

/// Active subscription to viewport scroll/resize events.
pub struct ScrollObserver {
    viewport: Weak<dyn Viewport>,
    subscription: Option<SubscriptionId>,
}

impl ScrollObserver {
    /// Subscribe `sink` to scroll and resize events of `viewport`.
    ///
    /// Samples the viewport rejects are logged and dropped; `sink` only sees
    /// valid metrics.
    pub fn attach(
        viewport: &Rc<dyn Viewport>,
        sink: impl Fn(ViewportEvent, ScrollMetrics) + 'static,
    ) -> Self {
        let weak = Rc::downgrade(viewport);
        let source = weak.clone();

        let subscription = viewport.subscribe(
            ViewportEvents::SCROLL | ViewportEvents::RESIZE,
            Rc::new(move |event: ViewportEvent| {
                let Some(viewport) = source.upgrade() else {
                    return;
                };
                if let Some(metrics) = sample_metrics(viewport.as_ref(), event) {
                    sink(event, metrics);
                }
            }),
        );
        debug!(?subscription, "scroll observer attached");

        Self {
            viewport: weak,
            subscription: Some(subscription),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Remove the listener. Safe to call more than once.
    pub fn detach(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        if let Some(viewport) = self.viewport.upgrade() {
            viewport.unsubscribe(subscription);
        }
        debug!(?subscription, "scroll observer detached");
    }
}

impl Drop for ScrollObserver {
    fn drop(&mut self) {
        self.detach();
    }
}

// =============================================================================
// TESTS
// =============================================================================
