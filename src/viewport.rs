//! Host collaborators - viewport and router capabilities.
//!
//! The controller never touches a document directly. Hosts implement
//! [`Viewport`] over their rendering surface (a browser window, a webview, the
//! headless [`PageViewport`](crate::layout::PageViewport)) and [`Router`] over
//! their routing layer.

use std::rc::Rc;

use bitflags::bitflags;

use crate::types::{ScrollTarget, SectionId};

// =============================================================================
// Viewport Events
// =============================================================================

bitflags! {
    /// Set of viewport events a listener is interested in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewportEvents: u8 {
        const SCROLL = 1 << 0;
        const RESIZE = 1 << 1;
    }
}

/// A single viewport notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

impl ViewportEvent {
    /// Mask bit matching this event.
    pub fn flag(self) -> ViewportEvents {
        match self {
            ViewportEvent::Scroll => ViewportEvents::SCROLL,
            ViewportEvent::Resize => ViewportEvents::RESIZE,
        }
    }
}

/// Listener invoked synchronously on the host's event loop.
pub type ViewportListener = Rc<dyn Fn(ViewportEvent)>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

// =============================================================================
// Capabilities
// =============================================================================

/// Anchor lookup: where does a section start in document coordinates?
///
/// Returns `None` when the section's element is not currently rendered.
pub trait AnchorSource {
    fn element_top_offset(&self, id: &SectionId) -> Option<f64>;
}

/// The scrollable document and its window.
///
/// Methods take `&self`; implementations use interior mutability the way a
/// DOM handle does. Listeners may be invoked re-entrantly from
/// `smooth_scroll_to`.
pub trait Viewport: AnchorSource {
    /// Whether there is a rendered surface to observe at all.
    fn is_renderable(&self) -> bool {
        true
    }

    fn scroll_y(&self) -> f64;

    fn viewport_height(&self) -> f64;

    /// Start a smooth scroll. Fire-and-forget; a later request supersedes it.
    fn smooth_scroll_to(&self, target: ScrollTarget);

    fn subscribe(&self, events: ViewportEvents, listener: ViewportListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Application routing.
pub trait Router {
    fn current_route(&self) -> String;

    fn navigate(&self, path: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_flags() {
        let both = ViewportEvents::SCROLL | ViewportEvents::RESIZE;
        assert!(both.contains(ViewportEvent::Scroll.flag()));
        assert!(both.contains(ViewportEvent::Resize.flag()));
        assert!(!ViewportEvents::SCROLL.contains(ViewportEvent::Resize.flag()));
    }
}
