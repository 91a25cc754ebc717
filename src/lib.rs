//! # scroll-nav
//!
//! Scroll-linked navigation controller for single-page sites.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the chrome state is one signal, renderers are
//! effects over it.
//!
//! ## Architecture
//!
//! The controller observes the viewport and derives, on every scroll/resize:
//! - whether the header shows its "scrolled" look
//! - whether the scroll-to-top button is visible
//! - which section is active (the one under the viewport midpoint)
//!
//! and owns the open/closed state of the mobile overlay menu. User intents
//! (nav link, logo, scroll-to-top, menu button) are dispatched as pure
//! transitions plus side-effect requests for the host's viewport and router.
//!
//! ## Modules
//!
//! - [`types`] - Core types (SectionId, ScrollMetrics, NavigationChromeState)
//! - [`engine`] - Section registry
//! - [`state`] - Scroll observer, resolver, chrome store, command dispatch
//! - [`pipeline`] - Mount/unmount and event handling
//! - [`layout`] - Headless Taffy-backed page viewport for tests and previews
//! - [`viewport`] - Host collaborator traits

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::*;

pub use config::{NavConfig, REVEAL_THRESHOLD, ROOT_ROUTE, SCROLL_THRESHOLD};

pub use engine::{SectionEntry, SectionRegistry, DEFAULT_SECTIONS};

pub use error::{NavError, Result};

pub use pipeline::{mount, NavEvent, NavigationController};

pub use state::{
    // Chrome
    ChromeStore,
    // Commands
    Command, CommandContext, Effect, Transition, dispatch,
    // Scroll
    ScrollObserver, read_metrics, sample_metrics,
    // Resolver
    collect_anchors, resolve_active_section,
};

pub use viewport::{
    AnchorSource, Router, SubscriptionId, Viewport, ViewportEvent, ViewportEvents,
    ViewportListener,
};
