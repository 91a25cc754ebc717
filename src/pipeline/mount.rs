//! Mount API - controller lifecycle and event handling.
//!
//! Mounting wires the scroll observer to the viewport and creates the chrome
//! state. Every later change arrives as a [`NavEvent`] on the host's event
//! loop: viewport notifications through the observer, user intents through
//! the action methods (or [`NavigationController::handle`]).
//!
//! # Example
//!
//! ```ignore
//! use scroll_nav::{mount, NavConfig};
//!
//! let controller = mount(viewport, router, NavConfig::default())?;
//!
//! // Rendering layer
//! let stop = controller.watch(|state| render_header(state));
//!
//! // Click handlers
//! controller.navigate_to_section("projects")?;
//! controller.toggle_menu();
//!
//! // Clean up
//! stop();
//! controller.unmount();
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use spark_signals::{Derived, derived};
use tracing::{debug, error, trace};

use crate::config::NavConfig;
use crate::engine::SectionRegistry;
use crate::error::{NavError, Result};
use crate::state::{
    ChromeStore, Command, CommandContext, Effect, ScrollObserver, collect_anchors, dispatch,
    read_metrics, sample_metrics,
};
use crate::types::{NavLink, NavigationChromeState, ScrollMetrics, SectionAnchor, SectionId};
use crate::viewport::{AnchorSource, Router, Viewport, ViewportEvent};

// =============================================================================
// Events
// =============================================================================

/// One message for the controller's event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Viewport(ViewportEvent),
    Command(Command),
}

// =============================================================================
// Core
// =============================================================================

/// Anchor lookups served by the viewport.
struct ViewportAnchors<'a>(&'a dyn Viewport);

impl AnchorSource for ViewportAnchors<'_> {
    fn element_top_offset(&self, id: &SectionId) -> Option<f64> {
        self.0.element_top_offset(id)
    }
}

/// State shared between the controller and its viewport listener.
struct NavCore {
    viewport: Rc<dyn Viewport>,
    router: Rc<dyn Router>,
    config: NavConfig,
    registry: SectionRegistry,
    store: ChromeStore,
}

impl NavCore {
    /// Sample the viewport and apply the result.
    fn sample(&self, event: ViewportEvent) {
        if let Some(metrics) = sample_metrics(self.viewport.as_ref(), event) {
            self.tick(event, metrics);
        }
    }

    /// Apply one scroll/resize sample. Never unwinds into the host.
    fn tick(&self, event: ViewportEvent, metrics: ScrollMetrics) {
        trace!(
            ?event,
            scroll_y = metrics.scroll_y(),
            viewport_height = metrics.viewport_height(),
            "scroll tick"
        );

        let anchors = ViewportAnchors(self.viewport.as_ref());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.store
                .apply_scroll_signal(&metrics, &self.config, &self.registry, &anchors);
        }));
        if result.is_err() {
            error!(?event, "scroll tick panicked, sample dropped");
        }
    }

    fn execute(&self, command: &Command) -> Result<()> {
        let anchors = ViewportAnchors(self.viewport.as_ref());
        let ctx = CommandContext {
            config: &self.config,
            registry: &self.registry,
            anchors: &anchors,
            router: self.router.as_ref(),
        };
        let transition = dispatch(&self.store.snapshot(), command, &ctx)?;

        // Publish before performing effects: a viewport that scrolls
        // synchronously re-enters through the observer
        self.store.replace(transition.state);
        for effect in transition.effects {
            match effect {
                Effect::SmoothScroll(target) => self.viewport.smooth_scroll_to(target),
                Effect::Navigate(path) => self.router.navigate(&path),
            }
        }
        Ok(())
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Mounted navigation controller.
///
/// Owns the only writer of the chrome state. Unmounting (or dropping) removes
/// the viewport listener.
pub struct NavigationController {
    core: Rc<NavCore>,
    observer: Option<ScrollObserver>,
}

/// Mount the controller on `viewport`.
///
/// Fails with [`NavError::ViewportUnavailable`] when there is no renderable
/// surface, and with a config error when `config` does not validate.
pub fn mount(
    viewport: Rc<dyn Viewport>,
    router: Rc<dyn Router>,
    config: NavConfig,
) -> Result<NavigationController> {
    config.validate()?;
    let registry = config.registry()?;

    if !viewport.is_renderable() {
        return Err(NavError::ViewportUnavailable(
            "no renderable surface".to_string(),
        ));
    }
    read_metrics(viewport.as_ref()).map_err(|e| NavError::ViewportUnavailable(e.to_string()))?;

    let initial = NavigationChromeState::new(registry.first().clone());
    let core = Rc::new(NavCore {
        viewport: viewport.clone(),
        router,
        config,
        registry,
        store: ChromeStore::new(initial),
    });

    let weak: Weak<NavCore> = Rc::downgrade(&core);
    let observer = ScrollObserver::attach(&viewport, move |event, metrics| {
        if let Some(core) = weak.upgrade() {
            core.tick(event, metrics);
        }
    });

    debug!(sections = core.registry.len(), "navigation controller mounted");

    Ok(NavigationController {
        core,
        observer: Some(observer),
    })
}

impl NavigationController {
    // -------------------------------------------------------------------------
    // Reading
    // -------------------------------------------------------------------------

    /// Current chrome state.
    pub fn state(&self) -> NavigationChromeState {
        self.core.store.snapshot()
    }

    /// Run `f` now and after every state change. Returns the stop function.
    pub fn watch(&self, f: impl Fn(&NavigationChromeState) + 'static) -> Box<dyn FnOnce()> {
        self.core.store.watch(f)
    }

    /// Nav link list with the active flag, recomputed when the state changes.
    pub fn nav_links(&self) -> Derived<Vec<NavLink>> {
        let state = self.core.store.signal();
        let entries = self.core.registry.entries().to_vec();
        derived(move || {
            let active = state.get().active_section;
            entries
                .iter()
                .map(|entry| NavLink {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                    is_active: entry.id == active,
                })
                .collect()
        })
    }

    /// Anchors of the sections currently rendered, in registry order.
    pub fn section_anchors(&self) -> Vec<SectionAnchor> {
        collect_anchors(&self.core.registry, &ViewportAnchors(self.core.viewport.as_ref()))
    }

    pub fn config(&self) -> &NavConfig {
        &self.core.config
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.core.registry
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.as_ref().is_some_and(ScrollObserver::is_attached)
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Handle one event. Viewport events never fail; commands fail only for
    /// unregistered sections.
    pub fn handle(&self, event: NavEvent) -> Result<()> {
        match event {
            NavEvent::Viewport(event) => {
                self.core.sample(event);
                Ok(())
            }
            NavEvent::Command(command) => self.core.execute(&command),
        }
    }

    pub fn navigate_to_section(&self, id: impl Into<SectionId>) -> Result<()> {
        self.core.execute(&Command::NavigateToSection(id.into()))
    }

    pub fn scroll_to_top(&self) {
        self.execute_infallible(Command::ScrollToTop);
    }

    pub fn toggle_menu(&self) {
        self.execute_infallible(Command::ToggleMenu);
    }

    /// Logo click.
    pub fn navigate_home(&self) {
        self.execute_infallible(Command::NavigateHome);
    }

    fn execute_infallible(&self, command: Command) {
        if let Err(e) = self.core.execute(&command) {
            error!(?command, "command failed: {}", e);
        }
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Stop observing the viewport and drop the state.
    pub fn unmount(mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.detach();
        }
        debug!("navigation controller unmounted");
    }
}

// =============================================================================
// TESTS
// =============================================================================
