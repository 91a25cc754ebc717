//! Command Dispatcher - user intents to state changes and side-effect requests.
//!
//! Dispatch is pure: it maps `(state, command)` to the next state plus a list
//! of [`Effect`]s. The controller publishes the state and then performs the
//! effects against the host's viewport and router.
//!
//! # Commands
//!
//! - `NavigateToSection(id)` - smooth scroll to the section, always closes the
//!   mobile menu
//! - `ScrollToTop` - smooth scroll to the document origin
//! - `ToggleMenu` - open/close the mobile menu
//! - `NavigateHome` - logo click: scroll to top on the root route, otherwise
//!   route to it

use tracing::{debug, warn};

use crate::config::NavConfig;
use crate::engine::SectionRegistry;
use crate::error::{NavError, Result};
use crate::types::{NavigationChromeState, ScrollTarget, SectionId};
use crate::viewport::{AnchorSource, Router};

// =============================================================================
// TYPES
// =============================================================================

/// A user intent from the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NavigateToSection(SectionId),
    ScrollToTop,
    ToggleMenu,
    NavigateHome,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the viewport to smooth scroll.
    SmoothScroll(ScrollTarget),
    /// Ask the router for a full route change.
    Navigate(String),
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: NavigationChromeState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &NavigationChromeState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Read-only collaborators a dispatch may consult.
pub struct CommandContext<'a> {
    pub config: &'a NavConfig,
    pub registry: &'a SectionRegistry,
    pub anchors: &'a dyn AnchorSource,
    pub router: &'a dyn Router,
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Compute the transition for `command`.
///
/// Fails only for a section that is not registered; the state is untouched
/// in that case.
pub fn dispatch(
    state: &NavigationChromeState,
    command: &Command,
    ctx: &CommandContext<'_>,
) -> Result<Transition> {
    debug!(?command, "dispatching");

    match command {
        Command::NavigateToSection(id) => navigate_to_section(state, id, ctx),
        Command::ScrollToTop => Ok(scroll_to_top(state)),
        Command::ToggleMenu => Ok(Transition {
            state: state.with_menu_toggled(),
            effects: Vec::new(),
        }),
        Command::NavigateHome => Ok(navigate_home(state, ctx)),
    }
}

fn navigate_to_section(
    state: &NavigationChromeState,
    id: &SectionId,
    ctx: &CommandContext<'_>,
) -> Result<Transition> {
    if !ctx.registry.contains(id) {
        warn!(section = %id, "navigation to unregistered section rejected");
        return Err(NavError::UnknownSection(id.clone()));
    }

    // Not rendered yet: nothing to scroll to, but the menu still closes
    let effects = match ctx.anchors.element_top_offset(id) {
        Some(_) => vec![Effect::SmoothScroll(ScrollTarget::Element(id.clone()))],
        None => {
            debug!(section = %id, "anchor not rendered, skipping scroll");
            Vec::new()
        }
    };

    Ok(Transition {
        state: state.with_menu_closed(),
        effects,
    })
}

fn scroll_to_top(state: &NavigationChromeState) -> Transition {
    Transition {
        state: state.clone(),
        effects: vec![Effect::SmoothScroll(ScrollTarget::TOP)],
    }
}

fn navigate_home(state: &NavigationChromeState, ctx: &CommandContext<'_>) -> Transition {
    let route = ctx.router.current_route();
    if ctx.config.is_root_route(&route) {
        return scroll_to_top(state);
    }

    let mut transition = Transition::unchanged(state);
    transition
        .effects
        .push(Effect::Navigate(ctx.config.root_route.clone()));
    transition
}

// =============================================================================
// TESTS
// =============================================================================
