//! Core types for scroll-nav.
//!
//! These types flow from the viewport collaborator through the resolver into
//! the chrome state the rendering layer reads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

// =============================================================================
// Section Identity
// =============================================================================

/// Stable identifier of a section of the page (e.g. `"about"`).
///
/// Doubles as the id of the section's anchor element in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Scroll Metrics
// =============================================================================

/// Viewport position sampled on a scroll or resize event.
///
/// `scroll_y` is finite and non-negative, `viewport_height` finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    scroll_y: f64,
    viewport_height: f64,
}

impl ScrollMetrics {
    /// Validate and build a metrics sample.
    pub fn new(scroll_y: f64, viewport_height: f64) -> Result<Self> {
        if !scroll_y.is_finite() || scroll_y < 0.0 {
            return Err(NavError::InvalidMetrics(format!(
                "scroll_y must be finite and non-negative, got {scroll_y}"
            )));
        }
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(NavError::InvalidMetrics(format!(
                "viewport_height must be finite and positive, got {viewport_height}"
            )));
        }
        Ok(Self {
            scroll_y,
            viewport_height,
        })
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Vertical midpoint of the viewport in document coordinates.
    pub fn probe(&self) -> f64 {
        self.scroll_y + self.viewport_height / 2.0
    }
}

// =============================================================================
// Anchors & Scroll Targets
// =============================================================================

/// Document offset of a section's anchor element.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor {
    pub id: SectionId,
    pub top_offset: f64,
}

/// Destination of a smooth scroll request.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    /// Absolute document offset.
    Position(f64),
    /// Align the element with this id to the top of the viewport.
    Element(SectionId),
}

impl ScrollTarget {
    /// Document origin.
    pub const TOP: Self = Self::Position(0.0);
}

// =============================================================================
// Navigation Chrome State
// =============================================================================

/// Everything the header, nav links, mobile overlay and scroll-to-top button
/// render from.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationChromeState {
    /// Header switches to its "scrolled" look.
    pub is_scrolled: bool,
    /// Scroll-to-top button is visible.
    pub show_scroll_to_top: bool,
    /// Section currently in view.
    pub active_section: SectionId,
    /// Mobile overlay menu is open.
    pub is_mobile_menu_open: bool,
}

impl NavigationChromeState {
    /// Initial state at mount, with `initial_section` active.
    pub fn new(initial_section: SectionId) -> Self {
        Self {
            is_scrolled: false,
            show_scroll_to_top: false,
            active_section: initial_section,
            is_mobile_menu_open: false,
        }
    }

    pub fn is_active(&self, id: &SectionId) -> bool {
        self.active_section == *id
    }
}

// =============================================================================
// Nav Links
// =============================================================================

/// One entry of the desktop or mobile nav link list.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub id: SectionId,
    pub label: String,
    pub is_active: bool,
}
