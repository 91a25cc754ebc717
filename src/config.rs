//! Controller configuration.
//!
//! Defaults match the single-page layout: header turns "scrolled" past 50
//! units, the scroll-to-top button appears past 300, four sections, root route
//! `/`. Hosts may override any field from TOML:
//!
//! ```toml
//! scroll_threshold = 64.0
//! root_route = "/"
//!
//! [[sections]]
//! id = "home"
//! label = "Home"
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::{SectionEntry, SectionRegistry};
use crate::error::{NavError, Result};

/// Scroll offset past which the header switches to its scrolled look.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// Scroll offset past which the scroll-to-top button is shown.
pub const REVEAL_THRESHOLD: f64 = 300.0;

/// Route the logo click returns to.
pub const ROOT_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub scroll_threshold: f64,
    pub reveal_threshold: f64,
    pub root_route: String,
    pub sections: Vec<SectionEntry>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: SCROLL_THRESHOLD,
            reveal_threshold: REVEAL_THRESHOLD,
            root_route: ROOT_ROUTE.to_string(),
            sections: SectionRegistry::default().entries().to_vec(),
        }
    }
}

impl NavConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("scroll_threshold", self.scroll_threshold),
            ("reveal_threshold", self.reveal_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.root_route.starts_with('/') {
            return Err(NavError::InvalidConfig(format!(
                "root_route must start with '/', got {:?}",
                self.root_route
            )));
        }
        SectionRegistry::new(self.sections.clone()).map(|_| ())
    }

    /// Validated registry built from `sections`.
    pub fn registry(&self) -> Result<SectionRegistry> {
        SectionRegistry::new(self.sections.clone())
    }

    /// Whether `route` is the root route.
    ///
    /// Hash routers may report the root as `""` or `"#"`, and prefix every
    /// path with `#`; those forms count too.
    pub fn is_root_route(&self, route: &str) -> bool {
        let path = route.strip_prefix('#').unwrap_or(route);
        path.is_empty() || path == self.root_route
    }
}
