//! Layout Module - headless page layout using Taffy.
//!
//! Hosts without a DOM (tests, server-side previews) describe the page as a
//! list of section blocks; Taffy stacks them in a flex column and the
//! resulting offsets serve as section anchors.
//!
//! # Example
//!
//! ```ignore
//! use scroll_nav::layout::{PageSection, PageViewport, SectionHeight};
//!
//! let page = PageViewport::new(
//!     vec![
//!         PageSection::new("home", SectionHeight::Viewport(1.0)),
//!         PageSection::new("about", SectionHeight::Length(900.0)),
//!     ],
//!     80.0,
//!     1280.0,
//!     800.0,
//! )?;
//! ```

mod page;

pub use page::*;
