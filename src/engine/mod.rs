//! Engine - the section registry.
//!
//! Sections are identified by id and ordered by their position in the
//! document:
//!
//! ```text
//! 0: home     "Home"
//! 1: about    "About"
//! 2: projects "Projects"
//! 3: contact  "Contact"
//! ```

mod registry;

pub use registry::*;
