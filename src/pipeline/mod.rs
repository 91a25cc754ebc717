//! Controller Pipeline
//!
//! Connects the host's viewport and router to the chrome state.
//!
//! ```text
//! viewport scroll/resize → ScrollObserver → ScrollMetrics → resolver → ChromeStore → renderers
//! clicks → Command → dispatch → ChromeStore + Effects → viewport / router
//! ```
//!
//! - **Pure transitions**: dispatch and the scroll transition only compute
//! - **Side effects last**: the controller publishes state, then performs effects
//! - **Scoped subscription**: the viewport listener lives exactly as long as the
//!   mounted controller

pub mod mount;

pub use mount::{NavEvent, NavigationController, mount};
