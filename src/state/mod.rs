//! State Module - navigation chrome state and the systems that drive it
//!
//! - **Scroll** - viewport scroll/resize observation, metrics sampling
//! - **Resolver** - active section from the viewport midpoint
//! - **Chrome** - the published `{is_scrolled, show_scroll_to_top,
//!   active_section, is_mobile_menu_open}` state and its transitions
//! - **Commands** - user intents to transitions plus side-effect requests

mod chrome;
mod commands;
mod resolver;
mod scroll;

pub use chrome::*;
pub use commands::*;
pub use resolver::*;
pub use scroll::*;
