//! Navigation Chrome State
//!
//! The header / nav link / overlay / scroll-to-top state. Transitions are pure
//! functions from one [`NavigationChromeState`] to the next; [`ChromeStore`]
//! publishes each result through a single signal write so readers only ever
//! observe complete states.

use std::panic::{self, AssertUnwindSafe};

use spark_signals::{Signal, effect, signal};
use tracing::error;

use crate::config::NavConfig;
use crate::engine::SectionRegistry;
use crate::types::{NavigationChromeState, ScrollMetrics};
use crate::viewport::AnchorSource;

use super::resolver::resolve_active_section;

// =============================================================================
// TRANSITIONS
// =============================================================================

impl NavigationChromeState {
    /// Derive the scroll flags and active section from a metrics sample.
    pub fn with_scroll_signal(
        &self,
        metrics: &ScrollMetrics,
        config: &NavConfig,
        registry: &SectionRegistry,
        anchors: &dyn AnchorSource,
    ) -> Self {
        Self {
            is_scrolled: metrics.scroll_y() > config.scroll_threshold,
            show_scroll_to_top: metrics.scroll_y() > config.reveal_threshold,
            active_section: resolve_active_section(metrics, registry, anchors, &self.active_section),
            is_mobile_menu_open: self.is_mobile_menu_open,
        }
    }

    /// Flip the mobile menu; nothing else changes.
    pub fn with_menu_toggled(&self) -> Self {
        Self {
            is_mobile_menu_open: !self.is_mobile_menu_open,
            ..self.clone()
        }
    }

    /// Close the mobile menu; nothing else changes.
    pub fn with_menu_closed(&self) -> Self {
        Self {
            is_mobile_menu_open: false,
            ..self.clone()
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Single-writer holder of the published chrome state.
pub struct ChromeStore {
    state: Signal<NavigationChromeState>,
}

impl ChromeStore {
    pub fn new(initial: NavigationChromeState) -> Self {
        Self {
            state: signal(initial),
        }
    }

    /// Current state (tracked when read inside an effect or derived).
    pub fn snapshot(&self) -> NavigationChromeState {
        self.state.get()
    }

    /// Publish `next`. One write per transition.
    pub fn replace(&self, next: NavigationChromeState) {
        if self.state.get() != next {
            self.state.set(next);
        }
    }

    pub fn apply_scroll_signal(
        &self,
        metrics: &ScrollMetrics,
        config: &NavConfig,
        registry: &SectionRegistry,
        anchors: &dyn AnchorSource,
    ) {
        let next = self.snapshot().with_scroll_signal(metrics, config, registry, anchors);
        self.replace(next);
    }

    pub fn toggle_mobile_menu(&self) {
        self.replace(self.snapshot().with_menu_toggled());
    }

    pub fn close_mobile_menu(&self) {
        self.replace(self.snapshot().with_menu_closed());
    }

    /// Read-only handle for deriveds built on top of the state.
    pub(crate) fn signal(&self) -> Signal<NavigationChromeState> {
        self.state.clone()
    }

    /// Run `f` now and after every published change.
    ///
    /// A panicking watcher is logged and stays subscribed; the panic never
    /// reaches the writer. Returns the stop function.
    pub fn watch(&self, f: impl Fn(&NavigationChromeState) + 'static) -> Box<dyn FnOnce()> {
        let state = self.state.clone();
        let stop = effect(move || {
            let current = state.get();
            if panic::catch_unwind(AssertUnwindSafe(|| f(&current))).is_err() {
                error!(active_section = %current.active_section, "state watcher panicked");
            }
        });
        Box::new(stop)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SectionId;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    struct Anchors(HashMap<&'static str, f64>);

    impl AnchorSource for Anchors {
        fn element_top_offset(&self, id: &SectionId) -> Option<f64> {
            self.0.get(id.as_str()).copied()
        }
    }

    fn anchors() -> Anchors {
        Anchors(HashMap::from([
            ("home", 0.0),
            ("about", 800.0),
            ("projects", 1600.0),
            ("contact", 2400.0),
        ]))
    }

    fn initial() -> NavigationChromeState {
        NavigationChromeState::new("home".into())
    }

    fn scrolled_to(state: &NavigationChromeState, scroll_y: f64) -> NavigationChromeState {
        let metrics = ScrollMetrics::new(scroll_y, 1000.0).unwrap();
        state.with_scroll_signal(
            &metrics,
            &NavConfig::default(),
            &SectionRegistry::default(),
            &anchors(),
        )
    }

    #[test]
    fn test_scrolled_threshold_boundary() {
        assert!(!scrolled_to(&initial(), 0.0).is_scrolled);
        assert!(!scrolled_to(&initial(), 50.0).is_scrolled);
        assert!(scrolled_to(&initial(), 50.5).is_scrolled);
        assert!(scrolled_to(&initial(), 51.0).is_scrolled);
    }

    #[test]
    fn test_reveal_threshold_boundary() {
        assert!(!scrolled_to(&initial(), 100.0).show_scroll_to_top);
        assert!(!scrolled_to(&initial(), 300.0).show_scroll_to_top);
        assert!(scrolled_to(&initial(), 301.0).show_scroll_to_top);
    }

    #[test]
    fn test_scroll_signal_resolves_section() {
        let state = scrolled_to(&initial(), 1500.0);
        assert_eq!(state.active_section, "projects");
        assert!(state.is_scrolled);
        assert!(state.show_scroll_to_top);
    }

    #[test]
    fn test_scroll_signal_idempotent() {
        let once = scrolled_to(&initial(), 700.0);
        let twice = scrolled_to(&once, 700.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scroll_signal_preserves_menu() {
        let open = initial().with_menu_toggled();
        assert!(scrolled_to(&open, 900.0).is_mobile_menu_open);
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let state = scrolled_to(&initial(), 700.0);

        let open = state.with_menu_toggled();
        assert!(open.is_mobile_menu_open);
        assert_eq!(open.active_section, state.active_section);
        assert_eq!(open.is_scrolled, state.is_scrolled);

        let closed = open.with_menu_toggled();
        assert_eq!(closed, state);

        assert_eq!(open.with_menu_closed(), state);
        assert_eq!(state.with_menu_closed(), state);
    }

    #[test]
    fn test_store_publishes_complete_states() {
        let store = ChromeStore::new(initial());
        let seen: Rc<RefCell<Vec<NavigationChromeState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let stop = store.watch(move |state| sink.borrow_mut().push(state.clone()));

        let metrics = ScrollMetrics::new(2500.0, 1000.0).unwrap();
        store.apply_scroll_signal(
            &metrics,
            &NavConfig::default(),
            &SectionRegistry::default(),
            &anchors(),
        );

        let seen_now = seen.borrow().clone();
        assert_eq!(seen_now.len(), 2);
        assert_eq!(seen_now[0], initial());
        let last = &seen_now[1];
        assert!(last.is_scrolled);
        assert!(last.show_scroll_to_top);
        assert_eq!(last.active_section, "contact");

        stop();
    }

    #[test]
    fn test_store_skips_unchanged_state() {
        let store = ChromeStore::new(initial());
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let stop = store.watch(move |_| *counter.borrow_mut() += 1);
        assert_eq!(*runs.borrow(), 1);

        store.close_mobile_menu();
        assert_eq!(*runs.borrow(), 1);

        store.toggle_mobile_menu();
        assert_eq!(*runs.borrow(), 2);
        assert!(store.snapshot().is_mobile_menu_open);

        store.close_mobile_menu();
        store.close_mobile_menu();
        assert_eq!(*runs.borrow(), 3);
        assert!(!store.snapshot().is_mobile_menu_open);

        stop();
    }

    #[test]
    fn test_panicking_watcher_does_not_block_writes() {
        let store = ChromeStore::new(initial());
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let stop_faulty = store.watch(move |state| {
            *counter.borrow_mut() += 1;
            if state.is_mobile_menu_open {
                panic!("renderer failed");
            }
        });
        let seen: Rc<RefCell<Vec<NavigationChromeState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let stop = store.watch(move |state| sink.borrow_mut().push(state.clone()));

        store.toggle_mobile_menu();
        assert!(store.snapshot().is_mobile_menu_open);

        let metrics = ScrollMetrics::new(1500.0, 1000.0).unwrap();
        store.apply_scroll_signal(
            &metrics,
            &NavConfig::default(),
            &SectionRegistry::default(),
            &anchors(),
        );
        store.close_mobile_menu();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[2].active_section, "projects");
        assert!(!seen[3].is_mobile_menu_open);
        // Still subscribed after panicking
        assert_eq!(*calls.borrow(), 4);

        stop_faulty();
        stop();
    }
}
