//! Headless Page - an in-memory [`Viewport`] backed by a Taffy layout.
//!
//! A stand-in for a browser window in tests and previews. It does not lay out
//! page content; it only produces section offsets for the controller.
//!
//! The page is a single flex column: a top padding reserved for the fixed
//! header, then one block per rendered section. Section heights are either
//! absolute or a fraction of the viewport height (a `100vh` hero), so resizing
//! the window moves every anchor below it.
//!
//! There is no animation: a smooth scroll request jumps straight to the
//! clamped target and emits a scroll event, which is all a controller can
//! observe of a real animation's final frame.

use std::cell::{Cell, RefCell};

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Rect, Size,
    Style, TaffyTree,
};
use tracing::{debug, trace};

use crate::error::{NavError, Result};
use crate::types::{ScrollTarget, SectionId};
use crate::viewport::{
    AnchorSource, SubscriptionId, Viewport, ViewportEvent, ViewportEvents, ViewportListener,
};

// =============================================================================
// PAGE DESCRIPTION
// =============================================================================

/// Height of a section block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionHeight {
    /// Absolute height in document units.
    Length(f32),
    /// Fraction of the viewport height (`1.0` = `100vh`).
    Viewport(f32),
}

/// One section of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub id: SectionId,
    pub height: SectionHeight,
    /// Whether the section's element is currently in the document.
    pub rendered: bool,
}

impl PageSection {
    pub fn new(id: impl Into<SectionId>, height: SectionHeight) -> Self {
        Self {
            id: id.into(),
            height,
            rendered: true,
        }
    }
}

/// Computed block of one rendered section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

/// Result of laying out the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub sections: Vec<SectionBox>,
    pub document_height: f64,
}

impl PageLayout {
    pub fn top_of(&self, id: &SectionId) -> Option<f64> {
        self.sections.iter().find(|s| s.id == *id).map(|s| s.top)
    }
}

// =============================================================================
// TAFFY LAYOUT
// =============================================================================

fn resolve_height(height: SectionHeight, viewport_height: f32) -> Result<f32> {
    let value = match height {
        SectionHeight::Length(h) => h,
        SectionHeight::Viewport(fraction) => fraction * viewport_height,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(NavError::InvalidConfig(format!(
            "section height must be finite and non-negative, got {value}"
        )));
    }
    Ok(value)
}

fn section_style(height: f32) -> Style {
    Style {
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Length(height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn page_style(header_height: f32) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        padding: Rect {
            top: LengthPercentage::Length(header_height),
            right: LengthPercentage::Length(0.0),
            bottom: LengthPercentage::Length(0.0),
            left: LengthPercentage::Length(0.0),
        },
        ..Default::default()
    }
}

fn check_window(width: f32, height: f32) -> Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(NavError::ViewportUnavailable(format!(
            "window size must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

fn layout_error(e: impl std::fmt::Display) -> NavError {
    NavError::Layout(e.to_string())
}

/// Lay out the rendered sections as a column below the header.
pub fn compute_page_layout(
    sections: &[PageSection],
    header_height: f32,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<PageLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let mut children: Vec<(SectionId, NodeId)> = Vec::new();
    for section in sections.iter().filter(|s| s.rendered) {
        let height = resolve_height(section.height, viewport_height)?;
        let node = tree.new_leaf(section_style(height)).map_err(layout_error)?;
        children.push((section.id.clone(), node));
    }

    let child_nodes: Vec<NodeId> = children.iter().map(|(_, node)| *node).collect();
    let root = tree
        .new_with_children(page_style(header_height), &child_nodes)
        .map_err(layout_error)?;

    let available = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available).map_err(layout_error)?;

    let mut result = PageLayout {
        sections: Vec::with_capacity(children.len()),
        document_height: tree.layout(root).map_err(layout_error)?.size.height as f64,
    };
    for (id, node) in children {
        let layout = tree.layout(node).map_err(layout_error)?;
        result.sections.push(SectionBox {
            id,
            top: layout.location.y as f64,
            height: layout.size.height as f64,
        });
    }

    Ok(result)
}

// =============================================================================
// PAGE VIEWPORT
// =============================================================================

/// Headless window over a laid-out page.
pub struct PageViewport {
    sections: RefCell<Vec<PageSection>>,
    header_height: f32,
    width: Cell<f32>,
    height: Cell<f32>,
    scroll_y: Cell<f64>,
    layout: RefCell<PageLayout>,
    listeners: RefCell<Vec<(SubscriptionId, ViewportEvents, ViewportListener)>>,
    next_id: Cell<u64>,
}

impl PageViewport {
    pub fn new(
        sections: Vec<PageSection>,
        header_height: f32,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        check_window(width, height)?;
        if !header_height.is_finite() || header_height < 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "header height must be finite and non-negative, got {header_height}"
            )));
        }
        let layout = compute_page_layout(&sections, header_height, width, height)?;
        debug!(
            sections = layout.sections.len(),
            document_height = layout.document_height,
            "page laid out"
        );

        Ok(Self {
            sections: RefCell::new(sections),
            header_height,
            width: Cell::new(width),
            height: Cell::new(height),
            scroll_y: Cell::new(0.0),
            layout: RefCell::new(layout),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn layout(&self) -> PageLayout {
        self.layout.borrow().clone()
    }

    pub fn document_height(&self) -> f64 {
        self.layout.borrow().document_height
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.height.get() as f64).max(0.0)
    }

    /// Instant scroll (user wheel / drag). Clamped to the document.
    pub fn scroll_to(&self, y: f64) {
        let clamped = if y.is_finite() { y.clamp(0.0, self.max_scroll()) } else { 0.0 };
        self.scroll_y.set(clamped);
        self.emit(ViewportEvent::Scroll);
    }

    /// Resize the window and reflow the page.
    pub fn resize(&self, width: f32, height: f32) -> Result<()> {
        check_window(width, height)?;
        let layout = compute_page_layout(&self.sections.borrow(), self.header_height, width, height)?;
        self.width.set(width);
        self.height.set(height);
        *self.layout.borrow_mut() = layout;
        self.clamp_scroll();
        self.emit(ViewportEvent::Resize);
        Ok(())
    }

    /// Add or remove a section's element from the document and reflow.
    ///
    /// Emits a resize event, since every anchor below the section moves.
    pub fn set_rendered(&self, id: &SectionId, rendered: bool) -> Result<()> {
        let layout = {
            let mut sections = self.sections.borrow().clone();
            let Some(section) = sections.iter_mut().find(|s| s.id == *id) else {
                return Err(NavError::UnknownSection(id.clone()));
            };
            section.rendered = rendered;
            let layout =
                compute_page_layout(&sections, self.header_height, self.width.get(), self.height.get())?;
            *self.sections.borrow_mut() = sections;
            layout
        };
        *self.layout.borrow_mut() = layout;
        self.clamp_scroll();
        self.emit(ViewportEvent::Resize);
        Ok(())
    }

    fn clamp_scroll(&self) {
        self.scroll_y.set(self.scroll_y.get().min(self.max_scroll()));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn emit(&self, event: ViewportEvent) {
        // Listeners may subscribe/unsubscribe or scroll again while running
        let listeners: Vec<ViewportListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, events, _)| events.contains(event.flag()))
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl AnchorSource for PageViewport {
    fn element_top_offset(&self, id: &SectionId) -> Option<f64> {
        self.layout.borrow().top_of(id)
    }
}

impl Viewport for PageViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_height(&self) -> f64 {
        self.height.get() as f64
    }

    fn smooth_scroll_to(&self, target: ScrollTarget) {
        let y = match &target {
            ScrollTarget::Position(y) => *y,
            ScrollTarget::Element(id) => match self.element_top_offset(id) {
                Some(top) => top,
                None => return,
            },
        };
        trace!(?target, y, "smooth scroll");
        self.scroll_to(y);
    }

    fn subscribe(&self, events: ViewportEvents, listener: ViewportListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, events, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _, _)| *sid != id);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn sections() -> Vec<PageSection> {
        vec![
            PageSection::new("home", SectionHeight::Viewport(1.0)),
            PageSection::new("about", SectionHeight::Length(700.0)),
            PageSection::new("projects", SectionHeight::Length(1200.0)),
            PageSection::new("contact", SectionHeight::Length(600.0)),
        ]
    }

    #[test]
    fn test_sections_stack_below_header() {
        let layout = compute_page_layout(&sections(), 80.0, 1280.0, 800.0).unwrap();
        let tops: Vec<f64> = layout.sections.iter().map(|s| s.top).collect();
        assert_eq!(tops, [80.0, 880.0, 1580.0, 2780.0]);
        assert_eq!(layout.document_height, 3380.0);
    }

    #[test]
    fn test_unrendered_section_has_no_anchor() {
        let mut page = sections();
        page[1].rendered = false;
        let layout = compute_page_layout(&page, 0.0, 1280.0, 800.0).unwrap();
        assert_eq!(layout.top_of(&"about".into()), None);
        assert_eq!(layout.top_of(&"projects".into()), Some(800.0));
    }

    #[test]
    fn test_rejects_negative_height() {
        let page = vec![PageSection::new("home", SectionHeight::Length(-1.0))];
        assert!(compute_page_layout(&page, 0.0, 1280.0, 800.0).is_err());
    }

    #[test]
    fn test_rejects_bad_window_and_header() {
        assert!(matches!(
            PageViewport::new(sections(), 0.0, 1280.0, 0.0),
            Err(NavError::ViewportUnavailable(_))
        ));
        assert!(matches!(
            PageViewport::new(sections(), -10.0, 1280.0, 800.0),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            PageViewport::new(sections(), f32::NAN, 1280.0, 800.0),
            Err(NavError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejected_resize_leaves_page_untouched() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        viewport.scroll_to(1000.0);
        let events = Rc::new(Cell::new(0));
        let counter = events.clone();
        viewport.subscribe(
            ViewportEvents::RESIZE,
            Rc::new(move |_: ViewportEvent| counter.set(counter.get() + 1)),
        );
        let before = viewport.layout();

        for (width, height) in [(0.0, 0.0), (1280.0, -1.0), (f32::INFINITY, 800.0)] {
            assert!(matches!(
                viewport.resize(width, height),
                Err(NavError::ViewportUnavailable(_))
            ));
        }
        assert_eq!(viewport.viewport_height(), 800.0);
        assert_eq!(viewport.scroll_y(), 1000.0);
        assert_eq!(viewport.layout(), before);
        assert_eq!(events.get(), 0);
    }

    #[test]
    fn test_set_rendered_clamps_scroll_and_notifies() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        viewport.scroll_to(2500.0);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        viewport.subscribe(
            ViewportEvents::all(),
            Rc::new(move |event: ViewportEvent| sink.borrow_mut().push(event)),
        );

        // document 3300 -> 2100, max scroll 2500 -> 1300
        viewport.set_rendered(&"projects".into(), false).unwrap();
        assert_eq!(viewport.max_scroll(), 1300.0);
        assert_eq!(viewport.scroll_y(), 1300.0);
        assert_eq!(*events.borrow(), vec![ViewportEvent::Resize]);

        assert!(viewport.set_rendered(&"blog".into(), false).is_err());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        assert_eq!(viewport.max_scroll(), 2500.0);

        viewport.scroll_to(-50.0);
        assert_eq!(viewport.scroll_y(), 0.0);
        viewport.scroll_to(9999.0);
        assert_eq!(viewport.scroll_y(), 2500.0);
    }

    #[test]
    fn test_smooth_scroll_to_element() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        viewport.smooth_scroll_to(ScrollTarget::Element("projects".into()));
        assert_eq!(viewport.scroll_y(), 1500.0);

        viewport.set_rendered(&"about".into(), false).unwrap();
        viewport.smooth_scroll_to(ScrollTarget::Element("about".into()));
        assert_eq!(viewport.scroll_y(), 1500.0);

        viewport.smooth_scroll_to(ScrollTarget::TOP);
        assert_eq!(viewport.scroll_y(), 0.0);
    }

    #[test]
    fn test_resize_reflows_viewport_sections() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        assert_eq!(viewport.element_top_offset(&"about".into()), Some(800.0));

        viewport.resize(390.0, 600.0).unwrap();
        assert_eq!(viewport.element_top_offset(&"about".into()), Some(600.0));
        assert_eq!(viewport.viewport_height(), 600.0);
    }

    #[test]
    fn test_events_reach_matching_listeners() {
        let viewport = PageViewport::new(sections(), 0.0, 1280.0, 800.0).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let scroll_only = viewport.subscribe(
            ViewportEvents::SCROLL,
            Rc::new(move |event: ViewportEvent| sink.borrow_mut().push(("scroll", event))),
        );
        let sink = seen.clone();
        let _both = viewport.subscribe(
            ViewportEvents::all(),
            Rc::new(move |event: ViewportEvent| sink.borrow_mut().push(("all", event))),
        );

        viewport.scroll_to(100.0);
        viewport.resize(1280.0, 700.0).unwrap();
        viewport.unsubscribe(scroll_only);
        viewport.scroll_to(200.0);

        assert_eq!(
            *seen.borrow(),
            vec![
                ("scroll", ViewportEvent::Scroll),
                ("all", ViewportEvent::Scroll),
                ("all", ViewportEvent::Resize),
                ("all", ViewportEvent::Scroll),
            ]
        );
        assert_eq!(viewport.listener_count(), 1);
    }
}
