//! Active Section Resolver
//!
//! Picks the section under the viewport midpoint ("probe"). Sections are
//! scanned from last to first; the first whose anchor sits at or above the
//! probe wins. Sections with no rendered anchor are skipped for this tick.
//! When nothing qualifies the previous active section is kept, so the
//! resolver never produces an empty value.

use tracing::trace;

use crate::engine::SectionRegistry;
use crate::types::{ScrollMetrics, SectionAnchor, SectionId};
use crate::viewport::AnchorSource;

/// Resolve the active section for one tick.
pub fn resolve_active_section(
    metrics: &ScrollMetrics,
    registry: &SectionRegistry,
    anchors: &dyn AnchorSource,
    previous: &SectionId,
) -> SectionId {
    let probe = metrics.probe();

    for id in registry.ids().rev() {
        let Some(top_offset) = anchors.element_top_offset(id) else {
            trace!(section = %id, "anchor missing, skipping");
            continue;
        };
        if top_offset <= probe {
            return id.clone();
        }
    }

    previous.clone()
}

/// Read every registered anchor that is currently rendered, in registry order.
pub fn collect_anchors(registry: &SectionRegistry, anchors: &dyn AnchorSource) -> Vec<SectionAnchor> {
    registry
        .ids()
        .filter_map(|id| {
            anchors.element_top_offset(id).map(|top_offset| SectionAnchor {
                id: id.clone(),
                top_offset,
            })
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
