//! Visual encoder: maps an effective tier plus diff status to the marker
//! styling the renderer consumes. Diff status dominates tier identity in
//! both color and radius.

use serde::Serialize;

use crate::model::{FilterSet, Settlement, Tier};
use crate::scenario::Scenario;

/// Marker color for settlements whose tier changed under the active scenario.
pub const DIFF_COLOR: &str = "#dc2626";

pub const DIFF_RADIUS: f64 = 10.0;
pub const BASE_RADIUS: f64 = 8.0;
pub const FILL_OPACITY: f64 = 0.85;

/// Fixed palette keyed by tier. The match is exhaustive over the closed
/// tier set, so an unmapped tier cannot exist.
pub fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::NationalCore => "#1e3a8a",
        Tier::RegionalCore => "#166534",
        Tier::BaselineNode => "#4b5563",
    }
}

/// Render-ready styling for one settlement marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualRecord {
    pub color: &'static str,
    pub radius: f64,
    pub fill_opacity: f64,
    pub label: String,
}

/// Decides whether a settlement is rendered and with which styling.
///
/// Returns `None` when the filter set hides the effective tier; that is the
/// normal invisible case, not an error. The label's tier annotation is looked
/// up by `effective_tier`, never by the stored baseline tier, so a scenario
/// swap can never surface another tier's note in the popup.
pub fn encode(
    settlement: &Settlement,
    effective_tier: Tier,
    is_diff: bool,
    scenario: Option<&Scenario>,
    filters: &FilterSet,
) -> Option<VisualRecord> {
    if !filters.shows(effective_tier) {
        return None;
    }
    let color = if is_diff {
        DIFF_COLOR
    } else {
        tier_color(effective_tier)
    };
    let radius = if is_diff { DIFF_RADIUS } else { BASE_RADIUS };
    let note = scenario.and_then(|s| s.tier_note(effective_tier));
    Some(VisualRecord {
        color,
        radius,
        fill_opacity: FILL_OPACITY,
        label: compose_label(settlement, effective_tier, note),
    })
}

/// Newline-separated popup text: name, effective tier and role, planning
/// horizon, and the scenario's note for the effective tier when present.
fn compose_label(settlement: &Settlement, effective_tier: Tier, note: Option<&str>) -> String {
    let mut label = format!(
        "{}\n{}: {}",
        settlement.name, effective_tier, settlement.role
    );
    if !settlement.horizon.is_empty() {
        label.push('\n');
        label.push_str(&settlement.horizon);
    }
    if let Some(note) = note {
        label.push('\n');
        label.push_str(note);
    }
    label
}
