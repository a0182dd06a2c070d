use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use thiserror::Error;

use crate::diff::diff;
use crate::encode::{encode, VisualRecord};
use crate::model::{FilterSet, Position, Settlement, SettlementId, Tier};
use crate::resolve::effective_tier;
use crate::scenario::Scenario;

pub const BASELINE_KEY: &str = "baseline";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
}

/// The active comparison: the baseline itself, or one named scenario.
/// Transitions are user-triggered only; the initial state is `Baseline`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Baseline,
    Scenario(String),
}

impl Selection {
    pub fn key(&self) -> &str {
        match self {
            Selection::Baseline => BASELINE_KEY,
            Selection::Scenario(key) => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: SettlementId,
    pub name: String,
    pub position: Position,
    pub tier: Tier,
    pub changed: bool,
    pub visual: VisualRecord,
}

/// One full derivation of the view: visible markers in store order plus the
/// changed-id set, for a given (selection, filter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub scenario: String,
    pub filters: FilterSet,
    pub markers: Vec<Marker>,
    pub changed: BTreeSet<SettlementId>,
}

/// Session-scoped state: settlements and scenarios loaded once and read-only
/// thereafter, plus the view state (selection and filters). Every frame is a
/// pure re-derivation resolve -> diff -> encode over the immutable datasets;
/// nothing accumulates across calls.
pub struct MapSession {
    settlements: Vec<Settlement>,
    scenarios: BTreeMap<String, Scenario>,
    selection: Selection,
    filters: FilterSet,
}

impl MapSession {
    pub fn new(settlements: Vec<Settlement>, scenarios: BTreeMap<String, Scenario>) -> Self {
        Self {
            settlements,
            scenarios,
            selection: Selection::Baseline,
            filters: FilterSet::default(),
        }
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn scenarios(&self) -> &BTreeMap<String, Scenario> {
        &self.scenarios
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filters(&self) -> FilterSet {
        self.filters
    }

    /// Switches the comparison. `"baseline"` returns to the baseline view;
    /// an unknown key is an error and leaves the selection unchanged.
    pub fn select(&mut self, key: &str) -> Result<(), MapError> {
        if key == BASELINE_KEY {
            self.selection = Selection::Baseline;
            return Ok(());
        }
        if !self.scenarios.contains_key(key) {
            return Err(MapError::UnknownScenario(key.to_string()));
        }
        self.selection = Selection::Scenario(key.to_string());
        Ok(())
    }

    pub fn select_baseline(&mut self) {
        self.selection = Selection::Baseline;
    }

    /// Flips one tier's visibility. Orthogonal to scenario selection.
    pub fn toggle_filter(&mut self, tier: Tier) {
        self.filters.toggle(tier);
    }

    pub fn active_scenario(&self) -> Option<&Scenario> {
        match &self.selection {
            Selection::Baseline => None,
            Selection::Scenario(key) => self.scenarios.get(key),
        }
    }

    /// Derives the full render state for the current (selection, filters)
    /// pair. Identical inputs yield identical frames; safe to call on every
    /// user interaction.
    pub fn frame(&self) -> MapFrame {
        let scenario = self.active_scenario();
        let changed = diff(&self.settlements, scenario);
        let mut markers = Vec::with_capacity(self.settlements.len());
        for settlement in &self.settlements {
            let tier = effective_tier(settlement, scenario);
            let is_diff = changed.contains(&settlement.id);
            if let Some(visual) = encode(settlement, tier, is_diff, scenario, &self.filters) {
                markers.push(Marker {
                    id: settlement.id.clone(),
                    name: settlement.name.clone(),
                    position: settlement.position,
                    tier,
                    changed: is_diff,
                    visual,
                });
            }
        }
        MapFrame {
            scenario: self.selection.key().to_string(),
            filters: self.filters,
            markers,
            changed,
        }
    }
}
