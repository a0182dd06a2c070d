//! Diff engine: which settlements hold a different tier under a scenario
//! than under the baseline. Comparison is always against the fixed baseline,
//! never against a previously selected scenario.

use std::collections::BTreeSet;

use crate::model::{Settlement, SettlementId};
use crate::resolve::effective_tier;
use crate::scenario::Scenario;

/// Ids whose effective tier differs from their baseline tier. Empty for the
/// baseline selection. A reassignment to the tier a settlement already holds
/// is not a diff: the check is on the final value, not on the presence of an
/// override entry. Single pass over the store, map lookups per settlement.
pub fn diff(settlements: &[Settlement], scenario: Option<&Scenario>) -> BTreeSet<SettlementId> {
    let Some(scenario) = scenario else {
        return BTreeSet::new();
    };
    settlements
        .iter()
        .filter(|settlement| effective_tier(settlement, Some(scenario)) != settlement.tier)
        .map(|settlement| settlement.id.clone())
        .collect()
}
