//! Scenario resolver: turns the baseline dataset plus an optional scenario
//! into the effective per-settlement view. `None` means the baseline itself.

use crate::model::{Settlement, Tier};
use crate::scenario::Scenario;

/// The tier actually in force for a settlement under the given selection:
/// the scenario's reassignment when one exists, else the baseline tier.
pub fn effective_tier(settlement: &Settlement, scenario: Option<&Scenario>) -> Tier {
    scenario
        .and_then(|s| s.reassignments.get(&settlement.id))
        .copied()
        .unwrap_or(settlement.tier)
}

/// Derives a fresh settlement sequence carrying effective tiers; every other
/// field passes through unchanged. Baseline selection is the identity (still
/// a new sequence). Reassignments referencing unknown ids are simply unused.
pub fn resolve(settlements: &[Settlement], scenario: Option<&Scenario>) -> Vec<Settlement> {
    settlements
        .iter()
        .map(|settlement| settlement.with_tier(effective_tier(settlement, scenario)))
        .collect()
}
