use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategic classification of a settlement. The set is closed: exactly
/// these three tiers exist, and diffing compares them by equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    NationalCore,
    RegionalCore,
    BaselineNode,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::NationalCore, Tier::RegionalCore, Tier::BaselineNode];

    /// Stable machine name, matching the serde representation.
    pub fn slug(self) -> &'static str {
        match self {
            Tier::NationalCore => "national-core",
            Tier::RegionalCore => "regional-core",
            Tier::BaselineNode => "baseline-node",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|tier| tier.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::NationalCore => "National core",
            Tier::RegionalCore => "Regional core",
            Tier::BaselineNode => "Baseline node",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque settlement identifier, stable across all scenarios.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementId(String);

impl SettlementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SettlementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A settlement as held in memory for the session. Loaded once, never
/// mutated; scenario effects produce derived copies via [`Settlement::with_tier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    pub tier: Tier,
    pub role: String,
    pub position: Position,
    pub horizon: String,
}

impl Settlement {
    /// Pure constructor for a derived view of this settlement under a
    /// different tier. The original value is left untouched.
    pub fn with_tier(&self, tier: Tier) -> Settlement {
        Settlement {
            tier,
            ..self.clone()
        }
    }
}

/// Per-tier visibility toggles. View state, not a settlement property;
/// every combination of the three flags is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilterSet {
    pub national_core: bool,
    pub regional_core: bool,
    pub baseline_node: bool,
}

impl FilterSet {
    pub fn shows(&self, tier: Tier) -> bool {
        match tier {
            Tier::NationalCore => self.national_core,
            Tier::RegionalCore => self.regional_core,
            Tier::BaselineNode => self.baseline_node,
        }
    }

    pub fn toggle(&mut self, tier: Tier) {
        let flag = match tier {
            Tier::NationalCore => &mut self.national_core,
            Tier::RegionalCore => &mut self.regional_core,
            Tier::BaselineNode => &mut self.baseline_node,
        };
        *flag = !*flag;
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            national_core: true,
            regional_core: true,
            baseline_node: true,
        }
    }
}
