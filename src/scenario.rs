use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{SettlementId, Tier};

/// A named override table remapping some settlements to a different tier
/// than their baseline. Keys absent from `reassignments` mean "unchanged";
/// keys referencing unknown settlements are tolerated and simply unused,
/// since scenario and settlement datasets version independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "layerChanges")]
    pub reassignments: BTreeMap<SettlementId, Tier>,
    #[serde(default, alias = "tierNotes")]
    pub tier_notes: BTreeMap<Tier, String>,
}

impl Scenario {
    /// Annotation text this scenario attaches to a tier, if any.
    pub fn tier_note(&self, tier: Tier) -> Option<&str> {
        self.tier_notes.get(&tier).map(String::as_str)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario =
            parse(&path, &data).with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }

    /// Loads every scenario file in the base directory, keyed by scenario id.
    /// Files are visited in name order so failures are reproducible.
    pub fn load_all(&self) -> Result<BTreeMap<String, Scenario>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.base_dir)
            .with_context(|| {
                format!(
                    "Failed to read scenario directory {}",
                    self.base_dir.display()
                )
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("yaml") | Some("yml") | Some("json")
                )
            })
            .collect();
        paths.sort();

        let mut scenarios = BTreeMap::new();
        for path in paths {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
            let scenario: Scenario = parse(&path, &data)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if scenarios.contains_key(&scenario.id) {
                bail!(
                    "duplicate scenario id '{}' in {}",
                    scenario.id,
                    path.display()
                );
            }
            scenarios.insert(scenario.id.clone(), scenario);
        }
        Ok(scenarios)
    }
}

fn parse(path: &Path, data: &str) -> Result<Scenario> {
    let scenario = if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        serde_json::from_str(data)?
    } else {
        serde_yaml::from_str(data)?
    };
    Ok(scenario)
}
