use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Position, Settlement, SettlementId, Tier};

/// Wire shape of one settlement as the external dataset delivers it.
/// Field names follow the source contract (`layer`, `primaryRole`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRecord {
    pub id: String,
    pub name: String,
    pub layer: Tier,
    pub primary_role: String,
    pub lat: f64,
    pub lng: f64,
    pub horizon: String,
}

impl From<SettlementRecord> for Settlement {
    fn from(record: SettlementRecord) -> Self {
        Settlement {
            id: SettlementId::new(record.id),
            name: record.name,
            tier: record.layer,
            role: record.primary_role,
            position: Position {
                lat: record.lat,
                lng: record.lng,
            },
            horizon: record.horizon,
        }
    }
}

/// Loads the settlement dataset from a YAML or JSON file (by extension),
/// preserving file order. Duplicate ids are a dataset defect and fail the
/// load; everything downstream assumes ids are unique.
pub fn load_settlements(path: impl AsRef<Path>) -> Result<Vec<Settlement>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settlement dataset {}", path.display()))?;
    let records: Vec<SettlementRecord> =
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&data)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        };

    let mut seen = BTreeSet::new();
    for record in &records {
        if !seen.insert(record.id.clone()) {
            bail!(
                "duplicate settlement id '{}' in {}",
                record.id,
                path.display()
            );
        }
    }
    Ok(records.into_iter().map(Settlement::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATASET_YAML: &str = r#"
- id: tokyo
  name: Tokyo
  layer: national-core
  primaryRole: Diplomacy, finance, and frontier research
  lat: 35.6762
  lng: 139.6503
  horizon: Hold through 2050
- id: kanazawa
  name: Kanazawa
  layer: baseline-node
  primaryRole: Crafts, tourism, and prefectural services
  lat: 36.5613
  lng: 136.6562
  horizon: Review by 2040
"#;

    #[test]
    fn loads_yaml_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settlements.yaml");
        fs::write(&path, DATASET_YAML).unwrap();

        let settlements = load_settlements(&path).unwrap();
        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].id, SettlementId::from("tokyo"));
        assert_eq!(settlements[0].tier, Tier::NationalCore);
        assert_eq!(settlements[1].name, "Kanazawa");
        assert!((settlements[1].position.lat - 36.5613).abs() < 1e-9);
    }

    #[test]
    fn loads_json_with_the_same_record_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settlements.json");
        let json = r#"[
            {
                "id": "osaka",
                "name": "Osaka",
                "layer": "national-core",
                "primaryRole": "Commerce and western gateway",
                "lat": 34.6937,
                "lng": 135.5023,
                "horizon": "Hold through 2050"
            }
        ]"#;
        fs::write(&path, json).unwrap();

        let settlements = load_settlements(&path).unwrap();
        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].role, "Commerce and western gateway");
    }

    #[test]
    fn rejects_duplicate_settlement_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settlements.yaml");
        let duplicated = format!("{DATASET_YAML}{}", &DATASET_YAML[1..]);
        fs::write(&path, duplicated).unwrap();

        let err = load_settlements(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate settlement id 'tokyo'"));
    }
}
