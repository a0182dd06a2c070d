use std::path::PathBuf;

use livingmap::{
    encode::DIFF_COLOR,
    model::{SettlementId, Tier},
    scenario::ScenarioLoader,
    session::{MapError, MapSession, Selection},
    store,
};

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(file)
}

fn shipped_session() -> MapSession {
    let settlements = store::load_settlements(data_path("data/settlements.yaml")).unwrap();
    let scenarios = ScenarioLoader::new(data_path("data/scenarios"))
        .load_all()
        .unwrap();
    MapSession::new(settlements, scenarios)
}

#[test]
fn starts_on_the_baseline_with_everything_visible() {
    let session = shipped_session();
    assert_eq!(session.selection(), &Selection::Baseline);

    let frame = session.frame();
    assert_eq!(frame.scenario, "baseline");
    assert!(frame.changed.is_empty());
    assert_eq!(frame.markers.len(), session.settlements().len());
    assert!(frame.markers.iter().all(|m| !m.changed));
}

#[test]
fn markers_follow_dataset_order() {
    let session = shipped_session();
    let frame = session.frame();
    let marker_ids: Vec<_> = frame.markers.iter().map(|m| m.id.clone()).collect();
    let store_ids: Vec<_> = session.settlements().iter().map(|s| s.id.clone()).collect();
    assert_eq!(marker_ids, store_ids);
}

#[test]
fn selecting_a_scenario_marks_the_reassigned_settlements() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();

    let frame = session.frame();
    assert_eq!(frame.scenario, "after-2050");
    // takamatsu is reassigned to the tier it already holds, so it is not a diff
    let expected: Vec<SettlementId> = ["kanazawa", "nagoya", "niigata"]
        .into_iter()
        .map(SettlementId::from)
        .collect();
    assert_eq!(frame.changed.iter().cloned().collect::<Vec<_>>(), expected);

    let nagoya = frame
        .markers
        .iter()
        .find(|m| m.id == SettlementId::from("nagoya"))
        .unwrap();
    assert_eq!(nagoya.tier, Tier::NationalCore);
    assert!(nagoya.changed);
    assert_eq!(nagoya.visual.color, DIFF_COLOR);

    let takamatsu = frame
        .markers
        .iter()
        .find(|m| m.id == SettlementId::from("takamatsu"))
        .unwrap();
    assert!(!takamatsu.changed);
    assert_ne!(takamatsu.visual.color, DIFF_COLOR);
}

#[test]
fn scenario_notes_show_up_only_on_their_effective_tier() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();
    let frame = session.frame();

    let nagoya = frame
        .markers
        .iter()
        .find(|m| m.id == SettlementId::from("nagoya"))
        .unwrap();
    assert!(nagoya.visual.label.contains("National support"));
    assert!(!nagoya.visual.label.contains("Regional support"));

    let kanazawa = frame
        .markers
        .iter()
        .find(|m| m.id == SettlementId::from("kanazawa"))
        .unwrap();
    assert!(kanazawa.visual.label.contains("Regional support"));
}

#[test]
fn unknown_scenario_keys_are_rejected_without_changing_state() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();

    let err = session.select("after-2100").unwrap_err();
    assert_eq!(err, MapError::UnknownScenario("after-2100".to_string()));
    assert_eq!(session.selection().key(), "after-2050");
}

#[test]
fn selecting_baseline_by_key_clears_the_diff() {
    let mut session = shipped_session();
    session.select("compact-regions").unwrap();
    assert!(!session.frame().changed.is_empty());

    session.select("baseline").unwrap();
    assert_eq!(session.selection(), &Selection::Baseline);
    assert!(session.frame().changed.is_empty());
}

#[test]
fn switching_scenarios_always_compares_against_the_baseline() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();
    session.select("compact-regions").unwrap();

    let frame = session.frame();
    // sendai and hiroshima are demoted; matsuyama is reassigned to its own tier
    let expected: Vec<SettlementId> = ["hiroshima", "sendai"]
        .into_iter()
        .map(SettlementId::from)
        .collect();
    assert_eq!(frame.changed.iter().cloned().collect::<Vec<_>>(), expected);
}

#[test]
fn hiding_a_tier_removes_its_settlements_even_when_changed() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();
    session.toggle_filter(Tier::NationalCore);

    let frame = session.frame();
    // tokyo and osaka are national-core at baseline, nagoya becomes one
    // under the scenario; all three disappear, diff status notwithstanding
    for hidden in ["tokyo", "osaka", "nagoya"] {
        assert!(
            !frame
                .markers
                .iter()
                .any(|m| m.id == SettlementId::from(hidden)),
            "{hidden} should be hidden"
        );
    }
    // the diff set itself is filter-independent
    assert!(frame.changed.contains(&SettlementId::from("nagoya")));

    session.toggle_filter(Tier::NationalCore);
    let restored = session.frame();
    assert_eq!(restored.markers.len(), session.settlements().len());
}

#[test]
fn frames_are_reproducible() {
    let mut session = shipped_session();
    session.select("after-2050").unwrap();
    session.toggle_filter(Tier::BaselineNode);

    let first = session.frame();
    let second = session.frame();
    assert_eq!(first, second);
}
