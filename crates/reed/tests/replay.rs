//! End-to-end scenarios replayed against the in-memory page.

use reed::platform::memory::NodeId;
use reed::platform::replay::{Replay, Scenario, StepOutcome};

fn load(json: &str) -> Scenario {
    Scenario::from_json(json).expect("scenario parses")
}

fn outcomes(scenario: &Scenario) -> Vec<StepOutcome> {
    Replay::run(scenario)
        .expect("scenario runs")
        .steps
        .into_iter()
        .map(|step| step.outcome)
        .collect()
}

#[test]
fn signup_page_walkthrough() {
    let scenario = load(include_str!("scenarios/signup_page.json"));
    let report = Replay::run(&scenario).unwrap();

    let steps: Vec<_> = report.steps.iter().map(|step| step.outcome.clone()).collect();
    assert_eq!(
        steps,
        vec![
            StepOutcome::Scrolled { scrolled: false },
            StepOutcome::Scrolled { scrolled: true },
            StepOutcome::Hovered,
            StepOutcome::MenuToggled { active: true },
            StepOutcome::SubmitBlocked { invalid: 2 },
            StepOutcome::PhoneFormatted { value: "06 12 34 5678".to_string() },
            StepOutcome::Ignored,
            StepOutcome::PreviewApplied { generation: 1 },
            StepOutcome::SubmitAllowed,
        ]
    );

    let page = &report.page;
    assert_eq!(page.alerts, vec!["Veuillez remplir tous les champs obligatoires".to_string()]);

    let element = |node: u32| &page.elements[node as usize];
    assert_eq!(element(0).classes, vec!["navbar", "navbar-scrolled"]);
    assert_eq!(element(1).classes, vec!["navbar-toggler", "active"]);
    assert_eq!(element(3).style.get("transform").map(String::as_str), Some("translateY(-2px)"));
    assert!(element(2).style.is_empty());
    assert_eq!(element(5).value, "Durand");
    assert!(element(5).classes.is_empty());
    assert!(element(6).classes.is_empty());
    assert_eq!(element(8).id.as_deref(), Some("photo-preview"));
    assert_eq!(
        element(8).attributes.get("src").map(String::as_str),
        Some("data:image/png;base64,iVBORw==")
    );
    assert_eq!(element(8).style.get("display").map(String::as_str), Some("block"));
}

#[test]
fn blocked_submit_marks_only_blank_fields() {
    let mut scenario = load(include_str!("scenarios/signup_page.json"));
    // Fill the name, then submit before typing a phone number.
    scenario.events = serde_json::from_str(
        r#"[
            { "kind": "input", "selector": "[name=nom]", "text": "  Durand " },
            { "kind": "submit", "selector": "form" }
        ]"#,
    )
    .unwrap();

    let mut replay = Replay::new(&scenario.page, &scenario.config).unwrap();
    for (step, event) in scenario.events.iter().enumerate() {
        replay.apply(step, event).unwrap();
    }
    let page = replay.page();
    assert!(!page.classes(&NodeId(5)).contains(&"is-invalid".to_string()));
    assert!(page.classes(&NodeId(6)).contains(&"is-invalid".to_string()));
    assert_eq!(page.alerts().len(), 1);
}

#[test]
fn stale_preview_read_is_dropped() {
    let scenario = load(include_str!("scenarios/preview_race.json"));
    let report = Replay::run(&scenario).unwrap();
    assert_eq!(
        report.steps.iter().map(|step| step.outcome.clone()).collect::<Vec<_>>(),
        vec![
            StepOutcome::PreviewPending { generation: 1 },
            StepOutcome::PreviewPending { generation: 2 },
            StepOutcome::ReadsFlushed { applied: 1, stale: 1 },
        ]
    );
    assert_eq!(
        report.page.elements[1].attributes.get("src").map(String::as_str),
        Some("data:image/png;base64,bmV3")
    );
}

#[test]
fn pending_reads_finish_at_end_of_run() {
    let mut scenario = load(include_str!("scenarios/preview_race.json"));
    scenario.events.truncate(1);
    assert_eq!(
        outcomes(&scenario),
        vec![
            StepOutcome::PreviewPending { generation: 1 },
            StepOutcome::ReadsFlushed { applied: 1, stale: 0 },
        ]
    );
}

#[test]
fn custom_config_changes_markers() {
    let mut scenario = load(include_str!("scenarios/signup_page.json"));
    scenario.config = reed::PageConfig::from_json(
        r#"{ "navbar": { "scroll_threshold": 10, "scrolled_class": "compact" } }"#,
    )
    .unwrap();
    scenario.events.truncate(1);
    let report = Replay::run(&scenario).unwrap();
    assert_eq!(report.steps[0].outcome, StepOutcome::Scrolled { scrolled: true });
    assert_eq!(report.page.elements[0].classes, vec!["navbar", "compact"]);
}

#[test]
fn report_serializes_flat_steps() {
    let mut scenario = load(include_str!("scenarios/signup_page.json"));
    scenario.events.truncate(1);
    let report = Replay::run(&scenario).unwrap();
    let json = serde_json::to_value(&report.steps).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "step": 0, "outcome": "scrolled", "scrolled": false }])
    );
}
