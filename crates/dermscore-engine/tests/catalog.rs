use serde_json::{Map, Value, json};

use dermscore_engine::{evaluate, get_template};

fn raw(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn braden_mid_tier_sums_option_scores() {
    let template = get_template("braden").unwrap();
    let inputs = raw(json!({
        "sensory": "3",
        "moisture": "3",
        "activity": "3",
        "mobility": "3",
        "nutrition": "3",
        "friction": "3"
    }));

    let eval = evaluate(template, &inputs).unwrap();
    assert_eq!(eval.score, 18.0);
    assert_eq!(eval.interpretation_label, "Mild risk");
    assert_eq!(eval.contributions.len(), 6);
    assert!(eval.contributions.iter().all(|c| c.points == 3.0));
    assert_eq!(
        eval.copy_blocks,
        vec!["Braden score 18: Mild risk. At risk of pressure injury.".to_string()]
    );
}

#[test]
fn braden_missing_select_names_the_input() {
    let template = get_template("braden").unwrap();
    let inputs = raw(json!({
        "sensory": "3",
        "moisture": "3",
        "activity": "3",
        "mobility": "3",
        "friction": "3"
    }));

    let err = evaluate(template, &inputs).unwrap_err();
    assert_eq!(err.message, "Missing required input \"Nutrition\"");
}

#[test]
fn dlqi_renders_summary_and_copy() {
    let template = get_template("dlqi").unwrap();
    let mut inputs = Map::new();
    for i in 1..=10 {
        inputs.insert(format!("q{i}"), json!("a_little"));
    }
    inputs.insert("q7".to_string(), json!("prevented"));

    let eval = evaluate(template, &inputs).unwrap();
    assert_eq!(eval.score, 12.0);
    assert_eq!(eval.interpretation_label, "Very large effect");
    assert_eq!(
        eval.interpretation_summary,
        "DLQI 12/30: Very large effect on patient's life."
    );
}

#[test]
fn scorten_counts_present_risk_factors() {
    let template = get_template("scorten").unwrap();
    let eval = evaluate(
        template,
        &raw(json!({ "age": true, "heart_rate": true, "urea": 1, "glucose": false })),
    )
    .unwrap();
    assert_eq!(eval.score, 3.0);
    assert_eq!(eval.interpretation_summary, "Predicted mortality 35.3%");
    assert_eq!(eval.copy_blocks, vec!["SCORTEN 3. Predicted mortality 35.3%.".to_string()]);
}
