use dermscore_core::models::template::{Interpretation, Template};

use super::{copy, range, select};

/// DLQI: Dermatology Life Quality Index. Ten items over the last week,
/// each scored 0–3. Total 0–30; higher = greater impairment.
pub fn template() -> Template {
    let frequency: &[(&str, &str, f64)] = &[
        ("very_much", "Very much", 3.0),
        ("a_lot", "A lot", 2.0),
        ("a_little", "A little", 1.0),
        ("not_at_all", "Not at all / not relevant", 0.0),
    ];
    let work: &[(&str, &str, f64)] = &[
        ("prevented", "Yes (prevented work or study)", 3.0),
        ("a_lot", "A lot", 2.0),
        ("a_little", "A little", 1.0),
        ("not_at_all", "Not at all / not relevant", 0.0),
    ];

    Template {
        name: "DLQI".to_string(),
        slug: "dlqi".to_string(),
        category: "quality-of-life".to_string(),
        version: "1.0.0".to_string(),
        description: "Dermatology Life Quality Index".to_string(),
        citation: Some(
            "Finlay AY, Khan GK. Clin Exp Dermatol. 1994;19(3):210-216.".to_string(),
        ),
        inputs: vec![
            select("q1", "Itchy, sore, painful or stinging skin", frequency),
            select("q2", "Embarrassed or self-conscious", frequency),
            select("q3", "Interfered with shopping or home care", frequency),
            select("q4", "Influenced clothes worn", frequency),
            select("q5", "Affected social or leisure activities", frequency),
            select("q6", "Made it difficult to do any sport", frequency),
            select("q7", "Prevented working or studying", work),
            select("q8", "Problems with partner, friends or relatives", frequency),
            select("q9", "Caused sexual difficulties", frequency),
            select("q10", "Treatment was a problem", frequency),
        ],
        interpretation: Interpretation {
            summary_template: "DLQI {{score}}/30: {{guidance}}".to_string(),
            ranges: vec![
                range(0.0, 1.0, "No effect", "No effect on patient's life."),
                range(2.0, 5.0, "Small effect", "Small effect on patient's life."),
                range(6.0, 10.0, "Moderate effect", "Moderate effect on patient's life."),
                range(11.0, 20.0, "Very large effect", "Very large effect on patient's life."),
                range(21.0, 30.0, "Extremely large effect", "Extremely large effect on patient's life."),
            ],
        },
        copy_blocks: vec![copy(
            "Clinic note",
            "DLQI score {{score}} ({{interpretationLabel}}). {{interpretationSummary}}",
        )],
        updated_at: None,
    }
}
