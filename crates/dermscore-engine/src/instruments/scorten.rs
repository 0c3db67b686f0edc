use dermscore_core::models::template::{Interpretation, Template};

use super::{copy, flag, range};

/// SCORTEN: severity-of-illness score for SJS/TEN. One point per risk
/// factor present at admission.
pub fn template() -> Template {
    Template {
        name: "SCORTEN".to_string(),
        slug: "scorten".to_string(),
        category: "severity".to_string(),
        version: "1.0.0".to_string(),
        description: "Mortality prediction in Stevens-Johnson syndrome / toxic epidermal necrolysis"
            .to_string(),
        citation: Some(
            "Bastuji-Garin S, et al. J Invest Dermatol. 2000;115(2):149-153.".to_string(),
        ),
        inputs: vec![
            flag("age", "Age >= 40 years"),
            flag("malignancy", "Associated malignancy"),
            flag("heart_rate", "Heart rate >= 120 bpm"),
            flag("detachment", "Epidermal detachment > 10% BSA"),
            flag("urea", "Serum urea > 10 mmol/L"),
            flag("bicarbonate", "Serum bicarbonate < 20 mmol/L"),
            flag("glucose", "Serum glucose > 14 mmol/L"),
        ],
        interpretation: Interpretation {
            summary_template: "Predicted mortality {{guidance}}".to_string(),
            ranges: vec![
                range(0.0, 1.0, "SCORTEN 0-1", "3.2%"),
                range(2.0, 2.0, "SCORTEN 2", "12.1%"),
                range(3.0, 3.0, "SCORTEN 3", "35.3%"),
                range(4.0, 4.0, "SCORTEN 4", "58.3%"),
                range(5.0, 7.0, "SCORTEN >= 5", "> 90%"),
            ],
        },
        copy_blocks: vec![copy(
            "Admission note",
            "SCORTEN {{score}}. {{interpretationSummary}}.",
        )],
        updated_at: None,
    }
}
