use dermscore_core::models::template::{Interpretation, Template};

use super::{copy, range, select};

/// Braden Scale for predicting pressure injury risk. Six subscales, total
/// 6–23; lower = higher risk.
pub fn template() -> Template {
    let four_point = |labels: [&'static str; 4]| -> Vec<(&'static str, &'static str, f64)> {
        vec![
            ("1", labels[0], 1.0),
            ("2", labels[1], 2.0),
            ("3", labels[2], 3.0),
            ("4", labels[3], 4.0),
        ]
    };

    Template {
        name: "Braden Scale".to_string(),
        slug: "braden".to_string(),
        category: "wound-care".to_string(),
        version: "1.0.0".to_string(),
        description: "Pressure injury risk assessment".to_string(),
        citation: Some(
            "Bergstrom N, Braden BJ, Laguzza A, Holman V. Nurs Res. 1987;36(4):205-210."
                .to_string(),
        ),
        inputs: vec![
            select(
                "sensory",
                "Sensory perception",
                &four_point([
                    "Completely limited",
                    "Very limited",
                    "Slightly limited",
                    "No impairment",
                ]),
            ),
            select(
                "moisture",
                "Moisture",
                &four_point([
                    "Constantly moist",
                    "Very moist",
                    "Occasionally moist",
                    "Rarely moist",
                ]),
            ),
            select(
                "activity",
                "Activity",
                &four_point(["Bedfast", "Chairfast", "Walks occasionally", "Walks frequently"]),
            ),
            select(
                "mobility",
                "Mobility",
                &four_point([
                    "Completely immobile",
                    "Very limited",
                    "Slightly limited",
                    "No limitation",
                ]),
            ),
            select(
                "nutrition",
                "Nutrition",
                &four_point(["Very poor", "Probably inadequate", "Adequate", "Excellent"]),
            ),
            select(
                "friction",
                "Friction and shear",
                &[
                    ("1", "Problem", 1.0),
                    ("2", "Potential problem", 2.0),
                    ("3", "No apparent problem", 3.0),
                ],
            ),
        ],
        interpretation: Interpretation {
            summary_template: String::new(),
            ranges: vec![
                range(6.0, 9.0, "Very high risk", "Very high risk of pressure injury."),
                range(10.0, 12.0, "High risk", "High risk of pressure injury."),
                range(13.0, 14.0, "Moderate risk", "Moderate risk of pressure injury."),
                range(15.0, 18.0, "Mild risk", "At risk of pressure injury."),
                range(19.0, 23.0, "No risk", "No significant pressure injury risk."),
            ],
        },
        copy_blocks: vec![copy(
            "Nursing note",
            "Braden score {{score}}: {{interpretationLabel}}. {{interpretationSummary}}",
        )],
        updated_at: None,
    }
}
