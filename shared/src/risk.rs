//! Risk Evaluator - closed-form logistic-regression risk estimate
//!
//! Implements the UK BEAVRS database model for re-detachment risk after
//! vitrectomy. The coefficient table is fixed study data, not configuration.
//! Evaluation is pure and deterministic: the same selections and form
//! inputs always produce the same probability and step breakdown.
//!
//! Two clinical rules are preserved exactly as published: break locations
//! at 5-7 o'clock take precedence over 4/8 o'clock, and "total detachment"
//! means at least 10 of the 12 clock hours are affected.

use std::collections::BTreeSet;

use crate::mapping::segment_to_hour;

/// Proliferative vitreoretinopathy grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PvrGrade {
    None,
    A,
    B,
    C,
}

impl PvrGrade {
    pub const ALL: [PvrGrade; 4] = [PvrGrade::None, PvrGrade::A, PvrGrade::B, PvrGrade::C];

    pub fn label(&self) -> &'static str {
        match self {
            PvrGrade::None => "No PVR",
            PvrGrade::A => "Grade A",
            PvrGrade::B => "Grade B",
            PvrGrade::C => "Grade C",
        }
    }
}

/// Vitrectomy instrument gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitrectomyGauge {
    G20,
    G23,
    G25,
    G27,
    NotRecorded,
}

impl VitrectomyGauge {
    pub const ALL: [VitrectomyGauge; 5] = [
        VitrectomyGauge::G20,
        VitrectomyGauge::G23,
        VitrectomyGauge::G25,
        VitrectomyGauge::G27,
        VitrectomyGauge::NotRecorded,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VitrectomyGauge::G20 => "20 gauge",
            VitrectomyGauge::G23 => "23 gauge",
            VitrectomyGauge::G25 => "25 gauge",
            VitrectomyGauge::G27 => "27 gauge",
            VitrectomyGauge::NotRecorded => "Not recorded",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VitrectomyGauge::G20 => "20g",
            VitrectomyGauge::G23 => "23g",
            VitrectomyGauge::G25 => "25g",
            VitrectomyGauge::G27 => "27g",
            VitrectomyGauge::NotRecorded => "not recorded",
        }
    }

    fn coefficient(&self) -> f64 {
        match self {
            VitrectomyGauge::G20 => 0.0, // reference category
            VitrectomyGauge::G23 => -0.408,
            VitrectomyGauge::G25 => -0.885,
            VitrectomyGauge::G27 => -0.703,
            VitrectomyGauge::NotRecorded => -0.738,
        }
    }
}

/// Model intercept.
const CONSTANT: f64 = -1.611;

/// Error type for incomplete evaluator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskInputError {
    /// No patient age was provided
    AgeMissing,
    /// No detachment segments are painted
    NoDetachment,
}

impl std::fmt::Display for RiskInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskInputError::AgeMissing => write!(f, "Age is required"),
            RiskInputError::NoDetachment => write!(f, "Detachment area is required"),
        }
    }
}

impl std::error::Error for RiskInputError {}

/// Inputs consumed by the evaluator.
#[derive(Debug, Clone)]
pub struct RiskInput<'a> {
    /// Patient age in years; `None` is rejected at evaluation time.
    pub age: Option<u32>,
    pub pvr_grade: PvrGrade,
    pub vitrectomy_gauge: VitrectomyGauge,
    /// Break hours (1-12).
    pub selected_hours: &'a [u8],
    /// Painted detachment segments (0-59).
    pub detachment_segments: &'a [usize],
}

/// One term of the logit sum, for the step-by-step explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskStep {
    pub label: String,
    /// Coefficient, three decimal places.
    pub value: String,
    pub detail: Option<String>,
}

/// Evaluation result: probability, logit, and the explanation steps.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub steps: Vec<RiskStep>,
    /// Linear predictor, three decimal places.
    pub logit: String,
    /// Probability as a percentage, one decimal place.
    pub probability: String,
    pub probability_value: f64,
    pub total_rd: bool,
}

fn age_term(age: u32) -> (f64, &'static str) {
    match age {
        a if a < 45 => (0.459, "under 45"),
        a if a >= 80 => (0.498, "80 plus"),
        a if a >= 65 => (0.236, "65 to 79"),
        // 45-64 is the reference category.
        _ => (0.0, "45 to 64"),
    }
}

fn break_location_term(selected_hours: &[u8]) -> (f64, &'static str) {
    if selected_hours.is_empty() {
        return (0.676, "no break");
    }
    let has_5_to_7 = selected_hours.iter().any(|h| (5..=7).contains(h));
    let has_4_or_8 = selected_hours.iter().any(|&h| h == 4 || h == 8);
    if has_5_to_7 {
        // 5-7 o'clock takes precedence over 4/8.
        (0.607, "5 to 7")
    } else if has_4_or_8 {
        (0.428, "4 or 8")
    } else {
        (0.0, "9 to 3")
    }
}

fn affected_hours(detachment_segments: &[usize]) -> BTreeSet<u8> {
    detachment_segments
        .iter()
        .map(|&seg| segment_to_hour(seg))
        .collect()
}

fn inferior_detachment_term(hours: &BTreeSet<u8>) -> (f64, &'static str) {
    if hours.contains(&6) {
        (0.435, "6 hours")
    } else if [3, 4, 5].iter().any(|h| hours.contains(h)) {
        (0.441, "3 to 5")
    } else {
        (0.0, "less than 3")
    }
}

/// Whether the detachment counts as total: 10 or more affected hours.
pub fn is_total_rd(detachment_segments: &[usize]) -> bool {
    affected_hours(detachment_segments).len() >= 10
}

/// Evaluate the model, accumulating one explanation step per term.
///
/// Rejects incomplete input: an age is required, and at least one
/// detachment segment must be painted.
pub fn calculate_risk_with_steps(input: &RiskInput) -> Result<RiskAssessment, RiskInputError> {
    let age = input.age.ok_or(RiskInputError::AgeMissing)?;
    if input.detachment_segments.is_empty() {
        return Err(RiskInputError::NoDetachment);
    }

    let mut steps = Vec::new();
    let mut logit = CONSTANT;
    steps.push(RiskStep {
        label: "Constant".to_string(),
        value: format!("{:.3}", CONSTANT),
        detail: None,
    });

    let (age_coef, age_group) = age_term(age);
    logit += age_coef;
    steps.push(RiskStep {
        label: "Age group".to_string(),
        value: format!("{:.3}", age_coef),
        detail: Some(format!("({})", age_group)),
    });

    let (break_coef, break_loc) = break_location_term(input.selected_hours);
    logit += break_coef;
    steps.push(RiskStep {
        label: "Break location".to_string(),
        value: format!("{:.3}", break_coef),
        detail: Some(format!("({} o'clock)", break_loc)),
    });

    // Total detachment supersedes the inferior-detachment term.
    let hours = affected_hours(input.detachment_segments);
    let total_rd = hours.len() >= 10;
    if total_rd {
        let rd_coef = 0.663;
        logit += rd_coef;
        steps.push(RiskStep {
            label: "Total RD".to_string(),
            value: format!("{:.3}", rd_coef),
            detail: None,
        });
    } else {
        let (inf_coef, inf_label) = inferior_detachment_term(&hours);
        logit += inf_coef;
        steps.push(RiskStep {
            label: "Inferior detachment".to_string(),
            value: format!("{:.3}", inf_coef),
            detail: Some(format!("({} o'clock)", inf_label)),
        });
    }

    let pvr_coef = if input.pvr_grade == PvrGrade::C {
        0.220
    } else {
        0.0
    };
    logit += pvr_coef;
    steps.push(RiskStep {
        label: "PVR grade".to_string(),
        value: format!("{:.3}", pvr_coef),
        detail: Some(format!(
            "(grade {})",
            if input.pvr_grade == PvrGrade::C {
                "C"
            } else {
                "A/B"
            }
        )),
    });

    let gauge_coef = input.vitrectomy_gauge.coefficient();
    logit += gauge_coef;
    steps.push(RiskStep {
        label: "Vitrectomy gauge".to_string(),
        value: format!("{:.3}", gauge_coef),
        detail: Some(format!(
            "({}, odds ratio {:.3})",
            input.vitrectomy_gauge.code(),
            gauge_coef.exp()
        )),
    });

    let probability = 1.0 / (1.0 + (-logit).exp());

    Ok(RiskAssessment {
        steps,
        logit: format!("{:.3}", logit),
        probability: format!("{:.1}", probability * 100.0),
        probability_value: probability,
        total_rd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::hour_to_segments;

    fn all_segments() -> Vec<usize> {
        (0..60).collect()
    }

    #[test]
    fn test_recorded_regression_case() {
        // Age 70, no PVR, 25g, break at 6 o'clock, total detachment.
        let segments = all_segments();
        let input = RiskInput {
            age: Some(70),
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G25,
            selected_hours: &[6],
            detachment_segments: &segments,
        };
        assert!(is_total_rd(&segments));
        let assessment = calculate_risk_with_steps(&input).unwrap();
        assert!(assessment.total_rd);
        assert_eq!(assessment.logit, "-0.990");
        assert_eq!(assessment.probability, "27.1");
        assert_eq!(assessment.steps.len(), 6);
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(age_term(44), (0.459, "under 45"));
        assert_eq!(age_term(45).0, 0.0);
        assert_eq!(age_term(64).0, 0.0);
        assert_eq!(age_term(65), (0.236, "65 to 79"));
        assert_eq!(age_term(80), (0.498, "80 plus"));
    }

    #[test]
    fn test_break_location_precedence() {
        // 5-7 overrides a simultaneous 4/8 break.
        assert_eq!(break_location_term(&[4, 6]).1, "5 to 7");
        assert_eq!(break_location_term(&[8]).1, "4 or 8");
        assert_eq!(break_location_term(&[12, 2]).1, "9 to 3");
        assert_eq!(break_location_term(&[]).1, "no break");
    }

    #[test]
    fn test_total_rd_threshold_is_ten_hours() {
        let mut segments: Vec<usize> = Vec::new();
        for hour in 1..=9u8 {
            segments.push(hour_to_segments(hour)[0]);
        }
        assert!(!is_total_rd(&segments));
        segments.push(hour_to_segments(10)[0]);
        assert!(is_total_rd(&segments));
    }

    #[test]
    fn test_inferior_detachment_categories() {
        // Hour 6 dominates.
        let six = hour_to_segments(6).to_vec();
        let assessment = calculate_risk_with_steps(&RiskInput {
            age: Some(50),
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G20,
            selected_hours: &[],
            detachment_segments: &six,
        })
        .unwrap();
        let step = &assessment.steps[3];
        assert_eq!(step.label, "Inferior detachment");
        assert_eq!(step.value, "0.435");

        let four = hour_to_segments(4).to_vec();
        let assessment = calculate_risk_with_steps(&RiskInput {
            age: Some(50),
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G20,
            selected_hours: &[],
            detachment_segments: &four,
        })
        .unwrap();
        assert_eq!(assessment.steps[3].value, "0.441");
    }

    #[test]
    fn test_pvr_only_grade_c_contributes() {
        for grade in [PvrGrade::None, PvrGrade::A, PvrGrade::B] {
            let assessment = calculate_risk_with_steps(&RiskInput {
                age: Some(50),
                pvr_grade: grade,
                vitrectomy_gauge: VitrectomyGauge::G20,
                selected_hours: &[],
                detachment_segments: &[0],
            })
            .unwrap();
            assert_eq!(assessment.steps[4].value, "0.000");
        }
        let assessment = calculate_risk_with_steps(&RiskInput {
            age: Some(50),
            pvr_grade: PvrGrade::C,
            vitrectomy_gauge: VitrectomyGauge::G20,
            selected_hours: &[],
            detachment_segments: &[0],
        })
        .unwrap();
        assert_eq!(assessment.steps[4].value, "0.220");
    }

    #[test]
    fn test_missing_age_is_rejected() {
        let result = calculate_risk_with_steps(&RiskInput {
            age: None,
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G25,
            selected_hours: &[6],
            detachment_segments: &[27],
        });
        assert_eq!(result.unwrap_err(), RiskInputError::AgeMissing);
    }

    #[test]
    fn test_empty_detachment_is_rejected() {
        let result = calculate_risk_with_steps(&RiskInput {
            age: Some(70),
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G25,
            selected_hours: &[6],
            detachment_segments: &[],
        });
        assert_eq!(result.unwrap_err(), RiskInputError::NoDetachment);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let segments = vec![27, 28, 29];
        let input = RiskInput {
            age: Some(55),
            pvr_grade: PvrGrade::B,
            vitrectomy_gauge: VitrectomyGauge::G23,
            selected_hours: &[6, 7],
            detachment_segments: &segments,
        };
        let a = calculate_risk_with_steps(&input).unwrap();
        let b = calculate_risk_with_steps(&input).unwrap();
        assert_eq!(a, b);
    }
}
