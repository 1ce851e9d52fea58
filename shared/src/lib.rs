//! Shared core logic for the retinal detachment risk calculator
//!
//! Pure clock-face geometry, the segment/hour mapping table, the dual
//! selection model, the gesture state machine, range summarization, and the
//! logistic-regression risk evaluator. No rendering dependencies; the
//! application crate draws on top of this.

pub mod config;
pub mod geometry;
pub mod interaction;
pub mod mapping;
pub mod ranges;
pub mod risk;
pub mod selection;

pub use config::{load_settings, save_settings, SettingsError};
pub use geometry::{
    angle_to_point, hit_test, hour_to_angle, hour_to_point, point_to_clock_angle, point_to_segment,
    segment_midpoint_angle, segment_to_angle, ClockTarget, DEGREES_PER_SEGMENT, SEGMENT_COUNT,
};
pub use interaction::{
    InteractionController, Modality, PointerButton, LONG_PRESS_THRESHOLD, MOVE_THRESHOLD,
};
pub use mapping::{hour_to_segments, segment_to_hour, SEGMENT_TO_HOUR};
pub use ranges::{
    format_hour_list, format_ranges, group_consecutive, group_detachment_ranges, HourRange,
};
pub use risk::{
    calculate_risk_with_steps, is_total_rd, PvrGrade, RiskAssessment, RiskInput, RiskInputError,
    RiskStep, VitrectomyGauge,
};
pub use selection::{SelectionModel, Snapshot};
