//! UI module - egui control panel and results card
//!
//! The form around the clock face: instructions, touch add/remove mode,
//! the clinical inputs (age, PVR grade, vitrectomy gauge), the current
//! selection summary, and the calculated risk with its step breakdown.

use nannou_egui::egui;
use shared::risk::{PvrGrade, RiskAssessment, VitrectomyGauge};
use shared::{format_hour_list, format_ranges, group_detachment_ranges, Modality};

use crate::drawing::SIDEBAR_WIDTH;

/// Form fields owned by the application model.
pub struct FormState {
    pub age_text: String,
    pub pvr_grade: PvrGrade,
    pub vitrectomy_gauge: VitrectomyGauge,
    pub show_math: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            age_text: String::new(),
            pvr_grade: PvrGrade::None,
            vitrectomy_gauge: VitrectomyGauge::G25,
            show_math: false,
        }
    }
}

/// Result of UI interactions
#[derive(Default)]
pub struct UiResult {
    /// If true, clear both selections
    pub clear_all: bool,
    /// If true, flip the touch add/remove mode
    pub toggle_add_mode: bool,
    /// If true, collapse or expand the instructions card and persist it
    pub toggle_instructions: bool,
    /// If Some, switch the input modality and persist the preference
    pub set_touch_mode: Option<bool>,
    /// If true, run the risk evaluation
    pub calculate: bool,
    /// If true, discard the result and start over
    pub reset: bool,
}

/// Everything the panel needs to render, read-only.
pub struct PanelContext<'a> {
    pub modality: Modality,
    pub is_add_mode: bool,
    pub show_instructions: bool,
    pub selected_hours: &'a [u8],
    pub detachment_segments: &'a [usize],
    pub assessment: Option<&'a RiskAssessment>,
}

/// Draw the left control panel. Returns the actions to apply.
pub fn draw_control_panel(
    ctx: &egui::Context,
    form: &mut FormState,
    panel: &PanelContext,
) -> UiResult {
    let mut result = UiResult::default();

    egui::SidePanel::left("controls")
        .exact_width(SIDEBAR_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Retinal Detachment Risk");
            ui.label("Based on the UK BEAVRS database study");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Instructions");
                let toggle = if panel.show_instructions { "Hide" } else { "Show" };
                if ui.small_button(toggle).clicked() {
                    result.toggle_instructions = true;
                }
            });
            if panel.show_instructions {
                draw_instructions(ui, panel.modality);
            }
            ui.separator();

            if panel.modality == Modality::Touch {
                let mode_label = if panel.is_add_mode {
                    "Mode: Add"
                } else {
                    "Mode: Remove"
                };
                if ui.button(mode_label).clicked() {
                    result.toggle_add_mode = true;
                }
                ui.separator();
            }

            if panel.assessment.is_none() {
                draw_selection_summary(ui, panel);
                ui.separator();
                draw_input_form(ui, form, panel, &mut result);
            } else if let Some(assessment) = panel.assessment {
                draw_results(ui, form, assessment, &mut result);
            }

            ui.separator();
            if ui.button("Clear All").clicked() {
                result.clear_all = true;
            }

            ui.separator();
            let mut touch_mode = panel.modality == Modality::Touch;
            if ui.checkbox(&mut touch_mode, "Touch input mode").changed() {
                result.set_touch_mode = Some(touch_mode);
            }
            ui.label("Press M to switch add/remove, C to clear");
        });

    result
}

fn draw_instructions(ui: &mut egui::Ui, modality: Modality) {
    match modality {
        Modality::Mouse => {
            ui.label("• Click and drag to paint detachment");
            ui.label("• Right-click and drag to erase");
            ui.label("• Click circles to mark tears");
        }
        Modality::Touch => {
            ui.label("• Use the mode button to add or remove");
            ui.label("• Touch and drag to paint detachment");
            ui.label("• Long-press circles to mark tears");
        }
    }
}

fn draw_selection_summary(ui: &mut egui::Ui, panel: &PanelContext) {
    ui.label("Current selection:");
    if panel.selected_hours.is_empty() {
        ui.label("No breaks marked");
    } else {
        ui.label(format!(
            "Breaks at: {} o'clock",
            format_hour_list(panel.selected_hours)
        ));
    }
    if panel.detachment_segments.is_empty() {
        ui.colored_label(egui::Color32::from_rgb(220, 38, 38), "Detachment area required");
    } else {
        let ranges = group_detachment_ranges(panel.detachment_segments);
        ui.label(format!("Detachment: {} o'clock", format_ranges(&ranges)));
        ui.label(format!(
            "{} of 60 segments",
            panel.detachment_segments.len()
        ));
    }
}

fn draw_input_form(
    ui: &mut egui::Ui,
    form: &mut FormState,
    panel: &PanelContext,
    result: &mut UiResult,
) {
    ui.horizontal(|ui| {
        ui.label("Age (years):");
        ui.text_edit_singleline(&mut form.age_text);
    });

    egui::ComboBox::from_label("PVR grade")
        .selected_text(form.pvr_grade.label())
        .show_ui(ui, |ui| {
            for grade in PvrGrade::ALL {
                ui.selectable_value(&mut form.pvr_grade, grade, grade.label());
            }
        });

    egui::ComboBox::from_label("Vitrectomy gauge")
        .selected_text(form.vitrectomy_gauge.label())
        .show_ui(ui, |ui| {
            for gauge in VitrectomyGauge::ALL {
                ui.selectable_value(&mut form.vitrectomy_gauge, gauge, gauge.label());
            }
        });

    ui.add_space(8.0);

    let age_ok = form.age_text.trim().parse::<u32>().is_ok();
    let has_detachment = !panel.detachment_segments.is_empty();
    let enabled = age_ok && has_detachment;

    if ui
        .add_enabled(enabled, egui::Button::new("Calculate Risk"))
        .clicked()
    {
        result.calculate = true;
    }
    if !enabled {
        let hint = match (age_ok, has_detachment) {
            (false, false) => "Age and detachment area required",
            (false, true) => "Age required",
            (true, false) => "Detachment area required",
            (true, true) => unreachable!(),
        };
        ui.colored_label(egui::Color32::from_rgb(220, 38, 38), hint);
    }
}

fn draw_results(
    ui: &mut egui::Ui,
    form: &mut FormState,
    assessment: &RiskAssessment,
    result: &mut UiResult,
) {
    ui.label("Estimated probability of failure:");
    ui.heading(format!("{}%", assessment.probability));
    if assessment.total_rd {
        ui.label("Total retinal detachment");
    }

    ui.checkbox(&mut form.show_math, "Show calculation");
    if form.show_math {
        egui::Grid::new("risk_steps").striped(true).show(ui, |ui| {
            for step in &assessment.steps {
                ui.label(&step.label);
                ui.label(&step.value);
                ui.label(step.detail.as_deref().unwrap_or(""));
                ui.end_row();
            }
            ui.label("Logit");
            ui.label(&assessment.logit);
            ui.label("");
            ui.end_row();
        });
    }

    ui.add_space(8.0);
    if ui.button("Reset Calculator").clicked() {
        result.reset = true;
    }
}
