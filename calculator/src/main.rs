//! Retinal Detachment Risk Calculator
//!
//! Interactive clock-face widget for marking retinal-break locations and
//! detachment extent, feeding the BEAVRS logistic-regression risk model.
//! Drag across the segment band to paint detachment; click (or long-press,
//! on touch) the hour circles to mark tears.

mod drawing;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use shared::risk::{calculate_risk_with_steps, RiskAssessment, RiskInput};
use shared::{InteractionController, Modality, PointerButton, SelectionModel, Snapshot};

use crate::drawing::{colors, draw_clock_face, draw_status_line, Layout, SIDEBAR_WIDTH};
use crate::ui::{draw_control_panel, FormState, PanelContext};

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted UI preferences. Selections are never saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    touch_mode: bool,
    add_mode: bool,
    show_instructions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            touch_mode: false,
            add_mode: true,
            show_instructions: true,
        }
    }
}

/// Application state
struct Model {
    /// The dual selection (breaks + detachment)
    selection: SelectionModel,
    /// Gesture state machine
    controller: InteractionController,
    /// Latest change snapshot published by the selection model
    last_snapshot: Rc<RefCell<Snapshot>>,
    /// Clinical form inputs
    form: FormState,
    /// Result of the last calculation, if any
    assessment: Option<RiskAssessment>,
    /// Whether the instructions card is expanded
    show_instructions: bool,
    /// Whether the mouse is currently over the face area
    pointer_in_face: bool,
    /// egui integration
    egui: Egui,
}

fn save_config(model: &Model) {
    let config = Config {
        touch_mode: model.controller.modality() == Modality::Touch,
        add_mode: model.controller.is_add_mode(),
        show_instructions: model.show_instructions,
    };
    if let Err(e) = shared::save_settings(&config) {
        eprintln!("Failed to save settings: {}", e);
    }
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Retinal Detachment Risk Calculator")
        .size(1000, 700)
        .min_size(700, 500)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .mouse_exited(mouse_exited)
        .touch(touch_event)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = shared::load_settings().ok().flatten().unwrap_or_default();

    // Modality is selected once here, not re-detected per gesture.
    let modality = if config.touch_mode {
        Modality::Touch
    } else {
        Modality::Mouse
    };
    let mut controller = InteractionController::new(modality);
    controller.set_add_mode(config.add_mode);

    // The selection model publishes a snapshot into the form's view of the
    // world on every committed mutation, within the same event turn.
    let last_snapshot = Rc::new(RefCell::new(Snapshot {
        tears: Vec::new(),
        detachment: Vec::new(),
    }));
    let sink = Rc::clone(&last_snapshot);
    let mut selection = SelectionModel::new();
    selection.set_on_change(Box::new(move |snapshot| {
        *sink.borrow_mut() = snapshot.clone();
    }));

    Model {
        selection,
        controller,
        last_snapshot,
        form: FormState::default(),
        assessment: None,
        show_instructions: config.show_instructions,
        pointer_in_face: false,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    // Advance the long-press deadline.
    model
        .controller
        .tick(&mut model.selection, Instant::now());

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let snapshot = model.last_snapshot.borrow().clone();
    let detachment_segments = model.selection.detachment_segments();
    let panel = PanelContext {
        modality: model.controller.modality(),
        is_add_mode: model.controller.is_add_mode(),
        show_instructions: model.show_instructions,
        selected_hours: &snapshot.tears,
        detachment_segments: &detachment_segments,
        assessment: model.assessment.as_ref(),
    };
    let ui_result = draw_control_panel(&ctx, &mut model.form, &panel);

    drop(ctx);

    if ui_result.clear_all {
        model.selection.clear_all();
        model.controller.reset();
    }
    if ui_result.toggle_add_mode {
        model.controller.toggle_add_mode();
        save_config(model);
    }
    if ui_result.toggle_instructions {
        model.show_instructions = !model.show_instructions;
        save_config(model);
    }
    if let Some(touch_mode) = ui_result.set_touch_mode {
        let modality = if touch_mode {
            Modality::Touch
        } else {
            Modality::Mouse
        };
        let add_mode = model.controller.is_add_mode();
        model.controller = InteractionController::new(modality);
        model.controller.set_add_mode(add_mode);
        save_config(model);
    }
    if ui_result.calculate {
        model.assessment = run_calculation(model);
    }
    if ui_result.reset {
        model.selection.clear_all();
        model.controller.reset();
        model.form = FormState::default();
        model.assessment = None;
    }
}

fn run_calculation(model: &Model) -> Option<RiskAssessment> {
    let selected_hours = model.selection.selected_hours();
    let detachment_segments = model.selection.detachment_segments();
    let input = RiskInput {
        age: model.form.age_text.trim().parse::<u32>().ok(),
        pvr_grade: model.form.pvr_grade,
        vitrectomy_gauge: model.form.vitrectomy_gauge,
        selected_hours: &selected_hours,
        detachment_segments: &detachment_segments,
    };
    // The Calculate button is disabled on incomplete input, so a rejection
    // here only happens if the form and the selection disagree.
    match calculate_risk_with_steps(&input) {
        Ok(assessment) => Some(assessment),
        Err(e) => {
            eprintln!("Risk evaluation rejected: {}", e);
            None
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(colors::BACKGROUND);

    let layout = Layout::calculate(window_rect);
    draw_clock_face(&draw, &layout, &model.selection, &model.controller);
    draw_status_line(&draw, &layout, &model.controller);

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

/// True when the position falls in the egui sidebar rather than the face.
fn over_sidebar(window_rect: Rect, pos: Point2) -> bool {
    pos.x < window_rect.left() + SIDEBAR_WIDTH
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    let pos = app.mouse.position();
    let window_rect = app.window_rect();
    if over_sidebar(window_rect, pos) {
        return;
    }

    let pointer_button = match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => return,
    };

    let layout = Layout::calculate(window_rect);
    let (x, y) = layout.to_face(pos);
    model
        .controller
        .pointer_down(&mut model.selection, x, y, pointer_button);
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let layout = Layout::calculate(app.window_rect());

    // Leaving the face bounds always terminates a drag.
    let in_face = layout.face_rect.contains(pos);
    if model.pointer_in_face && !in_face {
        model.controller.pointer_left();
    }
    model.pointer_in_face = in_face;

    let (x, y) = layout.to_face(pos);
    model.controller.pointer_move(&mut model.selection, x, y);
}

fn mouse_released(_app: &App, model: &mut Model, _button: MouseButton) {
    // Window-level release: ends a drag no matter where it happens.
    model.controller.pointer_up();
}

fn mouse_exited(_app: &App, model: &mut Model) {
    model.pointer_in_face = false;
    model.controller.pointer_left();
}

fn touch_event(app: &App, model: &mut Model, event: TouchEvent) {
    let layout = Layout::calculate(app.window_rect());
    let (x, y) = layout.to_face(event.position);

    match event.phase {
        TouchPhase::Started => {
            if !over_sidebar(app.window_rect(), event.position) {
                model
                    .controller
                    .touch_start(&mut model.selection, x, y, Instant::now());
            }
        }
        TouchPhase::Moved => {
            model.controller.touch_move(&mut model.selection, x, y);
        }
        TouchPhase::Ended | TouchPhase::Cancelled => {
            model.controller.touch_end();
        }
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // C clears both selections
        Key::C => {
            model.selection.clear_all();
            model.controller.reset();
        }
        // M flips add/remove mode (touch modality)
        Key::M => {
            if model.controller.modality() == Modality::Touch {
                model.controller.toggle_add_mode();
                save_config(model);
            }
        }
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_expanded_instructions() {
        let config = Config::default();
        assert!(!config.touch_mode);
        assert!(config.add_mode);
        assert!(config.show_instructions);
    }

    #[test]
    fn test_config_persists_instructions_preference() {
        let config = Config {
            touch_mode: true,
            add_mode: false,
            show_instructions: false,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert!(!parsed.show_instructions);
        assert!(parsed.touch_mode);
        assert!(!parsed.add_mode);
    }
}
