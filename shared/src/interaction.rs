//! Interaction Controller - gesture state machine for the clock face
//!
//! Turns raw pointer/touch events into selection-model operations. A gesture
//! is classified once at its start as either a segment drag-paint or an
//! hour long-press and never re-classified mid-gesture.
//!
//! Polarity (paint vs erase) is modality-dependent: with a mouse it is fixed
//! by the button that started the drag (secondary erases); on touch it comes
//! from the persistent add/remove mode flag. The long-press deadline is a
//! recorded `Instant` checked by `tick` from the frame loop, so cancelling
//! is just clearing the pending state and is safe to repeat.

use std::time::{Duration, Instant};

use crate::geometry::{hit_test, ClockTarget};
use crate::selection::SelectionModel;

/// How long a touch must rest on an hour marker to toggle it.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(300);

/// Movement (per axis, in face units) that cancels a pending long-press.
pub const MOVE_THRESHOLD: f32 = 10.0;

/// Input capability, selected once at widget initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Mouse,
    Touch,
}

/// Mouse button that initiated a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Current gesture, alive for one pointer-down-to-pointer-up interval.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    DraggingSegments {
        /// Paint (true) or erase (false), fixed for the whole drag.
        add: bool,
        /// Guard against re-applying while the pointer lingers.
        last_touched: usize,
    },
    PendingLongPress {
        hour: u8,
        started_at: Instant,
        start_pos: (f32, f32),
    },
}

/// The gesture state machine. One per widget instance.
pub struct InteractionController {
    modality: Modality,
    gesture: Gesture,
    /// Touch-only polarity flag, toggled explicitly by the user.
    is_add_mode: bool,
    /// Hour marker currently under the mouse, for hover highlight.
    hovered_hour: Option<u8>,
}

impl InteractionController {
    pub fn new(modality: Modality) -> Self {
        Self {
            modality,
            gesture: Gesture::Idle,
            is_add_mode: true,
            hovered_hour: None,
        }
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn is_add_mode(&self) -> bool {
        self.is_add_mode
    }

    pub fn set_add_mode(&mut self, add: bool) {
        self.is_add_mode = add;
    }

    pub fn toggle_add_mode(&mut self) {
        self.is_add_mode = !self.is_add_mode;
    }

    pub fn hovered_hour(&self) -> Option<u8> {
        self.hovered_hour
    }

    /// Polarity of the drag in progress, if any. Used for the status line.
    pub fn drawing_polarity(&self) -> Option<bool> {
        match self.gesture {
            Gesture::DraggingSegments { add, .. } => Some(add),
            _ => None,
        }
    }

    /// Abort any gesture and transient hover state.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.hovered_hour = None;
    }

    /// Mouse press at a face-relative position.
    ///
    /// Over an hour marker the primary button toggles immediately; over the
    /// segment band either button starts a drag whose polarity is fixed by
    /// the button for the drag's whole lifetime.
    pub fn pointer_down(
        &mut self,
        selection: &mut SelectionModel,
        x: f32,
        y: f32,
        button: PointerButton,
    ) {
        if self.modality != Modality::Mouse {
            return;
        }
        match hit_test(x, y, false) {
            ClockTarget::Hour(hour) => {
                if button == PointerButton::Primary {
                    selection.toggle_hour(hour);
                }
            }
            ClockTarget::Segment(segment) => {
                let add = button == PointerButton::Primary;
                selection.set_segment(segment, add);
                self.gesture = Gesture::DraggingSegments {
                    add,
                    last_touched: segment,
                };
            }
            ClockTarget::Outside => {}
        }
    }

    /// Mouse movement. Paints while a drag is live, tracks hover otherwise.
    pub fn pointer_move(&mut self, selection: &mut SelectionModel, x: f32, y: f32) {
        if self.modality != Modality::Mouse {
            return;
        }
        let target = hit_test(x, y, false);
        self.hovered_hour = match target {
            ClockTarget::Hour(hour) => Some(hour),
            _ => None,
        };
        if let Gesture::DraggingSegments { add, last_touched } = self.gesture {
            if let ClockTarget::Segment(segment) = target {
                if segment != last_touched {
                    selection.set_segment(segment, add);
                    self.gesture = Gesture::DraggingSegments {
                        add,
                        last_touched: segment,
                    };
                }
            }
        }
    }

    /// Mouse release, wherever it happens. Always ends a drag.
    pub fn pointer_up(&mut self) {
        if self.modality != Modality::Mouse {
            return;
        }
        self.gesture = Gesture::Idle;
    }

    /// Pointer left the widget bounds. Drags never survive this.
    pub fn pointer_left(&mut self) {
        self.hovered_hour = None;
        self.gesture = Gesture::Idle;
    }

    /// Touch contact at a face-relative position.
    ///
    /// Over an hour marker this arms the long-press timer, but only when the
    /// press could have an effect in the current mode (adding an unmarked
    /// hour, or removing a marked one). Over the segment band it starts a
    /// drag with the mode flag's polarity. Arming a new long-press replaces
    /// any pending one.
    pub fn touch_start(&mut self, selection: &mut SelectionModel, x: f32, y: f32, now: Instant) {
        if self.modality != Modality::Touch {
            return;
        }
        match hit_test(x, y, true) {
            ClockTarget::Hour(hour) => {
                if self.is_add_mode == selection.is_hour_selected(hour) {
                    self.gesture = Gesture::Idle;
                    return;
                }
                self.gesture = Gesture::PendingLongPress {
                    hour,
                    started_at: now,
                    start_pos: (x, y),
                };
            }
            ClockTarget::Segment(segment) => {
                selection.set_segment(segment, self.is_add_mode);
                self.gesture = Gesture::DraggingSegments {
                    add: self.is_add_mode,
                    last_touched: segment,
                };
            }
            ClockTarget::Outside => {}
        }
    }

    /// Touch movement. Paints during a drag; cancels a pending long-press
    /// once movement exceeds the threshold (that is a scroll, not a press).
    pub fn touch_move(&mut self, selection: &mut SelectionModel, x: f32, y: f32) {
        if self.modality != Modality::Touch {
            return;
        }
        match self.gesture {
            Gesture::DraggingSegments { add, last_touched } => {
                if let ClockTarget::Segment(segment) = hit_test(x, y, true) {
                    if segment != last_touched {
                        selection.set_segment(segment, add);
                        self.gesture = Gesture::DraggingSegments {
                            add,
                            last_touched: segment,
                        };
                    }
                }
            }
            Gesture::PendingLongPress { start_pos, .. } => {
                let moved_x = (x - start_pos.0).abs();
                let moved_y = (y - start_pos.1).abs();
                if moved_x > MOVE_THRESHOLD || moved_y > MOVE_THRESHOLD {
                    self.gesture = Gesture::Idle;
                }
            }
            Gesture::Idle => {}
        }
    }

    /// Touch lifted or cancelled. Ends a drag; a still-pending long-press
    /// is abandoned without toggling.
    pub fn touch_end(&mut self) {
        if self.modality != Modality::Touch {
            return;
        }
        self.gesture = Gesture::Idle;
    }

    /// Advance the long-press deadline. Call once per frame.
    ///
    /// Commits the pending hour toggle when the press has lasted the full
    /// threshold. Harmless when nothing is pending.
    pub fn tick(&mut self, selection: &mut SelectionModel, now: Instant) {
        if let Gesture::PendingLongPress {
            hour, started_at, ..
        } = self.gesture
        {
            if now.duration_since(started_at) >= LONG_PRESS_THRESHOLD {
                selection.toggle_hour(hour);
                self.gesture = Gesture::Idle;
            }
        }
    }
}
