//! Selection Model - the two coupled selections on the clock face
//!
//! Owns the marked break hours and the painted detachment segments, mutated
//! only through the toggle/set/clear operations below. Every committed
//! mutation synchronously notifies the registered observer with a snapshot
//! of both selections, hours ascending. The "affected hours" view is always
//! recomputed from the segments through the mapping table, never stored.

use std::collections::BTreeSet;

use crate::geometry::SEGMENT_COUNT;
use crate::mapping::segment_to_hour;

/// Snapshot handed to the observer after each committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Break hours, ascending, each in 1-12.
    pub tears: Vec<u8>,
    /// Hours with at least one detached segment, ascending, each in 1-12.
    pub detachment: Vec<u8>,
}

/// Observer invoked synchronously inside the mutating call.
pub type OnChange = Box<dyn FnMut(&Snapshot)>;

/// The dual selection state plus its change observer.
///
/// Created empty at widget mount; cleared or mutated only by explicit user
/// gestures routed through the interaction controller.
#[derive(Default)]
pub struct SelectionModel {
    selected_hours: BTreeSet<u8>,
    detachment_segments: BTreeSet<usize>,
    on_change: Option<OnChange>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the change observer, replacing any previous one.
    pub fn set_on_change(&mut self, on_change: OnChange) {
        self.on_change = Some(on_change);
    }

    /// Break hours, ascending.
    pub fn selected_hours(&self) -> Vec<u8> {
        self.selected_hours.iter().copied().collect()
    }

    /// Detachment segments, ascending.
    pub fn detachment_segments(&self) -> Vec<usize> {
        self.detachment_segments.iter().copied().collect()
    }

    pub fn is_hour_selected(&self, hour: u8) -> bool {
        self.selected_hours.contains(&hour)
    }

    pub fn is_segment_selected(&self, segment: usize) -> bool {
        self.detachment_segments.contains(&segment)
    }

    /// Hours with at least one segment in the detachment set, ascending.
    ///
    /// Pure projection through the mapping table; recomputed on demand.
    pub fn affected_hours(&self) -> Vec<u8> {
        let hours: BTreeSet<u8> = self
            .detachment_segments
            .iter()
            .map(|&seg| segment_to_hour(seg))
            .collect();
        hours.into_iter().collect()
    }

    /// Toggle a break marker. No-op for hours outside 1-12.
    pub fn toggle_hour(&mut self, hour: u8) {
        if !(1..=12).contains(&hour) {
            return;
        }
        if !self.selected_hours.remove(&hour) {
            self.selected_hours.insert(hour);
        }
        self.notify();
    }

    /// Toggle a detachment segment. No-op for segments outside [0, 60).
    pub fn toggle_segment(&mut self, segment: usize) {
        if segment >= SEGMENT_COUNT {
            return;
        }
        if !self.detachment_segments.remove(&segment) {
            self.detachment_segments.insert(segment);
        }
        self.notify();
    }

    /// Explicitly add or remove a segment, as drag-paint does.
    ///
    /// Unlike `toggle_segment` this is idempotent for a fixed polarity, so
    /// revisiting a segment mid-drag cannot flip it back. Still notifies on
    /// every call: the observer contract is per committed operation.
    pub fn set_segment(&mut self, segment: usize, present: bool) {
        if segment >= SEGMENT_COUNT {
            return;
        }
        if present {
            self.detachment_segments.insert(segment);
        } else {
            self.detachment_segments.remove(&segment);
        }
        self.notify();
    }

    /// Empty both selections.
    pub fn clear_all(&mut self) {
        self.selected_hours.clear();
        self.detachment_segments.clear();
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(on_change) = self.on_change.as_mut() {
            let snapshot = Snapshot {
                tears: self.selected_hours.iter().copied().collect(),
                detachment: {
                    let hours: BTreeSet<u8> = self
                        .detachment_segments
                        .iter()
                        .map(|&seg| segment_to_hour(seg))
                        .collect();
                    hours.into_iter().collect()
                },
            };
            on_change(&snapshot);
        }
    }
}
