//! Drawing module - clock face rendering
//!
//! Renders the interactive clock face with nannou's Draw API: grid rings,
//! the 60 detachment wedges, hour markers with tear glyphs, and the
//! 12 o'clock index mark. All face geometry is computed in viewbox units
//! (outer ring radius 100) and scaled into window coordinates by `Layout`.

use nannou::prelude::*;
use shared::geometry::{angle_to_point, hour_to_point, rings, segment_to_angle, DEGREES_PER_SEGMENT};
use shared::{InteractionController, SelectionModel};

/// Width reserved for the egui control panel on the left.
pub const SIDEBAR_WIDTH: f32 = 340.0;

/// Color palette for the clock face
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 250,
        green: 250,
        blue: 250,
        standard: std::marker::PhantomData,
    };
    pub const GRID: Srgb<u8> = Srgb {
        red: 229,
        green: 229,
        blue: 229,
        standard: std::marker::PhantomData,
    };
    pub const DETACHMENT: Srgba<u8> = Srgba {
        color: Srgb {
            red: 59,
            green: 130,
            blue: 246,
            standard: std::marker::PhantomData,
        },
        alpha: 128,
    };
    pub const TEAR: Srgb<u8> = Srgb {
        red: 220,
        green: 38,
        blue: 38,
        standard: std::marker::PhantomData,
    };
    pub const TEAR_HOVER: Srgb<u8> = Srgb {
        red: 185,
        green: 28,
        blue: 28,
        standard: std::marker::PhantomData,
    };
    pub const MARKER_FILL: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const MARKER_HOVER_FILL: Srgb<u8> = Srgb {
        red: 254,
        green: 226,
        blue: 226,
        standard: std::marker::PhantomData,
    };
    pub const MARKER_STROKE: Srgb<u8> = Srgb {
        red: 209,
        green: 213,
        blue: 219,
        standard: std::marker::PhantomData,
    };
    pub const INDEX_MARK: Srgb<u8> = Srgb {
        red: 102,
        green: 102,
        blue: 102,
        standard: std::marker::PhantomData,
    };
    pub const STATUS_TEXT: Srgb<u8> = Srgb {
        red: 107,
        green: 114,
        blue: 128,
        standard: std::marker::PhantomData,
    };
}

/// Placement of the clock face within the window.
pub struct Layout {
    /// Window position of the face center.
    pub center: Point2,
    /// Window units per face (viewbox) unit.
    pub scale: f32,
    /// Bounding rect of the interactive face area.
    pub face_rect: Rect,
}

impl Layout {
    /// Center the face in the area right of the control sidebar.
    pub fn calculate(window_rect: Rect) -> Self {
        let face_area = Rect::from_x_y_w_h(
            window_rect.x() + SIDEBAR_WIDTH / 2.0,
            window_rect.y(),
            (window_rect.w() - SIDEBAR_WIDTH).max(100.0),
            window_rect.h(),
        );
        // Viewbox spans -110..110 in face units.
        let scale = (face_area.w().min(face_area.h()) * 0.9) / 220.0;
        let half = 110.0 * scale;
        Self {
            center: face_area.xy(),
            scale,
            face_rect: Rect::from_x_y_w_h(face_area.x(), face_area.y(), half * 2.0, half * 2.0),
        }
    }

    /// Window position of a face-units point.
    pub fn to_window(&self, p: (f32, f32)) -> Point2 {
        self.center + vec2(p.0, p.1) * self.scale
    }

    /// Face-units position of a window point.
    pub fn to_face(&self, p: Point2) -> (f32, f32) {
        let rel = (p - self.center) / self.scale;
        (rel.x, rel.y)
    }
}

/// Draw the full clock face.
pub fn draw_clock_face(
    draw: &Draw,
    layout: &Layout,
    selection: &SelectionModel,
    controller: &InteractionController,
) {
    // Grid rings at the segment band boundaries and the middle guide.
    draw_ring(draw, layout, rings::OUTER, 1.0, colors::GRID);
    draw_ring(draw, layout, rings::MIDDLE, 0.5, colors::GRID);
    draw_ring(draw, layout, rings::INNER, 1.0, colors::GRID);

    // Painted detachment wedges.
    for &segment in selection.detachment_segments().iter() {
        draw_wedge(draw, layout, segment);
    }

    // Segment ticks on the outer ring, majors at the hour boundaries.
    for i in 0..60 {
        let angle = segment_to_angle(i);
        let is_major = i % 5 == 0;
        let inner = if is_major { 96.0 } else { 98.0 };
        draw.line()
            .start(layout.to_window(angle_to_point(angle, inner)))
            .end(layout.to_window(angle_to_point(angle, rings::OUTER)))
            .weight(if is_major { 1.2 } else { 0.6 })
            .color(colors::GRID);
    }

    // Hour markers: tear glyph when marked, open disc otherwise.
    for hour in 1..=12u8 {
        let hovered = controller.hovered_hour() == Some(hour);
        if selection.is_hour_selected(hour) {
            draw_tear_glyph(draw, layout, hour, hovered);
        } else {
            let pos = layout.to_window(hour_to_point(hour, rings::TEAR));
            let fill = if hovered {
                colors::MARKER_HOVER_FILL
            } else {
                colors::MARKER_FILL
            };
            draw.ellipse()
                .xy(pos)
                .radius(rings::MARKER_HIT * layout.scale)
                .color(fill)
                .stroke(colors::MARKER_STROKE)
                .stroke_weight(1.5 * layout.scale);
        }
    }

    // 12 o'clock index mark.
    draw.line()
        .start(layout.to_window((0.0, rings::OUTER)))
        .end(layout.to_window((0.0, 110.0)))
        .weight(2.0 * layout.scale)
        .color(colors::INDEX_MARK);
}

/// Draw the "Adding..." / "Removing..." line under the face while dragging.
pub fn draw_status_line(draw: &Draw, layout: &Layout, controller: &InteractionController) {
    if let Some(adding) = controller.drawing_polarity() {
        let text = if adding { "Adding..." } else { "Removing..." };
        draw.text(text)
            .xy(layout.to_window((0.0, -125.0)))
            .color(colors::STATUS_TEXT)
            .font_size(16)
            .w(200.0);
    }
}

/// Fill one detachment wedge between the inner and outer rings.
fn draw_wedge(draw: &Draw, layout: &Layout, segment: usize) {
    let a0 = segment_to_angle(segment);
    let a1 = a0 + DEGREES_PER_SEGMENT;
    let arc_steps = 4;

    let mut points: Vec<Point2> = Vec::with_capacity(arc_steps * 2 + 2);
    for i in 0..=arc_steps {
        let t = a0 + (a1 - a0) * (i as f32 / arc_steps as f32);
        points.push(layout.to_window(angle_to_point(t, rings::OUTER)));
    }
    for i in (0..=arc_steps).rev() {
        let t = a0 + (a1 - a0) * (i as f32 / arc_steps as f32);
        points.push(layout.to_window(angle_to_point(t, rings::INNER)));
    }

    draw.polygon().points(points).color(colors::DETACHMENT);
}

/// Draw a marked break as a teardrop: a disc with an outward-pointing tip.
fn draw_tear_glyph(draw: &Draw, layout: &Layout, hour: u8, hovered: bool) {
    let color = if hovered {
        colors::TEAR_HOVER
    } else {
        colors::TEAR
    };
    let body = layout.to_window(hour_to_point(hour, rings::TEAR));
    let tip = layout.to_window(hour_to_point(hour, rings::TEAR + 11.0));

    // Tip triangle sits along the radial direction.
    let radial = (tip - body).normalize();
    let tangent = vec2(-radial.y, radial.x);
    let half_width = 5.0 * layout.scale;

    draw.tri()
        .points(
            tip,
            body + tangent * half_width,
            body - tangent * half_width,
        )
        .color(color);
    draw.ellipse()
        .xy(body)
        .radius(7.0 * layout.scale)
        .color(color);
}

/// Draw a ring (circle outline) using line segments
fn draw_ring(draw: &Draw, layout: &Layout, radius: f32, weight: f32, color: Srgb<u8>) {
    let steps = 120;
    let points: Vec<Point2> = (0..=steps)
        .map(|i| {
            let angle = (i as f32 / steps as f32) * 360.0;
            layout.to_window(angle_to_point(angle, radius))
        })
        .collect();

    draw.polyline()
        .weight(weight.max(0.5) * layout.scale.max(1.0))
        .color(color)
        .points(points);
}
