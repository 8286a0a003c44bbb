use std::f32::consts::TAU;

use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

/// Categorical palette for identity entries, in the spirit of d3's Set3.
pub(super) const PALETTE: [Color32; 12] = [
    Color32::from_rgb(141, 211, 199),
    Color32::from_rgb(255, 255, 179),
    Color32::from_rgb(190, 186, 218),
    Color32::from_rgb(251, 128, 114),
    Color32::from_rgb(128, 177, 211),
    Color32::from_rgb(253, 180, 98),
    Color32::from_rgb(179, 222, 105),
    Color32::from_rgb(252, 205, 229),
    Color32::from_rgb(217, 217, 217),
    Color32::from_rgb(188, 128, 189),
    Color32::from_rgb(204, 235, 197),
    Color32::from_rgb(255, 237, 111),
];

pub(super) fn palette_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid_stroke);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid_stroke);
        y += step;
    }
}

pub(super) fn dashed_circle(painter: &Painter, center: Pos2, radius: f32, stroke: Stroke) {
    if radius <= 0.5 {
        return;
    }

    const SEGMENTS: usize = 96;
    let points = (0..=SEGMENTS)
        .map(|step| {
            let angle = (step as f32 / SEGMENTS as f32) * TAU;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect::<Vec<_>>();
    painter.add(Shape::dashed_line(&points, stroke, 4.0, 4.0));
}

/// Small dark tooltip card next to the pointer.
pub(super) fn draw_tooltip(painter: &Painter, pointer: Pos2, text: &str) {
    let galley = painter.layout_no_wrap(
        text.to_owned(),
        FontId::proportional(12.0),
        Color32::from_rgb(230, 235, 240),
    );
    let padding = vec2(8.0, 6.0);
    let origin = pointer + vec2(16.0, -12.0);
    let frame = Rect::from_min_size(origin, galley.size() + padding * 2.0);

    painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(10, 14, 20, 235));
    painter.rect_stroke(
        frame,
        4.0,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 100, 110, 160)),
        eframe::egui::StrokeKind::Inside,
    );
    painter.galley(frame.min + padding, galley, Color32::WHITE);
}
