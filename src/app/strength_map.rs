use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};

use super::ViewModel;
use super::render_utils::{dashed_circle, draw_tooltip, palette_color};

const GRID_LEVELS: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];
const AXIS_COUNT: usize = 8;
const POINT_RADIUS: f32 = 7.0;

/// Distance from center encodes strength: 10 at the center, 1 at the edge.
fn strength_radius(strength: f64, max_radius: f32) -> f32 {
    let clamped = strength.clamp(1.0, 10.0) as f32;
    max_radius * (10.0 - clamped) / 9.0
}

impl ViewModel {
    pub(super) fn draw_strength_panel(&mut self, ui: &mut Ui) {
        ui.heading("Identity Map");
        ui.add_space(4.0);

        let side = ui.available_width().clamp(220.0, 380.0);
        let (rect, response) = ui.allocate_exact_size(vec2(side, side), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 6.0, Color32::from_rgb(19, 23, 29));

        let center = rect.center();
        let max_radius = side / 2.0 - 42.0;
        let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(70, 80, 92, 150));

        for level in GRID_LEVELS {
            let radius = strength_radius(level, max_radius);
            dashed_circle(&painter, center, radius, grid_stroke);
            painter.text(
                center - vec2(0.0, radius + 3.0),
                Align2::CENTER_BOTTOM,
                format!("{level:.0}"),
                FontId::proportional(10.0),
                Color32::from_rgb(156, 163, 175),
            );
        }

        for axis in 0..AXIS_COUNT {
            let angle = (axis as f32 / AXIS_COUNT as f32) * TAU;
            let end = center + vec2(angle.cos(), angle.sin()) * max_radius;
            painter.add(egui::Shape::dashed_line(
                &[center, end],
                grid_stroke,
                4.0,
                4.0,
            ));
        }

        let count = self.identity.len();
        if count == 0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No identity entries",
                FontId::proportional(13.0),
                Color32::GRAY,
            );
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let angle_step = TAU / count.max(1) as f32;
        let mut hovered: Option<(usize, Pos2)> = None;
        let mut clicked_label: Option<String> = None;

        let positions = self
            .identity
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let angle = index as f32 * angle_step;
                let radius = strength_radius(entry.strength, max_radius);
                center + vec2(angle.cos(), angle.sin()) * radius
            })
            .collect::<Vec<_>>();

        if let Some(pointer) = pointer
            && rect.contains(pointer)
        {
            hovered = positions
                .iter()
                .enumerate()
                .filter_map(|(index, position)| {
                    let distance = position.distance(pointer);
                    (distance <= POINT_RADIUS + 4.0).then_some((index, distance))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| (index, positions[index]));
        }

        for (index, entry) in self.identity.iter().enumerate() {
            let position = positions[index];
            let color = palette_color(index);
            let is_hovered = hovered.is_some_and(|(hovered_index, _)| hovered_index == index);
            let is_selected = self.selected.as_deref() == Some(entry.label.as_str());
            let radius = if is_hovered {
                POINT_RADIUS + 2.0
            } else {
                POINT_RADIUS
            };

            painter.circle_filled(position, radius + 6.0, color.gamma_multiply(0.2));
            let outline = if is_selected {
                Stroke::new(2.5, Color32::WHITE)
            } else {
                Stroke::new(1.5, Color32::from_rgb(19, 23, 29))
            };
            painter.circle(position, radius, color, outline);
            painter.text(
                position - vec2(0.0, radius + 4.0),
                Align2::CENTER_BOTTOM,
                &entry.label,
                FontId::proportional(11.0),
                Color32::from_rgb(220, 225, 230),
            );

            if is_hovered && response.clicked() {
                clicked_label = Some(entry.label.clone());
            }
        }

        if let Some((index, _)) = hovered {
            let entry = self.identity.iter().nth(index);
            if let (Some(entry), Some(pointer)) = (entry, pointer) {
                let text = format!(
                    "{}\nStrength: {}/10\n{}",
                    entry.label, entry.strength, entry.title
                );
                draw_tooltip(&painter, pointer, &text);
            }
        }

        if response.clicked() {
            self.selected = clicked_label;
        }

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);
        self.draw_entry_details(ui);
    }
}
