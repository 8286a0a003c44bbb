use std::collections::{HashMap, HashSet};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::profile::NodeGroup;

use super::ViewModel;
use super::render_utils::{draw_background, draw_tooltip, screen_to_world, world_to_screen};

const ROOT_COLOR: Color32 = Color32::from_rgb(248, 113, 113);
const CATEGORY_COLOR: Color32 = Color32::from_rgb(52, 211, 153);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn node_radius(group: NodeGroup, value: f64) -> f32 {
    match group {
        NodeGroup::Root => 26.0,
        NodeGroup::Category => 8.0 + (value.clamp(0.0, 10.0) as f32) * 1.4,
    }
}

impl ViewModel {
    pub(super) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        if self.graph_data.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No graph data for this record",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
            return;
        }

        let screen_positions = self
            .node_positions
            .iter()
            .map(|world| world_to_screen(rect, self.pan, self.zoom, *world))
            .collect::<Vec<_>>();
        let screen_radii = self
            .graph_data
            .nodes
            .iter()
            .map(|node| {
                (node_radius(node.group, node.value) * self.zoom.powf(0.4)).clamp(3.0, 46.0)
            })
            .collect::<Vec<_>>();

        let index_by_id = self
            .graph_data
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), index))
            .collect::<HashMap<_, _>>();

        for link in &self.graph_data.links {
            let (Some(&from), Some(&to)) = (
                index_by_id.get(link.source.as_str()),
                index_by_id.get(link.target.as_str()),
            ) else {
                continue;
            };

            let alpha = 60 + (link.value.clamp(0.0, 1.0) * 140.0) as u8;
            painter.line_segment(
                [screen_positions[from], screen_positions[to]],
                Stroke::new(
                    1.0 + link.value as f32 * 2.0,
                    Color32::from_rgba_unmultiplied(148, 163, 184, alpha),
                ),
            );
        }

        let highlighted = self.highlighted_nodes();
        let hovered = hovered_index(ui, &screen_positions, &screen_radii);

        for (index, node) in self.graph_data.nodes.iter().enumerate() {
            let center = screen_positions[index];
            let mut radius = screen_radii[index];
            let mut fill = match node.group {
                NodeGroup::Root => ROOT_COLOR,
                NodeGroup::Category => CATEGORY_COLOR,
            };

            let dimmed = highlighted
                .as_ref()
                .is_some_and(|matches| !matches.contains(&index));
            if dimmed {
                fill = fill.gamma_multiply(0.3);
            }
            let is_selected = self.selected.as_deref() == Some(node.name.as_str())
                && node.group == NodeGroup::Category;
            if hovered == Some(index) {
                radius += 2.5;
            }

            painter.circle_filled(center, radius + 5.0, fill.gamma_multiply(0.18));
            let outline = if is_selected {
                Stroke::new(2.5, Color32::WHITE)
            } else {
                Stroke::new(1.2, Color32::from_rgb(19, 23, 29))
            };
            painter.circle(center, radius, fill, outline);

            let label_color = if dimmed {
                Color32::from_rgba_unmultiplied(220, 225, 230, 90)
            } else {
                Color32::from_rgb(220, 225, 230)
            };
            painter.text(
                center - egui::vec2(0.0, radius + 4.0),
                Align2::CENTER_BOTTOM,
                &node.name,
                FontId::proportional(12.0),
                label_color,
            );
        }

        if let Some(index) = hovered {
            let node = &self.graph_data.nodes[index];
            let text = match node.group {
                NodeGroup::Root => node.name.clone(),
                NodeGroup::Category => format!("{}\nStrength: {}/10", node.name, node.value),
            };
            if let Some(pointer) = ui.input(|input| input.pointer.hover_pos()) {
                draw_tooltip(&painter, pointer, &text);
            }
        }

        if response.clicked() {
            self.selected = hovered.and_then(|index| {
                let node = &self.graph_data.nodes[index];
                (node.group == NodeGroup::Category).then(|| node.name.clone())
            });
        }
    }

    /// Fuzzy-highlights nodes matching the search box without changing the
    /// rendered graph; the record search itself is exact-substring and
    /// handled by the session.
    fn highlighted_nodes(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.graph_data
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    fuzzy_match_score(&matcher, &node.name, query).map(|_| index)
                })
                .collect(),
        )
    }

    fn handle_graph_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 5.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }
}

fn hovered_index(ui: &Ui, screen_positions: &[Pos2], screen_radii: &[f32]) -> Option<usize> {
    let pointer = ui.input(|input| input.pointer.hover_pos())?;
    (0..screen_positions.len())
        .filter_map(|index| {
            let distance = screen_positions[index].distance(pointer);
            (distance <= screen_radii[index] + 2.0).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
