use eframe::egui::{self, Align, Context, Layout, RichText, Ui};

use crate::util::format_timestamp;

use super::{ViewModel, json_tree};

impl ViewModel {
    pub(super) fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_loading: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| self.draw_top_bar(ui, reload_requested, is_loading));
            });

        if self.session.is_empty() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("No records found");
                    ui.label("The record table is empty; nothing to visualize.");
                });
            });
            return;
        }

        egui::SidePanel::left("document")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_document(ui));

        egui::SidePanel::right("strength_map")
            .resizable(true)
            .default_width(400.0)
            .show(ctx, |ui| self.draw_strength_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn draw_top_bar(&mut self, ui: &mut Ui, reload_requested: &mut bool, is_loading: bool) {
        ui.heading("selfmap-viewer");
        ui.separator();

        if let Some(record) = self.session.current() {
            ui.label(format!("Record {}", record.id));
            if let Some(created_at) = &record.created_at {
                ui.label(format!("created {}", format_timestamp(created_at)));
            }
        }

        ui.separator();
        let mut moved = false;
        if ui.button("<").clicked() {
            moved |= self.session.previous();
        }
        ui.label(format!(
            "{} of {}",
            (self.session.cursor() + 1).min(self.session.len()),
            self.session.len()
        ));
        if ui.button(">").clicked() {
            moved |= self.session.next();
        }

        ui.separator();
        ui.label("Search in JSON:");
        let search_response = ui.text_edit_singleline(&mut self.search);
        if search_response.changed() {
            moved |= self.session.search_first_match(&self.search);
        }

        if moved {
            self.refresh_derived();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload records"));
            if reload_button.clicked() {
                *reload_requested = true;
            }
            if is_loading {
                ui.spinner();
            }
        });
    }

    fn draw_document(&mut self, ui: &mut Ui) {
        ui.heading("JSON Data");
        ui.add_space(4.0);

        let Some(record) = self.session.current() else {
            ui.label("No record selected.");
            return;
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                json_tree::show_document(ui, &record.json_content);
            });
    }

    pub(super) fn draw_entry_details(&self, ui: &mut Ui) {
        let Some(entry) = self
            .selected
            .as_deref()
            .and_then(|label| self.identity.get(label))
        else {
            ui.label("Click a point or graph node to see details.");
            return;
        };

        ui.label(RichText::new(&entry.label).strong());
        ui.add_space(2.0);
        ui.label(format!("Strength: {}/10", entry.strength));
        ui.label(format!("Title: {}", entry.title));
        ui.label(format!("Beliefs: {}", entry.beliefs));
        ui.label(format!("Style: {}", entry.style));
    }
}
