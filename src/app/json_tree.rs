use eframe::egui::{self, RichText, Ui};
use serde_json::{Map, Value};

/// Collapsible tree rendering of one profile document. Objects become
/// collapsing headers, scalar-only arrays render inline, and everything
/// else falls back to `key: value` rows.
pub(super) fn show_document(ui: &mut Ui, document: &Value) {
    match document {
        Value::Object(fields) => show_fields(ui, fields, 0),
        other => {
            ui.monospace(scalar_text(other));
        }
    }
}

fn show_fields(ui: &mut Ui, fields: &Map<String, Value>, depth: usize) {
    for (key, value) in fields {
        show_entry(ui, key, value, depth);
    }
}

fn show_entry(ui: &mut Ui, key: &str, value: &Value, depth: usize) {
    match value {
        Value::Object(fields) => {
            egui::CollapsingHeader::new(RichText::new(key).strong())
                .id_salt((depth, key))
                .default_open(depth == 0)
                .show(ui, |ui| show_fields(ui, fields, depth + 1));
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(", ");
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("{key}:")).strong());
                ui.monospace(format!("[{joined}]"));
            });
        }
        Value::Array(items) => {
            let header = format!("{key} ({} items)", items.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt((depth, key, "array"))
                .show(ui, |ui| {
                    for (index, item) in items.iter().enumerate() {
                        show_entry(ui, &index.to_string(), item, depth + 1);
                    }
                });
        }
        scalar => {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("{key}:")).strong());
                ui.monospace(scalar_text(scalar));
            });
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !value.is_object() && !value.is_array()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
