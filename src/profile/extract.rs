use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::fallback::synthetic_dataset;

static RATING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("literal pattern"));

/// Below this many real entries the extraction result is discarded and the
/// synthetic dataset is returned instead, so renderers always have points.
const MIN_REAL_ENTRIES: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct IdentityEntry {
    pub label: String,
    pub strength: f64,
    pub title: String,
    pub beliefs: String,
    pub style: String,
}

/// Insertion-ordered collection of identity entries keyed by label.
/// Re-inserting an existing label overwrites the entry in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityMap {
    entries: Vec<IdentityEntry>,
}

impl IdentityMap {
    pub fn insert(&mut self, entry: IdentityEntry) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|existing| existing.label == entry.label)
        {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn get(&self, label: &str) -> Option<&IdentityEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdentityEntry> {
        self.entries.iter()
    }
}

/// Walks an arbitrary profile document and produces a flat identity map.
///
/// When the document has a top-level `Self` key, only that subtree is
/// traversed. Only nested objects are treated as containers or entry
/// sources; arrays and primitives are skipped. A node at key `K` under
/// immediate parent key `P` is labelled `K` or `"P - K"`.
pub fn extract(document: &Value) -> IdentityMap {
    let root = document.get("Self").unwrap_or(document);

    let mut found = IdentityMap::default();
    if let Value::Object(fields) = root {
        walk(fields, "", &mut found);
    }

    if found.len() < MIN_REAL_ENTRIES {
        return synthetic_dataset();
    }
    found
}

fn walk(fields: &Map<String, Value>, parent: &str, found: &mut IdentityMap) {
    for (key, value) in fields {
        let Value::Object(child) = value else {
            continue;
        };

        let label = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent} - {key}")
        };

        if let Some(strength) = detect_strength(child) {
            found.insert(IdentityEntry {
                title: text_field(child, "Title", "title")
                    .unwrap_or_else(|| format!("{label} Specialist")),
                beliefs: text_field(child, "Beliefs", "beliefs")
                    .unwrap_or_else(|| format!("Core beliefs about {label}")),
                style: text_field(child, "Style", "style")
                    .unwrap_or_else(|| format!("Approach to {label}")),
                label,
                strength,
            });
        }

        // A node and its descendants can both contribute entries.
        walk(child, key, found);
    }
}

/// Strength precedence: `Rating` (string with embedded digits), then
/// `Strength`, then `strength`. First usable field wins; unusable values
/// fall through to the next candidate.
fn detect_strength(fields: &Map<String, Value>) -> Option<f64> {
    if let Some(Value::String(rating)) = fields.get("Rating")
        && let Some(digits) = RATING_DIGITS.find(rating)
    {
        // An all-digit run can only fail to parse by overflow; cap it
        // rather than falling through to the other fields.
        let parsed = digits.as_str().parse::<i64>().unwrap_or(i64::MAX);
        return Some(parsed as f64);
    }

    if let Some(strength) = fields.get("Strength").and_then(Value::as_f64) {
        return Some(strength);
    }

    fields.get("strength").and_then(Value::as_f64)
}

fn text_field(fields: &Map<String, Value>, upper: &str, lower: &str) -> Option<String> {
    fields
        .get(upper)
        .or_else(|| fields.get(lower))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn labels(map: &IdentityMap) -> Vec<&str> {
        map.iter().map(|entry| entry.label.as_str()).collect()
    }

    #[test]
    fn sparse_document_falls_back_to_synthetic_dataset() {
        let document = json!({
            "Work": { "Rating": "8/10" },
            "Notes": "free text"
        });

        let map = extract(&document);
        assert_eq!(map, synthetic_dataset());
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn extracts_entries_in_first_seen_order_with_composite_labels() {
        let document = json!({
            "Self": {
                "Work": {
                    "Rating": "8/10",
                    "Engineering": { "strength": 7 }
                },
                "Values": { "Strength": 9 }
            }
        });

        let map = extract(&document);
        assert_eq!(labels(&map), ["Work", "Work - Engineering", "Values"]);
        assert_eq!(map.get("Work").map(|entry| entry.strength), Some(8.0));
        assert_eq!(
            map.get("Work - Engineering").map(|entry| entry.strength),
            Some(7.0)
        );
    }

    #[test]
    fn rating_takes_first_run_of_digits() {
        let document = json!({
            "A": { "Rating": "7/10" },
            "B": { "Rating": "scored 42 points" },
            "C": { "strength": 3 }
        });

        let map = extract(&document);
        assert_eq!(map.get("A").map(|entry| entry.strength), Some(7.0));
        assert_eq!(map.get("B").map(|entry| entry.strength), Some(42.0));
    }

    #[test]
    fn digit_free_rating_falls_through_to_strength_fields() {
        let document = json!({
            "A": { "Rating": "no number here", "Strength": 5 },
            "B": { "Rating": 9, "strength": 2 },
            "C": { "Rating": "no number here" },
            "D": { "strength": 4 }
        });

        let map = extract(&document);
        assert_eq!(map.get("A").map(|entry| entry.strength), Some(5.0));
        assert_eq!(map.get("B").map(|entry| entry.strength), Some(2.0));
        assert!(map.get("C").is_none());
    }

    #[test]
    fn oversized_rating_digit_runs_saturate() {
        let document = json!({
            "A": { "Rating": "99999999999999999999/100", "Strength": 2 },
            "B": { "strength": 3 },
            "C": { "strength": 4 }
        });

        let map = extract(&document);
        assert_eq!(
            map.get("A").map(|entry| entry.strength),
            Some(i64::MAX as f64)
        );
    }

    #[test]
    fn rating_wins_over_both_strength_fields() {
        let document = json!({
            "A": { "Rating": "4/10", "Strength": 9, "strength": 2 },
            "B": { "Strength": 6, "strength": 1 },
            "C": { "strength": 3 }
        });

        let map = extract(&document);
        assert_eq!(map.get("A").map(|entry| entry.strength), Some(4.0));
        assert_eq!(map.get("B").map(|entry| entry.strength), Some(6.0));
    }

    #[test]
    fn missing_text_fields_get_templated_defaults() {
        let document = json!({
            "Craft": { "strength": 8, "Title": "Builder" },
            "Focus": { "strength": 6 },
            "Drive": { "strength": 7 }
        });

        let map = extract(&document);
        let craft = map.get("Craft").unwrap();
        assert_eq!(craft.title, "Builder");
        assert_eq!(craft.beliefs, "Core beliefs about Craft");
        assert_eq!(craft.style, "Approach to Craft");

        let focus = map.get("Focus").unwrap();
        assert_eq!(focus.title, "Focus Specialist");
    }

    #[test]
    fn arrays_and_primitives_are_not_traversed() {
        let document = json!({
            "List": [ { "strength": 9 }, { "strength": 8 } ],
            "A": { "strength": 1 },
            "B": { "strength": 2 },
            "C": { "strength": 3 }
        });

        let map = extract(&document);
        assert_eq!(labels(&map), ["A", "B", "C"]);
    }

    #[test]
    fn duplicate_labels_overwrite_in_place() {
        let mut map = IdentityMap::default();
        for (label, strength) in [("X", 1.0), ("Y", 2.0), ("X", 5.0)] {
            map.insert(IdentityEntry {
                label: label.to_owned(),
                strength,
                title: String::new(),
                beliefs: String::new(),
                style: String::new(),
            });
        }

        assert_eq!(labels(&map), ["X", "Y"]);
        assert_eq!(map.get("X").map(|entry| entry.strength), Some(5.0));
    }
}
