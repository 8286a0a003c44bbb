use super::extract::{IdentityEntry, IdentityMap};

/// Fixed dataset substituted whenever extraction yields fewer than three
/// entries, so the visualizations always have points to plot.
const SYNTHETIC_ROWS: [(&str, f64, &str, &str, &str); 8] = [
    (
        "Technical Skills",
        9.0,
        "Tech Lead",
        "Technology drives innovation",
        "Analytical approach",
    ),
    (
        "Leadership",
        8.0,
        "Team Leader",
        "Empowering others",
        "Collaborative leadership",
    ),
    (
        "Creativity",
        7.0,
        "Innovation Driver",
        "Creative solutions matter",
        "Design thinking",
    ),
    (
        "Communication",
        6.0,
        "Communicator",
        "Clear communication is key",
        "Direct and open",
    ),
    (
        "Problem Solving",
        9.0,
        "Solution Architect",
        "Every problem has a solution",
        "Systematic approach",
    ),
    (
        "Adaptability",
        7.0,
        "Change Agent",
        "Flexibility is strength",
        "Agile mindset",
    ),
    (
        "Emotional Intelligence",
        8.0,
        "People Person",
        "Emotions matter",
        "Empathetic approach",
    ),
    (
        "Strategic Thinking",
        9.0,
        "Strategist",
        "Long-term vision",
        "Big picture focus",
    ),
];

pub fn synthetic_dataset() -> IdentityMap {
    let mut map = IdentityMap::default();
    for (label, strength, title, beliefs, style) in SYNTHETIC_ROWS {
        map.insert(IdentityEntry {
            label: label.to_owned(),
            strength,
            title: title.to_owned(),
            beliefs: beliefs.to_owned(),
            style: style.to_owned(),
        });
    }
    map
}
