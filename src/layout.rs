use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

const ITERATIONS: usize = 160;
const REPULSION: f32 = 150.0;
const SPRING: f32 = 0.12;
const COOLING: f32 = 0.94;

/// Ideal edge length interpolates between these two as the link weight goes
/// from 1.0 down to 0.0, so stronger links sit closer to the root.
const EDGE_NEAR: f32 = 140.0;
const EDGE_FAR: f32 = 300.0;

/// One-shot force-directed layout for a small star-shaped graph. Node 0 is
/// treated as the root and pinned at the origin; the rest start on a ring
/// with id-stable jitter and relax under repulsion plus weighted springs.
/// Deterministic for a given node list, so recomputing a document's layout
/// yields the same picture.
pub fn star_layout(node_ids: &[String], links: &[(usize, usize, f32)]) -> Vec<Vec2> {
    let n = node_ids.len();
    if n == 0 {
        return Vec::new();
    }

    let ring = 180.0 + (n as f32).sqrt() * 36.0;
    let spokes = n.saturating_sub(1).max(1) as f32;
    let mut positions = node_ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            if index == 0 {
                return Vec2::ZERO;
            }
            let angle = ((index - 1) as f32 / spokes) * TAU;
            let (jx, jy) = stable_pair(id);
            vec2(angle.cos(), angle.sin()) * ring + vec2(jx, jy) * 22.0
        })
        .collect::<Vec<_>>();

    if n == 1 {
        return positions;
    }

    let mut temperature = ring * 0.5;

    for _ in 0..ITERATIONS {
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let distance = delta.length().max(1.0);
                let push = (REPULSION * REPULSION) / distance;
                let direction = delta / distance;
                disp[i] += direction * push * 0.05;
                disp[j] -= direction * push * 0.05;
            }
        }

        for &(from, to, weight) in links {
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(1.0);
            let direction = delta / distance;
            let ideal = EDGE_FAR - (EDGE_FAR - EDGE_NEAR) * weight.clamp(0.0, 1.0);
            let pull = (distance - ideal) * SPRING;

            disp[from] -= direction * pull;
            disp[to] += direction * pull;
        }

        for (index, position) in positions.iter_mut().enumerate() {
            if index == 0 {
                continue;
            }
            let d = disp[index];
            let length = d.length();
            if length > 0.0 {
                *position += d / length * length.min(temperature);
            }
        }

        temperature *= COOLING;
        if temperature < 0.5 {
            break;
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(labels: &[&str]) -> (Vec<String>, Vec<(usize, usize, f32)>) {
        let mut ids = vec!["root".to_owned()];
        ids.extend(labels.iter().map(|label| format!("node_{label}")));
        let links = (1..ids.len()).map(|index| (0, index, 0.7)).collect();
        (ids, links)
    }

    #[test]
    fn root_stays_pinned_and_every_node_gets_a_position() {
        let (ids, links) = star(&["A", "B", "C", "D"]);
        let positions = star_layout(&ids, &links);

        assert_eq!(positions.len(), ids.len());
        assert_eq!(positions[0], Vec2::ZERO);
        for position in &positions[1..] {
            assert!(position.length() > 1.0);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let (ids, links) = star(&["A", "B", "C"]);
        assert_eq!(star_layout(&ids, &links), star_layout(&ids, &links));
    }

    #[test]
    fn empty_and_singleton_graphs_are_handled() {
        assert!(star_layout(&[], &[]).is_empty());
        let positions = star_layout(&["root".to_owned()], &[]);
        assert_eq!(positions, vec![Vec2::ZERO]);
    }
}
