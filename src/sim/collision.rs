//! Pairwise bubble repulsion
//!
//! Overlapping bubbles are not moved directly. Each pair adds a lateral
//! push to both bubbles' repulsion offsets, which the next tick's sway
//! applies, so the result does not depend on pair iteration order.

use rand::Rng;
use rand_pcg::Pcg32;

use super::bubble::Bubble;

/// Result of checking one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Half the penetration depth, applied to each bubble
    pub push: f32,
    /// +1 pushes the first bubble right and the second left, -1 the reverse
    pub direction: f32,
}

/// Check two bubbles for overlap
///
/// Coincident centers never push. Vertically stacked centers have no
/// horizontal direction, so a coin flip picks one.
pub fn check_overlap(a: &Bubble, b: &Bubble, rng: &mut Pcg32) -> Option<Overlap> {
    let delta = a.center() - b.center();
    let distance = delta.length();
    let min_distance = (a.size + b.size) / 2.0;

    if distance >= min_distance || distance <= 0.0 {
        return None;
    }

    let direction = if delta.x != 0.0 {
        delta.x.signum()
    } else if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    };

    Some(Overlap {
        push: (min_distance - distance) / 2.0,
        direction,
    })
}

/// Accumulate repulsion for every unordered pair of live bubbles
pub fn apply_repulsion(bubbles: &mut [Bubble], rng: &mut Pcg32) {
    for i in 0..bubbles.len() {
        if bubbles[i].popped {
            continue;
        }
        for j in (i + 1)..bubbles.len() {
            if bubbles[j].popped {
                continue;
            }
            if let Some(overlap) = check_overlap(&bubbles[i], &bubbles[j], rng) {
                let shift = overlap.push * overlap.direction;
                bubbles[i].repulsion += shift;
                bubbles[j].repulsion -= shift;
            }
        }
    }
}

/// Exponentially decay every live bubble's repulsion offset
pub fn damp_repulsion(bubbles: &mut [Bubble], damping: f32) {
    for bubble in bubbles.iter_mut().filter(|b| !b.popped) {
        bubble.repulsion *= damping;
    }
}
