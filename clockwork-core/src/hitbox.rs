//! The player-controlled hitbox.
use core::time::Duration;

use crate::tuning::Tuning;

/// Hitbox position along the arm.
///
/// The depth is always within `hitbox_outward_bound..=hitbox_inward_bound`. Depth grows towards
/// the hub of the clock face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    depth: f64,
}

/// Direction the player is moving the hitbox in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Movement {
    /// Towards the hub.
    Inward,
    /// Towards the rim.
    Outward,
}

impl Movement {
    /// Returns the movement resulting from the two direction buttons.
    ///
    /// Holding both or neither of them doesn't move the hitbox.
    #[inline]
    pub fn from_buttons(inward: bool, outward: bool) -> Option<Self> {
        match (inward, outward) {
            (true, false) => Some(Self::Inward),
            (false, true) => Some(Self::Outward),
            _ => None,
        }
    }
}

impl Hitbox {
    /// Creates a hitbox at the outward bound.
    #[inline]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            depth: tuning.hitbox_outward_bound,
        }
    }

    /// Creates a hitbox at `depth`, clamped to the bounds.
    ///
    /// With inverted bounds the inward bound wins.
    #[inline]
    pub fn at_depth(depth: f64, tuning: &Tuning) -> Self {
        Self {
            depth: depth
                .max(tuning.hitbox_outward_bound)
                .min(tuning.hitbox_inward_bound),
        }
    }

    /// Returns the current depth.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Moves the hitbox for `elapsed` time.
    pub fn update(&mut self, movement: Option<Movement>, elapsed: Duration, tuning: &Tuning) {
        let step = tuning.hitbox_speed * elapsed.as_secs_f64();
        match movement {
            Some(Movement::Inward) => {
                self.depth = (self.depth + step).min(tuning.hitbox_inward_bound);
            }
            Some(Movement::Outward) => {
                self.depth = (self.depth - step).max(tuning.hitbox_outward_bound);
            }
            None => (),
        }
    }

    /// Returns the depth converted into note distance units.
    #[inline]
    pub fn note_distance(&self, tuning: &Tuning) -> f64 {
        -self.depth * tuning.note_to_hitbox_ratio()
    }

    /// Returns the signed difference between a note distance and the hitbox, in note distance
    /// units.
    #[inline]
    pub fn position_difference(&self, distance: f64, tuning: &Tuning) -> f64 {
        distance + self.depth * tuning.note_to_hitbox_ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_outward_bound() {
        let tuning = Tuning::default();
        assert_eq!(Hitbox::new(&tuning).depth(), tuning.hitbox_outward_bound);
    }

    #[test]
    fn inward_clamps_to_inward_bound() {
        let tuning = Tuning::default();
        let mut hitbox = Hitbox::new(&tuning);
        hitbox.update(
            Some(Movement::Inward),
            Duration::from_secs(60),
            &tuning,
        );
        assert_eq!(hitbox.depth(), tuning.hitbox_inward_bound);
    }

    #[test]
    fn moves_at_hitbox_speed() {
        let tuning = Tuning::default();
        let mut hitbox = Hitbox::new(&tuning);
        hitbox.update(
            Some(Movement::Inward),
            Duration::from_millis(500),
            &tuning,
        );
        let expected = tuning.hitbox_outward_bound + tuning.hitbox_speed * 0.5;
        assert!((hitbox.depth() - expected).abs() < 1e-12);

        hitbox.update(
            Some(Movement::Outward),
            Duration::from_millis(500),
            &tuning,
        );
        assert!((hitbox.depth() - tuning.hitbox_outward_bound).abs() < 1e-12);
    }

    #[test]
    fn both_or_neither_buttons_dont_move() {
        assert_eq!(Movement::from_buttons(true, true), None);
        assert_eq!(Movement::from_buttons(false, false), None);
        assert_eq!(
            Movement::from_buttons(true, false),
            Some(Movement::Inward)
        );
        assert_eq!(
            Movement::from_buttons(false, true),
            Some(Movement::Outward)
        );
    }

    #[test]
    fn position_difference_is_zero_at_matching_depth() {
        let tuning = Tuning::default();
        let hitbox = Hitbox::at_depth(-1.1, &tuning);
        let distance = hitbox.note_distance(&tuning);
        assert!(hitbox.position_difference(distance, &tuning).abs() < 1e-12);
    }

    #[test]
    fn at_depth_with_inverted_bounds() {
        let tuning = Tuning {
            hitbox_outward_bound: -0.4,
            hitbox_inward_bound: -1.85,
            ..Tuning::default()
        };
        assert_eq!(Hitbox::at_depth(-1., &tuning).depth(), -1.85);
        assert_eq!(Hitbox::at_depth(f64::NAN, &tuning).depth(), -1.85);
    }

    proptest! {
        #[test]
        fn depth_stays_within_bounds(
            steps in prop::collection::vec(
                (any::<bool>(), any::<bool>(), 0u64..100_000_000_000),
                0..50,
            ),
        ) {
            let tuning = Tuning::default();
            let mut hitbox = Hitbox::new(&tuning);
            for (inward, outward, nanos) in steps {
                hitbox.update(
                    Movement::from_buttons(inward, outward),
                    Duration::from_nanos(nanos),
                    &tuning,
                );
                prop_assert!(hitbox.depth() >= tuning.hitbox_outward_bound);
                prop_assert!(hitbox.depth() <= tuning.hitbox_inward_bound);
            }
        }
    }
}
