//! Gameplay constants.
use core::fmt;

use crate::timing::{GameTimestampDifference, Tempo};

/// All fixed gameplay constants of a session.
///
/// Durations are in seconds of game time. Distances and depths are in scene units: note distances
/// are radii on the clock face and the hitbox depth runs from `hitbox_outward_bound` (the rim)
/// to `hitbox_inward_bound` (the hub).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Tempo of the song, converting note beats into timestamps.
    pub tempo: Tempo,
    /// Size of a fully visible note.
    pub note_scale: f64,
    /// How long a note takes to grow from nothing to full size.
    pub fade_in_time: GameTimestampDifference,
    /// How long a note stays at full size on either side of its timestamp.
    pub hold_time: GameTimestampDifference,
    /// How long an unhit note takes to shrink away after the hold.
    pub fade_out_time: GameTimestampDifference,
    /// How long a hit note takes to shrink away after the hit.
    pub hit_out_time: GameTimestampDifference,
    /// Largest timestamp difference that will be considered a hit.
    pub hit_time: GameTimestampDifference,
    /// Largest distance between a note and the hitbox that will be considered a hit.
    pub max_note_to_hitbox_distance: f64,
    /// Note distance corresponding to the hitbox at its outward bound.
    pub note_outward_bound: f64,
    /// Smallest (outermost) hitbox depth.
    pub hitbox_outward_bound: f64,
    /// Largest (innermost) hitbox depth.
    pub hitbox_inward_bound: f64,
    /// Hitbox movement speed, in depth units per second.
    pub hitbox_speed: f64,
    /// Rotation speed of the arm and the gear, in degrees per second.
    pub rotation_speed: f64,
}

/// An error returned from [`Tuning::validate()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuningError {
    /// The tempo is not a positive finite number of seconds per beat.
    InvalidTempo(f64),
    /// A duration or speed which must be positive is not.
    NotPositive(&'static str, f64),
    /// The hit window is longer than the hold, so a note could be hit while still fading in.
    HitWindowExceedsHold,
    /// The hitbox outward bound is not below the inward bound.
    InvalidHitboxBounds {
        /// The outward bound.
        outward: f64,
        /// The inward bound.
        inward: f64,
    },
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tempo: Tempo::from_bpm(130.),
            note_scale: 0.07,
            fade_in_time: GameTimestampDifference::from_secs(2.),
            hold_time: GameTimestampDifference::from_secs(1.),
            fade_out_time: GameTimestampDifference::from_secs(1.),
            hit_out_time: GameTimestampDifference::from_secs(0.3),
            hit_time: GameTimestampDifference::from_secs(0.2),
            max_note_to_hitbox_distance: 0.1,
            note_outward_bound: 0.84,
            hitbox_outward_bound: -1.85,
            hitbox_inward_bound: -0.4,
            hitbox_speed: 1.5,
            rotation_speed: 50.,
        }
    }
}

impl Tuning {
    /// Checks that the constants describe a playable game.
    pub fn validate(&self) -> Result<(), TuningError> {
        let spb = self.tempo.seconds_per_beat;
        if !(spb.is_finite() && spb > 0.) {
            return Err(TuningError::InvalidTempo(spb));
        }

        for (name, value) in [
            ("note_scale", self.note_scale),
            ("fade_in_time", self.fade_in_time.as_secs()),
            ("hold_time", self.hold_time.as_secs()),
            ("fade_out_time", self.fade_out_time.as_secs()),
            ("hit_out_time", self.hit_out_time.as_secs()),
            ("note_outward_bound", self.note_outward_bound),
            ("hitbox_speed", self.hitbox_speed),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(TuningError::NotPositive(name, value));
            }
        }

        for (name, value) in [
            ("hit_time", self.hit_time.as_secs()),
            ("max_note_to_hitbox_distance", self.max_note_to_hitbox_distance),
            ("rotation_speed", self.rotation_speed),
        ] {
            if !(value.is_finite() && value >= 0.) {
                return Err(TuningError::NotPositive(name, value));
            }
        }

        if self.hit_time > self.hold_time {
            return Err(TuningError::HitWindowExceedsHold);
        }

        // The ratio between note distances and hitbox depths divides by the outward bound.
        let (outward, inward) = (self.hitbox_outward_bound, self.hitbox_inward_bound);
        if !(outward.is_finite() && inward.is_finite() && outward < inward && outward != 0.) {
            return Err(TuningError::InvalidHitboxBounds { outward, inward });
        }

        Ok(())
    }

    /// Returns the factor converting a hitbox depth into note distance units.
    #[inline]
    pub fn note_to_hitbox_ratio(&self) -> f64 {
        -self.note_outward_bound / self.hitbox_outward_bound
    }
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTempo(spb) => write!(f, "invalid tempo: {spb} seconds per beat"),
            Self::NotPositive(name, value) => write!(f, "{name} must be positive, got {value}"),
            Self::HitWindowExceedsHold => f.write_str("hit window is longer than the hold time"),
            Self::InvalidHitboxBounds { outward, inward } => write!(
                f,
                "invalid hitbox bounds: outward {outward} must be nonzero and below inward {inward}"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn default_ratio_maps_outward_bound_to_note_outward_bound() {
        let tuning = Tuning::default();
        let distance = -tuning.hitbox_outward_bound * tuning.note_to_hitbox_ratio();
        assert!((distance - tuning.note_outward_bound).abs() < 1e-12);
    }

    #[test]
    fn zero_tempo_is_rejected() {
        let tuning = Tuning {
            tempo: Tempo {
                seconds_per_beat: 0.,
            },
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::InvalidTempo(0.)));
    }

    #[test]
    fn zero_fade_in_is_rejected() {
        let tuning = Tuning {
            fade_in_time: GameTimestampDifference::from_secs(0.),
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotPositive("fade_in_time", 0.))
        );
    }

    #[test]
    fn hit_window_longer_than_hold_is_rejected() {
        let tuning = Tuning {
            hit_time: GameTimestampDifference::from_secs(1.5),
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::HitWindowExceedsHold));
    }

    #[test]
    fn swapped_hitbox_bounds_are_rejected() {
        let tuning = Tuning {
            hitbox_outward_bound: -0.4,
            hitbox_inward_bound: -1.85,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::InvalidHitboxBounds {
                outward: -0.4,
                inward: -1.85
            })
        );
    }
}
