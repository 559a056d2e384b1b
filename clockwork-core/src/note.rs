//! Functionality related to the notes placed around the clock face.

use crate::{
    envelope,
    timing::{Beat, GameTimestamp},
    tuning::Tuning,
};

/// Where and when a note appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDefinition {
    /// The beat at which this note should be hit.
    pub beat: Beat,
    /// Distance of the note from the center of the clock face.
    pub distance: f64,
}

/// A note together with its runtime state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// The immutable definition of this note.
    pub definition: NoteDefinition,
    /// The timestamp at which this note should be hit, pre-computed from the tempo.
    pub timestamp: GameTimestamp,
    /// The timestamp at which this note was hit, if it was.
    ///
    /// Once set, this is never changed.
    pub hit_instant: Option<GameTimestamp>,
    /// Current visual size of the note, recomputed every frame.
    pub scale: f64,
}

/// Judgement state of a note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteStatus {
    /// The note can still be hit, or its hit window has not opened yet.
    Pending,
    /// The note has been hit.
    Hit {
        /// The timestamp of the hit.
        at: GameTimestamp,
    },
    /// The hit window has passed without a hit.
    Missed,
}

impl Note {
    /// Creates a not yet hit, invisible note.
    #[inline]
    pub fn new(definition: NoteDefinition, tuning: &Tuning) -> Self {
        Self {
            definition,
            timestamp: tuning.tempo.beat_to_game(definition.beat),
            hit_instant: None,
            scale: 0.,
        }
    }

    /// Returns `true` if the note has been hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit_instant.is_some()
    }

    /// Returns `true` if the note currently has a nonzero size.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.scale > 0.
    }

    /// Returns the judgement state of the note at `now`.
    pub fn status(&self, now: GameTimestamp, tuning: &Tuning) -> NoteStatus {
        match self.hit_instant {
            Some(at) => NoteStatus::Hit { at },
            None if now > self.timestamp + tuning.hit_time => NoteStatus::Missed,
            None => NoteStatus::Pending,
        }
    }

    /// Returns `true` if the note can be hit at `now`, ignoring the hitbox position.
    #[inline]
    pub fn in_hit_window(&self, now: GameTimestamp, tuning: &Tuning) -> bool {
        self.timestamp - tuning.hit_time <= now && now <= self.timestamp + tuning.hit_time
    }

    /// Recomputes the note scale for `now`.
    #[inline]
    pub fn update_scale(&mut self, now: GameTimestamp, tuning: &Tuning) {
        self.scale = envelope::scale(self.timestamp, self.hit_instant, now, tuning);
    }

    /// Returns the note position on the clock face as `(x, y)`.
    ///
    /// The note sits where the arm points at the note timestamp, `distance` away from the center.
    pub fn face_position(&self, tuning: &Tuning) -> (f64, f64) {
        let angle = (tuning.rotation_speed * self.timestamp.as_secs()).to_radians();
        let (sin, cos) = angle.sin_cos();
        (self.definition.distance * sin, self.definition.distance * cos)
    }
}
