//! The note schedule of a song.
use core::fmt;

#[cfg(test)]
use proptest::prelude::*;

use crate::{note::NoteDefinition, timing::Beat};

/// An ordered list of notes.
///
/// Invariant: beats are finite and sorted in ascending order, distances are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    notes: Vec<NoteDefinition>,
}

/// An error returned from [`Schedule::new()`] and [`Schedule::from_parallel()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleError {
    /// The beat and distance lists have different lengths.
    LengthMismatch {
        /// Number of beats.
        beats: usize,
        /// Number of distances.
        distances: usize,
    },
    /// The note at this index has a non-finite beat or distance.
    NotFinite(usize),
    /// The note at this index comes before the previous one.
    Unsorted(usize),
}

const fn note(beat: f64, distance: f64) -> NoteDefinition {
    NoteDefinition {
        beat: Beat(beat),
        distance,
    }
}

/// The song shipped with the game, meant to be played at 130 BPM.
const BUILTIN: [NoteDefinition; 60] = [
    note(6., 0.7),
    note(12., 0.3),
    note(14., 0.4),
    note(15., 0.5),
    note(17., 0.8),
    note(18., 0.7),
    note(20., 0.5),
    note(21., 0.5),
    note(24., 0.8),
    note(26., 0.7),
    note(27., 0.6),
    note(28., 0.5),
    note(29., 0.3),
    note(30., 0.4),
    note(33., 0.7),
    note(36., 0.3),
    note(38., 0.4),
    note(39., 0.5),
    note(41., 0.6),
    note(42., 0.7),
    note(44., 0.8),
    note(45., 0.7),
    note(48., 0.6),
    note(50., 0.5),
    note(51., 0.5),
    note(52., 0.4),
    note(54., 0.3),
    note(55., 0.4),
    note(58., 0.5),
    note(59., 0.5),
    note(60., 0.6),
    note(63., 0.7),
    note(65., 0.5),
    note(66., 0.5),
    note(69., 0.6),
    note(72., 0.7),
    note(75., 0.8),
    note(76., 0.8),
    note(77., 0.7),
    note(78., 0.6),
    note(81., 0.5),
    note(84., 0.6),
    note(87., 0.8),
    note(90., 0.4),
    note(92., 0.5),
    note(93., 0.6),
    note(95., 0.3),
    note(96., 0.4),
    note(99., 0.6),
    note(101., 0.6),
    note(102., 0.7),
    note(105., 0.5),
    note(107., 0.4),
    note(108., 0.5),
    note(109., 0.5),
    note(110., 0.5),
    note(111., 0.7),
    note(112., 0.7),
    note(113., 0.7),
    note(114., 0.6),
];

impl Schedule {
    /// Creates a `Schedule` from note definitions, checking the invariants.
    pub fn new(notes: Vec<NoteDefinition>) -> Result<Self, ScheduleError> {
        for (i, note) in notes.iter().enumerate() {
            if !(note.beat.0.is_finite() && note.distance.is_finite()) {
                return Err(ScheduleError::NotFinite(i));
            }
        }

        if let Some(i) = notes.windows(2).position(|w| w[1].beat < w[0].beat) {
            return Err(ScheduleError::Unsorted(i + 1));
        }

        Ok(Self { notes })
    }

    /// Creates a `Schedule` from a list of beats and a list of distances of the same length.
    pub fn from_parallel(beats: &[f64], distances: &[f64]) -> Result<Self, ScheduleError> {
        if beats.len() != distances.len() {
            return Err(ScheduleError::LengthMismatch {
                beats: beats.len(),
                distances: distances.len(),
            });
        }

        let notes = beats
            .iter()
            .zip(distances)
            .map(|(&beat, &distance)| note(beat, distance))
            .collect();
        Self::new(notes)
    }

    /// Returns the song shipped with the game.
    #[inline]
    pub fn builtin() -> Self {
        Self {
            notes: BUILTIN.to_vec(),
        }
    }

    /// Returns the notes in ascending beat order.
    #[inline]
    pub fn notes(&self) -> &[NoteDefinition] {
        &self.notes
    }

    /// Returns the number of notes.
    #[inline]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if the schedule has no notes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the beat of the last note.
    #[inline]
    pub fn last_beat(&self) -> Option<Beat> {
        self.notes.last().map(|note| note.beat)
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { beats, distances } => write!(
                f,
                "schedule has {beats} beats but {distances} distances"
            ),
            Self::NotFinite(i) => write!(f, "note {i} has a non-finite beat or distance"),
            Self::Unsorted(i) => write!(f, "note {i} comes before the previous note"),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Strategy generating valid schedules with up to `max_notes` notes.
#[cfg(test)]
pub fn arbitrary_schedule(max_notes: usize) -> impl Strategy<Value = Schedule> {
    proptest::collection::vec((0f64..150., 0.18f64..=0.84), 0..=max_notes).prop_map(
        |mut notes| {
            notes.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
            Schedule {
                notes: notes
                    .into_iter()
                    .map(|(beat, distance)| note(beat, distance))
                    .collect(),
            }
        },
    )
}
