//! Types and utilities related to timing.
use core::{
    ops::{Add, AddAssign, Mul, Neg, Sub},
    time::Duration,
};

#[cfg(test)]
use proptest_derive::Arbitrary;

use crate::impl_ops;

/// A point in game time.
///
/// Timestamps are represented as `f64`s in seconds since the game clock started. The game clock
/// only runs while the game is in progress.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct GameTimestamp(#[cfg_attr(test, proptest(strategy = "0f64..1000."))] pub f64);

/// Difference between two [`GameTimestamp`]s, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct GameTimestampDifference(
    #[cfg_attr(test, proptest(strategy = "-1000f64..1000."))] pub f64,
);

/// A position in the song, measured in musical beats.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Beat(pub f64);

/// Musical tempo, converting beats to game time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    /// Duration of one beat, in seconds.
    pub seconds_per_beat: f64,
}

/// Error returned when a [`GameTimestampDifference`] cannot be represented as a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeDifferenceError(pub GameTimestampDifference);

impl GameTimestamp {
    /// Returns the zero timestamp, the instant the game clock starts at.
    #[inline]
    pub fn zero() -> Self {
        Self(0.)
    }

    /// Creates a `GameTimestamp` from a number of seconds.
    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Returns the number of seconds since the game clock started.
    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

impl GameTimestampDifference {
    /// Creates a `GameTimestampDifference` from a number of seconds.
    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Creates a `GameTimestampDifference` from a number of milliseconds.
    #[inline]
    pub fn from_millis(millis: f64) -> Self {
        Self(millis / 1000.)
    }

    /// Returns the difference in seconds.
    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

impl_ops!(GameTimestamp, GameTimestampDifference);

impl Mul<f64> for GameTimestampDifference {
    type Output = GameTimestampDifference;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl From<Duration> for GameTimestampDifference {
    #[inline]
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

impl TryFrom<GameTimestampDifference> for Duration {
    type Error = NegativeDifferenceError;

    #[inline]
    fn try_from(difference: GameTimestampDifference) -> Result<Self, Self::Error> {
        Duration::try_from_secs_f64(difference.0).map_err(|_| NegativeDifferenceError(difference))
    }
}

impl Tempo {
    /// Creates a `Tempo` from beats per minute.
    #[inline]
    pub fn from_bpm(bpm: f64) -> Self {
        Self {
            seconds_per_beat: 60. / bpm,
        }
    }

    /// Returns the tempo in beats per minute.
    #[inline]
    pub fn bpm(self) -> f64 {
        60. / self.seconds_per_beat
    }

    /// Converts a beat into the game timestamp at which it plays.
    #[inline]
    pub fn beat_to_game(self, beat: Beat) -> GameTimestamp {
        GameTimestamp(beat.0 * self.seconds_per_beat)
    }
}
