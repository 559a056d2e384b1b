//! The size envelope of a note over time.
//!
//! A note grows from nothing to full size during the fade-in, stays at full size for the hold on
//! either side of its timestamp and then shrinks away during the fade-out. A hit note instead
//! shrinks away from the moment of the hit, over the (shorter) hit-out time.

use crate::{timing::GameTimestamp, tuning::Tuning};

/// Phase of the envelope a note is in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Not visible yet.
    Hidden,
    /// Growing towards full size.
    FadingIn,
    /// Shrinking away after a hit.
    Decaying,
    /// At full size.
    Held,
    /// Shrinking away after the hold, without a hit.
    FadingOut,
    /// Fully faded out.
    Gone,
}

/// Returns the envelope phase of a note with the given timestamp and hit instant at `now`.
///
/// The checks happen in a strict order: a note which is still fading in is reported as such even
/// if it has already been hit.
pub fn phase(
    timestamp: GameTimestamp,
    hit_instant: Option<GameTimestamp>,
    now: GameTimestamp,
    tuning: &Tuning,
) -> Phase {
    let hold_start = timestamp - tuning.hold_time;
    let hold_end = timestamp + tuning.hold_time;

    if now < hold_start - tuning.fade_in_time {
        Phase::Hidden
    } else if now < hold_start {
        Phase::FadingIn
    } else if hit_instant.is_some() {
        Phase::Decaying
    } else if now < hold_end {
        Phase::Held
    } else if now < hold_end + tuning.fade_out_time {
        Phase::FadingOut
    } else {
        Phase::Gone
    }
}

/// Returns the size of a note with the given timestamp and hit instant at `now`.
///
/// The result is always within `0..=tuning.note_scale` if the tuning is valid.
pub fn scale(
    timestamp: GameTimestamp,
    hit_instant: Option<GameTimestamp>,
    now: GameTimestamp,
    tuning: &Tuning,
) -> f64 {
    let full = tuning.note_scale;
    let hold_start = timestamp - tuning.hold_time;
    let hold_end = timestamp + tuning.hold_time;

    let scale = match phase(timestamp, hit_instant, now, tuning) {
        Phase::Hidden | Phase::Gone => return 0.,
        Phase::Held => return full,
        Phase::FadingIn => {
            let since = now - (hold_start - tuning.fade_in_time);
            since.as_secs() * (full / tuning.fade_in_time.as_secs())
        }
        Phase::Decaying => {
            // Decaying is only reported with a hit instant.
            let since = now - hit_instant.unwrap_or(now);
            full - since.as_secs() * (full / tuning.hit_out_time.as_secs())
        }
        Phase::FadingOut => {
            let since = now - hold_end;
            full - since.as_secs() * (full / tuning.fade_out_time.as_secs())
        }
    };

    scale.max(0.).min(full)
}
