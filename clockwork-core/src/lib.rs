//! `clockwork-core` is the gameplay core of a clock-face rhythm game: notes fade in around the
//! face and are struck when the hitbox carried by the rotating arm lines up with them on the beat.
//!
//! The crate does no rendering, audio or input handling of its own. A host feeds button presses
//! and frame times into a [`state::GameSession`] and reads back plain state (note scales and
//! positions, hitbox depth, arm angle) to apply to its own scene.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod macros;

pub mod envelope;
pub mod hitbox;
pub mod note;
pub mod schedule;
pub mod state;
pub mod timing;
pub mod tuning;
