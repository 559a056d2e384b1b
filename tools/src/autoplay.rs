use std::time::Duration;

use anyhow::{bail, ensure, Context};
use clockwork_core::{
    hitbox::Movement,
    note::NoteStatus,
    schedule::Schedule,
    state::{Button, Event, GameSession, GameState},
    timing::{GameTimestampDifference, Tempo},
    tuning::Tuning,
};
use structopt::StructOpt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(StructOpt)]
#[structopt(
    name = "autoplay",
    about = "Plays the built-in song headless with a bot and prints the score."
)]
struct Opt {
    /// Simulated frames per second.
    #[structopt(long, default_value = "60")]
    fps: u32,
    /// Song tempo in beats per minute.
    #[structopt(long, default_value = "130")]
    bpm: f64,
    /// Hit window on either side of a note, in milliseconds.
    #[structopt(long, default_value = "200")]
    hit_time: f64,
    /// Let every N-th note pass without trying to hit it.
    #[structopt(long)]
    skip_every: Option<usize>,
}

/// Steers the hitbox to the next note and strikes it on time.
struct Bot {
    skip_every: Option<usize>,
}

impl Bot {
    fn is_skipped(&self, index: usize) -> bool {
        self.skip_every
            .map_or(false, |n| n > 0 && (index + 1) % n == 0)
    }

    /// Returns the index of the next note the bot goes for.
    fn target(&self, session: &GameSession) -> Option<usize> {
        let now = session.now();
        session.notes().iter().enumerate().position(|(i, note)| {
            !self.is_skipped(i) && note.status(now, session.tuning()) == NoteStatus::Pending
        })
    }

    /// Presses and releases buttons for the frame about to be simulated.
    fn act(&self, session: &mut GameSession, frame: Duration) {
        let Some(index) = self.target(session) else {
            session.release(Button::Inward);
            session.release(Button::Outward);
            return;
        };

        let tuning = *session.tuning();
        let note = *session.note(index);
        // Positive when the note is further out than the hitbox.
        let offset = note.definition.distance - session.hitbox().note_distance(&tuning);

        let step = tuning.hitbox_speed * frame.as_secs_f64() * tuning.note_to_hitbox_ratio();
        let movement = if offset > step / 2. {
            Some(Movement::Outward)
        } else if -offset > step / 2. {
            Some(Movement::Inward)
        } else {
            None
        };
        for (button, direction) in [
            (Button::Inward, Movement::Inward),
            (Button::Outward, Movement::Outward),
        ] {
            if movement == Some(direction) {
                session.press(button);
            } else {
                session.release(button);
            }
        }

        // The hit is judged after the clock advances by this frame.
        let judged_at = session.now() + GameTimestampDifference::from(frame);
        let max = tuning.max_note_to_hitbox_distance;
        let on_target = session
            .hitbox()
            .position_difference(note.definition.distance, &tuning)
            .abs()
            <= max / 2.;
        if judged_at >= note.timestamp && note.in_hit_window(judged_at, &tuning) && on_target {
            session.press(Button::Hit);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    ensure!(opt.fps > 0, "fps must be positive");

    let tuning = Tuning {
        tempo: Tempo::from_bpm(opt.bpm),
        hit_time: GameTimestampDifference::from_millis(opt.hit_time),
        ..Tuning::default()
    };
    let mut session =
        GameSession::new(Schedule::builtin(), tuning).context("invalid gameplay constants")?;
    let note_count = session.notes().len();

    let bot = Bot {
        skip_every: opt.skip_every,
    };
    let frame = Duration::from_secs(1) / opt.fps;

    // Generous upper bound on the song length, in frames.
    let song_length = session
        .last_timestamp()
        .map_or(0., |last| last.as_secs())
        + 10.;
    let max_frames = (song_length * f64::from(opt.fps)) as u64;

    session.start();
    let mut frames = 0;
    while session.state() != GameState::End {
        if frames > max_frames {
            bail!("the song didn't end after {frames} frames");
        }

        bot.act(&mut session, frame);
        session.update(frame);
        frames += 1;

        while let Some(event) = session.poll_event() {
            match event {
                Event::Started => info!("song started"),
                Event::NoteHit { index, difference } => debug!(
                    index,
                    difference_ms = difference.as_secs() * 1000.,
                    "note hit"
                ),
                Event::NoteMissed { index } => warn!(index, "note missed"),
                Event::Finished { score } => info!(score, frames, "song finished"),
            }
        }
    }

    let (sum, count) = session
        .last_hits
        .iter()
        .fold((0., 0), |(sum, count), hit| {
            (sum + hit.difference.abs().as_secs(), count + 1)
        });
    println!("score\t{}/{}", session.score(), note_count);
    if count > 0 {
        println!(
            "mean error of last {} hits\t{:.1} ms",
            count,
            sum / f64::from(count) * 1000.
        );
    }

    Ok(())
}
