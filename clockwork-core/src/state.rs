//! Functionality related to managing the game state.
use std::{collections::VecDeque, mem, time::Duration};

use circular_queue::CircularQueue;
use tracing::{debug, trace};

use crate::{
    hitbox::{Hitbox, Movement},
    note::Note,
    schedule::Schedule,
    timing::{GameTimestamp, GameTimestampDifference},
    tuning::{Tuning, TuningError},
};

/// Phase of the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GameState {
    /// Waiting for the start action. The clock is stopped.
    Start,
    /// The song is playing. The clock runs and hit actions are judged.
    InProgress,
    /// Every note has been resolved and has disappeared. The clock is stopped for good.
    End,
}

/// The game clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    elapsed: GameTimestamp,
    running: bool,
}

/// Logical buttons the session reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Button {
    /// Moves the hitbox towards the hub while held.
    Inward,
    /// Moves the hitbox towards the rim while held.
    Outward,
    /// Strikes the notes under the hitbox.
    Hit,
}

/// Held buttons and pending actions, applied on the next update.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
struct Input {
    inward: bool,
    outward: bool,
    hit_pending: bool,
}

/// Information about a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Timestamp of the hit.
    pub timestamp: GameTimestamp,
    /// Difference between the hit and the note timestamp.
    pub difference: GameTimestampDifference,
}

/// Something that happened during the game, for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The game has started; the host should start playing the song.
    Started,
    /// A note has been hit.
    NoteHit {
        /// Index of the note in the schedule.
        index: usize,
        /// Difference between the hit and the note timestamp.
        difference: GameTimestampDifference,
    },
    /// The hit window of a note has passed without a hit.
    NoteMissed {
        /// Index of the note in the schedule.
        index: usize,
    },
    /// The game has ended.
    Finished {
        /// The final score.
        score: u32,
    },
}

/// State of one play of a song.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Gameplay constants.
    tuning: Tuning,
    /// The notes with their runtime states, in schedule order.
    notes: Vec<Note>,
    /// Index into `notes` of the first note that is active, that is, can still be hit or missed.
    /// No note below this index can have its judgement changed.
    first_active_note: usize,
    state: GameState,
    clock: Clock,
    hitbox: Hitbox,
    input: Input,
    /// Number of notes hit so far.
    score: u32,
    /// Contains a number of last hits.
    ///
    /// Useful for implementing an error bar.
    pub last_hits: CircularQueue<Hit>,
    events: VecDeque<Event>,
}

impl Clock {
    /// Creates a stopped clock at zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            elapsed: GameTimestamp::zero(),
            running: false,
        }
    }

    /// Returns the current game time.
    #[inline]
    pub fn now(&self) -> GameTimestamp {
        self.elapsed
    }

    /// Returns `true` if the clock is advancing.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the clock by `elapsed` if it's running.
    #[inline]
    pub fn advance(&mut self, elapsed: Duration) {
        if self.running {
            self.elapsed += GameTimestampDifference::from(elapsed);
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a new `GameSession` in the start state.
    pub fn new(schedule: Schedule, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let notes = schedule
            .notes()
            .iter()
            .map(|&definition| Note::new(definition, &tuning))
            .collect();

        Ok(Self {
            tuning,
            notes,
            first_active_note: 0,
            state: GameState::Start,
            clock: Clock::new(),
            hitbox: Hitbox::new(&tuning),
            input: Input::default(),
            score: 0,
            last_hits: CircularQueue::with_capacity(32),
            events: VecDeque::new(),
        })
    }

    /// Returns the gameplay constants.
    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Returns the current phase of the game.
    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the game clock.
    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the current game time.
    #[inline]
    pub fn now(&self) -> GameTimestamp {
        self.clock.now()
    }

    /// Returns the hitbox.
    #[inline]
    pub fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    /// Returns the notes in schedule order.
    #[inline]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the note at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn note(&self, index: usize) -> &Note {
        &self.notes[index]
    }

    /// Returns the number of notes hit so far.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the rotation of the arm and the gear, in degrees clockwise.
    #[inline]
    pub fn arm_angle(&self) -> f64 {
        self.now().as_secs() * self.tuning.rotation_speed
    }

    /// Returns the timestamp of the last note.
    #[inline]
    pub fn last_timestamp(&self) -> Option<GameTimestamp> {
        self.notes.last().map(|note| note.timestamp)
    }

    /// Returns `true` if some notes can still be hit or missed.
    #[inline]
    pub fn has_active_notes(&self) -> bool {
        self.first_active_note < self.notes.len()
    }

    /// Returns the next event, if any.
    #[inline]
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Handles the start action.
    ///
    /// Starts the clock if the game hasn't started yet. Does nothing otherwise.
    pub fn start(&mut self) {
        if self.state != GameState::Start {
            return;
        }

        debug!("starting the game with {} notes", self.notes.len());
        self.state = GameState::InProgress;
        self.clock.running = true;
        self.events.push_back(Event::Started);
    }

    /// Handles a button press.
    ///
    /// Hit presses are only registered while the game is in progress.
    pub fn press(&mut self, button: Button) {
        match button {
            Button::Inward => self.input.inward = true,
            Button::Outward => self.input.outward = true,
            Button::Hit => {
                if self.state == GameState::InProgress {
                    self.input.hit_pending = true;
                }
            }
        }
    }

    /// Handles a button release.
    pub fn release(&mut self, button: Button) {
        match button {
            Button::Inward => self.input.inward = false,
            Button::Outward => self.input.outward = false,
            Button::Hit => (),
        }
    }

    /// Advances the game by one frame that took `elapsed`.
    ///
    /// The hitbox moves in every state. Everything else only happens while the game is in
    /// progress: the clock advances, a pending hit is judged and the notes are updated.
    pub fn update(&mut self, elapsed: Duration) {
        let movement = Movement::from_buttons(self.input.inward, self.input.outward);
        self.hitbox.update(movement, elapsed, &self.tuning);

        if self.state != GameState::InProgress {
            return;
        }

        self.clock.advance(elapsed);

        if mem::take(&mut self.input.hit_pending) {
            self.hit_notes();
        }

        self.update_notes(self.now());

        if self.is_finished() {
            debug!("game finished with score {}", self.score);
            self.state = GameState::End;
            self.clock.running = false;
            self.events.push_back(Event::Finished { score: self.score });
        }
    }

    /// Judges a hit action at the current game time.
    ///
    /// Every note within the hit window and close enough to the hitbox is hit, not only the
    /// closest one. Returns the number of notes hit.
    fn hit_notes(&mut self) -> usize {
        let now = self.now();
        let mut count = 0;

        for (index, note) in self
            .notes
            .iter_mut()
            .enumerate()
            .skip(self.first_active_note)
        {
            // Notes are sorted, so no further note can be in the window.
            if note.timestamp - self.tuning.hit_time > now {
                break;
            }

            if note.is_hit() || !note.in_hit_window(now, &self.tuning) {
                continue;
            }

            let position_difference = self
                .hitbox
                .position_difference(note.definition.distance, &self.tuning);
            let max = self.tuning.max_note_to_hitbox_distance;
            if !(-max <= position_difference && position_difference <= max) {
                continue;
            }

            note.hit_instant = Some(now);
            let difference = now - note.timestamp;
            trace!(index, ?difference, position_difference, "note hit");

            self.score += 1;
            self.last_hits.push(Hit {
                timestamp: now,
                difference,
            });
            self.events.push_back(Event::NoteHit { index, difference });
            count += 1;
        }

        count
    }

    /// Resolves notes whose hit window has passed and recomputes the note scales.
    fn update_notes(&mut self, now: GameTimestamp) {
        for index in self.first_active_note..self.notes.len() {
            let note = &self.notes[index];
            if !note.is_hit() && note.timestamp + self.tuning.hit_time >= now {
                break;
            }

            if !note.is_hit() {
                trace!(index, "note missed");
                self.events.push_back(Event::NoteMissed { index });
            }
            self.first_active_note = index + 1;
        }

        for note in &mut self.notes {
            note.update_scale(now, &self.tuning);
        }
    }

    /// Returns `true` once no note can be judged or seen any more.
    fn is_finished(&self) -> bool {
        !self.has_active_notes() && self.notes.iter().all(|note| !note.is_visible())
    }
}
