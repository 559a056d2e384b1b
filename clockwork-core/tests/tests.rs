use std::time::Duration;

use clockwork_core::{
    envelope,
    note::NoteDefinition,
    schedule::{Schedule, ScheduleError},
    state::{Button, Event, GameSession, GameState},
    timing::{Beat, GameTimestamp, GameTimestampDifference, Tempo},
    tuning::Tuning,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A session with one note at beat 12 that lines up with the hitbox at its starting depth.
fn beat_12_session() -> GameSession {
    let tuning = Tuning::default();
    let schedule = Schedule::new(vec![NoteDefinition {
        beat: Beat(12.),
        distance: tuning.note_outward_bound,
    }])
    .unwrap();
    GameSession::new(schedule, tuning).unwrap()
}

/// Updates the session with a single frame ending at `timestamp`.
fn advance_to(session: &mut GameSession, timestamp: GameTimestamp) {
    let elapsed = Duration::try_from(timestamp - session.now()).unwrap();
    session.update(elapsed);
}

fn drain_events(session: &mut GameSession) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = session.poll_event() {
        events.push(event);
    }
    events
}

#[test]
fn hit_exactly_on_the_note() {
    let mut session = beat_12_session();
    let timestamp = Tempo::from_bpm(130.).beat_to_game(Beat(12.));
    assert_eq!(session.note(0).timestamp, timestamp);

    let difference = session
        .hitbox()
        .position_difference(session.note(0).definition.distance, session.tuning());
    assert!(difference.abs() < 1e-9);

    session.start();
    session.press(Button::Hit);
    advance_to(&mut session, timestamp);

    let now = session.now();
    assert!((now - timestamp).abs().as_secs() < 1e-6);
    assert_eq!(session.note(0).hit_instant, Some(now));
    assert_eq!(session.score(), 1);

    let events = drain_events(&mut session);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::Started);
    assert!(matches!(
        events[1],
        Event::NoteHit { index: 0, difference } if difference.abs().as_secs() < 1e-6
    ));
}

#[test]
fn hit_just_after_the_window() {
    let mut session = beat_12_session();
    let late = session.note(0).timestamp
        + session.tuning().hit_time
        + GameTimestampDifference::from_secs(0.01);

    session.start();
    session.press(Button::Hit);
    advance_to(&mut session, late);

    assert_eq!(session.note(0).hit_instant, None);
    assert_eq!(session.score(), 0);
    assert_eq!(
        drain_events(&mut session),
        vec![Event::Started, Event::NoteMissed { index: 0 }]
    );
}

#[test]
fn hit_before_start_judges_nothing() {
    let mut session = beat_12_session();
    let timestamp = session.note(0).timestamp;

    session.press(Button::Hit);
    advance_to(&mut session, timestamp);

    assert_eq!(session.state(), GameState::Start);
    assert_eq!(session.now(), GameTimestamp::zero());
    assert_eq!(session.note(0).hit_instant, None);
    assert_eq!(session.score(), 0);
    assert_eq!(session.poll_event(), None);
}

#[test]
fn note_is_invisible_long_before() {
    let tuning = Tuning::default();
    let timestamp = tuning.tempo.beat_to_game(Beat(12.));
    let now = GameTimestamp::zero();
    assert!(now < timestamp - tuning.hold_time - tuning.fade_in_time);
    assert_eq!(envelope::scale(timestamp, None, now, &tuning), 0.);
}

#[test]
fn note_is_half_size_halfway_through_the_fade_in() {
    let tuning = Tuning::default();
    let timestamp = tuning.tempo.beat_to_game(Beat(12.));
    let now = timestamp - tuning.hold_time - tuning.fade_in_time * 0.5;
    let scale = envelope::scale(timestamp, None, now, &tuning);
    assert!((scale - tuning.note_scale / 2.).abs() < 1e-12);
}

#[test]
fn holding_inward_stops_at_the_bound() {
    let mut session = beat_12_session();
    session.press(Button::Inward);
    session.update(Duration::from_secs(3600));
    assert_eq!(session.hitbox().depth(), session.tuning().hitbox_inward_bound);

    session.release(Button::Inward);
    session.press(Button::Outward);
    session.update(Duration::from_secs(3600));
    assert_eq!(session.hitbox().depth(), session.tuning().hitbox_outward_bound);
}

#[test]
fn mismatched_schedule_fails_fast() {
    assert_eq!(
        Schedule::from_parallel(&[6., 12.], &[0.7]),
        Err(ScheduleError::LengthMismatch {
            beats: 2,
            distances: 1
        })
    );
}

#[test]
fn untouched_builtin_song_misses_everything() {
    let mut session = GameSession::new(Schedule::builtin(), Tuning::default()).unwrap();
    session.start();

    let frame = Duration::from_millis(16);
    let mut frames = 0;
    while session.state() == GameState::InProgress {
        session.update(frame);
        frames += 1;
        assert!(frames < 10_000, "the game never ended");
    }

    let events = drain_events(&mut session);

    let mut expected = vec![Event::Started];
    expected.extend((0..60).map(|index| Event::NoteMissed { index }));
    expected.push(Event::Finished { score: 0 });
    assert_eq!(events, expected);

    let last = session.last_timestamp().unwrap();
    let tuning = session.tuning();
    assert!(session.now() >= last + tuning.hold_time + tuning.fade_out_time);
}

proptest! {
    #[test]
    fn duration_to_difference_and_back(millis in 0u64..100_000_000) {
        let duration = Duration::from_millis(millis);
        let difference = GameTimestampDifference::from(duration);
        let duration2 = Duration::try_from(difference).unwrap();
        // Allow for the nanosecond rounding of the float conversion.
        prop_assert!(duration.as_nanos().abs_diff(duration2.as_nanos()) <= 1);
    }
}
