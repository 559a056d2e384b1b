use clockwork_core::{schedule::Schedule, state::GameSession, timing::Tempo, tuning::Tuning};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "dump-notes", about = "Prints the notes of the built-in song.")]
struct Opt {
    /// Song tempo in beats per minute.
    #[structopt(long, default_value = "130")]
    bpm: f64,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let tuning = Tuning {
        tempo: Tempo::from_bpm(opt.bpm),
        ..Tuning::default()
    };
    let schedule = Schedule::builtin();
    if let Some(last) = schedule.last_beat() {
        eprintln!(
            "{} notes, last on beat {} at {} BPM",
            schedule.len(),
            last.0,
            tuning.tempo.bpm()
        );
    }
    let session = GameSession::new(schedule, tuning)?;

    println!("index\tbeat\ttime\tdistance\tx\ty");
    for (i, note) in session.notes().iter().enumerate() {
        let (x, y) = note.face_position(session.tuning());
        println!(
            "{}\t{}\t{:.3}\t{}\t{:.3}\t{:.3}",
            i,
            note.definition.beat.0,
            note.timestamp.as_secs(),
            note.definition.distance,
            x,
            y,
        );
    }

    Ok(())
}
