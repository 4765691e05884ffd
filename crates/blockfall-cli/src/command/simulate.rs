use std::path::PathBuf;

use blockfall_engine::{
    EventOutcome, EventQueue, GameConfig, GameEvent, GameSession, GameSnapshot, GameStats, Input,
    PieceSeed,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{command::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) game: GameArg,
    /// Stop after this many gravity ticks even if the game is not over
    #[clap(long, default_value_t = 10_000)]
    max_ticks: u64,
    /// Upper bound of random inputs sent between two ticks
    #[clap(long, default_value_t = 3)]
    inputs_per_tick: u32,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    ticks: u64,
    inputs: u64,
    rejected_inputs: u64,
    stats: GameStats,
    snapshot: GameSnapshot,
}

const INPUTS: [Input; 6] = [
    Input::MoveLeft,
    Input::MoveRight,
    Input::SoftDrop,
    Input::HardDrop,
    Input::RotateCw,
    Input::RotateCcw,
];

/// Keeps the input stream independent of the piece stream.
const INPUT_STREAM: u128 = 0x5eed_1a9u128;

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game,
        max_ticks,
        inputs_per_tick,
        output,
    } = arg;

    let (config, seed) = game.load()?;
    eprintln!("Simulating up to {max_ticks} ticks (seed {seed})...");
    let report = simulate(config, seed, *max_ticks, *inputs_per_tick)?;
    eprintln!(
        "Finished after {} ticks: {}, score {}, lines {}",
        report.ticks,
        report.snapshot.state,
        report.stats.score(),
        report.stats.lines()
    );

    Output::save_json(&report, output.clone())?;
    Ok(())
}

fn simulate(
    config: GameConfig,
    seed: PieceSeed,
    max_ticks: u64,
    inputs_per_tick: u32,
) -> anyhow::Result<SimulationReport> {
    let mut session = GameSession::new(config, seed)?;
    let mut rng = Pcg32::from_seed((seed.as_u128() ^ INPUT_STREAM).to_be_bytes());
    let mut events = EventQueue::new();
    session.handle_event(GameEvent::Start);

    let mut ticks = 0;
    let mut inputs = 0;
    let mut rejected_inputs = 0;
    while ticks < max_ticks {
        for _ in 0..rng.random_range(0..=inputs_per_tick) {
            events.push(INPUTS[rng.random_range(0..INPUTS.len())]);
            inputs += 1;
        }
        events.push(GameEvent::Tick);
        ticks += 1;

        for outcome in session.process(&mut events) {
            if outcome.is_rejected() {
                rejected_inputs += 1;
            }
            if matches!(outcome, EventOutcome::Locked(report) if report.game_over) {
                eprintln!("Game over after {ticks} ticks");
            }
        }
        if session.state().is_game_over() {
            break;
        }
    }

    Ok(SimulationReport {
        seed,
        ticks,
        inputs,
        rejected_inputs,
        stats: session.stats().clone(),
        snapshot: session.snapshot(),
    })
}
