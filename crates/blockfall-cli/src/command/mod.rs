use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameConfig, PieceSeed, RandomizerKind};
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng as _;

use self::{play::PlayArg, simulate::SimulateArg};
use crate::util;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a game headless with random inputs and print the result as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RandomizerArg {
    /// Shuffled bags of all seven pieces
    Bag,
    /// Independent uniform draws
    Uniform,
}

impl From<RandomizerArg> for RandomizerKind {
    fn from(arg: RandomizerArg) -> Self {
        match arg {
            RandomizerArg::Bag => RandomizerKind::Bag,
            RandomizerArg::Uniform => RandomizerKind::Uniform,
        }
    }
}

/// Options shared by every game mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Game rules file (JSON); fields left out keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Piece seed as 1-32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Piece selection policy, overriding the config file
    #[clap(long, value_enum)]
    randomizer: Option<RandomizerArg>,
    /// Starting level, overriding the config file
    #[clap(long)]
    level: Option<u32>,
}

impl GameArg {
    /// Builds the validated rules and the seed for a new session.
    pub(crate) fn load(&self) -> anyhow::Result<(GameConfig, PieceSeed)> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(randomizer) = self.randomizer {
            config.randomizer = randomizer.into();
        }
        if let Some(level) = self.level {
            config.starting_level = level;
        }
        config.validate().context("Invalid game config")?;

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        Ok((config, seed))
    }
}
