use blockfall_engine::GameSession;

use crate::{
    command::{GameArg, play::app::PlayApp},
    tui::Tui,
};

mod app;
mod keymap;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) game: GameArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let (config, seed) = arg.game.load()?;
    let session = GameSession::new(config, seed)?;

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let session = app.session();
    let stats = session.stats();
    eprintln!(
        "{}: score {}, level {}, lines {}, pieces {} (seed {seed})",
        session.state(),
        stats.score(),
        stats.level(),
        stats.lines(),
        stats.locked_pieces(),
    );
    Ok(())
}
