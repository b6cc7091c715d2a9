use crate::config::Config;
use crate::game::Session;
use common::GameState;
use std::io;
use tracing::info;

mod config;
mod game;
mod input;

#[tracing::instrument]
fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args())?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let game_state = GameState::new(config.size)?;
    info!("starting a game on a {0}x{0} board", config.size);

    println!("Enter moves as \"<x> <y>\", or \"reset\" / \"quit\".");
    let mut session = Session::new(game_state, config.json);
    session.run(io::stdin().lock(), &mut io::stdout().lock())?;
    info!("session ended: {:?}", session.game_state().outcome());
    Ok(())
}
