mod cli;
mod sound;
mod term;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal,
};
use flappy_arcade::{Flow, GameController, ScoreTracker};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

use crate::cli::Cli;
use crate::sound::Sound;
use crate::term::{FrameLimiter, TermCanvas};

fn init_logging(path: Option<&Path>) -> Result<()> {
    // stderr belongs to the game screen; only log when given somewhere else to write.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    game: &mut GameController,
    out: &mut io::Stdout,
    (cols, rows): (u16, u16),
    sound: &Sound,
) -> Result<()> {
    let mut canvas = TermCanvas::new(cols, rows, game.config());
    let mut limiter = FrameLimiter::new(game.config().fps);

    loop {
        // Input
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(c, r) = ev {
                canvas.resize(c, r);
                continue;
            }
            let Some(input) = term::translate(&ev, &canvas, game.menu()) else {
                continue;
            };
            if game.handle_input(input) == Flow::Quit {
                info!("quit");
                return Ok(());
            }
        }

        // Update
        for event in game.update(Local::now()) {
            sound.play(&event);
        }

        // Render
        game.draw(&mut canvas);
        canvas.present(out)?;

        limiter.tick();
    }
}

fn print_history(scores: &ScoreTracker) {
    if scores.history().is_empty() {
        return;
    }
    println!("Highscores");
    for (rank, record) in scores.history().iter().enumerate() {
        println!(
            "{:>2}. {:>5}  {}",
            rank + 1,
            record.score,
            record.recorded_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.config().context("invalid configuration")?;
    let size = terminal::size().context("cannot read terminal size")?;
    term::check_size(size.0, size.1)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sound = Sound::open(cli.mute);
    let mut game = GameController::new(config, rng);
    info!(seed = ?cli.seed, cols = size.0, rows = size.1, "starting");

    let mut out = stdout();
    term::enter(&mut out).context("cannot set up terminal")?;
    let result = run(&mut game, &mut out, size, &sound);
    term::leave(&mut out).context("cannot restore terminal")?;
    result?;

    print_history(game.scores());
    Ok(())
}
