use clap::Parser;
use flappy_arcade::{Config, ConfigError};
use std::path::PathBuf;

const WORLD_WIDTH: u32 = 1280;
const WORLD_HEIGHT: u32 = 720;

#[derive(Parser, Debug)]
#[command(name = "flappy-arcade", version)]
#[command(about = "Flap through the pipes. Click or press Space to fly, q to quit")]
pub struct Cli {
    /// Frame cap. Physics runs once per frame, so this also sets game speed
    #[arg(long, default_value_t = 90)]
    pub fps: u32,

    /// Frames between new pipes [default: 2 * fps]
    #[arg(long)]
    pub spawn_interval: Option<u64>,

    /// Pipe scroll speed in world pixels per frame
    #[arg(long)]
    pub pipe_speed: Option<f64>,

    /// Height of the gap between pipe halves, in world pixels
    #[arg(long)]
    pub gap: Option<u32>,

    /// Runs kept in the highscore table
    #[arg(long, default_value_t = 5)]
    pub highscores: usize,

    /// Seed for pipe placement, for repeatable runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::for_window(WORLD_WIDTH, WORLD_HEIGHT, self.fps);
        if let Some(interval) = self.spawn_interval {
            config.spawn_interval = interval;
        }
        if let Some(speed) = self.pipe_speed {
            config.pipe_speed = speed;
        }
        if let Some(gap) = self.gap {
            config.pipe_gap = gap;
        }
        config.highscore_count = self.highscores;

        config.validate()?;
        Ok(config)
    }
}
