//! Tunable constants. Built once at startup, validated, then only ever read.

use thiserror::Error;

use crate::geom::Size;
use crate::menu::MenuAction;
use crate::render::Rgb;

/// A struck flyer covers `1 / FALL_DIVISOR` of its remaining drop each frame.
pub const FALL_DIVISOR: f64 = 40.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be at least 1")]
    ZeroFrameRate,

    #[error("obstacle spawn interval must be at least 1 frame")]
    ZeroSpawnInterval,

    #[error("floor height {floor} is outside a window {height} pixels tall")]
    FloorOutsideWindow { floor: u32, height: u32 },

    #[error("pipe gap {gap} does not fit: must be smaller than {available}")]
    GapTooLarge { gap: u32, available: u32 },

    #[error("sprite `{0}` has no area")]
    EmptySprite(&'static str),

    #[error("menu has no Start button")]
    NoStartButton,
}

/// One menu button: label, action, and scale applied to the base button sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonDef {
    pub label: String,
    pub action: MenuAction,
    pub scale: f64,
}

impl ButtonDef {
    pub fn new(label: &str, action: MenuAction, scale: f64) -> Self {
        Self {
            label: label.to_string(),
            action,
            scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub flyer: Size,
    pub pipe: Size,
    pub floor_tile: Size,
    pub button: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub menu_background: Rgb,
    pub score: Rgb,
    pub title: Rgb,
    pub label: Rgb,
    pub history: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(140, 140, 140),
            menu_background: Rgb(70, 180, 200),
            score: Rgb(255, 215, 0),
            title: Rgb(245, 200, 66),
            label: Rgb(255, 255, 255),
            history: Rgb(255, 255, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window: Size,
    pub title: String,
    pub fps: u32,

    pub floor_height: u32,
    pub floor_speed: f64,

    pub jump_impulse: f64,
    pub gravity: f64,

    /// Frames between obstacle spawns.
    pub spawn_interval: u64,
    pub pipe_speed: f64,
    pub pipe_gap: u32,
    pub pipe_score: u32,

    /// How many past runs the highscore table keeps.
    pub highscore_count: usize,

    pub menu: Vec<ButtonDef>,
    pub sprites: SpriteSheet,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_window(1280, 720, 90)
    }
}

impl Config {
    /// Derives the layout-dependent constants from the window size and frame cap.
    pub fn for_window(width: u32, height: u32, fps: u32) -> Self {
        let floor_height = height - round_div(height, 12);
        Self {
            window: Size::new(width, height),
            title: "Flappy bird".to_string(),
            fps,
            floor_height,
            floor_speed: 2.0,
            jump_impulse: -3.0,
            gravity: 0.07,
            spawn_interval: if fps == 0 { 120 } else { u64::from(fps) * 2 },
            pipe_speed: 5.0,
            pipe_gap: round_div(height, 4),
            pipe_score: 1,
            highscore_count: 5,
            menu: vec![
                ButtonDef::new("Start", MenuAction::Start, 1.25),
                ButtonDef::new("Quit", MenuAction::Quit, 1.0),
            ],
            sprites: SpriteSheet {
                flyer: Size::new(48, 34),
                pipe: Size::new(round_div(height, 10), height),
                floor_tile: Size::new(64, height - floor_height),
                button: Size::new(160, 48),
            },
            palette: Palette::default(),
        }
    }

    /// Height of the solid pipe segments above and below every gap.
    pub fn min_passable_height(&self) -> u32 {
        round_div(self.window.h, 10)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.floor_height == 0 || self.floor_height > self.window.h {
            return Err(ConfigError::FloorOutsideWindow {
                floor: self.floor_height,
                height: self.window.h,
            });
        }

        let available = self
            .floor_height
            .saturating_sub(2 * self.min_passable_height());
        if self.pipe_gap == 0 || self.pipe_gap >= available {
            return Err(ConfigError::GapTooLarge {
                gap: self.pipe_gap,
                available,
            });
        }

        let sheet = &self.sprites;
        for (name, size) in [
            ("flyer", sheet.flyer),
            ("pipe", sheet.pipe),
            ("floor_tile", sheet.floor_tile),
            ("button", sheet.button),
        ] {
            if size.is_empty() {
                return Err(ConfigError::EmptySprite(name));
            }
        }

        if !self.menu.iter().any(|b| b.action == MenuAction::Start) {
            return Err(ConfigError::NoStartButton);
        }
        Ok(())
    }
}

/// `round(n / d)` with halves rounded up.
fn round_div(n: u32, d: u32) -> u32 {
    (n + d / 2) / d
}
