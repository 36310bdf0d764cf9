//! Flappy arcade: the game simulation and Menu/Playing state machine.
//!
//! Everything here is platform independent. The terminal front-end lives in
//! the binary and talks to the core through [`Input`], [`GameController::update`]
//! and the [`render::Canvas`] sink.

pub mod backdrop;
pub mod config;
pub mod flyer;
pub mod game;
pub mod geom;
pub mod menu;
pub mod obstacle;
pub mod render;
pub mod score;

pub use config::{Config, ConfigError};
pub use flyer::{Flyer, FlyerState};
pub use game::{Flow, GameController, GameEvent, Input, Session};
pub use geom::{Point, Rect, Size};
pub use menu::{MenuAction, MenuState};
pub use obstacle::{GapRange, Obstacle};
pub use score::{RunRecord, ScoreTracker};
