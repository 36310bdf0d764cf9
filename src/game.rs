//! The Menu/Playing state machine driving each frame.

use chrono::{DateTime, Local};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::backdrop::ScrollingBackdrop;
use crate::config::Config;
use crate::flyer::{Flyer, FlyerState};
use crate::geom::Point;
use crate::menu::{MenuAction, MenuState};
use crate::obstacle::Obstacle;
use crate::render::Canvas;
use crate::score::ScoreTracker;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Quit,
    /// Pointer press (or keyboard activate) at a world-space point.
    PrimaryAction(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Things that happened during a frame, for sound and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ObstacleSpawned,
    Scored { score: u32 },
    /// Hit a pipe and started falling.
    Struck,
    /// Flew straight into the floor.
    Crashed,
    /// Reached the floor after being struck.
    Landed,
    RunOver { score: u32, rank: Option<usize> },
}

/// One run, from Start to death.
#[derive(Debug, Clone)]
pub struct Session {
    pub flyer: Flyer,
    pub obstacles: Vec<Obstacle>,
    pub frame: u64,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Menu,
    Playing(Session),
}

pub struct GameController<R = StdRng> {
    config: Config,
    rng: R,
    mode: Mode,
    menu: MenuState,
    scores: ScoreTracker,
    backdrop: ScrollingBackdrop,
}

impl<R: Rng> GameController<R> {
    pub fn new(config: Config, rng: R) -> Self {
        Self {
            menu: MenuState::new(&config),
            scores: ScoreTracker::new(&config),
            backdrop: ScrollingBackdrop::new(&config),
            mode: Mode::Menu,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Playing(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.mode {
            Mode::Playing(session) => Some(session),
            Mode::Menu => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.mode {
            Mode::Playing(session) => Some(session),
            Mode::Menu => None,
        }
    }

    pub fn handle_input(&mut self, input: Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::PrimaryAction(point) => match &mut self.mode {
                Mode::Playing(session) => {
                    session.flyer.jump(&self.config);
                    Flow::Continue
                }
                Mode::Menu => match self.menu.hit_test(point) {
                    Some(MenuAction::Start) => {
                        self.start_session();
                        Flow::Continue
                    }
                    Some(MenuAction::Quit) => Flow::Quit,
                    None => Flow::Continue,
                },
            },
        }
    }

    fn start_session(&mut self) {
        self.scores.reset();
        self.mode = Mode::Playing(Session {
            flyer: Flyer::new(&self.config),
            obstacles: Vec::new(),
            // The first update tick rolls this over and spawns immediately.
            frame: self.config.spawn_interval.saturating_sub(1),
        });
        info!(best = ?self.scores.best(), "session started");
    }

    fn finish_run(&mut self, now: DateTime<Local>) -> GameEvent {
        let score = self.scores.score();
        let rank = self.scores.record_run(score, now);
        self.mode = Mode::Menu;

        match rank {
            Some(0) => info!(score, "run over, new highscore"),
            _ => info!(score, ?rank, "run over"),
        }
        GameEvent::RunOver { score, rank }
    }

    /// Advances one frame. Does nothing in the menu.
    pub fn update(&mut self, now: DateTime<Local>) -> Vec<GameEvent> {
        let Mode::Playing(session) = &mut self.mode else {
            return Vec::new();
        };
        if !session.flyer.is_alive() {
            return vec![self.finish_run(now)];
        }

        let config = &self.config;
        let mut events = Vec::new();

        let before = session.flyer.state();
        session.flyer.update(config);
        session.flyer.collide(&mut session.obstacles, config);

        let event = match (before, session.flyer.state()) {
            (FlyerState::Flying, FlyerState::Falling) => Some(GameEvent::Struck),
            (FlyerState::Flying, FlyerState::Dead) => Some(GameEvent::Crashed),
            (FlyerState::Falling, FlyerState::Dead) => Some(GameEvent::Landed),
            _ => None,
        };
        if let Some(event) = event {
            debug!(?event, y = session.flyer.y, "collision");
            events.push(event);
        }

        session.frame += 1;
        if session.frame % config.spawn_interval.max(1) == 0 {
            let obstacle = Obstacle::spawn(config, &mut self.rng);
            debug!(
                frame = session.frame,
                top = obstacle.gap.top,
                bottom = obstacle.gap.bottom,
                "obstacle spawned"
            );
            session.obstacles.push(obstacle);
            events.push(GameEvent::ObstacleSpawned);
        }

        let flyer = &session.flyer;
        let scores = &mut self.scores;
        session.obstacles.retain_mut(|obstacle| {
            if obstacle.is_off_screen() {
                return false;
            }
            // A struck flyer earns nothing for what it drifts past, even once landed.
            if !obstacle.passed && flyer.x >= obstacle.x && !flyer.was_struck() {
                obstacle.passed = true;
                scores.add_point();
                debug!(score = scores.score(), "point");
                events.push(GameEvent::Scored {
                    score: scores.score(),
                });
            }
            obstacle.update(config);
            true
        });

        self.backdrop.update(config);
        events
    }

    /// Renders whichever state is active. Never mutates the simulation.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let config = &self.config;
        match &self.mode {
            Mode::Menu => self.menu.draw(canvas, config, self.scores.history()),
            Mode::Playing(session) => {
                canvas.clear(config.palette.background);
                session.flyer.draw(canvas);
                for obstacle in &session.obstacles {
                    obstacle.draw(canvas, config);
                }
                self.backdrop.draw(canvas);
                canvas.text(
                    &format!("Score: {}", self.scores.score()),
                    0,
                    0,
                    config.palette.score,
                );
            }
        }
    }
}
