//! The player-controlled flyer.

use crate::config::{Config, FALL_DIVISOR};
use crate::geom::Size;
use crate::obstacle::Obstacle;
use crate::render::{Canvas, Sprite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerState {
    Flying,
    /// Struck an obstacle; dropping to the floor with no control.
    Falling,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Flyer {
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub fall_speed: f64,
    pub size: Size,
    state: FlyerState,
    /// Set on the first obstacle contact and kept after landing.
    struck: bool,
}

impl Flyer {
    pub fn new(config: &Config) -> Self {
        Self {
            x: (config.window.w as f64 / 7.0).round(),
            y: (config.window.h as f64 / 2.0).round(),
            velocity: 0.0,
            fall_speed: 0.0,
            size: config.sprites.flyer,
            state: FlyerState::Flying,
            struck: false,
        }
    }

    pub fn state(&self) -> FlyerState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != FlyerState::Dead
    }

    pub fn is_falling(&self) -> bool {
        self.state == FlyerState::Falling
    }

    /// Whether this flyer ever hit an obstacle, including after it has landed.
    pub fn was_struck(&self) -> bool {
        self.struck
    }

    /// Resting `y` when touching the floor.
    pub fn floor_contact_y(&self, config: &Config) -> f64 {
        config.floor_height as f64 - self.size.h as f64
    }

    /// One frame of physics. Tuned for the configured frame cap, not frame-rate independent.
    pub fn update(&mut self, config: &Config) {
        match self.state {
            FlyerState::Dead => {}
            FlyerState::Falling => self.fall_to_death(config),
            FlyerState::Flying => {
                let floor = self.floor_contact_y(config);
                if self.y >= floor {
                    self.die(config);
                    return;
                }
                self.velocity += config.gravity;
                self.y += self.velocity;
                if self.y >= floor {
                    self.die(config);
                }
            }
        }
    }

    pub fn jump(&mut self, config: &Config) {
        if self.state != FlyerState::Flying {
            return;
        }
        // Never leave through the top of the play area.
        self.velocity = if self.y + config.jump_impulse <= 0.0 {
            0.0
        } else {
            config.jump_impulse
        };
    }

    /// Tests the floor and then each obstacle in order. The first obstacle hit
    /// is touched and the test stops there. A falling flyer can still hit
    /// obstacles, and each hit adds another fall step.
    pub fn collide(&mut self, obstacles: &mut [Obstacle], config: &Config) -> bool {
        if self.state == FlyerState::Dead {
            return false;
        }
        if self.y >= self.floor_contact_y(config) {
            self.die(config);
            return true;
        }

        let edge = self.x + self.size.w as f64;
        let bottom = self.y + self.size.h as f64;
        for obstacle in obstacles.iter_mut() {
            if edge < obstacle.x || edge > obstacle.x + obstacle.width {
                continue;
            }
            if self.y >= obstacle.gap.top && bottom <= obstacle.gap.bottom {
                continue;
            }
            obstacle.touch(self, config);
            return true;
        }
        false
    }

    pub fn fall_to_death(&mut self, config: &Config) {
        self.state = FlyerState::Falling;
        self.struck = true;

        let floor = self.floor_contact_y(config);
        // At least a pixel, or the approach would stall just above the floor.
        self.fall_speed = ((floor - self.y) / FALL_DIVISOR).round().max(1.0);
        self.y += self.fall_speed;

        if self.y >= floor {
            self.die(config);
        }
    }

    pub fn die(&mut self, config: &Config) {
        self.y = self.floor_contact_y(config);
        self.velocity = 0.0;
        self.state = FlyerState::Dead;
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let sprite = match self.state {
            FlyerState::Dead => Sprite::FlyerDead,
            _ if self.velocity < 0.0 => Sprite::FlyerUp,
            _ => Sprite::FlyerDown,
        };
        canvas.blit(sprite, self.x.round() as i32, self.y.round() as i32);
    }
}
