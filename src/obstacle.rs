//! Pipe pairs scrolling in from the right edge.

use rand::Rng;

use crate::config::Config;
use crate::flyer::Flyer;
use crate::render::{Canvas, Sprite};

/// The vertical interval that is safe to fly through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRange {
    pub top: f64,
    pub bottom: f64,
}

impl GapRange {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f64,
    pub width: f64,
    /// Minimum solid pipe left above and below the gap.
    pub min_height: f64,
    pub gap: GapRange,
    /// A point has already been awarded for this obstacle.
    pub passed: bool,
    pub struck: bool,
}

impl Obstacle {
    pub fn new(x: f64, gap: GapRange, config: &Config) -> Self {
        let min_height = config.min_passable_height() as f64;
        Self {
            x,
            width: min_height,
            min_height,
            gap,
            passed: false,
            struck: false,
        }
    }

    /// A new obstacle at the right edge with a uniformly placed gap.
    pub fn spawn<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Self {
        let min_height = config.min_passable_height() as i64;
        let gap = config.pipe_gap as i64;
        let half = (gap + 1) / 2;

        let low = min_height + half;
        let high = config.floor_height as i64 - min_height - half;
        // `Config::validate` guarantees `low <= high`.
        let center = if high > low {
            rng.gen_range(low..=high)
        } else {
            low
        };

        let top = (center - half) as f64;
        Self::new(
            config.window.w as f64,
            GapRange::new(top, top + gap as f64),
            config,
        )
    }

    pub fn update(&mut self, config: &Config) {
        self.x -= config.pipe_speed;
    }

    pub fn touch(&mut self, flyer: &mut Flyer, config: &Config) {
        self.struck = true;
        flyer.fall_to_death(config);
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + (self.width / 2.0).round() <= 0.0
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, config: &Config) {
        let x = self.x.round() as i32;
        let pipe_h = config.sprites.pipe.h as i32;

        // Lower pipe
        canvas.blit(
            Sprite::Pipe {
                struck: self.struck,
                flipped: false,
            },
            x,
            self.gap.bottom.round() as i32,
        );
        // Upper pipe
        canvas.blit(
            Sprite::Pipe {
                struck: self.struck,
                flipped: true,
            },
            x,
            self.gap.top.round() as i32 - pipe_h,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::FlyerState;
    use crate::render::DrawLog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_gap_invariants() {
        let config = Config::default();
        let min = config.min_passable_height() as f64;
        let floor = config.floor_height as f64;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2000 {
            let pipe = Obstacle::spawn(&config, &mut rng);
            assert_eq!(pipe.x, config.window.w as f64);
            assert_eq!(pipe.gap.height(), config.pipe_gap as f64);
            assert!(pipe.gap.top >= min, "gap top {} above {}", pipe.gap.top, min);
            assert!(floor - pipe.gap.bottom >= min, "gap bottom {}", pipe.gap.bottom);
            assert!(!pipe.passed && !pipe.struck);
        }
    }

    #[test]
    fn test_spawn_odd_gap_keeps_height() {
        let mut config = Config::default();
        config.pipe_gap = 181;
        let min = config.min_passable_height() as f64;
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let pipe = Obstacle::spawn(&config, &mut rng);
            assert_eq!(pipe.gap.height(), 181.0);
            assert!(pipe.gap.top >= min);
            assert!(config.floor_height as f64 - pipe.gap.bottom >= min);
        }
    }

    #[test]
    fn test_spawn_tightest_gap() {
        let mut config = Config::default();
        // available = 660 - 144 = 516
        config.pipe_gap = 515;
        let mut rng = StdRng::seed_from_u64(3);
        let pipe = Obstacle::spawn(&config, &mut rng);
        assert_eq!(pipe.gap, GapRange::new(72.0, 587.0));
    }

    #[test]
    fn test_spawn_covers_range() {
        let config = Config::default();
        let mut rng = StdRng::seed_from_u64(42);
        let tops: Vec<f64> = (0..3000)
            .map(|_| Obstacle::spawn(&config, &mut rng).gap.top)
            .collect();
        // Centers range over [162, 498], so tops over [72, 408].
        assert!(tops.iter().any(|&t| t < 100.0));
        assert!(tops.iter().any(|&t| t > 380.0));
    }

    #[test]
    fn test_update_scrolls_left() {
        let config = Config::default();
        let mut pipe = Obstacle::new(500.0, GapRange::new(200.0, 380.0), &config);
        pipe.update(&config);
        pipe.update(&config);
        assert_eq!(pipe.x, 490.0);
        assert_eq!(pipe.gap, GapRange::new(200.0, 380.0));
    }

    #[test]
    fn test_off_screen_at_center() {
        let config = Config::default();
        // width 72, half 36
        let mut pipe = Obstacle::new(-35.0, GapRange::new(200.0, 380.0), &config);
        assert!(!pipe.is_off_screen());
        pipe.x = -36.0;
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn test_touch_marks_struck_and_drops_flyer() {
        let config = Config::default();
        let mut pipe = Obstacle::new(100.0, GapRange::new(200.0, 380.0), &config);
        let mut flyer = Flyer::new(&config);
        let y0 = flyer.y;
        pipe.touch(&mut flyer, &config);
        assert!(pipe.struck);
        assert_eq!(flyer.state(), FlyerState::Falling);
        assert!(flyer.y > y0);
    }

    #[test]
    fn test_draw_places_both_halves() {
        let config = Config::default();
        let mut pipe = Obstacle::new(300.4, GapRange::new(200.0, 380.0), &config);
        pipe.struck = true;
        let mut log = DrawLog::default();
        pipe.draw(&mut log, &config);

        assert_eq!(
            log.blits(|s| *s == Sprite::Pipe { struck: true, flipped: false }),
            1
        );
        assert!(log.calls.contains(&crate::render::DrawCall::Blit(
            Sprite::Pipe {
                struck: true,
                flipped: true
            },
            300,
            200 - config.sprites.pipe.h as i32,
        )));
    }
}
