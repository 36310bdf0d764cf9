//! Scrolling floor strip. Purely cosmetic.

use crate::config::Config;
use crate::render::{Canvas, Sprite};

#[derive(Debug, Clone)]
pub struct ScrollingBackdrop {
    offset: f64,
    tiles: Vec<i32>,
    y: i32,
}

impl ScrollingBackdrop {
    pub fn new(config: &Config) -> Self {
        let tile_w = config.sprites.floor_tile.w.max(1);
        // Two screens of tiles, so wrapping at one window width never shows a seam.
        let count = (config.window.w as f64 / tile_w as f64).round() as i32 * 2;
        Self {
            offset: 0.0,
            tiles: (0..count).map(|i| i * tile_w as i32).collect(),
            y: config.floor_height as i32,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn update(&mut self, config: &Config) {
        self.offset += config.floor_speed;
        if self.offset >= config.window.w as f64 {
            self.offset = 0.0;
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let shift = self.offset.round() as i32;
        for &x in &self.tiles {
            canvas.blit(Sprite::FloorTile, x - shift, self.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawLog;

    #[test]
    fn test_wraps_at_window_width() {
        let config = Config::default();
        let mut floor = ScrollingBackdrop::new(&config);
        for _ in 0..639 {
            floor.update(&config);
        }
        assert_eq!(floor.offset(), 1278.0);
        floor.update(&config);
        assert_eq!(floor.offset(), 0.0);
    }

    #[test]
    fn test_tiles_cover_two_screens() {
        let config = Config::default();
        let floor = ScrollingBackdrop::new(&config);
        let mut log = DrawLog::default();
        floor.draw(&mut log);
        // 1280 / 64 = 20 tiles per screen
        assert_eq!(log.blits(|s| *s == Sprite::FloorTile), 40);
    }
}
