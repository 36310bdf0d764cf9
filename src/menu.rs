//! The title screen: clickable buttons and the highscore table.

use crate::config::Config;
use crate::geom::{Point, Rect};
use crate::render::{Canvas, Sprite};
use crate::score::RunRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub action: MenuAction,
}

#[derive(Debug, Clone)]
pub struct MenuState {
    buttons: Vec<Button>,
}

impl MenuState {
    /// Lays the configured buttons out once, centered and stacked.
    pub fn new(config: &Config) -> Self {
        let base = config.sprites.button;
        let spacing = base.h as f64 / 2.0;
        let mut y = (config.window.h as f64 * 0.45).round();

        let buttons = config
            .menu
            .iter()
            .map(|def| {
                let size = base.scaled(def.scale);
                let (w, h) = (size.w as f64, size.h as f64);
                let x = ((config.window.w as f64 - w) / 2.0).round();
                let rect = Rect::new(x, y, w, h);
                y += h + spacing;
                Button {
                    label: def.label.clone(),
                    rect,
                    action: def.action,
                }
            })
            .collect();

        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn hit_test(&self, point: Point) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.action)
    }

    /// Where keyboard activation "clicks": the middle of the Start button.
    pub fn primary_point(&self) -> Point {
        self.buttons
            .iter()
            .find(|b| b.action == MenuAction::Start)
            .or(self.buttons.first())
            .map_or(Point::new(-1.0, -1.0), |b| b.rect.center())
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, config: &Config, history: &[RunRecord]) {
        let palette = &config.palette;
        let center_x = config.window.w as i32 / 2;

        canvas.clear(palette.menu_background);

        let title = config.title.to_uppercase();
        let (title_w, _) = canvas.text_size(&title);
        canvas.text(
            &title,
            center_x - title_w / 2,
            config.window.h as i32 / 5,
            palette.title,
        );

        let mut bottom = 0;
        for (i, button) in self.buttons.iter().enumerate() {
            let r = button.rect;
            canvas.blit(Sprite::Button(i), r.x as i32, r.y as i32);

            let label = button.label.to_uppercase();
            let (w, h) = canvas.text_size(&label);
            let c = r.center();
            canvas.text(
                &label,
                c.x as i32 - w / 2,
                c.y as i32 - h / 2,
                palette.label,
            );
            bottom = bottom.max((r.y + r.h) as i32);
        }

        if history.is_empty() {
            return;
        }
        let (_, line_h) = canvas.text_size("0");
        let mut y = bottom + line_h * 2;
        for (rank, record) in history.iter().enumerate() {
            let line = format!(
                "{}. {:>4}  {}",
                rank + 1,
                record.score,
                record.recorded_at.format("%H:%M:%S")
            );
            let (w, _) = canvas.text_size(&line);
            canvas.text(&line, center_x - w / 2, y, palette.history);
            y += line_h * 2;
        }
    }
}
