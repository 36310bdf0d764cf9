use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};
use flappy_arcade::config::{Config, SpriteSheet};
use flappy_arcade::render::{Canvas, Rgb, Sprite};
use flappy_arcade::{Input, MenuState, Point, Size};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::trace;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error(
        "terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}",
        min_cols = MIN_COLS,
        min_rows = MIN_ROWS
    )]
    TooSmall { cols: u16, rows: u16 },
}

pub fn check_size(cols: u16, rows: u16) -> Result<(), PlatformError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(PlatformError::TooSmall { cols, rows });
    }
    Ok(())
}

pub fn enter(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )
}

pub fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

// ── Colors ──────────────────────────────────────────────────────────────────

const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// Shading ramp across a pipe, left to right.
struct PipeTones {
    left: Rgb,
    mid: Rgb,
    right: Rgb,
    highlight: Rgb,
    cap_edge: Rgb,
}

const GREEN_PIPE: PipeTones = PipeTones {
    left: Rgb(74, 122, 26),
    mid: Rgb(100, 170, 40),
    right: Rgb(115, 191, 46),
    highlight: Rgb(145, 215, 62),
    cap_edge: Rgb(60, 100, 20),
};

const RED_PIPE: PipeTones = PipeTones {
    left: Rgb(130, 30, 24),
    mid: Rgb(180, 45, 35),
    right: Rgb(200, 60, 45),
    highlight: Rgb(235, 100, 80),
    cap_edge: Rgb(100, 20, 15),
};

// ── Pixel buffer with half-block rendering ──────────────────────────────────

/// Two stacked pixels shown as one `▀` terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    top: Rgb,
    bottom: Rgb,
}

/// Pixels for the whole terminal plus the cells last written to it.
/// `render` only sends cells that changed since the previous frame.
pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
    shown: Vec<Option<Cell>>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SHADOW; w * h],
            shown: vec![None; w * (h / 2)],
        }
    }

    /// Forgets what is on screen, so the next frame is drawn in full.
    fn resize(&mut self, w: usize, h: usize) {
        *self = Self::new(w, h);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn cell(&self, col: usize, row: usize) -> Cell {
        Cell {
            top: self.get(col, row * 2),
            bottom: self.get(col, row * 2 + 1),
        }
    }

    /// Writes the changed cells and returns how many there were.
    fn render(&mut self, out: &mut impl Write) -> io::Result<usize> {
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut written = 0;

        for row in 0..self.h / 2 {
            // Column the cursor sits on after the last print in this row.
            let mut cursor_col = None;
            for col in 0..self.w {
                let cell = self.cell(col, row);
                let slot = &mut self.shown[row * self.w + col];
                if *slot == Some(cell) {
                    continue;
                }
                *slot = Some(cell);
                written += 1;

                if cursor_col != Some(col) {
                    queue!(out, cursor::MoveTo(col as u16, row as u16))?;
                }
                cursor_col = Some(col + 1);

                if bg != Some(cell.bottom) {
                    queue!(out, style::SetBackgroundColor(term_color(cell.bottom)))?;
                    bg = Some(cell.bottom);
                }
                if cell.top == cell.bottom {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(cell.top) {
                    queue!(out, style::SetForegroundColor(term_color(cell.top)))?;
                    fg = Some(cell.top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()?;
        Ok(written)
    }
}

fn term_color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
static DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
static LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 1,1,0, 0,1,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
static COLON: [u8; 15] = [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0];
#[rustfmt::skip]
static DOT: [u8; 15] = [0,0,0, 0,0,0, 0,0,0, 0,0,0, 0,1,0];
#[rustfmt::skip]
static DASH: [u8; 15] = [0,0,0, 0,0,0, 1,1,1, 0,0,0, 0,0,0];

const GLYPH_ADVANCE: i32 = 4; // 3px glyph + 1px spacing
const GLYPH_HEIGHT: i32 = 5;

/// `None` for characters drawn as blank space.
fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch.to_ascii_uppercase() {
        d @ '0'..='9' => Some(&DIGITS[(d as u8 - b'0') as usize]),
        c @ 'A'..='Z' => Some(&LETTERS[(c as u8 - b'A') as usize]),
        ':' => Some(&COLON),
        '.' => Some(&DOT),
        '-' => Some(&DASH),
        _ => None,
    }
}

fn draw_glyph(buf: &mut PixelBuf, x: i32, y: i32, glyph: &[u8; 15], fg: Rgb) {
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

// ── Sprites ─────────────────────────────────────────────────────────────────

fn draw_flyer(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32, sprite: Sprite) {
    let dead = sprite == Sprite::FlyerDead;
    // Upside down when dead: mirror every part vertically.
    let part = |buf: &mut PixelBuf, dx: i32, dy: i32, pw: i32, ph: i32, c: Rgb| {
        let top = if dead { h - dy - ph } else { dy };
        buf.fill_rect(x + dx, y + top, pw, ph, c);
    };

    let tail_w = (w / 6).max(1);
    let beak_x = (w * 3 / 4).max(tail_w + 1);
    let body_w = beak_x - tail_w;

    // Body core
    part(buf, tail_w, 0, body_w, h, BIRD_Y);
    // Highlight
    part(buf, tail_w + 1, 0, body_w - 2, 1.max(h / 8), BIRD_HI);

    // Wing
    let wing_y = if sprite == Sprite::FlyerUp { h / 5 } else { h / 2 };
    part(buf, tail_w + 1, wing_y, (w / 3).max(1), (h / 3).max(1), BIRD_WING);

    // Eye
    let eye = (h / 5).max(1);
    let ex = beak_x - eye - 1;
    let ey = (h / 5).max(1).min(h - 1);
    part(buf, ex, ey, eye, eye, BIRD_EYE);
    part(buf, ex + eye - 1, ey + eye - 1, 1, 1, BIRD_PUPIL);

    // Beak
    let beak_w = w - beak_x;
    let beak_h = (h / 3).max(1);
    let beak_y = h * 2 / 5;
    part(buf, beak_x, beak_y, beak_w, beak_h / 2 + 1, BIRD_BEAK_HI);
    part(buf, beak_x, beak_y + beak_h / 2 + 1, beak_w, beak_h / 2, BIRD_BEAK);

    // Tail
    part(buf, 0, h / 3, tail_w, (h / 3).max(1), BIRD_WING);
}

fn pipe_shade(x: i32, total_w: i32, tones: &PipeTones) -> Rgb {
    if total_w <= 1 {
        return tones.mid;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(tones.left, tones.mid, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(tones.mid, tones.highlight, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(tones.highlight, tones.right, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(tones.right, tones.left, ((t - 160) * 3).min(256))
    }
}

/// One pipe half. The cap sits on the gap side: top for the lower pipe, bottom when flipped.
fn draw_pipe(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32, struck: bool, flipped: bool) {
    let tones = if struck { &RED_PIPE } else { &GREEN_PIPE };
    let cap_extra = (w / 6).max(1);
    let cap_h = (w / 3).max(2).min(h);

    // Body
    for dx in 0..w {
        let c = pipe_shade(dx, w, tones);
        for dy in 0..h {
            buf.set(x + dx, y + dy, c);
        }
    }

    // Cap
    let cap_y = if flipped { y + h - cap_h } else { y };
    for dx in -cap_extra..(w + cap_extra) {
        let c = pipe_shade(dx + cap_extra, w + cap_extra * 2, tones);
        for dy in 0..cap_h {
            buf.set(x + dx, cap_y + dy, c);
        }
        buf.set(x + dx, cap_y, tones.cap_edge);
        buf.set(x + dx, cap_y + cap_h - 1, tones.cap_edge);
    }
}

fn draw_floor_tile(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32) {
    for dx in 0..w {
        let px = x + dx;
        // Stripes follow absolute pixels so neighbouring tiles join up.
        let alt = (px / 3).rem_euclid(2) == 0;
        buf.set(px, y, if alt { GRASS } else { GRASS_LIGHT });
        buf.set(px, y + 1, GRASS);
        for dy in 2..h {
            let stripe = (px + dy * 2).rem_euclid(12) < 6;
            buf.set(px, y + dy, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

fn draw_button(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32) {
    buf.fill_rect(x - 1, y - 1, w + 2, h + 2, SHADOW);
    buf.fill_rect(x, y, w, h, DIRT);
    buf.fill_rect(x + 1, y + 1, w - 2, h - 2, PANEL);
}

// ── Canvas ──────────────────────────────────────────────────────────────────

/// Scales the configured world onto the terminal's half-block pixels.
pub struct TermCanvas {
    buf: PixelBuf,
    world: Size,
    sheet: SpriteSheet,
    buttons: Vec<Size>,
}

impl TermCanvas {
    pub fn new(cols: u16, rows: u16, config: &Config) -> Self {
        let base = config.sprites.button;
        Self {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            world: config.window,
            sheet: config.sprites,
            buttons: config.menu.iter().map(|b| base.scaled(b.scale)).collect(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        let cells = self.buf.render(out)?;
        trace!(cells, "frame presented");
        Ok(())
    }

    fn scale_x(&self) -> f64 {
        self.buf.w as f64 / self.world.w as f64
    }

    fn scale_y(&self) -> f64 {
        self.buf.h as f64 / self.world.h as f64
    }

    fn to_px(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 * self.scale_x()).round() as i32,
            (y as f64 * self.scale_y()).round() as i32,
        )
    }

    /// Pixel extent of a world-size sprite; never smaller than one pixel.
    fn span(&self, size: Size) -> (i32, i32) {
        (
            ((size.w as f64 * self.scale_x()).round() as i32).max(1),
            ((size.h as f64 * self.scale_y()).round() as i32).max(1),
        )
    }

    /// World point under the middle of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f64 + 0.5) / self.scale_x(),
            (row as f64 * 2.0 + 1.0) / self.scale_y(),
        )
    }
}

impl Canvas for TermCanvas {
    fn clear(&mut self, color: Rgb) {
        let bottom = Rgb::lerp(color, WHITE, 128);
        let h = self.buf.h.max(1);
        for y in 0..self.buf.h {
            let c = Rgb::lerp(color, bottom, (y * 256 / h) as u16);
            for x in 0..self.buf.w {
                self.buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn blit(&mut self, sprite: Sprite, x: i32, y: i32) {
        let (px, py) = self.to_px(x, y);
        match sprite {
            Sprite::FlyerUp | Sprite::FlyerDown | Sprite::FlyerDead => {
                let (w, h) = self.span(self.sheet.flyer);
                draw_flyer(&mut self.buf, px, py, w, h, sprite);
            }
            Sprite::Pipe { struck, flipped } => {
                let (w, h) = self.span(self.sheet.pipe);
                draw_pipe(&mut self.buf, px, py, w, h, struck, flipped);
            }
            Sprite::FloorTile => {
                let (w, h) = self.span(self.sheet.floor_tile);
                draw_floor_tile(&mut self.buf, px, py, w, h);
            }
            Sprite::Button(i) => {
                let Some(&size) = self.buttons.get(i) else {
                    return;
                };
                let (w, h) = self.span(size);
                draw_button(&mut self.buf, px, py, w, h);
            }
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        let (px, py) = self.to_px(x, y);
        for (i, ch) in text.chars().enumerate() {
            if let Some(g) = glyph(ch) {
                draw_glyph(&mut self.buf, px + i as i32 * GLYPH_ADVANCE, py, g, color);
            }
        }
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        let w = (text.chars().count() as i32 * GLYPH_ADVANCE - 1).max(0);
        (
            (w as f64 / self.scale_x()).ceil() as i32,
            (GLYPH_HEIGHT as f64 / self.scale_y()).ceil() as i32,
        )
    }
}

// ── Input ───────────────────────────────────────────────────────────────────

/// Maps a terminal event to a game input. Resizes are handled by the caller.
pub fn translate(event: &Event, canvas: &TermCanvas, menu: &MenuState) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Input::Quit)
            }
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                Some(Input::PrimaryAction(menu.primary_point()))
            }
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Input::PrimaryAction(
                canvas.to_world(mouse.column, mouse.row),
            )),
            _ => None,
        },
        _ => None,
    }
}

// ── Frame pacing ────────────────────────────────────────────────────────────

pub struct FrameLimiter {
    frame: Duration,
    start: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            start: Instant::now(),
        }
    }

    /// Sleeps out whatever is left of the current frame, then starts the next.
    pub fn tick(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};
    use flappy_arcade::MenuAction;

    fn canvas(config: &Config) -> TermCanvas {
        TermCanvas::new(160, 45, config)
    }

    #[test]
    fn test_size_check() {
        assert_eq!(check_size(80, 24), Ok(()));
        assert_eq!(
            check_size(39, 24),
            Err(PlatformError::TooSmall { cols: 39, rows: 24 })
        );
        assert!(check_size(80, 14).is_err());
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('0'), Some(&DIGITS[0]));
        assert_eq!(glyph('s'), glyph('S'));
        assert_eq!(glyph(':'), Some(&COLON));
        assert_eq!(glyph(' '), None);
    }

    #[test]
    fn test_set_clips_out_of_bounds() {
        let mut buf = PixelBuf::new(4, 4);
        buf.set(-1, 0, WHITE);
        buf.set(0, 4, WHITE);
        buf.fill_rect(2, 2, 10, 10, WHITE);
        assert_eq!(buf.get(3, 3), WHITE);
        assert_eq!(buf.get(0, 0), SHADOW);
    }

    #[test]
    fn test_render_sends_only_changed_cells() {
        let mut buf = PixelBuf::new(3, 4);
        buf.set(1, 0, WHITE);

        let mut out = Vec::new();
        assert_eq!(buf.render(&mut out).unwrap(), 6);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[1;1H"));
        assert!(text.contains("\x1b[2;1H"));
        assert!(text.contains('\u{2580}'));

        let mut out = Vec::new();
        assert_eq!(buf.render(&mut out).unwrap(), 0);
        assert!(!String::from_utf8(out).unwrap().contains(' '));

        buf.set(2, 3, WHITE);
        let mut out = Vec::new();
        assert_eq!(buf.render(&mut out).unwrap(), 1);
        assert!(String::from_utf8(out).unwrap().contains("\x1b[2;3H"));
    }

    #[test]
    fn test_resize_redraws_everything() {
        let mut buf = PixelBuf::new(3, 4);
        buf.render(&mut Vec::new()).unwrap();
        buf.resize(5, 6);
        assert_eq!(buf.render(&mut Vec::new()).unwrap(), 15);
    }

    #[test]
    fn test_world_round_trip_hits_buttons() {
        let config = Config::default();
        let canvas = canvas(&config);
        let menu = MenuState::new(&config);

        let start = menu.buttons()[0].rect;
        let (col, row) = canvas.to_px(start.center().x as i32, start.center().y as i32);
        let p = canvas.to_world(col as u16, (row / 2) as u16);
        assert_eq!(menu.hit_test(p), Some(MenuAction::Start));
    }

    #[test]
    fn test_translate_keys_and_clicks() {
        let config = Config::default();
        let canvas = canvas(&config);
        let menu = MenuState::new(&config);

        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(
            translate(&key(KeyCode::Char('q')), &canvas, &menu),
            Some(Input::Quit)
        );
        assert_eq!(
            translate(
                &Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
                &canvas,
                &menu
            ),
            Some(Input::Quit)
        );
        assert_eq!(
            translate(&key(KeyCode::Char(' ')), &canvas, &menu),
            Some(Input::PrimaryAction(menu.primary_point()))
        );
        assert_eq!(translate(&key(KeyCode::Char('x')), &canvas, &menu), None);

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(&click, &canvas, &menu),
            Some(Input::PrimaryAction(canvas.to_world(10, 5)))
        );
    }

    #[test]
    fn test_blit_draws_inside_buffer() {
        let config = Config::default();
        let mut canvas = canvas(&config);
        canvas.clear(config.palette.background);
        let before = canvas.buf.px.clone();

        canvas.blit(Sprite::FlyerDown, 400, 300);
        canvas.blit(Sprite::Pipe { struck: true, flipped: false }, 600, 400);
        canvas.blit(Sprite::Button(9), 0, 0);
        assert_ne!(canvas.buf.px, before);
        assert_eq!(canvas.buf.px.len(), 160 * 90);
    }
}
