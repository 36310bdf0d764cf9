//! The render sink. Game objects only ever push draw calls into a [`Canvas`];
//! nothing reads pixels back.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

/// Sprite handles. Sizes come from the configured `SpriteSheet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    FlyerUp,
    FlyerDown,
    /// Upside-down flyer lying on the floor.
    FlyerDead,
    /// `flipped` pipes hang from the ceiling with their cap at the bottom.
    Pipe { struck: bool, flipped: bool },
    FloorTile,
    /// Index into the configured menu buttons.
    Button(usize),
}

pub trait Canvas {
    fn clear(&mut self, color: Rgb);

    /// Draws `sprite` with its top-left corner at `(x, y)` in world units.
    fn blit(&mut self, sprite: Sprite, x: i32, y: i32);

    fn text(&mut self, text: &str, x: i32, y: i32, color: Rgb);

    /// Extent of `text` in world units, for centering.
    fn text_size(&self, text: &str) -> (i32, i32);
}

/// Records draw calls; used by tests to check what a frame draws.
#[derive(Debug, Default)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Blit(Sprite, i32, i32),
    Text(String, i32, i32),
}

impl DrawLog {
    pub fn blits(&self, wanted: impl Fn(&Sprite) -> bool) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Blit(s, _, _) if wanted(s)))
            .count()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, DrawCall::Text(t, _, _) if t.contains(needle)))
    }
}

impl Canvas for DrawLog {
    fn clear(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn blit(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.calls.push(DrawCall::Blit(sprite, x, y));
    }

    fn text(&mut self, text: &str, x: i32, y: i32, _color: Rgb) {
        self.calls.push(DrawCall::Text(text.to_string(), x, y));
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * 10, 16)
    }
}
