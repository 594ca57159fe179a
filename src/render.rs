//! Draw commands and the renderer interface
//!
//! The simulation never touches a display surface. Each tick records a
//! [`Frame`]: screen-space draw commands, audio cues and gameplay events.
//! A host hands the frame to a [`Canvas`] implementation (HTML canvas in the
//! browser build) and to an [`crate::audio::AudioSink`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::AudioCue;
use crate::sim::GameEvent;
use crate::sim::collision::Bounds;

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = [0.529, 0.808, 0.922, 1.0];
    pub const ARENA_BORDER: Color = [1.0, 1.0, 0.0, 1.0];
    pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER_BACKDROP: Color = [1.0, 100.0 / 255.0, 100.0 / 255.0, 1.0];
}

/// Opaque asset handle; the host maps these to images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Item,
    Chaser,
    Evader,
    Random,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Player,
        Sprite::Item,
        Sprite::Chaser,
        Sprite::Evader,
        Sprite::Random,
    ];

    /// Asset path relative to the page
    pub fn asset_path(self) -> &'static str {
        match self {
            Sprite::Player => "assets/player.png",
            Sprite::Item => "assets/item.png",
            Sprite::Chaser => "assets/chaser.png",
            Sprite::Evader => "assets/evader.png",
            Sprite::Random => "assets/random.png",
        }
    }
}

/// Screen-space rectangle, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a centered box
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let min = bounds.min();
        Self::new(min.x, min.y, bounds.size * 2.0, bounds.size * 2.0)
    }
}

/// Outline style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub line_width: f32,
    /// Dash pattern (on, off); solid when `None`
    pub dash: Option<[f32; 2]>,
}

/// Text style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub size_px: f32,
}

/// A single screen-space drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    Sprite { sprite: Sprite, rect: Rect },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Drawing surface supplied by the host
pub trait Canvas {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// Everything one tick asks the outside world to do
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub audio: Vec<AudioCue>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, viewport: Vec2) {
        self.commands.push(DrawCommand::Clear {
            width: viewport.x,
            height: viewport.y,
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    /// Draw `sprite` covering a centered box
    pub fn sprite(&mut self, sprite: Sprite, bounds: &Bounds) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            rect: Rect::from_bounds(bounds),
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            style,
        });
    }

    pub fn cue(&mut self, cue: AudioCue) {
        self.audio.push(cue);
    }

    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Number of sprite draws, handy for inspecting a frame
    pub fn sprite_count(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }

    /// Replay the draw commands onto a canvas, in order
    pub fn present<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear { width, height } => canvas.clear(*width, *height),
                DrawCommand::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, stroke } => canvas.stroke_rect(*rect, stroke),
                DrawCommand::Sprite { sprite, rect } => canvas.draw_sprite(*sprite, *rect),
                DrawCommand::Text { text, pos, style } => canvas.draw_text(text, *pos, style),
            }
        }
    }
}

/// CSS color string for a [`Color`]
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, width: f32, height: f32) {
            self.calls.push(format!("clear {width}x{height}"));
        }
        fn fill_rect(&mut self, rect: Rect, _color: Color) {
            self.calls.push(format!("fill {} {}", rect.x, rect.y));
        }
        fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
            self.calls.push(format!("stroke {} {}", rect.width, stroke.line_width));
        }
        fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
            self.calls.push(format!("{sprite:?} {} {} {}", rect.x, rect.y, rect.width));
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _style: &TextStyle) {
            self.calls.push(text.to_string());
        }
    }

    #[test]
    fn test_present_replays_in_order() {
        let mut frame = Frame::new();
        frame.clear(Vec2::new(800.0, 600.0));
        frame.sprite(Sprite::Item, &Bounds::new(Vec2::new(50.0, 60.0), 10.0));
        frame.text("Score: 0", Vec2::new(20.0, 30.0), TextStyle {
            color: colors::HUD_TEXT,
            size_px: 20.0,
        });

        let mut recorder = Recorder::default();
        frame.present(&mut recorder);
        assert_eq!(recorder.calls, vec!["clear 800x600", "Item 40 50 20", "Score: 0"]);
        assert_eq!(frame.sprite_count(Sprite::Item), 1);
        assert_eq!(frame.sprite_count(Sprite::Player), 0);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(colors::ARENA_BORDER), "rgba(255, 255, 0, 1)");
        assert_eq!(css_color(colors::GAME_OVER_BACKDROP), "rgba(255, 100, 100, 1)");
    }
}
