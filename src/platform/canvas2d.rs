//! HTML canvas backend for [`Canvas`]

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::render::{Canvas, Color, Rect, Sprite, Stroke, TextStyle, css_color};

/// 2D context plus the sprite images
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl Canvas2d {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.asset_path());
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Failed to create image for {:?}: {:?}", sprite, e),
            }
        }
        Self { ctx, images }
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&css_color(stroke.color));
        self.ctx.set_line_width(stroke.line_width as f64);
        let dash = js_sys::Array::new();
        if let Some([on, off]) = stroke.dash {
            dash.push(&JsValue::from_f64(on as f64));
            dash.push(&JsValue::from_f64(off as f64));
        }
        let _ = self.ctx.set_line_dash(&dash);
        self.ctx.stroke_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        let Some(img) = self.images.get(&sprite) else { return };
        // Images that have not finished loading are skipped this frame
        if !img.complete() {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_fill_style_str(&css_color(style.color));
        self.ctx.set_font(&format!("{}px Arial", style.size_px));
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
