//! Software RGBA framebuffer renderer.
//!
//! All drawing writes into an in-memory RGBA pixel buffer with source-over
//! alpha blending and a nestable clip stack. Text comes from the shared 8x8
//! bitmap font, integer-scaled by the requested font size. A dirty flag
//! tracks whether the buffer changed since the host last read it.

use std::rc::Rc;

use deck_types::backend::{Color, SdiBackend, TextureId};
use deck_types::bitmap_font;
use deck_types::error::{DeckError, Result};

/// A stored texture for later blitting.
struct Texture {
    width: u32,
    height: u32,
    data: Rc<Vec<u8>>,
}

#[derive(Clone, Copy)]
struct ClipRect {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
}

/// Intersection of two clip rectangles.
fn intersect_clip(a: &ClipRect, b: &ClipRect) -> Option<ClipRect> {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let x2 = a.x.saturating_add(a.w as i32).min(b.x.saturating_add(b.w as i32));
    let y2 = a.y.saturating_add(a.h as i32).min(b.y.saturating_add(b.h as i32));
    if x2 > x && y2 > y {
        Some(ClipRect {
            x,
            y,
            w: (x2 - x) as u32,
            h: (y2 - y) as u32,
        })
    } else {
        None
    }
}

fn font_scale(font_size: u16) -> i32 {
    if font_size >= 8 { (font_size / 8) as i32 } else { 1 }
}

/// The software framebuffer backend.
pub struct FbBackend {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    dirty: bool,
    textures: Vec<Option<Texture>>,
    clip: Option<ClipRect>,
    clip_stack: Vec<ClipRect>,
}

impl FbBackend {
    /// Create a backend at the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; (width * height * 4) as usize],
            dirty: true,
            textures: Vec::new(),
            clip: None,
            clip_stack: Vec::new(),
        }
    }

    /// Read-only view of the RGBA pixel buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Whether the buffer changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset the dirty flag after the host has consumed the buffer.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Buffer dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Set a single pixel with bounds and clip checks, source-over blended.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        if ux >= self.width || uy >= self.height {
            return;
        }
        if let Some(clip) = &self.clip
            && (x < clip.x
                || y < clip.y
                || ux >= (clip.x as u32).saturating_add(clip.w)
                || uy >= (clip.y as u32).saturating_add(clip.h))
        {
            return;
        }
        let offset = ((uy * self.width + ux) * 4) as usize;
        if color.a == 255 {
            self.buffer[offset] = color.r;
            self.buffer[offset + 1] = color.g;
            self.buffer[offset + 2] = color.b;
            self.buffer[offset + 3] = 255;
        } else if color.a > 0 {
            let sa = color.a as u16;
            let da = 255 - sa;
            self.buffer[offset] =
                ((color.r as u16 * sa + self.buffer[offset] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 1] =
                ((color.g as u16 * sa + self.buffer[offset + 1] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 2] =
                ((color.b as u16 * sa + self.buffer[offset + 2] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 3] = 255;
        }
    }

    fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_pixel(x, y, color);
        }
    }

    /// Texture data via `Rc::clone`; refcount bump, no pixel copy.
    fn get_texture_data(&self, tex: TextureId) -> Result<(u32, u32, Rc<Vec<u8>>)> {
        let texture = self
            .textures
            .get(tex.0 as usize)
            .and_then(|t| t.as_ref())
            .ok_or_else(|| DeckError::Backend(format!("invalid texture id: {}", tex.0)))?;
        Ok((texture.width, texture.height, Rc::clone(&texture.data)))
    }
}

impl SdiBackend for FbBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.buffer = vec![0; (width * height * 4) as usize];
        self.dirty = true;
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            pixel[3] = color.a;
        }
        self.dirty = true;
        Ok(())
    }

    fn blit(&mut self, tex: TextureId, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        let (tex_w, tex_h, tex_data) = self.get_texture_data(tex)?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        for dy in 0..h {
            for dx in 0..w {
                // Nearest-neighbor sample.
                let src_x = (dx * tex_w / w) as usize;
                let src_y = (dy * tex_h / h) as usize;
                let src_offset = (src_y * tex_w as usize + src_x) * 4;
                if src_offset + 3 < tex_data.len() {
                    let color = Color::rgba(
                        tex_data[src_offset],
                        tex_data[src_offset + 1],
                        tex_data[src_offset + 2],
                        tex_data[src_offset + 3],
                    );
                    self.set_pixel(x + dx as i32, y + dy as i32, color);
                }
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    ) -> Result<()> {
        let scale = font_scale(font_size);
        let glyph_w = bitmap_font::GLYPH_WIDTH as i32 * scale;
        let mut cx = x;
        for ch in text.chars() {
            let rows = bitmap_font::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8i32 {
                    if bits & (1 << col) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    cx + col * scale + sx,
                                    y + row as i32 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += glyph_w;
        }
        self.dirty = true;
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId> {
        let expected = (width * height * 4) as usize;
        if rgba_data.len() != expected {
            return Err(DeckError::Backend(format!(
                "texture data size mismatch: expected {expected}, got {}",
                rgba_data.len()
            )));
        }
        let texture = Texture {
            width,
            height,
            data: Rc::new(rgba_data.to_vec()),
        };
        // Reuse freed slots so ids stay dense.
        for (i, slot) in self.textures.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(texture);
                return Ok(TextureId(i as u64));
            }
        }
        let id = self.textures.len();
        self.textures.push(Some(texture));
        Ok(TextureId(id as u64))
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        if let Some(slot) = self.textures.get_mut(tex.0 as usize) {
            *slot = None;
        }
        Ok(())
    }

    fn set_clip_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        self.clip = Some(ClipRect { x, y, w, h });
        Ok(())
    }

    fn reset_clip_rect(&mut self) -> Result<()> {
        self.clip = None;
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size: u16) -> u32 {
        text.chars().count() as u32 * bitmap_font::GLYPH_WIDTH * font_scale(font_size) as u32
    }

    fn read_pixels(&self, x: i32, y: i32, w: u32, h: u32) -> Result<Vec<u8>> {
        let mut out = vec![0u8; (w * h * 4) as usize];
        for row in 0..h {
            let sy = y as i64 + row as i64;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for col in 0..w {
                let sx = x as i64 + col as i64;
                if sx < 0 || sx >= self.width as i64 {
                    continue;
                }
                let src = (sy as usize * self.width as usize + sx as usize) * 4;
                let dst = (row as usize * w as usize + col as usize) * 4;
                out[dst..dst + 4].copy_from_slice(&self.buffer[src..src + 4]);
            }
        }
        Ok(out)
    }

    fn shutdown(&mut self) -> Result<()> {
        self.buffer.clear();
        self.textures.clear();
        self.clip = None;
        self.clip_stack.clear();
        log::info!("framebuffer backend shut down");
        Ok(())
    }

    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        radius: u16,
        color: Color,
    ) -> Result<()> {
        if radius == 0 || w == 0 || h == 0 {
            return self.fill_rect(x, y, w, h, color);
        }
        let r = (radius as u32).min(w / 2).min(h / 2) as i32;

        // Center band at full width.
        for dy in r..(h as i32 - r) {
            self.hline(x, x + w as i32 - 1, y + dy, color);
        }

        // Corner strips via the midpoint circle algorithm.
        let mut cx = 0i32;
        let mut cy = r;
        let mut d = 1 - r;
        while cx <= cy {
            self.hline(x + r - cy, x + w as i32 - 1 - r + cy, y + r - cx, color);
            if cx != 0 {
                self.hline(
                    x + r - cy,
                    x + w as i32 - 1 - r + cy,
                    y + h as i32 - 1 - r + cx,
                    color,
                );
            }
            self.hline(x + r - cx, x + w as i32 - 1 - r + cx, y + h as i32 - 1 - r + cy, color);
            if cx != cy {
                self.hline(x + r - cx, x + w as i32 - 1 - r + cx, y + r - cy, color);
            }
            cx += 1;
            if d < 0 {
                d += 2 * cx + 1;
            } else {
                cy -= 1;
                d += 2 * (cx - cy) + 1;
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn measure_text_height(&self, font_size: u16) -> u32 {
        bitmap_font::GLYPH_HEIGHT * font_scale(font_size) as u32
    }

    fn push_clip_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        let new_clip = ClipRect { x, y, w, h };
        if let Some(current) = self.clip {
            self.clip_stack.push(current);
            self.clip = intersect_clip(&current, &new_clip).or(Some(ClipRect {
                x: 0,
                y: 0,
                w: 0,
                h: 0,
            }));
        } else {
            // Sentinel meaning "no clip was active".
            self.clip_stack.push(ClipRect {
                x: 0,
                y: 0,
                w: self.width,
                h: self.height,
            });
            self.clip = Some(new_clip);
        }
        Ok(())
    }

    fn pop_clip_rect(&mut self) -> Result<()> {
        match self.clip_stack.pop() {
            Some(prev)
                if prev.x == 0 && prev.y == 0 && prev.w == self.width && prev.h == self.height =>
            {
                self.clip = None;
            },
            Some(prev) => self.clip = Some(prev),
            None => self.clip = None,
        }
        Ok(())
    }
}
