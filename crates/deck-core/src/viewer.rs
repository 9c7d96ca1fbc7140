//! The file viewer.
//!
//! Renders one payload -- text, markdown, image, or audio -- inside a
//! fixed panel with a synthetic scrollbar. Fetch failures surface as a
//! visible message in the content area rather than failing the shell.
//! Audio payloads delegate playback and button focus to the audio control
//! surface, which lives and dies with the viewer.

use deck_audio::AudioSurface;
use deck_types::backend::{AudioBackend, SdiBackend, TextureId};
use deck_types::error::{DeckError, Result};
use deck_ui::scrollbar::ThumbMetrics;
use deck_ui::DrawContext;
use deck_vfs::Vfs;

use crate::descriptor::FileKind;
use crate::markdown::{Block, Formatter, LineFormatter};
use crate::nav::SCROLL_STEP;

/// Height of one rendered text line.
pub const LINE_HEIGHT: u32 = 16;
/// Height of the viewer header strip.
pub const HEADER_HEIGHT: u32 = 20;
/// Width of the synthetic scrollbar track.
pub const SCROLLBAR_WIDTH: u32 = 6;

/// Style of a rendered content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Body,
    Heading,
    Code,
    Error,
}

/// One display line of text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

/// What the viewer currently holds.
pub enum ViewerContent {
    Text(Vec<Line>),
    Image {
        texture: TextureId,
        width: u32,
        height: u32,
    },
    Audio(Box<AudioSurface>),
}

fn text_lines(text: &str) -> Vec<Line> {
    text.lines()
        .map(|l| Line {
            text: l.to_string(),
            style: LineStyle::Body,
        })
        .collect()
}

fn markdown_lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    for block in LineFormatter.render(text) {
        let style = match block {
            Block::Heading { .. } => LineStyle::Heading,
            Block::Code(_) => LineStyle::Code,
            _ => LineStyle::Body,
        };
        for text in crate::markdown::block_lines(&block) {
            lines.push(Line { text, style });
        }
    }
    lines
}

fn error_lines(message: &str) -> Vec<Line> {
    vec![Line {
        text: format!("Failed to load file: {message}"),
        style: LineStyle::Error,
    }]
}

/// Decode a PNG payload into RGBA pixels.
fn decode_png(data: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder
        .read_info()
        .map_err(|e| DeckError::Asset(format!("png: {e}")))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| DeckError::Asset(format!("png: {e}")))?;
    buf.truncate(info.buffer_size());
    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => {
            let mut out = Vec::with_capacity(buf.len() / 3 * 4);
            for px in buf.chunks_exact(3) {
                out.extend_from_slice(px);
                out.push(255);
            }
            out
        },
        other => {
            return Err(DeckError::Asset(format!(
                "unsupported png color type: {other:?}"
            )));
        },
    };
    Ok((info.width, info.height, rgba))
}

/// One open payload.
pub struct FileViewer {
    label: String,
    kind: FileKind,
    path: String,
    content: ViewerContent,
    /// Raw payload bytes, kept for the audio export control.
    payload: Option<Vec<u8>>,
    scroll_top: u32,
    viewport_h: u32,
    /// Scrollbar thumb drag in progress.
    pub dragging: bool,
}

impl FileViewer {
    /// Open a payload. The path resolves as
    /// `<base>/<folder-or-filetype-default>/<label>`; fetch and decode
    /// failures become visible error content.
    pub fn open(
        vfs: &dyn Vfs,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
        base: &str,
        folder: Option<&str>,
        label: &str,
        kind: FileKind,
    ) -> Self {
        let folder = folder.unwrap_or_else(|| kind.default_folder());
        let path = deck_vfs::join(&deck_vfs::join(base, folder), label);
        let mut payload = None;

        let content = match kind {
            FileKind::Text => match vfs.read_to_string(&path) {
                Ok(text) => ViewerContent::Text(text_lines(&text)),
                Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
            },
            FileKind::Md => match vfs.read_to_string(&path) {
                Ok(text) => ViewerContent::Text(markdown_lines(&text)),
                Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
            },
            FileKind::Image => match vfs.read(&path).and_then(|data| decode_png(&data)) {
                Ok((width, height, rgba)) => match render.load_texture(width, height, &rgba) {
                    Ok(texture) => ViewerContent::Image {
                        texture,
                        width,
                        height,
                    },
                    Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
                },
                Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
            },
            FileKind::Audio => match vfs.read(&path) {
                Ok(data) => match AudioSurface::open(audio, &data) {
                    Ok(surface) => {
                        payload = Some(data);
                        ViewerContent::Audio(Box::new(surface))
                    },
                    Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
                },
                Err(e) => ViewerContent::Text(error_lines(&e.to_string())),
            },
        };

        Self {
            label: label.to_string(),
            kind,
            path,
            content,
            payload,
            scroll_top: 0,
            viewport_h: 280,
            dragging: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn content(&self) -> &ViewerContent {
        &self.content
    }

    /// Raw payload bytes (audio only).
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn surface(&self) -> Option<&AudioSurface> {
        match &self.content {
            ViewerContent::Audio(s) => Some(s),
            _ => None,
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut AudioSurface> {
        match &mut self.content {
            ViewerContent::Audio(s) => Some(s),
            _ => None,
        }
    }

    pub fn has_audio(&self) -> bool {
        matches!(self.content, ViewerContent::Audio(_))
    }

    /// Total content height in pixels.
    pub fn content_height(&self) -> u32 {
        match &self.content {
            ViewerContent::Text(lines) => lines.len() as u32 * LINE_HEIGHT,
            ViewerContent::Image { height, .. } => *height,
            ViewerContent::Audio(_) => 0,
        }
    }

    fn max_scroll(&self) -> u32 {
        self.content_height().saturating_sub(self.viewport_h)
    }

    /// Scroll by a signed pixel delta, clamped to the content bounds.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = self.scroll_top as i64 + delta as i64;
        self.scroll_top = next.clamp(0, self.max_scroll() as i64) as u32;
    }

    /// One keypress worth of scrolling.
    pub fn scroll_step(&mut self, down: bool) {
        self.scroll_by(if down {
            SCROLL_STEP as i32
        } else {
            -(SCROLL_STEP as i32)
        });
    }

    /// Current thumb geometry for a track of the given height.
    pub fn thumb(&self, track_h: u32) -> ThumbMetrics {
        ThumbMetrics::compute(track_h, self.viewport_h, self.content_height(), self.scroll_top)
    }

    /// Reposition from a thumb drag (pointer Y relative to the track top).
    pub fn drag_to(&mut self, y_rel: i32, track_h: u32) {
        let metrics = self.thumb(track_h);
        self.scroll_top =
            metrics.scroll_for_drag(y_rel, track_h, self.viewport_h, self.content_height());
    }

    /// Tear down the payload: the audio surface closes with the viewer,
    /// image textures are released.
    pub fn close(&mut self, render: &mut dyn SdiBackend, audio: &mut dyn AudioBackend) {
        self.dragging = false;
        match &mut self.content {
            ViewerContent::Audio(surface) => {
                if let Err(e) = surface.close(audio) {
                    log::warn!("audio teardown failed: {e}");
                }
            },
            ViewerContent::Image { texture, .. } => {
                if let Err(e) = render.destroy_texture(*texture) {
                    log::warn!("texture teardown failed: {e}");
                }
            },
            ViewerContent::Text(_) => {},
        }
    }

    /// Draw the viewer panel: header, clipped content, scrollbar.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        ctx.backend.fill_rect(x, y, w, h, ctx.theme.viewer_bg)?;
        ctx.backend.draw_text(
            &self.label,
            x + ctx.theme.spacing_md as i32,
            y + (HEADER_HEIGHT as i32 - ctx.theme.font_size_md as i32) / 2,
            ctx.theme.font_size_md,
            ctx.theme.accent,
        )?;

        let cx = x + ctx.theme.spacing_md as i32;
        let cy = y + HEADER_HEIGHT as i32;
        let cw = w.saturating_sub(ctx.theme.spacing_md as u32 * 2 + SCROLLBAR_WIDTH);
        let ch = h.saturating_sub(HEADER_HEIGHT);
        self.viewport_h = ch;
        // Clamp in case content shrank relative to the last layout.
        self.scroll_by(0);

        ctx.backend.push_clip_rect(cx, cy, cw, ch)?;
        match &self.content {
            ViewerContent::Text(lines) => {
                let first = (self.scroll_top / LINE_HEIGHT) as usize;
                let visible = (ch / LINE_HEIGHT) as usize + 2;
                for (i, line) in lines.iter().enumerate().skip(first).take(visible) {
                    let ly = cy + (i as u32 * LINE_HEIGHT) as i32 - self.scroll_top as i32;
                    let color = match line.style {
                        LineStyle::Body => ctx.theme.text_primary,
                        LineStyle::Heading => ctx.theme.accent,
                        LineStyle::Code => ctx.theme.text_secondary,
                        LineStyle::Error => ctx.theme.error,
                    };
                    ctx.backend.draw_text_ellipsis(
                        &line.text,
                        cx,
                        ly,
                        ctx.theme.font_size_md,
                        color,
                        cw,
                    )?;
                }
            },
            ViewerContent::Image {
                texture,
                width,
                height,
            } => {
                // Contain within the pane, never crop.
                let scale = (cw as f32 / *width as f32)
                    .min(ch as f32 / *height as f32)
                    .min(1.0);
                let dw = (*width as f32 * scale) as u32;
                let dh = (*height as f32 * scale) as u32;
                let ix = cx + deck_ui::layout::center(cw, dw);
                let iy = cy + deck_ui::layout::center(ch, dh);
                ctx.backend.blit(*texture, ix, iy, dw, dh)?;
            },
            ViewerContent::Audio(surface) => {
                surface.draw(ctx, cx, cy + ctx.theme.spacing_md as i32, cw)?;
            },
        }
        ctx.backend.pop_clip_rect()?;

        // Synthetic scrollbar along the right edge.
        let track_x = x + w as i32 - SCROLLBAR_WIDTH as i32;
        let metrics = self.thumb(ch);
        ctx.backend
            .fill_rect(track_x, cy, SCROLLBAR_WIDTH, ch, ctx.theme.scrollbar_track)?;
        let thumb_color = if self.dragging {
            ctx.theme.scrollbar_thumb_hover
        } else {
            ctx.theme.scrollbar_thumb
        };
        ctx.backend.fill_rect(
            track_x,
            cy + metrics.top as i32,
            SCROLLBAR_WIDTH,
            metrics.height,
            thumb_color,
        )?;
        Ok(())
    }
}
