//! Headless frame capture.
//!
//! Boots the shell on the demo archive, walks it through a handful of
//! representative states, and saves each rendered frame as a PNG. Run with
//! `cargo run -p deck-app --bin deck-capture [out_dir]`; the default
//! output directory is `captures/`.

mod audio;
mod demo;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;

use audio::SilentAudio;
use deck_backend_fb::FbBackend;
use deck_core::backend::{AudioBackend, SdiBackend};
use deck_core::config::DeckConfig;
use deck_core::input::{Button, InputEvent};
use deck_core::vfs::MemoryVfs;
use deck_core::{Shell, ShellEvent};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "captures".to_string()),
    );
    fs::create_dir_all(&out_dir)?;

    let config = DeckConfig::default();
    let (w, h) = (config.screen_width, config.screen_height);
    let mut render = FbBackend::new(w, h);
    render.init(w, h)?;
    let mut audio = SilentAudio::new();
    audio.init()?;

    let mut vfs = MemoryVfs::new();
    demo::populate_demo_vfs(&mut vfs);
    let mut shell = Shell::boot(&vfs, &mut audio, config, None)?;

    let mut cap = Capture {
        shell: &mut shell,
        vfs: &mut vfs,
        render: &mut render,
        audio: &mut audio,
        w,
        h,
    };

    cap.save(&out_dir.join("01_home.png"))?;

    // FILES menu, then the first text file in the viewer.
    cap.press(Button::Down)?;
    cap.press(Button::Confirm)?;
    cap.save(&out_dir.join("02_files.png"))?;
    cap.press(Button::Confirm)?;
    cap.save(&out_dir.join("03_text_viewer.png"))?;
    cap.press(Button::Back)?;
    cap.press(Button::Back)?;

    // GALLERY image viewer.
    cap.press(Button::Down)?;
    cap.press(Button::Down)?;
    cap.press(Button::Down)?;
    cap.press(Button::Confirm)?;
    cap.press(Button::Confirm)?;
    cap.save(&out_dir.join("04_image_viewer.png"))?;
    cap.press(Button::Back)?;
    cap.press(Button::Back)?;

    // MUSIC control surface.
    cap.press(Button::Down)?;
    cap.press(Button::Down)?;
    cap.press(Button::Down)?;
    cap.press(Button::Down)?;
    cap.press(Button::Confirm)?;
    cap.press(Button::Confirm)?;
    cap.save(&out_dir.join("05_audio_surface.png"))?;

    render.shutdown()?;
    audio.shutdown()?;
    println!("Captures saved to {}/", out_dir.display());
    Ok(())
}

struct Capture<'a> {
    shell: &'a mut Shell,
    vfs: &'a mut MemoryVfs,
    render: &'a mut FbBackend,
    audio: &'a mut SilentAudio,
    w: u32,
    h: u32,
}

impl Capture<'_> {
    fn press(&mut self, button: Button) -> Result<()> {
        let event = self.shell.handle_event(
            self.vfs,
            self.render,
            self.audio,
            &InputEvent::ButtonPress(button),
            Instant::now(),
        )?;
        if event != ShellEvent::None {
            log::warn!("capture walk left the shell: {event:?}");
        }
        Ok(())
    }

    /// Render the current state and save it as a PNG.
    fn save(&mut self, path: &Path) -> Result<()> {
        self.shell.tick(self.audio, Instant::now());
        self.shell.draw(self.render)?;
        self.render.swap_buffers()?;
        let pixels = self.render.read_pixels(0, 0, self.w, self.h)?;
        save_png(path, self.w, self.h, &pixels)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

/// Save RGBA pixel data as a PNG file.
fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
