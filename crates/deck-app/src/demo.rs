//! Demo content archive.
//!
//! Seeds an in-memory VFS with a menu tree, text and markdown pages, a
//! generated image, and PCM audio payloads so the shell runs without any
//! files on disk. The layout mirrors what a real content archive under
//! `db/` looks like: one descriptor per menu, payload folders per kind,
//! and a manifest for the autoloaded track list.

use deck_core::vfs::{MemoryVfs, Vfs};

/// Create demo VFS content for the default configuration.
pub fn populate_demo_vfs(vfs: &mut MemoryVfs) {
    vfs.insert_str(
        "db/db.json",
        r#"{
            "items": [
                {"label": "EXIT", "type": "return", "target": "index.html"},
                {"label": "FILES", "target": "db/files.json"},
                {"label": "NOTES", "target": "db/notes.json"},
                {"label": "GALLERY", "target": "db/gallery.json"},
                {"label": "MUSIC", "target": "db/music.json"}
            ],
            "variant": "locked",
            "return": "index.html"
        }"#,
    );

    vfs.insert_str(
        "db/files.json",
        r#"{
            "items": [
                {"label": "welcome.txt"},
                {"label": "controls.txt"},
                {"label": "about.txt"}
            ],
            "variant": "scroll",
            "filetype": "text",
            "return": "db/db.json"
        }"#,
    );
    vfs.insert_str(
        "db/text/welcome.txt",
        "Welcome to DATADECK.\n\nPick a file from any menu to open it in\nthe viewer. Audio tracks get a control\nsurface with seek, volume and speed.",
    );
    vfs.insert_str(
        "db/text/controls.txt",
        "Arrows  move the selection / scroll\nEnter   activate\nBack    close / previous menu",
    );
    vfs.insert_str("db/text/about.txt", "DATADECK demo archive v0.1.0");

    vfs.insert_str(
        "db/notes.json",
        r#"{
            "items": [
                {"label": "readme.md"}
            ],
            "variant": "scroll",
            "filetype": "md",
            "return": "db/db.json"
        }"#,
    );
    vfs.insert_str(
        "db/md/readme.md",
        "# DATADECK\n\nA keyboard-driven shell over a content archive.\n\n## Layout\n\nplain body text\n\n    indented lines render as code\n",
    );

    vfs.insert_str(
        "db/gallery.json",
        r#"{
            "items": [
                {"label": "gradient.png"}
            ],
            "variant": "scroll",
            "filetype": "image",
            "return": "db/db.json"
        }"#,
    );
    vfs.write("db/png/gradient.png", &gradient_png(64, 64)).unwrap();

    vfs.insert_str(
        "db/music.json",
        r#"{
            "items": [],
            "variant": "scroll",
            "filetype": "audio",
            "autoload": true,
            "folder": "tracks",
            "return": "db/db.json"
        }"#,
    );
    vfs.insert_str("db/tracks/files.json", r#"["ambient.wav", "pulse.wav"]"#);
    vfs.write("db/tracks/ambient.wav", &sine_wav(220.0, 4000)).unwrap();
    vfs.write("db/tracks/pulse.wav", &sine_wav(440.0, 2000)).unwrap();

    // Navigation cues at the paths the default config names. Payloads are
    // probed by content, so the extension is free to disagree.
    vfs.write("assets/sounds/beep.mp3", &sine_wav(880.0, 40)).unwrap();
    vfs.write("assets/sounds/blip.mp3", &sine_wav(660.0, 60)).unwrap();
    vfs.write("assets/sounds/click2.mp3", &sine_wav(520.0, 90)).unwrap();
}

/// Render a mono 16-bit PCM WAV tone with a linear fade-out.
fn sine_wav(freq: f32, ms: u32) -> Vec<u8> {
    const RATE: u32 = 22_050;
    let frames = (RATE * ms / 1000) as usize;
    let data_len = (frames * 2) as u32;
    let mut out = Vec::with_capacity(44 + frames * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&RATE.to_le_bytes());
    out.extend_from_slice(&(RATE * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..frames {
        let t = i as f32 / RATE as f32;
        let env = 1.0 - i as f32 / frames.max(1) as f32;
        let s = (t * freq * std::f32::consts::TAU).sin() * env * 0.4;
        out.extend_from_slice(&((s * f32::from(i16::MAX)) as i16).to_le_bytes());
    }
    out
}

/// Encode a small RGBA gradient as a PNG.
fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            rgba.push((x * 255 / width.max(1)) as u8);
            rgba.push((y * 255 / height.max(1)) as u8);
            rgba.push(160);
            rgba.push(255);
        }
    }
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&rgba).unwrap();
    drop(writer);
    out
}
