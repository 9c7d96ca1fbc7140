//! DATADECK desktop entry point.
//!
//! Boots the shell on the demo archive and drives it from stdin, one
//! command per line. Frames render into the software framebuffer; the
//! status line after each command shows where the shell is. Useful for
//! poking at the navigation logic on any machine, display or not.

mod audio;
mod demo;

use std::io::{self, BufRead};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use audio::SilentAudio;
use deck_backend_fb::{FbBackend, QueueInput};
use deck_core::backend::{AudioBackend, InputBackend, SdiBackend};
use deck_core::config::DeckConfig;
use deck_core::input::{Button, InputEvent};
use deck_core::vfs::MemoryVfs;
use deck_core::{Mode, Shell, ShellEvent};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DeckConfig::load(Path::new("deck.toml"))?;
    log::info!(
        "Starting DATADECK ({}x{})",
        config.screen_width,
        config.screen_height,
    );

    let mut render = FbBackend::new(config.screen_width, config.screen_height);
    render.init(config.screen_width, config.screen_height)?;
    let mut audio = SilentAudio::new();
    audio.init()?;

    let mut vfs = MemoryVfs::new();
    demo::populate_demo_vfs(&mut vfs);

    // Resolve the entry descriptor from CLI arg, DECK_MENU env var, or config.
    let entry = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DECK_MENU").ok());
    let mut shell = Shell::boot(&vfs, &mut audio, config, entry.as_deref())?;
    shell.draw(&mut render)?;
    render.swap_buffers()?;

    let mut input = QueueInput::new();
    println!("commands: up down left right enter back quit");
    print_status(&shell);

    let stdin = io::stdin();
    'run: for line in stdin.lock().lines() {
        let line = line?;
        let word = line.trim();
        match parse_command(word) {
            Some(event) => input.push(event),
            None => {
                if !word.is_empty() {
                    log::warn!("unknown command: {word}");
                }
                continue;
            },
        }

        let now = Instant::now();
        for event in input.poll_events() {
            match shell.handle_event(&mut vfs, &mut render, &mut audio, &event, now)? {
                ShellEvent::None => {},
                ShellEvent::Navigate(target) => {
                    log::info!("leaving the shell for {target}");
                    break 'run;
                },
                ShellEvent::Quit => break 'run,
            }
        }
        shell.tick(&mut audio, Instant::now());
        shell.draw(&mut render)?;
        render.swap_buffers()?;
        print_status(&shell);
    }

    render.shutdown()?;
    audio.shutdown()?;
    Ok(())
}

/// Map one stdin word onto an input event.
fn parse_command(word: &str) -> Option<InputEvent> {
    match word {
        "up" | "w" => Some(InputEvent::ButtonPress(Button::Up)),
        "down" | "s" => Some(InputEvent::ButtonPress(Button::Down)),
        "left" | "a" => Some(InputEvent::ButtonPress(Button::Left)),
        "right" | "d" => Some(InputEvent::ButtonPress(Button::Right)),
        "enter" | "confirm" | "e" => Some(InputEvent::ButtonPress(Button::Confirm)),
        "back" | "b" => Some(InputEvent::ButtonPress(Button::Back)),
        "quit" | "q" => Some(InputEvent::Quit),
        _ => None,
    }
}

fn print_status(shell: &Shell) {
    match shell.mode() {
        Mode::Menu => {
            let menu = shell.menu();
            let label = menu
                .selected_item()
                .map_or("-", |item| item.label.as_str());
            println!(
                "[menu {}] {} ({}/{})",
                shell.menu_path(),
                label,
                menu.selected() + 1,
                menu.items().len(),
            );
        },
        Mode::File => {
            if let Some(viewer) = shell.viewer() {
                println!("[file] {}", viewer.path());
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_buttons() {
        assert_eq!(
            parse_command("down"),
            Some(InputEvent::ButtonPress(Button::Down))
        );
        assert_eq!(parse_command("q"), Some(InputEvent::Quit));
        assert_eq!(parse_command("sideways"), None);
    }

    #[test]
    fn demo_archive_boots() {
        let mut vfs = MemoryVfs::new();
        demo::populate_demo_vfs(&mut vfs);
        let mut audio = SilentAudio::new();
        let shell = Shell::boot(&vfs, &mut audio, DeckConfig::default(), None).unwrap();
        assert_eq!(shell.menu_path(), "db/db.json");
        assert_eq!(shell.menu().items().len(), 5);
    }
}
