use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use log::{info, warn};

use polytone::core::{ActiveNotes, AudioEngine, RenderConfig};
use polytone::messaging::{Command, CommandBus};

fn main() -> Result<()> {
    env_logger::init();

    let config = match RenderConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("config unusable ({err:#}), using defaults");
            RenderConfig::default()
        }
    };
    info!(
        "starting tone server: {} Hz, amplitude {}, attack {} s, release {} s",
        config.sample_rate, config.amplitude, config.attack, config.release
    );

    let notes = Arc::new(ActiveNotes::new());
    let engine = AudioEngine::start(config, Arc::clone(&notes))?;

    let bus = CommandBus::new(Arc::clone(&notes));
    let sender = bus.sender();
    let reader = thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("stdin read failed: {err}");
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Command::parse(line) {
                Ok(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("ignoring malformed command line: {err}"),
            }
        }
    });

    // Runs until the controller hangs up (stdin EOF).
    bus.run();
    reader.join().ok();

    notes.clear();
    drop(engine);
    info!("tone server stopped");
    Ok(())
}
