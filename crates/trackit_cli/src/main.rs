//! Line-oriented TrackIt shell.
//!
//! # Responsibility
//! - Load preferences, start logging and read the saved Track.
//! - Feed stdin lines to `Logic` and print the feedback.

use log::warn;
use std::io::{self, BufRead, Write};
use std::path::Path;
use trackit_core::{
    init_logging, JsonTrackStorage, Logic, Track, TrackService, UserPrefs, DEFAULT_PREFS_PATH,
};

fn main() {
    let prefs = match UserPrefs::load(Path::new(DEFAULT_PREFS_PATH)) {
        Ok(prefs) => prefs,
        Err(err) => {
            eprintln!("preferences unreadable ({err}); using defaults");
            UserPrefs::default()
        }
    };

    if let Some(log_dir) = &prefs.log_dir {
        if let Err(err) = init_logging(&prefs.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let storage = JsonTrackStorage::new(prefs.track_file_path.clone());
    let track = match storage.read_track() {
        Ok(Some(track)) => track,
        Ok(None) => Track::new(),
        Err(err) => {
            warn!("event=cli_start module=cli status=degraded reason=unreadable_track");
            eprintln!("data file unreadable ({err}); starting with an empty Track");
            Track::new()
        }
    };

    let mut logic = Logic::new(TrackService::new(track, prefs), storage);
    println!("Welcome to TrackIt v{}. Type `help` for commands.", trackit_core::core_version());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("failed to read input: {err}");
                break;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(outcome) => {
                println!("{}", outcome.feedback);
                if outcome.exit {
                    break;
                }
            }
            Err(err) => println!("Error: {err}"),
        }
    }
}
