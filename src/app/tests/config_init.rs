use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::App;
use crate::command::Command;
use crate::config::Config;

fn unique_temp_path(suffix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("usher_app_{suffix}_{}_{}", process::id(), nanos));
    path
}

#[test]
fn auto_start_off_leaves_the_tour_dormant_until_restarted() {
    let mut config = Config::default();
    config.tour.auto_start = false;

    let mut app = App::new(config).expect("app should build");
    app.sync_tour();
    assert!(!app.tour.is_running());

    // The explicit entry point still works.
    app.dispatch_command(Command::RestartTour)
        .expect("dispatch should pass");
    assert!(app.tour.is_running());
}

#[test]
fn unknown_start_screen_is_rejected() {
    let mut app = App::new(Config::default()).expect("app should build");
    assert!(app.goto_start_page("billing").is_err());
    assert!(app.goto_start_page("intake").is_ok());
}

#[test]
fn file_persistence_survives_a_reload_and_restart_clears_it() {
    let state_path = unique_temp_path("progress").join("progress.json");
    let mut config = Config::default();
    config.tour.persistence = "file".to_string();
    config.tour.state_path = Some(state_path.clone());

    // First run: skip the tour, which records completion on disk.
    let mut app = App::new(config.clone()).expect("first app should build");
    app.sync_tour();
    assert!(app.tour.is_running());
    app.dispatch_command(Command::TourSkip)
        .expect("dispatch should pass");
    drop(app);
    assert!(state_path.exists());

    // Second run: the persisted seen flag suppresses the auto start.
    let mut app = App::new(config).expect("second app should build");
    app.sync_tour();
    assert!(!app.tour.is_running());

    // An explicit restart clears the record and reruns the tour.
    app.dispatch_command(Command::RestartTour)
        .expect("dispatch should pass");
    assert!(app.tour.is_running());
    assert!(!state_path.exists());

    let _ = fs::remove_dir_all(state_path.parent().expect("state path should have a parent"));
}
