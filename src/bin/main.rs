use cockpit_web::{dial, editor, logger};
use log::{LevelFilter, error, info};

const TITLE: &str = "Cockpit";

fn log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn main() {
    logger::init(log_level());
    info!("{} boot: version={}", TITLE, env!("CARGO_PKG_VERSION"));

    if let Err(err) = dial::mount() {
        error!("dial mount failed: {:?}", err);
    }

    if editor::requested() {
        info!("editor requested");
        if let Err(err) = editor::open() {
            error!("editor open failed: {:?}", err);
        }
    }
}
