//! looptick - twelve-pad drum looper in the terminal
//!
//! Run with: cargo run -- [--config looptick.toml] [--verbose]

mod app;
mod audio;
mod pad;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};

use app::App;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use looptick::LoopConfig;

/// Picked up from the working directory when no --config is given
const DEFAULT_CONFIG: &str = "looptick.toml";

fn init_logging(verbose: bool) -> EyreResult<PathBuf> {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let log_path = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("looptick")
        .join("looptick.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let (log_file, log_path) = match File::create(&log_path) {
        Ok(file) => (file, log_path),
        Err(_) => {
            let fallback = std::env::temp_dir().join("looptick.log");
            let file = File::create(&fallback)
                .wrap_err_with(|| format!("cannot create log file {}", fallback.display()))?;
            (file, fallback)
        }
    };

    WriteLogger::init(log_level, Config::default(), log_file)
        .wrap_err("failed to initialize logger")?;

    log::info!("looptick starting (log level: {:?})", log_level);
    Ok(log_path)
}

fn load_config(explicit: Option<&str>) -> EyreResult<LoopConfig> {
    let path = match explicit {
        Some(path) => Path::new(path).to_path_buf(),
        None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => {
            log::info!("no config file, using defaults");
            return Ok(LoopConfig::default());
        }
    };

    let config = LoopConfig::load(&path)
        .wrap_err_with(|| format!("failed to load config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let config_arg = match args.iter().position(|a| a == "--config") {
        Some(i) => Some(
            args.get(i + 1)
                .ok_or_else(|| eyre!("--config needs a path"))?
                .as_str(),
        ),
        None => None,
    };

    let log_path = init_logging(verbose)?;
    let config = load_config(config_arg)?;

    App::new(config).run()?;
    println!("log written to {}", log_path.display());
    Ok(())
}
