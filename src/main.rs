//! Kaleidoscope viewer.
//!
//! ```text
//! kaleidoscope [CONFIG.json]
//! kaleidoscope --export DIR FRAMES [CONFIG.json]
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) for status output.

use std::process::ExitCode;

use kaleidoscope::{export_frames, KaleidoscopeConfig};

enum Command {
    Window { config: Option<String> },
    Export { dir: String, frames: u32, config: Option<String> },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    match args.next() {
        Some(flag) if flag == "--export" => {
            let dir = args.next().ok_or("--export needs an output directory")?;
            let frames = args
                .next()
                .ok_or("--export needs a frame count")?
                .parse()
                .map_err(|_| "frame count must be a non-negative integer".to_string())?;
            Ok(Command::Export {
                dir,
                frames,
                config: args.next(),
            })
        }
        Some(flag) if flag == "--help" || flag == "-h" => Err(
            "usage: kaleidoscope [CONFIG.json]\n       kaleidoscope --export DIR FRAMES [CONFIG.json]"
                .to_string(),
        ),
        config => Ok(Command::Window { config }),
    }
}

fn load_config(path: Option<&str>) -> Result<KaleidoscopeConfig, kaleidoscope::ConfigError> {
    match path {
        Some(path) => {
            log::info!("loading config from {}", path);
            KaleidoscopeConfig::load(path)
        }
        None => Ok(KaleidoscopeConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<(), Box<dyn std::error::Error>> = match command {
        Command::Window { config } => load_config(config.as_deref())
            .map_err(Into::into)
            .and_then(|config| kaleidoscope::run(config).map_err(Into::into)),
        Command::Export {
            dir,
            frames,
            config,
        } => load_config(config.as_deref())
            .map_err(Into::into)
            .and_then(|config| export_frames(config, frames, &dir).map(|_| ()).map_err(Into::into)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
