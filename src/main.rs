use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;

use wayfinder::core::config::{self, CliOverrides};
use wayfinder::host::{JsonLinesHost, channel};
use wayfinder::replay;
use wayfinder::Navigation;

#[derive(Parser)]
#[command(name = "wayfinder", about = "Replay navigation scripts against a route tree")]
struct Args {
    /// Route definition file (.toml or .json)
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Script to replay. Reads stdin when omitted.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Config file, instead of ~/.wayfinder/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(short, long)]
    log_level: Option<String>,

    /// Register every screen component with the host before replaying
    #[arg(long)]
    register: bool,
}

fn read_script(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            Ok(script)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides { log_level: args.log_level.clone(), routes_file: args.routes.clone() },
    );

    // File logger; stdout carries the host commands.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = resolved.log_level.parse().unwrap_or(LevelFilter::Info);
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!("Wayfinder starting with routes {}", resolved.routes_file.display());

    let def = config::load_routes(&resolved.routes_file)?;
    let steps = replay::parse_script(&read_script(args.script.as_ref())?)?;

    let mut nav = Navigation::with_settings(&def, JsonLinesHost::new(io::stdout()), resolved.settings())?;
    if args.register {
        let mut registrar = JsonLinesHost::new(io::stdout());
        nav.register_components(&mut registrar, true);
    }

    let (tx, mut rx) = channel();
    let summary = replay::run(&mut nav, &steps, &tx, &mut rx);
    drop(tx);
    let late = nav.pump(&mut rx).await;

    log::info!("Done: {} steps, {} failures, {} late events", summary.steps, summary.failures.len(), late);
    for (index, err) in &summary.failures {
        eprintln!("step {}: {}", index + 1, err);
    }
    Ok(())
}
