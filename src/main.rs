use clap;
use log::{self, error, info};
use simple_logger;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use rust_metrics::error::Result;
use rust_metrics::managers::config::ConfigManager;
use rust_metrics::managers::parser::ParserChain;

#[tokio::main]
async fn main() {
    let app = clap::Command::new("rust-metrics")
        .version("0.1.0")
        .about("Formats metric events read from stdin as CSV lines")
        .arg(clap::arg!(config: -c --config <config> "config file")
            .required(true))
        .arg(clap::arg!(loglevel: -l --loglevel <LOGLEVEL> "loglevel")
        .value_parser([
                clap::builder::PossibleValue::new("error"),
                clap::builder::PossibleValue::new("warn"),
                clap::builder::PossibleValue::new("info"),
                clap::builder::PossibleValue::new("debug"),

            ]))
        .get_matches();

    let level = match app.get_one::<String>("loglevel").map(|s| s.as_str()).unwrap_or("info") {
        "error" => log::Level::Error,
        "warn" => log::Level::Warn,
        "debug" => log::Level::Debug,
        _ => log::Level::Info
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    let config_file = match app.get_one::<String>("config") {
        Some(config_file) => config_file,
        None => std::process::exit(2)
    };
    if let Err(e) = run(config_file).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config_file: &str) -> Result<()> {
    let manager = ConfigManager::new(ParserChain::default())
        .start(config_file)
        .await?;
    let reader = manager.reader()?;
    let mut formatter = manager.formatter()?;
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    while let Some(line) = lines.next_line().await? {
        if let Some(event) = reader.read_line(&line) {
            if let Some(output) = formatter.format(&*event) {
                stdout.write_all(output.as_bytes()).await?;
            }
        }
    }
    stdout.flush().await?;
    info!("Processed {} lines", reader.line_number());
    Ok(())
}
