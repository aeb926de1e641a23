use std::path::PathBuf;

use cinecolor::{AnalysisError, AnalysisSessionBuilder, Configuration};
use tracing::{Level, warn};

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AnalysisError> {
    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: cinecolor <image-path> [config-path]");
        std::process::exit(2);
    };
    let config_path = args.next().map(PathBuf::from);

    let configuration = Configuration::load(config_path.as_deref())?;
    init_logging(configuration.tracing_level());

    let bytes = tokio::fs::read(&image_path).await?;
    let session = AnalysisSessionBuilder::new(configuration).build()?;

    match session.submit(bytes).await? {
        Some(report) => println!("{}", report.to_json_pretty()?),
        None => warn!("Analysis of {} was superseded", image_path.display()),
    }
    Ok(())
}
