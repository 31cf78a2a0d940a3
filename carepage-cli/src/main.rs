use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use carepage::Endpoints;
use carepage_cli::args::Args;
use carepage_cli::{CliError, Harness, PageFile, parse_script};
use carepage_client::CareClient;
use clap::Parser;
use simplelog::{Config, WriteLogger};

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn run(args: Args) -> Result<(), CliError> {
    let page = PageFile::from_json(&read(&args.page)?)?;
    let endpoints: Endpoints = page.config.endpoints.clone();

    let script = match &args.script {
        Some(path) => read(path)?,
        None => std::io::read_to_string(std::io::stdin()).map_err(|source| CliError::Io {
            path: "<stdin>".into(),
            source,
        })?,
    };
    let commands = parse_script(&script)?;

    let today = chrono::Local::now().date_naive();
    let mut harness = Harness::new(page, today)?;
    if let Some(base_url) = &args.base_url {
        let client = CareClient::builder()
            .base_url(base_url)
            .endpoints(endpoints)
            .timeout(Duration::from_secs(args.timeout))
            .build()?;
        log::info!("Backend: {}", client.base_url());
        harness = harness.with_source(Arc::new(client));
    }

    for (step, command) in commands.iter().enumerate() {
        let output = harness.run(command).await?;
        log::info!("step {}: {:?}", step + 1, command);
        if let Some(output) = output {
            println!("{output}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = File::create(&args.log_file).expect("Failed to create log file");
    WriteLogger::init(args.log_level, Config::default(), log_file)
        .expect("Failed to initialize logger");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
