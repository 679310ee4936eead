use clap::{Parser, Subcommand};
use pixi::{
    logger::{self, LogLevel, LoggerConfig},
    Config, PromptSubmitter,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pixi")]
#[command(version)]
#[command(about = "Generate an image from a text description", long_about = None)]
struct Cli {
    /// Generation endpoint, e.g. https://host/generate-image (overrides PIXI_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a prompt and print the generated image URL
    Generate {
        /// Description of the image
        prompt: String,
    },
    /// Check that the generation service is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let log_config = LoggerConfig::for_level(cli.log_level).with_json_output(cli.json_logs);
    if let Err(e) = logger::init_with_config(log_config) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let mut config = Config::from_env();
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    logger::log_startup_info("pixi", env!("CARGO_PKG_VERSION"), &config);

    let submitter = match PromptSubmitter::from_config(&config) {
        Ok(submitter) => submitter,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Generate { prompt } => match submitter.submit(&prompt).await {
            Ok(result) => {
                println!("{}", result.image_url);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Command::Health => match submitter.health_check().await {
            Ok(health) if health.is_healthy() => {
                println!("{}", health.status);
                ExitCode::SUCCESS
            }
            Ok(health) => {
                eprintln!("Service reported status '{}'", health.status);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
