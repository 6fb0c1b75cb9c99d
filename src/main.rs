use clap::Parser;
use recipe_import::config::load_config;
use recipe_import::{ImportError, RecipePipeline};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract a recipe from a web page", long_about = None)]
struct Cli {
    /// URL of the recipe page
    #[arg(required = true)]
    url: String,

    /// Print the recipe as JSON
    #[arg(long)]
    json: bool,

    /// Keep the recipe in the page's language
    #[arg(long)]
    no_translate: bool,

    /// Path to a configuration file (defaults to ./recipe-import.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String, ImportError> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_translate {
        config.translator.enabled = false;
    }

    let recipe = RecipePipeline::from_config(&config)?
        .extract(&cli.url)
        .await?;

    if cli.json {
        Ok(serde_json::to_string_pretty(&recipe)?)
    } else {
        Ok(recipe.to_string())
    }
}
