// bases/fakelib/src/main.rs
use clap::Parser;
use color_eyre::Result;

mod commands;
mod config;

use config::{CliArgs, Command, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so `list` output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fakelib=info,library_tree=info,fake_library=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    let config = Config::from_args(&args.shape)?;

    match args.command {
        Command::Mount {
            golden,
            mountpoint,
            allow_other,
        } => {
            let library = commands::load_library(&golden, &config)?;
            commands::mount(&library, &mountpoint, allow_other).await?;
        }

        Command::List { golden, limit } => {
            let library = commands::load_library(&golden, &config)?;
            commands::list(&library, limit, &mut std::io::stdout().lock())?;
        }

        Command::Inspect { golden, json } => {
            let library = commands::load_library(&golden, &config)?;
            commands::inspect(&library, &config, json, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
