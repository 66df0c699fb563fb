//! CLI entry point - the composition root.
//!
//! Settings are resolved once through bootstrap; command dispatch routes to
//! handlers, which receive the composed [`CliContext`](lingo_cli::CliContext).

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lingo_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::load(cli.config.as_deref())?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Play {
            file,
            index,
            translate_to,
            glossary,
            words_per_minute,
        } => {
            handlers::play::execute(
                &ctx,
                &file,
                index,
                translate_to.as_deref(),
                glossary.as_deref(),
                words_per_minute,
            )
            .await?;
        }
        Commands::Validate { file } => {
            handlers::validate::execute(&file)?;
        }
        Commands::Segment { text } => {
            handlers::segment::execute(&text)?;
        }
        Commands::Instructions { request, fields } => {
            handlers::instructions::execute(&ctx, request.as_deref(), &fields)?;
        }
        Commands::Languages => {
            handlers::languages::execute()?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
