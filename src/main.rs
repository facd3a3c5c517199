use std::io::Write;

use ayat::cli::display::{render_search, render_sura, render_translators};
use ayat::cli::{Cli, Commands};
use ayat::commands;
use ayat::config::Config;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries results and protocol messages, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load()?;

    match command {
        Commands::Search {
            query,
            translators,
            json,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            let result = runtime.block_on(commands::search(
                &config,
                &query,
                &translators,
                |progress| {
                    if !json {
                        eprint!(
                            "\rScanning… {}/{} ({:.0}%)",
                            progress.processed,
                            progress.total,
                            progress.percent()
                        );
                        let _ = std::io::stderr().flush();
                    }
                },
            ));
            if !json {
                eprint!("\r\x1b[2K");
            }
            let result = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result.done)?);
            } else {
                print!("{}", render_search(&result));
            }
            Ok(())
        }
        Commands::Sura {
            number,
            translators,
        } => {
            let view = commands::read_sura(&config, number, &translators)?;
            print!("{}", render_sura(&view));
            Ok(())
        }
        Commands::Translators => {
            print!("{}", render_translators(&commands::list_translators(&config)));
            Ok(())
        }
        Commands::Worker => {
            tokio::runtime::Runtime::new()?.block_on(commands::serve_worker(&config))
        }
        #[cfg(feature = "mcp")]
        Commands::Serve => tokio::runtime::Runtime::new()?.block_on(ayat::mcp::serve()),
    }
}
