use anyhow::{anyhow, Context, Result};
use cli::Cli;
use sinks::{BookletConfig, CONFIG_FILE_NAME};
use std::path::Path;
use std::process::ExitCode;

mod batch;
mod booklet;
mod cli;
mod error;
mod layout;
mod sinks;
mod story;
mod units;

fn main() -> ExitCode {
    init_logging();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // also picks up records from the `log` macros used throughout the crate
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Render(args) => {
            let config = BookletConfig::discover(args.config.as_deref())
                .with_context(|| "Failed to load configuration")?;
            let outfile = args
                .output
                .clone()
                .unwrap_or_else(|| booklet::default_outfile(&args.story));

            let stats =
                booklet::render_story(&args.story, &outfile, args.images.as_deref(), &config)?;

            for (path, reason) in stats.skipped_images.iter() {
                println!(
                    "  {} {} ({reason})",
                    console::style("Skipped image:").yellow(),
                    path.display()
                );
            }
            println!("  Booklet PDF: {}", stats.outfile.display());
            println!(
                "  Sheets:      {} ({} paragraphs, 2 per sheet)",
                stats.sheets, stats.segments
            );
            Ok(())
        }
        cli::Commands::Batch(args) => {
            let config = BookletConfig::discover(args.config.as_deref())
                .with_context(|| "Failed to load configuration")?;
            let summary = batch::run(&args.dir, args.out_dir.as_deref(), &config)?;

            println!();
            for stats in summary.rendered.iter() {
                println!(
                    "  {} ({} sheets)",
                    stats.outfile.display(),
                    stats.sheets
                );
                for (path, reason) in stats.skipped_images.iter() {
                    println!(
                        "    {} {} ({reason})",
                        console::style("Skipped image:").yellow(),
                        path.display()
                    );
                }
            }
            for (path, reason) in summary.failed.iter() {
                println!(
                    "  {} {}: {reason}",
                    console::style("Failed:").red(),
                    path.display()
                );
            }

            if summary.failed.is_empty() {
                println!("Rendered {} booklet(s).", summary.rendered.len());
                Ok(())
            } else {
                Err(anyhow!(
                    "{} of {} stories failed to render",
                    summary.failed.len(),
                    summary.failed.len() + summary.rendered.len()
                ))
            }
        }
        cli::Commands::Config(args) => {
            let path = Path::new(CONFIG_FILE_NAME);
            if path.exists() && !args.force {
                return Err(anyhow!(
                    "{} already exists, use --force to overwrite it",
                    path.display()
                ));
            }
            let contents = toml::to_string(&BookletConfig::default())
                .with_context(|| "Failed to serialize configuration")?;
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
