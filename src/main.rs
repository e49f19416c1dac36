use anyhow::{Context, Result};
use cli::Cli;
use config::Configuration;
use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};
use indicatif::{ProgressBar, ProgressStyle};
use sinks::Wkhtmltopdf;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod config;
mod config_wizard;
mod diagnostics;
mod error;
mod logging;
mod metadata;
mod pipeline;
mod references;
mod rendering;
mod sinks;
mod source;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Render(args) => {
            let config_required = args.config.as_os_str() != config::DEFAULT_CONFIG_FILE;
            let mut config = Configuration::load(&args.config, config_required)
                .with_context(|| "Failed to load configuration")?;
            config.apply(args);

            logging::init(args.verbose, &config.paths.log_file)?;
            log::info!("building {}", config.paths.output.display());

            let engine = Wkhtmltopdf::new(config.engine.path.clone(), config.engine.timeout());
            let mut diagnostics = LogDiagnostics::default();

            let progress = ProgressBar::new_spinner();
            progress.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{pos}/{len}] {msg}")
                    .expect("can parse progress style"),
            );
            progress.enable_steady_tick(Duration::from_millis(120));

            let result = pipeline::build(&config, &engine, &mut diagnostics, &progress)
                .with_context(|| "Failed to build PDF");
            progress.finish_and_clear();
            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    diagnostics.error(Diagnostic::Aborted {
                        reason: format!("{e:#}"),
                    });
                    return Err(e);
                }
            };
            log::info!(
                "bound {} file(s) with {} page break(s)",
                report.sources,
                report.page_breaks
            );

            println!(
                "{} {}",
                console::style("PDF generated:").green(),
                report.output.display()
            );
            println!("  Source files:  {}", report.sources);
            if config.document.toc {
                println!("  TOC entries:   {}", report.toc_entries);
            }
            println!(
                "  Cover page:    {}",
                if report.cover { "yes" } else { "no" }
            );
            for path in report.intermediate.iter() {
                println!("  Kept:          {}", path.display());
            }
            if diagnostics.warnings + diagnostics.errors > 0 {
                println!(
                    "  {}",
                    console::style(format!(
                        "{} warning(s), {} error(s), see {}",
                        diagnostics.warnings,
                        diagnostics.errors,
                        config.paths.log_file.display()
                    ))
                    .yellow()
                );
            }

            Ok(())
        }
    }
}
