use anyhow::Context;
use clap::Parser;
use library_catalog::utils::{logger, validation::Validate};
use library_catalog::{Action, CliConfig, ConsoleNotifier, Notifier, Session, TracingNotifier};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting library-catalog");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let catalog = match config
        .load_catalog()
        .and_then(|catalog| catalog.validate().map(|()| catalog))
    {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} ({:?})", e, e.kind());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    tracing::info!("Loan policy: {}", catalog.policy);

    let actions = match &config.config {
        Some(path) => {
            if catalog.actions.is_empty() {
                tracing::info!("No actions in {}, only seeding the catalog", path);
            }
            catalog.actions.clone()
        }
        None => {
            tracing::info!("No config file given, running the demo session");
            Action::demo_script()
        }
    };

    let notifier: Box<dyn Notifier> = if config.console {
        Box::new(ConsoleNotifier)
    } else {
        Box::new(TracingNotifier)
    };

    let library = catalog
        .build_library(notifier)
        .context("failed to seed the library")?;

    let mut session = Session::new(library);
    let summary = session.run(&actions);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        tracing::info!(
            "✅ Session finished: {} succeeded, {} failed ({} book(s), {} member(s) remain)",
            summary.succeeded,
            summary.failed,
            summary.book_count,
            summary.member_count
        );
    }

    Ok(())
}
