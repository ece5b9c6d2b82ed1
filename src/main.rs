use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use sitter_directory::adapters::render::render;
use sitter_directory::config::args::{Command, FavoriteAction};
use sitter_directory::core::booking::submit_appointment;
use sitter_directory::core::favorites::{set_favorite, toggle_favorite};
use sitter_directory::utils::error::ErrorSeverity;
use sitter_directory::utils::{logger, validation::Validate};
use sitter_directory::{
    Backend, CliConfig, DirectoryEngine, DirectoryError, DirectoryPipeline, LocalStorage,
    Settings, SortOption,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = cli
        .load_file()
        .with_context(|| format!("failed to load config file {:?}", cli.config))?;

    if cli.json_logs || file_config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Command::Options = cli.command {
        for option in SortOption::ALL {
            println!("{:<18} {}", option.as_str(), option.label());
        }
        return Ok(());
    }

    if let Err(e) = file_config.validate() {
        exit_with(e);
    }

    let settings = match cli.resolve(file_config) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(cli.command.clone(), settings).await {
        exit_with(e);
    }
    Ok(())
}

async fn run(command: Command, settings: Settings) -> sitter_directory::Result<()> {
    let backend = Backend::connect(&settings.source);
    let storage = LocalStorage::new(settings.output_path.clone());

    match command {
        Command::List(_) => {
            settings.validate()?;
            let format = settings.view.format;
            let pipeline =
                DirectoryPipeline::new(backend.nannies, backend.favorites, storage, settings);
            let today = pipeline.today();
            let report = DirectoryEngine::new(pipeline).run().await?;

            print!("{}", render(&report.page, format, today)?);
            for path in &report.outputs {
                eprintln!("📁 Saved to: {}", path);
            }
        }
        Command::Favorite { action } => {
            let session = settings.session.as_ref();
            let nannies = backend.nannies.as_ref();
            let favorites = backend.favorites.as_ref();
            match action {
                FavoriteAction::Add { nanny_id } => {
                    let changed = set_favorite(nannies, favorites, session, &nanny_id, true).await?;
                    println!("{} {}", if changed { "Added" } else { "Already a favorite:" }, nanny_id);
                }
                FavoriteAction::Remove { nanny_id } => {
                    let changed = set_favorite(nannies, favorites, session, &nanny_id, false).await?;
                    println!("{} {}", if changed { "Removed" } else { "Not a favorite:" }, nanny_id);
                }
                FavoriteAction::Toggle { nanny_id } => {
                    let marked = toggle_favorite(nannies, favorites, session, &nanny_id).await?;
                    println!("{} is {}a favorite", nanny_id, if marked { "now " } else { "no longer " });
                }
            }
        }
        Command::Appoint(args) => {
            let (submitted, path) =
                submit_appointment(backend.nannies.as_ref(), &storage, args.into(), Utc::now())
                    .await?;
            println!("✅ Appointment request sent to {}!", submitted.nanny_name);
            eprintln!("📁 Saved to: {}/{}", settings.output_path, path);
        }
        Command::Options => {}
    }
    Ok(())
}

fn exit_with(e: DirectoryError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
