use clap::Parser;
use tracing::{error, info};

use dues::config::Args;
use dues::db::kv_store::SqliteKvStore;

fn main() {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dues=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(dir) = args.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: could not create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    if let Some(json_path) = &args.import_path {
        println!("Importing from {}...", json_path.display());
        let result = SqliteKvStore::open(&args.db_path)
            .and_then(|store| dues::migrate::import_json(json_path, &store, args.force));
        match result {
            Ok(count) => {
                info!(count, db = %args.db_path.display(), "import complete");
                println!("Import complete! Participants: {}", count);
            }
            Err(e) => {
                error!(error = %e, "import failed");
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    dues::cli::run(&args);
}
