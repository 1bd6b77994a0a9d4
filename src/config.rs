use std::path::PathBuf;

use clap::Parser;

use crate::ai::gemini_service::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Command-line arguments. Each option can also come from the environment
/// (or a `.env` file in the working directory).
#[derive(Parser, Debug)]
#[command(name = "dues")]
#[command(about = "Weekly dues roster tracker")]
#[command(version)]
pub struct Args {
    /// Database file holding the roster
    #[arg(short = 'f', long = "file", env = "DUES_DB", default_value = ".data/dues.db")]
    pub db_path: PathBuf,

    /// Import a roster JSON file into the database, then exit
    #[arg(long = "import", value_name = "JSON_PATH")]
    pub import_path: Option<PathBuf>,

    /// Replace an existing stored roster when importing
    #[arg(long, requires = "import_path")]
    pub force: bool,

    /// API key for the advisory service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for analysis and message drafts
    #[arg(long, env = "DUES_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the advisory service
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl Args {
    pub fn gemini_client(&self) -> GeminiClient {
        GeminiClient::new(self.api_key.clone(), self.model.clone(), self.base_url.clone())
    }
}
