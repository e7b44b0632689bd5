use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser};
use foodguard_core::domain::common::{
    FoodDatabaseConfig, FoodGuardConfig, LLMConfig, OcrConfig, ScanConfig, StorageConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "foodguard", version, about = "FoodGuard label scanning API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub food_database: FoodDatabaseArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OcrArgs {
    #[arg(long = "ocr-api-key", env = "OCR_API_KEY", hide_env_values = true)]
    pub ocr_api_key: String,

    #[arg(
        long = "ocr-endpoint",
        env = "OCR_ENDPOINT",
        default_value = "https://api.ocr.space/parse/image"
    )]
    pub ocr_endpoint: String,

    #[arg(long = "ocr-language", env = "OCR_LANGUAGE", default_value = "eng")]
    pub ocr_language: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FoodDatabaseArgs {
    #[arg(
        long = "food-database-url",
        env = "FOOD_DATABASE_URL",
        default_value = "https://world.openfoodfacts.org"
    )]
    pub food_database_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Food database lookups issued concurrently per batch.
    #[arg(long = "scan-batch-size", env = "SCAN_BATCH_SIZE", default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub batch_size: u16,

    #[arg(long = "scan-max-ingredients", env = "SCAN_MAX_INGREDIENTS", default_value_t = 15)]
    pub max_ingredients: usize,

    /// Timeout for every outbound HTTP call, in seconds.
    #[arg(long = "http-timeout-secs", env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StorageArgs {
    /// JSON file holding the profile keys and the scan history.
    #[arg(long = "state-file", env = "STATE_FILE", default_value = "data/foodguard-state.json")]
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false, action = ArgAction::Set)]
    pub json: bool,
}

impl From<Args> for FoodGuardConfig {
    fn from(args: Args) -> Self {
        FoodGuardConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            ocr: OcrConfig {
                api_key: args.ocr.ocr_api_key,
                endpoint: args.ocr.ocr_endpoint,
                language: args.ocr.ocr_language,
            },
            food_database: FoodDatabaseConfig {
                base_url: args.food_database.food_database_url,
            },
            scan: ScanConfig {
                batch_size: usize::from(args.scan.batch_size),
                max_ingredients: args.scan.max_ingredients,
            },
            storage: StorageConfig {
                state_file: args.storage.state_file,
            },
            request_timeout: Duration::from_secs(args.scan.http_timeout_secs),
        }
    }
}
