use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub import: ImportConfig,
    pub documents: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Markup factors applied to the winner's price when synthesizing the
    /// two competitor quotes during document import. Editable starting
    /// points, never real quotes.
    pub competitor_markup_low: f64,
    pub competitor_markup_high: f64,
    /// Hard cap on accepted rows per import attempt.
    pub max_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// City printed on documents when the school profile has none.
    pub default_city: String,
    /// Funding program label printed when the transaction has none.
    pub default_program: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with PRESTACAO prefix
            .add_source(Environment::with_prefix("PRESTACAO").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
            import: ImportConfig::default(),
            documents: DocumentConfig::default(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            competitor_markup_low: 1.016,
            competitor_markup_high: 1.0185,
            max_rows: 500,
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_city: "Alagoas".to_string(),
            default_program: "PNAE/FNDE".to_string(),
        }
    }
}
