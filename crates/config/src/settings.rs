use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub streaming: StreamingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StreamingSettings {
    /// Slots handed to a streaming room when the lesson does not carry its own limit.
    pub default_total_slots: u32,
    pub room_id_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("CLASSROOM"),
            )
            .set_default("app.name", "virtual-classroom")?
            .set_default("app.environment", "local")?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "classroom")?
            .set_default("streaming.default_total_slots", 13)?
            .set_default("streaming.room_id_length", 21)?
            .set_default(
                "logging.filter",
                "classroom_cli=info,classroom_services=info,classroom_db=info",
            )?
            .set_default("logging.json", false)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "virtual-classroom".to_string(),
                environment: "local".to_string(),
            },
            database: DatabaseSettings {
                url: "mongodb://localhost:27017".to_string(),
                name: "classroom".to_string(),
                max_pool_size: None,
                min_pool_size: None,
            },
            streaming: StreamingSettings {
                default_total_slots: 13,
                room_id_length: 21,
            },
            logging: LoggingSettings {
                filter: "classroom_cli=info,classroom_services=info,classroom_db=info".to_string(),
                json: false,
            },
        }
    }
}
