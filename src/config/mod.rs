mod app_config;

pub use app_config::{
    AppConfig, I18nConfig, LogFormat, LoggingConfig, PasswordConfig, ServerConfig, StorageConfig,
};
