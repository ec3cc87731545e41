mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChatGptSettings, DatabaseSettings, LoggingSettings, ServerSettings, Settings, WhisperSettings,
};
