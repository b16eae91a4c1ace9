mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, AuthConfig, ChatConfig, LogConfig, ProfileConfig};
pub use loader::load;
