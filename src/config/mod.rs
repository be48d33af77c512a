mod app_config;
mod twilio_config;

pub use app_config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
pub use twilio_config::TwilioConfig;
