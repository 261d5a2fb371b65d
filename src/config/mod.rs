// Configuration management module
// Handles TOML settings and the interactive config command

pub mod interactive;
pub mod settings;

pub use interactive::{run_interactive_config, show_config};
pub use settings::{Config, ConfigError, GeminiConfig};

/// Default per-user data directory holding the config file and the index
#[inline]
pub fn get_config_dir() -> crate::Result<std::path::PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("pdf-chat"))
        .ok_or_else(|| {
            crate::PdfChatError::Config(
                "Could not determine a data directory for this platform".to_string(),
            )
        })
}
