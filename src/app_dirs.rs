use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "typer")
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("typer_config.json"))
    }

    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".local").join("state").join("typer")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        }
    }
}
