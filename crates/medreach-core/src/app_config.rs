use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level configuration resolved from the environment.
///
/// Analysis parameters (grid resolution, thresholds, ...) live in
/// [`crate::AnalysisSettings`]; this struct only says where things are and
/// how loudly to log.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Cleaned facility dataset consumed by `analyze` and `census`.
    pub facilities_path: PathBuf,
    /// Directory receiving the grid and summary JSON documents.
    pub output_dir: PathBuf,
    /// Optional YAML file overriding [`crate::AnalysisSettings`] defaults.
    pub settings_path: Option<PathBuf>,
}
