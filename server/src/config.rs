use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server settings, read from an optional TOML file and overridden from the
/// command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub bind: String,
    pub cors_origins: Vec<String>,
    /// Scores are kept in memory only when unset.
    pub scores_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Sweeper".into(),
            app_version: env!("CARGO_PKG_VERSION").into(),
            bind: "127.0.0.1:8000".into(),
            cors_origins: vec!["http://localhost:3000".into()],
            scores_path: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Could not parse settings")
    }

    /// Defaults when `path` is `None`, otherwise the file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings = Self::from_toml_str(&text)?;
        log::debug!("settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        cors_origins: Vec<String>,
        scores_path: Option<PathBuf>,
    ) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if !cors_origins.is_empty() {
            self.cors_origins = cors_origins;
        }
        if scores_path.is_some() {
            self.scores_path = scores_path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            bind = "0.0.0.0:9000"
            scores_path = "scores.json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.bind, "0.0.0.0:9000");
        assert_eq!(settings.scores_path, Some(PathBuf::from("scores.json")));
        assert_eq!(settings.app_name, "Sweeper");
        assert_eq!(settings.cors_origins, ["http://localhost:3000"]);
    }

    #[test]
    fn unknown_types_are_errors() {
        assert!(Settings::from_toml_str("cors_origins = 3").is_err());
    }

    #[test]
    fn command_line_wins_over_file() {
        let settings = Settings::default().with_overrides(
            Some("127.0.0.1:1234".into()),
            vec!["https://sweeper.example".into()],
            None,
        );

        assert_eq!(settings.bind, "127.0.0.1:1234");
        assert_eq!(settings.cors_origins, ["https://sweeper.example"]);
        assert_eq!(settings.scores_path, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/sweeper.toml"))).is_err());
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
