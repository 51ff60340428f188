use std::path::PathBuf;

use storyteller_core::config_file::ConfigFile;
use storyteller_gender::DEFAULT_MODEL_PATH;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:5174",
];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub model_path: PathBuf,
    pub scratch_root: PathBuf,
    pub include_narration: bool,
    pub narrator_name: Option<String>,
}

impl Settings {
    /// Resolve settings: environment > config file > defaults.
    ///
    /// `env` looks up a variable by name; `main` passes `std::env::var`.
    pub fn resolve(
        config: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let server = config.server.clone().unwrap_or_default();
        let model = config.model.clone().unwrap_or_default();
        let parsing = config.parsing.clone().unwrap_or_default();
        let scratch = config.scratch.clone().unwrap_or_default();

        let host = env("STORYTELLER_HOST")
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env("STORYTELLER_PORT") {
            Some(value) => parse_var("STORYTELLER_PORT", value)?,
            None => server.port.unwrap_or(DEFAULT_PORT),
        };

        let allowed_origins = match env("STORYTELLER_ALLOWED_ORIGINS") {
            Some(value) => split_list(&value),
            None => server.allowed_origins.unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }),
        };

        let max_upload_mb = match env("STORYTELLER_MAX_UPLOAD_MB") {
            Some(value) => parse_var("STORYTELLER_MAX_UPLOAD_MB", value)?,
            None => server.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB),
        };

        let model_path = env("STORYTELLER_MODEL_PATH")
            .or(model.path)
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

        let scratch_root = env("STORYTELLER_SCRATCH_DIR")
            .or(scratch.dir)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        Ok(Self {
            host,
            port,
            allowed_origins,
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            model_path: PathBuf::from(model_path),
            scratch_root,
            include_narration: parsing.include_narration.unwrap_or(true),
            narrator_name: parsing.narrator_name,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue { var, value })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use storyteller_core::config_file::{ModelConfig, ParsingSection, ServerConfig};

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let settings = Settings::resolve(&ConfigFile::default(), env_from(&[])).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.allowed_origins.len(), 4);
        assert!(
            settings
                .allowed_origins
                .contains(&"http://127.0.0.1:5174".to_string())
        );
        assert_eq!(settings.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(settings.model_path, PathBuf::from("models/gender_model.onnx"));
        assert_eq!(settings.scratch_root, std::env::temp_dir());
        assert!(settings.include_narration);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let config = ConfigFile {
            server: Some(ServerConfig {
                port: Some(9000),
                allowed_origins: Some(vec!["http://localhost:3000".into()]),
                ..Default::default()
            }),
            model: Some(ModelConfig {
                path: Some("/srv/model.onnx".into()),
            }),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, env_from(&[])).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(settings.model_path, PathBuf::from("/srv/model.onnx"));
    }

    #[test]
    fn config_file_can_disable_narration() {
        let config = ConfigFile {
            parsing: Some(ParsingSection {
                include_narration: Some(false),
                narrator_name: Some("VOICE".into()),
            }),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, env_from(&[])).unwrap();
        assert!(!settings.include_narration);
        assert_eq!(settings.narrator_name.as_deref(), Some("VOICE"));
    }

    #[test]
    fn environment_overrides_config_file() {
        let config = ConfigFile {
            server: Some(ServerConfig {
                port: Some(9000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let env = env_from(&[
            ("STORYTELLER_PORT", "9100"),
            (
                "STORYTELLER_ALLOWED_ORIGINS",
                "http://a.test, http://b.test,",
            ),
            ("STORYTELLER_SCRATCH_DIR", "/var/tmp/storyteller"),
        ]);
        let settings = Settings::resolve(&config, env).unwrap();
        assert_eq!(settings.port, 9100);
        assert_eq!(
            settings.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(settings.scratch_root, PathBuf::from("/var/tmp/storyteller"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Settings::resolve(
            &ConfigFile::default(),
            env_from(&[("STORYTELLER_PORT", "eighty")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("STORYTELLER_PORT"));
    }
}
