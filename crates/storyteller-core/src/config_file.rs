use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub model: Option<ModelConfig>,
    pub parsing: Option<ParsingSection>,
    pub scratch: Option<ScratchConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub max_upload_mb: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingSection {
    pub include_narration: Option<bool>,
    pub narrator_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScratchConfig {
    pub dir: Option<String>,
}

/// Platform config directory path: `<config_dir>/storyteller/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("storyteller").join("config.toml"))
}

/// Load config by cascading CWD `.storyteller.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".storyteller.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("ignoring unparseable config {}: {}", path.display(), e);
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let overlay_server = overlay.server.unwrap_or_default();
    let base_model = base.model.unwrap_or_default();
    let overlay_model = overlay.model.unwrap_or_default();
    let base_parsing = base.parsing.unwrap_or_default();
    let overlay_parsing = overlay.parsing.unwrap_or_default();
    let base_scratch = base.scratch.unwrap_or_default();
    let overlay_scratch = overlay.scratch.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            host: overlay_server.host.or(base_server.host),
            port: overlay_server.port.or(base_server.port),
            allowed_origins: overlay_server
                .allowed_origins
                .or(base_server.allowed_origins),
            max_upload_mb: overlay_server.max_upload_mb.or(base_server.max_upload_mb),
        }),
        model: Some(ModelConfig {
            path: overlay_model.path.or(base_model.path),
        }),
        parsing: Some(ParsingSection {
            include_narration: overlay_parsing
                .include_narration
                .or(base_parsing.include_narration),
            narrator_name: overlay_parsing.narrator_name.or(base_parsing.narrator_name),
        }),
        scratch: Some(ScratchConfig {
            dir: overlay_scratch.dir.or(base_scratch.dir),
        }),
    }
}
