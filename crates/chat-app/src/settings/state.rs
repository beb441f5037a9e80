use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use argo_assistant::{CANNED_RESPONDER_ID, ImagePlaceholder, ResponderConfig};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

pub const SETTINGS_DIRECTORY_NAME: &str = "argo-chat";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const SETTINGS_ENV_PREFIX: &str = "ARGO_CHAT_";
pub const DEFAULT_ASSISTANT_NAME: &str = "Argo Ocean Intelligence";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1_500;
pub const DEFAULT_IMAGE_DELAY_MS: u64 = 3_000;
pub const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_responder_id")]
    pub responder_id: String,
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_image_delay_ms")]
    pub image_delay_ms: u64,
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            responder_id: default_responder_id(),
            reply_delay_ms: default_reply_delay_ms(),
            image_delay_ms: default_image_delay_ms(),
            assistant_name: default_assistant_name(),
            show_timestamps: default_show_timestamps(),
        }
    }
}

impl ChatSettings {
    pub fn normalized(mut self) -> Self {
        self.responder_id = if self.responder_id.trim().is_empty() {
            default_responder_id()
        } else {
            self.responder_id.trim().to_string()
        };
        self.assistant_name = if self.assistant_name.trim().is_empty() {
            default_assistant_name()
        } else {
            self.assistant_name.trim().to_string()
        };
        self.reply_delay_ms = self.reply_delay_ms.min(MAX_DELAY_MS);
        self.image_delay_ms = self.image_delay_ms.min(MAX_DELAY_MS);
        self
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn image_delay(&self) -> Duration {
        Duration::from_millis(self.image_delay_ms)
    }

    pub fn responder_config(&self) -> ResponderConfig {
        ResponderConfig::new(&self.responder_id, self.reply_delay())
    }

    pub fn image_placeholder(&self) -> ImagePlaceholder {
        ImagePlaceholder::new(self.image_delay())
    }

    pub fn to_pretty_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).context(SerializeConfigSnafu {
            stage: "serialize-settings-json",
        })
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<ChatSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".argo-chat"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_disk(&config_path);
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> Arc<ChatSettings> {
        self.settings.load_full()
    }

    pub fn update(&self, settings: ChatSettings) -> Result<(), SettingsError> {
        let normalized_settings = settings.normalized();
        self.persist(&normalized_settings)?;
        self.settings.store(Arc::new(normalized_settings));
        Ok(())
    }

    fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ChatSettings::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }
        figment.merge(Env::prefixed(SETTINGS_ENV_PREFIX))
    }

    fn load_from_disk(path: &Path) -> ChatSettings {
        match Self::figment(path).extract::<ChatSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                ChatSettings::default()
            }
        }
    }

    fn persist(&self, settings: &ChatSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = settings.to_pretty_json()?;

        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.config_path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: self.config_path.clone(),
        })?;

        tracing::info!("saved settings to {:?}", self.config_path);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeConfig {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

fn default_responder_id() -> String {
    CANNED_RESPONDER_ID.to_string()
}

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}

fn default_image_delay_ms() -> u64 {
    DEFAULT_IMAGE_DELAY_MS
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

fn default_show_timestamps() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("absent.json"));
        assert_eq!(*store.settings(), ChatSettings::default());
    }

    #[test]
    fn partial_file_is_layered_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{ "reply_delay_ms": 250, "assistant_name": "  Tide  " }"#)
            .unwrap();

        let settings = SettingsStore::new(path).settings();
        assert_eq!(settings.reply_delay_ms, 250);
        assert_eq!(settings.assistant_name, "Tide");
        assert_eq!(settings.image_delay_ms, DEFAULT_IMAGE_DELAY_MS);
        assert_eq!(settings.responder_id, CANNED_RESPONDER_ID);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(*SettingsStore::new(path).settings(), ChatSettings::default());
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        let store = SettingsStore::new(path.clone());

        let settings = ChatSettings {
            image_delay_ms: 999_999,
            show_timestamps: false,
            ..ChatSettings::default()
        };
        store.update(settings).unwrap();

        assert_eq!(store.settings().image_delay_ms, MAX_DELAY_MS);
        let reloaded = SettingsStore::new(path).settings();
        assert_eq!(reloaded.image_delay_ms, MAX_DELAY_MS);
        assert!(!reloaded.show_timestamps);
    }

    #[test]
    fn blank_identifiers_are_restored() {
        let settings = ChatSettings {
            responder_id: "   ".to_string(),
            assistant_name: String::new(),
            ..ChatSettings::default()
        }
        .normalized();

        assert_eq!(settings.responder_id, CANNED_RESPONDER_ID);
        assert_eq!(settings.assistant_name, DEFAULT_ASSISTANT_NAME);
    }
}
