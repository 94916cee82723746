use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
  components::views::video_item::Attribute,
  utils::{PROJECT_NAME, get_config_dir},
};

const CONFIG: &str = include_str!("../.config/config.json5");

const CONFIG_FILES: [(&str, config::FileFormat); 4] = [
  ("config.json5", config::FileFormat::Json5),
  ("config.json", config::FileFormat::Json),
  ("config.yaml", config::FileFormat::Yaml),
  ("config.toml", config::FileFormat::Toml),
];

fn default_api_url() -> String {
  String::from("http://localhost:8080")
}

/// One gallery entry. Each field is assigned to the mounted item as the attribute of the same name.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct VideoEntry {
  pub name: Option<String>,
  pub description: Option<String>,
  pub thumbnail: Option<String>,
  #[serde(rename = "video-id", alias = "video_id")]
  pub video_id: Option<String>,
  pub duration: Option<String>,
}

impl VideoEntry {
  /// The attributes this entry assigns, in declaration order. Unset fields are skipped.
  pub fn attributes(&self) -> Vec<(Attribute, &str)> {
    [
      (Attribute::Name, &self.name),
      (Attribute::Description, &self.description),
      (Attribute::Thumbnail, &self.thumbnail),
      (Attribute::VideoId, &self.video_id),
      (Attribute::Duration, &self.duration),
    ]
    .into_iter()
    .filter_map(|(attribute, value)| value.as_deref().map(|value| (attribute, value)))
    .collect()
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
  #[serde(default = "default_api_url")]
  pub api_url: String,
  #[serde(default)]
  pub videos: Vec<VideoEntry>,
}

impl Config {
  /// Built-in defaults, then `config.*` in the config directory, then `config_file`, then
  /// `VIDEO_GALLERY_*` environment variables.
  pub fn new(config_file: Option<PathBuf>) -> Result<Self, config::ConfigError> {
    Self::load(&get_config_dir(), config_file)
  }

  fn load(config_dir: &Path, config_file: Option<PathBuf>) -> Result<Self, config::ConfigError> {
    let mut builder = config::Config::builder().add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

    let mut found_config = false;
    for (file, format) in &CONFIG_FILES {
      let path = config_dir.join(file);
      found_config |= path.exists();
      builder = builder.add_source(config::File::from(path).format(*format).required(false));
    }
    if let Some(path) = config_file {
      found_config = true;
      builder = builder.add_source(config::File::from(path).required(true));
    }
    if !found_config {
      log::info!("No configuration file found in {}, using built-in defaults", config_dir.display());
    }

    builder.add_source(config::Environment::with_prefix(&PROJECT_NAME)).build()?.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("video-gallery-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn test_builtin_defaults() {
    let config = Config::load(Path::new("/nonexistent/video-gallery"), None).unwrap();

    assert_eq!(config.api_url, "http://localhost:8080");
    assert_eq!(config.videos.len(), 1);
    assert_eq!(config.videos[0].name.as_deref(), Some("Sunset"));
    assert_eq!(config.videos[0].video_id.as_deref(), Some("42"));
  }

  #[test]
  fn test_embedded_defaults_parse_as_json5() {
    let raw: Config = json5::from_str(CONFIG).unwrap();
    let loaded = Config::load(Path::new("/nonexistent/video-gallery"), None).unwrap();

    assert_eq!(raw.api_url, loaded.api_url);
    assert_eq!(raw.videos, loaded.videos);
  }

  #[test]
  fn test_config_dir_overrides_defaults() {
    let dir = scratch_dir("override");
    std::fs::write(
      dir.join("config.toml"),
      r#"
api_url = "http://media.local:9000"

[[videos]]
name = "Harbour"
"video-id" = "7"
"#,
    )
    .unwrap();

    let config = Config::load(&dir, None).unwrap();

    assert_eq!(config.api_url, "http://media.local:9000");
    assert_eq!(config.videos.len(), 1);
    assert_eq!(config.videos[0].name.as_deref(), Some("Harbour"));
    assert_eq!(config.videos[0].video_id.as_deref(), Some("7"));
    std::fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn test_missing_explicit_file_is_an_error() {
    let result = Config::load(Path::new("/nonexistent/video-gallery"), Some(PathBuf::from("/nonexistent/extra.toml")));

    assert!(result.is_err());
  }

  #[test]
  fn test_entry_attributes_skip_unset_fields() {
    let entry = VideoEntry {
      name: Some("Sunset".to_string()),
      video_id: Some("42".to_string()),
      duration: Some("1:50".to_string()),
      ..Default::default()
    };

    assert_eq!(entry.attributes(), vec![
      (Attribute::Name, "Sunset"),
      (Attribute::VideoId, "42"),
      (Attribute::Duration, "1:50")
    ]);
  }

  #[test]
  fn test_entry_accepts_hyphenated_identifier() {
    let entry: VideoEntry = serde_json::from_str(r#"{"name": "Sunset", "video-id": "42"}"#).unwrap();

    assert_eq!(entry.video_id.as_deref(), Some("42"));
  }
}
