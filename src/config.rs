// src/config.rs

//! Configuration for the display surface adapter.
//!
//! Every struct carries `#[serde(default)]`, so a configuration file only
//! needs to mention the settings it changes. An empty JSON object yields the
//! real framebuffer at `/dev/fb0`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::native_state::VideoConfig;
use crate::os::fb::{fbdev_path, DEFAULT_FBDEV_INDEX};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "FBSURFACE_CONFIG";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which `NativeState` backend to construct.
    pub backend: BackendKind,
    /// Framebuffer device selection.
    pub device: DeviceConfig,
    /// Vendor stub settings.
    pub vendor: VendorConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Query a kernel framebuffer device.
    #[default]
    Fbdev,
    /// Fixed geometry handed to a vendor windowing extension.
    VendorStub,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Framebuffer index, used when `path` is not set.
    pub index: u32,
    /// Explicit device path, overriding `index`.
    pub path: Option<PathBuf>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            index: DEFAULT_FBDEV_INDEX,
            path: None,
        }
    }
}

impl DeviceConfig {
    /// The device path to open.
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| fbdev_path(self.index))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    pub video: VideoConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("Configuration loaded (using default).");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_selects_first_framebuffer() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, BackendKind::Fbdev);
        assert_eq!(config.device.path(), fbdev_path(0));
        assert_eq!(config.vendor.video, VideoConfig::default());
    }

    #[test]
    fn vendor_video_defaults_match_compiled_in_mode() {
        let video = VideoConfig::default();
        assert_eq!((video.width, video.height), (1280, 720));
        assert_eq!(video.bpp, 4);
        assert_eq!(video.num_buffers, 3);
        assert_eq!(video.use_screen, 0);
        assert_eq!(video.monitor_index, 0);
    }

    #[test]
    fn explicit_path_overrides_index() {
        let config = Config::from_json_str(
            r#"{ "device": { "index": 3, "path": "/tmp/fake-fb" } }"#,
        )
        .unwrap();
        assert_eq!(config.device.index, 3);
        assert_eq!(config.device.path(), PathBuf::from("/tmp/fake-fb"));
    }

    #[test]
    fn partial_vendor_section_keeps_remaining_defaults() {
        let config = Config::from_json_str(
            r#"{ "backend": "vendor_stub", "vendor": { "video": { "width": 800 } } }"#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::VendorStub);
        assert_eq!(config.vendor.video.width, 800);
        assert_eq!(config.vendor.video.height, 720);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Config::from_json_str(r#"{ "backend": "wayland" }"#).is_err());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Config::load(Path::new("/nonexistent/fbsurface.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/fbsurface.json"));
    }

    #[test]
    fn serialized_config_round_trips() {
        let mut config = Config::default();
        config.backend = BackendKind::VendorStub;
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }
}
