//! Runtime configuration for the showcase.
//!
//! [`ShowcaseConfig`] is the single source of truth for timings, copy and the
//! emulated platform, independent of whether values came from defaults, a
//! TOML file or the command line.
//!
//! ```toml
//! [animation]
//! fps = 60
//! fade_ms = 1000
//! fade_easing = "ease-in-out"
//! spring_tension = 50.0
//! spring_friction = 8.0
//! rotation_ms = 2000
//! viewport_width = 390.0
//!
//! [content]
//! link_url = "https://reactnative.dev/"
//!
//! [platform]
//! family = "android"
//! version = "34"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use motion::{Easing, SpringConfig};
use serde::{Deserialize, Serialize};

use crate::capabilities::{PlatformFamily, PlatformInfo};
use crate::cli::Cli;
use crate::engine::EngineConfig;

/// Animation timings and physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub fps: u32,
    pub fade_ms: u64,
    pub fade_easing: Easing,
    pub spring_tension: f64,
    pub spring_friction: f64,
    pub rotation_ms: u64,
    pub viewport_width: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fps: motion::DEFAULT_FPS,
            fade_ms: 1000,
            fade_easing: Easing::EaseInOut,
            spring_tension: 50.0,
            spring_friction: 8.0,
            rotation_ms: 2000,
            viewport_width: 390.0,
        }
    }
}

/// Fixed copy handed to the platform effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentSettings {
    pub share_message: String,
    pub share_title: String,
    pub link_url: String,
    pub alert_title: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            share_message: "Check out this amazing React Native app! 🚀".to_string(),
            share_title: "React Native Showcase".to_string(),
            link_url: "https://reactnative.dev/".to_string(),
            alert_title: "Platform Detection".to_string(),
        }
    }
}

/// Platform the headless host pretends to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformSettings {
    pub family: PlatformFamily,
    pub version: String,
    pub large_screen: bool,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            family: PlatformFamily::Ios,
            version: "17.0".to_string(),
            large_screen: false,
        }
    }
}

/// Runtime configuration for the showcase.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    pub animation: AnimationSettings,
    pub content: ContentSettings,
    pub platform: PlatformSettings,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    #[serde(skip)]
    pub verbosity: u8,
}

impl ShowcaseConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] when the result fails [`Self::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Resolve configuration from CLI arguments: file first, then flags.
    ///
    /// # Errors
    ///
    /// Propagates file loading errors and rejects invalid overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(family) = cli.platform {
            config.platform.family = family;
        }
        if let Some(fps) = cli.fps {
            config.animation.fps = fps;
        }
        if let Some(width) = cli.viewport_width {
            config.animation.viewport_width = width;
        }
        config.verbosity = cli.verbose;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.animation;
        if animation.fps == 0 || animation.fps > motion::MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "animation.fps must be between 1 and {}",
                motion::MAX_FPS
            )));
        }
        if animation.fade_ms == 0 || animation.rotation_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation durations must be positive".into(),
            ));
        }
        if !(animation.viewport_width.is_finite() && animation.viewport_width > 0.0) {
            return Err(ConfigError::Invalid(
                "animation.viewport_width must be a positive number".into(),
            ));
        }
        if !animation.spring_tension.is_finite() || !animation.spring_friction.is_finite() {
            return Err(ConfigError::Invalid(
                "spring tension and friction must be finite".into(),
            ));
        }
        let spring =
            SpringConfig::from_tension_friction(animation.spring_tension, animation.spring_friction);
        if spring.stiffness <= 0.0 {
            return Err(ConfigError::Invalid(
                "animation.spring_tension gives a spring with no stiffness".into(),
            ));
        }
        if spring.damping <= 0.0 {
            return Err(ConfigError::Invalid(
                "animation.spring_friction gives a spring that never comes to rest".into(),
            ));
        }
        if self.content.link_url.trim().is_empty() {
            return Err(ConfigError::Invalid("content.link_url is empty".into()));
        }
        Ok(())
    }

    /// Engine timings derived from the animation settings.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        let animation = &self.animation;
        EngineConfig {
            fade: Duration::from_millis(animation.fade_ms),
            fade_easing: animation.fade_easing,
            entrance_spring: SpringConfig::from_tension_friction(
                animation.spring_tension,
                animation.spring_friction,
            ),
            rotation: Duration::from_millis(animation.rotation_ms),
            viewport_width: animation.viewport_width,
        }
    }

    /// Platform facts for the headless host.
    #[must_use]
    pub fn platform_info(&self) -> PlatformInfo {
        PlatformInfo::new(
            self.platform.family,
            self.platform.version.clone(),
            self.platform.large_screen,
        )
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let a = &self.animation;
        [
            format!("FPS: {}", a.fps),
            format!("Fade: {}ms ({:?})", a.fade_ms, a.fade_easing),
            format!(
                "Entrance spring: tension {} friction {}",
                a.spring_tension, a.spring_friction
            ),
            format!("Rotation: {}ms", a.rotation_ms),
            format!("Viewport width: {}", a.viewport_width),
            format!(
                "Platform: {} {}{}",
                self.platform.family.os_name(),
                self.platform.version,
                if self.platform.large_screen { " (large screen)" } else { "" }
            ),
            format!("Link: {}", self.content.link_url),
            format!("Verbosity: {}", self.verbosity),
        ]
        .join("\n")
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_match_the_screen() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.animation.fps, 60);
        assert_eq!(config.animation.fade_ms, 1000);
        assert_eq!(config.animation.rotation_ms, 2000);
        assert_eq!(config.content.share_title, "React Native Showcase");
        assert_eq!(config.content.link_url, "https://reactnative.dev/");
        assert_eq!(config.platform.family, PlatformFamily::Ios);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ShowcaseConfig::from_toml_str(
            r#"
            [animation]
            rotation_ms = 500
            fade_easing = "linear"

            [platform]
            family = "android"
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.rotation_ms, 500);
        assert_eq!(config.animation.fade_easing, Easing::Linear);
        assert_eq!(config.animation.fade_ms, 1000);
        assert_eq!(config.platform.family, PlatformFamily::Android);
        assert_eq!(config.platform.version, "17.0");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ShowcaseConfig::from_toml_str("[animation]\nbounce = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ShowcaseConfig::from_toml_str("[animation]\nfps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ShowcaseConfig::from_toml_str("[content]\nlink_url = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("link_url"));
    }

    #[test]
    fn frame_rate_above_limit_is_rejected() {
        let err = ShowcaseConfig::from_toml_str("[animation]\nfps = 4294967295\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
        assert!(ShowcaseConfig::from_toml_str("[animation]\nfps = 1000\n").is_ok());
        assert!(ShowcaseConfig::from_toml_str("[animation]\nfps = 1001\n").is_err());
    }

    #[test]
    fn spring_that_never_rests_is_rejected() {
        let err =
            ShowcaseConfig::from_toml_str("[animation]\nspring_friction = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("spring_friction"), "{err}");

        let err =
            ShowcaseConfig::from_toml_str("[animation]\nspring_tension = -30.0\n").unwrap_err();
        assert!(err.to_string().contains("spring_tension"), "{err}");

        assert!(ShowcaseConfig::from_toml_str("[animation]\nspring_friction = 0.0\n").is_ok());
    }

    #[test]
    fn engine_config_converts_units() {
        let engine = ShowcaseConfig::default().engine_config();
        assert_eq!(engine.fade, Duration::from_secs(1));
        assert_eq!(engine.rotation, Duration::from_secs(2));
        assert!((engine.entrance_spring.stiffness - 266.4).abs() < 1e-9);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nviewport_width = 428.0").unwrap();
        let config = ShowcaseConfig::load(file.path()).unwrap();
        assert!((config.animation.viewport_width - 428.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShowcaseConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nfps = 30\n[platform]\nfamily = \"ios\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "showcase",
            "--config",
            path.as_str(),
            "--platform",
            "android",
            "-v",
        ])
        .unwrap();

        let config = ShowcaseConfig::from_cli(&cli).unwrap();
        assert_eq!(config.animation.fps, 30);
        assert_eq!(config.platform.family, PlatformFamily::Android);
        assert_eq!(config.verbosity, 1);
    }

    #[test]
    fn cli_rejects_zero_fps() {
        let cli = Cli::try_parse_from(["showcase", "--fps", "0"]).unwrap();
        assert!(ShowcaseConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn cli_rejects_huge_fps() {
        let cli = Cli::try_parse_from(["showcase", "--fps", "4294967295", "render", "0"]).unwrap();
        assert!(ShowcaseConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn diagnostic_string_lists_settings() {
        let text = ShowcaseConfig::default().to_diagnostic_string();
        assert!(text.contains("Rotation: 2000ms"));
        assert!(text.contains("Platform: ios 17.0"));
    }
}
