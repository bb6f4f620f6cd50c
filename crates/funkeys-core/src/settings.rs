// Funkeys Settings Module
// Runtime plumbing options loaded from ~/.config/funkeys/settings.toml
//
// The remap rules and the tap window are deliberately not in here.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wait before the device is opened
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 200;

/// Anything longer is almost certainly a typo for seconds
const MAX_STARTUP_DELAY_MS: u64 = 10_000;

/// Settings for funkeys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Sleep before opening the device, so the Enter that launched funkeys
    /// is released before the grab and does not get stuck
    startup_delay: Duration,

    /// Grab the physical device exclusively
    grab: bool,

    /// Name for the virtual device (defaults to the physical device's name)
    virtual_name: Option<String>,

    /// File the settings were read from
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    startup: Option<StartupSettings>,

    #[serde(default)]
    device: Option<DeviceSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct StartupSettings {
    #[serde(default)]
    delay_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DeviceSettings {
    #[serde(default)]
    grab: Option<bool>,

    #[serde(default)]
    virtual_name: Option<String>,
}

impl Settings {
    /// Create settings with every default
    pub fn new() -> Self {
        Self {
            startup_delay: Duration::from_millis(DEFAULT_STARTUP_DELAY_MS),
            grab: true,
            virtual_name: None,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(startup) = toml_settings.startup {
            if let Some(delay_ms) = startup.delay_ms {
                if delay_ms > MAX_STARTUP_DELAY_MS {
                    return Err(SettingsError::InvalidValue(format!(
                        "startup.delay_ms = {} exceeds {}",
                        delay_ms, MAX_STARTUP_DELAY_MS
                    )));
                }
                settings.startup_delay = Duration::from_millis(delay_ms);
            }
        }

        if let Some(device) = toml_settings.device {
            if let Some(grab) = device.grab {
                settings.grab = grab;
            }
            if let Some(name) = device.virtual_name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "device.virtual_name must not be empty".to_string(),
                    ));
                }
                settings.virtual_name = Some(name.to_string());
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("funkeys").join("settings.toml"))
    }

    /// Load from default location (~/.config/funkeys/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Write the commented default settings to `path`, creating its
    /// directory. An existing file is never overwritten.
    pub fn write_default(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        file.write_all(default_settings_content().as_bytes())?;
        Ok(())
    }

    /// Load an explicitly named file, or the default location
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load_default(),
        }
    }

    pub fn startup_delay(&self) -> Duration {
        self.startup_delay
    }

    pub fn grab(&self) -> bool {
        self.grab
    }

    pub fn virtual_name(&self) -> Option<&str> {
        self.virtual_name.as_deref()
    }

    /// File these settings were read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Funkeys Settings
# Place this file at: ~/.config/funkeys/settings.toml

[startup]
# Wait before opening the device so the Enter used to start funkeys
# is released first
delay_ms = 200

[device]
# Grab the keyboard so only the remapped clone reaches the system
grab = true

# Optional name for the virtual keyboard (defaults to the original's name)
# virtual_name = "funkeys keyboard"
"#
}
