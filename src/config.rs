use crate::error::{IrrigoError, Result};
use crate::logic::advisories::{
    DEFAULT_CO2_KG_PER_LITER, DEFAULT_CURRENCY, DEFAULT_ENERGY_COST_PER_LITER,
    DEFAULT_WATER_COST_PER_LITER,
};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenMeteoConfig {
    #[serde(default = "default_open_meteo_url")]
    pub base_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_open_meteo_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_open_meteo_url(),
            enabled: true,
        }
    }
}

/// Unit rates for the cost and footprint estimates attached to each result
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub water_cost_per_liter: f64,
    pub energy_cost_per_liter: f64,
    pub currency: String,
    pub co2_kg_per_liter: f64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            water_cost_per_liter: DEFAULT_WATER_COST_PER_LITER,
            energy_cost_per_liter: DEFAULT_ENERGY_COST_PER_LITER,
            currency: DEFAULT_CURRENCY.to_string(),
            co2_kg_per_liter: DEFAULT_CO2_KG_PER_LITER,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(IrrigoError::Config(format!(
                "Config file not found at {:?}. Run `irrigo init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| IrrigoError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml_str(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| IrrigoError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let a = &self.advisory;
        let rates = [
            ("water_cost_per_liter", a.water_cost_per_liter),
            ("energy_cost_per_liter", a.energy_cost_per_liter),
            ("co2_kg_per_liter", a.co2_kg_per_liter),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(IrrigoError::Config(format!(
                    "advisory.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("irrigo").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/irrigo/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IrrigoError::Config("Cannot determine config directory".into()))?
            .join("irrigo");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up irrigo.");
        println!();

        println!("OpenWeatherMap (weather and air quality; leave blank to skip)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| IrrigoError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if owm_api_key.is_empty() {
            println!("  Without weather data no recommendation can be produced.");
            None
        } else {
            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                enabled: true,
            })
        };

        println!();
        println!("Open-Meteo (soil moisture, no key required)");
        let open_meteo_enabled = Confirm::new()
            .with_prompt("  Enable measured soil moisture?")
            .default(true)
            .interact()
            .map_err(|e| IrrigoError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("Cost estimates");
        let currency: String = Input::new()
            .with_prompt("  Currency")
            .default(DEFAULT_CURRENCY.into())
            .interact_text()
            .map_err(|e| IrrigoError::Config(format!("Input error: {}", e)))?;

        let water_cost_per_liter: f64 = Input::new()
            .with_prompt("  Water cost per liter")
            .default(DEFAULT_WATER_COST_PER_LITER)
            .interact_text()
            .map_err(|e| IrrigoError::Config(format!("Input error: {}", e)))?;

        let energy_cost_per_liter: f64 = Input::new()
            .with_prompt("  Pumping energy cost per liter")
            .default(DEFAULT_ENERGY_COST_PER_LITER)
            .interact_text()
            .map_err(|e| IrrigoError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            openweathermap,
            open_meteo: OpenMeteoConfig {
                enabled: open_meteo_enabled,
                ..Default::default()
            },
            advisory: AdvisoryConfig {
                water_cost_per_liter,
                energy_cost_per_liter,
                currency,
                ..Default::default()
            },
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)?;

        let content = format!(
            "# irrigo configuration\n\
             # Generated by `irrigo init`\n\
             # Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
