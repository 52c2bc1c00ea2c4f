use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrrigoError {
    #[error("Weather data unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Soil data unavailable: {0}")]
    SoilUnavailable(String),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Insufficient data: weather ({weather}); soil ({soil})")]
    InsufficientData { weather: String, soil: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, IrrigoError>;
