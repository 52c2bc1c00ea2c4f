pub mod advisories;
pub mod calculations;
pub mod evapotranspiration;
pub mod rules;
pub mod service;
pub mod water_balance;

pub use service::RecommendationService;
