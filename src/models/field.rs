use serde::{Deserialize, Serialize};

/// Canonical crop keys for the coefficient table. Anything unrecognized is `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    Tomato,
    Corn,
    Wheat,
    Rice,
    Potato,
    Soybean,
    Cotton,
    Lettuce,
    Bean,
    Pepper,
    Default,
}

impl CropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropKind::Tomato => "tomato",
            CropKind::Corn => "corn",
            CropKind::Wheat => "wheat",
            CropKind::Rice => "rice",
            CropKind::Potato => "potato",
            CropKind::Soybean => "soybean",
            CropKind::Cotton => "cotton",
            CropKind::Lettuce => "lettuce",
            CropKind::Bean => "bean",
            CropKind::Pepper => "pepper",
            CropKind::Default => "default",
        }
    }

    /// Fold a free-form crop name onto a canonical key.
    ///
    /// Synonyms and plurals collapse ("tomatoes" → tomato, "maize" → corn);
    /// unknown names map to `Default` rather than failing.
    pub fn normalize(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        let key = lowered.replace(['-', '_'], " ");

        if let Some(kind) = Self::lookup(&key) {
            return kind;
        }

        // Plural folding: "potatoes" -> "potato", "beans" -> "bean"
        if let Some(stem) = key.strip_suffix("es") {
            if let Some(kind) = Self::lookup(stem) {
                return kind;
            }
        }
        if let Some(stem) = key.strip_suffix('s') {
            if let Some(kind) = Self::lookup(stem) {
                return kind;
            }
        }

        CropKind::Default
    }

    fn lookup(key: &str) -> Option<Self> {
        match key {
            "tomato" | "cherry tomato" => Some(CropKind::Tomato),
            "corn" | "maize" | "sweet corn" => Some(CropKind::Corn),
            "wheat" => Some(CropKind::Wheat),
            "rice" | "paddy" => Some(CropKind::Rice),
            "potato" | "irish potato" => Some(CropKind::Potato),
            "soybean" | "soy" | "soya" | "soya bean" | "soy bean" => Some(CropKind::Soybean),
            "cotton" => Some(CropKind::Cotton),
            "lettuce" => Some(CropKind::Lettuce),
            "bean" | "green bean" | "common bean" => Some(CropKind::Bean),
            "pepper" | "chili" | "chilli" | "bell pepper" => Some(CropKind::Pepper),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Initial,
    Development,
    Mid,
    Late,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Initial => "initial",
            GrowthStage::Development => "development",
            GrowthStage::Mid => "mid",
            GrowthStage::Late => "late",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "seedling" | "germination" | "establishment" => Some(GrowthStage::Initial),
            "development" | "vegetative" | "crop development" => Some(GrowthStage::Development),
            "mid" | "mid season" | "mid-season" | "flowering" | "reproductive" => {
                Some(GrowthStage::Mid)
            }
            "late" | "late season" | "late-season" | "maturity" | "harvest" => {
                Some(GrowthStage::Late)
            }
            _ => None,
        }
    }

    /// Unknown stage names fall back to mid-season.
    pub fn parse_or_mid(s: &str) -> Self {
        Self::from_str(s).unwrap_or(GrowthStage::Mid)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilTexture {
    Sand,
    LoamySand,
    SandyLoam,
    Loam,
    SiltLoam,
    Silt,
    ClayLoam,
    Clay,
    #[default]
    Unknown,
}

impl SoilTexture {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilTexture::Sand => "Sand",
            SoilTexture::LoamySand => "Loamy Sand",
            SoilTexture::SandyLoam => "Sandy Loam",
            SoilTexture::Loam => "Loam",
            SoilTexture::SiltLoam => "Silt Loam",
            SoilTexture::Silt => "Silt",
            SoilTexture::ClayLoam => "Clay Loam",
            SoilTexture::Clay => "Clay",
            SoilTexture::Unknown => "Unknown",
        }
    }

    /// Parse a texture name; anything unrecognized is `Unknown`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "sand" | "sandy" => SoilTexture::Sand,
            "loamy sand" | "loamysand" => SoilTexture::LoamySand,
            "sandy loam" | "sandyloam" => SoilTexture::SandyLoam,
            "loam" | "loamy" => SoilTexture::Loam,
            "silt loam" | "siltloam" => SoilTexture::SiltLoam,
            "silt" | "silty" => SoilTexture::Silt,
            "clay loam" | "clayloam" => SoilTexture::ClayLoam,
            "clay" | "clayey" => SoilTexture::Clay,
            _ => SoilTexture::Unknown,
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_normalize_synonyms_and_plurals() {
        assert_eq!(CropKind::normalize("tomatoes"), CropKind::Tomato);
        assert_eq!(CropKind::normalize("Tomato"), CropKind::Tomato);
        assert_eq!(CropKind::normalize("maize"), CropKind::Corn);
        assert_eq!(CropKind::normalize("Potatoes"), CropKind::Potato);
        assert_eq!(CropKind::normalize("soybeans"), CropKind::Soybean);
        assert_eq!(CropKind::normalize("beans"), CropKind::Bean);
        assert_eq!(CropKind::normalize("bell-pepper"), CropKind::Pepper);
        assert_eq!(CropKind::normalize("  paddy "), CropKind::Rice);
    }

    #[test]
    fn crop_normalize_unknown_is_default() {
        assert_eq!(CropKind::normalize("xyz"), CropKind::Default);
        assert_eq!(CropKind::normalize(""), CropKind::Default);
        assert_eq!(CropKind::normalize("s"), CropKind::Default);
    }

    #[test]
    fn growth_stage_from_str() {
        assert_eq!(GrowthStage::from_str("initial"), Some(GrowthStage::Initial));
        assert_eq!(GrowthStage::from_str("Vegetative"), Some(GrowthStage::Development));
        assert_eq!(GrowthStage::from_str("MID"), Some(GrowthStage::Mid));
        assert_eq!(GrowthStage::from_str("maturity"), Some(GrowthStage::Late));
        assert_eq!(GrowthStage::from_str("dormant"), None);
    }

    #[test]
    fn growth_stage_unknown_falls_back_to_mid() {
        assert_eq!(GrowthStage::parse_or_mid("dormant"), GrowthStage::Mid);
        assert_eq!(GrowthStage::parse_or_mid("late"), GrowthStage::Late);
    }

    #[test]
    fn soil_texture_from_str() {
        assert_eq!(SoilTexture::from_str("clay"), SoilTexture::Clay);
        assert_eq!(SoilTexture::from_str("Sandy Loam"), SoilTexture::SandyLoam);
        assert_eq!(SoilTexture::from_str("silt_loam"), SoilTexture::SiltLoam);
        assert_eq!(SoilTexture::from_str("SANDY"), SoilTexture::Sand);
        assert_eq!(SoilTexture::from_str("dirt"), SoilTexture::Unknown);
        assert_eq!(SoilTexture::from_str(""), SoilTexture::Unknown);
    }
}
