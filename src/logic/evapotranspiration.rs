use super::calculations::{clamp_finite, finite_or_zero, round_to};
use crate::models::{CropKind, CurrentConditions, EtEstimate, GrowthStage};

/// Crop coefficients per growth stage: initial, development, mid, late
const CROP_COEFFICIENTS: &[(CropKind, [f64; 4])] = &[
    (CropKind::Tomato, [0.60, 0.80, 1.15, 0.80]),
    (CropKind::Corn, [0.30, 0.70, 1.20, 0.60]),
    (CropKind::Wheat, [0.30, 0.70, 1.15, 0.40]),
    (CropKind::Rice, [1.05, 1.10, 1.20, 0.90]),
    (CropKind::Potato, [0.50, 0.75, 1.15, 0.75]),
    (CropKind::Soybean, [0.40, 0.80, 1.15, 0.50]),
    (CropKind::Cotton, [0.35, 0.70, 1.20, 0.70]),
    (CropKind::Lettuce, [0.70, 0.85, 1.00, 0.95]),
    (CropKind::Bean, [0.40, 0.70, 1.15, 0.55]),
    (CropKind::Pepper, [0.60, 0.80, 1.05, 0.90]),
    (CropKind::Default, [0.50, 0.80, 1.00, 0.70]),
];

const DEFAULT_ROW: [f64; 4] = [0.50, 0.80, 1.00, 0.70];

/// Base temperature below which the proxy assumes no evaporative demand, °C
const BASE_TEMP_C: f64 = 5.0;
const TEMP_SPAN_C: f64 = 30.0;
const MIN_HUMIDITY_FACTOR: f64 = 0.3;
const MAX_WIND_FACTOR: f64 = 2.0;
const WIND_SCALE_KMH: f64 = 10.0;
/// Radiation level (MJ/m²/day) treated as neutral
const REFERENCE_RADIATION: f64 = 25.0;
/// Scales the unitless product into mm/day
const ET0_SCALE_MM: f64 = 5.0;

pub fn crop_coefficient(crop: CropKind, stage: GrowthStage) -> f64 {
    let row = CROP_COEFFICIENTS
        .iter()
        .find(|(kind, _)| *kind == crop)
        .map(|(_, row)| *row)
        .unwrap_or(DEFAULT_ROW);

    match stage {
        GrowthStage::Initial => row[0],
        GrowthStage::Development => row[1],
        GrowthStage::Mid => row[2],
        GrowthStage::Late => row[3],
    }
}

/// Reference evapotranspiration proxy in mm/day.
///
/// This is a simplified temperature/humidity/wind/radiation product, not
/// Penman-Monteith. Every input is clamped first so the result is always
/// finite and non-negative.
pub fn reference_et(current: &CurrentConditions) -> f64 {
    let temperature = clamp_finite(current.temperature_c, -60.0, 60.0);
    let humidity = clamp_finite(current.humidity_percent, 0.0, 100.0);
    let wind = finite_or_zero(current.wind_speed_kmh).max(0.0);

    let temp_factor = ((temperature - BASE_TEMP_C) / TEMP_SPAN_C).max(0.0);
    let humidity_factor = ((100.0 - humidity) / 100.0).max(MIN_HUMIDITY_FACTOR);
    let wind_factor = (1.0 + wind / WIND_SCALE_KMH).min(MAX_WIND_FACTOR);
    let radiation_factor = match current.solar_radiation {
        Some(radiation) => finite_or_zero(radiation).max(0.0) / REFERENCE_RADIATION,
        None => 1.0,
    };

    round_to(
        temp_factor * humidity_factor * wind_factor * radiation_factor * ET0_SCALE_MM,
        2,
    )
}

/// Turn current weather and crop metadata into a water-demand estimate.
pub fn compute_et(current: &CurrentConditions, crop: CropKind, stage: GrowthStage) -> EtEstimate {
    let et0 = reference_et(current);
    let crop_coefficient = crop_coefficient(crop, stage);
    let et_crop = round_to(et0 * crop_coefficient, 2);

    tracing::debug!(
        "ET for {} ({}): et0={:.2} kc={:.2} etc={:.2}",
        crop,
        stage,
        et0,
        crop_coefficient,
        et_crop
    );

    EtEstimate {
        et0,
        et_crop,
        crop_coefficient,
        crop,
        stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn conditions(
        temperature_c: f64,
        humidity_percent: f64,
        wind_speed_kmh: f64,
    ) -> CurrentConditions {
        CurrentConditions {
            temperature_c,
            humidity_percent,
            wind_speed_kmh,
            solar_radiation: None,
        }
    }

    #[test]
    fn known_value() {
        // (35-5)/30 = 1.0, (100-40)/100 = 0.6, 1 + 5/10 = 1.5 -> 1.0*0.6*1.5*5 = 4.5
        let et0 = reference_et(&conditions(35.0, 40.0, 5.0));
        assert!((et0 - 4.5).abs() < 1e-9);
    }

    #[test]
    fn cold_weather_has_no_demand() {
        assert_eq!(reference_et(&conditions(3.0, 50.0, 10.0)), 0.0);
        assert_eq!(reference_et(&conditions(-20.0, 50.0, 10.0)), 0.0);
    }

    #[test]
    fn humidity_factor_floor() {
        // 95% humidity would give 0.05, floored to 0.3
        let et0 = reference_et(&conditions(35.0, 95.0, 0.0));
        assert!((et0 - 1.5).abs() < 1e-9);
    }

    #[test]
    fn wind_factor_capped() {
        let calm = reference_et(&conditions(35.0, 0.0, 10.0));
        let gale = reference_et(&conditions(35.0, 0.0, 120.0));
        assert!((calm - gale).abs() < 1e-9);
        assert!((gale - 10.0).abs() < 1e-9);
    }

    #[test]
    fn radiation_factor_applies_when_present() {
        let mut current = conditions(35.0, 40.0, 5.0);
        current.solar_radiation = Some(12.5);
        assert!((reference_et(&current) - 2.25).abs() < 1e-9);
    }

    #[test]
    fn bad_inputs_are_clamped() {
        let current = CurrentConditions {
            temperature_c: f64::NAN,
            humidity_percent: -30.0,
            wind_speed_kmh: -5.0,
            solar_radiation: Some(f64::NAN),
        };
        let et0 = reference_et(&current);
        assert!(et0.is_finite());
        assert_eq!(et0, 0.0);

        // Negative humidity treated as 0
        let dry = reference_et(&conditions(35.0, -10.0, 0.0));
        assert!((dry - 5.0).abs() < 1e-9);
    }

    #[test]
    fn crop_coefficients_by_stage() {
        assert_eq!(crop_coefficient(CropKind::Corn, GrowthStage::Mid), 1.20);
        assert_eq!(crop_coefficient(CropKind::Tomato, GrowthStage::Initial), 0.60);
        assert_eq!(crop_coefficient(CropKind::Default, GrowthStage::Late), 0.70);
    }

    #[test]
    fn unknown_crop_uses_default_row() {
        let estimate = compute_et(
            &conditions(30.0, 50.0, 10.0),
            CropKind::normalize("xyz"),
            GrowthStage::Mid,
        );
        assert_eq!(estimate.crop, CropKind::Default);
        assert_eq!(estimate.crop_coefficient, 1.0);
        assert!(estimate.et_crop.is_finite());
        assert!(estimate.et_crop >= 0.0);
    }

    #[test]
    fn et_crop_scales_by_coefficient() {
        let estimate = compute_et(&conditions(35.0, 40.0, 5.0), CropKind::Corn, GrowthStage::Mid);
        assert!((estimate.et0 - 4.5).abs() < 1e-9);
        assert!((estimate.et_crop - 5.4).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn et_is_monotonic_in_temperature(
            t1 in -20.0f64..50.0,
            delta in 0.0f64..20.0,
            humidity in 0.0f64..100.0,
            wind in 0.0f64..40.0,
        ) {
            let low = reference_et(&conditions(t1, humidity, wind));
            let high = reference_et(&conditions(t1 + delta, humidity, wind));
            prop_assert!(high >= low);
        }

        #[test]
        fn et_is_finite_and_non_negative(
            t in -100.0f64..100.0,
            humidity in -50.0f64..150.0,
            wind in -10.0f64..200.0,
        ) {
            let et0 = reference_et(&conditions(t, humidity, wind));
            prop_assert!(et0.is_finite());
            prop_assert!(et0 >= 0.0);
        }
    }
}
