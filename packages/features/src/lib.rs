#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature record types and model-input encoding for the house price API.
//!
//! This crate defines the raw feature record submitted by API clients and
//! the encoding that turns it into the positional numeric vector the
//! regression model was trained on. The model consumes the vector by
//! position, not by name, so [`MODEL_COLUMNS`] is the load-bearing
//! contract: any change to its length or ordering silently changes what
//! the model sees.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of input slots the model was trained on.
pub const FEATURE_COUNT: usize = 15;

/// The exact column order the model was trained on.
///
/// The five `ocean_proximity` indicator names carry no prefix or
/// separator; `<1H OCEAN` includes the literal `<` and digit.
pub const MODEL_COLUMNS: [&str; FEATURE_COUNT] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "<1H OCEAN",
    "INLAND",
    "ISLAND",
    "NEAR BAY",
    "NEAR OCEAN",
    "bedroom_ratio",
    "room_per_household",
];

/// The closed set of `ocean_proximity` categories the model knows about.
///
/// Serialized names match the training data exactly. Input strings
/// outside this set are not rejected; they simply encode to all-zero
/// indicator slots (see [`encode`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum OceanProximity {
    /// Within one hour of the ocean.
    #[strum(serialize = "<1H OCEAN")]
    WithinOneHourOfOcean,
    /// Inland.
    #[strum(serialize = "INLAND")]
    Inland,
    /// On an island.
    #[strum(serialize = "ISLAND")]
    Island,
    /// Near a bay.
    #[strum(serialize = "NEAR BAY")]
    NearBay,
    /// Near the ocean.
    #[strum(serialize = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    /// Returns all variants in indicator-slot order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::WithinOneHourOfOcean,
            Self::Inland,
            Self::Island,
            Self::NearBay,
            Self::NearOcean,
        ]
    }

    /// Position of this category's indicator slot within the five
    /// categorical columns of [`MODEL_COLUMNS`].
    #[must_use]
    pub const fn indicator_index(self) -> usize {
        self as usize
    }
}

/// One user-submitted property description.
///
/// Constructed fresh per request from the JSON body, never persisted.
/// Field presence and types are enforced by serde at the transport
/// boundary; `total_bedrooms` is the only optional field and an absent
/// value flows through encoding as NaN rather than being rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseFeatures {
    /// Longitude of the property.
    pub longitude: f64,
    /// Latitude of the property.
    pub latitude: f64,
    /// Median age of houses in the block.
    pub housing_median_age: f64,
    /// Total rooms in the block.
    pub total_rooms: f64,
    /// Total bedrooms in the block. Optional in the source data.
    pub total_bedrooms: Option<f64>,
    /// Block population.
    pub population: f64,
    /// Number of households in the block.
    pub households: f64,
    /// Median household income (in tens of thousands of dollars).
    pub median_income: f64,
    /// Ocean proximity category. Free-form string; only the five
    /// [`OceanProximity`] names produce a nonzero indicator.
    pub ocean_proximity: String,
}

/// Encodes a raw feature record into the model's positional input vector.
///
/// Deterministic and pure. The steps mirror the training pipeline:
///
/// 1. Derived ratios: `bedroom_ratio = total_bedrooms / total_rooms` and
///    `room_per_household = total_rooms / households`. Missing
///    `total_bedrooms` becomes NaN and zero denominators produce
///    IEEE-754 inf/NaN. Neither is guarded: the model was trained with
///    these semantics, so adding guards here would shift its effective
///    input distribution.
/// 2. Categorical expansion: a recognized `ocean_proximity` sets exactly
///    one indicator slot to 1.0; an unrecognized value leaves all five
///    at 0.0, matching reindex-with-fill semantics.
/// 3. Assembly in the fixed [`MODEL_COLUMNS`] order.
///
/// Never fails on a well-typed record and always yields exactly
/// [`FEATURE_COUNT`] values.
#[must_use]
pub fn encode(record: &HouseFeatures) -> [f64; FEATURE_COUNT] {
    let total_bedrooms = record.total_bedrooms.unwrap_or(f64::NAN);
    let bedroom_ratio = total_bedrooms / record.total_rooms;
    let room_per_household = record.total_rooms / record.households;

    let mut indicators = [0.0_f64; 5];
    if let Ok(category) = record.ocean_proximity.parse::<OceanProximity>() {
        indicators[category.indicator_index()] = 1.0;
    }

    [
        record.longitude,
        record.latitude,
        record.housing_median_age,
        record.total_rooms,
        total_bedrooms,
        record.population,
        record.households,
        record.median_income,
        indicators[0],
        indicators[1],
        indicators[2],
        indicators[3],
        indicators[4],
        bedroom_ratio,
        room_per_household,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_bay_record() -> HouseFeatures {
        HouseFeatures {
            longitude: -122.23,
            latitude: 37.88,
            housing_median_age: 41.0,
            total_rooms: 880.0,
            total_bedrooms: Some(129.0),
            population: 322.0,
            households: 126.0,
            median_income: 8.3252,
            ocean_proximity: "NEAR BAY".to_string(),
        }
    }

    #[test]
    fn encodes_near_bay_record_to_trained_vector() {
        let vector = encode(&near_bay_record());
        let expected = [
            -122.23,
            37.88,
            41.0,
            880.0,
            129.0,
            322.0,
            126.0,
            8.3252,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
            129.0 / 880.0,
            880.0 / 126.0,
        ];
        assert_eq!(vector.len(), FEATURE_COUNT);
        for (i, (got, want)) in vector.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).abs() < f64::EPSILON,
                "slot {i} ({}): got {got}, want {want}",
                MODEL_COLUMNS[i]
            );
        }
    }

    #[test]
    fn exactly_one_indicator_set_for_each_known_category() {
        for category in OceanProximity::all() {
            let mut record = near_bay_record();
            record.ocean_proximity = category.to_string();
            let vector = encode(&record);
            let indicators = &vector[8..13];
            let ones = indicators.iter().filter(|v| **v == 1.0).count();
            let zeros = indicators.iter().filter(|v| **v == 0.0).count();
            assert_eq!(ones, 1, "{category} should set one indicator");
            assert_eq!(zeros, 4, "{category} should leave four indicators zero");
            assert!((indicators[category.indicator_index()] - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn unknown_category_encodes_all_indicators_zero() {
        let mut record = near_bay_record();
        record.ocean_proximity = "ATLANTIS".to_string();
        let vector = encode(&record);
        assert!(vector[8..13].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn category_matching_is_exact() {
        let mut record = near_bay_record();
        record.ocean_proximity = "near bay".to_string();
        let vector = encode(&record);
        assert!(vector[8..13].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn missing_bedrooms_propagates_nan() {
        let mut record = near_bay_record();
        record.total_bedrooms = None;
        let vector = encode(&record);
        assert!(vector[4].is_nan(), "total_bedrooms slot should be NaN");
        assert!(vector[13].is_nan(), "bedroom_ratio slot should be NaN");
        assert!((vector[14] - 880.0 / 126.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_rooms_propagates_infinity_not_error() {
        let mut record = near_bay_record();
        record.total_rooms = 0.0;
        let vector = encode(&record);
        // 129 / 0 is +inf; 0 / 126 is 0.
        assert!(vector[13].is_infinite());
        assert!((vector[14] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_households_propagates_infinity_not_error() {
        let mut record = near_bay_record();
        record.households = 0.0;
        let vector = encode(&record);
        assert!(vector[14].is_infinite());
    }

    #[test]
    fn encoding_is_bit_identical_across_calls() {
        let record = near_bay_record();
        let first = encode(&record);
        let second = encode(&record);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn missing_required_field_is_rejected_by_serde() {
        let body = serde_json::json!({
            "longitude": -122.23,
            "latitude": 37.88,
            "housing_median_age": 41.0,
            "total_rooms": 880.0,
            "total_bedrooms": 129.0,
            "population": 322.0,
            "households": 126.0,
            "ocean_proximity": "NEAR BAY"
        });
        let result: Result<HouseFeatures, _> = serde_json::from_value(body);
        let err = result.expect_err("median_income is required");
        assert!(err.to_string().contains("median_income"));
    }

    #[test]
    fn absent_optional_bedrooms_deserializes() {
        let body = serde_json::json!({
            "longitude": -122.23,
            "latitude": 37.88,
            "housing_median_age": 41.0,
            "total_rooms": 880.0,
            "population": 322.0,
            "households": 126.0,
            "median_income": 8.3252,
            "ocean_proximity": "INLAND"
        });
        let record: HouseFeatures = serde_json::from_value(body).unwrap();
        assert!(record.total_bedrooms.is_none());
    }

    #[test]
    fn model_columns_align_with_indicator_order() {
        for category in OceanProximity::all() {
            assert_eq!(
                MODEL_COLUMNS[8 + category.indicator_index()],
                category.as_ref()
            );
        }
    }
}
