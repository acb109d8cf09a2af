use std::ops::RangeInclusive;

use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WeatherError;

/// Unit system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial { Units::Imperial } else { Units::Metric }
    }

    /// Token sent as the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_glyph(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to ask the provider for current conditions.
#[derive(Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Units,
    api_key: String,
}

impl WeatherQuery {
    /// Joins `words` with single spaces and trims the result.
    pub fn new<S: AsRef<str>>(
        words: &[S],
        units: Units,
        api_key: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let joined = words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        let city = joined.trim();

        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        Ok(Self {
            city: city.to_string(),
            units,
            api_key: api_key.into(),
        })
    }

    pub fn params(&self) -> [(&'static str, &str); 3] {
        [
            ("q", self.city.as_str()),
            ("units", self.units.as_str()),
            ("appid", self.api_key.as_str()),
        ]
    }

    /// `base` with the query parameters form-encoded onto it.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut().extend_pairs(self.params());
        url
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherQuery")
            .field("city", &self.city)
            .field("units", &self.units)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Broad weather category derived from a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Cloudy,
    Unknown,
}

/// Condition code ranges, checked in order.
pub const CONDITION_RANGES: [(RangeInclusive<u32>, ConditionKind); 7] = [
    (200..=299, ConditionKind::Thunderstorm),
    (300..=399, ConditionKind::Drizzle),
    (500..=599, ConditionKind::Rain),
    (600..=699, ConditionKind::Snow),
    (700..=799, ConditionKind::Atmosphere),
    (800..=800, ConditionKind::Clear),
    (801..=899, ConditionKind::Cloudy),
];

impl ConditionKind {
    pub fn from_code(code: u32) -> Self {
        CONDITION_RANGES
            .iter()
            .find(|(range, _)| range.contains(&code))
            .map(|(_, kind)| *kind)
            .unwrap_or(ConditionKind::Unknown)
    }
}

/// A numeric field kept exactly as the provider wrote it: `20` prints as `20`,
/// `15.0` as `15.0`, and fractional pressures still decode.
pub type Reading = serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Reading,
    pub lon: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temp: Reading,
    pub feels_like: Reading,
    pub humidity: Reading,
    pub pressure: Reading,
}

/// Decoded body of the OpenWeather current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub coord: Coordinates,
    #[serde(deserialize_with = "non_empty")]
    pub weather: Vec<Condition>,
    pub main: Measurements,
}

impl CurrentWeather {
    /// The leading condition; the provider lists the primary one first.
    pub fn primary_condition(&self) -> &Condition {
        &self.weather[0]
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let conditions = Vec::<Condition>::deserialize(deserializer)?;

    if conditions.is_empty() {
        return Err(serde::de::Error::invalid_length(
            0,
            &"at least one weather condition",
        ));
    }

    Ok(conditions)
}
