use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::SkycastError;

/// A latitude/longitude pair in decimal degrees, kept as the text the user typed.
///
/// No range check is made: whatever was entered is forwarded to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self { latitude: latitude.into(), longitude: longitude.into() }
    }
}

impl FromStr for Coordinates {
    type Err = SkycastError;

    /// Parses a line holding exactly two whitespace-separated tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(lat), Some(lng), None) => Ok(Self::new(lat, lng)),
            (None, _, _) => Err(SkycastError::Input("expected latitude and longitude, got nothing".into())),
            (Some(_), None, _) => Err(SkycastError::Input(format!("missing longitude in '{}'", s.trim()))),
            (Some(_), Some(_), Some(_)) => Err(SkycastError::Input(format!(
                "expected exactly two values (latitude longitude), got '{}'",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.latitude, self.longitude)
    }
}

/// Body of a 7timer `astro` product response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub product: String,
    /// Model run timestamp, `YYYYMMDDHH` in UTC.
    pub init: String,
    pub dataseries: Vec<ForecastEntry>,
}

impl ForecastResponse {
    pub fn first_entry(&self) -> Option<&ForecastEntry> {
        self.dataseries.first()
    }

    /// Model run time, or `None` if the `init` token is not `YYYYMMDDHH`.
    pub fn init_time(&self) -> Option<NaiveDateTime> {
        parse_init(&self.init)
    }

    /// Time (UTC) a forecast entry applies to.
    pub fn valid_time(&self, entry: &ForecastEntry) -> Option<NaiveDateTime> {
        self.init_time()?.checked_add_signed(Duration::hours(i64::from(entry.timepoint)))
    }
}

fn parse_init(token: &str) -> Option<NaiveDateTime> {
    if token.len() != 10 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = NaiveDate::parse_from_str(&token[..8], "%Y%m%d").ok()?;
    let hour: u32 = token[8..].parse().ok()?;
    date.and_hms_opt(hour, 0, 0)
}

/// One point of the forecast series. All numeric fields except `timepoint`
/// and `temp2m` are provider codes, not measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Hours after `init`.
    pub timepoint: i32,
    pub cloudcover: i32,
    pub seeing: i32,
    pub transparency: i32,
    pub lifted_index: i32,
    pub rh2m: i32,
    pub wind10m: Wind,
    pub temp2m: i32,
    pub prec_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: String,
    pub speed: i32,
}

/// Body of a sunrise-sunset.org response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimesResponse {
    pub results: SunTimes,
    pub status: String,
    #[serde(default)]
    pub tzid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}
