//! Human-readable strings for the coded fields of a 7timer `astro` forecast.
//!
//! Every lookup is total over `i32`: codes outside a table's documented
//! domain map to [`UNDEFINED`].
//!
//! Scales: <https://www.7timer.info/doc.php?lang=en#astro>

use std::fmt;

use crate::model::ForecastEntry;

/// Returned for any code the provider does not document.
pub const UNDEFINED: &str = "undefined";

// Dense tables are indexed by code; the provider never sends 0.
static CLOUD_COVER: [&str; 10] = [
    UNDEFINED, "0-6 %", "6-19 %", "19-31 %", "31-44 %", "44-56 %", "56-69 %", "69-81 %", "81-94 %",
    "94-100 %",
];

static SEEING: [&str; 9] =
    [UNDEFINED, "<0.5", "0.5-0.75", "0.75-1", "1-1.25", "1.25-1.5", "1.5-2", "2-2.5", ">2.5"];

static TRANSPARENCY: [&str; 9] =
    [UNDEFINED, "<0.3", "0.3-0.4", "0.4-0.5", "0.5-0.6", "0.6-0.7", "0.7-0.85", "0.85-1", ">1"];

static WIND_SPEED: [&str; 9] = [
    UNDEFINED,
    "Below 0.3m/s (calm)",
    "0.3-3.4m/s (light)",
    "3.4-8.0m/s (moderate)",
    "8.0-10.8m/s (fresh)",
    "10.8-17.2m/s (strong)",
    "17.2-24.5m/s (gale)",
    "24.5-32.6m/s (storm)",
    "Over 32.6m/s (hurricane)",
];

static LIFTED_INDEX: [(i32, &str); 8] = [
    (-10, "below -7"),
    (-6, "-7 to -5"),
    (-4, "-5 to -3"),
    (-1, "-3 to 0"),
    (2, "0 to 4"),
    (6, "4 to 8"),
    (10, "8 to 11"),
    (15, "over 11"),
];

static RELATIVE_HUMIDITY: [(i32, &str); 21] = [
    (-4, "0-5 %"),
    (-3, "5-10 %"),
    (-2, "10-15 %"),
    (-1, "15-20 %"),
    (0, "20-25 %"),
    (1, "25-30 %"),
    (2, "30-35 %"),
    (3, "35-40 %"),
    (4, "40-45 %"),
    (5, "45-50 %"),
    (6, "50-55 %"),
    (7, "55-60 %"),
    (8, "60-65 %"),
    (9, "65-70 %"),
    (10, "70-75 %"),
    (11, "75-80 %"),
    (12, "80-85 %"),
    (13, "85-90 %"),
    (14, "90-95 %"),
    (15, "95-99 %"),
    (16, "100 %"),
];

fn dense(table: &[&'static str], code: i32) -> &'static str {
    usize::try_from(code).ok().and_then(|i| table.get(i).copied()).unwrap_or(UNDEFINED)
}

fn sparse(table: &[(i32, &'static str)], code: i32) -> &'static str {
    table.iter().find(|(k, _)| *k == code).map_or(UNDEFINED, |(_, v)| *v)
}

pub fn cloud_cover(code: i32) -> &'static str {
    dense(&CLOUD_COVER, code)
}

/// Astronomical seeing, in arcseconds.
pub fn seeing(code: i32) -> &'static str {
    dense(&SEEING, code)
}

/// Atmospheric transparency, in magnitudes per air mass.
pub fn transparency(code: i32) -> &'static str {
    dense(&TRANSPARENCY, code)
}

pub fn lifted_index(code: i32) -> &'static str {
    sparse(&LIFTED_INDEX, code)
}

pub fn wind_speed(code: i32) -> &'static str {
    dense(&WIND_SPEED, code)
}

/// Relative humidity at 2m.
pub fn relative_humidity(code: i32) -> &'static str {
    sparse(&RELATIVE_HUMIDITY, code)
}

pub fn temperature(celsius: i32) -> String {
    format!("{celsius} C")
}

/// Compass direction as sent by the provider, followed by the speed band.
pub fn wind(direction: &str, speed: i32) -> String {
    format!("{direction} {}", wind_speed(speed))
}

/// A forecast entry with every field rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub timepoint: i32,
    pub cloud_cover: &'static str,
    pub lifted_index: &'static str,
    pub temperature: String,
    pub seeing: &'static str,
    pub transparency: &'static str,
    pub humidity: &'static str,
    /// Passed through unmapped.
    pub precipitation: String,
    pub wind: String,
}

impl EntryReport {
    /// Column headers, in the order of [`EntryReport::into_record`].
    pub const COLUMNS: [&'static str; 9] = [
        "Timepoint",
        "Cloud Cover",
        "Lifted Index",
        "Temperature 2m",
        "Seeing",
        "Transparency",
        "Humidity 2m",
        "Precipitation",
        "Wind 10m",
    ];

    pub fn into_record(self) -> [String; 9] {
        [
            self.timepoint.to_string(),
            self.cloud_cover.to_owned(),
            self.lifted_index.to_owned(),
            self.temperature,
            self.seeing.to_owned(),
            self.transparency.to_owned(),
            self.humidity.to_owned(),
            self.precipitation,
            self.wind,
        ]
    }
}

impl From<&ForecastEntry> for EntryReport {
    fn from(entry: &ForecastEntry) -> Self {
        Self {
            timepoint: entry.timepoint,
            cloud_cover: cloud_cover(entry.cloudcover),
            lifted_index: lifted_index(entry.lifted_index),
            temperature: temperature(entry.temp2m),
            seeing: seeing(entry.seeing),
            transparency: transparency(entry.transparency),
            humidity: relative_humidity(entry.rh2m),
            precipitation: entry.prec_type.clone(),
            wind: wind(&entry.wind10m.direction, entry.wind10m.speed),
        }
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timepoint: {} hours", self.timepoint)?;
        writeln!(f, "Cloud cover: {}", self.cloud_cover)?;
        writeln!(f, "Lifted index: {}", self.lifted_index)?;
        writeln!(f, "Temperature 2 meters: {}", self.temperature)?;
        writeln!(f, "Seeing range: {}", self.seeing)?;
        writeln!(f, "Transparency range: {}", self.transparency)?;
        writeln!(f, "Relative humidity 2 meters: {}", self.humidity)?;
        writeln!(f, "Precipitation type: {}", self.precipitation)?;
        write!(f, "Wind: {}", self.wind)
    }
}
