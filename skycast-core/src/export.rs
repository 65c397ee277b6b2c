//! CSV dump of a whole forecast series.
//!
//! Layout: a short key/value preamble (location, model run, product), one
//! header row, then one row per forecast entry. Rows differ in length, so
//! the writer is built `flexible`.

use std::{fs::File, io, path::Path};

use csv::WriterBuilder;
use tracing::info;

use crate::{
    error::{Result, SkycastError},
    interpret::EntryReport,
    model::{Coordinates, ForecastResponse},
};

pub fn write_forecast_csv<W: io::Write>(
    writer: W,
    forecast: &ForecastResponse,
    coords: &Coordinates,
) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(["Weather forecasts data for"])?;
    wtr.write_record(["Latitude", coords.latitude.as_str()])?;
    wtr.write_record(["Longitude", coords.longitude.as_str()])?;
    wtr.write_record(["Initial timestamp", forecast.init.as_str()])?;
    wtr.write_record(["Product", forecast.product.as_str()])?;
    wtr.write_record(EntryReport::COLUMNS)?;

    for entry in &forecast.dataseries {
        wtr.write_record(EntryReport::from(entry).into_record())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the forecast into it.
pub fn export_forecast_csv(
    path: &Path,
    forecast: &ForecastResponse,
    coords: &Coordinates,
) -> Result<()> {
    let to_err = |source: csv::Error| SkycastError::Export { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(|e| to_err(csv::Error::from(e)))?;

    write_forecast_csv(file, forecast, coords).map_err(to_err)?;

    info!(path = %path.display(), rows = forecast.dataseries.len(), "forecast exported");
    Ok(())
}
