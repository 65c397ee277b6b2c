use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use skycast_core::{
    Config, Coordinates, EntryReport, ForecastResponse, Provider, ProviderId, SevenTimerProvider,
    SunTimesResponse, SunriseSunsetProvider, export_forecast_csv,
};
use tracing::{debug, info};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const COORDINATES_PROMPT: &str =
    "Enter the latitude and longitude in decimal format ('48.208 16.372' for Vienna):";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Astronomy forecast and sun times CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the 7timer astronomical forecast and dump the whole series to CSV.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// CSV output path; defaults to the configured path.
        #[arg(long, value_name = "PATH", conflicts_with = "no_csv")]
        csv: Option<PathBuf>,

        /// Skip the CSV export.
        #[arg(long)]
        no_csv: bool,
    },

    /// Show sunrise and sunset times from sunrise-sunset.org.
    Sun {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Override the endpoint used for a provider, e.g. "7timer" or "sunrise-sunset".
    Configure {
        provider: String,

        /// Forget the override and use the public endpoint again.
        #[arg(long)]
        reset: bool,
    },
}

/// Coordinates given on the command line; prompted for when omitted.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees, e.g. 48.208
    #[arg(allow_negative_numbers = true, requires = "longitude")]
    latitude: Option<String>,

    /// Longitude in decimal degrees, e.g. 16.372
    #[arg(allow_negative_numbers = true)]
    longitude: Option<String>,
}

impl LocationArgs {
    fn resolve(self) -> anyhow::Result<Coordinates> {
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            return Ok(Coordinates::new(lat, lng));
        }

        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return read_coordinates(stdin.lock());
        }

        let line = inquire::Text::new(COORDINATES_PROMPT)
            .prompt()
            .context("Failed to read coordinates")?;

        Ok(line.parse::<Coordinates>()?)
    }
}

/// Reads one line of piped input as `<latitude> <longitude>`.
fn read_coordinates<R: BufRead>(mut reader: R) -> anyhow::Result<Coordinates> {
    let mut line = String::new();
    reader.read_line(&mut line).context("Failed to read coordinates")?;

    Ok(line.parse::<Coordinates>()?)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Forecast { location, csv, no_csv } => {
                let coords = location.resolve()?;
                let provider = SevenTimerProvider::from_config(&config)?;
                let forecast = provider.fetch(&coords).await?;

                print!("{}", render_forecast(&forecast, &coords));

                let export_path = if no_csv {
                    None
                } else {
                    csv.or_else(|| config.export.enabled.then(|| config.export.path.clone()))
                };

                debug!(export_path = ?export_path, "export target chosen");

                if let Some(path) = export_path {
                    export_forecast_csv(&path, &forecast, &coords)?;
                    println!("Forecast series written to {}", path.display());
                }
            }
            Command::Sun { location } => {
                let coords = location.resolve()?;
                let provider = SunriseSunsetProvider::from_config(&config)?;
                let times = provider.fetch(&coords).await?;

                print!("{}", render_sun_times(&times));
            }
            Command::Configure { provider, reset } => {
                let id = ProviderId::try_from(provider.as_str())?;

                if reset {
                    config.reset_provider(id);
                } else {
                    let current = config.provider_base_url(id).to_string();
                    let base_url = inquire::Text::new(&format!("Base URL for {id}:"))
                        .with_default(&current)
                        .prompt()
                        .context("Failed to read base URL")?;

                    config.upsert_provider_base_url(id, base_url.trim().to_string());
                    // Reject the value before it reaches the file.
                    id.base_url(&config)?;
                }

                config.save()?;
                info!(provider = %id, reset, "configuration saved");
                println!("Configuration saved to {}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

/// Header block plus the first forecast entry.
fn render_forecast(forecast: &ForecastResponse, coords: &Coordinates) -> String {
    let init = match forecast.init_time() {
        Some(time) => format!("{} ({} UTC)", forecast.init, time.format(TIME_FORMAT)),
        None => forecast.init.clone(),
    };

    let mut out = format!(
        "Weather forecast for {coords}\nInitial timestamp: {init}\nProduct: {}\n",
        forecast.product
    );

    if let Some(entry) = forecast.first_entry() {
        if let Some(valid) = forecast.valid_time(entry) {
            out.push_str(&format!("Valid at: {} UTC\n", valid.format(TIME_FORMAT)));
        }
        out.push_str(&format!("{}\n", EntryReport::from(entry)));
    }

    out
}

fn render_sun_times(times: &SunTimesResponse) -> String {
    format!(
        "Sunrise: {} {}\nSunset: {} {}\n",
        times.results.sunrise, times.tzid, times.results.sunset, times.tzid
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::model::{ForecastEntry, SunTimes, Wind};

    fn forecast() -> ForecastResponse {
        ForecastResponse {
            product: "astro".into(),
            init: "2024112012".into(),
            dataseries: vec![ForecastEntry {
                timepoint: 72,
                cloudcover: 9,
                seeing: 3,
                transparency: 4,
                lifted_index: 2,
                rh2m: 11,
                wind10m: Wind { direction: "SE".into(), speed: 2 },
                temp2m: 9,
                prec_type: "none".into(),
            }],
        }
    }

    #[test]
    fn parses_forecast_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["skycast", "forecast", "-33.868", "151.209", "--no-csv"])
            .expect("negative latitude must parse");

        match cli.command {
            Command::Forecast { location, no_csv, csv } => {
                assert!(no_csv);
                assert!(csv.is_none());
                assert_eq!(location.latitude.as_deref(), Some("-33.868"));
                assert_eq!(location.longitude.as_deref(), Some("151.209"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn latitude_alone_is_rejected() {
        assert!(Cli::try_parse_from(["skycast", "sun", "48.208"]).is_err());
    }

    #[test]
    fn csv_and_no_csv_conflict() {
        let res = Cli::try_parse_from(["skycast", "forecast", "--csv", "out.csv", "--no-csv"]);
        assert!(res.is_err());
    }

    #[test]
    fn given_coordinates_skip_the_prompt() {
        let args = LocationArgs { latitude: Some("48.208".into()), longitude: Some("16.372".into()) };
        assert_eq!(args.resolve().unwrap(), Coordinates::new("48.208", "16.372"));
    }

    #[test]
    fn piped_line_is_parsed_as_coordinates() {
        let input = io::Cursor::new("48.208 16.372\nignored second line\n");
        assert_eq!(read_coordinates(input).unwrap(), Coordinates::new("48.208", "16.372"));
    }

    #[test]
    fn empty_piped_input_is_rejected() {
        let err = read_coordinates(io::Cursor::new("")).unwrap_err();
        let err = err.downcast::<skycast_core::SkycastError>().unwrap();
        assert_eq!(err.kind(), skycast_core::ErrorKind::Input);
    }

    #[test]
    fn piped_line_with_one_token_is_rejected() {
        assert!(read_coordinates(io::Cursor::new("48.208\n")).is_err());
    }

    #[test]
    fn report_is_kept_when_init_is_malformed() {
        let mut forecast = forecast();
        forecast.init = "unknown".into();

        let text = render_forecast(&forecast, &Coordinates::new("48.208", "16.372"));

        assert!(text.contains("Initial timestamp: unknown\n"));
        assert!(!text.contains("Valid at:"));
        assert!(text.contains("Cloud cover: 94-100 %"));
    }

    #[test]
    fn forecast_summary_lists_first_entry() {
        let text = render_forecast(&forecast(), &Coordinates::new("48.208", "16.372"));

        assert!(text.starts_with("Weather forecast for 48.208 16.372\n"));
        assert!(text.contains("Initial timestamp: 2024112012 (2024-11-20 12:00 UTC)"));
        assert!(text.contains("Product: astro"));
        assert!(text.contains("Valid at: 2024-11-23 12:00 UTC"));
        assert!(text.contains("Cloud cover: 94-100 %"));
        assert!(text.contains("Wind: SE 0.3-3.4m/s (light)"));
    }

    #[test]
    fn sun_times_summary() {
        let times = SunTimesResponse {
            results: SunTimes { sunrise: "6:12:45 AM".into(), sunset: "3:59:10 PM".into() },
            status: "OK".into(),
            tzid: "UTC".into(),
        };

        assert_eq!(render_sun_times(&times), "Sunrise: 6:12:45 AM UTC\nSunset: 3:59:10 PM UTC\n");
    }
}
