use anyhow::bail;
use clap::{Parser, Subcommand};

use skycast_core::App;
use skycast_services::City;
use skycast_weather::{ForecastEntry, HOURLY_WINDOW};

use crate::fmt;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Track cities and their weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Track a new city by name and fetch its current weather.
    Add {
        /// City name, e.g. "Kyiv".
        name: String,
    },

    /// List all tracked cities and their last known conditions.
    List,

    /// Show one city in detail, with the upcoming hourly forecast.
    Show {
        /// City id, e.g. "Kyiv-UA" (see `list`).
        id: String,
    },

    /// Re-fetch current conditions for a tracked city.
    Refresh {
        /// City id, e.g. "Kyiv-UA".
        id: String,
    },

    /// Stop tracking a city.
    Remove {
        /// City id, e.g. "Kyiv-UA".
        id: String,
    },

    /// Stop tracking all cities.
    Clear,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let app = match App::new() {
            Ok(app) => app,
            Err(err) => {
                tracing::error!(error = %err, "failed to start");
                bail!("{}", err.user_message());
            }
        };
        let store = app.store();

        match self.command {
            Command::Add { name } => {
                let name = name.trim();
                if name.is_empty() {
                    bail!("City name must not be empty.");
                }
                match store.fetch_city_weather(name).await {
                    Ok(city) => {
                        println!("Now tracking {}, {}.", city.name, city.country);
                        print_card(&city);
                    }
                    Err(err) => {
                        let message = store
                            .error()
                            .unwrap_or_else(|| err.user_message().to_string());
                        bail!("{message}");
                    }
                }
            }

            Command::List => {
                let cities = store.cities();
                if cities.is_empty() {
                    println!("No cities tracked yet. Add one with `skycast add <name>`.");
                }
                for city in &cities {
                    print_card(city);
                }
            }

            Command::Show { id } => {
                let Some(city) = store.city(&id) else {
                    bail!("City not found: {id}");
                };
                print_detail(&city);

                match app.client().get_hourly_forecast(&city.name).await {
                    Ok(forecast) => print_forecast(forecast.leading(HOURLY_WINDOW)),
                    Err(err) => {
                        // Forecast failures stay local to this view.
                        eprintln!("{}", err.forecast_user_message());
                    }
                }
            }

            Command::Refresh { id } => {
                let Some(city) = store.city(&id) else {
                    bail!("City not found: {id}");
                };
                match store.refresh_city_weather(&city.id, &city.name).await {
                    Ok(()) => {
                        if let Some(updated) = store.city(&city.id) {
                            print_card(&updated);
                        }
                    }
                    Err(err) => bail!("{}", err.user_message()),
                }
            }

            Command::Remove { id } => {
                if store.city(&id).is_some() {
                    store.remove_city(&id);
                    println!("No longer tracking {id}.");
                } else {
                    println!("{id} is not tracked.");
                }
            }

            Command::Clear => {
                store.clear_all_cities();
                println!("Cleared all tracked cities.");
            }
        }

        Ok(())
    }
}

fn print_card(city: &City) {
    println!("{}, {}  [{}]", city.name, city.country, city.id);
    match &city.weather {
        Some(weather) => {
            let description = weather
                .condition()
                .map(|c| c.description.as_str())
                .unwrap_or("unknown conditions");
            println!(
                "  {}  {}  ({})",
                fmt::format_temperature(weather.main.temp),
                description,
                fmt::format_feels_like(weather.main.feels_like),
            );
            println!("  Updated: {}", fmt::format_observed(weather.dt));
        }
        None => println!("  weather not fetched yet"),
    }
}

fn print_detail(city: &City) {
    println!("{}, {}", city.name, city.country);
    let Some(weather) = &city.weather else {
        println!("  weather not fetched yet");
        return;
    };

    if let Some(condition) = weather.condition() {
        println!("  {}", condition.description);
    }
    println!("  Temperature: {}", fmt::format_temperature(weather.main.temp));
    println!("  {}", fmt::format_feels_like(weather.main.feels_like));
    println!("  Humidity: {}%", weather.main.humidity);
    println!("  Pressure: {} hPa", weather.main.pressure);
    println!("  Wind: {} m/s", weather.wind.speed);
    if let Some(visibility) = weather.visibility {
        println!("  Visibility: {visibility} m");
    }
    println!("  Updated: {}", fmt::format_observed(weather.dt));
}

fn print_forecast(entries: &[ForecastEntry]) {
    if entries.is_empty() {
        println!("No forecast entries available.");
        return;
    }

    println!("Upcoming hours:");
    for entry in entries {
        let description = entry
            .condition()
            .map(|c| c.description.as_str())
            .unwrap_or("");
        println!(
            "  {}  {:>5}  {}",
            fmt::format_hour(entry.dt),
            fmt::format_temperature(entry.main.temp),
            description,
        );
    }
}
