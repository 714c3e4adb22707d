//! The city/weather store: the single authoritative piece of mutable state.
//!
//! Holds the ordered list of tracked cities plus a loading flag and the
//! last add-path error, mutated only through the methods below. Network
//! results are applied keyed by city id, so two in-flight requests may
//! complete in either order without corrupting the list.

use parking_lot::Mutex;
use skycast_weather::{WeatherClient, WeatherError};

use crate::city::City;

type Subscriber = Box<dyn Fn(&[City]) + Send + Sync>;

#[derive(Debug, Clone, Default)]
struct StoreState {
    cities: Vec<City>,
    loading: bool,
    error: Option<String>,
}

/// In-memory store of tracked cities.
///
/// Snapshot accessors return consistent copies; subscribers are invoked
/// with the full list after every city-list mutation (state-only changes
/// such as `loading` or `error` do not notify).
pub struct CityStore {
    client: WeatherClient,
    state: Mutex<StoreState>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl CityStore {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            state: Mutex::new(StoreState::default()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a city-list observer. The composition root registers the
    /// persistence bridge here, once, at startup.
    pub fn subscribe(&self, subscriber: impl Fn(&[City]) + Send + Sync + 'static) {
        self.subscribers.lock().push(Box::new(subscriber));
    }

    fn notify(&self) {
        let cities = self.state.lock().cities.clone();
        for subscriber in self.subscribers.lock().iter() {
            subscriber(&cities);
        }
    }

    /// Insert a city unless one with the same id is already tracked.
    pub fn add_city(&self, city: City) {
        let inserted = {
            let mut state = self.state.lock();
            if state.cities.iter().any(|c| c.id == city.id) {
                false
            } else {
                state.cities.push(city);
                true
            }
        };
        if inserted {
            self.notify();
        }
    }

    /// Remove the city with the given id; no-op when absent.
    pub fn remove_city(&self, id: &str) {
        let removed = {
            let mut state = self.state.lock();
            let before = state.cities.len();
            state.cities.retain(|c| c.id != id);
            state.cities.len() != before
        };
        if removed {
            self.notify();
        }
    }

    /// Replace the whole list verbatim. Used once, at startup, to hydrate
    /// from persisted storage.
    pub fn set_cities(&self, cities: Vec<City>) {
        self.state.lock().cities = cities;
        self.notify();
    }

    /// Empty the list unconditionally.
    pub fn clear_all_cities(&self) {
        self.state.lock().cities.clear();
        self.notify();
    }

    /// Reset the last add-path error.
    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }

    pub fn cities(&self) -> Vec<City> {
        self.state.lock().cities.clone()
    }

    pub fn city(&self, id: &str) -> Option<City> {
        self.state.lock().cities.iter().find(|c| c.id == id).cloned()
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Fetch current conditions by name and track the resulting city.
    ///
    /// Insertion is skipped silently when the derived id is already
    /// tracked; that is not reported as an error. Failures set the store
    /// error to the category message and are also returned so the caller
    /// can react (e.g. keep the typed text).
    pub async fn fetch_city_weather(&self, name: &str) -> Result<City, WeatherError> {
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }

        match self.client.get_current_weather(name).await {
            Ok(conditions) => {
                let city = City::from_conditions(conditions);
                let inserted = {
                    let mut state = self.state.lock();
                    state.loading = false;
                    if state.cities.iter().any(|c| c.id == city.id) {
                        false
                    } else {
                        state.cities.push(city.clone());
                        true
                    }
                };
                if inserted {
                    tracing::info!(id = %city.id, "tracking new city");
                    self.notify();
                } else {
                    tracing::debug!(id = %city.id, "city already tracked, skipping insert");
                }
                Ok(city)
            }
            Err(err) => {
                {
                    let mut state = self.state.lock();
                    state.loading = false;
                    state.error = Some(err.user_message().to_string());
                }
                Err(err)
            }
        }
    }

    /// Re-fetch conditions for a tracked city and replace its snapshot.
    ///
    /// A city deleted while the request was in flight makes the apply a
    /// no-op. Failures never touch the store's `error` or `loading`; they
    /// are logged and returned to the caller only.
    pub async fn refresh_city_weather(&self, id: &str, name: &str) -> Result<(), WeatherError> {
        match self.client.get_current_weather(name).await {
            Ok(conditions) => {
                let replaced = {
                    let mut state = self.state.lock();
                    match state.cities.iter_mut().find(|c| c.id == id) {
                        Some(city) => {
                            city.weather = Some(conditions);
                            true
                        }
                        None => false,
                    }
                };
                if replaced {
                    self.notify();
                } else {
                    tracing::debug!(id, "refresh completed for a city no longer tracked");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to refresh weather");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for CityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CityStore")
            .field("cities", &state.cities.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish()
    }
}
