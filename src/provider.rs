//! Project collection access: REST store, in-memory store, and the
//! load-state wrapper the overview renders from.
//!
//! All remote access goes through [`ProjectStore`]; nothing else in the
//! crate builds URLs or issues requests.

use std::sync::Mutex;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Anlage, NewProjectPayload, Windpark};

/// Fallback detail message when the server sends no parseable error body.
const GENERIC_CREATE_ERROR: &str = "Fehler beim Speichern des Projekts";

/// Errors surfaced at the provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure (unreachable host, closed connection, bad body).
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response, carrying the server's `detail` message when present.
    #[error("server error (HTTP {status}): {detail}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or a generic message.
        detail: String,
    },
}

/// Backing store for the project collection.
pub trait ProjectStore {
    /// Fetches all projects.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the store is unreachable or replies
    /// with a non-success status.
    fn list(&self) -> Result<Vec<Windpark>, ProviderError>;

    /// Creates a new project and returns it with the assigned id.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the request fails or is rejected.
    fn create(&self, payload: &NewProjectPayload) -> Result<Windpark, ProviderError>;
}

/// Error body of the REST service: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// REST-backed store against `{base_url}/projects`.
pub struct RestStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RestStore {
    /// Creates a store for the given base URL (e.g. `http://host:8000/api/v1`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/projects", self.base_url)
    }

    /// Maps a non-success response to a `Server` error, preferring the
    /// body's `detail` field.
    fn server_error(response: reqwest::blocking::Response) -> ProviderError {
        let status = response.status().as_u16();
        let detail = response
            .json::<ErrorBody>()
            .map(|body| body.detail)
            .unwrap_or_else(|_| GENERIC_CREATE_ERROR.to_string());
        ProviderError::Server { status, detail }
    }
}

impl ProjectStore for RestStore {
    fn list(&self) -> Result<Vec<Windpark>, ProviderError> {
        let response = self.client.get(self.projects_url()).send()?;
        if !response.status().is_success() {
            return Err(Self::server_error(response));
        }
        Ok(response.json()?)
    }

    fn create(&self, payload: &NewProjectPayload) -> Result<Windpark, ProviderError> {
        let response = self.client.post(self.projects_url()).json(payload).send()?;
        if !response.status().is_success() {
            return Err(Self::server_error(response));
        }
        Ok(response.json()?)
    }
}

/// In-memory store with server-style sequential id assignment.
///
/// Backs the offline mode, the bundled API server, and tests.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    projects: Vec<Windpark>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates a store seeded with the given projects.
    ///
    /// Ids for created projects continue after the highest numeric seed id.
    pub fn new(projects: Vec<Windpark>) -> Self {
        let next_id = projects
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: Mutex::new(MemoryInner { projects, next_id }),
        }
    }
}

impl ProjectStore for MemoryStore {
    fn list(&self) -> Result<Vec<Windpark>, ProviderError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.projects.clone())
    }

    fn create(&self, payload: &NewProjectPayload) -> Result<Windpark, ProviderError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id.to_string();
        inner.next_id += 1;

        let anlagen = payload
            .anlagen
            .iter()
            .enumerate()
            .map(|(i, a)| Anlage {
                id: (i + 1).to_string(),
                hersteller: a.hersteller.clone(),
                modell: a.modell.clone(),
                anzahl: a.anzahl,
            })
            .collect();

        let created = Windpark {
            id,
            name: payload.name.clone(),
            standort: payload.standort.clone(),
            baubeginn: payload.baubeginn,
            inbetriebnahme: payload.inbetriebnahme,
            status: payload.status,
            gewinn_pro_annum: payload.gewinn_pro_annum,
            investitionsvolumen: payload.investitionsvolumen,
            ek_quote: payload.ek_quote,
            fk_zins: payload.fk_zins,
            roi: payload.roi,
            anlagen,
        };
        inner.projects.push(created.clone());
        Ok(created)
    }
}

/// Load state of the overview collection.
///
/// `Idle -> Loading -> (Loaded | FailedWithFallback)`; a manual refresh
/// re-enters `Loading`. No retry or backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded yet.
    Idle,
    /// A list request is in progress.
    Loading,
    /// The last refresh succeeded.
    Loaded,
    /// The last refresh failed; fallback data is displayed.
    FailedWithFallback,
}

/// The project list as displayed, with its load state and error notice.
pub struct ProjectCollection {
    projects: Vec<Windpark>,
    fallback: Vec<Windpark>,
    state: LoadState,
    error: Option<String>,
}

impl ProjectCollection {
    /// Creates an idle collection with the given fallback list.
    pub fn new(fallback: Vec<Windpark>) -> Self {
        Self {
            projects: Vec::new(),
            fallback,
            state: LoadState::Idle,
            error: None,
        }
    }

    /// Reloads the list from the store.
    ///
    /// On failure the fallback list is shown instead and a one-line notice
    /// is kept for the view; the error is never propagated.
    pub fn refresh<S: ProjectStore + ?Sized>(&mut self, store: &S) {
        self.state = LoadState::Loading;
        self.error = None;
        match store.list() {
            Ok(projects) => {
                self.projects = projects;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                log::warn!("project list unavailable, showing fallback data: {e}");
                self.projects = self.fallback.clone();
                self.error = Some("Fehler beim Laden der Windparkprojekte".to_string());
                self.state = LoadState::FailedWithFallback;
            }
        }
    }

    /// Appends a freshly created project without a round trip.
    pub fn push(&mut self, project: Windpark) {
        self.projects.push(project);
    }

    /// The currently displayed projects.
    pub fn projects(&self) -> &[Windpark] {
        &self.projects
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// One-line notice for the view when the last refresh failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
