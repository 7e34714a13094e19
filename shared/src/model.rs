use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::PlantCatalog;
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::pager::Pager;

pub const ALL_ENVIRONMENTS_KEY: &str = "all";
pub const ALL_ENVIRONMENTS_TITLE: &str = "Todos";

/// Identifier of an environment tag such as `kitchen` or `living_room`.
/// `all` is reserved for the synthetic "every environment" tag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EnvironmentKey(pub String);

impl EnvironmentKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn all() -> Self {
        Self(ALL_ENVIRONMENTS_KEY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == ALL_ENVIRONMENTS_KEY
    }
}

impl Default for EnvironmentKey {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for EnvironmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentTag {
    pub key: EnvironmentKey,
    pub title: String,
}

impl EnvironmentTag {
    #[must_use]
    pub fn all() -> Self {
        Self {
            key: EnvironmentKey::all(),
            title: ALL_ENVIRONMENTS_TITLE.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlantId(pub u64);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Watering schedule, e.g. 2 times every `week`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Frequency {
    pub times: u32,
    pub repeat_every: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub about: String,
    pub water_tips: String,
    pub photo: String,
    pub environments: Vec<EnvironmentKey>,
    pub frequency: Frequency,
}

impl Plant {
    /// `all` matches every plant.
    #[must_use]
    pub fn suits(&self, key: &EnvironmentKey) -> bool {
        key.is_all() || self.environments.contains(key)
    }
}

/// One mount-to-unmount lifetime of the screen. Responses are only applied
/// while the session that issued them is current.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Debug)]
pub struct Model {
    pub config: ApiConfig,
    /// Configuration received while mounted; takes effect on the next mount.
    pub pending_config: Option<ApiConfig>,
    pub session: Option<SessionId>,
    pub sessions_started: u64,

    // Tag selector; always starts with the synthetic "all" tag
    pub environments: Vec<EnvironmentTag>,
    pub environments_loading: bool,
    pub environments_failed: bool,
    /// The mount-time tag request has not resolved yet.
    pub initial_environments_pending: bool,

    // Plant grid
    pub catalog: PlantCatalog,
    pub pager: Pager,

    pub active_error: Option<AppError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            config: ApiConfig::default(),
            pending_config: None,
            session: None,
            sessions_started: 0,
            environments: vec![EnvironmentTag::all()],
            environments_loading: false,
            environments_failed: false,
            initial_environments_pending: false,
            catalog: PlantCatalog::new(),
            pager: Pager::new(),
            active_error: None,
        }
    }
}

impl Model {
    /// Starts a fresh screen session, dropping anything the previous one
    /// accumulated. Responses addressed to older sessions are ignored.
    /// A configuration held back during the previous session is applied here.
    pub fn begin_session(&mut self) -> SessionId {
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }

        self.sessions_started += 1;
        let session = SessionId(self.sessions_started);

        self.session = Some(session);
        self.environments = vec![EnvironmentTag::all()];
        self.environments_loading = false;
        self.environments_failed = false;
        self.initial_environments_pending = false;
        self.catalog = PlantCatalog::new();
        self.pager = Pager::new();
        self.active_error = None;

        session
    }

    pub fn end_session(&mut self) {
        self.session = None;
        self.environments_loading = false;
        self.initial_environments_pending = false;
        self.pager.cancel();
    }

    #[must_use]
    pub fn is_current(&self, session: SessionId) -> bool {
        self.session == Some(session)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// True while either of the two mount-time fetches is outstanding, or
    /// while the first page is being fetched again after failing.
    #[must_use]
    pub fn is_initial_loading(&self) -> bool {
        self.initial_environments_pending || self.pager.is_initial_loading()
    }

    /// Replaces the tag list with `[all, ..fetched]`. A fetched tag using the
    /// reserved key, or repeating an earlier key, is dropped.
    pub fn set_environments(&mut self, fetched: Vec<EnvironmentTag>) {
        let mut environments = Vec::with_capacity(fetched.len() + 1);
        environments.push(EnvironmentTag::all());

        for tag in fetched {
            if environments.iter().any(|t: &EnvironmentTag| t.key == tag.key) {
                continue;
            }
            environments.push(tag);
        }

        self.environments = environments;
    }

    /// Applies `config` now, or holds it until the next session if mounted.
    /// Returns true if it was applied immediately.
    pub fn configure(&mut self, config: ApiConfig) -> bool {
        if self.is_mounted() {
            self.pending_config = Some(config);
            false
        } else {
            self.pending_config = None;
            self.config = config;
            true
        }
    }

    pub fn set_error(&mut self, error: AppError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }

    #[must_use]
    pub fn has_failed_fetch(&self) -> bool {
        self.environments_failed || self.pager.has_failed()
    }
}
