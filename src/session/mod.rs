//! Session and preference state.
//!
//! One explicit, serializable `SessionState` is shared through `AppState`.
//! It is persisted to a JSON file, and only at the mutation points below:
//! `sign_in`, `sign_out`/`expire`, `set_user`, `set_theme`, `set_language`.
//! Reads are lock-free snapshots. Writers serialize on a mutex so the file
//! always holds the latest state. The in-memory state is updated even when
//! writing the file fails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::User;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fr" | "french" => Ok(Self::Fr),
            "en" | "english" => Ok(Self::En),
            "ar" | "arabic" => Ok(Self::Ar),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

impl SessionState {
    /// A session needs both a token and the cached profile
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

pub struct SessionStore {
    path: PathBuf,
    state: ArcSwap<SessionState>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Read the persisted state. A missing file is an empty session; an
    /// unreadable one is logged and discarded.
    pub fn load(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file: {}", path.display()))?;
            match serde_json::from_str::<SessionState>(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                    SessionState::default()
                }
            }
        } else {
            debug!(path = %path.display(), "No session file, starting signed out");
            SessionState::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: ArcSwap::from_pointee(state),
            write_lock: Mutex::new(()),
        })
    }

    /// In-memory store that never touches disk until a mutation
    pub fn with_state(path: &Path, state: SessionState) -> Self {
        Self {
            path: path.to_path_buf(),
            state: ArcSwap::from_pointee(state),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.load_full()
    }

    pub fn token(&self) -> Option<String> {
        self.state.load().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.load().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.load().is_authenticated()
    }

    pub fn sign_in(&self, token: String, user: User) -> Result<()> {
        info!(user = %user.email, role = %user.role, "Signed in");
        self.update(|state| {
            state.token = Some(token);
            state.user = Some(user);
        })
    }

    /// Drop the credentials but keep the preferences.
    pub fn sign_out(&self) -> Result<()> {
        info!("Signed out");
        self.update(|state| {
            state.token = None;
            state.user = None;
        })
    }

    /// The backend rejected the stored token.
    pub fn expire(&self) -> Result<()> {
        warn!("Session expired, clearing stored credentials");
        self.update(|state| {
            state.token = None;
            state.user = None;
        })
    }

    /// Refresh the cached profile without touching the token.
    pub fn set_user(&self, user: User) -> Result<()> {
        self.update(|state| state.user = Some(user))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.update(|state| state.theme = theme)
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.update(|state| state.language = language)
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionState)) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut next = SessionState::clone(&self.state.load());
        mutate(&mut next);
        let next = Arc::new(next);
        self.state.store(next.clone());
        self.persist(&next)
    }

    fn persist(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_vec_pretty(state).context("Failed to encode session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }
}
