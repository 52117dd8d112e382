use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::lottery::{Entry, SyncedLottery};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

/// Body of `GET /api/auth/session`. An empty object means nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser { email: email.into() }),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Anonymous,
    Authenticated(SessionUser),
}

impl SessionState {
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Authenticated(user) => Some(user.email.as_str()),
            _ => None,
        }
    }
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        match session.user {
            Some(user) => Self::Authenticated(user),
            None => Self::Anonymous,
        }
    }
}

/// Outcome of one of the page's remote lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Pending,
    Missing,
    Ready(T),
    Failed,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> FetchState<T> {
    pub fn from_record(record: Option<T>) -> Self {
        match record {
            Some(value) => Self::Ready(value),
            None => Self::Missing,
        }
    }

    /// Still waiting, or stuck after an error.
    pub fn is_unsettled(&self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Tells an in-flight lookup whether its result is still wanted.
///
/// The view keeps one handle and cancels it on teardown; the lookup keeps a
/// clone and passes its result through `accept`, which drops it once the
/// view is gone.
#[derive(Debug, Clone)]
pub struct FetchGuard {
    alive: Rc<Cell<bool>>,
}

impl Default for FetchGuard {
    fn default() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.alive.set(false);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn accept<T>(&self, result: T) -> Option<T> {
        self.is_alive().then_some(result)
    }
}

/// What the lottery page shows, decided once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    LoggedOut,
    ShowForm,
    ShowConfirmation,
}

impl ViewState {
    pub fn compute(
        session: &SessionState,
        entry: &FetchState<Entry>,
        lottery: &FetchState<SyncedLottery>,
    ) -> Self {
        match session {
            SessionState::Loading => return Self::Loading,
            SessionState::Anonymous => return Self::LoggedOut,
            SessionState::Authenticated(_) => {}
        }

        if entry.is_unsettled() || lottery.is_unsettled() {
            return Self::Loading;
        }

        match entry {
            FetchState::Ready(_) => Self::ShowConfirmation,
            _ => Self::ShowForm,
        }
    }
}
