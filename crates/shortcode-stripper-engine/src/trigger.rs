//! The administrative "strip shortcodes now" action.
//!
//! A trigger is a plain request/response exchange: the caller must be
//! authorised and present a single-use token issued for this action. Both
//! checks happen before the store is touched, so a refused request has no
//! effect at all. On success the batch runs synchronously and the response
//! carries the report; displaying it is up to the caller.

use crate::batch::{BatchReport, BatchRunner};
use crate::store::{DocumentStore, StoreError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Action name that tokens for [`trigger`] are bound to
pub const STRIP_ACTION: &str = "strip_shortcodes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub name: String,
    pub role: Role,
}

impl Caller {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

pub trait Authorizer {
    fn can_strip(&self, caller: &Caller) -> bool;
}

/// Only administrators may rewrite every document
#[derive(Debug, Clone, Copy, Default)]
pub struct AdministratorsOnly;

impl Authorizer for AdministratorsOnly {
    fn can_strip(&self, caller: &Caller) -> bool {
        caller.role == Role::Administrator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionToken(Uuid);

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ActionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Issues and checks single-use tokens bound to an action name.
#[derive(Debug, Default)]
pub struct ActionTokens {
    issued: HashMap<ActionToken, String>,
}

impl ActionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, action: &str) -> ActionToken {
        let token = ActionToken(Uuid::new_v4());
        self.issued.insert(token, action.to_string());
        token
    }

    /// Consume `token` if it was issued for `action`.
    ///
    /// A token presented for a different action is left in place.
    pub fn verify(&mut self, action: &str, token: &ActionToken) -> bool {
        match self.issued.get(token) {
            Some(bound) if bound == action => {
                self.issued.remove(token);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriggerRequest {
    pub caller: Caller,
    pub token: ActionToken,
}

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("{caller} is not allowed to strip shortcodes")]
    Unauthorized { caller: String },
    #[error("Invalid or expired action token")]
    InvalidToken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerStatus {
    Completed,
    CompletedWithFailures,
}

#[derive(Debug, Clone)]
pub struct TriggerResponse {
    pub status: TriggerStatus,
    pub report: BatchReport,
}

impl TriggerResponse {
    /// Human readable confirmation for the caller to display
    pub fn notice(&self) -> String {
        let report = &self.report;
        match (self.status, report.dry_run) {
            (_, true) => format!(
                "Dry run: {} of {} documents would be rewritten.",
                report.rewritten.len(),
                report.scanned
            ),
            (TriggerStatus::Completed, false) => {
                "Shortcodes have been removed successfully, preserving the inner content."
                    .to_string()
            }
            (TriggerStatus::CompletedWithFailures, false) => format!(
                "Shortcodes were removed from {} documents, but {} documents could not be updated.",
                report.rewritten.len(),
                report.failures.len()
            ),
        }
    }
}

/// Check the request, then run the batch over `store`.
pub fn trigger<S>(
    request: &TriggerRequest,
    authorizer: &dyn Authorizer,
    tokens: &mut ActionTokens,
    runner: &BatchRunner,
    store: &mut S,
) -> Result<TriggerResponse, TriggerError>
where
    S: DocumentStore + ?Sized,
{
    if !authorizer.can_strip(&request.caller) {
        log::warn!("Refusing shortcode removal for {}", request.caller.name);
        return Err(TriggerError::Unauthorized {
            caller: request.caller.name.clone(),
        });
    }

    if !tokens.verify(STRIP_ACTION, &request.token) {
        log::warn!("Refusing shortcode removal: invalid action token");
        return Err(TriggerError::InvalidToken);
    }

    let report = runner.run(store)?;
    let status = if report.is_success() {
        TriggerStatus::Completed
    } else {
        TriggerStatus::CompletedWithFailures
    };

    Ok(TriggerResponse { status, report })
}
