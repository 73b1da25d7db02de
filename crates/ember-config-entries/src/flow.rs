//! Flow step results
//!
//! The vocabulary shared by setup and reauthentication flows: a step either
//! redisplays a form (optionally with errors), creates an entry, or aborts
//! with a reason.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::entry::ConnectionConfig;

/// Abort reason when a record for the same URL already exists.
pub const ABORT_ALREADY_CONFIGURED: &str = "already_configured";
/// Abort reason signalling a successful reauthentication.
pub const ABORT_REAUTH_SUCCESSFUL: &str = "reauth_successful";

/// Key under which a step-level error code is attached to a form.
pub const ERROR_BASE: &str = "base";

/// Identifier of a flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// First-time setup, entered by the user
    User,
    /// Re-authentication of an existing entry
    ReauthConfirm,
}

impl FlowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::ReauthConfirm => "reauth_confirm",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a config flow step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResult {
    /// Show (or redisplay) a form for the given step
    Form {
        step_id: FlowStep,
        /// Error codes from the previous submission, keyed by field
        /// (step-level errors use [`ERROR_BASE`])
        errors: HashMap<String, String>,
        /// Read-only values rendered into the form description
        #[serde(skip_serializing_if = "Option::is_none")]
        description_placeholders: Option<HashMap<String, String>>,
    },
    /// Terminal: persist a new entry
    CreateEntry {
        title: String,
        data: ConnectionConfig,
    },
    /// Terminal: stop the flow with a reason code
    Abort { reason: String },
}

impl FlowResult {
    /// An empty form for a step.
    pub fn form(step_id: FlowStep) -> Self {
        Self::Form {
            step_id,
            errors: HashMap::new(),
            description_placeholders: None,
        }
    }

    /// A redisplayed form carrying a step-level error code.
    pub fn form_with_error(step_id: FlowStep, code: impl Into<String>) -> Self {
        let mut errors = HashMap::new();
        errors.insert(ERROR_BASE.to_string(), code.into());
        Self::Form {
            step_id,
            errors,
            description_placeholders: None,
        }
    }

    /// Attach read-only placeholders to a form result.
    pub fn with_placeholders(self, placeholders: HashMap<String, String>) -> Self {
        match self {
            Self::Form {
                step_id, errors, ..
            } => Self::Form {
                step_id,
                errors,
                description_placeholders: Some(placeholders),
            },
            other => other,
        }
    }

    /// A terminal abort.
    pub fn abort(reason: impl Into<String>) -> Self {
        Self::Abort {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_with_error_sets_base() {
        let result = FlowResult::form_with_error(FlowStep::User, "cannot_connect");
        match result {
            FlowResult::Form {
                step_id, errors, ..
            } => {
                assert_eq!(step_id, FlowStep::User);
                assert_eq!(errors.get(ERROR_BASE).map(String::as_str), Some("cannot_connect"));
            }
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[test]
    fn test_serialized_step_ids() {
        let json = serde_json::to_value(FlowResult::form(FlowStep::ReauthConfirm)).unwrap();
        assert_eq!(json["type"], "form");
        assert_eq!(json["step_id"], "reauth_confirm");
    }
}
