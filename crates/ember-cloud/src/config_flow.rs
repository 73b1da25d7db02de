//! Config flow for the vendor cloud integration
//!
//! A short-lived state machine with two entry points: `user` for first-time
//! setup and `reauth_confirm` for refreshing the token of an existing entry.
//! Each submission validates the connection by listing endpoints; failures
//! are mapped to error codes and redisplayed, never propagated, so a flow
//! survives any number of failed attempts.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use ember_config_entries::{
    ConfigEntries, ConfigEntriesResult, ConfigEntry, ConnectionConfig, FlowResult, FlowStep,
    ABORT_ALREADY_CONFIGURED, ABORT_REAUTH_SUCCESSFUL,
};

use crate::client::CloudApi;
use crate::error::CloudError;
use crate::DOMAIN;

/// Factory turning connection settings into a cloud client.
///
/// The flow goes through this seam so tests can substitute a scripted
/// client; production wiring uses [`crate::http_connector`].
pub type Connector =
    Arc<dyn Fn(&ConnectionConfig) -> Result<Arc<dyn CloudApi>, CloudError> + Send + Sync>;

/// Setup / reauthentication flow.
pub struct SetupFlow {
    entries: Arc<ConfigEntries>,
    connector: Connector,
    /// Entry being reauthenticated, when started from `reauth_confirm`
    reauth_entry_id: Option<String>,
}

impl SetupFlow {
    /// Start a first-time setup flow.
    pub fn new(entries: Arc<ConfigEntries>, connector: Connector) -> Self {
        Self {
            entries,
            connector,
            reauth_entry_id: None,
        }
    }

    /// Start a reauthentication flow for an existing entry.
    pub fn for_reauth(
        entries: Arc<ConfigEntries>,
        connector: Connector,
        entry_id: impl Into<String>,
    ) -> Self {
        Self {
            entries,
            connector,
            reauth_entry_id: Some(entry_id.into()),
        }
    }

    /// Validate that the settings allow us to connect.
    async fn validate_input(&self, config: &ConnectionConfig) -> Result<(), CloudError> {
        let api = (self.connector)(config)?;
        api.list_endpoints().await?;
        debug!("Connected to vendor cloud: {}", config.url);
        Ok(())
    }

    /// Handle the initial step.
    pub async fn step_user(
        &self,
        user_input: Option<ConnectionConfig>,
    ) -> ConfigEntriesResult<FlowResult> {
        let Some(input) = user_input else {
            return Ok(FlowResult::form(FlowStep::User));
        };

        if let Err(err) = self.validate_input(&input).await {
            warn!("Vendor cloud validation failed: {err}");
            return Ok(FlowResult::form_with_error(FlowStep::User, err.error_code()));
        }

        if self.entries.get_by_url(&input.url).is_some() {
            return Ok(FlowResult::abort(ABORT_ALREADY_CONFIGURED));
        }

        let title = input.url.clone();
        self.entries
            .add(ConfigEntry::new(DOMAIN, &title, input.clone()))
            .await?;

        Ok(FlowResult::CreateEntry { title, data: input })
    }

    /// Handle reauth: ask for a new API token and validate it against the
    /// existing entry's URL.
    pub async fn step_reauth_confirm(
        &self,
        user_input: Option<String>,
    ) -> ConfigEntriesResult<FlowResult> {
        let entry = self.reauth_entry()?;

        let Some(api_token) = user_input else {
            // Redisplay with the (non-editable) URL of the entry being
            // reauthenticated.
            let mut placeholders = HashMap::new();
            placeholders.insert("url".to_string(), entry.url().to_string());
            return Ok(FlowResult::form(FlowStep::ReauthConfirm).with_placeholders(placeholders));
        };

        let candidate = ConnectionConfig {
            api_token: api_token.clone(),
            ..entry.data.clone()
        };

        if let Err(err) = self.validate_input(&candidate).await {
            warn!("Vendor cloud reauth validation failed: {err}");
            return Ok(FlowResult::form_with_error(
                FlowStep::ReauthConfirm,
                err.error_code(),
            ));
        }

        self.entries.update_token(&entry.entry_id, api_token).await?;
        Ok(FlowResult::abort(ABORT_REAUTH_SUCCESSFUL))
    }

    fn reauth_entry(&self) -> ConfigEntriesResult<ConfigEntry> {
        let entry_id = self.reauth_entry_id.as_deref().ok_or_else(|| {
            ember_config_entries::ConfigEntriesError::NotFound(
                "flow has no reauthentication target".to_string(),
            )
        })?;
        self.entries.get(entry_id).ok_or_else(|| {
            ember_config_entries::ConfigEntriesError::NotFound(entry_id.to_string())
        })
    }
}
