//! Dismissible informational banner shown above the dashboard.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::preferences::PreferenceStore;

/// Preference key recording that the banner was dismissed.
pub const ALERT_DISMISSED_KEY: &str = "fraud-alert-dismissed";

/// How long renderers wait before sliding the banner in.
pub const ALERT_SHOW_DELAY: Duration = Duration::from_secs(2);

pub const ALERT_TITLE: &str = "IMPORTANT NOTICE - FRAUD ALERT:";

pub const ALERT_MESSAGE: &str = "NB does not solicit/conduct business via third party messaging \
apps such as WhatsApp, Line, Facebook etc.";

/// Banner visibility backed by a persisted dismissal flag.
///
/// The flag is read once in [`AlertBanner::load`] and written once by
/// [`AlertBanner::dismiss`]. It never expires.
pub struct AlertBanner {
    store: Arc<dyn PreferenceStore>,
    dismissed: bool,
}

impl AlertBanner {
    pub async fn load(store: Arc<dyn PreferenceStore>) -> Result<Self> {
        let dismissed = store
            .get(ALERT_DISMISSED_KEY)
            .await?
            .is_some_and(|value| !value.is_empty());
        Ok(Self { store, dismissed })
    }

    pub fn should_render(&self) -> bool {
        !self.dismissed
    }

    /// Hide the banner and remember the choice.
    pub async fn dismiss(&mut self) -> Result<()> {
        if self.dismissed {
            return Ok(());
        }
        self.store.set(ALERT_DISMISSED_KEY, "true").await?;
        self.dismissed = true;
        tracing::debug!("alert banner dismissed");
        Ok(())
    }
}
