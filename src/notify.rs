//! # notify: deliver rendered decisions
//!
//! The core hands over a finished text block; this module only moves it.
//! `Log` writes it through `tracing`, `Webhook` POSTs `{ "text", "key" }`.
//! Delivery is fire-once: a failure is reported to the caller and logged,
//! never retried here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct Payload<'a> {
    text: &'a str,
    key:  Uuid,
}

#[derive(Debug, Clone)]
pub enum Notifier {
    Log,
    Webhook { client: reqwest::Client, url: String },
}

impl Notifier {
    pub fn from_url(url: Option<String>) -> Self {
        match url {
            Some(url) => Notifier::Webhook { client: reqwest::Client::new(), url },
            None => Notifier::Log,
        }
    }

    pub async fn deliver(&self, text: &str, key: Uuid) -> anyhow::Result<()> {
        match self {
            Notifier::Log => {
                info!(key = %key, "📣 Decision\n{text}");
                Ok(())
            }
            Notifier::Webhook { client, url } => {
                debug!(key = %key, url = %url, "Posting decision to webhook...");

                let resp = client
                    .post(url)
                    .json(&Payload { text, key })
                    .timeout(WEBHOOK_TIMEOUT)
                    .send()
                    .await
                    .context("notification webhook unreachable")?;

                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    anyhow::bail!("webhook rejected decision: HTTP {status}: {body}");
                }

                info!(key = %key, "Decision delivered ✅");
                Ok(())
            }
        }
    }
}

/// Last successfully delivered key per input, so a watch loop only notifies
/// when an input's decision changes.  Holds one entry per input.
#[derive(Debug, Default)]
pub struct DeliveryLog {
    last: HashMap<PathBuf, Uuid>,
}

impl DeliveryLog {
    /// `false` when `key` is what was last delivered for `input`.
    pub fn is_new(&self, input: &Path, key: Uuid) -> bool {
        self.last.get(input) != Some(&key)
    }

    pub fn record(&mut self, input: &Path, key: Uuid) {
        self.last.insert(input.to_path_buf(), key);
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    /// Delivers `text` unless it is unchanged for `input`.  Returns whether a
    /// delivery happened; a failed delivery is not recorded, so the next cycle
    /// tries again.
    pub async fn deliver_if_changed(
        &mut self,
        notifier: &Notifier,
        input:    &Path,
        text:     &str,
        key:      Uuid,
    ) -> anyhow::Result<bool> {
        if !self.is_new(input, key) {
            debug!(input = %input.display(), key = %key, "Decision unchanged, skipping delivery");
            return Ok(false);
        }
        notifier.deliver(text, key).await?;
        self.record(input, key);
        Ok(true)
    }
}
