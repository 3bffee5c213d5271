//! # Expiry Edge: evaluation runner
//!
//! ## Flow
//! ```text
//! every cycle (once, or every WATCH_INTERVAL_SECS):
//!   for each feed file, on its own blocking task:
//!     1. Load + validate the JSON feed
//!     2. Assemble the MarketSnapshot at as_of (or now)
//!     3. EdgeGateStrategy::evaluate
//!     4. Render text block + replay key
//!   then deliver each new decision (log or webhook)
//! ```
//!
//! ## Environment Variables
//!
//! | Variable              | Default              | Description                          |
//! |-----------------------|----------------------|--------------------------------------|
//! | `EDGE_INPUTS`         | required             | Comma-separated feed files           |
//! | `WATCH_INTERVAL_SECS` | unset (single cycle) | Re-evaluate on this interval         |
//! | `NOTIFY_WEBHOOK_URL`  | unset (log only)     | POST `{text, key}` here              |
//! | `MARKET_HOLIDAYS`     | none                 | Extra closed dates, `YYYY-MM-DD,...` |
//! | `RUST_LOG`            | `expiry_edge=debug`  | Tracing filter                       |
//!
//! Strategy tunables are listed in [`expiry_edge::config`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use expiry_edge::{
    config::{EngineConfig, RunnerConfig},
    engine::{decision_key, render_decision, EdgeGateStrategy},
    feed::{FeedFile, SnapshotAssembler, TradingCalendar, WeekdayCalendar},
    models::Action,
    notify::{DeliveryLog, Notifier},
};

/// What one input produced in one cycle.
struct Evaluated {
    input:  PathBuf,
    action: Action,
    text:   String,
    key:    Uuid,
}

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("expiry_edge=debug".parse()?)
            .add_directive("reqwest=warn".parse()?))
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        EXPIRY EDGE · Decision Engine          ║
  ║        AVRZ rejection · expiry-day options    ║
  ╚═══════════════════════════════════════════════╝"#);

    let config = EngineConfig::from_env();
    config.validate().context("Invalid engine configuration")?;
    let runner = RunnerConfig::from_env().context("Failed to load runner config")?;

    let config = Arc::new(config);
    let notifier = Notifier::from_url(runner.webhook_url.clone());
    let mut delivered = DeliveryLog::default();

    info!(
        inputs   = runner.inputs.len(),
        interval = ?runner.watch_interval,
        webhook  = runner.webhook_url.is_some(),
        timezone = %config.timezone,
        "Runner started"
    );

    loop {
        info!("🔎 Evaluation cycle starting...");

        for evaluated in run_cycle(&config, &runner).await {
            let sent = delivered
                .deliver_if_changed(&notifier, &evaluated.input, &evaluated.text, evaluated.key)
                .await;
            match sent {
                Ok(true) => {}
                Ok(false) => {
                    info!(input = %evaluated.input.display(), action = %evaluated.action, "Decision unchanged, skipping delivery");
                }
                Err(e) => {
                    error!(input = %evaluated.input.display(), error = %format!("{e:#}"), "❌ Delivery failed, retrying next cycle");
                }
            }
        }

        let Some(interval) = runner.watch_interval else {
            break;
        };
        info!(interval = ?interval, "💤 Sleeping until next cycle...");
        tokio::time::sleep(interval).await;
    }

    Ok(())
}

// ─── Cycle ────────────────────────────────────────────────────────────────────

/// Evaluates every input concurrently.  A failing input is logged and left
/// out; it never stops the others.
async fn run_cycle(config: &Arc<EngineConfig>, runner: &RunnerConfig) -> Vec<Evaluated> {
    let mut tasks = JoinSet::new();

    for input in &runner.inputs {
        let input = input.clone();
        let config = Arc::clone(config);
        let holidays = runner.holidays.clone();
        tasks.spawn_blocking(move || {
            let result = evaluate_file(&input, config, holidays);
            (input, result)
        });
    }

    let mut out = Vec::with_capacity(runner.inputs.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((input, Ok(evaluated))) => {
                info!(input = %input.display(), action = %evaluated.action, key = %evaluated.key, "✅ Evaluated");
                out.push(evaluated);
            }
            Ok((input, Err(e))) => {
                warn!(input = %input.display(), error = %format!("{e:#}"), "❌ Evaluation failed");
            }
            Err(e) => error!(error = %e, "Evaluation task panicked"),
        }
    }
    out.sort_by(|a, b| a.input.cmp(&b.input));
    out
}

fn evaluate_file(
    input:    &Path,
    config:   Arc<EngineConfig>,
    holidays: Vec<chrono::NaiveDate>,
) -> anyhow::Result<Evaluated> {
    let feed = FeedFile::load(input)
        .with_context(|| format!("Failed to load feed {}", input.display()))?;

    let calendar: Arc<dyn TradingCalendar> = Arc::new(
        WeekdayCalendar::new(holidays).with_holidays(feed.holidays.iter().copied()),
    );

    let request = feed.request(config.fine_timeframe, config.coarse_timeframe, Utc::now());
    let snapshot = SnapshotAssembler::new(&config, Arc::clone(&calendar), &feed, &feed, &feed)
        .assemble(&request)
        .context("Snapshot failed boundary validation")?;

    let decision = EdgeGateStrategy::new(config, calendar).evaluate(&snapshot);
    let text = render_decision(&decision);

    Ok(Evaluated {
        input:  input.to_path_buf(),
        action: decision.action(),
        key:    decision_key(&decision),
        text,
    })
}
