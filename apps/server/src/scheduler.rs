//! Background scheduler for the due-SIP batch.
//!
//! Runs the batch on a fixed interval for the server process. Each run is
//! bounded by the configured batch timeout.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sipledger_core::sips::BatchReport;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first run so startup logs settle.
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the background SIP scheduler.
pub fn start_sip_scheduler(state: Arc<AppState>, every: Duration, batch_timeout: Duration) {
    tokio::spawn(async move {
        info!("SIP scheduler started ({}s interval)", every.as_secs());
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every);
        // A slow batch should not be followed by a burst of catch-up runs.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_scheduled_batch(&state, batch_timeout).await;
        }
    });
}

/// Runs one batch, returning the report when it completed in time.
///
/// On timeout the batch stops after the SIP it is executing; later SIPs stay
/// due for the next run.
pub async fn run_batch_with_timeout(
    state: &AppState,
    batch_timeout: Duration,
) -> anyhow::Result<BatchReport> {
    match tokio::time::timeout(batch_timeout, state.sip_service.run_pending(Utc::now())).await {
        Ok(result) => Ok(result?),
        Err(_) => anyhow::bail!(
            "SIP batch did not finish within {}s",
            batch_timeout.as_secs()
        ),
    }
}

async fn run_scheduled_batch(state: &AppState, batch_timeout: Duration) {
    match run_batch_with_timeout(state, batch_timeout).await {
        Ok(report) if report.total() == 0 => {
            info!("Scheduled SIP batch for {}: nothing due", report.as_of);
        }
        Ok(report) if report.has_failures() => {
            warn!(
                "Scheduled SIP batch for {}: {} executed, {} failed",
                report.as_of, report.executed, report.failed
            );
        }
        Ok(report) => {
            info!(
                "Scheduled SIP batch for {}: {} executed",
                report.as_of, report.executed
            );
        }
        Err(e) => error!("Scheduled SIP batch failed: {:#}", e),
    }
}
