//! One-shot batch runner for external schedulers (cron, systemd timers).
//!
//! Exits 0 when the batch ran, even if some SIPs failed; those stay due and
//! are retried on the next run. Exits non-zero when the batch itself could
//! not run.

use sipledger_core::constants::DECIMAL_PRECISION;
use sipledger_server::{build_state, config::Config, init_tracing, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    tracing::info!("Starting SIP batch");
    let report = scheduler::run_batch_with_timeout(&state, config.batch_timeout).await?;

    for detail in &report.details {
        match (&detail.execution, &detail.error) {
            (Some(record), _) => println!(
                "[executed] {} ({}): {} units at NAV {}",
                detail.scheme,
                detail.sip_id,
                record.units.round_dp(DECIMAL_PRECISION),
                record.nav
            ),
            (None, Some(error)) => {
                println!("[failed]   {} ({}): {}", detail.scheme, detail.sip_id, error)
            }
            (None, None) => println!("[failed]   {} ({})", detail.scheme, detail.sip_id),
        }
    }
    println!(
        "SIP batch for {}: {} executed, {} failed",
        report.as_of, report.executed, report.failed
    );

    if report.has_failures() {
        tracing::warn!("{} SIPs failed and remain due", report.failed);
    }
    Ok(())
}
