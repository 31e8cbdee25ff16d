//! Retention sweeper: hourly removal of stale uploads and reports.
//!
//! One task per process, started from `main`. Each cycle deletes regular
//! files whose creation time is older than the retention window. The task
//! never exits: per-file and per-directory failures are logged and the
//! loop carries on. There is no shutdown hook; it ends with the runtime.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;

/// Interval between sweeps.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

static STARTED: AtomicBool = AtomicBool::new(false);

/// Outcome of sweeping one or more directories.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub removed: usize,
    pub failed: usize,
}

impl std::ops::AddAssign for SweepStats {
    fn add_assign(&mut self, other: Self) {
        self.removed += other.removed;
        self.failed += other.failed;
    }
}

/// Remove every regular file in `dir` created before `cutoff`.
/// A missing or unreadable directory counts as nothing to do.
pub fn sweep_dir(dir: &Path, cutoff: SystemTime) -> SweepStats {
    let mut stats = SweepStats::default();

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Retention sweep skipped directory");
            return stats;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            _ => continue,
        };

        // Creation time is not recorded on every file system.
        let created = match metadata.created().or_else(|_| metadata.modified()) {
            Ok(t) => t,
            Err(_) => continue,
        };

        if created < cutoff {
            match std::fs::remove_file(&path) {
                Ok(()) => stats.removed += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove expired file");
                    stats.failed += 1;
                }
            }
        }
    }

    stats
}

/// One sweep over `dirs` with `cutoff = now - retention`.
pub fn sweep_once(dirs: &[PathBuf], retention: Duration) -> SweepStats {
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut total = SweepStats::default();
    for dir in dirs {
        total += sweep_dir(dir, cutoff);
    }

    if total.removed > 0 || total.failed > 0 {
        tracing::info!(
            removed = total.removed,
            failed = total.failed,
            "Retention sweep finished"
        );
    }
    total
}

pub struct RetentionSweeper;

impl RetentionSweeper {
    /// Spawn the sweeper on the current tokio runtime. Only the first call
    /// in a process starts a task; later calls return `None`.
    pub fn spawn_once(dirs: Vec<PathBuf>, retention: Duration) -> Option<JoinHandle<()>> {
        if STARTED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Retention sweeper already running");
            return None;
        }

        tracing::info!(
            retention_hours = retention.as_secs() / 3600,
            interval_secs = SWEEP_INTERVAL.as_secs(),
            "Retention sweeper started"
        );

        Some(tokio::spawn(run_forever(dirs, retention, SWEEP_INTERVAL)))
    }
}

async fn run_forever(dirs: Vec<PathBuf>, retention: Duration, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately, so a sweep runs at startup.
        ticker.tick().await;

        let dirs = dirs.clone();
        let result = tokio::task::spawn_blocking(move || sweep_once(&dirs, retention)).await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "Retention sweep task failed");
        }
    }
}
