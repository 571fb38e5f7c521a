use crate::error::FetchError;
use crate::sample::Sample;

/// All messages (events) that can flow through the dashboard.
///
/// Sources:
/// - Refresh button / auto-refresh timer → `Refresh`
/// - Fetch task completion              → `Fetched`
/// - Control widgets                    → `*Changed`, `AutoRefreshToggled`
/// - Config watcher task                → `ConfigReloaded`
/// - Clock subscription                 → `Tick`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Data ──────────────────────────────────────────────────────────────────
    /// Request a new sample.  `force` bypasses the response cache.
    Refresh { force: bool },
    /// A fetch finished, successfully or not.
    Fetched(Result<Sample, FetchError>),

    // ── Controls ──────────────────────────────────────────────────────────────
    /// Refresh interval slider moved (seconds).
    RefreshIntervalChanged(u32),
    /// Auto-refresh toggle flipped.
    AutoRefreshToggled(bool),
    /// History window slider moved (minutes).
    WindowChanged(u32),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// One-second timer tick.
    Tick,
}
