pub mod executor;
/// Monitoring module - reachability probing and failure accounting
///
/// This module is responsible for:
/// - Issuing ICMP reachability checks with a bounded timeout
/// - Classifying each check into success/failure/error
/// - Tracking per-host consecutive-failure streaks
pub mod prober;
pub mod tracker;
pub mod types;

pub use executor::ProbeExecutor;
pub use prober::{IcmpProber, Prober};
pub use tracker::FailureTracker;
pub use types::{ProbeOutcome, ProbeResult};
