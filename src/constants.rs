//! Application-wide constants
//!
//! Reward math constants and default configuration values. Per-stake rates
//! are snapshotted at creation time, so changing the tier table here never
//! affects stakes that already exist.

/// Seconds in one day, used for lock-period and elapsed-time math.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in the reward year. Annual rates are prorated against this.
pub const DAYS_PER_YEAR: u64 = 365;

/// Basis-point denominator (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Annual rate for the 30-day lock tier (5%).
pub const RATE_30_DAYS_BPS: u32 = 500;

/// Annual rate for the 90-day lock tier (10%).
pub const RATE_90_DAYS_BPS: u32 = 1_000;

/// Annual rate for the 365-day lock tier (20%).
pub const RATE_365_DAYS_BPS: u32 = 2_000;

/// Default aggregate-principal target at which the grid boost activates,
/// in base token units.
pub const DEFAULT_GRID_CHARGE_TARGET: u64 = 200_000_000;

/// Default TTL for cached NFT-holdership lookups.
pub const DEFAULT_NFT_CACHE_TTL_SECS: u64 = 300;

/// Default timeout for proof-verification calls.
pub const DEFAULT_VERIFICATION_TIMEOUT_SECS: u64 = 15;

/// Default number of rows returned by the leaderboard query.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;
