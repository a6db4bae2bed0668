//! Reward calculator
//!
//! Pure accrual math over stake parameters and the caller-supplied current
//! time. No clocks, no I/O, no side effects; every function here is safe to
//! call at arbitrary wall-clock times and is the primary target of the
//! property tests in [`crate::domain::property_tests`].
//!
//! Accrual model: `floor(principal × rate × elapsed / year)` where the
//! effective rate is the tier rate doubled once for the NFT halfway bonus
//! and doubled again while the grid boost is active. The two bonuses
//! compound multiplicatively (both together give 4x). Elapsed time is
//! measured in seconds for sub-day precision and never truncated to whole
//! days.

use crate::constants::{BPS_DENOMINATOR, DAYS_PER_YEAR, SECONDS_PER_DAY};
use crate::domain::stake::Stake;

/// Whether an NFT-eligible stake has crossed the halfway mark of its lock
/// period. The bonus activates exactly once crossed and then applies the
/// boosted rate to the whole elapsed span; it is never prorated.
pub fn halfway_reached(elapsed_secs: i64, lock_secs: i64) -> bool {
    elapsed_secs.saturating_mul(2) >= lock_secs
}

/// Effective rate multiplier: 1, 2, or 4.
pub fn rate_multiplier(
    nft_eligible: bool,
    elapsed_secs: i64,
    lock_secs: i64,
    boost_active: bool,
) -> u64 {
    let mut multiplier = 1u64;
    if nft_eligible && halfway_reached(elapsed_secs, lock_secs) {
        multiplier *= 2;
    }
    if boost_active {
        multiplier *= 2;
    }
    multiplier
}

/// Total rewards accrued by a stake from `start_time` through `now`, in
/// base token units.
///
/// `now` earlier than `start_time` (clock skew) clamps to zero. `now`
/// beyond the lock's end keeps accruing: locked value earns until the
/// stake is explicitly unstaked. The final integer division floors the
/// result, truncating fractional reward units so rounding can never
/// over-distribute.
pub fn accrued_rewards(
    principal: u64,
    base_rate_bps: u32,
    start_time: i64,
    lock_secs: i64,
    nft_eligible: bool,
    boost_active: bool,
    now: i64,
) -> u64 {
    let elapsed_secs = (now - start_time).max(0);
    let multiplier = rate_multiplier(nft_eligible, elapsed_secs, lock_secs, boost_active);

    // principal(2^64) × rate(2^11) × mult(4) × secs fits comfortably in u128.
    let numerator = principal as u128
        * base_rate_bps as u128
        * multiplier as u128
        * elapsed_secs as u128;
    let denominator = BPS_DENOMINATOR as u128 * DAYS_PER_YEAR as u128 * SECONDS_PER_DAY as u128;

    u64::try_from(numerator / denominator).unwrap_or(u64::MAX)
}

/// Total accrual for a stake record given the current grid-boost flag.
pub fn accrued_for_stake(stake: &Stake, boost_active: bool, now: i64) -> u64 {
    accrued_rewards(
        stake.principal,
        stake.base_rate_bps,
        stake.start_time,
        stake.lock_period.seconds(),
        stake.nft_eligible,
        boost_active,
        now,
    )
}

/// The rate a stake is currently earning at, in basis points.
pub fn current_rate_bps(stake: &Stake, boost_active: bool, now: i64) -> u32 {
    let multiplier = rate_multiplier(
        stake.nft_eligible,
        stake.elapsed_secs(now),
        stake.lock_period.seconds(),
        boost_active,
    );
    stake.base_rate_bps * multiplier as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;

    const LOCK_30D: i64 = 30 * SECONDS_PER_DAY;

    #[test]
    fn thirty_days_at_five_percent() {
        // floor(1000 * 0.05 * 30 / 365) = 4
        let reward = accrued_rewards(1_000, 500, 0, LOCK_30D, false, false, 30 * SECONDS_PER_DAY);
        assert_eq!(reward, 4);
    }

    #[test]
    fn nft_bonus_doubles_past_halfway() {
        // 30 days elapsed >= 15-day halfway mark: effective rate 10%,
        // floor(1000 * 0.10 * 30 / 365) = 8
        let reward = accrued_rewards(1_000, 500, 0, LOCK_30D, true, false, 30 * SECONDS_PER_DAY);
        assert_eq!(reward, 8);
    }

    #[test]
    fn nft_bonus_inactive_before_halfway() {
        let before = 15 * SECONDS_PER_DAY - 1;
        let at = 15 * SECONDS_PER_DAY;

        assert_eq!(rate_multiplier(true, before, LOCK_30D, false), 1);
        assert_eq!(rate_multiplier(true, at, LOCK_30D, false), 2);

        // Not prorated: the doubled rate applies to the whole elapsed span,
        // floored once at the end. floor(2x) can exceed 2*floor(x) by one.
        let plain = accrued_rewards(1_000_000, 500, 0, LOCK_30D, false, false, at);
        let boosted = accrued_rewards(1_000_000, 500, 0, LOCK_30D, true, false, at);
        assert_eq!(boosted, 1_000_000u64 * 500 * 2 * 15 / (10_000 * 365));
        assert!(boosted >= plain * 2);
        assert!(boosted <= plain * 2 + 1);
    }

    #[test]
    fn bonuses_compound_multiplicatively() {
        assert_eq!(rate_multiplier(true, LOCK_30D, LOCK_30D, true), 4);
        assert_eq!(rate_multiplier(false, LOCK_30D, LOCK_30D, true), 2);
        assert_eq!(rate_multiplier(true, 0, LOCK_30D, true), 2);

        let now = 20 * SECONDS_PER_DAY;
        let both = accrued_rewards(1_000_000, 500, 0, LOCK_30D, true, true, now);
        assert_eq!(both, 1_000_000u64 * 500 * 4 * 20 / (10_000 * 365));
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        assert_eq!(accrued_rewards(1_000, 500, 1_000, LOCK_30D, false, false, 500), 0);
        assert_eq!(accrued_rewards(1_000, 500, 1_000, LOCK_30D, true, true, 999), 0);
    }

    #[test]
    fn zero_at_start_time() {
        assert_eq!(accrued_rewards(1_000, 500, 1_000, LOCK_30D, false, false, 1_000), 0);
    }

    #[test]
    fn accrual_continues_past_lock_expiry() {
        let at_end = accrued_rewards(1_000, 500, 0, LOCK_30D, false, false, 30 * SECONDS_PER_DAY);
        let past_end = accrued_rewards(1_000, 500, 0, LOCK_30D, false, false, 60 * SECONDS_PER_DAY);
        assert!(past_end > at_end);
    }

    #[test]
    fn sub_day_precision() {
        // 12 hours at 20% on a large principal accrues a nonzero amount.
        let reward = accrued_rewards(
            10_000_000,
            2_000,
            0,
            365 * SECONDS_PER_DAY,
            false,
            false,
            SECONDS_PER_DAY / 2,
        );
        assert_eq!(reward, 10_000_000 * 2_000 / (10_000 * 365 * 2));
    }

    #[test]
    fn saturates_instead_of_wrapping_at_extremes() {
        // Max principal, max tier, both bonuses, a decade elapsed: the raw
        // accrual exceeds u64 and must saturate rather than wrap.
        let reward = accrued_rewards(
            u64::MAX,
            2_000,
            0,
            365 * SECONDS_PER_DAY,
            true,
            true,
            10 * 365 * SECONDS_PER_DAY,
        );
        assert_eq!(reward, u64::MAX);
    }
}
