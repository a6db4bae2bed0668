//! Property-Based Tests for Domain Logic
//!
//! This module uses proptest to verify invariants and properties of the
//! reward calculator and pool aggregation that should hold for all inputs.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::constants::SECONDS_PER_DAY;
    use crate::domain::pool::PoolSnapshot;
    use crate::domain::rewards::{accrued_rewards, halfway_reached, rate_multiplier};
    use crate::domain::stake::LockPeriod;

    // === Strategies for generating test data ===

    /// Strategy for generating lock periods
    fn arb_lock_period() -> impl Strategy<Value = LockPeriod> {
        prop_oneof![
            Just(LockPeriod::Days30),
            Just(LockPeriod::Days90),
            Just(LockPeriod::Days365),
        ]
    }

    /// Strategy for principal amounts (up to a billion tokens at 9 decimals
    /// would exceed u64; a trillion base units is plenty of headroom)
    fn arb_principal() -> impl Strategy<Value = u64> {
        1u64..1_000_000_000_000
    }

    /// Strategy for elapsed offsets within roughly two lock periods
    fn arb_elapsed() -> impl Strategy<Value = i64> {
        0i64..(2 * 365 * SECONDS_PER_DAY)
    }

    proptest! {
        /// Accrual is non-decreasing in `now`.
        #[test]
        fn accrual_is_monotonic_in_time(
            principal in arb_principal(),
            period in arb_lock_period(),
            nft in any::<bool>(),
            boost in any::<bool>(),
            t1 in arb_elapsed(),
            dt in 0i64..(365 * SECONDS_PER_DAY),
        ) {
            let rate = period.base_rate_bps();
            let lock = period.seconds();
            let early = accrued_rewards(principal, rate, 0, lock, nft, boost, t1);
            let late = accrued_rewards(principal, rate, 0, lock, nft, boost, t1 + dt);
            prop_assert!(late >= early);
        }

        /// Zero accrual at the start instant and for any time before it.
        #[test]
        fn accrual_is_zero_at_and_before_start(
            principal in arb_principal(),
            period in arb_lock_period(),
            nft in any::<bool>(),
            boost in any::<bool>(),
            skew in 0i64..1_000_000,
        ) {
            let rate = period.base_rate_bps();
            let lock = period.seconds();
            prop_assert_eq!(accrued_rewards(principal, rate, 1_000_000, lock, nft, boost, 1_000_000), 0);
            prop_assert_eq!(accrued_rewards(principal, rate, 1_000_000, lock, nft, boost, 1_000_000 - skew), 0);
        }

        /// Before halfway the NFT bonus is inactive; from halfway on the
        /// reward equals the floor of the doubled raw accrual, which lies
        /// within [2*base, 2*base + 1] of the un-boosted floor.
        #[test]
        fn halfway_bonus_gates_exactly(
            principal in arb_principal(),
            period in arb_lock_period(),
            elapsed in arb_elapsed(),
        ) {
            let rate = period.base_rate_bps();
            let lock = period.seconds();
            let plain = accrued_rewards(principal, rate, 0, lock, false, false, elapsed);
            let with_nft = accrued_rewards(principal, rate, 0, lock, true, false, elapsed);

            if halfway_reached(elapsed, lock) {
                prop_assert!(with_nft >= 2 * plain);
                prop_assert!(with_nft <= 2 * plain + 1);
            } else {
                prop_assert_eq!(with_nft, plain);
            }
        }

        /// Both bonuses together give the floor of 4x the raw accrual.
        #[test]
        fn bonuses_compound_to_four_x(
            principal in arb_principal(),
            period in arb_lock_period(),
            extra in 0i64..(365 * SECONDS_PER_DAY),
        ) {
            let rate = period.base_rate_bps();
            let lock = period.seconds();
            // Past the halfway mark so the NFT bonus is active.
            let elapsed = lock / 2 + extra;

            let plain = accrued_rewards(principal, rate, 0, lock, false, false, elapsed);
            let both = accrued_rewards(principal, rate, 0, lock, true, true, elapsed);

            prop_assert!(both >= 4 * plain);
            prop_assert!(both <= 4 * plain + 3);
        }

        /// The multiplier is always one of {1, 2, 4} and boost alone never
        /// exceeds 2.
        #[test]
        fn multiplier_is_one_two_or_four(
            nft in any::<bool>(),
            boost in any::<bool>(),
            elapsed in arb_elapsed(),
            period in arb_lock_period(),
        ) {
            let m = rate_multiplier(nft, elapsed, period.seconds(), boost);
            prop_assert!(m == 1 || m == 2 || m == 4);
            if !nft {
                prop_assert!(m <= 2);
            }
        }

        /// Utilization is always within [0, 100] and the boost flag agrees
        /// with the 100% threshold.
        #[test]
        fn utilization_is_clamped(
            total in any::<u64>(),
            stakers in any::<u64>(),
            target in 1u64..u64::MAX,
        ) {
            let snap = PoolSnapshot::compute(total, stakers, target);
            prop_assert!(snap.utilization_percent >= 0.0);
            prop_assert!(snap.utilization_percent <= 100.0);
            prop_assert_eq!(snap.boost_active, snap.utilization_percent >= 100.0);
        }

        /// Accrual scales (sub-additively, because of flooring) with
        /// principal: a bigger principal never earns less.
        #[test]
        fn accrual_is_monotonic_in_principal(
            principal in arb_principal(),
            extra in 0u64..1_000_000,
            period in arb_lock_period(),
            elapsed in arb_elapsed(),
        ) {
            let rate = period.base_rate_bps();
            let lock = period.seconds();
            let small = accrued_rewards(principal, rate, 0, lock, false, false, elapsed);
            let large = accrued_rewards(principal + extra, rate, 0, lock, false, false, elapsed);
            prop_assert!(large >= small);
        }
    }
}
