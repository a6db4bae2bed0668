//! Pool snapshot types

use serde::{Deserialize, Serialize};

/// Derived view of the whole pool at one instant. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Sum of principal across all Active stakes, in base token units.
    pub total_active_principal: u64,
    /// Distinct owners with at least one Active stake.
    pub active_staker_count: u64,
    /// Charge level toward the boost target, clamped to [0, 100].
    pub utilization_percent: f64,
    /// True once utilization reaches 100%. Hard threshold, no hysteresis.
    pub boost_active: bool,
    /// The configured charge target, echoed for display.
    pub target: u64,
}

impl PoolSnapshot {
    /// Pure aggregation from the active-set totals.
    pub fn compute(total_active_principal: u64, active_staker_count: u64, target: u64) -> Self {
        let utilization_percent = if target == 0 {
            100.0
        } else {
            (total_active_principal as f64 / target as f64 * 100.0).min(100.0)
        };
        Self {
            total_active_principal,
            active_staker_count,
            utilization_percent,
            boost_active: utilization_percent >= 100.0,
            target,
        }
    }
}
