// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// Rounds to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a percentage with two decimals, zero when `whole` is zero.
pub fn percentage<T: ToPrimitive, U: ToPrimitive>(part: T, whole: U) -> f64 {
    let part: f64 = part.to_f64().unwrap_or(0.0);
    let whole: f64 = whole.to_f64().unwrap_or(0.0);
    if whole.abs() < f64::EPSILON {
        return 0.0;
    }
    round2(part / whole * 100.0)
}

/// Percentage capped at 100.
pub fn capped_percentage<T: ToPrimitive, U: ToPrimitive>(part: T, whole: U) -> f64 {
    percentage(part, whole).min(100.0)
}

/// `total / count` with two decimals, zero when `count` is zero.
pub fn average_decimal(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

/// `total / count` as a float with two decimals.
pub fn average<T: ToPrimitive>(total: T, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(total.to_f64().unwrap_or(0.0) / count.to_f64().unwrap_or(1.0))
}
