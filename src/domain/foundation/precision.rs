//! Reporting precision for computed scores.

/// Decimal places used for every reported score and statistic.
pub const REPORT_DECIMALS: i32 = 4;

/// Rounds a value half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rounds a value to reporting precision.
pub fn round_report(value: f64) -> f64 {
    round_to(value, REPORT_DECIMALS)
}
