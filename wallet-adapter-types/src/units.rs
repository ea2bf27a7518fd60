//! SOL <-> lamport conversion.

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid transfer amount: {0}")]
pub struct InvalidAmount(pub f64);

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Renders a lamport balance the way wallets display SOL: the shortest
/// decimal that round-trips, without a trailing `.0`.
pub fn format_sol(lamports: u64) -> String {
    lamports_to_sol(lamports).to_string()
}

/// Largest distance from a whole lamport still treated as float noise, e.g.
/// `1.1 * 1e9 == 1100000000.0000002`.
const LAMPORT_TOLERANCE: f64 = 1e-6;

/// Converts a SOL amount to a whole number of lamports. Amounts carrying a
/// fraction of a lamport are rejected rather than rounded.
pub fn sol_to_lamports(sol: f64) -> Result<u64, InvalidAmount> {
    if !sol.is_finite() || sol < 0.0 {
        return Err(InvalidAmount(sol));
    }

    let exact = sol * LAMPORTS_PER_SOL as f64;
    let lamports = exact.round();
    // representation error of the input grows with its magnitude
    let tolerance = LAMPORT_TOLERANCE.max(exact * f64::EPSILON * 2.0);
    if (exact - lamports).abs() > tolerance {
        return Err(InvalidAmount(sol));
    }

    // u64::MAX is not representable as f64; anything at or above 2^64 overflows
    if lamports >= u64::MAX as f64 {
        return Err(InvalidAmount(sol));
    }

    Ok(lamports as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fractional_balance() {
        assert_eq!(format_sol(2_500_000_000), "2.5");
    }

    #[test]
    fn formats_whole_and_empty_balances_without_decimals() {
        assert_eq!(format_sol(1_000_000_000), "1");
        assert_eq!(format_sol(0), "0");
    }

    #[test]
    fn formats_single_lamport() {
        assert_eq!(format_sol(1), "0.000000001");
    }

    #[test]
    fn converts_sol_amount_to_lamports() {
        assert_eq!(sol_to_lamports(1.25), Ok(1_250_000_000));
        assert_eq!(sol_to_lamports(0.0), Ok(0));
        assert_eq!(sol_to_lamports(0.1), Ok(100_000_000));
        assert_eq!(sol_to_lamports(1.1), Ok(1_100_000_000));
        assert_eq!(sol_to_lamports(0.000000001), Ok(1));
        assert_eq!(sol_to_lamports(123_456.789), Ok(123_456_789_000_000));
    }

    #[test]
    fn rejects_fractions_of_a_lamport() {
        assert_eq!(sol_to_lamports(4e-10), Err(InvalidAmount(4e-10)));
        assert_eq!(sol_to_lamports(1e-10), Err(InvalidAmount(1e-10)));
        assert_eq!(
            sol_to_lamports(1.0000000006),
            Err(InvalidAmount(1.0000000006))
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_amounts() {
        assert!(sol_to_lamports(-1.0).is_err());
        assert!(sol_to_lamports(f64::NAN).is_err());
        assert!(sol_to_lamports(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_amounts_overflowing_u64() {
        assert_eq!(sol_to_lamports(1e12), Err(InvalidAmount(1e12)));
    }
}
