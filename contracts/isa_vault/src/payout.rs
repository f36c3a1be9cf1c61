/// Income share owed for the current period, capped at the remaining
/// repayment headroom.
///
/// Formula: due = min(floor(salary × percent / 100), headroom)
///
/// Example:
/// - salary: 1,000,000, percent: 10, headroom: 50,000,000
/// - due: 100,000
///
/// A capped result of 0 means there is nothing to pay (zero salary, zero
/// percent, or the lifetime cap is already reached).
pub fn income_share_due(salary: i128, percent: u32, headroom: i128) -> Option<i128> {
    let due = salary
        .checked_mul(percent as i128)?
        .checked_div(100)?;

    if due > headroom {
        Some(headroom)
    } else {
        Some(due)
    }
}

/// Pro-rata payout for one stake.
///
/// Formula: share = floor(amount × stake / total_invested)
///
/// Example:
/// - amount: 100,000, stake: 10,000,000, total_invested: 15,000,000
/// - share: 66,666 (the 2/3 residual unit stays in the vault)
///
/// Floor division guarantees the shares of a complete stake set never sum
/// to more than `amount`.
pub fn pro_rata_share(amount: i128, stake: i128, total_invested: i128) -> Option<i128> {
    amount.checked_mul(stake)?.checked_div(total_invested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_share_due() {
        let due = income_share_due(1_000_000, 10, 50_000_000).unwrap();
        assert_eq!(due, 100_000);
    }

    #[test]
    fn test_income_share_floors() {
        // 333 × 7 / 100 = 23.31 → 23
        let due = income_share_due(333, 7, 1_000_000).unwrap();
        assert_eq!(due, 23);
    }

    #[test]
    fn test_income_share_capped_at_headroom() {
        let due = income_share_due(1_000_000, 10, 40_000).unwrap();
        assert_eq!(due, 40_000);
    }

    #[test]
    fn test_income_share_zero_headroom() {
        let due = income_share_due(1_000_000, 10, 0).unwrap();
        assert_eq!(due, 0);
    }

    #[test]
    fn test_income_share_zero_percent() {
        let due = income_share_due(1_000_000, 0, 50_000_000).unwrap();
        assert_eq!(due, 0);
    }

    #[test]
    fn test_pro_rata_share() {
        let a = pro_rata_share(100_000, 10_000_000, 15_000_000).unwrap();
        let b = pro_rata_share(100_000, 5_000_000, 15_000_000).unwrap();

        assert_eq!(a, 66_666);
        assert_eq!(b, 33_333);
        // Truncation leaves one unit undistributed
        assert_eq!(a + b, 99_999);
    }

    #[test]
    fn test_pro_rata_never_oversums() {
        let stakes = [7i128, 11, 13, 3, 1];
        let total: i128 = stakes.iter().sum();
        let amount = 1_000i128;

        let paid: i128 = stakes
            .iter()
            .map(|s| pro_rata_share(amount, *s, total).unwrap())
            .sum();

        assert!(paid <= amount);
        // Each stake loses at most one unit to rounding
        assert!(amount - paid < stakes.len() as i128);
    }

    #[test]
    fn test_pro_rata_ratio_preserved() {
        // Stakes in ratio 2:1 pay out in ratio 2:1 up to 1 unit
        let a = pro_rata_share(99_999, 2_000, 3_000).unwrap();
        let b = pro_rata_share(99_999, 1_000, 3_000).unwrap();
        assert!((a - 2 * b).abs() <= 2);
    }

    #[test]
    fn test_pro_rata_overflow_detected() {
        assert_eq!(pro_rata_share(i128::MAX, i128::MAX, 1), None);
    }
}
