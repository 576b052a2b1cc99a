//! Risk/reward preview.
//!
//! `win = s * (1 - k/n)^2`, `lose = s * (k/n)^2` for `k` selected cells out of
//! `n`. Display only: the ledger computes the authoritative amount.

use super::amount::Amount;

/// Previewed win and loss for a stake, in major units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Payout {
    pub win: f64,
    pub lose: f64,
}

impl Payout {
    /// Nothing selected means nothing at risk and nothing to win.
    pub fn calculate(selected: usize, total_cells: usize, stake: f64) -> Self {
        if selected == 0 || total_cells == 0 {
            return Self::default();
        }
        let ratio = selected as f64 / total_cells as f64;
        Self {
            win: stake * (1.0 - ratio).powi(2),
            lose: stake * ratio.powi(2),
        }
    }

    /// Preview for a minor-unit stake, truncated the way the ledger does.
    pub fn for_stake(selected: usize, total_cells: usize, stake: Amount) -> Self {
        Self {
            win: win_minor(selected, total_cells, stake).to_major(),
            lose: lose_minor(selected, total_cells, stake).to_major(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "win": self.win,
            "lose": self.lose
        })
    }
}

/// Win in minor units, `s * (n-k)^2 / n^2`, truncated.
pub fn win_minor(selected: usize, total_cells: usize, stake: Amount) -> Amount {
    if selected == 0 || total_cells == 0 || selected > total_cells {
        return Amount::ZERO;
    }
    let uncovered = (total_cells - selected) as u128;
    scaled(stake, uncovered * uncovered, (total_cells as u128).pow(2))
}

/// Loss in minor units, `s * k^2 / n^2`, truncated.
pub fn lose_minor(selected: usize, total_cells: usize, stake: Amount) -> Amount {
    if selected == 0 || total_cells == 0 || selected > total_cells {
        return Amount::ZERO;
    }
    let covered = selected as u128;
    scaled(stake, covered * covered, (total_cells as u128).pow(2))
}

fn scaled(stake: Amount, numerator: u128, denominator: u128) -> Amount {
    // numerator <= denominator, so the result never exceeds the stake
    let minor = stake.minor() as u128 * numerator / denominator;
    Amount::from_minor(minor as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_formula_values() {
        let payout = Payout::calculate(3, 24, 1.0);
        assert_eq!(payout.win, 0.765625);
        assert_eq!(payout.lose, 0.015625);
    }

    #[test]
    fn test_terms_are_not_complementary() {
        let payout = Payout::calculate(3, 24, 1.0);
        assert!(payout.win + payout.lose != 1.0);

        // Only equal halves at half coverage
        let half = Payout::calculate(12, 24, 2.0);
        assert_eq!(half.win, 0.5);
        assert_eq!(half.lose, 0.5);
    }

    #[test]
    fn test_scales_with_stake() {
        let payout = Payout::calculate(6, 18, 3.0);
        let unit = Payout::calculate(6, 18, 1.0);
        assert!((payout.win - unit.win * 3.0).abs() < 1e-12);
        assert!((payout.lose - unit.lose * 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(Payout::calculate(0, 48, 1.0), Payout::default());
    }

    #[test]
    fn test_stake_preview_in_minor_units() {
        let stake = Amount::parse_major("1").unwrap();
        assert_eq!(win_minor(3, 24, stake).minor(), 76_562_500);
        assert_eq!(lose_minor(3, 24, stake).minor(), 1_562_500);

        let preview = Payout::for_stake(3, 24, stake);
        assert_eq!(preview, Payout::calculate(3, 24, 1.0));
        assert_eq!(Payout::for_stake(0, 24, stake), Payout::default());
    }

    #[test]
    fn test_stake_preview_truncates() {
        // 1 minor unit * (1/3)^2 truncates to zero
        let stake = Amount::from_minor(1);
        assert_eq!(lose_minor(6, 18, stake), Amount::ZERO);
        assert_eq!(Payout::for_stake(6, 18, stake).lose, 0.0);
        assert!(Payout::calculate(6, 18, stake.to_major()).lose > 0.0);
    }
}
