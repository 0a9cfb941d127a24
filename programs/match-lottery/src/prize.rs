use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, PRIZE_TIERS};
use crate::error::LotteryError;

/// Per-tier payouts for one round, indexed by match count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrizeTable {
    pub payout_per_ticket: [u64; PRIZE_TIERS],
    /// Sum of every payout owed to winners.
    pub distributed: u64,
    /// Part of the pot nobody won; rolls over into the next round.
    pub remainder: u64,
}

pub fn validate_shares(shares_bps: &[u16; PRIZE_TIERS]) -> Result<()> {
    let total: u64 = shares_bps.iter().map(|&bps| bps as u64).sum();
    require!(total <= BPS_DENOMINATOR, LotteryError::InvalidPrizeShares);
    Ok(())
}

/// Splits `pot` across tiers.
///
/// Each tier gets `pot * bps / 10_000`, shared evenly by its winners. Tiers
/// without winners, unassigned basis points and integer division dust all
/// end up in `remainder`, so `distributed + remainder == pot` always holds.
pub fn resolve(
    pot: u64,
    shares_bps: &[u16; PRIZE_TIERS],
    winners: &[u64; PRIZE_TIERS],
) -> Result<PrizeTable> {
    validate_shares(shares_bps)?;

    let mut table = PrizeTable::default();
    let mut distributed: u128 = 0;

    for tier in 0..PRIZE_TIERS {
        if winners[tier] == 0 || shares_bps[tier] == 0 {
            continue;
        }
        let budget = (pot as u128)
            .checked_mul(shares_bps[tier] as u128)
            .ok_or(LotteryError::Overflow)?
            / BPS_DENOMINATOR as u128;
        let per_ticket = budget / winners[tier] as u128;

        table.payout_per_ticket[tier] =
            u64::try_from(per_ticket).map_err(|_| LotteryError::Overflow)?;
        distributed += per_ticket * winners[tier] as u128;
    }

    table.distributed = u64::try_from(distributed).map_err(|_| LotteryError::Overflow)?;
    table.remainder = pot
        .checked_sub(table.distributed)
        .ok_or(LotteryError::Overflow)?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARES: [u16; PRIZE_TIERS] = [0, 0, 0, 1_000, 2_500, 5_000];

    #[test]
    fn jackpot_and_runner_up_split_their_budgets() {
        let table = resolve(10_000, &SHARES, &[3, 4, 2, 0, 2, 1]).unwrap();

        assert_eq!(table.payout_per_ticket, [0, 0, 0, 0, 1_250, 5_000]);
        assert_eq!(table.distributed, 7_500);
        assert_eq!(table.remainder, 2_500);
    }

    #[test]
    fn division_dust_rolls_over() {
        let table = resolve(1_000, &SHARES, &[0, 0, 0, 3, 0, 0]).unwrap();

        assert_eq!(table.payout_per_ticket[3], 33);
        assert_eq!(table.distributed, 99);
        assert_eq!(table.remainder, 901);
    }

    #[test]
    fn nobody_wins_everything_rolls_over() {
        let table = resolve(42_000, &SHARES, &[7, 0, 0, 0, 0, 0]).unwrap();

        assert_eq!(table.payout_per_ticket, [0; PRIZE_TIERS]);
        assert_eq!(table.distributed, 0);
        assert_eq!(table.remainder, 42_000);
    }

    #[test]
    fn never_distributes_more_than_the_pot() {
        let full: [u16; PRIZE_TIERS] = [0, 0, 0, 0, 0, 10_000];
        for pot in [0u64, 1, 7, 999, 10_001, u64::MAX] {
            for winners in [1u64, 2, 3, 7, 1_000] {
                let table = resolve(pot, &full, &[0, 0, 0, 0, 0, winners]).unwrap();
                assert!(table.distributed <= pot);
                assert_eq!(table.distributed + table.remainder, pot);
            }
        }
    }

    #[test]
    fn shares_above_one_hundred_percent_are_rejected() {
        let shares: [u16; PRIZE_TIERS] = [0, 0, 0, 2_000, 3_000, 5_001];
        assert_eq!(
            validate_shares(&shares).unwrap_err(),
            LotteryError::InvalidPrizeShares.into()
        );
        assert!(resolve(100, &shares, &[0, 0, 0, 1, 1, 1]).is_err());
    }
}
