use anchor_lang::prelude::*;

use crate::constants::PRIZE_TIERS;
use crate::error::LotteryError;
use crate::prize::validate_shares;

/// Program-wide configuration and round bookkeeping.
/// Seeds: [b"lottery"]
#[account]
#[derive(InitSpace, Default)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Bump of the vault token account holding every round's pool.
    pub vault_bump: u8,

    /// The operator: prices, activates, draws and finalizes rounds.
    pub authority: Pubkey,

    /// Account allowed to draw besides the operator.
    pub oracle: Pubkey,

    /// Payment token mint.
    pub mint: Pubkey,

    /// Id handed to the next `create_round`.
    pub next_round_id: u64,

    /// The round currently in play. Advances when that round is finalized.
    pub current_round: u64,

    /// Undistributed pot waiting to be absorbed by the next activated round.
    pub rollover: u64,

    /// Basis points of the round pot paid to each match-count tier.
    pub tier_shares_bps: [u16; PRIZE_TIERS],
}

impl Lottery {
    pub fn configure(
        &mut self,
        bump: u8,
        vault_bump: u8,
        authority: Pubkey,
        oracle: Pubkey,
        mint: Pubkey,
        tier_shares_bps: [u16; PRIZE_TIERS],
    ) -> Result<()> {
        validate_shares(&tier_shares_bps)?;

        self.bump = bump;
        self.vault_bump = vault_bump;
        self.authority = authority;
        self.oracle = oracle;
        self.mint = mint;
        self.next_round_id = 0;
        self.current_round = 0;
        self.rollover = 0;
        self.tier_shares_bps = tier_shares_bps;
        Ok(())
    }

    pub fn ensure_operator(&self, caller: &Pubkey) -> Result<()> {
        require!(*caller == self.authority, LotteryError::Unauthorized);
        Ok(())
    }

    /// Draws may come from the operator or the designated oracle.
    pub fn ensure_draw_authority(&self, caller: &Pubkey) -> Result<()> {
        require!(
            *caller == self.authority || *caller == self.oracle,
            LotteryError::Unauthorized
        );
        Ok(())
    }

    pub fn ensure_current(&self, round_id: u64) -> Result<()> {
        require!(round_id == self.current_round, LotteryError::RoundNotCurrent);
        Ok(())
    }

    pub fn allocate_round_id(&mut self) -> Result<u64> {
        let id = self.next_round_id;
        self.next_round_id = id.checked_add(1).ok_or(LotteryError::Overflow)?;
        Ok(id)
    }

    pub fn take_rollover(&mut self) -> u64 {
        std::mem::take(&mut self.rollover)
    }

    /// Books the finalized round's leftover and moves play to the next id.
    ///
    /// Returns the id of the next round when it was never created, after
    /// allocating it; the caller opens that account as Pending.
    pub fn close_round(&mut self, round_id: u64, remainder: u64) -> Result<Option<u64>> {
        self.ensure_current(round_id)?;
        let rollover = self
            .rollover
            .checked_add(remainder)
            .ok_or(LotteryError::Overflow)?;
        let next = round_id.checked_add(1).ok_or(LotteryError::Overflow)?;

        self.rollover = rollover;
        self.current_round = next;
        if self.next_round_id > next {
            return Ok(None);
        }
        self.allocate_round_id().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lottery(authority: Pubkey, oracle: Pubkey) -> Lottery {
        let mut lottery = Lottery::default();
        let mint = Pubkey::new_unique();
        lottery
            .configure(255, 254, authority, oracle, mint, [0, 0, 0, 1_000, 2_500, 5_000])
            .unwrap();
        lottery
    }

    #[test]
    fn only_operator_passes_operator_check() {
        let operator = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();
        let lottery = lottery(operator, oracle);

        assert!(lottery.ensure_operator(&operator).is_ok());
        assert_eq!(
            lottery.ensure_operator(&oracle).unwrap_err(),
            LotteryError::Unauthorized.into()
        );
        assert_eq!(
            lottery.ensure_operator(&Pubkey::new_unique()).unwrap_err(),
            LotteryError::Unauthorized.into()
        );
    }

    #[test]
    fn oracle_may_draw_but_strangers_may_not() {
        let operator = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();
        let lottery = lottery(operator, oracle);

        assert!(lottery.ensure_draw_authority(&operator).is_ok());
        assert!(lottery.ensure_draw_authority(&oracle).is_ok());
        assert_eq!(
            lottery.ensure_draw_authority(&Pubkey::new_unique()).unwrap_err(),
            LotteryError::Unauthorized.into()
        );
    }

    #[test]
    fn round_ids_are_sequential() {
        let mut lottery = lottery(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(lottery.allocate_round_id().unwrap(), 0);
        assert_eq!(lottery.allocate_round_id().unwrap(), 1);
        assert_eq!(lottery.allocate_round_id().unwrap(), 2);
        assert_eq!(lottery.current_round, 0);
    }

    #[test]
    fn closing_a_round_carries_the_remainder() {
        let mut lottery = lottery(Pubkey::new_unique(), Pubkey::new_unique());
        lottery.allocate_round_id().unwrap();
        lottery.allocate_round_id().unwrap();

        // round 1 already exists, nothing to open
        assert_eq!(lottery.close_round(0, 250).unwrap(), None);
        assert_eq!(lottery.current_round, 1);
        assert_eq!(lottery.rollover, 250);
        assert_eq!(lottery.next_round_id, 2);

        assert_eq!(
            lottery.close_round(0, 10).unwrap_err(),
            LotteryError::RoundNotCurrent.into()
        );
        assert_eq!(lottery.rollover, 250);

        assert_eq!(lottery.take_rollover(), 250);
        assert_eq!(lottery.rollover, 0);
    }

    #[test]
    fn closing_the_newest_round_opens_the_next_one() {
        let mut lottery = lottery(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(lottery.allocate_round_id().unwrap(), 0);

        assert_eq!(lottery.close_round(0, 0).unwrap(), Some(1));
        assert_eq!(lottery.current_round, 1);
        assert_eq!(lottery.next_round_id, 2);

        assert_eq!(lottery.close_round(1, 0).unwrap(), Some(2));
        assert_eq!(lottery.next_round_id, 3);
    }

    #[test]
    fn invalid_prize_policy_is_rejected() {
        let mut lottery = lottery(Pubkey::new_unique(), Pubkey::new_unique());
        let key = Pubkey::new_unique();
        let err = lottery
            .configure(1, 1, key, key, key, [5_000; PRIZE_TIERS])
            .unwrap_err();
        assert_eq!(err, LotteryError::InvalidPrizeShares.into());
    }
}
