use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::constants::{NUMBERS_PER_TICKET, PRIZE_TIERS};
use crate::error::LotteryError;
use crate::number_set::NumberSet;
use crate::prize::{resolve, PrizeTable};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum RoundStatus {
    /// Created; price may still change, no sales.
    #[default]
    Pending,
    /// Price fixed, tickets sold while inside the sales window.
    Active,
    /// Sales closed, oracle randomness committed but not yet revealed.
    AwaitingRandomness,
    /// Winning selection recorded; tickets are being tallied.
    Drawn,
    /// Payouts frozen and claimable. Terminal.
    Finalized,
}

/// One lottery cycle.
/// Seeds: [b"round", id.to_le_bytes()]
#[account]
#[derive(InitSpace, Default)]
pub struct Round {
    pub bump: u8,
    pub id: u64,
    pub status: RoundStatus,

    /// Price of one ticket in the payment token's smallest unit.
    pub ticket_price: u64,

    /// Sales are accepted while `open_time <= now < close_time`.
    pub open_time: i64,
    pub close_time: i64,

    /// Set exactly once, by `draw` or `fulfill_draw`.
    pub winning_selection: Option<NumberSet>,

    pub ticket_count: u64,

    /// Tokens collected from this round's ticket sales.
    pub pool_amount: u64,

    /// Rollover absorbed from earlier rounds at activation.
    pub carried_in: u64,

    /// Switchboard randomness account committed by `request_draw`.
    pub randomness_account: Pubkey,
    pub commit_slot: u64,

    pub tallied_tickets: u64,
    pub winners_per_tier: [u64; PRIZE_TIERS],

    /// Frozen at finalization, indexed by match count.
    pub payout_per_ticket: [u64; PRIZE_TIERS],
    pub paid_out: u64,
}

/// Read-only snapshot returned to clients.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    pub id: u64,
    pub status: RoundStatus,
    pub pool: u64,
    pub ticket_count: u64,
    pub price: u64,
    pub open_time: i64,
    pub close_time: i64,
    pub winning_numbers: Option<[u8; NUMBERS_PER_TICKET]>,
}

impl Round {
    pub fn open(&mut self, id: u64, bump: u8) {
        self.bump = bump;
        self.id = id;
        self.status = RoundStatus::Pending;
        self.winning_selection = None;
    }

    /// Total amount prizes are paid from.
    pub fn pot(&self) -> Result<u64> {
        self.pool_amount
            .checked_add(self.carried_in)
            .ok_or(LotteryError::Overflow.into())
    }

    pub fn sales_open(&self, now: i64) -> bool {
        self.status == RoundStatus::Active && now >= self.open_time && now < self.close_time
    }

    /// The price may change until the sales window opens.
    pub fn set_price(&mut self, price: u64, now: i64) -> Result<()> {
        match self.status {
            RoundStatus::Pending => {}
            RoundStatus::Active => {
                require!(now < self.open_time, LotteryError::PriceLocked);
            }
            RoundStatus::AwaitingRandomness | RoundStatus::Drawn => {
                return err!(LotteryError::AlreadyDrawn)
            }
            RoundStatus::Finalized => return err!(LotteryError::AlreadyFinalized),
        }
        require!(price > 0, LotteryError::InvalidPrice);

        self.ticket_price = price;
        Ok(())
    }

    pub fn activate(
        &mut self,
        price: u64,
        open_time: i64,
        close_time: i64,
        now: i64,
    ) -> Result<()> {
        match self.status {
            RoundStatus::Pending => {}
            RoundStatus::Active => return err!(LotteryError::PriceLocked),
            RoundStatus::AwaitingRandomness | RoundStatus::Drawn => {
                return err!(LotteryError::AlreadyDrawn)
            }
            RoundStatus::Finalized => return err!(LotteryError::AlreadyFinalized),
        }
        require!(price > 0, LotteryError::InvalidPrice);
        require!(
            open_time < close_time && close_time > now,
            LotteryError::InvalidSalesWindow
        );

        self.ticket_price = price;
        self.open_time = open_time;
        self.close_time = close_time;
        self.status = RoundStatus::Active;
        Ok(())
    }

    /// Absorbs rollover from earlier rounds into this round's pot.
    pub fn carry_in(&mut self, amount: u64) -> Result<()> {
        self.carried_in = self
            .carried_in
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }

    /// Applies to every caller, operator included.
    pub fn ensure_accepting_sales(&self, now: i64) -> Result<()> {
        if !self.sales_open(now) {
            return Err(self.inactive());
        }
        Ok(())
    }

    /// `RoundInactive` carrying the round id and its status.
    fn inactive(&self) -> Error {
        error!(LotteryError::RoundInactive).with_values((self.id, format!("{:?}", self.status)))
    }

    /// Books `count` tickets and returns what the buyer owes.
    pub fn record_purchase(&mut self, count: u64, now: i64) -> Result<u64> {
        self.ensure_accepting_sales(now)?;
        require!(count > 0, LotteryError::InvalidTicketCount);

        let cost = self
            .ticket_price
            .checked_mul(count)
            .ok_or(LotteryError::Overflow)?;
        let ticket_count = self
            .ticket_count
            .checked_add(count)
            .ok_or(LotteryError::Overflow)?;
        let pool_amount = self
            .pool_amount
            .checked_add(cost)
            .ok_or(LotteryError::Overflow)?;

        self.ticket_count = ticket_count;
        self.pool_amount = pool_amount;
        Ok(cost)
    }

    fn ensure_drawable(&self, now: i64) -> Result<()> {
        match self.status {
            RoundStatus::Active => {}
            RoundStatus::Pending => return Err(self.inactive()),
            RoundStatus::AwaitingRandomness => return err!(LotteryError::DrawAlreadyRequested),
            RoundStatus::Drawn => return err!(LotteryError::AlreadyDrawn),
            RoundStatus::Finalized => return err!(LotteryError::AlreadyFinalized),
        }
        require!(now >= self.close_time, LotteryError::SalesStillOpen);
        Ok(())
    }

    /// Operator-supplied winning selection: Active -> Drawn.
    pub fn draw(&mut self, winning: NumberSet, now: i64) -> Result<()> {
        self.ensure_drawable(now)?;
        self.record_winner(winning)
    }

    /// First half of an oracle draw: Active -> AwaitingRandomness.
    pub fn request_randomness(
        &mut self,
        randomness_account: Pubkey,
        commit_slot: u64,
        now: i64,
    ) -> Result<()> {
        self.ensure_drawable(now)?;

        self.randomness_account = randomness_account;
        self.commit_slot = commit_slot;
        self.status = RoundStatus::AwaitingRandomness;
        Ok(())
    }

    /// Validates a randomness delivery targets this round's pending request.
    pub fn ensure_awaiting(&self, randomness_account: &Pubkey) -> Result<()> {
        match self.status {
            RoundStatus::AwaitingRandomness => {}
            RoundStatus::Drawn => return err!(LotteryError::AlreadyDrawn),
            RoundStatus::Finalized => return err!(LotteryError::AlreadyFinalized),
            RoundStatus::Pending | RoundStatus::Active => {
                return err!(LotteryError::RandomnessNotRequested)
            }
        }
        require!(
            *randomness_account == self.randomness_account,
            LotteryError::RandomnessMismatch
        );
        Ok(())
    }

    /// Second half of an oracle draw: AwaitingRandomness -> Drawn.
    pub fn fulfill_randomness(
        &mut self,
        randomness_account: &Pubkey,
        winning: NumberSet,
    ) -> Result<()> {
        self.ensure_awaiting(randomness_account)?;
        self.record_winner(winning)
    }

    fn record_winner(&mut self, winning: NumberSet) -> Result<()> {
        require!(self.winning_selection.is_none(), LotteryError::AlreadyDrawn);
        self.winning_selection = Some(winning);
        self.status = RoundStatus::Drawn;
        Ok(())
    }

    pub fn winning(&self) -> Result<NumberSet> {
        self.winning_selection
            .ok_or(LotteryError::RoundNotDrawn.into())
    }

    fn ensure_status(&self, expected: RoundStatus) -> Result<()> {
        if self.status == expected {
            return Ok(());
        }
        match (expected, self.status) {
            (_, RoundStatus::Finalized) => err!(LotteryError::AlreadyFinalized),
            (RoundStatus::Finalized, _) => err!(LotteryError::RoundNotFinalized),
            _ => err!(LotteryError::RoundNotDrawn),
        }
    }

    /// Adds one ticket book's match counts to the round totals.
    pub fn record_tally(&mut self, winners: &[u64; PRIZE_TIERS], tickets: u64) -> Result<()> {
        self.ensure_status(RoundStatus::Drawn)?;

        let tallied = self
            .tallied_tickets
            .checked_add(tickets)
            .ok_or(LotteryError::Overflow)?;
        require!(tallied <= self.ticket_count, LotteryError::Overflow);

        let mut totals = self.winners_per_tier;
        for (total, count) in totals.iter_mut().zip(winners.iter()) {
            *total = total.checked_add(*count).ok_or(LotteryError::Overflow)?;
        }

        self.winners_per_tier = totals;
        self.tallied_tickets = tallied;
        Ok(())
    }

    /// Drawn -> Finalized. Freezes payouts; returns the table so the caller
    /// can roll the remainder over.
    pub fn finalize(&mut self, shares_bps: &[u16; PRIZE_TIERS]) -> Result<PrizeTable> {
        self.ensure_status(RoundStatus::Drawn)?;
        require!(
            self.tallied_tickets == self.ticket_count,
            LotteryError::TallyIncomplete
        );

        let table = resolve(self.pot()?, shares_bps, &self.winners_per_tier)?;

        self.payout_per_ticket = table.payout_per_ticket;
        self.status = RoundStatus::Finalized;
        Ok(table)
    }

    pub fn ensure_claimable(&self) -> Result<()> {
        self.ensure_status(RoundStatus::Finalized)
    }

    /// Payout owed for a single ticket.
    pub fn payout_for(&self, matches: u8) -> u64 {
        self.payout_per_ticket
            .get(matches as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        let paid_out = self
            .paid_out
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        require!(paid_out <= self.pot()?, LotteryError::Overflow);

        self.paid_out = paid_out;
        Ok(())
    }

    pub fn info(&self) -> RoundInfo {
        RoundInfo {
            id: self.id,
            status: self.status,
            pool: self.pool_amount,
            ticket_count: self.ticket_count,
            price: self.ticket_price,
            open_time: self.open_time,
            close_time: self.close_time,
            winning_numbers: self.winning_selection.map(|set| set.numbers()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::{ComparedValues, Error};

    const OPEN: i64 = 1_000;
    const CLOSE: i64 = 2_000;
    const SHARES: [u16; PRIZE_TIERS] = [0, 0, 0, 1_000, 2_500, 5_000];

    fn pending(id: u64) -> Round {
        let mut round = Round::default();
        round.open(id, 254);
        round
    }

    fn active(price: u64) -> Round {
        let mut round = pending(0);
        round.activate(price, OPEN, CLOSE, OPEN).unwrap();
        round
    }

    fn winner() -> NumberSet {
        NumberSet::encode(&[10, 20, 30, 40, 50]).unwrap()
    }

    fn expect(result: Result<impl std::fmt::Debug>, error: LotteryError) {
        let expected: Error = error.into();
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn pending_round_rejects_sales() {
        let mut round = pending(0);
        expect(round.record_purchase(10, OPEN), LotteryError::RoundInactive);
        assert_eq!(round.ticket_count, 0);
        assert_eq!(round.pool_amount, 0);
    }

    #[test]
    fn inactive_round_error_names_the_round() {
        let round = pending(7);
        let error = round.ensure_accepting_sales(OPEN).unwrap_err();
        assert_eq!(error, LotteryError::RoundInactive.into());

        match &error {
            Error::AnchorError(error) => match &error.compared_values {
                Some(ComparedValues::Values((id, status))) => {
                    assert_eq!(id, "7");
                    assert_eq!(status, "Pending");
                }
                other => panic!("unexpected values: {:?}", other),
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn sales_follow_the_window() {
        let mut round = active(10);

        expect(round.record_purchase(1, OPEN - 1), LotteryError::RoundInactive);
        assert_eq!(round.record_purchase(10, OPEN).unwrap(), 100);
        assert_eq!(round.record_purchase(3, CLOSE - 1).unwrap(), 30);
        expect(round.record_purchase(1, CLOSE), LotteryError::RoundInactive);

        assert_eq!(round.ticket_count, 13);
        assert_eq!(round.pool_amount, 130);
    }

    #[test]
    fn overflowing_purchase_leaves_round_untouched() {
        let mut round = active(u64::MAX / 2);
        round.record_purchase(1, OPEN).unwrap();

        expect(round.record_purchase(3, OPEN), LotteryError::Overflow);
        assert_eq!(round.ticket_count, 1);
        assert_eq!(round.pool_amount, u64::MAX / 2);
    }

    #[test]
    fn price_is_fixed_once_sales_open() {
        let mut round = pending(1);
        round.set_price(12, 0).unwrap();
        assert_eq!(round.info().price, 12);
        expect(round.set_price(0, 0), LotteryError::InvalidPrice);

        round.activate(12, OPEN, CLOSE, 0).unwrap();
        round.set_price(15, OPEN - 1).unwrap();
        assert_eq!(round.ticket_price, 15);

        expect(round.set_price(20, OPEN), LotteryError::PriceLocked);
        assert_eq!(round.ticket_price, 15);
    }

    #[test]
    fn activation_validates_window_and_status() {
        let mut round = pending(0);
        expect(round.activate(10, CLOSE, OPEN, 0), LotteryError::InvalidSalesWindow);
        expect(round.activate(10, OPEN, CLOSE, CLOSE), LotteryError::InvalidSalesWindow);
        expect(round.activate(0, OPEN, CLOSE, 0), LotteryError::InvalidPrice);
        assert_eq!(round.status, RoundStatus::Pending);

        round.activate(10, OPEN, CLOSE, 0).unwrap();
        expect(round.activate(10, OPEN, CLOSE, 0), LotteryError::PriceLocked);
    }

    #[test]
    fn draw_waits_for_sales_to_close() {
        let mut round = active(10);
        expect(round.draw(winner(), CLOSE - 1), LotteryError::SalesStillOpen);

        round.draw(winner(), CLOSE).unwrap();
        assert_eq!(round.status, RoundStatus::Drawn);
        assert_eq!(round.info().winning_numbers, Some([10, 20, 30, 40, 50]));

        let other = NumberSet::encode(&[1, 2, 3, 4, 5]).unwrap();
        expect(round.draw(other, CLOSE), LotteryError::AlreadyDrawn);
        assert_eq!(round.winning_selection, Some(winner()));
    }

    #[test]
    fn pending_round_cannot_be_drawn() {
        let mut round = pending(0);
        expect(round.draw(winner(), CLOSE), LotteryError::RoundInactive);
    }

    #[test]
    fn oracle_draw_is_two_phase_and_replay_safe() {
        let mut round = active(10);
        let randomness = Pubkey::new_unique();

        expect(
            round.fulfill_randomness(&randomness, winner()),
            LotteryError::RandomnessNotRequested,
        );

        round.request_randomness(randomness, 77, CLOSE).unwrap();
        assert_eq!(round.status, RoundStatus::AwaitingRandomness);
        expect(round.request_randomness(randomness, 78, CLOSE), LotteryError::DrawAlreadyRequested);
        expect(round.draw(winner(), CLOSE), LotteryError::DrawAlreadyRequested);
        expect(round.record_purchase(1, CLOSE - 1), LotteryError::RoundInactive);

        expect(
            round.fulfill_randomness(&Pubkey::new_unique(), winner()),
            LotteryError::RandomnessMismatch,
        );

        round.fulfill_randomness(&randomness, winner()).unwrap();
        assert_eq!(round.status, RoundStatus::Drawn);

        let other = NumberSet::encode(&[1, 2, 3, 4, 5]).unwrap();
        expect(round.fulfill_randomness(&randomness, other), LotteryError::AlreadyDrawn);
        assert_eq!(round.winning_selection, Some(winner()));
    }

    #[test]
    fn finalize_requires_a_complete_tally() {
        let mut round = active(100);
        round.record_purchase(4, OPEN).unwrap();

        expect(round.record_tally(&[1, 0, 0, 0, 0, 0], 1), LotteryError::RoundNotDrawn);
        expect(round.finalize(&SHARES), LotteryError::RoundNotDrawn);

        round.draw(winner(), CLOSE).unwrap();
        round.record_tally(&[1, 0, 0, 0, 1, 0], 2).unwrap();
        expect(round.finalize(&SHARES), LotteryError::TallyIncomplete);

        round.record_tally(&[0, 0, 0, 0, 0, 2], 2).unwrap();
        expect(round.record_tally(&[1, 0, 0, 0, 0, 0], 1), LotteryError::Overflow);

        let table = round.finalize(&SHARES).unwrap();
        assert_eq!(round.status, RoundStatus::Finalized);
        // pot 400: tier 4 gets 100 for one ticket, tier 5 splits 200
        assert_eq!(round.payout_per_ticket, [0, 0, 0, 0, 100, 100]);
        assert_eq!(table.remainder, 100);
    }

    #[test]
    fn finalize_twice_fails_without_repricing() {
        let mut round = active(100);
        round.record_purchase(1, OPEN).unwrap();
        round.draw(winner(), CLOSE).unwrap();
        round.record_tally(&[0, 0, 0, 0, 0, 1], 1).unwrap();
        round.finalize(&SHARES).unwrap();
        let frozen = round.payout_per_ticket;

        expect(round.finalize(&[0, 0, 0, 0, 0, 10_000]), LotteryError::AlreadyFinalized);
        expect(round.record_tally(&[0, 0, 0, 0, 0, 1], 1), LotteryError::AlreadyFinalized);
        assert_eq!(round.payout_per_ticket, frozen);
    }

    #[test]
    fn payouts_cannot_exceed_the_pot() {
        let mut round = active(100);
        round.record_purchase(2, OPEN).unwrap();
        round.carry_in(50).unwrap();
        round.draw(winner(), CLOSE).unwrap();
        round.record_tally(&[0, 0, 0, 0, 0, 2], 2).unwrap();
        round.finalize(&[0, 0, 0, 0, 0, 10_000]).unwrap();

        assert_eq!(round.payout_for(5), 125);
        assert_eq!(round.payout_for(4), 0);
        round.record_payout(125).unwrap();
        round.record_payout(125).unwrap();
        expect(round.record_payout(1), LotteryError::Overflow);
        assert_eq!(round.paid_out, 250);
    }

    #[test]
    fn claims_need_a_finalized_round() {
        let mut round = active(100);
        expect(round.ensure_claimable(), LotteryError::RoundNotFinalized);
        round.draw(winner(), CLOSE).unwrap();
        expect(round.ensure_claimable(), LotteryError::RoundNotFinalized);
        round.finalize(&SHARES).unwrap();
        assert!(round.ensure_claimable().is_ok());
    }
}
