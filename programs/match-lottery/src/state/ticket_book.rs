use anchor_lang::prelude::*;

use crate::constants::{MAX_TICKETS_PER_BOOK, PRIZE_TIERS};
use crate::error::LotteryError;
use crate::number_set::{match_count, NumberSet};
use crate::state::round::Round;

/// Every ticket one owner bought in one round, in purchase order.
/// Seeds: [b"tickets", round.key(), owner]
#[account]
#[derive(InitSpace, Default)]
pub struct TicketBook {
    pub bump: u8,
    pub round_id: u64,
    pub owner: Pubkey,

    /// Set once the book's match counts were added to the round totals.
    pub tallied: bool,

    /// Set once the owner's prize for this round was paid.
    pub claimed: bool,

    #[max_len(100)]
    pub selections: Vec<NumberSet>,
}

/// A single purchased entry. `index` is its position in the owner's book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub owner: Pubkey,
    pub round_id: u64,
    pub selection: NumberSet,
    pub index: u32,
}

impl TicketBook {
    /// Binds a freshly created book to its owner. No-op for existing books.
    pub fn bind(&mut self, owner: Pubkey, round_id: u64, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.round_id = round_id;
            self.bump = bump;
        }
    }

    /// Appends tickets and returns the index of the first new one.
    pub fn append(&mut self, selections: &[NumberSet]) -> Result<u32> {
        require!(
            !selections.is_empty() && selections.len() <= MAX_TICKETS_PER_BOOK,
            LotteryError::InvalidTicketCount
        );
        let total = self
            .selections
            .len()
            .checked_add(selections.len())
            .ok_or(LotteryError::Overflow)?;
        require!(total <= MAX_TICKETS_PER_BOOK, LotteryError::TicketLimitExceeded);

        let first_index = self.selections.len() as u32;
        self.selections.extend_from_slice(selections);
        Ok(first_index)
    }

    pub fn len(&self) -> u64 {
        self.selections.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn tickets(&self) -> impl Iterator<Item = Ticket> + '_ {
        self.selections
            .iter()
            .enumerate()
            .map(move |(index, selection)| Ticket {
                owner: self.owner,
                round_id: self.round_id,
                selection: *selection,
                index: index as u32,
            })
    }

    /// Count of tickets per match count against `winning`.
    pub fn match_histogram(&self, winning: &NumberSet) -> [u64; PRIZE_TIERS] {
        let mut histogram = [0u64; PRIZE_TIERS];
        for selection in &self.selections {
            let matches = match_count(selection, winning) as usize;
            // well-formed selections never exceed the top tier
            if let Some(slot) = histogram.get_mut(matches) {
                *slot += 1;
            }
        }
        histogram
    }

    /// Marks the book tallied and returns its histogram.
    pub fn tally(&mut self, winning: &NumberSet) -> Result<[u64; PRIZE_TIERS]> {
        require!(!self.tallied, LotteryError::AlreadyTallied);
        let histogram = self.match_histogram(winning);
        self.tallied = true;
        Ok(histogram)
    }

    /// Total prize owed for this book; marks it claimed.
    pub fn claim(&mut self, round: &Round) -> Result<u64> {
        require!(!self.claimed, LotteryError::AlreadyClaimed);
        let winning = round.winning()?;

        let mut payout: u64 = 0;
        for selection in &self.selections {
            payout = payout
                .checked_add(round.payout_for(match_count(selection, &winning)))
                .ok_or(LotteryError::Overflow)?;
        }
        require!(payout > 0, LotteryError::NoPrize);

        self.claimed = true;
        Ok(payout)
    }
}
