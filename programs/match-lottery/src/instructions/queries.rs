use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, NUMBERS_PER_TICKET, ROUND_SEED, TICKET_BOOK_SEED};
use crate::number_set::{match_count, NumberSet};
use crate::state::{Lottery, Round, RoundInfo, TicketBook};

// Read-only instructions. Results travel back through return data, so they
// are meant to be simulated rather than sent.

#[derive(Accounts)]
pub struct LotteryView<'info> {
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RoundView<'info> {
    #[account(
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,
}

#[derive(Accounts)]
#[instruction(round_id: u64, owner: Pubkey)]
pub struct UserTicketsView<'info> {
    #[account(
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    /// Absent when the owner never bought into this round.
    #[account(
        seeds = [TICKET_BOOK_SEED, round.key().as_ref(), owner.as_ref()],
        bump,
    )]
    pub ticket_book: Option<Account<'info, TicketBook>>,
}

#[derive(Accounts)]
pub struct CheckTicketMatching {}

pub fn process_current_round(ctx: Context<LotteryView>) -> Result<u64> {
    Ok(ctx.accounts.lottery.current_round)
}

pub fn process_round_info(ctx: Context<RoundView>, _round_id: u64) -> Result<RoundInfo> {
    Ok(ctx.accounts.round.info())
}

pub fn process_get_user_tickets(
    ctx: Context<UserTicketsView>,
    _round_id: u64,
    _owner: Pubkey,
) -> Result<Vec<[u8; NUMBERS_PER_TICKET]>> {
    Ok(user_tickets(ctx.accounts.ticket_book.as_deref()))
}

pub fn process_check_ticket_matching(
    _ctx: Context<CheckTicketMatching>,
    a: u128,
    b: u128,
) -> Result<u8> {
    check_ticket_matching(a, b)
}

/// Decoded selections in purchase order.
pub fn user_tickets(ticket_book: Option<&TicketBook>) -> Vec<[u8; NUMBERS_PER_TICKET]> {
    ticket_book
        .map(|book| book.tickets().map(|ticket| ticket.selection.numbers()).collect())
        .unwrap_or_default()
}

/// Match count of two encoded selections. Each mask may hold at most five
/// numbers, all below the number range.
pub fn check_ticket_matching(a: u128, b: u128) -> Result<u8> {
    let a = NumberSet::from_partial_bits(a)?;
    let b = NumberSet::from_partial_bits(b)?;
    Ok(match_count(&a, &b))
}
