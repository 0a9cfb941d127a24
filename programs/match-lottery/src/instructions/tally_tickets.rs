use anchor_lang::prelude::*;

use crate::constants::{PRIZE_TIERS, ROUND_SEED, TICKET_BOOK_SEED};
use crate::state::{Round, TicketBook};

/// Event emitted when a ticket book's match counts are added to its round
#[event]
pub struct TicketsTallied {
    pub round_id: u64,
    pub owner: Pubkey,
    /// Tickets in the book per match count
    pub matches: [u64; PRIZE_TIERS],
}

/// Permissionless: anyone may crank the tally of any ticket book.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct TallyTickets<'info> {
    pub cranker: Signer<'info>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [TICKET_BOOK_SEED, round.key().as_ref(), ticket_book.owner.as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Account<'info, TicketBook>,
}

pub fn process_tally_tickets(ctx: Context<TallyTickets>, round_id: u64) -> Result<()> {
    let round = &mut ctx.accounts.round;
    let ticket_book = &mut ctx.accounts.ticket_book;

    let winning = round.winning()?;
    let matches = ticket_book.tally(&winning)?;
    round.record_tally(&matches, ticket_book.len())?;

    msg!(
        "Round {}: tallied {} tickets of {}, {}/{} done",
        round_id,
        ticket_book.len(),
        ticket_book.owner,
        round.tallied_tickets,
        round.ticket_count
    );
    emit!(TicketsTallied {
        round_id,
        owner: ticket_book.owner,
        matches,
    });
    Ok(())
}
