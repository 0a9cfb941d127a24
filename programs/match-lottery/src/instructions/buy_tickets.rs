use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::{
    LOTTERY_SEED, MAX_TICKETS_PER_BOOK, NUMBERS_PER_TICKET, ROUND_SEED, TICKET_BOOK_SEED,
    VAULT_SEED,
};
use crate::error::LotteryError;
use crate::number_set::NumberSet;
use crate::state::{Lottery, Round, TicketBook};

/// Event emitted when tickets are purchased
#[event]
pub struct TicketsPurchased {
    pub round_id: u64,
    pub buyer: Pubkey,
    /// Number of tickets purchased
    pub ticket_count: u64,
    /// Total amount paid in the payment token
    pub payment_amount: u64,
    /// Index of the first new ticket in the buyer's book
    pub first_index: u32,
}

/// Accounts required to buy tickets in the current round.
/// Handles:
/// - Ticket book creation on first purchase
/// - Payment transfer into the vault
#[derive(Accounts)]
pub struct BuyTickets<'info> {
    /// The account paying for the tickets.
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The round currently in play.
    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.current_round.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Buyer's tickets for this round, created on first purchase.
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + TicketBook::INIT_SPACE,
        seeds = [TICKET_BOOK_SEED, round.key().as_ref(), buyer.key().as_ref()],
        bump,
    )]
    pub ticket_book: Box<Account<'info, TicketBook>>,

    #[account(address = lottery.mint)]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Buyer's token account paying for the tickets.
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = buyer,
        associated_token::token_program = token_program,
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = lottery.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface
    pub token_program: Interface<'info, TokenInterface>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Buys tickets for the caller.
///
/// Steps performed:
/// 1. Check the round is inside its sales window (for every caller).
/// 2. Encode every selection; one bad selection rejects the whole purchase.
/// 3. Book tickets and pool amount on the round.
/// 4. Append the tickets to the buyer's book.
/// 5. Transfer the payment from the buyer to the vault.
///
/// # Arguments
/// * `ctx` - Context containing BuyTickets accounts
/// * `selections` - One entry of numbers per ticket
pub fn process_buy_tickets(
    ctx: Context<BuyTickets>,
    selections: Vec<[u8; NUMBERS_PER_TICKET]>,
) -> Result<()> {
    let clock = Clock::get()?;
    let round = &mut ctx.accounts.round;

    round.ensure_accepting_sales(clock.unix_timestamp)?;
    require!(
        !selections.is_empty() && selections.len() <= MAX_TICKETS_PER_BOOK,
        LotteryError::InvalidTicketCount
    );

    let encoded = selections
        .iter()
        .map(|numbers| NumberSet::encode(numbers))
        .collect::<Result<Vec<_>>>()?;

    let cost = round.record_purchase(encoded.len() as u64, clock.unix_timestamp)?;
    require!(
        ctx.accounts.buyer_token_account.amount >= cost,
        LotteryError::InsufficientPayment
    );

    let ticket_book = &mut ctx.accounts.ticket_book;
    ticket_book.bind(ctx.accounts.buyer.key(), round.id, ctx.bumps.ticket_book);
    let first_index = ticket_book.append(&encoded)?;

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.buyer_token_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        cost,
        ctx.accounts.mint.decimals,
    )
    .map_err(|_| error!(LotteryError::InsufficientPayment))?;

    msg!(
        "Round {}: {} tickets for {}, {} sold",
        round.id,
        encoded.len(),
        cost,
        round.ticket_count
    );
    emit!(TicketsPurchased {
        round_id: round.id,
        buyer: ctx.accounts.buyer.key(),
        ticket_count: encoded.len() as u64,
        payment_amount: cost,
        first_index,
    });

    Ok(())
}
