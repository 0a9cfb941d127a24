use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::{LOTTERY_SEED, ROUND_SEED, TICKET_BOOK_SEED, VAULT_SEED};
use crate::state::{Lottery, Round, TicketBook};

/// Event emitted when a ticket owner collects their prize
#[event]
pub struct PrizeClaimed {
    pub round_id: u64,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Accounts required for claiming a round's prize.
///
/// Ensures:
/// 1. The round has been finalized.
/// 2. Only the owner of the ticket book can claim it, once.
/// 3. Tokens move from the vault to the owner's token account.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ClaimPrize<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [TICKET_BOOK_SEED, round.key().as_ref(), claimant.key().as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Box<Account<'info, TicketBook>>,

    #[account(address = lottery.mint)]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = lottery.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The token account of the winner that will receive the prize.
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = claimant,
        associated_token::token_program = token_program,
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program for transferring tokens.
    pub token_program: Interface<'info, TokenInterface>,
}

/// Pays the owner every prize their tickets won in a finalized round.
///
/// Steps:
/// 1. Verify the round is finalized.
/// 2. Sum the frozen payout of each ticket's tier and mark the book claimed.
/// 3. Book the payout on the round, never exceeding its pot.
/// 4. Transfer the tokens from the vault, signed by the lottery PDA.
pub fn process_claim_prize(ctx: Context<ClaimPrize>, round_id: u64) -> Result<()> {
    ctx.accounts.round.ensure_claimable()?;

    let amount = ctx.accounts.ticket_book.claim(&ctx.accounts.round)?;
    ctx.accounts.round.record_payout(amount)?;

    let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[ctx.accounts.lottery.bump]]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.lottery.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    msg!(
        "Round {}: paid {} to {}",
        round_id,
        amount,
        ctx.accounts.claimant.key()
    );
    emit!(PrizeClaimed {
        round_id,
        owner: ctx.accounts.claimant.key(),
        amount,
    });
    Ok(())
}
