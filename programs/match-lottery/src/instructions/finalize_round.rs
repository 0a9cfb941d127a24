use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, PRIZE_TIERS, ROUND_SEED};
use crate::instructions::admin::RoundCreated;
use crate::state::{Lottery, Round};

/// Event emitted when a round's payouts are frozen
#[event]
pub struct RoundFinalized {
    pub round_id: u64,
    pub payout_per_ticket: [u64; PRIZE_TIERS],
    pub distributed: u64,
    /// Carried into the next activated round
    pub rollover: u64,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct FinalizeRound<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    /// The round play moves to. Created Pending here unless the operator
    /// already created it.
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, round_id.saturating_add(1).to_le_bytes().as_ref()],
        bump,
    )]
    pub next_round: Account<'info, Round>,

    pub system_program: Program<'info, System>,
}

/// Freezes per-tier payouts once every ticket has been tallied, rolls the
/// undistributed remainder over and moves play to the next round, opening
/// it as Pending when it did not exist yet.
pub fn process_finalize_round(ctx: Context<FinalizeRound>, round_id: u64) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let round = &mut ctx.accounts.round;
    lottery.ensure_operator(&ctx.accounts.authority.key())?;

    let table = round.finalize(&lottery.tier_shares_bps)?;
    if let Some(next_id) = lottery.close_round(round_id, table.remainder)? {
        ctx.accounts.next_round.open(next_id, ctx.bumps.next_round);
        msg!("Round {} created", next_id);
        emit!(RoundCreated { round_id: next_id });
    }

    msg!(
        "Round {} finalized: {} to winners, {} rolls over",
        round_id,
        table.distributed,
        table.remainder
    );
    emit!(RoundFinalized {
        round_id,
        payout_per_ticket: table.payout_per_ticket,
        distributed: table.distributed,
        rollover: table.remainder,
    });
    Ok(())
}
