use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{LOTTERY_SEED, ROUND_SEED};
use crate::error::LotteryError;
use crate::state::{Lottery, Round};

/// Event emitted when a round closes and waits for oracle randomness
#[event]
pub struct DrawRequested {
    pub round_id: u64,
    pub randomness_account: Pubkey,
    pub commit_slot: u64,
}

/// Accounts required to commit a randomness account for a round's draw.
///
/// Ensures:
/// 1. Only the operator or the oracle can commit the randomness.
/// 2. The randomness account is fresh and has not been revealed.
/// 3. The round's sales window has closed.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RequestDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
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

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// First half of an oracle draw. The client bundles the Switchboard commit
/// instruction with this one; `fulfill_draw` completes the draw once the
/// oracle has revealed.
pub fn process_request_draw(ctx: Context<RequestDraw>, round_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .lottery
        .ensure_draw_authority(&ctx.accounts.authority.key())?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessAccount)?;

    // Must be committed in the immediately previous slot
    require!(
        randomness_data.seed_slot == clock.slot.saturating_sub(1),
        LotteryError::RandomnessExpired
    );
    require!(
        randomness_data.get_value(&clock).is_err(),
        LotteryError::RandomnessAlreadyRevealed
    );

    let commit_slot = randomness_data.seed_slot;
    let randomness_account = ctx.accounts.randomness_account_data.key();
    ctx.accounts
        .round
        .request_randomness(randomness_account, commit_slot, clock.unix_timestamp)?;

    msg!(
        "Round {} closed, awaiting randomness from {} (slot {})",
        round_id,
        randomness_account,
        commit_slot
    );
    emit!(DrawRequested {
        round_id,
        randomness_account,
        commit_slot,
    });
    Ok(())
}
