use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{LOTTERY_SEED, NUMBERS_PER_TICKET, ROUND_SEED};
use crate::error::LotteryError;
use crate::number_set::NumberSet;
use crate::state::{Lottery, Round};

/// Event emitted when a round's winning selection is recorded
#[event]
pub struct RoundDrawn {
    pub round_id: u64,
    pub winning_numbers: [u8; NUMBERS_PER_TICKET],
    /// Whether the selection came from oracle randomness
    pub from_oracle: bool,
}

/// Accounts required to reveal a round's committed randomness.
///
/// Ensures:
/// 1. Only the operator or the oracle can complete the draw.
/// 2. The randomness account matches the one committed by `request_draw`.
/// 3. The round is still awaiting randomness (no replays).
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct FulfillDraw<'info> {
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

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_fulfill_draw(ctx: Context<FulfillDraw>, round_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .lottery
        .ensure_draw_authority(&ctx.accounts.authority.key())?;

    let randomness_account = ctx.accounts.randomness_account_data.key();
    let round = &mut ctx.accounts.round;
    round.ensure_awaiting(&randomness_account)?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessAccount)?;
    require!(
        randomness_data.seed_slot == round.commit_slot,
        LotteryError::RandomnessExpired
    );

    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| LotteryError::RandomnessNotResolved)?;

    let winning = NumberSet::from_randomness(&revealed_random_value);
    round.fulfill_randomness(&randomness_account, winning)?;

    msg!("Round {} drawn: {:?}", round_id, winning.numbers());
    emit!(RoundDrawn {
        round_id,
        winning_numbers: winning.numbers(),
        from_oracle: true,
    });
    Ok(())
}
