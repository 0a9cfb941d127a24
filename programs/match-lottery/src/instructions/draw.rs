use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, NUMBERS_PER_TICKET, ROUND_SEED};
use crate::instructions::fulfill_draw::RoundDrawn;
use crate::number_set::NumberSet;
use crate::state::{Lottery, Round};

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct Draw<'info> {
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
}

/// Records a winning selection supplied directly by the operator or oracle.
pub fn process_draw(
    ctx: Context<Draw>,
    round_id: u64,
    winning_numbers: [u8; NUMBERS_PER_TICKET],
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .lottery
        .ensure_draw_authority(&ctx.accounts.authority.key())?;

    let winning = NumberSet::encode(&winning_numbers)?;
    ctx.accounts.round.draw(winning, clock.unix_timestamp)?;

    msg!("Round {} drawn: {:?}", round_id, winning.numbers());
    emit!(RoundDrawn {
        round_id,
        winning_numbers: winning.numbers(),
        from_oracle: false,
    });
    Ok(())
}
