use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{LOTTERY_SEED, PRIZE_TIERS, ROUND_SEED, VAULT_SEED};
use crate::state::{Lottery, Round};

/// Event emitted when a round is created
#[event]
pub struct RoundCreated {
    pub round_id: u64,
}

/// Event emitted when a round's ticket price changes before sales open
#[event]
pub struct PriceSet {
    pub round_id: u64,
    pub price: u64,
}

/// Event emitted when a round opens for sales
#[event]
pub struct RoundActivated {
    pub round_id: u64,
    pub price: u64,
    pub open_time: i64,
    pub close_time: i64,
    /// Rollover from earlier rounds added to this round's pot
    pub carried_in: u64,
}

/// Accounts required to initialize the lottery configuration and its vault.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for account creation; becomes the operator.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The Lottery state account that stores configuration and round counters.
    #[account(
        init,
        payer = payer,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Round 0, created Pending so purchases fail cleanly until activation.
    #[account(
        init,
        payer = payer,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, 0u64.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// Payment token mint.
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token account holding every round's pool, owned by the lottery PDA.
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED],
        bump,
        token::mint = mint,
        token::authority = lottery,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Operator-only access to the lottery configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}

/// Accounts required to create the next round.
#[derive(Accounts)]
pub struct CreateRound<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = authority,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, lottery.next_round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to price or activate an existing round.
#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ConfigureRound<'info> {
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
}

/// Initializes the Lottery account, its token vault and the first round.
///
/// # Arguments
/// * `ctx` - Context holding the Initialize accounts
/// * `oracle` - Account allowed to draw besides the operator
/// * `tier_shares_bps` - Basis points of the pot paid per match count
pub fn process_initialize(
    ctx: Context<Initialize>,
    oracle: Pubkey,
    tier_shares_bps: [u16; PRIZE_TIERS],
) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.configure(
        ctx.bumps.lottery,
        ctx.bumps.vault,
        ctx.accounts.payer.key(),
        oracle,
        ctx.accounts.mint.key(),
        tier_shares_bps,
    )?;

    let round_id = lottery.allocate_round_id()?;
    ctx.accounts.round.open(round_id, ctx.bumps.round);

    msg!(
        "Lottery initialized: operator {}, oracle {}, mint {}",
        lottery.authority,
        lottery.oracle,
        lottery.mint
    );
    emit!(RoundCreated { round_id });
    Ok(())
}

pub fn process_set_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_operator(&ctx.accounts.authority.key())?;
    lottery.oracle = oracle;

    msg!("Oracle set to {}", oracle);
    Ok(())
}

/// Creates a Pending round with the next sequential id.
pub fn process_create_round(ctx: Context<CreateRound>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_operator(&ctx.accounts.authority.key())?;

    let round_id = lottery.allocate_round_id()?;
    ctx.accounts.round.open(round_id, ctx.bumps.round);

    msg!("Round {} created", round_id);
    emit!(RoundCreated { round_id });
    Ok(())
}

/// Changes the ticket price of a round that has not started selling.
pub fn process_set_price(ctx: Context<ConfigureRound>, round_id: u64, price: u64) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .lottery
        .ensure_operator(&ctx.accounts.authority.key())?;

    ctx.accounts.round.set_price(price, clock.unix_timestamp)?;

    msg!("Round {} price set to {}", round_id, price);
    emit!(PriceSet { round_id, price });
    Ok(())
}

/// Fixes the price and opens the sales window of the current round.
///
/// # Arguments
/// * `ctx` - Context holding the ConfigureRound accounts
/// * `round_id` - Must be the lottery's current round
/// * `price` - Ticket price in the payment token's smallest unit
/// * `open_time` - UNIX timestamp sales start
/// * `close_time` - UNIX timestamp sales end
pub fn process_activate_lottery(
    ctx: Context<ConfigureRound>,
    round_id: u64,
    price: u64,
    open_time: i64,
    close_time: i64,
) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;
    let round = &mut ctx.accounts.round;

    lottery.ensure_operator(&ctx.accounts.authority.key())?;
    lottery.ensure_current(round_id)?;
    round.activate(price, open_time, close_time, clock.unix_timestamp)?;

    let carried_in = lottery.take_rollover();
    round.carry_in(carried_in)?;

    msg!(
        "Round {} active: price {}, sales {}..{}, carried in {}",
        round_id,
        price,
        open_time,
        close_time,
        carried_in
    );
    emit!(RoundActivated {
        round_id,
        price,
        open_time,
        close_time,
        carried_in,
    });
    Ok(())
}
