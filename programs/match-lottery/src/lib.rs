use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod number_set;
pub mod prize;
pub mod state;

use constants::{NUMBERS_PER_TICKET, PRIZE_TIERS};
use state::RoundInfo;

declare_id!("5G2b4ZAV8tBT6TPtX1emZEkRcTxywyWR2zEjZP9ggtBQ");

#[program]
pub mod match_lottery {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        oracle: Pubkey,
        tier_shares_bps: [u16; PRIZE_TIERS],
    ) -> Result<()> {
        process_initialize(ctx, oracle, tier_shares_bps)
    }

    pub fn set_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
        process_set_oracle(ctx, oracle)
    }

    pub fn create_round(ctx: Context<CreateRound>) -> Result<()> {
        process_create_round(ctx)
    }

    pub fn set_price(ctx: Context<ConfigureRound>, round_id: u64, price: u64) -> Result<()> {
        process_set_price(ctx, round_id, price)
    }

    pub fn activate_lottery(
        ctx: Context<ConfigureRound>,
        round_id: u64,
        price: u64,
        open_time: i64,
        close_time: i64,
    ) -> Result<()> {
        process_activate_lottery(ctx, round_id, price, open_time, close_time)
    }

    pub fn buy_tickets(
        ctx: Context<BuyTickets>,
        selections: Vec<[u8; NUMBERS_PER_TICKET]>,
    ) -> Result<()> {
        process_buy_tickets(ctx, selections)
    }

    pub fn draw(
        ctx: Context<Draw>,
        round_id: u64,
        winning_numbers: [u8; NUMBERS_PER_TICKET],
    ) -> Result<()> {
        process_draw(ctx, round_id, winning_numbers)
    }

    pub fn request_draw(ctx: Context<RequestDraw>, round_id: u64) -> Result<()> {
        process_request_draw(ctx, round_id)
    }

    pub fn fulfill_draw(ctx: Context<FulfillDraw>, round_id: u64) -> Result<()> {
        process_fulfill_draw(ctx, round_id)
    }

    pub fn tally_tickets(ctx: Context<TallyTickets>, round_id: u64) -> Result<()> {
        process_tally_tickets(ctx, round_id)
    }

    pub fn finalize_round(ctx: Context<FinalizeRound>, round_id: u64) -> Result<()> {
        process_finalize_round(ctx, round_id)
    }

    pub fn claim_prize(ctx: Context<ClaimPrize>, round_id: u64) -> Result<()> {
        process_claim_prize(ctx, round_id)
    }

    pub fn current_round(ctx: Context<LotteryView>) -> Result<u64> {
        process_current_round(ctx)
    }

    pub fn round_info(ctx: Context<RoundView>, round_id: u64) -> Result<RoundInfo> {
        process_round_info(ctx, round_id)
    }

    pub fn get_user_tickets(
        ctx: Context<UserTicketsView>,
        round_id: u64,
        owner: Pubkey,
    ) -> Result<Vec<[u8; NUMBERS_PER_TICKET]>> {
        process_get_user_tickets(ctx, round_id, owner)
    }

    pub fn check_ticket_matching(
        ctx: Context<CheckTicketMatching>,
        a: u128,
        b: u128,
    ) -> Result<u8> {
        process_check_ticket_matching(ctx, a, b)
    }
}
