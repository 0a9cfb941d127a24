pub const LOTTERY_SEED: &[u8] = b"lottery";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ROUND_SEED: &[u8] = b"round";
pub const TICKET_BOOK_SEED: &[u8] = b"tickets";

/// How many numbers a ticket (and the winning combination) carries.
pub const NUMBERS_PER_TICKET: usize = 5;

/// Ticket numbers are drawn from `0..NUMBER_RANGE`. Must stay <= 128 so a
/// selection fits a `u128` mask.
pub const NUMBER_RANGE: u8 = 100;

/// One tier per possible match count, `0..=NUMBERS_PER_TICKET`.
pub const PRIZE_TIERS: usize = NUMBERS_PER_TICKET + 1;

/// Capacity of a single owner's ticket book in one round.
/// Keep in sync with the `max_len` on `TicketBook::selections`.
pub const MAX_TICKETS_PER_BOOK: usize = 100;

pub const BPS_DENOMINATOR: u64 = 10_000;
