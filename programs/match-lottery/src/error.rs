use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    #[msg("Only the lottery operator may perform this action")]
    Unauthorized,
    #[msg("Round is not accepting tickets")]
    RoundInactive,
    #[msg("Ticket number is outside the valid range")]
    InvalidNumber,
    #[msg("Ticket contains the same number twice")]
    DuplicateNumber,
    #[msg("Selection does not contain the required amount of numbers")]
    InvalidSelection,
    #[msg("Round has already been drawn")]
    AlreadyDrawn,
    #[msg("Round has already been finalized")]
    AlreadyFinalized,
    #[msg("Payment token balance or transfer is insufficient")]
    InsufficientPayment,
    #[msg("Prize for these tickets has already been claimed")]
    AlreadyClaimed,

    // --- round configuration ---
    #[msg("Ticket price must be greater than zero")]
    InvalidPrice,
    #[msg("Ticket price cannot change once sales have opened")]
    PriceLocked,
    #[msg("Sales window must open before it closes and close in the future")]
    InvalidSalesWindow,
    #[msg("Only the current round can be activated or settled")]
    RoundNotCurrent,
    #[msg("Prize tier shares exceed 100%")]
    InvalidPrizeShares,

    // --- purchases ---
    #[msg("Ticket count must be between 1 and the book capacity")]
    InvalidTicketCount,
    #[msg("Ticket book for this round is full")]
    TicketLimitExceeded,

    // --- draw ---
    #[msg("Sales window has not closed yet")]
    SalesStillOpen,
    #[msg("Randomness has already been requested for this round")]
    DrawAlreadyRequested,
    #[msg("No randomness request is pending for this round")]
    RandomnessNotRequested,
    #[msg("Invalid or empty randomness account")]
    InvalidRandomnessAccount,
    #[msg("Randomness has expired (not from previous slot)")]
    RandomnessExpired,
    #[msg("Randomness already revealed, cannot commit")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness account does not match committed account")]
    RandomnessMismatch,
    #[msg("Randomness not yet resolved by oracle")]
    RandomnessNotResolved,

    // --- settlement ---
    #[msg("Round has not been drawn yet")]
    RoundNotDrawn,
    #[msg("Ticket book has already been tallied")]
    AlreadyTallied,
    #[msg("Not every ticket of the round has been tallied")]
    TallyIncomplete,
    #[msg("Round has not been finalized yet")]
    RoundNotFinalized,
    #[msg("None of these tickets won a prize")]
    NoPrize,
    Overflow,
}
