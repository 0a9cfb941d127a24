use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::constants::{NUMBERS_PER_TICKET, NUMBER_RANGE};
use crate::error::LotteryError;

/// Bits that may be set in a well-formed mask, one per value in `0..NUMBER_RANGE`.
const RANGE_MASK: u128 = if NUMBER_RANGE as u32 >= u128::BITS {
    u128::MAX
} else {
    (1u128 << NUMBER_RANGE) - 1
};

/// A ticket selection (or the winning combination) stored as a bit-mask:
/// bit `n` is set when number `n` was chosen.
///
/// Two selections with the same numbers in a different order produce the
/// same mask, so equality and matching never depend on input order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub struct NumberSet {
    pub bits: u128,
}

impl NumberSet {
    /// Encodes caller-supplied numbers.
    ///
    /// Out-of-range values are rejected with `InvalidNumber` rather than
    /// folded into range, so a ticket can never match a number its buyer did
    /// not pick.
    pub fn encode(numbers: &[u8]) -> Result<Self> {
        require!(
            numbers.len() == NUMBERS_PER_TICKET,
            LotteryError::InvalidSelection
        );

        let mut bits = 0u128;
        for &number in numbers {
            require!(number < NUMBER_RANGE, LotteryError::InvalidNumber);
            let bit = 1u128 << number;
            require!(bits & bit == 0, LotteryError::DuplicateNumber);
            bits |= bit;
        }

        Ok(Self { bits })
    }

    /// Accepts an already encoded mask, e.g. one passed to a read-only query.
    pub fn from_bits(bits: u128) -> Result<Self> {
        require!(
            bits & !RANGE_MASK == 0 && bits.count_ones() as usize == NUMBERS_PER_TICKET,
            LotteryError::InvalidSelection
        );
        Ok(Self { bits })
    }

    /// Looser variant of `from_bits` for comparisons only: any mask of at
    /// most `NUMBERS_PER_TICKET` in-range numbers. A client encoding a
    /// selection with repeats ends up with fewer bits set.
    pub fn from_partial_bits(bits: u128) -> Result<Self> {
        require!(
            bits & !RANGE_MASK == 0 && bits.count_ones() as usize <= NUMBERS_PER_TICKET,
            LotteryError::InvalidSelection
        );
        Ok(Self { bits })
    }

    /// Derives a winning combination from 32 bytes of oracle randomness.
    ///
    /// Each pick mixes the running state with one 8-byte lane of the seed.
    /// A pick that lands on an already chosen number moves up to the next
    /// free one, wrapping at `NUMBER_RANGE`.
    pub fn from_randomness(seed: &[u8; 32]) -> Self {
        let range = NUMBER_RANGE as u64;
        let mut state = u64::from_le_bytes(*array_ref![seed, 0, 8]);
        let mut bits = 0u128;

        for pick in 0..NUMBERS_PER_TICKET {
            let lane = u64::from_le_bytes(*array_ref![seed, (pick % 4) * 8, 8]);
            state = mix(state, lane.wrapping_add(pick as u64));

            let mut candidate = state % range;
            while bits & (1u128 << candidate) != 0 {
                candidate = (candidate + 1) % range;
            }
            bits |= 1u128 << candidate;
        }

        Self { bits }
    }

    /// Chosen numbers in ascending order. Only used for display.
    pub fn numbers(&self) -> [u8; NUMBERS_PER_TICKET] {
        let mut out = [0u8; NUMBERS_PER_TICKET];
        let mut rest = self.bits;
        for slot in out.iter_mut() {
            if rest == 0 {
                break;
            }
            *slot = rest.trailing_zeros() as u8;
            rest &= rest - 1;
        }
        out
    }
}

/// Count of numbers present in both selections.
#[inline]
pub fn match_count(a: &NumberSet, b: &NumberSet) -> u8 {
    (a.bits & b.bits).count_ones() as u8
}

/// splitmix64 finalizer
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
