pub use lottery::*;
pub use round::*;
pub use ticket_book::*;

pub mod lottery;
pub mod round;
pub mod ticket_book;
