pub mod admin;
pub mod buy_tickets;
pub mod claim_prize;
pub mod draw;
pub mod finalize_round;
pub mod fulfill_draw;
pub mod queries;
pub mod request_draw;
pub mod tally_tickets;

pub use admin::*;
pub use buy_tickets::*;
pub use claim_prize::*;
pub use draw::*;
pub use finalize_round::*;
pub use fulfill_draw::*;
pub use queries::*;
pub use request_draw::*;
pub use tally_tickets::*;
