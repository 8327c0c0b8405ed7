//! Game rules for Connect Four.
//!
//! Pure functions over a [`Board`](super::Board). The board delegates its
//! queries here so the rules can be tested without any session machinery.

pub mod draw;
pub mod gravity;
pub mod win;

pub use draw::is_full;
pub use gravity::lowest_open;
pub use win::check_winner;
