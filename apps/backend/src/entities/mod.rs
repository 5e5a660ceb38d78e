//! Plain data records persisted through the store.

pub mod games;
pub mod hands;
pub mod players;
pub mod rounds;
pub mod teams;
pub mod tricks;

pub use games::Game;
pub use hands::Hand;
pub use players::Player;
pub use rounds::{GameRound, Round, OPENING_BID, PASS_BID};
pub use teams::{RoundTeam, Team, TeamPlayer};
pub use tricks::{Trick, TrickPlay};
