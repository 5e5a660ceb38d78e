//! WebSocket adapter: session actors, the game hub, and the wire protocol.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::{Broadcaster, ClientSocket, GameHub, Outbound};
pub use protocol::{ClientMessage, ServerMessage};
