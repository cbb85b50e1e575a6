pub mod game;
pub mod generator;
pub mod moves;
pub mod observer;
pub mod players;
pub mod rounds;
pub mod state;
pub mod tickets;

pub use game::Game;
pub use generator::Board;
pub use moves::{DoubleMove, Move, MoveSet, TicketMove};
pub use observer::{LoggingObserver, Observer, ObserverError, ObserverRegistry, ObserverResult};
pub use players::{Player, PlayerConfig};
pub use rounds::{RoundSchedule, STANDARD_REVEAL_ROUNDS, STANDARD_ROUND_COUNT};
pub use state::{ConfigError, ErrorKind, GameError, GameEvent, ScotlandYardModel};
pub use tickets::{TicketBundle, TicketError};
