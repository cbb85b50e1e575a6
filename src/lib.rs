#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod agents;
pub mod cli;
pub mod config;
pub mod game;
pub mod graph;
pub mod types;

pub use agents::{Acceptor, Agent, FirstMoveAgent, PassiveAgent, RandomAgent};
pub use config::{MatchConfig, MatchConfigError, SeatConfig};
pub use game::{
    ConfigError, Game, GameError, GameEvent, Move, MoveSet, Observer, PlayerConfig, RoundSchedule,
    ScotlandYardModel,
};
pub use graph::{Graph, NodeId};
pub use types::{Colour, Ticket, Transport};
