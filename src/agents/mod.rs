pub mod base;
pub mod first;
pub mod random;

pub use base::{Acceptor, Agent, PassiveAgent};
pub use first::FirstMoveAgent;
pub use random::RandomAgent;
