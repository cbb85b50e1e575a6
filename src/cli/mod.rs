pub mod logging;
pub mod players;
pub mod stats;

pub use logging::{LogFormat, init_logging};
pub use players::{CLI_AGENTS, CliAgent, create_agent, print_agent_help};
pub use stats::{GameStats, StatisticsAccumulator};
