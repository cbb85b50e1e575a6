use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agents::Agent;
use crate::game::{ConfigError, PlayerConfig, RoundSchedule, ScotlandYardModel};
use crate::graph::{Graph, NodeId};
use crate::types::{Colour, Ticket};

/// Starting nodes on the demo map, in seating order.
const DEFAULT_DETECTIVE_LOCATIONS: [NodeId; 5] = [4, 8, 12, 16, 20];
const DEFAULT_MR_X_LOCATION: NodeId = 1;

#[derive(Debug, thiserror::Error)]
pub enum MatchConfigError {
    #[error("failed to read match config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse match config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub colour: Colour,
    pub location: NodeId,
    pub tickets: BTreeMap<Ticket, u32>,
}

impl SeatConfig {
    pub fn new(
        colour: Colour,
        location: NodeId,
        tickets: impl IntoIterator<Item = (Ticket, u32)>,
    ) -> Self {
        Self {
            colour,
            location,
            tickets: tickets.into_iter().collect(),
        }
    }

    pub fn standard_mr_x(location: NodeId, num_detectives: usize) -> Self {
        let secrets = u32::try_from(num_detectives).unwrap_or(u32::MAX);
        Self::new(
            Colour::MR_X,
            location,
            [
                (Ticket::Taxi, 4),
                (Ticket::Bus, 3),
                (Ticket::Underground, 3),
                (Ticket::Double, 2),
                (Ticket::Secret, secrets),
            ],
        )
    }

    pub fn standard_detective(colour: Colour, location: NodeId) -> Self {
        Self::new(
            colour,
            location,
            [(Ticket::Taxi, 11), (Ticket::Bus, 8), (Ticket::Underground, 4)],
        )
    }

    fn into_player(self, agent: Box<dyn Agent>) -> PlayerConfig {
        PlayerConfig {
            colour: self.colour,
            agent,
            location: self.location,
            tickets: self.tickets,
        }
    }
}

/// A serialisable description of one match, minus the graph and agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rounds: RoundSchedule,
    pub mr_x: SeatConfig,
    pub detectives: Vec<SeatConfig>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard(Colour::DETECTIVES.len())
    }
}

impl MatchConfig {
    /// The board game's setup with `num_detectives` detectives.
    pub fn standard(num_detectives: usize) -> Self {
        let detectives = Colour::DETECTIVES
            .iter()
            .zip(DEFAULT_DETECTIVE_LOCATIONS)
            .take(num_detectives)
            .map(|(&colour, location)| SeatConfig::standard_detective(colour, location))
            .collect::<Vec<_>>();
        Self {
            rounds: RoundSchedule::standard(),
            mr_x: SeatConfig::standard_mr_x(DEFAULT_MR_X_LOCATION, detectives.len()),
            detectives,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, MatchConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MatchConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, MatchConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Seats every player with an agent from `agent_for` and validates the match.
    pub fn build<F>(self, graph: Graph, mut agent_for: F) -> Result<ScotlandYardModel, ConfigError>
    where
        F: FnMut(Colour) -> Box<dyn Agent>,
    {
        let mr_x_agent = agent_for(self.mr_x.colour);
        let mr_x = self.mr_x.into_player(mr_x_agent);
        let detectives = self
            .detectives
            .into_iter()
            .map(|seat| {
                let agent = agent_for(seat.colour);
                seat.into_player(agent)
            })
            .collect();
        ScotlandYardModel::new(self.rounds, graph, mr_x, detectives)
    }
}
