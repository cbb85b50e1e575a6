use std::collections::BTreeMap;
use std::fmt;

use crate::agents::Agent;
use crate::game::tickets::{TicketBundle, TicketError};
use crate::graph::NodeId;
use crate::types::{Colour, Ticket};

/// Everything needed to seat one player.
///
/// `tickets` keeps the entries exactly as supplied so construction can tell
/// a missing ticket kind apart from a kind held zero times.
pub struct PlayerConfig {
    pub colour: Colour,
    pub agent: Box<dyn Agent>,
    pub location: NodeId,
    pub tickets: BTreeMap<Ticket, u32>,
}

impl PlayerConfig {
    pub fn new(
        colour: Colour,
        agent: impl Agent + 'static,
        location: NodeId,
        tickets: impl IntoIterator<Item = (Ticket, u32)>,
    ) -> Self {
        Self {
            colour,
            agent: Box::new(agent),
            location,
            tickets: tickets.into_iter().collect(),
        }
    }
}

impl fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("colour", &self.colour)
            .field("location", &self.location)
            .field("tickets", &self.tickets)
            .finish_non_exhaustive()
    }
}

pub struct Player {
    pub colour: Colour,
    pub location: NodeId,
    pub tickets: TicketBundle,
    // Taken out while the agent is being asked for a move.
    agent: Option<Box<dyn Agent>>,
}

impl Player {
    pub(crate) fn from_config(config: PlayerConfig) -> Self {
        Self {
            colour: config.colour,
            location: config.location,
            tickets: config.tickets.into_iter().collect(),
            agent: Some(config.agent),
        }
    }

    pub fn is_mr_x(&self) -> bool {
        self.colour.is_mr_x()
    }

    pub fn is_detective(&self) -> bool {
        self.colour.is_detective()
    }

    pub fn has_tickets(&self, ticket: Ticket) -> bool {
        self.tickets.has(ticket)
    }

    pub fn has_at_least(&self, ticket: Ticket, amount: u32) -> bool {
        self.tickets.has_at_least(ticket, amount)
    }

    pub fn add_ticket(&mut self, ticket: Ticket) {
        self.tickets.add(ticket, 1);
    }

    pub fn remove_ticket(&mut self, ticket: Ticket) -> Result<(), TicketError> {
        self.tickets.subtract(ticket, 1)
    }

    pub(crate) fn take_agent(&mut self) -> Option<Box<dyn Agent>> {
        self.agent.take()
    }

    pub(crate) fn restore_agent(&mut self, agent: Box<dyn Agent>) {
        self.agent = Some(agent);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("colour", &self.colour)
            .field("location", &self.location)
            .field("tickets", &self.tickets)
            .finish_non_exhaustive()
    }
}
