use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;
use crate::types::{Colour, Ticket};

pub type MoveSet = HashSet<Move>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketMove {
    pub colour: Colour,
    pub ticket: Ticket,
    pub destination: NodeId,
}

impl TicketMove {
    pub const fn new(colour: Colour, ticket: Ticket, destination: NodeId) -> Self {
        Self {
            colour,
            ticket,
            destination,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoubleMove {
    pub colour: Colour,
    pub first: TicketMove,
    pub second: TicketMove,
}

impl DoubleMove {
    pub const fn new(colour: Colour, first: TicketMove, second: TicketMove) -> Self {
        Self {
            colour,
            first,
            second,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Ticket(TicketMove),
    Double(DoubleMove),
    Pass(Colour),
}

impl Move {
    pub const fn ticket(colour: Colour, ticket: Ticket, destination: NodeId) -> Self {
        Move::Ticket(TicketMove::new(colour, ticket, destination))
    }

    pub const fn double(colour: Colour, first: TicketMove, second: TicketMove) -> Self {
        Move::Double(DoubleMove::new(colour, first, second))
    }

    pub const fn pass(colour: Colour) -> Self {
        Move::Pass(colour)
    }

    pub const fn colour(&self) -> Colour {
        match self {
            Move::Ticket(m) => m.colour,
            Move::Double(m) => m.colour,
            Move::Pass(colour) => *colour,
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, Move::Pass(_))
    }
}

impl From<TicketMove> for Move {
    fn from(m: TicketMove) -> Self {
        Move::Ticket(m)
    }
}

impl From<DoubleMove> for Move {
    fn from(m: DoubleMove) -> Self {
        Move::Double(m)
    }
}

impl fmt::Display for TicketMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.colour, self.ticket, self.destination)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Ticket(m) => write!(f, "{m}"),
            Move::Double(m) => write!(
                f,
                "{} DOUBLE {} -> {}, {} -> {}",
                m.colour,
                m.first.ticket,
                m.first.destination,
                m.second.ticket,
                m.second.destination
            ),
            Move::Pass(colour) => write!(f, "{colour} PASS"),
        }
    }
}
