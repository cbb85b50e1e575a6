//! Legal move generation.
//!
//! A [`Board`] is a snapshot of everything the rules need to decide which
//! moves a player may make: the graph, where the detectives stand, and how
//! many rounds remain.

use std::collections::HashSet;

use crate::game::moves::{Move, MoveSet, TicketMove};
use crate::game::rounds::RoundSchedule;
use crate::game::tickets::TicketBundle;
use crate::graph::{Graph, NodeId};
use crate::types::{Colour, Ticket};

pub struct Board<'a> {
    pub graph: &'a Graph,
    pub rounds: &'a RoundSchedule,
    pub current_round: usize,
    pub detective_locations: HashSet<NodeId>,
}

impl<'a> Board<'a> {
    pub fn new(
        graph: &'a Graph,
        rounds: &'a RoundSchedule,
        current_round: usize,
        detective_locations: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        Self {
            graph,
            rounds,
            current_round,
            detective_locations: detective_locations.into_iter().collect(),
        }
    }

    fn is_occupied(&self, node: NodeId) -> bool {
        self.detective_locations.contains(&node)
    }

    /// Every move `colour` may make from `location` holding `tickets`.
    ///
    /// Detectives with nowhere to go get a single pass. Mr X never passes, so
    /// an empty set means he is stuck.
    pub fn legal_moves(&self, colour: Colour, location: NodeId, tickets: &TicketBundle) -> MoveSet {
        let singles = self.single_moves(colour, location, tickets);
        let mut moves: MoveSet = singles.iter().copied().map(Move::Ticket).collect();

        if colour.is_detective() {
            if moves.is_empty() {
                moves.insert(Move::pass(colour));
            }
            return moves;
        }

        if tickets.has(Ticket::Double) && self.rounds.has_rounds_after(self.current_round, 2) {
            for first in &singles {
                moves.extend(self.double_moves(colour, *first, tickets));
            }
        }
        moves
    }

    fn single_moves(
        &self,
        colour: Colour,
        location: NodeId,
        tickets: &TicketBundle,
    ) -> Vec<TicketMove> {
        let mut singles = Vec::new();
        for edge in self.graph.edges_from(location) {
            let destination = edge.destination;
            if self.is_occupied(destination) {
                continue;
            }
            let ticket = Ticket::from_transport(edge.transport);
            if tickets.has(ticket) {
                singles.push(TicketMove::new(colour, ticket, destination));
            }
            if colour.is_mr_x() && ticket != Ticket::Secret && tickets.has(Ticket::Secret) {
                singles.push(TicketMove::new(colour, Ticket::Secret, destination));
            }
        }
        singles
    }

    fn double_moves(&self, colour: Colour, first: TicketMove, tickets: &TicketBundle) -> Vec<Move> {
        let remaining = tickets.after_spending(first.ticket);
        self.single_moves(colour, first.destination, &remaining)
            .into_iter()
            .map(|second| Move::double(colour, first, second))
            .collect()
    }
}
