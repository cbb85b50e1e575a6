use crate::agents::{Acceptor, Agent};
use crate::game::{MoveSet, ScotlandYardModel};
use crate::graph::NodeId;

/// Always plays the smallest legal move, which makes games fully repeatable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMoveAgent;

impl Agent for FirstMoveAgent {
    fn make_move(&mut self, _: &ScotlandYardModel, _: NodeId, moves: &MoveSet, acceptor: Acceptor<'_>) {
        if let Some(mv) = moves.iter().min() {
            acceptor.accept(*mv);
        }
    }
}
