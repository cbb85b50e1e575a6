use crate::game::{Move, MoveSet, ScotlandYardModel};
use crate::graph::NodeId;
use crate::types::Colour;

/// Something that chooses a move when the engine asks for one.
///
/// The engine calls `make_move` with the legal moves for the player whose
/// turn it is. The agent answers by consuming the [`Acceptor`]. An agent that
/// returns without accepting leaves the game suspended; the host must then
/// answer through [`ScotlandYardModel::accept`].
pub trait Agent {
    fn make_move(
        &mut self,
        game: &ScotlandYardModel,
        location: NodeId,
        moves: &MoveSet,
        acceptor: Acceptor<'_>,
    );
}

impl<F> Agent for F
where
    F: FnMut(&ScotlandYardModel, NodeId, &MoveSet, Acceptor<'_>),
{
    fn make_move(
        &mut self,
        game: &ScotlandYardModel,
        location: NodeId,
        moves: &MoveSet,
        acceptor: Acceptor<'_>,
    ) {
        self(game, location, moves, acceptor)
    }
}

/// One-shot capability to answer a single move request.
pub struct Acceptor<'a> {
    colour: Colour,
    reply: &'a mut Option<Move>,
}

impl<'a> Acceptor<'a> {
    pub(crate) fn new(colour: Colour, reply: &'a mut Option<Move>) -> Self {
        Self { colour, reply }
    }

    /// The player the request was made for.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn accept(self, mv: Move) {
        *self.reply = Some(mv);
    }
}

/// Never answers; the host feeds moves through `ScotlandYardModel::accept`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAgent;

impl Agent for PassiveAgent {
    fn make_move(&mut self, _: &ScotlandYardModel, _: NodeId, _: &MoveSet, _: Acceptor<'_>) {}
}
