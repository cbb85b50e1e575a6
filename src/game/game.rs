use std::collections::BTreeSet;

use uuid::Uuid;

use crate::game::state::{GameError, ScotlandYardModel};
use crate::types::Colour;

/// Drives a model whose agents all answer on their own.
pub struct Game {
    pub id: Uuid,
    pub rotations: u32,
    pub model: ScotlandYardModel,
}

impl Game {
    pub fn new(model: ScotlandYardModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            rotations: 0,
            model,
        }
    }

    /// Runs rotations until the game ends and returns the winners.
    ///
    /// Fails with [`GameError::AgentStalled`] if an agent returns without
    /// accepting a legal move, since nobody else is around to answer for it.
    pub fn play(&mut self) -> Result<BTreeSet<Colour>, GameError> {
        let span = tracing::debug_span!("game", id = %self.id);
        let _guard = span.enter();
        while !self.model.is_game_over() {
            self.play_rotation()?;
        }
        Ok(self.model.winners().clone())
    }

    pub fn play_rotation(&mut self) -> Result<(), GameError> {
        self.model.start_rotation()?;
        if let Some(colour) = self.model.awaiting_player() {
            return Err(GameError::AgentStalled(colour));
        }
        self.rotations += 1;
        Ok(())
    }

    pub fn mr_x_won(&self) -> bool {
        self.model.winners().contains(&Colour::MR_X)
    }
}
