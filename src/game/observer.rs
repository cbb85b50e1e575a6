use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::game::moves::Move;
use crate::game::state::{GameError, GameEvent, ScotlandYardModel};
use crate::types::Colour;

pub type ObserverResult = Result<(), ObserverError>;

/// Watches a game as it unfolds.
///
/// Callbacks run synchronously after the engine has committed the step that
/// produced them. Every callback defaults to doing nothing. An `Err` stops
/// delivery of that event and is handed back to whoever drove the engine.
pub trait Observer {
    fn on_round_started(&self, _game: &ScotlandYardModel, _round: usize) -> ObserverResult {
        Ok(())
    }

    fn on_move_made(&self, _game: &ScotlandYardModel, _mv: &Move) -> ObserverResult {
        Ok(())
    }

    fn on_rotation_complete(&self, _game: &ScotlandYardModel) -> ObserverResult {
        Ok(())
    }

    fn on_game_over(&self, _game: &ScotlandYardModel, _winners: &BTreeSet<Colour>) -> ObserverResult {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("observer failed: {message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Observers in registration order, compared by identity.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Rc<dyn Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Rc<dyn Observer>) -> Result<(), GameError> {
        if self.contains(&observer) {
            return Err(GameError::DuplicateObserver);
        }
        self.observers.push(observer);
        Ok(())
    }

    pub fn unregister(&mut self, observer: &Rc<dyn Observer>) -> Result<(), GameError> {
        let idx = self
            .position(observer)
            .ok_or(GameError::UnknownObserver)?;
        self.observers.remove(idx);
        Ok(())
    }

    pub fn contains(&self, observer: &Rc<dyn Observer>) -> bool {
        self.position(observer).is_some()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn dispatch(&self, game: &ScotlandYardModel, event: &GameEvent) -> ObserverResult {
        for observer in &self.observers {
            match event {
                GameEvent::RoundStarted { round } => observer.on_round_started(game, *round)?,
                GameEvent::MoveMade { mv } => observer.on_move_made(game, mv)?,
                GameEvent::RotationComplete => observer.on_rotation_complete(game)?,
                GameEvent::GameOver { winners } => observer.on_game_over(game, winners)?,
            }
        }
        Ok(())
    }

    fn position(&self, observer: &Rc<dyn Observer>) -> Option<usize> {
        self.observers
            .iter()
            .position(|o| std::ptr::addr_eq(Rc::as_ptr(o), Rc::as_ptr(observer)))
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.observers.len())
            .finish()
    }
}

/// Forwards every callback to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn on_round_started(&self, _game: &ScotlandYardModel, round: usize) -> ObserverResult {
        tracing::info!(round, "round started");
        Ok(())
    }

    fn on_move_made(&self, game: &ScotlandYardModel, mv: &Move) -> ObserverResult {
        tracing::info!(round = game.current_round(), %mv, "move made");
        Ok(())
    }

    fn on_rotation_complete(&self, game: &ScotlandYardModel) -> ObserverResult {
        tracing::info!(round = game.current_round(), "rotation complete");
        Ok(())
    }

    fn on_game_over(&self, game: &ScotlandYardModel, winners: &BTreeSet<Colour>) -> ObserverResult {
        tracing::info!(round = game.current_round(), ?winners, "game over");
        Ok(())
    }
}
