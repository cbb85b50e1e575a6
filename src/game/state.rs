use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::agents::Acceptor;
use crate::game::generator::Board;
use crate::game::moves::{DoubleMove, Move, MoveSet, TicketMove};
use crate::game::observer::{Observer, ObserverError, ObserverRegistry};
use crate::game::players::{Player, PlayerConfig};
use crate::game::rounds::RoundSchedule;
use crate::game::tickets::TicketError;
use crate::graph::{Graph, NodeId};
use crate::types::{Colour, Ticket};

/// Round value before Mr X has made his first move.
pub const NOT_STARTED: usize = 0;

/// Location reported for Mr X before his first reveal.
pub const UNREVEALED: NodeId = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: usize },
    MoveMade { mv: Move },
    RotationComplete,
    GameOver { winners: BTreeSet<Colour> },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("round schedule is empty")]
    EmptyRounds,
    #[error("graph is empty")]
    EmptyGraph,
    #[error("at least one detective is required")]
    NoDetectives,
    #[error("Mr X must play BLACK, got {0}")]
    MrXNotBlack(Colour),
    #[error("detectives cannot play BLACK")]
    DetectiveIsBlack,
    #[error("{colour} has no entry for {ticket} tickets")]
    MissingTicket { colour: Colour, ticket: Ticket },
    #[error("detective {colour} holds {count} {ticket} tickets")]
    ForbiddenTicket {
        colour: Colour,
        ticket: Ticket,
        count: u32,
    },
    #[error("colour {0} is used by more than one player")]
    DuplicateColour(Colour),
    #[error("location {0} is occupied by more than one player")]
    DuplicateLocation(NodeId),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("rotation in progress, waiting on {0}")]
    RotationInProgress(Colour),
    #[error("no move has been requested")]
    NoPendingMove,
    #[error("{0} did not answer its move request")]
    AgentStalled(Colour),
    #[error("illegal move: {mv}")]
    InvalidMove { mv: Move },
    #[error("observer is already registered")]
    DuplicateObserver,
    #[error("observer is not registered")]
    UnknownObserver,
    #[error(transparent)]
    Observer(#[from] ObserverError),
    #[error(transparent)]
    Tickets(#[from] TicketError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    State,
    InvalidMove,
    InvalidArgument,
    Observer,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::GameOver
            | GameError::RotationInProgress(_)
            | GameError::NoPendingMove
            | GameError::AgentStalled(_)
            | GameError::Tickets(_) => ErrorKind::State,
            GameError::InvalidMove { .. } => ErrorKind::InvalidMove,
            GameError::DuplicateObserver | GameError::UnknownObserver => {
                ErrorKind::InvalidArgument
            }
            GameError::Observer(_) => ErrorKind::Observer,
        }
    }
}

/// The authoritative state of one game.
///
/// Players are kept in rotation order: Mr X first, then the detectives in the
/// order they were supplied. A rotation is driven by [`start_rotation`] and
/// each reply is fed back through [`accept`], either by the agent's
/// [`Acceptor`] or by the host.
///
/// [`start_rotation`]: ScotlandYardModel::start_rotation
/// [`accept`]: ScotlandYardModel::accept
pub struct ScotlandYardModel {
    rounds: RoundSchedule,
    graph: Graph,
    players: Vec<Player>,
    order: Vec<Colour>,
    current: usize,
    current_round: usize,
    last_revealed_mr_x: NodeId,
    winners: BTreeSet<Colour>,
    game_over: bool,
    valid_moves: MoveSet,
    awaiting: Option<Colour>,
    observers: ObserverRegistry,
}

impl ScotlandYardModel {
    pub fn new(
        rounds: impl Into<RoundSchedule>,
        graph: Graph,
        mr_x: PlayerConfig,
        detectives: Vec<PlayerConfig>,
    ) -> Result<Self, ConfigError> {
        let rounds = rounds.into();
        if rounds.is_empty() {
            return Err(ConfigError::EmptyRounds);
        }
        if graph.is_empty() {
            return Err(ConfigError::EmptyGraph);
        }
        validate_mr_x(&mr_x)?;
        if detectives.is_empty() {
            return Err(ConfigError::NoDetectives);
        }

        // A detective starting on Mr X's node is a capture, not a clash.
        let mut colours = HashSet::from([mr_x.colour]);
        let mut locations = HashSet::new();
        for detective in &detectives {
            validate_detective(detective)?;
            if !colours.insert(detective.colour) {
                return Err(ConfigError::DuplicateColour(detective.colour));
            }
            if !locations.insert(detective.location) {
                return Err(ConfigError::DuplicateLocation(detective.location));
            }
        }

        let players: Vec<Player> = std::iter::once(mr_x)
            .chain(detectives)
            .map(Player::from_config)
            .collect();
        let order = players.iter().map(|p| p.colour).collect();

        let mut model = Self {
            rounds,
            graph,
            players,
            order,
            current: 0,
            current_round: NOT_STARTED,
            last_revealed_mr_x: UNREVEALED,
            winners: BTreeSet::new(),
            game_over: false,
            valid_moves: MoveSet::new(),
            awaiting: None,
            observers: ObserverRegistry::new(),
        };
        model.evaluate_game_over();
        Ok(model)
    }

    pub fn register_observer(&mut self, observer: Rc<dyn Observer>) -> Result<(), GameError> {
        self.observers.register(observer)?;
        tracing::trace!(observers = self.observers.len(), "observer registered");
        Ok(())
    }

    pub fn unregister_observer(&mut self, observer: &Rc<dyn Observer>) -> Result<(), GameError> {
        self.observers.unregister(observer)?;
        tracing::trace!(observers = self.observers.len(), "observer unregistered");
        Ok(())
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    /// Begins a rotation by asking Mr X's agent for a move.
    pub fn start_rotation(&mut self) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if let Some(colour) = self.awaiting {
            return Err(GameError::RotationInProgress(colour));
        }
        tracing::debug!(round = self.current_round, "rotation started");
        self.prepare_request();
        let reply = self.ask_current_agent();
        self.drive(reply)
    }

    /// Commits a reply to the outstanding move request.
    ///
    /// A rejected move leaves the game untouched. Once `mv` is committed, any
    /// agents that answer on the spot are played out too; an illegal answer
    /// from one of them is dropped and its request stays outstanding, so the
    /// result only reflects `mv` itself and the observers.
    pub fn accept(&mut self, mv: Move) -> Result<(), GameError> {
        let reply = self.accept_one(mv)?;
        self.drive(reply)
    }

    pub fn players(&self) -> &[Colour] {
        &self.order
    }

    pub fn current_player(&self) -> Colour {
        self.order[self.current]
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn rounds(&self) -> &RoundSchedule {
        &self.rounds
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn winners(&self) -> &BTreeSet<Colour> {
        &self.winners
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Moves offered to the player currently asked to move.
    pub fn valid_moves(&self) -> &MoveSet {
        &self.valid_moves
    }

    /// The player whose reply is outstanding, if any.
    pub fn awaiting_player(&self) -> Option<Colour> {
        self.awaiting
    }

    /// Public location: Mr X is reported at his last revealed node.
    pub fn player_location(&self, colour: Colour) -> Option<NodeId> {
        let player = self.player(colour)?;
        if player.is_mr_x() {
            Some(self.last_revealed_mr_x)
        } else {
            Some(player.location)
        }
    }

    pub fn player_tickets(&self, colour: Colour, ticket: Ticket) -> Option<u32> {
        self.player(colour).map(|p| p.tickets.get(ticket))
    }

    fn player(&self, colour: Colour) -> Option<&Player> {
        self.players.iter().find(|p| p.colour == colour)
    }

    fn mr_x(&self) -> &Player {
        &self.players[0]
    }

    fn mr_x_mut(&mut self) -> &mut Player {
        &mut self.players[0]
    }

    fn detectives(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players[1..].iter()
    }

    fn detective_colours(&self) -> BTreeSet<Colour> {
        self.detectives().map(|d| d.colour).collect()
    }

    fn board(&self) -> Board<'_> {
        Board::new(
            &self.graph,
            &self.rounds,
            self.current_round,
            self.detectives().map(|d| d.location),
        )
    }

    fn moves_for(&self, idx: usize) -> MoveSet {
        let player = &self.players[idx];
        self.board()
            .legal_moves(player.colour, player.location, &player.tickets)
    }

    fn prepare_request(&mut self) {
        self.valid_moves = self.moves_for(self.current);
        self.awaiting = Some(self.current_player());
    }

    fn ask_current_agent(&mut self) -> Option<Move> {
        let idx = self.current;
        let colour = self.players[idx].colour;
        let location = self.players[idx].location;
        let mut agent = self.players[idx].take_agent()?;
        let mut reply = None;
        agent.make_move(
            &*self,
            location,
            &self.valid_moves,
            Acceptor::new(colour, &mut reply),
        );
        self.players[idx].restore_agent(agent);
        reply
    }

    /// Commits replies from agents that answered synchronously.
    fn drive(&mut self, mut reply: Option<Move>) -> Result<(), GameError> {
        while let Some(mv) = reply {
            reply = match self.accept_one(mv) {
                Err(GameError::InvalidMove { mv }) => {
                    tracing::warn!(colour = %mv.colour(), %mv, "agent answered with an illegal move");
                    None
                }
                other => other?,
            };
        }
        Ok(())
    }

    fn accept_one(&mut self, mv: Move) -> Result<Option<Move>, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.awaiting.is_none() {
            return Err(GameError::NoPendingMove);
        }
        if !self.valid_moves.contains(&mv) {
            return Err(GameError::InvalidMove { mv });
        }
        self.awaiting = None;
        self.valid_moves.clear();

        let mut events = Vec::new();
        match mv {
            Move::Ticket(m) if m.colour.is_mr_x() => {
                self.commit_mr_x_leg(m, &mut events)?;
                self.advance_player();
            }
            Move::Double(m) => self.commit_double(m, &mut events)?,
            Move::Ticket(m) => self.commit_detective(m, &mut events)?,
            Move::Pass(colour) => {
                tracing::debug!(%colour, "detective passed");
                self.advance_player();
                events.push(GameEvent::MoveMade { mv });
            }
        }

        let mut ask_next = false;
        if self.game_over {
            events.push(self.game_over_event());
        } else if self.current_player().is_detective() {
            self.prepare_request();
            ask_next = true;
        } else if self.evaluate_game_over() {
            events.push(self.game_over_event());
        } else {
            tracing::debug!(round = self.current_round, "rotation complete");
            events.push(GameEvent::RotationComplete);
        }

        for event in &events {
            self.observers.dispatch(self, event)?;
        }
        Ok(if ask_next { self.ask_current_agent() } else { None })
    }

    fn commit_mr_x_leg(&mut self, m: TicketMove, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.mr_x_mut().remove_ticket(m.ticket)?;
        self.current_round += 1;
        self.mr_x_mut().location = m.destination;
        if self.rounds.is_reveal_round(self.current_round) {
            self.last_revealed_mr_x = m.destination;
        }
        tracing::debug!(
            round = self.current_round,
            ticket = %m.ticket,
            revealed = self.rounds.is_reveal_round(self.current_round),
            "mr x moved"
        );
        events.push(GameEvent::RoundStarted {
            round: self.current_round,
        });
        events.push(GameEvent::MoveMade {
            mv: Move::ticket(m.colour, m.ticket, self.last_revealed_mr_x),
        });
        Ok(())
    }

    fn commit_double(&mut self, m: DoubleMove, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let first_shown = if self.rounds.is_reveal_round(self.current_round + 1) {
            m.first.destination
        } else {
            self.last_revealed_mr_x
        };
        let second_shown = if self.rounds.is_reveal_round(self.current_round + 2) {
            m.second.destination
        } else {
            first_shown
        };
        self.mr_x_mut().remove_ticket(Ticket::Double)?;
        events.push(GameEvent::MoveMade {
            mv: Move::double(
                m.colour,
                TicketMove::new(m.colour, m.first.ticket, first_shown),
                TicketMove::new(m.colour, m.second.ticket, second_shown),
            ),
        });
        self.commit_mr_x_leg(m.first, events)?;
        self.commit_mr_x_leg(m.second, events)?;
        self.advance_player();
        Ok(())
    }

    fn commit_detective(&mut self, m: TicketMove, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let idx = self.current;
        self.players[idx].remove_ticket(m.ticket)?;
        self.mr_x_mut().add_ticket(m.ticket);
        self.players[idx].location = m.destination;
        tracing::debug!(
            colour = %m.colour,
            ticket = %m.ticket,
            destination = m.destination,
            "detective moved"
        );
        if self.mr_x_captured() {
            self.finish(self.detective_colours());
        }
        self.advance_player();
        events.push(GameEvent::MoveMade { mv: Move::Ticket(m) });
        Ok(())
    }

    fn advance_player(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    fn mr_x_captured(&self) -> bool {
        let hideout = self.mr_x().location;
        self.detectives().any(|d| d.location == hideout)
    }

    fn mr_x_stuck(&self) -> bool {
        self.current == 0 && self.moves_for(0).is_empty()
    }

    fn rounds_exhausted(&self) -> bool {
        self.current_round >= self.rounds.len()
    }

    fn detectives_stuck(&self) -> bool {
        (1..self.players.len()).all(|idx| {
            self.moves_for(idx)
                .iter()
                .all(|m| m.is_pass())
        })
    }

    /// Checks the terminal conditions in priority order, recording the
    /// winners of the first one that holds.
    fn evaluate_game_over(&mut self) -> bool {
        let winners = if self.mr_x_captured() || self.mr_x_stuck() {
            self.detective_colours()
        } else if self.rounds_exhausted() || self.detectives_stuck() {
            BTreeSet::from([Colour::MR_X])
        } else {
            return false;
        };
        self.finish(winners);
        true
    }

    fn finish(&mut self, winners: BTreeSet<Colour>) {
        tracing::info!(round = self.current_round, ?winners, "game over");
        self.winners = winners;
        self.game_over = true;
        self.awaiting = None;
        self.valid_moves.clear();
    }

    fn game_over_event(&self) -> GameEvent {
        GameEvent::GameOver {
            winners: self.winners.clone(),
        }
    }
}

impl fmt::Debug for ScotlandYardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScotlandYardModel")
            .field("players", &self.players)
            .field("current_player", &self.current_player())
            .field("current_round", &self.current_round)
            .field("last_revealed_mr_x", &self.last_revealed_mr_x)
            .field("winners", &self.winners)
            .field("awaiting", &self.awaiting)
            .finish_non_exhaustive()
    }
}

fn validate_mr_x(config: &PlayerConfig) -> Result<(), ConfigError> {
    if !config.colour.is_mr_x() {
        return Err(ConfigError::MrXNotBlack(config.colour));
    }
    for ticket in Ticket::iter() {
        if !config.tickets.contains_key(&ticket) {
            return Err(ConfigError::MissingTicket {
                colour: config.colour,
                ticket,
            });
        }
    }
    Ok(())
}

fn validate_detective(config: &PlayerConfig) -> Result<(), ConfigError> {
    if config.colour.is_mr_x() {
        return Err(ConfigError::DetectiveIsBlack);
    }
    for ticket in Ticket::DETECTIVE {
        if !config.tickets.contains_key(&ticket) {
            return Err(ConfigError::MissingTicket {
                colour: config.colour,
                ticket,
            });
        }
    }
    for ticket in [Ticket::Secret, Ticket::Double] {
        match config.tickets.get(&ticket) {
            Some(&count) if count > 0 => {
                return Err(ConfigError::ForbiddenTicket {
                    colour: config.colour,
                    ticket,
                    count,
                });
            }
            _ => {}
        }
    }
    Ok(())
}
