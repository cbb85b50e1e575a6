use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use scotland_yard::game::{
    DoubleMove, ErrorKind, GameEvent, ObserverError, ObserverResult, TicketMove,
};
use scotland_yard::{
    Acceptor, Agent, Colour, FirstMoveAgent, Game, GameError, Graph, Move, MoveSet, NodeId,
    Observer, PassiveAgent, PlayerConfig, ScotlandYardModel, Ticket, Transport,
};

const BLACK: Colour = Colour::Black;
const RED: Colour = Colour::Red;

fn mr_x(agent: impl Agent + 'static, location: NodeId, double: u32) -> PlayerConfig {
    PlayerConfig::new(
        BLACK,
        agent,
        location,
        [
            (Ticket::Taxi, 4),
            (Ticket::Bus, 3),
            (Ticket::Underground, 3),
            (Ticket::Secret, 0),
            (Ticket::Double, double),
        ],
    )
}

fn detective(colour: Colour, agent: impl Agent + 'static, location: NodeId) -> PlayerConfig {
    PlayerConfig::new(
        colour,
        agent,
        location,
        [(Ticket::Taxi, 11), (Ticket::Bus, 8), (Ticket::Underground, 4)],
    )
}

fn scripted(moves: Vec<Move>) -> impl Agent + 'static {
    let mut queue = VecDeque::from(moves);
    move |_: &ScotlandYardModel, _: NodeId, legal: &MoveSet, acceptor: Acceptor<'_>| {
        if let Some(mv) = queue.pop_front() {
            assert!(legal.contains(&mv), "scripted move {mv} is not legal");
            acceptor.accept(mv);
        }
    }
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<GameEvent>>,
}

impl Recorder {
    fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Observer for Recorder {
    fn on_round_started(&self, _: &ScotlandYardModel, round: usize) -> ObserverResult {
        self.events.borrow_mut().push(GameEvent::RoundStarted { round });
        Ok(())
    }

    fn on_move_made(&self, _: &ScotlandYardModel, mv: &Move) -> ObserverResult {
        self.events.borrow_mut().push(GameEvent::MoveMade { mv: *mv });
        Ok(())
    }

    fn on_rotation_complete(&self, _: &ScotlandYardModel) -> ObserverResult {
        self.events.borrow_mut().push(GameEvent::RotationComplete);
        Ok(())
    }

    fn on_game_over(&self, _: &ScotlandYardModel, winners: &BTreeSet<Colour>) -> ObserverResult {
        self.events.borrow_mut().push(GameEvent::GameOver {
            winners: winners.clone(),
        });
        Ok(())
    }
}

fn moved(mv: Move) -> GameEvent {
    GameEvent::MoveMade { mv }
}

#[test]
fn detective_on_mr_x_start_is_an_immediate_capture() {
    let model = ScotlandYardModel::new(
        vec![false],
        Graph::from_edges(&[(1, 2, Transport::Taxi)]),
        mr_x(PassiveAgent, 1, 2),
        vec![detective(RED, PassiveAgent, 1)],
    )
    .unwrap();
    assert!(model.is_game_over());
    assert_eq!(model.winners(), &BTreeSet::from([RED]));
}

#[test]
fn mr_x_hides_until_a_reveal_round() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (3, 4, Transport::Taxi)]);
    let mut model = ScotlandYardModel::new(
        vec![false, true],
        graph,
        mr_x(
            scripted(vec![
                Move::ticket(BLACK, Ticket::Taxi, 2),
                Move::ticket(BLACK, Ticket::Taxi, 1),
            ]),
            1,
            0,
        ),
        vec![detective(
            RED,
            scripted(vec![
                Move::ticket(RED, Ticket::Taxi, 4),
                Move::ticket(RED, Ticket::Taxi, 3),
            ]),
            3,
        )],
    )
    .unwrap();
    let recorder = Rc::new(Recorder::default());
    model.register_observer(recorder.clone()).unwrap();

    model.start_rotation().unwrap();
    assert_eq!(model.current_round(), 1);
    assert_eq!(model.player_location(BLACK), Some(0));
    assert_eq!(
        recorder.take(),
        vec![
            GameEvent::RoundStarted { round: 1 },
            moved(Move::ticket(BLACK, Ticket::Taxi, 0)),
            moved(Move::ticket(RED, Ticket::Taxi, 4)),
            GameEvent::RotationComplete,
        ]
    );

    model.start_rotation().unwrap();
    assert_eq!(model.player_location(BLACK), Some(1));
    assert_eq!(
        recorder.take(),
        vec![
            GameEvent::RoundStarted { round: 2 },
            moved(Move::ticket(BLACK, Ticket::Taxi, 1)),
            moved(Move::ticket(RED, Ticket::Taxi, 3)),
            GameEvent::GameOver {
                winners: BTreeSet::from([BLACK])
            },
        ]
    );
}

#[test]
fn double_move_on_reveal_boundary() {
    let graph = Graph::from_edges(&[
        (1, 2, Transport::Taxi),
        (2, 3, Transport::Bus),
        (7, 8, Transport::Taxi),
    ]);
    let double = Move::double(
        BLACK,
        TicketMove::new(BLACK, Ticket::Taxi, 2),
        TicketMove::new(BLACK, Ticket::Bus, 3),
    );
    let mut model = ScotlandYardModel::new(
        vec![true, false],
        graph,
        mr_x(PassiveAgent, 1, 1),
        vec![detective(RED, PassiveAgent, 7)],
    )
    .unwrap();
    let recorder = Rc::new(Recorder::default());
    model.register_observer(recorder.clone()).unwrap();

    model.start_rotation().unwrap();
    assert!(model.valid_moves().contains(&double));
    model.accept(double).unwrap();

    assert_eq!(model.player_tickets(BLACK, Ticket::Double), Some(0));
    assert_eq!(model.player_tickets(BLACK, Ticket::Taxi), Some(3));
    assert_eq!(model.player_tickets(BLACK, Ticket::Bus), Some(2));
    assert_eq!(model.current_round(), 2);
    assert_eq!(model.player_location(BLACK), Some(2));

    let public = Move::Double(DoubleMove::new(
        BLACK,
        TicketMove::new(BLACK, Ticket::Taxi, 2),
        TicketMove::new(BLACK, Ticket::Bus, 2),
    ));
    assert_eq!(
        recorder.take(),
        vec![
            moved(public),
            GameEvent::RoundStarted { round: 1 },
            moved(Move::ticket(BLACK, Ticket::Taxi, 2)),
            GameEvent::RoundStarted { round: 2 },
            moved(Move::ticket(BLACK, Ticket::Bus, 2)),
        ]
    );
}

#[test]
fn isolated_mr_x_loses_before_moving() {
    let mut graph = Graph::from_edges(&[(2, 3, Transport::Taxi)]);
    graph.add_node(1);
    let mut model = ScotlandYardModel::new(
        vec![false, false],
        graph,
        mr_x(PassiveAgent, 1, 2),
        vec![detective(RED, PassiveAgent, 2)],
    )
    .unwrap();
    assert!(model.is_game_over());
    assert_eq!(model.winners(), &BTreeSet::from([RED]));
    assert_eq!(model.current_round(), 0);
    assert_eq!(model.start_rotation().unwrap_err().kind(), ErrorKind::State);
}

#[test]
fn mr_x_survives_every_round() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (4, 5, Transport::Taxi)]);
    let model = ScotlandYardModel::new(
        vec![false; 3],
        graph,
        mr_x(FirstMoveAgent, 1, 0),
        vec![detective(RED, FirstMoveAgent, 4)],
    )
    .unwrap();
    let mut game = Game::new(model);
    let winners = game.play().unwrap();

    assert_eq!(winners, BTreeSet::from([BLACK]));
    assert_eq!(game.rotations, 3);
    assert_eq!(game.model.current_round(), 3);
    // Every detective ticket ends up with Mr X.
    assert_eq!(game.model.player_tickets(BLACK, Ticket::Taxi), Some(4));
    assert_eq!(game.model.player_tickets(RED, Ticket::Taxi), Some(8));
}

#[test]
fn host_answers_for_passive_agents() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (4, 5, Transport::Bus)]);
    let mut model = ScotlandYardModel::new(
        vec![false; 4],
        graph,
        mr_x(PassiveAgent, 1, 0),
        vec![detective(RED, PassiveAgent, 4)],
    )
    .unwrap();

    model.start_rotation().unwrap();
    assert_eq!(model.awaiting_player(), Some(BLACK));
    let err = model.accept(Move::ticket(RED, Ticket::Bus, 5)).unwrap_err();
    assert!(matches!(err, GameError::InvalidMove { .. }));

    model.accept(Move::ticket(BLACK, Ticket::Taxi, 2)).unwrap();
    assert_eq!(model.awaiting_player(), Some(RED));
    assert_eq!(model.current_player(), RED);
    model.accept(Move::ticket(RED, Ticket::Bus, 5)).unwrap();

    assert_eq!(model.awaiting_player(), None);
    assert_eq!(model.current_player(), BLACK);
    assert_eq!(model.player_tickets(BLACK, Ticket::Bus), Some(4));
    assert!(matches!(
        model.accept(Move::ticket(BLACK, Ticket::Taxi, 1)),
        Err(GameError::NoPendingMove)
    ));
}

struct Snooper {
    seen: RefCell<Vec<(Colour, Option<u32>)>>,
}

impl Observer for Snooper {
    fn on_move_made(&self, game: &ScotlandYardModel, mv: &Move) -> ObserverResult {
        if mv.colour() == RED {
            self.seen
                .borrow_mut()
                .push((game.current_player(), game.player_tickets(BLACK, Ticket::Taxi)));
        }
        Ok(())
    }
}

#[test]
fn observers_see_committed_state() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (4, 5, Transport::Taxi)]);
    let mut model = ScotlandYardModel::new(
        vec![false; 4],
        graph,
        mr_x(PassiveAgent, 1, 0),
        vec![detective(RED, PassiveAgent, 4)],
    )
    .unwrap();
    let snooper = Rc::new(Snooper {
        seen: RefCell::new(Vec::new()),
    });
    model.register_observer(snooper.clone()).unwrap();

    model.start_rotation().unwrap();
    model.accept(Move::ticket(BLACK, Ticket::Taxi, 2)).unwrap();
    model.accept(Move::ticket(RED, Ticket::Taxi, 5)).unwrap();

    assert_eq!(snooper.seen.borrow().as_slice(), &[(BLACK, Some(4))]);
}

#[test]
fn unregistered_observers_stop_hearing() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (4, 5, Transport::Taxi)]);
    let mut model = ScotlandYardModel::new(
        vec![false; 4],
        graph,
        mr_x(PassiveAgent, 1, 0),
        vec![detective(RED, PassiveAgent, 4)],
    )
    .unwrap();
    let recorder = Rc::new(Recorder::default());
    let handle: Rc<dyn Observer> = recorder.clone();
    model.register_observer(Rc::clone(&handle)).unwrap();
    assert_eq!(
        model.register_observer(Rc::clone(&handle)).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );

    model.start_rotation().unwrap();
    model.accept(Move::ticket(BLACK, Ticket::Taxi, 2)).unwrap();
    assert_eq!(recorder.take().len(), 2);

    model.unregister_observer(&handle).unwrap();
    model.accept(Move::ticket(RED, Ticket::Taxi, 5)).unwrap();
    assert!(recorder.take().is_empty());
    assert!(matches!(
        model.unregister_observer(&handle),
        Err(GameError::UnknownObserver)
    ));
}

struct FailOnRotation;

impl Observer for FailOnRotation {
    fn on_rotation_complete(&self, _: &ScotlandYardModel) -> ObserverResult {
        Err(ObserverError::new("disk full"))
    }
}

#[test]
fn observer_failure_reaches_the_host() {
    let graph = Graph::from_edges(&[(1, 2, Transport::Taxi), (4, 5, Transport::Taxi)]);
    let mut model = ScotlandYardModel::new(
        vec![false; 4],
        graph,
        mr_x(scripted(vec![Move::ticket(BLACK, Ticket::Taxi, 2)]), 1, 0),
        vec![detective(RED, scripted(vec![Move::ticket(RED, Ticket::Taxi, 5)]), 4)],
    )
    .unwrap();
    model.register_observer(Rc::new(FailOnRotation)).unwrap();

    let err = model.start_rotation().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Observer);
    assert_eq!(err.to_string(), "observer failed: disk full");
    assert_eq!(model.current_round(), 1);
    assert_eq!(model.current_player(), BLACK);
}
