use log::{debug, info};

use crate::ai::Agent;
use crate::error::PlayError;
use crate::game::{Board, GameOutcome, Player};

/// Moves and result of one finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord<M> {
    pub moves: Vec<M>,
    pub outcome: GameOutcome,
}

impl<M> GameRecord<M> {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Draw => None,
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Play `first` (X) against `second` (O) from the current position until
/// the game is over.
pub fn play_game<B: Board>(
    board: &mut B,
    first: &mut dyn Agent<B>,
    second: &mut dyn Agent<B>,
) -> Result<GameRecord<B::Move>, PlayError> {
    play_game_observed(board, first, second, |_, _, _| {})
}

/// Like [`play_game`], calling `observe` with the board, the mover and the
/// move after every move is applied.
pub fn play_game_observed<B, F>(
    board: &mut B,
    first: &mut dyn Agent<B>,
    second: &mut dyn Agent<B>,
    mut observe: F,
) -> Result<GameRecord<B::Move>, PlayError>
where
    B: Board,
    F: FnMut(&B, Player, B::Move),
{
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = board.outcome() {
            info!("game over after {} moves: {outcome:?}", moves.len());
            return Ok(GameRecord { moves, outcome });
        }

        let player = board.to_move();
        let agent: &mut dyn Agent<B> = match player {
            Player::X => &mut *first,
            Player::O => &mut *second,
        };

        let mv = agent.select_move(board).ok_or_else(|| PlayError::NoMove {
            agent: agent.name().to_string(),
            left: board.num_moves_left(),
        })?;
        if !board.do_move(mv) {
            return Err(PlayError::IllegalMove {
                agent: agent.name().to_string(),
                mv: format!("{mv:?}"),
            });
        }
        debug!("{} ({}) played {mv:?}", player.name(), agent.name());

        moves.push(mv);
        observe(board, player, mv);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ai::{RandomAgent, RandomPolicy, SearchAgent, SearchEngine, SearchParams, Variant};
    use crate::game::{Coord, FreeBoard, GravityBoard};

    /// Always plays the same cell.
    struct Stubborn(Coord);

    impl Agent<FreeBoard> for Stubborn {
        fn select_move(&mut self, _board: &mut FreeBoard) -> Option<Coord> {
            Some(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    /// Never finds a move.
    struct Silent;

    impl Agent<FreeBoard> for Silent {
        fn select_move(&mut self, _board: &mut FreeBoard) -> Option<Coord> {
            None
        }

        fn name(&self) -> &str {
            "Silent"
        }
    }

    fn solver() -> SearchAgent {
        SearchAgent::new(
            SearchEngine::seeded(0),
            SearchParams {
                variant: Variant::AlphaBeta,
                time_budget: Duration::from_secs(60),
                ..SearchParams::default()
            },
        )
    }

    #[test]
    fn test_random_game_terminates_with_valid_board() {
        for seed in 0..20 {
            let mut board = GravityBoard::new(6, 7, 4).unwrap();
            let mut x = RandomAgent::seeded(RandomPolicy::Uniform, seed);
            let mut o = RandomAgent::seeded(RandomPolicy::CenterWeighted, seed + 100);
            let record = play_game(&mut board, &mut x, &mut o).unwrap();

            assert!(board.is_valid());
            assert_eq!(record.len(), board.num_moves());
            assert_eq!(board.outcome(), Some(record.outcome));
            if record.outcome == GameOutcome::Draw {
                assert!(board.is_full());
            }
        }
    }

    #[test]
    fn test_solver_self_play_is_a_draw() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        let mut x = solver();
        let mut o = solver();
        let record = play_game(&mut board, &mut x, &mut o).unwrap();
        assert_eq!(record.outcome, GameOutcome::Draw);
        assert_eq!(record.len(), 9);
        assert_eq!(record.winner(), None);
    }

    #[test]
    fn test_solver_never_loses_to_random() {
        for seed in 0..10 {
            let mut board = FreeBoard::new(3, 3, 3).unwrap();
            let mut x = solver();
            let mut o = RandomAgent::seeded(RandomPolicy::Uniform, seed);
            let record = play_game(&mut board, &mut x, &mut o).unwrap();
            assert_ne!(record.winner(), Some(Player::O), "seed {seed}");
        }
    }

    #[test]
    fn test_observer_sees_every_move() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        let mut x = RandomAgent::seeded(RandomPolicy::Central, 0);
        let mut o = RandomAgent::seeded(RandomPolicy::Uniform, 1);
        let mut seen = Vec::new();
        let record = play_game_observed(&mut board, &mut x, &mut o, |b, player, mv| {
            assert_eq!(b.turn(), player);
            seen.push(mv);
        })
        .unwrap();
        assert_eq!(seen, record.moves);
        assert_eq!(seen[0], Coord::new(1, 1));
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        let mut x = Stubborn(Coord::new(0, 0));
        let mut o = Stubborn(Coord::new(0, 0));
        let err = play_game(&mut board, &mut x, &mut o).unwrap_err();
        assert_eq!(
            err,
            PlayError::IllegalMove {
                agent: "Stubborn".to_string(),
                mv: format!("{:?}", Coord::new(0, 0)),
            }
        );
        assert_eq!(board.num_moves(), 1);
    }

    #[test]
    fn test_missing_move_is_reported() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        let mut x = Silent;
        let mut o = Silent;
        let err = play_game(&mut board, &mut x, &mut o).unwrap_err();
        assert_eq!(
            err,
            PlayError::NoMove {
                agent: "Silent".to_string(),
                left: 9,
            }
        );
    }

    #[test]
    fn test_finished_board_returns_immediately() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        board.do_moves(
            &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1), Coord::new(0, 2)],
            true,
        );
        let mut x = Silent;
        let mut o = Silent;
        let record = play_game(&mut board, &mut x, &mut o).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.winner(), Some(Player::X));
    }

    #[test]
    fn test_boxed_and_borrowed_agents_mix() {
        let mut board = GravityBoard::new(4, 5, 3).unwrap();
        let mut x = solver();
        let mut o: Box<dyn Agent<GravityBoard>> =
            Box::new(RandomAgent::seeded(RandomPolicy::CenterWeighted, 9));
        let record = play_game(&mut board, &mut x, o.as_mut()).unwrap();
        assert_eq!(record.len(), board.num_moves());
        assert!(board.outcome().is_some());
    }
}
