use hashbrown::HashMap;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;

use crate::ludo::{Color, Dice, Game, MoveOutcome};

pub const DEFAULT_NAMES: [&str; 4] = ["Red", "Green", "Yellow", "Blue"];

/// Settings for a batch of self-played matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: usize,
    pub players: usize,
    pub max_rolls: usize,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1_000,
            players: 4,
            max_rolls: 10_000,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Clamped to the 1-4 seats a table has.
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players.clamp(1, DEFAULT_NAMES.len());
        self
    }

    pub fn with_max_rolls(mut self, max_rolls: usize) -> Self {
        self.max_rolls = max_rolls;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How one self-played match went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub winner: Option<Color>,
    pub rolls: usize,
    pub captures: usize,
    pub sixes: usize,
}

/// Plays one match where the turn holder always rolls, until someone
/// finishes or `max_rolls` dice have been thrown.
pub fn play_random_match<R: Rng>(names: &[&str], max_rolls: usize, rng: &mut R) -> MatchRecord {
    let mut game = Game::new();
    for name in names {
        if let Err(e) = game.join(*name) {
            debug!("skipping seat {name}: {e}");
        }
    }

    let mut record = MatchRecord { winner: None, rolls: 0, captures: 0, sixes: 0 };
    while record.rolls < max_rolls {
        let Some(player) = game.current_turn().map(str::to_string) else {
            break;
        };
        let dice = Dice::roll_with(rng);
        record.rolls += 1;
        if dice.is_six() {
            record.sixes += 1;
        }

        let outcome = game.apply_move(&player, dice);
        // the turn never rests on a finished token while anyone is still racing
        debug_assert!(
            game.winners().count() == game.len()
                || game.current_turn().and_then(|n| game.token(n)).is_some_and(|t| !t.is_finished())
        );
        match outcome {
            MoveOutcome::Finished { .. } => {
                record.winner = game.token(&player).map(|t| t.color());
                break;
            }
            MoveOutcome::Moved { captured: Some(_), .. } => record.captures += 1,
            _ => {}
        }
    }
    record
}

/// Totals over a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub games: usize,
    pub wins: HashMap<Color, usize>,
    pub unfinished: usize,
    pub rolls: usize,
    pub captures: usize,
    pub sixes: usize,
}

impl SimulationStats {
    fn record(mut self, record: &MatchRecord) -> Self {
        self.games += 1;
        match record.winner {
            Some(color) => *self.wins.entry(color).or_insert(0) += 1,
            None => self.unfinished += 1,
        }
        self.rolls += record.rolls;
        self.captures += record.captures;
        self.sixes += record.sixes;
        self
    }

    fn merge(mut self, other: SimulationStats) -> Self {
        self.games += other.games;
        for (color, wins) in other.wins {
            *self.wins.entry(color).or_insert(0) += wins;
        }
        self.unfinished += other.unfinished;
        self.rolls += other.rolls;
        self.captures += other.captures;
        self.sixes += other.sixes;
        self
    }

    pub fn wins(&self, color: Color) -> usize {
        self.wins.get(&color).copied().unwrap_or(0)
    }

    pub fn win_rate(&self, color: Color) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(color) as f32 / self.games as f32 * 100.0
    }

    pub fn average_rolls(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.rolls as f32 / self.games as f32
    }
}

/// Plays `config.games` matches in parallel. With a seed, match `i` uses
/// `seed + i` so the totals do not depend on thread scheduling.
pub fn simulate(config: &SimulationConfig) -> SimulationStats {
    let names = &DEFAULT_NAMES[..config.players.clamp(1, DEFAULT_NAMES.len())];

    (0..config.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            play_random_match(names, config.max_rolls, &mut rng)
        })
        .fold(SimulationStats::default, |stats, record| stats.record(&record))
        .reduce(SimulationStats::default, SimulationStats::merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_player_always_finishes() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = play_random_match(&["Solo"], 100_000, &mut rng);
        assert_eq!(record.winner, Some(Color::Red));
        assert_eq!(record.captures, 0);
        assert!(record.rolls > 0);
    }

    #[test]
    fn test_roll_limit_is_respected() {
        let mut rng = StdRng::seed_from_u64(2);
        let record = play_random_match(&DEFAULT_NAMES, 3, &mut rng);
        assert!(record.rolls <= 3);
    }

    #[test]
    fn test_seeded_simulation_is_deterministic() {
        let config = SimulationConfig::new().with_games(64).with_players(4).with_seed(42);
        let a = simulate(&config);
        let b = simulate(&config);
        assert_eq!(a, b);
        assert_eq!(a.games, 64);
        let total: usize = Color::ALL.iter().map(|&c| a.wins(c)).sum();
        assert_eq!(total + a.unfinished, 64);
    }

    #[test]
    fn test_only_seated_colors_win() {
        let config = SimulationConfig::new().with_games(50).with_players(2).with_seed(7);
        let stats = simulate(&config);
        assert_eq!(stats.wins(Color::Yellow), 0);
        assert_eq!(stats.wins(Color::Blue), 0);
        assert!(stats.wins(Color::Red) + stats.wins(Color::Green) > 0);
    }

    #[test]
    fn test_players_are_clamped() {
        assert_eq!(SimulationConfig::new().with_players(9).players, 4);
        assert_eq!(SimulationConfig::new().with_players(0).players, 1);
    }

    #[test]
    fn test_empty_batch() {
        let stats = simulate(&SimulationConfig::new().with_games(0));
        assert_eq!(stats.games, 0);
        assert_eq!(stats.average_rolls(), 0.0);
        assert_eq!(stats.win_rate(Color::Red), 0.0);
    }
}
