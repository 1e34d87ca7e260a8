use std::collections::HashMap;
use uuid::Uuid;

use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{
    BracketMatch, BracketSide, BracketType, SeedSlot, TeamStanding, TournamentBracket,
};
use crate::tournament::seeding::{bracket_size, ranked_standings, winners_rounds, SeedingGenerator};

/// Expands seeding into a full elimination match tree
#[derive(Debug, Default)]
pub struct BracketBuilder {
    seeding: SeedingGenerator,
}

impl BracketBuilder {
    pub fn new() -> Self {
        Self {
            seeding: SeedingGenerator::new(),
        }
    }

    /// Build the bracket for `standings`.
    ///
    /// Games are numbered in creation order: winners' round 1 (byes included),
    /// later winners' rounds, then the losers' bracket and championship for
    /// double elimination. Every `next_game_number` relies on that order.
    pub fn build_bracket(
        &self,
        tournament_id: Uuid,
        standings: &[TeamStanding],
        bracket_type: BracketType,
    ) -> TournamentResult<TournamentBracket> {
        if standings.is_empty() {
            return Err(TournamentError::EmptyStandings);
        }
        if standings.len() < 2 {
            return Err(TournamentError::NotEnoughTeams(standings.len()));
        }

        let slots = self.seeding.generate_seeding(standings, bracket_type)?;
        let seeds: HashMap<&str, u32> = ranked_standings(standings)
            .into_iter()
            .enumerate()
            .map(|(rank, standing)| (standing.team_id.as_str(), rank as u32 + 1))
            .collect();

        let team_count = standings.len();
        let rounds = winners_rounds(team_count);
        let mut matches = build_winners_bracket(&slots, &seeds, rounds);

        if bracket_type == BracketType::DoubleElimination {
            append_losers_and_championship(&mut matches, bracket_size(team_count), rounds);
            mark_pass_through_games(&mut matches);
        }

        let bracket = TournamentBracket {
            tournament_id,
            bracket_type,
            matches,
            total_rounds: expected_total_rounds(team_count, bracket_type),
            total_games: expected_total_games(team_count, bracket_type),
        };

        tracing::info!(
            "Built {} bracket for tournament {}: {} teams, {} rounds, {} games ({} match slots)",
            bracket_type,
            tournament_id,
            team_count,
            bracket.total_rounds,
            bracket.total_games,
            bracket.matches.len()
        );

        Ok(bracket)
    }
}

/// Closed-form round count: winners' rounds, plus the championship round for
/// double elimination
pub fn expected_total_rounds(team_count: usize, bracket_type: BracketType) -> u32 {
    let rounds = winners_rounds(team_count);
    match bracket_type {
        BracketType::SingleElimination => rounds,
        BracketType::DoubleElimination => rounds + 1,
    }
}

/// Closed-form game count: `n - 1` single, `2(n - 1) - 1` double
pub fn expected_total_games(team_count: usize, bracket_type: BracketType) -> u32 {
    let single = team_count.saturating_sub(1) as u32;
    match bracket_type {
        BracketType::SingleElimination => single,
        BracketType::DoubleElimination => (2 * single).saturating_sub(1),
    }
}

/// First game number of winners' round `round` (1-based) in a `size`-slot bracket
pub fn winners_round_start(size: usize, round: u32) -> u32 {
    (size - (size >> (round - 1)) + 1) as u32
}

/// Match count of losers' round `round` (1-based) for a `size`-slot bracket.
/// Rounds come in pairs of equal size, halving after each pair.
pub fn losers_round_size(size: usize, round: u32) -> usize {
    let pair = (round + 1) / 2;
    size >> (pair + 1)
}

/// Number of losers' rounds for a `size`-slot bracket
pub fn losers_rounds(size: usize) -> u32 {
    2 * size.trailing_zeros().saturating_sub(1)
}

fn build_winners_bracket(slots: &[SeedSlot], seeds: &HashMap<&str, u32>, rounds: u32) -> Vec<BracketMatch> {
    let size = slots.len();
    let mut matches = Vec::with_capacity(size.saturating_sub(1));

    let next_in_round = |round: u32, index: usize| -> Option<u32> {
        (round < rounds).then(|| winners_round_start(size, round + 1) + (index / 2) as u32)
    };

    for (index, pair) in slots.chunks(2).enumerate() {
        let mut game = BracketMatch::placeholder(index as u32 + 1, 1, BracketSide::Winners);
        game.next_game_number = next_in_round(1, index);

        let mut entrants: Vec<(&str, u32)> = pair
            .iter()
            .filter_map(SeedSlot::team_id)
            .map(|id| (id, seeds.get(id).copied().unwrap_or(u32::MAX)))
            .collect();
        entrants.sort_by_key(|(_, seed)| *seed);

        match entrants.as_slice() {
            [(home, home_seed), (away, away_seed)] => {
                game.home_team_id = Some(home.to_string());
                game.home_team_seed = Some(*home_seed);
                game.away_team_id = Some(away.to_string());
                game.away_team_seed = Some(*away_seed);
            }
            [(team, seed)] => {
                game.home_team_id = Some(team.to_string());
                game.home_team_seed = Some(*seed);
                game.winner_team_id = Some(team.to_string());
                game.is_bye = true;
            }
            _ => {}
        }

        tracing::debug!(
            "Round 1 game {}: {:?} vs {:?}{}",
            game.game_number,
            game.home_team_id,
            game.away_team_id,
            if game.is_bye { " (bye)" } else { "" }
        );
        matches.push(game);
    }

    for round in 2..=rounds {
        let start = winners_round_start(size, round);
        for index in 0..(size >> round) {
            let mut game = BracketMatch::placeholder(start + index as u32, round, BracketSide::Winners);
            game.next_game_number = next_in_round(round, index);
            matches.push(game);
        }
    }

    matches
}

/// Appends the losers' bracket and the championship, and wires the
/// winners' side into them.
fn append_losers_and_championship(matches: &mut Vec<BracketMatch>, size: usize, rounds: u32) {
    let losers_round_count = losers_rounds(size);
    let mut next_number = matches.len() as u32 + 1;

    let mut losers_starts = Vec::with_capacity(losers_round_count as usize);
    for round in 1..=losers_round_count {
        losers_starts.push(next_number);
        next_number += losers_round_size(size, round) as u32;
    }
    let championship_number = next_number;
    let losers_start = |round: u32| losers_starts[(round - 1) as usize];

    for round in 1..=losers_round_count {
        let start = losers_start(round);
        for index in 0..losers_round_size(size, round) {
            let mut game = BracketMatch::placeholder(start + index as u32, round, BracketSide::Losers);
            game.next_game_number = Some(if round == losers_round_count {
                championship_number
            } else if round % 2 == 1 {
                losers_start(round + 1) + index as u32
            } else {
                losers_start(round + 1) + (index / 2) as u32
            });
            matches.push(game);
        }
    }

    for game in matches.iter_mut().filter(|m| m.bracket_side == BracketSide::Winners) {
        let index = game.game_number - winners_round_start(size, game.round);
        if game.round == rounds {
            game.next_game_number = Some(championship_number);
        }
        if game.is_bye {
            continue;
        }
        game.loser_next_game_number = Some(if losers_round_count == 0 {
            championship_number
        } else if game.round == 1 {
            losers_start(1) + index / 2
        } else {
            losers_start(2 * (game.round - 1)) + index
        });
    }

    matches.push(BracketMatch::placeholder(
        championship_number,
        rounds + 1,
        BracketSide::Championship,
    ));
}

/// Byes never produce a loser, so with byes in round 1 some losers' games can
/// only ever receive one team, or none. Those games are flagged `is_bye`: a
/// team that lands in one advances without playing, and an empty one is never
/// played. Relies on every link pointing to a higher game number and on
/// `matches[i]` holding game `i + 1`.
fn mark_pass_through_games(matches: &mut [BracketMatch]) {
    let mut entrants = vec![0u8; matches.len()];

    for index in 0..matches.len() {
        let game = &matches[index];
        let reachable = if game.bracket_side == BracketSide::Winners && game.round == 1 {
            game.participants().count() as u8
        } else {
            entrants[index]
        };
        entrants[index] = reachable;

        if let Some(next) = game.next_game_number {
            if reachable >= 1 {
                entrants[(next - 1) as usize] += 1;
            }
        }
        if let Some(loser_next) = game.loser_next_game_number {
            if reachable == 2 {
                entrants[(loser_next - 1) as usize] += 1;
            }
        }
    }

    for (game, reachable) in matches.iter_mut().zip(entrants) {
        if reachable < 2 && !game.is_bye {
            game.is_bye = true;
            tracing::debug!(
                "{} game {} can receive {} team(s), marked as bye",
                game.bracket_side.label(),
                game.game_number,
                reachable
            );
        }
    }
}
