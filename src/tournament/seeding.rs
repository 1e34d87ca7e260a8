use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{BracketType, SeedSlot, TeamStanding, BYE};

/// The canonical seeding table only covers an 8-team bracket
pub const MAX_SEEDED_TEAMS: usize = 8;

/// Places ranked teams onto bracket positions
#[derive(Debug, Default)]
pub struct SeedingGenerator;

impl SeedingGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the round-1 seeding array.
    ///
    /// The result has `bracket_size(n)` entries; adjacent pairs (0,1), (2,3), ...
    /// are the first-round matchups and unfilled positions hold [`SeedSlot::Bye`].
    /// Double elimination seeds its winners' bracket exactly like single
    /// elimination.
    pub fn generate_seeding(
        &self,
        standings: &[TeamStanding],
        bracket_type: BracketType,
    ) -> TournamentResult<Vec<SeedSlot>> {
        if standings.is_empty() {
            return Err(TournamentError::EmptyStandings);
        }
        if let Some(standing) = standings.iter().find(|s| s.team_id == BYE) {
            return Err(TournamentError::ReservedTeamId(standing.team_id.clone()));
        }

        let ranked = ranked_standings(standings);
        let size = bracket_size(ranked.len());
        let mut slots = vec![SeedSlot::Bye; size];

        for (rank, standing) in ranked.iter().enumerate() {
            let position = seed_position(rank, size).ok_or(TournamentError::UnsupportedSeeding {
                rank,
                teams: ranked.len(),
            })?;
            slots[position] = SeedSlot::Team(standing.team_id.clone());
        }

        tracing::debug!(
            "Seeded {} teams into a {}-slot {} bracket ({} byes)",
            ranked.len(),
            size,
            bracket_type,
            size - ranked.len()
        );

        Ok(slots)
    }
}

/// Smallest power of two that fits `team_count` teams
pub fn bracket_size(team_count: usize) -> usize {
    team_count.max(1).next_power_of_two()
}

/// Number of winners' bracket rounds, `ceil(log2(team_count))`
pub fn winners_rounds(team_count: usize) -> u32 {
    bracket_size(team_count).trailing_zeros()
}

/// Canonical bracket position for a 0-based rank: 1v8, 4v5, 3v6, 2v7 halves.
/// Ranks beyond the table have no defined position.
pub fn seed_position(rank: usize, size: usize) -> Option<usize> {
    if rank >= size {
        return None;
    }
    match rank {
        0 => Some(0),
        1 => Some(size - 1),
        2 => Some(size / 2),
        3 => Some(size / 2 - 1),
        4 => Some(2),
        5 => Some(size - 3),
        6 => Some(size - 2),
        7 => Some(1),
        _ => None,
    }
}

/// Standings in seed order. Explicit seeds win; unseeded entries keep their
/// relative input order after the seeded ones.
pub fn ranked_standings(standings: &[TeamStanding]) -> Vec<&TeamStanding> {
    let mut ranked: Vec<&TeamStanding> = standings.iter().collect();
    ranked.sort_by_key(|standing| standing.seed.unwrap_or(u32::MAX));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(ids: &[&str]) -> Vec<TeamStanding> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                let mut standing = TeamStanding::new(*id, id.to_uppercase());
                standing.seed = Some(i as u32 + 1);
                standing
            })
            .collect()
    }

    fn ids(slots: &[SeedSlot]) -> Vec<&str> {
        slots.iter().map(|s| s.team_id().unwrap_or("BYE")).collect()
    }

    #[test]
    fn test_eight_team_table() {
        let generator = SeedingGenerator::new();
        let slots = generator
            .generate_seeding(
                &standings(&["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8"]),
                BracketType::SingleElimination,
            )
            .unwrap();

        assert_eq!(ids(&slots), vec!["s1", "s8", "s5", "s4", "s3", "s6", "s7", "s2"]);
    }

    #[test]
    fn test_four_team_pairs_one_v_four_and_two_v_three() {
        let generator = SeedingGenerator::new();
        let slots = generator
            .generate_seeding(&standings(&["a", "b", "c", "d"]), BracketType::SingleElimination)
            .unwrap();

        assert_eq!(ids(&slots), vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn test_five_teams_fill_with_byes() {
        let generator = SeedingGenerator::new();
        let slots = generator
            .generate_seeding(&standings(&["a", "b", "c", "d", "e"]), BracketType::SingleElimination)
            .unwrap();

        assert_eq!(ids(&slots), vec!["a", "BYE", "e", "d", "c", "BYE", "BYE", "b"]);
    }

    #[test]
    fn test_double_elimination_reuses_single_seeding() {
        let generator = SeedingGenerator::new();
        let table = standings(&["a", "b", "c", "d", "e", "f"]);

        let single = generator.generate_seeding(&table, BracketType::SingleElimination).unwrap();
        let double = generator.generate_seeding(&table, BracketType::DoubleElimination).unwrap();

        assert_eq!(single, double);
    }

    #[test]
    fn test_single_team_and_two_teams() {
        let generator = SeedingGenerator::new();

        let one = generator.generate_seeding(&standings(&["a"]), BracketType::SingleElimination).unwrap();
        assert_eq!(ids(&one), vec!["a"]);

        let two = generator.generate_seeding(&standings(&["a", "b"]), BracketType::SingleElimination).unwrap();
        assert_eq!(ids(&two), vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_empty_and_oversized_fields() {
        let generator = SeedingGenerator::new();

        assert_eq!(
            generator.generate_seeding(&[], BracketType::SingleElimination),
            Err(TournamentError::EmptyStandings)
        );

        let nine: Vec<String> = (1..=9).map(|i| format!("t{}", i)).collect();
        let nine: Vec<&str> = nine.iter().map(String::as_str).collect();
        assert_eq!(
            generator.generate_seeding(&standings(&nine), BracketType::SingleElimination),
            Err(TournamentError::UnsupportedSeeding { rank: 8, teams: 9 })
        );

        assert_eq!(
            generator.generate_seeding(&standings(&["a", BYE, "c"]), BracketType::DoubleElimination),
            Err(TournamentError::ReservedTeamId(BYE.to_string()))
        );
    }

    #[test]
    fn test_unseeded_standings_use_input_order() {
        let table = vec![TeamStanding::new("x", "X"), TeamStanding::new("y", "Y")];
        let ranked = ranked_standings(&table);
        assert_eq!(ranked[0].team_id, "x");
        assert_eq!(ranked[1].team_id, "y");
    }

    #[test]
    fn test_round_math() {
        assert_eq!(bracket_size(3), 4);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(winners_rounds(2), 1);
        assert_eq!(winners_rounds(5), 3);
        assert_eq!(winners_rounds(1), 0);
    }
}
