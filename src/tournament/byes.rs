use std::collections::HashMap;

use crate::models::error::TournamentResult;
use crate::models::tournament::{BracketType, ByeAssignment, SeedSlot, TeamStanding};
use crate::tournament::bracket::winners_round_start;
use crate::tournament::seeding::{bracket_size, ranked_standings, SeedingGenerator};

/// Works out which seeds skip the first round and where they land
#[derive(Debug, Default)]
pub struct ByeAssigner {
    seeding: SeedingGenerator,
}

impl ByeAssigner {
    pub fn new() -> Self {
        Self {
            seeding: SeedingGenerator::new(),
        }
    }

    /// Byes for the given standings, top seed first.
    ///
    /// `next_game_number` is the global number of the round-2 game the team
    /// advances into, matching the `next_game_number` of its bye match in the
    /// built bracket.
    pub fn assign_byes(
        &self,
        standings: &[TeamStanding],
        bracket_type: BracketType,
    ) -> TournamentResult<Vec<ByeAssignment>> {
        let slots = self.seeding.generate_seeding(standings, bracket_type)?;
        let ranked = ranked_standings(standings);
        let size = bracket_size(ranked.len());

        let byes_needed = size - ranked.len();
        if byes_needed == 0 {
            return Ok(Vec::new());
        }

        let seeds: HashMap<&str, (u32, &TeamStanding)> = ranked
            .iter()
            .enumerate()
            .map(|(rank, standing)| (standing.team_id.as_str(), (rank as u32 + 1, *standing)))
            .collect();
        let round_two_start = winners_round_start(size, 2);

        let mut byes = Vec::with_capacity(byes_needed);
        for (pair_index, pair) in slots.chunks(2).enumerate() {
            let team_id = match pair {
                [SeedSlot::Team(id), SeedSlot::Bye] | [SeedSlot::Bye, SeedSlot::Team(id)] => id,
                _ => continue,
            };
            if let Some((seed, standing)) = seeds.get(team_id.as_str()) {
                byes.push(ByeAssignment {
                    team_id: team_id.clone(),
                    team_name: standing.team_name.clone(),
                    seed: *seed,
                    bye_round: 1,
                    next_game_number: round_two_start + (pair_index / 2) as u32,
                });
            }
        }

        byes.sort_by_key(|bye| bye.seed);

        if byes.len() != byes_needed {
            tracing::warn!(
                "Expected {} byes for {} teams but seeding produced {}",
                byes_needed,
                ranked.len(),
                byes.len()
            );
        }

        Ok(byes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::TournamentError;
    use crate::models::tournament::BracketSide;
    use crate::tournament::bracket::BracketBuilder;
    use uuid::Uuid;

    fn standings(count: usize) -> Vec<TeamStanding> {
        (1..=count)
            .map(|i| {
                let mut standing = TeamStanding::new(format!("t{}", i), format!("Team {}", i));
                standing.seed = Some(i as u32);
                standing
            })
            .collect()
    }

    #[test]
    fn test_no_byes_for_power_of_two() {
        let assigner = ByeAssigner::new();
        assert!(assigner.assign_byes(&standings(4), BracketType::SingleElimination).unwrap().is_empty());
        assert!(assigner.assign_byes(&standings(8), BracketType::DoubleElimination).unwrap().is_empty());
    }

    #[test]
    fn test_three_teams_top_seed_gets_bye() {
        let assigner = ByeAssigner::new();
        let byes = assigner.assign_byes(&standings(3), BracketType::SingleElimination).unwrap();

        assert_eq!(byes.len(), 1);
        assert_eq!(byes[0].team_id, "t1");
        assert_eq!(byes[0].team_name, "Team 1");
        assert_eq!(byes[0].seed, 1);
        assert_eq!(byes[0].bye_round, 1);
        // Round 1 holds games 1-2, so the bye feeds the final, game 3
        assert_eq!(byes[0].next_game_number, 3);
    }

    #[test]
    fn test_byes_go_to_top_seeds_in_seed_order() {
        let assigner = ByeAssigner::new();

        for count in 5..=7 {
            let byes = assigner.assign_byes(&standings(count), BracketType::SingleElimination).unwrap();
            let seeds: Vec<u32> = byes.iter().map(|b| b.seed).collect();
            let expected: Vec<u32> = (1..=(8 - count) as u32).collect();
            assert_eq!(seeds, expected, "{} teams", count);
        }
    }

    #[test]
    fn test_five_teams_advancement_slots() {
        let assigner = ByeAssigner::new();
        let byes = assigner.assign_byes(&standings(5), BracketType::SingleElimination).unwrap();

        // Pairs: (1,BYE) (5,4) (3,BYE) (BYE,2); round 2 is games 5-6
        let slots: Vec<(&str, u32)> = byes
            .iter()
            .map(|b| (b.team_id.as_str(), b.next_game_number))
            .collect();
        assert_eq!(slots, vec![("t1", 5), ("t2", 6), ("t3", 6)]);
    }

    #[test]
    fn test_next_game_number_matches_bracket_links() {
        let assigner = ByeAssigner::new();
        let builder = BracketBuilder::new();

        // next_game_number is global: in double elimination round 2 of the
        // winners' bracket keeps its numbers, so it still equals the bye
        // match's own next_game_number
        for count in 3..=7 {
            for bracket_type in [BracketType::SingleElimination, BracketType::DoubleElimination] {
                let table = standings(count);
                let byes = assigner.assign_byes(&table, bracket_type).unwrap();
                let bracket = builder.build_bracket(Uuid::new_v4(), &table, bracket_type).unwrap();

                for bye in &byes {
                    let bye_match = bracket
                        .matches_in_round(BracketSide::Winners, 1)
                        .find(|m| m.is_bye && m.home_team_id.as_deref() == Some(bye.team_id.as_str()))
                        .unwrap();
                    assert_eq!(
                        Some(bye.next_game_number),
                        bye_match.next_game_number,
                        "{} teams {}, {}",
                        count,
                        bracket_type,
                        bye.team_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_standings_rejected() {
        let assigner = ByeAssigner::new();
        assert_eq!(
            assigner.assign_byes(&[], BracketType::SingleElimination),
            Err(TournamentError::EmptyStandings)
        );
    }
}
