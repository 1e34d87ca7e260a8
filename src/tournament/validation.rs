use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::models::tournament::{
    BracketSide, BracketType, TeamStanding, TournamentBracket, ValidationReport,
};
use crate::tournament::bracket::{expected_total_games, expected_total_rounds, losers_round_size, losers_rounds};
use crate::tournament::seeding::{bracket_size, ranked_standings, winners_rounds};

/// Error and warning lists shared by the individual checks
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Structural integrity checks for a built bracket
#[derive(Debug, Default)]
pub struct BracketValidator;

impl BracketValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run every check against `bracket` and the standings it was built from.
    /// All checks always run; the bracket is valid when no check reports an
    /// error. Warnings never affect validity.
    pub fn validate(&self, bracket: &TournamentBracket, standings: &[TeamStanding]) -> ValidationReport {
        let mut findings = Findings::default();

        self.check_structure(bracket, &mut findings);
        self.check_progression(bracket, &mut findings);
        self.check_team_consistency(bracket, standings, &mut findings);
        self.check_completeness(bracket, standings, &mut findings);

        let report = ValidationReport::from_findings(findings.errors, findings.warnings);
        if report.is_valid {
            tracing::debug!(
                "Bracket for tournament {} is valid ({} warnings)",
                bracket.tournament_id,
                report.warnings.len()
            );
        } else {
            tracing::warn!(
                "Bracket for tournament {} failed validation: {:?}",
                bracket.tournament_id,
                report.errors
            );
        }
        report
    }

    /// Game numbering, positive indices, bye shape and link targets
    fn check_structure(&self, bracket: &TournamentBracket, findings: &mut Findings) {
        let mut numbers = HashSet::with_capacity(bracket.matches.len());
        for game in &bracket.matches {
            if !numbers.insert(game.game_number) {
                findings.error(format!("Duplicate game number {}", game.game_number));
            }
        }

        let game_count = bracket.matches.len() as u32;
        for number in 1..=game_count {
            if !numbers.contains(&number) {
                findings.error(format!("Game number {} is missing from the sequence", number));
            }
        }
        for game in bracket.matches.iter().filter(|m| m.game_number > game_count) {
            findings.error(format!(
                "Game number {} is beyond the {} games in this bracket",
                game.game_number, game_count
            ));
        }

        for game in &bracket.matches {
            let n = game.game_number;
            if n == 0 {
                findings.error("Game number must be positive, found 0");
            }
            if game.round == 0 {
                findings.error(format!("Game {} has round 0, rounds start at 1", n));
            }

            if game.is_bye {
                // Later byes only carry a team once one has arrived, some never get one
                let opening = game.bracket_side == BracketSide::Winners && game.round == 1;
                if opening && game.home_team_id.is_none() {
                    findings.error(format!("Bye game {} has no team", n));
                }
                if game.away_team_id.is_some() {
                    findings.error(format!("Bye game {} must not have an away team", n));
                }
                if game.home_team_id.is_some() && game.winner_team_id.is_none() {
                    findings.error(format!("Bye game {} has no winner recorded", n));
                }
            }

            for (label, link) in [
                ("next game", game.next_game_number),
                ("loser game", game.loser_next_game_number),
            ] {
                let Some(target) = link else { continue };
                if !numbers.contains(&target) {
                    findings.error(format!("Game {} points to {} {} which does not exist", n, label, target));
                } else if target <= n {
                    findings.error(format!("Game {} points back to {} {}", n, label, target));
                }
            }
        }
    }

    /// Round contiguity, round sizes and winner advancement
    fn check_progression(&self, bracket: &TournamentBracket, findings: &mut Findings) {
        let mut rounds: BTreeMap<(BracketSide, u32), usize> = BTreeMap::new();
        for game in &bracket.matches {
            *rounds.entry((game.bracket_side, game.round)).or_insert(0) += 1;
        }

        let winners_total = match bracket.bracket_type {
            BracketType::SingleElimination => bracket.total_rounds,
            BracketType::DoubleElimination => bracket.total_rounds.saturating_sub(1),
        };
        let size = 1usize.checked_shl(winners_total);
        if size.is_none() {
            findings.error(format!("Total rounds {} out of range", bracket.total_rounds));
        }

        for side in [BracketSide::Winners, BracketSide::Losers] {
            let present: BTreeSet<u32> = rounds
                .keys()
                .filter(|(s, round)| *s == side && *round > 0)
                .map(|(_, round)| *round)
                .collect();
            if let Some(&last) = present.iter().next_back() {
                // With n distinct rounds the first gap is at most n + 1
                for round in 1..=last.min(present.len() as u32 + 1) {
                    if !present.contains(&round) {
                        findings.error(format!("Round {} of the {} bracket is missing", round, side.label()));
                    }
                }
            }
        }

        for (&(side, round), &count) in &rounds {
            if round == 0 {
                continue;
            }
            match side {
                BracketSide::Winners => {
                    let Some(size) = size else { continue };
                    if round > winners_total {
                        findings.error(format!(
                            "Winners' round {} exceeds the {} rounds of this bracket",
                            round, winners_total
                        ));
                        continue;
                    }
                    let expected = size >> round;
                    if count != expected {
                        findings.error(format!(
                            "Round {} has {} games, expected {}",
                            round, count, expected
                        ));
                    }
                }
                BracketSide::Losers => {
                    if bracket.bracket_type == BracketType::SingleElimination {
                        findings.error(format!("Single elimination bracket has a losers' game in round {}", round));
                        continue;
                    }
                    let Some(size) = size else { continue };
                    if round > losers_rounds(size) {
                        findings.error(format!(
                            "Losers' round {} exceeds the {} losers' rounds of this bracket",
                            round,
                            losers_rounds(size)
                        ));
                        continue;
                    }
                    let expected = losers_round_size(size, round);
                    if count != expected {
                        findings.error(format!(
                            "Losers' round {} has {} games, expected {}",
                            round, count, expected
                        ));
                    }
                }
                BracketSide::Championship => {
                    if bracket.bracket_type == BracketType::SingleElimination {
                        findings.error("Single elimination bracket must not have a championship game");
                    } else if round != bracket.total_rounds {
                        findings.error(format!(
                            "Championship game sits in round {}, expected round {}",
                            round, bracket.total_rounds
                        ));
                    }
                }
            }
        }

        if bracket.bracket_type == BracketType::DoubleElimination {
            let championships = bracket
                .matches
                .iter()
                .filter(|m| m.bracket_side == BracketSide::Championship)
                .count();
            if championships != 1 {
                findings.error(format!(
                    "Double elimination bracket needs exactly one championship game, found {}",
                    championships
                ));
            }
        }

        let finals = bracket.matches.iter().filter(|m| m.next_game_number.is_none()).count();
        if !bracket.matches.is_empty() && finals != 1 {
            findings.error(format!(
                "Exactly one game may have no next game, found {}",
                finals
            ));
        }

        for game in &bracket.matches {
            let Some(winner) = game.winner_team_id.as_deref() else { continue };
            if !game.has_participant(winner) {
                findings.error(format!(
                    "Winner {} of game {} did not play in it",
                    winner, game.game_number
                ));
                continue;
            }
            if let Some(next) = game.next_game_number.and_then(|n| bracket.find_match(n)) {
                if !next.has_participant(winner) {
                    findings.warning(format!(
                        "Winner {} of game {} has not been placed into game {} yet",
                        winner, game.game_number, next.game_number
                    ));
                }
            }
        }
    }

    /// Every referenced team exists, never meets itself, plays once per round
    fn check_team_consistency(&self, bracket: &TournamentBracket, standings: &[TeamStanding], findings: &mut Findings) {
        let known: HashSet<&str> = standings.iter().map(|s| s.team_id.as_str()).collect();
        let mut reported_unknown: HashSet<&str> = HashSet::new();
        let mut seen_in_round: HashMap<(BracketSide, u32), HashSet<&str>> = HashMap::new();

        for game in &bracket.matches {
            let referenced = game.participants().chain(game.winner_team_id.as_deref());
            for team_id in referenced {
                if !known.contains(team_id) && reported_unknown.insert(team_id) {
                    findings.error(format!("Team {} is not in the standings", team_id));
                }
            }

            if let (Some(home), Some(away)) = (&game.home_team_id, &game.away_team_id) {
                if home == away {
                    findings.error(format!("Team {} plays itself in game {}", home, game.game_number));
                    continue;
                }
            }

            let seen = seen_in_round.entry((game.bracket_side, game.round)).or_default();
            for team_id in game.participants() {
                if !seen.insert(team_id) {
                    findings.error(format!(
                        "Team {} appears more than once in {} round {}",
                        team_id,
                        game.bracket_side.label(),
                        game.round
                    ));
                }
            }
        }
    }

    /// Closed-form totals, round-1 coverage and bye placement
    fn check_completeness(&self, bracket: &TournamentBracket, standings: &[TeamStanding], findings: &mut Findings) {
        let team_count = standings.len();
        if team_count == 0 {
            findings.error("Standings are empty, bracket cannot be complete");
            return;
        }

        let expected_games = expected_total_games(team_count, bracket.bracket_type);
        if bracket.total_games != expected_games {
            findings.error(format!(
                "Bracket reports {} total games, expected {} for {} teams",
                bracket.total_games, expected_games, team_count
            ));
        }
        let expected_rounds = expected_total_rounds(team_count, bracket.bracket_type);
        if bracket.total_rounds != expected_rounds {
            findings.error(format!(
                "Bracket reports {} total rounds, expected {} for {} teams",
                bracket.total_rounds, expected_rounds, team_count
            ));
        }

        let opening: HashSet<&str> = bracket
            .matches_in_round(BracketSide::Winners, 1)
            .flat_map(|m| m.participants())
            .collect();
        for standing in standings {
            if !opening.contains(standing.team_id.as_str()) {
                findings.error(format!("Team {} does not appear in round 1", standing.team_id));
            }
        }

        let byes_needed = bracket_size(team_count) - team_count;
        let bye_games: Vec<&str> = bracket
            .matches_in_round(BracketSide::Winners, 1)
            .filter(|m| m.is_bye)
            .filter_map(|m| m.home_team_id.as_deref())
            .collect();
        if bye_games.len() != byes_needed {
            findings.error(format!(
                "Bracket has {} byes, expected {} for {} teams",
                bye_games.len(),
                byes_needed,
                team_count
            ));
        }

        let top_seeds: HashSet<&str> = ranked_standings(standings)
            .into_iter()
            .take(byes_needed)
            .map(|s| s.team_id.as_str())
            .collect();
        for team_id in &bye_games {
            if !top_seeds.contains(team_id) {
                findings.error(format!(
                    "Team {} received a bye but is not among the top {} seeds",
                    team_id, byes_needed
                ));
            }
        }

        let winners_expected = winners_rounds(team_count);
        tracing::debug!(
            "Completeness check: {} teams, {} winners' rounds, {} byes",
            team_count,
            winners_expected,
            byes_needed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn built(count: usize, bracket_type: BracketType) -> (TournamentBracket, Vec<TeamStanding>) {
        let standings = standings(count);
        let bracket = BracketBuilder::new()
            .build_bracket(Uuid::new_v4(), &standings, bracket_type)
            .unwrap();
        (bracket, standings)
    }

    #[test]
    fn test_built_brackets_are_valid() {
        let validator = BracketValidator::new();
        for count in 2..=8 {
            for bracket_type in [BracketType::SingleElimination, BracketType::DoubleElimination] {
                let (bracket, standings) = built(count, bracket_type);
                let report = validator.validate(&bracket, &standings);
                assert!(report.is_valid, "{} teams {}: {:?}", count, bracket_type, report.errors);
            }
        }
    }

    #[test]
    fn test_unplaced_bye_winner_only_warns() {
        let validator = BracketValidator::new();
        let (bracket, standings) = built(3, BracketType::SingleElimination);

        let report = validator.validate(&bracket, &standings);

        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("has not been placed")));
    }

    #[test]
    fn test_duplicate_and_gapped_numbers() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(4, BracketType::SingleElimination);
        bracket.matches[1].game_number = 1;

        let report = validator.validate(&bracket, &standings);

        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("Duplicate game number 1")));
        assert!(report.errors.iter().any(|e| e.contains("Game number 2 is missing")));
    }

    #[test]
    fn test_team_playing_itself() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(4, BracketType::SingleElimination);
        bracket.matches[0].away_team_id = bracket.matches[0].home_team_id.clone();

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("plays itself")));
    }

    #[test]
    fn test_team_twice_in_round_and_unknown_team() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(4, BracketType::SingleElimination);
        bracket.matches[1].home_team_id = Some("t1".to_string());
        bracket.matches[1].away_team_id = Some("ghost".to_string());

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("appears more than once")));
        assert!(report.errors.iter().any(|e| e.contains("ghost is not in the standings")));
        assert!(report.errors.iter().any(|e| e.contains("does not appear in round 1")));
    }

    #[test]
    fn test_bye_without_winner_and_dangling_link() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(3, BracketType::SingleElimination);
        bracket.matches[0].winner_team_id = None;
        bracket.matches[1].next_game_number = Some(99);

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("has no winner recorded")));
        assert!(report.errors.iter().any(|e| e.contains("99 which does not exist")));
    }

    #[test]
    fn test_wrong_totals_and_round_sizes() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(8, BracketType::SingleElimination);
        bracket.total_games = 8;
        bracket.matches[6].round = 2;

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("reports 8 total games")));
        assert!(report.errors.iter().any(|e| e.contains("Round 2 has 3 games, expected 2")));
        assert!(report.errors.iter().any(|e| e.contains("Round 3 of the winners bracket is missing")));
    }

    #[test]
    fn test_misplaced_bye() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(3, BracketType::SingleElimination);
        // Hand the bye to the third seed instead of the first
        let bye = &mut bracket.matches[0];
        bye.home_team_id = Some("t3".to_string());
        bye.winner_team_id = Some("t3".to_string());
        bracket.matches[1].away_team_id = Some("t1".to_string());

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("is not among the top 1 seeds")));
    }

    #[test]
    fn test_oversized_round_counts_reported() {
        let validator = BracketValidator::new();
        for bracket_type in [BracketType::SingleElimination, BracketType::DoubleElimination] {
            let (mut bracket, standings) = built(4, bracket_type);
            bracket.total_rounds = 80;

            let report = validator.validate(&bracket, &standings);

            assert!(!report.is_valid);
            assert!(
                report.errors.iter().any(|e| e.contains("Total rounds 80 out of range")),
                "{}: {:?}",
                bracket_type,
                report.errors
            );
        }
    }

    #[test]
    fn test_huge_game_and_round_numbers_reported() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(4, BracketType::SingleElimination);
        bracket.matches[2].game_number = u32::MAX;
        bracket.matches[2].round = u32::MAX;

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("Game number 3 is missing")));
        assert!(report.errors.iter().any(|e| e.contains(&format!("Game number {} is beyond", u32::MAX))));
        assert!(report.errors.iter().any(|e| e.contains("Round 2 of the winners bracket is missing")));
    }

    #[test]
    fn test_empty_pass_through_bye_is_valid() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(5, BracketType::DoubleElimination);

        let report = validator.validate(&bracket, &standings);
        assert!(report.is_valid, "{:?}", report.errors);

        // Once a team sits in a later bye it must also be its winner
        bracket.find_match_mut(8).unwrap().home_team_id = Some("t4".to_string());
        let report = validator.validate(&bracket, &standings);
        assert!(report.errors.iter().any(|e| e.contains("Bye game 8 has no winner recorded")));
    }

    #[test]
    fn test_winner_outside_match() {
        let validator = BracketValidator::new();
        let (mut bracket, standings) = built(4, BracketType::SingleElimination);
        bracket.matches[0].winner_team_id = Some("t2".to_string());

        let report = validator.validate(&bracket, &standings);

        assert!(report.errors.iter().any(|e| e.contains("did not play in it")));
    }
}
