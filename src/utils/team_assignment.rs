use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::models::error::{TournamentError, TournamentResult};

/// Deal `players` into `team_count` teams after a seeded shuffle.
///
/// The same seed and player list always produce the same teams. Team sizes
/// differ by at most one; earlier teams take the extra players.
pub fn assign_players_to_teams(
    players: &[String],
    team_count: usize,
    seed: u64,
) -> TournamentResult<Vec<Vec<String>>> {
    if team_count == 0 {
        return Err(TournamentError::InvalidRequest("Team count must be positive".into()));
    }

    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let mut teams = vec![Vec::with_capacity(players.len() / team_count + 1); team_count];
    for (index, player) in shuffled.into_iter().enumerate() {
        teams[index % team_count].push(player);
    }

    tracing::debug!(
        "Assigned {} players to {} teams with seed {}",
        players.len(),
        team_count,
        seed
    );

    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("player{}", i)).collect()
    }

    #[test]
    fn test_same_seed_same_teams() {
        let first = assign_players_to_teams(&players(10), 3, 42).unwrap();
        let second = assign_players_to_teams(&players(10), 3, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_everyone_assigned_once() {
        let teams = assign_players_to_teams(&players(11), 4, 7).unwrap();

        let sizes: Vec<usize> = teams.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 2]);

        let mut assigned: Vec<String> = teams.into_iter().flatten().collect();
        assigned.sort();
        let mut expected = players(11);
        expected.sort();
        assert_eq!(assigned, expected);
    }

    #[test]
    fn test_more_teams_than_players() {
        let teams = assign_players_to_teams(&players(2), 4, 1).unwrap();
        assert_eq!(teams.len(), 4);
        assert_eq!(teams.iter().filter(|t| t.is_empty()).count(), 2);
    }

    #[test]
    fn test_zero_teams_rejected() {
        assert!(matches!(
            assign_players_to_teams(&players(3), 0, 1),
            Err(TournamentError::InvalidRequest(_))
        ));
    }
}
