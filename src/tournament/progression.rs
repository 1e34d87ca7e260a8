use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{BracketMatch, TeamId, TournamentBracket};

enum Slot {
    Home,
    Away,
}

/// One stop on a team's way to its next game
struct Landing {
    game_number: u32,
    slot: Slot,
    pass_through: bool,
}

/// Record the winner of `game_number` and move both teams along their links.
///
/// The winner goes to `next_game_number`; in double elimination the loser
/// drops to `loser_next_game_number`. Which slot a team lands in is decided by
/// the feeding game's position among all games feeding the target, lowest
/// game number taking the home slot. A team landing in a bye game is its
/// winner at once and keeps moving.
pub fn report_winner(
    bracket: &mut TournamentBracket,
    game_number: u32,
    winner_team_id: &str,
) -> TournamentResult<()> {
    let game = bracket
        .find_match(game_number)
        .ok_or(TournamentError::UnknownGame(game_number))?;

    if game.winner_team_id.is_some() {
        return Err(TournamentError::WinnerAlreadyRecorded(game_number));
    }
    let (home, away) = match (&game.home_team_id, &game.away_team_id) {
        (Some(home), Some(away)) => (home.clone(), away.clone()),
        _ => return Err(TournamentError::MatchNotReady(game_number)),
    };

    let (winner, winner_seed, loser, loser_seed) = if home == winner_team_id {
        (home, game.home_team_seed, away, game.away_team_seed)
    } else if away == winner_team_id {
        (away, game.away_team_seed, home, game.home_team_seed)
    } else {
        return Err(TournamentError::NotAParticipant {
            game_number,
            team_id: winner_team_id.to_string(),
        });
    };
    let next = game.next_game_number;
    let loser_next = game.loser_next_game_number;

    // Check both routes before touching anything
    let winner_route = next
        .map(|target| plan_route(bracket, game_number, target, &winner))
        .transpose()?;
    let loser_route = loser_next
        .map(|target| plan_route(bracket, game_number, target, &loser))
        .transpose()?;

    if let Some(game) = bracket.find_match_mut(game_number) {
        game.winner_team_id = Some(winner.clone());
    }
    if let Some(route) = winner_route {
        apply_route(bracket, &route, &winner, winner_seed);
    }
    if let Some(route) = loser_route {
        apply_route(bracket, &route, &loser, loser_seed);
    }

    tracing::info!(
        "Game {} decided: {} beat {} (advances to {:?}, loser to {:?})",
        game_number,
        winner,
        loser,
        next,
        loser_next
    );

    Ok(())
}

/// Move every round-1 bye winner into its round-2 game. Returns how many
/// teams moved. Byes already placed are skipped, so calling this twice is
/// harmless.
pub fn advance_byes(bracket: &mut TournamentBracket) -> TournamentResult<usize> {
    let byes: Vec<(u32, TeamId, Option<u32>, u32)> = bracket
        .matches
        .iter()
        .filter(|m| m.is_bye)
        .filter_map(|m| {
            let winner = m.winner_team_id.clone()?;
            let next = m.next_game_number?;
            Some((m.game_number, winner, m.home_team_seed, next))
        })
        .collect();

    let mut advanced = 0;
    for (game_number, winner, seed, target) in byes {
        let already_placed = bracket
            .find_match(target)
            .map(|m| m.has_participant(&winner))
            .unwrap_or(false);
        if already_placed {
            continue;
        }
        let route = plan_route(bracket, game_number, target, &winner)?;
        apply_route(bracket, &route, &winner, seed);
        advanced += 1;
    }

    tracing::debug!("Advanced {} bye winners", advanced);
    Ok(advanced)
}

/// Games whose winner or loser lands in `target`, by game number
fn feeders(bracket: &TournamentBracket, target: u32) -> Vec<u32> {
    let mut feeders: Vec<u32> = bracket
        .matches
        .iter()
        .filter(|m| m.next_game_number == Some(target) || m.loser_next_game_number == Some(target))
        .map(|m| m.game_number)
        .collect();
    feeders.sort_unstable();
    feeders
}

/// Follow `team_id` from `source` into `target`, through any bye games, up to
/// the first game it actually has to play (or the end of the bracket)
fn plan_route(bracket: &TournamentBracket, source: u32, target: u32, team_id: &str) -> TournamentResult<Vec<Landing>> {
    let mut route = Vec::new();
    let (mut source, mut target) = (source, target);

    loop {
        if route.len() > bracket.matches.len() {
            return Err(TournamentError::LinkCycle(target));
        }
        let game = bracket
            .find_match(target)
            .ok_or(TournamentError::UnknownGame(target))?;

        if !game.is_bye {
            let slot = free_slot(bracket, source, game, team_id)?;
            route.push(Landing {
                game_number: target,
                slot,
                pass_through: false,
            });
            return Ok(route);
        }

        // A bye game holds its single team at home
        if let Some(occupant) = game.home_team_id.as_deref().filter(|&id| id != team_id) {
            return Err(TournamentError::SlotOccupied {
                game_number: target,
                occupant: occupant.to_string(),
            });
        }
        route.push(Landing {
            game_number: target,
            slot: Slot::Home,
            pass_through: true,
        });
        match game.next_game_number {
            Some(next) => {
                source = target;
                target = next;
            }
            None => return Ok(route),
        }
    }
}

fn free_slot(bracket: &TournamentBracket, source: u32, target: &BracketMatch, team_id: &str) -> TournamentResult<Slot> {
    let slot = match feeders(bracket, target.game_number).iter().position(|&n| n == source) {
        Some(0) | None => Slot::Home,
        Some(_) => Slot::Away,
    };
    let occupant = match slot {
        Slot::Home => &target.home_team_id,
        Slot::Away => &target.away_team_id,
    };
    match occupant {
        Some(occupant) if occupant != team_id => Err(TournamentError::SlotOccupied {
            game_number: target.game_number,
            occupant: occupant.clone(),
        }),
        _ => Ok(slot),
    }
}

fn apply_route(bracket: &mut TournamentBracket, route: &[Landing], team_id: &str, seed: Option<u32>) {
    for landing in route {
        let Some(game) = bracket.find_match_mut(landing.game_number) else { continue };
        match landing.slot {
            Slot::Home => {
                game.home_team_id = Some(team_id.to_string());
                game.home_team_seed = seed;
            }
            Slot::Away => {
                game.away_team_id = Some(team_id.to_string());
                game.away_team_seed = seed;
            }
        }
        if landing.pass_through {
            game.winner_team_id = Some(team_id.to_string());
            tracing::debug!("{} passes through bye game {}", team_id, landing.game_number);
        }
    }
}
