use std::cmp::Reverse;
use std::collections::HashMap;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rand::{seq::SliceRandom, Rng};
use sea_orm::prelude::Uuid;
use thiserror::Error;

use pelada_entities::prelude::PlayerPosition;

use super::datastructures::{
    AssignedPlayer, DrawCandidate, DrawConfig, ManualTeam, TeamShape, TeamSlots,
};

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("Manual team references unknown player: {0}")]
    UnknownPlayer(Uuid),
}

/// Partitions the candidate pool into teams, in team order. Pure: the only
/// source of nondeterminism is the injected rng, which only the random
/// method draws from.
///
/// The pool may be smaller than the configured total; teams then simply
/// come up short. Sufficiency validation is the caller's job, as is
/// guaranteeing at least one team (team counts are validated before any
/// allocation runs).
pub fn allocate<R: Rng>(
    pool: &[DrawCandidate],
    config: &DrawConfig,
    rng: &mut R,
) -> Result<Vec<Vec<AssignedPlayer>>, AllocationError> {
    match config {
        DrawConfig::Manual { teams } => resolve_manual_teams(pool, teams),
        DrawConfig::AutoBalanced { shape } => Ok(allocate_balanced(pool, shape)),
        DrawConfig::AutoRandom { shape } => Ok(allocate_random(pool, shape, rng)),
    }
}

fn allocate_balanced(pool: &[DrawCandidate], shape: &TeamShape) -> Vec<Vec<AssignedPlayer>> {
    let mut teams = empty_teams(shape.number_of_teams);
    match shape.slots {
        TeamSlots::Mixed { players_per_team } => {
            let sorted = sort_descending_by_rating(pool.iter().collect_vec());
            snake_draft(&sorted, &mut teams, players_per_team);
        }
        TeamSlots::FixedGoalkeepers {
            line_players_per_team,
        } => {
            let (goalkeepers, line_players) = split_goalkeepers(pool);
            let goalkeepers = sort_descending_by_rating(goalkeepers);
            let line_players = sort_descending_by_rating(line_players);
            assign_goalkeepers(&goalkeepers, &mut teams);
            snake_draft(&line_players, &mut teams, line_players_per_team);
        }
    }
    teams
}

fn allocate_random<R: Rng>(
    pool: &[DrawCandidate],
    shape: &TeamShape,
    rng: &mut R,
) -> Vec<Vec<AssignedPlayer>> {
    let mut teams = empty_teams(shape.number_of_teams);
    match shape.slots {
        TeamSlots::Mixed { players_per_team } => {
            let mut shuffled = pool.iter().collect_vec();
            shuffled.shuffle(rng);
            round_robin(&shuffled, &mut teams, players_per_team);
        }
        TeamSlots::FixedGoalkeepers {
            line_players_per_team,
        } => {
            // Goalkeepers and line players are shuffled independently; once
            // shuffled, round robin is as fair as a snake draft.
            let (mut goalkeepers, mut line_players) = split_goalkeepers(pool);
            goalkeepers.shuffle(rng);
            line_players.shuffle(rng);
            assign_goalkeepers(&goalkeepers, &mut teams);
            round_robin(&line_players, &mut teams, line_players_per_team);
        }
    }
    teams
}

fn resolve_manual_teams(
    pool: &[DrawCandidate],
    manual_teams: &[ManualTeam],
) -> Result<Vec<Vec<AssignedPlayer>>, AllocationError> {
    let by_id: HashMap<Uuid, &DrawCandidate> = pool.iter().map(|c| (c.uuid, c)).collect();
    manual_teams
        .iter()
        .map(|team| {
            team.players
                .iter()
                .map(|slot| {
                    let candidate = by_id
                        .get(&slot.player_id)
                        .ok_or(AllocationError::UnknownPlayer(slot.player_id))?;
                    Ok(AssignedPlayer {
                        uuid: candidate.uuid,
                        position: slot.position,
                    })
                })
                .collect()
        })
        .collect()
}

fn empty_teams(number_of_teams: usize) -> Vec<Vec<AssignedPlayer>> {
    (0..number_of_teams).map(|_| Vec::new()).collect_vec()
}

fn sort_descending_by_rating(candidates: Vec<&DrawCandidate>) -> Vec<&DrawCandidate> {
    // Stable: equal ratings keep their pool order.
    candidates
        .into_iter()
        .sorted_by_key(|c| Reverse(OrderedFloat(c.rating)))
        .collect_vec()
}

fn split_goalkeepers(pool: &[DrawCandidate]) -> (Vec<&DrawCandidate>, Vec<&DrawCandidate>) {
    pool.iter()
        .partition(|c| c.position == Some(PlayerPosition::Goalkeeper))
}

/// One keeper per team, in team index order, until either the keepers or
/// the teams run out. Teams past that point play with a borrowed keeper;
/// that convention lives in the UI, not here.
fn assign_goalkeepers(goalkeepers: &[&DrawCandidate], teams: &mut [Vec<AssignedPlayer>]) {
    for (team, goalkeeper) in teams.iter_mut().zip(goalkeepers.iter()) {
        team.push(AssignedPlayer {
            uuid: goalkeeper.uuid,
            position: Some(PlayerPosition::Goalkeeper),
        });
    }
}

/// Serpentine draft: round 0 visits teams 0..N, round 1 visits N..0, and so
/// on, so no team gets the best remaining pick twice in a row.
fn snake_draft(
    candidates: &[&DrawCandidate],
    teams: &mut Vec<Vec<AssignedPlayer>>,
    per_team: usize,
) {
    let mut next = candidates.iter();
    'rounds: for round in 0..per_team {
        let visit_order: Vec<usize> = if round % 2 == 0 {
            (0..teams.len()).collect_vec()
        } else {
            (0..teams.len()).rev().collect_vec()
        };
        for team_idx in visit_order {
            match next.next() {
                Some(candidate) => teams[team_idx].push(AssignedPlayer {
                    uuid: candidate.uuid,
                    position: None,
                }),
                None => break 'rounds,
            }
        }
    }
}

fn round_robin(
    candidates: &[&DrawCandidate],
    teams: &mut Vec<Vec<AssignedPlayer>>,
    per_team: usize,
) {
    let team_count = teams.len();
    let needed = (team_count * per_team).min(candidates.len());
    for (idx, candidate) in candidates.iter().take(needed).enumerate() {
        teams[idx % team_count].push(AssignedPlayer {
            uuid: candidate.uuid,
            position: None,
        });
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};
    use sea_orm::prelude::Uuid;

    use pelada_entities::prelude::PlayerPosition;

    use crate::draw::datastructures::{
        DrawCandidate, DrawConfig, ManualTeam, ManualTeamPlayer, TeamShape, TeamSlots,
    };

    use super::{allocate, AllocationError};

    fn candidate(id: u128, rating: f64, position: Option<PlayerPosition>) -> DrawCandidate {
        DrawCandidate {
            uuid: Uuid::from_u128(id),
            rating,
            position,
        }
    }

    fn mixed_pool(ratings: &[f64]) -> Vec<DrawCandidate> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| candidate(100 + i as u128, *r, None))
            .collect_vec()
    }

    fn balanced(number_of_teams: usize, players_per_team: usize) -> DrawConfig {
        DrawConfig::AutoBalanced {
            shape: TeamShape {
                number_of_teams,
                slots: TeamSlots::Mixed { players_per_team },
            },
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_balanced_draft_splits_ratings_evenly() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 7.0, 5.0, 3.0]);
        let teams = allocate(&pool, &balanced(2, 2), &mut rng())?;

        assert_eq!(teams.len(), 2);
        // Snake order: round 0 gives 9 and 7, round 1 runs backwards and
        // gives 5 to team 1 and 3 to team 0.
        assert_eq!(
            teams[0].iter().map(|p| p.uuid).collect_vec(),
            vec![pool[0].uuid, pool[3].uuid]
        );
        assert_eq!(
            teams[1].iter().map(|p| p.uuid).collect_vec(),
            vec![pool[1].uuid, pool[2].uuid]
        );
        Ok(())
    }

    #[test]
    fn test_balanced_draft_is_stable_for_tied_ratings() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[5.0, 5.0, 5.0, 5.0]);
        let teams = allocate(&pool, &balanced(2, 2), &mut rng())?;
        assert_eq!(
            teams[0].iter().map(|p| p.uuid).collect_vec(),
            vec![pool[0].uuid, pool[3].uuid]
        );
        assert_eq!(
            teams[1].iter().map(|p| p.uuid).collect_vec(),
            vec![pool[1].uuid, pool[2].uuid]
        );
        Ok(())
    }

    #[test]
    fn test_scarce_pool_degrades_gracefully() -> Result<(), AllocationError> {
        // 7 players for 3 teams of 3: the allocator places everyone it has
        // and leaves the validation to the lifecycle layer.
        let pool = mixed_pool(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0]);
        let teams = allocate(&pool, &balanced(3, 3), &mut rng())?;

        let sizes = teams.iter().map(|t| t.len()).collect_vec();
        assert_eq!(sizes.iter().sum::<usize>(), 7);
        // After each round the spread between team sizes is at most 1.
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
        Ok(())
    }

    #[test]
    fn test_excess_players_stay_unassigned() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        let teams = allocate(&pool, &balanced(2, 2), &mut rng())?;
        assert_eq!(teams.iter().map(|t| t.len()).sum::<usize>(), 4);
        Ok(())
    }

    #[test]
    fn test_no_player_is_assigned_twice() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        for config in [
            balanced(3, 3),
            DrawConfig::AutoRandom {
                shape: TeamShape {
                    number_of_teams: 3,
                    slots: TeamSlots::Mixed { players_per_team: 3 },
                },
            },
        ] {
            let teams = allocate(&pool, &config, &mut rng())?;
            let ids = teams.iter().flatten().map(|p| p.uuid).collect_vec();
            assert_eq!(ids.len(), ids.iter().unique().count());
            assert_eq!(ids.len(), 9);
        }
        Ok(())
    }

    #[test]
    fn test_random_draw_fills_teams_round_robin() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        let config = DrawConfig::AutoRandom {
            shape: TeamShape {
                number_of_teams: 2,
                slots: TeamSlots::Mixed { players_per_team: 3 },
            },
        };
        let teams = allocate(&pool, &config, &mut rng())?;
        assert_eq!(teams[0].len(), 3);
        assert_eq!(teams[1].len(), 3);
        Ok(())
    }

    #[test]
    fn test_random_draw_is_deterministic_under_a_seed() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        let config = DrawConfig::AutoRandom {
            shape: TeamShape {
                number_of_teams: 2,
                slots: TeamSlots::Mixed { players_per_team: 3 },
            },
        };
        let first = allocate(&pool, &config, &mut rng())?;
        let second = allocate(&pool, &config, &mut rng())?;
        assert_eq!(first, second);
        Ok(())
    }

    fn goalkeeper_pool() -> Vec<DrawCandidate> {
        vec![
            candidate(1, 8.0, Some(PlayerPosition::Goalkeeper)),
            candidate(2, 6.0, Some(PlayerPosition::Goalkeeper)),
            candidate(3, 9.0, Some(PlayerPosition::Goalkeeper)),
            candidate(10, 9.0, Some(PlayerPosition::Defender)),
            candidate(11, 8.0, None),
            candidate(12, 7.0, Some(PlayerPosition::Forward)),
            candidate(13, 6.0, Some(PlayerPosition::Midfielder)),
        ]
    }

    #[test]
    fn test_fixed_goalkeepers_assigns_one_keeper_per_team() -> Result<(), AllocationError> {
        let pool = goalkeeper_pool();
        let config = DrawConfig::AutoBalanced {
            shape: TeamShape {
                number_of_teams: 2,
                slots: TeamSlots::FixedGoalkeepers {
                    line_players_per_team: 2,
                },
            },
        };
        let teams = allocate(&pool, &config, &mut rng())?;

        for team in &teams {
            let keepers = team
                .iter()
                .filter(|p| p.position == Some(PlayerPosition::Goalkeeper))
                .count();
            assert_eq!(keepers, 1);
            assert_eq!(team.len(), 3);
        }
        // Best keeper (rating 9.0) goes to team 0; the third keeper stays
        // out entirely.
        assert_eq!(teams[0][0].uuid, Uuid::from_u128(3));
        assert_eq!(teams[1][0].uuid, Uuid::from_u128(1));
        let assigned = teams.iter().flatten().map(|p| p.uuid).collect_vec();
        assert!(!assigned.contains(&Uuid::from_u128(2)));
        Ok(())
    }

    #[test]
    fn test_goalkeeper_cap_is_min_of_keepers_and_teams() -> Result<(), AllocationError> {
        // One keeper, three teams: exactly one team gets a fixed keeper.
        let pool = vec![
            candidate(1, 5.0, Some(PlayerPosition::Goalkeeper)),
            candidate(10, 9.0, None),
            candidate(11, 8.0, None),
            candidate(12, 7.0, None),
        ];
        let config = DrawConfig::AutoRandom {
            shape: TeamShape {
                number_of_teams: 3,
                slots: TeamSlots::FixedGoalkeepers {
                    line_players_per_team: 1,
                },
            },
        };
        let teams = allocate(&pool, &config, &mut rng())?;
        let teams_with_keeper = teams
            .iter()
            .filter(|t| {
                t.iter()
                    .any(|p| p.position == Some(PlayerPosition::Goalkeeper))
            })
            .count();
        assert_eq!(teams_with_keeper, 1);
        Ok(())
    }

    #[test]
    fn test_unset_position_counts_as_line_player() -> Result<(), AllocationError> {
        let pool = vec![
            candidate(1, 5.0, Some(PlayerPosition::Goalkeeper)),
            candidate(10, 9.0, None),
            candidate(11, 8.0, None),
        ];
        let config = DrawConfig::AutoBalanced {
            shape: TeamShape {
                number_of_teams: 2,
                slots: TeamSlots::FixedGoalkeepers {
                    line_players_per_team: 1,
                },
            },
        };
        let teams = allocate(&pool, &config, &mut rng())?;
        assert_eq!(teams[0].len(), 2);
        assert_eq!(teams[1].len(), 1);
        Ok(())
    }

    #[test]
    fn test_manual_draw_passes_assignments_through() -> Result<(), AllocationError> {
        let pool = mixed_pool(&[9.0, 7.0, 5.0, 3.0]);
        let config = DrawConfig::Manual {
            teams: vec![
                ManualTeam {
                    name: "Reds".into(),
                    color: "#FF0000".into(),
                    players: vec![ManualTeamPlayer {
                        player_id: pool[2].uuid,
                        position: Some(PlayerPosition::Forward),
                    }],
                },
                ManualTeam {
                    name: "Blues".into(),
                    color: "#0000FF".into(),
                    players: vec![ManualTeamPlayer {
                        player_id: pool[0].uuid,
                        position: None,
                    }],
                },
            ],
        };
        let teams = allocate(&pool, &config, &mut rng())?;
        assert_eq!(teams[0][0].uuid, pool[2].uuid);
        assert_eq!(teams[0][0].position, Some(PlayerPosition::Forward));
        assert_eq!(teams[1][0].uuid, pool[0].uuid);
        Ok(())
    }

    #[test]
    fn test_manual_draw_rejects_unknown_player() {
        let pool = mixed_pool(&[9.0, 7.0]);
        let stranger = Uuid::from_u128(999);
        let config = DrawConfig::Manual {
            teams: vec![ManualTeam {
                name: "Reds".into(),
                color: "#FF0000".into(),
                players: vec![ManualTeamPlayer {
                    player_id: stranger,
                    position: None,
                }],
            }],
        };
        let result = allocate(&pool, &config, &mut rng());
        assert!(matches!(
            result,
            Err(AllocationError::UnknownPlayer(id)) if id == stranger
        ));
    }
}
