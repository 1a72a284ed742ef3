//! Kill chain verification.
//!
//! Alive players must form exactly one cycle through their targets:
//! every alive player hunts an alive player and is hunted by exactly
//! one, and walking the targets from anyone visits everyone.
use super::*;
use std::collections::HashMap;
use thiserror::Error;

/// The first thing found wrong with a kill chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    #[error("player {0} has no target")]
    Untargeted(ID<Player>),
    #[error("player {player} targets unknown player {target}")]
    Dangling {
        player: ID<Player>,
        target: ID<Player>,
    },
    #[error("player {player} targets eliminated player {target}")]
    DeadTarget {
        player: ID<Player>,
        target: ID<Player>,
    },
    #[error("player {0} targets itself while others are alive")]
    SelfHunt(ID<Player>),
    #[error("{found} live players hunt player {target}")]
    Hunters { target: ID<Player>, found: usize },
    #[error("chain reaches {reached} of {alive} alive players")]
    Split { reached: usize, alive: usize },
}

/// Check the kill chain formed by a game's roster.
/// A roster with nobody alive has no chain and passes.
pub fn verify(roster: &[Player]) -> Result<(), Defect> {
    let known = roster
        .iter()
        .map(|p| (p.id(), p))
        .collect::<HashMap<_, _>>();
    let alive = roster.iter().filter(|p| p.alive()).collect::<Vec<_>>();
    let mut hunted = alive
        .iter()
        .map(|p| (p.id(), 0usize))
        .collect::<HashMap<_, _>>();
    for player in alive.iter() {
        let target = player.target().ok_or(Defect::Untargeted(player.id()))?;
        match known.get(&target) {
            None => {
                return Err(Defect::Dangling {
                    player: player.id(),
                    target,
                });
            }
            Some(t) if !t.alive() => {
                return Err(Defect::DeadTarget {
                    player: player.id(),
                    target,
                });
            }
            Some(_) if alive.len() > 1 && player.hunts_self() => {
                return Err(Defect::SelfHunt(player.id()));
            }
            Some(_) => *hunted.entry(target).or_default() += 1,
        }
    }
    if let Some((target, found)) = hunted
        .iter()
        .filter(|(_, n)| **n != 1)
        .min_by_key(|(id, _)| **id)
    {
        return Err(Defect::Hunters {
            target: *target,
            found: *found,
        });
    }
    let Some(start) = alive.first() else {
        return Ok(());
    };
    let mut cursor = start.id();
    let mut reached = 0;
    loop {
        reached += 1;
        cursor = known
            .get(&cursor)
            .and_then(|p| p.target())
            .ok_or(Defect::Untargeted(cursor))?;
        if cursor == start.id() || reached > alive.len() {
            break;
        }
    }
    match reached == alive.len() {
        true => Ok(()),
        false => Err(Defect::Split {
            reached,
            alive: alive.len(),
        }),
    }
}

/// Load a game's roster and verify its kill chain.
pub async fn audit(store: &dyn RecordStore, game: ID<Game>) -> Result<(), Error> {
    let roster = store.roster(game).await?;
    verify(&roster).map_err(|defect| Error::chain(game, defect))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Players in a ring, each hunting the next.
    fn ring(n: usize) -> Vec<Player> {
        let game = ID::default();
        let ids = (0..n).map(|_| ID::<Player>::default()).collect::<Vec<_>>();
        ids.iter()
            .enumerate()
            .map(|(i, id)| Player::new(*id, ID::default(), game).with_target(ids[(i + 1) % n]))
            .collect()
    }

    #[test]
    fn ring_is_valid() {
        assert_eq!(verify(&ring(5)), Ok(()));
    }

    #[test]
    fn lone_survivor_hunting_self_is_valid() {
        let mut roster = ring(3);
        let winner = roster[0].id();
        roster[0].retarget(winner);
        roster[1].eliminate();
        roster[2].eliminate();
        assert_eq!(verify(&roster), Ok(()));
    }

    #[test]
    fn nobody_alive_is_valid() {
        let mut roster = ring(2);
        roster.iter_mut().for_each(Player::eliminate);
        assert_eq!(verify(&roster), Ok(()));
    }

    #[test]
    fn two_rings_are_split() {
        let mut roster = ring(2);
        roster.extend(ring(2));
        assert_eq!(
            verify(&roster),
            Err(Defect::Split {
                reached: 2,
                alive: 4
            })
        );
    }

    #[test]
    fn eliminated_target_is_detected() {
        let mut roster = ring(3);
        roster[1].eliminate();
        assert!(matches!(verify(&roster), Err(Defect::DeadTarget { .. })));
    }

    #[test]
    fn self_hunt_with_company_is_detected() {
        let mut roster = ring(3);
        let id = roster[0].id();
        roster[0].retarget(id);
        assert_eq!(verify(&roster), Err(Defect::SelfHunt(id)));
    }

    #[test]
    fn double_hunted_is_detected() {
        let mut roster = ring(3);
        let target = roster[1].id();
        roster[2].retarget(target);
        assert!(matches!(
            verify(&roster),
            Err(Defect::Hunters { found, .. }) if found == 2 || found == 0
        ));
    }

    #[test]
    fn missing_target_is_detected() {
        let mut roster = ring(3);
        roster.push(Player::new(ID::default(), ID::default(), ID::default()));
        assert!(matches!(verify(&roster), Err(Defect::Untargeted(_))));
        let mut roster = ring(2);
        roster[0].retarget(ID::default());
        assert!(matches!(verify(&roster), Err(Defect::Dangling { .. })));
    }
}
