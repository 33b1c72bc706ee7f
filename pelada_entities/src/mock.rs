use faker_rand::en_us::names::FullName;
use sea_orm::prelude::*;

use crate::prelude::*;

#[derive(Debug)]
pub struct MockOption {
    pub deterministic_uuids: bool,
    pub num_players: u32,
    pub num_goalkeepers: u32,
    pub use_random_names: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            deterministic_uuids: true,
            num_players: 12,
            num_goalkeepers: 2,
            use_random_names: false,
        }
    }
}

pub fn make_mock_pelada() -> (Pelada, Vec<Player>) {
    make_mock_pelada_with_options(Default::default())
}

/// Builds a pelada with a roster of players. With deterministic uuids, the
/// pelada is 1 and players start at 2000. Ratings cycle 10.0 down to 3.0 in
/// half-point steps so every mock roster has a usable spread.
pub fn make_mock_pelada_with_options(options: MockOption) -> (Pelada, Vec<Player>) {
    assert!(options.num_goalkeepers <= options.num_players);

    let pelada_uuid = if options.deterministic_uuids {
        Uuid::from_u128(1)
    } else {
        Uuid::new_v4()
    };
    let pelada = Pelada {
        uuid: pelada_uuid,
        name: "Pelada de Quarta".into(),
    };

    let positions = [
        PlayerPosition::Defender,
        PlayerPosition::Midfielder,
        PlayerPosition::Forward,
    ];

    let players = (0..options.num_players)
        .map(|i| {
            let uuid = if options.deterministic_uuids {
                Uuid::from_u128(2000 + i as u128)
            } else {
                Uuid::new_v4()
            };
            let name = if options.use_random_names {
                rand::random::<FullName>().to_string()
            } else {
                format!("Player {}", i)
            };
            let position = if i < options.num_goalkeepers {
                Some(PlayerPosition::Goalkeeper)
            } else if i % 4 == 3 {
                None
            } else {
                Some(positions[(i % 3) as usize])
            };
            Player {
                uuid,
                pelada_id: pelada_uuid,
                name,
                rating: 10.0 - 0.5 * ((i % 15) as f64),
                position,
                is_active: true,
                is_waiting_list: false,
            }
        })
        .collect();

    (pelada, players)
}

/// Saves a freshly built mock pelada and roster, for integration tests.
pub async fn save_mock_pelada<C>(
    db: &C,
    options: MockOption,
) -> Result<(Pelada, Vec<Player>), anyhow::Error>
where
    C: sea_orm::ConnectionTrait,
{
    let (pelada, players) = make_mock_pelada_with_options(options);
    pelada.save(db, true).await?;
    for player in players.iter() {
        player.save(db, true).await?;
    }
    Ok((pelada, players))
}
