use treasure_hunt_core::{MapKind, PlayerId, PlayerStatus, Position, TileType};
use treasure_hunt_map::Map;
use treasure_hunt_system_session::{RoundReport, Session, SessionConfig, SetupError, TurnError};

/// Treasure in the corner with a single grass tile beside it, fenced by water.
fn corner_map() -> Map {
    use TileType::{Grass as G, Treasure as T, Water as W};
    Map::from_rows(
        MapKind::Basic,
        vec![
            vec![T, G, W, G, G],
            vec![W, W, G, G, G],
            vec![G, G, G, G, G],
            vec![G, G, G, G, G],
            vec![G, G, G, G, G],
        ],
    )
    .expect("valid layout")
}

fn corner_session(players: u8, teams: Option<u8>) -> Session {
    let config = SessionConfig {
        players,
        teams,
        ..SessionConfig::default()
    };
    Session::with_map(config, corner_map()).expect("session")
}

fn ids(session: &Session) -> Vec<PlayerId> {
    session.players().iter().map(|player| player.id()).collect()
}

const START: Position = Position::new(1, 0);

#[test]
fn everybody_starts_on_the_only_winnable_tile() {
    let session = corner_session(3, None);
    for player in session.players() {
        assert_eq!(player.start_position(), Some(START));
        assert_eq!(player.position(), Some(START));
    }
}

#[test]
fn stepping_onto_the_treasure_wins() {
    let mut session = corner_session(2, None);
    let players = ids(&session);

    assert_eq!(session.submit_move(players[0], 'L'), Ok(PlayerStatus::Win));
    assert_eq!(
        session.submit_move(players[1], 'u'),
        Err(TurnError::OutsideMap {
            player: players[1],
            destination: Position::new(1, -1),
        })
    );

    let report = session.resolve_round().expect("resolve");
    assert_eq!(
        report,
        RoundReport {
            round: 1,
            winners: vec![players[0]],
            drowned: Vec::new(),
        }
    );
    assert!(report.is_decided());
}

#[test]
fn moves_off_the_map_change_nothing() {
    let mut session = corner_session(2, None);
    let player = ids(&session)[0];

    assert!(matches!(
        session.submit_move(player, 'u'),
        Err(TurnError::OutsideMap { .. })
    ));
    let player = session.player(player).expect("player");
    assert_eq!(player.position(), Some(START));
    assert_eq!(player.history(), &[START]);
}

#[test]
fn drowned_players_return_to_their_start() {
    let mut session = corner_session(2, None);
    let players = ids(&session);

    assert_eq!(
        session.submit_move(players[0], 'd'),
        Ok(PlayerStatus::Death)
    );
    assert_eq!(
        session.submit_move(players[1], 'r'),
        Ok(PlayerStatus::Death)
    );
    assert_eq!(
        session.player(players[0]).and_then(|player| player.position()),
        Some(Position::new(1, 1)),
        "drowning takes effect when the round is resolved"
    );

    let report = session.resolve_round().expect("resolve");
    assert_eq!(report.drowned, players);
    assert!(!report.is_decided());
    for id in &players {
        let player = session.player(*id).expect("player");
        assert_eq!(player.position(), Some(START));
        assert_eq!(player.history(), &[START]);
    }
    assert_eq!(session.round(), 1);
}

#[test]
fn team_mates_share_discoveries() {
    let mut session = corner_session(4, Some(2));
    let players = ids(&session);
    let mover = players[0];
    let mate = session
        .team_of(mover)
        .and_then(|team| team.players().iter().copied().find(|id| *id != mover))
        .expect("team of two");

    let _ = session.submit_move(mover, 'd').expect("move");

    let team = session.team_of(mate).expect("team");
    assert!(team.has_discovered(START));
    assert!(team.has_discovered(Position::new(1, 1)));
    let other = session
        .teams()
        .iter()
        .find(|candidate| candidate.id() != team.id())
        .expect("second team");
    assert!(!other.has_discovered(Position::new(1, 1)));
}

#[test]
fn rounds_are_counted_even_when_nothing_happens() {
    let mut session = corner_session(2, None);
    for round in 1..=3 {
        let report = session.resolve_round().expect("resolve");
        assert_eq!(report.round, round);
        assert!(report.winners.is_empty());
        assert!(report.drowned.is_empty());
    }
}

#[test]
fn generated_sessions_respect_map_settings() {
    let config = SessionConfig {
        players: 5,
        map_size: 12,
        map: "Hazard".to_owned(),
        teams: Some(2),
        seed: 42,
    };
    let session = Session::new(config).expect("session");
    assert_eq!(session.map().kind(), MapKind::Hazard);
    assert_eq!(session.map().size(), Some(12));
    assert_eq!(session.teams().len(), 2);
    assert_eq!(session.config().seed, 42);
}

#[test]
fn crowded_sessions_need_larger_maps() {
    let config = SessionConfig {
        players: 6,
        map_size: 6,
        ..SessionConfig::default()
    };
    assert_eq!(
        Session::new(config).map(|_| ()),
        Err(SetupError::InvalidMapSize {
            requested: 6,
            minimum: 8,
        })
    );
}
