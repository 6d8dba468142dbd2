use treasure_hunt_core::{ConfigError, MapKind};
use treasure_hunt_map::MapCreator;

#[test]
fn known_configurations_create_unsized_maps() {
    let basic = MapCreator::create_map("basic").expect("basic map");
    assert_eq!(basic.kind(), MapKind::Basic);
    assert_eq!(basic.size(), None);
    assert!(!basic.is_generated());

    let hazard = MapCreator::create_map("hazard").expect("hazard map");
    assert_eq!(hazard.kind(), MapKind::Hazard);
}

#[test]
fn configuration_ignores_case_and_whitespace() {
    let map = MapCreator::create_map("  BaSiC\n").expect("basic map");
    assert_eq!(map.kind(), MapKind::Basic);
}

#[test]
fn unknown_configuration_is_rejected() {
    let error = MapCreator::create_map("labyrinth").expect_err("unknown variant");
    assert_eq!(
        error,
        ConfigError::InvalidConfiguration {
            config: "labyrinth".to_owned(),
        }
    );
    assert_eq!(error.to_string(), "invalid map configuration `labyrinth`");
}

#[test]
fn empty_configuration_is_rejected() {
    assert!(matches!(
        MapCreator::create_map(""),
        Err(ConfigError::InvalidConfiguration { .. })
    ));
}

#[test]
fn every_call_returns_an_independent_map() {
    let mut first = MapCreator::create_map("basic").expect("first");
    let second = MapCreator::create_map("basic").expect("second");

    first.set_map_size(5).expect("size first");

    assert_eq!(first.size(), Some(5));
    assert_eq!(second.size(), None);
}
