use std::fs;

use typing_content::ContentFactory;
use typing_core::{GameState, NodeId, UpgradeId};

#[test]
fn bundled_content_loads() {
    let content = ContentFactory::bundled().load_all().expect("bundled data is valid");

    assert_eq!(content.config.total_levels, 20);
    assert_eq!(content.config.wall.rings.len(), 3);
    assert_eq!(content.upgrades.root(), &NodeId::new("core"));
    assert!(content.words.len() > 50);

    let shield = content
        .upgrades
        .node(&NodeId::new("shield"))
        .expect("shield node");
    assert_eq!(shield.upgrade_id, UpgradeId::Shield);
}

#[test]
fn bundled_content_builds_a_controller() {
    let flow = ContentFactory::bundled()
        .load_all()
        .and_then(|content| content.into_controller(42))
        .expect("controller");
    assert_eq!(flow.state(), GameState::Menu);
    assert_eq!(flow.highest_unlocked_level(), 1);
}

#[test]
fn invalid_config_in_directory_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bundled = ContentFactory::bundled();
    for name in ["upgrades.ron", "words.ron"] {
        fs::copy(bundled.data_dir().join(name), dir.path().join(name)).expect("copy");
    }
    fs::write(
        dir.path().join("config.toml"),
        "total_levels = 5\n[words]\nboss_level = 9\n",
    )
    .expect("write config");

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(err.to_string().contains("boss level 9"));
}

#[test]
fn cyclic_upgrade_graph_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("upgrades.ron"),
        r#"(
            root: "a",
            nodes: [
                (node_id: "a", upgrade_id: MaxHp, max_level: 1, costs_per_level: [1], values_per_level: [4.0], connected_to: ["b"]),
                (node_id: "b", upgrade_id: MaxEnergy, max_level: 1, costs_per_level: [1], values_per_level: [12.0], connected_to: ["a"]),
            ],
        )"#,
    )
    .expect("write graph");

    assert!(ContentFactory::new(dir.path()).load_upgrades().is_err());
}
