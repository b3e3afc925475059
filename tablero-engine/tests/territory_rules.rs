use std::collections::HashSet;

use tablero_engine::{
    CreateGame, ErrorKind, Game, GameRepository, MemoryStore, PlayerSpec, RepositoryError, catalog,
};

fn repo_with_game(players: &[(&str, &str)]) -> (GameRepository<MemoryStore>, Game) {
    let repo = GameRepository::new(MemoryStore::new());
    let game = repo
        .create(CreateGame {
            name: "Test".to_string(),
            date: "2026-08-04".to_string(),
            players: players
                .iter()
                .map(|(name, color)| PlayerSpec {
                    name: (*name).to_string(),
                    color: (*color).to_string(),
                })
                .collect(),
        })
        .unwrap();
    (repo, game)
}

fn assert_points_invariant(game: &Game) {
    for player in &game.players {
        let expected: u32 = player.territories.iter().map(|t| t.points).sum();
        assert_eq!(player.points, expected, "player {} score drifted", player.name);
    }
}

#[test]
fn assigning_a_territory_scores_its_catalog_points() {
    let (repo, game) = repo_with_game(&[("A", "#f00"), ("B", "#0f0")]);
    let player_a = game.players[0].id.clone();

    let updated = repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
    let holder = updated.find_player(&player_a).unwrap();
    assert_eq!(holder.points, 2);
    assert_eq!(holder.territories.len(), 1);

    let owned = &holder.territories[0];
    assert_eq!(owned.id, "brasil");
    assert_eq!(owned.name, "Brasil");
    assert_eq!(owned.owner_id, player_a);
    assert_eq!(owned.units, 0);
    assert_points_invariant(&updated);
}

#[test]
fn an_assigned_territory_conflicts_for_every_player() {
    let (repo, game) = repo_with_game(&[("A", "#f00"), ("B", "#0f0")]);
    let player_a = game.players[0].id.clone();
    let player_b = game.players[1].id.clone();

    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
    let before = repo.get(&game.id).unwrap().unwrap();

    // A different player is rejected and nothing changes.
    let err = repo
        .assign_territory(&game.id, &player_b, "brasil")
        .unwrap_err();
    assert!(matches!(err, RepositoryError::TerritoryAssigned { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let after = repo.get(&game.id).unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(after.find_player(&player_b).unwrap().points, 0);

    // The ownership check does not special-case the current owner.
    let err = repo
        .assign_territory(&game.id, &player_a, "brasil")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(repo.get(&game.id).unwrap().unwrap(), before);
}

#[test]
fn assigning_an_unknown_catalog_id_fails_not_found() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);
    let player_a = game.players[0].id.clone();

    let err = repo
        .assign_territory(&game.id, &player_a, "atlantis")
        .unwrap_err();
    assert!(matches!(err, RepositoryError::TerritoryNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn assigning_to_an_unknown_player_fails_not_found() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);

    let err = repo
        .assign_territory(&game.id, "nobody", "brasil")
        .unwrap_err();
    assert!(matches!(err, RepositoryError::PlayerNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn territory_ownership_is_globally_unique() {
    let (repo, game) = repo_with_game(&[("A", "#f00"), ("B", "#0f0"), ("C", "#00f")]);
    let ids: Vec<String> = game.players.iter().map(|p| p.id.clone()).collect();

    repo.assign_territory(&game.id, &ids[0], "alaska").unwrap();
    repo.assign_territory(&game.id, &ids[1], "brasil").unwrap();
    repo.assign_territory(&game.id, &ids[2], "ucrania").unwrap();
    repo.assign_territory(&game.id, &ids[0], "quebec").unwrap();

    let stored = repo.get(&game.id).unwrap().unwrap();
    let mut seen = HashSet::new();
    for player in &stored.players {
        for territory in &player.territories {
            assert!(seen.insert(territory.id.clone()), "{} held twice", territory.id);
        }
    }
    assert_points_invariant(&stored);
}

#[test]
fn removing_a_territory_recomputes_the_score() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);
    let player_a = game.players[0].id.clone();

    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
    repo.assign_territory(&game.id, &player_a, "peru").unwrap();

    let updated = repo
        .remove_territory(&game.id, &player_a, "brasil")
        .unwrap();
    let holder = updated.find_player(&player_a).unwrap();
    assert_eq!(holder.points, 1);
    assert!(!holder.owns_territory("brasil"));
    assert_points_invariant(&updated);

    // A freed territory can be claimed again, by anyone.
    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
}

#[test]
fn removing_an_unheld_territory_is_a_noop() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);
    let player_a = game.players[0].id.clone();
    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
    let before = repo.get(&game.id).unwrap().unwrap();

    let after = repo
        .remove_territory(&game.id, &player_a, "alaska")
        .unwrap();
    assert_eq!(after, before);
}

#[test]
fn set_units_targets_the_owning_player() {
    let (repo, game) = repo_with_game(&[("A", "#f00"), ("B", "#0f0")]);
    let player_a = game.players[0].id.clone();
    let player_b = game.players[1].id.clone();
    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();
    repo.assign_territory(&game.id, &player_b, "peru").unwrap();

    let updated = repo.set_territory_units(&game.id, "brasil", 7).unwrap();
    let brasil = updated
        .find_player(&player_a)
        .unwrap()
        .territories
        .iter()
        .find(|t| t.id == "brasil")
        .unwrap();
    assert_eq!(brasil.units, 7);

    // The other player's holdings are untouched, and units do not score.
    let peru_holder = updated.find_player(&player_b).unwrap();
    assert_eq!(peru_holder.territories[0].units, 0);
    assert_points_invariant(&updated);
}

#[test]
fn set_units_on_an_unowned_territory_is_a_noop() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);
    let before = repo.get(&game.id).unwrap().unwrap();

    // "ucrania" is in the catalog but unowned; "atlantis" is not in the
    // catalog at all. Neither is an error: the catalog is not searched.
    let after = repo.set_territory_units(&game.id, "ucrania", 4).unwrap();
    assert_eq!(after, before);
    let after = repo.set_territory_units(&game.id, "atlantis", 4).unwrap();
    assert_eq!(after, before);
}

#[test]
fn available_territories_shrink_in_catalog_order() {
    let (repo, game) = repo_with_game(&[("A", "#f00")]);
    let player_a = game.players[0].id.clone();

    let open = repo.available_territories(&game.id).unwrap();
    assert_eq!(open.len(), catalog::all().len());

    repo.assign_territory(&game.id, &player_a, "alaska").unwrap();
    repo.assign_territory(&game.id, &player_a, "brasil").unwrap();

    let open = repo.available_territories(&game.id).unwrap();
    assert_eq!(open.len(), catalog::all().len() - 2);
    assert!(open.iter().all(|t| t.id != "alaska" && t.id != "brasil"));

    // Remaining entries keep their catalog order.
    let catalog_order: Vec<&str> = catalog::all()
        .iter()
        .map(|t| t.id)
        .filter(|id| *id != "alaska" && *id != "brasil")
        .collect();
    let open_order: Vec<&str> = open.iter().map(|t| t.id).collect();
    assert_eq!(open_order, catalog_order);
}
