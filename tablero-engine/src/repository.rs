//! Validated session operations over a persistent store.
//!
//! Every mutating operation runs the same sequence: load the stored
//! collection, locate the target game (and player where applicable),
//! validate, apply the change, recompute derived scores, and write the
//! whole collection back. Validation happens strictly before mutation,
//! so a failed call leaves the stored collection untouched.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::GameStore;
use crate::catalog::{self, CatalogTerritory};
use crate::ids;
use crate::state::{Card, CardHand, CardType, CreateGame, Game, GameStatus, OwnedTerritory, Player};

/// Broad classification of repository failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced game, player, or catalog territory does not exist.
    NotFound,
    /// The mutation would violate an ownership invariant.
    Conflict,
    /// The operation is structurally impossible for the current data.
    InvalidState,
    /// The persistence substrate failed.
    Storage,
}

/// Errors raised by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("game {id} not found")]
    GameNotFound { id: String },
    #[error("player {id} not found")]
    PlayerNotFound { id: String },
    #[error("territory {id} not found")]
    TerritoryNotFound { id: String },
    #[error("territory {id} already assigned")]
    TerritoryAssigned { id: String },
    #[error("game has no players")]
    NoPlayers,
    #[error("storage backend failed: {0}")]
    Storage(#[from] E),
}

impl<E> RepositoryError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::GameNotFound { .. }
            | Self::PlayerNotFound { .. }
            | Self::TerritoryNotFound { .. } => ErrorKind::NotFound,
            Self::TerritoryAssigned { .. } => ErrorKind::Conflict,
            Self::NoPlayers => ErrorKind::InvalidState,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// The session engine: CRUD plus the validated mutation operations over
/// the stored collection of games.
///
/// The store sits behind a mutex and each operation holds the lock for
/// its complete load-validate-mutate-save sequence, so interleaved
/// callers serialize instead of overwriting each other's writes.
pub struct GameRepository<S: GameStore> {
    store: Mutex<S>,
}

impl<S: GameStore> GameRepository<S> {
    /// Create a repository over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Consume the repository and hand back the underlying store.
    pub fn into_store(self) -> S {
        self.store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // A poisoned lock only means another caller panicked mid-write;
        // nothing cached survives it, the collection is re-read from the
        // store on every operation.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One locked load-validate-mutate-save pass over a single game,
    /// returning the updated copy.
    fn mutate_game<F>(&self, game_id: &str, apply: F) -> Result<Game, RepositoryError<S::Error>>
    where
        F: FnOnce(&mut Game) -> Result<(), RepositoryError<S::Error>>,
    {
        let mut store = self.lock();
        let mut games = store.load_all()?;
        let game = games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| RepositoryError::GameNotFound {
                id: game_id.to_string(),
            })?;
        apply(game)?;
        let updated = game.clone();
        store.save_all(&games)?;
        Ok(updated)
    }

    /// Create a new game from the given spec and persist it.
    ///
    /// Players are stored in spec order, which is also turn order. The
    /// game starts `active` on the first player's turn, every hand and
    /// territory list empty.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NoPlayers`] when the spec carries no
    /// players, or `Storage` when the collection cannot be written.
    pub fn create(&self, spec: CreateGame) -> Result<Game, RepositoryError<S::Error>> {
        if spec.players.is_empty() {
            return Err(RepositoryError::NoPlayers);
        }
        let mut store = self.lock();
        let mut games = store.load_all()?;

        let players = spec
            .players
            .into_iter()
            .map(|p| Player {
                id: ids::new_id(),
                name: p.name,
                color: p.color,
                cards: CardHand::new(),
                territories: Vec::new(),
                points: 0,
            })
            .collect::<Vec<_>>();

        let game = Game {
            id: ids::new_id(),
            name: spec.name,
            date: spec.date,
            status: GameStatus::Active,
            players,
            current_turn: 0,
        };
        log::debug!("created game {} ({} players)", game.id, game.players.len());
        games.push(game.clone());
        store.save_all(&games)?;
        Ok(game)
    }

    /// Look up a game by id. Absence is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the collection cannot be read.
    pub fn get(&self, game_id: &str) -> Result<Option<Game>, RepositoryError<S::Error>> {
        let store = self.lock();
        let games = store.load_all()?;
        Ok(games.into_iter().find(|g| g.id == game_id))
    }

    /// Replace the stored game matching `game.id` wholesale.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when no game with that id exists.
    pub fn update(&self, game: Game) -> Result<Game, RepositoryError<S::Error>> {
        let mut store = self.lock();
        let mut games = store.load_all()?;
        let slot = games
            .iter_mut()
            .find(|g| g.id == game.id)
            .ok_or_else(|| RepositoryError::GameNotFound {
                id: game.id.clone(),
            })?;
        *slot = game.clone();
        store.save_all(&games)?;
        Ok(game)
    }

    /// Remove a game if present. Deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the collection cannot be read or written.
    pub fn delete(&self, game_id: &str) -> Result<(), RepositoryError<S::Error>> {
        let mut store = self.lock();
        let mut games = store.load_all()?;
        let before = games.len();
        games.retain(|g| g.id != game_id);
        if games.len() != before {
            log::debug!("deleted game {game_id}");
        }
        store.save_all(&games)?;
        Ok(())
    }

    /// All stored games, in store order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the collection cannot be read.
    pub fn list_all(&self) -> Result<Vec<Game>, RepositoryError<S::Error>> {
        Ok(self.lock().load_all()?)
    }

    /// Change a game's display name, leaving everything else untouched.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when the game is unknown.
    pub fn rename(&self, game_id: &str, name: &str) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            game.name = name.to_string();
            Ok(())
        })
    }

    /// Append a freshly issued card to a player's hand. Hand size is
    /// unbounded and card types may repeat.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` or `PlayerNotFound` when either is unknown.
    pub fn issue_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_type: CardType,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            let player = find_player_mut(game, player_id)?;
            player.cards.push(Card {
                id: ids::new_id(),
                card_type,
            });
            Ok(())
        })
    }

    /// Remove a card from a player's hand. An id the player does not
    /// hold is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` or `PlayerNotFound` when either is unknown.
    pub fn remove_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: &str,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            let player = find_player_mut(game, player_id)?;
            player.cards.retain(|c| c.id != card_id);
            Ok(())
        })
    }

    /// Assign a catalog territory to a player and recompute their score.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound`/`PlayerNotFound`/`TerritoryNotFound` when a
    /// reference is unknown, and `TerritoryAssigned` when any player in
    /// the game already holds the territory, the current owner included.
    pub fn assign_territory(
        &self,
        game_id: &str,
        player_id: &str,
        territory_id: &str,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            if game.find_player(player_id).is_none() {
                return Err(RepositoryError::PlayerNotFound {
                    id: player_id.to_string(),
                });
            }
            let entry =
                catalog::find(territory_id).ok_or_else(|| RepositoryError::TerritoryNotFound {
                    id: territory_id.to_string(),
                })?;
            if game.territory_assigned(territory_id) {
                return Err(RepositoryError::TerritoryAssigned {
                    id: territory_id.to_string(),
                });
            }
            let player = find_player_mut(game, player_id)?;
            player.territories.push(OwnedTerritory::claim(entry, player_id));
            player.recompute_points();
            Ok(())
        })
    }

    /// Return an owned territory to the unassigned pool and recompute the
    /// player's score. A territory the player does not hold is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` or `PlayerNotFound` when either is unknown.
    pub fn remove_territory(
        &self,
        game_id: &str,
        player_id: &str,
        territory_id: &str,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            let player = find_player_mut(game, player_id)?;
            player.territories.retain(|t| t.id != territory_id);
            player.recompute_points();
            Ok(())
        })
    }

    /// Overwrite the garrison count on whichever player holds the
    /// territory. When nobody holds it the game persists unchanged; the
    /// catalog is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when the game is unknown.
    pub fn set_territory_units(
        &self,
        game_id: &str,
        territory_id: &str,
        units: u32,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            let held = game
                .players
                .iter_mut()
                .find_map(|p| p.territories.iter_mut().find(|t| t.id == territory_id));
            if let Some(territory) = held {
                territory.units = units;
            }
            Ok(())
        })
    }

    /// Overwrite the game status. Every enumerated value is accepted, in
    /// either direction.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when the game is unknown.
    pub fn set_status(
        &self,
        game_id: &str,
        status: GameStatus,
    ) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            game.status = status;
            Ok(())
        })
    }

    /// Rotate `current_turn` to the next player, wrapping after the last.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when the game is unknown, and
    /// [`RepositoryError::NoPlayers`] when there is nobody to rotate
    /// through.
    pub fn advance_turn(&self, game_id: &str) -> Result<Game, RepositoryError<S::Error>> {
        self.mutate_game(game_id, |game| {
            if game.players.is_empty() {
                return Err(RepositoryError::NoPlayers);
            }
            game.current_turn = (game.current_turn + 1) % game.players.len();
            Ok(())
        })
    }

    /// Catalog territories not currently held by any player in the game,
    /// in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `GameNotFound` when the game is unknown.
    pub fn available_territories(
        &self,
        game_id: &str,
    ) -> Result<Vec<CatalogTerritory>, RepositoryError<S::Error>> {
        let store = self.lock();
        let games = store.load_all()?;
        let game = games
            .iter()
            .find(|g| g.id == game_id)
            .ok_or_else(|| RepositoryError::GameNotFound {
                id: game_id.to_string(),
            })?;
        Ok(catalog::all()
            .iter()
            .filter(|t| !game.territory_assigned(t.id))
            .copied()
            .collect())
    }
}

fn find_player_mut<'a, E>(
    game: &'a mut Game,
    player_id: &str,
) -> Result<&'a mut Player, RepositoryError<E>>
where
    E: std::error::Error + Send + Sync + 'static,
{
    game.players
        .iter_mut()
        .find(|p| p.id == player_id)
        .ok_or_else(|| RepositoryError::PlayerNotFound {
            id: player_id.to_string(),
        })
}
