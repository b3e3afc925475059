//! Tablero Session Engine
//!
//! Platform-agnostic core for tracking board-game sessions: the players,
//! the cards they hold, the territories they control, and the scores
//! derived from those holdings. This crate provides the full data model
//! and the validated mutation operations without UI or platform-specific
//! dependencies; persistence is abstracted behind [`GameStore`].

pub mod catalog;
pub mod ids;
pub mod repository;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use catalog::CatalogTerritory;
pub use repository::{ErrorKind, GameRepository, RepositoryError};
pub use state::{
    Card, CardHand, CardType, CreateGame, Game, GameStatus, OwnedTerritory, Player, PlayerSpec,
};
pub use store::MemoryStore;

/// Trait for abstracting session persistence
/// Platform-specific implementations should provide this
pub trait GameStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every stored game.
    ///
    /// Stored content that is absent or no longer decodes is treated as
    /// "no games yet" and yields an empty collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the persistence substrate itself fails.
    fn load_all(&self) -> Result<Vec<Game>, Self::Error>;

    /// Serialize and persist the full collection, replacing any prior
    /// content.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or written.
    fn save_all(&mut self, games: &[Game]) -> Result<(), Self::Error>;
}
