//! Session data model: games, players, cards, and owned territories.
//!
//! Serialized field names are pinned to the persisted layout (`camelCase`
//! struct fields, lowercase enum tags), so stored collections survive the
//! engine evolving around them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::catalog::CatalogTerritory;

/// Cards held by a single player, in issuance order.
pub type CardHand = SmallVec<[Card; 8]>;

/// The suit printed on an issued card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

impl CardType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Infantry => "infantry",
            Self::Cavalry => "cavalry",
            Self::Artillery => "artillery",
            Self::Wild => "wild",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infantry" => Ok(Self::Infantry),
            "cavalry" => Ok(Self::Cavalry),
            "artillery" => Ok(Self::Artillery),
            "wild" => Ok(Self::Wild),
            _ => Err(()),
        }
    }
}

/// Lifecycle state of a session. Both states are reachable from each
/// other; nothing transitions implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Finished,
}

impl GameStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(()),
        }
    }
}

/// A card issued to a player. Ids are unique within the session; the
/// type carries no uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
}

/// A catalog territory copied into a player's holdings, with a mutable
/// garrison count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedTerritory {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub owner_id: String,
    pub units: u32,
}

impl OwnedTerritory {
    /// Copy a catalog entry into an owned instance with an empty garrison.
    #[must_use]
    pub fn claim(entry: &CatalogTerritory, owner_id: &str) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            points: entry.points,
            owner_id: owner_id.to_string(),
            units: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub color: String,
    pub cards: CardHand,
    pub territories: Vec<OwnedTerritory>,
    /// Derived: always the sum of owned territories' point values.
    pub points: u32,
}

impl Player {
    /// Recompute the derived score from the territories held right now.
    pub fn recompute_points(&mut self) {
        self.points = self.territories.iter().map(|t| t.points).sum();
    }

    #[must_use]
    pub fn owns_territory(&self, territory_id: &str) -> bool {
        self.territories.iter().any(|t| t.id == territory_id)
    }
}

/// One tracked game session. Player order is creation order and also
/// turn order; `current_turn` indexes into `players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    pub date: String,
    pub status: GameStatus,
    pub players: Vec<Player>,
    pub current_turn: usize,
}

impl Game {
    #[must_use]
    pub fn find_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn find_player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Whether any player in the session currently holds the territory.
    #[must_use]
    pub fn territory_assigned(&self, territory_id: &str) -> bool {
        self.players.iter().any(|p| p.owns_territory(territory_id))
    }
}

/// Request payload for creating a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGame {
    pub name: String,
    pub date: String,
    pub players: Vec<PlayerSpec>,
}

/// A player as supplied at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub color: String,
}
