//! Static territory reference data.
//!
//! The catalog is the fixed board: every territory a session can hand
//! out, with its display name and the score value of holding it. Entries
//! are declaration-ordered, unique by id, and never change at runtime.

use serde::Serialize;

/// A territory as the board defines it, before anyone owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogTerritory {
    pub id: &'static str,
    pub name: &'static str,
    pub points: u32,
}

const TERRITORIES: [CatalogTerritory; 20] = [
    // Norteamérica
    CatalogTerritory { id: "alaska", name: "Alaska", points: 1 },
    CatalogTerritory { id: "alberta", name: "Alberta", points: 1 },
    CatalogTerritory { id: "america_central", name: "América Central", points: 1 },
    CatalogTerritory { id: "estados_unidos_orientales", name: "Estados Unidos Orientales", points: 1 },
    CatalogTerritory { id: "groenlandia", name: "Groenlandia", points: 1 },
    CatalogTerritory { id: "territorio_noroccidental", name: "Territorio Noroccidental", points: 1 },
    CatalogTerritory { id: "ontario", name: "Ontario", points: 1 },
    CatalogTerritory { id: "quebec", name: "Quebec", points: 1 },
    CatalogTerritory { id: "estados_unidos_occidentales", name: "Estados Unidos Occidentales", points: 1 },
    // Sudamérica
    CatalogTerritory { id: "argentina", name: "Argentina", points: 1 },
    CatalogTerritory { id: "brasil", name: "Brasil", points: 2 },
    CatalogTerritory { id: "peru", name: "Perú", points: 1 },
    CatalogTerritory { id: "venezuela", name: "Venezuela", points: 1 },
    // Europa
    CatalogTerritory { id: "gran_bretana", name: "Gran Bretaña", points: 2 },
    CatalogTerritory { id: "islandia", name: "Islandia", points: 1 },
    CatalogTerritory { id: "europa_del_norte", name: "Europa del Norte", points: 2 },
    CatalogTerritory { id: "escandinavia", name: "Escandinavia", points: 2 },
    CatalogTerritory { id: "europa_del_sur", name: "Europa del Sur", points: 2 },
    CatalogTerritory { id: "ucrania", name: "Ucrania", points: 2 },
    CatalogTerritory { id: "europa_occidental", name: "Europa Occidental", points: 2 },
];

/// All catalog territories, in declaration order.
#[must_use]
pub const fn all() -> &'static [CatalogTerritory] {
    &TERRITORIES
}

/// Look up a single territory by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static CatalogTerritory> {
    TERRITORIES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn find_resolves_known_ids() {
        let brasil = find("brasil").unwrap();
        assert_eq!(brasil.name, "Brasil");
        assert_eq!(brasil.points, 2);
        assert!(find("atlantis").is_none());
    }

    #[test]
    fn declaration_order_is_stable() {
        assert_eq!(all().first().map(|t| t.id), Some("alaska"));
        assert_eq!(all().last().map(|t| t.id), Some("europa_occidental"));
    }
}
