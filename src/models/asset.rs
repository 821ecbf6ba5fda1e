// ============================================================================
// Enum : Asset
// ============================================================================
// Catalogue fixe des cryptomonnaies proposées dans le sélecteur
//
// CONCEPT RUST : Enum comme catalogue fermé
// - Le compilateur force à gérer tous les cas (exhaustivité)
// - Copy : un Asset se copie librement (pas d'allocation)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Cryptomonnaie sélectionnable dans le dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    Bitcoin,
    Ethereum,
    Litecoin,
}

impl Asset {
    /// Identifiant CoinGecko de l'actif
    ///
    /// CONCEPT RUST : &'static str
    /// - Retourne une string littérale (dans le binaire)
    /// - Pas d'allocation, très efficace
    pub fn id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
            Asset::Litecoin => "litecoin",
        }
    }

    /// Nom affiché dans l'interface
    pub fn label(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
            Asset::Litecoin => "Litecoin",
        }
    }

    /// Retourne tous les actifs du catalogue (pour le sélecteur)
    pub fn all() -> Vec<Asset> {
        vec![Asset::Bitcoin, Asset::Ethereum, Asset::Litecoin]
    }

    /// Retourne l'actif suivant (cycle)
    ///
    /// CONCEPT : Cycle d'états
    /// - Bitcoin → Ethereum → Litecoin → Bitcoin
    /// - Utilisé avec les touches ↓ / j
    pub fn next(&self) -> Asset {
        match self {
            Asset::Bitcoin => Asset::Ethereum,
            Asset::Ethereum => Asset::Litecoin,
            Asset::Litecoin => Asset::Bitcoin, // Boucle
        }
    }

    /// Retourne l'actif précédent (cycle inverse)
    pub fn previous(&self) -> Asset {
        match self {
            Asset::Bitcoin => Asset::Litecoin, // Boucle
            Asset::Ethereum => Asset::Bitcoin,
            Asset::Litecoin => Asset::Ethereum,
        }
    }
}

impl Default for Asset {
    /// Actif par défaut au lancement : Bitcoin
    fn default() -> Self {
        Asset::Bitcoin
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id() {
        assert_eq!(Asset::Bitcoin.id(), "bitcoin");
        assert_eq!(Asset::Ethereum.id(), "ethereum");
        assert_eq!(Asset::Litecoin.id(), "litecoin");
    }

    #[test]
    fn test_asset_cycle() {
        assert_eq!(Asset::Bitcoin.next(), Asset::Ethereum);
        assert_eq!(Asset::Litecoin.next(), Asset::Bitcoin); // Boucle
        assert_eq!(Asset::Bitcoin.previous(), Asset::Litecoin);
        assert_eq!(Asset::Ethereum.previous(), Asset::Bitcoin);
    }

    #[test]
    fn test_asset_cycle_round_trip() {
        // next() puis previous() revient au point de départ
        for asset in Asset::all() {
            assert_eq!(asset.next().previous(), asset);
        }
    }

    #[test]
    fn test_asset_catalog() {
        let all = Asset::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], Asset::default());
    }
}
