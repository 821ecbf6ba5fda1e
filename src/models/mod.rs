// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod asset; // Déclaration du module asset (fichier asset.rs)
pub mod price; // Déclaration du module price (fichier price.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazygecko::models::price::PriceSeries;
// On peut faire : use lazygecko::models::PriceSeries;
pub use asset::Asset;
pub use price::{PricePoint, PriceSeries};

/// Bornes de la fenêtre de jours (slider du dashboard)
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

/// Fenêtre par défaut au lancement
pub const DEFAULT_DAYS: u32 = 30;
