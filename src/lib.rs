// ============================================================================
// LazyGecko - Library
// ============================================================================
// Expose les modules publics pour les tests et les binaires
// ============================================================================

pub mod api; // Client API CoinGecko
pub mod app; // État de l'application
pub mod models; // Structures de données
pub mod ui; // Interface utilisateur
