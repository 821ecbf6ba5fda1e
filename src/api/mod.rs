// ============================================================================
// Module : api
// ============================================================================
// Ce module contient tous les clients API pour récupérer les données de
// marché depuis différentes sources (CoinGecko, etc.)
// ============================================================================

pub mod coingecko; // Client API CoinGecko

// Re-export des éléments principaux
pub use coingecko::{fetch_price_series, ApiError};
