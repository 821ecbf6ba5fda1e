// ============================================================================
// Structures : PricePoint et PriceSeries
// ============================================================================
// Représente une observation de prix (timestamp, prix) et la série ordonnée
// renvoyée par l'API CoinGecko pour un actif donné
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : type de chrono pour dates avec timezone UTC
// 2. f64 : floating point 64 bits pour les prix (précision suffisante)
// 3. Vec<T> : séquence ordonnée, ownership des observations
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Une observation de prix : un couple (timestamp, prix)
///
/// La série est ordonnée chronologiquement telle que renvoyée par l'API
/// (timestamps croissants supposés, non vérifiés).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Timestamp de l'observation (UTC)
    pub timestamp: DateTime<Utc>,

    /// Prix en USD
    pub price: f64,
}

impl PricePoint {
    /// Constructeur : crée une nouvelle observation
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Série de prix pour un actif sur une fenêtre de jours donnée
///
/// CONCEPT RUST : Ownership
/// - PriceSeries possède le Vec
/// - Le Vec possède tous les PricePoint
/// - Quand PriceSeries est drop, tout est libéré automatiquement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Identifiant CoinGecko de l'actif (ex: "bitcoin")
    pub asset_id: String,

    /// Fenêtre de jours demandée (1 à 365)
    pub days: u32,

    /// Observations, triées par timestamp croissant
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Crée une nouvelle série vide
    pub fn new(asset_id: String, days: u32) -> Self {
        Self {
            asset_id,
            days,
            points: Vec::new(),
        }
    }

    /// Ajoute une observation en fin de série
    pub fn add_point(&mut self, point: PricePoint) {
        self.points.push(point);
    }

    /// Retourne le nombre d'observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Vérifie si la série est vide
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retourne la première observation
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Retourne l'observation la plus récente
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Calcule le prix minimum sur toute la série
    pub fn min_price(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.price)
            .min_by(|a, b| a.partial_cmp(b).unwrap())
    }

    /// Calcule le prix maximum sur toute la série
    pub fn max_price(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.price)
            .max_by(|a, b| a.partial_cmp(b).unwrap())
    }

    /// Calcule la variation totale en pourcentage (première -> dernière)
    pub fn total_change_percent(&self) -> Option<f64> {
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if first.price == 0.0 {
                return None;
            }
            Some(((last.price - first.price) / first.price) * 100.0)
        } else {
            None
        }
    }

    /// Réduction en clôtures journalières : une observation par jour calendaire
    ///
    /// Groupe les observations par jour UTC et garde la dernière valeur de
    /// chaque jour (last value wins), dans l'ordre des jours.
    ///
    /// CONCEPT : un seul passage suffit
    /// - La série est déjà ordonnée chronologiquement
    /// - Chaque observation écrase la clôture du jour courant, ou ouvre
    ///   un nouveau jour
    pub fn daily_closes(&self) -> Vec<PricePoint> {
        let mut closes: Vec<PricePoint> = Vec::new();

        for point in &self.points {
            let day = point.timestamp.date_naive();
            match closes.last_mut() {
                // Même jour que la dernière clôture : on remplace
                Some(last) if last.timestamp.date_naive() == day => {
                    *last = point.clone();
                }
                // Nouveau jour : on ouvre un nouveau bucket
                _ => closes.push(point.clone()),
            }
        }

        closes
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Helper : construit un timestamp UTC à partir d'une date et heure
    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_series_creation() {
        let series = PriceSeries::new("bitcoin".to_string(), 30);
        assert_eq!(series.asset_id, "bitcoin");
        assert_eq!(series.days, 30);
        assert!(series.is_empty());
    }

    #[test]
    fn test_series_add_point() {
        let mut series = PriceSeries::new("bitcoin".to_string(), 7);
        series.add_point(PricePoint::new(ts(2024, 1, 1, 0), 42000.0));
        series.add_point(PricePoint::new(ts(2024, 1, 1, 1), 42100.0));

        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.last().unwrap().price, 42100.0);
    }

    #[test]
    fn test_min_max_price() {
        let mut series = PriceSeries::new("ethereum".to_string(), 7);
        series.add_point(PricePoint::new(ts(2024, 1, 1, 0), 2200.0));
        series.add_point(PricePoint::new(ts(2024, 1, 1, 1), 2150.0));
        series.add_point(PricePoint::new(ts(2024, 1, 1, 2), 2300.0));

        assert_eq!(series.min_price(), Some(2150.0));
        assert_eq!(series.max_price(), Some(2300.0));
    }

    #[test]
    fn test_min_max_empty() {
        let series = PriceSeries::new("bitcoin".to_string(), 1);
        assert_eq!(series.min_price(), None);
        assert_eq!(series.max_price(), None);
    }

    #[test]
    fn test_total_change_percent() {
        let mut series = PriceSeries::new("bitcoin".to_string(), 7);
        series.add_point(PricePoint::new(ts(2024, 1, 1, 0), 100.0));
        series.add_point(PricePoint::new(ts(2024, 1, 2, 0), 105.0));

        // (105 - 100) / 100 = +5%
        assert_eq!(series.total_change_percent(), Some(5.0));
    }

    #[test]
    fn test_total_change_percent_empty() {
        let series = PriceSeries::new("bitcoin".to_string(), 7);
        assert_eq!(series.total_change_percent(), None);
    }

    #[test]
    fn test_daily_closes_last_value_wins() {
        // Deux observations le même jour : 00:00 à 10, 23:00 à 12
        // La clôture du jour doit être 12 (dernière valeur)
        let mut series = PriceSeries::new("bitcoin".to_string(), 1);
        series.add_point(PricePoint::new(ts(2024, 3, 15, 0), 10.0));
        series.add_point(PricePoint::new(ts(2024, 3, 15, 23), 12.0));

        let closes = series.daily_closes();
        assert_eq!(closes.len(), 1);
        assert_eq!(closes[0].price, 12.0);
    }

    #[test]
    fn test_daily_closes_multiple_days() {
        let mut series = PriceSeries::new("bitcoin".to_string(), 3);
        series.add_point(PricePoint::new(ts(2024, 3, 14, 9), 100.0));
        series.add_point(PricePoint::new(ts(2024, 3, 14, 18), 101.0));
        series.add_point(PricePoint::new(ts(2024, 3, 15, 9), 102.0));
        series.add_point(PricePoint::new(ts(2024, 3, 16, 9), 103.0));
        series.add_point(PricePoint::new(ts(2024, 3, 16, 12), 104.0));

        let closes = series.daily_closes();

        // Trois jours, clôture = dernière valeur de chaque jour
        assert_eq!(closes.len(), 3);
        assert_eq!(closes[0].price, 101.0);
        assert_eq!(closes[1].price, 102.0);
        assert_eq!(closes[2].price, 104.0);
    }

    #[test]
    fn test_daily_closes_empty() {
        let series = PriceSeries::new("bitcoin".to_string(), 1);
        assert!(series.daily_closes().is_empty());
    }
}
