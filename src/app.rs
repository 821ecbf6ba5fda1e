// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Garantit la cohérence de l'état
//
// L'état du fetch est explicite : le dernier résultat est une simple valeur
// (Option<PriceSeries>), remplacée en bloc à chaque fetch réussi. Une erreur
// de fetch laisse le résultat précédent intact.
// ============================================================================

use crate::api::ApiError;
use crate::models::{Asset, PriceSeries, DEFAULT_DAYS, MAX_DAYS, MIN_DAYS};

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Actif sélectionné dans le catalogue
    pub asset: Asset,

    /// Fenêtre de jours demandée (slider, bornée à [1, 365])
    pub days: u32,

    /// Dernière série récupérée (None avant le premier fetch)
    /// CONCEPT RUST : Option pour les données optionnelles
    /// - Some(series) : données affichées dans les graphiques
    /// - None : le dashboard affiche l'invite
    pub result: Option<PriceSeries>,

    /// Dernière erreur de fetch (None si le dernier fetch a réussi)
    /// Affichée dans un bandeau, sans toucher au résultat précédent
    pub error: Option<ApiError>,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Indique si un fetch est en cours
    /// - true : affiche un indicateur de chargement, le trigger est ignoré
    /// - false : affichage normal
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Indique si le bloc d'informations est affiché
    /// Indépendant de l'état du fetch
    pub show_info: bool,
}

impl App {
    /// Crée une nouvelle instance de App avec les réglages par défaut
    pub fn new() -> Self {
        Self {
            running: true,
            asset: Asset::default(),
            days: DEFAULT_DAYS,
            result: None,
            error: None,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            show_info: false,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Rien à faire pour l'instant (pas d'animation ni de rafraîchissement
    /// automatique)
    pub fn tick(&mut self) {}

    // ========================================================================
    // Sélecteur d'actif
    // ========================================================================

    /// Passe à l'actif suivant du catalogue (cycle)
    pub fn next_asset(&mut self) {
        self.asset = self.asset.next();
    }

    /// Passe à l'actif précédent du catalogue (cycle)
    pub fn previous_asset(&mut self) {
        self.asset = self.asset.previous();
    }

    // ========================================================================
    // Slider de jours
    // ========================================================================

    /// Augmente la fenêtre de jours, bornée à MAX_DAYS
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_add() ne déborde jamais
    /// - min() applique la borne haute du slider
    pub fn increase_days(&mut self, step: u32) {
        self.days = self.days.saturating_add(step).min(MAX_DAYS);
    }

    /// Diminue la fenêtre de jours, bornée à MIN_DAYS
    pub fn decrease_days(&mut self, step: u32) {
        self.days = self.days.saturating_sub(step).max(MIN_DAYS);
    }

    // ========================================================================
    // Résultat du fetch
    // ========================================================================

    /// Enregistre une série récupérée avec succès
    ///
    /// Un succès efface l'erreur précédente : le bandeau disparaît
    pub fn set_result(&mut self, series: PriceSeries) {
        self.result = Some(series);
        self.error = None;
    }

    /// Enregistre une erreur de fetch
    ///
    /// Le résultat précédent reste affiché tel quel
    pub fn set_error(&mut self, error: ApiError) {
        self.error = Some(error);
    }

    /// Vérifie si une série est disponible pour l'affichage
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    // ========================================================================
    // Chargement
    // ========================================================================

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Vérifie si un fetch est en cours
    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Bloc d'informations
    // ========================================================================

    /// Affiche ou masque le bloc d'informations
    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    // ========================================================================
    // Confirmation de quit
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricePoint, PriceSeries};
    use chrono::{DateTime, Utc};

    /// Helper : une erreur de décodage pour les tests
    fn decode_error() -> ApiError {
        ApiError::Decode(serde_json::from_str::<i32>("pas du json").unwrap_err())
    }

    /// Helper : une série d'un point
    fn one_point_series() -> PriceSeries {
        let mut series = PriceSeries::new("bitcoin".to_string(), 30);
        let epoch: DateTime<Utc> = DateTime::from_timestamp(0, 0).unwrap();
        series.add_point(PricePoint::new(epoch, 42000.0));
        series
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert_eq!(app.asset, Asset::Bitcoin);
        assert_eq!(app.days, 30);
        assert!(!app.has_result());
        assert!(app.error.is_none());
        assert!(!app.show_info);
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        assert!(app.is_running());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();

        // Première pression : on attend la confirmation
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        // Autre touche : annulation
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        assert!(app.is_running());
    }

    #[test]
    fn test_asset_cycling() {
        let mut app = App::new();

        app.next_asset();
        assert_eq!(app.asset, Asset::Ethereum);

        app.next_asset();
        assert_eq!(app.asset, Asset::Litecoin);

        // Boucle complète
        app.next_asset();
        assert_eq!(app.asset, Asset::Bitcoin);

        app.previous_asset();
        assert_eq!(app.asset, Asset::Litecoin);
    }

    #[test]
    fn test_days_clamped_high() {
        let mut app = App::new();

        app.days = 360;
        app.increase_days(7);
        assert_eq!(app.days, 365); // Borné à MAX_DAYS

        app.increase_days(1);
        assert_eq!(app.days, 365);
    }

    #[test]
    fn test_days_clamped_low() {
        let mut app = App::new();

        app.days = 3;
        app.decrease_days(7);
        assert_eq!(app.days, 1); // Borné à MIN_DAYS

        app.decrease_days(1);
        assert_eq!(app.days, 1);
    }

    #[test]
    fn test_days_steps() {
        let mut app = App::new();
        assert_eq!(app.days, 30);

        app.increase_days(1);
        assert_eq!(app.days, 31);

        app.decrease_days(7);
        assert_eq!(app.days, 24);
    }

    #[test]
    fn test_set_result_clears_error() {
        let mut app = App::new();

        app.set_error(decode_error());
        assert!(app.error.is_some());

        app.set_result(one_point_series());
        assert!(app.has_result());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_set_error_keeps_result() {
        let mut app = App::new();

        app.set_result(one_point_series());
        app.set_error(decode_error());

        // Le bandeau d'erreur s'affiche, le résultat précédent reste
        assert!(app.has_result());
        assert!(app.error.is_some());
    }

    #[test]
    fn test_loading_state() {
        let mut app = App::new();

        app.start_loading(Some("Chargement bitcoin...".to_string()));
        assert!(app.is_loading_data());
        assert!(app.loading_message.is_some());

        app.stop_loading();
        assert!(!app.is_loading_data());
        assert!(app.loading_message.is_none());
    }

    #[test]
    fn test_toggle_info() {
        let mut app = App::new();
        assert!(!app.show_info);

        app.toggle_info();
        assert!(app.show_info);

        app.toggle_info();
        assert!(!app.show_info);
    }
}
