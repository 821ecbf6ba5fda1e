// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// Structure de l'écran, de haut en bas :
// - Header : titre de l'application
// - Réglages : sélecteur d'actif, slider de jours (gauge), statut
// - Bandeau d'erreur (seulement si le dernier fetch a échoué)
// - Zone principale : invite / chargement / grille des résultats
// - Bloc d'informations (optionnel, touche 'i')
// - Footer : raccourcis clavier
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{Asset, MAX_DAYS};
use crate::ui::chart;

/// Dessine l'interface complète
///
/// CONCEPT RATATUI : Layout dynamique
/// - Les contraintes dépendent de l'état (bandeau d'erreur, bloc d'infos)
/// - On garde un curseur d'index pour retrouver chaque zone
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Réglages
    ];
    if app.error.is_some() {
        constraints.push(Constraint::Length(3)); // Bandeau d'erreur
    }
    constraints.push(Constraint::Min(0)); // Zone principale
    if app.show_info {
        constraints.push(Constraint::Length(8)); // Bloc d'informations
    }
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size)
        .to_vec();

    let mut index = 0;
    render_header(frame, chunks[index]);
    index += 1;

    render_settings(frame, app, chunks[index]);
    index += 1;

    if app.error.is_some() {
        render_error_banner(frame, app, chunks[index]);
        index += 1;
    }

    render_main(frame, app, chunks[index]);
    index += 1;

    if app.show_info {
        render_info_block(frame, chunks[index]);
        index += 1;
    }

    render_footer(frame, app, chunks[index]);
}

// ============================================================================
// Header : Titre de l'application
// ============================================================================

/// Dessine le header avec le titre
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyGecko ")
        .title_alignment(Alignment::Center);

    let text = vec![Line::from(Span::styled(
        "📊 Analyse du marché crypto · API CoinGecko",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Réglages : actif, jours, statut
// ============================================================================

/// Dessine la barre de réglages
fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Sélecteur d'actif
            Constraint::Percentage(35), // Slider de jours
            Constraint::Percentage(30), // Statut
        ])
        .split(area)
        .to_vec();

    render_asset_selector(frame, app, chunks[0]);
    render_days_gauge(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
}

/// Dessine le sélecteur d'actif : le catalogue complet, sélection en surbrillance
fn render_asset_selector(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Cryptomonnaie ");

    // CONCEPT RUST : Iterator chaining
    // - Un Span par actif, séparés par des espaces
    // - L'actif sélectionné est inversé (REVERSED)
    let mut spans: Vec<Span> = Vec::new();
    for asset in Asset::all() {
        let style = if asset == app.asset {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", asset.label()), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le slider de jours sous forme de gauge
fn render_days_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Fenêtre (jours) ");

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(f64::from(app.days) / f64::from(MAX_DAYS))
        .label(format!("{} jours", app.days));

    frame.render_widget(gauge, area);
}

/// Dessine le statut du dernier fetch
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Statut ");

    let line = if app.is_loading_data() {
        Line::from(Span::styled(
            "⏳ Chargement...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(series) = &app.result {
        let change = series.total_change_percent().unwrap_or(0.0);
        let color = if change >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };
        let arrow = if change >= 0.0 { "▲" } else { "▼" };

        Line::from(vec![
            Span::styled(
                format!("✓ {} obs. ", series.len()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("{} {:+.2}%", arrow, change),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "— en attente",
            Style::default().fg(Color::Gray),
        ))
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Bandeau d'erreur
// ============================================================================

/// Dessine le bandeau d'erreur du dernier fetch
///
/// Le libellé distingue "Réseau/API" de "Données" ; le reste de l'état
/// (résultat précédent, réglages) n'est pas touché
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(error) = &app.error else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Échec du fetch ");

    let line = Line::from(vec![
        Span::styled(
            format!("[{}] ", error.kind_label()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(error.to_string(), Style::default().fg(Color::Yellow)),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Zone principale
// ============================================================================

/// Dessine la zone principale selon l'état du fetch
fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    if app.is_loading_data() {
        render_loading(frame, app, area);
    } else if app.has_result() {
        chart::render_results(frame, app, area);
    } else {
        render_prompt(frame, area);
    }
}

/// Dessine l'invite statique affichée avant le premier fetch
fn render_prompt(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Appuyez sur [Entrée] pour récupérer les données",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "↑↓ choisir la cryptomonnaie · ←→ ajuster la fenêtre de jours",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine l'indicateur de chargement
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let message = app
        .loading_message
        .clone()
        .unwrap_or_else(|| "Chargement...".to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Bloc d'informations
// ============================================================================

/// Dessine le bloc d'informations statique (touche 'i')
///
/// Indépendant de l'état du fetch
fn render_info_block(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" ℹ Informations ");

    let text = vec![
        Line::from(vec![
            Span::styled(
                "Source de données : ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("API CoinGecko"),
        ]),
        Line::from(" - Graphique ligne : tendance du prix"),
        Line::from(" - Barres : clôtures journalières"),
        Line::from(" - Aire : répartition des prix"),
        Line::from(" - Carte : activité mondiale (placeholder)"),
        Line::from(" - Table : données brutes"),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        // Message de confirmation de quit
        // CONCEPT : Style avec BLINK pour attirer l'attention
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                "[q]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Quitter  "),
            Span::styled(
                "[↑↓ / j k]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Actif  "),
            Span::styled(
                "[←→ / h l]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Jours (H/L: ±7)  "),
            Span::styled(
                "[Entrée]",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Fetch  "),
            Span::styled(
                "[i]",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Infos"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
