// ============================================================================
// Chart - Rendu des résultats du fetch
// ============================================================================
// Dessine les cinq régions de sortie pour la série récupérée :
// graphique ligne, barres des clôtures journalières, aire (sparkline),
// carte placeholder et table des données brutes
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne (Dataset + Axis)
// 2. BarChart : barres labellisées par jour
// 3. Sparkline : remplissage type "area chart"
// 4. Table : lignes horodatage / prix
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Sparkline,
        Table,
    },
    Frame,
};

use crate::app::App;
use crate::models::PriceSeries;

/// Largeur d'une barre + son espacement dans le graphique en barres
const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

// ============================================================================
// Grille des résultats
// ============================================================================

/// Dessine les cinq régions de sortie pour la série courante
///
/// Ordre de lecture (comme les sections du dashboard) :
/// ligne, barres journalières, aire, carte, données brutes
pub fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let series = match &app.result {
        Some(series) => series,
        None => {
            render_no_data(frame, area, "Aucune donnée à afficher");
            return;
        }
    };

    if series.is_empty() {
        let msg = format!("Série vide pour {}", series.asset_id);
        render_no_data(frame, area, &msg);
        return;
    }

    // Grille : ligne en haut, puis barres|aire, puis carte|table
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Graphique ligne
            Constraint::Percentage(30), // Barres + aire
            Constraint::Percentage(30), // Carte + table
        ])
        .split(area)
        .to_vec();

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1])
        .to_vec();

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2])
        .to_vec();

    render_line_chart(frame, series, rows[0]);
    render_bar_chart(frame, series, middle[0]);
    render_area_chart(frame, series, middle[1]);
    render_map_placeholder(frame, bottom[0]);
    render_table(frame, series, bottom[1]);
}

// ============================================================================
// Graphique ligne : prix dans le temps
// ============================================================================

/// Dessine le graphique ligne de la série complète
///
/// CONCEPT RUST : Iterator chaining
/// - .enumerate() donne l'index qui sert d'abscisse
/// - .map() transforme chaque observation en point (x, y)
fn render_line_chart(frame: &mut Frame, series: &PriceSeries, area: Rect) {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect();

    // Calcule les bornes pour les axes
    let (min_price, max_price) = points.iter().fold(
        (f64::MAX, f64::MIN),
        |(min, max), &(_x, y)| (min.min(y), max.max(y)),
    );

    // Marge de 5% pour que le graphique respire
    let margin = (max_price - min_price) * 0.05;
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    let color = if series.total_change_percent().unwrap_or(0.0) >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };

    let datasets = vec![Dataset::default()
        .name(series.asset_id.as_str())
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    // Labels X : première date, fenêtre, dernière date
    let first_label = series
        .first()
        .map(|p| p.timestamp.format("%d/%m").to_string())
        .unwrap_or_default();
    let last_label = series
        .last()
        .map(|p| p.timestamp.format("%d/%m").to_string())
        .unwrap_or_default();

    let x_axis = Axis::default()
        .title("Temps")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (points.len().saturating_sub(1)) as f64])
        .labels(vec![
            Span::raw(first_label),
            Span::raw(format!("{} j", series.days)),
            Span::raw(last_label),
        ]);

    let y_axis = Axis::default()
        .title("Prix ($)")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("${:.2}", y_min)),
            Span::raw(format!("${:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("${:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" 📈 Prix dans le temps "),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Barres : clôtures journalières
// ============================================================================

/// Dessine le graphique en barres des clôtures journalières
///
/// La réduction (dernière valeur par jour calendaire) vient du modèle ;
/// on n'affiche que les derniers jours qui tiennent dans la zone
fn render_bar_chart(frame: &mut Frame, series: &PriceSeries, area: Rect) {
    let closes = series.daily_closes();

    // Nombre de barres affichables dans la largeur disponible
    let max_bars = (area.width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let visible = if closes.len() > max_bars {
        &closes[closes.len() - max_bars..]
    } else {
        &closes[..]
    };

    // CONCEPT RUST : Lifetimes et données temporaires
    // - BarChart emprunte des &str : les String de labels doivent vivre
    //   jusqu'au render, d'où le Vec intermédiaire
    let labels: Vec<String> = visible
        .iter()
        .map(|p| p.timestamp.format("%d/%m").to_string())
        .collect();

    let data: Vec<(&str, u64)> = labels
        .iter()
        .map(|l| l.as_str())
        .zip(visible.iter().map(|p| p.price.round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" 📊 Clôtures journalières "),
        )
        .data(&data)
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow));

    frame.render_widget(chart, area);
}

// ============================================================================
// Aire : répartition des prix
// ============================================================================

/// Dessine la série complète en remplissage type "area chart"
///
/// Le sparkline trace l'écart au minimum de la série, pas le prix absolu
fn render_area_chart(frame: &mut Frame, series: &PriceSeries, area: Rect) {
    let min_price = series.min_price().unwrap_or(0.0);

    let data: Vec<u64> = series
        .points
        .iter()
        .map(|p| (p.price - min_price).round() as u64)
        .collect();

    // On n'affiche que la fin de la série si elle dépasse la largeur
    let width = area.width.saturating_sub(2) as usize;
    let visible = if data.len() > width && width > 0 {
        &data[data.len() - width..]
    } else {
        &data[..]
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" ⛰ Répartition des prix "),
        )
        .data(visible)
        .style(Style::default().fg(Color::Green));

    frame.render_widget(sparkline, area);
}

// ============================================================================
// Carte : placeholder statique
// ============================================================================

/// Dessine la région carte, sans liaison de données
///
/// Aucune donnée géographique n'est disponible dans market_chart ; la
/// région reste un placeholder non interactif
fn render_map_placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🌍 Activité mondiale ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Carte indisponible",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "(aucune donnée géographique)",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Table : données brutes
// ============================================================================

/// Dessine la table des observations (les plus récentes qui tiennent)
fn render_table(frame: &mut Frame, series: &PriceSeries, area: Rect) {
    // Lignes affichables : hauteur moins bordures et header
    let visible_rows = area.height.saturating_sub(4) as usize;
    let start = series.len().saturating_sub(visible_rows);

    let rows: Vec<Row> = series.points[start..]
        .iter()
        .map(|p| {
            Row::new(vec![
                p.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                format!("${:.2}", p.price),
            ])
        })
        .collect();

    let header = Row::new(vec!["Horodatage", "Prix (USD)"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(
                    " 🗒 Données brutes ({} observations) ",
                    series.len()
                )),
        );

    frame.render_widget(table, area);
}

// ============================================================================
// Helper : Message quand pas de données
// ============================================================================

/// Affiche un message quand il n'y a pas de données à afficher
pub fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Erreur ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
