// ============================================================================
// LazyGecko : dashboard crypto dans le terminal
// ============================================================================
// Programme TUI : sélection d'une cryptomonnaie et d'une fenêtre de jours,
// fetch de l'historique de prix via CoinGecko, affichage en graphiques
//
// ARCHITECTURE :
// 1. Event loop : boucle render → input → update sur le thread principal
// 2. Worker thread : exécute les fetchs async sans bloquer l'UI
// 3. Channels mpsc : commandes vers le worker, résultats vers l'UI
// 4. Arc<Mutex<App>> : état partagé entre l'UI et le worker
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazygecko::api::coingecko::fetch_price_series;
use lazygecko::api::ApiError;
use lazygecko::app::App;
use lazygecko::models::{Asset, PriceSeries};
use lazygecko::ui::{events::EventHandler, render};

// ============================================================================
// AppCommand / AppResult : protocole du worker thread
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des commandes au worker thread
// - Le worker thread exécute les tâches async (fetch API)
// - Communication via mpsc channels (multi-producer, single-consumer)
// ============================================================================

/// Commandes envoyées au worker thread pour exécuter des tâches async
#[derive(Debug, Clone)]
enum AppCommand {
    /// Récupérer l'historique de prix pour (actif, jours)
    /// Les paramètres sont capturés à l'envoi : le fetch est request-scoped,
    /// changer la sélection pendant le chargement ne l'affecte pas
    FetchMarketData { asset: Asset, days: u32 },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Série récupérée et mise en forme avec succès
    MarketDataLoaded { series: PriceSeries },

    /// Échec du fetch (réseau, statut HTTP ou corps invalide)
    FetchFailed { error: ApiError },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux/WSL : ~/.local/share/lazygecko/logs/lazygecko.log
/// - macOS : ~/Library/Application Support/lazygecko/logs/lazygecko.log
/// - Windows : C:\Users\<user>\AppData\Local\lazygecko\logs\lazygecko.log
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazygecko/logs/lazygecko.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazygecko=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Répertoire de données de la plateforme, fallback ./logs
    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("lazygecko").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Rotation quotidienne : lazygecko.log.2024-01-15, etc.
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazygecko.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: lazygecko::api::coingecko)
                .with_thread_ids(true) // Inclut l'ID du thread (utile pour async)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(
            // Filtre les logs par niveau
            // Par défaut : debug pour lazygecko, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazygecko=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging FIRST
    // Si init échoue, on affiche l'erreur et continue quand même
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    println!("LazyGecko starting up");
    info!("LazyGecko starting up");

    // Setup du terminal en mode TUI
    // Pas de préchargement : le dashboard démarre sur l'invite et ne
    // fetch qu'au déclenchement
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // Crée l'état de l'application
    // CONCEPT RUST : Arc<Mutex<>> pour partage entre threads
    // - Arc : Reference counting pour ownership partagé
    // - Mutex : Protection contre les data races
    let app = Arc::new(Mutex::new(App::new()));

    // Crée les channels pour communication avec le worker
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    // Lance le worker thread en arrière-plan
    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone());

    // Crée le gestionnaire d'événements
    let events = EventHandler::new();

    // Exécute l'event loop
    info!("Starting event loop");
    let result = run(&mut terminal, app.clone(), &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui traite les commandes async
// - Reçoit des AppCommand via un channel (command_rx)
// - Envoie des AppResult via un autre channel (result_tx)
// - Permet de faire des appels API sans bloquer l'UI
// ============================================================================

/// Worker thread qui exécute les fetchs en arrière-plan
///
/// # Arguments
/// * `command_rx` - Receiver pour recevoir les commandes
/// * `result_tx` - Sender pour envoyer les résultats
/// * `app` - Arc<Mutex<App>> pour accéder à l'état partagé
fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        // Runtime tokio propre à ce thread
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        loop {
            match command_rx.recv() {
                Ok(command) => {
                    info!(?command, "Worker received command");

                    match command {
                        AppCommand::FetchMarketData { asset, days } => {
                            // Exécute le fetch de manière async
                            // CONCEPT : block_on dans un worker thread
                            // - block_on() bloque le thread worker (pas l'UI)
                            // - L'UI continue à tourner normalement
                            let result = runtime
                                .block_on(async { fetch_price_series(asset.id(), days).await });

                            match result {
                                Ok(series) => {
                                    info!(
                                        asset = %asset.id(),
                                        days,
                                        points = series.len(),
                                        "Market data loaded successfully"
                                    );
                                    let _ = result_tx.send(AppResult::MarketDataLoaded { series });
                                }
                                Err(e) => {
                                    error!(asset = %asset.id(), days, error = ?e, "Failed to fetch market data");
                                    let _ = result_tx.send(AppResult::FetchFailed { error: e });
                                }
                            }

                            // Désactive l'indicateur de chargement
                            {
                                let mut app_lock = app.lock().unwrap();
                                app_lock.stop_loading();
                            }
                        }
                    }
                }
                Err(_) => {
                    // Channel fermé, on quitte
                    info!("Worker thread exiting (channel closed)");
                    break;
                }
            }
        }
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Game Loop / Event Loop Pattern
// - À chaque itération :
//   0. Traiter les résultats du worker
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        // Vérifie si l'app est toujours en cours d'exécution
        // CONCEPT : Lock scope minimisé
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // ========================================
        // 0. RÉSULTATS : Traite les résultats du worker
        // ========================================
        // CONCEPT : Non-blocking receive avec try_recv
        match result_rx.try_recv() {
            Ok(result) => match result {
                AppResult::MarketDataLoaded { series } => {
                    let mut app_lock = app.lock().unwrap();
                    info!(asset = %series.asset_id, points = series.len(), "Updating app with new series");
                    app_lock.set_result(series);
                }
                AppResult::FetchFailed { error } => {
                    let mut app_lock = app.lock().unwrap();
                    error!(error = %error, "Fetch failed, keeping previous result");
                    app_lock.set_error(error);
                }
            },
            Err(mpsc::TryRecvError::Empty) => {
                // Pas de résultat, c'est normal
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected!");
                // Continue quand même, mais le worker est mort
            }
        }

        // ========================================
        // 1. RENDER : Dessine l'interface
        // ========================================
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &app_lock);
            })?;
        }

        // ========================================
        // 2. INPUT : Traite les événements
        // ========================================
        match events.next() {
            Ok(event) => {
                let mut app_lock = app.lock().unwrap();
                handle_event(&mut app_lock, event, &command_tx);
            }
            Err(_) => {
                // Erreur lors de la lecture d'événement
            }
        }

        // ========================================
        // 3. UPDATE : Met à jour l'état
        // ========================================
        {
            let mut app_lock = app.lock().unwrap();
            app_lock.tick();
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Guard clauses (if) pour filtrer les événements
/// - command_tx : pour envoyer des commandes au worker thread
fn handle_event(app: &mut App, event: lazygecko::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazygecko::ui::events::{
        is_days_down_event, is_days_down_week_event, is_days_up_event, is_days_up_week_event,
        is_down_event, is_fetch_event, is_info_toggle_event, is_quit_event, is_up_event, Event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Touche 'q' : quit confirmation two-step
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // Entrée : déclenche le fetch pour (actif, jours) courants
        Event::Key(_) if is_fetch_event(&event) => {
            app.cancel_quit();

            // Un seul fetch à la fois : le trigger est ignoré pendant
            // le chargement
            if app.is_loading_data() {
                debug!("Fetch already in flight, ignoring trigger");
                return;
            }

            let asset = app.asset;
            let days = app.days;
            info!(asset = %asset.id(), days, "User triggered fetch");

            app.start_loading(Some(format!(
                "Chargement {} ({} jours)...",
                asset.label(),
                days
            )));
            let _ = command_tx.send(AppCommand::FetchMarketData { asset, days });
        }

        // Navigation dans le catalogue d'actifs
        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.previous_asset();
            debug!(asset = %app.asset.id(), "User selected previous asset");
        }
        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.next_asset();
            debug!(asset = %app.asset.id(), "User selected next asset");
        }

        // Ajustement de la fenêtre de jours (slider)
        Event::Key(_) if is_days_up_week_event(&event) => {
            app.cancel_quit();
            app.increase_days(7);
            debug!(days = app.days, "User increased days window");
        }
        Event::Key(_) if is_days_down_week_event(&event) => {
            app.cancel_quit();
            app.decrease_days(7);
            debug!(days = app.days, "User decreased days window");
        }
        Event::Key(_) if is_days_up_event(&event) => {
            app.cancel_quit();
            app.increase_days(1);
            debug!(days = app.days, "User increased days window");
        }
        Event::Key(_) if is_days_down_event(&event) => {
            app.cancel_quit();
            app.decrease_days(1);
            debug!(days = app.days, "User decreased days window");
        }

        // 'i' : bloc d'informations, indépendant de l'état du fetch
        Event::Key(_) if is_info_toggle_event(&event) => {
            app.cancel_quit();
            app.toggle_info();
            debug!(show_info = app.show_info, "User toggled info block");
        }

        Event::Tick => {
            // Tick régulier : rien à faire pour l'instant
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation si active
            app.cancel_quit();
        }

        _ => {
            // Autres événements : ignorés
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT RUST : Terminal raw mode
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : écran secondaire (ne pollue pas l'historique)
//
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture // Active la souris (optionnel)
    )?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même en cas d'erreur, pour ne pas laisser le
/// terminal cassé
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
