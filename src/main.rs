mod app;

use app::MyApp;
use flashcards_app::config::{Backend, Config};
use flashcards_app::database::db;
use flashcards_app::error::StartupError;
use flashcards_app::page::Route;
use flashcards_app::services::{
    DeckSource, FirestoreDeckSource, LocalDeckSource, PaymentTokenizer, SessionIdentity, Services,
    StripeTokenizer,
};
use flashcards_app::Flashcard;
use rusqlite::Connection;
use std::sync::Arc;
use tracing::{info, warn};

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flashcards_app=debug,flashcards=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Seeds a sample deck the first time a local database is used
fn seed_sample_deck(user_id: &str, conn: &Connection) -> Result<(), rusqlite::Error> {
    if !db::get_deck_ids(user_id, conn)?.is_empty() {
        return Ok(());
    }

    let samples = [
        Flashcard::new("czesc", "cześć", "hello"),
        Flashcard::new("dziekuje", "dziękuję", "thank you"),
        Flashcard::new("prosze", "proszę", "please"),
    ];
    for card in &samples {
        db::add_flashcard(user_id, "polish", card, conn)?;
    }
    info!(user_id, deck_id = "polish", "Sample data created");
    Ok(())
}

fn build_deck_source(config: &Config) -> Result<Arc<dyn DeckSource>, StartupError> {
    match &config.backend {
        Backend::Local { db_path } => {
            let conn = db::init_database(db_path)?;
            if let Some(user_id) = &config.user_id {
                seed_sample_deck(user_id, &conn)?;
                let decks = db::get_deck_ids(user_id, &conn)?;
                info!(count = decks.len(), decks = ?decks, "Local decks available");
            }
            Ok(Arc::new(LocalDeckSource::new(conn)))
        }
        Backend::Firestore {
            project_id,
            base_url,
            id_token,
        } => {
            if id_token.is_none() {
                warn!("No FIREBASE_ID_TOKEN set, reading decks unauthenticated");
            }
            Ok(Arc::new(FirestoreDeckSource::new(
                base_url.clone(),
                project_id.clone(),
                id_token.clone(),
            )))
        }
    }
}

fn main() -> Result<(), StartupError> {
    init_logging();

    let config = Config::from_env()?;
    let decks = build_deck_source(&config)?;

    let payments = config.stripe_publishable_key.clone().map(|key| {
        Arc::new(StripeTokenizer::new(config.stripe_base_url.clone(), key)) as Arc<dyn PaymentTokenizer>
    });
    if payments.is_none() {
        warn!("No STRIPE_PUBLISHABLE_KEY set, payments disabled");
    }

    let services = Services {
        identity: Arc::new(SessionIdentity::new(config.user_id.clone())),
        decks,
        payments,
    };

    let route = std::env::args()
        .nth(1)
        .map(|location| Route::parse(&location))
        .unwrap_or_default();
    info!(deck_id = ?route.deck_id, "Opening flashcards page");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashcards",
        options,
        Box::new(move |cc| Ok(Box::new(MyApp::new(cc, services, runtime, route)))),
    )?;

    Ok(())
}
