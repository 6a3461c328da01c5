mod app;

use app::VocabApp;
use chrono::Utc;
use clap::Parser;
use vocab_app::config::{Args, Config};
use vocab_app::database::db;
use vocab_app::models::NewWord;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(&args).expect("Failed to load configuration");

    let conn = db::init_database(&config.db_path, Utc::now()).expect("Failed to initialize database");

    let now = if config.simulate_dates {
        db::get_current_date(&conn).expect("Failed to read simulated date")
    } else {
        Utc::now()
    };

    if db::get_words(&config.owner, &conn).unwrap_or_default().is_empty() {
        let samples = [
            NewWord::new("cześć", "hello").with_context("Cześć, jak się masz?"),
            NewWord::new("dziękuję", "thank you").with_definition("expression of gratitude"),
            NewWord::new("proszę", "please"),
        ];
        for word in &samples {
            if let Err(e) = db::add_word(&config.owner, word, now, &conn) {
                log::warn!("Could not add sample word '{}': {}", word.term, e);
            }
        }
        log::info!("Sample vocabulary created for {}", config.owner);
    }

    let stats = db::vocabulary_stats(&config.owner, now, &conn).unwrap_or_default();
    log::info!(
        "Loaded {} words for {} ({} due)",
        stats.total,
        config.owner,
        stats.due
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vocabulary Reader",
        options,
        Box::new(|_cc| Ok(Box::new(VocabApp::new(conn, config)))),
    )
}
