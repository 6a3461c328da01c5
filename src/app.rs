//! Main application UI and state management.
//! Handles the vocabulary screen, word management and review sessions.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use vocab_app::config::Config;
use vocab_app::database::SqliteWordStore;
use vocab_app::database::db::{self, VocabularyStats};
use vocab_app::error::StoreError;
use vocab_app::export::json::{export_json_to_path, import_json};
use vocab_app::models::{
    Category, Clock, FixedClock, NewWord, Quality, ReviewSession, SessionState, SystemClock, Word,
};

type Session = ReviewSession<SqliteWordStore, Box<dyn Clock>>;

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Vocabulary,
    Review,
}

/// Main application state
pub struct VocabApp {
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    conn: Arc<Mutex<Connection>>,
    config: Config,

    words: Vec<Word>,
    stats: VocabularyStats,
    category_filter: Option<Category>,
    current_date_display: String,

    new_term: String,
    new_translation: String,
    new_definition: String,
    new_context: String,

    current_screen: AppScreen,
    review_session: Option<Session>,
    review_error: Option<String>,

    show_message_dialog: bool,
    message: String,
}

/// Formats a timestamp as a local YYYY-MM-DD string
fn format_date(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl eframe::App for VocabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Vocabulary => self.render_vocabulary_screen(ctx),
            AppScreen::Review => self.render_review_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_message_dialog {
            egui::Window::new("Vocabulary")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl VocabApp {
    pub fn new(conn: Connection, config: Config) -> Self {
        let mut app = Self {
            show_confirmation_dialog: false,
            allowed_to_close: false,
            conn: Arc::new(Mutex::new(conn)),
            config,
            words: Vec::new(),
            stats: VocabularyStats::default(),
            category_filter: None,
            current_date_display: String::new(),
            new_term: String::new(),
            new_translation: String::new(),
            new_definition: String::new(),
            new_context: String::new(),
            current_screen: AppScreen::Vocabulary,
            review_session: None,
            review_error: None,
            show_message_dialog: false,
            message: String::new(),
        };
        app.refresh();
        app
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> db::Result<T>) -> db::Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Unavailable("Connection lock poisoned".into()))?;
        f(&conn)
    }

    /// Clock used for saving and scheduling: the simulated calendar or the wall clock
    fn clock(&self) -> db::Result<Box<dyn Clock>> {
        if self.config.simulate_dates {
            let date = self.with_conn(db::get_current_date)?;
            Ok(Box::new(FixedClock(date)))
        } else {
            Ok(Box::new(SystemClock))
        }
    }

    fn show_message(&mut self, message: String) {
        self.message = message;
        self.show_message_dialog = true;
    }

    /// Reloads words, stats and date from the database
    fn refresh(&mut self) {
        let owner = self.config.owner.clone();
        let result = self.clock().and_then(|clock| {
            let now = clock.now();
            self.with_conn(|conn| {
                Ok((
                    db::get_words(&owner, conn)?,
                    db::vocabulary_stats(&owner, now, conn)?,
                    now,
                ))
            })
        });

        match result {
            Ok((words, stats, now)) => {
                self.words = words;
                self.stats = stats;
                self.current_date_display = format_date(now);
            }
            Err(e) => {
                log::error!("Failed to load vocabulary: {}", e);
                self.show_message(format!("Failed to load vocabulary: {}", e));
            }
        }
    }

    /// Renders the vocabulary screen with word management interface
    fn render_vocabulary_screen(&mut self, ctx: &egui::Context) {
        let mut action_next_day = false;
        let mut action_review = false;
        let mut action_export = false;
        let mut action_import = false;
        let mut action_add = false;
        let mut action_delete: Option<i64> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.current_date_display);
                if self.config.simulate_dates && ui.button("Next Day").clicked() {
                    action_next_day = true;
                }
                ui.label(format!("({})", self.config.owner));
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Export Vocabulary").clicked() {
                    action_export = true;
                }
                if ui.button("Import Vocabulary").clicked() {
                    action_import = true;
                }
            });

            ui.separator();

            ui.heading("Review");
            ui.label(format!(
                "{} words: {} learning, {} learned, {} difficult",
                self.stats.total, self.stats.learning, self.stats.learned, self.stats.difficult
            ));
            if ui
                .button(format!("Start Review ({} due)", self.stats.due))
                .clicked()
            {
                action_review = true;
            }

            ui.separator();

            ui.heading("Save a Word");
            ui.horizontal(|ui| {
                ui.label("Word:");
                ui.text_edit_singleline(&mut self.new_term);
            });
            ui.horizontal(|ui| {
                ui.label("Translation:");
                ui.text_edit_singleline(&mut self.new_translation);
            });
            ui.horizontal(|ui| {
                ui.label("Definition:");
                ui.text_edit_singleline(&mut self.new_definition);
            });
            ui.horizontal(|ui| {
                ui.label("Sentence:");
                ui.text_edit_singleline(&mut self.new_context);
            });
            if ui.button("Save Word").clicked() {
                action_add = true;
            }

            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.category_filter.is_none(), "All")
                    .clicked()
                {
                    self.category_filter = None;
                }
                for category in Category::ALL {
                    let label = format!("{} ({})", category, self.stats.count(category));
                    if ui
                        .selectable_label(self.category_filter == Some(category), label)
                        .clicked()
                    {
                        self.category_filter = Some(category);
                    }
                }
            });

            egui::ScrollArea::vertical()
                .id_source("words_list")
                .max_height(300.0)
                .show(ui, |ui| {
                    let filter = self.category_filter;
                    for word in self
                        .words
                        .iter()
                        .filter(|w| filter.is_none_or(|c| w.category == c))
                    {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(format!("{}: {}", word.term, word.translation));
                                if ui.small_button("Delete").clicked() {
                                    action_delete = Some(word.id);
                                }
                            });
                            if let Some(definition) = &word.definition {
                                ui.label(format!("   {}", definition));
                            }
                            ui.label(format!(
                                "   {} · next review {}",
                                word.category,
                                format_date(word.review.next_review_at)
                            ));
                        });
                    }
                });
        });

        // Execute deferred actions
        if action_next_day {
            if let Err(e) = self.with_conn(db::advance_day) {
                self.show_message(format!("Could not advance the date: {}", e));
            }
            self.refresh();
        }
        if action_add {
            self.handle_add_word();
        }
        if let Some(id) = action_delete {
            let owner = self.config.owner.clone();
            if let Err(e) = self.with_conn(|conn| db::delete_word(&owner, id, conn)) {
                self.show_message(format!("Could not delete word: {}", e));
            }
            self.refresh();
        }
        if action_export {
            self.handle_export();
        }
        if action_import {
            self.handle_import();
        }
        if action_review {
            self.start_review_session();
        }
    }

    fn handle_add_word(&mut self) {
        let (Some(term), Some(translation)) =
            (non_empty(&self.new_term), non_empty(&self.new_translation))
        else {
            self.show_message("A word needs both the term and its translation.".to_string());
            return;
        };

        let word = NewWord {
            term,
            translation,
            definition: non_empty(&self.new_definition),
            context: non_empty(&self.new_context),
        };
        let owner = self.config.owner.clone();
        let result = self
            .clock()
            .and_then(|clock| self.with_conn(|conn| db::add_word(&owner, &word, clock.now(), conn)));

        match result {
            Ok(_) => {
                self.new_term.clear();
                self.new_translation.clear();
                self.new_definition.clear();
                self.new_context.clear();
                self.refresh();
            }
            Err(e) => self.show_message(format!("Could not save '{}': {}", word.term, e)),
        }
    }

    /// Renders the review screen with flashcard interface
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        let mut action_toggle_answer = false;
        let mut action_rate: Option<Quality> = None;
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.review_session else {
                action_back = true;
                return;
            };

            ui.heading("Review");
            ui.label(session.progress_message());
            ui.add_space(20.0);

            match session.state() {
                SessionState::EmptyComplete => {
                    ui.heading("Nothing to review");
                    ui.label("No words are due right now. Come back later!");
                }
                SessionState::Complete => {
                    ui.heading("Well done!");
                    ui.label(format!(
                        "You reviewed {} words in this session.",
                        session.reviewed_count()
                    ));
                }
                SessionState::Active => {
                    if let Some(word) = session.current_word() {
                        let revealed = session.is_revealed();

                        ui.group(|ui| {
                            ui.set_min_height(200.0);
                            ui.vertical_centered(|ui| {
                                ui.add_space(20.0);
                                ui.heading(&word.term);
                                if let Some(context) = &word.context {
                                    ui.label(format!("“{}”", context));
                                }

                                ui.add_space(20.0);

                                if revealed {
                                    ui.heading(&word.translation);
                                    if let Some(definition) = &word.definition {
                                        ui.label(definition);
                                    }
                                } else {
                                    ui.label("(Click 'Show Answer' to reveal)");
                                }
                                ui.add_space(20.0);
                            });
                        });

                        ui.add_space(20.0);

                        if !revealed && ui.button("Show Answer").clicked() {
                            action_toggle_answer = true;
                        }

                        // One rating per frame; it is saved before the next frame is drawn
                        if revealed {
                            ui.label("How well did you remember it?");
                            ui.horizontal(|ui| {
                                for quality in Quality::ALL {
                                    if ui.button(quality.label()).clicked() && action_rate.is_none()
                                    {
                                        action_rate = Some(quality);
                                    }
                                }
                            });
                        }

                        if let Some(error) = &self.review_error {
                            ui.colored_label(egui::Color32::RED, error);
                            ui.label("Your rating was not saved. Please try again.");
                        }
                    }
                }
            }

            ui.add_space(20.0);

            if ui.button("Back to Vocabulary").clicked() {
                action_back = true;
            }
        });

        // Execute deferred actions
        if let Some(session) = self.review_session.as_mut() {
            if action_toggle_answer {
                session.toggle_answer();
            }
            if let Some(quality) = action_rate {
                self.review_error = match session.rate(quality) {
                    Ok(_) => None,
                    Err(e) => Some(e.to_string()),
                };
            }
        }
        if action_back {
            self.current_screen = AppScreen::Vocabulary;
            self.review_session = None;
            self.review_error = None;
            self.refresh();
        }
    }

    /// Starts a review session with the words due now
    fn start_review_session(&mut self) {
        let store = SqliteWordStore::new(Arc::clone(&self.conn), self.config.owner.clone());
        let session = self
            .clock()
            .and_then(|clock| ReviewSession::start(store, clock));

        match session {
            Ok(session) => {
                self.review_session = Some(session);
                self.review_error = None;
                self.current_screen = AppScreen::Review;
            }
            Err(e) => {
                log::error!("Failed to start review session: {}", e);
                self.show_message(format!("Could not load due words: {}", e));
            }
        }
    }

    /// Handles vocabulary export to JSON file
    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", self.config.owner))
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        let owner = self.config.owner.clone();
        let message = match self.with_conn(|conn| db::load_vocabulary(&owner, &owner, conn)) {
            Ok(vocabulary) => match export_json_to_path(&vocabulary, &path) {
                Ok(()) => format!("Exported {} words.", vocabulary.words.len()),
                Err(e) => format!("Export failed: {}", e),
            },
            Err(e) => format!("Export failed: {}", e),
        };
        self.show_message(message);
    }

    /// Handles vocabulary import from JSON file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let vocabulary = match import_json(&path) {
            Ok(vocabulary) => vocabulary,
            Err(e) => {
                self.show_message(format!(
                    "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"name\": \"My Vocabulary\",\n  \"words\": [{{ \"term\": \"...\", \"translation\": \"...\" }}]\n}}",
                    e
                ));
                return;
            }
        };

        let owner = self.config.owner.clone();
        let result = self.clock().and_then(|clock| {
            self.with_conn(|conn| db::import_vocabulary(&owner, &vocabulary, clock.now(), conn))
        });

        match result {
            Ok(added) => {
                self.show_message(format!(
                    "Imported '{}': {} new words ({} already saved).",
                    vocabulary.name,
                    added,
                    vocabulary.words.len() - added
                ));
                self.refresh();
            }
            Err(e) => self.show_message(format!("Import failed: {}", e)),
        }
    }
}
