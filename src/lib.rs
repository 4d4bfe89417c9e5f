pub mod app;
pub mod bank;
pub mod bookmarks;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod speech;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use bank::QuestionBank;
pub use bookmarks::BookmarkStore;
pub use config::{Cli, Config};
pub use csv::load_question_bank;
pub use error::{AppError, Result};
pub use models::{Mode, QuestionItem, Screen};
pub use session::{SessionError, SessionQueue};
pub use speech::{SpeechEngine, SpeechSequencer};
