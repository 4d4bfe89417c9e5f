use crate::db;
use crate::speech::{SpeechBackend, SpeechSettings};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "n400-practice", version, about = "Citizenship interview flashcards")]
pub struct Cli {
    /// Question bank CSV (type,content,translation,extra,category_id)
    #[arg(long, env = "N400_DATA", default_value = "data/n400_data.csv")]
    pub data: PathBuf,

    /// Bookmark database, defaults to ~/.local/share/n400-practice/n400.db
    #[arg(long, env = "N400_DB")]
    pub db: Option<PathBuf>,

    /// Speech synthesizer
    #[arg(long, value_enum, env = "N400_SPEECH")]
    pub speech: Option<SpeechBackend>,

    /// Voice name tried before the built-in preferences
    #[arg(long, env = "N400_VOICE")]
    pub voice: Option<String>,

    #[arg(long, default_value = "n400_debug.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub speech_backend: SpeechBackend,
    pub speech: SpeechSettings,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut speech = SpeechSettings::default();
        if let Some(voice) = cli.voice {
            speech.voice.preferred_names.insert(0, voice);
        }

        Config {
            data_path: cli.data,
            db_path: cli.db.unwrap_or_else(db::default_db_path),
            log_file: cli.log_file,
            log_level: cli.log_level,
            speech_backend: cli.speech.unwrap_or_else(SpeechBackend::platform_default),
            speech,
        }
    }
}
