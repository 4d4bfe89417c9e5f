use std::collections::VecDeque;
use std::process::{Child, Command, Stdio};
use thiserror::Error;

/// Words per minute at rate 1.0 for both `espeak-ng` and `say`.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("failed to start speech process: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Locale tag as reported by the platform, e.g. `en-US`, `en_US` or `en-us`.
    pub lang: String,
}

/// A single segment handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub token: u64,
    pub text: String,
    pub rate: f32,
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEventKind {
    Started,
    Finished,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub token: u64,
    pub kind: EngineEventKind,
}

/// Platform text-to-speech. Engines speak one utterance at a time and report progress
/// through `poll`.
pub trait SpeechEngine {
    fn voices(&mut self) -> Vec<Voice>;
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;
    fn poll(&mut self) -> Vec<EngineEvent>;
    fn cancel(&mut self);
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn voices(&mut self) -> Vec<Voice> {
        (**self).voices()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        (**self).speak(utterance)
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        (**self).poll()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SpeechBackend {
    Espeak,
    Say,
    Silent,
}

impl SpeechBackend {
    pub fn platform_default() -> SpeechBackend {
        if cfg!(target_os = "macos") {
            SpeechBackend::Say
        } else {
            SpeechBackend::Espeak
        }
    }
}

/// Runs one synthesizer process per utterance.
pub struct CommandEngine {
    backend: SpeechBackend,
    program: String,
    current: Option<(u64, Child)>,
    events: VecDeque<EngineEvent>,
    voices: Vec<Voice>,
}

impl CommandEngine {
    pub fn new(backend: SpeechBackend) -> Self {
        let program = match backend {
            SpeechBackend::Say => "say",
            _ => "espeak-ng",
        };
        Self {
            backend,
            program: program.to_string(),
            current: None,
            events: VecDeque::new(),
            voices: Vec::new(),
        }
    }

    fn build_command(&self, utterance: &Utterance) -> Command {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate).round() as u32;
        let mut command = Command::new(&self.program);
        match self.backend {
            SpeechBackend::Say => {
                if let Some(voice) = &utterance.voice {
                    command.arg("-v").arg(&voice.name);
                }
                command.arg("-r").arg(words_per_minute.to_string());
            }
            _ => {
                if let Some(voice) = &utterance.voice {
                    command.arg("-v").arg(&voice.lang);
                }
                command.arg("-s").arg(words_per_minute.to_string());
            }
        }
        // Text such as "-ism" must not be read as an option.
        command
            .arg("--")
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    fn list_voices(&self) -> Vec<Voice> {
        let args: &[&str] = match self.backend {
            SpeechBackend::Say => &["-v", "?"],
            _ => &["--voices"],
        };
        let output = match Command::new(&self.program).args(args).output() {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                log::debug!("{} voice listing exited with {}", self.program, output.status);
                return Vec::new();
            }
            Err(e) => {
                log::debug!("{} voice listing failed: {}", self.program, e);
                return Vec::new();
            }
        };
        let listing = String::from_utf8_lossy(&output.stdout);
        match self.backend {
            SpeechBackend::Say => parse_say_voices(&listing),
            _ => parse_espeak_voices(&listing),
        }
    }
}

impl SpeechEngine for CommandEngine {
    fn voices(&mut self) -> Vec<Voice> {
        // Voice lists can be empty until the synthesizer is ready, so only cache a hit.
        if self.voices.is_empty() {
            self.voices = self.list_voices();
        }
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        self.cancel();
        let child = self.build_command(&utterance).spawn()?;
        log::debug!("Speaking {:?} at rate {}", utterance.text, utterance.rate);
        self.events.push_back(EngineEvent {
            token: utterance.token,
            kind: EngineEventKind::Started,
        });
        self.current = Some((utterance.token, child));
        Ok(())
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        if let Some((token, child)) = self.current.as_mut() {
            let token = *token;
            let finished = match child.try_wait() {
                Ok(Some(status)) if status.success() => Some(EngineEventKind::Finished),
                Ok(Some(status)) => Some(EngineEventKind::Failed(format!("exited with {}", status))),
                Ok(None) => None,
                Err(e) => Some(EngineEventKind::Failed(e.to_string())),
            };
            if let Some(kind) = finished {
                self.events.push_back(EngineEvent { token, kind });
                self.current = None;
            }
        }
        self.events.drain(..).collect()
    }

    fn cancel(&mut self) {
        if let Some((_, mut child)) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        self.events.clear();
    }
}

impl Drop for CommandEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Finishes every utterance on the next poll without producing sound.
#[derive(Debug, Default)]
pub struct SilentEngine {
    events: VecDeque<EngineEvent>,
}

impl SpeechEngine for SilentEngine {
    fn voices(&mut self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        self.events.clear();
        for kind in [EngineEventKind::Started, EngineEventKind::Finished] {
            self.events.push_back(EngineEvent {
                token: utterance.token,
                kind,
            });
        }
        Ok(())
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    fn cancel(&mut self) {
        self.events.clear();
    }
}

/// Parses `espeak-ng --voices`:
/// `Pty Language Age/Gender VoiceName File Other Languages`.
pub fn parse_espeak_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 4 {
                return None;
            }
            Some(Voice {
                name: columns[3].replace('_', " "),
                lang: columns[1].to_string(),
            })
        })
        .collect()
}

/// Parses `say -v ?`: `Samantha            en_US    # Hello, my name is Samantha.`
pub fn parse_say_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim_end();
            let (name, lang) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() || lang.is_empty() {
                return None;
            }
            Some(Voice {
                name: name.to_string(),
                lang: lang.to_string(),
            })
        })
        .collect()
}
