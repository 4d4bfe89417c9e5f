//! Paced text-to-speech playback.
//!
//! A [`SpeechSequencer`] plays an ordered list of segments through a [`SpeechEngine`],
//! waiting a fixed pause between segments. It is driven cooperatively: the UI loop calls
//! [`SpeechSequencer::tick`] with the current time, and every engine event is checked
//! against the token of the active sequence so that nothing from a cancelled sequence can
//! continue playing.

pub mod engine;
pub mod text;
pub mod voice;

pub use engine::{
    CommandEngine, EngineEvent, EngineEventKind, SilentEngine, SpeechBackend, SpeechEngine,
    SpeechError, Utterance, Voice,
};
pub use text::speakable_segments;
pub use voice::{VoicePolicy, select_voice};

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub voice: VoicePolicy,
    pub text_rate: f32,
    pub text_pause: Duration,
    pub glossary_rate: f32,
    pub glossary_word_rate: f32,
    pub glossary_pause: Duration,
    /// Delay before the current item is played after a main-button press.
    pub autoplay_delay: Duration,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice: VoicePolicy::default(),
            text_rate: 0.9,
            text_pause: Duration::from_millis(2000),
            glossary_rate: 0.85,
            glossary_word_rate: 0.75,
            glossary_pause: Duration::from_millis(200),
            autoplay_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechRequest {
    /// Prompt text, spoken up to its translation and split on `|`.
    Text(String),
    /// "What does <word> mean?"
    GlossaryPrompt(String),
}

#[derive(Debug, Clone)]
struct Segment {
    text: String,
    rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Waiting(Instant),
    Speaking,
}

#[derive(Debug)]
struct ActiveSequence {
    token: u64,
    pending: VecDeque<Segment>,
    pause: Duration,
    voice: Option<Voice>,
    step: Step,
}

pub struct SpeechSequencer<E: SpeechEngine> {
    engine: E,
    settings: SpeechSettings,
    last_token: u64,
    active: Option<ActiveSequence>,
    animating: bool,
}

impl<E: SpeechEngine> SpeechSequencer<E> {
    pub fn new(engine: E, settings: SpeechSettings) -> Self {
        Self {
            engine,
            settings,
            last_token: 0,
            active: None,
            animating: false,
        }
    }

    pub fn settings(&self) -> &SpeechSettings {
        &self.settings
    }

    /// True while a segment is being spoken.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// True while a sequence is playing or waiting to play.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn speak(&mut self, segments: Vec<String>, pause: Duration, rate: f32, now: Instant) {
        let segments = segments
            .into_iter()
            .map(|text| Segment { text, rate })
            .collect();
        self.start_sequence(segments, pause, now, now);
    }

    pub fn speak_text(&mut self, text: &str, now: Instant) {
        let segments = speakable_segments(text);
        self.speak(segments, self.settings.text_pause, self.settings.text_rate, now);
    }

    pub fn speak_glossary_prompt(&mut self, word: &str, now: Instant) {
        let segments = self.glossary_segments(word);
        self.start_sequence(segments, self.settings.glossary_pause, now, now);
    }

    pub fn play(&mut self, request: &SpeechRequest, now: Instant) {
        self.schedule(Duration::ZERO, request, now);
    }

    /// Plays `request` once `delay` has passed. A cancel before then drops it.
    pub fn schedule(&mut self, delay: Duration, request: &SpeechRequest, now: Instant) {
        let (segments, pause): (VecDeque<Segment>, Duration) = match request {
            SpeechRequest::Text(text) => (
                speakable_segments(text)
                    .into_iter()
                    .map(|text| Segment {
                        text,
                        rate: self.settings.text_rate,
                    })
                    .collect(),
                self.settings.text_pause,
            ),
            SpeechRequest::GlossaryPrompt(word) => {
                (self.glossary_segments(word), self.settings.glossary_pause)
            }
        };
        self.start_sequence(segments, pause, now + delay, now);
    }

    /// Stops playback and drops every pending segment and pause. Safe when idle.
    pub fn cancel(&mut self) {
        self.engine.cancel();
        if let Some(active) = self.active.take() {
            log::debug!("Cancelled speech sequence {}", active.token);
        }
        self.animating = false;
    }

    /// Applies engine progress and starts segments whose pause has elapsed.
    pub fn tick(&mut self, now: Instant) {
        for event in self.engine.poll() {
            self.handle_event(event, now);
        }

        let due = matches!(
            self.active.as_ref().map(|active| active.step),
            Some(Step::Waiting(until)) if now >= until
        );
        if due {
            self.start_next_segment();
        }
    }

    fn glossary_segments(&self, word: &str) -> VecDeque<Segment> {
        VecDeque::from(vec![
            Segment {
                text: "What does".to_string(),
                rate: self.settings.glossary_rate,
            },
            Segment {
                text: word.trim().to_string(),
                rate: self.settings.glossary_word_rate,
            },
            Segment {
                text: "mean?".to_string(),
                rate: self.settings.glossary_rate,
            },
        ])
    }

    fn start_sequence(
        &mut self,
        segments: VecDeque<Segment>,
        pause: Duration,
        start_at: Instant,
        now: Instant,
    ) {
        self.cancel();
        if segments.is_empty() {
            return;
        }

        let voices = self.engine.voices();
        let voice = select_voice(&voices, &self.settings.voice).cloned();

        self.last_token += 1;
        self.active = Some(ActiveSequence {
            token: self.last_token,
            pending: segments,
            pause,
            voice,
            step: Step::Waiting(start_at),
        });

        if start_at <= now {
            self.start_next_segment();
        }
    }

    fn start_next_segment(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(segment) = active.pending.pop_front() else {
            self.active = None;
            self.animating = false;
            return;
        };

        active.step = Step::Speaking;
        let utterance = Utterance {
            token: active.token,
            text: segment.text,
            rate: segment.rate,
            voice: active.voice.clone(),
        };

        if let Err(e) = self.engine.speak(utterance) {
            log::debug!("Speech stopped: {}", e);
            self.active = None;
            self.animating = false;
        }
    }

    fn handle_event(&mut self, event: EngineEvent, now: Instant) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if event.token != active.token {
            log::trace!("Ignoring event from stale speech sequence {}", event.token);
            return;
        }

        match event.kind {
            EngineEventKind::Started => self.animating = true,
            EngineEventKind::Finished => {
                self.animating = false;
                if active.pending.is_empty() {
                    self.active = None;
                } else {
                    active.step = Step::Waiting(now + active.pause);
                }
            }
            EngineEventKind::Failed(reason) => {
                log::debug!("Speech segment failed: {}", reason);
                self.animating = false;
                self.active = None;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
