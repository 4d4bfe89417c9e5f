use super::engine::Voice;

/// Preference order used to pick a voice for every playback request.
#[derive(Debug, Clone)]
pub struct VoicePolicy {
    /// Name fragments tried first, in order.
    pub preferred_names: Vec<String>,
    /// Target locale, e.g. `en-US`.
    pub locale: String,
}

impl Default for VoicePolicy {
    fn default() -> Self {
        Self {
            preferred_names: vec!["Samantha".to_string(), "Google US English".to_string()],
            locale: "en-US".to_string(),
        }
    }
}

fn normalize_lang(lang: &str) -> String {
    lang.replace('_', "-").to_ascii_lowercase()
}

pub fn select_voice<'a>(voices: &'a [Voice], policy: &VoicePolicy) -> Option<&'a Voice> {
    let locale = normalize_lang(&policy.locale);
    let language = locale.split('-').next().unwrap_or(&locale).to_string();
    let language_prefix = format!("{}-", language);

    for name in &policy.preferred_names {
        if let Some(voice) = voices.iter().find(|v| v.name.contains(name.as_str())) {
            return Some(voice);
        }
    }

    voices
        .iter()
        .find(|v| normalize_lang(&v.lang) == locale && v.name.contains("Enhanced"))
        .or_else(|| {
            voices
                .iter()
                .find(|v| normalize_lang(&v.lang).starts_with(&locale))
        })
        .or_else(|| {
            voices
                .iter()
                .find(|v| normalize_lang(&v.lang).starts_with(&language_prefix))
        })
        .or_else(|| voices.first())
}
