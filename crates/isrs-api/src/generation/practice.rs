//! Practice sentence generation across several usage scenarios.

use std::{fmt, str::FromStr, sync::LazyLock};

use futures_util::future::join_all;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, GenerationError, TextGenerator};

const SYSTEM_PROMPT: &str = "You are a language learning assistant. Provide only the requested \
sentence without any explanations, descriptions, or additional text. The response should be a \
single sentence in the target language.";

const PRACTICE_TEMPERATURE: f32 = 0.7;

static LEAD_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(here'?s?|this is|example|\(|\[).*").expect("Invalid lead-in regex")
});

static LEADING_NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\P{L}*").expect("Invalid leading regex"));

static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(\[{].*[)\]}]").expect("Invalid bracket regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    const fn prompt_suffix(self) -> Option<&'static str> {
        match self {
            Self::Beginner => None,
            Self::Intermediate => Some("Include common expressions where appropriate."),
            Self::Advanced => Some("Use more sophisticated language structures."),
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Proficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown proficiency level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Basic,
    Daily,
    Social,
    Question,
    Response,
}

impl Scenario {
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::Daily,
        Self::Social,
        Self::Question,
        Self::Response,
    ];

    /// Human readable usage context
    pub const fn situation(self) -> &'static str {
        match self {
            Self::Basic => "General usage",
            Self::Daily => "Daily activities",
            Self::Social => "Social interactions",
            Self::Question => "Asking questions",
            Self::Response => "Responding to others",
        }
    }

    pub fn prompt(self, proficiency: Proficiency, language: &str, word: &str) -> String {
        let base = match self {
            Self::Basic => format!(
                "Write only a {proficiency} level sentence in {language} using {word}. \
                 The output should be just the sentence, nothing else."
            ),
            Self::Daily => format!(
                "Write only a {proficiency} level sentence about daily activities in {language} \
                 using {word}. Return just the sentence."
            ),
            Self::Social => format!(
                "Write only a {proficiency} level sentence about social interactions in \
                 {language} using {word}. Return just the sentence."
            ),
            Self::Question => format!(
                "Write only a {proficiency} level question in {language} using {word}. \
                 Return just the question."
            ),
            Self::Response => format!(
                "Write only a {proficiency} level response in {language} using {word}. \
                 Return just the response."
            ),
        };

        match proficiency.prompt_suffix() {
            Some(suffix) => format!("{base} {suffix}"),
            None => base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSentence {
    pub scenario: Scenario,
    pub situation: &'static str,
    pub sentence: String,
    /// `sentence` translated back into English, the answer side of the card
    pub answer_sentence: String,
}

/// Strip lead-ins, leading punctuation and bracketed asides from model output.
pub fn clean_sentence(raw: &str) -> String {
    let text = raw.trim();
    let text = LEAD_IN_RE.replace(text, "");
    let text = LEADING_NON_LETTER_RE.replace(&text, "");
    let text = BRACKETED_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Generate one sentence per scenario for `target_word`, with its English translation.
///
/// Scenarios run concurrently. A scenario whose sentence or back-translation
/// fails falls back to the bare target word, and outputs that end up empty or
/// equal to the target word are dropped, so the result may hold fewer than
/// five sentences.
pub async fn generate_practice_sentences(
    generator: &dyn TextGenerator,
    target_word: &str,
    language: &str,
    proficiency: Proficiency,
) -> Vec<PracticeSentence> {
    let requests = Scenario::ALL.into_iter().map(|scenario| async move {
        match practice_sentence(generator, scenario, target_word, language, proficiency).await {
            Ok(practice) => practice,
            Err(e) => {
                tracing::warn!(
                    scenario = ?scenario,
                    error = %e,
                    "Practice sentence generation failed, using fallback"
                );
                PracticeSentence {
                    scenario,
                    situation: scenario.situation(),
                    sentence: target_word.to_string(),
                    answer_sentence: String::new(),
                }
            }
        }
    });

    join_all(requests)
        .await
        .into_iter()
        .filter(|practice| is_usable(&practice.sentence, target_word))
        .collect()
}

fn is_usable(sentence: &str, target_word: &str) -> bool {
    !sentence.is_empty() && sentence != target_word
}

async fn practice_sentence(
    generator: &dyn TextGenerator,
    scenario: Scenario,
    target_word: &str,
    language: &str,
    proficiency: Proficiency,
) -> Result<PracticeSentence, GenerationError> {
    let request = CompletionRequest {
        system: Some(SYSTEM_PROMPT.to_string()),
        prompt: scenario.prompt(proficiency, language, target_word),
        temperature: Some(PRACTICE_TEMPERATURE),
    };
    let sentence = clean_sentence(&generator.complete(request).await?);

    // Dropped later anyway, skip the translation call
    let answer_sentence = if is_usable(&sentence, target_word) {
        generator.translate(&sentence, language, "English").await?
    } else {
        String::new()
    };

    Ok(PracticeSentence {
        scenario,
        situation: scenario.situation(),
        sentence,
        answer_sentence,
    })
}
