use anyhow::{anyhow, Error};
use std::fmt;
use std::str::FromStr;

use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    German,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "german" | "de" | "deutsch" => Ok(Language::German),
            other => Err(anyhow!("unsupported language '{}'", other)),
        }
    }
}

// (english, german)
const CATALOG: &[(&str, &str)] = &[
    ("Good Morning", "Guten Morgen"),
    ("Temperature is out of range.", "Die Temperatur liegt außerhalb des Bereichs."),
    ("Pulse rate is out of range.", "Die Pulsfrequenz liegt außerhalb des Bereichs."),
    ("Oxygen saturation is out of range.", "Die Sauerstoffsättigung liegt außerhalb des Bereichs."),
    ("Respiration rate is out of range.", "Die Atemfrequenz liegt außerhalb des Bereichs."),
];

/// Translate an English catalog message. Unknown messages pass through unchanged.
pub fn translate(message: &str, language: Language) -> String {
    match language {
        Language::English => message.to_string(),
        Language::German => CATALOG
            .iter()
            .find(|(en, _)| en.eq_ignore_ascii_case(message.trim()))
            .map(|(_, de)| de.to_string())
            .unwrap_or_else(|| message.to_string()),
    }
}

/// Translates every alert before handing it to the wrapped notifier.
#[derive(Debug, Clone)]
pub struct TranslatingNotifier<N> {
    inner: N,
    language: Language,
}

impl<N: Notifier> TranslatingNotifier<N> {
    pub fn new(inner: N, language: Language) -> Self {
        Self { inner, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl<N: Notifier> Notifier for TranslatingNotifier<N> {
    fn notify(&self, message: &str) {
        self.inner.notify(&translate(message, self.language));
    }
}
