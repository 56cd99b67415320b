//! Localized label lookup for section titles and fixed words.
//!
//! The theme renderer never hard-codes display text. Every title, the word
//! used for an ongoing date range, and the skill level names come through
//! a [`Labels`] implementation supplied by the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String lookup for display labels, keyed like `cv.experience`.
pub trait Labels {
    fn label(&self, key: &str) -> String;
}

impl<F> Labels for F
where
    F: Fn(&str) -> String,
{
    fn label(&self, key: &str) -> String {
        self(key)
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("cv.summary", "Summary"),
    ("cv.profile", "Profile"),
    ("cv.experience", "Experience"),
    ("cv.employmentHistory", "Employment History"),
    ("cv.education", "Education"),
    ("cv.skills", "Skills"),
    ("cv.technicalProficiencies", "Technical Proficiencies"),
    ("cv.projects", "Projects"),
    ("cv.certifications", "Certifications"),
    ("cv.languages", "Languages"),
    ("cv.volunteering", "Volunteering"),
    ("cv.awards", "Awards"),
    ("cv.interests", "Interests"),
    ("cv.references", "References"),
    ("cv.present", "Present"),
    ("cv.expert", "Expert"),
    ("cv.advanced", "Advanced"),
    ("cv.intermediate", "Intermediate"),
    ("cv.elementary", "Elementary"),
    ("cv.beginner", "Beginner"),
];

/// A flat key → text map, falling back to English for missing keys.
///
/// Deserializes from a plain JSON object, so a request can carry a
/// translation table inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    overrides: BTreeMap<String, String>,
}

impl LabelMap {
    pub fn english() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, text: &str) -> Self {
        self.overrides.insert(key.to_string(), text.to_string());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.overrides.insert(key.into(), text.into());
    }
}

impl Labels for LabelMap {
    fn label(&self, key: &str) -> String {
        if let Some(text) = self.overrides.get(key) {
            return text.clone();
        }
        ENGLISH
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| {
                log::debug!("No label for {key}");
                key.to_string()
            })
    }
}

/// Level name for a 1-5 skill rating.
pub fn skill_level_label(labels: &dyn Labels, level: u8) -> String {
    let key = match level {
        5 => "cv.expert",
        4 => "cv.advanced",
        3 => "cv.intermediate",
        2 => "cv.elementary",
        _ => "cv.beginner",
    };
    labels.label(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_defaults() {
        let labels = LabelMap::english();
        assert_eq!(labels.label("cv.present"), "Present");
        assert_eq!(labels.label("cv.employmentHistory"), "Employment History");
    }

    #[test]
    fn overrides_win_and_missing_keys_echo() {
        let labels = LabelMap::english().with("cv.experience", "Deneyim");
        assert_eq!(labels.label("cv.experience"), "Deneyim");
        assert_eq!(labels.label("cv.education"), "Education");
        assert_eq!(labels.label("cv.nope"), "cv.nope");
    }

    #[test]
    fn closures_are_labels() {
        let shout = |key: &str| key.to_uppercase();
        assert_eq!(shout.label("cv.skills"), "CV.SKILLS");
    }

    #[test]
    fn skill_levels() {
        let labels = LabelMap::english();
        assert_eq!(skill_level_label(&labels, 5), "Expert");
        assert_eq!(skill_level_label(&labels, 1), "Beginner");
        assert_eq!(skill_level_label(&labels, 0), "Beginner");
    }

    #[test]
    fn deserializes_from_plain_object() {
        let labels: LabelMap = serde_json::from_str(r#"{"cv.present": "Günümüz"}"#).unwrap();
        assert_eq!(labels.label("cv.present"), "Günümüz");
    }
}
