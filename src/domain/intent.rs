// ============================================================
// Layer 3 - Intent Domain Types
// ============================================================
// An intents dataset looks like:
//
//   {
//     "intents": [
//       { "tag": "greeting", "questions": ["Hi", "Hello there"] },
//       { "tag": "bye",      "questions": ["Goodbye"] }
//     ]
//   }
//
// Extra keys per intent (e.g. "responses") belong to the chatbot
// runtime and are ignored here.

use serde::{Deserialize, Serialize};

/// Top-level shape of the intents JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsFile {
    pub intents: Vec<IntentRecord>,
}

/// One labelled group of example questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    pub tag: String,

    /// Example utterances in dataset order. Missing in the JSON
    /// means "no examples", which is legal but contributes nothing.
    #[serde(default)]
    pub questions: Vec<String>,
}

impl IntentRecord {
    pub fn new<S: Into<String>>(tag: impl Into<String>, questions: Vec<S>) -> Self {
        Self {
            tag:       tag.into(),
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// A tokenized example question paired with its intent tag.
///
/// Tokens are kept raw (original casing, punctuation included);
/// the encoder lemmatizes them again when building features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub tokens: Vec<String>,
    pub tag:    String,
}

impl Document {
    pub fn new(tokens: Vec<String>, tag: impl Into<String>) -> Self {
        Self { tokens, tag: tag.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_intents_and_ignores_responses() {
        let json = r#"{
            "intents": [
                { "tag": "greeting", "questions": ["Hi"], "responses": ["Hello!"] },
                { "tag": "empty" }
            ]
        }"#;
        let file: IntentsFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.intents.len(), 2);
        assert_eq!(file.intents[0].questions, vec!["Hi".to_string()]);
        assert!(file.intents[1].questions.is_empty());
    }
}
