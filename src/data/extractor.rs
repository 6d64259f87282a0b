// ============================================================
// Layer 4 - Corpus Extractor
// ============================================================
// Walks every intent's example questions and produces:
//
//   documents  - one (raw tokens, tag) pair per question
//   vocabulary - sorted unique lemmas of all tokens, minus "?" "!"
//   tags       - sorted unique tags that own at least one question
//
// Tags are recorded while iterating questions, never from the
// intent list itself. An intent without questions therefore has
// no column in the label vector.

use anyhow::Result;

use crate::data::normalizer::TextNormalizer;
use crate::domain::{
    feature_index::FeatureIndex,
    intent::{Document, IntentRecord},
};

/// Tokens that never enter the vocabulary.
pub const IGNORE_TOKENS: [&str; 2] = ["?", "!"];

#[derive(Debug, Clone)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub index:     FeatureIndex,
}

pub struct CorpusExtractor<'a> {
    normalizer: &'a TextNormalizer<'a>,
}

impl<'a> CorpusExtractor<'a> {
    pub fn new(normalizer: &'a TextNormalizer<'a>) -> Self {
        Self { normalizer }
    }

    pub fn extract(&self, intents: &[IntentRecord]) -> Result<Corpus> {
        let mut documents  = Vec::new();
        let mut raw_tokens = Vec::new();
        let mut tags: Vec<String> = Vec::new();

        for intent in intents {
            for question in &intent.questions {
                let tokens = self.normalizer.tokenize(question)?;
                raw_tokens.extend(tokens.iter().cloned());
                documents.push(Document::new(tokens, intent.tag.clone()));

                if !tags.contains(&intent.tag) {
                    tags.push(intent.tag.clone());
                }
            }
        }

        let lemmas = raw_tokens
            .iter()
            .filter(|t| !IGNORE_TOKENS.contains(&t.as_str()))
            .map(|t| self.normalizer.lemmatize(t));

        let index = FeatureIndex::from_unsorted(lemmas, tags);

        tracing::debug!(
            "Extracted {} documents, {} raw tokens, {} lemmas, {} tags",
            documents.len(),
            raw_tokens.len(),
            index.feature_width(),
            index.label_width(),
        );

        Ok(Corpus { documents, index })
    }
}
