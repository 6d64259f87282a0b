// ============================================================
// Layer 4 - Text Normalizer
// ============================================================
// Turns raw example questions into word tokens and word tokens
// into lemmas.
//
// Tokenization uses the BERT pre-tokenizer from `tokenizers`:
// split on whitespace, and emit every punctuation character as
// its own token.
//
//   "Hello, how are you?" → ["Hello", ",", "how", "are", "you", "?"]
//
// Punctuation is kept at this stage; the extractor decides which
// tokens reach the vocabulary.

use anyhow::Result;
use tokenizers::{
    pre_tokenizers::bert::BertPreTokenizer,
    OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer,
};

use crate::data::lemmatizer::Lemmatizer;

pub struct TextNormalizer<'a> {
    lemmatizer: &'a Lemmatizer,
}

impl<'a> TextNormalizer<'a> {
    pub fn new(lemmatizer: &'a Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Split `text` into word and punctuation tokens, preserving
    /// their original casing and order.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);
        BertPreTokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| anyhow::anyhow!("Cannot tokenize '{text}': {e}"))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece.to_string())
            .collect())
    }

    /// Case-folded base form of a single token.
    pub fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_words_and_punctuation() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let normalizer = TextNormalizer::new(&lemmatizer);

        let tokens = normalizer.tokenize("Hello, how are you?").unwrap();
        assert_eq!(tokens, vec!["Hello", ",", "how", "are", "you", "?"]);
    }

    #[test]
    fn test_collapses_whitespace() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let normalizer = TextNormalizer::new(&lemmatizer);

        let tokens = normalizer.tokenize("  Hi \t there!!  ").unwrap();
        assert_eq!(tokens, vec!["Hi", "there", "!", "!"]);
    }

    #[test]
    fn test_empty_text_has_no_tokens() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let normalizer = TextNormalizer::new(&lemmatizer);
        assert!(normalizer.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_lemmatize_delegates_with_case_folding() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let normalizer = TextNormalizer::new(&lemmatizer);
        assert_eq!(normalizer.lemmatize("Courses"), "course");
    }
}
