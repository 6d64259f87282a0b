// ============================================================
// Layer 4 - Feature Encoder
// ============================================================
// Turns each Document into a training example:
//
//   features[i] = 1.0 if vocabulary[i] is one of the document's
//                 lemmas, else 0.0            (bag of words)
//   label[j]    = 1.0 only at the document's tag index (one-hot)
//
// Documents store raw tokens, so they are lemmatized again here.
// The ignore list is not applied at this stage; "?" and "!" are
// never in the vocabulary, so they cannot set a feature anyway.
//
// The finished examples are shuffled so consecutive mini-batches
// do not follow the dataset's intent order.
//
// Reference: rand crate documentation (SliceRandom)

use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;

use crate::data::{dataset::TrainingExample, normalizer::TextNormalizer};
use crate::domain::{error::PipelineError, feature_index::FeatureIndex, intent::Document};

pub struct FeatureEncoder<'a> {
    normalizer: &'a TextNormalizer<'a>,
    index:      &'a FeatureIndex,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(normalizer: &'a TextNormalizer<'a>, index: &'a FeatureIndex) -> Self {
        Self { normalizer, index }
    }

    /// Encode a single document, keeping its position stable.
    pub fn encode(&self, document: &Document) -> Result<TrainingExample, PipelineError> {
        let lemmas: HashSet<String> = document
            .tokens
            .iter()
            .map(|t| self.normalizer.lemmatize(t))
            .collect();

        let features = self
            .index
            .vocabulary()
            .iter()
            .map(|word| if lemmas.contains(word) { 1.0 } else { 0.0 })
            .collect();

        let mut label = vec![0.0; self.index.label_width()];
        label[self.index.tag_index(&document.tag)?] = 1.0;

        Ok(TrainingExample { features, label })
    }

    /// Encode every document, then shuffle the result with `rng`.
    pub fn encode_all<R: Rng + ?Sized>(
        &self,
        documents: &[Document],
        rng:       &mut R,
    ) -> Result<Vec<TrainingExample>, PipelineError> {
        let mut examples = documents
            .iter()
            .map(|d| self.encode(d))
            .collect::<Result<Vec<_>, _>>()?;

        examples.shuffle(rng);
        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        extractor::{Corpus, CorpusExtractor},
        lemmatizer::Lemmatizer,
    };
    use crate::domain::intent::IntentRecord;
    use rand::{rngs::StdRng, SeedableRng};

    fn corpus(lemmatizer: &Lemmatizer) -> Corpus {
        let normalizer = TextNormalizer::new(lemmatizer);
        CorpusExtractor::new(&normalizer)
            .extract(&[
                IntentRecord::new("greeting", vec!["Hi", "Hello there", "Hi there!"]),
                IntentRecord::new("bye", vec!["Goodbye", "Bye now"]),
                IntentRecord::new("courses", vec!["Which courses?", "Show me the course list"]),
            ])
            .unwrap()
    }

    #[test]
    fn test_widths_and_one_hot_labels() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        let mut rng  = StdRng::seed_from_u64(7);
        let examples = encoder.encode_all(&corpus.documents, &mut rng).unwrap();

        assert_eq!(examples.len(), corpus.documents.len());
        for ex in &examples {
            assert_eq!(ex.features.len(), corpus.index.feature_width());
            assert_eq!(ex.label.len(), corpus.index.label_width());
            assert_eq!(ex.label.iter().sum::<f32>(), 1.0);
            assert_eq!(ex.label.iter().filter(|&&v| v == 1.0).count(), 1);
        }
    }

    #[test]
    fn test_feature_membership_round_trip() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        for doc in &corpus.documents {
            let lemmas: HashSet<String> =
                doc.tokens.iter().map(|t| lemmatizer.lemmatize(t)).collect();
            let ex = encoder.encode(doc).unwrap();

            for (i, word) in corpus.index.vocabulary().iter().enumerate() {
                let expected = if lemmas.contains(word) { 1.0 } else { 0.0 };
                assert_eq!(ex.features[i], expected, "word '{word}' in {:?}", doc.tokens);
            }
        }
    }

    #[test]
    fn test_label_position_follows_sorted_tags() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        // tags = ["bye", "courses", "greeting"]
        let ex = encoder.encode(&Document::new(vec!["Hi".into()], "greeting")).unwrap();
        assert_eq!(ex.label, vec![0.0, 0.0, 1.0]);
        let ex = encoder.encode(&Document::new(vec!["Bye".into()], "bye")).unwrap();
        assert_eq!(ex.label, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_case_and_plural_match_vocabulary() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        let ex = encoder
            .encode(&Document::new(vec!["COURSES".into()], "courses"))
            .unwrap();
        let course = corpus
            .index
            .vocabulary()
            .iter()
            .position(|w| w == "course")
            .unwrap();
        assert_eq!(ex.features[course], 1.0);
        assert_eq!(ex.features.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        let err = encoder
            .encode(&Document::new(vec!["rain".into()], "weather"))
            .unwrap_err();
        assert_eq!(err, PipelineError::UnknownTag("weather".to_string()));
    }

    #[test]
    fn test_shuffle_preserves_examples() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let corpus     = corpus(&lemmatizer);
        let normalizer = TextNormalizer::new(&lemmatizer);
        let encoder    = FeatureEncoder::new(&normalizer, &corpus.index);

        let in_order: Vec<TrainingExample> = corpus
            .documents
            .iter()
            .map(|d| encoder.encode(d).unwrap())
            .collect();

        let mut rng      = StdRng::seed_from_u64(42);
        let mut shuffled = encoder.encode_all(&corpus.documents, &mut rng).unwrap();

        let key = |e: &TrainingExample| format!("{:?}{:?}", e.features, e.label);
        let mut expected: Vec<String> = in_order.iter().map(key).collect();
        let mut actual: Vec<String>   = shuffled.drain(..).map(|e| key(&e)).collect();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_encode_all_reorders_documents() {
        let lemmatizer = Lemmatizer::english().unwrap();
        let normalizer = TextNormalizer::new(&lemmatizer);
        let words = ["apple", "banana", "cherry", "date", "elder", "fig", "grape", "hazel", "kiwi", "lemon"];
        let intents: Vec<IntentRecord> = words
            .iter()
            .map(|w| IntentRecord::new(*w, vec![*w]))
            .collect();
        let corpus  = CorpusExtractor::new(&normalizer).extract(&intents).unwrap();
        let encoder = FeatureEncoder::new(&normalizer, &corpus.index);

        let in_order: Vec<TrainingExample> = corpus
            .documents
            .iter()
            .map(|d| encoder.encode(d).unwrap())
            .collect();

        let mut rng  = StdRng::seed_from_u64(42);
        let shuffled = encoder.encode_all(&corpus.documents, &mut rng).unwrap();

        assert_eq!(shuffled.len(), words.len());
        assert_ne!(shuffled, in_order);
        for ex in &in_order {
            assert!(shuffled.contains(ex));
        }
    }
}
