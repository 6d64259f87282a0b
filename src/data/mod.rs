// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// From the intents file to tensor batches:
//
//   intents.json
//       │
//       ▼
//   IntentsLoader     → IntentRecords
//       │
//       ▼
//   CorpusExtractor   → Documents + FeatureIndex (vocabulary, tags)
//       │               (TextNormalizer: tokenize + lemmatize)
//       ▼
//   FeatureEncoder    → shuffled TrainingExamples
//       │
//       ▼
//   IntentDataset     → Burn's Dataset trait
//       │
//       ▼
//   IntentBatcher     → [batch, vocab] / [batch, tags] tensors
//
// Reference: Burn Book §4 (Datasets and Batchers)

/// Reads the intents JSON file
pub mod loader;

/// Noun lemmatizer and its lexicon
pub mod lemmatizer;

/// Tokenization and lemmatization of raw text
pub mod normalizer;

/// Documents, vocabulary and tag list from intent records
pub mod extractor;

/// Bag-of-words and one-hot encoding plus shuffle
pub mod encoder;

/// Implements Burn's Dataset trait for training examples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
