// ============================================================
// Layer 3 - Feature Index
// ============================================================
// Column layout shared by training and any later inference:
//
//   vocabulary[i] ↔ feature column i
//   tags[j]       ↔ label column j
//
// Both lists are kept strictly sorted (sorted + no duplicates).
// Holding them in one value means they are always written and
// read together, so the two orders cannot drift apart.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureIndex {
    vocabulary: Vec<String>,
    tags:       Vec<String>,
}

impl FeatureIndex {
    /// Build an index from arbitrary collections; entries are
    /// deduplicated and sorted.
    pub fn from_unsorted<V, T>(vocabulary: V, tags: T) -> Self
    where
        V: IntoIterator<Item = String>,
        T: IntoIterator<Item = String>,
    {
        let vocabulary: BTreeSet<String> = vocabulary.into_iter().collect();
        let tags: BTreeSet<String>       = tags.into_iter().collect();
        Self {
            vocabulary: vocabulary.into_iter().collect(),
            tags:       tags.into_iter().collect(),
        }
    }

    /// Accept lists that must already be in index order, e.g. when
    /// reading them back from disk.
    pub fn from_sorted(vocabulary: Vec<String>, tags: Vec<String>) -> Result<Self, PipelineError> {
        ensure_strictly_sorted("vocabulary", &vocabulary)?;
        ensure_strictly_sorted("tag", &tags)?;
        Ok(Self { vocabulary, tags })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Length of every feature vector.
    pub fn feature_width(&self) -> usize {
        self.vocabulary.len()
    }

    /// Length of every label vector.
    pub fn label_width(&self) -> usize {
        self.tags.len()
    }

    pub fn tag_index(&self, tag: &str) -> Result<usize, PipelineError> {
        self.tags
            .binary_search_by(|t| t.as_str().cmp(tag))
            .map_err(|_| PipelineError::UnknownTag(tag.to_string()))
    }
}

fn ensure_strictly_sorted(kind: &'static str, entries: &[String]) -> Result<(), PipelineError> {
    for (position, pair) in entries.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(PipelineError::UnsortedIndex {
                kind,
                position: position + 1,
                entry:    pair[1].clone(),
            });
        }
    }
    Ok(())
}
