use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded document: a bag-of-words row and its one-hot tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub features: Vec<f32>,
    pub label:    Vec<f32>,
}

impl TrainingExample {
    /// Column of the single set label bit, if the label is one-hot.
    pub fn tag_position(&self) -> Option<usize> {
        let mut hot = self.label.iter().enumerate().filter(|(_, v)| **v != 0.0);
        match (hot.next(), hot.next()) {
            (Some((i, &v)), None) if v == 1.0 => Some(i),
            _ => None,
        }
    }
}

pub struct IntentDataset {
    examples: Vec<TrainingExample>,
}

impl IntentDataset {
    pub fn new(examples: Vec<TrainingExample>) -> Self { Self { examples } }

    pub fn examples(&self) -> &[TrainingExample] { &self.examples }
}

impl Dataset<TrainingExample> for IntentDataset {
    fn get(&self, index: usize) -> Option<TrainingExample> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}
