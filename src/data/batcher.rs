// ============================================================
// Layer 4 - Intent Batcher
// ============================================================
// Implements Burn's Batcher trait: stacks N training examples
// into two float tensors.
//
//   features: [N, vocabulary size]
//   labels:   [N, tag count]
//
// Every example in a batch must have the same widths; the
// trainer validates this before the first batch is built.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TrainingExample;

#[derive(Debug, Clone)]
pub struct IntentBatch<B: Backend> {
    /// Bag-of-words rows - shape: [batch_size, feature_width]
    pub features: Tensor<B, 2>,

    /// One-hot rows - shape: [batch_size, label_width]
    pub labels: Tensor<B, 2>,
}

#[derive(Clone, Debug, Default)]
pub struct IntentBatcher;

impl IntentBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, TrainingExample, IntentBatch<B>> for IntentBatcher {
    fn batch(&self, items: Vec<TrainingExample>, device: &B::Device) -> IntentBatch<B> {
        let batch_size    = items.len();
        let feature_width = items.first().map_or(0, |e| e.features.len());
        let label_width   = items.first().map_or(0, |e| e.label.len());

        let features: Vec<f32> = items.iter().flat_map(|e| e.features.iter().copied()).collect();
        let labels: Vec<f32>   = items.iter().flat_map(|e| e.label.iter().copied()).collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(features, [batch_size, feature_width]),
            device,
        );
        let labels = Tensor::<B, 2>::from_data(
            TensorData::new(labels, [batch_size, label_width]),
            device,
        );

        IntentBatch { features, labels }
    }
}
