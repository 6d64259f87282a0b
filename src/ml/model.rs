use burn::{
    nn::{Dropout, DropoutConfig, Initializer, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{relu, softmax},
};

/// Width of the first hidden layer.
pub const HIDDEN_1: usize = 128;
/// Width of the second hidden layer.
pub const HIDDEN_2: usize = 64;

/// Probabilities are clamped to [EPSILON, 1 - EPSILON] before the log.
const EPSILON: f64 = 1e-7;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct IntentClassifierConfig {
    /// Vocabulary size.
    pub input_width: usize,
    /// Tag count.
    pub num_tags:    usize,
    #[config(default = 0.5)]
    pub dropout:     f64,
}

impl IntentClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> IntentClassifier<B> {
        let dense = |d_in: usize, d_out: usize| -> Linear<B> {
            LinearConfig::new(d_in, d_out)
                .with_initializer(Initializer::XavierUniform { gain: 1.0 })
                .init(device)
        };
        IntentClassifier {
            hidden1:  dense(self.input_width, HIDDEN_1),
            dropout1: DropoutConfig::new(self.dropout).init(),
            hidden2:  dense(HIDDEN_1, HIDDEN_2),
            dropout2: DropoutConfig::new(self.dropout).init(),
            output:   dense(HIDDEN_2, self.num_tags),
        }
    }
}

/// dense(128, relu) → dropout → dense(64, relu) → dropout → dense(tags, softmax)
#[derive(Module, Debug)]
pub struct IntentClassifier<B: Backend> {
    pub hidden1:  Linear<B>,
    pub dropout1: Dropout,
    pub hidden2:  Linear<B>,
    pub dropout2: Dropout,
    pub output:   Linear<B>,
}

impl<B: Backend> IntentClassifier<B> {
    /// features: [batch, vocabulary] → probabilities: [batch, tags]
    ///
    /// Dropout is only active on autodiff backends, i.e. while training.
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.dropout1.forward(relu(self.hidden1.forward(features)));
        let x = self.dropout2.forward(relu(self.hidden2.forward(x)));
        softmax(self.output.forward(x), 1)
    }

    /// Categorical cross-entropy of the softmax output against
    /// one-hot labels, averaged over the batch.
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        labels:   Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let probs = self.forward(features);
        let log_probs = probs.clone().clamp(EPSILON, 1.0 - EPSILON).log();
        let loss = (labels * log_probs).sum_dim(1).mean().neg();
        (loss, probs)
    }
}

/// Number of rows whose most probable tag matches the label.
pub fn correct_predictions<B: Backend>(probs: Tensor<B, 2>, labels: Tensor<B, 2>) -> usize {
    let predicted = probs.argmax(1);
    let expected  = labels.argmax(1);
    predicted
        .equal(expected)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}
