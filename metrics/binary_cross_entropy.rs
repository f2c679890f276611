use super::{mean::Mean, StreamingMetric};
use num_traits::clamp;

/// BinaryCrossEntropy is the loss function used for binary classification. [Learn more](https://en.wikipedia.org/wiki/Cross_entropy#Cross-entropy_loss_function_and_logistic_regression).
#[derive(Debug, Default)]
pub struct BinaryCrossEntropy(Mean);

/// The input to [`BinaryCrossEntropy`](struct.BinaryCrossEntropy.html). The `label` must be either 0.0 or 1.0.
pub struct BinaryCrossEntropyInput {
	pub probability: f64,
	pub label: f64,
	pub weight: f64,
}

impl StreamingMetric<'_> for BinaryCrossEntropy {
	type Input = BinaryCrossEntropyInput;
	type Output = Option<f64>;

	fn update(&mut self, value: BinaryCrossEntropyInput) {
		// Binary cross entropy is undefined when the probability = 0 or probability = 1, so the probability is clamped to be between (epsilon, 1 - epsilon).
		let probability_clamped = clamp(
			value.probability,
			std::f64::EPSILON,
			1.0 - std::f64::EPSILON,
		);
		let binary_cross_entropy = -1.0 * value.label * probability_clamped.ln()
			+ -1.0 * (1.0 - value.label) * (1.0 - probability_clamped).ln();
		self.0.update((binary_cross_entropy, value.weight));
	}

	fn merge(&mut self, other: Self) {
		self.0.merge(other.0)
	}

	fn finalize(self) -> Self::Output {
		self.0.finalize()
	}
}

#[test]
fn test() {
	let mut bce = BinaryCrossEntropy::default();
	bce.update(BinaryCrossEntropyInput {
		probability: 0.5,
		label: 1.0,
		weight: 1.0,
	});
	bce.update(BinaryCrossEntropyInput {
		probability: 0.5,
		label: 0.0,
		weight: 1.0,
	});
	let loss = bce.finalize().unwrap();
	assert!((loss - std::f64::consts::LN_2).abs() < 1e-12);
}
