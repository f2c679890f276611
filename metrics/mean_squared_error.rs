use super::{mean::Mean, StreamingMetric};

/// The mean squared error is the weighted mean of the squared differences between the predictions and the labels.
#[derive(Debug, Default)]
pub struct MeanSquaredError(Mean);

/// The input to [`MeanSquaredError`](struct.MeanSquaredError.html).
pub struct MeanSquaredErrorInput {
	pub prediction: f64,
	pub label: f64,
	pub weight: f64,
}

impl StreamingMetric<'_> for MeanSquaredError {
	type Input = MeanSquaredErrorInput;
	type Output = Option<f64>;

	fn update(&mut self, value: MeanSquaredErrorInput) {
		self.0
			.update(((value.prediction - value.label).powi(2), value.weight))
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
	let mut mse = MeanSquaredError::default();
	mse.update(MeanSquaredErrorInput {
		prediction: 1.0,
		label: 3.0,
		weight: 1.0,
	});
	mse.update(MeanSquaredErrorInput {
		prediction: 2.0,
		label: 2.0,
		weight: 1.0,
	});
	assert_eq!(mse.finalize(), Some(2.0));
}
