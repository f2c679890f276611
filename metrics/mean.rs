use super::StreamingMetric;

/// A weighted streaming mean. The input is a `(value, weight)` pair.
#[derive(Debug, Default)]
pub struct Mean {
	sum: f64,
	sum_weights: f64,
}

impl StreamingMetric<'_> for Mean {
	type Input = (f64, f64);
	type Output = Option<f64>;

	fn update(&mut self, value: Self::Input) {
		self.sum += value.0 * value.1;
		self.sum_weights += value.1;
	}

	fn merge(&mut self, other: Self) {
		self.sum += other.sum;
		self.sum_weights += other.sum_weights;
	}

	fn finalize(self) -> Self::Output {
		if self.sum_weights > 0.0 {
			Some(self.sum / self.sum_weights)
		} else {
			None
		}
	}
}

#[test]
fn test() {
	let mut mean = Mean::default();
	mean.update((1.0, 1.0));
	mean.update((3.0, 3.0));
	assert_eq!(mean.finalize(), Some(2.5));
	let empty = Mean::default();
	assert_eq!(empty.finalize(), None);
}
