use crate::{
	Booster, Error, ExecutionContext, Objective, TrainOptions, TrainProgress, Tree,
};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// `Regressor`s predict continuous target values, for example the selling price of a home.
#[derive(Debug, Deserialize, Serialize)]
pub struct Regressor {
	model: Booster,
}

impl Regressor {
	/// Train a regressor with the squared error objective.
	pub fn train(
		context: &ExecutionContext,
		features: ArrayView2<f64>,
		labels: ArrayView1<f64>,
		sample_weight: Option<ArrayView1<f64>>,
		options: &TrainOptions,
		update_progress: &mut dyn FnMut(TrainProgress),
	) -> Result<Regressor, Error> {
		let model = crate::train::train(
			context,
			features,
			labels,
			sample_weight,
			Objective::SquaredError,
			options,
			update_progress,
		)?;
		Ok(Regressor { model })
	}

	/// Make predictions. The output is the raw accumulated sum of the bias and the tree outputs, untransformed.
	pub fn predict(
		&self,
		context: &ExecutionContext,
		features: ArrayView2<f64>,
	) -> Result<Array1<f64>, Error> {
		self.model.predict(context, features)
	}

	pub fn bias(&self) -> f64 {
		self.model.bias
	}

	pub fn trees(&self) -> &[Tree] {
		&self.model.trees
	}

	/// The value of the training metric after each round. For well behaved convex objectives and moderate learning rates this sequence is expected to be non-increasing, though that is not a hard guarantee.
	pub fn train_metrics(&self) -> &[f64] {
		&self.model.train_metrics
	}

	pub fn dump_trees(&self) -> String {
		self.model.dump_trees()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Init;

	fn dataset() -> (Array2<f64>, Array1<f64>) {
		let n_examples = 64;
		let mut features = Array2::zeros((n_examples, 2));
		let mut labels = Array1::zeros(n_examples);
		for example_index in 0..n_examples {
			let x0 = (example_index % 8) as f64;
			let x1 = (example_index / 8) as f64;
			features[[example_index, 0]] = x0;
			features[[example_index, 1]] = x1;
			labels[example_index] = 2.0 * x0 - 3.0 * x1 + (x0 * 0.7).sin();
		}
		(features, labels)
	}

	fn non_increasing(values: &[f64]) -> bool {
		values
			.windows(2)
			.all(|window| window[1] <= window[0] + 1e-9)
	}

	#[test]
	fn test_train_metrics() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		for &max_depth in &[1, 3, 5] {
			for &learning_rate in &[0.05, 0.1, 0.5] {
				for &init in &[Init::Average, Init::Zero] {
					for random_state in 0..4 {
						let options = TrainOptions {
							init,
							learning_rate,
							max_depth,
							n_estimators: 20,
							random_state,
						};
						let model = Regressor::train(
							&context,
							features.view(),
							labels.view(),
							None,
							&options,
							&mut |_| {},
						)
						.unwrap();
						assert_eq!(model.train_metrics().len(), 20);
						assert!(
							non_increasing(model.train_metrics()),
							"mse increased with max_depth {} learning_rate {} init {:?} random_state {}",
							max_depth,
							learning_rate,
							init,
							random_state,
						);
					}
				}
			}
		}
	}

	#[test]
	fn test_predict_shape_and_idempotence() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		let options = TrainOptions {
			n_estimators: 5,
			..Default::default()
		};
		let model = Regressor::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |_| {},
		)
		.unwrap();
		let first = model.predict(&context, features.view()).unwrap();
		let second = model.predict(&context, features.view()).unwrap();
		assert_eq!(first.len(), features.nrows());
		// Repeated predictions on unchanged input must be bit identical.
		assert_eq!(first, second);
	}

	#[test]
	fn test_zero_estimators_predicts_the_bias() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		let options = TrainOptions {
			n_estimators: 0,
			..Default::default()
		};
		let model = Regressor::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |_| {},
		)
		.unwrap();
		let mean = labels.mean().unwrap();
		assert!((model.bias() - mean).abs() < 1e-12);
		let predictions = model.predict(&context, features.view()).unwrap();
		assert!(predictions.iter().all(|prediction| *prediction == model.bias()));
	}

	#[test]
	fn test_single_leaf_matches_the_closed_form_solution() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		// With no bias, depth 0, and learning rate 1, one round fits a single global leaf, whose value is the mean of the labels up to the hessian regularization term.
		let options = TrainOptions {
			init: Init::Zero,
			learning_rate: 1.0,
			max_depth: 0,
			n_estimators: 1,
			..Default::default()
		};
		let model = Regressor::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |_| {},
		)
		.unwrap();
		let mean = labels.mean().unwrap();
		let predictions = model.predict(&context, features.view()).unwrap();
		assert!((predictions[0] - mean).abs() < 1e-4);
	}

	#[test]
	fn test_sample_weights() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		let weights = Array1::from_elem(features.nrows(), 2.0);
		let options = TrainOptions {
			n_estimators: 10,
			..Default::default()
		};
		let model = Regressor::train(
			&context,
			features.view(),
			labels.view(),
			Some(weights.view()),
			&options,
			&mut |_| {},
		)
		.unwrap();
		assert!(non_increasing(model.train_metrics()));
	}

	#[test]
	fn test_progress_counts_rounds() {
		let context = ExecutionContext::local();
		let (features, labels) = dataset();
		let options = TrainOptions {
			n_estimators: 3,
			..Default::default()
		};
		let mut round_counter = None;
		Regressor::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |progress| round_counter = Some(progress.0),
		)
		.unwrap();
		let round_counter = round_counter.unwrap();
		assert_eq!(round_counter.total(), 3);
		assert_eq!(round_counter.get(), 3);
	}
}
