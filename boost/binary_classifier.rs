use crate::{
	Booster, Error, ExecutionContext, Objective, TrainOptions, TrainProgress, Tree,
};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// A `BinaryClassifier` is trained to predict binary target values, for example whether a patient has heart disease or not. The labels must be 0.0 or 1.0.
#[derive(Debug, Deserialize, Serialize)]
pub struct BinaryClassifier {
	model: Booster,
}

impl BinaryClassifier {
	/// Train a binary classifier with the log loss objective.
	pub fn train(
		context: &ExecutionContext,
		features: ArrayView2<f64>,
		labels: ArrayView1<f64>,
		sample_weight: Option<ArrayView1<f64>>,
		options: &TrainOptions,
		update_progress: &mut dyn FnMut(TrainProgress),
	) -> Result<BinaryClassifier, Error> {
		let model = crate::train::train(
			context,
			features,
			labels,
			sample_weight,
			Objective::LogLoss,
			options,
			update_progress,
		)?;
		Ok(BinaryClassifier { model })
	}

	/// Compute the probability of the positive class for every example by applying the sigmoid transform to the raw predictions.
	pub fn predict_proba(
		&self,
		context: &ExecutionContext,
		features: ArrayView2<f64>,
	) -> Result<Array1<f64>, Error> {
		let predictions = self.model.predict(context, features)?;
		Ok(predictions.mapv(|raw| self.model.objective.transform(raw)))
	}

	/// Predict the class of every example by thresholding the probability at 0.5.
	pub fn predict(
		&self,
		context: &ExecutionContext,
		features: ArrayView2<f64>,
	) -> Result<Array1<bool>, Error> {
		let probabilities = self.predict_proba(context, features)?;
		Ok(probabilities.mapv(|probability| probability >= 0.5))
	}

	pub fn bias(&self) -> f64 {
		self.model.bias
	}

	pub fn trees(&self) -> &[Tree] {
		&self.model.trees
	}

	/// The value of the training metric after each round.
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

	fn non_increasing(values: &[f64]) -> bool {
		values
			.windows(2)
			.all(|window| window[1] <= window[0] + 1e-7)
	}

	#[test]
	fn test_predict_agrees_with_predict_proba() {
		let context = ExecutionContext::local();
		let features = arr2(&[[0.0], [1.0], [2.0], [3.0]]);
		let labels = arr1(&[0.0, 0.0, 1.0, 1.0]);
		let options = TrainOptions {
			learning_rate: 0.3,
			max_depth: 1,
			n_estimators: 5,
			..Default::default()
		};
		let model = BinaryClassifier::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |_| {},
		)
		.unwrap();
		let probabilities = model.predict_proba(&context, features.view()).unwrap();
		let predictions = model.predict(&context, features.view()).unwrap();
		for (probability, prediction) in probabilities.iter().zip(predictions.iter()) {
			assert_eq!(*prediction, *probability >= 0.5);
		}
	}

	// The candidate split thresholds are sampled rows, so whether a particular seed separates the two middle examples is random. This checks the expected behavior statistically across many seeds, and checks the metric invariant for every seed.
	#[test]
	fn test_separable_scenario() {
		let context = ExecutionContext::local();
		let features = arr2(&[[0.0], [1.0], [2.0], [3.0]]);
		let labels = arr1(&[0.0, 0.0, 1.0, 1.0]);
		let mut n_exact = 0;
		let n_seeds: u64 = 50;
		for random_state in 0..n_seeds {
			let options = TrainOptions {
				learning_rate: 0.3,
				max_depth: 1,
				n_estimators: 5,
				random_state,
				..Default::default()
			};
			let model = BinaryClassifier::train(
				&context,
				features.view(),
				labels.view(),
				None,
				&options,
				&mut |_| {},
			)
			.unwrap();
			assert_eq!(model.train_metrics().len(), 5);
			assert!(non_increasing(model.train_metrics()));
			let predictions = model.predict(&context, features.view()).unwrap();
			if predictions == arr1(&[false, false, true, true]) {
				n_exact += 1;
			}
		}
		// A seed separates the classes when any of its five rounds samples the threshold between the two middle examples, which happens with probability 1 - (3/4)^5, about 0.76.
		assert!(n_exact >= 30, "n_exact = {}", n_exact);
	}

	#[test]
	fn test_balanced_classes_have_zero_bias() {
		let context = ExecutionContext::local();
		let features = arr2(&[[0.0], [1.0], [2.0], [3.0]]);
		let labels = arr1(&[0.0, 0.0, 1.0, 1.0]);
		let options = TrainOptions {
			n_estimators: 0,
			..Default::default()
		};
		let model = BinaryClassifier::train(
			&context,
			features.view(),
			labels.view(),
			None,
			&options,
			&mut |_| {},
		)
		.unwrap();
		assert_eq!(model.bias(), 0.0);
		let probabilities = model.predict_proba(&context, features.view()).unwrap();
		assert!(probabilities.iter().all(|probability| *probability == 0.5));
	}
}
