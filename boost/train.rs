use crate::{
	engine::BuildTreeOptions, validate, Booster, Error, ExecutionContext, Init, Objective,
	TrainOptions, TrainProgress,
};
use grove_progress::ProgressCounter;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// To avoid code duplication, this shared `train` function is called by `Regressor::train` and `BinaryClassifier::train`.
pub fn train(
	context: &ExecutionContext,
	features: ArrayView2<f64>,
	labels: ArrayView1<f64>,
	sample_weight: Option<ArrayView1<f64>>,
	objective: Objective,
	options: &TrainOptions,
	update_progress: &mut dyn FnMut(TrainProgress),
) -> Result<Booster, Error> {
	validate::check_features(features)?;
	validate::check_labels(labels, features.nrows())?;
	let weights = validate::check_sample_weight(sample_weight, features.nrows())?;
	let n_examples = features.nrows();
	let labels = labels.to_vec();
	let mut gradients = vec![0.0; n_examples];
	let mut hessians = vec![0.0; n_examples];

	// Compute the bias, the prediction of the model before any trees are trained. With `Init::Average` it is the value that minimizes the loss over the training set, which is the same as fitting a single global leaf with learning rate 1.0.
	let mut bias = 0.0;
	if let Init::Average = options.init {
		let baseline = vec![objective.transform(0.0); n_examples];
		objective.update_gradients_and_hessians(
			&mut gradients,
			&mut hessians,
			&labels,
			&baseline,
			&weights,
		);
		let sum_gradients: f64 = gradients.iter().sum();
		let sum_hessians: f64 = hessians.iter().sum();
		if sum_hessians > 0.0 {
			bias = -sum_gradients / sum_hessians;
		}
	}

	// The running predictions are maintained incrementally: each round adds its tree's predictions rather than re-evaluating every tree. Trees are applied strictly in construction order, so the floating point summation order is part of the reproducibility contract.
	let mut predictions = vec![bias; n_examples];
	let mut transformed = vec![0.0; n_examples];
	let mut trees = Vec::with_capacity(options.n_estimators);
	let mut train_metrics = Vec::with_capacity(options.n_estimators);
	let mut rng = Xoshiro256Plus::seed_from_u64(options.random_state);
	let round_counter = ProgressCounter::new(options.n_estimators.to_u64().unwrap());
	update_progress(TrainProgress(round_counter.clone()));
	for _ in 0..options.n_estimators {
		for (transformed, prediction) in transformed.iter_mut().zip(predictions.iter()) {
			*transformed = objective.transform(*prediction);
		}
		objective.update_gradients_and_hessians(
			&mut gradients,
			&mut hessians,
			&labels,
			&transformed,
			&weights,
		);
		let split_proposals = sample_split_proposals(features, options.max_depth, &mut rng);
		// Reborrow the feature view so the options struct borrows for this iteration only, not for the caller's input lifetime.
		let tree = context.split_engine.build_tree(BuildTreeOptions {
			features: features.view(),
			gradients: &gradients,
			hessians: &hessians,
			split_proposals: split_proposals.view(),
			learning_rate: options.learning_rate,
			max_depth: options.max_depth,
			seed: rng.gen(),
		});
		context
			.predict_engine
			.update_predictions(features, &tree, &mut predictions);
		trees.push(tree);
		for (transformed, prediction) in transformed.iter_mut().zip(predictions.iter()) {
			*transformed = objective.transform(*prediction);
		}
		train_metrics.push(objective.compute_metric(&labels, &transformed, &weights));
		round_counter.inc(1);
	}

	Ok(Booster {
		bias,
		trees,
		train_metrics,
		n_features: features.ncols(),
		objective,
	})
}

/// Sample `max_depth` rows from the feature matrix uniformly at random with replacement. The values of these rows are the only eligible split thresholds for each feature, which bounds the cost of split search at the expense of approximation quality.
fn sample_split_proposals(
	features: ArrayView2<f64>,
	max_depth: usize,
	rng: &mut Xoshiro256Plus,
) -> Array2<f64> {
	let mut split_proposals = Array2::zeros((max_depth, features.ncols()));
	for mut row in split_proposals.genrows_mut() {
		let example_index = rng.gen_range(0, features.nrows());
		row.assign(&features.row(example_index));
	}
	split_proposals
}
