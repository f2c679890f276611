use crate::tree::Tree;
use grove_util::ToFinite;
use ndarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// This term is added to the sum of hessians in the denominator of the leaf value and gain formulas to prevent division by zero.
const HESSIAN_REGULARIZATION: f64 = 1e-5;

/// These are the options passed to `SplitEngine::build_tree`.
pub struct BuildTreeOptions<'a> {
	/// The feature matrix, one row per training example.
	pub features: ArrayView2<'a, f64>,
	/// The first derivatives of the loss with respect to the current predictions, aligned with the rows of `features`.
	pub gradients: &'a [f64],
	/// The second derivatives of the loss, aligned with `gradients`.
	pub hessians: &'a [f64],
	/// Rows sampled from the feature matrix. Their values are the only eligible split thresholds for each feature.
	pub split_proposals: ArrayView2<'a, f64>,
	/// The learning rate scales every leaf value in the returned tree.
	pub learning_rate: f64,
	/// The depth of the returned tree will never exceed this value.
	pub max_depth: usize,
	/// This seed makes the engine's internal random choices reproducible.
	pub seed: u32,
}

/**
A `SplitEngine` builds one tree from the gradients and hessians of the current round. Implementations are free to choose any execution strategy, as long as the returned tree honors the `Tree` layout: arrays of length `2^(max_depth + 1)`, leaf values already scaled by the learning rate, and a zero leaf wherever the sum of hessians in a node is not positive.
*/
pub trait SplitEngine: Send + Sync {
	fn build_tree(&self, options: BuildTreeOptions) -> Tree;
}

/**
A `PredictEngine` adds one tree's predictions to a running prediction for every example. The result for each example must be deterministic given the tree and the example, with no ordering dependency across examples.
*/
pub trait PredictEngine: Send + Sync {
	fn update_predictions(&self, features: ArrayView2<f64>, tree: &Tree, predictions: &mut [f64]);
}

/**
An `ExecutionContext` owns the engines used to build trees and compute predictions. Callers create one explicitly, typically once at process start, and pass it to every train and predict call. There is no ambient global context.
*/
pub struct ExecutionContext {
	pub split_engine: Box<dyn SplitEngine>,
	pub predict_engine: Box<dyn PredictEngine>,
}

impl ExecutionContext {
	/// Create a context backed by the rayon engines in this crate.
	pub fn local() -> ExecutionContext {
		ExecutionContext {
			split_engine: Box::new(LocalSplitEngine),
			predict_engine: Box::new(LocalPredictEngine),
		}
	}
}

/**
`LocalSplitEngine` builds trees level by level with an exhaustive search over the proposed split thresholds, parallelized across features with rayon.

For each node on the frontier, every `(feature, threshold)` candidate is scored with the gain `0.5 * (G_l^2 / (H_l + eps) + G_r^2 / (H_r + eps) - G^2 / (H + eps))`, where `G`/`H` are the node's sums of gradients and hessians and the `l`/`r` subscripts are the sums for the examples a candidate sends left and right. The node splits on the best candidate when its gain is positive, and otherwise becomes a leaf with value `-G / (H + eps)` scaled by the learning rate. Candidates with equal gain are broken uniformly at random using the seed from the options.
*/
pub struct LocalSplitEngine;

impl SplitEngine for LocalSplitEngine {
	fn build_tree(&self, options: BuildTreeOptions) -> Tree {
		let BuildTreeOptions {
			features,
			gradients,
			hessians,
			split_proposals,
			learning_rate,
			max_depth,
			seed,
		} = options;
		let n_examples = features.nrows();
		let mut tree = Tree::new(max_depth);
		let mut rng = Xoshiro256Plus::seed_from_u64(seed.into());
		let candidate_thresholds = compute_candidate_thresholds(split_proposals);
		// Each example starts at the root and is routed down one level per iteration until it lands in a finalized leaf.
		let mut node_for_example = vec![0; n_examples];
		let mut example_is_finished = vec![false; n_examples];
		for depth in 0..=max_depth {
			let mut examples_for_node: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
			for example_index in 0..n_examples {
				if !example_is_finished[example_index] {
					examples_for_node
						.entry(node_for_example[example_index])
						.or_insert_with(Vec::new)
						.push(example_index);
				}
			}
			for (&node_index, examples) in examples_for_node.iter() {
				let sum_gradients: f64 = examples.iter().map(|&i| gradients[i]).sum();
				let sum_hessians: f64 = examples.iter().map(|&i| hessians[i]).sum();
				if sum_hessians <= 0.0 {
					// There is no hessian weight to fit, so the node stays a zero leaf.
					for &example_index in examples.iter() {
						example_is_finished[example_index] = true;
					}
					continue;
				}
				let best_split = if depth < max_depth {
					choose_best_split(
						features,
						gradients,
						hessians,
						&candidate_thresholds,
						examples,
						sum_gradients,
						sum_hessians,
						&mut rng,
					)
				} else {
					None
				};
				match best_split {
					Some(split) => {
						tree.feature[node_index] = split.feature_index as i32;
						tree.split_value[node_index] = split.split_value;
						for &example_index in examples.iter() {
							let goes_left = features[[example_index, split.feature_index]]
								<= split.split_value;
							node_for_example[example_index] = if goes_left {
								Tree::left_child(node_index)
							} else {
								Tree::right_child(node_index)
							};
						}
					}
					None => {
						tree.leaf_value[node_index] = -sum_gradients
							/ (sum_hessians + HESSIAN_REGULARIZATION)
							* learning_rate;
						for &example_index in examples.iter() {
							example_is_finished[example_index] = true;
						}
					}
				}
			}
		}
		tree
	}
}

/// Collect the sorted, deduplicated split thresholds for each feature from the proposed rows.
fn compute_candidate_thresholds(split_proposals: ArrayView2<f64>) -> Vec<Vec<f64>> {
	split_proposals
		.axis_iter(Axis(1))
		.map(|column| {
			let mut values: Vec<_> = column
				.iter()
				.filter_map(|value| value.to_finite().ok())
				.collect();
			values.sort();
			values.dedup();
			values.into_iter().map(|value| value.get()).collect()
		})
		.collect()
}

struct ChooseBestSplitOutput {
	feature_index: usize,
	split_value: f64,
	gain: f64,
}

fn choose_best_split(
	features: ArrayView2<f64>,
	gradients: &[f64],
	hessians: &[f64],
	candidate_thresholds: &[Vec<f64>],
	examples: &[usize],
	sum_gradients: f64,
	sum_hessians: f64,
	rng: &mut Xoshiro256Plus,
) -> Option<ChooseBestSplitOutput> {
	let feature_bests: Vec<Option<ChooseBestSplitOutput>> = (0..features.ncols())
		.into_par_iter()
		.map(|feature_index| {
			choose_best_split_for_feature(
				features,
				gradients,
				hessians,
				&candidate_thresholds[feature_index],
				examples,
				feature_index,
				sum_gradients,
				sum_hessians,
			)
		})
		.collect();
	// Reduce the per-feature bests sequentially, breaking ties uniformly at random so the choice only depends on the seed.
	let mut best: Option<ChooseBestSplitOutput> = None;
	let mut n_ties = 0;
	for candidate in feature_bests.into_iter().flatten() {
		let replace = match best.as_ref() {
			None => {
				n_ties = 1;
				true
			}
			Some(current) if candidate.gain > current.gain => {
				n_ties = 1;
				true
			}
			Some(current) if candidate.gain == current.gain => {
				n_ties += 1;
				rng.gen_range(0, n_ties) == 0
			}
			Some(_) => false,
		};
		if replace {
			best = Some(candidate);
		}
	}
	best.filter(|split| split.gain > 0.0)
}

fn choose_best_split_for_feature(
	features: ArrayView2<f64>,
	gradients: &[f64],
	hessians: &[f64],
	thresholds: &[f64],
	examples: &[usize],
	feature_index: usize,
	sum_gradients: f64,
	sum_hessians: f64,
) -> Option<ChooseBestSplitOutput> {
	let mut best: Option<ChooseBestSplitOutput> = None;
	for &threshold in thresholds.iter() {
		let mut left_sum_gradients = 0.0;
		let mut left_sum_hessians = 0.0;
		for &example_index in examples.iter() {
			if features[[example_index, feature_index]] <= threshold {
				left_sum_gradients += gradients[example_index];
				left_sum_hessians += hessians[example_index];
			}
		}
		let right_sum_gradients = sum_gradients - left_sum_gradients;
		let right_sum_hessians = sum_hessians - left_sum_hessians;
		let gain = 0.5
			* (left_sum_gradients * left_sum_gradients
				/ (left_sum_hessians + HESSIAN_REGULARIZATION)
				+ right_sum_gradients * right_sum_gradients
					/ (right_sum_hessians + HESSIAN_REGULARIZATION)
				- sum_gradients * sum_gradients / (sum_hessians + HESSIAN_REGULARIZATION));
		let is_better = match best.as_ref() {
			None => true,
			Some(best) => gain > best.gain,
		};
		if is_better {
			best = Some(ChooseBestSplitOutput {
				feature_index,
				split_value: threshold,
				gain,
			});
		}
	}
	best
}

/// `LocalPredictEngine` routes every example down the tree in parallel with rayon and adds the reached leaf values to the running predictions.
pub struct LocalPredictEngine;

impl PredictEngine for LocalPredictEngine {
	fn update_predictions(&self, features: ArrayView2<f64>, tree: &Tree, predictions: &mut [f64]) {
		predictions
			.par_iter_mut()
			.enumerate()
			.for_each(|(example_index, prediction)| {
				*prediction += tree.predict_row(features.row(example_index));
			});
	}
}
