/*!
This crate implements gradient boosted decision trees for regression and binary classification, in the style of [LightGBM](https://github.com/microsoft/lightgbm) and [XGBoost](https://github.com/dmlc/xgboost), written in pure Rust.

Training runs a strictly sequential sequence of boosting rounds. Each round computes the gradient and hessian of the loss at the current predictions, builds one tree to fit them, and adds the tree's predictions to the running total. The numerically heavy work, split search and prediction, is performed by engines behind the [`SplitEngine`](trait.SplitEngine.html) and [`PredictEngine`](trait.PredictEngine.html) traits, so the driver is decoupled from any particular backend. The default engines parallelize across examples with rayon.

For an example of regression, see the test at the bottom of `regressor.rs`. For an example of binary classification, see `binary_classifier.rs`.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod binary_classifier;
mod booster;
mod engine;
mod objective;
mod regressor;
mod train;
mod tree;
mod validate;

pub use binary_classifier::BinaryClassifier;
pub use booster::Booster;
pub use engine::{
	BuildTreeOptions, ExecutionContext, LocalPredictEngine, LocalSplitEngine, PredictEngine,
	SplitEngine,
};
pub use objective::Objective;
pub use regressor::Regressor;
pub use tree::Tree;

use thiserror::Error;

/// These are the options passed to `Regressor::train` and `BinaryClassifier::train`.
#[derive(Clone, Debug)]
pub struct TrainOptions {
	/// This option controls the initial prediction of the model, before any trees are trained.
	pub init: Init,
	/// The learning rate scales the leaf values to control the effect each tree has on the output.
	pub learning_rate: f64,
	/// The depth of a single tree will never exceed this value.
	pub max_depth: usize,
	/// This is the number of rounds of boosting, and therefore the number of trees, to train.
	pub n_estimators: usize,
	/// This seed makes the sampling of candidate split thresholds reproducible.
	pub random_state: u64,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			init: Init::Average,
			learning_rate: 0.1,
			max_depth: 3,
			n_estimators: 100,
			random_state: 0,
		}
	}
}

/// This enum controls the initial prediction of the model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Init {
	/// Initialize the model to the value that minimizes the loss over the training set, which is equivalent to a tree with a single leaf and learning rate 1.0.
	Average,
	/// Initialize the model to zero.
	Zero,
}

/// This struct reports the training progress. The counter tracks the number of completed boosting rounds.
#[derive(Debug)]
pub struct TrainProgress(pub grove_progress::ProgressCounter);

/// An error encountered while validating training or prediction inputs. Validation happens before any computation, and a failed round aborts the entire call. There are no retries and no partially trained models.
#[derive(Debug, Error)]
pub enum Error {
	#[error("found array with 0 example(s), a minimum of 1 is required")]
	EmptyExamples,
	#[error("found array with 0 feature(s), a minimum of 1 is required")]
	EmptyFeatures,
	#[error("input contains NaN or infinity")]
	NotFinite,
	#[error("incorrect label count: {found}, expected: {expected}")]
	LabelCountMismatch { found: usize, expected: usize },
	#[error("incorrect sample weight count: {found}, expected: {expected}")]
	WeightCountMismatch { found: usize, expected: usize },
	#[error("sample weights must be non-negative")]
	NegativeWeight,
	#[error("incorrect feature count: {found}, expected: {expected}")]
	FeatureCountMismatch { found: usize, expected: usize },
}
