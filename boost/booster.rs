use crate::{validate, Error, ExecutionContext, Objective, Tree};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/**
A `Booster` is a fitted gradient boosted model: a bias plus an ordered sequence of trees. The raw prediction for an example is the bias plus the sum of every tree's prediction, applied strictly in construction order. A `Booster` is immutable once training returns it.
*/
#[derive(Debug, Deserialize, Serialize)]
pub struct Booster {
	/// The initial prediction of the model given no trained trees.
	pub bias: f64,
	/// The trees, in construction order.
	pub trees: Vec<Tree>,
	/// The value of the training metric after each round.
	pub train_metrics: Vec<f64>,
	/// The number of features the model was trained with.
	pub n_features: usize,
	/// The objective the model was trained with.
	pub objective: Objective,
}

impl Booster {
	/// Compute the raw, untransformed predictions for every example.
	pub fn predict(
		&self,
		context: &ExecutionContext,
		features: ArrayView2<f64>,
	) -> Result<Array1<f64>, Error> {
		validate::check_features(features)?;
		if features.ncols() != self.n_features {
			return Err(Error::FeatureCountMismatch {
				found: features.ncols(),
				expected: self.n_features,
			});
		}
		let mut predictions = vec![self.bias; features.nrows()];
		for tree in self.trees.iter() {
			context
				.predict_engine
				.update_predictions(features, tree, &mut predictions);
		}
		Ok(Array1::from(predictions))
	}

	/// Produce a human readable dump of the model: an `init=` line with the bias followed by each tree.
	pub fn dump_trees(&self) -> String {
		let mut text = format!("init={}\n", self.bias);
		for tree in self.trees.iter() {
			text.push_str(&tree.to_string());
		}
		text
	}
}
