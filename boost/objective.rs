use grove_metrics::{
	BinaryCrossEntropy, BinaryCrossEntropyInput, MeanSquaredError, MeanSquaredErrorInput,
	StreamingMetric,
};
use itertools::izip;
use num_traits::clamp;
use serde::{Deserialize, Serialize};
use std::ops::Neg;

/**
The objective is the loss function whose gradients the trees are fit to. This is a closed set: each variant provides the per-example gradient and hessian of its loss, the transform that maps raw scores to predictions, and the metric used to track training progress.
*/
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Objective {
	/// Squared error, used for regression. The transform is the identity.
	SquaredError,
	/// Log loss, used for binary classification. The transform is the sigmoid, and labels must be 0.0 or 1.0.
	LogLoss,
}

impl Objective {
	/// Compute the first and second derivatives of the loss for every example. The `predictions` must already be transformed.
	pub fn update_gradients_and_hessians(
		&self,
		gradients: &mut [f64],
		hessians: &mut [f64],
		labels: &[f64],
		predictions: &[f64],
		weights: &[f64],
	) {
		match self {
			Objective::SquaredError => {
				izip!(
					gradients.iter_mut(),
					hessians.iter_mut(),
					labels,
					predictions,
					weights
				)
				.for_each(|(gradient, hessian, label, prediction, weight)| {
					*gradient = weight * (prediction - label);
					*hessian = *weight;
				});
			}
			Objective::LogLoss => {
				izip!(
					gradients.iter_mut(),
					hessians.iter_mut(),
					labels,
					predictions,
					weights
				)
				.for_each(|(gradient, hessian, label, prediction, weight)| {
					let probability =
						clamp(*prediction, std::f64::EPSILON, 1.0 - std::f64::EPSILON);
					*gradient = weight * (probability - label);
					*hessian = weight * probability * (1.0 - probability);
				});
			}
		}
	}

	/// Map a raw score to a prediction.
	pub fn transform(&self, raw: f64) -> f64 {
		match self {
			Objective::SquaredError => raw,
			Objective::LogLoss => 1.0 / (raw.neg().exp() + 1.0),
		}
	}

	/// Compute the weighted training metric over transformed predictions.
	pub fn compute_metric(&self, labels: &[f64], predictions: &[f64], weights: &[f64]) -> f64 {
		match self {
			Objective::SquaredError => {
				let mut metric = MeanSquaredError::default();
				izip!(labels, predictions, weights).for_each(|(label, prediction, weight)| {
					metric.update(MeanSquaredErrorInput {
						prediction: *prediction,
						label: *label,
						weight: *weight,
					});
				});
				metric.finalize().unwrap_or(0.0)
			}
			Objective::LogLoss => {
				let mut metric = BinaryCrossEntropy::default();
				izip!(labels, predictions, weights).for_each(|(label, prediction, weight)| {
					metric.update(BinaryCrossEntropyInput {
						probability: *prediction,
						label: *label,
						weight: *weight,
					});
				});
				metric.finalize().unwrap_or(0.0)
			}
		}
	}

	pub fn metric_name(&self) -> &'static str {
		match self {
			Objective::SquaredError => "mse",
			Objective::LogLoss => "binary_cross_entropy",
		}
	}
}
