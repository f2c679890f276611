use crate::Error;
use ndarray::prelude::*;

/// Check that the feature matrix has at least one example, at least one feature, and only finite values.
pub fn check_features(features: ArrayView2<f64>) -> Result<(), Error> {
	if features.nrows() == 0 {
		return Err(Error::EmptyExamples);
	}
	if features.ncols() == 0 {
		return Err(Error::EmptyFeatures);
	}
	if features.iter().any(|value| !value.is_finite()) {
		return Err(Error::NotFinite);
	}
	Ok(())
}

/// Check that there is one finite label per example.
pub fn check_labels(labels: ArrayView1<f64>, n_examples: usize) -> Result<(), Error> {
	if labels.len() != n_examples {
		return Err(Error::LabelCountMismatch {
			found: labels.len(),
			expected: n_examples,
		});
	}
	if labels.iter().any(|value| !value.is_finite()) {
		return Err(Error::NotFinite);
	}
	Ok(())
}

/// Check the sample weights, defaulting to 1.0 per example when they are unset.
pub fn check_sample_weight(
	sample_weight: Option<ArrayView1<f64>>,
	n_examples: usize,
) -> Result<Vec<f64>, Error> {
	match sample_weight {
		None => Ok(vec![1.0; n_examples]),
		Some(weights) => {
			if weights.len() != n_examples {
				return Err(Error::WeightCountMismatch {
					found: weights.len(),
					expected: n_examples,
				});
			}
			if weights.iter().any(|weight| !weight.is_finite()) {
				return Err(Error::NotFinite);
			}
			if weights.iter().any(|weight| *weight < 0.0) {
				return Err(Error::NegativeWeight);
			}
			Ok(weights.to_vec())
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_check_features() {
		assert!(check_features(Array2::<f64>::zeros((0, 1)).view()).is_err());
		assert!(check_features(Array2::<f64>::zeros((1, 0)).view()).is_err());
		assert!(check_features(arr2(&[[std::f64::NAN]]).view()).is_err());
		assert!(check_features(arr2(&[[std::f64::INFINITY]]).view()).is_err());
		assert!(check_features(arr2(&[[0.0]]).view()).is_ok());
	}

	#[test]
	fn test_check_labels() {
		assert!(check_labels(arr1(&[0.0, 1.0]).view(), 2).is_ok());
		assert!(check_labels(arr1(&[0.0]).view(), 2).is_err());
		assert!(check_labels(arr1(&[std::f64::NAN, 1.0]).view(), 2).is_err());
	}

	#[test]
	fn test_check_sample_weight() {
		assert_eq!(check_sample_weight(None, 3).unwrap(), vec![1.0, 1.0, 1.0]);
		assert!(check_sample_weight(Some(arr1(&[1.0]).view()), 2).is_err());
		assert!(check_sample_weight(Some(arr1(&[-1.0, 1.0]).view()), 2).is_err());
		assert_eq!(
			check_sample_weight(Some(arr1(&[0.0, 2.0]).view()), 2).unwrap(),
			vec![0.0, 2.0]
		);
	}
}
