use num_traits::Float;
use std::cmp::{Ord, Ordering};
use thiserror::Error;

/// A `Finite<T>` is a floating point value that is known not to be NaN or infinite, which makes it possible to implement `Eq` and `Ord`. Split thresholds are collected through this type so they can be sorted and deduplicated.
#[derive(Clone, Copy, Debug)]
pub struct Finite<T>(T)
where
	T: Float;

#[derive(Debug, Error)]
#[error("not finite")]
pub struct NotFiniteError;

impl<T> Finite<T>
where
	T: Float,
{
	pub fn new(value: T) -> Result<Self, NotFiniteError> {
		if value.is_finite() {
			Ok(Self(value))
		} else {
			Err(NotFiniteError)
		}
	}

	pub fn get(self) -> T {
		self.0
	}
}

impl<T> std::ops::Deref for Finite<T>
where
	T: Float,
{
	type Target = T;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T> std::fmt::Display for Finite<T>
where
	T: Float + std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl<T> PartialEq for Finite<T>
where
	T: Float,
{
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<T> Eq for Finite<T> where T: Float {}

impl<T> PartialOrd for Finite<T>
where
	T: Float,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.0.partial_cmp(&other.0)
	}
}

impl<T> Ord for Finite<T>
where
	T: Float,
{
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.partial_cmp(&other.0).unwrap()
	}
}

pub trait ToFinite<T>
where
	T: Float,
{
	/// If the value is finite, return `Ok(Finite(self))`, otherwise return `Err(NotFiniteError)`.
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError>;
}

impl<T> ToFinite<T> for T
where
	T: Float,
{
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError> {
		Finite::new(self)
	}
}

#[test]
fn test() {
	let mut values: Vec<Finite<f64>> = vec![3.0, 1.0, 2.0, 1.0]
		.into_iter()
		.map(|value| value.to_finite().unwrap())
		.collect();
	values.sort();
	values.dedup();
	let values: Vec<f64> = values.into_iter().map(|value| value.get()).collect();
	assert_eq!(values, vec![1.0, 2.0, 3.0]);
	assert!(std::f64::NAN.to_finite().is_err());
	assert!(std::f64::INFINITY.to_finite().is_err());
}
