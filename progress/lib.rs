#![allow(clippy::tabs_in_doc_comments)]

use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

/**
A `ProgressCounter` tracks the progress of a long running task, such as the rounds of boosting when training a model. It wraps an atomic counter so it can be incremented from the training loop while being read from another thread, for example to render a progress bar.

```
use grove_progress::ProgressCounter;

let progress_counter = ProgressCounter::new(100);
progress_counter.inc(1);
assert_eq!(progress_counter.get(), 1);
```
*/
#[derive(Clone, Debug)]
pub struct ProgressCounter {
	current: Arc<AtomicU64>,
	total: u64,
}

impl ProgressCounter {
	pub fn new(total: u64) -> Self {
		Self {
			current: Arc::new(AtomicU64::new(0)),
			total,
		}
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn get(&self) -> u64 {
		self.current.load(Ordering::Relaxed)
	}

	pub fn set(&self, value: u64) {
		self.current.store(value, Ordering::Relaxed);
	}

	pub fn inc(&self, amount: u64) {
		self.current.fetch_add(amount, Ordering::Relaxed);
	}
}
