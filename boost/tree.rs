use ndarray::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/**
A decision tree stored as three parallel arrays indexed by node id. The root is node 0, and the children of node `i` are nodes `2 * i + 1` and `2 * i + 2`. The arrays are fully allocated for the maximum depth, so a tree trained with `max_depth` `d` always has `2^(d + 1)` entries. Subtrees that were never split are leaves with value 0.

An example is routed to the left child when its value for the branch's feature is less than or equal to the branch's split value, and to the right child otherwise.
*/
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tree {
	/// This is the value to add to the prediction when an example reaches this node as a leaf.
	pub leaf_value: Vec<f64>,
	/// This is the index of the feature used to split this node. Leaves are marked with -1.
	pub feature: Vec<i32>,
	/// This is the threshold to compare the feature value against. It is only meaningful for branch nodes.
	pub split_value: Vec<f64>,
}

impl Tree {
	/// Create a tree of all zero leaves, sized for `max_depth`.
	pub fn new(max_depth: usize) -> Tree {
		let max_nodes = Tree::max_nodes(max_depth);
		Tree {
			leaf_value: vec![0.0; max_nodes],
			feature: vec![-1; max_nodes],
			split_value: vec![0.0; max_nodes],
		}
	}

	/// This is the number of nodes allocated for a tree of depth `max_depth`.
	pub fn max_nodes(max_depth: usize) -> usize {
		1 << (max_depth + 1)
	}

	pub fn is_leaf(&self, node_index: usize) -> bool {
		self.feature[node_index] == -1
	}

	pub fn left_child(node_index: usize) -> usize {
		2 * node_index + 1
	}

	pub fn right_child(node_index: usize) -> usize {
		2 * node_index + 2
	}

	/// Make a prediction for a single example by traversing from the root to a leaf.
	pub fn predict_row(&self, features: ArrayView1<f64>) -> f64 {
		let mut node_index = 0;
		while !self.is_leaf(node_index) {
			let feature_index = self.feature[node_index].to_usize().unwrap();
			node_index = if features[feature_index] <= self.split_value[node_index] {
				Tree::left_child(node_index)
			} else {
				Tree::right_child(node_index)
			};
		}
		self.leaf_value[node_index]
	}
}

impl fmt::Display for Tree {
	/// Write a pre-order dump of the tree, one node per line, indented by depth. Branches are printed as `id:[f<feature><=<split_value>] yes=<left_id> no=<right_id>` and leaves as `id:leaf=<leaf_value>`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn recurse(
			tree: &Tree,
			f: &mut fmt::Formatter<'_>,
			node_index: usize,
			depth: usize,
		) -> fmt::Result {
			for _ in 0..depth {
				write!(f, "\t")?;
			}
			if tree.is_leaf(node_index) {
				writeln!(f, "{}:leaf={}", node_index, tree.leaf_value[node_index])
			} else {
				writeln!(
					f,
					"{}:[f{}<={}] yes={} no={}",
					node_index,
					tree.feature[node_index],
					tree.split_value[node_index],
					Tree::left_child(node_index),
					Tree::right_child(node_index),
				)?;
				recurse(tree, f, Tree::left_child(node_index), depth + 1)?;
				recurse(tree, f, Tree::right_child(node_index), depth + 1)
			}
		}
		recurse(self, f, 0, 0)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn example_tree() -> Tree {
		let mut tree = Tree::new(1);
		tree.feature[0] = 0;
		tree.split_value[0] = 0.5;
		tree.leaf_value[1] = -1.0;
		tree.leaf_value[2] = 2.0;
		tree
	}

	#[test]
	fn test_predict_row() {
		let tree = example_tree();
		let features = arr2(&[[0.0], [0.5], [1.0]]);
		assert_eq!(tree.predict_row(features.row(0)), -1.0);
		assert_eq!(tree.predict_row(features.row(1)), -1.0);
		assert_eq!(tree.predict_row(features.row(2)), 2.0);
	}

	#[test]
	fn test_display() {
		let tree = example_tree();
		assert_eq!(
			tree.to_string(),
			"0:[f0<=0.5] yes=1 no=2\n\t1:leaf=-1\n\t2:leaf=2\n"
		);
	}

	#[test]
	fn test_unused_subtrees_are_zero_leaves() {
		let tree = Tree::new(2);
		assert_eq!(tree.leaf_value.len(), 8);
		let features = arr2(&[[3.0]]);
		assert_eq!(tree.predict_row(features.row(0)), 0.0);
	}
}
