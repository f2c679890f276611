/*!
This crate holds small utilities shared by the grove crates.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod finite;

pub use finite::{Finite, NotFiniteError, ToFinite};
