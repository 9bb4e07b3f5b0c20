//! Filters deciding which entries reach the rewrite step
//!
//! All filters implement the [`Filter`] trait so the walker can apply them
//! uniformly and log a skip reason for every rejected entry.

pub mod directory;

pub use directory::{AdmissionFilter, IgnoreMatcher, IgnoreRuleSet, TextClassifier};

/// Common trait for all filters
///
/// Filters are infallible: anything that goes wrong while deciding turns
/// into a [`FilterDecision::Skip`], so one entry can never abort the walk.
pub trait Filter {
    /// Input type for the filter
    type Input: ?Sized;
    /// Output type for the filter
    type Output;

    /// Apply the filter to the input
    fn filter(&self, input: &Self::Input) -> Self::Output;
}

/// Decision for whether to process or skip a file/directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Continue processing this item
    Process,
    /// Skip this item with a reason
    Skip(&'static str),
}
