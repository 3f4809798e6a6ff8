//! Numeric evaluation of skein problems.
//!
//! - [`vectorized`] evaluates every field of a problem over a batch of
//!   samples, stage by stage, with configurable failure handling
//! - [`discrete`] answers queries against a problem's stored samples by
//!   nearest match
//!
//! Both take and return [`Table`]s of named columns.

pub mod discrete;
pub mod env;
pub mod table;
pub mod vectorized;

pub use env::{Binding, Column, SymbolEnvironment};
pub use table::{Table, TableError, component_label};
pub use vectorized::{
    Config, Evaluation, EvaluationError, FailurePolicy, evaluate, evaluate_expr,
    evaluate_observed, evaluate_str,
};
