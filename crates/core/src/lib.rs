//! Core types for describing multiobjective optimization problems.
//!
//! This crate defines the pieces that evaluators and solver translations
//! build on:
//!
//! - [`Expr`]: an immutable expression tree over a static [`Operator`]
//!   registry, with an infix [`parse`]r and the JSON array form
//! - [`Problem`]: constants, variables, extra functions, objectives,
//!   constraints, and scalarization functions with problem-wide unique symbols
//! - [`Stage`]: the fixed evaluation order and the symbols visible at each
//!   stage
//! - [`add_scalarization`]: derives a new problem with one more
//!   scalarization function
//! - [`Observer`]: receives evaluation events and optionally returns actions

pub mod expr;
mod observer;
pub mod parse;
pub mod problem;
pub mod resolve;
pub mod scalarize;

pub use expr::{Expr, Literal, MalformedExpression, Operator};
pub use observer::Observer;
pub use parse::{ParseError, parse};
pub use problem::{
    Constant, Constraint, ConstraintKind, DiscreteRepresentation, ExtraFunction, FieldRef,
    Objective, Problem, ProblemBuilder, ProblemError, ScalarizationFunction, Variable,
    VariableKind, min_alias,
};
pub use resolve::Stage;
pub use scalarize::{
    Achievement, ScalarizationBuilder, ScalarizationError, WeightedSums, add_scalarization,
};
