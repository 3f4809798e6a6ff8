use std::collections::BTreeMap;

use approx::assert_relative_eq;

use skein_core::{DiscreteRepresentation, Objective, Problem, Variable};

use crate::table::{Table, TableError};

use super::{Config, DistanceMetric, Error, evaluate};

fn column(symbol: &str, values: &[f64]) -> (String, Vec<f64>) {
    (symbol.to_string(), values.to_vec())
}

/// Four stored samples over `x` in [0, 100] and `y` in [0, 1]; `cost` is
/// maximized.
fn tabulated() -> Problem {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([
            column("x", &[0.0, 10.0, 10.0, 100.0]),
            column("y", &[0.0, 1.0, 1.0, 0.0]),
        ]),
        BTreeMap::from([
            column("cost", &[1.0, 2.0, 3.0, 4.0]),
            column("time", &[40.0, 30.0, 20.0, 10.0]),
        ]),
        true,
    )
    .unwrap();

    Problem::builder("tabulated")
        .variable(Variable::scalar("x", "x").with_bounds(0.0, 100.0))
        .variable(Variable::scalar("y", "y").with_bounds(0.0, 1.0))
        .objective(Objective::data_based("cost", "cost").maximized())
        .objective(Objective::data_based("time", "time"))
        .discrete_representation(representation)
        .build()
        .unwrap()
}

fn queries(columns: &[(&str, Vec<f64>)]) -> Table {
    Table::from_columns(columns.iter().cloned()).unwrap()
}

#[test]
fn exact_queries_return_stored_values() {
    let matches = evaluate(
        &tabulated(),
        &queries(&[("x", vec![100.0, 0.0]), ("y", vec![0.0, 0.0])]),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(matches.indices, [3, 0]);
    assert_eq!(matches.distances, [0.0, 0.0]);
    assert_eq!(matches.table.get("cost"), Some([4.0, 1.0].as_slice()));
    assert_eq!(matches.table.get("time"), Some([10.0, 40.0].as_slice()));
    assert_eq!(
        matches.table.symbols().collect::<Vec<_>>(),
        ["cost", "time", "cost_min", "time_min"]
    );
    assert_eq!(matches.table.get("cost_min"), Some([-4.0, -1.0].as_slice()));
}

#[test]
fn duplicates_resolve_to_the_lowest_index() {
    let matches = evaluate(
        &tabulated(),
        &queries(&[("x", vec![10.0]), ("y", vec![1.0])]),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(matches.indices, [1]);
    assert_eq!(matches.table.get("cost"), Some([2.0].as_slice()));
}

#[test]
fn distance_uses_shared_variables_only() {
    let matches = evaluate(
        &tabulated(),
        &queries(&[("x", vec![90.0]), ("unrelated", vec![1e9])]),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(matches.indices, [3]);
    assert_relative_eq!(matches.distances[0], 10.0);
}

#[test]
fn normalization_changes_the_winner() {
    // Raw: 12 to sample 0, sqrt(5) to sample 1.
    // Scaled by the bound ranges: 0.12 to sample 0, about 1 to sample 1.
    let query = queries(&[("x", vec![12.0]), ("y", vec![0.0])]);

    let raw = evaluate(&tabulated(), &query, &Config::default()).unwrap();
    assert_eq!(raw.indices, [1]);
    assert_relative_eq!(raw.distances[0], 5.0_f64.sqrt());

    let normalized = evaluate(
        &tabulated(),
        &query,
        &Config::new(DistanceMetric::NormalizedEuclidean),
    )
    .unwrap();
    assert_eq!(normalized.indices, [0]);
    assert_relative_eq!(normalized.distances[0], 0.12);
}

#[test]
fn sample_range_scales_unbounded_variables() {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([column("a", &[0.0, 4.0]), column("b", &[0.0, 0.5])]),
        BTreeMap::from([column("f", &[1.0, 2.0])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("unbounded")
        .variable(Variable::scalar("a", "a"))
        .variable(Variable::scalar("b", "b"))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let matches = evaluate(
        &problem,
        &queries(&[("a", vec![3.0]), ("b", vec![0.0])]),
        &Config::new(DistanceMetric::NormalizedEuclidean),
    )
    .unwrap();

    // a is scaled by 4 and b by 0.5: 0.75 to sample 0, 0.25 plus a full
    // unit on b to sample 1.
    assert_eq!(matches.indices, [0]);
    assert_relative_eq!(matches.distances[0], 0.75);
}

#[test]
fn huge_coordinates_still_rank_by_distance() {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([column("x", &[-1e300, 2e300, -f64::MAX])]),
        BTreeMap::from([column("f", &[1.0, 2.0, 3.0])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("huge")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let matches = evaluate(
        &problem,
        &queries(&[("x", vec![1e300, f64::MAX])]),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(matches.indices, [1, 1]);
    assert_relative_eq!(matches.distances[0], 1e300);
    assert!(matches.distances.iter().all(|d| d.is_finite()));
}

#[test]
fn stored_aliases_are_not_overwritten() {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([column("x", &[0.0])]),
        BTreeMap::from([column("f", &[1.0]), column("f_min", &[5.0])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("aliased")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let err = evaluate(&problem, &queries(&[("x", vec![0.0])]), &Config::default()).unwrap_err();

    assert_eq!(
        err,
        Error::Table(TableError::DuplicateColumn {
            symbol: "f_min".to_string()
        })
    );
}

#[test]
fn missing_and_empty_representations() {
    let plain = Problem::builder("plain")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::new("f", "f", skein_core::parse("x").unwrap()))
        .build()
        .unwrap();
    let query = queries(&[("x", vec![0.0])]);

    assert_eq!(
        evaluate(&plain, &query, &Config::default()).unwrap_err(),
        Error::MissingRepresentation
    );

    let empty = DiscreteRepresentation::new(
        BTreeMap::from([column("x", &[])]),
        BTreeMap::from([column("f", &[])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("empty")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(empty)
        .build()
        .unwrap();

    assert_eq!(
        evaluate(&problem, &query, &Config::default()).unwrap_err(),
        Error::EmptyRepresentation
    );
}

#[test]
fn vector_variables_are_rejected() {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([column("x", &[1.0])]),
        BTreeMap::from([column("f", &[2.0])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("mixed")
        .variable(Variable::scalar("x", "x"))
        .variable(Variable::vector("v", "v", 2))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let err = evaluate(
        &problem,
        &queries(&[("x", vec![1.0]), ("v[1]", vec![0.0])]),
        &Config::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        Error::UnsupportedVariableKind {
            symbol: "v".to_string()
        }
    );
}

#[test]
fn queries_must_overlap_and_be_finite() {
    let err = evaluate(
        &tabulated(),
        &queries(&[("z", vec![1.0])]),
        &Config::default(),
    )
    .unwrap_err();
    assert_eq!(err, Error::NoSharedVariables);

    let err = evaluate(
        &tabulated(),
        &queries(&[("x", vec![1.0, f64::NAN])]),
        &Config::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidQuery {
            symbol: "x".to_string(),
            row: 1
        }
    );
}
