use std::collections::BTreeMap;

use integration_tests::batch;
use serde_json::json;
use skein_core::{
    Constraint, DiscreteRepresentation, Expr, Objective, Problem, ProblemError,
    ScalarizationError, ScalarizationFunction, Variable, add_scalarization, parse,
};
use skein_eval::{Config, discrete, evaluate, evaluate_str};

#[test]
fn scenario_a_infix_arithmetic() {
    let values = evaluate_str("x * 2 - y", &batch(&[("x", vec![3.0]), ("y", vec![1.0])])).unwrap();
    assert_eq!(values, [5.0]);
}

#[test]
fn scenario_b_array_form_and_batch() {
    let expr = parse("x ^ 2 + 1").unwrap();
    assert_eq!(expr.to_json(), json!(["Add", ["Power", "x", 2.0], 1.0]));

    let values = evaluate_str("x ^ 2 + 1", &batch(&[("x", vec![0.0, 1.0, 2.0])])).unwrap();
    assert_eq!(values, [1.0, 2.0, 5.0]);
}

#[test]
fn scenario_c_min_alias_of_a_maximized_objective() {
    let problem = Problem::builder("scenario c")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::new("f_1", "f_1", parse("x").unwrap()).maximized())
        .build()
        .unwrap();

    let evaluation = evaluate(&problem, &batch(&[("x", vec![3.0, -2.0])]), &Config::default()).unwrap();

    assert_eq!(evaluation.table.get("f_1"), Some([3.0, -2.0].as_slice()));
    assert_eq!(evaluation.table.get("f_1_min"), Some([-3.0, 2.0].as_slice()));
}

#[test]
fn scenario_d_nearest_stored_sample() {
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([("x".to_string(), vec![0.0, 10.0])]),
        BTreeMap::from([("f".to_string(), vec![1.0, 100.0])]),
        false,
    )
    .unwrap();
    let problem = Problem::builder("scenario d")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::data_based("f", "f"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let matches = discrete::evaluate(
        &problem,
        &batch(&[("x", vec![9.0])]),
        &discrete::Config::default(),
    )
    .unwrap();

    assert_eq!(matches.indices, [1]);
    assert_eq!(matches.table.get("f"), Some([100.0].as_slice()));
}

#[test]
fn scalarizations_see_oriented_objectives() {
    let problem = Problem::builder("orientation")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::new("f_1", "f_1", parse("x ^ 3 - x").unwrap()).maximized())
        .objective(Objective::new("f_2", "f_2", parse("Exp(x)").unwrap()))
        .build()
        .unwrap();
    let builder = |_: &Problem| -> Result<Expr, ScalarizationError> { Ok(parse("f_1_min").unwrap()) };
    let problem = add_scalarization(&problem, "flip", "s", &builder).unwrap();

    let samples = vec![-1.5, -0.25, 0.0, 0.75, 2.0];
    let evaluation = evaluate(&problem, &batch(&[("x", samples)]), &Config::default()).unwrap();

    let f_1 = evaluation.table.get("f_1").unwrap();
    let s = evaluation.table.get("s").unwrap();
    for (raw, scalarized) in f_1.iter().zip(s) {
        assert_eq!(*scalarized, -raw);
    }
}

#[test]
fn empty_stages_produce_no_columns() {
    let problem = Problem::builder("objectives only")
        .variable(Variable::scalar("x", "x"))
        .variable(Variable::scalar("y", "y"))
        .objective(Objective::new("f", "f", parse("x * y").unwrap()))
        .build()
        .unwrap();

    let evaluation = evaluate(
        &problem,
        &batch(&[("x", vec![2.0]), ("y", vec![4.0])]),
        &Config::default(),
    )
    .unwrap();

    assert!(evaluation.is_clean());
    assert_eq!(
        evaluation.table.symbols().collect::<Vec<_>>(),
        ["x", "y", "f", "f_min"]
    );
    assert_eq!(evaluation.feasible(0.0), Some(vec![true]));
}

#[test]
fn discrete_queries_on_stored_points_are_exact() {
    let x = vec![0.25, 1.0, 1.0, 3.5, 7.125];
    let y = vec![2.0, -1.0, -1.0, 0.5, 4.0];
    let cost = vec![0.1, 0.2, 0.3, 0.4, 0.5];
    let representation = DiscreteRepresentation::new(
        BTreeMap::from([("x".to_string(), x.clone()), ("y".to_string(), y.clone())]),
        BTreeMap::from([("cost".to_string(), cost.clone())]),
        true,
    )
    .unwrap();
    let problem = Problem::builder("stored")
        .variable(Variable::scalar("x", "x"))
        .variable(Variable::scalar("y", "y"))
        .objective(Objective::data_based("cost", "cost"))
        .discrete_representation(representation)
        .build()
        .unwrap();

    let matches = discrete::evaluate(
        &problem,
        &batch(&[("x", x), ("y", y)]),
        &discrete::Config::default(),
    )
    .unwrap();

    // Samples 1 and 2 are duplicates; both resolve to the lower index.
    assert_eq!(matches.indices, [0, 1, 1, 3, 4]);
    assert!(matches.distances.iter().all(|d| *d == 0.0));
    assert_eq!(
        matches.table.get("cost"),
        Some([0.1, 0.2, 0.2, 0.4, 0.5].as_slice())
    );
    assert_eq!(matches.table.get("cost_min"), Some([0.1, 0.2, 0.2, 0.4, 0.5].as_slice()));
}

#[test]
fn symbols_are_unique_across_the_problem() {
    let duplicate = Problem::builder("duplicate")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::new("f", "f", parse("x").unwrap()))
        .constraint(Constraint::new("g", "f", parse("x - 1").unwrap()))
        .build()
        .unwrap_err();
    assert_eq!(
        duplicate,
        ProblemError::DuplicateSymbol {
            symbol: "f".to_string()
        }
    );

    let problem = Problem::builder("unique")
        .variable(Variable::scalar("x", "x"))
        .objective(Objective::new("f", "f", parse("x").unwrap()))
        .scalarization(ScalarizationFunction::new("s", "s", parse("f_min").unwrap()))
        .build()
        .unwrap();
    let builder = |_: &Problem| -> Result<Expr, ScalarizationError> { Ok(parse("2 * f_min").unwrap()) };

    for symbol in ["x", "f", "f_min", "s"] {
        let err = add_scalarization(&problem, "again", symbol, &builder).unwrap_err();
        assert_eq!(
            err,
            ScalarizationError::Problem(ProblemError::DuplicateSymbol {
                symbol: symbol.to_string()
            })
        );
    }
}
