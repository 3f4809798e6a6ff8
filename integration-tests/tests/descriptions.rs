use std::collections::BTreeMap;

use approx::assert_relative_eq;
use serde::Deserialize;

use integration_tests::{PLANT_JSON, PLANT_TOML, batch};
use skein_core::{Achievement, Problem, WeightedSums, add_scalarization};
use skein_eval::{Config, Table, evaluate};

/// A problem description together with the samples to evaluate it on.
#[derive(Debug, Deserialize)]
struct Study {
    problem: Problem,
    samples: BTreeMap<String, Vec<f64>>,
}

fn plant() -> Problem {
    serde_json::from_str(PLANT_JSON).expect("plant description should load")
}

#[test]
fn json_and_toml_describe_the_same_problem() {
    let from_toml: Problem = toml::from_str(PLANT_TOML).expect("TOML description should load");

    assert_eq!(plant(), from_toml);
    assert_eq!(from_toml.objectives().len(), 2);
    assert!(from_toml.objectives()[0].maximize);
}

#[test]
fn loaded_problems_evaluate_every_stage() {
    let evaluation = evaluate(
        &plant(),
        &batch(&[("q", vec![5.0, 10.0]), ("t", vec![350.0, 400.0])]),
        &Config::default(),
    )
    .unwrap();

    let table = &evaluation.table;
    assert_eq!(
        table.symbols().collect::<Vec<_>>(),
        [
            "q", "t", "p", "metered", "loss", "out", "out_min", "energy", "energy_min", "cap"
        ]
    );

    let column = |symbol| table.get(symbol).unwrap();
    assert_eq!(column("metered"), [1.0, 1.0]);
    assert_relative_eq!(column("loss")[0], 25.0, epsilon = 1e-9);
    assert_relative_eq!(column("out")[0], 17.5, epsilon = 1e-9);
    assert_relative_eq!(column("out_min")[1], -40.0, epsilon = 1e-9);
    assert_relative_eq!(column("energy")[1], 140.0, epsilon = 1e-9);
    assert_eq!(evaluation.feasible(1e-9), Some(vec![true, false]));
}

#[test]
fn studies_embed_problems() {
    let text = format!(r#"{{"problem": {PLANT_JSON}, "samples": {{"q": [1.0], "t": [300.0]}}}}"#);
    let study: Study = serde_json::from_str(&text).unwrap();

    let samples = Table::from_columns(study.samples).unwrap();
    let evaluation = evaluate(&study.problem, &samples, &Config::default()).unwrap();

    assert_eq!(evaluation.table.get("out"), Some([3.0].as_slice()));
    assert_eq!(evaluation.table.get("energy"), Some([4.0].as_slice()));
}

#[test]
fn descriptions_are_validated_on_load() {
    let message = |text: &str| serde_json::from_str::<Problem>(text).unwrap_err().to_string();

    let matrix = message(
        r#"{"name": "m", "variables": [{"name": "a", "symbol": "a", "shape": [2, 2]}],
            "objectives": [{"name": "f", "symbol": "f", "func": "1"}]}"#,
    );
    assert!(matrix.contains("unsupported"), "{matrix}");

    let duplicate = message(
        r#"{"name": "d", "variables": [{"name": "x", "symbol": "x"}],
            "objectives": [{"name": "f", "symbol": "x", "func": "x"}]}"#,
    );
    assert!(duplicate.contains("more than once"), "{duplicate}");

    let syntax = message(
        r#"{"name": "s", "variables": [{"name": "x", "symbol": "x"}],
            "objectives": [{"name": "f", "symbol": "f", "func": "x +"}]}"#,
    );
    assert!(syntax.contains("offset"), "{syntax}");

    let operator = message(
        r#"{"name": "o", "variables": [{"name": "x", "symbol": "x"}],
            "objectives": [{"name": "f", "symbol": "f", "func": ["Frobnicate", "x"]}]}"#,
    );
    assert!(operator.contains("Frobnicate"), "{operator}");
}

#[test]
fn scalarized_descriptions_round_trip() {
    let problem = plant();
    let weighted = add_scalarization(
        &problem,
        "weighted sum",
        "ws",
        &WeightedSums::new([("out", 0.5), ("energy", 0.5)]),
    )
    .unwrap();
    let both = add_scalarization(
        &weighted,
        "achievement",
        "asf",
        &Achievement::new([("out", 30.0), ("energy", 60.0)]).with_rho(0.0),
    )
    .unwrap();

    let text = serde_json::to_string(&both).unwrap();
    let reloaded: Problem = serde_json::from_str(&text).unwrap();
    let symbols: Vec<_> = reloaded
        .scalarization_funcs()
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(symbols, ["ws", "asf"]);
    assert!(problem.scalarization_funcs().is_empty());

    let evaluation = evaluate(
        &reloaded,
        &batch(&[("q", vec![5.0]), ("t", vec![350.0])]),
        &Config::default(),
    )
    .unwrap();

    // ws = 0.5 * -17.5 + 0.5 * 45
    assert_relative_eq!(evaluation.table.get("ws").unwrap()[0], 13.75, epsilon = 1e-9);
    // asf = Max((-17.5 + 30) / 40, (45 - 60) / 140)
    assert_relative_eq!(evaluation.table.get("asf").unwrap()[0], 12.5 / 40.0, epsilon = 1e-9);
}
