//! Shared fixtures for the end-to-end tests.

use skein_eval::Table;

/// A two-objective problem in the JSON description format, mixing infix
/// text and the array form.
pub const PLANT_JSON: &str = r#"{
    "name": "plant",
    "description": "Throughput against energy use of a small process plant.",
    "constants": [
        {"name": "price", "symbol": "p", "value": 4},
        {"name": "metered", "symbol": "metered", "value": true}
    ],
    "variables": [
        {"name": "feed", "symbol": "q", "lowerbound": 0, "upperbound": 10},
        {"name": "temperature", "symbol": "t", "lowerbound": 300, "upperbound": 400}
    ],
    "extra_funcs": [
        {"name": "losses", "symbol": "loss", "func": "0.01 * (t - 300) ^ 2"}
    ],
    "objectives": [
        {"name": "throughput", "symbol": "out", "func": ["Multiply", "q", ["Divide", "t", 100]], "maximize": true, "ideal": 40, "nadir": 0},
        {"name": "energy", "symbol": "energy", "func": "p * q + loss", "ideal": 0, "nadir": 140}
    ],
    "constraints": [
        {"name": "capacity", "symbol": "cap", "func": "out - 30"}
    ]
}"#;

/// The same problem in TOML.
pub const PLANT_TOML: &str = r#"
name = "plant"
description = "Throughput against energy use of a small process plant."

[[constants]]
name = "price"
symbol = "p"
value = 4

[[constants]]
name = "metered"
symbol = "metered"
value = true

[[variables]]
name = "feed"
symbol = "q"
lowerbound = 0.0
upperbound = 10.0

[[variables]]
name = "temperature"
symbol = "t"
lowerbound = 300.0
upperbound = 400.0

[[extra_funcs]]
name = "losses"
symbol = "loss"
func = "0.01 * (t - 300) ^ 2"

[[objectives]]
name = "throughput"
symbol = "out"
func = ["Multiply", "q", ["Divide", "t", 100]]
maximize = true
ideal = 40.0
nadir = 0.0

[[objectives]]
name = "energy"
symbol = "energy"
func = "p * q + loss"
ideal = 0.0
nadir = 140.0

[[constraints]]
name = "capacity"
symbol = "cap"
func = "out - 30"
"#;

/// Builds a batch from `(symbol, values)` pairs of equal length.
///
/// # Panics
///
/// Panics if the columns differ in length.
#[must_use]
pub fn batch(columns: &[(&str, Vec<f64>)]) -> Table {
    Table::from_columns(columns.iter().cloned()).expect("fixture columns share a length")
}
