//! Property tests for the infix and array forms of expressions.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use skein_core::{Expr, Operator, parse};
use skein_eval::{Binding, Column, FailurePolicy, SymbolEnvironment, evaluate_expr};

const LITERALS: [f64; 8] = [0.0, 1.0, 2.0, 0.5, 3.25, 10.0, 1e-3, 7.0];
const UNARY: [Operator; 9] = [
    Operator::Abs,
    Operator::Sqrt,
    Operator::Square,
    Operator::Exp,
    Operator::Ln,
    Operator::Sin,
    Operator::Cos,
    Operator::Tan,
    Operator::Arctan,
];

/// A random finite expression over `x` and `y`.
#[derive(Debug, Clone)]
struct RandomExpr(Expr);

impl Arbitrary for RandomExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(4);
        Self(random_expr(g, depth))
    }
}

fn pick<T: Copy>(g: &mut Gen, items: &[T]) -> T {
    *g.choose(items).expect("choices are never empty")
}

fn random_expr(g: &mut Gen, depth: usize) -> Expr {
    if depth == 0 || u8::arbitrary(g) % 4 == 0 {
        return match u8::arbitrary(g) % 5 {
            0 | 1 => Expr::symbol(pick(g, &["x", "y"])),
            2 => Expr::number(-pick(g, &LITERALS)),
            _ => Expr::number(pick(g, &LITERALS)),
        };
    }

    let d = depth - 1;
    match u8::arbitrary(g) % 9 {
        0 => Expr::Operation {
            op: Operator::Add,
            args: vec![random_expr(g, d), random_expr(g, d), random_expr(g, d)],
        },
        1 => Expr::add(random_expr(g, d), Expr::negate(random_expr(g, d))),
        2 => Expr::multiply(random_expr(g, d), random_expr(g, d)),
        3 => Expr::divide(random_expr(g, d), random_expr(g, d)),
        4 => Expr::power(random_expr(g, d), random_expr(g, d)),
        5 => Expr::negate(random_expr(g, d)),
        6 => Expr::Operation {
            op: pick(g, &[Operator::Max, Operator::Min, Operator::Sum]),
            args: vec![random_expr(g, d), random_expr(g, d)],
        },
        _ => Expr::Operation {
            op: pick(g, &UNARY),
            args: vec![random_expr(g, d)],
        },
    }
}

fn environment() -> SymbolEnvironment {
    let samples = |values: &[f64]| Binding::Scalar(Column::Samples(values.to_vec()));
    SymbolEnvironment::new(6)
        .with("x", samples(&[-2.0, -0.5, 0.0, 0.5, 1.0, 3.0]))
        .with("y", samples(&[1.0, 0.0, -1.5, 2.0, 0.25, -3.0]))
}

/// Bitwise equality, treating every `NaN` as equal.
fn same(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(a, b)| a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()))
}

#[test]
fn infix_round_trip_preserves_values() {
    fn prop(expr: RandomExpr) -> TestResult {
        let text = expr.0.to_string();
        let reparsed = match parse(&text) {
            Ok(reparsed) => reparsed,
            Err(error) => return TestResult::error(format!("`{text}` did not parse: {error}")),
        };

        let env = environment();
        let original = evaluate_expr(&expr.0, &env, FailurePolicy::PerRow);
        let round_trip = evaluate_expr(&reparsed, &env, FailurePolicy::PerRow);

        match (original, round_trip) {
            (Ok((a, _)), Ok((b, _))) => TestResult::from_bool(same(&a, &b)),
            (a, b) => TestResult::error(format!("`{text}`: {a:?} vs {b:?}")),
        }
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(RandomExpr) -> TestResult);
}

#[test]
fn array_form_round_trip_is_exact() {
    fn prop(expr: RandomExpr) -> bool {
        Expr::from_json(&expr.0.to_json()).as_ref() == Ok(&expr.0)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(RandomExpr) -> bool);
}

#[test]
fn rendering_reaches_a_fixed_point() {
    // Reparsing may fold negated literals and flatten sums once; the text
    // rendered from the reparsed tree must then be stable.
    fn prop(expr: RandomExpr) -> bool {
        let Ok(reparsed) = parse(&expr.0.to_string()) else {
            return false;
        };
        let text = reparsed.to_string();
        parse(&text).is_ok_and(|again| again.to_string() == text)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(RandomExpr) -> bool);
}
