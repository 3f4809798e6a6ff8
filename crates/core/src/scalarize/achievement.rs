use std::collections::BTreeMap;

use crate::{
    Expr, Operator,
    problem::{Objective, Problem},
};

use super::{ScalarizationBuilder, ScalarizationError, sum};

/// The augmented achievement scalarizing function for a reference point.
///
/// ```text
/// Max(wᵢ·(fᵢ_min − zᵢ_min)) + ρ·Σ wᵢ·fᵢ_min
/// ```
///
/// The reference point is given in each objective's own orientation and
/// flipped for maximized objectives. The weight `wᵢ` is `1 / |nadir − ideal|`
/// when both are known and differ, otherwise 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    reference_point: BTreeMap<String, f64>,
    rho: f64,
}

impl Achievement {
    /// Default augmentation coefficient.
    pub const DEFAULT_RHO: f64 = 1e-6;

    pub fn new<I, S>(reference_point: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            reference_point: reference_point
                .into_iter()
                .map(|(s, z)| (s.into(), z))
                .collect(),
            rho: Self::DEFAULT_RHO,
        }
    }

    /// Sets the augmentation coefficient; zero drops the augmentation term.
    #[must_use]
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }
}

fn weight(objective: &Objective) -> f64 {
    match (objective.ideal, objective.nadir) {
        (Some(ideal), Some(nadir)) if (nadir - ideal).abs() > 0.0 => 1.0 / (nadir - ideal).abs(),
        _ => 1.0,
    }
}

impl ScalarizationBuilder for Achievement {
    fn build(&self, problem: &Problem) -> Result<Expr, ScalarizationError> {
        let mut deviations = Vec::with_capacity(problem.objectives().len());
        let mut augmentation = Vec::with_capacity(problem.objectives().len());

        for objective in problem.objectives() {
            let reference = self.reference_point.get(&objective.symbol).ok_or_else(|| {
                ScalarizationError::MissingParameter {
                    objective: objective.symbol.clone(),
                    parameter: "reference point value",
                }
            })?;
            let w = Expr::number(weight(objective));
            let f_min = Expr::symbol(objective.min_symbol());

            deviations.push(Expr::multiply(
                w.clone(),
                Expr::add(f_min.clone(), Expr::number(-objective.to_min(*reference))),
            ));
            augmentation.push(Expr::multiply(w, f_min));
        }

        let max = Expr::Operation {
            op: Operator::Max,
            args: deviations,
        };
        if self.rho == 0.0 {
            return Ok(max);
        }

        Ok(Expr::add(
            max,
            Expr::multiply(Expr::number(self.rho), sum(augmentation)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        parse,
        problem::{Objective, Variable},
    };

    fn problem() -> Problem {
        Problem::builder("asf")
            .variable(Variable::scalar("x", "x"))
            .objective(
                Objective::new("f_1", "f_1", parse("x").unwrap())
                    .maximized()
                    .with_ideal(10.0)
                    .with_nadir(0.0),
            )
            .objective(Objective::new("f_2", "f_2", parse("x ^ 2").unwrap()))
            .build()
            .unwrap()
    }

    #[test]
    fn plain_max_without_augmentation() {
        let builder = Achievement::new([("f_1", 4.0), ("f_2", 2.0)]).with_rho(0.0);

        let expr = builder.build(&problem()).unwrap();

        assert_eq!(
            expr,
            parse("Max(0.1 * (f_1_min + 4), 1 * (f_2_min + -2))").unwrap()
        );
    }

    #[test]
    fn augmented_form() {
        let builder = Achievement::new([("f_1", 4.0), ("f_2", 2.0)]).with_rho(0.5);

        let expr = builder.build(&problem()).unwrap();

        assert_eq!(
            expr,
            parse("Max(0.1 * (f_1_min + 4), 1 * (f_2_min + -2)) + 0.5 * (0.1 * f_1_min + 1 * f_2_min)")
                .unwrap()
        );
    }

    #[test]
    fn weights_follow_the_objective_range() {
        let problem = problem();

        assert_relative_eq!(weight(&problem.objectives()[0]), 0.1);
        assert_relative_eq!(weight(&problem.objectives()[1]), 1.0);
    }

    #[test]
    fn needs_every_reference_value() {
        let err = Achievement::new([("f_1", 4.0)])
            .build(&problem())
            .unwrap_err();
        assert!(matches!(
            err,
            ScalarizationError::MissingParameter { objective, .. } if objective == "f_2"
        ));
    }
}
