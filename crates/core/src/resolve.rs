//! Evaluation order over a problem's fields.
//!
//! Fields are evaluated in five fixed stages:
//!
//! 1. [`Stage::Constants`]: bound directly to their literal values
//! 2. [`Stage::ExtraFunctions`]: see variables and constants
//! 3. [`Stage::Objectives`]: also see extra functions; each objective `f`
//!    additionally binds `f_min`, its value oriented for minimization
//! 4. [`Stage::Constraints`]: also see objectives and their `_min` aliases
//! 5. [`Stage::Scalarizations`]: also see constraints
//!
//! Variables are visible everywhere. Fields of one stage never see each
//! other, so they may be evaluated in any order. A stage with no fields is
//! simply skipped.

use std::{collections::BTreeSet, fmt};

use crate::problem::{FieldRef, Problem, ProblemError};

/// One of the ordered evaluation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Constants,
    ExtraFunctions,
    Objectives,
    Constraints,
    Scalarizations,
}

impl Stage {
    /// All stages in evaluation order.
    pub const ALL: [Stage; 5] = [
        Self::Constants,
        Self::ExtraFunctions,
        Self::Objectives,
        Self::Constraints,
        Self::Scalarizations,
    ];

    /// Returns the fields of `problem` evaluated during this stage.
    #[must_use]
    pub fn fields(self, problem: &Problem) -> Vec<FieldRef<'_>> {
        match self {
            Self::Constants => problem.constants().iter().map(FieldRef::Constant).collect(),
            Self::ExtraFunctions => problem
                .extra_funcs()
                .iter()
                .map(FieldRef::ExtraFunction)
                .collect(),
            Self::Objectives => problem
                .objectives()
                .iter()
                .map(FieldRef::Objective)
                .collect(),
            Self::Constraints => problem
                .constraints()
                .iter()
                .map(FieldRef::Constraint)
                .collect(),
            Self::Scalarizations => problem
                .scalarization_funcs()
                .iter()
                .map(FieldRef::Scalarization)
                .collect(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constants => "constants",
            Self::ExtraFunctions => "extra functions",
            Self::Objectives => "objectives",
            Self::Constraints => "constraints",
            Self::Scalarizations => "scalarizations",
        })
    }
}

/// Returns the symbols an expression evaluated during `stage` may reference.
#[must_use]
pub fn scope(problem: &Problem, stage: Stage) -> BTreeSet<String> {
    let mut visible: BTreeSet<String> = problem
        .variables()
        .iter()
        .map(|v| v.symbol.clone())
        .collect();

    for earlier in Stage::ALL.into_iter().filter(|s| *s < stage) {
        for field in earlier.fields(problem) {
            visible.insert(field.symbol().to_string());
            if let FieldRef::Objective(objective) = field {
                visible.insert(objective.min_symbol());
            }
        }
    }

    visible
}

/// Checks that every expression only references symbols visible at its stage.
///
/// # Errors
///
/// Returns [`ProblemError::UnknownSymbol`] for the first offending reference.
pub(crate) fn check_references(problem: &Problem) -> Result<(), ProblemError> {
    for stage in Stage::ALL {
        let fields = stage.fields(problem);
        if fields.is_empty() {
            continue;
        }

        let visible = scope(problem, stage);
        for field in fields {
            let Some(expr) = field.expr() else { continue };
            if let Some(symbol) = expr.symbols().into_iter().find(|s| !visible.contains(*s)) {
                return Err(ProblemError::UnknownSymbol {
                    symbol: symbol.to_string(),
                    referencing_field: field.symbol().to_string(),
                });
            }
        }
    }
    Ok(())
}
