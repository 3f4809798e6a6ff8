use std::fmt;

use super::{Expr, Literal, Operator};

// Binding strength when rendering, lowest to highest.
const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;
const PREFIX: u8 = 3;
const POWER: u8 = 4;
const ATOM: u8 = 5;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Literal(Literal::Number(value)) if value.is_sign_negative() => PREFIX,
        Expr::Literal(_) | Expr::Symbol(_) => ATOM,
        Expr::Operation { op, .. } => match op {
            Operator::Add => ADDITIVE,
            Operator::Multiply | Operator::Divide => MULTIPLICATIVE,
            Operator::Negate => PREFIX,
            Operator::Power => POWER,
            _ => ATOM,
        },
    }
}

/// Writes `expr`, wrapping it in parentheses if it binds looser than `min`.
fn write_at(f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "(")?;
        write_expr(f, expr)?;
        write!(f, ")")
    } else {
        write_expr(f, expr)
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Literal(Literal::Number(value)) => write!(f, "{value}"),
        Expr::Literal(Literal::Bool(value)) => write!(f, "{value}"),
        Expr::Symbol(name) => f.write_str(name),
        Expr::Operation { op, args } => match (op, args.as_slice()) {
            (Operator::Add, [first, rest @ ..]) => {
                write_at(f, first, ADDITIVE)?;
                for arg in rest {
                    match arg {
                        Expr::Operation {
                            op: Operator::Negate,
                            args: negated,
                        } if negated.len() == 1 => {
                            write!(f, " - ")?;
                            write_at(f, &negated[0], MULTIPLICATIVE)?;
                        }
                        _ => {
                            write!(f, " + ")?;
                            write_at(f, arg, MULTIPLICATIVE)?;
                        }
                    }
                }
                Ok(())
            }
            (Operator::Multiply, [first, rest @ ..]) => {
                write_at(f, first, MULTIPLICATIVE)?;
                for arg in rest {
                    write!(f, " * ")?;
                    write_at(f, arg, PREFIX)?;
                }
                Ok(())
            }
            (Operator::Divide, [lhs, rhs]) => {
                write_at(f, lhs, MULTIPLICATIVE)?;
                write!(f, " / ")?;
                write_at(f, rhs, PREFIX)
            }
            (Operator::Negate, [operand]) => {
                write!(f, "-")?;
                write_at(f, operand, PREFIX)
            }
            (Operator::Power, [base, exponent]) => {
                write_at(f, base, ATOM)?;
                write!(f, " ^ ")?;
                write_at(f, exponent, PREFIX)
            }
            _ => {
                write!(f, "{}(", op.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_expr(f, arg)?;
                }
                write!(f, ")")
            }
        },
    }
}

/// Renders the tree as infix text that parses back to an equivalent tree.
///
/// Non-finite literals render as `NaN` / `inf` and do not re-parse.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self)
    }
}
