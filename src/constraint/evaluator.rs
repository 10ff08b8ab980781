//! Canonical constraint evaluation
//!
//! Clauses are applied left to right, each one narrowing the pool left by the
//! previous clause. An empty pool stops evaluation with a no-match error.

use crate::constraint::{Clause, Comparator};
use crate::domain::VersionSet;
use crate::error::ConstraintError;

/// Evaluate a canonical constraint against `candidates`
///
/// Returns the matching subset in ascending order. A clause with an unknown
/// shape is [`ConstraintError::MalformedClause`]; an empty result is
/// [`ConstraintError::NoMatch`].
pub fn evaluate(canonical: &str, candidates: &VersionSet) -> Result<VersionSet, ConstraintError> {
    let clauses = canonical
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse::<Clause>)
        .collect::<Result<Vec<_>, _>>()?;

    if clauses.is_empty() {
        return Err(ConstraintError::MalformedClause {
            clause: canonical.to_string(),
        });
    }

    let mut pool = candidates.clone();
    for clause in &clauses {
        pool = apply_clause(clause, &pool);
        tracing::trace!(clause = %clause, remaining = %pool, "applied clause");

        if pool.is_empty() {
            return Err(ConstraintError::NoMatch {
                constraint: canonical.to_string(),
            });
        }
    }

    Ok(pool)
}

fn apply_clause(clause: &Clause, pool: &VersionSet) -> VersionSet {
    match clause.comparator {
        // A set holds no duplicates, so the first equal candidate is the only one.
        Comparator::Equal => pool.iter().copied().find(|v| clause.matches(v)).into_iter().collect(),
        _ => pool.filter(|v| clause.matches(v)),
    }
}
