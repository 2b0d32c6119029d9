//! Splitting a clause sequence into statement segments.
//!
//! A query records its clauses in call order with `None` entries marking
//! statement breaks. Each resulting segment renders its clauses grouped by
//! kind in canonical order, so the grouping here decides where `WITH`,
//! `ORDER BY`, `SKIP` and `LIMIT` end up relative to each other.

use tracing::trace;

use crate::clause::Clause;

/// Group `clauses` into segments.
///
/// - A break opens a new segment only if the current one is non-empty.
/// - `ORDER BY`/`SKIP`/`LIMIT` right after a break that followed a `WITH` or
///   another paging clause joins that earlier segment, so it orders or pages
///   the projection. The anchor is any paging clause, not just `ORDER BY`:
///   a folded `WITH` sorts paging last, so a paged projection segment can
///   end in `SKIP` or `LIMIT`.
/// - A `WITH` right after a break that followed paging clauses joins that
///   segment too, and renders ahead of them.
pub fn partition(clauses: &[Option<Clause>]) -> Vec<Vec<&Clause>> {
    let mut segments: Vec<Vec<&Clause>> = vec![Vec::new()];

    for entry in clauses {
        let Some(clause) = entry else {
            if segments.last().is_some_and(|s| !s.is_empty()) {
                segments.push(Vec::new());
            }
            continue;
        };

        let kind = clause.kind();
        let n = segments.len();
        let current_empty = segments[n - 1].is_empty();

        if n >= 2 && current_empty && kind.is_paging() {
            let anchored = segments[n - 2]
                .last()
                .is_some_and(|prev| prev.kind().is_with() || prev.kind().is_paging());
            if anchored {
                trace!(keyword = kind.keyword(), "folding paging clause into previous segment");
                segments[n - 2].push(clause);
                continue;
            }
        }

        if n >= 2 && current_empty && kind.is_with() && segments[n - 2].iter().any(|c| c.kind().is_paging()) {
            trace!(keyword = kind.keyword(), "folding projection into paged segment");
            let previous = &mut segments[n - 2];
            previous.push(clause);
            previous.sort_by_key(|c| c.kind().is_paging());
            continue;
        }

        segments[n - 1].push(clause);
    }

    if segments.last().is_some_and(|s| s.is_empty()) && segments.len() > 1 {
        segments.pop();
    }
    trace!(segments = segments.len(), "partitioned clauses");
    segments
}
