use neoquery_core::{partition, sym, Arg, Clause, ClauseKind, ClauseOptions, ParameterTable};

struct Builder {
    params: ParameterTable,
    clauses: Vec<Option<Clause>>,
}

impl Builder {
    fn new() -> Self {
        Builder { params: ParameterTable::new(), clauses: Vec::new() }
    }

    fn push(mut self, kind: ClauseKind, arg: impl Into<Arg>) -> Self {
        let built = Clause::from_args(kind, arg.into(), &mut self.params, ClauseOptions::default()).unwrap();
        if kind.starts_statement() {
            self.clauses.push(None);
        }
        self.clauses.extend(built.into_iter().map(Some));
        if kind.starts_statement() {
            self.clauses.push(None);
        }
        self
    }

    fn brk(mut self) -> Self {
        self.clauses.push(None);
        self
    }

    fn kinds(&self) -> Vec<Vec<ClauseKind>> {
        partition(&self.clauses)
            .into_iter()
            .map(|segment| segment.into_iter().map(Clause::kind).collect())
            .collect()
    }
}

use ClauseKind::*;

#[test]
fn test_single_segment() {
    let b = Builder::new().push(Match, "(n)").push(Where, "n.age > 1").push(Return, sym("n"));
    assert_eq!(b.kinds(), vec![vec![Match, Where, Return]]);
}

#[test]
fn test_empty_clause_list() {
    let b = Builder::new();
    assert_eq!(b.kinds(), vec![Vec::<ClauseKind>::new()]);
}

#[test]
fn test_with_opens_segments() {
    let b = Builder::new()
        .push(Match, "(q)")
        .push(With, "count(q) AS count")
        .push(Where, "count > 2");
    assert_eq!(b.kinds(), vec![vec![Match], vec![With], vec![Where]]);
}

#[test]
fn test_consecutive_breaks_collapse() {
    let b = Builder::new().push(Match, "(n)").brk().brk().brk().push(Match, "(m)");
    assert_eq!(b.kinds(), vec![vec![Match], vec![Match]]);
}

#[test]
fn test_leading_break_is_ignored() {
    let b = Builder::new().brk().push(Match, "(n)");
    assert_eq!(b.kinds(), vec![vec![Match]]);
}

#[test]
fn test_trailing_break_is_dropped() {
    let b = Builder::new().push(Match, "(n)").push(With, sym("n"));
    assert_eq!(b.kinds(), vec![vec![Match], vec![With]]);
}

#[test]
fn test_order_after_with_folds_into_with_segment() {
    let b = Builder::new()
        .push(With, sym("a"))
        .push(Order, "a.name DESC")
        .push(Where, "a.name = 'Foo'");
    assert_eq!(b.kinds(), vec![vec![With, Order], vec![Where]]);
}

#[test]
fn test_paging_chain_after_with() {
    let b = Builder::new()
        .push(With, sym("a"))
        .push(Order, "a.name DESC")
        .push(Limit, 2)
        .push(Skip, 1)
        .push(Where, "a.name = 'Foo'");
    assert_eq!(b.kinds(), vec![vec![With, Order, Limit, Skip], vec![Where]]);
}

#[test]
fn test_with_after_paging_joins_and_sorts_first() {
    let b = Builder::new()
        .push(Order, "a.name DESC")
        .push(Limit, 2)
        .push(With, sym("a"))
        .push(Where, "a.name = 'Foo'");
    assert_eq!(b.kinds(), vec![vec![With, Order, Limit], vec![Where]]);
}

#[test]
fn test_paging_after_plain_clause_stays_put() {
    let b = Builder::new()
        .push(With, "1 AS a")
        .push(Where, "a = 1")
        .push(Limit, 2);
    assert_eq!(b.kinds(), vec![vec![With], vec![Where, Limit]]);
}

#[test]
fn test_with_after_non_paging_segment_opens_new_segment() {
    let b = Builder::new()
        .push(Match, "(q)")
        .push(With, "count(q) AS count")
        .push(Where, "count > 2")
        .push(With, "count + 5 AS new_count");
    assert_eq!(b.kinds(), vec![vec![Match], vec![With], vec![Where], vec![With]]);
}

#[test]
fn test_paging_after_break_without_anchor() {
    let b = Builder::new().push(Match, "(n)").brk().push(Limit, 3);
    assert_eq!(b.kinds(), vec![vec![Match], vec![Limit]]);
}

#[test]
fn test_order_after_limit_folds_into_paged_segment() {
    let b = Builder::new()
        .push(Match, "(n)")
        .push(Return, sym("n"))
        .push(Limit, 3)
        .brk()
        .push(Order, "n.x");
    assert_eq!(b.kinds(), vec![vec![Match, Return, Limit, Order]]);
}
