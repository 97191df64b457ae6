//! Various proptest generators

use super::Predicate;
use proptest::prelude::*;

pub fn alphanum_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.]*"
}

/// Leaves the extended grammar can express
pub fn arb_clause() -> impl Strategy<Value = Predicate> {
    prop_oneof![
        any::<i32>().prop_map(Predicate::IdEquals),
        alphanum_string().prop_map(Predicate::FileEquals),
        alphanum_string().prop_map(Predicate::VarEquals),
    ]
}

/// Predicates shaped the way the parser builds them: `And`/`Or` always have at
/// least two children and `MatchAll` only ever appears on its own
pub fn arb_predicate(tree_breadth: u32) -> impl Strategy<Value = Predicate> {
    let tree = arb_clause().prop_recursive(4, 32, tree_breadth, move |inner| {
        let breadth = tree_breadth.max(2) as usize;
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..breadth + 1).prop_map(Predicate::And),
            prop::collection::vec(inner.clone(), 2..breadth + 1).prop_map(Predicate::Or),
            inner.prop_map(|child| Predicate::Not(Box::new(child))),
        ]
    });
    prop_oneof![
        1 => Just(Predicate::MatchAll),
        9 => tree,
    ]
}
