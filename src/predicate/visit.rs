//! Predicate walkers
//!
//! Override the `visit_*` methods, calling the corresponding `super_*` method
//! when you wish to recurse. Compiled predicates are never rewritten, so there
//! is no mutable flavor.

use super::Predicate;

/// Read-only walk over a predicate tree
pub trait Visitor<'node> {
    /// Recurse into a predicate node
    fn visit_predicate(&mut self, predicate: &'node Predicate) {
        self.super_predicate(predicate);
    }

    /// Visit a `MatchAll` node
    fn visit_match_all(&mut self) {}

    /// Visit an `IdEquals` node
    fn visit_id_equals(&mut self, _id: &'node i32) {}

    /// Visit a `FileEquals` node
    fn visit_file_equals(&mut self, _name: &'node str) {}

    /// Visit a `VarEquals` node
    fn visit_var_equals(&mut self, _name: &'node str) {}

    /// Visit an `And` node
    fn visit_and(&mut self, children: &'node [Predicate]) {
        self.super_children(children);
    }

    /// Visit an `Or` node
    fn visit_or(&mut self, children: &'node [Predicate]) {
        self.super_children(children);
    }

    /// Visit a `Not` node
    fn visit_not(&mut self, child: &'node Predicate) {
        self.visit_predicate(child);
    }

    /// Recursion implementation for `And` and `Or` nodes
    fn super_children(&mut self, children: &'node [Predicate]) {
        for child in children {
            self.visit_predicate(child);
        }
    }

    /// Core recursion on predicate nodes
    fn super_predicate(&mut self, predicate: &'node Predicate) {
        match predicate {
            Predicate::MatchAll => self.visit_match_all(),
            Predicate::IdEquals(id) => self.visit_id_equals(id),
            Predicate::FileEquals(name) => self.visit_file_equals(name),
            Predicate::VarEquals(name) => self.visit_var_equals(name),
            Predicate::And(children) => self.visit_and(children),
            Predicate::Or(children) => self.visit_or(children),
            Predicate::Not(child) => self.visit_not(child),
        }
    }
}
