//! This module contains the compiled form of a pattern. A
//! [`Predicate`](enum.Predicate.html) is built once by the pattern compiler and
//! then only ever read: evaluating it against a [`Query`](struct.Query.html)
//! is a plain tree walk.

use std::fmt;

pub mod visit;

use self::visit::Visitor;

#[cfg(test)]
pub mod proptest;

/// The question being asked of a selector: should this decomposition, used by
/// this variable in this file, be saved?
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Query<'a> {
    /// The decomposition id
    pub id: i32,
    /// The name of the file being written
    pub file_name: &'a str,
    /// The name of the variable using the decomposition
    pub var_name: &'a str,
}

impl<'a> Query<'a> {
    /// Create a new query
    #[inline]
    pub fn new(id: i32, file_name: &'a str, var_name: &'a str) -> Self {
        Query {
            id,
            file_name,
            var_name,
        }
    }
}

/// Represents the different kinds of predicate nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Matches everything. Written `*`
    MatchAll,
    /// Matches a single decomposition id. Written `ID="<integer>"`
    IdEquals(i32),
    /// Matches a file name exactly. Written `FILE="<name>"`
    FileEquals(String),
    /// Matches a variable name exactly. Written `VAR="<name>"`
    VarEquals(String),
    /// Matches when every child matches
    And(Vec<Predicate>),
    /// Matches when any child matches
    Or(Vec<Predicate>),
    /// Inverts its child
    Not(Box<Predicate>),
}

impl Predicate {
    /// Does `query` satisfy this predicate?
    pub fn evaluate(&self, query: &Query<'_>) -> bool {
        match self {
            Predicate::MatchAll => true,
            Predicate::IdEquals(id) => query.id == *id,
            Predicate::FileEquals(name) => query.file_name == name.as_str(),
            Predicate::VarEquals(name) => query.var_name == name.as_str(),
            Predicate::And(children) => children.iter().all(|child| child.evaluate(query)),
            Predicate::Or(children) => children.iter().any(|child| child.evaluate(query)),
            Predicate::Not(child) => !child.evaluate(query),
        }
    }

    /// Which parts of a query this predicate actually looks at
    pub fn fields(&self) -> Fields {
        let mut collector = FieldCollector::default();
        collector.visit_predicate(self);
        collector.fields
    }

    /// True for the nodes that combine other predicates
    #[inline]
    fn is_compound(&self) -> bool {
        match self {
            Predicate::And(_) | Predicate::Or(_) => true,
            _ => false,
        }
    }
}

/// Create a conjunction. If there is only a single predicate in the vector, we
/// just return that predicate, which keeps trees produced by the parser flat.
#[inline]
pub fn conjunction(mut v: Vec<Predicate>) -> Predicate {
    if v.len() == 1 {
        v.swap_remove(0)
    } else {
        Predicate::And(v)
    }
}

/// Create a disjunction, collapsing single element vectors like
/// [`conjunction`](fn.conjunction.html)
#[inline]
pub fn disjunction(mut v: Vec<Predicate>) -> Predicate {
    if v.len() == 1 {
        v.swap_remove(0)
    } else {
        Predicate::Or(v)
    }
}

/// Create a negation
#[inline]
pub fn negation(p: Predicate) -> Predicate {
    Predicate::Not(Box::new(p))
}

/// The query fields a predicate depends on
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    /// The decomposition id is inspected
    pub id: bool,
    /// The file name is inspected
    pub file_name: bool,
    /// The variable name is inspected
    pub var_name: bool,
}

#[derive(Default)]
struct FieldCollector {
    fields: Fields,
}

impl<'node> Visitor<'node> for FieldCollector {
    fn visit_id_equals(&mut self, _id: &'node i32) {
        self.fields.id = true;
    }

    fn visit_file_equals(&mut self, _name: &'node str) {
        self.fields.file_name = true;
    }

    fn visit_var_equals(&mut self, _name: &'node str) {
        self.fields.var_name = true;
    }
}

/// Writes a predicate back out as pattern text
struct Renderer<'f, 'b> {
    f: &'f mut fmt::Formatter<'b>,
    result: fmt::Result,
}

impl<'f, 'b> Renderer<'f, 'b> {
    fn write(&mut self, args: fmt::Arguments<'_>) {
        if self.result.is_ok() {
            self.result = self.f.write_fmt(args);
        }
    }

    /// Compound operands get parenthesized so the text parses back to the
    /// same shape
    fn operand(&mut self, p: &Predicate) {
        if p.is_compound() {
            self.write(format_args!("("));
            self.visit_predicate(p);
            self.write(format_args!(")"));
        } else {
            self.visit_predicate(p);
        }
    }

    fn joined(&mut self, children: &[Predicate], separator: &str) {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.write(format_args!("{}", separator));
            }
            self.operand(child);
        }
    }
}

impl<'f, 'b, 'node> Visitor<'node> for Renderer<'f, 'b> {
    fn visit_match_all(&mut self) {
        self.write(format_args!("*"));
    }

    fn visit_id_equals(&mut self, id: &'node i32) {
        self.write(format_args!("ID=\"{}\"", id));
    }

    fn visit_file_equals(&mut self, name: &'node str) {
        self.write(format_args!("FILE=\"{}\"", name));
    }

    fn visit_var_equals(&mut self, name: &'node str) {
        self.write(format_args!("VAR=\"{}\"", name));
    }

    fn visit_and(&mut self, children: &'node [Predicate]) {
        self.joined(children, " && ");
    }

    fn visit_or(&mut self, children: &'node [Predicate]) {
        self.joined(children, " || ");
    }

    fn visit_not(&mut self, child: &'node Predicate) {
        self.write(format_args!("!"));
        self.operand(child);
    }
}

/// Renders the predicate as extended grammar pattern text. A predicate produced
/// by the pattern compiler renders to text that compiles back to an equal
/// predicate. Hand-built predicates with an empty `And` or `Or`, a `"` inside a
/// name, or more nesting than the compiler accepts render to text that does
/// not compile.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer { f, result: Ok(()) };
        renderer.visit_predicate(self);
        renderer.result
    }
}
