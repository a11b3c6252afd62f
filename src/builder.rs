// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

//! Boundary between the parser and the program builder.
//!
//! The engine never materializes syntax itself: every reduction handler calls factory methods
//! on a [Builder] and stores the returned handles in the semantic value stack. Handles are
//! opaque to the engine and only valid with the builder instance that issued them.

use std::fmt::{Display, Formatter};
use thiserror::Error;
use crate::location::Location;

// ---------------------------------------------------------------------------------------------
// Handles

macro_rules! uid_types {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub struct $name(pub u32);
        )+
    }
}

uid_types! {
    /// A term (constant, variable, function, pool, ...)
    TermUid,
    /// A vector of terms
    TermVecUid,
    /// A vector of term vectors (predicate argument pools)
    TermVecVecUid,
    /// A vector of identifiers (program block parameters)
    IdVecUid,
    /// A literal
    LitUid,
    /// A vector of literals (conditions)
    LitVecUid,
    /// A vector of conditional literals
    CondLitVecUid,
    /// A vector of body aggregate elements
    BdAggrElemVecUid,
    /// A vector of head aggregate elements
    HdAggrElemVecUid,
    /// A vector of aggregate bounds
    BoundVecUid,
    /// A rule body under construction
    BodyUid,
    /// A completed rule head
    HeadUid,
    /// A CSP product term
    CspMulTermUid,
    /// A CSP sum term
    CspAddTermUid,
    /// A CSP comparison literal
    CspLitUid,
    /// A vector of CSP elements (disjoint constraint)
    CspElemVecUid,
    /// A vector of theory operator names
    TheoryOpVecUid,
    /// A theory term
    TheoryTermUid,
    /// A theory term with attached operators
    TheoryOpTermUid,
    /// A vector of theory operator terms
    TheoryOpTermVecUid,
    /// A vector of theory atom elements
    TheoryElemVecUid,
    /// A theory atom
    TheoryAtomUid,
    /// A theory operator definition
    TheoryOpDefUid,
    /// A vector of theory operator definitions
    TheoryOpDefVecUid,
    /// A theory term definition
    TheoryTermDefUid,
    /// A theory atom definition
    TheoryAtomDefUid,
    /// A vector of theory definitions
    TheoryDefVecUid,
}

// ---------------------------------------------------------------------------------------------
// Grammar-level enums

/// Value of a constant term.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Constant {
    Infimum,
    Supremum,
    Number(i32),
    String(String),
    /// Symbolic constant (lowercase identifier)
    Symbol(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnOp { Neg, Not, Abs }

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp { Xor, Or, And, Add, Sub, Mul, Div, Mod, Pow }

/// Comparison relation. An aggregate bound written without an explicit relation defaults
/// to [`Relation::Leq`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Relation { Gt, Lt, Leq, Geq, Neq, Eq }

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Relation::Gt => ">",
            Relation::Lt => "<",
            Relation::Leq => "<=",
            Relation::Geq => ">=",
            Relation::Neq => "!=",
            Relation::Eq => "=",
        })
    }
}

/// Negation-as-failure sign of a literal or aggregate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Naf { Pos, Not, NotNot }

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AggregateFunction { Count, Sum, SumPlus, Min, Max }

impl Display for AggregateFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            AggregateFunction::Count => "#count",
            AggregateFunction::Sum => "#sum",
            AggregateFunction::SumPlus => "#sum+",
            AggregateFunction::Min => "#min",
            AggregateFunction::Max => "#max",
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TheoryOperatorType { Unary, BinaryLeft, BinaryRight }

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TheoryAtomType { Head, Body, Any, Directive }

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScriptLang { Python, Lua }

// ---------------------------------------------------------------------------------------------

/// A builder call rejected its arguments (e.g. malformed definition). This is never recovered:
/// the parser drains its stack and aborts the whole parse.
#[derive(Clone, PartialEq, Debug, Error)]
#[error("{location}: {message}")]
pub struct BuilderError {
    pub location: Location,
    pub message: String,
}

impl BuilderError {
    pub fn new<T: Into<String>>(location: Location, message: T) -> Self {
        BuilderError { location, message: message.into() }
    }
}

pub type BuildResult<T> = Result<T, BuilderError>;

// ---------------------------------------------------------------------------------------------

/// Factory surface invoked by the reduction handlers, one method per grammar construct.
///
/// Vector methods take and return the vector handle so insertions chain naturally in
/// handlers. Statement and directive methods return no handle; the construct is complete.
pub trait Builder {
    // terms ------------------------------------------------------------------------------

    fn term_const(&mut self, loc: Location, value: Constant) -> BuildResult<TermUid>;
    fn term_variable(&mut self, loc: Location, name: String) -> BuildResult<TermUid>;
    fn term_unary(&mut self, loc: Location, op: UnOp, arg: TermUid) -> BuildResult<TermUid>;
    fn term_binary(&mut self, loc: Location, op: BinOp, left: TermUid, right: TermUid) -> BuildResult<TermUid>;
    /// Tuple or parenthesized term; `force_tuple` keeps one-element tuples distinct from
    /// plain parentheses.
    fn term_tuple(&mut self, loc: Location, args: TermVecUid, force_tuple: bool) -> BuildResult<TermUid>;
    fn term_function(&mut self, loc: Location, name: String, args: TermVecVecUid) -> BuildResult<TermUid>;
    /// Function evaluated by an embedded script at grounding time.
    fn term_external_function(&mut self, loc: Location, name: String, args: TermVecVecUid) -> BuildResult<TermUid>;
    fn term_pool(&mut self, loc: Location, args: TermVecVecUid) -> BuildResult<TermUid>;

    fn termvec_new(&mut self) -> BuildResult<TermVecUid>;
    fn termvec_insert(&mut self, vec: TermVecUid, term: TermUid) -> BuildResult<TermVecUid>;
    fn termvecvec_new(&mut self) -> BuildResult<TermVecVecUid>;
    fn termvecvec_insert(&mut self, vec: TermVecVecUid, terms: TermVecUid) -> BuildResult<TermVecVecUid>;
    fn idvec_new(&mut self) -> BuildResult<IdVecUid>;
    fn idvec_insert(&mut self, vec: IdVecUid, loc: Location, id: String) -> BuildResult<IdVecUid>;

    // literals ---------------------------------------------------------------------------

    fn lit_boolean(&mut self, loc: Location, value: bool) -> BuildResult<LitUid>;
    /// Predicate literal; `negated` is classical negation, `naf` is default negation.
    fn lit_predicate(&mut self, loc: Location, naf: Naf, negated: bool, name: String, args: TermVecVecUid) -> BuildResult<LitUid>;
    fn lit_relation(&mut self, loc: Location, rel: Relation, left: TermUid, right: TermUid) -> BuildResult<LitUid>;
    fn lit_csp(&mut self, loc: Location, lit: CspLitUid) -> BuildResult<LitUid>;
    fn litvec_new(&mut self) -> BuildResult<LitVecUid>;
    fn litvec_insert(&mut self, vec: LitVecUid, lit: LitUid) -> BuildResult<LitVecUid>;

    fn condlitvec_new(&mut self) -> BuildResult<CondLitVecUid>;
    fn condlitvec_insert(&mut self, vec: CondLitVecUid, head: LitUid, cond: LitVecUid) -> BuildResult<CondLitVecUid>;

    // aggregates -------------------------------------------------------------------------

    fn bodyaggrelemvec_new(&mut self) -> BuildResult<BdAggrElemVecUid>;
    fn bodyaggrelemvec_insert(&mut self, vec: BdAggrElemVecUid, tuple: TermVecUid, cond: LitVecUid) -> BuildResult<BdAggrElemVecUid>;
    fn headaggrelemvec_new(&mut self) -> BuildResult<HdAggrElemVecUid>;
    fn headaggrelemvec_insert(&mut self, vec: HdAggrElemVecUid, tuple: TermVecUid, head: LitUid, cond: LitVecUid) -> BuildResult<HdAggrElemVecUid>;
    fn boundvec_new(&mut self) -> BuildResult<BoundVecUid>;
    fn boundvec_insert(&mut self, vec: BoundVecUid, rel: Relation, term: TermUid) -> BuildResult<BoundVecUid>;

    // body assembly ----------------------------------------------------------------------

    fn body_new(&mut self) -> BuildResult<BodyUid>;
    fn body_literal(&mut self, body: BodyUid, naf: Naf, lit: LitUid) -> BuildResult<BodyUid>;
    fn body_aggregate(&mut self, body: BodyUid, loc: Location, naf: Naf, fun: AggregateFunction,
                      bounds: BoundVecUid, elems: BdAggrElemVecUid) -> BuildResult<BodyUid>;
    /// Choice-style aggregate in a body (`{ a : b }` with optional bounds, counted).
    fn body_choice(&mut self, body: BodyUid, loc: Location, naf: Naf,
                   bounds: BoundVecUid, elems: CondLitVecUid) -> BuildResult<BodyUid>;
    fn body_conjunction(&mut self, body: BodyUid, loc: Location, head: LitUid, cond: LitVecUid) -> BuildResult<BodyUid>;
    fn body_theory_atom(&mut self, body: BodyUid, loc: Location, naf: Naf, atom: TheoryAtomUid) -> BuildResult<BodyUid>;
    fn body_disjoint(&mut self, body: BodyUid, loc: Location, naf: Naf, elems: CspElemVecUid) -> BuildResult<BodyUid>;

    // head assembly ----------------------------------------------------------------------

    fn head_literal(&mut self, loc: Location, lit: LitUid) -> BuildResult<HeadUid>;
    fn head_aggregate(&mut self, loc: Location, fun: AggregateFunction,
                      bounds: BoundVecUid, elems: HdAggrElemVecUid) -> BuildResult<HeadUid>;
    fn head_choice(&mut self, loc: Location, bounds: BoundVecUid, elems: CondLitVecUid) -> BuildResult<HeadUid>;
    fn head_disjunction(&mut self, loc: Location, elems: CondLitVecUid) -> BuildResult<HeadUid>;
    fn head_theory_atom(&mut self, loc: Location, atom: TheoryAtomUid) -> BuildResult<HeadUid>;

    // statements -------------------------------------------------------------------------

    fn rule(&mut self, loc: Location, head: HeadUid) -> BuildResult<()>;
    fn rule_with_body(&mut self, loc: Location, head: HeadUid, body: BodyUid) -> BuildResult<()>;
    /// Weak constraint / minimize statement.
    fn optimize(&mut self, loc: Location, weight: TermUid, priority: TermUid,
                tuple: TermVecUid, body: BodyUid) -> BuildResult<()>;

    // directives -------------------------------------------------------------------------

    fn showsig(&mut self, loc: Location, name: String, arity: u32, csp: bool) -> BuildResult<()>;
    fn show(&mut self, loc: Location, term: TermUid, body: BodyUid, csp: bool) -> BuildResult<()>;
    fn external(&mut self, loc: Location, atom: LitUid, body: BodyUid) -> BuildResult<()>;
    fn edge(&mut self, loc: Location, edges: TermVecVecUid, body: BodyUid) -> BuildResult<()>;
    fn heuristic(&mut self, loc: Location, atom: LitUid, body: BodyUid, bias: TermUid,
                 priority: TermUid, modifier: TermUid) -> BuildResult<()>;
    fn project_atom(&mut self, loc: Location, atom: LitUid, body: BodyUid) -> BuildResult<()>;
    fn project_signature(&mut self, loc: Location, name: String, arity: u32) -> BuildResult<()>;
    /// Constant definition; implementations are expected to warn on redefinition.
    fn define(&mut self, loc: Location, name: String, value: TermUid, default: bool) -> BuildResult<()>;
    fn include(&mut self, loc: Location, path: String, system: bool) -> BuildResult<()>;
    /// Program block directive: `#program name(params).`
    fn block(&mut self, loc: Location, name: String, params: IdVecUid) -> BuildResult<()>;
    fn script(&mut self, loc: Location, lang: ScriptLang, code: String) -> BuildResult<()>;

    // csp --------------------------------------------------------------------------------

    fn csp_mul_term(&mut self, loc: Location, coefficient: TermUid, variable: Option<TermUid>) -> BuildResult<CspMulTermUid>;
    fn csp_add_term(&mut self, loc: Location, term: CspMulTermUid) -> BuildResult<CspAddTermUid>;
    fn csp_add_term_insert(&mut self, loc: Location, sum: CspAddTermUid, term: CspMulTermUid, add: bool) -> BuildResult<CspAddTermUid>;
    fn csp_literal(&mut self, loc: Location, rel: Relation, left: CspAddTermUid, right: CspAddTermUid) -> BuildResult<CspLitUid>;
    /// Extends a chained comparison (`a < b < c`).
    fn csp_literal_insert(&mut self, loc: Location, lit: CspLitUid, rel: Relation, term: CspAddTermUid) -> BuildResult<CspLitUid>;
    fn csp_elemvec_new(&mut self) -> BuildResult<CspElemVecUid>;
    fn csp_elemvec_insert(&mut self, vec: CspElemVecUid, loc: Location, tuple: TermVecUid,
                          term: CspAddTermUid, cond: LitVecUid) -> BuildResult<CspElemVecUid>;

    // theory -----------------------------------------------------------------------------

    fn theory_opvec_new(&mut self) -> BuildResult<TheoryOpVecUid>;
    fn theory_opvec_insert(&mut self, vec: TheoryOpVecUid, op: String) -> BuildResult<TheoryOpVecUid>;
    fn theory_opterm(&mut self, loc: Location, ops: TheoryOpVecUid, term: TheoryTermUid) -> BuildResult<TheoryOpTermUid>;
    fn theory_opterm_insert(&mut self, opterm: TheoryOpTermUid, ops: TheoryOpVecUid, term: TheoryTermUid) -> BuildResult<TheoryOpTermUid>;
    fn theory_opterms_new(&mut self) -> BuildResult<TheoryOpTermVecUid>;
    fn theory_opterms_insert(&mut self, vec: TheoryOpTermVecUid, opterm: TheoryOpTermUid) -> BuildResult<TheoryOpTermVecUid>;

    fn theory_term_value(&mut self, loc: Location, value: Constant) -> BuildResult<TheoryTermUid>;
    fn theory_term_variable(&mut self, loc: Location, name: String) -> BuildResult<TheoryTermUid>;
    fn theory_term_tuple(&mut self, loc: Location, args: TheoryOpTermVecUid) -> BuildResult<TheoryTermUid>;
    fn theory_term_list(&mut self, loc: Location, args: TheoryOpTermVecUid) -> BuildResult<TheoryTermUid>;
    fn theory_term_set(&mut self, loc: Location, args: TheoryOpTermVecUid) -> BuildResult<TheoryTermUid>;
    fn theory_term_function(&mut self, loc: Location, name: String, args: TheoryOpTermVecUid) -> BuildResult<TheoryTermUid>;
    fn theory_term_opterm(&mut self, loc: Location, opterm: TheoryOpTermUid) -> BuildResult<TheoryTermUid>;

    fn theory_elems_new(&mut self) -> BuildResult<TheoryElemVecUid>;
    fn theory_elems_insert(&mut self, vec: TheoryElemVecUid, tuple: TheoryOpTermVecUid, cond: LitVecUid) -> BuildResult<TheoryElemVecUid>;
    fn theory_atom(&mut self, name: TermUid, elems: TheoryElemVecUid) -> BuildResult<TheoryAtomUid>;
    fn theory_atom_with_guard(&mut self, name: TermUid, elems: TheoryElemVecUid,
                              op: String, guard: TheoryOpTermUid) -> BuildResult<TheoryAtomUid>;

    fn theory_opdef(&mut self, loc: Location, op: String, priority: u32, kind: TheoryOperatorType) -> BuildResult<TheoryOpDefUid>;
    fn theory_opdefs_new(&mut self) -> BuildResult<TheoryOpDefVecUid>;
    fn theory_opdefs_insert(&mut self, vec: TheoryOpDefVecUid, def: TheoryOpDefUid) -> BuildResult<TheoryOpDefVecUid>;
    fn theory_termdef(&mut self, loc: Location, name: String, defs: TheoryOpDefVecUid) -> BuildResult<TheoryTermDefUid>;
    fn theory_atomdef(&mut self, loc: Location, name: String, arity: u32, term_def: String,
                      kind: TheoryAtomType) -> BuildResult<TheoryAtomDefUid>;
    fn theory_atomdef_with_guard(&mut self, loc: Location, name: String, arity: u32, term_def: String,
                                 kind: TheoryAtomType, ops: TheoryOpVecUid, guard_def: String) -> BuildResult<TheoryAtomDefUid>;
    fn theory_defvec_new(&mut self) -> BuildResult<TheoryDefVecUid>;
    fn theory_defvec_insert_term(&mut self, vec: TheoryDefVecUid, def: TheoryTermDefUid) -> BuildResult<TheoryDefVecUid>;
    fn theory_defvec_insert_atom(&mut self, vec: TheoryDefVecUid, def: TheoryAtomDefUid) -> BuildResult<TheoryDefVecUid>;
    /// Theory definition statement: `#theory name { ... }.`
    fn theory_defs(&mut self, loc: Location, name: String, defs: TheoryDefVecUid) -> BuildResult<()>;
}
