// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

use crate::builder::*;

// ---------------------------------------------------------------------------------------------

/// An aggregate collected from the grammar, before it is attached to a head or a body.
#[derive(Clone, PartialEq, Debug)]
pub struct AggregateDescr {
    pub fun: AggregateFunction,
    /// Choice aggregate (`{ ... }` without a function name)
    pub choice: bool,
    pub elems: AggregateElems,
    pub bounds: BoundVecUid,
}

/// Element vector of an aggregate; the variant decides which builder call attaches it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AggregateElems {
    Cond(CondLitVecUid),
    Body(BdAggrElemVecUid),
    Head(HdAggrElemVecUid),
}

/// A single aggregate bound; `term` is absent when the grammar allows the bound to be omitted
/// (the relation then defaults to [`Relation::Leq`] against the adjacent term).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoundDescr {
    pub rel: Relation,
    pub term: Option<TermUid>,
}

// ---------------------------------------------------------------------------------------------

/// Attribute value attached to a stack frame. Exactly one variant is active; values are moved
/// between frames, never copied, so builder handles keep a single owner.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum SemanticValue {
    /// Valueless symbol, or a frame whose value was moved out
    #[default]
    None,
    Str(String),
    Num(i32),
    Relation(Relation),
    Naf(Naf),
    AggrFun(AggregateFunction),
    Bound(BoundDescr),
    Aggregate(AggregateDescr),
    Term(TermUid),
    TermVec(TermVecUid),
    TermVecVec(TermVecVecUid),
    IdVec(IdVecUid),
    Lit(LitUid),
    LitVec(LitVecUid),
    CondLitVec(CondLitVecUid),
    BodyAggrElemVec(BdAggrElemVecUid),
    HeadAggrElemVec(HdAggrElemVecUid),
    BoundVec(BoundVecUid),
    Body(BodyUid),
    Head(HeadUid),
    CspMulTerm(CspMulTermUid),
    CspAddTerm(CspAddTermUid),
    CspLit(CspLitUid),
    CspElemVec(CspElemVecUid),
    TheoryOpVec(TheoryOpVecUid),
    TheoryTerm(TheoryTermUid),
    TheoryOpTerm(TheoryOpTermUid),
    TheoryOpTermVec(TheoryOpTermVecUid),
    TheoryElemVec(TheoryElemVecUid),
    TheoryAtom(TheoryAtomUid),
    TheoryOpDef(TheoryOpDefUid),
    TheoryOpDefVec(TheoryOpDefVecUid),
    TheoryTermDef(TheoryTermDefUid),
    TheoryAtomDef(TheoryAtomDefUid),
    TheoryDefVec(TheoryDefVecUid),
}

impl SemanticValue {
    pub fn is_none(&self) -> bool {
        matches!(self, SemanticValue::None)
    }

    pub fn take(&mut self) -> SemanticValue {
        std::mem::take(self)
    }
}

/// Generates the typed `into_*` accessors. The grammar guarantees the active variant at every
/// use site, so a mismatch is an internal error.
macro_rules! value_accessors {
    ($($fn_name:ident: $variant:ident => $ty:ty;)+) => {
        impl SemanticValue {
            $(
            pub fn $fn_name(self) -> $ty {
                match self {
                    SemanticValue::$variant(v) => v,
                    other => panic!("semantic value is not {}: {other:?}", stringify!($variant)),
                }
            }
            )+
        }
    }
}

value_accessors! {
    into_str: Str => String;
    into_num: Num => i32;
    into_relation: Relation => Relation;
    into_naf: Naf => Naf;
    into_aggr_fun: AggrFun => AggregateFunction;
    into_bound: Bound => BoundDescr;
    into_aggregate: Aggregate => AggregateDescr;
    into_term: Term => TermUid;
    into_termvec: TermVec => TermVecUid;
    into_termvecvec: TermVecVec => TermVecVecUid;
    into_idvec: IdVec => IdVecUid;
    into_lit: Lit => LitUid;
    into_litvec: LitVec => LitVecUid;
    into_condlitvec: CondLitVec => CondLitVecUid;
    into_bodyaggrelemvec: BodyAggrElemVec => BdAggrElemVecUid;
    into_headaggrelemvec: HeadAggrElemVec => HdAggrElemVecUid;
    into_boundvec: BoundVec => BoundVecUid;
    into_body: Body => BodyUid;
    into_head: Head => HeadUid;
    into_csp_mul_term: CspMulTerm => CspMulTermUid;
    into_csp_add_term: CspAddTerm => CspAddTermUid;
    into_csp_lit: CspLit => CspLitUid;
    into_csp_elemvec: CspElemVec => CspElemVecUid;
    into_theory_opvec: TheoryOpVec => TheoryOpVecUid;
    into_theory_term: TheoryTerm => TheoryTermUid;
    into_theory_opterm: TheoryOpTerm => TheoryOpTermUid;
    into_theory_opterms: TheoryOpTermVec => TheoryOpTermVecUid;
    into_theory_elems: TheoryElemVec => TheoryElemVecUid;
    into_theory_atom: TheoryAtom => TheoryAtomUid;
    into_theory_opdef: TheoryOpDef => TheoryOpDefUid;
    into_theory_opdefs: TheoryOpDefVec => TheoryOpDefVecUid;
    into_theory_termdef: TheoryTermDef => TheoryTermDefUid;
    into_theory_atomdef: TheoryAtomDef => TheoryAtomDefUid;
    into_theory_defvec: TheoryDefVec => TheoryDefVecUid;
}
