// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

use crate::RuleId;
use crate::builder::{Builder, BuilderError};
use crate::location::Location;
use crate::log::Logger;
use crate::parser::Frame;
use crate::value::SemanticValue;

// ---------------------------------------------------------------------------------------------

/// Context handed to a rule handler while its right-hand-side frames are still alive.
///
/// The handler moves values out with [`take`](Reduction::take) and sets the produced value
/// with [`give`](Reduction::give). When it gives nothing, the first right-hand-side value
/// (or [`SemanticValue::None`] for an empty production) becomes the result; when it doesn't
/// [`relocate`](Reduction::relocate), the default merged location is kept.
pub struct Reduction<'a> {
    rhs: &'a mut [Frame],
    lhs_location: Location,
    given: Option<SemanticValue>,
    relocated: Option<Location>,
}

impl<'a> Reduction<'a> {
    pub(crate) fn new(rhs: &'a mut [Frame], lhs_location: Location) -> Self {
        Reduction { rhs, lhs_location, given: None, relocated: None }
    }

    /// Number of right-hand-side symbols of the reduced rule.
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Moves the value of the `i`-th right-hand-side symbol out (0-based).
    pub fn take(&mut self, i: usize) -> SemanticValue {
        self.rhs[i].value.take()
    }

    /// Location of the `i`-th right-hand-side symbol.
    pub fn location(&self, i: usize) -> Location {
        self.rhs[i].location.clone()
    }

    /// Default location of the produced symbol: the union of the first and last right-hand-side
    /// locations, or the collapsed span of an empty production.
    pub fn lhs_location(&self) -> Location {
        self.lhs_location.clone()
    }

    /// Sets the produced semantic value.
    pub fn give(&mut self, value: SemanticValue) {
        self.given = Some(value);
    }

    /// Overrides the default location of the produced symbol.
    pub fn relocate(&mut self, location: Location) {
        self.relocated = Some(location);
    }

    /// Resolves the produced frame value and location once the handler has run.
    pub(crate) fn finish(mut self) -> (SemanticValue, Location) {
        let value = match self.given.take() {
            Some(value) => value,
            None => self.rhs.first_mut().map(|f| f.value.take()).unwrap_or(SemanticValue::None),
        };
        let location = self.relocated.take().unwrap_or(self.lhs_location);
        (value, location)
    }
}

// ---------------------------------------------------------------------------------------------

/// A rule handler: moves values out of the reduction context, calls the builder, and gives the
/// produced value back. A builder error aborts the whole parse.
pub type RuleAction<B, L> = fn(&mut Reduction, &mut B, &mut L) -> Result<(), BuilderError>;

/// Dispatch table keyed by rule number, paired 1:1 with the parse tables.
///
/// Rules without a handler get the default behavior (`$$ = $1`, merged location), which covers
/// pass-through productions.
pub struct RuleActions<B, L> {
    actions: Vec<Option<RuleAction<B, L>>>,
}

impl<B: Builder, L: Logger> RuleActions<B, L> {
    pub fn new(num_rules: usize) -> Self {
        RuleActions { actions: vec![None; num_rules] }
    }

    /// Registers the handler of rule `rule`, replacing any previous one.
    pub fn on(mut self, rule: RuleId, action: RuleAction<B, L>) -> Self {
        self.actions[rule as usize] = Some(action);
        self
    }

    pub fn get(&self, rule: RuleId) -> Option<RuleAction<B, L>> {
        self.actions.get(rule as usize).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
