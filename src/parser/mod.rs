// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

//! The LALR(1) engine: a shift/reduce driver over packed tables, with error-token
//! resynchronization and per-rule handler dispatch.

use log::debug;
use thiserror::Error;
use crate::{StateId, TOKEN_EOF};
use crate::builder::{Builder, BuilderError};
use crate::lexer::{Token, TokenSource};
use crate::location::Location;
use crate::log::Logger;
use crate::tables::{Action, ParseTables};
use crate::value::SemanticValue;

mod reduce;

pub use reduce::{Reduction, RuleAction, RuleActions};

const TARGET: &str = "rulegram::parser";

// ---------------------------------------------------------------------------------------------

/// One entry of the parse stack: automaton state, attribute value, and source span of the
/// symbol that produced it.
#[derive(Debug)]
pub struct Frame {
    pub state: StateId,
    pub value: SemanticValue,
    pub location: Location,
}

impl Frame {
    fn initial() -> Self {
        Frame { state: 0, value: SemanticValue::None, location: Location::default() }
    }
}

/// Diagnostic policy knobs. Neither affects which inputs are accepted, only the quality of
/// the reported messages.
#[derive(Clone, Copy, Debug)]
pub struct ParserConfig {
    /// Number of tokens that must be shifted after a recovery before a new syntax error is
    /// reported (errors in between are part of the same burst).
    pub error_debounce: u32,
    /// Maximum number of expected tokens listed in a syntax error message; above it the
    /// message degrades to the plain "unexpected token" form.
    pub max_expected: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { error_debounce: 3, max_expected: 4 }
    }
}

#[derive(PartialEq, Debug, Error)]
pub enum ParseError {
    /// The parse ran to completion but recovered from at least one error.
    #[error("parsing failed with {count} error(s)")]
    EncounteredErrors { count: usize },
    /// The stack was exhausted during recovery, or end of input was reached while recovering.
    #[error("irrecoverable syntax error")]
    Irrecoverable,
    /// A rule handler's builder call failed; never recovered.
    #[error(transparent)]
    Builder(#[from] BuilderError),
}

// ---------------------------------------------------------------------------------------------

/// Table-driven parser. The tables and the rule handlers must come from the same grammar
/// build (identical rule numbering); `new` asserts at least that their rule counts agree.
///
/// The builder and the logger are passed to [`parse`](Parser::parse) and threaded into every
/// rule handler, so one `Parser` can serve successive inputs with fresh collaborators.
pub struct Parser<'t, B, L> {
    tables: &'t ParseTables,
    actions: &'t RuleActions<B, L>,
    config: ParserConfig,
}

impl<'t, B: Builder, L: Logger> Parser<'t, B, L> {
    pub fn new(tables: &'t ParseTables, actions: &'t RuleActions<B, L>) -> Self {
        assert_eq!(tables.num_rules(), actions.len(), "tables/handlers rule count mismatch");
        Parser { tables, actions, config: ParserConfig::default() }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses one complete input from `source`.
    ///
    /// Recoverable syntax errors and lexical errors are reported to `log` and the parse
    /// continues; if any occurred, the result is `Err(EncounteredErrors)` even though the
    /// builder may hold a partial program. Builder errors and recovery exhaustion abort.
    pub fn parse(&self, source: &mut impl TokenSource, builder: &mut B, log: &mut L) -> Result<(), ParseError> {
        let mut stack = vec![Frame::initial()];
        let mut lookahead: Option<Token> = None;
        let mut num_errors = 0usize;
        let outcome = self.drive(source, builder, log, &mut stack, &mut lookahead, &mut num_errors);
        // teardown on every exit path: remaining frame values and any buffered lookahead
        // are released here, exactly once
        stack.clear();
        drop(lookahead.take());
        match outcome {
            Ok(()) if num_errors == 0 => Ok(()),
            Ok(()) => Err(ParseError::EncounteredErrors { count: num_errors }),
            Err(err) => Err(err),
        }
    }

    /// Main loop: examine the top state, fetch a lookahead only when the state has no default
    /// reduction, then shift, reduce, or recover.
    fn drive(
        &self,
        source: &mut impl TokenSource,
        builder: &mut B,
        log: &mut L,
        stack: &mut Vec<Frame>,
        lookahead: &mut Option<Token>,
        num_errors: &mut usize,
    ) -> Result<(), ParseError> {
        let mut errstatus = 0u32;
        loop {
            let state = stack.last().unwrap().state;
            if state == self.tables.final_state() {
                debug!(target: TARGET, "accept");
                return Ok(());
            }
            let rule = match self.tables.default_reduction(state) {
                Some(rule) => rule,
                None => {
                    if lookahead.is_none() {
                        match source.next_token() {
                            Ok(token) => *lookahead = Some(token),
                            Err(err) => {
                                // straight to resynchronization, no table lookup
                                log.add_error(err.to_string());
                                *num_errors += 1;
                                self.recover(stack, lookahead, &mut errstatus, log)?;
                                continue;
                            }
                        }
                    }
                    let token = lookahead.as_ref().unwrap();
                    match self.tables.action(state, token.symbol) {
                        Action::Shift(next) => {
                            let token = lookahead.take().unwrap();
                            debug!(target: TARGET, "shift {} -> state {next}", self.tables.name(token.symbol));
                            if errstatus > 0 {
                                errstatus -= 1;
                            }
                            stack.push(Frame { state: next, value: token.value, location: token.location });
                            continue;
                        }
                        Action::Reduce(rule) => rule,
                        Action::Error => {
                            if errstatus == 0 {
                                *num_errors += 1;
                                let msg = self.syntax_error_message(state, token.symbol);
                                log.add_error_at(&token.location, msg);
                            }
                            self.recover(stack, lookahead, &mut errstatus, log)?;
                            continue;
                        }
                    }
                }
            };
            self.reduce(rule, stack, builder, log)?;
        }
    }

    /// Pops the rule's right-hand side, runs its handler, and pushes the goto frame.
    fn reduce(&self, rule: crate::RuleId, stack: &mut Vec<Frame>, builder: &mut B, log: &mut L) -> Result<(), BuilderError> {
        let len = self.tables.rule_len(rule);
        let lhs = self.tables.rule_lhs(rule);
        debug_assert!(stack.len() > len);
        let split = stack.len() - len;
        let lhs_location = if len > 0 {
            stack[split].location.merge(&stack.last().unwrap().location)
        } else {
            stack.last().unwrap().location.after()
        };
        let mut rhs = stack.split_off(split);
        debug!(target: TARGET, "reduce rule {rule} -> {} ({len} symbol(s))", self.tables.name(lhs));
        let mut reduction = Reduction::new(&mut rhs, lhs_location);
        if let Some(action) = self.actions.get(rule) {
            action(&mut reduction, builder, log)?;
        }
        let (value, location) = reduction.finish();
        let state = self.tables.goto_state(stack.last().unwrap().state, lhs);
        debug!(target: TARGET, "goto state {state}");
        stack.push(Frame { state, value, location });
        Ok(())
    }

    /// Error-token resynchronization. Discards the lookahead only when the error arrived with
    /// no shift since the previous recovery; then pops frames until a state that shifts the
    /// error token, and pushes an error frame spanning the popped range and the lookahead.
    /// The buffered lookahead is re-used when the parse resumes.
    fn recover(
        &self,
        stack: &mut Vec<Frame>,
        lookahead: &mut Option<Token>,
        errstatus: &mut u32,
        log: &mut L,
    ) -> Result<(), ParseError> {
        if *errstatus == self.config.error_debounce {
            match lookahead.take() {
                Some(token) if token.is_eof() => {
                    debug!(target: TARGET, "end of input while recovering, aborting");
                    return Err(ParseError::Irrecoverable);
                }
                Some(token) => {
                    debug!(target: TARGET, "discard {}", self.tables.name(token.symbol));
                }
                None => {}
            }
        }
        *errstatus = self.config.error_debounce;
        let mut popped: Option<Location> = None;
        loop {
            let top = stack.last().unwrap();
            if let Some(next) = self.tables.error_shift(top.state) {
                let mut location = popped.unwrap_or_else(|| top.location.after());
                if let Some(token) = lookahead.as_ref() {
                    if token.symbol != TOKEN_EOF {
                        location = location.merge(&token.location);
                    }
                }
                debug!(target: TARGET, "resynchronized in state {next}");
                log.add_note(format!("{location}: resuming parse after error"));
                stack.push(Frame { state: next, value: SemanticValue::None, location });
                return Ok(());
            }
            if stack.len() == 1 {
                debug!(target: TARGET, "stack exhausted while recovering, aborting");
                return Err(ParseError::Irrecoverable);
            }
            let frame = stack.pop().unwrap();
            popped = Some(match popped {
                Some(range) => frame.location.merge(&range),
                None => frame.location,
            });
            // frame value released here
        }
    }

    /// Human-readable syntax error, listing up to `max_expected` acceptable tokens.
    fn syntax_error_message(&self, state: StateId, unexpected: crate::SymbolId) -> String {
        let mut msg = format!("syntax error, unexpected {}", self.tables.name(unexpected));
        let expected = self.tables.expected_tokens(state);
        if !expected.is_empty() && expected.len() <= self.config.max_expected {
            for (n, symbol) in expected.iter().enumerate() {
                msg.push_str(if n == 0 { ", expecting " } else { " or " });
                msg.push_str(self.tables.name(*symbol));
            }
        }
        msg
    }
}
