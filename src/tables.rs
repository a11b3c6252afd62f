// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

//! Packed parser tables and the only place allowed to do raw index arithmetic on them.
//!
//! The format is the classic compressed LALR layout produced by offline table compilers:
//! per-state offsets into a shared action row (`pact`/`table`/`check`), a default reduction
//! per state (`defact`), the analogous goto packing per nonterminal (`pgoto`/`goto_table`/
//! `goto_check`/`defgoto`), and per-rule arity/left-hand side. The engine only sees
//! [`Action`] values.

use crate::{RuleId, StateId, SymbolId, TOKEN_ERROR};

/// Sentinel in `pact`: the state has no lookahead-driven entries, only its default reduction.
pub const PACT_NINF: i32 = i32::MIN;
/// Sentinel in `table`: explicit error entry (never a shift or reduce).
pub const TABLE_NINF: i32 = i32::MIN;

/// Decision for a `(state, lookahead)` pair.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
    Error,
}

/// Immutable parser tables, paired 1:1 with a rule-handler table using the same rule numbering.
#[derive(Debug)]
pub struct ParseTables {
    /// per-state offset into `table`, or [PACT_NINF]
    pact: Vec<i32>,
    /// per-state default reduction, 0 = error
    defact: Vec<RuleId>,
    /// packed actions: `+state` shift, `-rule` reduce, [TABLE_NINF] error, 0 filler
    table: Vec<i32>,
    /// owner key of each `table` slot (the lookahead symbol), -1 for fillers
    check: Vec<i32>,
    /// per-nonterminal offset into `goto_table`, or [PACT_NINF]
    pgoto: Vec<i32>,
    /// per-nonterminal default goto target
    defgoto: Vec<StateId>,
    goto_table: Vec<i32>,
    /// owner key of each `goto_table` slot (the origin state), -1 for fillers
    goto_check: Vec<i32>,
    rule_len: Vec<u8>,
    rule_lhs: Vec<SymbolId>,
    /// symbol names for diagnostics, terminals first
    names: Vec<String>,
    num_tokens: SymbolId,
    final_state: StateId,
}

impl ParseTables {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pact: Vec<i32>,
        defact: Vec<RuleId>,
        table: Vec<i32>,
        check: Vec<i32>,
        pgoto: Vec<i32>,
        defgoto: Vec<StateId>,
        goto_table: Vec<i32>,
        goto_check: Vec<i32>,
        rule_len: Vec<u8>,
        rule_lhs: Vec<SymbolId>,
        names: Vec<String>,
        num_tokens: SymbolId,
        final_state: StateId,
    ) -> Self {
        let tables = ParseTables {
            pact, defact, table, check, pgoto, defgoto, goto_table, goto_check,
            rule_len, rule_lhs, names, num_tokens, final_state,
        };
        tables.check_consistency();
        tables
    }

    fn check_consistency(&self) {
        let num_states = self.pact.len();
        let num_nt = self.pgoto.len();
        assert!(num_states > 0, "empty automaton");
        assert_eq!(self.defact.len(), num_states, "defact/pact length mismatch");
        assert_eq!(self.check.len(), self.table.len(), "check/table length mismatch");
        assert_eq!(self.defgoto.len(), num_nt, "defgoto/pgoto length mismatch");
        assert_eq!(self.goto_check.len(), self.goto_table.len(), "goto check/table length mismatch");
        assert_eq!(self.rule_len.len(), self.rule_lhs.len(), "rule arrays length mismatch");
        assert_eq!(self.names.len(), self.num_tokens as usize + num_nt, "symbol name table length mismatch");
        assert!((self.final_state as usize) < num_states, "final state out of range");
        assert!(self.rule_lhs.iter().skip(1).all(|&lhs| lhs >= self.num_tokens),
                "rule lhs must be a nonterminal");
    }

    /// Looks up a packed row entry owned by `key`, `None` on a miss.
    fn packed_entry(offset: i32, key: i32, table: &[i32], check: &[i32]) -> Option<i32> {
        if offset == PACT_NINF {
            return None;
        }
        let idx = offset.checked_add(key)?;
        if idx < 0 || idx as usize >= table.len() || check[idx as usize] != key {
            None
        } else {
            Some(table[idx as usize])
        }
    }

    /// Decision for `(state, lookahead)`. Misses and zero fillers fall back to the state's
    /// default reduction; a default of 0 means error.
    pub fn action(&self, state: StateId, token: SymbolId) -> Action {
        match Self::packed_entry(self.pact[state as usize], token as i32, &self.table, &self.check) {
            Some(TABLE_NINF) => Action::Error,
            Some(v) if v > 0 => Action::Shift(v as StateId),
            Some(v) if v < 0 => Action::Reduce((-v) as RuleId),
            _ => match self.defact[state as usize] {
                0 => Action::Error,
                rule => Action::Reduce(rule),
            },
        }
    }

    /// Default reduction taken without fetching a lookahead, if the state has one.
    pub fn default_reduction(&self, state: StateId) -> Option<RuleId> {
        if self.pact[state as usize] == PACT_NINF && self.defact[state as usize] != 0 {
            Some(self.defact[state as usize])
        } else {
            None
        }
    }

    /// State entered after reducing to `nonterminal` with `state` on top of the stack.
    pub fn goto_state(&self, state: StateId, nonterminal: SymbolId) -> StateId {
        debug_assert!(nonterminal >= self.num_tokens);
        let nt = (nonterminal - self.num_tokens) as usize;
        match Self::packed_entry(self.pgoto[nt], state as i32, &self.goto_table, &self.goto_check) {
            Some(v) if v > 0 => v as StateId,
            _ => self.defgoto[nt],
        }
    }

    /// Shift action on the synthetic error token, used during resynchronization.
    pub fn error_shift(&self, state: StateId) -> Option<StateId> {
        match Self::packed_entry(self.pact[state as usize], TOKEN_ERROR as i32, &self.table, &self.check) {
            Some(v) if v > 0 => Some(v as StateId),
            _ => None,
        }
    }

    /// Terminals with a usable action in `state`, in symbol order; the error token is skipped.
    pub fn expected_tokens(&self, state: StateId) -> Vec<SymbolId> {
        (0..self.num_tokens)
            .filter(|&t| t != TOKEN_ERROR)
            .filter(|&t| {
                matches!(
                    Self::packed_entry(self.pact[state as usize], t as i32, &self.table, &self.check),
                    Some(v) if v != 0 && v != TABLE_NINF
                )
            })
            .collect()
    }

    #[inline]
    pub fn rule_len(&self, rule: RuleId) -> usize {
        self.rule_len[rule as usize] as usize
    }

    #[inline]
    pub fn rule_lhs(&self, rule: RuleId) -> SymbolId {
        self.rule_lhs[rule as usize]
    }

    pub fn num_rules(&self) -> usize {
        self.rule_len.len()
    }

    pub fn num_states(&self) -> usize {
        self.pact.len()
    }

    #[inline]
    pub fn num_tokens(&self) -> SymbolId {
        self.num_tokens
    }

    #[inline]
    pub fn final_state(&self) -> StateId {
        self.final_state
    }

    pub fn name(&self, symbol: SymbolId) -> &str {
        self.names.get(symbol as usize).map(String::as_str).unwrap_or("<unknown>")
    }
}
