// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

pub mod log;
pub mod location;
pub mod lexer;
pub mod value;
pub mod builder;
pub mod tables;
pub mod parser;


// package name & version
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ID of an automaton state
pub type StateId = u16;
/// ID of a grammar symbol; terminals occupy `[0, num_tokens)`, nonterminals the rest
pub type SymbolId = u16;
/// ID of a grammar rule. Rule 0 is the augmented start rule and is never reduced.
pub type RuleId = u16;

/// Symbol number of the synthetic end-of-input token.
pub const TOKEN_EOF: SymbolId = 0;
/// Symbol number of the synthetic error token used for resynchronization.
pub const TOKEN_ERROR: SymbolId = 1;

pub trait CollectJoin {
    fn join(&mut self, separator: &str) -> String
        where Self: Iterator,
              <Self as Iterator>::Item: ToString
    {
        self.map(|x| x.to_string()).collect::<Vec<_>>().join(separator)
    }
}

impl<I: Iterator> CollectJoin for I {}
