// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

use thiserror::Error;
use crate::{SymbolId, TOKEN_EOF};
use crate::location::Location;
use crate::value::SemanticValue;

// ---------------------------------------------------------------------------------------------

/// A lexed token: terminal symbol number, attribute value, and source span.
#[derive(Debug)]
pub struct Token {
    pub symbol: SymbolId,
    pub value: SemanticValue,
    pub location: Location,
}

impl Token {
    pub fn new(symbol: SymbolId, value: SemanticValue, location: Location) -> Self {
        Token { symbol, value, location }
    }

    /// A valueless token (punctuation, keywords).
    pub fn plain(symbol: SymbolId, location: Location) -> Self {
        Token { symbol, value: SemanticValue::None, location }
    }

    pub fn is_eof(&self) -> bool {
        self.symbol == TOKEN_EOF
    }
}

/// The lexer could not produce a token. The parser reports it and resynchronizes, but the
/// parse is marked as failed.
#[derive(Clone, PartialEq, Debug, Error)]
#[error("{location}: lexical error: {message}")]
pub struct LexicalError {
    pub location: Location,
    pub message: String,
}

/// Contract between the parser and the token producer.
///
/// `next_token` must be repeatably callable: after the end of the input it keeps returning
/// a token with symbol [`TOKEN_EOF`]. A lexical error is a value, not a panic; the parser maps
/// it onto its recovery path without consulting the action tables.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexicalError>;
}

// ---------------------------------------------------------------------------------------------

/// In-memory [TokenSource] over pre-lexed tokens. Items are either tokens or lexical errors,
/// delivered in order; the end-of-input token is synthesized at the last seen location.
#[derive(Debug, Default)]
pub struct TokenQueue {
    items: Vec<Result<Token, LexicalError>>,
    next: usize,
    last_location: Location,
}

impl TokenQueue {
    pub fn new<I: IntoIterator<Item = Token>>(tokens: I) -> Self {
        TokenQueue {
            items: tokens.into_iter().map(Ok).collect(),
            next: 0,
            last_location: Location::default(),
        }
    }

    pub fn from_results<I: IntoIterator<Item = Result<Token, LexicalError>>>(items: I) -> Self {
        TokenQueue {
            items: items.into_iter().collect(),
            next: 0,
            last_location: Location::default(),
        }
    }
}

impl TokenSource for TokenQueue {
    fn next_token(&mut self) -> Result<Token, LexicalError> {
        match self.items.get_mut(self.next) {
            Some(item) => {
                self.next += 1;
                let item = std::mem::replace(item, Ok(Token::plain(TOKEN_EOF, Location::default())));
                if let Ok(token) = &item {
                    self.last_location = token.location.clone();
                }
                item
            }
            None => Ok(Token::plain(TOKEN_EOF, self.last_location.after())),
        }
    }
}
