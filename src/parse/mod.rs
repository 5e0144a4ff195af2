////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Reference parsers built on the matchfinder.
//!
//! A parser walks the input from start to end and decides at each position
//! whether to emit a literal byte or a back-reference, calling
//! [`MatchFinder::longest_match`](crate::MatchFinder::longest_match) where it
//! wants a match and
//! [`MatchFinder::skip_positions`](crate::MatchFinder::skip_positions) over the
//! bytes a taken match covers. The result is a stream of [`Token`]s for an
//! encoder to turn into an actual format.
//!
//! Two strategies are provided:
//! - [`Strategy::Greedy`] takes the longest match at every position.
//! - [`Strategy::Lazy`] also searches the following position and, if that
//!   yields a strictly longer match, emits a literal and defers to it.
mod expand;
mod greedy;
mod lazy;

use log::debug;

pub use crate::parse::expand::expand;
use crate::matchfinder::MatchIndex;
use crate::{LzMatchError, LzMatchResult};

/// Shortest match a parser will emit
pub const MIN_MATCH_LEN: u32 = 3;
/// Longest match emitted unless configured otherwise
pub const DEFAULT_MAX_MATCH_LEN: u32 = 258;

/// One step of a parsed buffer
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// A byte emitted as is
    Literal(u8),
    /// Copy `length` bytes starting `offset` bytes back. The copy may overlap
    /// the bytes it produces.
    Match { length: u32, offset: u32 },
}

impl Token {
    /// Number of input bytes this token stands for
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => length as usize,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Strategy {
    Greedy,
    #[default]
    Lazy,
}

/// Parameters for a parse
///
/// - `max_depth`: chain nodes inspected per search, at least 1
/// - `nice_len`: stop searching once a match this long is found, at least
///   [`MIN_MATCH_LEN`]
/// - `max_match_len`: longest match to emit, at least [`MIN_MATCH_LEN`]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseOptions {
    pub strategy: Strategy,
    pub max_depth: u32,
    pub nice_len: u32,
    pub max_match_len: u32,
}

impl ParseOptions {
    /// # Errors
    /// - [LzMatchError::InvalidOptions]: a field is out of range
    pub fn validate(&self) -> LzMatchResult<()> {
        if self.max_depth == 0 {
            return Err(LzMatchError::InvalidOptions("max_depth must be at least 1"));
        }
        if self.nice_len < MIN_MATCH_LEN {
            return Err(LzMatchError::InvalidOptions("nice_len must be at least 3"));
        }
        if self.max_match_len < MIN_MATCH_LEN {
            return Err(LzMatchError::InvalidOptions(
                "max_match_len must be at least 3",
            ));
        }
        Ok(())
    }

    /// `max_len` and `nice_len` for a position with `remaining` bytes left
    #[inline]
    pub(crate) fn limits(&self, remaining: usize) -> (u32, u32) {
        let max_len = self
            .max_match_len
            .min(u32::try_from(remaining).unwrap_or(u32::MAX));
        (max_len, self.nice_len.min(max_len))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        CompressionLevel::default().into()
    }
}

/// Preset trade-offs between search effort and match quality
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[non_exhaustive]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum CompressionLevel {
    Fastest,
    Fast,
    #[default]
    Default,
    Best,
}

impl From<CompressionLevel> for ParseOptions {
    fn from(level: CompressionLevel) -> Self {
        let (strategy, max_depth, nice_len) = match level {
            CompressionLevel::Fastest => (Strategy::Greedy, 4, 16),
            CompressionLevel::Fast => (Strategy::Greedy, 16, 32),
            CompressionLevel::Default => (Strategy::Lazy, 32, 64),
            CompressionLevel::Best => (Strategy::Lazy, 256, DEFAULT_MAX_MATCH_LEN),
        };
        ParseOptions {
            strategy,
            max_depth,
            nice_len,
            max_match_len: DEFAULT_MAX_MATCH_LEN,
        }
    }
}

/// Parses buffers up to a fixed size, reusing one match index between them
#[derive(Debug)]
pub struct Parser {
    index: MatchIndex,
}

impl Parser {
    #[must_use]
    pub fn new(max_bufsize: usize) -> Self {
        Self {
            index: MatchIndex::new(max_bufsize),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Parse `input` into tokens
    ///
    /// # Errors
    /// - [LzMatchError::EmptyInput]: `input` is empty
    /// - [LzMatchError::InvalidOptions]: `options` failed validation
    /// - [LzMatchError::InputTooLarge]: `input` is longer than this parser's
    ///   capacity
    pub fn parse(&mut self, input: &[u8], options: ParseOptions) -> LzMatchResult<Vec<Token>> {
        if input.is_empty() {
            return Err(LzMatchError::EmptyInput);
        }
        options.validate()?;
        if input.len() > self.capacity() {
            return Err(LzMatchError::InputTooLarge {
                length: input.len(),
                capacity: self.capacity(),
            });
        }

        let mut tokens = Vec::with_capacity(input.len() / 4);
        let mut finder = self.index.scan(input);
        match options.strategy {
            Strategy::Greedy => greedy::parse(&mut finder, &options, &mut tokens),
            Strategy::Lazy => lazy::parse(&mut finder, &options, &mut tokens),
        }

        debug!(
            "{:?} parse of {} bytes produced {} tokens ({} matches)",
            options.strategy,
            input.len(),
            tokens.len(),
            tokens
                .iter()
                .filter(|token| matches!(token, Token::Match { .. }))
                .count()
        );
        Ok(tokens)
    }
}

/// Parse `input` into tokens with a freshly allocated index.
///
/// # Errors
/// - [LzMatchError::EmptyInput]: `input` is empty
/// - [LzMatchError::InvalidOptions]: `options` failed validation
#[inline]
pub fn parse(input: &[u8], options: ParseOptions) -> LzMatchResult<Vec<Token>> {
    Parser::new(input.len()).parse(input, options)
}
