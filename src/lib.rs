////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Hash-chain matchfinding for Lempel-Ziv style compressors.
//!
//! The core of the crate is [`MatchIndex`]: two hash tables and a table of
//! chain links that together remember every position of a buffer that has
//! been processed so far. Binding it to a buffer with [`MatchIndex::scan`]
//! yields a [`MatchFinder`] which can either search for the longest earlier
//! occurrence of the bytes at a position ([`MatchFinder::longest_match`]) or
//! just record positions without searching ([`MatchFinder::skip_positions`]).
//!
//! Deciding *which* matches to take is left to the caller. The [`parse`]
//! module contains reference greedy and lazy drivers that turn a buffer into a
//! stream of [`Token`]s, and [`expand`] turns such a stream back into bytes.
//!
//! ```
//! use lzmatch::{expand, parse, CompressionLevel};
//!
//! let input = b"abcabcabcabcabcabc";
//! let tokens = parse(input, CompressionLevel::Default.into()).unwrap();
//! assert_eq!(expand(&tokens).unwrap(), input);
//! ```
#![warn(clippy::pedantic, clippy::cargo)]
// Positions are stored as u32, so conversions from usize are frequent and checked at construction
#![allow(clippy::cast_possible_truncation)]
// Default::default() is more idiomatic imo
#![allow(clippy::default_trait_access)]
// too many lines is a dumb metric
#![allow(clippy::too_many_lines)]

mod error;
pub mod matchfinder;
pub mod parse;

pub use crate::error::{Error as LzMatchError, ExpandError, Result as LzMatchResult};
pub use crate::matchfinder::{Match, MatchFinder, MatchIndex};
pub use crate::parse::{expand, parse, CompressionLevel, ParseOptions, Parser, Strategy, Token};
