////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use onlyerror::Error;

/// Possible errors returned by the parse and expand functions
///
/// The matchfinder itself never returns errors: contract violations there are
/// programming errors and panic instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Error for when no input is provided to a parse function
    #[error("No input provided to parse")]
    EmptyInput,
    /// The input is longer than the match index it is parsed with can address
    #[error("Input of `{length}` bytes exceeds match index capacity of `{capacity}` bytes")]
    InputTooLarge { length: usize, capacity: usize },
    /// A field of [ParseOptions](crate::ParseOptions) is out of range
    ///
    /// ### Fields
    /// - &str: the offending option and its constraint
    #[error("Invalid parse options: {0}")]
    InvalidOptions(&'static str),
    /// A token could not be expanded. `token` is the index of the offending
    /// token in the stream.
    ///
    /// See [ExpandError] for further details on types of errors that can occur.
    #[error("Error occured while expanding token `{token}`:\n{error}")]
    Expand { error: ExpandError, token: usize },
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ExpandError {
    /// A match token has an offset of 0, which would copy from itself
    #[error("Offset is 0 in match token")]
    BadOffset,
    /// The requested copy offset would go past the start of the output.
    ///
    /// ### Fields
    /// - usize: output length
    /// - usize: offset requested
    #[error("Offset went past start of output: output length `{0}`, offset `{1}`")]
    NegativePosition(usize, usize),
    /// A match token has a length of 0
    ///
    /// ### Fields
    /// - usize: length requested
    #[error("Match length `{0}` is too short to encode a copy")]
    BadLength(usize),
}

/// Wrapper for Result specified to [LzMatchError](crate::LzMatchError)
pub type Result<T> = std::result::Result<T, Error>;
