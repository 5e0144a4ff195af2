////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::error::ExpandError;
use crate::parse::Token;
use crate::{LzMatchError, LzMatchResult};

/// Append `length` bytes starting `offset` bytes before the end of `output`.
///
/// The source may overlap the bytes being appended, in which case the last
/// `offset` bytes repeat. Nothing is appended if this function errors.
///
/// # Errors
/// - [ExpandError::BadOffset]: `offset` is 0
/// - [ExpandError::NegativePosition]: `offset` is larger than the output
/// - [ExpandError::BadLength]: `length` is 0
fn append_match(output: &mut Vec<u8>, offset: usize, length: usize) -> Result<(), ExpandError> {
    if offset == 0 {
        return Err(ExpandError::BadOffset);
    }
    if offset > output.len() {
        return Err(ExpandError::NegativePosition(output.len(), offset));
    }
    if length == 0 {
        return Err(ExpandError::BadLength(length));
    }

    let start = output.len() - offset;
    let end = output.len() + length;
    output.reserve(length);

    // the copied span doubles each pass and stays a multiple of `offset`
    // until the last one
    while output.len() < end {
        let span = (end - output.len()).min(output.len() - start);
        output.extend_from_within(start..start + span);
    }

    Ok(())
}

/// Reconstruct the bytes a token stream was parsed from
///
/// # Errors
/// - [LzMatchError::Expand]: a match token has a zero length or offset, or
///   reaches back before the start of the output
pub fn expand(tokens: &[Token]) -> LzMatchResult<Vec<u8>> {
    let mut output = Vec::new();

    for (token_index, token) in tokens.iter().enumerate() {
        match *token {
            Token::Literal(byte) => output.push(byte),
            Token::Match { length, offset } => {
                let (offset, length) = (offset as usize, length as usize);
                if let Err(error) = append_match(&mut output, offset, length) {
                    return Err(LzMatchError::Expand {
                        error,
                        token: token_index,
                    });
                }
            }
        }
    }

    Ok(output)
}
