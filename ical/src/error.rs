// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use thiserror::Error;

/// Error produced when a recurrence-rule text does not match its grammar.
///
/// The parser diagnostics are rendered eagerly so the error owns no borrow
/// of the source text.
#[derive(Debug, Clone, Error)]
#[error("malformed recurrence rule: {message}")]
pub struct ParseRuleError {
    message: String,
}

impl ParseRuleError {
    pub(crate) fn from_errors<T: Display>(errors: impl IntoIterator<Item = T>) -> Self {
        let message = errors
            .into_iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self { message }
    }
}
