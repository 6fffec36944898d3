//! Positional argument access for actions.
//!
//! Tokens reach actions exactly as they were split from the Args cell, so
//! `"2, 3"` arrives as `["2", " 3"]`. Every accessor here trims a token
//! before converting it; `raw` is the only way to read a token verbatim.

use crate::error::ActionError;

/// Borrowed view over an action's positional arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    tokens: &'a [String],
}

impl<'a> Args<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Reject calls with more than `max` arguments.
    pub fn at_most(&self, max: usize) -> Result<(), ActionError> {
        if self.tokens.len() > max {
            return Err(ActionError::InvalidArgument(format!(
                "takes at most {} argument(s) but {} were given",
                max,
                self.tokens.len()
            )));
        }
        Ok(())
    }

    /// Untrimmed token at `position` (0-based).
    pub fn raw(&self, position: usize) -> Option<&'a str> {
        self.tokens.get(position).map(|s| s.as_str())
    }

    /// Trimmed required token.
    pub fn required(&self, position: usize, name: &'static str) -> Result<&'a str, ActionError> {
        self.raw(position)
            .map(str::trim)
            .ok_or(ActionError::MissingArgument {
                name,
                position: position + 1,
            })
    }

    /// Trimmed optional token, falling back to `default`.
    pub fn optional(&self, position: usize, default: &'a str) -> &'a str {
        self.raw(position).map(str::trim).unwrap_or(default)
    }

    /// Required token parsed as a float.
    pub fn float(&self, position: usize, name: &'static str) -> Result<f64, ActionError> {
        let token = self.required(position, name)?;
        token.parse::<f64>().map_err(|_| {
            ActionError::InvalidArgument(format!(
                "could not convert '{}' to a number for '{}'",
                token, name
            ))
        })
    }

    /// Optional token parsed as an integer.
    pub fn int_or(&self, position: usize, name: &'static str, default: i64) -> Result<i64, ActionError> {
        match self.raw(position).map(str::trim) {
            None => Ok(default),
            Some(token) => token.parse::<i64>().map_err(|_| {
                ActionError::InvalidArgument(format!(
                    "could not convert '{}' to an integer for '{}'",
                    token, name
                ))
            }),
        }
    }
}
