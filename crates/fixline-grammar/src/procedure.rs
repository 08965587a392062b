// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error("Not a procedure code: {0}")]
    InvalidProcedure(String),
}

/// Departure (SID) or arrival (STAR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcedureKind {
    Departure,
    Arrival,
}

impl ProcedureKind {
    /// Short name used for lookup endpoints and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureKind::Departure => "sid",
            ProcedureKind::Arrival => "star",
        }
    }
}

/// A dotted procedure code.
///
/// Departures are written `NAME.TRANSITION` (`HHOWE4.LNCON`) and arrivals
/// `TRANSITION.NAME` (`PONCT.JFUND2`), so the transition fix is the suffix
/// of a SID and the prefix of a STAR. `code` keeps the text as written and
/// is the key sent to the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureCode {
    pub kind: ProcedureKind,
    pub code: String,
    pub name: String,
    pub transition: String,
}

impl ProcedureCode {
    pub fn parse(token: &str, kind: ProcedureKind) -> Result<Self, GrammarError> {
        let code = token.to_uppercase();
        if !crate::is_procedure_code(&code) {
            return Err(GrammarError::InvalidProcedure(token.to_string()));
        }
        let (left, right) = code
            .split_once('.')
            .ok_or_else(|| GrammarError::InvalidProcedure(token.to_string()))?;

        let (name, transition) = match kind {
            ProcedureKind::Departure => (left.to_string(), right.to_string()),
            ProcedureKind::Arrival => (right.to_string(), left.to_string()),
        };

        Ok(Self {
            kind,
            name,
            transition,
            code,
        })
    }

    /// The fix a procedure code starts with, used when an airway looks ahead
    /// at it. Plain tokens are returned unchanged.
    pub fn leading_fix(token: &str) -> &str {
        if crate::is_procedure_code(token) {
            token.split('.').next().unwrap_or(token)
        } else {
            token
        }
    }
}
