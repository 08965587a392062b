// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::procedure::{ProcedureCode, ProcedureKind};

/// Grammatical role of one route token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Opaque waypoint identifier, passed through unchanged.
    Fix,
    /// Airway bounded by the fix before it and the token after it.
    Airway,
    /// SID at position 0, STAR anywhere else.
    Procedure(ProcedureCode),
}

/// Classifies `tokens[i]` from its text and its position in the route.
///
/// Precedence: airway, then procedure, then fix. An airway designator in
/// the first or last slot has no neighbour on one side, so it classifies
/// as a plain fix and is pushed through literally.
pub fn classify<S: AsRef<str>>(tokens: &[S], i: usize) -> TokenKind {
    let Some(token) = tokens.get(i) else {
        return TokenKind::Fix;
    };
    let text = token.as_ref().to_uppercase();

    if crate::is_airway_ident(&text) {
        if i > 0 && i + 1 < tokens.len() {
            return TokenKind::Airway;
        }
        log::debug!("Unbounded airway treated as fix — token={} index={}", text, i);
        return TokenKind::Fix;
    }

    let kind = if i == 0 {
        ProcedureKind::Departure
    } else {
        ProcedureKind::Arrival
    };
    match ProcedureCode::parse(&text, kind) {
        Ok(code) => TokenKind::Procedure(code),
        Err(_) => TokenKind::Fix,
    }
}
