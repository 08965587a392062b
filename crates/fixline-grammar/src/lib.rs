// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Route clearance grammar.
//!
//! A route string is a whitespace separated list of fixes, airways and
//! procedure codes, e.g. `HHOWE4.LNCON JHW Q82 PONCT.JFUND2`. This crate
//! turns that text into tokens and decides what each token means. It does
//! no lookups; the engine in `fixline-core` does the expansion.

pub mod classify;
pub mod procedure;

use regex::Regex;
use std::sync::OnceLock;

pub use classify::{classify, TokenKind};
pub use procedure::{GrammarError, ProcedureCode, ProcedureKind};

/// Splits a raw route on whitespace and upper-cases every token.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(|t| t.to_uppercase()).collect()
}

/// True when `token` has the shape of a plottable fix identifier
/// (3 to 5 upper-case letters).
pub fn is_fix_ident(token: &str) -> bool {
    static FIX_RE: OnceLock<Regex> = OnceLock::new();
    FIX_RE
        .get_or_init(|| Regex::new(r"^[A-Z]{3,5}$").unwrap())
        .is_match(token)
}

/// True when `token` looks like an airway designator: 1-3 letters followed
/// by 1-4 digits (`Q82`, `J60`, `UL9`). Matching is case-insensitive.
pub fn is_airway_ident(token: &str) -> bool {
    static AIRWAY_RE: OnceLock<Regex> = OnceLock::new();
    AIRWAY_RE
        .get_or_init(|| Regex::new(r"(?i)^[A-Z]{1,3}\d{1,4}$").unwrap())
        .is_match(token)
}

/// True when `token` has the `LEFT.RIGHT` procedure shape.
pub fn is_procedure_code(token: &str) -> bool {
    static PROC_RE: OnceLock<Regex> = OnceLock::new();
    PROC_RE
        .get_or_init(|| Regex::new(r"(?i)^[A-Z0-9]+\.[A-Z0-9]+$").unwrap())
        .is_match(token)
}
