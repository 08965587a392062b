// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Route string expansion.
//!
//! Tokens are walked left to right. Each one is classified once and handed
//! to a single dispatcher ([`expand_token`]). Airways look one fix back and
//! one token ahead, so the walk is inherently sequential. Failed lookups
//! never abort: the literal token is passed through and the final fix-shape
//! filter drops it.

use crate::lookup::LookupService;
use fixline_grammar::{classify, is_fix_ident, tokenize, ProcedureCode, ProcedureKind, TokenKind};
use log::{debug, warn};

/// What one token contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Append after the current output.
    Append(Vec<String>),
    /// Replace the previous accepted fix (and anything after it) and
    /// consume the look-ahead token.
    ReplacePrev(Vec<String>),
}

impl Expansion {
    /// Tokens consumed from the input, including the current one.
    pub fn consumed(&self) -> usize {
        match self {
            Expansion::Append(_) => 1,
            Expansion::ReplacePrev(_) => 2,
        }
    }
}

/// Expands a raw route into its ordered candidate fixes.
///
/// Duplicates are kept; only entries with a fix-identifier shape survive.
pub async fn expand_route<L: LookupService + ?Sized>(lookup: &L, raw: &str) -> Vec<String> {
    let tokens = tokenize(raw);
    let mut output: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let kind = classify(&tokens, i);
        let prev = last_fix(&output).map(|(_, fix)| fix.to_string());
        let next = tokens.get(i + 1).map(String::as_str);

        let expansion = expand_token(lookup, &kind, &tokens[i], prev.as_deref(), next).await;
        let consumed = expansion.consumed();

        match expansion {
            Expansion::Append(waypoints) => output.extend(waypoints),
            Expansion::ReplacePrev(waypoints) => {
                if let Some((idx, _)) = last_fix(&output) {
                    output.truncate(idx);
                }
                output.extend(waypoints);

                // A consumed look-ahead that is an arrival procedure still
                // gets expanded; its transition is already in the output.
                if let Some(next_token) = next {
                    if let Ok(star) = ProcedureCode::parse(next_token, ProcedureKind::Arrival) {
                        let prev = output.last().cloned();
                        output.extend(expand_procedure(lookup, &star, prev.as_deref()).await);
                    }
                }
            }
        }
        i += consumed;
    }

    let before = output.len();
    let candidates: Vec<String> = output.into_iter().filter(|t| is_fix_ident(t)).collect();
    debug!(
        "Expanded route — tokens={} expanded={} candidates={}",
        tokens.len(),
        before,
        candidates.len()
    );
    candidates
}

/// Expands one classified token.
///
/// `prev` is the last fix already accepted into the output and `next` the
/// raw token that follows.
pub async fn expand_token<L: LookupService + ?Sized>(
    lookup: &L,
    kind: &TokenKind,
    token: &str,
    prev: Option<&str>,
    next: Option<&str>,
) -> Expansion {
    match kind {
        TokenKind::Fix => Expansion::Append(vec![token.to_string()]),
        TokenKind::Procedure(code) => Expansion::Append(expand_procedure(lookup, code, prev).await),
        TokenKind::Airway => match next {
            Some(next) => expand_airway(lookup, token, prev, next).await,
            None => Expansion::Append(vec![token.to_string()]),
        },
    }
}

/// SID or STAR: the transition fix first (unless it is already the last
/// accepted fix), then the published waypoints. Falls back to the literal
/// code when the lookup fails.
async fn expand_procedure<L: LookupService + ?Sized>(
    lookup: &L,
    code: &ProcedureCode,
    prev: Option<&str>,
) -> Vec<String> {
    let mut out = Vec::new();
    if prev != Some(code.transition.as_str()) {
        out.push(code.transition.clone());
    }

    match lookup.lookup_procedure(code.kind, &code.code).await {
        Ok(waypoints) => {
            let skip = usize::from(waypoints.first() == Some(&code.transition));
            debug!(
                "Expanded procedure — kind={} code={} waypoints={}",
                code.kind.as_str(),
                code.code,
                waypoints.len()
            );
            out.extend(waypoints.into_iter().skip(skip));
        }
        Err(e) => {
            warn!(
                "Procedure lookup failed, keeping literal — kind={} code={} error={}",
                code.kind.as_str(),
                code.code,
                e
            );
            out.push(code.code.clone());
        }
    }
    out
}

async fn expand_airway<L: LookupService + ?Sized>(
    lookup: &L,
    airway: &str,
    prev: Option<&str>,
    next: &str,
) -> Expansion {
    let Some(from) = prev else {
        warn!("Airway has no preceding fix, keeping literal — airway={}", airway);
        return Expansion::Append(vec![airway.to_string()]);
    };
    let to = ProcedureCode::leading_fix(next);

    match lookup.lookup_airway_segment(airway, from, to).await {
        Ok(mut segment) if !segment.is_empty() => {
            if segment.last().map(String::as_str) != Some(to) {
                segment.push(to.to_string());
            }
            debug!(
                "Expanded airway — airway={} from={} to={} fixes={}",
                airway,
                from,
                to,
                segment.len()
            );
            Expansion::ReplacePrev(segment)
        }
        Ok(_) => {
            warn!("Airway lookup returned no fixes — airway={} from={} to={}", airway, from, to);
            Expansion::Append(vec![airway.to_string()])
        }
        Err(e) => {
            warn!(
                "Airway lookup failed, keeping literal — airway={} from={} to={} error={}",
                airway, from, to, e
            );
            Expansion::Append(vec![airway.to_string()])
        }
    }
}

fn last_fix(output: &[String]) -> Option<(usize, &str)> {
    output
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| is_fix_ident(t))
        .map(|(i, t)| (i, t.as_str()))
}
