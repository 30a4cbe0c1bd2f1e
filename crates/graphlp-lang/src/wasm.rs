//! WASM bindings for graphlp
//!
//! JavaScript-friendly entry points for a browser form: solve a set of form
//! fields, validate them, and tokenize a single line for highlighting.

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

use crate::lexer::{compact, Lexer, TokenKind};
use crate::parser::Parser;
use crate::request::{self, SolveRequest};
use graphlp_solver::Solver;

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn fields_from_js(fields: JsValue) -> Result<SolveRequest, JsValue> {
    let fields: BTreeMap<String, String> =
        serde_wasm_bindgen::from_value(fields).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(SolveRequest::from_fields(fields))
}

/// Solve an object of form fields and return `{ error }` or the solution
#[wasm_bindgen]
pub fn solve(fields: JsValue) -> Result<JsValue, JsValue> {
    let request = fields_from_js(fields)?;
    to_js(&request::solve(&request, &Solver::new()))
}

/// Per-field diagnostics for an object of form fields
#[wasm_bindgen]
pub fn validate(fields: JsValue) -> Result<JsValue, JsValue> {
    let request = fields_from_js(fields)?;
    to_js(&request.diagnostics())
}

/// Parse one constraint line into coefficients
#[wasm_bindgen]
pub fn parse_constraint(text: &str) -> Result<JsValue, JsValue> {
    let constraint = Parser::parse_constraint(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&constraint)
}

/// Token information for JavaScript
#[derive(serde::Serialize)]
struct TokenInfo {
    kind: String,
    text: String,
    start: usize,
    end: usize,
}

/// Tokens of the whitespace-stripped text, for syntax highlighting
#[wasm_bindgen]
pub fn tokenize(text: &str) -> Result<JsValue, JsValue> {
    let tokens: Vec<TokenInfo> = Lexer::tokenize(&compact(text))
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| TokenInfo {
            kind: match t.kind {
                TokenKind::X1 | TokenKind::X2 => "variable",
                TokenKind::Ident | TokenKind::Error | TokenKind::Eof => "error",
                TokenKind::Number => "number",
                _ => "operator",
            }
            .to_string(),
            text: t.text,
            start: t.span.start,
            end: t.span.end,
        })
        .collect();
    to_js(&tokens)
}
