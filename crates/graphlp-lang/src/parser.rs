use crate::lexer::{compact, Lexer, Span, Token, TokenKind};
use graphlp_solver::{Constraint, LinearExpr, Sense, SolveError};
use thiserror::Error;

pub const CONSTRAINT_HINT: &str = "C1*x1 + C2*x2 <= B";
pub const OBJECTIVE_HINT: &str = "C1*x1 + C2*x2";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("expected {expected}, found '{found}' at position {}", .span.start)]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unknown variable '{0}', only x1 and x2 are allowed")]
    UnknownVariable(String),
    #[error("at least one coefficient must be non-zero")]
    ZeroCoefficients,
}

/// Text that does not match the objective or constraint grammar
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid format: {text}. Use {hint} ({reason})")]
pub struct ParseError {
    pub text: String,
    pub hint: &'static str,
    #[source]
    pub reason: SyntaxError,
}

impl From<ParseError> for SolveError {
    fn from(e: ParseError) -> Self {
        SolveError::Format {
            text: e.text,
            hint: e.hint,
            reason: e.reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Var {
    X1,
    X2,
}

struct Term {
    var: Var,
    coefficient: f64,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse `C1*x1 + C2*x2 {<=,>=,=} B`; the original text becomes the label
    pub fn parse_constraint(source: &str) -> Result<Constraint, ParseError> {
        Self::from_source(source)
            .constraint()
            .map(|(expr, sense, rhs)| Constraint::new(source.trim(), expr, sense, rhs))
            .map_err(|reason| ParseError {
                text: source.to_string(),
                hint: CONSTRAINT_HINT,
                reason,
            })
    }

    /// Parse `C1*x1 + C2*x2`
    pub fn parse_objective(source: &str) -> Result<LinearExpr, ParseError> {
        let mut parser = Self::from_source(source);
        parser
            .expression()
            .and_then(|expr| parser.expect_eof().map(|_| expr))
            .map_err(|reason| ParseError {
                text: source.to_string(),
                hint: OBJECTIVE_HINT,
                reason,
            })
    }

    fn from_source(source: &str) -> Self {
        Self::new(Lexer::tokenize(&compact(source)))
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        match self.current() {
            Some(t) if t.kind != TokenKind::Eof => SyntaxError::UnexpectedToken {
                expected: expected.to_string(),
                found: t.text.clone(),
                span: t.span,
            },
            _ => SyntaxError::UnexpectedEof(expected.to_string()),
        }
    }

    fn expect_eof(&self) -> Result<(), SyntaxError> {
        if self.peek_kind() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn constraint(&mut self) -> Result<(LinearExpr, Sense, f64), SyntaxError> {
        let expr = self.expression()?;
        if expr.c1 == 0.0 && expr.c2 == 0.0 {
            return Err(SyntaxError::ZeroCoefficients);
        }

        let sense = match self.peek_kind() {
            TokenKind::Le => Sense::Le,
            TokenKind::Ge => Sense::Ge,
            TokenKind::Eq => Sense::Eq,
            _ => return Err(self.unexpected("<=, >= or =")),
        };
        self.advance();

        if self.peek_kind() != TokenKind::Number {
            return Err(self.unexpected("a non-negative number"));
        }
        let rhs = self.number()?;
        self.expect_eof()?;

        Ok((expr, sense, rhs))
    }

    /// `x1_term [sign x2_term] | [sign] x2_term`
    fn expression(&mut self) -> Result<LinearExpr, SyntaxError> {
        let first = self.term(false)?;
        if first.var == Var::X2 {
            return Ok(LinearExpr::new(0.0, first.coefficient));
        }

        let mut c2 = 0.0;
        if matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            let start = self.pos;
            let second = self.term(true)?;
            if second.var != Var::X2 {
                let span = self.tokens[start].span;
                return Err(SyntaxError::UnexpectedToken {
                    expected: "x2".to_string(),
                    found: "x1".to_string(),
                    span,
                });
            }
            c2 = second.coefficient;
        }
        Ok(LinearExpr::new(first.coefficient, c2))
    }

    /// `[sign] [number ['*']] variable`
    fn term(&mut self, sign_required: bool) -> Result<Term, SyntaxError> {
        let sign = match self.peek_kind() {
            TokenKind::Plus => {
                self.advance();
                1.0
            }
            TokenKind::Minus => {
                self.advance();
                -1.0
            }
            _ if sign_required => return Err(self.unexpected("+ or -")),
            _ => 1.0,
        };

        let magnitude = if self.peek_kind() == TokenKind::Number {
            let n = self.number()?;
            if self.peek_kind() == TokenKind::Star {
                self.advance();
            }
            n
        } else {
            1.0
        };

        let var = match self.peek_kind() {
            TokenKind::X1 => Var::X1,
            TokenKind::X2 => Var::X2,
            TokenKind::Ident => {
                let name = self.current().map(|t| t.text.clone()).unwrap_or_default();
                return Err(SyntaxError::UnknownVariable(name));
            }
            _ => return Err(self.unexpected("x1 or x2")),
        };
        self.advance();

        Ok(Term {
            var,
            coefficient: sign * magnitude,
        })
    }

    fn number(&mut self) -> Result<f64, SyntaxError> {
        let text = self.advance().map(|t| t.text.clone()).unwrap_or_default();
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(SyntaxError::InvalidNumber(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(source: &str) -> (f64, f64, Sense, f64) {
        let c = Parser::parse_constraint(source).unwrap();
        (c.expr.c1, c.expr.c2, c.sense, c.rhs)
    }

    #[test]
    fn test_parse_simple_constraint() {
        assert_eq!(triple("x1+x2<=10"), (1.0, 1.0, Sense::Le, 10.0));
    }

    #[test]
    fn test_parse_with_whitespace_and_stars() {
        assert_eq!(triple("5*x1 + 8*x2 <= 1000"), (5.0, 8.0, Sense::Le, 1000.0));
        assert_eq!(triple(" 2.5 x1 - 0.5x2 >= 3 "), (2.5, -0.5, Sense::Ge, 3.0));
        assert_eq!(triple("-x1-x2=4"), (-1.0, -1.0, Sense::Eq, 4.0));
    }

    #[test]
    fn test_missing_x2_defaults_to_zero() {
        assert_eq!(triple("3x1<=12"), (3.0, 0.0, Sense::Le, 12.0));
        assert_eq!(triple("x2<=0"), (0.0, 1.0, Sense::Le, 0.0));
        assert_eq!(triple("-2*x2>=0"), (0.0, -2.0, Sense::Ge, 0.0));
    }

    #[test]
    fn test_label_keeps_original_text() {
        let c = Parser::parse_constraint("  6*x1 + 4*x2 <= 24").unwrap();
        assert_eq!(c.label, "6*x1 + 4*x2 <= 24");
    }

    #[test]
    fn test_missing_operator() {
        let err = Parser::parse_constraint("x1+x2").unwrap_err();
        assert_eq!(err.hint, CONSTRAINT_HINT);
        assert_eq!(err.text, "x1+x2");
        assert_eq!(err.reason, SyntaxError::UnexpectedEof("<=, >= or =".to_string()));
    }

    #[test]
    fn test_missing_x1() {
        let err = Parser::parse_constraint("3<=4").unwrap_err();
        assert!(matches!(err.reason, SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_x2_before_x1_rejected() {
        assert!(Parser::parse_constraint("x2+x1<=4").is_err());
        assert!(Parser::parse_constraint("x1+x1<=4").is_err());
    }

    #[test]
    fn test_second_term_needs_sign() {
        // "2x1 .5x2" has no sign between the terms
        let err = Parser::parse_constraint("2x1 .5x2<=4").unwrap_err();
        match err.reason {
            SyntaxError::UnexpectedToken { found, .. } => assert_eq!(found, ".5"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_rhs_rejected() {
        let err = Parser::parse_constraint("x1-x2>=-2").unwrap_err();
        match err.reason {
            SyntaxError::UnexpectedToken { expected, found, .. } => {
                assert_eq!(expected, "a non-negative number");
                assert_eq!(found, "-");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_literal() {
        assert!(Parser::parse_constraint("1.2.3x1<=4").is_err());
        assert!(Parser::parse_constraint("x1<=4.5.1").is_err());
    }

    #[test]
    fn test_unknown_variable() {
        let err = Parser::parse_constraint("x1+y<=3").unwrap_err();
        assert_eq!(err.reason, SyntaxError::UnknownVariable("y".to_string()));
    }

    #[test]
    fn test_zero_coefficients_rejected() {
        let err = Parser::parse_constraint("0*x1+0*x2<=5").unwrap_err();
        assert_eq!(err.reason, SyntaxError::ZeroCoefficients);
    }

    #[test]
    fn test_parse_objective() {
        let expr = Parser::parse_objective("5*x1+4*x2").unwrap();
        assert_eq!(expr, LinearExpr::new(5.0, 4.0));
        assert_eq!(Parser::parse_objective("-x1").unwrap(), LinearExpr::new(-1.0, 0.0));
        let err = Parser::parse_objective("5*x1+4*x2<=3").unwrap_err();
        assert_eq!(err.hint, OBJECTIVE_HINT);
    }

    #[test]
    fn test_error_message_carries_text_and_hint() {
        let err: SolveError = Parser::parse_constraint("x1 <> 4").unwrap_err().into();
        let message = err.to_string();
        assert!(message.contains("x1 <> 4"), "{message}");
        assert!(message.contains(CONSTRAINT_HINT), "{message}");
    }
}
