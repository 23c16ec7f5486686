//! Primary expressions: literals, identifiers, grouping, collection
//! literals, `array(n)`, and function literals.

use cog_ir::{Expr, ExprKind, TokenKind};

use super::keyword_name;
use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.current_pos();
        let kind = match self.cursor.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(x) => ExprKind::Float(*x),
            TokenKind::Str(s) => ExprKind::Str(s.clone()),
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Undefined => ExprKind::Undefined,
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_dict_literal(),
            TokenKind::Array => return self.parse_array_alloc(),
            TokenKind::Function => return self.parse_function(),
            _ => return Err(ParseError::expected_expression(self.cursor.current())),
        };
        self.cursor.advance();
        Ok(Expr::new(kind, pos))
    }

    /// `( expression )`; the parentheses leave no trace in the tree.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let inner = self
            .parse_expression()
            .map_err(|e| e.in_context(ErrorContext::Parenthesized))?;
        self.cursor
            .expect_closing(&TokenKind::RParen, &open.kind, open.pos)
            .map_err(|e| e.in_context(ErrorContext::Parenthesized))?;
        Ok(inner)
    }

    /// `[a, b, c]`, trailing comma allowed.
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let mut items = Vec::new();
        while !self.cursor.check(&TokenKind::RBracket) {
            let item = self
                .parse_assignment()
                .map_err(|e| e.in_context(ErrorContext::ArrayLiteral))?;
            items.push(item);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect_closing(&TokenKind::RBracket, &open.kind, open.pos)
            .map_err(|e| e.in_context(ErrorContext::ArrayLiteral))?;
        Ok(Expr::new(
            ExprKind::Array(items),
            open.pos.to(self.cursor.previous_pos()),
        ))
    }

    /// `{ key: value, ... }`, keys are identifiers, keywords, or strings.
    fn parse_dict_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let mut entries = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            let entry = self
                .parse_dict_entry()
                .map_err(|e| e.in_context(ErrorContext::DictLiteral))?;
            entries.push(entry);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect_closing(&TokenKind::RBrace, &open.kind, open.pos)
            .map_err(|e| e.in_context(ErrorContext::DictLiteral))?;
        Ok(Expr::new(
            ExprKind::Dict(entries),
            open.pos.to(self.cursor.previous_pos()),
        ))
    }

    fn parse_dict_entry(&mut self) -> Result<(String, Expr), ParseError> {
        let key = match self.cursor.current_kind() {
            TokenKind::Ident(name) | TokenKind::Str(name) => name.clone(),
            kind => match keyword_name(kind) {
                Some(name) => name.to_string(),
                None => {
                    return Err(ParseError::expected_identifier(
                        self.cursor.current(),
                        "a dictionary key",
                    ))
                }
            },
        };
        self.cursor.advance();
        self.cursor.expect(&TokenKind::Colon)?;
        let value = self.parse_assignment()?;
        Ok((key, value))
    }

    /// `array(length)`
    fn parse_array_alloc(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        let length = self
            .cursor
            .expect(&TokenKind::LParen)
            .and_then(|open| {
                let length = self.parse_assignment()?;
                self.cursor
                    .expect_closing(&TokenKind::RParen, &open.kind, open.pos)?;
                Ok(length)
            })
            .map_err(|e| e.in_context(ErrorContext::ArrayAllocation))?;
        Ok(Expr::new(
            ExprKind::ArrayAlloc(Box::new(length)),
            start.to(self.cursor.previous_pos()),
        ))
    }

    /// `function [name](params) { body }`
    pub(crate) fn parse_function(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::Function)?.pos;
        let name = if matches!(self.cursor.current_kind(), TokenKind::Ident(_)) {
            Some(self.cursor.expect_ident("a function name")?.0)
        } else {
            None
        };
        let params = self
            .parse_params()
            .map_err(|e| e.in_context(ErrorContext::FunctionParams))?;
        let body = self
            .parse_block()
            .map_err(|e| e.in_context(ErrorContext::FunctionDefinition))?;
        Ok(Expr::new(
            ExprKind::Function {
                name,
                params,
                body: Box::new(body),
            },
            start.to(self.cursor.previous_pos()),
        ))
    }

    fn parse_params(&mut self) -> Result<Vec<String>, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                params.push(self.cursor.expect_ident("a parameter name")?.0);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor
            .expect_closing(&TokenKind::RParen, &open.kind, open.pos)?;
        Ok(params)
    }
}
