//! Postfix chains: `f(args)`, `a[i]`, `a.name`, `x++`, `x--`.

use cog_ir::{Expr, ExprKind, TokenKind, UpdateOp};

use super::keyword_name;
use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.cursor.current_kind() {
                TokenKind::LParen => self.parse_call(expr)?,
                TokenKind::LBracket => self.parse_index(expr)?,
                TokenKind::Dot => self.parse_member(expr)?,
                // An update ends the chain; its result is not assignable.
                TokenKind::PlusPlus => return self.parse_postfix_update(expr, UpdateOp::Increment),
                TokenKind::MinusMinus => {
                    return self.parse_postfix_update(expr, UpdateOp::Decrement)
                }
                _ => return Ok(expr),
            };
        }
    }

    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                let arg = self
                    .parse_assignment()
                    .map_err(|e| e.in_context(ErrorContext::CallArguments))?;
                args.push(arg);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor
            .expect_closing(&TokenKind::RParen, &open.kind, open.pos)
            .map_err(|e| e.in_context(ErrorContext::CallArguments))?;
        let pos = callee.pos.to(self.cursor.previous_pos());
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            pos,
        ))
    }

    fn parse_index(&mut self, target: Expr) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let index = self
            .parse_expression()
            .and_then(|index| {
                self.cursor
                    .expect_closing(&TokenKind::RBracket, &open.kind, open.pos)?;
                Ok(index)
            })
            .map_err(|e| e.in_context(ErrorContext::IndexExpression))?;
        let pos = target.pos.to(self.cursor.previous_pos());
        Ok(Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            pos,
        ))
    }

    /// `.name`; keywords are accepted as names.
    fn parse_member(&mut self, target: Expr) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let name = match self.cursor.current_kind() {
            TokenKind::Ident(name) => name.clone(),
            kind => match keyword_name(kind) {
                Some(name) => name.to_string(),
                None => {
                    return Err(ParseError::expected_identifier(
                        self.cursor.current(),
                        "a member name",
                    ))
                }
            },
        };
        self.cursor.advance();
        let pos = target.pos.to(self.cursor.previous_pos());
        Ok(Expr::new(
            ExprKind::Member {
                target: Box::new(target),
                name,
            },
            pos,
        ))
    }

    fn parse_postfix_update(&mut self, target: Expr, op: UpdateOp) -> Result<Expr, ParseError> {
        if !target.is_assignable() {
            return Err(ParseError::invalid_assignment_target(
                target.label(),
                target.pos,
            ));
        }
        self.cursor.advance();
        let pos = target.pos.to(self.cursor.previous_pos());
        Ok(Expr::new(
            ExprKind::Update {
                op,
                prefix: false,
                target: Box::new(target),
            },
            pos,
        ))
    }
}
