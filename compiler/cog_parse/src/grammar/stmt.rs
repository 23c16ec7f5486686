//! Statement parsing.
//!
//! Statements are ordinary [`Expr`] nodes; this layer decides which
//! construct starts at the current token and where `;` is required.

use cog_ir::{Expr, ExprKind, Position, TokenKind, VarDeclarator};
use cog_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_pos();
        let mut items = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            items.push(self.parse_statement()?);
        }
        debug!(statements = items.len(), "parsed program");

        if items.len() == 1 {
            if let Some(only) = items.pop() {
                return Ok(only);
            }
        }
        let pos = if items.is_empty() {
            start
        } else {
            start.to(self.cursor.previous_pos())
        };
        Ok(Expr::new(ExprKind::Sequence(items), pos))
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Var => {
                let decl = self.parse_var_decl()?;
                self.expect_semicolon()?;
                Ok(decl)
            }
            TokenKind::Function if matches!(self.cursor.peek_kind(), TokenKind::Ident(_)) => {
                self.parse_function()
            }
            TokenKind::Return => {
                let start = self.cursor.advance().pos;
                let value = if self.cursor.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(Box::new(self.parse_expression()?))
                };
                self.expect_semicolon()?;
                Ok(Expr::new(
                    ExprKind::Return(value),
                    start.to(self.cursor.previous_pos()),
                ))
            }
            TokenKind::Break => self.parse_jump(ExprKind::Break),
            TokenKind::Continue => self.parse_jump(ExprKind::Continue),
            TokenKind::Throw => {
                let start = self.cursor.advance().pos;
                let value = self.parse_expression()?;
                self.expect_semicolon()?;
                Ok(Expr::new(
                    ExprKind::Throw(Box::new(value)),
                    start.to(self.cursor.previous_pos()),
                ))
            }
            TokenKind::Finally => Err(ParseError::finally_unsupported(self.cursor.current_pos())),
            // Empty statement in body position (`while (x);`).
            TokenKind::Semicolon => {
                let pos = self.cursor.advance().pos;
                Ok(Expr::new(ExprKind::Block(Vec::new()), pos))
            }
            _ => {
                let expr = self.parse_expression()?;
                self.expect_semicolon()?;
                Ok(expr)
            }
        }
    }

    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(&TokenKind::Semicolon).map(|_| ())
    }

    fn parse_jump(&mut self, kind: ExprKind) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos;
        self.expect_semicolon()?;
        Ok(Expr::new(kind, pos))
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut items = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => break,
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                TokenKind::Eof => {
                    return Err(ParseError::unclosed(
                        &TokenKind::LBrace,
                        open.pos,
                        self.cursor.current_pos(),
                    )
                    .in_context(ErrorContext::Block));
                }
                _ => items.push(
                    self.parse_statement()
                        .map_err(|e| e.in_context(ErrorContext::Block))?,
                ),
            }
        }
        self.cursor.advance();
        Ok(Expr::new(
            ExprKind::Block(items),
            open.pos.to(self.cursor.previous_pos()),
        ))
    }

    /// `( expression )` after `if`/`while`.
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.cursor
            .expect_closing(&TokenKind::RParen, &TokenKind::LParen, open.pos)?;
        Ok(cond)
    }

    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        self.parse_if_rest(start)
            .map_err(|e| e.in_context(ErrorContext::IfStatement))
    }

    fn parse_if_rest(&mut self, start: Position) -> Result<Expr, ParseError> {
        let cond = self.parse_condition()?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.cursor.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            start.to(self.cursor.previous_pos()),
        ))
    }

    /// `while (cond) body` lowers to a loop with only a condition.
    fn parse_while(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        let parsed = self.parse_condition().and_then(|cond| {
            let body = self.parse_statement()?;
            Ok((cond, body))
        });
        let (cond, body) = parsed.map_err(|e| e.in_context(ErrorContext::WhileLoop))?;
        Ok(Expr::new(
            ExprKind::Loop {
                init: None,
                cond: Some(Box::new(cond)),
                step: None,
                body: Box::new(body),
            },
            start.to(self.cursor.previous_pos()),
        ))
    }

    fn parse_for(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        self.parse_for_rest(start)
            .map_err(|e| e.in_context(ErrorContext::ForLoop))
    }

    /// `for (init; cond; step) body`; each clause may be empty.
    fn parse_for_rest(&mut self, start: Position) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let init = match self.cursor.current_kind() {
            TokenKind::Semicolon => None,
            TokenKind::Var => Some(Box::new(self.parse_var_decl()?)),
            _ => Some(Box::new(self.parse_expression()?)),
        };
        self.expect_semicolon()?;
        let cond = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_semicolon()?;
        let step = if self.cursor.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.cursor
            .expect_closing(&TokenKind::RParen, &TokenKind::LParen, open.pos)?;
        let body = self.parse_statement()?;
        Ok(Expr::new(
            ExprKind::Loop {
                init,
                cond,
                step,
                body: Box::new(body),
            },
            start.to(self.cursor.previous_pos()),
        ))
    }

    /// `var a = 1, b, c = a` without the terminating `;`.
    fn parse_var_decl(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::Var)?.pos;
        let mut decls = Vec::new();
        loop {
            let declarator = self
                .parse_declarator()
                .map_err(|e| e.in_context(ErrorContext::VarDeclaration))?;
            decls.push(declarator);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Expr::new(
            ExprKind::VarDecl(decls),
            start.to(self.cursor.previous_pos()),
        ))
    }

    fn parse_declarator(&mut self) -> Result<VarDeclarator, ParseError> {
        let (name, pos) = self.cursor.expect_ident("a variable name")?;
        let init = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        Ok(VarDeclarator {
            name,
            init,
            pos: pos.to(self.cursor.previous_pos()),
        })
    }

    fn parse_try(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        self.parse_try_rest(start)
            .map_err(|e| e.in_context(ErrorContext::TryCatch))
    }

    /// `try { ... } catch (name) { ... }`. `finally` is rejected.
    fn parse_try_rest(&mut self, start: Position) -> Result<Expr, ParseError> {
        let body = self.parse_block()?;
        if self.cursor.check(&TokenKind::Finally) {
            return Err(ParseError::finally_unsupported(self.cursor.current_pos()));
        }
        self.cursor.expect(&TokenKind::Catch)?;
        let open = self.cursor.expect(&TokenKind::LParen)?;
        let (catch_name, _) = self.cursor.expect_ident("a catch variable name")?;
        self.cursor
            .expect_closing(&TokenKind::RParen, &TokenKind::LParen, open.pos)?;
        let handler = self.parse_block()?;
        if self.cursor.check(&TokenKind::Finally) {
            return Err(ParseError::finally_unsupported(self.cursor.current_pos()));
        }
        Ok(Expr::new(
            ExprKind::Try {
                body: Box::new(body),
                catch_name,
                handler: Box::new(handler),
            },
            start.to(self.cursor.previous_pos()),
        ))
    }
}
