//! Expression parsing: comma, assignment, binary, and unary layers.
//!
//! Binary operators use precedence climbing: each operator's
//! [`BinaryOp::binding_power`] decides how far the right operand extends,
//! and `power + 1` as the next minimum makes every level left-associative.

use cog_ir::{AssignOp, BinaryOp, Expr, ExprKind, TokenKind, UnaryOp, UpdateOp};
use cog_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Binding power below every binary operator.
const MIN_POWER: u8 = 1;

impl Parser {
    /// Full expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_assignment()?;
        if !self.cursor.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let start = first.pos;
        let mut items = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            items.push(self.parse_assignment()?);
        }
        Ok(Expr::new(
            ExprKind::Sequence(items),
            start.to(self.cursor.previous_pos()),
        ))
    }

    /// Assignment level; right-associative.
    pub(crate) fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_binary(MIN_POWER)?;
        let Some(op) = assign_op(self.cursor.current_kind()) else {
            return Ok(target);
        };
        if !target.is_assignable() {
            return Err(ParseError::invalid_assignment_target(
                target.label(),
                target.pos,
            ));
        }
        self.cursor.advance();
        let value = self.parse_assignment()?;
        let pos = target.pos.to(value.pos);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            pos,
        ))
    }

    fn parse_binary(&mut self, min_power: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = binary_op(self.cursor.current_kind()) {
            let power = op.binding_power();
            if power < min_power {
                break;
            }
            self.cursor.advance();
            let right = self.parse_binary(power + 1)?;
            let pos = left.pos.to(right.pos);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                pos,
            );
        }
        Ok(left)
    }

    /// `+x`, `-x`, `!x`, `~x`, `++x`, `--x`.
    pub(crate) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::PlusPlus => return self.parse_prefix_update(UpdateOp::Increment),
            TokenKind::MinusMinus => return self.parse_prefix_update(UpdateOp::Decrement),
            _ => return self.parse_postfix(),
        };
        let start = self.cursor.advance().pos;
        let operand = self.parse_unary()?;
        let pos = start.to(operand.pos);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    fn parse_prefix_update(&mut self, op: UpdateOp) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().pos;
        let target = self.parse_unary()?;
        if !target.is_assignable() {
            return Err(ParseError::invalid_assignment_target(
                target.label(),
                target.pos,
            ));
        }
        let pos = start.to(target.pos);
        Ok(Expr::new(
            ExprKind::Update {
                op,
                prefix: true,
                target: Box::new(target),
            },
            pos,
        ))
    }
}

fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => return Some(AssignOp::Set),
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::PercentEq => BinaryOp::Mod,
        TokenKind::ShlEq => BinaryOp::Shl,
        TokenKind::ShrEq => BinaryOp::Shr,
        TokenKind::AmpEq => BinaryOp::BitAnd,
        TokenKind::PipeEq => BinaryOp::BitOr,
        TokenKind::CaretEq => BinaryOp::BitXor,
        _ => return None,
    };
    Some(AssignOp::Compound(op))
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}
