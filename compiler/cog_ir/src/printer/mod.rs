//! Canonical source printer.
//!
//! Renders an AST as Cog source that parses back to the same tree
//! (positions aside). Operator expressions are fully parenthesized, so
//! the output never depends on precedence; statement layout uses four
//! space indentation.

use crate::ast::{Expr, ExprKind, VarDeclarator};
use crate::TokenKind;

/// Render a whole program. A top-level `Sequence` is printed as one
/// statement per element; anything else is printed as a single statement.
pub fn print_program(program: &Expr) -> String {
    let mut printer = Printer::default();
    match &program.kind {
        ExprKind::Sequence(items) => {
            for item in items {
                printer.statement(item);
            }
        }
        _ => printer.statement(program),
    }
    printer.out
}

/// Render a single expression without its outermost parentheses.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr_top(expr);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn statement(&mut self, stmt: &Expr) {
        self.line_start();
        self.statement_body(stmt);
        self.out.push('\n');
    }

    /// Statement text without leading indentation or trailing newline.
    fn statement_body(&mut self, stmt: &Expr) {
        match &stmt.kind {
            ExprKind::Block(items) => self.block(items),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("if (");
                self.expr_top(cond);
                self.out.push_str(") ");
                self.statement_body(then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push_str(" else ");
                    self.statement_body(else_branch);
                }
            }
            ExprKind::Loop {
                init,
                cond,
                step,
                body,
            } => {
                if let (None, Some(cond), None) = (init, cond, step) {
                    self.out.push_str("while (");
                    self.expr_top(cond);
                    self.out.push_str(") ");
                } else {
                    self.out.push_str("for (");
                    if let Some(init) = init {
                        self.expr_top(init);
                    }
                    self.out.push_str("; ");
                    if let Some(cond) = cond {
                        self.expr_top(cond);
                    }
                    self.out.push_str("; ");
                    if let Some(step) = step {
                        self.expr_top(step);
                    }
                    self.out.push_str(") ");
                }
                self.statement_body(body);
            }
            ExprKind::VarDecl(decls) => {
                self.var_decl(decls);
                self.out.push(';');
            }
            ExprKind::Function {
                name: Some(_), ..
            } => self.expr(stmt),
            ExprKind::Return(value) => {
                self.out.push_str("return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr_top(value);
                }
                self.out.push(';');
            }
            ExprKind::Break => self.out.push_str("break;"),
            ExprKind::Continue => self.out.push_str("continue;"),
            ExprKind::Throw(value) => {
                self.out.push_str("throw ");
                self.expr_top(value);
                self.out.push(';');
            }
            ExprKind::Try {
                body,
                catch_name,
                handler,
            } => {
                self.out.push_str("try ");
                self.statement_body(body);
                self.out.push_str(" catch (");
                self.out.push_str(catch_name);
                self.out.push_str(") ");
                self.statement_body(handler);
            }
            _ => {
                // A statement may not begin with `{` (block) or `function`
                // (declaration); parenthesize expressions that would.
                let mut inner = Printer::default();
                inner.expr_top(stmt);
                if inner.out.starts_with('{') || inner.out.starts_with("function") {
                    self.out.push('(');
                    self.out.push_str(&inner.out);
                    self.out.push(')');
                } else {
                    self.out.push_str(&inner.out);
                }
                self.out.push(';');
            }
        }
    }

    fn block(&mut self, items: &[Expr]) {
        if items.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for item in items {
            self.statement(item);
        }
        self.indent -= 1;
        self.line_start();
        self.out.push('}');
    }

    fn var_decl(&mut self, decls: &[VarDeclarator]) {
        self.out.push_str("var ");
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&decl.name);
            if let Some(init) = &decl.init {
                self.out.push_str(" = ");
                self.expr_top(init);
            }
        }
    }

    /// Expression without redundant outer parentheses.
    fn expr_top(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Unary { op, operand } => {
                self.out.push_str(op.as_symbol());
                self.expr(operand);
            }
            ExprKind::Binary { op, left, right } => {
                self.expr(left);
                self.out.push(' ');
                self.out.push_str(op.as_symbol());
                self.out.push(' ');
                self.expr(right);
            }
            ExprKind::Assign { op, target, value } => {
                self.expr(target);
                self.out.push(' ');
                self.out.push_str(&op.as_symbol());
                self.out.push(' ');
                self.expr(value);
            }
            ExprKind::Update { op, prefix, target } => {
                if *prefix {
                    self.out.push_str(op.as_symbol());
                    self.expr(target);
                } else {
                    self.expr(target);
                    self.out.push_str(op.as_symbol());
                }
            }
            _ => self.expr(expr),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Null => self.out.push_str("null"),
            ExprKind::Undefined => self.out.push_str("undefined"),
            ExprKind::Bool(true) => self.out.push_str("true"),
            ExprKind::Bool(false) => self.out.push_str("false"),
            // Literals are never negative; a negative value came from a hex
            // or binary bit pattern.
            ExprKind::Int(n) if *n < 0 => self.out.push_str(&format!("0x{n:X}")),
            ExprKind::Int(n) => self.out.push_str(&n.to_string()),
            ExprKind::Float(x) => self.out.push_str(&format!("{x:?}")),
            ExprKind::Str(s) => self.string_literal(s),
            ExprKind::Ident(name) => self.out.push_str(name),
            ExprKind::Unary { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Assign { .. }
            | ExprKind::Update { .. } => {
                self.out.push('(');
                self.expr_top(expr);
                self.out.push(')');
            }
            ExprKind::VarDecl(decls) => self.var_decl(decls),
            ExprKind::Dict(entries) => {
                self.out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    if is_plain_key(key) {
                        self.out.push_str(key);
                    } else {
                        self.string_literal(key);
                    }
                    self.out.push_str(": ");
                    self.expr_top(value);
                }
                self.out.push('}');
            }
            ExprKind::Array(items) => {
                self.out.push('[');
                self.comma_list(items);
                self.out.push(']');
            }
            ExprKind::ArrayAlloc(len) => {
                self.out.push_str("array(");
                self.expr_top(len);
                self.out.push(')');
            }
            ExprKind::Sequence(items) => {
                self.out.push('(');
                self.comma_list(items);
                self.out.push(')');
            }
            ExprKind::Block(items) => self.block(items),
            ExprKind::Function { name, params, body } => {
                self.out.push_str("function");
                if let Some(name) = name {
                    self.out.push(' ');
                    self.out.push_str(name);
                }
                self.out.push('(');
                self.out.push_str(&params.join(", "));
                self.out.push_str(") ");
                self.statement_body(body);
            }
            ExprKind::Call { callee, args } => {
                self.postfix_operand(callee);
                self.out.push('(');
                self.comma_list(args);
                self.out.push(')');
            }
            ExprKind::Index { target, index } => {
                self.postfix_operand(target);
                self.out.push('[');
                self.expr_top(index);
                self.out.push(']');
            }
            ExprKind::Member { target, name } => {
                self.postfix_operand(target);
                self.out.push('.');
                self.out.push_str(name);
            }
            // Statement-only kinds never appear inside expressions that
            // the parser builds; print them as statements for debugging.
            ExprKind::If { .. }
            | ExprKind::Loop { .. }
            | ExprKind::Break
            | ExprKind::Continue
            | ExprKind::Return(_)
            | ExprKind::Throw(_)
            | ExprKind::Try { .. } => self.statement_body(expr),
        }
    }

    fn postfix_operand(&mut self, expr: &Expr) {
        match expr.kind {
            ExprKind::Ident(_)
            | ExprKind::Call { .. }
            | ExprKind::Index { .. }
            | ExprKind::Member { .. }
            | ExprKind::Str(_)
            | ExprKind::Array(_)
            | ExprKind::ArrayAlloc(_)
            | ExprKind::Dict(_)
            | ExprKind::Null
            | ExprKind::Undefined
            | ExprKind::Sequence(_)
            | ExprKind::Unary { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Assign { .. }
            | ExprKind::Update { .. } => self.expr(expr),
            _ => {
                self.out.push('(');
                self.expr_top(expr);
                self.out.push(')');
            }
        }
    }

    fn comma_list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr_top(item);
        }
    }

    fn string_literal(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                '\0' => self.out.push_str("\\0"),
                c if c.is_control() => {
                    self.out.push_str(&format!("\\u{{{:x}}}", u32::from(c)));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

/// Dictionary keys that can be written without quotes.
fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && TokenKind::keyword(key).is_none()
}
