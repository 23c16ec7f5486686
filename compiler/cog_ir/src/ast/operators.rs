//! Binary, unary, and update operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Binding strength; higher binds tighter.
    ///
    /// - 10: `*` `/` `%`
    /// - 9: `+` `-`
    /// - 8: `<<` `>>`
    /// - 7: `<` `<=` `>` `>=`
    /// - 6: `==` `!=`
    /// - 5: `&`
    /// - 4: `^`
    /// - 3: `|`
    /// - 2: `&&`
    /// - 1: `||`
    pub const fn binding_power(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 10,
            Self::Add | Self::Sub => 9,
            Self::Shl | Self::Shr => 8,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 7,
            Self::Eq | Self::NotEq => 6,
            Self::BitAnd => 5,
            Self::BitXor => 4,
            Self::BitOr => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

/// Assignment flavor: plain `=` or compound `op=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Set,
    Compound(BinaryOp),
}

impl AssignOp {
    pub fn as_symbol(self) -> String {
        match self {
            AssignOp::Set => "=".to_string(),
            AssignOp::Compound(op) => format!("{}=", op.as_symbol()),
        }
    }
}

/// `++` / `--`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// The arithmetic operator this update desugars to.
    pub const fn binary_op(self) -> BinaryOp {
        match self {
            Self::Increment => BinaryOp::Add,
            Self::Decrement => BinaryOp::Sub,
        }
    }
}
