//! Boolean SQL expression tree.
//!
//! Handlers return [`SqlExpr`] values instead of writing into a shared query
//! builder. Rendering walks the tree in declaration order, so placeholders
//! are numbered deterministically for a given tree.
//!
//! User-supplied values only ever enter the tree as [`Operand::Param`].
//! [`Operand::Int`] and [`Operand::Literal`] are reserved for values the
//! engine computes itself (language bits, shift widths, status codes, fixed
//! wildcard suffixes).

use crate::types::Operator;

use super::fragment::{SqlFragment, SqlParam, SqlWriter};
use super::select::Select;

/// A column reference, optionally qualified with a table alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Table alias, empty for unqualified columns.
    pub alias: &'static str,
    /// Column name.
    pub name: &'static str,
}

impl Column {
    /// A qualified column.
    pub const fn new(alias: &'static str, name: &'static str) -> Self {
        Self { alias, name }
    }

    /// An unqualified column.
    pub const fn bare(name: &'static str) -> Self {
        Self { alias: "", name }
    }

    fn write(&self, w: &mut SqlWriter) {
        if !self.alias.is_empty() {
            w.push_str(self.alias);
            w.push_str(".");
        }
        w.push_str(self.name);
    }
}

/// Arithmetic and bitwise operators usable inside operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// `&`
    BitAnd,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
}

impl ArithOp {
    fn as_sql(&self) -> &'static str {
        match self {
            ArithOp::BitAnd => "&",
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::ShiftLeft => "<<",
            ArithOp::ShiftRight => ">>",
        }
    }
}

/// A value-producing SQL term.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Column reference.
    Column(Column),
    /// Bound parameter.
    Param(SqlParam),
    /// Engine-computed integer, inlined.
    Int(i64),
    /// Static string literal, inlined.
    Literal(&'static str),
    /// Binary arithmetic, always parenthesized.
    Binary(Box<Operand>, ArithOp, Box<Operand>),
    /// `LOWER(operand)`
    Lower(Box<Operand>),
    /// `operand || operand`
    Concat(Box<Operand>, Box<Operand>),
    /// `COUNT(DISTINCT operand)`
    CountDistinct(Box<Operand>),
}

impl Operand {
    /// Column operand.
    pub const fn column(alias: &'static str, name: &'static str) -> Self {
        Operand::Column(Column::new(alias, name))
    }

    /// Bound parameter operand.
    pub fn param(param: impl Into<SqlParam>) -> Self {
        Operand::Param(param.into())
    }

    fn binary(self, op: ArithOp, rhs: Operand) -> Self {
        Operand::Binary(Box::new(self), op, Box::new(rhs))
    }

    /// `(self & rhs)`
    pub fn bit_and(self, rhs: Operand) -> Self {
        self.binary(ArithOp::BitAnd, rhs)
    }

    /// `(self + rhs)`
    pub fn plus(self, rhs: Operand) -> Self {
        self.binary(ArithOp::Add, rhs)
    }

    /// `(self - rhs)`
    pub fn minus(self, rhs: Operand) -> Self {
        self.binary(ArithOp::Sub, rhs)
    }

    /// `(self << bits)`
    pub fn shift_left(self, bits: u32) -> Self {
        self.binary(ArithOp::ShiftLeft, Operand::Int(i64::from(bits)))
    }

    /// `(self >> bits)`
    pub fn shift_right(self, bits: u32) -> Self {
        self.binary(ArithOp::ShiftRight, Operand::Int(i64::from(bits)))
    }

    /// `LOWER(self)`
    pub fn lower(self) -> Self {
        Operand::Lower(Box::new(self))
    }

    /// `(self || rhs)`
    pub fn concat(self, rhs: Operand) -> Self {
        Operand::Concat(Box::new(self), Box::new(rhs))
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        match self {
            Operand::Column(column) => column.write(w),
            Operand::Param(param) => w.push_param(param.clone()),
            Operand::Int(i) => w.push_int(*i),
            Operand::Literal(s) => {
                w.push_str("'");
                w.push_str(&s.replace('\'', "''"));
                w.push_str("'");
            }
            Operand::Binary(lhs, op, rhs) => {
                w.push_str("(");
                lhs.write(w);
                w.push_str(" ");
                w.push_str(op.as_sql());
                w.push_str(" ");
                rhs.write(w);
                w.push_str(")");
            }
            Operand::Lower(inner) => {
                w.push_str("LOWER(");
                inner.write(w);
                w.push_str(")");
            }
            Operand::Concat(lhs, rhs) => {
                w.push_str("(");
                lhs.write(w);
                w.push_str(" || ");
                rhs.write(w);
                w.push_str(")");
            }
            Operand::CountDistinct(inner) => {
                w.push_str("COUNT(DISTINCT ");
                inner.write(w);
                w.push_str(")");
            }
        }
    }
}

impl From<Column> for Operand {
    fn from(column: Column) -> Self {
        Operand::Column(column)
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Neq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
}

impl CompareOp {
    /// Maps a scalar criterion operator to its SQL comparison.
    pub fn from_operator(operator: Operator) -> Option<Self> {
        match operator {
            Operator::Eq => Some(CompareOp::Eq),
            Operator::Gt => Some(CompareOp::Gt),
            Operator::Gte => Some(CompareOp::Gte),
            Operator::Lt => Some(CompareOp::Lt),
            Operator::Lte => Some(CompareOp::Lte),
            Operator::In | Operator::Between | Operator::Like => None,
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// A boolean SQL expression.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    /// `1 = 1` or `1 = 0`.
    Literal(bool),
    /// `left op right`
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    /// `operand IN (values...)`
    In { operand: Operand, values: Vec<Operand> },
    /// `operand [NOT] IN (SELECT ...)`
    InSelect {
        operand: Operand,
        select: Box<Select>,
        negated: bool,
    },
    /// `operand BETWEEN low AND high`
    Between {
        operand: Operand,
        low: Operand,
        high: Operand,
    },
    /// `operand LIKE pattern ESCAPE '\'`
    Like { operand: Operand, pattern: Operand },
    /// `EXISTS (SELECT ...)`
    Exists(Box<Select>),
    /// Conjunction; empty means "no constraint".
    And(Vec<SqlExpr>),
    /// Disjunction; empty matches nothing.
    Or(Vec<SqlExpr>),
    /// `NOT (expr)`
    Not(Box<SqlExpr>),
}

impl SqlExpr {
    /// `1 = 1`
    pub fn match_all() -> Self {
        SqlExpr::Literal(true)
    }

    /// `1 = 0`
    pub fn match_none() -> Self {
        SqlExpr::Literal(false)
    }

    /// The empty conjunction: no constraint at all.
    pub fn unconstrained() -> Self {
        SqlExpr::And(Vec::new())
    }

    /// Generic comparison.
    pub fn compare(left: impl Into<Operand>, op: CompareOp, right: impl Into<Operand>) -> Self {
        SqlExpr::Compare {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// `left = right`
    pub fn eq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Eq, right)
    }

    /// `left <> right`
    pub fn neq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Neq, right)
    }

    /// `left > right`
    pub fn gt(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Gt, right)
    }

    /// `left < right`
    pub fn lt(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Lt, right)
    }

    /// `operand IN (?, ?, ...)`, binding every value.
    ///
    /// An empty list yields `1 = 0`, since `IN ()` is not valid SQL.
    pub fn in_list<I>(operand: impl Into<Operand>, values: I) -> Self
    where
        I: IntoIterator<Item = SqlParam>,
    {
        let values: Vec<Operand> = values.into_iter().map(Operand::Param).collect();
        if values.is_empty() {
            return SqlExpr::match_none();
        }
        SqlExpr::In {
            operand: operand.into(),
            values,
        }
    }

    /// `operand IN (SELECT ...)`
    pub fn in_select(operand: impl Into<Operand>, select: Select) -> Self {
        SqlExpr::InSelect {
            operand: operand.into(),
            select: Box::new(select),
            negated: false,
        }
    }

    /// `operand NOT IN (SELECT ...)`
    pub fn not_in_select(operand: impl Into<Operand>, select: Select) -> Self {
        SqlExpr::InSelect {
            operand: operand.into(),
            select: Box::new(select),
            negated: true,
        }
    }

    /// `operand BETWEEN low AND high`
    pub fn between(operand: impl Into<Operand>, low: Operand, high: Operand) -> Self {
        SqlExpr::Between {
            operand: operand.into(),
            low,
            high,
        }
    }

    /// `operand LIKE pattern`
    pub fn like(operand: impl Into<Operand>, pattern: Operand) -> Self {
        SqlExpr::Like {
            operand: operand.into(),
            pattern,
        }
    }

    /// `EXISTS (SELECT ...)`
    pub fn exists(select: Select) -> Self {
        SqlExpr::Exists(Box::new(select))
    }

    /// Conjunction of `children`, kept as given.
    pub fn and(children: Vec<SqlExpr>) -> Self {
        SqlExpr::And(children)
    }

    /// Disjunction of `children`, kept as given.
    pub fn or(children: Vec<SqlExpr>) -> Self {
        SqlExpr::Or(children)
    }

    /// Negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: SqlExpr) -> Self {
        SqlExpr::Not(Box::new(inner))
    }

    /// Returns true for the empty conjunction.
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, SqlExpr::And(children) if children.is_empty())
    }

    /// Renders the expression with placeholders starting at `?1`.
    pub fn to_fragment(&self) -> SqlFragment {
        self.to_fragment_with_offset(0)
    }

    /// Renders the expression for embedding after `offset` outer parameters.
    pub fn to_fragment_with_offset(&self, offset: usize) -> SqlFragment {
        let mut writer = SqlWriter::new(offset);
        self.write(&mut writer);
        writer.finish()
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        match self {
            SqlExpr::Literal(true) => w.push_str("1 = 1"),
            SqlExpr::Literal(false) => w.push_str("1 = 0"),
            SqlExpr::Compare { left, op, right } => {
                left.write(w);
                w.push_str(" ");
                w.push_str(op.as_sql());
                w.push_str(" ");
                right.write(w);
            }
            SqlExpr::In { operand, values } => {
                operand.write(w);
                w.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        w.push_str(", ");
                    }
                    value.write(w);
                }
                w.push_str(")");
            }
            SqlExpr::InSelect {
                operand,
                select,
                negated,
            } => {
                operand.write(w);
                w.push_str(if *negated { " NOT IN (" } else { " IN (" });
                select.write(w);
                w.push_str(")");
            }
            SqlExpr::Between { operand, low, high } => {
                operand.write(w);
                w.push_str(" BETWEEN ");
                low.write(w);
                w.push_str(" AND ");
                high.write(w);
            }
            SqlExpr::Like { operand, pattern } => {
                operand.write(w);
                w.push_str(" LIKE ");
                pattern.write(w);
                w.push_str(" ESCAPE '\\'");
            }
            SqlExpr::Exists(select) => {
                w.push_str("EXISTS (");
                select.write(w);
                w.push_str(")");
            }
            SqlExpr::And(children) => Self::write_joined(w, children, " AND ", "1 = 1"),
            SqlExpr::Or(children) => Self::write_joined(w, children, " OR ", "1 = 0"),
            SqlExpr::Not(inner) => {
                w.push_str("NOT (");
                inner.write(w);
                w.push_str(")");
            }
        }
    }

    fn write_joined(w: &mut SqlWriter, children: &[SqlExpr], separator: &str, identity: &str) {
        match children {
            [] => w.push_str(identity),
            [only] => only.write(w),
            _ => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        w.push_str(separator);
                    }
                    w.push_str("(");
                    child.write(w);
                    w.push_str(")");
                }
            }
        }
    }
}
