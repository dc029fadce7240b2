//! AST node model
//!
//! The tree is built bottom-up by the parser and never changes afterwards.
//! Each [`AstNode`] is a tagged node: a [`NodeKind`], an ordered list of
//! [`Child`]ren (sub-nodes or raw leaf text) and, for evaluable nodes, a
//! [`ValueType`] fixed at construction.
//!
//! Construction goes through factory functions. The ones that carry a type
//! rule (`expr_list`, `num_op`, `bool_op`, `test_expr`) return a
//! [`TypeError`] instead of a node when their operands are inconsistent.

use super::type_system::{common_type, require_class, TypeClass, TypeError, ValueType};
use std::fmt;

/// Operators of the numeric family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumOperator {
    Add,     // +
    Sub,     // -
    Mul,     // *
    Div,     // /
    Mod,     // mod
    Greater, // >
    Smaller, // <
    Equal,   // =
}

impl NumOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            NumOperator::Add => "+",
            NumOperator::Sub => "-",
            NumOperator::Mul => "*",
            NumOperator::Div => "/",
            NumOperator::Mod => "mod",
            NumOperator::Greater => ">",
            NumOperator::Smaller => "<",
            NumOperator::Equal => "=",
        }
    }

    /// `+`, `*` and `=` take two or more operands; the rest exactly two.
    pub fn is_variadic(self) -> bool {
        matches!(self, NumOperator::Add | NumOperator::Mul | NumOperator::Equal)
    }
}

/// Operators of the boolean family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOperator {
    And,
    Or,
    Not,
}

impl BoolOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
            BoolOperator::Not => "not",
        }
    }

    /// `and` / `or` take two or more operands; `not` exactly one.
    pub fn is_variadic(self) -> bool {
        !matches!(self, BoolOperator::Not)
    }
}

/// Tag of an AST node, one per grammar production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    StmtList,
    Stmt,
    DefStmt,
    Var,
    PrintNum,
    PrintBool,
    Expr,
    ExprList,
    IfExpr,
    TestExpr,
    ThanExpr,
    ElseExpr,
    FunExpr,
    FunCall,
    FunName,
    FunIds,
    FunId,
    FunParams,
    FunParam,
    FunBody,
    NumOp(NumOperator),
    BoolOp(BoolOperator),
    Number,
    Boolean,
    Id,
}

impl NodeKind {
    /// Name used in diagnostics and tree labels. Operator nodes are named
    /// by their symbol.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::StmtList => "stmt_list",
            NodeKind::Stmt => "stmt",
            NodeKind::DefStmt => "def_stmt",
            NodeKind::Var => "var",
            NodeKind::PrintNum => "print_num",
            NodeKind::PrintBool => "print_bool",
            NodeKind::Expr => "expr",
            NodeKind::ExprList => "expr_list",
            NodeKind::IfExpr => "if_expr",
            NodeKind::TestExpr => "test_expr",
            NodeKind::ThanExpr => "than_expr",
            NodeKind::ElseExpr => "else_expr",
            NodeKind::FunExpr => "fun_expr",
            NodeKind::FunCall => "fun_call",
            NodeKind::FunName => "fun_name",
            NodeKind::FunIds => "fun_ids",
            NodeKind::FunId => "fun_id",
            NodeKind::FunParams => "fun_params",
            NodeKind::FunParam => "fun_param",
            NodeKind::FunBody => "fun_body",
            NodeKind::NumOp(op) => op.symbol(),
            NodeKind::BoolOp(op) => op.symbol(),
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Id => "id",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry in a node's child list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Node(AstNode),
    /// Terminal text: numeric literal, identifier, `#t`/`#f`, keyword, `nil`
    Leaf(String),
}

impl Child {
    pub fn as_node(&self) -> Option<&AstNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Child::Node(_) => None,
            Child::Leaf(text) => Some(text),
        }
    }
}

/// Text of the leaf used for empty identifier and parameter lists
pub const NIL_LEAF: &str = "nil";

/// A node of the abstract syntax tree
///
/// Scaffolding and list nodes only come out of the parser; outside the
/// crate, leaves and typed expressions are built with the public factories.
///
/// ```compile_fail
/// use mlisp::parser::AstNode;
///
/// let _ = AstNode::expr_list(vec![AstNode::number(1, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    kind: NodeKind,
    children: Vec<Child>,
    value_type: Option<ValueType>,
    line: usize,
}

impl AstNode {
    fn build(
        kind: NodeKind,
        children: Vec<Child>,
        value_type: Option<ValueType>,
        line: usize,
    ) -> Self {
        AstNode {
            kind,
            children,
            value_type,
            line,
        }
    }

    /// Untyped node for statements, definitions and function scaffolding.
    pub(crate) fn scaffold(kind: NodeKind, children: Vec<AstNode>, line: usize) -> Self {
        debug_assert!(!matches!(
            kind,
            NodeKind::Expr
                | NodeKind::ExprList
                | NodeKind::TestExpr
                | NodeKind::FunCall
                | NodeKind::NumOp(_)
                | NodeKind::BoolOp(_)
                | NodeKind::Number
                | NodeKind::Boolean
                | NodeKind::Id
        ));
        Self::build(
            kind,
            children.into_iter().map(Child::Node).collect(),
            None,
            line,
        )
    }

    /// Node whose only child is the `nil` leaf (empty `fun_ids`/`fun_params`).
    pub(crate) fn empty(kind: NodeKind, line: usize) -> Self {
        Self::build(kind, vec![Child::Leaf(NIL_LEAF.to_string())], None, line)
    }

    /// `print_num` / `print_bool`: keyword text followed by the printed expression.
    pub(crate) fn print(kind: NodeKind, keyword: String, expr: AstNode, line: usize) -> Self {
        debug_assert!(matches!(kind, NodeKind::PrintNum | NodeKind::PrintBool));
        Self::build(
            kind,
            vec![Child::Leaf(keyword), Child::Node(expr)],
            None,
            line,
        )
    }

    pub fn number(value: i32, line: usize) -> Self {
        Self::build(
            NodeKind::Number,
            vec![Child::Leaf(value.to_string())],
            Some(ValueType::Number),
            line,
        )
    }

    pub fn boolean(value: bool, line: usize) -> Self {
        let text = if value { "#t" } else { "#f" };
        Self::build(
            NodeKind::Boolean,
            vec![Child::Leaf(text.to_string())],
            Some(ValueType::Boolean),
            line,
        )
    }

    pub fn id(name: impl Into<String>, line: usize) -> Self {
        Self::build(
            NodeKind::Id,
            vec![Child::Leaf(name.into())],
            Some(ValueType::Unconstrained),
            line,
        )
    }

    /// `fun_call`; its result type is unknown without name resolution.
    pub fn fun_call(callee: AstNode, params: AstNode, line: usize) -> Self {
        Self::build(
            NodeKind::FunCall,
            vec![Child::Node(callee), Child::Node(params)],
            Some(ValueType::Unconstrained),
            line,
        )
    }

    /// `expr` wrapper; inherits its child's value type.
    pub fn expr(inner: AstNode) -> Self {
        let value_type = inner.value_type;
        let line = inner.line;
        Self::build(NodeKind::Expr, vec![Child::Node(inner)], value_type, line)
    }

    /// `expr_list` of two or more expressions sharing one operand class.
    pub(crate) fn expr_list(items: Vec<AstNode>) -> Result<Self, TypeError> {
        debug_assert!(items.len() >= 2);
        let value_type = common_type(items.iter().map(AstNode::operand))?;
        let line = items.first().map_or(1, |item| item.line);
        Ok(Self::build(
            NodeKind::ExprList,
            items.into_iter().map(Child::Node).collect(),
            Some(value_type),
            line,
        ))
    }

    /// Numeric operator; every operand must be number-compatible.
    pub fn num_op(op: NumOperator, args: Vec<AstNode>, line: usize) -> Result<Self, TypeError> {
        require_class(op.symbol(), TypeClass::Number, args.iter().map(AstNode::operand))?;
        Ok(Self::build(
            NodeKind::NumOp(op),
            args.into_iter().map(Child::Node).collect(),
            Some(ValueType::Number),
            line,
        ))
    }

    /// Boolean operator; every operand must be boolean-compatible.
    pub fn bool_op(op: BoolOperator, args: Vec<AstNode>, line: usize) -> Result<Self, TypeError> {
        require_class(op.symbol(), TypeClass::Boolean, args.iter().map(AstNode::operand))?;
        Ok(Self::build(
            NodeKind::BoolOp(op),
            args.into_iter().map(Child::Node).collect(),
            Some(ValueType::Boolean),
            line,
        ))
    }

    /// Test expression of a conditional; must be boolean-compatible.
    pub fn test_expr(condition: AstNode) -> Result<Self, TypeError> {
        require_class("if test expr", TypeClass::Boolean, [condition.operand()])?;
        let line = condition.line;
        Ok(Self::build(
            NodeKind::TestExpr,
            vec![Child::Node(condition)],
            None,
            line,
        ))
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Source line of the token that starts this node
    pub fn line(&self) -> usize {
        self.line
    }

    /// Sub-node children, skipping leaves
    pub fn child_nodes(&self) -> impl Iterator<Item = &AstNode> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// Leaf children, skipping sub-nodes
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(Child::as_leaf)
    }

    /// Value type paired with the name reported when there is none.
    fn operand(&self) -> (Option<ValueType>, &str) {
        let name = match (self.kind, self.children.first()) {
            (NodeKind::Expr, Some(Child::Node(inner))) => inner.kind.name(),
            _ => self.kind.name(),
        };
        (self.value_type, name)
    }
}
