//! Expression parsing
//!
//! ```text
//! expr     := num_op | bool_op | if_expr | fun_expr | fun_call
//!           | NUMBER | BOOLEAN | id
//! if_expr  := '(' IF expr expr expr ')'
//! fun_expr := '(' FUN '(' id* ')' expr ')'
//! fun_call := '(' (fun_expr | id) expr* ')'
//! num_op   := '(' ('-' | '/' | MOD | '>' | '<') expr expr ')'
//!           | '(' ('+' | '*' | '=') expr expr+ ')'
//! bool_op  := '(' (AND | OR) expr expr+ ')'
//!           | '(' NOT expr ')'
//! ```
//!
//! Every compound form starts with `(`; the token after it picks the
//! production. Operator and test-expression nodes run their type rule as
//! they are built, and a failure is reported on the line of the opening `(`.

use crate::parser::ast::{AstNode, BoolOperator, NodeKind, NumOperator};
use crate::parser::errors::ParseError;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, MAX_NESTING_DEPTH};

impl Parser {
    /// Parse an expression and wrap it in an `expr` node
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let token = self.advance()?;

        let inner = match token.kind {
            TokenKind::Number(value) => AstNode::number(value, token.line),
            TokenKind::Boolean(value) => AstNode::boolean(value, token.line),
            TokenKind::Id => AstNode::id(token.lexeme, token.line),
            TokenKind::LParen => self.parse_compound(token.line)?,
            _ => return Err(Self::unexpected(&token)),
        };

        Ok(AstNode::expr(inner))
    }

    /// Parse the body of a parenthesised expression; `(` is already consumed
    pub(crate) fn parse_compound(&mut self, line: usize) -> Result<AstNode, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep { line });
        }

        self.depth += 1;
        let node = self.parse_form(line);
        self.depth -= 1;
        node
    }

    fn parse_form(&mut self, line: usize) -> Result<AstNode, ParseError> {
        let head = self.advance()?;

        match head.kind {
            TokenKind::Plus => self.parse_num_op(NumOperator::Add, line),
            TokenKind::Multiply => self.parse_num_op(NumOperator::Mul, line),
            TokenKind::Equal => self.parse_num_op(NumOperator::Equal, line),
            TokenKind::Minus => self.parse_num_op(NumOperator::Sub, line),
            TokenKind::Divide => self.parse_num_op(NumOperator::Div, line),
            TokenKind::Mod => self.parse_num_op(NumOperator::Mod, line),
            TokenKind::Greater => self.parse_num_op(NumOperator::Greater, line),
            TokenKind::Smaller => self.parse_num_op(NumOperator::Smaller, line),

            TokenKind::And => self.parse_bool_op(BoolOperator::And, line),
            TokenKind::Or => self.parse_bool_op(BoolOperator::Or, line),
            TokenKind::Not => self.parse_bool_op(BoolOperator::Not, line),

            TokenKind::If => self.parse_if(line),
            TokenKind::Fun => self.parse_fun_expr(line),

            // ((fun (...) body) args...)
            TokenKind::LParen => {
                self.expect(TokenKind::Fun)?;
                let callee = self.parse_fun_expr(head.line)?;
                self.parse_fun_call(callee, line)
            }

            // (name args...)
            TokenKind::Id => {
                let name = AstNode::id(head.lexeme, head.line);
                let callee = AstNode::scaffold(NodeKind::FunName, vec![name], head.line);
                self.parse_fun_call(callee, line)
            }

            _ => Err(Self::unexpected(&head)),
        }
    }

    fn parse_num_op(&mut self, op: NumOperator, line: usize) -> Result<AstNode, ParseError> {
        let args = self.parse_operands(op.is_variadic(), 2)?;
        AstNode::num_op(op, args, line).map_err(|e| ParseError::type_error(e, line))
    }

    fn parse_bool_op(&mut self, op: BoolOperator, line: usize) -> Result<AstNode, ParseError> {
        let arity = if op.is_variadic() { 2 } else { 1 };
        let args = self.parse_operands(op.is_variadic(), arity)?;
        AstNode::bool_op(op, args, line).map_err(|e| ParseError::type_error(e, line))
    }

    /// Parse operator arguments up to and including the closing `)`.
    ///
    /// Fixed-arity operators get exactly `arity` operand nodes. Variadic ones
    /// get one leading operand plus their one-or-more tail, which is a single
    /// `expr` or an `expr_list` of two or more.
    fn parse_operands(&mut self, variadic: bool, arity: usize) -> Result<Vec<AstNode>, ParseError> {
        if !variadic {
            let mut args = Vec::with_capacity(arity);
            for _ in 0..arity {
                args.push(self.parse_expression()?);
            }
            self.expect_rparen()?;
            return Ok(args);
        }

        let first = self.parse_expression()?;

        let mut tail = vec![self.parse_expression()?];
        while !self.check(TokenKind::RParen)? {
            tail.push(self.parse_expression()?);
        }
        self.expect_rparen()?;

        let tail = if tail.len() == 1 {
            tail.remove(0)
        } else {
            let line = tail[0].line();
            AstNode::expr_list(tail).map_err(|e| ParseError::type_error(e, line))?
        };

        Ok(vec![first, tail])
    }

    /// `(if test then else)`
    fn parse_if(&mut self, line: usize) -> Result<AstNode, ParseError> {
        let condition = self.parse_expression()?;
        let condition_line = condition.line();
        let test = AstNode::test_expr(condition)
            .map_err(|e| ParseError::type_error(e, condition_line))?;

        let then_branch = self.parse_expression()?;
        let then_line = then_branch.line();
        let then_branch = AstNode::scaffold(NodeKind::ThanExpr, vec![then_branch], then_line);

        let else_branch = self.parse_expression()?;
        let else_line = else_branch.line();
        let else_branch = AstNode::scaffold(NodeKind::ElseExpr, vec![else_branch], else_line);

        self.expect_rparen()?;

        Ok(AstNode::scaffold(
            NodeKind::IfExpr,
            vec![test, then_branch, else_branch],
            line,
        ))
    }

    /// `(fun (ids...) body)`, with `(` and `fun` already consumed
    fn parse_fun_expr(&mut self, line: usize) -> Result<AstNode, ParseError> {
        let ids_line = self.expect(TokenKind::LParen)?.line;

        let mut ids = Vec::new();
        while self.check(TokenKind::Id)? {
            let id = self.expect_identifier()?;
            let id_line = id.line();
            ids.push(AstNode::scaffold(NodeKind::FunId, vec![id], id_line));
        }
        self.expect_rparen()?;
        let ids = Self::collect_list(NodeKind::FunIds, ids, ids_line);

        let body = self.parse_expression()?;
        let body_line = body.line();
        let body = AstNode::scaffold(NodeKind::FunBody, vec![body], body_line);

        self.expect_rparen()?;

        Ok(AstNode::scaffold(NodeKind::FunExpr, vec![ids, body], line))
    }

    /// Call arguments up to and including the closing `)`
    fn parse_fun_call(&mut self, callee: AstNode, line: usize) -> Result<AstNode, ParseError> {
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen)? {
            let param = self.parse_expression()?;
            let param_line = param.line();
            params.push(AstNode::scaffold(NodeKind::FunParam, vec![param], param_line));
        }
        let params_line = self.expect(TokenKind::RParen)?.line;
        let params = Self::collect_list(NodeKind::FunParams, params, params_line);

        Ok(AstNode::fun_call(callee, params, line))
    }

    /// Shape a possibly-empty list: `kind(nil)`, the lone item, or `kind(items...)`
    fn collect_list(kind: NodeKind, mut items: Vec<AstNode>, line: usize) -> AstNode {
        match items.len() {
            0 => AstNode::empty(kind, line),
            1 => items.remove(0),
            _ => {
                let line = items[0].line();
                AstNode::scaffold(kind, items, line)
            }
        }
    }
}
