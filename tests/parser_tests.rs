// Integration tests for the mlisp front end

use mlisp::parser::{
    parse, tokenize, AstNode, BoolOperator, Child, NodeKind, NumOperator, ParseError, TokenKind,
    TypeError, ValueType, MAX_NESTING_DEPTH,
};

/// The node a single-statement program evaluates: program > stmt > X
fn statement_body(source: &str) -> AstNode {
    let program = parse(source).expect("Parsing failed");
    assert_eq!(program.kind(), NodeKind::Program);

    let stmt = program.child_nodes().next().expect("program has no statement");
    assert_eq!(stmt.kind(), NodeKind::Stmt);
    let body = stmt.child_nodes().next().expect("empty statement").clone();
    body
}

/// Strip the `expr` wrapper of an expression statement
fn expression(source: &str) -> AstNode {
    let expr = statement_body(source);
    assert_eq!(expr.kind(), NodeKind::Expr);
    let inner = expr.child_nodes().next().expect("empty expr").clone();
    inner
}

fn type_error(source: &str) -> TypeError {
    match parse(source) {
        Err(ParseError::Type { source, .. }) => source,
        other => panic!("expected a type error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_lexing_is_deterministic() {
    let sources = [
        "(define foo (fun (x y) (if (not y) 1 (* x (foo (- x 1))))))",
        "(print-num (mod 10 -3))\n(print-bool (or #t #f))",
        "a-b-c 12 #f",
    ];

    for source in sources {
        let first = tokenize(source).unwrap();
        let second = tokenize(source).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_simple_addition() {
    let add = expression("(+ 1 2)");
    assert_eq!(add.kind(), NodeKind::NumOp(NumOperator::Add));
    assert_eq!(add.value_type(), Some(ValueType::Number));

    let operands: Vec<_> = add.child_nodes().collect();
    assert_eq!(operands.len(), 2);
    for operand in operands {
        assert_eq!(operand.kind(), NodeKind::Expr);
        assert_eq!(operand.value_type(), Some(ValueType::Number));
    }
}

#[test]
fn test_not_is_boolean() {
    let not = expression("(not #t)");
    assert_eq!(not.kind(), NodeKind::BoolOp(BoolOperator::Not));
    assert_eq!(not.value_type(), Some(ValueType::Boolean));
}

#[test]
fn test_number_operator_rejects_boolean() {
    let err = parse("(+ 3 (not #t))").unwrap_err();
    assert_eq!(err.line(), 1);
    assert_eq!(
        err.to_string(),
        "Type error, line 1: +: expect 'number' but got 'boolean'"
    );
}

#[test]
fn test_boolean_operator_rejects_number() {
    let err = type_error("(and (or #t #f) (+ 1 2))");
    assert!(matches!(err, TypeError::Mismatch { ref context, .. } if context == "and"));
}

#[test]
fn test_if_requires_boolean_test() {
    let err = type_error("(if 1 2 3)");
    assert_eq!(err.to_string(), "if test expr: expect 'boolean' but got 'number'");

    let if_expr = expression("(if #t 2 (+ 1 2))");
    assert_eq!(if_expr.kind(), NodeKind::IfExpr);
    let parts: Vec<NodeKind> = if_expr.child_nodes().map(|n| n.kind()).collect();
    assert_eq!(
        parts,
        vec![NodeKind::TestExpr, NodeKind::ThanExpr, NodeKind::ElseExpr]
    );
}

#[test]
fn test_integer_range() {
    assert!(parse("2147483647").is_ok());
    assert!(parse("-2147483648").is_ok());

    let err = parse("2147483648").unwrap_err();
    assert_eq!(
        err,
        ParseError::Overflow {
            literal: "2147483648".to_string(),
            line: 1
        }
    );
}

#[test]
fn test_illegal_character() {
    let err = parse("a 1 ?").unwrap_err();
    assert_eq!(err, ParseError::Lex { ch: '?', line: 1 });
    assert_eq!(err.to_string(), "Illegal character (?), line 1");
}

#[test]
fn test_recursive_definition() {
    let def = statement_body("(define foo (fun (x y) (if (not y) 1 (* x (foo (- x 1))))))");
    assert_eq!(def.kind(), NodeKind::DefStmt);

    let children: Vec<_> = def.child_nodes().collect();
    assert_eq!(children.len(), 2);

    let var = children[0];
    assert_eq!(var.kind(), NodeKind::Var);
    let name = var.child_nodes().next().unwrap();
    assert_eq!(name.leaves().collect::<Vec<_>>(), vec!["foo"]);

    let value = children[1];
    assert_eq!(value.kind(), NodeKind::Expr);
    let fun = value.child_nodes().next().unwrap();
    assert_eq!(fun.kind(), NodeKind::FunExpr);

    let fun_parts: Vec<_> = fun.child_nodes().collect();
    assert_eq!(fun_parts[0].kind(), NodeKind::FunIds);
    assert_eq!(fun_parts[0].child_nodes().count(), 2);
    assert_eq!(fun_parts[1].kind(), NodeKind::FunBody);
}

#[test]
fn test_multiple_statements_form_a_list() {
    let program = parse("(define x 5)\n(print-num (* x 2))\n(print-bool #t)").unwrap();
    let list = program.child_nodes().next().unwrap();
    assert_eq!(list.kind(), NodeKind::StmtList);

    let lines: Vec<usize> = list.child_nodes().map(|stmt| stmt.line()).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_print_keeps_keyword_leaf() {
    let print = statement_body("(PRINT-NUM 7)");
    assert_eq!(print.kind(), NodeKind::PrintNum);
    assert_eq!(print.children()[0], Child::Leaf("PRINT-NUM".to_string()));
}

#[test]
fn test_identifiers_fit_both_contexts() {
    assert!(parse("(+ x (f 1))").is_ok());
    assert!(parse("(and x (f 1))").is_ok());
    assert!(parse("(if (g) x y)").is_ok());
}

#[test]
fn test_expr_list_type() {
    let add = expression("(+ 1 x 3)");
    let tail = add.child_nodes().nth(1).unwrap();
    assert_eq!(tail.kind(), NodeKind::ExprList);
    assert_eq!(tail.value_type(), Some(ValueType::Number));

    let and = expression("(and a b c)");
    let tail = and.child_nodes().nth(1).unwrap();
    assert_eq!(tail.value_type(), Some(ValueType::Unconstrained));

    let err = type_error("(+ 1 2 #t)");
    assert_eq!(
        err.to_string(),
        "all arguments must be of the same type, got number, boolean"
    );
}

#[test]
fn test_expr_list_type_ignores_operand_order() {
    for source in ["(+ 1 x #t)", "(+ 1 #t x)"] {
        let err = type_error(source);
        assert_eq!(err.to_string(), "+: expect 'number' but got 'boolean'", "for {}", source);
    }
}

#[test]
fn test_empty_call_has_nil_params() {
    let call = expression("((fun () 42))");
    assert_eq!(call.kind(), NodeKind::FunCall);
    assert_eq!(call.value_type(), Some(ValueType::Unconstrained));

    let params = call.child_nodes().nth(1).unwrap();
    assert_eq!(params.kind(), NodeKind::FunParams);
    assert_eq!(params.leaves().collect::<Vec<_>>(), vec!["nil"]);
}

#[test]
fn test_syntax_errors() {
    let cases = [
        ("", "EOF"),
        ("(+ 1)", ")"),
        ("(define 1 2)", "1"),
        ("(+ 1 2", "EOF"),
        ("(print-num (define x 1))", "define"),
    ];

    for (source, found) in cases {
        match parse(source) {
            Err(ParseError::Syntax { found: actual, .. }) => {
                assert_eq!(actual, found, "for {:?}", source)
            }
            other => panic!("expected a syntax error for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_error_lines() {
    let err = parse("(define x 1)\n\n(+ x #f)").unwrap_err();
    assert_eq!(err.line(), 3);

    let err = parse("1\n2\n#x").unwrap_err();
    assert_eq!(err, ParseError::Lex { ch: '#', line: 3 });
}

#[test]
fn test_token_stream() {
    let kinds: Vec<TokenKind> = tokenize("(print-bool (> 1 -2))")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LParen,
            TokenKind::PrintBool,
            TokenKind::LParen,
            TokenKind::Greater,
            TokenKind::Number(1),
            TokenKind::Number(-2),
            TokenKind::RParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_demo_programs_parse() {
    let demos = [
        include_str!("../demos/factorial.lsp"),
        include_str!("../demos/logic.lsp"),
        include_str!("../demos/closures.lsp"),
    ];

    for source in demos {
        let result = parse(source);
        assert!(result.is_ok(), "Parsing failed: {:?}", result);
    }
}

#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 10_000;
    let source = format!("{}#t{}", "(not ".repeat(depth), ")".repeat(depth));

    let err = parse(&source).unwrap_err();
    assert_eq!(err, ParseError::TooDeep { line: 1 });
    assert_eq!(err.to_string(), "Nesting too deep, line 1");
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let depth = MAX_NESTING_DEPTH;
    let source = format!("(print-num {}1{})", "(+ 1 ".repeat(depth), ")".repeat(depth));
    assert!(parse(&source).is_ok());

    let lines = "(not\n".repeat(MAX_NESTING_DEPTH + 1);
    let source = format!("{}#t{}", lines, ")".repeat(MAX_NESTING_DEPTH + 1));
    let err = parse(&source).unwrap_err();
    assert_eq!(err, ParseError::TooDeep { line: MAX_NESTING_DEPTH + 1 });
}
