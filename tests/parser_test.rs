use popcorn::ast::{
    BinaryOperator, Expression, LogicalOperator, Program, Property, Statement, UnaryOperator,
};
use popcorn::lexer::TokenKind;
use popcorn::parser::{produce_ast, ParserErrorKind};
use serde_json::json;

fn parse(input: &str) -> Program {
    produce_ast(input).expect("Input should parse cleanly")
}

fn parse_error(input: &str) -> ParserErrorKind {
    produce_ast(input).expect_err("Input should fail to parse").kind
}

fn expr(input: &str) -> Expression {
    let program = parse(input);
    assert_eq!(program.body.len(), 1, "Expected a single statement");
    match program.body.into_iter().next() {
        Some(Statement::Expression { expr }) => expr,
        other => panic!("Expected an expression statement but got {other:?}"),
    }
}

fn number(value: f64) -> Expression {
    Expression::NumericLiteral { value }
}

fn ident(name: &str) -> Expression {
    Expression::Identifier { name: name.into() }
}

#[test]
fn smoke_test() {
    assert_eq!(parse(""), Program { body: vec![] });
    assert_eq!(parse("\n\n\n"), Program { body: vec![] });
}

#[test]
fn let_declaration_with_initializer() {
    let program = parse("let x = 10 + 20\n");
    assert_eq!(
        program,
        Program {
            body: vec![Statement::VariableDeclaration {
                name: "x".into(),
                is_constant: false,
                initial: Some(Expression::Binary {
                    left: Box::new(number(10.0)),
                    operator: BinaryOperator::Add,
                    right: Box::new(number(20.0)),
                }),
            }],
        }
    );
}

#[test]
fn let_declaration_without_initializer() {
    let program = parse("let x\n");
    assert_eq!(
        program.body,
        vec![Statement::VariableDeclaration {
            name: "x".into(),
            is_constant: false,
            initial: None,
        }]
    );
}

#[test]
fn const_requires_an_initializer() {
    assert_eq!(
        parse_error("const x\n"),
        ParserErrorKind::MissingConstInitializer
    );
    let program = parse("const x = 1\n");
    assert_eq!(
        program.body,
        vec![Statement::VariableDeclaration {
            name: "x".into(),
            is_constant: true,
            initial: Some(number(1.0)),
        }]
    );
}

#[test]
fn missing_trailing_newline_is_allowed() {
    let program = parse("let x = 1");
    assert_eq!(program.body.len(), 1);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        expr("1 + 2 * 3"),
        Expression::Binary {
            left: Box::new(number(1.0)),
            operator: BinaryOperator::Add,
            right: Box::new(Expression::Binary {
                left: Box::new(number(2.0)),
                operator: BinaryOperator::Multiply,
                right: Box::new(number(3.0)),
            }),
        }
    );
}

#[test]
fn addition_binds_tighter_than_comparison() {
    assert_eq!(
        expr("1 + 2 < 4"),
        Expression::Binary {
            left: Box::new(Expression::Binary {
                left: Box::new(number(1.0)),
                operator: BinaryOperator::Add,
                right: Box::new(number(2.0)),
            }),
            operator: BinaryOperator::LessThan,
            right: Box::new(number(4.0)),
        }
    );
}

#[test]
fn comparison_binds_tighter_than_logical() {
    assert_eq!(
        expr("1 < 2 && 3 < 4"),
        Expression::Logical {
            left: Box::new(Expression::Binary {
                left: Box::new(number(1.0)),
                operator: BinaryOperator::LessThan,
                right: Box::new(number(2.0)),
            }),
            operator: LogicalOperator::And,
            right: Box::new(Expression::Binary {
                left: Box::new(number(3.0)),
                operator: BinaryOperator::LessThan,
                right: Box::new(number(4.0)),
            }),
        }
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(
        expr("a = b = 1"),
        Expression::Assignment {
            assignee: Box::new(ident("a")),
            value: Box::new(Expression::Assignment {
                assignee: Box::new(ident("b")),
                value: Box::new(number(1.0)),
            }),
        }
    );
}

#[test]
fn unary_operators() {
    assert_eq!(
        expr("-5"),
        Expression::Unary {
            operator: UnaryOperator::Minus,
            operand: Box::new(number(5.0)),
        }
    );
    assert_eq!(
        expr("!x"),
        Expression::Unary {
            operator: UnaryOperator::Bang,
            operand: Box::new(ident("x")),
        }
    );
    // Unary plus produces no node at all.
    assert_eq!(expr("+5"), number(5.0));
}

#[test]
fn postfix_operators_chain_left_to_right() {
    assert_eq!(
        expr("a.b[0](x)"),
        Expression::Call {
            callee: Box::new(Expression::Member {
                object: Box::new(Expression::Member {
                    object: Box::new(ident("a")),
                    property: Box::new(ident("b")),
                    computed: false,
                }),
                property: Box::new(number(0.0)),
                computed: true,
            }),
            arguments: vec![ident("x")],
        }
    );
}

#[test]
fn parenthesized_expressions_leave_no_node() {
    assert_eq!(
        expr("(1 + 2) * 3"),
        Expression::Binary {
            left: Box::new(Expression::Binary {
                left: Box::new(number(1.0)),
                operator: BinaryOperator::Add,
                right: Box::new(number(2.0)),
            }),
            operator: BinaryOperator::Multiply,
            right: Box::new(number(3.0)),
        }
    );
}

#[test]
fn array_literals() {
    assert_eq!(expr("[]"), Expression::ArrayLiteral { elements: vec![] });
    assert_eq!(
        expr("[1, 2,]"),
        Expression::ArrayLiteral {
            elements: vec![number(1.0), number(2.0)],
        }
    );
}

#[test]
fn object_literals_with_full_and_shorthand_properties() {
    assert_eq!(
        expr("{a: 1, b}"),
        Expression::ObjectLiteral {
            properties: vec![
                Property {
                    key: "a".into(),
                    value: Some(number(1.0)),
                },
                Property {
                    key: "b".into(),
                    value: None,
                },
            ],
        }
    );
}

#[test]
fn object_literal_followed_by_member_access() {
    assert_eq!(
        expr("{a: 1}.a"),
        Expression::Member {
            object: Box::new(Expression::ObjectLiteral {
                properties: vec![Property {
                    key: "a".into(),
                    value: Some(number(1.0)),
                }],
            }),
            property: Box::new(ident("a")),
            computed: false,
        }
    );
}

#[test]
fn string_literal_drops_the_quotes() {
    assert_eq!(
        expr("\"hello\""),
        Expression::StringLiteral {
            value: "hello".into(),
        }
    );
}

#[test]
fn function_declaration() {
    let program = parse("fn add(a, b) {\n    pop a + b\n}\n");
    assert_eq!(
        program.body,
        vec![Statement::FunctionDeclaration {
            name: "add".into(),
            parameters: vec!["a".into(), "b".into()],
            body: vec![Statement::Return {
                value: Some(Expression::Binary {
                    left: Box::new(ident("a")),
                    operator: BinaryOperator::Add,
                    right: Box::new(ident("b")),
                }),
            }],
        }]
    );
}

#[test]
fn bare_return_at_end_of_block() {
    let program = parse("fn noop() {\n    pop}\n");
    assert_eq!(
        program.body,
        vec![Statement::FunctionDeclaration {
            name: "noop".into(),
            parameters: vec![],
            body: vec![Statement::Return { value: None }],
        }]
    );
}

#[test]
fn return_value_must_start_with_identifier_number_or_parenthesis() {
    assert_eq!(
        parse_error("fn f() {\n    pop true\n}\n"),
        ParserErrorKind::InvalidReturnValue(TokenKind::KeywordTrue)
    );
    // A newline straight after `pop` is not a bare return.
    assert_eq!(
        parse_error("fn f() {\n    pop\n}\n"),
        ParserErrorKind::InvalidReturnValue(TokenKind::Newline)
    );
}

#[test]
fn function_parameters_must_be_identifiers() {
    assert_eq!(
        parse_error("fn f(1) {}\n"),
        ParserErrorKind::NonIdentifierParameter
    );
}

#[test]
fn dot_property_must_be_an_identifier() {
    assert_eq!(parse_error("a.1\n"), ParserErrorKind::NonIdentifierProperty);
}

#[test]
fn unclosed_parenthesis_reports_the_expected_token() {
    assert_eq!(
        parse_error("(1"),
        ParserErrorKind::UnexpectedToken {
            actual: TokenKind::Eof,
            expected: TokenKind::RightParenthesis,
        }
    );
}

#[test]
fn two_expressions_on_one_line_is_an_error() {
    assert_eq!(
        parse_error("1 2\n"),
        ParserErrorKind::UnterminatedStatement(TokenKind::NumericLiteral)
    );
}

#[test]
fn null_is_not_an_expression() {
    assert_eq!(
        parse_error("let x = null\n"),
        ParserErrorKind::NonExpression(TokenKind::KeywordNull)
    );
}

#[test]
fn lexical_errors_surface_through_the_parser() {
    let error = produce_ast("let x = @\n").expect_err("Should fail");
    assert!(matches!(error.kind, ParserErrorKind::LexicalError(_)));
    assert_eq!(error.line, 1);
}

#[test]
fn parsing_is_deterministic() {
    let source = "let x = 1\nfn f(a) {\n    pop a\n}\nf(x)\n";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn serialized_tree_is_tagged_with_node_kinds() {
    let program = parse("pop x\n");
    let tree = serde_json::to_value(&program).expect("Program serializes");
    assert_eq!(
        tree,
        json!({
            "kind": "Program",
            "body": [{
                "kind": "ReturnStatement",
                "value": {
                    "kind": "IdentifierExpr",
                    "name": "x",
                },
            }],
        })
    );
}
