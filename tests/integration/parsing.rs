//! Integration tests for lexer + parser
//! Tests that token streams turn into the expected commands

use termish_ast::{Argument, BinaryOperator, CommandKind, Expression, ShellError, UnaryOperator};
use termish_lexer::{Lexer, TokenKind};
use termish_parser::{parse, Parser, BUILTINS};

fn only_expression(line: &str) -> Expression {
    let mut commands = parse(line).unwrap();
    assert_eq!(commands.len(), 1);
    match commands.remove(0).parameters.remove(0) {
        Argument::Expression(expression) => expression,
        other => panic!("Expected expression argument, got {other:?}"),
    }
}

#[test]
fn test_every_builtin_parses_by_name() {
    let lines = [
        "help",
        "echo 1",
        "clear",
        "user \"name\"",
        "stack list",
        "motd",
        "cd",
        "test",
        "yn",
        "maybe",
        "license",
    ];
    assert_eq!(lines.len(), BUILTINS.len());

    for (line, spec) in lines.iter().zip(BUILTINS) {
        let commands = parse(line).unwrap();
        assert_eq!(commands.len(), 1, "{line}");
        assert_eq!(commands[0].name, spec.name);
        assert_eq!(commands[0].kind, spec.kind);
    }
}

#[test]
fn test_statements_split_on_semicolons() {
    let commands = parse("x = 1; stack get x;echo $x").unwrap();
    let kinds: Vec<CommandKind> = commands.iter().map(|command| command.kind).collect();
    assert_eq!(
        kinds,
        vec![CommandKind::Assign, CommandKind::Stack, CommandKind::Echo]
    );
}

#[test]
fn test_additive_binds_loosest() {
    let expression = only_expression("echo 2 + 3 * 4");
    assert_eq!(
        expression,
        Expression::binary(
            BinaryOperator::Add,
            Expression::Number(2.0),
            Expression::binary(
                BinaryOperator::Multiply,
                Expression::Number(3.0),
                Expression::Number(4.0),
            ),
        )
    );
}

#[test]
fn test_compound_assignment_desugars() {
    let commands = parse("$total += $n").unwrap();
    assert_eq!(commands[0].kind, CommandKind::Assign);
    assert_eq!(
        commands[0].parameters,
        vec![
            Argument::Word("total".to_string()),
            Argument::Expression(Expression::binary(
                BinaryOperator::Add,
                Expression::Variable("total".to_string()),
                Expression::Variable("n".to_string()),
            )),
        ]
    );
}

#[test]
fn test_postfix_step_statement() {
    let commands = parse("count++").unwrap();
    assert_eq!(commands[0].kind, CommandKind::Evaluate);
    assert_eq!(
        commands[0].parameters,
        vec![Argument::Expression(Expression::unary(
            UnaryOperator::Increment,
            Expression::Variable("count".to_string()),
            false,
        ))]
    );
}

#[test]
fn test_nested_command_is_a_call() {
    let expression = only_expression("echo (stack get x) + 1");
    let Expression::Binary { left, .. } = expression else {
        panic!("Expected binary expression");
    };
    match *left {
        Expression::Call(command) => {
            assert_eq!(command.kind, CommandKind::Stack);
            assert_eq!(command.parameters.len(), 2);
        }
        other => panic!("Expected nested command, got {other:?}"),
    }
}

#[test]
fn test_unknown_command_is_distinct() {
    let err = parse("frobnicate").unwrap_err();
    assert!(matches!(err, ShellError::UnknownCommand { ref name, .. } if name == "frobnicate"));
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn test_lexer_error_propagation() {
    let err = parse("echo \"abc").unwrap_err();
    assert!(matches!(err, ShellError::Lex { offset: 5, .. }));

    let err = parse("echo 1 # 2").unwrap_err();
    assert!(matches!(err, ShellError::Lex { .. }));
}

#[test]
fn test_syntax_error_rejects_whole_line() {
    let err = parse("x = 1; echo (1 + 2").unwrap_err();
    assert!(matches!(err, ShellError::Syntax { .. }));
    assert!(err.offset().is_some());
}

#[test]
fn test_path_statement_produces_warning() {
    let mut parser = Parser::new("echo 1; ~/bin/tool").unwrap();
    let commands = parser.parse().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(parser.warnings(), ["The filesystem hasn't been implemented yet"]);
}

#[test]
fn test_lexer_ends_with_eol() {
    let tokens = Lexer::new("  stack set x 5   ").tokenize().unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::Number,
            TokenKind::EoL,
        ]
    );
    assert_eq!(tokens[0].offset(), 2);
}
