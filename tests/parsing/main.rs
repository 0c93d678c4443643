use std::cell::RefCell;

use rpnscript::{
    base::{SilentHandler, VoidHandler},
    lexical::{
        lexer::Lexer,
        token::{Token, TokenKind},
    },
    syntax::{
        ast::AstNode,
        error::Error,
        grammar::{NonTerminal, Symbol, Terminal},
        parser::{ParseObserver, Parser},
    },
};

fn tokens_of(line: &str) -> Vec<Token> {
    Lexer::new(line, 0).tokenize().expect("lexing failed")
}

fn ast_of(line: &str) -> AstNode {
    Parser::new(&tokens_of(line)).parse().expect("parsing failed")
}

/// Renders the leaves back to their source spelling, left to right.
fn leaf_values(root: &AstNode) -> Vec<String> {
    root.leaves()
        .iter()
        .map(|leaf| {
            leaf.value().clone().unwrap_or_else(|| match leaf.symbol() {
                Symbol::Terminal(Terminal::LeftParenthesis) => "(".to_string(),
                Symbol::Terminal(Terminal::RightParenthesis) => ")".to_string(),
                other => other.as_str().to_string(),
            })
        })
        .collect()
}

#[test]
fn parses_binary_expression() {
    let root = ast_of("(3 4 +)");
    assert_eq!(root.symbol(), NonTerminal::Start.into());

    let expr = &root.children()[0];
    assert_eq!(expr.symbol(), NonTerminal::Expr.into());
    assert_eq!(
        expr.children()
            .iter()
            .map(|child| child.symbol())
            .collect::<Vec<_>>(),
        [
            Terminal::LeftParenthesis.into(),
            NonTerminal::Rpn.into(),
            Terminal::RightParenthesis.into(),
        ]
    );

    let rpn = &expr.children()[1];
    assert_eq!(
        rpn.children()
            .iter()
            .map(|child| child.symbol())
            .collect::<Vec<_>>(),
        [NonTerminal::Operand.into(), NonTerminal::RpnExpr.into()]
    );

    assert_eq!(leaf_values(&root), ["(", "3", "4", "+", ")"]);
}

#[test]
fn parses_bare_mem_reference() {
    let root = ast_of("(MEM)");

    let expr = &root.children()[0];
    let rpn = &expr.children()[1];
    assert_eq!(rpn.symbol(), NonTerminal::Rpn.into());
    assert_eq!(rpn.children().len(), 1);

    let leaves = root.leaves();
    let mem = leaves[1];
    assert_eq!(mem.symbol(), Terminal::Mem.into());
    assert_eq!(mem.value().as_deref(), Some("MEM"));
}

#[test]
fn parses_unary_keyword_operator() {
    let root = ast_of("(3 RES)");

    assert_eq!(leaf_values(&root), ["(", "3", "RES", ")"]);

    let rpn_expr = &root.children()[0].children()[1].children()[1];
    assert_eq!(rpn_expr.symbol(), NonTerminal::RpnExpr.into());
    assert_eq!(
        rpn_expr.children()[0].symbol(),
        NonTerminal::UnaryOperator.into()
    );
}

#[test]
fn parses_nested_expressions() {
    let line = "((1 2 +) 3 *)";
    let tokens = tokens_of(line);
    let root = Parser::new(&tokens).parse().expect("parsing failed");

    let token_values: Vec<_> = tokens.iter().map(|token| token.value().clone()).collect();
    assert_eq!(leaf_values(&root), token_values);
}

#[test]
fn leaf_sequence_round_trips() {
    for line in ["(3 4 +)", "(MEM)", "(3 RES)", "(-1.5 (2 MEM) %)", "((1 2 +) (3 4 -) *)"] {
        let tokens = tokens_of(line);
        let root = Parser::new(&tokens).parse().expect("parsing failed");

        let token_values: Vec<_> = tokens.iter().map(|token| token.value().clone()).collect();
        assert_eq!(leaf_values(&root), token_values, "line {line}");
    }
}

#[test]
fn missing_parentheses_fail_at_the_first_token() {
    let tokens = tokens_of("3 4 +");
    let Err(Error::MissingProduction(error)) = Parser::new(&tokens).parse() else {
        panic!("expected a missing production error");
    };

    assert_eq!(error.non_terminal, NonTerminal::Start);
    assert_eq!(error.expected, [Terminal::LeftParenthesis]);

    let found = error.found.expect("offending token");
    assert_eq!(found.value(), "3");
    assert_eq!((found.row(), found.column()), (0, 0));
}

#[test]
fn missing_rpn_tail_reports_the_sorted_expected_set() {
    let tokens = tokens_of("(3)");
    let Err(Error::MissingProduction(error)) = Parser::new(&tokens).parse() else {
        panic!("expected a missing production error");
    };

    assert_eq!(error.non_terminal, NonTerminal::RpnExpr);
    assert_eq!(
        error.expected,
        [
            Terminal::Do,
            Terminal::Else,
            Terminal::For,
            Terminal::If,
            Terminal::LeftParenthesis,
            Terminal::Mem,
            Terminal::Number,
            Terminal::Res,
            Terminal::Then,
        ]
    );
}

#[test]
fn trailing_input_is_rejected() {
    let tokens = tokens_of("(3 4 +) 5");
    let Err(Error::UnexpectedToken(error)) = Parser::new(&tokens).parse() else {
        panic!("expected an unexpected token error");
    };

    assert_eq!(error.expected, Terminal::EndOfInput);
    assert_eq!(error.found.map(|token| token.value().clone()), Some("5".to_string()));
}

#[test]
fn missing_closing_parenthesis_is_rejected() {
    let tokens = tokens_of("(3 4 +");
    let Err(Error::UnexpectedToken(error)) = Parser::new(&tokens).parse() else {
        panic!("expected an unexpected token error");
    };

    assert_eq!(error.expected, Terminal::RightParenthesis);
    assert_eq!(error.found, None);
}

#[test]
fn empty_token_sequence_is_rejected() {
    let Err(Error::MissingProduction(error)) = Parser::new(&[]).parse() else {
        panic!("expected a missing production error");
    };

    assert_eq!(error.non_terminal, NonTerminal::Start);
    assert_eq!(error.found, None);
}

#[test]
fn error_tokens_never_parse() {
    let tokens = vec![Token::new("@", TokenKind::Error, 0, 0)];
    let Err(Error::InvalidToken(error)) = Parser::new(&tokens).parse() else {
        panic!("expected an invalid token error");
    };

    assert_eq!(error.token.value(), "@");
}

#[test]
fn externally_built_do_keyword_parses() {
    // the lexer never produces `DO`, but the grammar accepts it
    let tokens = vec![
        Token::new("(", TokenKind::LeftParenthesis, 0, 0),
        Token::new("3", TokenKind::IntegerNumber, 0, 1),
        Token::new("DO", TokenKind::Keyword, 0, 3),
        Token::new(")", TokenKind::RightParenthesis, 0, 5),
    ];

    let root = Parser::new(&tokens).parse().expect("parsing failed");
    assert_eq!(leaf_values(&root), ["(", "3", "DO", ")"]);
}

#[test]
fn missing_operator_is_rejected() {
    let tokens = tokens_of("(3 4)");
    let Err(Error::MissingProduction(error)) = Parser::new(&tokens).parse() else {
        panic!("expected a missing production error");
    };

    assert_eq!(error.non_terminal, NonTerminal::Operator);
    assert_eq!(error.expected, [Terminal::Operator]);
}

#[test]
fn ast_display_is_indented() {
    let rendered = ast_of("(MEM)").to_string();

    assert!(rendered.starts_with('S'));
    assert!(rendered.contains("MEM(MEM)"));
}

#[derive(Debug, Default)]
struct Recorder {
    productions: RefCell<Vec<String>>,
}

impl ParseObserver for Recorder {
    fn production_applied(&self, non_terminal: NonTerminal, _lookahead: Terminal, _rhs: &[Symbol]) {
        self.productions
            .borrow_mut()
            .push(non_terminal.as_str().to_string());
    }
}

#[test]
fn observer_sees_productions_in_derivation_order() {
    let tokens = tokens_of("(MEM)");
    let recorder = Recorder::default();

    Parser::new(&tokens)
        .parse_with_observer(&recorder)
        .expect("parsing failed");

    assert_eq!(*recorder.productions.borrow(), ["S", "Expr", "RPN"]);
}

#[test]
fn parse_lines_isolates_failures() {
    let results = rpnscript::parse_lines(&VoidHandler, ["(3 4 +)", "3 4 +", "(MEM)"]);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn handler_receives_reported_errors() {
    let handler = SilentHandler::new();

    assert!(rpnscript::parse(&handler, "(3 @ 4)", 0).is_err());
    assert!(handler.has_received());

    let handler = SilentHandler::new();
    assert!(rpnscript::parse(&handler, "(3 4 +)", 0).is_ok());
    assert!(!handler.has_received());
}

#[test]
fn syntax_error_display_names_expected_and_found() {
    let tokens = tokens_of("3 4 +");
    let error = Parser::new(&tokens).parse().expect_err("parsing succeeded");

    let rendered = error.to_string();
    assert!(rendered.contains("LEFT_PARENTHESIS"));
    assert!(rendered.contains("INTEGER_NUMBER"));
}
