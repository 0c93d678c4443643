use rpnscript::lexical::{
    lexer::Lexer,
    token::{KeywordKind, Token, TokenKind},
    Error,
};

fn tokens_of(line: &str) -> Vec<Token> {
    Lexer::new(line, 0).tokenize().expect("lexing failed")
}

fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|token| token.value().as_str()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(Token::kind).collect()
}

#[test]
fn tokenizes_binary_expression() {
    let tokens = tokens_of("(3 4 +)");

    assert_eq!(values(&tokens), ["(", "3", "4", "+", ")"]);
    assert_eq!(
        kinds(&tokens),
        [
            TokenKind::LeftParenthesis,
            TokenKind::IntegerNumber,
            TokenKind::IntegerNumber,
            TokenKind::Operator,
            TokenKind::RightParenthesis,
        ]
    );
    assert_eq!(
        tokens.iter().map(Token::column).collect::<Vec<_>>(),
        [0, 1, 3, 5, 6]
    );
    assert!(tokens.iter().all(|token| token.row() == 0));
}

#[test]
fn empty_line_yields_no_tokens() {
    assert_eq!(tokens_of(""), []);
}

#[test]
fn whitespace_only_line_yields_no_tokens() {
    assert_eq!(tokens_of(" \t  "), []);
}

#[test]
fn sign_is_folded_into_numeric_literals() {
    let tokens = tokens_of("-12 - -0.5 -.5");

    assert_eq!(values(&tokens), ["-12", "-", "-0.5", "-.5"]);
    assert_eq!(
        kinds(&tokens),
        [
            TokenKind::IntegerNumber,
            TokenKind::Operator,
            TokenKind::RealNumber,
            TokenKind::RealNumber,
        ]
    );
}

#[test]
fn all_operators_tokenize() {
    let tokens = tokens_of("+ - * / % | ^");

    assert_eq!(values(&tokens), ["+", "-", "*", "/", "%", "|", "^"]);
    assert!(kinds(&tokens)
        .iter()
        .all(|&kind| kind == TokenKind::Operator));
}

#[test]
fn keywords_fold_case() {
    let tokens = tokens_of("(mem Res FOR)");

    assert_eq!(values(&tokens), ["(", "MEM", "RES", "FOR", ")"]);
    assert_eq!(tokens[1].kind(), TokenKind::Keyword);
    assert_eq!(tokens[1].keyword(), Some(KeywordKind::Mem));
}

#[test]
fn second_dot_terminates_the_literal() {
    let Err(Error::InvalidCharacter(error)) = Lexer::new("12.3.4", 0).tokenize() else {
        panic!("expected an invalid character error");
    };

    assert_eq!(error.character, '.');
    assert_eq!(error.column, 4);
    assert_eq!(values(&error.tokens), ["12.3", "."]);
    assert_eq!(
        kinds(&error.tokens),
        [TokenKind::RealNumber, TokenKind::Error]
    );
}

#[test]
fn invalid_character_reports_position() {
    let Err(Error::InvalidCharacter(error)) = Lexer::new("(3 @ 4)", 2).tokenize() else {
        panic!("expected an invalid character error");
    };

    assert_eq!(error.character, '@');
    assert_eq!(error.row, 2);
    assert_eq!(error.column, 3);
    assert_eq!(values(&error.tokens), ["(", "3", "@"]);
    assert_eq!(error.tokens.last().map(Token::kind), Some(TokenKind::Error));
}

#[test]
fn unknown_word_reports_position_and_suggestion() {
    let Err(Error::UnknownWord(error)) = Lexer::new("(3 memo)", 0).tokenize() else {
        panic!("expected an unknown word error");
    };

    assert_eq!(error.word, "MEMO");
    assert_eq!(error.column, 3);
    assert_eq!(error.suggestion(), Some(KeywordKind::Mem));
    assert_eq!(values(&error.tokens), ["(", "3", "MEMO"]);
}

#[test]
fn do_is_not_a_recognized_keyword() {
    let result = Lexer::new("(3 DO)", 0).tokenize();

    assert!(matches!(result, Err(Error::UnknownWord(_))));
}

#[test]
fn error_token_accompanies_every_failure() {
    for line in ["(3 @ 4)", "12.3.4", "(3 memo)"] {
        let error = Lexer::new(line, 0).tokenize().expect_err("lexing succeeded");
        assert_eq!(error.tokens().last().map(Token::kind), Some(TokenKind::Error));
    }

    for line in ["", "(3 4 +)", "(MEM)"] {
        let tokens = tokens_of(line);
        assert!(tokens.iter().all(|token| token.kind() != TokenKind::Error));
    }
}

#[test]
fn relexing_is_idempotent() {
    for line in ["(3 4 +)", "(1.5 MEM)", ""] {
        assert_eq!(tokens_of(line), tokens_of(line));
    }
}

#[test]
fn tokens_report_their_line_number() {
    let tokens = Lexer::new("(1 2 +)", 7).tokenize().expect("lexing failed");

    assert!(tokens.iter().all(|token| token.row() == 7));
}
