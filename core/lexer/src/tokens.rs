pub use logos::Logos;
use logos::Span;

pub type Token = (RawToken, Span);
pub type TokenList = Vec<Token>;

pub fn tokenize(source: &str) -> TokenList {
    RawToken::lexer(source).spanned().collect()
}

#[derive(Logos, PartialEq, Clone, Debug)]
pub enum RawToken {
    // Keywords
    #[token("fn")]
    Function,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,

    // Operators
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,

    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,

    // Delimiters
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    ParenL,
    #[token(")")]
    ParenR,
    #[token("{")]
    BraceL,
    #[token("}")]
    BraceR,
    #[token("[")]
    BracketL,
    #[token("]")]
    BracketR,

    // Identifiers + literals
    #[regex(r"[_a-zA-Z]+", |lex| String::from(lex.slice()))]
    Ident(String),
    #[regex("[0-9]+", |lex| lex.slice().parse())]
    Int(i64),
    #[regex(r#""[^"]*""#, |lex| String::from(lex.slice()))]
    String(String),

    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[error]
    Illegal,

    EOF,
}

#[test]
fn test_symbols_and_keywords() {
    let tokens = tokenize("let add = fn(x, y) { x + y; };");
    let kinds: Vec<RawToken> = tokens.into_iter().map(|(tok, _)| tok).collect();
    assert_eq!(
        kinds,
        vec![
            RawToken::Let,
            RawToken::Ident("add".to_string()),
            RawToken::Assign,
            RawToken::Function,
            RawToken::ParenL,
            RawToken::Ident("x".to_string()),
            RawToken::Comma,
            RawToken::Ident("y".to_string()),
            RawToken::ParenR,
            RawToken::BraceL,
            RawToken::Ident("x".to_string()),
            RawToken::Plus,
            RawToken::Ident("y".to_string()),
            RawToken::Semicolon,
            RawToken::BraceR,
            RawToken::Semicolon,
        ]
    );
}

#[test]
fn test_two_char_operators() {
    let tokens = tokenize("1 == 2 != 3 = !4");
    let kinds: Vec<RawToken> = tokens.into_iter().map(|(tok, _)| tok).collect();
    assert_eq!(
        kinds,
        vec![
            RawToken::Int(1),
            RawToken::Equal,
            RawToken::Int(2),
            RawToken::NotEqual,
            RawToken::Int(3),
            RawToken::Assign,
            RawToken::Bang,
            RawToken::Int(4),
        ]
    );
}

#[test]
fn test_string_literal_keeps_quotes() {
    let tokens = tokenize(r#""hello world""#);
    assert_eq!(
        RawToken::String(r#""hello world""#.to_string()),
        tokens[0].0
    );
}

#[test]
fn test_illegal_bytes() {
    let tokens = tokenize("1 @ 2");
    let kinds: Vec<RawToken> = tokens.into_iter().map(|(tok, _)| tok).collect();
    assert_eq!(
        kinds,
        vec![RawToken::Int(1), RawToken::Illegal, RawToken::Int(2)]
    );
}

#[test]
fn test_unterminated_string_is_illegal() {
    let tokens = tokenize(r#""oops"#);
    assert!(tokens.iter().any(|(tok, _)| tok == &RawToken::Illegal));
}
