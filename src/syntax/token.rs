//! Token definitions for the Vision language.
//!
//! Tokens are produced by the logos derive macro. Whitespace and comments
//! are skipped. Type-level identifiers (`PascalCase`) and member-level
//! identifiers (`snake_case`) are distinct token kinds, so casing is settled
//! here and never re-checked downstream.

use logos::Logos;

use super::span::LineCursor;
use super::span::Span;
use super::SyntaxError;

/// All tokens of the Vision language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("fun")]
    Fun,

    // Identifiers
    #[regex(r"[A-Z][A-Za-z0-9]*", priority = 3)]
    PascalCase,
    #[regex(r"[a-z][a-z0-9_]*", priority = 3)]
    SnakeCase,
    /// Any other identifier shape (`MAX_SIZE`, `_tmp`). Never names a
    /// declaration, but may appear in skipped bodies.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Word,

    // Literals
    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,

    // Anything operator-like inside function bodies
    #[regex(r"[-+*/%=!&|^~@#$]+")]
    Operator,

    // Any other visible character, so body contents never stop the lexer
    #[regex(r"[^\s]", priority = 0)]
    Other,
}

impl Token {
    /// Human-readable description used in syntax error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Package => "'package'",
            Token::Class => "'class'",
            Token::Interface => "'interface'",
            Token::Fun => "'fun'",
            Token::PascalCase => "PascalCase identifier",
            Token::SnakeCase => "snake_case identifier",
            Token::Word => "identifier",
            Token::Number => "number",
            Token::String => "string literal",
            Token::Char => "character literal",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LAngle => "'<'",
            Token::RAngle => "'>'",
            Token::Comma => "','",
            Token::Colon => "':'",
            Token::Semicolon => "';'",
            Token::Dot => "'.'",
            Token::Question => "'?'",
            Token::Operator => "operator",
            Token::Other => "symbol",
        }
    }

    /// Check if this token can name a package path segment.
    pub fn is_identifier(&self) -> bool {
        matches!(self, Token::PascalCase | Token::SnakeCase | Token::Word)
    }

    /// The closing token for an opening bracket.
    pub fn closing(&self) -> Option<Token> {
        match self {
            Token::LBrace => Some(Token::RBrace),
            Token::LParen => Some(Token::RParen),
            Token::LBracket => Some(Token::RBracket),
            _ => None,
        }
    }

    /// Brackets that must balance everywhere, including skipped bodies.
    /// Angle brackets are excluded: inside bodies they are comparisons.
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            Token::LBrace
                | Token::RBrace
                | Token::LParen
                | Token::RParen
                | Token::LBracket
                | Token::RBracket
        )
    }

    /// Tokens that may appear in a type expression.
    pub fn is_type_token(&self) -> bool {
        matches!(
            self,
            Token::PascalCase
                | Token::LAngle
                | Token::RAngle
                | Token::Comma
                | Token::Question
                | Token::LBracket
                | Token::RBracket
        )
    }
}

/// A token together with its source text and location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lexeme<'src> {
    pub token: Token,
    pub text: &'src str,
    pub span: Span,
}

/// Tokenize Vision source, failing on the first unrecognized character.
pub fn tokenize(source: &str) -> Result<Vec<Lexeme<'_>>, SyntaxError> {
    let mut cursor = LineCursor::new(source);
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = cursor.span(range.start, range.end);
        match result {
            Ok(token) => lexemes.push(Lexeme {
                token,
                text: lexer.slice(),
                span,
            }),
            Err(()) => {
                return Err(SyntaxError::new(
                    format!("unexpected character {:?}", lexer.slice()),
                    span,
                ))
            }
        }
    }

    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|l| l.token)
            .collect()
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(
            kinds("package class interface fun"),
            vec![Token::Package, Token::Class, Token::Interface, Token::Fun]
        );
        // Longest match keeps keyword prefixes as identifiers
        assert_eq!(kinds("classes funny"), vec![Token::SnakeCase, Token::SnakeCase]);
    }

    #[test]
    fn test_casing_conventions() {
        assert_eq!(kinds("Account"), vec![Token::PascalCase]);
        assert_eq!(kinds("current_balance"), vec![Token::SnakeCase]);
        assert_eq!(kinds("HttpClient2"), vec![Token::PascalCase]);
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        let source = "// leading\nclass /* inline */ Shape\n";
        assert_eq!(kinds(source), vec![Token::Class, Token::PascalCase]);
    }

    #[test]
    fn test_type_punctuation() {
        assert_eq!(
            kinds("Map<String, Int>?[]"),
            vec![
                Token::PascalCase,
                Token::LAngle,
                Token::PascalCase,
                Token::Comma,
                Token::PascalCase,
                Token::RAngle,
                Token::Question,
                Token::LBracket,
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_body_tokens() {
        assert_eq!(
            kinds(r#"x += 42; print("hi")"#),
            vec![
                Token::SnakeCase,
                Token::Operator,
                Token::Number,
                Token::Semicolon,
                Token::SnakeCase,
                Token::LParen,
                Token::String,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_lexeme_text_and_span() {
        let lexemes = tokenize("package\n  pkg.sample").unwrap();
        assert_eq!(lexemes[1].text, "pkg");
        assert_eq!(lexemes[1].span.line, 2);
        assert_eq!(lexemes[1].span.column, 3);
        assert_eq!(lexemes[3].text, "sample");
    }

    #[test]
    fn test_unexpected_character() {
        // A non-breaking space is neither skipped nor visible
        let err = tokenize("class \u{a0}Oops").unwrap_err();
        assert!(err.message.contains("unexpected character"));
        assert_eq!(err.span.column, 7);
    }

    #[test]
    fn test_any_body_statement_lexes() {
        assert_eq!(
            kinds("MAX_SIZE = _tmp + 'c' `raw` \\"),
            vec![
                Token::Word,
                Token::Operator,
                Token::Word,
                Token::Operator,
                Token::Char,
                Token::Other,
                Token::SnakeCase,
                Token::Other,
                Token::Other,
            ]
        );
        assert_eq!(kinds("Account _"), vec![Token::PascalCase, Token::Word]);
    }

    #[test]
    fn test_columns_on_one_long_line() {
        let source = "class A {} ".repeat(10_000);
        let lexemes = tokenize(&source).unwrap();
        let last = lexemes.last().unwrap();
        assert_eq!(last.span.line, 1);
        assert_eq!(last.span.column, source.len() - 1);
    }
}
