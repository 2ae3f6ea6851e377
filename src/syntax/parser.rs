//! Parser for the declaration level of Vision, built from chumsky combinators.
//!
//! ```text
//! root            := package_clause? item* EOF
//! package_clause  := 'package' package_name ';'?
//! package_name    := ident ('.' ident)*
//! item            := class_decl | interface_decl | func_decl
//! class_decl      := 'class' PASCAL_CASE class_body
//! class_body      := '{' (arg_decl | func_decl)* '}'
//! arg_decl        := SNAKE_CASE ':' type ';'?
//! type            := PASCAL_CASE ('<' type (',' type)* '>')? '?'? ('[' ']')*
//! func_decl       := func_header block
//! func_header     := 'fun' SNAKE_CASE '(' balanced ')' (':' type)?
//! interface_decl  := 'interface' PASCAL_CASE block
//! block           := '{' balanced '}'
//! ```
//!
//! Statements and expressions never matter for declaration extraction, so
//! function and interface bodies are skipped as balanced token runs.
//!
//! Bracket balance is checked in one flat pass before the grammar runs. That
//! pass rejects nesting deeper than [`MAX_NESTING`], which bounds the
//! recursion of the body skipper. Type expressions are matched as a flat run
//! of type tokens and validated with an explicit depth counter, so generic
//! nesting has no recursion limit at all.

use chumsky::error::SimpleReason;
use chumsky::{prelude::*, Stream};

use super::span::{LineIndex, Span};
use super::token::{tokenize, Lexeme, Token};
use super::tree::{
    ClassBody, ClassDeclaration, FieldDeclaration, FuncHeader, Ident, InterfaceDeclaration,
    Item, Member, MethodDeclaration, PackageName, SyntaxTree, TypeExpr,
};
use super::SyntaxError;

/// Deepest `{}`, `()` or `[]` nesting accepted in a file.
pub const MAX_NESTING: usize = 32;

type ParserError<'src> = Simple<Lexeme<'src>>;

/// Parse Vision source into a syntax tree.
pub fn parse(source: &str) -> Result<SyntaxTree, SyntaxError> {
    let lexemes = tokenize(source)?;
    let index = LineIndex::new(source);
    let eof = index.span(source, source.len(), source.len());
    check_delimiters(&lexemes, eof)?;

    let span = match (lexemes.first(), lexemes.last()) {
        (Some(first), Some(last)) => first.span.to(last.span),
        _ => eof,
    };

    let stream = Stream::from_iter(
        source.len()..source.len(),
        lexemes.into_iter().map(|lexeme| {
            let range = lexeme.span.start..lexeme.span.end;
            (lexeme, range)
        }),
    );
    let (package, items) = root()
        .parse(stream)
        .map_err(|errors| to_syntax_error(source, &index, errors))?;

    Ok(SyntaxTree {
        package,
        items,
        span,
    })
}

/// Check that every bracket is closed by its partner, without recursion.
fn check_delimiters(lexemes: &[Lexeme<'_>], eof: Span) -> Result<(), SyntaxError> {
    let mut open: Vec<&Lexeme<'_>> = Vec::new();

    for lexeme in lexemes {
        if lexeme.token.closing().is_some() {
            if open.len() == MAX_NESTING {
                return Err(SyntaxError::new(
                    format!("nesting too deep: more than {} levels of brackets", MAX_NESTING),
                    lexeme.span,
                ));
            }
            open.push(lexeme);
        } else if lexeme.token.is_delimiter() {
            let Some(opener) = open.pop() else {
                return Err(SyntaxError::new(
                    format!("unmatched {}", lexeme.token.describe()),
                    lexeme.span,
                ));
            };
            let expected = opener.token.closing();
            if expected != Some(lexeme.token) {
                return Err(SyntaxError::new(
                    format!(
                        "expected {} to close {} opened at {}, found {:?}",
                        expected.map_or("a closing bracket", |t| t.describe()),
                        opener.token.describe(),
                        opener.span,
                        lexeme.text
                    ),
                    lexeme.span,
                ));
            }
        }
    }

    match open.pop() {
        Some(opener) => Err(SyntaxError::new(
            format!(
                "unclosed {} opened at {}: expected {}, found end of file",
                opener.token.describe(),
                opener.span,
                opener.token.closing().map_or("a closing bracket", |t| t.describe())
            ),
            eof,
        )),
        None => Ok(()),
    }
}

fn to_syntax_error(source: &str, index: &LineIndex, errors: Vec<ParserError<'_>>) -> SyntaxError {
    let Some(error) = errors.into_iter().min_by_key(|e| e.span().start) else {
        return SyntaxError::new("invalid input", index.span(source, 0, 0));
    };

    let range = error.span();
    let span = index.span(source, range.start, range.end);
    let message = match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        _ => {
            let found = match error.found() {
                Some(lexeme) => format!("{:?}", lexeme.text),
                None => "end of file".to_string(),
            };
            match error.label() {
                Some(label) => format!("expected {}, found {}", label, found),
                None => format!("unexpected {}", found),
            }
        }
    };
    SyntaxError::new(message, span)
}

fn root<'src>(
) -> impl Parser<Lexeme<'src>, (Option<PackageName>, Vec<Item>), Error = ParserError<'src>> {
    package_clause()
        .or_not()
        .then(item().repeated())
        .then_ignore(end())
        .map(|(package, items)| (package, items.into_iter().flatten().collect()))
}

fn token<'src>(
    kind: Token,
) -> impl Parser<Lexeme<'src>, Lexeme<'src>, Error = ParserError<'src>> + Clone {
    filter(move |lexeme: &Lexeme<'src>| lexeme.token == kind).labelled(kind.describe())
}

fn ident<'src>(kind: Token) -> impl Parser<Lexeme<'src>, Ident, Error = ParserError<'src>> + Clone {
    token(kind).map(|lexeme| Ident::new(lexeme.text, lexeme.span))
}

fn package_clause<'src>(
) -> impl Parser<Lexeme<'src>, PackageName, Error = ParserError<'src>> + Clone {
    token(Token::Package)
        .ignore_then(package_name())
        .then_ignore(token(Token::Semicolon).or_not())
}

fn package_name<'src>(
) -> impl Parser<Lexeme<'src>, PackageName, Error = ParserError<'src>> + Clone {
    filter(|lexeme: &Lexeme<'src>| lexeme.token.is_identifier())
        .labelled("an identifier")
        .map(|lexeme| Ident::new(lexeme.text, lexeme.span))
        .separated_by(token(Token::Dot))
        .at_least(1)
        .map(|segments: Vec<Ident>| {
            let span = segments[0].span.to(segments[segments.len() - 1].span);
            PackageName { segments, span }
        })
}

/// A top-level declaration. A misplaced `package` clause is reported but
/// still consumed, so parsing can go on.
fn item<'src>() -> impl Parser<Lexeme<'src>, Option<Item>, Error = ParserError<'src>> + Clone {
    let late_package = token(Token::Package)
        .validate(|lexeme, span, emit| {
            emit(Simple::custom(span, "package clause must come first"));
            lexeme
        })
        .then_ignore(package_name().or_not())
        .then_ignore(token(Token::Semicolon).or_not())
        .to(None);

    choice((
        class().map(|c| Some(Item::Class(c))),
        interface().map(|i| Some(Item::Interface(i))),
        function().map(|f| Some(Item::Function(f))),
        late_package,
    ))
    .labelled("'class', 'interface' or 'fun'")
}

fn class<'src>() -> impl Parser<Lexeme<'src>, ClassDeclaration, Error = ParserError<'src>> + Clone {
    token(Token::Class)
        .then(ident(Token::PascalCase))
        .then(class_body())
        .map(|((keyword, name), body)| ClassDeclaration {
            span: keyword.span.to(body.span),
            name: Some(name),
            body,
        })
}

fn class_body<'src>() -> impl Parser<Lexeme<'src>, ClassBody, Error = ParserError<'src>> + Clone {
    let misnamed = token(Token::PascalCase)
        .validate(|lexeme, span, emit| {
            emit(Simple::custom(span, "member names must be snake_case"));
            lexeme
        })
        .then_ignore(token(Token::Colon).then(type_expr()).or_not())
        .to(None);

    let member = choice((
        function().map(|f| Some(Member::Method(f))),
        field().map(|f| Some(Member::Field(f))),
        misnamed,
    ))
    .labelled("a field, a 'fun' or '}'");

    token(Token::LBrace)
        .then(member.repeated())
        .then(token(Token::RBrace))
        .map(|((open, members), close)| ClassBody {
            members: members.into_iter().flatten().collect(),
            span: open.span.to(close.span),
        })
}

fn field<'src>() -> impl Parser<Lexeme<'src>, FieldDeclaration, Error = ParserError<'src>> + Clone {
    ident(Token::SnakeCase)
        .then_ignore(token(Token::Colon))
        .then(type_expr())
        .then(token(Token::Semicolon).or_not())
        .map(|((name, ty), semi)| {
            let mut span = name.span.to(ty.span);
            if let Some(semi) = semi {
                span = span.to(semi.span);
            }
            FieldDeclaration {
                name: Some(name),
                ty: Some(ty),
                span,
            }
        })
}

fn function<'src>(
) -> impl Parser<Lexeme<'src>, MethodDeclaration, Error = ParserError<'src>> + Clone {
    token(Token::Fun)
        .then(ident(Token::SnakeCase))
        .then(block(Token::LParen, Token::RParen))
        .then(token(Token::Colon).ignore_then(type_expr()).or_not())
        .then(block(Token::LBrace, Token::RBrace))
        .map(|((((keyword, name), params), ret), body)| {
            let mut span = keyword.span.to(params);
            if let Some(ret) = ret {
                span = span.to(ret.span);
            }
            MethodDeclaration {
                header: FuncHeader {
                    name: Some(name),
                    span,
                },
                span: span.to(body),
            }
        })
}

fn interface<'src>(
) -> impl Parser<Lexeme<'src>, InterfaceDeclaration, Error = ParserError<'src>> + Clone {
    token(Token::Interface)
        .then(ident(Token::PascalCase))
        .then(block(Token::LBrace, Token::RBrace))
        .map(|((keyword, name), body)| InterfaceDeclaration {
            name: Some(name),
            span: keyword.span.to(body),
        })
}

/// `open ... close` with nested brackets balanced. Yields the covered span.
fn block<'src>(
    open: Token,
    close: Token,
) -> impl Parser<Lexeme<'src>, Span, Error = ParserError<'src>> + Clone {
    token(open)
        .then_ignore(balanced())
        .then(token(close))
        .map(|(open, close)| open.span.to(close.span))
}

/// Any token run whose brackets balance. Depth is bounded by
/// [`check_delimiters`] before this ever runs.
fn balanced<'src>() -> impl Parser<Lexeme<'src>, (), Error = ParserError<'src>> + Clone {
    recursive(|contents| {
        let group = |open: Token, close: Token| {
            token(open)
                .ignore_then(contents.clone())
                .then_ignore(token(close))
                .ignored()
        };

        choice((
            group(Token::LBrace, Token::RBrace),
            group(Token::LParen, Token::RParen),
            group(Token::LBracket, Token::RBracket),
            filter(|lexeme: &Lexeme<'src>| !lexeme.token.is_delimiter()).ignored(),
        ))
        .repeated()
        .ignored()
    })
}

/// A type expression, taken as the longest run of type tokens and then
/// checked against the type grammar.
fn type_expr<'src>() -> impl Parser<Lexeme<'src>, TypeExpr, Error = ParserError<'src>> + Clone {
    filter(|lexeme: &Lexeme<'src>| lexeme.token.is_type_token())
        .labelled("a PascalCase type name")
        .repeated()
        .at_least(1)
        .try_map(|lexemes: Vec<Lexeme<'src>>, _| {
            check_type(&lexemes).map_err(|(span, message)| {
                Simple::custom(span.start..span.end, message)
            })?;
            let span = lexemes[0].span.to(lexemes[lexemes.len() - 1].span);
            let text = lexemes.iter().map(|lexeme| lexeme.text).collect();
            Ok(TypeExpr { text, span })
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeState {
    /// A type name must come next.
    Name,
    /// After a name: arguments, a suffix or the end.
    AfterName,
    /// After `>`: a suffix or the end.
    AfterArgs,
    /// After `?` or `[]`: only more `[]` or the end.
    AfterSuffix,
    /// After `[`.
    CloseBracket,
}

/// Validate a run of type tokens with an explicit `<` depth counter.
fn check_type(lexemes: &[Lexeme<'_>]) -> Result<(), (Span, String)> {
    use TypeState::*;

    let mut state = Name;
    let mut depth = 0usize;

    for lexeme in lexemes {
        state = match (state, lexeme.token) {
            (Name, Token::PascalCase) => AfterName,
            (AfterName, Token::LAngle) => {
                depth += 1;
                Name
            }
            (AfterName | AfterArgs, Token::Question) => AfterSuffix,
            (AfterName | AfterArgs | AfterSuffix, Token::LBracket) => CloseBracket,
            (CloseBracket, Token::RBracket) => AfterSuffix,
            (AfterName | AfterArgs | AfterSuffix, Token::Comma) if depth > 0 => Name,
            (AfterName | AfterArgs | AfterSuffix, Token::RAngle) if depth > 0 => {
                depth -= 1;
                AfterArgs
            }
            (Name, _) => {
                return Err((
                    lexeme.span,
                    format!("expected a PascalCase type name, found {:?}", lexeme.text),
                ))
            }
            (CloseBracket, _) => {
                return Err((lexeme.span, format!("expected ']', found {:?}", lexeme.text)))
            }
            _ => {
                return Err((
                    lexeme.span,
                    format!("unexpected {:?} in type", lexeme.text),
                ))
            }
        };
    }

    let Some(last) = lexemes.last() else {
        return Ok(());
    };
    match state {
        Name => Err((last.span, "expected a PascalCase type name".to_string())),
        CloseBracket => Err((last.span, "expected ']' to close '['".to_string())),
        _ if depth > 0 => Err((last.span, "unclosed '<' in type".to_string())),
        _ => Ok(()),
    }
}
