//! Splits a pattern into tokens and makes implicit concatenation explicit.

use log::trace;
use parcel::prelude::v1::*;
use thompson_runtime::EPSILON;

use super::parser::ParseError;

/// The operators understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `|`
    Union,
    /// Written as `.` or left implicit between two operands.
    Concat,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl Operator {
    /// Binding strength of the operator, higher values bind tighter. All
    /// operators are left associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Union => 1,
            Operator::Concat => 2,
            Operator::ZeroOrMore | Operator::OneOrMore | Operator::ZeroOrOne => 3,
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(
            self,
            Operator::ZeroOrMore | Operator::OneOrMore | Operator::ZeroOrOne
        )
    }

    pub const fn as_char(self) -> char {
        match self {
            Operator::Union => '|',
            Operator::Concat => '.',
            Operator::ZeroOrMore => '*',
            Operator::OneOrMore => '+',
            Operator::ZeroOrOne => '?',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal(char),
    Epsilon,
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl TokenKind {
    /// Returns `true` if a sub-expression may end with this token.
    fn ends_operand(&self) -> bool {
        match self {
            TokenKind::Literal(_) | TokenKind::Epsilon | TokenKind::RightParen => true,
            TokenKind::Operator(op) => op.is_postfix(),
            TokenKind::LeftParen => false,
        }
    }

    /// Returns `true` if a sub-expression may begin with this token.
    fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Literal(_) | TokenKind::Epsilon | TokenKind::LeftParen
        )
    }
}

/// A classified unit of a pattern along with the character offset it was
/// read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    position: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Literal(c) => write!(f, "{}", c),
            TokenKind::Epsilon => write!(f, "{}", EPSILON),
            TokenKind::Operator(op) => write!(f, "{}", op.as_char()),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
        }
    }
}

/// Classifies each non-whitespace character of a pattern as a token.
/// Control characters can not appear in a pattern and are reported as
/// unexpected.
///
/// # Example
///
/// ```
/// use thompson_compiler::tokenizer::*;
///
/// assert_eq!(
///     Ok(vec![
///         Token::new(TokenKind::Literal('a'), 0),
///         Token::new(TokenKind::Operator(Operator::Union), 2),
///         Token::new(TokenKind::Epsilon, 4),
///     ]),
///     tokenize("a | ε")
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars = input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .collect::<Vec<(usize, char)>>();

    // a failed parse consumes nothing, leaving the first character unmatched.
    let (tokens, remainder) = match parcel::zero_or_more(token()).parse(&chars[..]) {
        Ok(MatchStatus::Match {
            inner, remainder, ..
        }) => (inner, remainder),
        Ok(MatchStatus::NoMatch(remainder)) => (Vec::new(), remainder),
        Err(_) => (Vec::new(), &chars[..]),
    };

    match remainder.first() {
        Some(&(position, token)) => Err(ParseError::UnexpectedToken { token, position }),
        None => Ok(tokens),
    }
}

fn token<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(operator(), || {
        parcel::or(group_delimiter(), || {
            parcel::or(reserved(EPSILON, TokenKind::Epsilon), || literal())
        })
    })
}

fn operator<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    use Operator::*;

    parcel::or(reserved('|', TokenKind::Operator(Union)), || {
        parcel::or(reserved('.', TokenKind::Operator(Concat)), || {
            parcel::or(reserved('*', TokenKind::Operator(ZeroOrMore)), || {
                parcel::or(reserved('+', TokenKind::Operator(OneOrMore)), || {
                    reserved('?', TokenKind::Operator(ZeroOrOne))
                })
            })
        })
    })
}

fn group_delimiter<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(reserved('(', TokenKind::LeftParen), || {
        reserved(')', TokenKind::RightParen)
    })
}

fn literal<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    positioned_character()
        .predicate(|(_, c)| !c.is_control())
        .map(|(position, c)| Token::new(TokenKind::Literal(c), position))
}

fn reserved<'a>(expected: char, kind: TokenKind) -> impl Parser<'a, &'a [(usize, char)], Token> {
    positioned_character()
        .predicate(move |(_, c)| *c == expected)
        .map(move |(position, _)| Token::new(kind, position))
}

fn positioned_character<'a>() -> impl Parser<'a, &'a [(usize, char)], (usize, char)> {
    move |input: &'a [(usize, char)]| match input.first() {
        Some(&(pos, next)) => Ok(MatchStatus::Match {
            span: pos..pos + 1,
            remainder: &input[1..],
            inner: (pos, next),
        }),
        None => Ok(MatchStatus::NoMatch(input)),
    }
}

/// Tokenizes a pattern and inserts a concatenation operator between every
/// pair of adjacent tokens where the first can end an operand and the second
/// can start one. Inserted operators take the position of the token that
/// follows them. An empty group `()` is given an epsilon operand positioned
/// at its closing parenthesis.
///
/// # Example
///
/// ```
/// use thompson_compiler::tokenizer::*;
///
/// let rendered = preprocess("a(b|c)*d")
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect::<String>();
///
/// assert_eq!("a.(b|c)*.d", rendered);
/// ```
pub fn preprocess(input: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = tokenize(input)?;
    let capacity = tokens.len() * 2;

    let explicit = tokens
        .into_iter()
        .fold(Vec::with_capacity(capacity), |mut acc: Vec<Token>, token| {
            // an empty group matches only the empty string.
            let closes_empty_group = token.kind == TokenKind::RightParen
                && acc.last().map_or(false, |prev| prev.kind == TokenKind::LeftParen);
            if closes_empty_group {
                acc.push(Token::new(TokenKind::Epsilon, token.position));
            }

            let follows_operand = acc.last().map_or(false, |prev| prev.kind.ends_operand());
            if follows_operand && token.kind.starts_operand() {
                acc.push(Token::new(
                    TokenKind::Operator(Operator::Concat),
                    token.position,
                ));
            }

            acc.push(token);
            acc
        });

    trace!("preprocessed {:?} into {} tokens", input, explicit.len());
    Ok(explicit)
}
