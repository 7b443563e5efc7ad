use crate::error::{Error, Result};
use crate::input_symbol::is_epsilon_name;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Symbol(char),
    /// Written as `&` or `ε`, matches the empty string
    Epsilon,
    Union,
    Star,
    Concat,
    Open,
    Close,
}

impl Token {
    fn precedence(self) -> u8 {
        match self {
            Token::Star => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    fn is_operator(self) -> bool {
        matches!(self, Token::Star | Token::Concat | Token::Union)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Symbol(c) => write!(f, "{}", c),
            Token::Epsilon => f.write_str(crate::input_symbol::EPSILON),
            Token::Union => f.write_str("|"),
            Token::Star => f.write_str("*"),
            Token::Concat => f.write_str("."),
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
        }
    }
}

pub fn tokenize(regex: &str) -> Vec<Token> {
    regex
        .chars()
        .map(|c| match c {
            '|' => Token::Union,
            '*' => Token::Star,
            '(' => Token::Open,
            ')' => Token::Close,
            c if is_epsilon_name(c.encode_utf8(&mut [0; 4])) => Token::Epsilon,
            c => Token::Symbol(c),
        })
        .collect()
}

/// Makes concatenation explicit: a `Concat` goes between `a` and `b` unless
/// `a` opens a group or is a union, or `b` closes a group, is a union or a star.
pub fn insert_concatenation(tokens: &[Token]) -> Vec<Token> {
    let mut explicit = Vec::with_capacity(tokens.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        explicit.push(token);
        if let Some(&next) = tokens.get(i + 1) {
            if !matches!(token, Token::Open | Token::Union)
                && !matches!(next, Token::Close | Token::Union | Token::Star)
            {
                explicit.push(Token::Concat);
            }
        }
    }
    explicit
}

/// Shunting-yard conversion to postfix. Operators are left-associative with
/// precedence `*` over concatenation over `|`; parentheses are dropped.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Symbol(_) | Token::Epsilon => output.push(token),
            Token::Open => stack.push(token),
            Token::Close => loop {
                match stack.pop() {
                    Some(Token::Open) => break,
                    Some(operator) => output.push(operator),
                    None => return Err(Error::malformed("unmatched ')'")),
                }
            },
            operator => {
                while let Some(&top) = stack.last() {
                    if top.is_operator() && top.precedence() >= operator.precedence() {
                        output.push(top);
                        stack.pop();
                    } else {
                        break;
                    }
                }
                stack.push(operator);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Token::Open {
            return Err(Error::malformed("unmatched '('"));
        }
        output.push(top);
    }

    Ok(output)
}

pub fn format_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect()
}
