// src/cli/expr.rs

//! A small expression language for invoking engine functions from the command line.
//!
//! ```text
//! expr    := call | array | struct | typed | literal
//! call    := [SAFE.] ident '(' [arg {',' arg}] ')'
//! arg     := [ident '=>'] expr
//! array   := '[' [expr {',' expr}] ']'
//! struct  := STRUCT '(' [expr [AS ident] {',' expr [AS ident]}] ')'
//! typed   := TYPE string            e.g. JSON '{"a":1}', DATE '2024-01-31'
//! literal := NULL | TRUE | FALSE | ['-'] number | string
//! ```

use crate::core::sql::{SqlArg, SqlType, SqlValue};
use crate::core::value::Decimal;
use crate::core::{Engine, SpinelJsonError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(SqlValue),
    /// A `TYPE 'text'` literal, converted at evaluation time.
    Typed(SqlType, String),
    Array(Vec<Expr>),
    Struct(Vec<(String, Expr)>),
    Call {
        name: String,
        safe: bool,
        args: Vec<(Option<String>, Expr)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(String),
    Str(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Arrow,
    Minus,
}

fn syntax(message: impl Into<String>) -> SpinelJsonError {
    SpinelJsonError::SyntaxError(message.into())
}

fn tokenize(input: &str) -> Result<Vec<Token>, SpinelJsonError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '.' if !chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()) => {
                tokens.push(Token::Dot);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '=' if chars.get(i + 1) == Some(&'>') => {
                tokens.push(Token::Arrow);
                i += 2;
            }
            '\'' | '"' => {
                let (text, next) = read_string(&chars, i)?;
                tokens.push(Token::Str(text));
                i = next;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while chars.get(i).is_some_and(|d| d.is_ascii_digit()) {
                    i += 1;
                }
                if chars.get(i) == Some(&'.') {
                    i += 1;
                    while chars.get(i).is_some_and(|d| d.is_ascii_digit()) {
                        i += 1;
                    }
                }
                if matches!(chars.get(i), Some('e' | 'E')) {
                    i += 1;
                    if matches!(chars.get(i), Some('+' | '-')) {
                        i += 1;
                    }
                    while chars.get(i).is_some_and(|d| d.is_ascii_digit()) {
                        i += 1;
                    }
                }
                tokens.push(Token::Number(chars[start..i].iter().collect()));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while chars.get(i).is_some_and(|d| d.is_alphanumeric() || *d == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(syntax(format!("unexpected character '{other}'"))),
        }
    }
    Ok(tokens)
}

/// Reads a quoted string. Only `\<quote>` and `\\` are unescaped; any other backslash
/// is kept, so JSON escapes inside `JSON '...'` literals reach the JSON parser intact.
fn read_string(chars: &[char], open: usize) -> Result<(String, usize), SpinelJsonError> {
    let quote = chars[open];
    let mut out = String::new();
    let mut i = open + 1;
    loop {
        match chars.get(i) {
            None => return Err(syntax("unterminated string literal")),
            Some(&c) if c == quote => return Ok((out, i + 1)),
            Some('\\') => match chars.get(i + 1) {
                Some(&next) if next == quote || next == '\\' => {
                    out.push(next);
                    i += 2;
                }
                _ => {
                    out.push('\\');
                    i += 1;
                }
            },
            Some(&c) => {
                out.push(c);
                i += 1;
            }
        }
    }
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn next(&mut self) -> Result<Token, SpinelJsonError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| syntax("unexpected end of expression"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), SpinelJsonError> {
        let token = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(syntax(format!("expected {expected:?}, found {token:?}")))
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, SpinelJsonError> {
        match self.next()? {
            Token::Minus => match self.next()? {
                Token::Number(text) => number_literal(&format!("-{text}")),
                other => Err(syntax(format!("expected a number after '-', found {other:?}"))),
            },
            Token::Number(text) => number_literal(&text),
            Token::Str(text) => Ok(Expr::Literal(SqlValue::Varchar(text))),
            Token::LBracket => self.parse_array(),
            Token::Ident(ident) => self.parse_ident(ident),
            other => Err(syntax(format!("unexpected token {other:?}"))),
        }
    }

    fn parse_array(&mut self) -> Result<Expr, SpinelJsonError> {
        let mut items = Vec::new();
        if self.peek() == Some(&Token::RBracket) {
            self.pos += 1;
            return Ok(Expr::Array(items));
        }
        loop {
            items.push(self.parse_expr()?);
            match self.next()? {
                Token::Comma => continue,
                Token::RBracket => return Ok(Expr::Array(items)),
                other => return Err(syntax(format!("expected ',' or ']', found {other:?}"))),
            }
        }
    }

    fn parse_ident(&mut self, ident: String) -> Result<Expr, SpinelJsonError> {
        let upper = ident.to_ascii_uppercase();
        match (upper.as_str(), self.peek()) {
            ("NULL", _) => Ok(Expr::Literal(SqlValue::Null)),
            ("TRUE", _) => Ok(Expr::Literal(SqlValue::Bool(true))),
            ("FALSE", _) => Ok(Expr::Literal(SqlValue::Bool(false))),
            ("STRUCT", Some(Token::LParen)) => {
                self.pos += 1;
                self.parse_struct()
            }
            ("SAFE", Some(Token::Dot)) => {
                self.pos += 1;
                match self.next()? {
                    Token::Ident(name) => self.parse_call(name, true),
                    other => Err(syntax(format!("expected a function name, found {other:?}"))),
                }
            }
            (_, Some(Token::LParen)) => self.parse_call(ident, false),
            (_, Some(Token::Str(_))) => {
                let ty: SqlType = upper
                    .parse()
                    .map_err(|_| syntax(format!("unknown type '{ident}'")))?;
                let Token::Str(text) = self.next()? else {
                    return Err(syntax("expected a string literal"));
                };
                Ok(Expr::Typed(ty, text))
            }
            _ => Err(syntax(format!("unexpected identifier '{ident}'"))),
        }
    }

    fn parse_call(&mut self, name: String, safe: bool) -> Result<Expr, SpinelJsonError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(Expr::Call { name, safe, args });
        }
        loop {
            let arg_name = match (self.peek(), self.peek_at(1)) {
                (Some(Token::Ident(arg)), Some(Token::Arrow)) => {
                    let arg = arg.clone();
                    self.pos += 2;
                    Some(arg)
                }
                _ => None,
            };
            args.push((arg_name, self.parse_expr()?));
            match self.next()? {
                Token::Comma => continue,
                Token::RParen => return Ok(Expr::Call { name, safe, args }),
                other => return Err(syntax(format!("expected ',' or ')', found {other:?}"))),
            }
        }
    }

    fn parse_struct(&mut self) -> Result<Expr, SpinelJsonError> {
        let mut fields = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(Expr::Struct(fields));
        }
        loop {
            let value = self.parse_expr()?;
            let name = match self.peek() {
                Some(Token::Ident(kw)) if kw.eq_ignore_ascii_case("as") => {
                    self.pos += 1;
                    match self.next()? {
                        Token::Ident(name) => name,
                        other => {
                            return Err(syntax(format!("expected a field name, found {other:?}")));
                        }
                    }
                }
                _ => format!("_field_{}", fields.len() + 1),
            };
            fields.push((name, value));
            match self.next()? {
                Token::Comma => continue,
                Token::RParen => return Ok(Expr::Struct(fields)),
                other => return Err(syntax(format!("expected ',' or ')', found {other:?}"))),
            }
        }
    }
}

/// Integers become BIGINT (NUMERIC when too large); fractions and exponents DOUBLE.
fn number_literal(text: &str) -> Result<Expr, SpinelJsonError> {
    let is_integer = !text.contains(['.', 'e', 'E']);
    let value = if is_integer {
        match text.parse::<i64>() {
            Ok(v) => SqlValue::BigInt(v),
            Err(_) => SqlValue::Numeric(
                Decimal::parse(text).ok_or_else(|| syntax(format!("invalid number '{text}'")))?,
            ),
        }
    } else {
        SqlValue::Double(
            text.parse::<f64>()
                .map_err(|_| syntax(format!("invalid number '{text}'")))?,
        )
    };
    Ok(Expr::Literal(value))
}

/// Parses a complete expression.
pub fn parse_expr(input: &str) -> Result<Expr, SpinelJsonError> {
    let mut parser = ExprParser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(syntax(format!("unexpected trailing token {token:?}")));
    }
    Ok(expr)
}

/// Evaluates `expr`. A `SAFE.` call turns its own failure into `NULL`; failures while
/// evaluating its arguments still propagate.
pub fn evaluate(engine: &Engine, expr: &Expr) -> Result<SqlValue, SpinelJsonError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Typed(ty, text) => typed_literal(engine, *ty, text),
        Expr::Array(items) => items
            .iter()
            .map(|item| evaluate(engine, item))
            .collect::<Result<Vec<_>, _>>()
            .map(SqlValue::Array),
        Expr::Struct(fields) => fields
            .iter()
            .map(|(name, value)| Ok((name.clone(), evaluate(engine, value)?)))
            .collect::<Result<Vec<_>, SpinelJsonError>>()
            .map(SqlValue::Struct),
        Expr::Call { name, safe, args } => {
            let args = args
                .iter()
                .map(|(arg_name, value)| {
                    Ok(SqlArg {
                        name: arg_name.clone(),
                        value: evaluate(engine, value)?,
                    })
                })
                .collect::<Result<Vec<_>, SpinelJsonError>>()?;
            if *safe {
                Ok(engine.safe_call(name, &args))
            } else {
                engine.call(name, &args)
            }
        }
    }
}

/// Parses and evaluates one line of input.
pub fn eval_str(engine: &Engine, input: &str) -> Result<SqlValue, SpinelJsonError> {
    evaluate(engine, &parse_expr(input)?)
}

fn typed_literal(engine: &Engine, ty: SqlType, text: &str) -> Result<SqlValue, SpinelJsonError> {
    let invalid = || SpinelJsonError::InvalidArgument(format!("invalid {ty} literal '{text}'"));
    let value = match ty {
        SqlType::Json => engine.call("parse_json", &[SqlArg::positional(text)])?,
        SqlType::Varchar => SqlValue::Varchar(text.to_string()),
        SqlType::Bool => match text.to_ascii_lowercase().as_str() {
            "true" => SqlValue::Bool(true),
            "false" => SqlValue::Bool(false),
            _ => return Err(invalid()),
        },
        SqlType::Integer => SqlValue::Integer(text.trim().parse()?),
        SqlType::BigInt => SqlValue::BigInt(text.trim().parse()?),
        SqlType::UInteger => SqlValue::UInteger(text.trim().parse()?),
        SqlType::UBigInt => SqlValue::UBigInt(text.trim().parse()?),
        SqlType::Float => SqlValue::Float(text.trim().parse()?),
        SqlType::Double => SqlValue::Double(text.trim().parse()?),
        SqlType::Numeric => SqlValue::Numeric(Decimal::parse(text.trim()).ok_or_else(invalid)?),
        SqlType::Bytes => SqlValue::Bytes(
            STANDARD
                .decode(text.trim())
                .map_err(|_| invalid())?
                .into(),
        ),
        SqlType::Date => SqlValue::Date(
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| invalid())?,
        ),
        SqlType::Time => SqlValue::Time(
            NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f").map_err(|_| invalid())?,
        ),
        SqlType::DateTime => SqlValue::DateTime(parse_datetime(text.trim()).ok_or_else(invalid)?),
        SqlType::Timestamp => {
            let text = text.trim();
            let ts = DateTime::parse_from_rfc3339(text)
                .map(|ts| ts.with_timezone(&Utc))
                .ok()
                .or_else(|| parse_datetime(text).map(|naive| naive.and_utc()))
                .ok_or_else(invalid)?;
            SqlValue::Timestamp(ts)
        }
        SqlType::Null | SqlType::Array | SqlType::Struct => {
            return Err(syntax(format!("{ty} has no literal form")));
        }
    };
    Ok(value)
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
