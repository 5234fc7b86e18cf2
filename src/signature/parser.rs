use crate::error::CurryError;
use crate::object::value::Value;
use crate::signature::param::{Param, ParamKind, Signature};
use crate::utils::intern::Symbol;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, anychar, char, digit1, none_of};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

#[derive(Clone, Debug, PartialEq)]
enum Item {
    Slash,
    Star,
    VarPos(Symbol),
    VarKw(Symbol),
    Named(Symbol, Option<Value>),
}

fn is_space_or_newline(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn skip_space(input: &str) -> IResult<&str, &str> {
    take_while(is_space_or_newline)(input)
}

fn skip_space_tag<'a>(tok: &str, input: &'a str) -> IResult<&'a str, &'a str> {
    let (input, _) = skip_space(input)?;
    tag(tok)(input)
}

fn ident(input: &str) -> IResult<&str, Symbol> {
    let (input, _) = skip_space(input)?;
    let (input, s) = recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|ch: char| ch.is_alphanumeric() || ch == '_'),
    ))(input)?;
    Ok((input, Symbol::new(s)))
}

fn int(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}

fn float(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
        str::parse::<f64>,
    )(input)
}

fn bool(input: &str) -> IResult<&str, bool> {
    alt((
        value(true, alt((tag("True"), tag("true")))),
        value(false, alt((tag("False"), tag("false")))),
    ))(input)
}

// quoting follows snailquote: single quotes are literal, double quotes escape
fn string(input: &str) -> IResult<&str, String> {
    let single = recognize(delimited(
        char('\''),
        take_while(|ch: char| ch != '\''),
        char('\''),
    ));
    let double = recognize(delimited(
        char('"'),
        many0(alt((preceded(char('\\'), anychar), none_of("\\\"")))),
        char('"'),
    ));
    map_res(alt((single, double)), snailquote::unescape)(input)
}

fn literal(input: &str) -> IResult<&str, Value> {
    let (input, _) = skip_space(input)?;
    alt((
        value(Value::Unit, tag("None")),
        map(bool, Value::Bool),
        map(float, Value::Float),
        map(int, Value::Int),
        map(string, Value::from),
    ))(input)
}

fn named(input: &str) -> IResult<&str, Item> {
    let (input, name) = ident(input)?;
    let (input, default) = opt(preceded(|input| skip_space_tag("=", input), literal))(input)?;
    Ok((input, Item::Named(name, default)))
}

fn item(input: &str) -> IResult<&str, Item> {
    let (input, _) = skip_space(input)?;
    alt((
        map(preceded(tag("**"), ident), Item::VarKw),
        map(preceded(tag("*"), ident), Item::VarPos),
        value(Item::Star, tag("*")),
        value(Item::Slash, tag("/")),
        named,
    ))(input)
}

fn comma(input: &str) -> IResult<&str, &str> {
    skip_space_tag(",", input)
}

// a trailing comma is allowed after at least one item
fn items(input: &str) -> IResult<&str, (Vec<Item>, bool)> {
    terminated(
        pair(separated_list0(comma, item), map(opt(comma), |c| c.is_some())),
        skip_space,
    )(input)
}

fn invalid<S: Into<String>>(msg: S) -> CurryError {
    CurryError::InvalidSignature(msg.into())
}

fn build(items: Vec<Item>) -> Result<Signature, CurryError> {
    let mut params: Vec<Param> = Vec::new();
    let mut keyword_only = false;
    let mut slash_seen = false;
    let mut star_pending = false;
    for item in items {
        match item {
            Item::Slash => {
                if slash_seen || keyword_only || params.is_empty() {
                    return Err(invalid("'/' must follow the positional parameters"));
                }
                if params.iter().any(Param::is_variadic) {
                    return Err(invalid("'/' must follow the positional parameters"));
                }
                for param in params.iter_mut() {
                    param.kind = ParamKind::PositionalOnly;
                }
                slash_seen = true;
            }
            Item::Star => {
                if keyword_only {
                    return Err(invalid("'*' may appear only once"));
                }
                keyword_only = true;
                star_pending = true;
            }
            Item::VarPos(name) => {
                if keyword_only {
                    return Err(invalid("'*' may appear only once"));
                }
                params.push(Param::new(name, ParamKind::VarPositional));
                keyword_only = true;
            }
            Item::VarKw(name) => {
                if star_pending {
                    return Err(invalid("named parameters must follow a bare '*'"));
                }
                params.push(Param::new(name, ParamKind::VarKeyword));
            }
            Item::Named(name, default) => {
                let kind = if keyword_only {
                    ParamKind::KeywordOnly
                } else {
                    ParamKind::PositionalOrKeyword
                };
                params.push(Param {
                    name,
                    kind,
                    default,
                });
                star_pending = false;
            }
        }
    }
    if star_pending {
        return Err(invalid("named parameters must follow a bare '*'"));
    }
    Signature::new(params)
}

/// Parses the textual parameter list, e.g. `a, b=1, /, c, *args, d, **kwargs`.
pub fn parse_signature(input: &str) -> Result<Signature, CurryError> {
    match items(input) {
        Ok((rest, _)) if !rest.is_empty() => Err(invalid(format!("unexpected input '{}'", rest))),
        Ok((_, (items, true))) if items.is_empty() => Err(invalid("unexpected input ','")),
        Ok((_, (items, _))) => build(items),
        Err(err) => Err(invalid(err.to_string())),
    }
}

#[test]
fn parse_kinds_test() {
    let sig = parse_signature("a, /, b, *args, c, **kwargs").unwrap();
    let kinds: Vec<ParamKind> = sig.params().iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ParamKind::PositionalOnly,
            ParamKind::PositionalOrKeyword,
            ParamKind::VarPositional,
            ParamKind::KeywordOnly,
            ParamKind::VarKeyword,
        ]
    );

    let sig = parse_signature("x, *, flag=False").unwrap();
    assert_eq!(sig.params()[1].kind, ParamKind::KeywordOnly);
    assert_eq!(sig.params()[1].default, Some(Value::Bool(false)));

    assert!(parse_signature("").unwrap().params().is_empty());
    assert!(parse_signature("  ").unwrap().params().is_empty());
}

#[test]
fn parse_trailing_comma_test() {
    let sig = parse_signature("self, x,").unwrap();
    assert_eq!(sig, parse_signature("self, x").unwrap());
    assert_eq!(sig.to_string(), "self, x");

    let sig = parse_signature("a, *, k=1 , ").unwrap();
    assert_eq!(sig.params()[1].kind, ParamKind::KeywordOnly);
}

#[test]
fn slash_after_var_keyword_test() {
    assert_eq!(
        parse_signature("a, **kw, /"),
        Err(invalid("'/' must follow the positional parameters"))
    );
    // the var-keyword parameter keeps its kind
    let sig = parse_signature("a, /, **kw").unwrap();
    assert_eq!(sig.params()[1].kind, ParamKind::VarKeyword);
    assert!(!sig.params()[1].is_required());
}

#[test]
fn parse_defaults_test() {
    let sig = parse_signature(r#"a=-3, b=2.5, c=None, d='it', e="say \"hi\"", f=true"#).unwrap();
    let defaults: Vec<Value> = sig
        .params()
        .iter()
        .map(|p| p.default.clone().unwrap())
        .collect();
    assert_eq!(
        defaults,
        vec![
            Value::Int(-3),
            Value::Float(2.5),
            Value::Unit,
            Value::from("it"),
            Value::from("say \"hi\""),
            Value::Bool(true),
        ]
    );
}

#[test]
fn parse_errors_test() {
    for src in [
        "a, *",
        "/, a",
        "a, /, /",
        "*a, *b",
        "a b",
        "a=",
        "*, **kw",
        "a, a",
        "a, **kw, /",
        ",",
        "a,,",
        "a, *,",
    ] {
        assert!(
            matches!(parse_signature(src), Err(CurryError::InvalidSignature(_))),
            "{} should be rejected",
            src
        );
    }
}

#[test]
fn display_round_trip_test() {
    for src in [
        "a, b, c",
        "a, /, b=1, *args, c, d='x', **kwargs",
        "self, x, y=0",
        "*, key, flag=True",
        "ratio=0.5, name=None",
    ] {
        let sig = parse_signature(src).unwrap();
        assert_eq!(sig.to_string(), src);
        assert_eq!(parse_signature(&sig.to_string()), Ok(sig));
    }
}
