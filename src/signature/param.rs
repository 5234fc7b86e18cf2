use crate::error::CurryError;
use crate::object::value::Value;
use crate::utils::intern::Symbol;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How a parameter receives its argument. Declaration order follows the
/// order of the variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Symbol,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl Param {
    pub fn new<S: Into<Symbol>>(name: S, kind: ParamKind) -> Param {
        Param {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn positional<S: Into<Symbol>>(name: S) -> Param {
        Param::new(name, ParamKind::PositionalOrKeyword)
    }

    pub fn with_default<V: Into<Value>>(mut self, default: V) -> Param {
        self.default = Some(default.into());
        self
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.kind, ParamKind::VarPositional | ParamKind::VarKeyword)
    }

    /// A required parameter must be supplied before the owner can run.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.is_variadic()
    }

    pub fn accepts_positional(&self) -> bool {
        matches!(
            self.kind,
            ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
        )
    }

    pub fn accepts_keyword(&self) -> bool {
        matches!(
            self.kind,
            ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly
        )
    }
}

/// The declared parameter list of a callable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new(params: Vec<Param>) -> Result<Signature, CurryError> {
        let mut names = HashSet::new();
        let mut last_kind = ParamKind::PositionalOnly;
        let mut seen_default = false;
        for param in params.iter() {
            if !names.insert(param.name) {
                return Err(CurryError::InvalidSignature(format!(
                    "duplicate parameter '{}'",
                    param.name
                )));
            }
            if param.kind < last_kind {
                return Err(CurryError::InvalidSignature(format!(
                    "parameter '{}' is declared out of order",
                    param.name
                )));
            }
            if param.is_variadic() && param.kind == last_kind {
                return Err(CurryError::InvalidSignature(format!(
                    "more than one {:?} parameter",
                    param.kind
                )));
            }
            if param.is_variadic() && param.default.is_some() {
                return Err(CurryError::InvalidSignature(format!(
                    "variadic parameter '{}' cannot have a default",
                    param.name
                )));
            }
            if param.accepts_positional() {
                if param.default.is_some() {
                    seen_default = true;
                } else if seen_default {
                    return Err(CurryError::InvalidSignature(format!(
                        "required parameter '{}' follows a parameter with a default",
                        param.name
                    )));
                }
            }
            last_kind = param.kind;
        }
        Ok(Signature { params })
    }

    /// `*args, **kwargs`: accepts anything, requires nothing.
    pub fn variadic() -> Signature {
        Signature {
            params: vec![
                Param::new("args", ParamKind::VarPositional),
                Param::new("kwargs", ParamKind::VarKeyword),
            ],
        }
    }

    /// `self`: the initializer of a class that declares none.
    pub fn receiver() -> Signature {
        Signature {
            params: vec![Param::positional("self")],
        }
    }

    pub fn parse(src: &str) -> Result<Signature, CurryError> {
        crate::signature::parser::parse_signature(src)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn find(&self, name: Symbol) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn var_positional(&self) -> Option<&Param> {
        self.params
            .iter()
            .find(|param| param.kind == ParamKind::VarPositional)
    }

    pub fn var_keyword(&self) -> Option<&Param> {
        self.params
            .iter()
            .find(|param| param.kind == ParamKind::VarKeyword)
    }
}

impl FromStr for Signature {
    type Err = CurryError;

    fn from_str(src: &str) -> Result<Signature, CurryError> {
        Signature::parse(src)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParamKind::VarPositional => write!(f, "*{}", self.name),
            ParamKind::VarKeyword => write!(f, "**{}", self.name),
            _ => match &self.default {
                Some(default) => write!(f, "{}={}", self.name, default),
                None => write!(f, "{}", self.name),
            },
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // markers for `/` and a bare `*` are only printed where needed
        let mut parts: Vec<String> = Vec::new();
        let mut iter = self.params.iter().peekable();
        let mut in_positional_only = false;
        let mut star_written = false;
        while let Some(param) = iter.next() {
            match param.kind {
                ParamKind::PositionalOnly => in_positional_only = true,
                ParamKind::VarPositional => star_written = true,
                ParamKind::KeywordOnly if !star_written => {
                    parts.push("*".to_string());
                    star_written = true;
                }
                _ => {}
            }
            parts.push(param.to_string());
            let next_positional_only = iter
                .peek()
                .map_or(false, |next| next.kind == ParamKind::PositionalOnly);
            if in_positional_only && !next_positional_only {
                parts.push("/".to_string());
                in_positional_only = false;
            }
        }
        write!(f, "{}", parts.iter().format(", "))
    }
}

#[test]
fn signature_validation_test() {
    let ok = Signature::new(vec![
        Param::new("a", ParamKind::PositionalOnly),
        Param::positional("b").with_default(1),
        Param::new("rest", ParamKind::VarPositional),
        Param::new("c", ParamKind::KeywordOnly),
        Param::new("opts", ParamKind::VarKeyword),
    ]);
    assert!(ok.is_ok());

    let duplicate = Signature::new(vec![Param::positional("a"), Param::positional("a")]);
    assert!(matches!(duplicate, Err(CurryError::InvalidSignature(_))));

    let out_of_order = Signature::new(vec![
        Param::new("kw", ParamKind::VarKeyword),
        Param::positional("a"),
    ]);
    assert!(matches!(out_of_order, Err(CurryError::InvalidSignature(_))));

    let two_stars = Signature::new(vec![
        Param::new("xs", ParamKind::VarPositional),
        Param::new("ys", ParamKind::VarPositional),
    ]);
    assert!(matches!(two_stars, Err(CurryError::InvalidSignature(_))));

    let required_after_default = Signature::new(vec![
        Param::positional("a").with_default(0),
        Param::positional("b"),
    ]);
    assert!(matches!(
        required_after_default,
        Err(CurryError::InvalidSignature(_))
    ));

    // keyword-only parameters may mix required and defaulted freely
    let keyword_only = Signature::new(vec![
        Param::new("a", ParamKind::KeywordOnly).with_default(0),
        Param::new("b", ParamKind::KeywordOnly),
    ]);
    assert!(keyword_only.is_ok());
}

#[test]
fn param_requirement_test() {
    assert!(Param::positional("x").is_required());
    assert!(!Param::positional("x").with_default(()).is_required());
    assert!(!Param::new("xs", ParamKind::VarPositional).is_required());
    assert!(!Param::new("kw", ParamKind::VarKeyword).is_required());
    assert!(Param::new("k", ParamKind::KeywordOnly).is_required());
}
