use crate::error::CurryError;
use crate::object::args::Args;
use crate::object::value::Value;
use crate::signature::param::{ParamKind, Signature};
use crate::utils::intern::Symbol;
use indexmap::IndexMap;

/// Parameter name to argument, in declaration order.
///
/// A var-positional parameter collects its overflow into a [`Value::List`],
/// a var-keyword parameter collects into a [`Value::Dict`]. Neither appears
/// until something lands in it (or [`BoundArguments::apply_defaults`] runs).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundArguments {
    arguments: IndexMap<Symbol, Value>,
}

impl BoundArguments {
    pub fn contains<K: Into<Symbol>>(&self, name: K) -> bool {
        self.arguments.contains_key(&name.into())
    }

    pub fn get<K: Into<Symbol>>(&self, name: K) -> Option<&Value> {
        self.arguments.get(&name.into())
    }

    /// Like `get`, for bodies that expect the parameter to be bound.
    pub fn arg<K: Into<Symbol>>(&self, name: K) -> Result<&Value, CurryError> {
        let name = name.into();
        self.arguments
            .get(&name)
            .ok_or(CurryError::MissingArgument(name))
    }

    pub fn arguments(&self) -> &IndexMap<Symbol, Value> {
        &self.arguments
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Fills every unbound parameter that has a fallback.
    pub fn apply_defaults(&mut self, sig: &Signature) {
        let mut filled = IndexMap::with_capacity(sig.params().len());
        for param in sig.params() {
            let value = match self.arguments.swap_remove(&param.name) {
                Some(value) => value,
                None => match (&param.default, param.kind) {
                    (Some(default), _) => default.clone(),
                    (None, ParamKind::VarPositional) => Value::list(Vec::new()),
                    (None, ParamKind::VarKeyword) => Value::dict(IndexMap::new()),
                    (None, _) => continue,
                },
            };
            filled.insert(param.name, value);
        }
        self.arguments = filled;
    }
}

impl Signature {
    /// Binds what is there and tolerates what is missing.
    pub fn bind_partial(&self, args: &Args) -> Result<BoundArguments, CurryError> {
        self.bind_with(args, true)
    }

    /// Binds and insists that every required parameter is supplied.
    pub fn bind(&self, args: &Args) -> Result<BoundArguments, CurryError> {
        self.bind_with(args, false)
    }

    fn bind_with(&self, args: &Args, partial: bool) -> Result<BoundArguments, CurryError> {
        let mut bound: IndexMap<Symbol, Value> = IndexMap::new();

        let positional: Vec<_> = self
            .params()
            .iter()
            .filter(|param| param.accepts_positional())
            .collect();
        for (param, value) in positional.iter().zip(args.pos.iter()) {
            bound.insert(param.name, value.clone());
        }
        if args.pos.len() > positional.len() {
            match self.var_positional() {
                Some(rest) => {
                    let overflow = args.pos[positional.len()..].to_vec();
                    bound.insert(rest.name, Value::list(overflow));
                }
                None => {
                    return Err(CurryError::TooManyPositional {
                        max: positional.len(),
                        given: args.pos.len(),
                    })
                }
            }
        }

        let mut extra: IndexMap<Symbol, Value> = IndexMap::new();
        for (key, value) in args.kw.iter() {
            match self.find(*key) {
                Some(param) if param.accepts_keyword() => {
                    if bound.contains_key(key) {
                        return Err(CurryError::MultipleValues(*key));
                    }
                    bound.insert(*key, value.clone());
                }
                Some(param)
                    if param.kind == ParamKind::PositionalOnly && self.var_keyword().is_none() =>
                {
                    return Err(CurryError::PositionalOnlyKeyword(*key));
                }
                _ => {
                    if self.var_keyword().is_none() {
                        return Err(CurryError::UnexpectedKeyword(*key));
                    }
                    extra.insert(*key, value.clone());
                }
            }
        }
        if let Some(rest) = self.var_keyword() {
            if !extra.is_empty() {
                bound.insert(rest.name, Value::dict(extra));
            }
        }

        if !partial {
            if let Some(missing) = self
                .params()
                .iter()
                .find(|param| param.is_required() && !bound.contains_key(&param.name))
            {
                return Err(CurryError::MissingArgument(missing.name));
            }
        }

        // declaration order, whatever order the arguments came in
        let mut arguments = IndexMap::with_capacity(bound.len());
        for param in self.params() {
            if let Some(value) = bound.swap_remove(&param.name) {
                arguments.insert(param.name, value);
            }
        }
        Ok(BoundArguments { arguments })
    }
}

#[cfg(test)]
fn sig(src: &str) -> Signature {
    src.parse().unwrap()
}

#[test]
fn bind_partial_test() {
    let s = sig("a, b, c=3");
    let bound = s.bind_partial(&Args::new().arg(1)).unwrap();
    assert!(bound.contains("a"));
    assert!(!bound.contains("b"));
    assert!(!bound.contains("c"));

    let bound = s.bind_partial(&Args::new().kwarg("c", 0).arg(1)).unwrap();
    let names: Vec<&str> = bound.arguments().keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn bind_overflow_test() {
    let s = sig("a, *rest");
    let bound = s.bind_partial(&Args::new().arg(1).arg(2).arg(3)).unwrap();
    assert_eq!(
        bound.get("rest"),
        Some(&Value::list(vec![Value::Int(2), Value::Int(3)]))
    );

    assert_eq!(
        sig("a").bind_partial(&Args::new().arg(1).arg(2)),
        Err(CurryError::TooManyPositional { max: 1, given: 2 })
    );
}

#[test]
fn bind_keyword_errors_test() {
    let s = sig("a, /, b");
    assert_eq!(
        s.bind_partial(&Args::new().arg(1).arg(2).kwarg("b", 3)),
        Err(CurryError::MultipleValues(Symbol::new("b")))
    );
    assert_eq!(
        s.bind_partial(&Args::new().kwarg("a", 1)),
        Err(CurryError::PositionalOnlyKeyword(Symbol::new("a")))
    );
    assert_eq!(
        s.bind_partial(&Args::new().kwarg("z", 1)),
        Err(CurryError::UnexpectedKeyword(Symbol::new("z")))
    );

    // a var-keyword parameter takes in everything else
    let s = sig("a, /, **opts");
    let bound = s.bind_partial(&Args::new().kwarg("a", 1)).unwrap();
    assert!(!bound.contains("a"));
    assert_eq!(bound.get("opts").unwrap().as_dict().unwrap().len(), 1);
}

#[test]
fn bind_strict_test() {
    let s = sig("x, *, y, z=0");
    assert_eq!(
        s.bind(&Args::new().arg(1)),
        Err(CurryError::MissingArgument(Symbol::new("y")))
    );
    let mut bound = s.bind(&Args::new().arg(1).kwarg("y", 2)).unwrap();
    assert_eq!(bound.len(), 2);
    bound.apply_defaults(&s);
    assert_eq!(bound.get("z"), Some(&Value::Int(0)));
}

#[test]
fn apply_defaults_test() {
    let s = sig("*args, **kwargs");
    let mut bound = s.bind(&Args::new()).unwrap();
    assert!(bound.is_empty());
    bound.apply_defaults(&s);
    assert_eq!(bound.get("args"), Some(&Value::list(Vec::new())));
    assert_eq!(bound.get("kwargs"), Some(&Value::dict(IndexMap::new())));
}
