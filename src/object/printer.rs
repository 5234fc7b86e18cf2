use super::class::{Class, Object};
use super::value::{Callable, Function, Value};
use crate::curry::wrapper::Curry;
use itertools::Itertools;
use std::fmt;

fn quote(s: &str) -> String {
    let escaped = snailquote::escape(s);
    if escaped.starts_with('\'') || escaped.starts_with('"') {
        escaped.into_owned()
    } else {
        // snailquote leaves plain words bare
        format!("'{}'", escaped)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "None"),
            Value::Int(x) => write!(f, "{}", x),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Char(x) => write!(f, "{:?}", x),
            Value::Str(x) => write!(f, "{}", quote(x)),
            Value::List(xs) => write!(f, "[{}]", xs.iter().format(", ")),
            Value::Dict(map) => {
                let entries = map.iter().format_with(", ", |(k, v), cb| {
                    cb(&format_args!("{}: {}", quote(k.as_str()), v))
                });
                write!(f, "{{{}}}", entries)
            }
            Value::Func(func) => write!(f, "{}", func),
            Value::Curry(curry) => write!(f, "{}", curry),
            Value::Class(class) => write!(f, "{}", class),
            Value::Object(obj) => write!(f, "{}", obj),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "Unit"),
            Value::Int(x) => write!(f, "Int({:?})", x),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Bool(x) => write!(f, "Bool({:?})", x),
            Value::Char(x) => write!(f, "Char({:?})", x),
            Value::Str(x) => write!(f, "Str({:?})", x),
            Value::List(xs) => f.debug_list().entries(xs.iter()).finish(),
            Value::Dict(map) => f.debug_map().entries(map.iter()).finish(),
            // objects reach their attributes, and cached wrappers reach the
            // object again, so only names are shown from here on
            Value::Func(func) => write!(f, "Func({})", func.name()),
            Value::Curry(curry) => write!(f, "Curry({})", curry.name()),
            Value::Class(class) => write!(f, "Class({})", class.name()),
            Value::Object(obj) => write!(f, "Object({})", obj.class().name()),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}({}))", self.name(), self.signature())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.name())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object>", self.class().name())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.class().name())
    }
}

impl fmt::Display for Curry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<curry of {}>", self.target())
    }
}

impl fmt::Debug for Curry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curry")
            .field("name", &self.name())
            .field("args", self.args())
            .field("cache_key", &self.cache_key())
            .finish()
    }
}

#[test]
fn value_display_test() {
    use crate::utils::intern::Symbol;
    use indexmap::IndexMap;

    let mut map = IndexMap::new();
    map.insert(Symbol::new("k"), Value::Int(2));
    map.insert(Symbol::new("a"), Value::from("x"));
    let cases = vec![
        (Value::Unit, "None"),
        (Value::Float(3.0), "3.0"),
        (Value::Float(0.25), "0.25"),
        (Value::Bool(false), "False"),
        (Value::Char('c'), "'c'"),
        (Value::from("word"), "'word'"),
        (Value::list(vec![Value::Int(1), Value::Bool(true)]), "[1, True]"),
        (Value::dict(map), "{'k': 2, 'a': 'x'}"),
    ];
    for (value, expected) in cases {
        assert_eq!(value.to_string(), expected);
    }
}
