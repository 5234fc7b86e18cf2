use crate::object::value::Value;
use crate::utils::intern::Symbol;
use indexmap::IndexMap;

/// Positional and keyword arguments of one call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    pub pos: Vec<Value>,
    pub kw: IndexMap<Symbol, Value>,
}

impl Args {
    pub fn new() -> Args {
        Args {
            pos: Vec::new(),
            kw: IndexMap::new(),
        }
    }

    pub fn arg<V: Into<Value>>(mut self, value: V) -> Args {
        self.pos.push(value.into());
        self
    }

    pub fn kwarg<K: Into<Symbol>, V: Into<Value>>(mut self, key: K, value: V) -> Args {
        self.kw.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty() && self.kw.is_empty()
    }

    /// Positionals of `other` go after ours; its keywords replace ours.
    pub fn merge(&self, other: &Args) -> Args {
        let mut merged = self.clone();
        merged.pos.extend(other.pos.iter().cloned());
        for (key, value) in other.kw.iter() {
            merged.kw.insert(*key, value.clone());
        }
        merged
    }

    /// A copy with `receiver` in front of every positional.
    pub fn with_receiver(&self, receiver: Value) -> Args {
        let mut pos = Vec::with_capacity(self.pos.len() + 1);
        pos.push(receiver);
        pos.extend(self.pos.iter().cloned());
        Args {
            pos,
            kw: self.kw.clone(),
        }
    }
}

/// Builds an [`Args`]: positionals first, keywords after a semicolon.
///
/// ```
/// use curry_lang::{args, Value};
///
/// let args = args![1, "two"; scale = 3.0];
/// assert_eq!(args.pos, vec![Value::Int(1), Value::from("two")]);
/// assert_eq!(args.kw.len(), 1);
/// ```
#[macro_export]
macro_rules! args {
    ($($pos:expr),* $(; $($key:ident = $val:expr),* )?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::object::args::Args::new();
        $( args = args.arg($pos); )*
        $($( args = args.kwarg(stringify!($key), $val); )*)?
        args
    }};
}

#[test]
fn merge_test() {
    let first = Args::new().arg(1).kwarg("a", 1).kwarg("b", 2);
    let second = Args::new().arg(2).arg(3).kwarg("a", 10).kwarg("c", 3);
    let merged = first.merge(&second);

    assert_eq!(merged.pos, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let keys: Vec<&str> = merged.kw.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(merged.kw[&Symbol::new("a")], Value::Int(10));

    // the inputs are left alone
    assert_eq!(first.pos.len(), 1);
    assert_eq!(first.kw[&Symbol::new("a")], Value::Int(1));
}

#[test]
fn args_macro_test() {
    assert!(args![].is_empty());
    assert_eq!(args![1, 2], Args::new().arg(1).arg(2));
    assert_eq!(args![; k = true], Args::new().kwarg("k", true));
    assert_eq!(
        args![0; x = 1, y = "z"].with_receiver(Value::Unit),
        Args::new().arg(()).arg(0).kwarg("x", 1).kwarg("y", "z")
    );
}
