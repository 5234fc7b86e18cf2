use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync;

static INTERNER: Lazy<sync::Mutex<Interner>> = Lazy::new(|| {
    let interner = Interner {
        str_to_idx: HashMap::new(),
        idx_to_str: Vec::new(),
    };
    sync::Mutex::new(interner)
});

struct Interner {
    str_to_idx: HashMap<String, usize>,
    idx_to_str: Vec<&'static str>,
}

/// An interned name: parameter names, keyword argument keys, attribute names.
#[derive(Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Symbol(usize);

impl Symbol {
    pub fn new<S: AsRef<str>>(s: S) -> Symbol {
        let mut interner = INTERNER.lock().unwrap();
        if let Some(idx) = interner.str_to_idx.get(s.as_ref()) {
            Symbol(*idx)
        } else {
            let s = s.as_ref().to_string();
            let idx = interner.idx_to_str.len();
            interner.str_to_idx.insert(s.clone(), idx);
            interner.idx_to_str.push(Box::leak(s.into_boxed_str()));
            Symbol(idx)
        }
    }

    pub fn as_str(&self) -> &'static str {
        let interner = INTERNER.lock().unwrap();
        interner.idx_to_str[self.0]
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Symbol {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Symbol {
        Symbol::new(s)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[test]
fn symbol_test() {
    use crate::object::args::Args;

    let args = Args::new().kwarg("scale", 2).kwarg(String::from("offset"), 1);
    let keys: Vec<&str> = args.kw.keys().map(Symbol::as_str).collect();
    assert_eq!(keys, vec!["scale", "offset"]);

    // a key built from a String finds the entry stored under a &str
    let scale = Symbol::from(format!("sc{}", "ale"));
    assert!(args.kw.contains_key(&scale));
    assert_ne!(scale, Symbol::new("offset"));

    assert_eq!(format!("got '{}'", scale), "got 'scale'");
    assert_eq!(format!("{:?}", args.kw.keys().collect::<Vec<_>>()), "[scale, offset]");
}
