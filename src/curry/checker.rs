use crate::error::CurryError;
use crate::object::args::Args;
use crate::object::value::{Callable, Value};
use crate::signature::param::Signature;
use std::fmt;
use std::rc::Rc;

type Predicate = dyn Fn(&Args) -> Result<bool, CurryError>;

/// Decides whether a merged argument set is enough to call the target.
///
/// A checker that never answers `true` turns every call into another partial
/// wrapper. Nothing detects that; picking a checker that can be satisfied is
/// up to the caller.
#[derive(Clone)]
pub struct Checker(Rc<Predicate>);

impl Checker {
    pub fn new<F>(pred: F) -> Checker
    where
        F: Fn(&Args) -> Result<bool, CurryError> + 'static,
    {
        Checker(Rc::new(pred))
    }

    /// Satisfied once every required parameter of `target` is bound.
    pub fn arity(target: &dyn Callable) -> Checker {
        Checker::from_signature(target.signature(), target.is_constructor())
    }

    /// Like [`Checker::arity`], from an explicit descriptor. For a
    /// constructor the first parameter is the receiver: candidates get a
    /// placeholder in its slot and it is never reported missing.
    pub fn from_signature(sig: Signature, constructor: bool) -> Checker {
        let skip = usize::from(constructor);
        Checker::new(move |args| {
            let bound = if constructor {
                sig.bind_partial(&args.with_receiver(Value::Unit))?
            } else {
                sig.bind_partial(args)?
            };
            for param in sig.params().iter().skip(skip) {
                if !bound.contains(param.name) && param.is_required() {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// Satisfied once at least `count` positional arguments are present.
    pub fn count(count: usize) -> Checker {
        Checker::new(move |args| Ok(args.pos.len() >= count))
    }

    pub fn check(&self, args: &Args) -> Result<bool, CurryError> {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Checker) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checker(...)")
    }
}

pub fn arity_checker(target: &dyn Callable) -> Checker {
    Checker::arity(target)
}

pub fn count_checker(count: usize) -> Checker {
    Checker::count(count)
}

#[cfg(test)]
fn check(checker: &Checker, args: Args) -> bool {
    checker.check(&args).unwrap()
}

#[test]
fn arity_checker_test() {
    let sig: Signature = "x, y=0, *rest, **opts".parse().unwrap();
    let checker = Checker::from_signature(sig, false);
    assert!(!check(&checker, Args::new()));
    assert!(!check(&checker, Args::new().kwarg("y", 1)));
    assert!(!check(&checker, Args::new().kwarg("other", 1)));
    assert!(check(&checker, Args::new().arg(1)));
    assert!(check(&checker, Args::new().kwarg("x", 1)));
    assert!(check(&checker, Args::new().arg(1).arg(2).arg(3)));
}

#[test]
fn arity_checker_keyword_only_test() {
    let sig: Signature = "a, *, key".parse().unwrap();
    let checker = Checker::from_signature(sig, false);
    assert!(!check(&checker, Args::new().arg(1)));
    assert!(check(&checker, Args::new().arg(1).kwarg("key", 2)));
}

#[test]
fn arity_checker_constructor_test() {
    let sig: Signature = "self, size".parse().unwrap();
    let checker = Checker::from_signature(sig.clone(), true);
    assert!(!check(&checker, Args::new()));
    assert!(check(&checker, Args::new().arg(3)));
    assert!(check(&checker, Args::new().kwarg("size", 3)));

    let receiver_only = Checker::from_signature(Signature::receiver(), true);
    assert!(check(&receiver_only, Args::new()));
}

#[test]
fn arity_checker_error_test() {
    let checker = Checker::from_signature("a".parse().unwrap(), false);
    assert_eq!(
        checker.check(&Args::new().arg(1).arg(2)),
        Err(CurryError::TooManyPositional { max: 1, given: 2 })
    );
}

#[test]
fn count_checker_test() {
    let checker = count_checker(2);
    assert!(!check(&checker, Args::new().arg(1).kwarg("a", 1).kwarg("b", 2)));
    assert!(check(&checker, Args::new().arg(1).arg(2)));
    assert!(check(&checker, Args::new().arg(1).arg(2).arg(3)));
    assert!(check(&count_checker(0), Args::new()));
}
