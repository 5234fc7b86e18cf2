use crate::curry::checker::Checker;
use crate::error::CurryError;
use crate::object::args::Args;
use crate::object::class::Object;
use crate::object::value::{Callable, Value};
use crate::signature::param::Signature;
use crate::utils::intern::Symbol;
use std::rc::Rc;

struct CurryData {
    target: Rc<dyn Callable>,
    checker: Checker,
    args: Args,
    cache_key: Option<Symbol>,
    name: Symbol,
    doc: Option<Rc<str>>,
}

/// A callable that collects arguments until its checker is satisfied.
///
/// Wrappers never change: a call that falls short returns a new wrapper
/// holding the merged arguments and leaves this one as it was, so a partial
/// application can be reused any number of times.
#[derive(Clone)]
pub struct Curry(Rc<CurryData>);

/// Outcome of one call on a [`Curry`].
#[derive(Clone, Debug)]
pub enum Applied {
    Done(Value),
    Partial(Curry),
}

/// Wraps `target` with the arity checker and no cache key.
pub fn curry<C: Callable + 'static>(target: C) -> Curry {
    Curry::wrap(target, None, None)
}

impl Curry {
    /// Without a `checker`, the arity checker of `target` is used.
    pub fn wrap<C: Callable + 'static>(
        target: C,
        checker: Option<Checker>,
        cache_key: Option<Symbol>,
    ) -> Curry {
        Curry::wrap_rc(Rc::new(target), checker, cache_key)
    }

    pub fn wrap_rc(
        target: Rc<dyn Callable>,
        checker: Option<Checker>,
        cache_key: Option<Symbol>,
    ) -> Curry {
        let checker = checker.unwrap_or_else(|| Checker::arity(target.as_ref()));
        let name = target.name();
        let doc = target.doc().map(Rc::from);
        Curry(Rc::new(CurryData {
            target,
            checker,
            args: Args::new(),
            cache_key,
            name,
            doc,
        }))
    }

    fn with_args(&self, args: Args) -> Curry {
        Curry(Rc::new(CurryData {
            target: self.0.target.clone(),
            checker: self.0.checker.clone(),
            args,
            cache_key: self.0.cache_key,
            name: self.0.name,
            doc: self.0.doc.clone(),
        }))
    }

    pub fn name(&self) -> Symbol {
        self.0.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.0.doc.as_deref()
    }

    pub fn target(&self) -> &Rc<dyn Callable> {
        &self.0.target
    }

    pub fn checker(&self) -> &Checker {
        &self.0.checker
    }

    /// Arguments collected so far.
    pub fn args(&self) -> &Args {
        &self.0.args
    }

    pub fn cache_key(&self) -> Option<Symbol> {
        self.0.cache_key
    }

    /// Merges `args` into the collected ones and either calls the target or
    /// returns the next partial wrapper. Errors from the checker and from the
    /// target are returned as they are.
    pub fn apply(&self, args: Args) -> Result<Applied, CurryError> {
        let merged = self.0.args.merge(&args);
        if self.0.checker.check(&merged)? {
            tracing::trace!(
                func = %self.0.name,
                positional = merged.pos.len(),
                keyword = merged.kw.len(),
                "arguments complete, calling target"
            );
            self.0.target.call(merged).map(Applied::Done)
        } else {
            tracing::trace!(
                func = %self.0.name,
                positional = merged.pos.len(),
                keyword = merged.kw.len(),
                "arguments incomplete, deferring"
            );
            Ok(Applied::Partial(self.with_args(merged)))
        }
    }

    /// [`Curry::apply`], with a partial result returned as [`Value::Curry`].
    pub fn invoke(&self, args: Args) -> Result<Value, CurryError> {
        match self.apply(args)? {
            Applied::Done(value) => Ok(value),
            Applied::Partial(curry) => Ok(Value::Curry(curry)),
        }
    }

    /// Attribute access: through a class (`None`) the wrapper itself comes
    /// back, through an object it is bound to that object.
    pub fn get(&self, owner: Option<&Object>) -> Curry {
        match owner {
            None => self.clone(),
            Some(obj) => self.bind_to(obj),
        }
    }

    /// Returns a wrapper with `obj` as the next positional argument: the
    /// first one, unless arguments were already collected.
    ///
    /// With a cache key the bound wrapper is also stored on `obj` under that
    /// key, where [`Object::get_attr`] finds it before reaching the class.
    /// The target is fixed at that point; changing the class attribute
    /// later does not affect the cached wrapper.
    pub fn bind_to(&self, obj: &Object) -> Curry {
        let mut args = self.0.args.clone();
        args.pos.push(Value::Object(obj.clone()));
        let bound = self.with_args(args);
        if let Some(key) = self.0.cache_key {
            tracing::debug!(func = %self.0.name, key = %key, "caching bound wrapper on instance");
            obj.set_attr(key, Value::Curry(bound.clone()));
        }
        bound
    }

    pub fn ptr_eq(&self, other: &Curry) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Callable for Curry {
    fn name(&self) -> Symbol {
        self.0.name
    }

    fn doc(&self) -> Option<&str> {
        self.0.doc.as_deref()
    }

    fn signature(&self) -> Signature {
        Signature::variadic()
    }

    fn call(&self, args: Args) -> Result<Value, CurryError> {
        self.invoke(args)
    }
}

#[cfg(test)]
fn subtract() -> crate::object::value::Function {
    crate::object::value::Function::bound("subtract", "a, b".parse().unwrap(), |bound| {
        Ok(Value::Int(bound.arg("a")?.as_int()? - bound.arg("b")?.as_int()?))
    })
    .with_doc("Subtracts b from a.")
}

#[test]
fn apply_test() {
    let sub = curry(subtract());
    let partial = match sub.apply(Args::new().arg(10)).unwrap() {
        Applied::Partial(curry) => curry,
        Applied::Done(value) => panic!("called too early: {}", value),
    };
    assert_eq!(partial.args().pos, vec![Value::Int(10)]);
    assert!(sub.args().is_empty());

    assert_eq!(partial.invoke(Args::new().arg(3)), Ok(Value::Int(7)));
    // the partial can be reused
    assert_eq!(partial.invoke(Args::new().arg(4)), Ok(Value::Int(6)));
    assert_eq!(sub.invoke(Args::new().kwarg("b", 1).kwarg("a", 5)), Ok(Value::Int(4)));
}

#[test]
fn metadata_test() {
    let sub = curry(subtract());
    assert_eq!(sub.name().as_str(), "subtract");
    assert_eq!(sub.doc(), Some("Subtracts b from a."));
    assert_eq!(sub.to_string(), "<curry of <function subtract>>");

    let partial = sub.invoke(Args::new().arg(1)).unwrap();
    let partial = partial.as_curry().unwrap();
    assert_eq!(partial.name(), sub.name());
    assert!(partial.checker().ptr_eq(sub.checker()));
}

#[test]
fn checker_error_propagates_test() {
    let sub = curry(subtract());
    assert_eq!(
        sub.invoke(Args::new().kwarg("c", 1)),
        Err(CurryError::UnexpectedKeyword(Symbol::new("c")))
    );
}

#[test]
fn curry_of_curry_test() {
    // an outer wrapper always forwards: the inner one decides
    let outer = curry(curry(subtract()));
    let partial = outer.invoke(Args::new().arg(2)).unwrap();
    assert_eq!(partial.type_name(), "curry");
    assert_eq!(partial.call(Args::new().arg(1)), Ok(Value::Int(1)));
    assert_eq!(outer.to_string(), "<curry of <curry of <function subtract>>>");
}
