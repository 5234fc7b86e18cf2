use crate::curry::checker::Checker;
use crate::curry::wrapper::Curry;
use crate::object::value::Callable;
use crate::utils::intern::Symbol;
use std::rc::Rc;

/// Where a wrapper bound to an object gets cached on that object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheKey {
    #[default]
    Disabled,
    /// Under the wrapped target's own name.
    TargetName,
    Named(Symbol),
}

/// Partial configuration for wrapping, reusable across many targets.
///
/// ```
/// use curry_lang::{args, CurryOptions, Function, Signature, Value};
///
/// let product = Function::new("product", Signature::variadic(), |args| {
///     let mut acc = 1;
///     for arg in args.pos.iter() {
///         acc *= arg.as_int()?;
///     }
///     Ok(Value::Int(acc))
/// });
/// let wrapped = CurryOptions::new().count(3).wrap(product);
/// let partial = wrapped.invoke(args![2]).unwrap();
/// assert_eq!(partial.call(args![3, 4]).unwrap(), Value::Int(24));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CurryOptions {
    pub checker: Option<Checker>,
    pub cache: CacheKey,
}

impl CurryOptions {
    pub fn new() -> CurryOptions {
        CurryOptions::default()
    }

    pub fn checker(mut self, checker: Checker) -> CurryOptions {
        self.checker = Some(checker);
        self
    }

    /// Shorthand for a [`Checker::count`] checker.
    pub fn count(self, count: usize) -> CurryOptions {
        self.checker(Checker::count(count))
    }

    pub fn cache_key(mut self, key: &str) -> CurryOptions {
        self.cache = CacheKey::Named(Symbol::new(key));
        self
    }

    pub fn cache_by_name(mut self) -> CurryOptions {
        self.cache = CacheKey::TargetName;
        self
    }

    pub fn wrap<C: Callable + 'static>(&self, target: C) -> Curry {
        self.wrap_rc(Rc::new(target))
    }

    pub fn wrap_rc(&self, target: Rc<dyn Callable>) -> Curry {
        let cache_key = match self.cache {
            CacheKey::Disabled => None,
            CacheKey::TargetName => Some(target.name()),
            CacheKey::Named(key) => Some(key),
        };
        Curry::wrap_rc(target, self.checker.clone(), cache_key)
    }
}

#[test]
fn cache_key_resolution_test() {
    use crate::object::value::Function;
    use crate::signature::param::Signature;

    let target = || Function::new("method", Signature::variadic(), |_| Ok(().into()));
    assert_eq!(CurryOptions::new().wrap(target()).cache_key(), None);
    assert_eq!(
        CurryOptions::new().cache_by_name().wrap(target()).cache_key(),
        Some(Symbol::new("method"))
    );
    assert_eq!(
        CurryOptions::new().cache_key("other").wrap(target()).cache_key(),
        Some(Symbol::new("other"))
    );
}

#[test]
fn configured_factory_test() {
    use crate::object::args::Args;
    use crate::object::value::{Function, Value};
    use crate::signature::param::Signature;

    let options = CurryOptions::new().count(2);
    let first = Function::new("first", Signature::variadic(), |args| Ok(args.pos[0].clone()));
    let len = Function::new("len", Signature::variadic(), |args| {
        Ok(Value::Int(args.pos.len() as i64))
    });
    let first = options.wrap(first);
    let len = options.wrap(len);

    assert!(first.checker().ptr_eq(len.checker()));
    let partial = len.invoke(Args::new().arg(1)).unwrap();
    assert_eq!(partial.call(Args::new().arg(2).arg(3)), Ok(Value::Int(3)));
    assert_eq!(first.invoke(Args::new().arg("a").arg("b")), Ok(Value::from("a")));
}
