//! Automatic currying for dynamically typed callables.
//!
//! A [`Curry`] wraps a callable and accepts arguments a few at a time. Every
//! call merges the new arguments into the ones collected so far and asks an
//! evaluation [`Checker`] whether the target can run. If it can, the target
//! is called and its result is returned; otherwise a new wrapper holding the
//! merged arguments comes back.
//!
//! ```
//! use curry_lang::{args, curry, Function, Value};
//!
//! let add = Function::bound("add", "a, b, c".parse().unwrap(), |bound| {
//!     let a = bound.arg("a")?.as_int()?;
//!     let b = bound.arg("b")?.as_int()?;
//!     let c = bound.arg("c")?.as_int()?;
//!     Ok(Value::Int(a + b + c))
//! });
//! let add = curry(add);
//! let sum = add
//!     .invoke(args![1])
//!     .and_then(|partial| partial.call(args![2]))
//!     .and_then(|partial| partial.call(args![3]))
//!     .unwrap();
//! assert_eq!(sum, Value::Int(6));
//! ```

pub mod error;

pub mod utils {
    pub mod intern;
}

pub mod object {
    pub mod args;
    pub mod class;
    pub mod printer;
    pub mod value;
}

pub mod signature {
    pub mod bind;
    pub mod param;
    pub mod parser;
}

pub mod curry {
    pub mod checker;
    pub mod options;
    pub mod wrapper;
}

pub use crate::curry::checker::{arity_checker, count_checker, Checker};
pub use crate::curry::options::{CacheKey, CurryOptions};
pub use crate::curry::wrapper::{curry, Applied, Curry};
pub use crate::error::CurryError;
pub use crate::object::args::Args;
pub use crate::object::class::{Class, Object};
pub use crate::object::value::{Callable, Function, Value};
pub use crate::signature::bind::BoundArguments;
pub use crate::signature::param::{Param, ParamKind, Signature};
pub use crate::utils::intern::Symbol;
