use crate::curry::wrapper::Curry;
use crate::error::CurryError;
use crate::object::args::Args;
use crate::object::class::{Class, Object};
use crate::signature::bind::BoundArguments;
use crate::signature::param::Signature;
use crate::utils::intern::Symbol;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A dynamically typed value, the currency of every call.
#[derive(Clone)]
pub enum Value {
    Unit,
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),
    Dict(Rc<IndexMap<Symbol, Value>>),
    Func(Function),
    Curry(Curry),
    Class(Class),
    Object(Object),
}

fn mismatch(expected: &'static str, found: &Value) -> CurryError {
    CurryError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "NoneType",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Func(_) => "function",
            Value::Curry(_) => "curry",
            Value::Class(_) => "type",
            Value::Object(_) => "object",
        }
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn dict(entries: IndexMap<Symbol, Value>) -> Value {
        Value::Dict(Rc::new(entries))
    }

    pub fn as_int(&self) -> Result<i64, CurryError> {
        match self {
            Value::Int(x) => Ok(*x),
            other => Err(mismatch("int", other)),
        }
    }

    /// Ints are promoted, as arithmetic on mixed operands expects.
    pub fn as_float(&self) -> Result<f64, CurryError> {
        match self {
            Value::Float(x) => Ok(*x),
            Value::Int(x) => Ok(*x as f64),
            other => Err(mismatch("float", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, CurryError> {
        match self {
            Value::Bool(x) => Ok(*x),
            other => Err(mismatch("bool", other)),
        }
    }

    pub fn as_char(&self) -> Result<char, CurryError> {
        match self {
            Value::Char(x) => Ok(*x),
            other => Err(mismatch("char", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str, CurryError> {
        match self {
            Value::Str(x) => Ok(x),
            other => Err(mismatch("str", other)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], CurryError> {
        match self {
            Value::List(x) => Ok(x),
            other => Err(mismatch("list", other)),
        }
    }

    pub fn as_dict(&self) -> Result<&IndexMap<Symbol, Value>, CurryError> {
        match self {
            Value::Dict(x) => Ok(x),
            other => Err(mismatch("dict", other)),
        }
    }

    pub fn as_curry(&self) -> Result<&Curry, CurryError> {
        match self {
            Value::Curry(x) => Ok(x),
            other => Err(mismatch("curry", other)),
        }
    }

    pub fn as_object(&self) -> Result<&Object, CurryError> {
        match self {
            Value::Object(x) => Ok(x),
            other => Err(mismatch("object", other)),
        }
    }

    pub fn as_class(&self) -> Result<&Class, CurryError> {
        match self {
            Value::Class(x) => Ok(x),
            other => Err(mismatch("type", other)),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Func(_) | Value::Curry(_) | Value::Class(_))
    }

    /// Calls a function, wrapper or class held in this value.
    pub fn call(&self, args: Args) -> Result<Value, CurryError> {
        match self {
            Value::Func(func) => func.call(args),
            Value::Curry(curry) => curry.invoke(args),
            Value::Class(class) => class.call(args),
            other => Err(CurryError::NotCallable(other.type_name().to_string())),
        }
    }
}

// functions, wrappers, classes and objects compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x == y,
            (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => {
                *x as f64 == *y
            }
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Char(x), Value::Char(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::List(x), Value::List(y)) => x == y,
            (Value::Dict(x), Value::Dict(y)) => x == y,
            (Value::Func(x), Value::Func(y)) => x.ptr_eq(y),
            (Value::Curry(x), Value::Curry(y)) => x.ptr_eq(y),
            (Value::Class(x), Value::Class(y)) => x.ptr_eq(y),
            (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Unit
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Value {
        Value::Int(x as i64)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Value {
        Value::Int(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Value {
        Value::Bool(x)
    }
}

impl From<char> for Value {
    fn from(x: char) -> Value {
        Value::Char(x)
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Value {
        Value::Str(Rc::from(x))
    }
}

impl From<String> for Value {
    fn from(x: String) -> Value {
        Value::Str(Rc::from(x))
    }
}

impl From<Vec<Value>> for Value {
    fn from(x: Vec<Value>) -> Value {
        Value::list(x)
    }
}

impl From<IndexMap<Symbol, Value>> for Value {
    fn from(x: IndexMap<Symbol, Value>) -> Value {
        Value::dict(x)
    }
}

impl From<Function> for Value {
    fn from(x: Function) -> Value {
        Value::Func(x)
    }
}

impl From<Curry> for Value {
    fn from(x: Curry) -> Value {
        Value::Curry(x)
    }
}

impl From<Class> for Value {
    fn from(x: Class) -> Value {
        Value::Class(x)
    }
}

impl From<Object> for Value {
    fn from(x: Object) -> Value {
        Value::Object(x)
    }
}

/// Anything a [`Curry`] can wrap.
///
/// `signature` is the arity descriptor the default evaluation checker binds
/// against. Constructors report their initializer's signature, receiver
/// included, and return `true` from `is_constructor`.
pub trait Callable: fmt::Display {
    fn name(&self) -> Symbol;
    fn doc(&self) -> Option<&str>;
    fn signature(&self) -> Signature;
    fn is_constructor(&self) -> bool {
        false
    }
    fn call(&self, args: Args) -> Result<Value, CurryError>;
}

type RawBody = dyn Fn(Args) -> Result<Value, CurryError>;
type BoundBody = dyn Fn(&BoundArguments) -> Result<Value, CurryError>;

enum Body {
    Raw(Box<RawBody>),
    Bound(Box<BoundBody>),
}

#[derive(Clone)]
struct FunctionData {
    name: Symbol,
    doc: Option<Rc<str>>,
    sig: Signature,
    body: Rc<Body>,
}

/// A named Rust closure with a declared signature.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    /// The body receives the arguments exactly as supplied.
    pub fn new<F>(name: &str, sig: Signature, body: F) -> Function
    where
        F: Fn(Args) -> Result<Value, CurryError> + 'static,
    {
        Function(Rc::new(FunctionData {
            name: Symbol::new(name),
            doc: None,
            sig,
            body: Rc::new(Body::Raw(Box::new(body))),
        }))
    }

    /// The body receives the arguments strictly bound against `sig`, with
    /// defaults filled in.
    pub fn bound<F>(name: &str, sig: Signature, body: F) -> Function
    where
        F: Fn(&BoundArguments) -> Result<Value, CurryError> + 'static,
    {
        Function(Rc::new(FunctionData {
            name: Symbol::new(name),
            doc: None,
            sig,
            body: Rc::new(Body::Bound(Box::new(body))),
        }))
    }

    /// Returns a copy carrying `doc`. The copy has its own identity.
    pub fn with_doc(&self, doc: &str) -> Function {
        let mut data = (*self.0).clone();
        data.doc = Some(Rc::from(doc));
        Function(Rc::new(data))
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Callable for Function {
    fn name(&self) -> Symbol {
        self.0.name
    }

    fn doc(&self) -> Option<&str> {
        self.0.doc.as_deref()
    }

    fn signature(&self) -> Signature {
        self.0.sig.clone()
    }

    fn call(&self, args: Args) -> Result<Value, CurryError> {
        match self.0.body.as_ref() {
            Body::Raw(body) => body(args),
            Body::Bound(body) => {
                let mut bound = self.0.sig.bind(&args)?;
                bound.apply_defaults(&self.0.sig);
                body(&bound)
            }
        }
    }
}

#[test]
fn value_equality_test() {
    assert_eq!(Value::from(3), Value::Int(3));
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_ne!(Value::from("a"), Value::from('a'));
    assert_eq!(
        Value::list(vec![Value::from(1), Value::from("x")]),
        Value::from(vec![Value::Int(1), Value::from("x".to_string())])
    );

    let sig = Signature::variadic();
    let f = Function::new("f", sig.clone(), |_| Ok(Value::Unit));
    let g = Function::new("f", sig, |_| Ok(Value::Unit));
    assert_eq!(Value::from(f.clone()), Value::Func(f.clone()));
    assert_ne!(Value::from(f.clone()), Value::from(g));
    assert_ne!(Value::from(f.with_doc("doc")), Value::from(f));
}

#[test]
fn value_accessor_test() {
    assert_eq!(Value::Int(4).as_int(), Ok(4));
    assert_eq!(Value::Int(4).as_float(), Ok(4.0));
    assert_eq!(
        Value::from("four").as_int(),
        Err(CurryError::TypeMismatch {
            expected: "int",
            found: "str"
        })
    );
    assert_eq!(
        Value::Bool(true).call(Args::new()),
        Err(CurryError::NotCallable("bool".to_string()))
    );
}

#[test]
fn function_call_test() {
    let sig: Signature = "x, y=10".parse().unwrap();
    let raw = Function::new("raw", sig.clone(), |args| Ok(Value::Int(args.pos.len() as i64)));
    let add = Function::bound("add", sig, |bound| {
        Ok(Value::Int(bound.arg("x")?.as_int()? + bound.arg("y")?.as_int()?))
    })
    .with_doc("Adds two ints.");

    assert_eq!(raw.call(Args::new()), Ok(Value::Int(0)));
    assert_eq!(add.call(Args::new().arg(1)), Ok(Value::Int(11)));
    assert_eq!(add.call(Args::new().arg(1).kwarg("y", 2)), Ok(Value::Int(3)));
    assert_eq!(
        add.call(Args::new()),
        Err(CurryError::MissingArgument(Symbol::new("x")))
    );
    assert_eq!(add.doc(), Some("Adds two ints."));
    assert_eq!(add.name().as_str(), "add");
}
