use crate::error::CurryError;
use crate::object::args::Args;
use crate::object::value::{Callable, Function, Value};
use crate::signature::param::{ParamKind, Signature};
use crate::utils::intern::Symbol;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

struct ClassData {
    name: Symbol,
    init: Option<Function>,
    attrs: RefCell<IndexMap<Symbol, Value>>,
}

/// A class: a constructor plus a table of attributes shared by its objects.
#[derive(Clone)]
pub struct Class(Rc<ClassData>);

impl Class {
    pub fn new(name: &str) -> Class {
        Class(Rc::new(ClassData {
            name: Symbol::new(name),
            init: None,
            attrs: RefCell::new(IndexMap::new()),
        }))
    }

    /// `init` is called with the fresh object in front of the constructor
    /// arguments, so its first parameter must accept a positional argument.
    pub fn with_init(name: &str, init: Function) -> Result<Class, CurryError> {
        let sig = init.signature();
        let receiver_ok = sig.params().first().map_or(false, |param| {
            param.accepts_positional() || param.kind == ParamKind::VarPositional
        });
        if !receiver_ok {
            return Err(CurryError::InvalidSignature(format!(
                "initializer of '{}' must take the instance first",
                name
            )));
        }
        Ok(Class(Rc::new(ClassData {
            name: Symbol::new(name),
            init: Some(init),
            attrs: RefCell::new(IndexMap::new()),
        })))
    }

    pub fn init(&self) -> Option<&Function> {
        self.0.init.as_ref()
    }

    pub fn set_attr<K: Into<Symbol>, V: Into<Value>>(&self, name: K, value: V) {
        self.0.attrs.borrow_mut().insert(name.into(), value.into());
    }

    /// Reads an attribute through the class itself: wrappers come back as
    /// they were stored, unbound.
    pub fn get_attr<K: Into<Symbol>>(&self, name: K) -> Result<Value, CurryError> {
        let name = name.into();
        let found = self.lookup(name);
        match found {
            Some(Value::Curry(curry)) => Ok(Value::Curry(curry.get(None))),
            Some(value) => Ok(value),
            None => Err(CurryError::NoAttribute {
                class: self.0.name,
                name,
            }),
        }
    }

    fn lookup(&self, name: Symbol) -> Option<Value> {
        self.0.attrs.borrow().get(&name).cloned()
    }

    pub fn instantiate(&self, args: Args) -> Result<Object, CurryError> {
        let obj = Object(Rc::new(ObjectData {
            class: self.clone(),
            attrs: RefCell::new(IndexMap::new()),
        }));
        if let Some(init) = &self.0.init {
            init.call(args.with_receiver(Value::Object(obj.clone())))?;
        } else if !args.pos.is_empty() {
            return Err(CurryError::TooManyPositional {
                max: 0,
                given: args.pos.len(),
            });
        } else if let Some(key) = args.kw.keys().next() {
            return Err(CurryError::UnexpectedKeyword(*key));
        }
        tracing::trace!(class = %self.0.name, "instantiated");
        Ok(obj)
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Callable for Class {
    fn name(&self) -> Symbol {
        self.0.name
    }

    fn doc(&self) -> Option<&str> {
        self.0.init.as_ref().and_then(|init| init.doc())
    }

    fn signature(&self) -> Signature {
        match &self.0.init {
            Some(init) => init.signature(),
            None => Signature::receiver(),
        }
    }

    fn is_constructor(&self) -> bool {
        true
    }

    fn call(&self, args: Args) -> Result<Value, CurryError> {
        self.instantiate(args).map(Value::Object)
    }
}

struct ObjectData {
    class: Class,
    attrs: RefCell<IndexMap<Symbol, Value>>,
}

/// An instance of a [`Class`] with its own attribute table.
///
/// Attribute reads look at the instance first and fall back to the class,
/// where a stored wrapper is bound to this object on the way out. A wrapper
/// cached on the object refers back to it; remove the cache entry with
/// [`Object::del_attr`] to break that cycle.
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

impl Object {
    pub fn class(&self) -> &Class {
        &self.0.class
    }

    pub fn get_attr<K: Into<Symbol>>(&self, name: K) -> Result<Value, CurryError> {
        let name = name.into();
        let own = self.0.attrs.borrow().get(&name).cloned();
        if let Some(value) = own {
            return Ok(value);
        }
        match self.0.class.lookup(name) {
            Some(Value::Curry(curry)) => Ok(Value::Curry(curry.get(Some(self)))),
            Some(value) => Ok(value),
            None => Err(CurryError::NoAttribute {
                class: self.0.class.name(),
                name,
            }),
        }
    }

    pub fn set_attr<K: Into<Symbol>, V: Into<Value>>(&self, name: K, value: V) {
        self.0.attrs.borrow_mut().insert(name.into(), value.into());
    }

    pub fn has_attr<K: Into<Symbol>>(&self, name: K) -> bool {
        self.0.attrs.borrow().contains_key(&name.into())
    }

    pub fn del_attr<K: Into<Symbol>>(&self, name: K) -> Option<Value> {
        self.0.attrs.borrow_mut().shift_remove(&name.into())
    }

    pub fn call_method<K: Into<Symbol>>(&self, name: K, args: Args) -> Result<Value, CurryError> {
        self.get_attr(name)?.call(args)
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[test]
fn instantiate_test() {
    let init = Function::new("__init__", "self, x".parse().unwrap(), |args| {
        let obj = args.pos[0].as_object()?;
        obj.set_attr("x", args.pos[1].clone());
        Ok(Value::Unit)
    });
    let point = Class::with_init("Point", init).unwrap();
    let obj = point.call(Args::new().arg(5)).unwrap();
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.get_attr("x"), Ok(Value::Int(5)));
    assert!(obj.class().ptr_eq(&point));
    assert_eq!(
        obj.get_attr("y"),
        Err(CurryError::NoAttribute {
            class: Symbol::new("Point"),
            name: Symbol::new("y"),
        })
    );

    let bare = Class::new("Bare");
    assert!(bare.call(Args::new()).is_ok());
    assert_eq!(
        bare.call(Args::new().arg(1)),
        Err(CurryError::TooManyPositional { max: 0, given: 1 })
    );
    assert_eq!(
        bare.call(Args::new().kwarg("x", 1).kwarg("y", 2)),
        Err(CurryError::UnexpectedKeyword(Symbol::new("x")))
    );
}

#[test]
fn attribute_lookup_order_test() {
    let class = Class::new("Holder");
    class.set_attr("shared", 1);
    let obj = class.instantiate(Args::new()).unwrap();
    assert_eq!(obj.get_attr("shared"), Ok(Value::Int(1)));

    obj.set_attr("shared", 2);
    assert_eq!(obj.get_attr("shared"), Ok(Value::Int(2)));
    assert_eq!(class.get_attr("shared"), Ok(Value::Int(1)));

    assert_eq!(obj.del_attr("shared"), Some(Value::Int(2)));
    assert!(!obj.has_attr("shared"));
    assert_eq!(obj.get_attr("shared"), Ok(Value::Int(1)));
}

#[test]
fn initializer_must_take_receiver_test() {
    let init = Function::new("__init__", "*, x".parse().unwrap(), |_| Ok(Value::Unit));
    assert!(matches!(
        Class::with_init("Broken", init),
        Err(CurryError::InvalidSignature(_))
    ));
}
