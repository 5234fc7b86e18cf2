use curry_lang::{args, curry, Class, Curry, CurryOptions, Function, Object, Value};

fn crazy() -> Curry {
    let sig = "a, self".parse().unwrap();
    curry(Function::bound("crazy", sig, |bound| {
        let starter = bound.arg("self")?.as_object()?.get_attr("starter")?;
        Ok(Value::Int(bound.arg("a")?.as_int()? + starter.as_int()?))
    }))
}

fn has_curry_methods() -> Class {
    let init = Function::bound("__init__", "self, starter".parse().unwrap(), |bound| {
        let obj = bound.arg("self")?.as_object()?;
        obj.set_attr("starter", bound.arg("starter")?.clone());
        obj.set_attr("on_instance", crazy());
        Ok(Value::Unit)
    });
    let class = Class::with_init("HasCurryMethods", init).unwrap();

    let method = Function::bound("curry", "self, x, y=0".parse().unwrap(), |bound| {
        let starter = bound.arg("self")?.as_object()?.get_attr("starter")?.as_int()?;
        Ok(Value::Int(
            starter * bound.arg("x")?.as_int()? * bound.arg("y")?.as_int()?,
        ))
    });
    class.set_attr("curry", curry(method));
    class.set_attr("on_class", crazy().invoke(args![1]).unwrap());
    class
}

fn instance(class: &Class, args: curry_lang::Args) -> Object {
    class.instantiate(args).unwrap()
}

#[test]
fn test_curry_method_behavior() {
    let class = has_curry_methods();

    let obj = instance(&class, args![2]);
    let result = obj
        .get_attr("curry")
        .and_then(|method| method.call(args![; y = 2]))
        .and_then(|partial| partial.call(args![1]));
    assert_eq!(result, Ok(Value::Int(4)));

    let hpm = instance(&class, args![2]);
    assert_eq!(
        hpm.call_method("on_instance", args![2, hpm.clone()]),
        Ok(Value::Int(4))
    );
    assert_eq!(hpm.call_method("on_class", args![]), Ok(Value::Int(3)));
}

#[test]
fn test_bound_call_matches_direct_call() {
    let class = has_curry_methods();
    let obj = instance(&class, args![3]);

    let method = class.get_attr("curry").unwrap();
    let method = method.as_curry().unwrap();
    let bound = method.bind_to(&obj);
    assert_eq!(bound.args().pos, vec![Value::Object(obj.clone())]);

    let direct = method.invoke(args![obj.clone(), 5, 2]);
    assert_eq!(bound.invoke(args![5, 2]), direct);
    assert_eq!(direct, Ok(Value::Int(30)));
    // binding left the class attribute alone
    assert!(method.args().is_empty());
}

#[test]
fn test_class_access_returns_wrapper_unchanged() {
    let class = has_curry_methods();
    let first = class.get_attr("curry").unwrap();
    let second = class.get_attr("curry").unwrap();
    assert_eq!(first, second);

    let wrapper = first.as_curry().unwrap();
    assert!(wrapper.get(None).ptr_eq(wrapper));
}

fn cache_test_class(cached: bool) -> Class {
    let func_one = Function::bound("func", "self, a=1".parse().unwrap(), |bound| {
        Ok(Value::Int(2 + bound.arg("a")?.as_int()?))
    });
    let func_two = Function::bound("func", "self".parse().unwrap(), |_| Ok(Value::Int(1)));

    let class = Class::new("CurryCacheTest");
    if cached {
        class.set_attr("test", CurryOptions::new().cache_key("test").wrap(func_one));
        class.set_attr("func", CurryOptions::new().cache_by_name().wrap(func_two));
    } else {
        class.set_attr("test", curry(func_one));
        class.set_attr("func", curry(func_two));
    }
    class
}

#[test]
fn test_uncached_reads_are_fresh() {
    let class = cache_test_class(false);
    let obj = instance(&class, args![]);
    assert_eq!(obj.call_method("func", args![]), Ok(Value::Int(1)));
    assert_eq!(obj.call_method("test", args![]), Ok(Value::Int(3)));
    assert_eq!(obj.call_method("func", args![]), Ok(Value::Int(1)));

    let first = obj.get_attr("test").unwrap();
    let second = obj.get_attr("test").unwrap();
    assert_ne!(first, second);
    assert_eq!(first.call(args![4]), second.call(args![4]));
    assert!(!obj.has_attr("test"));
}

#[test]
fn test_cached_reads_are_identical() {
    let class = cache_test_class(true);
    let obj = instance(&class, args![]);
    assert_eq!(obj.call_method("func", args![]), Ok(Value::Int(1)));
    assert_eq!(obj.call_method("test", args![]), Ok(Value::Int(3)));
    assert_eq!(obj.call_method("func", args![]), Ok(Value::Int(1)));

    assert_eq!(obj.get_attr("test").unwrap(), obj.get_attr("test").unwrap());
    assert_eq!(obj.get_attr("func").unwrap(), obj.get_attr("func").unwrap());
    assert!(obj.has_attr("test"));
    assert!(obj.has_attr("func"));

    // each object gets its own bound wrapper
    let other = instance(&class, args![]);
    assert_ne!(other.get_attr("test").unwrap(), obj.get_attr("test").unwrap());
}

#[test]
fn test_cached_wrapper_keeps_its_target() {
    let class = cache_test_class(true);
    let obj = instance(&class, args![]);
    let cached = obj.get_attr("test").unwrap();

    let replacement = Function::bound("test", "self".parse().unwrap(), |_| Ok(Value::Int(100)));
    class.set_attr("test", CurryOptions::new().cache_key("test").wrap(replacement));

    assert_eq!(obj.get_attr("test").unwrap(), cached);
    assert_eq!(obj.call_method("test", args![]), Ok(Value::Int(3)));
    let fresh = instance(&class, args![]);
    assert_eq!(fresh.call_method("test", args![]), Ok(Value::Int(100)));

    // dropping the cache entry exposes the class attribute again
    assert_eq!(obj.del_attr("test"), Some(cached));
    assert_eq!(obj.call_method("test", args![]), Ok(Value::Int(100)));
}
