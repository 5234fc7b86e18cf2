use curry_lang::{
    args, curry, Args, Checker, Class, Curry, CurryError, CurryOptions, Function, Signature,
    Symbol, Value,
};
use expect_test::expect;

fn transcript(steps: &[Result<Value, CurryError>]) -> String {
    let mut out = String::new();
    for step in steps {
        match step {
            Ok(value) => out.push_str(&format!("{}\n", value)),
            Err(err) => out.push_str(&format!("error: {}\n", err)),
        }
    }
    out
}

fn add_5_things() -> Curry {
    let sig = "a, b, c, d, e".parse().unwrap();
    curry(Function::bound("add_5_things", sig, |bound| {
        let mut total = 0;
        for value in bound.arguments().values() {
            total += value.as_int()?;
        }
        Ok(Value::Int(total))
    }))
}

fn greater_than() -> Curry {
    let sig = "x, y".parse().unwrap();
    curry(Function::bound("greater_than", sig, |bound| {
        Ok(Value::Bool(bound.arg("x")?.as_int()? > bound.arg("y")?.as_int()?))
    }))
}

#[test]
fn test_one_argument_at_a_time() {
    let mut current = Value::Curry(add_5_things());
    for _ in 0..5 {
        current = current.call(args![1]).unwrap();
    }
    assert_eq!(current, Value::Int(5));
}

#[test]
fn test_reused_partial() {
    let one_left = add_5_things()
        .invoke(args![1, 1])
        .and_then(|partial| partial.call(args![3]))
        .and_then(|partial| partial.call(args![4]))
        .unwrap();
    let actual = transcript(&[one_left.call(args![5]), one_left.call(args![6])]);
    let expect = expect![[r#"
        14
        15
    "#]];
    expect.assert_eq(&actual)
}

#[test]
fn test_greater_than() {
    let less_than_40 = greater_than().invoke(args![40]);
    let partial = less_than_40.clone().unwrap();
    let actual = transcript(&[
        less_than_40,
        partial.call(args![39]),
        partial.call(args![50]),
    ]);
    let expect = expect![[r#"
        <curry of <function greater_than>>
        True
        False
    "#]];
    expect.assert_eq(&actual)
}

#[test]
fn test_curry_with_kwargs_taking_function() {
    let sig = "arg, **kwargs".parse().unwrap();
    let kwarg_taking_function = curry(Function::bound("kwarg_taking_function", sig, |bound| {
        let mut kwargs = bound.arg("kwargs")?.as_dict()?.clone();
        kwargs.insert(Symbol::new("k"), bound.arg("arg")?.clone());
        Ok(Value::dict(kwargs))
    }));

    let partial = kwarg_taking_function.invoke(args![; a = 14]).unwrap();
    assert!(partial.is_callable());
    let result = partial.call(args![2]).unwrap();

    let expected = Args::new().kwarg("k", 2).kwarg("a", 14).kw;
    assert_eq!(result, Value::dict(expected));
    let expect = expect![[r#"
        {'a': 14, 'k': 2}
    "#]];
    expect.assert_eq(&transcript(&[Ok(result)]))
}

#[test]
fn test_later_keyword_wins() {
    let sig = "x, *, scale".parse().unwrap();
    let scaled = curry(Function::bound("scaled", sig, |bound| {
        Ok(Value::Int(bound.arg("x")?.as_int()? * bound.arg("scale")?.as_int()?))
    }));
    let result = scaled
        .invoke(args![; scale = 2])
        .and_then(|partial| partial.call(args![; scale = 5]))
        .and_then(|partial| partial.call(args![3]));
    assert_eq!(result, Ok(Value::Int(15)));
}

#[test]
fn test_decorator_with_optional_arguments() {
    let sig = "function, n=1".parse().unwrap();
    let add_n = curry(Function::bound("add_n", sig, |bound| {
        let function = bound.arg("function")?.clone();
        let n = bound.arg("n")?.as_int()?;
        let wrapped = Function::new("wrapped", Signature::variadic(), move |args| {
            Ok(Value::Int(function.call(args)?.as_int()? + n))
        });
        Ok(Value::Func(wrapped))
    }));
    let multiply = || {
        Function::bound("multiply", "x, y".parse().unwrap(), |bound| {
            Ok(Value::Int(bound.arg("x")?.as_int()? * bound.arg("y")?.as_int()?))
        })
    };

    let multiply_plus_twelve = add_n
        .invoke(args![; n = 12])
        .and_then(|decorator| decorator.call(args![multiply()]))
        .unwrap();
    let multiply_plus_one = add_n.invoke(args![multiply()]).unwrap();

    let actual = transcript(&[
        multiply_plus_one.call(args![1, 1]),
        multiply_plus_twelve.call(args![1, 1]),
    ]);
    let expect = expect![[r#"
        2
        13
    "#]];
    expect.assert_eq(&actual)
}

#[test]
fn test_variadic_with_custom_checker() {
    let product = Function::new("args_taking_function", Signature::variadic(), |args| {
        let mut acc = 1;
        for arg in args.pos.iter() {
            acc *= arg.as_int()?;
        }
        Ok(Value::Int(acc))
    });
    let options = CurryOptions::new().checker(Checker::new(|args| Ok(args.pos.len() > 2)));
    let product = options.wrap(product);

    let actual = transcript(&[
        product.invoke(args![1, 2]),
        product
            .invoke(args![2])
            .and_then(|p| p.call(args![3]))
            .and_then(|p| p.call(args![4])),
        product.invoke(args![2, 2, 2, 2]),
    ]);
    let expect = expect![[r#"
        <curry of <function args_taking_function>>
        24
        16
    "#]];
    expect.assert_eq(&actual)
}

#[test]
fn test_variadic_with_arity_checker_runs_at_once() {
    let count = Function::new("count", Signature::variadic(), |args| {
        Ok(Value::Int(args.pos.len() as i64))
    });
    assert_eq!(curry(count).invoke(args![]), Ok(Value::Int(0)));
}

#[test]
fn test_class_with_receiver_only_initializer() {
    let init = Function::new("__init__", "self".parse().unwrap(), |args| {
        args.pos[0].as_object()?.set_attr("ready", true);
        Ok(Value::Unit)
    });
    let empty = Class::with_init("Empty", init).unwrap();
    let obj = curry(empty.clone()).invoke(args![]).unwrap();
    let obj = obj.as_object().unwrap();
    assert!(obj.class().ptr_eq(&empty));
    assert_eq!(obj.get_attr("ready"), Ok(Value::Bool(true)));

    let bare = curry(Class::new("Bare")).invoke(args![]).unwrap();
    assert_eq!(bare.to_string(), "<Bare object>");
}

#[test]
fn test_class_constructor_waits_for_arguments() {
    let init = Function::bound("__init__", "self, width, height=1".parse().unwrap(), |bound| {
        let obj = bound.arg("self")?.as_object()?;
        let area = bound.arg("width")?.as_int()? * bound.arg("height")?.as_int()?;
        obj.set_attr("area", area);
        Ok(Value::Unit)
    });
    let rect = curry(Class::with_init("Rect", init).unwrap());

    let partial = rect.invoke(args![; height = 4]).unwrap();
    assert_eq!(partial.type_name(), "curry");
    let obj = partial.call(args![3]).unwrap();
    assert_eq!(obj.as_object().unwrap().get_attr("area"), Ok(Value::Int(12)));
}

#[test]
fn test_target_error_propagates() {
    let boom = curry(Function::new("boom", "x".parse().unwrap(), |_| {
        Err(CurryError::raise("boom went the target"))
    }));
    let result = boom.invoke(args![]).and_then(|partial| partial.call(args![1]));
    assert_eq!(result, Err(CurryError::Raised("boom went the target".to_string())));
}

#[test]
fn test_binding_errors_propagate() {
    let actual = transcript(&[
        greater_than().invoke(args![1, 2, 3]),
        greater_than().invoke(args![; z = 1]),
        greater_than()
            .invoke(args![1])
            .and_then(|partial| partial.call(args![; x = 2])),
        Value::Int(3).call(args![]),
    ]);
    let expect = expect![[r#"
        error: too many positional arguments: expected at most 2, got 3
        error: got an unexpected keyword argument 'z'
        error: multiple values for argument 'x'
        error: 'int' object is not callable
    "#]];
    expect.assert_eq(&actual)
}

#[test]
fn test_explicit_wrap_configuration() {
    let wrapped = Curry::wrap(
        Function::new("pair", Signature::variadic(), |args| Ok(Value::list(args.pos))),
        Some(Checker::count(2)),
        Some(Symbol::new("pair_cache")),
    );
    assert_eq!(wrapped.cache_key(), Some(Symbol::new("pair_cache")));

    let partial = wrapped.invoke(args![1]).unwrap();
    // partial wrappers keep the configuration
    assert_eq!(partial.as_curry().unwrap().cache_key(), wrapped.cache_key());
    let actual = transcript(&[partial.call(args!["two"])]);
    let expect = expect![[r#"
        [1, 'two']
    "#]];
    expect.assert_eq(&actual)
}
