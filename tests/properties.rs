use curry_lang::{curry, Args, Callable, Class, Function, Param, Signature, Value};
use proptest::prelude::*;
use proptest::sample::Index;

// order matters to the result, so a shuffled merge cannot pass
fn weighted_sum(arity: usize) -> Function {
    let params = (0..arity).map(|i| Param::positional(format!("p{}", i))).collect();
    let sig = Signature::new(params).unwrap();
    Function::new("weighted_sum", sig, |args| {
        let mut total = 0;
        for (i, arg) in args.pos.iter().enumerate() {
            total += (i as i64 + 1) * arg.as_int()?;
        }
        Ok(Value::Int(total))
    })
}

fn positional(values: &[i64]) -> Args {
    values.iter().fold(Args::new(), |args, value| args.arg(*value))
}

proptest! {
    #[test]
    fn partial_application_is_associative(
        values in prop::collection::vec(-1000i64..1000, 1..8),
        cuts in prop::collection::vec(any::<Index>(), 0..8),
    ) {
        let n = values.len();
        let target = weighted_sum(n);
        let expected = target.call(positional(&values)).unwrap();

        let mut points: Vec<usize> = cuts.iter().map(|cut| cut.index(n + 1)).collect();
        points.push(0);
        points.push(n);
        points.sort_unstable();
        points.dedup();

        let mut current = Value::Curry(curry(target));
        for window in points.windows(2) {
            prop_assert_eq!(current.type_name(), "curry");
            current = current.call(positional(&values[window[0]..window[1]])).unwrap();
        }
        prop_assert_eq!(current, expected);
    }

    #[test]
    fn later_keyword_overrides_earlier(first in any::<i64>(), second in any::<i64>(), x in any::<i64>()) {
        let sig = "x, *, k".parse().unwrap();
        let pick = curry(Function::bound("pick", sig, |bound| Ok(bound.arg("k")?.clone())));
        let result = pick
            .invoke(Args::new().kwarg("k", first))
            .and_then(|partial| partial.call(Args::new().kwarg("k", second)))
            .and_then(|partial| partial.call(Args::new().arg(x)));
        prop_assert_eq!(result, Ok(Value::Int(second)));
    }

    #[test]
    fn bound_call_prepends_instance(
        values in prop::collection::vec(-1000i64..1000, 0..5),
    ) {
        let n = values.len();
        let params = std::iter::once(Param::positional("self"))
            .chain((0..n).map(|i| Param::positional(format!("p{}", i))))
            .collect();
        let sig = Signature::new(params).unwrap();
        let target = Function::new("echo", sig, |args| Ok(Value::list(args.pos)));
        let obj = Class::new("Host").instantiate(Args::new()).unwrap();

        let wrapper = curry(target.clone());
        let bound = wrapper.bind_to(&obj);
        let direct = target.call(positional(&values).with_receiver(Value::Object(obj.clone())));
        prop_assert_eq!(bound.invoke(positional(&values)), direct);
    }
}
