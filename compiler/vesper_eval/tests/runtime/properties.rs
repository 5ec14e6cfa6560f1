//! Arity laws of compiled parameter lists.

use proptest::prelude::*;
use vesper_eval::{ArgKind, ArgList, Context, Value};

use crate::common::compile;

#[derive(Clone, Copy, Debug)]
enum Param {
    Plain,
    Anonymous,
    Optional(i64),
}

/// Parameter list text, e.g. `(p0 _ (p2 7) rest..)`.
fn source(params: &[Param], variadic: bool) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, param)| match param {
            Param::Plain => format!("p{i}"),
            Param::Anonymous => "_".to_string(),
            Param::Optional(default) => format!("(p{i} {default})"),
        })
        .collect();
    if variadic {
        parts.push("rest..".to_string());
    }
    format!("({})", parts.join(" "))
}

fn param() -> impl Strategy<Value = Param> {
    prop_oneof![
        Just(Param::Plain),
        Just(Param::Anonymous),
        (-50i64..50).prop_map(Param::Optional),
    ]
}

fn param_lists() -> impl Strategy<Value = (Vec<Param>, bool)> {
    (prop::collection::vec(param(), 0..6), any::<bool>())
}

fn ints(cx: &Context, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| cx.int(i64::try_from(i).unwrap_or(i64::MAX)))
        .collect()
}

fn compile_params(cx: &Context, params: &[Param], variadic: bool) -> ArgList {
    compile(cx, &source(params, variadic), &cx.root_scope())
}

proptest! {
    #[test]
    fn bounds_follow_parameter_kinds((params, variadic) in param_lists()) {
        let cx = Context::new();
        let list = compile_params(&cx, &params, variadic);

        let count = params.len() + usize::from(variadic);
        let optional = params
            .iter()
            .filter(|p| matches!(p, Param::Optional(_)))
            .count();

        if variadic {
            prop_assert_eq!(list.max(), None);
            prop_assert_eq!(list.min(), count - optional - 1);
        } else {
            prop_assert_eq!(list.max(), Some(count));
            prop_assert_eq!(list.min(), count - optional);
        }
        if optional == 0 && !variadic {
            prop_assert_eq!(list.max(), Some(list.min()));
        }
    }

    #[test]
    fn check_accepts_exactly_the_range((params, variadic) in param_lists()) {
        let cx = Context::new();
        let list = compile_params(&cx, &params, variadic);

        for n in 0..=list.len() + 3 {
            let in_range = n >= list.min() && list.max().map_or(true, |max| n <= max);
            prop_assert_eq!(list.accepts(n), in_range);
            prop_assert_eq!(list.check(&cx, &ints(&cx, n)).is_ok(), in_range);
        }
    }

    #[test]
    fn fill_appends_only_missing_trailing_optionals(
        (params, variadic) in param_lists(),
        supplied in 0usize..8,
    ) {
        let cx = Context::new();
        let list = compile_params(&cx, &params, variadic);
        let formal = list.len();

        let mut actual = ints(&cx, supplied);
        let before = actual.clone();
        list.fill(&cx, &mut actual);

        prop_assert_eq!(&actual[..supplied], &before[..]);
        if supplied >= formal {
            prop_assert_eq!(actual.len(), supplied);
        } else {
            let trailing_optional = list.items()[supplied..]
                .iter()
                .all(|arg| arg.kind() == ArgKind::Optional);
            if trailing_optional {
                prop_assert_eq!(actual.len(), formal);
            }
            for (arg, filled) in list.items()[supplied..].iter().zip(&actual[supplied..]) {
                prop_assert_eq!(arg.kind(), ArgKind::Optional);
                prop_assert!(arg.default().is_some_and(|d| d.is(filled)));
            }
        }
    }

    #[test]
    fn rendering_reparses_to_the_same_bounds((params, variadic) in param_lists()) {
        let cx = Context::new();
        let list = compile_params(&cx, &params, variadic);

        let rendered = list.render_string(&cx).unwrap();
        prop_assert_eq!(&rendered, &source(&params, variadic));

        let reparsed = compile(&cx, &rendered, &cx.root_scope());
        prop_assert_eq!(reparsed.min(), list.min());
        prop_assert_eq!(reparsed.max(), list.max());
    }
}
