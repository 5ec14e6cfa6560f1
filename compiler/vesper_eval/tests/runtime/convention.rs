//! The calling convention end to end.

use vesper_eval::{
    parse_args, Arg, ArgList, Args, Builtin, Context, EvalErrorKind, EvalResult, Lambda,
    RedefinitionPolicy, Scope, Value,
};

use crate::common::{compile, context, dump, lookup, read, read_all, read_items};

fn list(cx: &Context, _scope: &Scope, args: &[Value]) -> EvalResult {
    Ok(cx.seq(args.to_vec()))
}

/// `(fn <params> <body>..)` read from text, defined in `env`.
fn lambda(cx: &Context, params: &str, body: &str, env: &Scope) -> Value {
    Lambda::new(cx, &read_items(cx, params), read_all(cx, body), env).unwrap()
}

mod binding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_argument_gets_default_and_empty_rest() {
        let cx = context();
        let list = compile(&cx, "(a (b 1) c..)", &cx.root_scope());
        let scope = list
            .apply(&cx, &cx.root_scope(), &read_items(&cx, "(10)"))
            .unwrap();

        assert_eq!(lookup(&cx, &scope, "a"), "10");
        assert_eq!(lookup(&cx, &scope, "b"), "1");
        assert_eq!(lookup(&cx, &scope, "c"), "()");
    }

    #[test]
    fn four_arguments_fill_everything() {
        let cx = context();
        let list = compile(&cx, "(a (b 1) c..)", &cx.root_scope());
        let scope = list
            .apply(&cx, &cx.root_scope(), &read_items(&cx, "(10 20 30 40)"))
            .unwrap();

        assert_eq!(lookup(&cx, &scope, "a"), "10");
        assert_eq!(lookup(&cx, &scope, "b"), "20");
        assert_eq!(lookup(&cx, &scope, "c"), "(30 40)");
    }

    #[test]
    fn bounds_and_rendering() {
        let cx = context();
        let list = compile(&cx, "(a (b 1) c..)", &cx.root_scope());
        assert_eq!(list.min(), 1);
        assert_eq!(list.max(), None);
        assert_eq!(list.render_string(&cx).unwrap(), "(a (b 1) c..)");
    }

    #[test]
    fn mismatch_message_embeds_both_lists() {
        let cx = context();
        let list = compile(&cx, "(a b)", &cx.root_scope());
        let err = list
            .apply(&cx, &cx.root_scope(), &read_items(&cx, "(1)"))
            .unwrap_err();
        assert_eq!(err.message, "argument mismatch: (a b) (1)");
    }

    #[test]
    fn anonymous_parameter_skips_a_position() {
        let cx = context();
        let list = compile(&cx, "(_ b)", &cx.root_scope());
        let scope = list
            .apply(&cx, &cx.root_scope(), &read_items(&cx, "(1 2)"))
            .unwrap();
        assert_eq!(scope.local_len(), 1);
        assert_eq!(lookup(&cx, &scope, "b"), "2");
    }
}

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_integer_is_rejected() {
        let cx = context();
        let err = parse_args(&cx, &read_items(&cx, "(a 42)"), &cx.root_scope()).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::InvalidArg {
                form: "42".to_string()
            }
        );
    }

    #[test]
    fn variadic_in_the_middle_is_rejected() {
        let cx = context();
        let args = parse_args(&cx, &read_items(&cx, "(a xs.. b)"), &cx.root_scope()).unwrap();
        let err = ArgList::new(&cx, args).unwrap_err();
        assert_eq!(err.message, "variadic parameter must be last: (a xs.. b)");
    }

    /// Defaults are evaluated when the parameters are parsed; rebinding the
    /// source afterwards does not change them.
    #[test]
    fn defaults_are_evaluated_once() {
        let cx = context();
        let env = cx.root_scope();
        let k = cx.intern("k");
        env.bind(&cx, k, cx.int(1)).unwrap();

        let f = lambda(&cx, "((x k))", "x", &env);
        env.bind(&cx, k, cx.int(2)).unwrap();

        assert_eq!(dump(&cx, &cx.apply(&f, &[], &env).unwrap()), "1");
        assert_eq!(dump(&cx, &cx.apply(&f, &[], &env).unwrap()), "1");
        assert_eq!(dump(&cx, &f), "(fn ((x 1)))");
    }

    #[test]
    fn failing_default_aborts_definition() {
        let cx = context();
        let env = cx.root_scope();
        let err = Lambda::new(&cx, &read_items(&cx, "((x nope))"), vec![], &env).unwrap_err();
        assert_eq!(err.message, "undefined variable: nope");
    }
}

mod procedures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lambda_binds_and_evaluates_its_body() {
        let cx = context();
        let env = cx.root_scope();
        env.bind(&cx, cx.intern("base"), cx.int(100)).unwrap();

        let f = lambda(&cx, "(a (b 2) rest..)", "(base a b rest..)", &env);
        assert_eq!(dump(&cx, &f), "(fn (a (b 2) rest..))");

        let caller = cx.root_scope();
        let result = cx.apply(&f, &read_items(&cx, "(1)"), &caller).unwrap();
        assert_eq!(dump(&cx, &result), "(100 1 2)");

        let result = cx
            .apply(&f, &read_items(&cx, "(1 3 5 7)"), &caller)
            .unwrap();
        assert_eq!(dump(&cx, &result), "(100 1 3 5 7)");
    }

    #[test]
    fn call_site_splat_spreads_arguments() {
        let cx = context();
        let env = cx.root_scope();
        env.bind(&cx, cx.intern("xs"), read(&cx, "(2 3)")).unwrap();

        let f = lambda(&cx, "(a b c)", "(c b a)", &env);
        let result = cx.apply(&f, &read_items(&cx, "(1 xs..)"), &env).unwrap();
        assert_eq!(dump(&cx, &result), "(3 2 1)");
    }

    #[test]
    fn lambda_arity_error_propagates() {
        let cx = context();
        let env = cx.root_scope();
        let f = lambda(&cx, "(a)", "a", &env);
        let err = cx.apply(&f, &read_items(&cx, "(1 2)"), &env).unwrap_err();
        assert_eq!(err.message, "argument mismatch: (a) (1 2)");
        assert_eq!(cx.call_depth(), 0);
    }

    #[test]
    fn closures_see_their_definition_scope() {
        let cx = context();
        let outer = cx.root_scope();
        let inner = outer.child();
        inner.bind(&cx, cx.intern("hidden"), cx.int(5)).unwrap();

        let f = lambda(&cx, "()", "hidden", &inner);
        assert_eq!(dump(&cx, &cx.apply(&f, &[], &outer).unwrap()), "5");
    }

    #[test]
    fn builtin_receives_filled_arguments() {
        let cx = context();
        let args: Args = [
            Arg::plain("x"),
            Arg::optional("y", Some(cx.int(9))),
            Arg::optional("z", None),
        ]
        .into_iter()
        .collect();
        let f = Builtin::new(&cx, "list", args, list).unwrap();
        assert_eq!(dump(&cx, &f), "(builtin list (x (y 9) (z)))");

        let result = cx.apply(&f, &read_items(&cx, "(1)"), &cx.root_scope()).unwrap();
        assert_eq!(dump(&cx, &result), "(1 9 _)");
    }

    #[test]
    fn non_procedures_are_not_callable() {
        let cx = context();
        let err = cx
            .apply(&read(&cx, "(1 2)"), &[], &cx.root_scope())
            .unwrap_err();
        assert_eq!(err.message, "not callable: (1 2)");
    }

    #[test]
    fn forbid_policy_rejects_duplicate_parameters() {
        let cx = Context::builder()
            .redefinition(RedefinitionPolicy::Forbid)
            .build();
        let env = cx.root_scope();
        let f = lambda(&cx, "(a a)", "a", &env);
        let err = cx.apply(&f, &read_items(&cx, "(1 2)"), &env).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::CannotRedefine { name: "a".to_string() });
    }
}

mod splats {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_splats_flatten_through_sequences() {
        let cx = context();
        let env = cx.root_scope();
        env.bind(&cx, cx.intern("xs"), read(&cx, "(1 (2 3).. _)")).unwrap();
        assert_eq!(dump(&cx, &env.lookup(cx.intern("xs")).unwrap()), "(1 (2 3).. _)");

        let value = read(&cx, "(0 xs..)").eval(&cx, &env).unwrap();
        assert_eq!(dump(&cx, &value), "(0 1 2 3)");
    }

    #[test]
    fn splat_of_atom_survives_spreading() {
        let cx = context();
        let env = cx.root_scope();
        env.bind(&cx, cx.intern("x"), cx.int(1)).unwrap();
        let value = read(&cx, "(x..)").eval(&cx, &env).unwrap();
        assert_eq!(dump(&cx, &value), "(1..)");
    }
}
