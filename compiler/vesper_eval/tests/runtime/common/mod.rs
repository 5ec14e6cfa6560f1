//! Shared test utilities.
//!
//! A minimal reader for the runtime's text form:
//!
//! - `( ... )` reads a sequence
//! - integers read as `Int`, `_` as Nil, anything else as a symbol
//! - a trailing `..` wraps the preceding form in a splat

use vesper_eval::{init_tracing, parse_args, ArgList, Context, ContextBuilder, Scope, Value};

#[derive(Debug, PartialEq)]
enum Token {
    Open,
    Close,
    Dots,
    Atom(String),
}

fn tokenize(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' => tokens.push(Token::Open),
            ')' => {
                tokens.push(Token::Close);
                if chars.peek() == Some(&'.') {
                    chars.next();
                    assert_eq!(chars.next(), Some('.'), "expected `..` in {src:?}");
                    tokens.push(Token::Dots);
                }
            }
            c if c.is_whitespace() => {}
            c => {
                let mut atom = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || next == '(' || next == ')' {
                        break;
                    }
                    atom.push(next);
                    chars.next();
                }
                match atom.strip_suffix("..") {
                    Some(stem) => {
                        tokens.push(Token::Atom(stem.to_string()));
                        tokens.push(Token::Dots);
                    }
                    None => tokens.push(Token::Atom(atom)),
                }
            }
        }
    }
    tokens
}

fn read_atom(cx: &Context, atom: &str) -> Value {
    if atom == "_" {
        return cx.nil();
    }
    match atom.parse::<i64>() {
        Ok(n) => cx.int(n),
        Err(_) => cx.sym(atom),
    }
}

fn read_form(cx: &Context, tokens: &[Token], pos: &mut usize) -> Value {
    let token = tokens.get(*pos).expect("unexpected end of input");
    *pos += 1;
    let form = match token {
        Token::Open => {
            let mut items = Vec::new();
            while tokens.get(*pos) != Some(&Token::Close) {
                items.push(read_form(cx, tokens, pos));
            }
            *pos += 1;
            cx.seq(items)
        }
        Token::Atom(atom) => read_atom(cx, atom),
        other => panic!("unexpected token {other:?}"),
    };
    if tokens.get(*pos) == Some(&Token::Dots) {
        *pos += 1;
        return cx.splat(form);
    }
    form
}

/// Read every top-level form in `src`.
pub fn read_all(cx: &Context, src: &str) -> Vec<Value> {
    let tokens = tokenize(src);
    let mut pos = 0;
    let mut forms = Vec::new();
    while pos < tokens.len() {
        forms.push(read_form(cx, &tokens, &mut pos));
    }
    forms
}

/// Read exactly one form.
pub fn read(cx: &Context, src: &str) -> Value {
    let mut forms = read_all(cx, src);
    assert_eq!(forms.len(), 1, "expected one form in {src:?}");
    forms.remove(0)
}

/// Read `src` as a sequence and return its elements.
pub fn read_items(cx: &Context, src: &str) -> Vec<Value> {
    read(cx, src)
        .as_seq()
        .expect("expected a sequence")
        .to_vec()
}

/// Compile the parameter list written in `src`, e.g. `(a (b 1) c..)`.
pub fn compile(cx: &Context, src: &str, env: &Scope) -> ArgList {
    let args = parse_args(cx, &read_items(cx, src), env).unwrap();
    ArgList::new(cx, args).unwrap()
}

pub fn dump(cx: &Context, value: &Value) -> String {
    cx.dump_string(value).unwrap()
}

/// Dump the binding of `name`, panicking if it is unbound.
pub fn lookup(cx: &Context, scope: &Scope, name: &str) -> String {
    let value = scope
        .lookup(cx.intern(name))
        .unwrap_or_else(|| panic!("{name} is unbound"));
    dump(cx, &value)
}

/// Context configured from `VESPER_*`, with tracing enabled when
/// `RUST_LOG` is set.
pub fn context() -> Context {
    init_tracing();
    ContextBuilder::from_env().build()
}
