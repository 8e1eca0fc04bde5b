use fwjs_interpreter as fwjs;

use fwjs::environment::Environment;
use fwjs::error::FwjsError;
use fwjs::value::Value;

#[test]
fn resolve_unbound_name_is_null() {
    let global = Environment::global();
    let local = Environment::with_enclosing(&global);

    assert_eq!(global.resolve("missing"), Value::Null);
    assert_eq!(local.resolve("missing"), Value::Null);
}

#[test]
fn resolve_walks_outward() {
    let global = Environment::global();
    let middle = Environment::with_enclosing(&global);
    let inner = Environment::with_enclosing(&middle);

    global.declare("g", Value::Int(1)).unwrap();
    middle.declare("m", Value::Bool(true)).unwrap();

    assert_eq!(inner.resolve("g"), Value::Int(1));
    assert_eq!(inner.resolve("m"), Value::Bool(true));
    assert_eq!(global.resolve("m"), Value::Null);
}

#[test]
fn duplicate_declaration_in_same_scope_fails() {
    let global = Environment::global();

    global.declare("x", Value::Int(1)).unwrap();
    let err = global.declare("x", Value::Int(2)).unwrap_err();

    assert!(matches!(err, FwjsError::DuplicateDeclaration { ref name } if name == "x"));
    assert_eq!(global.resolve("x"), Value::Int(1));
}

#[test]
fn shadowing_in_nested_scope_succeeds() {
    let global = Environment::global();
    let local = Environment::with_enclosing(&global);

    global.declare("x", Value::Int(1)).unwrap();
    local.declare("x", Value::Int(2)).unwrap();

    assert_eq!(local.resolve("x"), Value::Int(2));
    assert_eq!(global.resolve("x"), Value::Int(1));
}

#[test]
fn update_overwrites_where_found() {
    let global = Environment::global();
    let local = Environment::with_enclosing(&global);

    global.declare("x", Value::Int(1)).unwrap();
    local.update("x", Value::Int(5));

    assert_eq!(global.resolve("x"), Value::Int(5));
    assert!(!local.contains_local("x"));
}

#[test]
fn update_prefers_nearest_binding() {
    let global = Environment::global();
    let local = Environment::with_enclosing(&global);

    global.declare("x", Value::Int(1)).unwrap();
    local.declare("x", Value::Int(2)).unwrap();
    local.update("x", Value::Int(3));

    assert_eq!(local.resolve("x"), Value::Int(3));
    assert_eq!(global.resolve("x"), Value::Int(1));
}

#[test]
fn update_of_unbound_name_creates_global() {
    let global = Environment::global();
    let inner = Environment::with_enclosing(&Environment::with_enclosing(&global));

    inner.update("fresh", Value::Bool(false));

    assert!(global.contains_local("fresh"));
    assert!(!inner.contains_local("fresh"));
    assert_eq!(global.resolve("fresh"), Value::Bool(false));
}

#[test]
fn cloned_handles_alias_one_scope() {
    let global = Environment::global();
    let alias = global.clone();

    alias.declare("y", Value::Int(9)).unwrap();

    assert!(alias.ptr_eq(&global));
    assert_eq!(global.resolve("y"), Value::Int(9));
    assert_eq!(global.local_names(), vec!["y".to_string()]);
    assert!(global.is_global());
}
