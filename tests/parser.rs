use fwjs_interpreter as fwjs;

use fwjs::ast_printer::AstPrinter;
use fwjs::error::FwjsError;
use fwjs::expr::{BinaryOp, Expr};
use fwjs::parser::{parse_source, Parser};
use fwjs::scanner::tokenize;

fn ast(source: &str) -> String {
    let program = parse_source(source).unwrap();
    AstPrinter::print(&program)
}

#[test]
fn empty_program_is_null() {
    assert_eq!(parse_source("").unwrap(), Expr::null());
    assert_eq!(parse_source(";;").unwrap(), Expr::null());
}

#[test]
fn single_statement_is_not_wrapped() {
    assert_eq!(parse_source("42;").unwrap(), Expr::int(42));
}

#[test]
fn statements_nest_to_the_right() {
    let expected = Expr::seq(
        Expr::var_decl("x", Expr::int(1)),
        Expr::seq(
            Expr::assign("x", Expr::int(2)),
            Expr::print(Expr::var("x")),
        ),
    );

    assert_eq!(parse_source("var x = 1; x = 2; print(x);").unwrap(), expected);
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_eq!(ast("1 + 2 * 3;"), "(+ 1 (* 2 3))");
    assert_eq!(ast("10 - 4 - 3;"), "(- (- 10 4) 3)");
    assert_eq!(ast("(1 + 2) % 3;"), "(% (+ 1 2) 3)");
    assert_eq!(ast("1 + 2 < 4 * 5;"), "(< (+ 1 2) (* 4 5))");
    assert_eq!(ast("a >= b == c;"), "(== (>= a b) c)");
}

#[test]
fn unary_minus_subtracts_from_zero() {
    assert_eq!(
        parse_source("-5;").unwrap(),
        Expr::binary(BinaryOp::Subtract, Expr::int(0), Expr::int(5))
    );
    assert_eq!(ast("2 * -x;"), "(* 2 (- 0 x))");
}

#[test]
fn literals() {
    assert_eq!(ast("true; false; null;"), "(seq true (seq false null))");
}

#[test]
fn var_without_initializer_is_null() {
    assert_eq!(ast("var x;"), "(var x null)");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(ast("a = b = 3;"), "(= a (= b 3))");
}

#[test]
fn if_with_and_without_else() {
    assert_eq!(ast("if (c) { 1; } else { 2; }"), "(if c 1 2)");
    assert_eq!(ast("if (c) 1;"), "(if c 1 null)");
    assert_eq!(ast("if (c) {} else if (d) 2; else 3;"), "(if c null (if d 2 3))");
}

#[test]
fn while_loop_with_block_body() {
    assert_eq!(
        ast("while (i < 3) { i = i + 1; print(i); }"),
        "(while (< i 3) (seq (= i (+ i 1)) (print i)))"
    );
}

#[test]
fn function_expression_and_call() {
    assert_eq!(
        ast("var add = function(a, b) { a + b; }; add(1, 2);"),
        "(seq (var add (function (a b) (+ a b))) (call add 1 2))"
    );
    assert_eq!(ast("f()(1)();"), "(call (call (call f) 1))");
}

#[test]
fn named_function_declares_a_variable() {
    let program = parse_source("function id(x) { x; }").unwrap();

    assert_eq!(program, Expr::var_decl("id", Expr::function(["x"], Expr::var("x"))));
}

#[test]
fn parser_over_prescanned_tokens() {
    let tokens = tokenize("print(1);").unwrap();
    let program = Parser::new(&tokens).parse().unwrap();

    assert_eq!(program, Expr::print(Expr::int(1)));
}

#[test]
fn missing_semicolon_is_a_parse_error() {
    let err = parse_source("var x = 1\nx;").unwrap_err();

    assert!(matches!(err, FwjsError::Parse { line: 2, .. }));
    assert_eq!(
        err.to_string(),
        "[line 2] Error: Expected ';' after expression, found 'x'"
    );
}

#[test]
fn unterminated_block_reports_end_of_input() {
    let err = parse_source("while (true) { 1;").unwrap_err();

    assert!(err.is_static());
    assert!(err.to_string().contains("Expected '}' after block, found end of input"));
}

#[test]
fn missing_operand_is_a_parse_error() {
    let err = parse_source("1 + ;").unwrap_err();

    assert_eq!(err.to_string(), "[line 1] Error: Expected expression at ';'");
}

#[test]
fn lex_errors_surface_from_parse_source() {
    let err = parse_source("var s = \"str\";").unwrap_err();

    assert!(matches!(err, FwjsError::Lex { .. }));
}
