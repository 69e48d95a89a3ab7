use regcalc::{
    error::ErrorKind,
    interpreter::{Interpreter, Outcome, TestIo},
    source,
};

fn run(lines: &[&str]) -> Vec<String> {
    let mut interpreter = Interpreter::new(TestIo::new());
    interpreter.run(lines);
    interpreter.io.lines()
}

#[test]
fn test_single_addition() {
    assert_eq!(run(&["a add 5", "print a"]), vec!["5"]);
}

#[test]
fn test_operations_apply_in_order() {
    assert_eq!(run(&["a add 5", "a multiply 2", "print a"]), vec!["10"]);
}

#[test]
fn test_register_operand() {
    assert_eq!(run(&["a add 5", "b add a", "print b", "print a"]), vec!["5", "5"]);
}

#[test]
fn test_mutual_reference_is_reported() {
    assert_eq!(
        run(&["a add b", "b add a", "print a"]),
        vec!["Invalid command \"print a\" was ignored. Register \"a\" is dependent on itself."]
    );
}

#[test]
fn test_fractional_and_integral_output() {
    assert_eq!(
        run(&["a add 3.5", "print a", "a add 0.5", "print a"]),
        vec!["3.5", "4"]
    );
}

#[test]
fn test_wrong_arity_creates_nothing() {
    let mut interpreter = Interpreter::new(TestIo::new());

    interpreter.run(&["foo bar baz qux", "a add 1", "print a"]);

    assert_eq!(interpreter.io.errors(), vec![&ErrorKind::CommandArity]);
    assert_eq!(interpreter.io.values(), vec![1.0]);
    assert!(!interpreter.store.contains("foo"));
    assert_eq!(interpreter.store.len(), 1);
}

#[test]
fn test_printing_twice_gives_the_same_value() {
    assert_eq!(
        run(&["a add 2", "b add a", "b multiply a", "print b", "print b"]),
        vec!["4", "4"]
    );
}

#[test]
fn test_order_of_operations_matters() {
    let first = run(&["a add 10", "a subtract 4", "a multiply 3", "print a"]);
    let second = run(&["a add 10", "a multiply 3", "a subtract 4", "print a"]);

    assert_eq!(first, vec!["18"]);
    assert_eq!(second, vec!["26"]);
}

#[test]
fn test_implicitly_created_register() {
    let mut interpreter = Interpreter::new(TestIo::new());

    interpreter.run(&["a add b", "print b", "print a", "b add 3", "print b", "print a"]);

    assert_eq!(interpreter.io.lines(), vec!["0", "0", "3", "0"]);
}

#[test]
fn test_only_new_entries_are_forced() {
    assert_eq!(
        run(&[
            "a add 1",
            "b add a",
            "print b",
            "a add 100",
            "print b",
            "b add a",
            "print b",
        ]),
        vec!["1", "1", "102"]
    );
}

#[test]
fn test_negative_zero_prints_as_zero() {
    assert_eq!(run(&["a subtract 0", "a multiply -1", "print a"]), vec!["0"]);
}

#[test]
fn test_accounts_fixture() {
    let lines = source::lines_from_str(include_str!("accounts.txt"));

    let mut interpreter = Interpreter::new(TestIo::new());
    interpreter.run(&lines);

    assert_eq!(interpreter.io.lines(), vec!["90", "110", "110", "90"]);

    let names: Vec<_> = interpreter.store.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["revenue", "expenses", "salaries", "costs", "profit"]);

    // `costs add 1` was never forced, profit does not reference costs again.
    assert_eq!(interpreter.store.by_name("costs").unwrap().pending(), 1);
}

#[test]
fn test_errors_fixture() {
    let lines = source::lines_from_str(include_str!("errors.txt"));

    let mut interpreter = Interpreter::new(TestIo::new());
    interpreter.run(&lines);

    assert_eq!(
        interpreter.io.lines(),
        vec![
            "Invalid command \"\" was ignored. Command must have 2 or 3 arguments.",
            "Invalid command \"foo bar baz qux\" was ignored. Command must have 2 or 3 arguments.",
            "Invalid command \"a divide 2\" was ignored. Operation \"divide\" is not defined.",
            "Invalid command \"a ad 2\" was ignored. Operation \"ad\" is not defined. Did you mean \"add\"?",
            "Invalid command \"5 add 1\" was ignored. Register \"5\" should not be a number.",
            "Invalid command \"show a\" was ignored. Print command is not well specified.",
            "Invalid command \"print b\" was ignored. Print command is not well specified.",
            "5",
        ]
    );

    let outcomes = interpreter.io.into_output();
    assert_eq!(
        outcomes.last(),
        Some(&Outcome::Printed {
            register: "a".into(),
            value: 5.0,
        })
    );
}
