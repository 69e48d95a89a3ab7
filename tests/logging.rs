use slog::{o, Drain, Logger};
use slog_term::{FullFormat, PlainSyncDecorator};

use regcalc::interpreter::{Interpreter, TestIo};

#[test]
fn test_verbose_logging_does_not_change_results() {
    let decorator = PlainSyncDecorator::new(std::io::sink());
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    let mut interpreter = Interpreter::new(TestIo::new());
    interpreter.set_logger(Logger::root(drain, o!("test" => "logging")));

    interpreter.run(&["a add 2", "b multiply a", "b add a", "print b", "a add a", "print a", "x y"]);

    assert_eq!(interpreter.io.values(), vec![2.0]);
    assert_eq!(interpreter.io.errors().len(), 2);
}
