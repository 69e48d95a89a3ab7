use regcalc::{
    interpreter::{Interpreter, StdIo},
    source,
};

use clap::{App, Arg, ArgMatches};
use slog::{o, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

enum Error {
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("regcalcrun")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Executes register calculator commands from a file or standard input")
        .arg(Arg::with_name("source")
             .help("File containing one command per line, read from standard input if omitted")
             .value_name("SOURCE")
             .index(1))
        .arg(Arg::with_name("verbose")
             .help("Enables verbose logging")
             .long("verbose")
             .short("v"))
        .get_matches()
}

fn main() {
    let args = parse_arguments();

    let mut interpreter = Interpreter::new(StdIo);

    if args.is_present("verbose") {
        let decorator = TermDecorator::new().stderr().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        interpreter.set_logger(Logger::root(drain, o!()));
    }

    match run(&mut interpreter, args.value_of("source")) {
        Ok(()) => (),
        Err(Error::IO(io)) => eprintln!("IO error: {}", io),
    }
}

fn run(interpreter: &mut Interpreter<StdIo>, file_path: Option<&str>) -> Result<(), Error> {
    let lines = match file_path {
        Some(path) => source::read_file(path)?,
        None => {
            let stdin = std::io::stdin();
            let lines = source::read_interactive(stdin.lock())?;
            println!();
            lines
        }
    };

    interpreter.run(lines);

    Ok(())
}
