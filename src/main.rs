use std::env;
use std::error::Error as _;
use std::io::{self, BufWriter};
use std::process;

use log::LevelFilter;
use unidump::cli::{self, Command};
use unidump::run::{self, Context};
use unidump::Error;

fn init_logging(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match cli::parse(&args[..]) {
        Ok(Command::Help(usage)) => {
            println!("{}", usage);
            return;
        }
        Ok(Command::Version(version)) => {
            println!("{}", version);
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e @ Error::Usage(_)) => {
            eprintln!("unidump: {}\n\n{}", e, cli::usage());
            process::exit(1)
        }
        Err(e) => {
            eprintln!("unidump: {}", e);
            process::exit(1)
        }
    };
    init_logging(options.debug);

    let stdout = io::stdout();
    let mut ctxt = Context::new(BufWriter::new(stdout.lock()));
    match run::run(&options, &mut ctxt) {
        Ok(()) => {}
        Err(Error::Output(ref e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            let _ = ctxt.flush();
            eprintln!("unidump: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            process::exit(1)
        }
    }
}
