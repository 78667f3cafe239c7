//! Larkc CLI
//!
//! Runs lark programs and expressions from the command line.

use std::io::IsTerminal;

use larkc::commands::{eval_source, parse_options, run_source, tree_source, Failure, Options, Outcome};

fn main() {
    larkc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = options_and_one(&args, "Usage: larkc run <file.lark> [options]");
            let source = read_source(&path);
            let result = run_source(&source, &options);
            finish(&path, &source, &options, result);
        }
        "eval" => {
            let (options, expr) = options_and_one(&args, "Usage: larkc eval <expression> [options]");
            let result = eval_source(&expr, &options);
            finish("<expr>", &expr, &options, result);
        }
        "tree" => {
            let (options, path) = options_and_one(&args, "Usage: larkc tree <file.lark> [options]");
            let source = read_source(&path);
            match tree_source(&source, &options) {
                Ok(tree) => print!("{tree}"),
                Err(failure) => fail(&path, &source, &failure),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" => {
            println!("larkc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lark"))
            {
                let options = Options::default();
                let source = read_source(command);
                let result = run_source(&source, &options);
                finish(command, &source, &options, result);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

/// Parse the options after the command and require exactly one positional
/// argument.
fn options_and_one(args: &[String], usage: &str) -> (Options, String) {
    let (options, mut positional) = match parse_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{usage}");
            std::process::exit(1);
        }
    };
    if positional.len() != 1 {
        eprintln!("{usage}");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --max-depth=<n>   Nesting limit (default: {})", Options::default().max_depth);
        eprintln!("  -v, --verbose     Report compiled node counts");
        std::process::exit(1);
    }
    (options, positional.remove(0))
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

fn finish(path: &str, source: &str, options: &Options, result: Result<Outcome, Failure>) {
    match result {
        Ok(outcome) => {
            if options.verbose {
                eprintln!("compiled {} nodes", outcome.nodes);
            }
            print!("{}", outcome.render());
        }
        Err(failure) => fail(path, source, &failure),
    }
}

fn fail(path: &str, source: &str, failure: &Failure) -> ! {
    let color = std::io::stderr().is_terminal();
    eprint!("{}", larkc::report::render(path, source, failure, color));
    std::process::exit(1);
}

fn print_usage() {
    println!("larkc - the lark expression language");
    println!();
    println!("Usage: larkc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lark>      Run a program and print its result and variables");
    println!("  eval <expression>    Evaluate a single expression");
    println!("  tree <file.lark>     Print the concrete syntax tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>     Nesting limit for parse, compile and run (default: 10000)");
    println!("  -v, --verbose       Report compiled node counts");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lark_eval=trace) to trace evaluation.");
}
