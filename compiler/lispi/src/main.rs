//! `lisp` command-line interpreter.

use lispi::commands::{eval_expression, parse_file, run_files};

fn main() {
    lispi::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let ok = match args[1].as_str() {
        "run" => {
            let mut print_results = false;
            let mut files = Vec::new();
            for arg in args.iter().skip(2) {
                if arg == "--print-results" || arg == "-p" {
                    print_results = true;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                } else {
                    files.push(arg.clone());
                }
            }
            if files.is_empty() {
                eprintln!("Usage: lisp run [--print-results] <file>...");
                std::process::exit(1);
            }
            run_files(&files, print_results)
        }
        "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: lisp parse <file>");
                std::process::exit(1);
            };
            parse_file(path)
        }
        "eval" => {
            let Some(expr) = args.get(2) else {
                eprintln!("Usage: lisp eval <expr>");
                std::process::exit(1);
            };
            eval_expression(expr)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("lisp {}", env!("CARGO_PKG_VERSION"));
            true
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Usage: lisp <command> [options]");
    println!();
    println!("Commands:");
    println!("  run [--print-results] <file>...  Evaluate files in order");
    println!("  parse <file>                     Print each top-level form as read");
    println!("  eval <expr>                      Evaluate an expression and print the result");
    println!("  help                             Show this help message");
    println!("  version                          Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lisp_eval=trace) to enable logging.");
}
