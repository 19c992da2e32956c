use std::env;
use std::process;

mod exec;
mod jobs;
mod pipes;
mod prompt;
mod redirects;
mod shell;
mod signals;
mod tokenizer;

fn print_help() {
    println!("minish - a small unix shell");
    println!();
    println!("Usage: minish [OPTIONS]");
    println!("  -h, --help       Print this help");
    println!("  -v, --version    Print version");
}

fn print_version() {
    println!("minish v {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // respond to common flags quickly so external tools don't hang
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        process::exit(0);
    }

    if args.iter().any(|a| a == "-v" || a == "--version" || a == "-V") {
        print_version();
        process::exit(0);
    }

    let mut shell = shell::Shell::new();
    shell.run();
}
