use std::fs;

use makako::graph::dot;
use makako::utils::*;
use mk_parser::Parser;

pub fn graph(path: &str, output: Option<String>) {
    let output = match output {
        Some(output) => output,
        _ => format!("{}.gv", path),
    };
    let buff = match fs::read(path) {
        Ok(buff) => buff,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    let source = String::from_utf8_lossy(&buff);
    let mut parser = Parser::from_source(&source);
    match parser.parse() {
        Ok(module) => {
            if let Err(err) = fs::write(&output, dot(&module)) {
                println!("{}", err);
            }
        }
        Err(errors) => print_parse_errors(errors),
    }
}
