use std::fs;

use makako::utils::*;
use mk_eval::Evaluator;
use mk_parser::{ast::Module, Parser};

pub fn parse_file(path: &str) -> Option<Module> {
    let buff = match fs::read(path) {
        Ok(buff) => buff,
        Err(err) => {
            println!("{}", err);
            return None;
        }
    };
    let source = String::from_utf8_lossy(&buff);
    let mut parser = Parser::from_source(&source);
    match parser.parse() {
        Ok(module) => Some(module),
        Err(errors) => {
            print_parse_errors(errors);
            None
        }
    }
}

fn eval(module: &Module) {
    let mut evaluator = Evaluator::new();
    if let Some(result) = evaluator.eval(module) {
        println!("{}", result);
    }
}

pub fn run(path: &str) {
    if let Some(module) = parse_file(path) {
        eval(&module);
    }
}
