use std::fs;

use makako::utils::*;
use mk_eval::Evaluator;
use mk_parser::Parser;
use platform_dirs::AppDirs;
use rustyline::error::ReadlineError;
use rustyline::Editor;

pub fn start() {
    let mut rl = match Editor::<()>::new() {
        Ok(rl) => rl,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    let app_dirs = AppDirs::new(Some("makako"), false).unwrap();
    let history_path = app_dirs.data_dir.clone();

    let _ = fs::create_dir_all(&history_path);

    let history = history_path.join("history.txt");

    let _ = rl.load_history(history.as_path());

    // one environment for the whole session
    let mut evaluator = Evaluator::new();

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str());
                let mut parser = Parser::from_source(line.as_str());
                match parser.parse() {
                    Ok(module) => {
                        if let Some(result) = evaluator.eval(&module) {
                            println!("{}", result);
                        }
                    }
                    Err(errors) => {
                        print_parse_errors(errors);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history.as_path());
}
