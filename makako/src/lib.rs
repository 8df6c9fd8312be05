use crate::errors::*;
use mk_eval::{object::Object, Evaluator};
use mk_parser::{ast::Module, Parser};

pub mod errors;
pub mod graph;
pub mod utils;

pub fn eval_from_buff(source: &str) -> Result<Option<Object>, EvaluationError> {
    let mut parser = Parser::from_source(source);
    match parser.parse() {
        Ok(module) => Ok(eval(&module)),
        Err(err) => Err(EvaluationError::ParseErrors(err)),
    }
}

pub fn eval(module: &Module) -> Option<Object> {
    let mut evaluator = Evaluator::new();
    evaluator.eval(module)
}

#[cfg(test)]
mod tests {
    use super::{eval_from_buff, EvaluationError};

    #[test]
    fn test_seed_programs() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test {
                input: "5 + 5 * 2",
                expected: "15",
            },
            Test {
                input: "(5 + 5) * 2",
                expected: "20",
            },
            Test {
                input: "let x = 10; let y = x * 2; y",
                expected: "20",
            },
            Test {
                input: "if (1 < 2) { 10 } else { 20 }",
                expected: "10",
            },
            Test {
                input: "let add = fn(a, b) { a + b }; add(2, add(3, 4))",
                expected: "9",
            },
            Test {
                input: "let newAdder = fn(x) { fn(y) { x + y } }; let a = newAdder(2); a(3)",
                expected: "5",
            },
            Test {
                input: r#""hello" + " " + "world""#,
                expected: "hello world",
            },
            Test {
                input: "len([1, 2, 3])",
                expected: "3",
            },
            Test {
                input: r#"let h = {"a": 1, "b": 2}; h["b"]"#,
                expected: "2",
            },
            Test {
                input: "-true",
                expected: "ERROR: unknown operator: -BOOLEAN",
            },
            Test {
                input: "5 + true",
                expected: "ERROR: type mismatch: INTEGER + BOOLEAN",
            },
            Test {
                input: "foobar",
                expected: "ERROR: identifier not found: foobar",
            },
        ];

        for tt in tests {
            let result = eval_from_buff(tt.input)
                .unwrap_or_else(|_| panic!("parse failed for {:?}", tt.input))
                .unwrap_or_else(|| panic!("no value for {:?}", tt.input));
            assert_eq!(format!("{}", result), tt.expected, "input: {}", tt.input);
        }
    }

    #[test]
    fn test_parse_errors_surface() {
        match eval_from_buff("let x 5;") {
            Err(EvaluationError::ParseErrors(errors)) => assert!(!errors.is_empty()),
            _ => panic!("expected parse errors"),
        }
    }
}
