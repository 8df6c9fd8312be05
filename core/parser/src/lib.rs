use mk_lexer::tokens::{RawToken, Token, TokenList};

pub mod ast;
pub mod errors;

use ast::*;
use errors::*;

pub type ParseErrors = Vec<ParseError>;

pub struct Parser {
    tokens: TokenList,
    cursor: usize,
    errors: ParseErrors,
}

impl Parser {
    pub fn new(tokens: TokenList) -> Self {
        Parser {
            tokens,
            cursor: 0,
            errors: vec![],
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(mk_lexer::tokenize(source))
    }

    pub fn parse(&mut self) -> Result<Module, ParseErrors> {
        let mut program: Module = vec![];

        while !self.current_token_is(&RawToken::EOF) {
            if let Some(stmt) = self.parse_statement() {
                program.push(stmt);
            }
            self.step();
        }

        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        Ok(program)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_token() {
            Some((RawToken::Let, _)) => self.parse_let_stmt(),
            Some((RawToken::Return, _)) => self.parse_return_stmt(),
            Some(_) => self.parse_expr_statement(),
            None => None,
        }
    }

    fn parse_expr_statement(&mut self) -> Option<Statement> {
        match self.parse_expression(Precedence::Lowest) {
            Some(expr) => {
                if self.next_token_is(&RawToken::Semicolon) {
                    self.step();
                }
                Some(Statement::Expression(expr))
            }
            None => None,
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some((current, _)) = self.current_token() else { return None };

        // parse prefixes
        let mut left = match current {
            RawToken::Ident(_) => self.parse_ident_expr(),
            RawToken::Int(_) => self.parse_integer_expr(),
            RawToken::String(_) => self.parse_string_expr(),
            RawToken::True | RawToken::False => self.parse_boolean_expr(),
            RawToken::Bang | RawToken::Minus => self.parse_prefix_expr(),
            RawToken::ParenL => self.parse_grouped_expr(),
            RawToken::BracketL => self.parse_array_expr(),
            RawToken::BraceL => self.parse_hash_expr(),
            RawToken::Function => self.parse_func_expr(),
            RawToken::If => self.parse_if_expr(),
            _ => {
                self.error_no_prefix_parser();
                return None;
            }
        };

        // parse infixes
        while left.is_some()
            && precedence < self.next_token_precedence().unwrap_or(Precedence::Lowest)
            && !self.next_token_is(&RawToken::Semicolon)
        {
            match self.next_token() {
                Some((next_token, _)) => match next_token {
                    RawToken::Plus
                    | RawToken::Minus
                    | RawToken::Slash
                    | RawToken::Asterisk
                    | RawToken::Equal
                    | RawToken::NotEqual
                    | RawToken::LessThan
                    | RawToken::GreaterThan => {
                        self.step();
                        left = self.parse_infix_expr(left.unwrap());
                    }
                    RawToken::BracketL => {
                        self.step();
                        left = self.parse_index_expr(left.unwrap());
                    }
                    RawToken::ParenL => {
                        self.step();
                        left = self.parse_call_expr(left.unwrap());
                    }
                    _ => return left,
                },
                _ => return left,
            }
        }

        left
    }

    fn parse_if_expr(&mut self) -> Option<Expression> {
        if !self.expect_next_token(RawToken::ParenL) {
            return None;
        }

        self.step();

        let cond = match self.parse_expression(Precedence::Lowest) {
            Some(expr) => expr,
            None => return None,
        };

        if !self.expect_next_token(RawToken::ParenR) {
            return None;
        }

        if !self.expect_next_token(RawToken::BraceL) {
            return None;
        }

        let consequence = self.parse_block_stmt();
        let mut alternative = None;

        if self.next_token_is(&RawToken::Else) {
            self.step();

            if !self.expect_next_token(RawToken::BraceL) {
                return None;
            }

            alternative = Some(self.parse_block_stmt());
        }

        Some(Expression::If {
            cond: Box::new(cond),
            consequence,
            alternative,
        })
    }

    fn parse_func_expr(&mut self) -> Option<Expression> {
        if !self.expect_next_token(RawToken::ParenL) {
            return None;
        }

        let params = match self.parse_func_params() {
            Some(params) => params,
            None => return None,
        };

        if !self.expect_next_token(RawToken::BraceL) {
            return None;
        }

        Some(Expression::Function {
            params,
            body: self.parse_block_stmt(),
        })
    }

    fn parse_block_stmt(&mut self) -> BlockStatement {
        self.step();

        let mut block = vec![];

        while !self.current_token_is(&RawToken::BraceR) && !self.current_token_is(&RawToken::EOF) {
            if let Some(stmt) = self.parse_statement() {
                block.push(stmt);
            }
            self.step();
        }

        block
    }

    fn parse_func_params(&mut self) -> Option<Vec<Ident>> {
        let mut params = vec![];

        if self.next_token_is(&RawToken::ParenR) {
            self.step();
            return Some(params);
        }

        self.step();

        match self.parse_ident() {
            Some(ident) => params.push(ident),
            None => return None,
        };

        while self.next_token_is(&RawToken::Comma) {
            self.step();
            self.step();

            match self.parse_ident() {
                Some(ident) => params.push(ident),
                None => return None,
            };
        }

        if !self.expect_next_token(RawToken::ParenR) {
            return None;
        }

        Some(params)
    }

    fn parse_call_expr(&mut self, func: Expression) -> Option<Expression> {
        let args = match self.parse_expr_list(RawToken::ParenR) {
            Some(args) => args,
            None => return None,
        };

        Some(Expression::Call {
            func: Box::new(func),
            args,
        })
    }

    fn parse_index_expr(&mut self, left: Expression) -> Option<Expression> {
        self.step();

        let index = match self.parse_expression(Precedence::Lowest) {
            Some(expr) => expr,
            None => return None,
        };

        if !self.expect_next_token(RawToken::BracketR) {
            return None;
        }

        Some(Expression::Index(Box::new(left), Box::new(index)))
    }

    fn parse_grouped_expr(&mut self) -> Option<Expression> {
        self.step();

        let expr = self.parse_expression(Precedence::Lowest);

        if !self.expect_next_token(RawToken::ParenR) {
            None
        } else {
            expr
        }
    }

    fn parse_let_stmt(&mut self) -> Option<Statement> {
        match self.next_token() {
            Some((RawToken::Ident(_), _)) => self.step(),
            _ => {
                self.error_next_token(&RawToken::Ident(String::from("")));
                return None;
            }
        }

        let ident = match self.parse_ident() {
            Some(ident) => ident,
            _ => return None,
        };

        if !self.expect_next_token(RawToken::Assign) {
            return None;
        }

        self.step();

        let expr = match self.parse_expression(Precedence::Lowest) {
            Some(expr) => expr,
            None => return None,
        };

        if self.next_token_is(&RawToken::Semicolon) {
            self.step();
        }

        Some(Statement::Let(ident, expr))
    }

    fn parse_return_stmt(&mut self) -> Option<Statement> {
        self.step();

        let expr = match self.parse_expression(Precedence::Lowest) {
            Some(expr) => expr,
            None => return None,
        };

        if self.next_token_is(&RawToken::Semicolon) {
            self.step();
        }

        Some(Statement::Return(expr))
    }

    fn parse_ident(&mut self) -> Option<Ident> {
        match self.current_token() {
            Some((RawToken::Ident(name), _)) => Some(Ident(name)),
            _ => None,
        }
    }

    fn parse_prefix_expr(&mut self) -> Option<Expression> {
        let Some((current, _)) = self.current_token() else { return None };
        let prefix = match current {
            RawToken::Bang => Prefix::Not,
            RawToken::Minus => Prefix::Minus,
            _ => return None,
        };

        self.step();

        match self.parse_expression(Precedence::Prefix) {
            Some(expr) => Some(Expression::Prefix(prefix, Box::new(expr))),
            None => None,
        }
    }

    fn parse_infix_expr(&mut self, left: Expression) -> Option<Expression> {
        let Some((current, _)) = self.current_token() else { return None };
        let infix = match current {
            RawToken::Plus => Infix::Plus,
            RawToken::Minus => Infix::Minus,
            RawToken::Slash => Infix::Divide,
            RawToken::Asterisk => Infix::Multiply,
            RawToken::Equal => Infix::Equal,
            RawToken::NotEqual => Infix::NotEqual,
            RawToken::LessThan => Infix::LessThan,
            RawToken::GreaterThan => Infix::GreaterThan,
            _ => return None,
        };

        let precedence = token_to_precedence(&current);

        self.step();

        match self.parse_expression(precedence) {
            Some(expr) => Some(Expression::Infix(infix, Box::new(left), Box::new(expr))),
            None => None,
        }
    }

    fn parse_ident_expr(&mut self) -> Option<Expression> {
        self.parse_ident().map(Expression::Ident)
    }

    fn parse_integer_expr(&mut self) -> Option<Expression> {
        match self.current_token() {
            Some((RawToken::Int(value), _)) => Some(Expression::Literal(Literal::Int(value))),
            _ => None,
        }
    }

    fn parse_boolean_expr(&mut self) -> Option<Expression> {
        match self.current_token() {
            Some((RawToken::True, _)) => Some(Expression::Literal(Literal::Bool(true))),
            Some((RawToken::False, _)) => Some(Expression::Literal(Literal::Bool(false))),
            _ => None,
        }
    }

    fn parse_string_expr(&mut self) -> Option<Expression> {
        match self.current_token() {
            Some((RawToken::String(string), _)) => Some(Expression::Literal(Literal::String(
                String::from(&string[1..string.len() - 1]),
            ))),
            _ => None,
        }
    }

    fn parse_array_expr(&mut self) -> Option<Expression> {
        self.parse_expr_list(RawToken::BracketR)
            .map(|list| Expression::Literal(Literal::Array(list)))
    }

    fn parse_hash_expr(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while !self.next_token_is(&RawToken::BraceR) {
            self.step();

            let key = match self.parse_expression(Precedence::Lowest) {
                Some(expr) => expr,
                None => return None,
            };

            if !self.expect_next_token(RawToken::Colon) {
                return None;
            }

            self.step();

            let value = match self.parse_expression(Precedence::Lowest) {
                Some(expr) => expr,
                None => return None,
            };

            pairs.push((key, value));

            if !self.next_token_is(&RawToken::BraceR) && !self.expect_next_token(RawToken::Comma) {
                return None;
            }
        }

        if !self.expect_next_token(RawToken::BraceR) {
            return None;
        }

        Some(Expression::Literal(Literal::Hash(pairs)))
    }

    fn parse_expr_list(&mut self, end: RawToken) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.next_token_is(&end) {
            self.step();
            return Some(list);
        }

        self.step();

        match self.parse_expression(Precedence::Lowest) {
            Some(expr) => list.push(expr),
            None => return None,
        }

        while self.next_token_is(&RawToken::Comma) {
            self.step();
            self.step();

            match self.parse_expression(Precedence::Lowest) {
                Some(expr) => list.push(expr),
                None => return None,
            }
        }

        if !self.expect_next_token(end) {
            return None;
        }

        Some(list)
    }

    fn current_token_is(&self, token: &RawToken) -> bool {
        match self.current_token() {
            Some((current, _)) => &current == token,
            None => token == &RawToken::EOF,
        }
    }

    fn next_token_is(&self, token: &RawToken) -> bool {
        match self.next_token() {
            Some((current, _)) => &current == token,
            None => token == &RawToken::EOF,
        }
    }

    fn current_token(&self) -> Option<Token> {
        self.tokens.get(self.cursor).cloned()
    }

    fn next_token(&self) -> Option<Token> {
        self.tokens.get(self.cursor + 1).cloned()
    }

    fn step(&mut self) {
        self.cursor += 1;
    }

    fn expect_next_token(&mut self, tok: RawToken) -> bool {
        if self.next_token_is(&tok) {
            self.step();
            true
        } else {
            self.error_next_token(&tok);
            false
        }
    }

    fn error_next_token(&mut self, tok: &RawToken) {
        let next = self.next_token().unwrap_or((RawToken::EOF, 0..0));
        self.errors.push(ParseError::new(
            ParseErrorKind::UnexpectedToken(next.clone()),
            format!(
                "expected next token to be \"{:?}\", got \"{:?}\" instead",
                tok, next.0,
            ),
        ));
    }

    fn error_no_prefix_parser(&mut self) {
        let Some(current) = self.current_token() else { return };
        self.errors.push(ParseError::new(
            ParseErrorKind::UnexpectedToken(current.clone()),
            format!("no prefix parse function for \"{:?}\" found", current.0,),
        ));
    }

    fn next_token_precedence(&self) -> Option<Precedence> {
        self.next_token()
            .map(|(token, _)| token_to_precedence(&token))
    }
}

fn token_to_precedence(token: &RawToken) -> Precedence {
    match token {
        RawToken::Equal | RawToken::NotEqual => Precedence::Equals,
        RawToken::LessThan | RawToken::GreaterThan => Precedence::LessGreater,
        RawToken::Plus | RawToken::Minus => Precedence::Sum,
        RawToken::Slash | RawToken::Asterisk => Precedence::Product,
        RawToken::BracketL => Precedence::Index,
        RawToken::ParenL => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

#[cfg(test)]
mod tests {
    use super::ast::*;
    use super::Parser;

    fn parse(input: &str) -> Module {
        Parser::from_source(input)
            .parse()
            .unwrap_or_else(|errors| panic!("parse failed for {:?}: {:?}", input, errors))
    }

    #[test]
    fn test_let_statements() {
        let module = parse("let x = 5; let y = true; let foo = y;");
        assert_eq!(
            module,
            vec![
                Statement::Let(
                    Ident("x".to_string()),
                    Expression::Literal(Literal::Int(5))
                ),
                Statement::Let(
                    Ident("y".to_string()),
                    Expression::Literal(Literal::Bool(true))
                ),
                Statement::Let(
                    Ident("foo".to_string()),
                    Expression::Ident(Ident("y".to_string()))
                ),
            ]
        );
    }

    #[test]
    fn test_return_statements() {
        let module = parse("return 5; return x;");
        assert_eq!(
            module,
            vec![
                Statement::Return(Expression::Literal(Literal::Int(5))),
                Statement::Return(Expression::Ident(Ident("x".to_string()))),
            ]
        );
    }

    #[test]
    fn test_operator_precedence() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test {
                input: "5 + 5 * 2",
                expected: "(5 + (5 * 2))",
            },
            Test {
                input: "(5 + 5) * 2",
                expected: "((5 + 5) * 2)",
            },
            Test {
                input: "-a * b",
                expected: "((-a) * b)",
            },
            Test {
                input: "!-a",
                expected: "(!(-a))",
            },
            Test {
                input: "a + b * c + d / e - f",
                expected: "(((a + (b * c)) + (d / e)) - f)",
            },
            Test {
                input: "3 + 4 * 5 == 3 * 1 + 4 * 5",
                expected: "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            },
            Test {
                input: "3 < 5 == true",
                expected: "((3 < 5) == true)",
            },
            Test {
                input: "a * [1, 2, 3, 4][b * c] * d",
                expected: "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            },
            Test {
                input: "add(a + b + c * d / f + g)",
                expected: "add(((a + b) + (((c * d) / f) + g)))",
            },
            Test {
                input: "a + add(b * c) + d",
                expected: "((a + add((b * c))) + d)",
            },
        ];

        for tt in tests {
            let module = parse(tt.input);
            assert_eq!(module.len(), 1, "input: {}", tt.input);
            assert_eq!(format!("{}", module[0]), tt.expected, "input: {}", tt.input);
        }
    }

    #[test]
    fn test_if_expression() {
        let module = parse("if (x < y) { x } else { y }");
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::If {
                cond: Box::new(Expression::Infix(
                    Infix::LessThan,
                    Box::new(Expression::Ident(Ident("x".to_string()))),
                    Box::new(Expression::Ident(Ident("y".to_string()))),
                )),
                consequence: vec![Statement::Expression(Expression::Ident(Ident(
                    "x".to_string()
                )))],
                alternative: Some(vec![Statement::Expression(Expression::Ident(Ident(
                    "y".to_string()
                )))]),
            })]
        );
    }

    #[test]
    fn test_if_without_alternative() {
        let module = parse("if (x) { 1 }");
        match &module[0] {
            Statement::Expression(Expression::If { alternative, .. }) => {
                assert!(alternative.is_none())
            }
            other => panic!("expected if expression, got {:?}", other),
        }
    }

    #[test]
    fn test_function_literal() {
        let module = parse("fn(x, y) { x + y; }");
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Function {
                params: vec![Ident("x".to_string()), Ident("y".to_string())],
                body: vec![Statement::Expression(Expression::Infix(
                    Infix::Plus,
                    Box::new(Expression::Ident(Ident("x".to_string()))),
                    Box::new(Expression::Ident(Ident("y".to_string()))),
                ))],
            })]
        );
    }

    #[test]
    fn test_function_params() {
        struct Test<'a> {
            input: &'a str,
            expected: Vec<&'a str>,
        }
        let tests = vec![
            Test {
                input: "fn() {}",
                expected: vec![],
            },
            Test {
                input: "fn(x) {}",
                expected: vec!["x"],
            },
            Test {
                input: "fn(x, y, z) {}",
                expected: vec!["x", "y", "z"],
            },
        ];

        for tt in tests {
            let module = parse(tt.input);
            match &module[0] {
                Statement::Expression(Expression::Function { params, .. }) => {
                    let names: Vec<String> =
                        params.iter().map(|Ident(name)| name.clone()).collect();
                    assert_eq!(names, tt.expected);
                }
                other => panic!("expected function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_call_expression() {
        let module = parse("add(1, 2 * 3, 4 + 5)");
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Call {
                func: Box::new(Expression::Ident(Ident("add".to_string()))),
                args: vec![
                    Expression::Literal(Literal::Int(1)),
                    Expression::Infix(
                        Infix::Multiply,
                        Box::new(Expression::Literal(Literal::Int(2))),
                        Box::new(Expression::Literal(Literal::Int(3))),
                    ),
                    Expression::Infix(
                        Infix::Plus,
                        Box::new(Expression::Literal(Literal::Int(4))),
                        Box::new(Expression::Literal(Literal::Int(5))),
                    ),
                ],
            })]
        );
    }

    #[test]
    fn test_array_literal_and_index() {
        let module = parse("[1, 2 * 2][1]");
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Index(
                Box::new(Expression::Literal(Literal::Array(vec![
                    Expression::Literal(Literal::Int(1)),
                    Expression::Infix(
                        Infix::Multiply,
                        Box::new(Expression::Literal(Literal::Int(2))),
                        Box::new(Expression::Literal(Literal::Int(2))),
                    ),
                ]))),
                Box::new(Expression::Literal(Literal::Int(1))),
            ))]
        );
    }

    #[test]
    fn test_hash_literal() {
        let module = parse(r#"{"one": 1, "two": 1 + 1, 3: "three"}"#);
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Literal(Literal::Hash(
                vec![
                    (
                        Expression::Literal(Literal::String("one".to_string())),
                        Expression::Literal(Literal::Int(1)),
                    ),
                    (
                        Expression::Literal(Literal::String("two".to_string())),
                        Expression::Infix(
                            Infix::Plus,
                            Box::new(Expression::Literal(Literal::Int(1))),
                            Box::new(Expression::Literal(Literal::Int(1))),
                        ),
                    ),
                    (
                        Expression::Literal(Literal::Int(3)),
                        Expression::Literal(Literal::String("three".to_string())),
                    ),
                ]
            )))]
        );
    }

    #[test]
    fn test_empty_hash_literal() {
        let module = parse("{}");
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Literal(Literal::Hash(
                vec![]
            )))]
        );
    }

    #[test]
    fn test_string_literal() {
        let module = parse(r#""hello world""#);
        assert_eq!(
            module,
            vec![Statement::Expression(Expression::Literal(Literal::String(
                "hello world".to_string()
            )))]
        );
    }

    #[test]
    fn test_parse_errors_accumulate() {
        let mut parser = Parser::from_source("let x 5; let = 10; let 3 = 4;");
        let errors = parser.parse().unwrap_err();
        assert!(errors.len() >= 3);
        assert!(format!("{}", errors[0]).contains("expected next token to be"));
    }

    #[test]
    fn test_no_prefix_parser_error() {
        let mut parser = Parser::from_source("let x = ;");
        let errors = parser.parse().unwrap_err();
        assert!(!errors.is_empty());
        assert!(format!("{}", errors[0]).contains("no prefix parse function"));
    }

    #[test]
    fn test_print_parse_roundtrip() {
        let sources = vec![
            "let x = 5;",
            "let add = fn(a, b) { a + b; };",
            "if (1 < 2) { 10 } else { 20 }",
            "let h = {\"a\": 1, \"b\": 2}; h[\"b\"]",
            "let arr = [1, 2 * 2, !true]; first(rest(arr))",
            "return -5 * (3 + 4);",
        ];

        for source in sources {
            let module = parse(source);
            let printed = module
                .iter()
                .map(|stmt| format!("{}", stmt))
                .collect::<Vec<String>>()
                .join(" ");
            let reparsed = parse(&printed);
            assert_eq!(module, reparsed, "printed form: {}", printed);
        }
    }
}
