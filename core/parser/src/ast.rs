use std::fmt;

pub type BlockStatement = Vec<Statement>;
pub type Module = BlockStatement;

#[derive(PartialEq, Clone, Debug)]
pub enum Statement {
    Expression(Expression),
    Let(Ident, Expression),
    Return(Expression),
}

#[derive(PartialEq, Clone, Debug)]
pub enum Literal {
    Int(i64),
    String(String),
    Bool(bool),
    Array(Vec<Expression>),
    Hash(Vec<(Expression, Expression)>),
}

#[derive(PartialEq, Clone, Debug)]
pub enum Expression {
    Ident(Ident),
    Literal(Literal),
    Prefix(Prefix, Box<Expression>),
    Infix(Infix, Box<Expression>, Box<Expression>),
    Index(Box<Expression>, Box<Expression>),
    If {
        cond: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        params: Vec<Ident>,
        body: BlockStatement,
    },
    Call {
        func: Box<Expression>,
        args: Vec<Expression>,
    },
}

#[derive(PartialEq, Clone, Debug)]
pub struct Ident(pub String);

#[derive(PartialEq, Clone, Debug)]
pub enum Prefix {
    Minus,
    Not,
}

#[derive(PartialEq, Clone, Debug)]
pub enum Infix {
    Plus,
    Minus,
    Divide,
    Multiply,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

#[derive(PartialEq, PartialOrd, Debug, Clone)]
pub enum Precedence {
    Lowest,
    Equals,      // ==
    LessGreater, // > or <
    Sum,         // +
    Product,     // *
    Prefix,      // -X or !X
    Call,        // myFunction(x)
    Index,       // array[index]
}

/// Renders a block the way the pretty-printer nests it inside `{ }`.
pub fn format_block(block: &[Statement]) -> String {
    block
        .iter()
        .map(|stmt| format!("{}", stmt))
        .collect::<Vec<String>>()
        .join(" ")
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Prefix::Minus => write!(f, "-"),
            Prefix::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for Infix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Infix::Plus => write!(f, "+"),
            Infix::Minus => write!(f, "-"),
            Infix::Divide => write!(f, "/"),
            Infix::Multiply => write!(f, "*"),
            Infix::Equal => write!(f, "=="),
            Infix::NotEqual => write!(f, "!="),
            Infix::GreaterThan => write!(f, ">"),
            Infix::LessThan => write!(f, "<"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Expression(expr) => write!(f, "{}", expr),
            Statement::Let(ident, expr) => write!(f, "let {} = {};", ident, expr),
            Statement::Return(expr) => write!(f, "return {};", expr),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            // quoted, so the printed form lexes back to a string literal
            Literal::String(value) => write!(f, "\"{}\"", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Array(items) => {
                write!(
                    f,
                    "[{}]",
                    items
                        .iter()
                        .map(|item| format!("{}", item))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
            Literal::Hash(pairs) => {
                write!(
                    f,
                    "{{{}}}",
                    pairs
                        .iter()
                        .map(|(key, value)| format!("{}: {}", key, value))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Ident(ident) => write!(f, "{}", ident),
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Prefix(prefix, right) => write!(f, "({}{})", prefix, right),
            Expression::Infix(infix, left, right) => {
                write!(f, "({} {} {})", left, infix, right)
            }
            Expression::Index(left, index) => write!(f, "({}[{}])", left, index),
            Expression::If {
                cond,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {{ {} }}", cond, format_block(consequence))?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", format_block(alternative))?;
                }
                Ok(())
            }
            Expression::Function { params, body } => {
                write!(
                    f,
                    "fn({}) {{ {} }}",
                    params
                        .iter()
                        .map(|param| format!("{}", param))
                        .collect::<Vec<String>>()
                        .join(", "),
                    format_block(body)
                )
            }
            Expression::Call { func, args } => {
                write!(
                    f,
                    "{}({})",
                    func,
                    args.iter()
                        .map(|arg| format!("{}", arg))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}
