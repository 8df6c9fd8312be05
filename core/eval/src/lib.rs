pub mod builtins;
pub mod environment;
pub mod object;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use mk_parser::ast::{BlockStatement, Expression, Ident, Infix, Literal, Module, Prefix, Statement};

use environment::Environment;
use object::{HashKey, HashPair, Object};

/// Walks the AST against a shared environment. Runtime failures stay inside
/// the value space as `Object::Error` and unwind like `Object::ReturnValue`.
pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_env(Rc::new(RefCell::new(Environment::new())))
    }

    pub fn with_env(env: Rc<RefCell<Environment>>) -> Self {
        Evaluator { env }
    }

    /// Evaluates a whole program: unwraps a propagated `return`, halts on the
    /// first error, otherwise yields the last statement's value.
    pub fn eval(&mut self, module: &Module) -> Option<Object> {
        let mut result = None;

        for stmt in module {
            match self.eval_statement(stmt) {
                Some(Object::ReturnValue(value)) => return Some(*value),
                Some(err @ Object::Error(_)) => return Some(err),
                other => result = other,
            }
        }

        result
    }

    /// Like `eval`, but `return` and errors pass through unwrapped so they
    /// keep unwinding the enclosing blocks.
    fn eval_block(&mut self, block: &BlockStatement) -> Option<Object> {
        let mut result = None;

        for stmt in block {
            match self.eval_statement(stmt) {
                Some(obj @ (Object::ReturnValue(_) | Object::Error(_))) => return Some(obj),
                other => result = other,
            }
        }

        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Option<Object> {
        match stmt {
            Statement::Expression(expr) => Some(self.eval_expression(expr)),
            Statement::Return(expr) => {
                let value = self.eval_expression(expr);
                if value.is_error() {
                    return Some(value);
                }
                Some(Object::ReturnValue(Box::new(value)))
            }
            Statement::Let(Ident(name), expr) => {
                let value = self.eval_expression(expr);
                if value.is_error() {
                    return Some(value);
                }
                self.env.borrow_mut().set(name.clone(), value);
                None
            }
        }
    }

    fn eval_expression(&mut self, expr: &Expression) -> Object {
        match expr {
            Expression::Ident(Ident(name)) => self.eval_ident(name),
            Expression::Literal(literal) => self.eval_literal(literal),
            Expression::Prefix(prefix, right) => {
                let right = self.eval_expression(right);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(prefix, right)
            }
            Expression::Infix(infix, left, right) => {
                let left = self.eval_expression(left);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(infix, left, right)
            }
            Expression::Index(left, index) => {
                let left = self.eval_expression(left);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(index);
                if index.is_error() {
                    return index;
                }
                eval_index_expression(left, index)
            }
            Expression::If {
                cond,
                consequence,
                alternative,
            } => self.eval_if_expression(cond, consequence, alternative),
            Expression::Function { params, body } => Object::Function {
                params: params.clone(),
                body: body.clone(),
                env: Rc::clone(&self.env),
            },
            Expression::Call { func, args } => {
                let func = self.eval_expression(func);
                if func.is_error() {
                    return func;
                }
                let args = match self.eval_expressions(args) {
                    Ok(args) => args,
                    Err(err) => return err,
                };
                apply_function(func, args)
            }
        }
    }

    fn eval_ident(&self, name: &str) -> Object {
        match self.env.borrow().get(name) {
            Some(obj) => obj,
            None => match builtins::lookup(name) {
                Some(builtin) => builtin,
                None => Object::Error(format!("identifier not found: {}", name)),
            },
        }
    }

    fn eval_literal(&mut self, literal: &Literal) -> Object {
        match literal {
            Literal::Int(value) => Object::Integer(*value),
            Literal::String(value) => Object::String(value.clone()),
            Literal::Bool(value) => Object::Boolean(*value),
            Literal::Array(items) => match self.eval_expressions(items) {
                Ok(items) => Object::Array(items),
                Err(err) => err,
            },
            Literal::Hash(pairs) => self.eval_hash_literal(pairs),
        }
    }

    fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Object {
        let mut hash = HashMap::new();

        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr);
            if key.is_error() {
                return key;
            }

            let Some(hashed) = HashKey::from_object(&key) else {
                return Object::Error(format!("unusable as hash key: {}", key.type_str()));
            };

            let value = self.eval_expression(value_expr);
            if value.is_error() {
                return value;
            }

            hash.insert(hashed, HashPair { key, value });
        }

        Object::Hash(hash)
    }

    fn eval_if_expression(
        &mut self,
        cond: &Expression,
        consequence: &BlockStatement,
        alternative: &Option<BlockStatement>,
    ) -> Object {
        let cond = self.eval_expression(cond);
        if cond.is_error() {
            return cond;
        }

        if cond.is_truthy() {
            self.eval_block(consequence).unwrap_or(Object::Null)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative).unwrap_or(Object::Null)
        } else {
            Object::Null
        }
    }

    /// Left-to-right, stopping at the first error.
    fn eval_expressions(&mut self, exprs: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(exprs.len());

        for expr in exprs {
            let value = self.eval_expression(expr);
            if value.is_error() {
                return Err(value);
            }
            result.push(value);
        }

        Ok(result)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_function(func: Object, args: Vec<Object>) -> Object {
    match func {
        Object::Function { params, body, env } => {
            if args.len() != params.len() {
                return Object::Error(format!(
                    "expected {} arguments, got {}",
                    params.len(),
                    args.len()
                ));
            }

            // the call scope encloses the *captured* environment, not the
            // caller's
            let mut scope = Environment::new_enclosed(env);
            for (Ident(name), value) in params.iter().zip(args) {
                scope.set(name.clone(), value);
            }

            let mut inner = Evaluator::with_env(Rc::new(RefCell::new(scope)));
            match inner.eval_block(&body) {
                Some(Object::ReturnValue(value)) => *value,
                Some(obj) => obj,
                None => Object::Null,
            }
        }
        Object::Builtin(func) => func(args),
        other => Object::Error(format!("not a function: {}", other.type_str())),
    }
}

fn eval_prefix_expression(prefix: &Prefix, right: Object) -> Object {
    match prefix {
        Prefix::Not => eval_not_expression(right),
        Prefix::Minus => eval_negative_expression(right),
    }
}

fn eval_not_expression(right: Object) -> Object {
    match right {
        Object::Boolean(value) => Object::Boolean(!value),
        Object::Null => Object::Boolean(true),
        _ => Object::Boolean(false),
    }
}

fn eval_negative_expression(right: Object) -> Object {
    match right {
        Object::Integer(value) => Object::Integer(value.wrapping_neg()),
        other => Object::Error(format!("unknown operator: -{}", other.type_str())),
    }
}

fn eval_infix_expression(infix: &Infix, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(infix, left, right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(infix, left, right)
        }
        (left, right) => match infix {
            Infix::Equal => Object::Boolean(left == right),
            Infix::NotEqual => Object::Boolean(left != right),
            _ => {
                if left.type_str() != right.type_str() {
                    Object::Error(format!(
                        "type mismatch: {} {} {}",
                        left.type_str(),
                        infix,
                        right.type_str()
                    ))
                } else {
                    Object::Error(format!(
                        "unknown operator: {} {} {}",
                        left.type_str(),
                        infix,
                        right.type_str()
                    ))
                }
            }
        },
    }
}

// integer arithmetic wraps at 64 bits
fn eval_integer_infix_expression(infix: &Infix, left: i64, right: i64) -> Object {
    match infix {
        Infix::Plus => Object::Integer(left.wrapping_add(right)),
        Infix::Minus => Object::Integer(left.wrapping_sub(right)),
        Infix::Multiply => Object::Integer(left.wrapping_mul(right)),
        Infix::Divide => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        Infix::LessThan => Object::Boolean(left < right),
        Infix::GreaterThan => Object::Boolean(left > right),
        Infix::Equal => Object::Boolean(left == right),
        Infix::NotEqual => Object::Boolean(left != right),
    }
}

fn eval_string_infix_expression(infix: &Infix, left: String, right: String) -> Object {
    match infix {
        Infix::Plus => Object::String(format!("{}{}", left, right)),
        Infix::Equal => Object::Boolean(left == right),
        Infix::NotEqual => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: STRING {} STRING", infix)),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(items), Object::Integer(index)) => eval_array_index(items, index),
        (Object::Array(_), index) => {
            Object::Error(format!("expected integer, got {}", index.type_str()))
        }
        (Object::Hash(pairs), index) => match HashKey::from_object(&index) {
            Some(key) => match pairs.get(&key) {
                Some(pair) => pair.value.clone(),
                None => Object::Null,
            },
            None => Object::Error(format!("unusable as hash key: {}", index.type_str())),
        },
        (other, _) => Object::Error(format!(
            "index operator not supported: {}",
            other.type_str()
        )),
    }
}

fn eval_array_index(items: Vec<Object>, index: i64) -> Object {
    if index < 0 || index >= items.len() as i64 {
        Object::Null
    } else {
        items[index as usize].clone()
    }
}
