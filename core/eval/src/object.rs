use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use mk_parser::ast::{format_block, BlockStatement, Ident};

use crate::environment::Environment;

pub type BuiltinFunc = fn(Vec<Object>) -> Object;

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function {
        params: Vec<Ident>,
        body: BlockStatement,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFunc),
    ReturnValue(Box<Object>),
    Error(String),
    Null,
}

/// Only integers, booleans and strings may key a hash.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum HashKey {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl HashKey {
    pub fn from_object(obj: &Object) -> Option<HashKey> {
        match obj {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            _ => None,
        }
    }
}

/// Stored pair; keeps the original key object around for inspection.
#[derive(Clone, PartialEq, Debug)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

impl Object {
    pub fn type_str(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::String(_) => "STRING",
            Object::Boolean(_) => "BOOLEAN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Null => "NULL",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Everything except `null` and `false` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::String(left), Object::String(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Array(left), Object::Array(right)) => left == right,
            (Object::Hash(left), Object::Hash(right)) => left == right,
            // environments compare by handle, never by contents: a closure
            // can capture the environment that names it
            (
                Object::Function {
                    params: left_params,
                    body: left_body,
                    env: left_env,
                },
                Object::Function {
                    params: right_params,
                    body: right_body,
                    env: right_env,
                },
            ) => {
                left_params == right_params
                    && left_body == right_body
                    && Rc::ptr_eq(left_env, right_env)
            }
            (Object::Builtin(left), Object::Builtin(right)) => left == right,
            (Object::ReturnValue(left), Object::ReturnValue(right)) => left == right,
            (Object::Error(left), Object::Error(right)) => left == right,
            (Object::Null, Object::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::String(string) => write!(f, "{}", string),
            Object::Boolean(boolean) => write!(f, "{}", boolean),
            Object::Array(items) => {
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
            Object::Hash(pairs) => {
                write!(
                    f,
                    "{{{}}}",
                    pairs
                        .values()
                        .map(|pair| format!("{}: {}", pair.key, pair.value))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
            Object::Function { params, body, .. } => {
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
            Object::Builtin(..) => write!(f, "builtin function"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(msg) => write!(f, "ERROR: {}", msg),
            Object::Null => write!(f, "null"),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
