use crate::object::Object;

pub fn lookup(name: &str) -> Option<Object> {
    match name {
        "len" => Some(Object::Builtin(builtin_len)),
        "first" => Some(Object::Builtin(builtin_first)),
        "last" => Some(Object::Builtin(builtin_last)),
        "rest" => Some(Object::Builtin(builtin_rest)),
        "push" => Some(Object::Builtin(builtin_push)),
        "inspect" => Some(Object::Builtin(builtin_inspect)),
        _ => None,
    }
}

fn check_args(args: &[Object], want: usize) -> Option<Object> {
    if args.len() != want {
        return Some(Object::Error(format!(
            "wrong number of arguments. got={}, want={}",
            args.len(),
            want
        )));
    }
    None
}

fn builtin_len(args: Vec<Object>) -> Object {
    if let Some(err) = check_args(&args, 1) {
        return err;
    }
    match &args[0] {
        Object::Array(items) => Object::Integer(items.len() as i64),
        Object::String(string) => Object::Integer(string.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_str()
        )),
    }
}

fn builtin_first(args: Vec<Object>) -> Object {
    if let Some(err) = check_args(&args, 1) {
        return err;
    }
    match &args[0] {
        Object::Array(items) => items.first().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_str()
        )),
    }
}

fn builtin_last(args: Vec<Object>) -> Object {
    if let Some(err) = check_args(&args, 1) {
        return err;
    }
    match &args[0] {
        Object::Array(items) => items.last().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_str()
        )),
    }
}

fn builtin_rest(args: Vec<Object>) -> Object {
    if let Some(err) = check_args(&args, 1) {
        return err;
    }
    match &args[0] {
        Object::Array(items) => {
            if items.is_empty() {
                Object::Null
            } else {
                Object::Array(items[1..].to_vec())
            }
        }
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_str()
        )),
    }
}

fn builtin_push(args: Vec<Object>) -> Object {
    if let Some(err) = check_args(&args, 2) {
        return err;
    }
    match &args[0] {
        Object::Array(items) => {
            let mut items = items.clone();
            items.push(args[1].clone());
            Object::Array(items)
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_str()
        )),
    }
}

fn builtin_inspect(args: Vec<Object>) -> Object {
    for arg in args {
        println!("{}", arg);
    }
    Object::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_arity_errors() {
        let result = builtin_len(vec![]);
        assert_eq!(
            result,
            Object::Error("wrong number of arguments. got=0, want=1".to_string())
        );

        let result = builtin_push(vec![Object::Array(vec![])]);
        assert_eq!(
            result,
            Object::Error("wrong number of arguments. got=1, want=2".to_string())
        );
    }

    #[test]
    fn test_push_leaves_argument_untouched() {
        let original = Object::Array(vec![Object::Integer(1)]);
        let pushed = builtin_push(vec![original.clone(), Object::Integer(2)]);
        assert_eq!(
            pushed,
            Object::Array(vec![Object::Integer(1), Object::Integer(2)])
        );
        assert_eq!(original, Object::Array(vec![Object::Integer(1)]));
    }

    #[test]
    fn test_rest_of_empty_is_null() {
        assert_eq!(builtin_rest(vec![Object::Array(vec![])]), Object::Null);
    }
}
