use mk_parser::ParseErrors;

pub enum EvaluationError {
    ParseErrors(ParseErrors),
}
