pub mod tokens;

pub use tokens::{tokenize, Token, TokenList};
