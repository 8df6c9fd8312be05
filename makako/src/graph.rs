//! Dumps a parsed module as a DOT digraph. Every AST node becomes a vertex
//! whose label is the node kind over its pretty-printed subtree; edges point
//! from parent to child, so the result is rooted and acyclic.

use mk_parser::ast::{format_block, Expression, Literal, Module, Statement};

pub fn dot(module: &Module) -> String {
    let mut writer = DotWriter {
        nodes: vec![],
        edges: vec![],
    };

    let root = writer.add_node("Module", &format_block(module));
    for stmt in module {
        let child = writer.add_statement(stmt);
        writer.add_edge(root, child);
    }

    writer.finish()
}

struct DotWriter {
    nodes: Vec<String>,
    edges: Vec<String>,
}

impl DotWriter {
    fn add_node(&mut self, kind: &str, pretty: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(format!(
            "    n{} [label=\"{}\\n{}\"];",
            id,
            kind,
            escape(pretty)
        ));
        id
    }

    fn add_edge(&mut self, parent: usize, child: usize) {
        self.edges.push(format!("    n{} -> n{};", parent, child));
    }

    fn add_statement(&mut self, stmt: &Statement) -> usize {
        let id = self.add_node(statement_kind(stmt), &stmt.to_string());
        match stmt {
            Statement::Expression(expr) | Statement::Let(_, expr) | Statement::Return(expr) => {
                let child = self.add_expression(expr);
                self.add_edge(id, child);
            }
        }
        id
    }

    fn add_block(&mut self, block: &[Statement]) -> usize {
        let id = self.add_node("Block", &format_block(block));
        for stmt in block {
            let child = self.add_statement(stmt);
            self.add_edge(id, child);
        }
        id
    }

    fn add_expression(&mut self, expr: &Expression) -> usize {
        let id = self.add_node(expression_kind(expr), &expr.to_string());
        match expr {
            Expression::Ident(_) => {}
            Expression::Literal(literal) => match literal {
                Literal::Array(items) => {
                    for item in items {
                        let child = self.add_expression(item);
                        self.add_edge(id, child);
                    }
                }
                Literal::Hash(pairs) => {
                    for (key, value) in pairs {
                        let child = self.add_expression(key);
                        self.add_edge(id, child);
                        let child = self.add_expression(value);
                        self.add_edge(id, child);
                    }
                }
                _ => {}
            },
            Expression::Prefix(_, right) => {
                let child = self.add_expression(right);
                self.add_edge(id, child);
            }
            Expression::Infix(_, left, right) => {
                let child = self.add_expression(left);
                self.add_edge(id, child);
                let child = self.add_expression(right);
                self.add_edge(id, child);
            }
            Expression::Index(left, index) => {
                let child = self.add_expression(left);
                self.add_edge(id, child);
                let child = self.add_expression(index);
                self.add_edge(id, child);
            }
            Expression::If {
                cond,
                consequence,
                alternative,
            } => {
                let child = self.add_expression(cond);
                self.add_edge(id, child);
                let child = self.add_block(consequence);
                self.add_edge(id, child);
                if let Some(alternative) = alternative {
                    let child = self.add_block(alternative);
                    self.add_edge(id, child);
                }
            }
            Expression::Function { body, .. } => {
                let child = self.add_block(body);
                self.add_edge(id, child);
            }
            Expression::Call { func, args } => {
                let child = self.add_expression(func);
                self.add_edge(id, child);
                for arg in args {
                    let child = self.add_expression(arg);
                    self.add_edge(id, child);
                }
            }
        }
        id
    }

    fn finish(self) -> String {
        let mut out = String::from("digraph ast {\n");
        for node in &self.nodes {
            out.push_str(node);
            out.push('\n');
        }
        for edge in &self.edges {
            out.push_str(edge);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

fn statement_kind(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Expression(_) => "Statement::Expression",
        Statement::Let(..) => "Statement::Let",
        Statement::Return(_) => "Statement::Return",
    }
}

fn expression_kind(expr: &Expression) -> &'static str {
    match expr {
        Expression::Ident(_) => "Expression::Ident",
        Expression::Literal(Literal::Int(_)) => "Literal::Int",
        Expression::Literal(Literal::String(_)) => "Literal::String",
        Expression::Literal(Literal::Bool(_)) => "Literal::Bool",
        Expression::Literal(Literal::Array(_)) => "Literal::Array",
        Expression::Literal(Literal::Hash(_)) => "Literal::Hash",
        Expression::Prefix(..) => "Expression::Prefix",
        Expression::Infix(..) => "Expression::Infix",
        Expression::Index(..) => "Expression::Index",
        Expression::If { .. } => "Expression::If",
        Expression::Function { .. } => "Expression::Function",
        Expression::Call { .. } => "Expression::Call",
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::dot;
    use mk_parser::Parser;

    fn parse(input: &str) -> mk_parser::ast::Module {
        Parser::from_source(input).parse().unwrap()
    }

    #[test]
    fn test_dot_shape() {
        let out = dot(&parse("let x = 1 + 2;"));
        assert!(out.starts_with("digraph ast {\n"));
        assert!(out.ends_with("}\n"));
        // Module -> Let -> Infix -> {1, 2}
        assert!(out.contains("Statement::Let"));
        assert!(out.contains("Expression::Infix"));
        assert!(out.contains("n0 -> n1"));
        assert_eq!(out.matches("->").count(), 4);
    }

    #[test]
    fn test_dot_escapes_string_literals() {
        let out = dot(&parse(r#"let s = "hi";"#));
        assert!(out.contains("Literal::String\\n\\\"hi\\\""));
    }

    #[test]
    fn test_dot_nests_blocks() {
        let out = dot(&parse("if (x) { 1 } else { 2 }"));
        assert!(out.contains("Expression::If"));
        assert_eq!(out.matches("Block").count(), 2);
    }
}
