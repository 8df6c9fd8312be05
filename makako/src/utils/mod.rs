use colored::Colorize;
use mk_parser::ParseErrors;

pub fn print_parse_errors(errors: ParseErrors) {
    println!(
        "{}",
        format!("{} parsing errors:", errors.len()).red().bold(),
    );
    let msg = errors
        .into_iter()
        .map(|e| format!("\t{}", e))
        .collect::<Vec<String>>()
        .join("\n");
    println!("{}", msg.white().bold());
}
