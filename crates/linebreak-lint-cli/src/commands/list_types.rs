//! List types command implementation.

use linebreak_lint_core::linebreaks::{self, Requirement, StatementType};

/// Runs the list-types command.
pub fn run() {
    println!("Rule {} ({})\n", linebreaks::NAME, linebreaks::CODE);

    println!("Requirements:\n");
    println!("{:<12} Fix", "Name");
    println!("{}", "-".repeat(60));
    for requirement in Requirement::ALL {
        println!("{:<12} {}", requirement.name(), requirement.help());
    }

    println!("\nStatement types:\n");
    println!("{:<24} Matches", "Name");
    println!("{}", "-".repeat(80));
    for statement_type in StatementType::all() {
        println!(
            "{:<24} {}",
            statement_type.name(),
            statement_type.description()
        );
    }

    println!("\nA type may also be a list of names, matching any of them, e.g.:");
    println!("  statements = [[\"blankline\", [\"const\", \"let\", \"var\"], \"*\"]]");
}
