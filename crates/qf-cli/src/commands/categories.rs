//! The `categories` subcommand: list what the bank offers.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use qf_engine::QuestionSource;

/// List categories and question counts from the bank directory.
pub fn run(data: &Path) -> Result<(), String> {
    let bank = super::open_bank(data)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Questions"]);

    let names = bank.list_categories();
    for name in &names {
        let count = bank
            .question_count(name)
            .map(|c| c.to_string())
            .unwrap_or_else(|_| "?".to_string());
        table.add_row(vec![name.clone(), count]);
    }

    println!("{table}");
    println!();
    println!("  {} categories", names.len());

    Ok(())
}
