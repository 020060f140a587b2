use super::ui::{self, StyleType};
use crate::core::crypto_terms::{self, CryptoTerm};
use crate::core::glossary::{
    Category, DeleteOutcome, EditOutcome, Glossary, GlossaryEntry, NewEntry, Prompter,
};
use anyhow::Result;
use comfy_table::{Cell, Table};
use std::io::BufRead;
use tracing::info;

/// Answer that aborts an edit prompt.
pub const CANCEL: &str = "/cancel";

/// Prompts on stdout and reads answers from a line source.
pub struct LinePrompter<'a> {
    input: &'a mut dyn BufRead,
}

impl<'a> LinePrompter<'a> {
    pub fn new(input: &'a mut dyn BufRead) -> Self {
        Self { input }
    }

    fn ask(&mut self, label: &str) -> Option<String> {
        println!("{label}");
        ui::read_line(self.input)
    }
}

impl Prompter for LinePrompter<'_> {
    fn prompt(&mut self, label: &str, current: &str) -> Option<String> {
        let answer = self.ask(&format!(
            "{label} [{}] (Enter keeps, {CANCEL} aborts):",
            ui::style_text(current, StyleType::Subtle)
        ))?;
        (answer.trim() != CANCEL).then_some(answer)
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|a| a.trim().eq_ignore_ascii_case("y"))
    }
}

pub fn entries_table(entries: &[&GlossaryEntry]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Term"),
        ui::header_cell("Reading"),
        ui::header_cell("Category"),
        ui::header_cell("Meaning"),
    ]);
    for entry in entries {
        table.add_row(vec![
            ui::right_cell(entry.id),
            Cell::new(&entry.term),
            Cell::new(&entry.reading),
            Cell::new(entry.category.label()),
            Cell::new(&entry.meaning),
        ]);
    }
    table
}

pub fn crypto_terms_table(terms: &[&CryptoTerm]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Term"),
        ui::header_cell("Section"),
        ui::header_cell("Definition"),
    ]);
    for term in terms {
        table.add_row(vec![
            Cell::new(term.term),
            Cell::new(term.section),
            Cell::new(term.definition),
        ]);
    }
    table
}

fn print_no_match(query: &str) {
    println!(
        "{}",
        ui::style_text(&format!("No terms match '{}'.", query.trim()), StyleType::Subtle)
    );
}

fn print_crypto_matches(query: &str) {
    let terms = crypto_terms::display_terms();
    let matches = crypto_terms::search(&terms, query);
    if matches.is_empty() {
        print_no_match(query);
    } else {
        println!("{}", crypto_terms_table(&matches));
    }
}

fn print_matches(glossary: &Glossary, query: &str) {
    let matches = glossary.search(query);
    if matches.is_empty() {
        print_no_match(query);
    } else {
        println!("{}", entries_table(&matches));
    }
}

fn add_entry(glossary: &mut Glossary, input: &mut dyn BufRead) {
    let mut prompter = LinePrompter::new(input);
    let (Some(term), Some(reading), Some(meaning), Some(category)) = (
        prompter.ask("Term:"),
        prompter.ask("Reading:"),
        prompter.ask("Meaning:"),
        prompter.ask(&format!(
            "Category ({}), Enter for {}:",
            Category::editable_labels(),
            Category::Other
        )),
    ) else {
        return;
    };

    let category = if category.trim().is_empty() {
        Ok(Category::Other)
    } else {
        category.parse::<Category>()
    };
    let result = category.and_then(|category| {
        glossary.add(NewEntry {
            term,
            reading,
            meaning,
            category,
        })
    });
    match result {
        Ok(entry) => {
            info!(id = entry.id, term = %entry.term, "Glossary entry added");
            println!(
                "{}",
                ui::style_text(
                    &format!("Added '{}' (#{})", entry.term, entry.id),
                    StyleType::Success,
                )
            );
        }
        Err(e) => ui::print_error(&e),
    }
}

fn edit_entry(glossary: &mut Glossary, id: u32, input: &mut dyn BufRead) {
    let mut prompter = LinePrompter::new(input);
    match glossary.edit(id, &mut prompter) {
        Ok(EditOutcome::Updated(entry)) => println!(
            "{}",
            ui::style_text(&format!("Updated '{}'", entry.term), StyleType::Success)
        ),
        Ok(EditOutcome::Cancelled) => println!("Edit cancelled."),
        Ok(EditOutcome::NotFound) => println!("No entry with id {id}."),
        Err(e) => ui::print_error(&e),
    }
}

fn delete_entry(glossary: &mut Glossary, id: u32, input: &mut dyn BufRead) {
    let mut prompter = LinePrompter::new(input);
    match glossary.delete(id, &mut prompter) {
        DeleteOutcome::Deleted(entry) => {
            info!(id, term = %entry.term, "Glossary entry deleted");
            println!("Deleted '{}'.", entry.term);
        }
        DeleteOutcome::Cancelled => println!("Delete cancelled."),
        DeleteOutcome::NotFound => println!("No entry with id {id}."),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list             show every term");
    println!("  search <text>    search term, reading and meaning");
    println!("  add              add a term");
    println!("  edit <id>        edit a term");
    println!("  delete <id>      delete a term");
    println!("  quit             leave the glossary");
}

/// Interactive glossary session. Changes last until the session ends.
pub fn shell(glossary: &mut Glossary, input: &mut dyn BufRead) {
    print_help();
    loop {
        println!("{}", ui::style_text("glossary>", StyleType::Accent));
        let Some(line) = ui::read_line(input) else {
            return;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let id = rest.trim().parse::<u32>();
        match (command.to_lowercase().as_str(), id) {
            ("", _) => {}
            ("quit" | "exit" | "q", _) => return,
            ("list" | "ls", _) => print_matches(glossary, ""),
            ("search" | "s", _) => print_matches(glossary, rest),
            ("add", _) => add_entry(glossary, input),
            ("edit", Ok(id)) => edit_entry(glossary, id, input),
            ("delete" | "rm", Ok(id)) => delete_entry(glossary, id, input),
            ("edit" | "delete" | "rm", Err(_)) => {
                ui::print_error(&"Please give the numeric id of the entry")
            }
            _ => print_help(),
        }
    }
}

pub fn run(query: Option<&str>, crypto: bool, interactive: bool) -> Result<()> {
    if crypto {
        if interactive {
            println!("The crypto glossary is read-only.");
        }
        print_crypto_matches(query.unwrap_or_default());
        return Ok(());
    }

    let mut glossary = Glossary::finance();
    if interactive {
        let stdin = std::io::stdin();
        shell(&mut glossary, &mut stdin.lock());
    } else {
        print_matches(&glossary, query.unwrap_or_default());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_shell_add_edit_delete() {
        let script = [
            "add",
            "ETF",
            "イーティーエフ",
            "上場投資信託",
            "投資",
            "edit 15",
            "",
            "",
            "取引所で売買できる投資信託",
            "",
            "delete 1",
            "y",
            "quit",
        ]
        .join("\n");
        let mut glossary = Glossary::finance();
        shell(&mut glossary, &mut Cursor::new(script));

        let etf = glossary.get(15).unwrap();
        assert_eq!(etf.term, "ETF");
        assert_eq!(etf.meaning, "取引所で売買できる投資信託");
        assert_eq!(etf.category, Category::Investment);
        assert!(glossary.get(1).is_none());
        assert_eq!(glossary.entries().len(), 14);
    }

    #[test]
    fn test_shell_cancel_and_decline() {
        let script = ["edit 2", "新しい名前", CANCEL, "delete 2", "n"].join("\n");
        let mut glossary = Glossary::finance();
        let before = glossary.entries().to_vec();
        shell(&mut glossary, &mut Cursor::new(script));
        assert_eq!(glossary.entries(), before.as_slice());
    }

    #[test]
    fn test_shell_rejects_duplicate_add() {
        let script = ["add", "gdp", "じーでぃーぴー", "重複", ""].join("\n");
        let mut glossary = Glossary::finance();
        shell(&mut glossary, &mut Cursor::new(script));
        assert_eq!(glossary.entries().len(), 14);
    }

    #[test]
    fn test_shell_rejects_crypto_category() {
        let script = ["add", "ETF", "イーティーエフ", "上場投資信託", "仮想通貨"].join("\n");
        let mut glossary = Glossary::finance();
        shell(&mut glossary, &mut Cursor::new(script));
        assert_eq!(glossary.entries().len(), 14);
        assert!(glossary.search("ETF").is_empty());
    }

    #[test]
    fn test_crypto_terms_table() {
        let terms = crypto_terms::display_terms();
        let rendered = crypto_terms_table(&crypto_terms::search(&terms, "焼却")).to_string();
        assert!(rendered.contains("通貨・トークンの種類"));
        assert!(rendered.contains("バーン"));
    }

    #[test]
    fn test_line_prompter_eof_cancels() {
        let mut input = Cursor::new("");
        let mut prompter = LinePrompter::new(&mut input);
        assert_eq!(prompter.prompt("Term", "GDP"), None);
        assert!(!prompter.confirm("Delete?"));
    }
}
