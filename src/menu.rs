//! Interactive console menu.
//!
//! Drives the same [`ItemService`] handlers as the HTTP routes, calling them
//! synchronously. Input and output are generic so the loop can be exercised
//! with in-memory buffers.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use crate::model::{Item, ItemId, NewItem};
use crate::service::{ItemService, ServiceError};

const MENU: &str = "\nPlease choose an option by number:
1. To see all items
2. To add an item
3. To delete an item
4. To find an item by ID
5. Exit
";

/// A numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    List,
    Add,
    Delete,
    Find,
    Exit,
}

impl Choice {
    /// Parse the number typed at the prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Add),
            "3" => Some(Self::Delete),
            "4" => Some(Self::Find),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Console session over an input and output stream.
pub struct Menu<'a, R, W> {
    service: &'a ItemService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a ItemService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run until the user exits or input reaches EOF.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("\nChoose the option: ")? else {
                break;
            };

            let keep_going = match Choice::parse(&line) {
                Some(Choice::List) => self.list()?,
                Some(Choice::Add) => self.add()?,
                Some(Choice::Delete) => self.delete()?,
                Some(Choice::Find) => self.find()?,
                Some(Choice::Exit) => false,
                None => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Exiting...")?;
        self.output.flush()
    }

    /// Print `message` and read one line. `None` on EOF.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list(&mut self) -> io::Result<bool> {
        writeln!(self.output, "\nFetching all items...\n")?;
        match self.service.list_items() {
            Ok(items) if items.is_empty() => writeln!(self.output, "No items found.")?,
            Ok(items) => {
                for item in &items {
                    self.print_item(item)?;
                }
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(true)
    }

    fn add(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter item name: ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(false);
        };
        let Some(location) = self.prompt("Enter location: ")? else {
            return Ok(false);
        };
        let Some(date) = self.prompt("Enter date found (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let Some(contact_info) = self.prompt("Enter contact info: ")? else {
            return Ok(false);
        };

        let Ok(date_found) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
            writeln!(self.output, "Invalid date '{date}', expected YYYY-MM-DD.")?;
            return Ok(true);
        };

        let item = NewItem {
            name,
            description: non_empty(description),
            location: non_empty(location),
            date_found,
            contact_info: non_empty(contact_info),
        };
        match self.service.create_item(item) {
            Ok(created) => {
                writeln!(self.output, "Item added with ID {}.", created.id)?;
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(true)
    }

    fn delete(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_id("Enter item ID to delete: ")? else {
            return Ok(false);
        };
        if let Some(id) = id {
            match self.service.delete_item(id) {
                Ok(confirmation) => writeln!(self.output, "{}", confirmation.message)?,
                Err(e) => self.print_error(&e)?,
            }
        }
        Ok(true)
    }

    fn find(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt_id("Enter item ID to find: ")? else {
            return Ok(false);
        };
        if let Some(id) = id {
            match self.service.get_item(id) {
                Ok(item) => self.print_item(&item)?,
                Err(e) => self.print_error(&e)?,
            }
        }
        Ok(true)
    }

    /// Outer `None` on EOF, inner `None` when the answer is not an integer.
    fn prompt_id(&mut self, message: &str) -> io::Result<Option<Option<ItemId>>> {
        let Some(answer) = self.prompt(message)? else {
            return Ok(None);
        };
        match answer.parse::<ItemId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                writeln!(self.output, "Invalid ID '{answer}', expected a number.")?;
                Ok(Some(None))
            }
        }
    }

    fn print_item(&mut self, item: &Item) -> io::Result<()> {
        writeln!(
            self.output,
            "#{} {} | found {} at {} | {} | contact: {} | {}",
            item.id,
            item.name,
            item.date_found,
            item.location.as_deref().unwrap_or("-"),
            item.description.as_deref().unwrap_or("-"),
            item.contact_info.as_deref().unwrap_or("-"),
            if item.claimed { "claimed" } else { "unclaimed" },
        )
    }

    fn print_error(&mut self, err: &ServiceError) -> io::Result<()> {
        writeln!(self.output, "{err}")
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Run the menu on the process's stdin and stdout.
pub fn run_stdio(service: &ItemService) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(service, stdin.lock(), stdout.lock()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ItemStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(service: &ItemService, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(service, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn service(temp_dir: &TempDir) -> ItemService {
        ItemService::new(ItemStore::open(temp_dir.path().join("menu.db"), 2).unwrap())
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse(" 1\n"), Some(Choice::List));
        assert_eq!(Choice::parse("5"), Some(Choice::Exit));
        assert_eq!(Choice::parse("9"), None);
    }

    #[test]
    fn test_add_then_find() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let output = run_script(
            &service,
            "2\nWallet\n\nLibrary\n2024-01-10\nx@y.com\n4\n1\n5\n",
        );

        assert!(output.contains("Item added with ID 1."));
        assert!(output.contains("#1 Wallet | found 2024-01-10 at Library"));
        assert!(output.contains("Exiting..."));

        let stored = service.get_item(1).unwrap();
        assert_eq!(stored.description, None);
        assert_eq!(stored.contact_info.as_deref(), Some("x@y.com"));
    }

    #[test]
    fn test_bad_input_does_not_crash() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let output = run_script(&service, "7\n4\nabc\n3\n12\n2\nKeys\n\n\nsoon\n\n5\n");

        assert!(output.contains("Invalid option. Please try again."));
        assert!(output.contains("Invalid ID 'abc', expected a number."));
        assert!(output.contains("Item not found"));
        assert!(output.contains("Invalid date 'soon', expected YYYY-MM-DD."));
        assert!(service.list_items().unwrap().is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let output = run_script(&service, "2\n\n\n\n2024-01-10\n\n5\n");

        assert!(output.contains("name must not be empty"));
        assert!(service.list_items().unwrap().is_empty());
    }

    #[test]
    fn test_delete_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let output = run_script(
            &service,
            "2\nUmbrella\nBlack\nCafe\n2024-02-01\n\n3\n1\n1\n",
        );

        assert!(output.contains("Item deleted successfully"));
        assert!(output.contains("No items found."));
        // EOF after the listing exits cleanly
        assert!(output.ends_with("Exiting...\n"));
    }
}
