use std::io::{self, BufRead, Write};

use tracing::debug;

use super::render::{item_card, kind_heading, RULE};
use crate::entity::ItemKind;
use crate::error::CatalogueError;
use crate::model::ModelStore;
use crate::service::LibraryService;
use crate::validate::{self, ValidationError};

const MAIN_MENU: &str = "Welcome to the Library System
1. View all available items
2. Search item by title or type
3. Register as a new user
4. Borrow / Return an item
5. Reserve / Cancel reservation of an item
6. Admin: Add/Remove Items/Users
7. Exit
> ";

/// A user and an item picked by display id for a lending action.
struct Selection {
    user_id: String,
    user_name: String,
    item_id: String,
    title: String,
}

pub struct Shell<'a, S, R, W> {
    service: &'a mut LibraryService<S>,
    input: R,
    output: W,
}

impl<'a, S: ModelStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(service: &'a mut LibraryService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        match self.menu_loop() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n{RULE}")?;
            let choice = self.ask(MAIN_MENU, |input| validate::choice(input, 1, 7))?;
            match choice {
                1 => self.list_available()?,
                2 => self.search()?,
                3 => self.register()?,
                4 => self.borrow_or_return()?,
                5 => self.reserve_or_cancel()?,
                6 => self.admin()?,
                _ => {
                    writeln!(self.output, "Thanks for using the Library System.")?;
                    return Ok(());
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string())
    }

    fn ask<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<T> {
        loop {
            write!(self.output, "{label}")?;
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn pick(&mut self, header: &str, first: &str, second: &str) -> io::Result<u32> {
        let label = format!("\nDo you like to {header}:\n1. {first}\n2. {second}\n> ");
        self.ask(&label, |input| validate::choice(input, 1, 2))
    }

    fn report(&mut self, outcome: Result<(), CatalogueError>, success: &str) -> io::Result<()> {
        match outcome {
            Ok(()) => writeln!(self.output, "{success}"),
            Err(err) => self.failed(err),
        }
    }

    fn failed(&mut self, err: CatalogueError) -> io::Result<()> {
        if err.is_storage() {
            return writeln!(self.output, "Failed to save changes: {err}");
        }
        writeln!(self.output, "{err}")
    }

    fn list_available(&mut self) -> io::Result<()> {
        let catalogue = self.service.catalogue();
        if catalogue.items().is_empty() {
            return writeln!(self.output, "No items yet, the catalogue is empty.");
        }

        writeln!(self.output, "\n--- Available items ---")?;
        for (kind, items) in catalogue.available_items() {
            writeln!(self.output, "{}", kind_heading(kind, items.len()))?;
            for item in items {
                writeln!(self.output, "{}", item_card(catalogue, item))?;
            }
        }
        Ok(())
    }

    fn search(&mut self) -> io::Result<()> {
        let by_title = self.pick("search by", "Title", "Type")? == 1;
        let query = if by_title {
            self.ask("\nPlease enter a title: ", |input| {
                validate::non_empty("title", input)
            })?
        } else {
            self.ask("\nPlease enter a type: ", |input| {
                validate::non_empty("type", input)
            })?
        };

        let catalogue = self.service.catalogue();
        let found = if by_title {
            catalogue.search_by_title(&query)
        } else {
            catalogue.search_by_type(&query)
        };

        writeln!(self.output, "\n--- Search results for ({query}) ---")?;
        if found.is_empty() {
            return writeln!(self.output, "No items found.");
        }
        for item in found {
            writeln!(self.output, "{}", item_card(catalogue, item))?;
        }
        Ok(())
    }

    fn ask_new_user(&mut self, who: &str) -> io::Result<(String, String)> {
        writeln!(self.output, "Please enter the following:")?;
        let email = self.ask(&format!("- {who} email: "), validate::email)?;
        let name = self.ask(&format!("- {who} name: "), |input| {
            validate::non_empty("name", input)
        })?;
        Ok((name, email))
    }

    fn register(&mut self) -> io::Result<()> {
        let (name, email) = self.ask_new_user("Your")?;
        match self.service.add_user(&name, &email) {
            Ok(user) => writeln!(
                self.output,
                "\n{} you are now a member of the library.\nYour ID is: {} [PLEASE SAVE IT]",
                user.name(),
                user.display_id()
            ),
            Err(err) => self.failed(err),
        }
    }

    fn select(&mut self, action: &str) -> io::Result<Option<Selection>> {
        writeln!(self.output, "To {action} an item please enter the following:")?;

        let user_input = self.ask("- your user id: ", |input| {
            validate::display_id("user id", input)
        })?;
        let (user_id, user_name) = match self.service.find_user(&user_input) {
            Ok(user) => (user.id().to_string(), user.name().to_string()),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(None);
            }
        };

        let item_input = self.ask("- the item id: ", |input| {
            validate::display_id("item id", input)
        })?;
        let (item_id, title) = match self.service.find_item(&item_input) {
            Ok(item) => (item.id().to_string(), item.title().to_string()),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(None);
            }
        };

        Ok(Some(Selection {
            user_id,
            user_name,
            item_id,
            title,
        }))
    }

    fn borrow_or_return(&mut self) -> io::Result<()> {
        if self.pick("borrow or return an item", "Borrow", "Return")? == 1 {
            let Some(pick) = self.select("borrow")? else {
                return Ok(());
            };
            let outcome = self.service.borrow(&pick.user_id, &pick.item_id);
            let success = format!("{} borrowed {} successfully.", pick.user_name, pick.title);
            self.report(outcome, &success)
        } else {
            let Some(pick) = self.select("return")? else {
                return Ok(());
            };
            let outcome = self.service.return_item(&pick.user_id, &pick.item_id);
            let success = format!(
                "{} returned {}, and now it's available again.",
                pick.user_name, pick.title
            );
            self.report(outcome, &success)
        }
    }

    fn reserve_or_cancel(&mut self) -> io::Result<()> {
        if self.pick("reserve or cancel a reservation", "Reserve", "Cancel reservation")? == 1 {
            let Some(pick) = self.select("reserve")? else {
                return Ok(());
            };
            let outcome = self.service.reserve(&pick.user_id, &pick.item_id);
            let success = format!("{} reserved {}.", pick.user_name, pick.title);
            self.report(outcome, &success)
        } else {
            let Some(pick) = self.select("cancel the reservation of")? else {
                return Ok(());
            };
            let outcome = self.service.cancel_reservation(&pick.user_id, &pick.item_id);
            let success = format!(
                "{} cancelled the reservation of {}.",
                pick.user_name, pick.title
            );
            self.report(outcome, &success)
        }
    }

    /// Ask for the admin secret until it matches. `false` when the user
    /// backs out with `-1`.
    fn admin_gate(&mut self) -> io::Result<bool> {
        write!(self.output, "\nPlease enter the admin password: ")?;
        let mut secret = self.read_line()?;
        loop {
            match self.service.authorize_admin(&secret) {
                Ok(()) => return Ok(true),
                Err(CatalogueError::AuthDenied) => {
                    writeln!(self.output, "Please input the correct password.")?;
                    write!(
                        self.output,
                        "Enter the correct admin password, or -1 to go back to the main menu: "
                    )?;
                    secret = self.read_line()?;
                    if secret == "-1" {
                        return Ok(false);
                    }
                }
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    write!(self.output, "Please input the admin password: ")?;
                    secret = self.read_line()?;
                }
            }
        }
    }

    fn admin(&mut self) -> io::Result<()> {
        if !self.admin_gate()? {
            return Ok(());
        }

        if self.pick("manage items, or users", "Manage library items", "Manage library users")? == 1 {
            if self.pick("add or remove an item", "Add a new item", "Remove an existing item")? == 1 {
                self.add_item()
            } else {
                self.remove_item()
            }
        } else if self.pick("add or remove a user", "Add a user", "Remove a user")? == 1 {
            self.add_user()
        } else {
            self.remove_user()
        }
    }

    fn ask_item(&mut self, action: &str) -> io::Result<(ItemKind, String, String)> {
        writeln!(self.output, "To {action} an item please enter the following:")?;
        let kind = self.ask("- the type of the item: ", validate::item_kind)?;
        let title = self.ask("- the title of the item: ", |input| {
            validate::non_empty("item title", input)
        })?;
        let author = self.ask("- the author of the item: ", |input| {
            validate::non_empty("item author", input)
        })?;
        Ok((kind, title, author))
    }

    fn add_item(&mut self) -> io::Result<()> {
        let (kind, title, author) = self.ask_item("add")?;
        match self.service.add_item(kind, &title, &author) {
            Ok(item) => writeln!(
                self.output,
                "{} added successfully with ID {}.",
                item.title(),
                item.display_id()
            ),
            Err(err) => self.failed(err),
        }
    }

    fn remove_item(&mut self) -> io::Result<()> {
        let (kind, title, author) = self.ask_item("remove")?;
        match self.service.remove_item(kind, &title, &author) {
            Ok(item) => writeln!(self.output, "{} removed successfully.", item.title()),
            Err(err) => self.failed(err),
        }
    }

    fn add_user(&mut self) -> io::Result<()> {
        let (name, email) = self.ask_new_user("User")?;
        match self.service.add_user(&name, &email) {
            Ok(user) => writeln!(
                self.output,
                "\nAdded a new user:\nName: {}\nEmail: {}\nUser ID: {}",
                user.name(),
                user.email(),
                user.display_id()
            ),
            Err(err) => self.failed(err),
        }
    }

    fn remove_user(&mut self) -> io::Result<()> {
        let input = self.ask("\nEnter user ID to remove: ", |input| {
            validate::display_id("user id", input)
        })?;
        let user_id = match self.service.find_user(&input) {
            Ok(user) => user.id().to_string(),
            Err(err) => return writeln!(self.output, "{err}"),
        };
        match self.service.remove_user(&user_id) {
            Ok(user) => writeln!(self.output, "User {} removed successfully!", user.name()),
            Err(err) => self.failed(err),
        }
    }
}
