//! Console menu over the registry service.
//!
//! # Responsibility
//! - Render the menu and route choices to `RegistryService` calls.
//! - Turn every service outcome into an operator-facing message.
//!
//! # Invariants
//! - No business rule lives here; validation and storage stay in core.
//! - Only operator I/O failures end the loop early; service errors are
//!   reported and the menu resumes.
//! - Passwords are never printed.

use log::error;
use std::io;
use userreg_core::{PromptIo, RegistryError, RegistryService, User, UserStore};

const HEADER_WIDTH: usize = 50;

enum Flow {
    Continue,
    Quit,
}

/// Runs the menu until the operator exits or input ends.
///
/// # Errors
/// - Returns operator I/O failures only.
pub fn run<S: UserStore, P: PromptIo>(
    service: &RegistryService<S>,
    io: &mut P,
) -> io::Result<()> {
    let mut console = Console { service, io };
    loop {
        if let Flow::Quit = console.menu()? {
            return Ok(());
        }
        if console.io.ask("\nPress Enter to continue...")?.is_none() {
            return Ok(());
        }
    }
}

struct Console<'a, S: UserStore, P: PromptIo> {
    service: &'a RegistryService<S>,
    io: &'a mut P,
}

impl<S: UserStore, P: PromptIo> Console<'_, S, P> {
    fn menu(&mut self) -> io::Result<Flow> {
        self.header("User Management System")?;
        self.io.say("1. Register User")?;
        self.io.say("2. List Users")?;
        self.io.say("3. Search Users")?;
        self.io.say("4. Delete User")?;
        self.io.say("5. Exit")?;

        let Some(choice) = self.io.ask("\nEnter your choice (1-5): ")? else {
            return Ok(Flow::Quit);
        };
        match choice.trim() {
            "1" => self.register(),
            "2" => self.list(),
            "3" => self.search(),
            "4" => self.delete(),
            "5" => {
                self.io
                    .say("\nThank you for using the User Management System!")?;
                Ok(Flow::Quit)
            }
            _ => {
                self.io.say("Invalid choice! Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> io::Result<Flow> {
        self.header("Register New User")?;
        match self.service.register_interactive(&mut *self.io) {
            Ok(user) => {
                self.io.say("User registered successfully!")?;
                self.io.say(&format!("UserID: {}", user.id))?;
                Ok(Flow::Continue)
            }
            Err(RegistryError::RetryExhausted { field, .. }) => {
                self.io.say(&format!(
                    "User could not be registered: too many invalid {field} attempts. \
                     Returning to main menu."
                ))?;
                Ok(Flow::Continue)
            }
            Err(RegistryError::InputClosed(_)) => Ok(Flow::Quit),
            Err(RegistryError::Io(err)) => Err(err),
            Err(err) => {
                self.io
                    .say(&format!("User could not be registered: {err}"))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn list(&mut self) -> io::Result<Flow> {
        self.header("Registered Users")?;
        let users = match self.service.list_users() {
            Ok(users) => users,
            Err(err) => return self.storage_failure(err),
        };

        if users.is_empty() {
            self.io.say("No users registered yet.")?;
        }
        for user in &users {
            self.show_user(user)?;
            self.io.say(&"-".repeat(30))?;
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        self.header("Search User")?;
        self.io.say("1. Search by Email")?;
        self.io.say("2. Search by UserID")?;
        self.io.say("3. Search by Name")?;
        let Some(option) = self.io.ask("Select an option (1-3): ")? else {
            return Ok(Flow::Quit);
        };

        match option.trim() {
            "1" => {
                let Some(email) = self.io.ask("Enter email to search: ")? else {
                    return Ok(Flow::Quit);
                };
                match self.service.find_by_email(&email) {
                    Ok(found) => self.show_single(found, "No user found with that email."),
                    Err(err) => self.storage_failure(err),
                }
            }
            "2" => {
                let Some(id) = self.io.ask("Enter UserID to search: ")? else {
                    return Ok(Flow::Quit);
                };
                match self.service.find_by_id(id.trim()) {
                    Ok(found) => self.show_single(found, "No user found with that UserID."),
                    Err(err) => self.storage_failure(err),
                }
            }
            "3" => {
                let Some(fragment) = self.io.ask("Enter name (or part of it) to search: ")?
                else {
                    return Ok(Flow::Quit);
                };
                let users = match self.service.search_by_name(&fragment) {
                    Ok(users) => users,
                    Err(err) => return self.storage_failure(err),
                };
                if users.is_empty() {
                    self.io.say("No users found with that name.")?;
                } else {
                    self.io.say(&format!("{} user(s) found:", users.len()))?;
                }
                for user in &users {
                    self.show_user(user)?;
                    self.io.say(&"-".repeat(30))?;
                }
                Ok(Flow::Continue)
            }
            _ => {
                self.io.say("Invalid option!")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn delete(&mut self) -> io::Result<Flow> {
        self.header("Delete User")?;
        let Some(id) = self.io.ask("Enter UserID of user to delete: ")? else {
            return Ok(Flow::Quit);
        };

        match self.service.delete_user(id.trim()) {
            Ok(_) => self.io.say("User deleted successfully!")?,
            Err(RegistryError::UserNotFound(_)) => self.io.say("User not found!")?,
            Err(err) => return self.storage_failure(err),
        }
        Ok(Flow::Continue)
    }

    fn show_single(&mut self, found: Option<User>, missing: &str) -> io::Result<Flow> {
        match found {
            Some(user) => {
                self.io.say("User found:")?;
                self.show_user(&user)?;
            }
            None => self.io.say(missing)?,
        }
        Ok(Flow::Continue)
    }

    fn show_user(&mut self, user: &User) -> io::Result<()> {
        self.io.say(&format!("UserID: {}", user.id))?;
        self.io.say(&format!("Name: {}", user.name))?;
        self.io.say(&format!("Email: {}", user.email))
    }

    fn storage_failure(&mut self, err: RegistryError) -> io::Result<Flow> {
        error!("event=console_action module=cli status=error error={}", err);
        self.io.say(&format!("Operation failed: {err}"))?;
        Ok(Flow::Continue)
    }

    fn header(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(HEADER_WIDTH);
        self.io.say(&format!(
            "\n{rule}\n{title:^width$}\n{rule}\n",
            width = HEADER_WIDTH
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use std::io::Cursor;
    use userreg_core::{
        JsonUserStore, LinePrompt, RegisterRequest, RegistryService, User, UserStore,
    };

    fn service(dir: &tempfile::TempDir) -> RegistryService<JsonUserStore> {
        RegistryService::new(JsonUserStore::open(dir.path().join("users.json")).unwrap())
    }

    fn drive(service: &RegistryService<JsonUserStore>, script: &str) -> String {
        let mut io = LinePrompt::new(Cursor::new(script.to_string()), Vec::new());
        run(service, &mut io).unwrap();
        String::from_utf8(io.into_output()).unwrap()
    }

    #[test]
    fn register_flow_persists_user() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let output = drive(&service, "1\nAlice\nalice@example.com\nPassword1@\n\n5\n");

        assert!(output.contains("User registered successfully!"));
        assert!(output.contains("Thank you for using the User Management System!"));
        let users = service.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice");
        assert_eq!(users[0].email, "alice@example.com");
    }

    #[test]
    fn register_flow_reports_exhaustion_and_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let output = drive(&service, "1\nA1\nB2\nC3\nD4\n\n5\n");

        assert!(output.contains(
            "User could not be registered: too many invalid name attempts. Returning to main menu."
        ));
        assert!(output.contains("Thank you"));
        assert!(service.list_users().unwrap().is_empty());
    }

    #[test]
    fn search_by_email_prints_user_without_password() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service
            .register(&RegisterRequest::new("Bob", "bob@example.com", "Password1@"))
            .unwrap();

        let output = drive(&service, "3\n1\nbob@example.com\n\n3\n1\nnobody@example.com\n");

        assert!(output.contains("User found:"));
        assert!(output.contains("Email: bob@example.com"));
        assert!(output.contains("No user found with that email."));
        assert!(!output.contains("Password1@"));
    }

    #[test]
    fn search_by_name_lists_matches() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        service
            .register(&RegisterRequest::new("Alice", "alice@example.com", "Password1@"))
            .unwrap();

        let output = drive(&service, "3\n3\nLIC\n");

        assert!(output.contains("1 user(s) found:"));
        assert!(output.contains("Name: Alice"));
    }

    #[test]
    fn delete_flow_removes_user_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let user = User::new("Carol", "carol@example.com", "Password1@");
        service.store().add_user(&user).unwrap();

        let output = drive(&service, &format!("4\n{}\n\n4\n{}\n", user.id, user.id));

        assert!(output.contains("User deleted successfully!"));
        assert!(output.contains("User not found!"));
        assert!(service.list_users().unwrap().is_empty());
    }

    #[test]
    fn list_and_invalid_choice_keep_the_loop_running() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let output = drive(&service, "2\n\n9\n\n5\n");

        assert!(output.contains("No users registered yet."));
        assert!(output.contains("Invalid choice! Please try again."));
        assert!(output.contains("Thank you"));
    }

    #[test]
    fn invalid_utf8_choice_is_rejected_and_menu_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let mut io = LinePrompt::new(Cursor::new(&b"\xff\xfe\n\n2\n\n5\n"[..]), Vec::new());

        run(&service, &mut io).unwrap();

        let output = String::from_utf8(io.into_output()).unwrap();
        assert!(output.contains("Invalid choice! Please try again."));
        assert!(output.contains("No users registered yet."));
        assert!(output.contains("Thank you"));
    }

    #[test]
    fn invalid_utf8_name_uses_an_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let script: &[u8] = b"1\n\xffAlice\nAlice\nalice@example.com\nPassword1@\n\n5\n";
        let mut io = LinePrompt::new(Cursor::new(script), Vec::new());

        run(&service, &mut io).unwrap();

        let output = String::from_utf8(io.into_output()).unwrap();
        assert!(output
            .contains("Name must be at least 3 characters and only letters! Attempts left: 3"));
        assert!(output.contains("User registered successfully!"));
        assert_eq!(service.list_users().unwrap().len(), 1);
    }
}
