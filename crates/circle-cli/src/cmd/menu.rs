//! `circle menu`: the numbered console loop.
//!
//! Reads one choice per line and prompts for the fields each action needs.
//! End of input at any prompt ends the session. Core failures are reported
//! through [`render_error`] and the loop carries on.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use circle_core::{NetworkError, ProfileUpdate, SocialNetwork, UserId};
use clap::Args;
use tracing::{debug, info};

use super::view::{GraphView, ProfileView, SuggestionView};
use crate::output::{CliError, OutputMode, render_error, render_item, render_list, render_success};

/// Arguments for `circle menu`.
#[derive(Args, Debug, Default)]
pub struct MenuArgs {
    /// Do not print the menu before each prompt.
    #[arg(long)]
    pub quiet_menu: bool,
}

const MENU: &str = "
--- Circle Social Network ---
1. Add profile
2. Show profiles by name
3. Show all profiles
4. Update profile (by ID)
5. Remove profile (by ID)
6. Add friendship (by IDs)
7. Remove friendship (by IDs)
8. Suggest friends (by ID)
9. Show raw graph
0. Quit
";

/// Run the menu against the process's stdin and stdout.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub fn run_menu(args: &MenuArgs, net: SocialNetwork, mode: OutputMode) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session {
        net,
        input: stdin.lock(),
        out: &mut out,
        mode,
        show_menu: !args.quiet_menu,
    };
    session.run()
}

enum Step {
    Continue,
    Quit,
}

/// One interactive session over any line source and sink.
pub struct Session<'w, R> {
    pub net: SocialNetwork,
    pub input: R,
    pub out: &'w mut dyn Write,
    pub mode: OutputMode,
    pub show_menu: bool,
}

impl<R: BufRead> Session<'_, R> {
    /// Loop until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only on I/O failure.
    pub fn run(&mut self) -> Result<()> {
        info!(profiles = self.net.len(), "menu session started");
        loop {
            if self.show_menu {
                write!(self.out, "{MENU}")?;
            }
            let Some(choice) = self.ask("Enter your choice: ")? else {
                break;
            };
            debug!(choice = %choice, "menu choice");
            let step = match choice.as_str() {
                "0" => Step::Quit,
                "1" => self.add_profile()?,
                "2" => self.show_by_name()?,
                "3" => self.show_all()?,
                "4" => self.update_profile()?,
                "5" => self.remove_profile()?,
                "6" => self.add_friendship()?,
                "7" => self.remove_friendship()?,
                "8" => self.suggest()?,
                "9" => self.show_graph()?,
                _ => {
                    writeln!(self.out, "Invalid choice, please try again.")?;
                    Step::Continue
                }
            };
            if matches!(step, Step::Quit) {
                break;
            }
        }
        writeln!(self.out, "Goodbye.")?;
        self.out.flush()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for one id. Prints `Invalid ID.` and yields `Err(Step::Continue)`
    /// if the answer does not parse.
    fn ask_id(&mut self, prompt: &str) -> Result<std::result::Result<UserId, Step>> {
        self.parse_id(prompt, "Invalid ID.")
    }

    /// Ask for two ids. The first unparsable answer prints `Invalid ID(s).`
    /// and skips the second prompt.
    fn ask_pair(&mut self) -> Result<std::result::Result<(UserId, UserId), Step>> {
        let a = match self.parse_id("First profile ID: ", "Invalid ID(s).")? {
            Ok(id) => id,
            Err(step) => return Ok(Err(step)),
        };
        let b = match self.parse_id("Second profile ID: ", "Invalid ID(s).")? {
            Ok(id) => id,
            Err(step) => return Ok(Err(step)),
        };
        Ok(Ok((a, b)))
    }

    fn parse_id(
        &mut self,
        prompt: &str,
        invalid: &str,
    ) -> Result<std::result::Result<UserId, Step>> {
        let Some(raw) = self.ask(prompt)? else {
            return Ok(Err(Step::Quit));
        };
        if let Ok(id) = raw.parse::<UserId>() {
            Ok(Ok(id))
        } else {
            writeln!(self.out, "{invalid}")?;
            Ok(Err(Step::Continue))
        }
    }

    fn report(&mut self, err: &NetworkError) -> Result<Step> {
        render_error(self.out, self.mode, &CliError::from(err))?;
        Ok(Step::Continue)
    }

    fn success(&mut self, message: &str) -> Result<Step> {
        render_success(self.out, self.mode, message)?;
        Ok(Step::Continue)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn add_profile(&mut self) -> Result<Step> {
        let Some(name) = self.ask("Name: ")? else {
            return Ok(Step::Quit);
        };
        let Some(email) = self.ask("Email (optional): ")? else {
            return Ok(Step::Quit);
        };
        let Some(phone) = self.ask("Phone (optional): ")? else {
            return Ok(Step::Quit);
        };
        match self.net.add_profile(name, email, phone) {
            Ok(profile) => {
                let message = format!("Created profile with id={}.", profile.id());
                self.success(&message)
            }
            Err(err) => self.report(&err),
        }
    }

    fn show_by_name(&mut self) -> Result<Step> {
        let Some(name) = self.ask("Enter name to search: ")? else {
            return Ok(Step::Quit);
        };
        let views: Vec<ProfileView> = self
            .net
            .find_profile(&name)
            .into_iter()
            .map(|p| ProfileView::capture(&self.net, p))
            .collect();
        if views.is_empty() && !self.mode.is_json() {
            writeln!(self.out, "No profile named '{name}'.")?;
        } else {
            render_list(self.out, &views, self.mode)?;
        }
        Ok(Step::Continue)
    }

    fn show_all(&mut self) -> Result<Step> {
        let views = ProfileView::all(&self.net);
        if views.is_empty() && !self.mode.is_json() {
            writeln!(self.out, "No profiles.")?;
        } else {
            render_list(self.out, &views, self.mode)?;
        }
        Ok(Step::Continue)
    }

    fn update_profile(&mut self) -> Result<Step> {
        let id = match self.ask_id("Enter profile ID to update: ")? {
            Ok(id) => id,
            Err(step) => return Ok(step),
        };
        let Some(name) = self.ask("New name (leave blank to keep): ")? else {
            return Ok(Step::Quit);
        };
        let Some(email) = self.ask("New email (leave blank to keep): ")? else {
            return Ok(Step::Quit);
        };
        let Some(phone) = self.ask("New phone (leave blank to keep): ")? else {
            return Ok(Step::Quit);
        };
        let update = ProfileUpdate {
            name: non_blank(name),
            email: non_blank(email),
            phone: non_blank(phone),
        };
        if update.is_empty() {
            return self.success("Nothing to update.");
        }
        match self.net.update_profile(id, &update) {
            Ok(profile) => {
                let message = format!("Updated profile id={}.", profile.id());
                self.success(&message)
            }
            Err(err) => self.report(&err),
        }
    }

    fn remove_profile(&mut self) -> Result<Step> {
        let id = match self.ask_id("Enter profile ID to remove: ")? {
            Ok(id) => id,
            Err(step) => return Ok(step),
        };
        match self.net.remove_profile(id) {
            Ok(profile) => {
                let message = format!("Removed profile id={} ({}).", profile.id(), profile.name());
                self.success(&message)
            }
            Err(err) => self.report(&err),
        }
    }

    fn add_friendship(&mut self) -> Result<Step> {
        let (a, b) = match self.ask_pair()? {
            Ok(pair) => pair,
            Err(step) => return Ok(step),
        };
        match self.net.add_friendship(a, b) {
            Ok(()) => {
                let message = format!("Friendship created between {} and {}.", self.label(a), self.label(b));
                self.success(&message)
            }
            Err(err) => self.report(&err),
        }
    }

    fn remove_friendship(&mut self) -> Result<Step> {
        let (a, b) = match self.ask_pair()? {
            Ok(pair) => pair,
            Err(step) => return Ok(step),
        };
        match self.net.remove_friendship(a, b) {
            Ok(()) => {
                let message = format!("Friendship removed between {} and {}.", self.label(a), self.label(b));
                self.success(&message)
            }
            Err(err) => self.report(&err),
        }
    }

    fn suggest(&mut self) -> Result<Step> {
        let id = match self.ask_id("Profile ID to suggest friends for: ")? {
            Ok(id) => id,
            Err(step) => return Ok(step),
        };
        let views: Vec<SuggestionView> = match self.net.suggest_friends(id) {
            Ok(suggestions) => suggestions.iter().map(SuggestionView::from).collect(),
            Err(err) => return self.report(&err),
        };
        if self.mode.is_json() {
            render_list(self.out, &views, self.mode)?;
        } else if views.is_empty() {
            writeln!(self.out, "No friend suggestions.")?;
        } else {
            if matches!(self.mode, OutputMode::Pretty) {
                writeln!(self.out, "Suggested friends:")?;
            }
            render_list(self.out, &views, self.mode)?;
        }
        Ok(Step::Continue)
    }

    fn show_graph(&mut self) -> Result<Step> {
        render_item(self.out, &GraphView::capture(&self.net), self.mode)?;
        Ok(Step::Continue)
    }

    fn label(&self, id: UserId) -> String {
        self.net
            .profile(id)
            .map_or_else(|| id.to_string(), |p| format!("{} (id={id})", p.name()))
    }
}

/// Blank answers keep the current value.
fn non_blank(answer: String) -> Option<String> {
    Some(answer).filter(|a| !a.is_empty())
}
