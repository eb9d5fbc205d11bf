//! The interactive terminal session: a login prompt followed by the numbered
//! menu of whichever panel the login opened.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use database::DbRepository;
use panels::{ActionOutcome, AdminPanel, LoginPage, PanelError, Session, TableView, UserPanel};
use std::io::{ErrorKind, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const USER_MENU: &str = "\
  1) My Reviews
  2) All Movies
  3) Top Rated Movies
  4) Add Review
  5) Edit Review
  6) Logout";

const ADMIN_MENU: &str = "\
  1) Users
  2) Movies
  3) Reviews
  4) Average Ratings
  5) Top Rated Movies
  6) Delete User
  7) Modify User
  8) Delete Review
  9) Logout";

/// How a panel session ended.
enum Exit {
    Logout,
    /// Input ran out.
    Quit,
}

pub struct Console<R, W> {
    repo: DbRepository,
    input: R,
    output: W,
    /// Read the login password from the terminal without echo.
    hide_password: bool,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(repo: DbRepository, input: R, output: W) -> Self {
        Self {
            repo,
            input,
            output,
            hide_password: false,
        }
    }

    /// Reads the login password from the controlling terminal with echo
    /// disabled. Only meaningful when the input is that terminal.
    pub fn hiding_password(mut self) -> Self {
        self.hide_password = true;
        self
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// Runs login and panel sessions until the input is exhausted.
    pub async fn run(&mut self) -> Result<()> {
        let login = LoginPage::new(self.repo.clone());
        loop {
            writeln!(self.output, "\n=== Movie Reviews: Login ===")?;
            let Some(user_id) = self.prompt("User ID: ").await? else {
                return Ok(());
            };
            let Some(password) = self.password().await? else {
                return Ok(());
            };

            let session = match login.submit(&user_id, &password).await {
                Ok(session) => session,
                Err(e) => {
                    self.error(&e)?;
                    continue;
                }
            };

            let exit = match session {
                Session::Admin { name } => {
                    self.admin_session(AdminPanel::new(self.repo.clone(), name))
                        .await?
                }
                Session::User { user_id, name } => {
                    self.user_session(UserPanel::new(self.repo.clone(), user_id, name))
                        .await?
                }
            };
            match exit {
                Exit::Logout => tracing::info!("Logged out."),
                Exit::Quit => return Ok(()),
            }
        }
    }

    async fn user_session(&mut self, panel: UserPanel) -> Result<Exit> {
        writeln!(self.output, "\n{}", panel.welcome())?;
        self.show(panel.my_reviews().await)?;
        loop {
            writeln!(self.output, "\n{USER_MENU}")?;
            let Some(choice) = self.prompt("> ").await? else {
                return Ok(Exit::Quit);
            };
            match choice.trim() {
                "1" => self.show(panel.my_reviews().await)?,
                "2" => self.show(panel.all_movies().await)?,
                "3" => self.show(panel.top_rated().await)?,
                "4" => {
                    let Some([movie_id, rating, text]) =
                        self.form(["Movie ID", "Rating (0-5)", "Review Text"]).await?
                    else {
                        return Ok(Exit::Quit);
                    };
                    let outcome = panel.add_review(&movie_id, &rating, &text).await;
                    self.report(outcome)?;
                }
                "5" => {
                    let Some([movie_id, rating, text]) = self
                        .form(["Movie ID", "New Rating (0-5)", "New Review Text"])
                        .await?
                    else {
                        return Ok(Exit::Quit);
                    };
                    let outcome = panel.edit_review(&movie_id, &rating, &text).await;
                    self.report(outcome)?;
                }
                "6" => return Ok(Exit::Logout),
                other => writeln!(self.output, "Unknown option: {other}")?,
            }
        }
    }

    async fn admin_session(&mut self, panel: AdminPanel) -> Result<Exit> {
        writeln!(self.output, "\n{}", panel.welcome())?;
        self.show(panel.users().await)?;
        loop {
            writeln!(self.output, "\n{ADMIN_MENU}")?;
            let Some(choice) = self.prompt("> ").await? else {
                return Ok(Exit::Quit);
            };
            match choice.trim() {
                "1" => self.show(panel.users().await)?,
                "2" => self.show(panel.movies().await)?,
                "3" => self.show(panel.reviews().await)?,
                "4" => self.show(panel.average_ratings().await)?,
                "5" => self.show(panel.top_rated().await)?,
                "6" => {
                    let Some([user_id]) = self.form(["User ID"]).await? else {
                        return Ok(Exit::Quit);
                    };
                    let outcome = panel.delete_user(&user_id).await;
                    self.report(outcome)?;
                }
                "7" => {
                    let Some([user_id, name, admin]) =
                        self.form(["User ID", "Name", "Admin (Y/N)"]).await?
                    else {
                        return Ok(Exit::Quit);
                    };
                    let outcome = panel.modify_user(&user_id, &name, &admin).await;
                    self.report(outcome)?;
                }
                "8" => {
                    let Some([review_id]) = self.form(["Review ID"]).await? else {
                        return Ok(Exit::Quit);
                    };
                    let outcome = panel.delete_review(&review_id).await;
                    self.report(outcome)?;
                }
                "9" => return Ok(Exit::Logout),
                other => writeln!(self.output, "Unknown option: {other}")?,
            }
        }
    }

    /// Prints `label` and reads one line. `None` at end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        // Invalid UTF-8 is replaced, never rejected.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn password(&mut self) -> Result<Option<String>> {
        if !self.hide_password {
            return self.prompt("Password: ").await;
        }
        self.output.flush()?;
        let read = tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: ")).await?;
        match read {
            Ok(password) => Ok(Some(password)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                writeln!(self.output)?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn form<const N: usize>(&mut self, labels: [&str; N]) -> Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.prompt(&format!("{label}: ")).await? {
                Some(line) => *value = line,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn show(&mut self, view: Result<TableView, PanelError>) -> Result<()> {
        match view {
            Ok(view) => {
                writeln!(self.output, "\n{}", view.title)?;
                writeln!(self.output, "{}", render(&view))?;
                if view.is_empty() {
                    writeln!(self.output, "No records found.")?;
                }
                Ok(())
            }
            Err(e) => self.error(&e),
        }
    }

    fn report(&mut self, outcome: Result<ActionOutcome, PanelError>) -> Result<()> {
        match outcome {
            Ok(outcome) => {
                writeln!(self.output, "Success: {}", outcome.message)?;
                if let Some(view) = outcome.refreshed {
                    self.show(Ok(view))?;
                }
                Ok(())
            }
            Err(e) => self.error(&e),
        }
    }

    fn error(&mut self, error: &PanelError) -> Result<()> {
        if !error.is_validation() {
            tracing::warn!(error = %error, "Action failed.");
        }
        writeln!(self.output, "Error: {error}")?;
        Ok(())
    }
}

fn render(view: &TableView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(view.headers.clone());
    for row in &view.rows {
        table.add_row(row.clone());
    }
    table
}
