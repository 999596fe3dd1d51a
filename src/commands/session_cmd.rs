//! Interactive workout session.
//!
//! The session holds its state in memory for exactly as long as the process
//! runs: sign in, review and append workouts, request an export, sign out.
//! All mutations go through the sync controller; rendering only ever reads
//! a session snapshot.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;

use fitlog_core::{RemoteClient, SessionSnapshot, SyncController, WorkoutDraft};

use crate::config::Config;

#[derive(Args, Default)]
pub struct SessionCommand {
    /// Duration (minutes) for added workouts, instead of the default 30
    #[arg(long)]
    duration: Option<u32>,

    /// Calorie count for added workouts, instead of the default 250
    #[arg(long)]
    calories: Option<u32>,

    /// Feedback note for added workouts
    #[arg(long)]
    feedback: Option<String>,

    /// Submission date (YYYY-MM-DD), instead of today
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// A parsed line of session input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Empty,
    Help,
    Login(String),
    Add(String),
    List,
    Json,
    Export,
    Logout,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));
    match word {
        "help" => Command::Help,
        "login" => Command::Login(rest.to_string()),
        "add" => Command::Add(rest.to_string()),
        "list" => Command::List,
        "json" => Command::Json,
        "export" => Command::Export,
        "logout" => Command::Logout,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

impl SessionCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let controller = SyncController::new(RemoteClient::new(config.server_url.value.clone()));
        let session = controller.session();
        tracing::debug!(server_url = %config.server_url.value, "starting interactive session");

        println!("Fitness Tracker ({})", config.server_url.value);
        println!("Type 'help' for commands.");

        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Command::Empty => {}
                Command::Help => print_help(),
                Command::Login(username) => {
                    let password = prompt("Password: ")?;
                    controller.sign_in(&username, &password).await;
                    render(&session.snapshot());
                }
                Command::Add(text) => {
                    controller.submit_draft(self.draft(&text)).await;
                    render(&session.snapshot());
                }
                Command::List => render(&session.snapshot()),
                Command::Json => {
                    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
                }
                Command::Export => {
                    controller.export_csv().await;
                    println!("Export requested.");
                }
                Command::Logout => {
                    controller.sign_out();
                    render(&session.snapshot());
                }
                Command::Quit => break,
                Command::Unknown(word) => {
                    println!("Unknown command '{}'; type 'help'.", word);
                }
            }
        }

        Ok(())
    }

    /// Builds a draft for `text`, applying any session-level overrides on
    /// top of the submission defaults.
    fn draft(&self, text: &str) -> WorkoutDraft {
        let mut draft = WorkoutDraft::new(text);
        if let Some(minutes) = self.duration {
            draft = draft.with_duration(minutes);
        }
        if let Some(calories) = self.calories {
            draft = draft.with_calories(calories);
        }
        if let Some(feedback) = &self.feedback {
            draft = draft.with_feedback(feedback.clone());
        }
        if let Some(date) = self.date {
            draft = draft.with_date(date);
        }
        draft
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn render(snapshot: &SessionSnapshot) {
    match &snapshot.identity {
        None => println!("Not signed in."),
        Some(user) => {
            println!("Hi, {}", user);
            if snapshot.workouts.is_empty() {
                println!("No workouts logged yet.");
            } else {
                for (index, workout) in snapshot.workouts.iter().enumerate() {
                    println!("{}. {}", index + 1, workout);
                }
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  login <username>   Sign in (password prompted) and load your history");
    println!("  add <workout>      Log a workout, e.g. add Pushups - 20 reps");
    println!("  list               Show your workouts");
    println!("  json               Show the session as JSON");
    println!("  export             Request a CSV export from the server");
    println!("  logout             Sign out and clear the session");
    println!("  quit               Leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_words() {
        assert_eq!(parse_command("list"), Command::List);
        assert_eq!(parse_command("  export  "), Command::Export);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn test_parse_command_with_arguments() {
        assert_eq!(parse_command("login al"), Command::Login("al".to_string()));
        assert_eq!(parse_command("login"), Command::Login(String::new()));
        assert_eq!(
            parse_command("add Pushups - 20 reps"),
            Command::Add("Pushups - 20 reps".to_string())
        );
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(
            parse_command("frobnicate now"),
            Command::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_draft_applies_overrides() {
        let command = SessionCommand {
            duration: Some(45),
            calories: None,
            feedback: Some("Tough".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 4, 7),
        };

        let draft = command.draft("Squats");
        assert_eq!(draft.title, "Squats");
        assert_eq!(draft.duration, 45);
        assert_eq!(draft.calories, 250);
        assert_eq!(draft.feedback, "Tough");
        assert_eq!(draft.date.to_string(), "2025-04-07");
    }
}
