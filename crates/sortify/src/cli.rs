//! Command-line arguments and command handlers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sortify_core::{
    Assessment, FetchedMessage, RelayRequest, Scorer, ScoringInput, Screening, Settings, screen,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "sortify")]
#[command(version, about = "Score, screen and relay tasks from your inbox")]
pub struct Cli {
    /// Settings file to read instead of the default location.
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        env = "SORTIFY_CONFIG"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single message
    ///
    /// Prints the score and whether the message is kept for extraction.
    Score {
        /// Subject line.
        #[arg(short, long, default_value = "")]
        subject: String,

        /// Message body.
        #[arg(short, long, default_value = "")]
        body: String,

        /// Sender, either a bare address or `Name <address>`.
        #[arg(long)]
        sender: Option<String>,

        /// Mailbox owner for this message; overrides the configured one.
        #[arg(long, value_name = "EMAIL")]
        owner: Option<String>,

        /// Own address to penalise when it appears in the sender.
        #[arg(long, value_name = "EMAIL")]
        my_email: Option<String>,

        /// List every rule that contributed to the score.
        #[arg(long)]
        explain: bool,
    },

    /// Screen a JSON array of fetched messages
    ///
    /// Writes one JSON object per message with its decision.
    Screen {
        /// File holding the messages.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Render the email that relays a task to another user
    RelayBody {
        /// Your display name.
        #[arg(long)]
        sender_name: String,

        /// Your address.
        #[arg(long)]
        sender_email: String,

        /// Address of the person receiving the task.
        #[arg(long, value_name = "EMAIL")]
        recipient: String,

        /// Due date, free-form.
        #[arg(long)]
        deadline: String,

        /// The task.
        #[arg(long)]
        task: String,
    },

    /// Show the settings, or store a new owner address
    Config {
        /// Owner address to save.
        #[arg(long, value_name = "EMAIL")]
        owner_email: Option<String>,
    },
}

/// One line of `screen` output.
#[derive(Serialize)]
struct ScreenLine<'a> {
    subject: &'a str,
    from: &'a str,
    #[serde(flatten)]
    screening: Screening,
}

impl Cli {
    /// Runs the selected command against stdout.
    pub fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref()).context("Failed to load settings")?;
        // `config` must still be able to replace a bad owner address
        if !matches!(self.command, Command::Config { .. }) {
            settings.validate()?;
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Command::Score {
                subject,
                body,
                sender,
                owner,
                my_email,
                explain,
            } => {
                let mut input = ScoringInput::from_parts(
                    Some(subject.as_str()),
                    Some(body.as_str()),
                    sender.as_deref(),
                );
                if let Some(owner) = owner.as_deref() {
                    input = input.with_owner_email(owner);
                }
                if let Some(my_email) = my_email.as_deref() {
                    input = input.with_my_email(my_email);
                }

                let assessment = settings.scorer().assess(&input);
                write_assessment(&mut out, &assessment, explain)?;
            }
            Command::Screen { file } => {
                let messages = read_messages(&file)?;
                screen_messages(&mut out, &settings.scorer(), &messages)?;
            }
            Command::RelayBody {
                sender_name,
                sender_email,
                recipient,
                deadline,
                task,
            } => {
                let request = RelayRequest::new(sender_name, sender_email, recipient)
                    .task(task)
                    .deadline(deadline);
                write_relay(&mut out, &request)?;
            }
            Command::Config { owner_email } => {
                let path = self.config.unwrap_or_else(Settings::default_path);
                match owner_email {
                    Some(owner) => {
                        let updated = Settings {
                            owner_email: Some(owner),
                        };
                        updated.validate()?;
                        updated
                            .save(&path)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        writeln!(out, "Saved settings to {}", path.display())?;
                    }
                    None => {
                        writeln!(out, "settings: {}", path.display())?;
                        writeln!(
                            out,
                            "owner_email: {}",
                            settings.owner_email.as_deref().unwrap_or("(not set)")
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn write_assessment(out: &mut impl Write, assessment: &Assessment, explain: bool) -> Result<()> {
    let decision = if assessment.is_important() {
        "important"
    } else {
        "skipped"
    };
    writeln!(out, "score: {}", assessment.score)?;
    writeln!(out, "decision: {decision}")?;

    if explain {
        if assessment.self_sent {
            writeln!(out, "  sent by the mailbox owner")?;
        }
        for contribution in &assessment.contributions {
            writeln!(out, "  {contribution}")?;
        }
    }
    Ok(())
}

fn read_messages(path: &Path) -> Result<Vec<FetchedMessage>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let messages: Vec<FetchedMessage> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of messages", path.display()))?;
    debug!("Read {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

fn screen_messages(
    out: &mut impl Write,
    scorer: &Scorer,
    messages: &[FetchedMessage],
) -> Result<()> {
    let mut kept = 0;
    for message in messages {
        let screening = screen(scorer, message);
        if screening.is_kept() {
            kept += 1;
        }
        let line = ScreenLine {
            subject: &message.subject,
            from: &message.from,
            screening,
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    info!("Kept {kept} of {} messages", messages.len());
    Ok(())
}

fn write_relay(out: &mut impl Write, request: &RelayRequest) -> Result<()> {
    request.validate().map_err(sortify_core::Error::from)?;

    writeln!(out, "From: {}", request.from_header())?;
    writeln!(out, "To: {}", request.recipient_email)?;
    writeln!(out, "Subject: {}", request.subject())?;
    writeln!(out)?;
    write!(out, "{}", request.render_body())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_score_command() {
        let cli = Cli::try_parse_from([
            "sortify",
            "score",
            "--subject",
            "Meeting reminder",
            "--sender",
            "jane@example.com",
            "--explain",
        ])
        .unwrap();

        match cli.command {
            Command::Score {
                subject,
                body,
                sender,
                explain,
                ..
            } => {
                assert_eq!(subject, "Meeting reminder");
                assert_eq!(body, "");
                assert_eq!(sender.as_deref(), Some("jane@example.com"));
                assert!(explain);
            }
            other => panic!("expected score, got {other:?}"),
        }
    }

    #[test]
    fn test_config_path_reads_env() {
        use clap::CommandFactory;

        let command = Cli::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert_eq!(
            config.get_env(),
            Some(std::ffi::OsStr::new("SORTIFY_CONFIG"))
        );
    }

    #[test]
    fn test_read_messages_accepts_header_dates() {
        let path = std::env::temp_dir().join(format!(
            "sortify-cli-test-{}-messages.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[
                {"subject":"Hi","from":"a@b.com","date":"Tue, 01 Apr 2025 10:00:00 GMT","size":10,"body":"x"},
                {"subject":"Later","from":"c@d.com","date":"not a date","body":"y"}
            ]"#,
        )
        .unwrap();

        let messages = read_messages(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(messages.len(), 2);
        assert!(messages[0].date.is_some());
        assert_eq!(messages[1].date, None);
    }

    #[test]
    fn test_relay_body_requires_all_fields() {
        let result = Cli::try_parse_from(["sortify", "relay-body", "--task", "Call the bank"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_assessment_explain() {
        let scorer = Scorer::default();
        let input = ScoringInput::new("Meeting reminder", "Please confirm the schedule");
        let assessment = scorer.assess(&input);

        let text = render(|out| write_assessment(out, &assessment, true));
        assert!(text.starts_with("score: 10\ndecision: important\n"));
        assert!(text.contains("+2 important keyword \"meeting\" in subject"));
    }

    #[test]
    fn test_screen_messages_writes_json_lines() {
        let scorer = Scorer::new(Some("me@example.com".to_string()));
        let messages = [
            FetchedMessage::new("Meeting reminder", "jane@example.com", "Please confirm"),
            FetchedMessage::new("Flash sale", "deals@shop.com", "Unsubscribe"),
        ];

        let text = render(|out| screen_messages(out, &scorer, &messages));
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["decision"], "important");
        assert_eq!(lines[0]["subject"], "Meeting reminder");
        assert_eq!(lines[1]["decision"], "skipped");
    }

    #[test]
    fn test_write_relay_validates() {
        let request = RelayRequest::new("Raia", "raia@example.com", "not-an-address")
            .task("Call the bank")
            .deadline("Friday");
        let mut buf = Vec::new();
        let err = write_relay(&mut buf, &request).unwrap_err();
        assert!(err.to_string().contains("Invalid recipient email address"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_relay_message() {
        let request = RelayRequest::new("Raia", "raia@example.com", "me@example.com")
            .task("Call the bank")
            .deadline("Friday");

        let text = render(|out| write_relay(out, &request));
        assert!(text.starts_with(
            "From: Raia <raia@example.com>\nTo: me@example.com\nSubject: New Task from Sortify\n\n"
        ));
        assert!(text.contains("Task: Call the bank\n"));
        assert!(text.contains("Due: Friday\n"));
    }
}
