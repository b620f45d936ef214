use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{PitchClient, SubmitError};
use shared::domain::FormField;
use tracing_subscriber::EnvFilter;

mod config;
mod prompt;
mod render;

use config::{load_settings, parse_timezone, Settings};

#[derive(Parser, Debug)]
#[command(name = "pitch", about = "Schedule a practice pitch session")]
struct Cli {
    /// Settings file (defaults to ./pitch.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    /// IANA zone the preferred time is entered in, e.g. America/New_York.
    #[arg(long, global = true)]
    timezone: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the form and send it to the scheduler.
    Submit {
        #[command(flatten)]
        fields: FieldArgs,
        /// Fail instead of asking for missing fields or offering a retry.
        #[arg(long)]
        no_prompt: bool,
    },
    /// Print the normalized payload without sending it.
    Preview {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List the form fields.
    Fields,
}

#[derive(Args, Debug)]
struct FieldArgs {
    #[arg(long)]
    company_name: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    linkedin: Option<String>,
    #[arg(long)]
    pitch_deck: Option<String>,
    #[arg(long)]
    github: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Local date-time, YYYY-MM-DDTHH:MM.
    #[arg(long)]
    meeting_time: Option<String>,
}

impl FieldArgs {
    fn provided(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        [
            (FormField::CompanyName, &self.company_name),
            (FormField::Website, &self.website),
            (FormField::Linkedin, &self.linkedin),
            (FormField::PitchDeck, &self.pitch_deck),
            (FormField::Github, &self.github),
            (FormField::Email, &self.email),
            (FormField::MeetingTime, &self.meeting_time),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }

    fn apply(&self, client: &mut PitchClient) {
        for (field, value) in self.provided() {
            client.update_field(field, value);
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(tz) = cli.timezone {
        settings.timezone = tz;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Submit { fields, no_prompt } => {
            let mut client = connect(&settings)?;
            fields.apply(&mut client);
            run_submit(&mut client, !no_prompt).await
        }
        Command::Preview { fields } => {
            let mut client = connect(&settings)?;
            fields.apply(&mut client);
            match client.preview() {
                Ok(payload) => {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{}", err.status_message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Fields => {
            print_fields()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn connect(settings: &Settings) -> Result<PitchClient> {
    let timezone = parse_timezone(&settings.timezone)?;
    client_core::connect(&settings.api_base_url, timezone)
        .context("invalid scheduling server address")
}

async fn run_submit(client: &mut PitchClient, interactive: bool) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if interactive {
        let missing = prompt::unfilled(client);
        prompt::prompt_fields(client, &missing, &mut input, &mut output)?;
    }

    loop {
        let err = match render::submit_with_status(client, &mut output).await? {
            Ok(_) => return Ok(ExitCode::SUCCESS),
            Err(err) => err,
        };
        if !interactive || !prompt::confirm("Edit and resubmit?", &mut input, &mut output)? {
            return Ok(ExitCode::FAILURE);
        }
        let to_edit = fields_to_edit(&err);
        prompt::prompt_fields(client, &to_edit, &mut input, &mut output)?;
    }
}

/// A validation failure names the field to fix; anything else may need any of them.
fn fields_to_edit(err: &SubmitError) -> Vec<FormField> {
    match err {
        SubmitError::Invalid(invalid) => invalid
            .field()
            .map(|field| vec![field])
            .unwrap_or_else(|| FormField::ALL.to_vec()),
        _ => FormField::ALL.to_vec(),
    }
}

fn print_fields() -> io::Result<()> {
    let mut out = io::stdout().lock();
    for field in FormField::ALL {
        let required = if field.is_required() { "required" } else { "optional" };
        writeln!(out, "{:<14} {:<20} {required}", field.name(), field.label())?;
    }
    Ok(())
}
