use std::{fmt::Write as _, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::load_settings, FormDraft, HttpSchedulerClient, ResultsState, SchedulerApi, Settings,
};
use shared::{
    domain::{Quarter, TimeBlock, Weekday},
    protocol::{CalendarReceipt, ScheduleResults},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Generate course schedules and add them to a calendar")]
struct Cli {
    /// Scheduling service base URL; overrides config and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the scheduling service is up.
    Health,
    /// Generate schedule options from course preferences.
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    #[arg(long = "course", required = true)]
    courses: Vec<String>,
    #[arg(long)]
    quarter: Quarter,
    #[arg(long = "day", required = true)]
    days: Vec<Weekday>,
    #[arg(long = "time", required = true)]
    times: Vec<TimeBlock>,
    /// Free-text professor preferences.
    #[arg(long, default_value = "")]
    notes: String,
    #[arg(long)]
    num_schedules: Option<u32>,
    /// 1-based option to add to the calendar.
    #[arg(long, default_value_t = 1)]
    select: usize,
    #[arg(long)]
    add_to_calendar: bool,
    /// Print the raw options as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn build_draft(args: &GenerateArgs) -> FormDraft {
    let mut draft = FormDraft::default();
    for (index, course) in args.courses.iter().enumerate() {
        if index >= draft.course_count() {
            draft.add_course_slot();
        }
        draft.update_course_name(index, course.clone());
    }
    draft.set_quarter(Some(args.quarter));
    for day in &args.days {
        if !draft.has_day(*day) {
            draft.toggle_day(*day);
        }
    }
    for block in &args.times {
        if !draft.has_time_block(*block) {
            draft.toggle_time_block(*block);
        }
    }
    draft.set_professor_notes(args.notes.clone());
    draft
}

fn render_options(results: &ScheduleResults) -> String {
    let mut out = String::new();
    if results.recommendations.is_empty() {
        out.push_str("No schedule options matched your preferences.\n");
        return out;
    }
    for (index, option) in results.recommendations.iter().enumerate() {
        let _ = writeln!(out, "Schedule Option {}", index + 1);
        if !option.pros.is_empty() {
            let _ = writeln!(out, "  Pros:");
            for pro in &option.pros {
                let _ = writeln!(out, "    + {pro}");
            }
        }
        if !option.cons.is_empty() {
            let _ = writeln!(out, "  Cons:");
            for con in &option.cons {
                let _ = writeln!(out, "    - {con}");
            }
        }
        for meeting in &option.schedule {
            let _ = write!(
                out,
                "  {} | {} | {}",
                meeting.summary,
                meeting.description,
                meeting.display_location()
            );
            if let Some(days) = meeting.display_days() {
                let _ = write!(out, " | {days}");
            }
            out.push('\n');
        }
    }
    out
}

fn render_receipt(calendar_name: &str, receipt: &CalendarReceipt) -> String {
    let mut out = format!("Schedule added to calendar \"{calendar_name}\"");
    if let Some(id) = &receipt.calendar_id {
        let _ = write!(out, " (id {id})");
    }
    if let Some(message) = &receipt.message {
        let _ = write!(out, ": {message}");
    }
    out
}

async fn run_generate(
    api: &dyn SchedulerApi,
    settings: &Settings,
    args: &GenerateArgs,
) -> Result<String> {
    let draft = build_draft(args);
    let request = draft
        .to_generate_request(args.num_schedules.or(settings.num_schedules))
        .map_err(|err| anyhow::anyhow!(err.user_message()))?;

    let results = api
        .generate_schedule(&request)
        .await
        .context("Failed to generate schedule")?;
    tracing::info!(
        courses = request.courses.len(),
        options = results.recommendations.len(),
        "schedule generated"
    );

    let mut out = if args.json {
        let mut json = serde_json::to_string_pretty(&results)?;
        json.push('\n');
        json
    } else {
        render_options(&results)
    };

    if args.add_to_calendar {
        let mut state = ResultsState::default();
        state.replace(results);
        if args.select == 0 || !state.select(args.select - 1) {
            tracing::warn!(select = args.select, "requested option does not exist");
            anyhow::bail!(
                "--select {} is out of range; {} option(s) available",
                args.select,
                state.recommendations().len()
            );
        }
        let calendar_request = state.calendar_request(&settings.calendar_name)?;
        let receipt = match api.add_to_calendar(&calendar_request).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(error = %err, "calendar export failed");
                return Err(anyhow::Error::new(err).context("Failed to add to calendar"));
            }
        };
        tracing::info!(
            calendar = %settings.calendar_name,
            meetings = calendar_request.schedule.len(),
            "schedule added to calendar"
        );
        out.push_str(&render_receipt(&settings.calendar_name, &receipt));
        out.push('\n');
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings().context("failed to load scheduler settings")?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = HttpSchedulerClient::new(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;

    match cli.command {
        Command::Health => {
            let health = client.health().await.with_context(|| {
                format!(
                    "Failed to connect to backend. Make sure the API is running at {}.",
                    settings.api_base_url
                )
            })?;
            println!("{}: {}", client.base_url(), health.status);
        }
        Command::Generate(args) => {
            print!("{}", run_generate(&client, &settings, &args).await?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
