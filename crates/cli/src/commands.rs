use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{FixedOffset, Local, NaiveDate};

use tickmat_core::api::TaskClient;
use tickmat_core::auth::{extract_code_from_callback, OauthClient};
use tickmat_core::config::AppConfig;
use tickmat_core::matrix::{
    classify_quadrant, filter_by_context, partition_into_quadrants, sort_by_due_date, MatrixView,
};
use tickmat_core::model::{ContextId, Quadrant, Task};
use tickmat_core::{dates, transition};

use crate::cli::{CliCommand, DueArgs, MatrixArgs, MoveArgs};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, writer: &mut W) -> Result<()> {
    match command {
        CliCommand::Login => handle_login(config, writer),
        CliCommand::Projects => handle_projects(config, writer),
        CliCommand::Matrix(args) => handle_matrix(config, &args, writer),
        CliCommand::Move(args) => handle_move(config, &args, writer),
        CliCommand::Due(args) => handle_due(config, &args, writer),
    }
}

fn handle_login<W: Write>(config: &AppConfig, writer: &mut W) -> Result<()> {
    let oauth = OauthClient::from_config(config).context("OAuth client is not configured")?;

    writeln!(writer, "Open this URL in your browser and authorize the app:")?;
    writeln!(writer)?;
    writeln!(writer, "  {}", oauth.authorization_url(None))?;
    writeln!(writer)?;
    writeln!(writer, "Paste the redirect URL (or just the code), then press Enter:")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read the authorization code")?;
    let input = line.trim();
    let code = if input.starts_with("http") {
        extract_code_from_callback(input)
            .ok_or_else(|| anyhow!("no 'code' parameter found in the pasted URL"))?
    } else {
        input.to_string()
    };
    if code.is_empty() {
        bail!("no authorization code provided");
    }

    let token = oauth.exchange_code(&code)?;
    writeln!(writer, "Access token received. Export it for the next runs:")?;
    writeln!(writer)?;
    writeln!(writer, "  export TICKTICK_ACCESS_TOKEN={}", token.access_token)?;
    if let Some(refresh) = &token.refresh_token {
        writeln!(writer, "  # refresh token: {refresh}")?;
    }
    Ok(())
}

fn handle_projects<W: Write>(config: &AppConfig, writer: &mut W) -> Result<()> {
    let client = authenticated_client(config)?;
    let projects = client.list_projects();
    if projects.is_empty() {
        writeln!(writer, "No projects found")?;
        return Ok(());
    }
    for project in projects {
        writeln!(writer, "{}  {}", project.id, project.name)?;
    }
    Ok(())
}

fn handle_matrix<W: Write>(config: &AppConfig, args: &MatrixArgs, writer: &mut W) -> Result<()> {
    let client = authenticated_client(config)?;
    let (today, offset) = viewer_clock();

    let tasks = client.list_all_tasks();
    let filtered = filter_by_context(&tasks, args.context, today, offset);
    let view = partition_into_quadrants(&filtered);
    render_matrix(writer, &view, args.context, offset)
}

fn handle_move<W: Write>(config: &AppConfig, args: &MoveArgs, writer: &mut W) -> Result<()> {
    let client = authenticated_client(config)?;
    let task = find_task(&client, &args.id)?;

    if classify_quadrant(&task) == args.quadrant {
        writeln!(
            writer,
            "{} is already in {}; nothing to do",
            task.title,
            args.quadrant.label()
        )?;
        return Ok(());
    }

    match transition::apply_quadrant_move(&client, &task, args.quadrant) {
        Some(updated) => {
            writeln!(
                writer,
                "Moved '{}' to {} ({})",
                updated.title,
                args.quadrant,
                args.quadrant.label()
            )?;
            Ok(())
        }
        None => bail!("update failed; the remote task is unchanged"),
    }
}

fn handle_due<W: Write>(config: &AppConfig, args: &DueArgs, writer: &mut W) -> Result<()> {
    let client = authenticated_client(config)?;
    let task = find_task(&client, &args.id)?;
    let (_, offset) = viewer_clock();

    match transition::apply_date_move(&client, &task, args.date, offset) {
        Some(updated) => {
            let due = updated.due_date.as_deref().unwrap_or("-");
            writeln!(writer, "Rescheduled '{}' to {}", updated.title, due)?;
            Ok(())
        }
        None => bail!("update failed; the remote task is unchanged"),
    }
}

/// Render the four buckets as labeled columns, tasks due-date sorted.
fn render_matrix<W: Write>(
    writer: &mut W,
    view: &MatrixView,
    context: ContextId,
    offset: FixedOffset,
) -> Result<()> {
    let stats = view.stats();
    writeln!(
        writer,
        "Context: {} - {} ({} open tasks)",
        context,
        context.description(),
        stats.total()
    )?;

    for quadrant in Quadrant::ALL {
        writeln!(writer)?;
        writeln!(
            writer,
            "[{}] {} ({})",
            quadrant.as_str().to_uppercase(),
            quadrant.label(),
            stats.count(quadrant)
        )?;
        for task in sort_by_due_date(view.quadrant(quadrant)) {
            writeln!(writer, "  {}  {}", format_due(&task, offset), task.title)?;
        }
    }
    Ok(())
}

fn format_due(task: &Task, offset: FixedOffset) -> String {
    match task.due_date.as_deref().and_then(|raw| dates::local_day(raw, offset)) {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => "          ".to_string(),
    }
}

fn authenticated_client(config: &AppConfig) -> Result<TaskClient> {
    let token = config.require_access_token()?;
    TaskClient::new(config, token).context("failed to build HTTP client")
}

fn find_task(client: &TaskClient, id: &str) -> Result<Task> {
    client
        .list_all_tasks()
        .into_iter()
        .find(|task| task.id == id)
        .ok_or_else(|| anyhow!("no task with id '{}' found across your projects", id))
}

fn viewer_clock() -> (NaiveDate, FixedOffset) {
    let now = Local::now();
    (now.date_naive(), *now.offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, title: &str, tags: &[&str], due_date: Option<&str>) -> Task {
        Task {
            id: id.into(),
            project_id: "p1".into(),
            title: title.into(),
            content: None,
            desc: None,
            start_date: due_date.map(Into::into),
            due_date: due_date.map(Into::into),
            is_all_day: false,
            time_zone: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            priority: 0,
            status: 0,
            reminders: Vec::new(),
        }
    }

    #[test]
    fn matrix_rendering_shows_counts_and_sorted_rows() {
        let tasks = vec![
            task("a", "File taxes", &["fast"], Some("2026-03-01T09:00:00.000+0000")),
            task("b", "Plan quarter", &["important"], None),
            task("c", "Pay rent", &["fast"], Some("2026-01-02T09:00:00.000+0000")),
        ];
        let view = partition_into_quadrants(&tasks);
        let mut out = Vec::new();
        render_matrix(
            &mut out,
            &view,
            ContextId::All,
            FixedOffset::east_opt(0).unwrap(),
        )
        .unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Context: all"));
        assert!(rendered.contains("(3 open tasks)"));
        assert!(rendered.contains("[Q1] Urgent & Important (2)"));
        assert!(rendered.contains("[Q2] Important, Not Urgent (1)"));
        assert!(rendered.contains("[Q4] Unmarked (0)"));

        // Q1 rows arrive due-date ascending.
        let rent = rendered.find("Pay rent").unwrap();
        let taxes = rendered.find("File taxes").unwrap();
        assert!(rent < taxes);
    }

    #[test]
    fn undated_rows_render_with_a_blank_due_column() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_due(&task("a", "x", &[], None), offset), "          ");
        assert_eq!(
            format_due(&task("a", "x", &[], Some("2026-01-02T09:00:00.000+0000")), offset),
            "2026-01-02"
        );
    }
}
