// goal.rs — Goal subcommands: create, list, show, options.

use std::io::Write;
use std::sync::Arc;

use clap::Subcommand;
use gt_daemon::GtConfig;
use gt_goal::{option_entries, Goal, GoalService, JsonlGoalStore, NewGoal, Recurrence, Tag};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a goal.
    Create {
        /// Goal title (e.g., "Read 20 pages").
        title: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        description: String,
        /// Recurrence by name (daily, weekly, monthly, yearly).
        #[arg(long, conflicts_with = "recurrence_index")]
        recurrence: Option<String>,
        /// Recurrence by position in the option list (clamped).
        #[arg(long)]
        recurrence_index: Option<usize>,
        /// Tag by name (personal, work, health, learning, finance).
        #[arg(long, conflicts_with = "tag_index")]
        tag: Option<String>,
        /// Tag by position in the option list (clamped).
        #[arg(long)]
        tag_index: Option<usize>,
    },
    /// List goals in creation order.
    List {
        /// Only goals whose title contains this text (case-insensitive).
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one goal.
    Show {
        /// Goal ID.
        id: Uuid,
    },
    /// Print the recurrence and tag options with their positions.
    Options,
}

pub fn execute(cmd: &GoalCommands, config: &GtConfig) -> anyhow::Result<()> {
    let service = open_service(config)?;
    let mut out = std::io::stdout().lock();

    match cmd {
        GoalCommands::Create {
            title,
            description,
            recurrence,
            recurrence_index,
            tag,
            tag_index,
        } => {
            let input = NewGoal {
                title: title.clone(),
                description: description.clone(),
                recurrence: recurrence.clone(),
                recurrence_index: *recurrence_index,
                tag: tag.clone(),
                tag_index: *tag_index,
            };
            create_goal(&service, input, &mut out)
        }
        GoalCommands::List { search } => list_goals(&service, search.as_deref(), &mut out),
        GoalCommands::Show { id } => show_goal(&service, *id, &mut out),
        GoalCommands::Options => print_options(&mut out),
    }
}

fn open_service(config: &GtConfig) -> anyhow::Result<GoalService> {
    let store = JsonlGoalStore::new(&config.goals_file)?;
    Ok(GoalService::new(Arc::new(store)))
}

fn create_goal(service: &GoalService, input: NewGoal, out: &mut impl Write) -> anyhow::Result<()> {
    let goal = service.create(input)?;
    writeln!(out, "Goal created: {}", goal.id)?;
    writeln!(out, "  Title:      {}", goal.title)?;
    writeln!(out, "  Recurrence: {}", goal.recurrence)?;
    writeln!(out, "  Tag:        {}", goal.tag)?;
    Ok(())
}

fn list_goals(service: &GoalService, search: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    let goals = match search {
        Some(term) => service.search(term)?,
        None => service.list()?,
    };

    if goals.is_empty() {
        writeln!(out, "No goals found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<38} {:<30} {:<10} {:<10}",
        "ID", "TITLE", "RECURS", "TAG"
    )?;
    writeln!(out, "{}", "-".repeat(90))?;
    for g in &goals {
        writeln!(
            out,
            "{:<38} {:<30} {:<10} {:<10}",
            g.id,
            truncate(&g.title, 28),
            g.recurrence.to_string(),
            g.tag.to_string(),
        )?;
    }
    writeln!(out, "\n{} goal(s).", goals.len())?;
    Ok(())
}

fn show_goal(service: &GoalService, id: Uuid, out: &mut impl Write) -> anyhow::Result<()> {
    let goal: Goal = service.get(id)?;
    writeln!(out, "Goal:        {}", goal.id)?;
    writeln!(out, "Title:       {}", goal.title)?;
    if !goal.description.is_empty() {
        writeln!(out, "Description: {}", goal.description)?;
    }
    writeln!(out, "Recurrence:  {}", goal.recurrence)?;
    writeln!(out, "Tag:         {}", goal.tag)?;
    writeln!(out, "Created:     {}", goal.created_at.to_rfc3339())?;
    Ok(())
}

fn print_options(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Recurrence:")?;
    for o in option_entries::<Recurrence>() {
        writeln!(out, "  {}  {}", o.index, o.name)?;
    }
    writeln!(out, "Tag:")?;
    for o in option_entries::<Tag>() {
        writeln!(out, "  {}  {}", o.index, o.name)?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct GoalCli {
        #[command(subcommand)]
        command: GoalCommands,
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn create_then_list_from_disk() {
        let project = TempDir::new().unwrap();
        let config = GtConfig::for_project(project.path());
        let service = open_service(&config).unwrap();

        let mut buf = Vec::new();
        create_goal(
            &service,
            NewGoal::new("Walk the dog").with_recurrence("daily").with_tag_index(0),
            &mut buf,
        )
        .unwrap();
        assert!(output(buf).contains("Recurrence: daily"));

        // A fresh service sees the same store.
        let reopened = open_service(&config).unwrap();
        let mut buf = Vec::new();
        list_goals(&reopened, None, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Walk the dog"));
        assert!(text.contains("1 goal(s)."));
    }

    #[test]
    fn list_with_search_filters() {
        let project = TempDir::new().unwrap();
        let service = open_service(&GtConfig::for_project(project.path())).unwrap();
        for title in ["Learn Rust", "Run 5k", "Learn piano"] {
            service
                .create(NewGoal::new(title).with_recurrence_index(1).with_tag_index(3))
                .unwrap();
        }

        let mut buf = Vec::new();
        list_goals(&service, Some("learn"), &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Learn Rust"));
        assert!(text.contains("Learn piano"));
        assert!(!text.contains("Run 5k"));
        assert!(text.contains("2 goal(s)."));
    }

    #[test]
    fn create_without_title_fails() {
        let project = TempDir::new().unwrap();
        let service = open_service(&GtConfig::for_project(project.path())).unwrap();

        let mut buf = Vec::new();
        let err = create_goal(
            &service,
            NewGoal::new("").with_recurrence("daily").with_tag("work"),
            &mut buf,
        )
        .unwrap_err();
        assert!(err.to_string().contains("title"));
        assert!(buf.is_empty());
    }

    #[test]
    fn show_unknown_id_fails() {
        let project = TempDir::new().unwrap();
        let service = open_service(&GtConfig::for_project(project.path())).unwrap();

        let mut buf = Vec::new();
        assert!(show_goal(&service, Uuid::new_v4(), &mut buf).is_err());
    }

    #[test]
    fn show_rejects_malformed_id_at_parse_time() {
        let err = GoalCli::try_parse_from(["gt", "show", "not-a-uuid"])
            .err()
            .expect("malformed id must not parse");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let cli = GoalCli::try_parse_from(["gt", "show", id_text.as_str()]).unwrap();
        assert!(matches!(cli.command, GoalCommands::Show { id: parsed } if parsed == id));
    }

    #[test]
    fn options_are_numbered() {
        let mut buf = Vec::new();
        print_options(&mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("2  monthly"));
        assert!(text.contains("4  finance"));
    }

    #[test]
    fn truncate_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long goal title", 10), "a very ...");
    }
}
