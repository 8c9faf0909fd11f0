use std::error::Error;
use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::config::AppConfig;
use crate::model::item::{ItemField, ItemPriority, ItemStatus, NewItem, ProjectItem};
use crate::store::query::counts_by_date;
use crate::store::ItemStore;
use crate::util::unicode::fit_to_width;

/// What the session loop should do after a command.
pub enum Outcome {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    store: &mut ItemStore,
    config: &AppConfig,
    command: Command,
    json: bool,
) -> Result<Outcome, Box<dyn Error>> {
    match command {
        Command::Quit => return Ok(Outcome::Quit),

        // Write commands
        Command::Add(args) => cmd_add(store, config, args, json)?,
        Command::Status(args) => cmd_status(store, config, args, json)?,
        Command::Priority(args) => cmd_priority(store, config, args, json)?,
        Command::Title(args) => cmd_title(store, config, args, json)?,
        Command::Note(args) => cmd_set_field(store, config, ItemField::Notes, args, json)?,
        Command::File(args) => cmd_set_field(store, config, ItemField::FileUrl, args, json)?,
        Command::Media(args) => cmd_set_field(store, config, ItemField::MediaUrl, args, json)?,
        Command::Approve(args) => cmd_approve(store, config, args, json)?,
        Command::Done(args) => cmd_done(store, config, args, json)?,
        Command::Reopen(args) => cmd_reopen(store, config, args, json)?,
        Command::Restore(args) => cmd_restore(store, config, args, json)?,
        Command::Archive(args) => cmd_archive(store, args, json)?,
        Command::Delete(args) => cmd_delete(store, args, json)?,

        // Read commands
        Command::List(args) => cmd_list(store, config, args, json)?,
        Command::Show(args) => cmd_show(store, args, json)?,
        Command::Calendar(args) => cmd_calendar(store, args, json)?,
        Command::Search(args) => cmd_search(store, config, args, json)?,
        Command::Stats => cmd_stats(store, json)?,
    }
    Ok(Outcome::Continue)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    store: &mut ItemStore,
    config: &AppConfig,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let title = args.title.trim().to_string();
    if title.is_empty() {
        return Err("title cannot be empty".into());
    }
    let date = match args.date {
        Some(d) => parse_date(&d)?,
        None => today_str(),
    };
    let status = match args.status {
        Some(s) => s.parse::<ItemStatus>()?,
        None => config.defaults.status,
    };
    let priority = match args.priority {
        Some(p) => p.parse::<ItemPriority>()?,
        None => config.defaults.priority,
    };

    let item = store.add(NewItem {
        title,
        notes: args.notes.unwrap_or_default(),
        status,
        priority,
        date,
        file_url: args.file.unwrap_or_default(),
        media_url: args.media.unwrap_or_default(),
    });

    if json {
        print_json(&item_to_json(item))
    } else {
        println!("added {}  {}", item.date, item_row(item, config.ui.title_width));
        Ok(())
    }
}

fn cmd_status(
    store: &mut ItemStore,
    config: &AppConfig,
    args: StatusArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let status: ItemStatus = args.status.parse()?;
    store.update_status(&args.id, status)?;
    render_item(store, &args.id, config, json)
}

fn cmd_priority(
    store: &mut ItemStore,
    config: &AppConfig,
    args: PriorityArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let priority: ItemPriority = args.priority.parse()?;
    store.update_priority(&args.id, priority)?;
    render_item(store, &args.id, config, json)
}

fn cmd_title(
    store: &mut ItemStore,
    config: &AppConfig,
    args: TitleArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let title = args.title.trim().to_string();
    if title.is_empty() {
        return Err("title cannot be empty".into());
    }
    store.update_field(&args.id, ItemField::Title, title)?;
    render_item(store, &args.id, config, json)
}

fn cmd_set_field(
    store: &mut ItemStore,
    config: &AppConfig,
    field: ItemField,
    args: TextArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    store.update_field(&args.id, field, args.value.unwrap_or_default())?;
    render_item(store, &args.id, config, json)
}

// The flag toggles are fire-and-forget: an unknown id is a defined no-op,
// so nothing is printed for it.

fn cmd_approve(
    store: &mut ItemStore,
    config: &AppConfig,
    args: IdArg,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if store.toggle_approved(&args.id).is_none() {
        debug!("approve: no such item {}", args.id);
        return Ok(());
    }
    render_item(store, &args.id, config, json)
}

fn cmd_done(
    store: &mut ItemStore,
    config: &AppConfig,
    args: IdArg,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if store.toggle_completed(&args.id).is_none() {
        debug!("done: no such item {}", args.id);
        return Ok(());
    }
    render_item(store, &args.id, config, json)
}

fn cmd_reopen(
    store: &mut ItemStore,
    config: &AppConfig,
    args: IdArg,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if store.uncomplete(&args.id).is_none() {
        debug!("reopen: no such item {}", args.id);
        return Ok(());
    }
    render_item(store, &args.id, config, json)
}

fn cmd_restore(
    store: &mut ItemStore,
    config: &AppConfig,
    args: IdArg,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if store.unarchive(&args.id).is_none() {
        debug!("restore: no such item {}", args.id);
        return Ok(());
    }
    render_item(store, &args.id, config, json)
}

fn cmd_archive(store: &mut ItemStore, args: IdsArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let requested = args.ids.len();
    let affected = store.archive_many(&args.ids);
    if json {
        print_json(&BulkJson { requested, affected })
    } else {
        println!("archived {} item(s)", affected);
        Ok(())
    }
}

fn cmd_delete(store: &mut ItemStore, args: DeleteArgs, json: bool) -> Result<(), Box<dyn Error>> {
    if !args.yes && !confirm(&format!("delete {} item(s)?", args.ids.len()))? {
        println!("aborted");
        return Ok(());
    }
    let requested = args.ids.len();
    let affected = store.remove_many(&args.ids);
    if json {
        print_json(&BulkJson { requested, affected })
    } else {
        println!("deleted {} item(s)", affected);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    store: &ItemStore,
    config: &AppConfig,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let (view, items) = if args.all {
        ("all", store.all())
    } else if args.archived {
        ("archived", store.archived())
    } else if args.completed {
        ("completed", store.completed())
    } else {
        ("active", store.active())
    };

    if json {
        print_json(&item_list_to_json(view, &items))
    } else {
        if items.is_empty() {
            println!("no {} items", view);
        } else {
            render_grouped(&items, config);
        }
        Ok(())
    }
}

fn cmd_show(store: &ItemStore, args: IdArg, json: bool) -> Result<(), Box<dyn Error>> {
    let Some(item) = store.get(&args.id) else {
        return Err(format!("item not found: {}", args.id).into());
    };
    if json {
        return print_json(&item_to_json(item));
    }
    println!("{}", item.id);
    println!("  title:     {}", item.title);
    println!("  date:      {}", item.date);
    println!("  status:    {}", item.status.as_str());
    println!("  priority:  {}", item.priority.as_str());
    if !item.notes.is_empty() {
        println!("  notes:     {}", item.notes);
    }
    if !item.file_url.is_empty() {
        println!("  file:      {}", item.file_url);
    }
    if !item.media_url.is_empty() {
        println!("  media:     {}", item.media_url);
    }
    let flags = flag_tags(item);
    if !flags.is_empty() {
        println!("  flags:     {}", flags.join(", "));
    }
    Ok(())
}

fn cmd_calendar(store: &ItemStore, args: CalendarArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let month = args.month.as_deref().map(parse_month).transpose()?;
    let mut counts = counts_by_date(store.active());
    if let Some(month) = month {
        let prefix = format!("{}-", month);
        counts.retain(|date, _| date.starts_with(&prefix));
    }

    if json {
        print_json(&counts)
    } else {
        if counts.is_empty() {
            println!("no active items");
        }
        for (date, n) in &counts {
            println!("{}  {}", date, n);
        }
        Ok(())
    }
}

fn cmd_search(
    store: &ItemStore,
    config: &AppConfig,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let pattern =
        Regex::new(&args.pattern).map_err(|e| format!("invalid pattern: {}", e))?;
    let hits = store.search(&pattern, args.archived);

    if json {
        print_json(&item_list_to_json("search", &hits))
    } else {
        if hits.is_empty() {
            println!("no matches");
        } else {
            render_grouped(&hits, config);
        }
        Ok(())
    }
}

fn cmd_stats(store: &ItemStore, json: bool) -> Result<(), Box<dyn Error>> {
    let all = store.all();
    let tally = |s: ItemStatus| all.iter().filter(|i| i.status == s).count();
    let stats = StatsJson {
        total: all.len(),
        active: all.iter().filter(|i| !i.archived).count(),
        archived: all.iter().filter(|i| i.archived).count(),
        completed: all.iter().filter(|i| i.completed).count(),
        approved: all.iter().filter(|i| i.approved).count(),
        by_status: StatusTallyJson {
            backlog: tally(ItemStatus::Backlog),
            in_progress: tally(ItemStatus::InProgress),
            stuck: tally(ItemStatus::Stuck),
            done: tally(ItemStatus::Done),
        },
    };

    if json {
        print_json(&stats)
    } else {
        println!(
            "items:     {} ({} active, {} archived)",
            stats.total, stats.active, stats.archived
        );
        println!("completed: {}", stats.completed);
        println!("approved:  {}", stats.approved);
        println!(
            "status:    backlog {}  in_progress {}  stuck {}  done {}",
            stats.by_status.backlog,
            stats.by_status.in_progress,
            stats.by_status.stuck,
            stats.by_status.done
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Print one item fresh from the store. Mutation handlers end here so the
/// user always sees ground truth, never the optimistic input.
fn render_item(
    store: &ItemStore,
    id: &str,
    config: &AppConfig,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match store.get(id) {
        Some(item) if json => print_json(&item_to_json(item)),
        Some(item) => {
            println!("{}  {}", item.date, item_row(item, config.ui.title_width));
            Ok(())
        }
        None => Ok(()),
    }
}

/// Items arrive projection-sorted, so equal dates are adjacent and become
/// one header each.
fn render_grouped(items: &[&ProjectItem], config: &AppConfig) {
    let mut current_date: Option<&str> = None;
    for item in items {
        if current_date != Some(item.date.as_str()) {
            println!("{}", item.date);
            current_date = Some(item.date.as_str());
        }
        println!("  {}", item_row(item, config.ui.title_width));
    }
}

fn item_row(item: &ProjectItem, title_width: usize) -> String {
    let mut line = format!(
        "[{}] {}  {}  !{}",
        item.status.status_char(),
        item.id,
        fit_to_width(&item.title, title_width),
        item.priority.as_str()
    );
    for tag in flag_tags(item) {
        line.push(' ');
        line.push_str(tag);
    }
    line
}

fn flag_tags(item: &ProjectItem) -> Vec<&'static str> {
    let mut tags = Vec::new();
    if item.approved {
        tags.push("#approved");
    }
    if item.completed {
        tags.push("#completed");
    }
    if item.archived {
        tags.push("#archived");
    }
    tags
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Dates must be exactly `YYYY-MM-DD` and a real calendar date; the store
/// treats them as opaque sortable strings, so the shape check happens here.
fn parse_date(s: &str) -> Result<String, String> {
    let b = s.as_bytes();
    let shaped = b.len() == 10 && b[4] == b'-' && b[7] == b'-';
    if shaped && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        Ok(s.to_string())
    } else {
        Err(format!("invalid date '{}'; expected YYYY-MM-DD", s))
    }
}

fn parse_month(s: &str) -> Result<String, String> {
    let valid = s.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok();
    if valid {
        Ok(s.to_string())
    } else {
        Err(format!("invalid month '{}'; expected YYYY-MM", s))
    }
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_canonical_form() {
        assert_eq!(parse_date("2024-03-01").unwrap(), "2024-03-01");
        assert_eq!(parse_date("1999-12-31").unwrap(), "1999-12-31");
    }

    #[test]
    fn test_parse_date_rejects_loose_forms() {
        // chrono alone would accept unpadded fields; the shape check must not.
        assert!(parse_date("2024-3-1").is_err());
        assert!(parse_date("2024-03-01T00:00").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), "2024-03");
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-3").is_err());
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn test_item_row_carries_flag_tags() {
        let mut item = ProjectItem::new(
            "item-1-0".into(),
            NewItem {
                title: "Ship v1".into(),
                date: "2024-03-01".into(),
                ..NewItem::default()
            },
        );
        item.approved = true;
        item.archived = true;
        let row = item_row(&item, 10);
        assert!(row.contains("#approved"));
        assert!(row.contains("#archived"));
        assert!(!row.contains("#completed"));
        assert!(row.starts_with("[ ] item-1-0"));
    }
}
