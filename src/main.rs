use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use reading_progress::dom::ElementId;
use reading_progress::ui::{render_stats_toggle, render_widget, seed_document, seed_stats};
use reading_progress::widget::ids;
use reading_progress::{
    AfterSubmit, ClientConfig, Completion, Document, ReadingClient, ReadingId, ReadingSnapshot,
    ReadingWidget, StatsToggle,
};
use std::error::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn cli() -> Command {
    Command::new("reading_progress")
        .about("Drive a reading's progress widget against the book tracker")
        .arg(Arg::new("reading").long("reading").required(true))
        .arg(
            Arg::new("current")
                .long("current")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("total")
                .long("total")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Backend URL, overrides READING_API_BASE"),
        )
        .arg(
            Arg::new("no-deadline")
                .long("no-deadline")
                .action(ArgAction::SetTrue)
                .help("Render the widget without deadline controls"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("show")
                .about("Print the widget")
                .arg(Arg::new("html").long("html").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("html"),
                ),
        )
        .subcommand(
            Command::new("pages")
                .about("Save a new page position")
                .arg(
                    Arg::new("pages")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Move the slider by a number of pages and save")
                .arg(
                    Arg::new("delta")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(Command::new("finish").about("Mark the reading finished"))
        .subcommand(
            Command::new("deadline")
                .about("Set a deadline, optionally for a page target")
                .arg(Arg::new("date").required(true))
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(Command::new("dnf").about("Mark the reading as not finished"))
        .subcommand(Command::new("toggle-stats").about("Switch the stats panel view"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let reading = ReadingId::parse(required::<String>(&matches, "reading")?.as_str())?;
    let mut snapshot = ReadingSnapshot::new(
        reading,
        *required::<u32>(&matches, "current")?,
        *required::<u32>(&matches, "total")?,
    );
    snapshot.deadline_controls = !matches.get_flag("no-deadline");

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }

    let mut doc = seed_document(&snapshot);
    let mut widget = ReadingWidget::mount(&doc, snapshot.reading.clone())?;

    let Some((command, args)) = matches.subcommand() else {
        return Err("missing command".into());
    };

    if command == "pages" {
        let target = *required::<i64>(args, "pages")?;
        if !(0..=i64::from(snapshot.total_pages)).contains(&target) {
            return Err(format!(
                "page {target} is outside 0..={}",
                snapshot.total_pages
            )
            .into());
        }
    }

    if command == "show" {
        return show(&snapshot, &doc, args);
    }
    if command == "toggle-stats" {
        seed_stats(&mut doc);
        let mut stats = StatsToggle::mount(&doc)?;
        println!("{:?}", stats.toggle(&mut doc)?);
        return Ok(());
    }

    let client = ReadingClient::new(&config)?;
    info!(base_url = client.base_url(), reading = %snapshot.reading, command, "running");

    let completion = match command {
        "dnf" => widget.dnf_reading(&mut doc, &client).await?,
        _ => {
            widget.toggle_slider(&mut doc)?;
            let current = i64::from(snapshot.current_pages);
            match command {
                "pages" => {
                    let target = *required::<i64>(args, "pages")?;
                    widget.add_pages_to_slider(&mut doc, target - current)?;
                }
                "add" => {
                    widget.add_pages_to_slider(&mut doc, *required::<i64>(args, "delta")?)?;
                }
                "finish" => {
                    widget.add_pages_to_slider(&mut doc, i64::from(snapshot.total_pages) - current)?;
                }
                "deadline" => {
                    widget.toggle_deadline(&mut doc)?;
                    let date = required::<String>(args, "date")?;
                    doc.set_value(&ElementId::scoped(ids::DEADLINE_DATE, &snapshot.reading), date.as_str())?;
                    if let Some(pages) = args.get_one::<u32>("pages") {
                        doc.set_value(
                            &ElementId::scoped(ids::DEADLINE_PAGES, &snapshot.reading),
                            pages.to_string(),
                        )?;
                    }
                }
                other => return Err(format!("unknown command '{other}'").into()),
            }
            widget.save_reading_update(&mut doc, &client, None).await?
        }
    };

    report(&widget, &mut doc, completion)
}

fn show(snapshot: &ReadingSnapshot, doc: &Document, args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    if args.get_flag("html") {
        print!("{}", render_widget(snapshot));
        print!("{}", render_stats_toggle());
    } else if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(doc)?);
    } else {
        let text = |base: &str| -> Result<String, Box<dyn Error>> {
            Ok(doc.get(&ElementId::scoped(base, &snapshot.reading))?.text.clone())
        };
        println!("{}  {}", text(ids::PAGES_COUNT)?, text(ids::PERCENT_PAGES)?);
    }
    Ok(())
}

fn report(
    widget: &ReadingWidget,
    doc: &mut Document,
    completion: Completion,
) -> Result<(), Box<dyn Error>> {
    match completion.next {
        AfterSubmit::Reload => {
            if !completion.outcome.is_success() {
                warn!("{}", completion.outcome.describe());
            }
            info!("reload requested");
            println!("{}", completion.outcome.describe());
            Ok(())
        }
        AfterSubmit::Stay => {
            widget.show_failure(doc, &completion.outcome)?;
            Err(completion.outcome.describe().into())
        }
    }
}

fn required<'a, T>(matches: &'a ArgMatches, name: &str) -> Result<&'a T, Box<dyn Error>>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(name)
        .ok_or_else(|| format!("missing argument '{name}'").into())
}
