use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tawa::chat::Sender;
use tawa::content::Resolved;
use tawa::i18n::Locale;
use tawa::permalink::Route;
use tawa::render::RenderContext;
use tawa::storage::DiskStorage;
use tawa::Site;
use tracing::info;

/// Explore a TAWA site from the command line.
#[derive(Parser)]
#[command(name = "chat", version, about, long_about = None)]
struct Cli {
    /// The site root, containing `tawa.toml`.
    #[arg(long, env = "TAWA_ROOT", default_value = "demos/chat/site", global = true)]
    root: PathBuf,

    /// Render in this locale instead of the stored preference.
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the assistant a single question.
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Talk to the assistant until end of input or `/quit`.
    Chat,

    /// List news, newest first.
    News {
        #[arg(long)]
        limit: Option<usize>,

        /// Skip this many of the newest items.
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Only news from this destination.
        #[arg(long)]
        destination: Option<String>,
    },

    /// List events, oldest first.
    Events {
        /// Leave out events that have already happened.
        #[arg(long)]
        upcoming: bool,
    },

    /// List the featured tour of each destination.
    Tours,

    /// Show what a site path points at.
    Show { path: String },

    /// Show or change the stored language preference.
    Locale { code: Option<Locale> },

    /// List UI strings each locale has not translated yet.
    Missing,
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "tawa=warn,chat=warn",
        1 => "tawa=info,chat=info",
        2 => "tawa=debug,chat=debug",
        _ => "tawa=trace,chat=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let site = Site::builder().root(&cli.root).load()?;
    let mut selection = site.locale_selection(DiskStorage::new(
        cli.root.join(".tawa").join("preferences.json"),
    ));
    let locale = cli.locale.unwrap_or_else(|| selection.current());
    let ctx = site.render_context(locale);

    info!(locale = %locale, "rendering");

    match cli.command {
        Command::Ask { question } => {
            let response = site.responder().respond(&question.join(" "));
            println!("{}", response.text);
        }
        Command::Chat => chat(&site)?,
        Command::News {
            limit,
            skip,
            destination,
        } => news(&ctx, limit, skip, destination.as_deref())?,
        Command::Events { upcoming } => {
            let events = if upcoming {
                ctx.upcoming_events(site.today())
            } else {
                ctx.events()
            };

            println!("{}", ctx.t("events.title"));
            for event in events {
                println!("  {}  {} ({})", event.date, event.title, event.location);
            }
        }
        Command::Tours => {
            println!("{}", ctx.t("tours.featured"));
            for featured in ctx.content().featured_tours() {
                println!(
                    "  {}: {}, {} (${:.0})",
                    featured.destination.name,
                    featured.tour.name,
                    featured.tour.duration,
                    featured.tour.price
                );
            }
        }
        Command::Show { path } => show(&ctx, &path)?,
        Command::Locale { code: None } => {
            for locale in Locale::ALL {
                let marker = if locale == selection.current() { "*" } else { " " };
                println!(
                    "{marker} {} {} ({}, {})",
                    locale.code(),
                    locale.native_name(),
                    locale.name(),
                    locale.direction().as_str()
                );
            }
        }
        Command::Locale { code: Some(locale) } => {
            selection.switch(locale)?;
            let ctx = site.render_context(locale);
            println!("{}", ctx.t_with("locale.switched", &[("language", locale.native_name())]));
        }
        Command::Missing => {
            for locale in Locale::ALL {
                let missing = site.translations().missing_keys(locale);
                if missing.is_empty() {
                    continue;
                }

                println!("{} ({}):", locale.name(), missing.len());
                for key in missing {
                    println!("  {key}");
                }
            }
        }
    }

    Ok(())
}

fn chat(site: &Site) -> Result<()> {
    let mut conversation = site.conversation();

    for message in conversation.messages() {
        println!("bot> {}", message.text);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "/quit" => break,
            "/clear" => {
                conversation.clear();
                continue;
            }
            _ => {}
        }

        let delay = conversation.reply_delay();
        if let Some(reply) = conversation.send(&line) {
            let text = reply.text.clone();
            thread::sleep(delay);
            println!("bot> {text}");
        }
    }

    let sent = conversation
        .messages()
        .iter()
        .filter(|message| message.sender == Sender::User)
        .count();
    info!(sent, "conversation ended");

    Ok(())
}

fn news(ctx: &RenderContext, limit: Option<usize>, skip: usize, destination: Option<&str>) -> Result<()> {
    let entries = match destination {
        Some(slug) => ctx
            .content()
            .destination_news(slug)
            .ok_or_else(|| anyhow!("no destination '{slug}'"))?
            .into_iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .collect(),
        None => ctx.content().news_window(skip, limit),
    };

    println!("{}", ctx.t("news.title"));
    for entry in entries {
        let news = ctx.news_to_render(entry);
        let source = news
            .destination
            .map(|destination| destination.name)
            .unwrap_or(ctx.t("news.general"));
        let image = news.image.as_deref().unwrap_or("(no image)");

        println!("  {}  {} [{}]", news.date, news.title, source);
        println!("      {}  {}", news.path, image);
    }

    Ok(())
}

fn show(ctx: &RenderContext, path: &str) -> Result<()> {
    let Some(route) = Route::parse(path) else {
        println!("{}", ctx.t_with("errors.not_found", &[("path", path)]));
        return Ok(());
    };

    println!("{}", ctx.permalink(&route)?);

    match ctx.content().resolve(&route) {
        Resolved::Page(route) => println!("{}", ctx.t(&format!("pages.{}", page_key(&route)))),
        Resolved::Destination { destination, tab } => {
            println!("{} ({})", destination.name, ctx.t(&format!("tabs.{}", tab.as_str())));
            println!("{}", destination.tagline);
            println!(
                "{}: {}  {}: {}  {}: {}",
                ctx.t("stats.area"),
                destination.stats.area,
                ctx.t("stats.species"),
                destination.stats.species,
                ctx.t("stats.visitors"),
                destination.stats.visitors
            );
        }
        Resolved::News(entry) => {
            let news = ctx.news_to_render(entry);
            println!("{} ({})", news.title, news.date);
            println!("{}", news.content);
        }
        Resolved::Event(event) => {
            let event = ctx.event_to_render(event);
            println!("{} ({}, {})", event.title, event.date, event.location);
            println!("{}", event.description.unwrap_or(event.excerpt));
        }
        Resolved::NotFound { listing } => {
            println!("{}", ctx.t_with("errors.not_found", &[("path", path)]));
            println!("{}", ctx.permalink(&listing)?);
        }
    }

    Ok(())
}

fn page_key(route: &Route) -> &'static str {
    match route {
        Route::Home => "home",
        Route::Destinations => "destinations",
        Route::News => "news",
        Route::Events => "events",
        Route::Investment => "investment",
        Route::About => "about",
        Route::Contact => "contact",
        Route::Destination { .. } | Route::NewsDetail { .. } | Route::EventDetail { .. } => "detail",
    }
}
