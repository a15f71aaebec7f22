//! Command-line frontend for the NoteHub notes service.

use clap::{value_parser, Arg, Command};
use notehub_api::{ClientConfig, Note, NotesApi, NotesService, Tag};
use notehub_core::{FormError, NotesSession};
use tracing_subscriber::{fmt, EnvFilter};

fn cli() -> Command {
    Command::new("notehub")
        .version("0.1.0")
        .about("NoteHub notes service client")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List notes")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .default_value("")
                        .help("Search text"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .default_value("1")
                        .value_parser(value_parser!(u32))
                        .help("Page number (1-based)"),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .default_value("All")
                        .help("Tag filter: All, Todo, Work, Personal, Meeting, Shopping"),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Show one note")
                .arg(Arg::new("id").required(true).help("Note id")),
        )
        .subcommand(
            Command::new("create")
                .about("Create a note")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .required(true)
                        .help("Note title (3-50 characters)"),
                )
                .arg(
                    Arg::new("content")
                        .long("content")
                        .default_value("")
                        .help("Note body (up to 500 characters)"),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .default_value("Todo")
                        .help("Tag: Todo, Work, Personal, Meeting, Shopping"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a note")
                .arg(Arg::new("id").required(true).help("Note id")),
        )
}

fn print_note_line(note: &Note) {
    println!("  {}  [{}] {}", note.id, note.tag, note.title);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let matches = cli().get_matches();
    let config = ClientConfig::from_env()?;

    match matches.subcommand() {
        Some(("list", args)) => {
            let search = args.get_one::<String>("search").unwrap();
            let page = *args.get_one::<u32>("page").unwrap();
            let tag = Tag::from_filter_slug(args.get_one::<String>("tag").unwrap())?;

            let api = NotesApi::new(config);
            let result = api.list_notes(search, page, tag).await?;

            println!(
                "{} notes (page {page} of {})",
                result.notes.len(),
                result.total_pages
            );
            for note in &result.notes {
                print_note_line(note);
            }
        }
        Some(("get", args)) => {
            let id = args.get_one::<String>("id").unwrap();

            let api = NotesApi::new(config);
            let note = api.get_note(id).await?;

            println!("{} [{}]", note.title, note.tag);
            println!("created {} / updated {}", note.created_at, note.updated_at);
            println!();
            println!("{}", note.content);
        }
        Some(("create", args)) => {
            let session = NotesSession::new(config, None);
            let form = session.open_form();
            form.set_title(args.get_one::<String>("title").unwrap());
            form.set_content(args.get_one::<String>("content").unwrap());
            form.set_tag(args.get_one::<String>("tag").unwrap());

            match session.submit_form().await {
                Ok(note) => {
                    println!("Created note {}", note.id);
                    print_note_line(&note);
                }
                Err(FormError::Invalid(errors)) => {
                    for message in [errors.title, errors.content, errors.tag]
                        .into_iter()
                        .flatten()
                    {
                        eprintln!("error: {message}");
                    }
                    anyhow::bail!("note was not created");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Some(("delete", args)) => {
            let id = args.get_one::<String>("id").unwrap();

            let api = NotesApi::new(config);
            let note = api.delete_note(id).await?;

            println!("Deleted note {}", note.id);
            print_note_line(&note);
        }
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}
