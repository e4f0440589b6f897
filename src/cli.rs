use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, Args};
use docview_api::{ApiClient, DocumentSource};
use docview_api::documents::CreateDocument;
use docview_api::iterate::Iterate;
use docview_lib::document::{Document, DocId};
use docview_lib::query::{PageQuery, Skip, Limit};
use url::Url;

use crate::config::{self, Settings, Overrides};
use crate::error::{self, Context};
use crate::input;
use crate::render::{Format, Renderer};
use crate::view::{DocumentListView, ViewSnapshot};

/// browse the documents of a document service one page at a time.
///
/// if no command is provided then it will enter interactive mode.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// a config file to load settings from
    ///
    /// yaml and json files are accepted. may be given multiple times with
    /// later files overriding earlier ones
    #[arg(long)]
    config: Vec<PathBuf>,

    /// base url of the document service
    #[arg(long)]
    base_url: Option<Url>,

    /// offset of the first page
    #[arg(long, allow_negative_numbers = true)]
    skip: Option<Skip>,

    /// number of documents per page
    #[arg(long)]
    limit: Option<Limit>,

    /// output format of rendered pages
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// only fetch the first page
    ///
    /// previous and next will change the displayed range without requesting
    /// the new page
    #[arg(long)]
    mount_only: bool,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// renders the first page and exits
    Show,

    /// renders the first page and waits for paging commands
    Browse,

    /// retrieves every page starting at the configured offset
    All,

    /// creates a new document on the service
    Create(CreateArgs),
}

pub fn start() -> error::Result {
    let args = Cli::parse();

    let cwd = std::env::current_dir()
        .context("failed to retrieve the current working directory")?;
    let mut settings = Settings::load(&cwd, &args.config)?;

    settings.apply(Overrides {
        base_url: args.base_url,
        skip: args.skip,
        limit: args.limit,
        mount_only: args.mount_only,
        format: args.format,
    })?;

    let client = build_client(&settings.service)?;
    let renderer = Renderer::new()?;

    let stdout = std::io::stdout();
    let mut output = stdout.lock();

    match args.command.unwrap_or(BaseCmds::Browse) {
        BaseCmds::Show => show(&client, &renderer, &settings, &mut output),
        BaseCmds::Browse => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();

            browse(&client, &renderer, &settings, &mut input, &mut output)
        },
        BaseCmds::All => all(&client, &renderer, &settings, &mut output),
        BaseCmds::Create(given) => create(&client, given, settings.view.format, &mut output),
    }
}

fn build_client(service: &config::Service) -> error::Result<ApiClient> {
    let mut builder = ApiClient::builder();
    builder.base_url(service.base_url.clone())
        .user_agent(service.user_agent.clone())
        .timeout(service.timeout);

    builder.build().context("failed to create api client")
}

fn show<S, W>(source: S, renderer: &Renderer, settings: &Settings, output: &mut W) -> error::Result
where
    S: DocumentSource,
    W: Write
{
    let mut view = DocumentListView::new(source, settings.view.page, settings.view.policy);

    view.mount().context("failed to load documents")?;

    renderer.render(&view.snapshot(), settings.view.format, output)
}

/// commands accepted while browsing
#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    /// moves to the next page
    #[command(alias = "n")]
    Next,

    /// moves to the previous page
    #[command(aliases = ["prev", "p"])]
    Previous,

    /// requests the current page again
    Reload,

    /// renders the current page
    Show,

    /// stops browsing
    #[command(aliases = ["q", "exit"])]
    Quit,
}

fn browse<S, R, W>(
    source: S,
    renderer: &Renderer,
    settings: &Settings,
    input: &mut R,
    output: &mut W
) -> error::Result
where
    S: DocumentSource,
    R: BufRead,
    W: Write
{
    let format = settings.view.format;
    let mut view = DocumentListView::new(source, settings.view.page, settings.view.policy);

    if let Err(err) = view.mount().context("failed to load documents") {
        writeln!(output, "{}", err)?;
    }

    renderer.render(&view.snapshot(), format, output)?;

    loop {
        let Some(given) = input::prompt_line(input, output, "> ")? else {
            writeln!(output)?;
            break;
        };
        let trimmed = given.trim();

        if trimmed.is_empty() {
            continue;
        }

        let Ok(args_list) = shell_words::split(trimmed) else {
            writeln!(output, "failed to parse command line args")?;
            continue;
        };

        let cmd = match Interactive::try_parse_from(args_list) {
            Ok(c) => c,
            Err(err) => {
                write!(output, "{}", err.render())?;
                continue;
            }
        };

        let result = match cmd {
            Interactive::Next => view.next(),
            Interactive::Previous => view.previous(),
            Interactive::Reload => view.reload(),
            Interactive::Show => Ok(()),
            Interactive::Quit => break,
        };

        if let Err(err) = result.context("failed to load documents") {
            writeln!(output, "{}", err)?;
        }

        renderer.render(&view.snapshot(), format, output)?;
    }

    Ok(())
}

fn all<S, W>(source: &S, renderer: &Renderer, settings: &Settings, output: &mut W) -> error::Result
where
    S: DocumentSource + ?Sized,
    W: Write
{
    let start = settings.view.page;
    let mut documents = Vec::new();

    for result in Iterate::new(source, start) {
        documents.push(result.context("failed to retrieve documents")?);
    }

    tracing::debug!("retrieved {} documents", documents.len());

    let shown = PageQuery::new(start.skip, Limit::try_from(documents.len()).unwrap_or(Limit::MAX));

    renderer.render(&ViewSnapshot::new(&shown, &documents), settings.view.format, output)
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// id of the new document
    #[arg(long)]
    doc_id: DocId,

    /// title of the new document
    #[arg(long)]
    title: String,

    /// date of the new document, sent as given
    #[arg(long)]
    date: String,

    /// url the document can be found at
    #[arg(long)]
    url: String,

    /// author of the new document
    #[arg(long)]
    author: String,

    /// first concept tag
    #[arg(long, default_value = "")]
    concept1: String,

    /// second concept tag
    #[arg(long, default_value = "")]
    concept2: String,
}

fn create<W>(client: &ApiClient, args: CreateArgs, format: Format, output: &mut W) -> error::Result
where
    W: Write
{
    let document = Document {
        doc_id: args.doc_id,
        title: args.title,
        date: args.date,
        url: args.url,
        author: args.author,
        concept1: args.concept1,
        concept2: args.concept2,
    };

    let created = CreateDocument::new(document)
        .send(client)
        .context("failed to create document")?;

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *output, &created)?;
            writeln!(output)?;
        },
        Format::Text | Format::Html => {
            writeln!(output, "created document {}: {}", created.doc_id, created.title)?;
        }
    }

    Ok(())
}
