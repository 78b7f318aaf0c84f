use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mrdiff::areas::config::DiffsConfig;
use mrdiff::areas::merge_requests::{MergeRequest, MergeRequestRef};
use mrdiff::areas::repository::Repository;
use mrdiff::artifacts::core::write_paged;
use mrdiff::artifacts::diff::paginator::PaginationWindow;
use mrdiff::artifacts::diff::revision_pair::RevisionPair;
use mrdiff::artifacts::diff::tree_diff::DiffFilter;
use mrdiff::artifacts::notes::note_anchor::{DiffPosition, NoteAnchor};
use mrdiff::artifacts::objects::object_id::ObjectId;
use mrdiff::commands::diffs::{DiffsMode, DiffsRequest, RequestContext};
use mrdiff::commands::render::{PatchPrinter, RenderOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mrdiff",
    version = "0.1.0",
    about = "Merge request diffs over a git object database",
    long_about = "Computes the per-file diff between the two revisions of a merge request \
    and serves it whole, one path at a time or in pages.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(long, global = true, default_value = ".git", help = "The git directory holding the objects")]
    git_dir: PathBuf,
    #[arg(long, global = true, help = "Switch batch loading off")]
    no_batch: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MergeRequestArgs {
    #[arg(index = 1, help = "Base revision (commit or tree id)")]
    base: String,
    #[arg(index = 2, help = "Head revision (commit or tree id)")]
    head: String,
    #[arg(long, default_value_t = 1, help = "The project the merge request belongs to")]
    project_id: u64,
    #[arg(long, default_value_t = 1, help = "The merge request number within its project")]
    iid: u64,
    #[arg(long, default_value_t = 1, help = "The merge request id, used as noteable id")]
    merge_request_id: u64,
    #[arg(long, help = "Requested diff view, inline or parallel")]
    view: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "show",
        about = "Show the full diff of a merge request",
        long_about = "This command prints every changed file of the merge request as a patch, \
        or as name and status when --name-status is given."
    )]
    Show {
        #[command(flatten)]
        merge_request: MergeRequestArgs,
        #[arg(long, help = "Show only names and status of changed files")]
        name_status: bool,
        #[arg(long, value_parser = parse_diff_filter, help = "Select files by status (A, D, M, R, S)")]
        diff_filter: Option<DiffFilter>,
    },
    #[command(
        name = "diff-for-path",
        about = "Show the diff of a single file",
        long_about = "This command prints the diff of one file of the merge request together \
        with the attributes new notes on it start with."
    )]
    DiffForPath {
        #[command(flatten)]
        merge_request: MergeRequestArgs,
        #[arg(long, help = "Path of the file in the base revision")]
        old_path: PathBuf,
        #[arg(long, help = "Path of the file in the head revision")]
        new_path: PathBuf,
        #[arg(long, help = "Line in the base revision a note is anchored to")]
        old_line: Option<usize>,
        #[arg(long, help = "Line in the head revision a note is anchored to")]
        new_line: Option<usize>,
        #[arg(long, help = "Commit the diff is viewed at")]
        commit_id: Option<String>,
    },
    #[command(
        name = "diffs-batch",
        about = "Show one page of the diff",
        long_about = "This command prints one page of changed files followed by the pagination state."
    )]
    DiffsBatch {
        #[command(flatten)]
        merge_request: MergeRequestArgs,
        #[arg(long, help = "The page to show, starting at 1")]
        page: Option<String>,
        #[arg(long, help = "Files per page")]
        per_page: Option<String>,
    },
}

fn parse_diff_filter(value: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(value).ok_or_else(|| format!("Invalid diff filter {value}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = DiffsConfig::load_from_env();
    if cli.no_batch {
        config = config.with_batch_enabled(false);
    }
    let repository = Repository::open(&cli.git_dir, config)?;

    let mut options = RenderOptions::default();
    let (args, mode) = match cli.command {
        Commands::Show {
            merge_request,
            name_status,
            diff_filter,
        } => {
            options.name_status = name_status;
            options.filter = diff_filter.unwrap_or(options.filter);
            (merge_request, DiffsMode::Full)
        }
        Commands::DiffForPath {
            merge_request,
            old_path,
            new_path,
            old_line,
            new_line,
            commit_id,
        } => {
            let commit_id = commit_id.as_deref().map(ObjectId::try_from).transpose()?;
            let position =
                DiffPosition::for_paths(old_path.clone(), new_path.clone()).with_lines(old_line, new_line);
            let mode = DiffsMode::SinglePath {
                old_path,
                new_path,
                anchor: NoteAnchor::new(Some(position), commit_id),
            };
            (merge_request, mode)
        }
        Commands::DiffsBatch {
            merge_request,
            page,
            per_page,
        } => {
            let window = PaginationWindow::from_params(
                page.as_deref(),
                per_page.as_deref(),
                repository.config().default_per_page(),
            );
            let mode = DiffsMode::Batch {
                page: window.page(),
                per_page: window.per_page(),
            };
            (merge_request, mode)
        }
    };

    let reference = MergeRequestRef::new(args.project_id, args.iid);
    let diff_refs = RevisionPair::new(
        ObjectId::try_from(args.base.as_str())?,
        ObjectId::try_from(args.head.as_str())?,
    );
    repository.merge_requests().register(MergeRequest::new(
        args.merge_request_id,
        reference.project_id,
        reference.iid,
        diff_refs,
    ));

    let request = DiffsRequest::new(reference, mode, args.view);
    let context = RequestContext::new(None, true);

    match repository.diffs(&context, &request) {
        Ok(response) => {
            write_paged(|writer| PatchPrinter::new(writer, options).print_response(&response))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if error.is_not_found_externally() => {
            eprintln!("404 Not Found");
            Ok(ExitCode::FAILURE)
        }
        Err(error) => Err(error.into()),
    }
}
