use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use sync_base::areas::repository::{Repository, SyncConfig};
use sync_base::artifacts::commit_id::CommitId;
use sync_base::artifacts::step::Step;

#[derive(Parser)]
#[command(
    name = "sync-base",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Synchronize a fork's base commit with its upstream mainline",
    long_about = "This tool re-bases a fork's main branch onto a new upstream commit while \
    preserving the locally-carried commits. By default it syncs to the commit the tracked \
    downstream project currently depends on; --step moves the fork point along the upstream \
    history instead.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Move the fork point: a negative integer (go back), 0 (keep current), \
        a positive integer (go forward), or 'MAX' (latest tracking-branch commit)"
    )]
    step: Option<Step>,

    #[arg(long, default_value = ".", help = "Path to the repository to operate on")]
    repo: PathBuf,

    #[arg(
        long,
        help = "Use this commit as the reference instead of querying the contents API"
    )]
    reference: Option<String>,

    #[arg(long, default_value = "main", help = "Local branch carrying the downstream commits")]
    branch: String,

    #[arg(
        long,
        default_value = "llvm-main",
        help = "Local branch mirroring the upstream mainline"
    )]
    tracking_branch: String,

    #[arg(long, default_value = "llvm-upstream", help = "Name of the upstream remote")]
    upstream_remote: String,

    #[arg(
        long,
        default_value = "git@github.com:llvm/llvm-project.git",
        help = "URL the upstream remote is added with when absent"
    )]
    upstream_url: String,

    #[arg(
        long,
        default_value = "main",
        help = "Branch name of the mainline on the upstream remote"
    )]
    upstream_mainline: String,

    #[arg(long, default_value = "origin", help = "Remote the fork lives on")]
    origin_remote: String,

    #[arg(long, help = "Substring the origin URL must contain")]
    origin_marker: Option<String>,

    #[arg(
        long,
        default_value = "https://api.github.com/repos/llvm/circt/contents/",
        help = "Contents-listing API endpoint queried for the reference commit"
    )]
    api_url: String,

    #[arg(
        long,
        default_value = "llvm",
        help = "Listing entry whose sha is the reference commit"
    )]
    api_entry: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SyncConfig {
        branch: cli.branch,
        tracking_branch: cli.tracking_branch,
        upstream_remote: cli.upstream_remote,
        upstream_url: cli.upstream_url,
        upstream_mainline: cli.upstream_mainline,
        origin_remote: cli.origin_remote,
        origin_marker: cli.origin_marker,
        api_url: cli.api_url,
        api_entry: cli.api_entry,
    };

    let reference = cli.reference.map(CommitId::try_parse).transpose()?;

    let repository = Repository::new(&cli.repo, config, Box::new(std::io::stdout()))?;
    repository.sync(cli.step, reference)?;

    Ok(())
}
