use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rakuten_product_summary::archiver::{self, DEFAULT_SESSION_FILE, Session};
use rakuten_product_summary::config::{
    DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use rakuten_product_summary::display::display_entry;
use rakuten_product_summary::markdown::{DOCUMENT_CONTENT_TYPE, DOCUMENT_FILE_NAME};
use rakuten_product_summary::parser::DEFAULT_MARKETPLACE_DOMAIN;
use rakuten_product_summary::resolver::split_urls;
use rakuten_product_summary::{Config, LookupMode, Resolver, render_html, render_markdown};

#[derive(Debug, Parser)]
#[command(name = "rakuten-summary")]
#[command(about = "楽天商品 比較まとめツール: summarize Rakuten product URLs as Markdown and HTML")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "RAKUTEN_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Where the last generated batch is kept.
    #[arg(long, env = "RAKUTEN_SESSION_FILE", default_value = DEFAULT_SESSION_FILE, global = true)]
    session: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up each URL and write the Markdown summary.
    Generate(GenerateArgs),
    /// Print the HTML fragment for the last generated batch.
    Html(HtmlArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Product page URLs. Read from --input or stdin when omitted.
    urls: Vec<String>,

    /// File with one URL per line.
    #[arg(long, conflicts_with = "urls")]
    input: Option<PathBuf>,

    #[arg(long, default_value = DOCUMENT_FILE_NAME)]
    markdown_out: PathBuf,

    /// Also print the HTML fragment.
    #[arg(long)]
    html: bool,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Debug, Args)]
struct ApiArgs {
    #[arg(long, env = "RAKUTEN_APPLICATION_ID", hide_env_values = true)]
    application_id: String,

    #[arg(long, env = "RAKUTEN_LOOKUP_MODE", value_enum, default_value = "item-code")]
    lookup_mode: LookupMode,

    #[arg(long, env = "RAKUTEN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, env = "RAKUTEN_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long, env = "RAKUTEN_MARKETPLACE_DOMAIN", default_value = DEFAULT_MARKETPLACE_DOMAIN)]
    marketplace_domain: String,

    #[arg(long, env = "RAKUTEN_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl ApiArgs {
    fn to_config(&self) -> Result<Config> {
        let config = Config::builder(&self.application_id)
            .lookup_mode(self.lookup_mode)
            .timeout_secs(self.timeout_secs)
            .api_base(&self.api_base)
            .marketplace_domain(&self.marketplace_domain)
            .user_agent(&self.user_agent)
            .build()?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct HtmlArgs {
    /// Write the fragment to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => generate(&args, &cli.session),
        Commands::Html(args) => html(&args, &cli.session),
    }
}

fn generate(args: &GenerateArgs, session_path: &Path) -> Result<()> {
    let urls = read_urls(args)?;
    if urls.is_empty() {
        bail!("URLを入力してください");
    }

    let config = args.api.to_config()?;
    let resolver = Resolver::new(&config)?;
    tracing::info!(count = urls.len(), mode = ?resolver.mode(), "resolving batch");

    let entries = resolver.resolve_batch(&urls);
    for (idx, entry) in entries.iter().enumerate() {
        println!("{}", display_entry(idx + 1, entry));
    }

    let markdown = render_markdown(&entries);
    archiver::write_text(&args.markdown_out, &markdown)?;
    tracing::info!(
        path = %args.markdown_out.display(),
        content_type = DOCUMENT_CONTENT_TYPE,
        "wrote summary document"
    );
    println!("---");
    println!("📄 Markdown記事を保存しました: {}", args.markdown_out.display());

    let session = Session::new(entries, markdown);
    archiver::save_session(&session, session_path)?;

    if args.html {
        if session.has_products() {
            print!("{}", render_html(&session.entries));
        } else {
            tracing::warn!("no resolved products, skipping HTML fragment");
        }
    }
    Ok(())
}

fn html(args: &HtmlArgs, session_path: &Path) -> Result<()> {
    let session = archiver::load_session(session_path)?;
    if !session.has_products() {
        bail!("HTMLに出力できる商品がありません。先に generate を実行してください");
    }

    let fragment = render_html(&session.entries);
    match &args.out {
        Some(path) => {
            archiver::write_text(path, &fragment)?;
            println!("💾 HTML記事を保存しました: {}", path.display());
        }
        None => {
            eprintln!("### 💾 コピーしてブログに貼り付けてください");
            print!("{fragment}");
        }
    }
    Ok(())
}

fn read_urls(args: &GenerateArgs) -> Result<Vec<String>> {
    let text = if !args.urls.is_empty() {
        args.urls.join("\n")
    } else if let Some(path) = &args.input {
        std::fs::read_to_string(path)?
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };
    Ok(split_urls(&text))
}
