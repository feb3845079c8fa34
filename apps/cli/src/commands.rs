//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use wikidex_extract::{ImageAsset, ImageKind, abilities, movedex, roster};
use wikidex_fetcher::WikiClient;
use wikidex_shared::{AppConfig, SpeciesEntry, init_config, load_config};
use wikidex_storage::DataStore;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// wikidex — scrape 52poke wiki into structured JSON records.
#[derive(Parser)]
#[command(
    name = "wikidex",
    version,
    about = "Scrape 52poke wiki species, ability, and move data into JSON files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output data directory (overrides the config file).
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Download artwork alongside the JSON records.
    #[arg(long, global = true)]
    pub images: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scrape one species page.
    Pokemon {
        /// Species name (simplified Chinese, as on the wiki).
        name: String,

        /// National pokédex index (e.g. 0025).
        #[arg(long)]
        index: String,

        /// English name, recorded alongside the Chinese one.
        #[arg(long)]
        name_en: Option<String>,
    },

    /// Scrape the national pokédex: the roster, then every species.
    Pokedex {
        /// Re-scrape species whose files already exist.
        #[arg(long)]
        force: bool,
    },

    /// Scrape the ability list and every ability's detail page.
    Abilities {
        /// Re-scrape abilities whose files already exist.
        #[arg(long)]
        force: bool,
    },

    /// Scrape the move list and every move's detail page.
    Moves {
        /// Re-scrape moves whose files already exist.
        #[arg(long)]
        force: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "wikidex=info",
        1 => "wikidex=debug",
        _ => "wikidex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Shared collaborators for every scrape command.
struct Context {
    client: WikiClient,
    store: DataStore,
    images: bool,
}

impl Context {
    fn new(cli: &Cli) -> Result<Self> {
        let config: AppConfig = load_config()?;
        let data_dir = cli
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.data_dir));
        Ok(Self {
            client: WikiClient::new(&config.wiki)?,
            store: DataStore::new(data_dir),
            images: cli.images || config.output.download_images,
        })
    }
}

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        };
    }

    let ctx = Context::new(&cli)?;
    match cli.command {
        Command::Pokemon {
            name,
            index,
            name_en,
        } => cmd_pokemon(&ctx, &name, &index, name_en.as_deref()).await,
        Command::Pokedex { force } => cmd_pokedex(&ctx, force).await,
        Command::Abilities { force } => cmd_abilities(&ctx, force).await,
        Command::Moves { force } => cmd_moves(&ctx, force).await,
        Command::Config { .. } => unreachable!("handled above"),
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

async fn cmd_pokemon(ctx: &Context, name: &str, index: &str, name_en: Option<&str>) -> Result<()> {
    let path = scrape_species(ctx, name, index, name_en).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn scrape_species(
    ctx: &Context,
    name: &str,
    index: &str,
    name_en: Option<&str>,
) -> Result<PathBuf> {
    let html = ctx.client.fetch_page(name).await?;
    let doc = wikidex_extract::parse_document(&html);
    let extract = wikidex_extract::species_record(&doc, name, index, name_en);

    let rel = DataStore::species_path(index, name);
    let path = ctx.store.write_json(&rel, &extract.record)?;

    if ctx.images {
        download_images(ctx, &extract.images).await;
    }
    Ok(path)
}

/// Image downloads are best-effort: a missing file never fails the
/// record that references it.
async fn download_images(ctx: &Context, assets: &[ImageAsset]) {
    for asset in assets {
        let rel = match asset.kind {
            ImageKind::Official => DataStore::official_image_path(&asset.file_name),
            ImageKind::Home => DataStore::home_image_path(&asset.file_name),
        };
        if ctx.store.exists(&rel) {
            continue;
        }
        match ctx.client.fetch_image(&asset.url).await {
            Ok(bytes) => {
                if let Err(error) = ctx.store.write_bytes(&rel, &bytes) {
                    warn!(file = %asset.file_name, %error, "failed to store image");
                }
            }
            Err(error) => {
                warn!(file = %asset.file_name, url = %asset.url, %error, "failed to fetch image");
            }
        }
    }
}

async fn cmd_pokedex(ctx: &Context, force: bool) -> Result<()> {
    let html = ctx.client.fetch_page(roster::SPECIES_LIST_PAGE).await?;
    let doc = wikidex_extract::parse_document(&html);
    let entries = roster::species_list(&doc);
    if entries.is_empty() {
        return Err(eyre!("species list page yielded no entries"));
    }

    ctx.store
        .write_json(&DataStore::species_list_path(), &entries)?;
    info!(count = entries.len(), "wrote species list");

    let bar = progress_bar(entries.len() as u64);
    let mut failures = 0usize;
    for SpeciesEntry {
        index,
        name,
        name_en,
    } in &entries
    {
        bar.set_message(name.clone());
        if !force && ctx.store.exists(&DataStore::species_path(index, name)) {
            bar.inc(1);
            continue;
        }
        if let Err(error) = scrape_species(ctx, name, index, Some(name_en.as_str())).await {
            failures += 1;
            warn!(species = %name, %error, "species scrape failed, continuing");
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "Pokedex done: {} species, {} failed.",
        entries.len(),
        failures
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Abilities and moves
// ---------------------------------------------------------------------------

async fn cmd_abilities(ctx: &Context, force: bool) -> Result<()> {
    let html = ctx.client.fetch_page(abilities::ABILITY_LIST_PAGE).await?;
    let doc = wikidex_extract::parse_document(&html);
    let entries = abilities::ability_list(&doc);
    if entries.is_empty() {
        return Err(eyre!("ability list page yielded no entries"));
    }

    ctx.store
        .write_json(&DataStore::ability_list_path(), &entries)?;
    info!(count = entries.len(), "wrote ability list");

    let bar = progress_bar(entries.len() as u64);
    let mut failures = 0usize;
    for entry in entries {
        bar.set_message(entry.name.clone());
        let rel = DataStore::ability_path(&entry.index, &entry.name);
        if !force && ctx.store.exists(&rel) {
            bar.inc(1);
            continue;
        }

        let title = abilities::detail_page_title(&entry.name);
        match ctx.client.fetch_page(&title).await {
            Ok(html) => {
                let doc = wikidex_extract::parse_document(&html);
                let name = entry.name.clone();
                let detail = abilities::ability_detail(&doc, entry);
                if let Err(error) = ctx.store.write_json(&rel, &detail) {
                    failures += 1;
                    warn!(ability = %name, %error, "ability write failed, continuing");
                }
            }
            Err(error) => {
                failures += 1;
                warn!(ability = %entry.name, %error, "ability scrape failed, continuing");
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("Abilities done, {failures} failed.");
    Ok(())
}

async fn cmd_moves(ctx: &Context, force: bool) -> Result<()> {
    let html = ctx.client.fetch_page(movedex::MOVE_LIST_PAGE).await?;
    let doc = wikidex_extract::parse_document(&html);
    let entries = movedex::move_list(&doc);
    if entries.is_empty() {
        return Err(eyre!("move list page yielded no entries"));
    }

    ctx.store.write_json(&DataStore::move_list_path(), &entries)?;
    info!(count = entries.len(), "wrote move list");

    let bar = progress_bar(entries.len() as u64);
    let mut failures = 0usize;
    for entry in entries {
        bar.set_message(entry.name.clone());
        let rel = DataStore::move_path(&entry.index, &entry.name);
        if !force && ctx.store.exists(&rel) {
            bar.inc(1);
            continue;
        }

        // A move's detail page lives under its plain name.
        match ctx.client.fetch_page(&entry.name).await {
            Ok(html) => {
                let doc = wikidex_extract::parse_document(&html);
                let name = entry.name.clone();
                let detail = movedex::move_detail(&doc, entry);
                if let Err(error) = ctx.store.write_json(&rel, &detail) {
                    failures += 1;
                    warn!(move_name = %name, %error, "move write failed, continuing");
                }
            }
            Err(error) => {
                failures += 1;
                warn!(move_name = %entry.name, %error, "move scrape failed, continuing");
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("Moves done, {failures} failed.");
    Ok(())
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("progress template is valid"),
    );
    bar
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
