//! Command-line interface for rolling tables and composing pages in a local store

use crate::io::configuration::{
    CHECK_SIGNIFICANCE, DEFAULT_CHECK_DRAWS, DEFAULT_ROLL_COUNT, DEFAULT_SEED, DEFAULT_STORE_DIR,
    LOCAL_OWNER,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::layout::content::{RollResults, resolve_display_content, roll_all};
use crate::layout::engine::{find_free_slot, place_box, update_box_content};
use crate::layout::geometry::Rect;
use crate::layout::occupancy::{box_label, render_ascii};
use crate::layout::style::resolve_effective_style;
use crate::model::page::{BoxContentUpdate, FieldUpdate, Page};
use crate::model::palette::extract_palette;
use crate::model::table::{RollTable, TableId, parse_items};
use crate::sampling::random::SeededSource;
use crate::sampling::sampler::WeightedSampler;
use crate::sampling::statistics::{chi_square, tally_rolls};
use crate::store::access::{ensure_owner, ensure_visible, save_as};
use crate::store::file::{JsonFileStorage, read_json};
use crate::store::{CallerContext, Storage};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "rollpage")]
#[command(
    author,
    version,
    about = "Roll on weighted tables and lay out generator pages"
)]
/// Command-line arguments for the rollpage tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log layout and storage operations
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands of the rollpage tool
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Roll on a table file (`.json` record or `item:weight` text)
    Roll {
        /// Table file
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// Random seed for reproducible rolls
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Number of rolls
        #[arg(short = 'n', long, default_value_t = DEFAULT_ROLL_COUNT)]
        count: usize,
    },

    /// Roll many times and test the frequencies against the weights
    Check {
        /// Table file
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// Random seed for reproducible rolls
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Number of draws
        #[arg(short, long, default_value_t = DEFAULT_CHECK_DRAWS)]
        draws: usize,
    },

    /// Import a table file into the store
    Import {
        /// Table file
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// Store directory
        #[arg(long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,

        /// Owning user
        #[arg(long)]
        owner: String,

        /// Table name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,

        /// Tags to attach
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Create an empty page in the store
    NewPage {
        /// Page name
        name: String,

        /// Page slug
        slug: String,

        /// Store directory
        #[arg(long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,

        /// Owning user
        #[arg(long)]
        owner: String,

        /// Free text containing `#RRGGBB` colors to use as the palette
        #[arg(long)]
        palette: Option<String>,

        /// Draw box colors at random from the palette
        #[arg(long)]
        random_colors: bool,

        /// Hide the page from other users
        #[arg(long)]
        private: bool,
    },

    /// Add a box to a page, at a given spot or the first free one
    Place {
        /// Page slug
        slug: String,

        /// Store directory
        #[arg(long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,

        /// Acting user
        #[arg(long)]
        owner: String,

        /// Box width in cells
        #[arg(short = 'W', long, default_value_t = 1)]
        width: u32,

        /// Box height in cells
        #[arg(short = 'H', long, default_value_t = 1)]
        height: u32,

        /// Column of the top-left cell
        #[arg(short, long, requires = "y")]
        x: Option<u32>,

        /// Row of the top-left cell
        #[arg(short, long, requires = "x")]
        y: Option<u32>,

        /// Table to bind
        #[arg(long)]
        table: Option<TableId>,

        /// Box title
        #[arg(long)]
        title: Option<String>,
    },

    /// Show a page: its grid, and each box rolled, styled and titled
    Show {
        /// Page slug
        slug: String,

        /// Store directory
        #[arg(long, default_value = DEFAULT_STORE_DIR)]
        store: PathBuf,

        /// Viewing user (anonymous when absent)
        #[arg(long = "as")]
        viewer: Option<String>,

        /// Random seed for reproducible rolls
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one parsed command, writing its report to an output stream
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if loading, validation, rolling, placement or
    /// writing the report fails
    pub fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        match self.cli.command.clone() {
            Command::Roll { table, seed, count } => Self::roll(out, &table, seed, count),
            Command::Check { table, seed, draws } => self.check(out, &table, seed, draws),
            Command::Import {
                table,
                store,
                owner,
                name,
                tags,
            } => Self::import(out, &table, store, &owner, name, tags),
            Command::NewPage {
                name,
                slug,
                store,
                owner,
                palette,
                random_colors,
                private,
            } => {
                let mut page = Page::new(name, slug, owner.as_str());
                page.is_public = !private;
                if let Some(text) = palette {
                    page.style.apply_palette(extract_palette(&text));
                }
                page.style.use_random_colors = random_colors;

                let mut storage = JsonFileStorage::new(store);
                let id = page.id;
                save_as(&mut storage, &CallerContext::user(owner), page.into())?;
                info!(%id, "created page");
                write_line(out, &id.to_string())
            }
            Command::Place {
                slug,
                store,
                owner,
                width,
                height,
                x,
                y,
                table,
                title,
            } => {
                let mut storage = JsonFileStorage::new(store);
                let mut page = storage.find_page_by_slug(&slug)?;
                let caller = CallerContext::user(owner);
                if let Some(table_id) = table {
                    ensure_owner(&caller, &storage.load_table(table_id)?)?;
                }

                let rect = match (x, y) {
                    (Some(x), Some(y)) => Rect::new(x, y, width, height),
                    _ => find_free_slot(&page, width, height).ok_or_else(|| {
                        invalid_parameter(
                            "size",
                            &format!("{width}x{height}"),
                            &"no free space on the page",
                        )
                    })?,
                };
                let box_id = place_box(&mut page, rect)?.id().to_string();
                let update = BoxContentUpdate {
                    table_ref: table.map_or(FieldUpdate::Keep, FieldUpdate::Set),
                    custom_title: title.map_or(FieldUpdate::Keep, FieldUpdate::Set),
                    ..BoxContentUpdate::default()
                };
                update_box_content(&mut page, &box_id, update)?;

                save_as(&mut storage, &caller, page.into())?;
                write_line(out, &format!("{box_id} {rect}"))
            }
            Command::Show {
                slug,
                store,
                viewer,
                seed,
            } => Self::show(out, &JsonFileStorage::new(store), &slug, viewer, seed),
        }
    }

    fn roll(out: &mut dyn Write, path: &Path, seed: u64, count: usize) -> Result<()> {
        let table = load_table_file(path)?;
        let mut sampler = WeightedSampler::new(SeededSource::new(seed));
        for item in sampler.roll_many(&table.items, count)? {
            write_line(out, &item.text)?;
        }
        Ok(())
    }

    fn check(&self, out: &mut dyn Write, path: &Path, seed: u64, draws: usize) -> Result<()> {
        let table = load_table_file(path)?;
        let progress =
            ProgressManager::for_draws(&table.name, draws, self.cli.should_show_progress());
        let mut source = SeededSource::new(seed);

        let counts = tally_rolls(&table.items, draws, &mut source, |done| {
            progress.update(done);
        })?;
        let fit = chi_square(&counts, &table.items)?;
        progress.finish("done");

        let total_weight = table.total_weight();
        for (item, count) in table.items.iter().zip(&counts) {
            let expected = item.weight / total_weight;
            let observed = if draws == 0 {
                0.0
            } else {
                *count as f64 / draws as f64
            };
            write_line(
                out,
                &format!("{:<30} expected {expected:.4} observed {observed:.4}", item.text),
            )?;
        }

        let verdict = if fit.passes(CHECK_SIGNIFICANCE) {
            "PASS"
        } else {
            "FAIL"
        };
        write_line(
            out,
            &format!(
                "chi2 = {:.3} (df {}), p = {:.4}: {verdict}",
                fit.statistic, fit.degrees_of_freedom, fit.p_value
            ),
        )
    }

    fn import(
        out: &mut dyn Write,
        path: &Path,
        store: PathBuf,
        owner: &str,
        name: Option<String>,
        tags: Vec<String>,
    ) -> Result<()> {
        let mut table = load_table_file(path)?;
        table.owner = owner.to_string();
        if let Some(name) = name {
            table.name = name;
        }
        table.tags = tags;

        let id = table.id;
        let mut storage = JsonFileStorage::new(store);
        save_as(&mut storage, &CallerContext::user(owner), table.into())?;
        info!(%id, "imported table");
        write_line(out, &id.to_string())
    }

    fn show(
        out: &mut dyn Write,
        storage: &JsonFileStorage,
        slug: &str,
        viewer: Option<String>,
        seed: u64,
    ) -> Result<()> {
        let page = storage.find_page_by_slug(slug)?;
        let caller = viewer.map_or_else(CallerContext::anonymous, CallerContext::user);
        ensure_visible(&caller, &page)?;

        let tables = storage.load_page_tables(&page)?;
        let mut source = SeededSource::new(seed);
        let mut results = RollResults::new();
        roll_all(&page, &tables, &mut results, &mut source);

        write_line(out, &format!("{} ({})", page.name, page.slug))?;
        write_line(out, &render_ascii(&page))?;

        for (index, page_box) in page.boxes().iter().enumerate() {
            let style = resolve_effective_style(&page, page_box, &mut source);
            let content = resolve_display_content(page_box, &results);
            write_line(
                out,
                &format!(
                    "{} {} {} bg {} text {} border {} {:?}: {} / {}",
                    box_label(index),
                    page_box.id(),
                    page_box.rect(),
                    style.background_color,
                    style.text_color,
                    style.border_color,
                    content.arrangement(),
                    content.title.as_deref().unwrap_or("-"),
                    content.body.as_deref().unwrap_or("-"),
                ),
            )?;
        }
        Ok(())
    }
}

/// Load a table from a `.json` record or an `item:weight` text file
///
/// Text tables are named after the file stem and owned by the local user.
///
/// # Errors
///
/// Returns `FileSystem`, `Serialization` or `InvalidTableLine` on bad input
pub fn load_table_file(path: &Path) -> Result<RollTable> {
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        let table: RollTable = read_json(path)?;
        table.validate()?;
        return Ok(table);
    }

    let text =
        std::fs::read_to_string(path).map_err(|error| file_system_error(path, "read", error))?;
    let name = path
        .file_stem()
        .map_or_else(|| "table".to_string(), |stem| stem.to_string_lossy().to_string());
    let table = RollTable::new(name, LOCAL_OWNER).with_items(parse_items(&text)?);
    table.validate()?;
    Ok(table)
}

fn write_line(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(|error| file_system_error("<output>", "write", error))
}
