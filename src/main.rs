use std::time::Instant;

use anyhow::{Result, bail};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use env_logger::Env;

use injector_catalog::Catalog;
use injector_catalog::html::render_page;
use injector_catalog::source::{DataSource, FsSource};
use injector_catalog::view::{
    CapacityUnit, CatalogView, FileTermStore, MemoryTermStore, NoClipboard, TermStores,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Unit {
    Cc,
    Lb,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Search fuel-injector offset data", long_about = None)]
struct Cli {
    /// Injector dataset (JSON)
    #[arg(value_name = "DATA_FILE")]
    data_file: Utf8PathBuf,

    /// Search term; space-separated words must all match
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Capacity unit to display
    #[arg(long, value_enum, default_value_t = Unit::Cc)]
    unit: Unit,

    /// Include the offsets table of every card
    #[arg(long)]
    expand: bool,

    /// File remembering the last search term between runs
    #[arg(long, value_name = "FILE")]
    state: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Open the interactive viewer
    #[cfg(feature = "egui")]
    #[arg(long)]
    gui: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    // The explicit search argument takes precedence over the remembered one.
    let mut stores = TermStores::new().with(MemoryTermStore::new(cli.search.clone()));
    if let Some(path) = &cli.state {
        stores = stores.with(FileTermStore::new(path));
    }

    #[cfg(feature = "egui")]
    if cli.gui {
        return injector_catalog::egui_app::run_viewer(cli.data_file.clone(), stores);
    }

    let mut source = FsSource::new(&cli.data_file);
    let catalog = match Catalog::load(&mut source) {
        Ok(c) => c,
        Err(e) => bail!("{} ({})", e.user_message(), e),
    };
    match source.last_updated() {
        Ok(date) => log::info!("{} last updated {}", cli.data_file, date),
        Err(e) => log::warn!("Last-updated lookup failed: {:#}", e),
    }

    let now = Instant::now();
    let mut view = CatalogView::new(Box::new(NoClipboard), stores);
    view.finish_load(Ok(catalog), now);
    view.persist_term();

    let ids: Vec<_> = view.renderer().card_ids().collect();
    if cli.unit == Unit::Lb {
        if let Some(first) = ids.first() {
            view.toggle_unit(*first)?;
        }
    }
    if cli.expand {
        for id in &ids {
            view.toggle_expanded(*id)?;
        }
    }

    if let Some(notice) = view.notice(now) {
        eprintln!("{}", notice.message);
    }

    let views: Vec<_> = view.renderer().views().into_iter().map(|(_, v)| v).collect();
    match cli.format {
        Format::Text => {
            for v in &views {
                print!("{}", v);
            }
            println!("{}", view.summary());
        }
        Format::Json => {
            let unit = match cli.unit {
                Unit::Cc => CapacityUnit::Cc,
                Unit::Lb => CapacityUnit::Lb,
            };
            let doc = serde_json::json!({
                "summary": view.summary(),
                "unit": unit,
                "cards": views,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Format::Html => print!("{}", render_page(&views, &view.summary())),
    }
    Ok(())
}
