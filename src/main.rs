// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use cinematch::cli::commands::{Cli, Command, FilterFlags};
use cinematch::cli::output;
use cinematch::config::{Config, Credentials};
use cinematch::engine::Session;
use cinematch::operations::{self, FilterArgs};
use cinematch::source::{CatalogLoader, DataSource, LoadedCatalog, SourceKind};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the JSON results.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

/// Everything a command needs: config, the loaded catalog and output style.
struct Context {
    config: Config,
    loaded: LoadedCatalog,
    pretty: bool,
}

impl Context {
    fn print<T: Serialize>(&self, value: &T) {
        print_json(value, self.pretty);
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    if pretty {
        println!("{}", output::format_json_pretty(value));
    } else {
        println!("{}", output::format_json(value));
    }
}

fn run(cli: Cli) -> CmdResult {
    match &cli.command {
        Command::Stats => cmd_stats(&load_context(&cli)?),
        Command::Genres => cmd_genres(&load_context(&cli)?),
        Command::Filter { filters, limit } => cmd_filter(&load_context(&cli)?, filters, *limit),
        Command::Pick {
            filters,
            seed,
            text,
        } => cmd_pick(&load_context(&cli)?, filters, *seed, *text),
        Command::Links { title } => {
            let config = Config::from_cwd().map_err(map_err)?;
            cmd_links(title, cli.pretty || config.pretty_output())
        }
    }
}

fn load_context(cli: &Cli) -> Result<Context, Box<dyn std::fmt::Display>> {
    let config = Config::from_cwd().map_err(map_err)?;
    let requested = cli
        .source
        .as_deref()
        .map(str::parse::<SourceKind>)
        .transpose()
        .map_err(map_err)?;
    let source = DataSource::resolve(
        requested,
        cli.data_dir.clone(),
        &config,
        Credentials::from_env().is_some(),
    )
    .map_err(map_err)?;
    tracing::debug!(?source, "resolved data source");

    let mut loader = CatalogLoader::new(config.settings.dataset.rating_scale);
    let loaded = loader.load(&source, &config);
    if let Some(warning) = &loaded.warning {
        eprintln!("warning: {warning}");
    }

    let pretty = cli.pretty || config.pretty_output();
    Ok(Context {
        config,
        loaded,
        pretty,
    })
}

fn filter_args(flags: &FilterFlags) -> FilterArgs {
    FilterArgs {
        genre: flags.genre.clone(),
        min_rating: flags.min_rating,
        from_year: flags.from_year,
        to_year: flags.to_year,
    }
}

fn cmd_stats(ctx: &Context) -> CmdResult {
    ctx.print(&operations::catalog_stats(&ctx.loaded));
    Ok(())
}

fn cmd_genres(ctx: &Context) -> CmdResult {
    ctx.print(&operations::list_genres(&ctx.loaded.catalog));
    Ok(())
}

fn cmd_filter(ctx: &Context, flags: &FilterFlags, limit: usize) -> CmdResult {
    let catalog = &ctx.loaded.catalog;
    let spec = operations::build_filter_spec(
        catalog,
        &filter_args(flags),
        &ctx.config.settings.filters,
    )
    .map_err(map_err)?;
    ctx.print(&operations::run_filter(catalog, &spec, limit));
    Ok(())
}

fn cmd_pick(ctx: &Context, flags: &FilterFlags, seed: Option<u64>, text: bool) -> CmdResult {
    let catalog = &ctx.loaded.catalog;
    let spec = operations::build_filter_spec(
        catalog,
        &filter_args(flags),
        &ctx.config.settings.filters,
    )
    .map_err(map_err)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (_session, result) = operations::pick(Session::new(), catalog, &spec, &mut rng);

    if text {
        print!("{}", output::render_card(&result));
    } else {
        #[derive(Serialize)]
        struct PickOutput<'a> {
            #[serde(flatten)]
            result: &'a operations::PickResult,
            #[serde(skip_serializing_if = "Option::is_none")]
            warning: Option<&'a str>,
        }

        ctx.print(&PickOutput {
            result: &result,
            warning: ctx.loaded.warning.as_deref(),
        });
    }
    Ok(())
}

fn cmd_links(title: &str, pretty: bool) -> CmdResult {
    print_json(&operations::search_links(title), pretty);
    Ok(())
}
