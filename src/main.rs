use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{env, fs, path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

use taxon_svg_style::{
    batch::{process_folder, BatchOptions},
    svg_text::{TextElementSelector, SVG_NAMESPACE},
    taxon_label::{
        genus::{
            http::{HttpGenusLookup, DEFAULT_ENDPOINT, DEFAULT_QUERY_PARAM, DEFAULT_TIMEOUT},
            GenusLookup,
        },
        tokenizer::{Tokenizer, TokenizerOptions},
    },
};

struct Args {
    input_path: String,
    output_path: Option<String>,
    extension: String,
    namespace: String,
    tag: String,
    verify_genera: bool,
    endpoint: String,
    query_param: String,
    timeout: Duration,
    allow_type_species: bool,
    keep_going: bool,
    report_path: Option<String>,
    quiet: bool,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt("e", "extension", "input file extension (default: svg)", "EXT");
    opts.optopt("", "namespace", "namespace of text elements", "URI");
    opts.optopt("", "tag", "local name of text elements (default: text)", "NAME");
    opts.optflag("", "verify-genera", "italicize only genera found by the remote lookup");
    opts.optopt("", "endpoint", "genus lookup endpoint", "URL");
    opts.optopt("", "query-param", "genus lookup query parameter (default: q)", "NAME");
    opts.optopt("", "timeout", "genus lookup timeout in seconds (default: 10)", "SECS");
    opts.optflag("", "allow-type-species", "let words containing \"type\" be epithets");
    opts.optflag("", "keep-going", "continue with the next file when one fails");
    opts.optopt("", "report", "write a JSON report", "FILE");
    opts.optflag("q", "quiet", "hide the progress bar");
    opts.optflag("h", "help", "print this help");
    opts
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = options();

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("help") {
        let brief = "Usage: taxon-svg-style [options] INPUT_DIR [OUTPUT_DIR]";
        print!("{}", opts.usage(brief));
        return Ok(None);
    }

    let input_path = matches
        .free
        .first()
        .context("path to input directory is required")?
        .clone();
    let output_path = matches.free.get(1).cloned();

    let timeout = match matches.opt_get::<u64>("timeout").context("Invalid --timeout")? {
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_TIMEOUT,
    };

    Ok(Some(Args {
        input_path,
        output_path,
        extension: matches.opt_str("extension").unwrap_or_else(|| "svg".to_owned()),
        namespace: matches
            .opt_str("namespace")
            .unwrap_or_else(|| SVG_NAMESPACE.to_owned()),
        tag: matches.opt_str("tag").unwrap_or_else(|| "text".to_owned()),
        verify_genera: matches.opt_present("verify-genera"),
        endpoint: matches
            .opt_str("endpoint")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
        query_param: matches
            .opt_str("query-param")
            .unwrap_or_else(|| DEFAULT_QUERY_PARAM.to_owned()),
        timeout,
        allow_type_species: matches.opt_present("allow-type-species"),
        keep_going: matches.opt_present("keep-going"),
        report_path: matches.opt_str("report"),
        quiet: matches.opt_present("quiet"),
    }))
}

fn main() -> Result<()> {
    init_tracing();

    let Some(args) = get_args()? else {
        return Ok(());
    };

    let input_dir = PathBuf::from(&args.input_path);
    ensure!(
        input_dir.is_dir(),
        "Directory not found: {}",
        input_dir.display()
    );

    let options = BatchOptions {
        extension: args.extension.trim_start_matches('.').to_owned(),
        output_dir: args.output_path.as_ref().map(PathBuf::from),
        keep_going: args.keep_going,
        selector: TextElementSelector::new(&args.namespace, &args.tag),
        tokenizer: Tokenizer::new(TokenizerOptions {
            exclude_type_words: !args.allow_type_species,
        }),
    };

    let lookup = if args.verify_genera {
        let lookup = HttpGenusLookup::new(&args.endpoint, &args.query_param, args.timeout);
        info!("Verifying genera against {}", lookup.endpoint());
        Some(lookup)
    } else {
        None
    };

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar(0)?
    };

    let report = process_folder(
        &input_dir,
        &options,
        lookup.as_ref().map(|l| l as &dyn GenusLookup),
        &pb,
    )?;

    if let Some(report_path) = &args.report_path {
        fs::write(report_path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write report: {}", report_path))?;
    }

    info!(
        "Finished: {} processed, {} failed",
        report.processed, report.failed
    );
    ensure!(report.failed == 0, "{} file(s) failed", report.failed);

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )?
        .progress_chars("#-"),
    );
    Ok(pb)
}
