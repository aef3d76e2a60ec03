use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    svg_text::{rewrite_text_elements, RewriteStats, TextElementSelector},
    taxon_label::{
        genus::{AcceptAllGenera, CachedGenusValidator, GenusLookup, GenusValidator},
        tokenizer::Tokenizer,
    },
};

pub const OUTPUT_SUFFIX: &str = "_output";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub extension: String,
    // None なら入力ファイルと同じディレクトリに書き出す
    pub output_dir: Option<PathBuf>,
    // false なら最初の失敗で中断する
    pub keep_going: bool,
    pub selector: TextElementSelector,
    pub tokenizer: Tokenizer,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            extension: "svg".to_owned(),
            output_dir: None,
            keep_going: false,
            selector: TextElementSelector::default(),
            tokenizer: Tokenizer::default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: Option<RewriteStats>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub processed: usize,
    pub failed: usize,
}

// 拡張子が一致し，過去の出力 (*_output.ext) でないファイルを名前順に
pub fn list_input_files(input_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read directory: {}", input_dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", input_dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }

        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        let is_output = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(OUTPUT_SUFFIX));

        if has_extension && !is_output {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

// tree.svg -> tree_output.svg
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

pub fn process_file(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    validator: &mut dyn GenusValidator,
) -> Result<RewriteStats> {
    let markup = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let rewritten =
        rewrite_text_elements(&markup, &options.selector, &options.tokenizer, validator)
            .with_context(|| format!("Failed to rewrite {}", input.display()))?;

    fs::write(output, rewritten.markup)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(rewritten.stats)
}

/// Processes every matching file in `input_dir`, one after another.
///
/// With a `lookup`, each file gets its own [`CachedGenusValidator`], so a genus is looked
/// up at most once per file. Without one every genus is accepted.
pub fn process_folder(
    input_dir: &Path,
    options: &BatchOptions,
    lookup: Option<&dyn GenusLookup>,
    progress: &ProgressBar,
) -> Result<BatchReport> {
    let inputs = list_input_files(input_dir, &options.extension)?;
    info!(
        "{} .{} file(s) found in {}",
        inputs.len(),
        options.extension,
        input_dir.display()
    );

    if let Some(output_dir) = &options.output_dir {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
    }

    progress.set_length(inputs.len() as u64);

    let mut report = BatchReport::default();
    for input in inputs {
        let output = output_path_for(&input, options.output_dir.as_deref());
        debug!("{} -> {}", input.display(), output.display());

        let mut validator: Box<dyn GenusValidator + '_> = match lookup {
            Some(lookup) => Box::new(CachedGenusValidator::new(lookup)),
            None => Box::new(AcceptAllGenera),
        };

        match process_file(&input, &output, options, validator.as_mut()) {
            Ok(stats) => {
                report.processed += 1;
                report.files.push(FileReport {
                    input,
                    output,
                    stats: Some(stats),
                    error: None,
                });
            }
            Err(err) if options.keep_going => {
                warn!("Skipped: {:#}", err);
                report.failed += 1;
                report.files.push(FileReport {
                    input,
                    output,
                    stats: None,
                    error: Some(format!("{:#}", err)),
                });
            }
            Err(err) => return Err(err),
        }

        progress.inc(1);
    }
    progress.finish();

    Ok(report)
}
