use std::{collections::BTreeMap, ops::Range};

use anyhow::{Context, Result};
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;

use crate::{
    taxon_label::{
        genus::GenusValidator,
        run::Run,
        styler::style_tokenized_label,
        tokenizer::Tokenizer,
    },
    utility::str::{qualified_name_prefix, start_tag_end},
};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

// 書き換える要素 (既定では {http://www.w3.org/2000/svg}text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElementSelector {
    pub namespace: String,
    pub local_name: String,
}

impl TextElementSelector {
    pub fn new(namespace: &str, local_name: &str) -> Self {
        TextElementSelector {
            namespace: namespace.to_owned(),
            local_name: local_name.to_owned(),
        }
    }

    fn matches(&self, node: Node) -> bool {
        node.is_element()
            && node.tag_name().name() == self.local_name
            && node.tag_name().namespace() == Some(self.namespace.as_str())
    }
}

impl Default for TextElementSelector {
    fn default() -> Self {
        Self::new(SVG_NAMESPACE, "text")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteStats {
    pub text_elements: usize,
    pub taxon_matches: usize,
    pub genera: BTreeMap<String, bool>,
}

#[derive(Debug)]
pub struct RewrittenDocument {
    pub markup: String,
    pub stats: RewriteStats,
}

/// Rewrites the content of every selected text element into styled `tspan` runs.
///
/// Only the content between the element's start and end tags is replaced, so the
/// element's own attributes (`x`, `y`, `transform`, ...) and everything outside the
/// selected elements are kept byte for byte. The label is the concatenation of all
/// text below the element; earlier `tspan` children are dropped, which makes a second
/// pass over an already rewritten document produce the same runs again. The replaced
/// range is found in the element's own source text, so CDATA sections and entity
/// references inside the element are replaced along with the rest of its content.
pub fn rewrite_text_elements(
    markup: &str,
    selector: &TextElementSelector,
    tokenizer: &Tokenizer,
    validator: &mut dyn GenusValidator,
) -> Result<RewrittenDocument> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document =
        Document::parse_with_options(markup, options).context("Failed to parse document")?;

    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;
    let mut stats = RewriteStats::default();

    for node in document.descendants() {
        if !selector.matches(node) || node.ancestors().skip(1).any(|a| selector.matches(a)) {
            continue;
        }

        // 開始タグの直後から終了タグの直前までを置き換える
        let element = node.range();
        let source = &markup[element.clone()];
        let Some(content) = element_content(source) else {
            // 空要素 <text/> はそのまま
            continue;
        };
        let content = element.start + content.start..element.start + content.end;
        if content.is_empty() || content.start < cursor {
            continue;
        }

        let label: String = node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        if label.trim().is_empty() {
            continue;
        }

        let tokenized = tokenizer.tokenize(&label);
        let styled = style_tokenized_label(&tokenized, validator);

        let tspan = match qualified_name_prefix(source) {
            Some(prefix) => format!("{}:tspan", prefix),
            None => "tspan".to_owned(),
        };

        out.push_str(&markup[cursor..content.start]);
        write_runs(&mut out, &tspan, &styled.runs);
        cursor = content.end;

        stats.text_elements += 1;
        stats.taxon_matches += tokenized.taxa().count();
        for verdict in styled.genera {
            stats.genera.insert(verdict.genus, verdict.valid);
        }
    }

    out.push_str(&markup[cursor..]);

    Ok(RewrittenDocument { markup: out, stats })
}

// 要素の原文のうち開始タグと終了タグに挟まれた範囲
fn element_content(source: &str) -> Option<Range<usize>> {
    let start = start_tag_end(source)?;
    let end = source.rfind("</")?;
    (start <= end).then_some(start..end)
}

pub fn write_runs(out: &mut String, tspan: &str, runs: &[Run]) {
    for run in runs {
        out.push('<');
        out.push_str(tspan);
        if let Some(css) = run.style.css() {
            out.push_str(" style=\"");
            out.push_str(css);
            out.push('"');
        }
        out.push('>');
        out.push_str(&htmlize::escape_text(run.text.as_str()));
        out.push_str("</");
        out.push_str(tspan);
        out.push('>');
    }
}
