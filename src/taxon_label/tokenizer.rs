use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{taxon_label::type_word::is_type_word, utility::str::normalize_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Sp,  // 種未同定
    Cf,  // confer
    Aff, // affinis
}

impl Qualifier {
    // "sp" "sp." "CF." 等
    pub fn of(word: &str) -> Option<Self> {
        match word.strip_suffix('.').unwrap_or(word).to_lowercase().as_str() {
            "sp" => Some(Self::Sp),
            "cf" => Some(Self::Cf),
            "aff" => Some(Self::Aff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonPart {
    Genus,
    Qualifier,
    Species,
    Voucher,
}

// 各 span は正規化後のラベル中のバイト位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonMatch {
    pub genus: Range<usize>,
    pub qualifier: Option<(Qualifier, Range<usize>)>,
    pub species: Option<Range<usize>>,
    pub voucher: Option<Range<usize>>,
}

impl TaxonMatch {
    pub fn parts(&self) -> Vec<(TaxonPart, Range<usize>)> {
        let mut parts = vec![(TaxonPart::Genus, self.genus.clone())];
        if let Some((_, span)) = &self.qualifier {
            parts.push((TaxonPart::Qualifier, span.clone()));
        }
        if let Some(span) = &self.species {
            parts.push((TaxonPart::Species, span.clone()));
        }
        if let Some(span) = &self.voucher {
            parts.push((TaxonPart::Voucher, span.clone()));
        }
        parts
    }

    pub fn span(&self) -> Range<usize> {
        let end = self
            .voucher
            .as_ref()
            .or(self.species.as_ref())
            .or(self.qualifier.as_ref().map(|(_, span)| span))
            .unwrap_or(&self.genus)
            .end;
        self.genus.start..end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(Range<usize>),
    Taxon(TaxonMatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLabel {
    text: String,
    segments: Vec<Segment>,
}

impl TokenizedLabel {
    // "_" を空白にしたあとのラベル
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn text_of(&self, span: &Range<usize>) -> &str {
        &self.text[span.clone()]
    }

    pub fn taxa(&self) -> impl Iterator<Item = &TaxonMatch> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Taxon(taxon) => Some(taxon),
            Segment::Plain(_) => None,
        })
    }
}

// 空白区切りの単語．core は前後の記号 ("(" "," "'" 等) を除いた部分
#[derive(Debug, Clone)]
struct Word {
    raw: Range<usize>,
    core: Range<usize>,
}

impl Word {
    fn new(text: &str, raw: Range<usize>) -> Self {
        let source = &text[raw.clone()];
        let is_mark = |c: char| !c.is_alphanumeric();
        let lead = source.len() - source.trim_start_matches(is_mark).len();
        let core_len = source.trim_matches(is_mark).len();
        let start = raw.start + lead;
        Word {
            core: start..start + core_len,
            raw,
        }
    }

    fn opens_clean(&self) -> bool {
        self.core.start == self.raw.start
    }

    fn closes_clean(&self) -> bool {
        self.core.end == self.raw.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    // "type" を含む単語を学名・標本番号として扱わない
    pub exclude_type_words: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            exclude_type_words: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    options: TokenizerOptions,
}

impl Tokenizer {
    pub fn new(options: TokenizerOptions) -> Self {
        Tokenizer { options }
    }

    pub fn tokenize(&self, label: &str) -> TokenizedLabel {
        static REGEX_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

        let text = normalize_label(label).into_owned();
        let words: Vec<Word> = REGEX_WORD
            .find_iter(&text)
            .map(|m| Word::new(&text, m.range()))
            .collect();

        let mut segments = Vec::new();
        let mut plain_start = 0;

        let mut i = 0;
        while i < words.len() {
            match self.match_taxon(&text, &words, i) {
                Some((taxon, next)) => {
                    if plain_start < taxon.genus.start {
                        segments.push(Segment::Plain(plain_start..taxon.genus.start));
                    }
                    plain_start = taxon.span().end;
                    segments.push(Segment::Taxon(taxon));
                    i = next;
                }
                None => i += 1,
            }
        }

        if plain_start < text.len() {
            segments.push(Segment::Plain(plain_start..text.len()));
        }

        TokenizedLabel { text, segments }
    }

    // words[start] から始まる学名を読む．成功したら次に読む単語の位置も返す
    // 単語の後ろに記号が付いていたらそこで学名は終わる
    fn match_taxon(
        &self,
        text: &str,
        words: &[Word],
        start: usize,
    ) -> Option<(TaxonMatch, usize)> {
        static REGEX_GENUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]{3,}$").unwrap());
        static REGEX_SPECIES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z-]*$").unwrap());
        // CBS12345, TW-4, FH-1
        static REGEX_VOUCHER: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]*[-.:/]?[0-9][\w.:/-]*$").unwrap());
        // "BCC 1234" のように分かれているもの
        static REGEX_COLLECTOR: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]*$").unwrap());
        static REGEX_COLLECTION_NUMBER: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[0-9][\w.:/-]*$").unwrap());

        let word = |i: usize| {
            words
                .get(i)
                .map(|w| (w, &text[w.core.clone()]))
                .filter(|(_, core)| !(self.options.exclude_type_words && is_type_word(core)))
        };
        // 属名に続く単語は前に記号が付いていないこと
        let next_word = |i: usize| word(i).filter(|(w, _)| w.opens_clean());

        // 属名の後ろには空白が必要
        let (first, genus) = word(start)?;
        if !REGEX_GENUS.is_match(genus) || first.raw.end == text.len() {
            return None;
        }
        let genus = first.core.clone();
        let mut open = first.closes_clean();
        let mut next = start + 1;

        let mut qualifier = None;
        if open {
            let found = next_word(next).and_then(|(w, core)| Some((w, Qualifier::of(core)?)));
            if let Some((w, q)) = found {
                // "sp." の "." までを含める
                let mut end = w.core.end;
                if text[end..w.raw.end].starts_with('.') {
                    end += 1;
                }
                open = end == w.raw.end;
                qualifier = Some((q, w.core.start..end));
                next += 1;
            }
        }

        // "sp" のときは種小名を取らない
        let mut species = None;
        if open && !matches!(qualifier, Some((Qualifier::Sp, _))) {
            let found = next_word(next).filter(|(_, core)| REGEX_SPECIES.is_match(core));
            if let Some((w, _)) = found {
                species = Some(w.core.clone());
                open = w.closes_clean();
                next += 1;
            }
        }

        let mut voucher = None;
        if open {
            match (next_word(next), next_word(next + 1)) {
                (Some((w, core)), _) if REGEX_VOUCHER.is_match(core) => {
                    voucher = Some(w.core.clone());
                    next += 1;
                }
                (Some((w, core)), Some((n, number)))
                    if w.closes_clean()
                        && REGEX_COLLECTOR.is_match(core)
                        && REGEX_COLLECTION_NUMBER.is_match(number) =>
                {
                    voucher = Some(w.core.start..n.core.end);
                    next += 2;
                }
                _ => {}
            }
        }

        Some((
            TaxonMatch {
                genus,
                qualifier,
                species,
                voucher,
            },
            next,
        ))
    }
}
