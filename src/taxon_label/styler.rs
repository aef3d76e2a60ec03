use crate::taxon_label::{
    genus::GenusValidator,
    run::{Run, RunList, RunStyle},
    tokenizer::{Segment, TaxonPart, TokenizedLabel, Tokenizer},
    type_word::annotate_type_words,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusVerdict {
    pub genus: String,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLabel {
    pub runs: Vec<Run>,
    pub genera: Vec<GenusVerdict>,
}

pub fn style_label(
    label: &str,
    tokenizer: &Tokenizer,
    validator: &mut dyn GenusValidator,
) -> StyledLabel {
    style_tokenized_label(&tokenizer.tokenize(label), validator)
}

// 属名が認められたときだけ属名・種小名を斜体にする
// sp/cf/aff と標本番号は常に通常，それ以外の部分は "type" を含む単語だけ太字
pub fn style_tokenized_label(
    label: &TokenizedLabel,
    validator: &mut dyn GenusValidator,
) -> StyledLabel {
    let mut runs = RunList::new();
    let mut genera = Vec::new();

    for segment in label.segments() {
        match segment {
            Segment::Plain(span) => runs.extend(annotate_type_words(label.text_of(span))),

            Segment::Taxon(taxon) => {
                let genus = label.text_of(&taxon.genus);
                let valid = validator.is_valid(genus);
                genera.push(GenusVerdict {
                    genus: genus.to_owned(),
                    valid,
                });

                let mut cursor = taxon.genus.start;
                for (part, span) in taxon.parts() {
                    // 単語間の空白
                    runs.push(&label.text()[cursor..span.start], RunStyle::Plain);

                    let style = match part {
                        TaxonPart::Genus | TaxonPart::Species if valid => RunStyle::Italic,
                        _ => RunStyle::Plain,
                    };
                    runs.push(label.text_of(&span), style);

                    cursor = span.end;
                }
            }
        }
    }

    StyledLabel {
        runs: runs.into_runs(),
        genera,
    }
}
