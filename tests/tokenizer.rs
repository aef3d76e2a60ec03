use taxon_svg_style::taxon_label::tokenizer::{
    Qualifier, Segment, TaxonMatch, TokenizedLabel, Tokenizer, TokenizerOptions,
};

fn only_taxon(label: &TokenizedLabel) -> &TaxonMatch {
    let taxa: Vec<_> = label.taxa().collect();
    assert_eq!(taxa.len(), 1, "{:?}", label);
    taxa[0]
}

fn field<'a>(label: &'a TokenizedLabel, span: &Option<std::ops::Range<usize>>) -> Option<&'a str> {
    span.as_ref().map(|span| label.text_of(span))
}

#[test]
fn label_without_genus_is_one_plain_span() {
    let tokenizer = Tokenizer::default();

    for label in [
        "clade A",
        "node_42 bootstrap 98",
        "CBS12345",
        "ABCD efgh",
        "Tree",
        "support: 0.95",
    ] {
        let tokenized = tokenizer.tokenize(label);
        let expected = label.replace('_', " ");
        assert_eq!(
            tokenized.segments(),
            &[Segment::Plain(0..expected.len())],
            "{:?}",
            label
        );
        assert_eq!(tokenized.text(), expected);
    }
}

#[test]
fn genus_species_and_voucher() {
    let tokenized = Tokenizer::default().tokenize("Ophiocordyceps militaris CBS12345");
    let taxon = only_taxon(&tokenized);

    assert_eq!(tokenized.text_of(&taxon.genus), "Ophiocordyceps");
    assert_eq!(taxon.qualifier, None);
    assert_eq!(field(&tokenized, &taxon.species), Some("militaris"));
    assert_eq!(field(&tokenized, &taxon.voucher), Some("CBS12345"));
    assert_eq!(tokenized.segments().len(), 1);
}

#[test]
fn sp_suppresses_species_but_keeps_voucher() {
    let tokenized = Tokenizer::default().tokenize("Fusarium sp. TW-4");
    let taxon = only_taxon(&tokenized);

    assert_eq!(tokenized.text_of(&taxon.genus), "Fusarium");
    let (qualifier, span) = taxon.qualifier.clone().unwrap();
    assert_eq!(qualifier, Qualifier::Sp);
    assert_eq!(tokenized.text_of(&span), "sp.");
    assert_eq!(taxon.species, None);
    assert_eq!(field(&tokenized, &taxon.voucher), Some("TW-4"));
}

#[test]
fn sp_never_takes_a_species_looking_word() {
    let tokenized = Tokenizer::default().tokenize("Fusarium SP oxysporum");
    let taxon = only_taxon(&tokenized);

    assert_eq!(taxon.species, None);
    assert_eq!(
        tokenized.segments().last(),
        Some(&Segment::Plain(11..tokenized.text().len()))
    );
    assert_eq!(tokenized.text_of(&(11..tokenized.text().len())), " oxysporum");
}

#[test]
fn cf_and_aff_keep_species() {
    let tokenizer = Tokenizer::default();

    let tokenized = tokenizer.tokenize("Cordyceps cf. militaris");
    let taxon = only_taxon(&tokenized);
    assert_eq!(taxon.qualifier.as_ref().map(|(q, _)| *q), Some(Qualifier::Cf));
    assert_eq!(field(&tokenized, &taxon.species), Some("militaris"));

    let tokenized = tokenizer.tokenize("Cordyceps AFF tenuipes BCC 1234");
    let taxon = only_taxon(&tokenized);
    assert_eq!(taxon.qualifier.as_ref().map(|(q, _)| *q), Some(Qualifier::Aff));
    assert_eq!(field(&tokenized, &taxon.species), Some("tenuipes"));
    assert_eq!(field(&tokenized, &taxon.voucher), Some("BCC 1234"));
}

#[test]
fn type_words_are_not_taken_as_taxon_parts() {
    let tokenized = Tokenizer::default().tokenize("Cordyceps sp. holotype FH-1");
    let taxon = only_taxon(&tokenized);

    assert_eq!(taxon.span(), 0..13);
    assert_eq!(taxon.voucher, None);
    assert_eq!(
        tokenized.segments()[1],
        Segment::Plain(13..tokenized.text().len())
    );

    let tokenized = Tokenizer::default().tokenize("Ophiocordyceps paratype");
    let taxon = only_taxon(&tokenized);
    assert_eq!(taxon.species, None);
}

#[test]
fn type_words_may_be_epithets_when_allowed() {
    let tokenizer = Tokenizer::new(TokenizerOptions {
        exclude_type_words: false,
    });

    let tokenized = tokenizer.tokenize("Ophiocordyceps paratype");
    let taxon = only_taxon(&tokenized);
    assert_eq!(field(&tokenized, &taxon.species), Some("paratype"));
}

#[test]
fn genus_must_be_followed_by_whitespace() {
    let tokenizer = Tokenizer::default();

    let tokenized = tokenizer.tokenize("Cordyceps");
    assert_eq!(tokenized.taxa().count(), 0);

    let tokenized = tokenizer.tokenize("Cordyceps ");
    assert_eq!(tokenized.taxa().count(), 1);
}

#[test]
fn underscores_are_normalized() {
    let tokenized = Tokenizer::default().tokenize("Beauveria_bassiana_ARSEF_2860");
    let taxon = only_taxon(&tokenized);

    assert_eq!(tokenized.text(), "Beauveria bassiana ARSEF 2860");
    assert_eq!(tokenized.text_of(&taxon.genus), "Beauveria");
    assert_eq!(field(&tokenized, &taxon.species), Some("bassiana"));
    assert_eq!(field(&tokenized, &taxon.voucher), Some("ARSEF 2860"));
}

#[test]
fn several_taxa_in_one_label() {
    let tokenized = Tokenizer::default()
        .tokenize("outgroup: Tolypocladium inflatum vs Metarhizium robertsii ARSEF23");

    let genera: Vec<_> = tokenized
        .taxa()
        .map(|taxon| tokenized.text_of(&taxon.genus))
        .collect();
    assert_eq!(genera, vec!["Tolypocladium", "Metarhizium"]);

    assert!(matches!(tokenized.segments()[0], Segment::Plain(_)));
    assert!(matches!(tokenized.segments()[2], Segment::Plain(_)));
    assert_eq!(tokenized.segments().len(), 4);
}

#[test]
fn segments_cover_the_label_in_order() {
    let tokenized = Tokenizer::default()
        .tokenize("  Ophiocordyceps militaris CBS12345 paratype  Cordyceps sp. holotype FH-1 ");

    let mut cursor = 0;
    for segment in tokenized.segments() {
        let span = match segment {
            Segment::Plain(span) => span.clone(),
            Segment::Taxon(taxon) => taxon.span(),
        };
        assert_eq!(span.start, cursor);
        assert!(span.start < span.end);
        cursor = span.end;
    }
    assert_eq!(cursor, tokenized.text().len());
}

#[test]
fn empty_label_has_no_segments() {
    let tokenized = Tokenizer::default().tokenize("");
    assert!(tokenized.segments().is_empty());
}

#[test]
fn surrounding_punctuation_stays_plain() {
    let tokenizer = Tokenizer::default();

    let tokenized = tokenizer.tokenize("clade (Cordyceps militaris BCC 1234)");
    let taxon = only_taxon(&tokenized);
    assert_eq!(tokenized.text_of(&taxon.genus), "Cordyceps");
    assert_eq!(field(&tokenized, &taxon.species), Some("militaris"));
    assert_eq!(field(&tokenized, &taxon.voucher), Some("BCC 1234"));
    assert_eq!(tokenized.segments()[0], Segment::Plain(0..7));
    assert_eq!(tokenized.text_of(&(0..7)), "clade (");
    assert_eq!(tokenized.segments()[2], Segment::Plain(35..36));

    let tokenized = tokenizer.tokenize("'Fusarium oxysporum'");
    let taxon = only_taxon(&tokenized);
    assert_eq!(tokenized.text_of(&taxon.genus), "Fusarium");
    assert_eq!(field(&tokenized, &taxon.species), Some("oxysporum"));
    assert_eq!(
        tokenized.segments(),
        &[
            Segment::Plain(0..1),
            Segment::Taxon(taxon.clone()),
            Segment::Plain(19..20),
        ]
    );
}

#[test]
fn trailing_punctuation_ends_the_name() {
    let tokenizer = Tokenizer::default();

    let tokenized = tokenizer.tokenize("Cordyceps, militaris");
    let taxon = only_taxon(&tokenized);
    assert_eq!(tokenized.text_of(&taxon.genus), "Cordyceps");
    assert_eq!(taxon.species, None);
    assert_eq!(tokenized.segments()[1], Segment::Plain(9..20));

    // "sp." の "." は限定詞に含まれる
    let tokenized = tokenizer.tokenize("(Fusarium sp.) TW-4");
    let taxon = only_taxon(&tokenized);
    let (_, span) = taxon.qualifier.clone().unwrap();
    assert_eq!(tokenized.text_of(&span), "sp.");
    assert_eq!(taxon.voucher, None);

    let tokenized = tokenizer.tokenize("Cordyceps militaris, BCC 1234");
    let taxon = only_taxon(&tokenized);
    assert_eq!(field(&tokenized, &taxon.species), Some("militaris"));
    assert_eq!(taxon.voucher, None);
}

#[test]
fn leading_punctuation_breaks_the_name() {
    let tokenized = Tokenizer::default().tokenize("Cordyceps (militaris)");
    let taxon = only_taxon(&tokenized);

    assert_eq!(taxon.species, None);
    assert_eq!(taxon.span(), 0..9);
}

#[test]
fn species_must_start_lowercase() {
    let tokenized = Tokenizer::default().tokenize("Cordyceps Militaris");
    let taxon = only_taxon(&tokenized);

    assert_eq!(taxon.species, None);
    assert_eq!(taxon.voucher, None);
    assert_eq!(taxon.span(), 0..9);
}
