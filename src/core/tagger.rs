// File: src/core/tagger.rs
use crate::core::features::{
    check_representable, Agreement, FeatureEncoding, RichFeatures, TerseCode, VerbForm,
};
use crate::core::types::{Category, NominalClass, NormalizedRecord, RawEntry, Tag};
use crate::error::{Field, TagError};

/// Maps a category plus its feature encodings to a tag.
///
/// Pure: the same three inputs always give the same tag.
pub fn tag(category: &Category, msfeatures: &str, unimorph: &str) -> Result<Tag, TagError> {
    let terse = TerseCode::parse(msfeatures)?;
    let rich = RichFeatures::parse(unimorph)?;
    let agreement = Agreement::resolve(terse.as_ref(), rich.as_ref());

    let nominal = |class| Tag::Nominal {
        class,
        gender: agreement.gender,
        number: agreement.number,
    };

    let tag = match category {
        Category::Determiner => nominal(NominalClass::Determiner),
        Category::Adjective => nominal(NominalClass::Adjective),
        Category::CommonNoun => nominal(NominalClass::Noun),
        Category::ProperNoun => nominal(NominalClass::ProperNoun),
        Category::Adverb => Tag::Adverb,
        Category::Preposition => Tag::Preposition,
        Category::CoordinatingConjunction | Category::SubordinatingConjunction => Tag::Conjunction,
        Category::Pronoun | Category::CliticPronoun => nominal(NominalClass::Pronoun),
        Category::Verb | Category::AuxiliaryEtre | Category::AuxiliaryAvoir => {
            verb_tag(FeatureEncoding::select(terse, rich), agreement)
        }
        // The filter drops these, but the mapper stays total over every category.
        Category::Punctuation => fallback("poncts")?,
        Category::Amalgam => fallback("amlgm")?,
        Category::ImpersonalPlaceholder => fallback("ilimp")?,
        Category::Other(code) => fallback(code)?,
    };
    Ok(tag)
}

fn verb_tag(encoding: Option<FeatureEncoding<'_>>, agreement: Agreement) -> Tag {
    let Some(encoding) = encoding else {
        return Tag::BareVerb;
    };
    match encoding.verb_form() {
        VerbForm::Infinitive => Tag::Infinitive,
        VerbForm::PresentParticiple => Tag::PresentParticiple,
        VerbForm::PastParticiple => Tag::PastParticiple {
            gender: agreement.gender,
            number: agreement.number,
        },
        VerbForm::Finite { mood, tense, person, number } => {
            Tag::Finite { mood, tense, person, number }
        }
    }
}

fn fallback(code: &str) -> Result<Tag, TagError> {
    check_representable(Field::Category, code)?;
    Ok(Tag::Other(code.to_uppercase()))
}

/// Builds the output record for an entry that already passed the filter.
pub fn normalize(entry: &RawEntry, category: &Category) -> Result<NormalizedRecord, TagError> {
    if entry.lemma.contains(['\t', '\n', '\r']) {
        return Err(TagError::Unrepresentable {
            field: Field::Lemma,
            value: entry.lemma.clone(),
        });
    }
    let tag = tag(category, &entry.msfeatures, &entry.unimorph)?;
    Ok(NormalizedRecord {
        form: entry.form.clone(),
        lemma: entry.lemma.clone(),
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_str(category: &str, msfeatures: &str, unimorph: &str) -> String {
        tag(&Category::parse(category), msfeatures, unimorph).unwrap().to_string()
    }

    #[test]
    fn noun_without_features_is_epicene_singular() {
        assert_eq!(tag_str("nc", "", ""), "N e s");
    }

    #[test]
    fn nominal_categories() {
        assert_eq!(tag_str("det", "p", "DET;PL"), "D e p");
        assert_eq!(tag_str("adj", "ms", ""), "J m s");
        assert_eq!(tag_str("np", "fs", ""), "Z f s");
        assert_eq!(tag_str("adj", "sp", ""), "J e sp");
        assert_eq!(tag_str("pro", "fp", ""), "R f p");
        assert_eq!(tag_str("cla", "", "PRO;MASC;SG"), "R m s");
    }

    #[test]
    fn invariable_categories() {
        assert_eq!(tag_str("adv", "ms", "ADV"), "R");
        assert_eq!(tag_str("prep", "", ""), "P");
        assert_eq!(tag_str("coo", "", ""), "C");
        assert_eq!(tag_str("csu", "", ""), "C");
    }

    #[test]
    fn unimorph_gender_beats_msfeatures() {
        assert_eq!(tag_str("nc", "ms", "N;FEM;SG"), "N f s");
    }

    #[test]
    fn unknown_category_falls_back_to_upper_case() {
        assert_eq!(tag_str("clr", "", ""), "CLR");
        assert_eq!(tag_str("adjPref", "ms", ""), "ADJPREF");
    }

    #[test]
    fn infinitive_marker_wins_over_everything() {
        for unimorph in ["V;NFIN;INF", "V;INF;PTCP;PST", "V;IND;PRS;1;PL;INF"] {
            assert_eq!(tag_str("v", "Kms", unimorph), "V inf", "{unimorph}");
        }
    }

    #[test]
    fn unimorph_ignores_msfeatures_for_verbs() {
        assert_eq!(tag_str("v", "W", "V;IND;FUT;1;SG"), "V ind futu 1 s");
        assert_eq!(tag_str("auxEtre", "P3s", "V;IND;PRS;3;SG"), "V ind pres 3 s");
    }

    #[test]
    fn past_participle_uses_agreement() {
        assert_eq!(tag_str("v", "", "V;PTCP;PST;FEM;PL"), "V ppa f p");
        assert_eq!(tag_str("v", "Kfp", ""), "V ppa f p");
        assert_eq!(tag_str("auxAvoir", "Kms", ""), "V ppa m s");
        assert_eq!(tag_str("v", "", "V;PTCP;PASS;MASC;PL"), "V ppa m p");
        assert_eq!(tag_str("v", "", "V;PTCP;PRS"), "V ppr");
    }

    #[test]
    fn msfeatures_drive_verbs_without_unimorph() {
        assert_eq!(tag_str("v", "W", ""), "V inf");
        assert_eq!(tag_str("v", "G", ""), "V ppr");
        assert_eq!(tag_str("v", "J3s", ""), "V ind past 3 s");
        assert_eq!(tag_str("v", "C1s", ""), "V cond pres 1 s");
        assert_eq!(tag_str("v", "Y2p", ""), "V imp pres 2 p");
        assert_eq!(tag_str("v", "I1p", ""), "V ind impf 1 p");
    }

    #[test]
    fn verb_without_features_is_bare() {
        assert_eq!(tag_str("v", "", ""), "V");
    }

    #[test]
    fn mapping_is_deterministic() {
        let inputs = [("v", "S2s", ""), ("nc", "fp", "N;MASC;FEM;PL"), ("zzz", "", "")];
        for (category, msfeatures, unimorph) in inputs {
            let first = tag_str(category, msfeatures, unimorph);
            for _ in 0..3 {
                assert_eq!(tag_str(category, msfeatures, unimorph), first);
            }
        }
    }

    #[test]
    fn unrepresentable_values_fail() {
        assert!(tag(&Category::parse("weird cat"), "", "").is_err());
        assert!(tag(&Category::Verb, "P3\ns", "").is_err());

        let entry = RawEntry::new("chat", "ch\tat", "nc", "ms", "");
        assert_eq!(
            normalize(&entry, &Category::CommonNoun),
            Err(TagError::Unrepresentable { field: Field::Lemma, value: "ch\tat".to_string() })
        );
    }

    #[test]
    fn normalize_keeps_form_and_lemma() {
        let entry = RawEntry::new("mange", "manger", "v", "P3s", "V;IND;PRS;3;SG");
        let record = normalize(&entry, &Category::Verb).unwrap();
        assert_eq!(record.to_string(), "mange\tmanger\tV ind pres 3 s");
    }
}
