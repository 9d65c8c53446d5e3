// src/core/types.rs
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One inflected word form as it appears in the raw Lefff lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub form: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lemma: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Terse positional code, e.g. `P3s`, `Kfp`, `ms`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msfeatures: String,
    /// Semicolon-delimited UniMorph features, e.g. `V;IND;PRS;3;SG`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unimorph: String,
}

impl RawEntry {
    pub fn new(form: &str, lemma: &str, category: &str, msfeatures: &str, unimorph: &str) -> Self {
        Self {
            form: form.to_string(),
            lemma: lemma.to_string(),
            category: category.to_string(),
            msfeatures: msfeatures.to_string(),
            unimorph: unimorph.to_string(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The closed set of Lefff categories the tagger knows how to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Determiner,
    Adjective,
    CommonNoun,
    ProperNoun,
    Adverb,
    Preposition,
    CoordinatingConjunction,
    SubordinatingConjunction,
    Pronoun,
    CliticPronoun,
    Verb,
    AuxiliaryEtre,
    AuxiliaryAvoir,
    Punctuation,
    Amalgam,
    ImpersonalPlaceholder,
    Other(String),
}

impl Category {
    pub fn parse(code: &str) -> Self {
        match code {
            "det" => Category::Determiner,
            "adj" => Category::Adjective,
            "nc" => Category::CommonNoun,
            "np" => Category::ProperNoun,
            "adv" => Category::Adverb,
            "prep" => Category::Preposition,
            "coo" => Category::CoordinatingConjunction,
            "csu" => Category::SubordinatingConjunction,
            "pro" => Category::Pronoun,
            "cla" => Category::CliticPronoun,
            "v" => Category::Verb,
            "auxEtre" => Category::AuxiliaryEtre,
            "auxAvoir" => Category::AuxiliaryAvoir,
            "poncts" => Category::Punctuation,
            "amlgm" => Category::Amalgam,
            "ilimp" => Category::ImpersonalPlaceholder,
            other => Category::Other(other.to_string()),
        }
    }

    /// Categories the grammar engine never sees.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            Category::Punctuation | Category::Amalgam | Category::ImpersonalPlaceholder
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Masculine,
    Feminine,
    #[default]
    Epicene,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Epicene => "e",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Number {
    #[default]
    Singular,
    Plural,
    SingularOrPlural,
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Number::Singular => "s",
            Number::Plural => "p",
            Number::SingularOrPlural => "sp",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Indicative,
    Subjunctive,
    Conditional,
    Imperative,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mood::Indicative => "ind",
            Mood::Subjunctive => "sub",
            Mood::Conditional => "cond",
            Mood::Imperative => "imp",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tense {
    #[default]
    Present,
    Past,
    Future,
    Imperfect,
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tense::Present => "pres",
            Tense::Past => "past",
            Tense::Future => "futu",
            Tense::Imperfect => "impf",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Person {
    First,
    Second,
    #[default]
    Third,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Person::First => "1",
            Person::Second => "2",
            Person::Third => "3",
        })
    }
}

/// Leading letter of the tags that carry gender and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NominalClass {
    Determiner,
    Adjective,
    Noun,
    ProperNoun,
    Pronoun,
}

impl fmt::Display for NominalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NominalClass::Determiner => "D",
            NominalClass::Adjective => "J",
            NominalClass::Noun => "N",
            NominalClass::ProperNoun => "Z",
            NominalClass::Pronoun => "R",
        })
    }
}

/// A part-of-speech tag from the grammar checker's closed tag set.
///
/// Only the `Display` form leaves the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Nominal {
        class: NominalClass,
        gender: Gender,
        number: Number,
    },
    Adverb,
    Preposition,
    Conjunction,
    Infinitive,
    PresentParticiple,
    PastParticiple {
        gender: Gender,
        number: Number,
    },
    Finite {
        mood: Mood,
        tense: Tense,
        person: Person,
        number: Number,
    },
    /// A verb with no feature encoding at all.
    BareVerb,
    /// Upper-cased category code of an unrecognised category.
    Other(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Nominal { class, gender, number } => write!(f, "{class} {gender} {number}"),
            Tag::Adverb => f.write_str("R"),
            Tag::Preposition => f.write_str("P"),
            Tag::Conjunction => f.write_str("C"),
            Tag::Infinitive => f.write_str("V inf"),
            Tag::PresentParticiple => f.write_str("V ppr"),
            Tag::PastParticiple { gender, number } => write!(f, "V ppa {gender} {number}"),
            Tag::Finite { mood, tense, person, number } => {
                write!(f, "V {mood} {tense} {person} {number}")
            }
            Tag::BareVerb => f.write_str("V"),
            Tag::Other(code) => f.write_str(code),
        }
    }
}

/// An accepted entry, ready for the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub form: String,
    pub lemma: String,
    pub tag: Tag,
}

impl fmt::Display for NormalizedRecord {
    /// The tab-separated output line, without the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.form, self.lemma, self.tag)
    }
}
