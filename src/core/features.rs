// File: src/core/features.rs
//! The two morphological encodings a Lefff entry can carry.
//!
//! `msfeatures` is a terse positional code (`P3s`, `Kfp`, `ms`) and `unimorph`
//! is a semicolon-delimited list of UniMorph markers (`V;IND;PRS;3;SG`). Either,
//! both or neither may be present. When both are, the UniMorph reading wins.
use crate::core::types::{Gender, Mood, Number, Person, Tense};
use crate::error::{Field, TagError};

/// What a feature encoding says about a verb form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbForm {
    Infinitive,
    PresentParticiple,
    /// Gender and number come from the shared agreement prelude.
    PastParticiple,
    Finite {
        mood: Mood,
        tense: Tense,
        person: Person,
        number: Number,
    },
}

/// A non-empty `msfeatures` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerseCode<'a>(&'a str);

impl<'a> TerseCode<'a> {
    /// Returns `Ok(None)` for an empty code.
    pub fn parse(raw: &'a str) -> Result<Option<Self>, TagError> {
        check_representable(Field::FeatureSetA, raw)?;
        Ok((!raw.is_empty()).then_some(Self(raw)))
    }

    /// Masculine wins when the code mentions both genders.
    pub fn gender(&self) -> Option<Gender> {
        if self.0.contains('m') {
            Some(Gender::Masculine)
        } else if self.0.contains('f') {
            Some(Gender::Feminine)
        } else {
            None
        }
    }

    pub fn number(&self) -> Option<Number> {
        if self.0.contains('p') && !self.0.contains('s') {
            Some(Number::Plural)
        } else if self.0.contains("sp") {
            Some(Number::SingularOrPlural)
        } else {
            None
        }
    }

    pub fn verb_form(&self) -> VerbForm {
        let code = self.0;
        match code.chars().next() {
            Some('W') => return VerbForm::Infinitive,
            Some('K') => return VerbForm::PastParticiple,
            Some('G') => return VerbForm::PresentParticiple,
            _ => {}
        }

        let (mood, tense) = match code.chars().next() {
            Some('P') => (Mood::Indicative, Tense::Present),
            Some('I') => (Mood::Indicative, Tense::Imperfect),
            // passé simple
            Some('J') => (Mood::Indicative, Tense::Past),
            Some('F') => (Mood::Indicative, Tense::Future),
            Some('C') => (Mood::Conditional, Tense::Present),
            Some('S') => (Mood::Subjunctive, Tense::Present),
            Some('T') => (Mood::Subjunctive, Tense::Imperfect),
            Some('Y') => (Mood::Imperative, Tense::Present),
            _ => (Mood::default(), Tense::default()),
        };

        let person = if code.contains('1') {
            Person::First
        } else if code.contains('2') {
            Person::Second
        } else {
            Person::Third
        };

        // Case-insensitive, so a leading `P` (present indicative) also reads as plural.
        let number = if code.chars().any(|c| c.eq_ignore_ascii_case(&'p')) {
            Number::Plural
        } else {
            Number::Singular
        };

        VerbForm::Finite { mood, tense, person, number }
    }
}

/// A non-empty `unimorph` feature list, split on `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichFeatures<'a> {
    markers: Vec<&'a str>,
}

impl<'a> RichFeatures<'a> {
    /// Returns `Ok(None)` for an empty feature list.
    pub fn parse(raw: &'a str) -> Result<Option<Self>, TagError> {
        check_representable(Field::FeatureSetB, raw)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { markers: raw.split(';').collect() }))
    }

    pub fn has(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| *m == marker)
    }

    /// `None` when neither or both genders are marked.
    pub fn gender(&self) -> Option<Gender> {
        match (self.has("MASC"), self.has("FEM")) {
            (true, false) => Some(Gender::Masculine),
            (false, true) => Some(Gender::Feminine),
            _ => None,
        }
    }

    /// `None` when neither or both numbers are marked.
    pub fn number(&self) -> Option<Number> {
        match (self.has("PL"), self.has("SG")) {
            (true, false) => Some(Number::Plural),
            (false, true) => Some(Number::Singular),
            _ => None,
        }
    }

    pub fn verb_form(&self) -> VerbForm {
        if self.has("INF") {
            return VerbForm::Infinitive;
        }
        if self.has("NFIN") || self.has("PTCP") {
            return if self.has("PST") || self.has("PASS") {
                VerbForm::PastParticiple
            } else {
                VerbForm::PresentParticiple
            };
        }

        let mood = [
            ("IND", Mood::Indicative),
            ("SBJV", Mood::Subjunctive),
            ("COND", Mood::Conditional),
            ("IMP", Mood::Imperative),
        ]
        .into_iter()
        .find(|(marker, _)| self.has(marker))
        .map_or(Mood::default(), |(_, mood)| mood);

        let tense = [
            ("PST", Tense::Past),
            ("FUT", Tense::Future),
            ("IPFV", Tense::Imperfect),
        ]
        .into_iter()
        .find(|(marker, _)| self.has(marker))
        .map_or(Tense::default(), |(_, tense)| tense);

        let person = if self.has("1") {
            Person::First
        } else if self.has("2") {
            Person::Second
        } else {
            Person::Third
        };

        let number = if self.has("PL") { Number::Plural } else { Number::Singular };

        VerbForm::Finite { mood, tense, person, number }
    }
}

/// The encoding that decides a verb's form: UniMorph if present, else the terse code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureEncoding<'a> {
    Rich(RichFeatures<'a>),
    Terse(TerseCode<'a>),
}

impl<'a> FeatureEncoding<'a> {
    pub fn select(terse: Option<TerseCode<'a>>, rich: Option<RichFeatures<'a>>) -> Option<Self> {
        match (rich, terse) {
            (Some(rich), _) => Some(FeatureEncoding::Rich(rich)),
            (None, Some(terse)) => Some(FeatureEncoding::Terse(terse)),
            (None, None) => None,
        }
    }

    pub fn verb_form(&self) -> VerbForm {
        match self {
            FeatureEncoding::Rich(rich) => rich.verb_form(),
            FeatureEncoding::Terse(terse) => terse.verb_form(),
        }
    }
}

/// Gender and number shared by every tag that carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Agreement {
    pub gender: Gender,
    pub number: Number,
}

impl Agreement {
    /// Starts from epicene singular, applies the terse code, then lets any
    /// unambiguous UniMorph marker override it.
    pub fn resolve(terse: Option<&TerseCode<'_>>, rich: Option<&RichFeatures<'_>>) -> Self {
        let mut agreement = Agreement::default();

        if let Some(terse) = terse {
            if let Some(gender) = terse.gender() {
                agreement.gender = gender;
            }
            if let Some(number) = terse.number() {
                agreement.number = number;
            }
        }

        if let Some(rich) = rich {
            if let Some(gender) = rich.gender() {
                agreement.gender = gender;
            }
            if let Some(number) = rich.number() {
                agreement.number = number;
            }
        }

        agreement
    }
}

/// Rejects values that would leak whitespace or control characters into a tag.
pub(crate) fn check_representable(field: Field, value: &str) -> Result<(), TagError> {
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TagError::Unrepresentable { field, value: value.to_string() });
    }
    Ok(())
}
