use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bag::BagOfWords;
use crate::errors::DegenerateModelError;

/// Words seen fewer times than this are ignored by default.
pub const MIN_WORD_FREQ: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Ham,
    Spam,
}

impl Class {
    pub fn name(&self) -> &'static str {
        match self {
            Class::Ham => "ham",
            Class::Spam => "spam",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of the counts in `bag` of words seen at least `min_word_freq` times.
pub fn total_word_count(bag: &BagOfWords, min_word_freq: u64) -> u64 {
    bag.total_word_count(min_word_freq)
}

/// Per-class word statistics used for classification.
///
/// Totals only include words that meet the minimum frequency within their
/// own class, so a word can count towards one total and not the other.
/// The model cannot be changed once built; see
/// [`ModelTrainer`](crate::ModelTrainer) for gathering statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyModel {
    ham_frequencies: BagOfWords,
    spam_frequencies: BagOfWords,
    ham_total: u64,
    spam_total: u64,
    min_word_freq: u64,
}

impl VocabularyModel {
    /// Build a model from labeled documents.
    ///
    /// ```
    /// use bayesfilter::{Class, VocabularyModel};
    ///
    /// let documents = vec![(Class::Spam, "win money"), (Class::Ham, "lunch at noon")];
    /// let model = VocabularyModel::build(documents, 1);
    /// assert_eq!(model.spam_total(), 2);
    /// assert_eq!(model.ham_total(), 3);
    /// ```
    pub fn build<I, S>(documents_by_class: I, min_word_freq: u64) -> Self
    where
        I: IntoIterator<Item = (Class, S)>,
        S: AsRef<str>,
    {
        let (ham, spam) = documents_by_class.into_iter().fold(
            (BagOfWords::new(), BagOfWords::new()),
            |(mut ham, mut spam), (class, text)| {
                match class {
                    Class::Ham => ham.add_text(text.as_ref()),
                    Class::Spam => spam.add_text(text.as_ref()),
                };
                (ham, spam)
            },
        );

        Self::from_bags(ham, spam, min_word_freq)
    }

    /// Wrap already gathered bags and derive the filtered totals.
    pub fn from_bags(ham_frequencies: BagOfWords, spam_frequencies: BagOfWords, min_word_freq: u64) -> Self {
        let ham_total = total_word_count(&ham_frequencies, min_word_freq);
        let spam_total = total_word_count(&spam_frequencies, min_word_freq);

        Self {
            ham_frequencies,
            spam_frequencies,
            ham_total,
            spam_total,
            min_word_freq,
        }
    }

    pub fn ham_frequencies(&self) -> &BagOfWords {
        &self.ham_frequencies
    }

    pub fn spam_frequencies(&self) -> &BagOfWords {
        &self.spam_frequencies
    }

    pub fn frequencies(&self, class: Class) -> &BagOfWords {
        match class {
            Class::Ham => &self.ham_frequencies,
            Class::Spam => &self.spam_frequencies,
        }
    }

    pub fn ham_total(&self) -> u64 {
        self.ham_total
    }

    pub fn spam_total(&self) -> u64 {
        self.spam_total
    }

    pub fn total(&self, class: Class) -> u64 {
        match class {
            Class::Ham => self.ham_total,
            Class::Spam => self.spam_total,
        }
    }

    pub fn min_word_freq(&self) -> u64 {
        self.min_word_freq
    }

    /// Make sure both classes have words left after filtering.
    pub fn check(&self) -> Result<(), DegenerateModelError> {
        match (self.ham_total, self.spam_total) {
            (0, 0) => Err(DegenerateModelError::EmptyModel),
            (0, _) => Err(DegenerateModelError::EmptyClass(Class::Ham)),
            (_, 0) => Err(DegenerateModelError::EmptyClass(Class::Spam)),
            _ => Ok(()),
        }
    }
}
