use std::path::Path;

use tracing::debug;

use crate::bag::BagOfWords;
use crate::errors::DocumentReadError;
use crate::source::{read_document, walk_files};
use crate::vocabulary::{Class, VocabularyModel};

/// Trainer for new spam filtering models.
///
/// Gathers word counts for each class from labeled documents. Trainers fed
/// with different shards of a corpus can be combined with
/// [`merge`](ModelTrainer::merge) before building the model.
///
/// ```
/// use bayesfilter::{Class, ModelTrainer};
///
/// let mut trainer = ModelTrainer::new();
/// trainer
///     .add_document(Class::Spam, "cheap pills")
///     .add_document(Class::Ham, "minutes from the meeting");
/// let model = trainer.into_model(1);
/// assert_eq!(model.spam_frequencies().get("PILLS"), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModelTrainer {
    ham: ClassStats,
    spam: ClassStats,
}

#[derive(Debug, Default, Clone)]
struct ClassStats {
    frequencies: BagOfWords,
    documents: usize,
}

impl ClassStats {
    fn add(&mut self, text: &str) {
        self.frequencies.add_text(text);
        self.documents += 1;
    }

    fn merge(&mut self, other: &ClassStats) {
        self.frequencies.merge(&other.frequencies);
        self.documents += other.documents;
    }
}

/// What a single [`ModelTrainer::add_directory`] call added.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrainingReport {
    pub documents: usize,
    pub words: u64,
}

impl ModelTrainer {
    /// Create a new model trainer.
    pub fn new() -> Self {
        Self::default()
    }

    fn stats_mut(&mut self, class: Class) -> &mut ClassStats {
        match class {
            Class::Ham => &mut self.ham,
            Class::Spam => &mut self.spam,
        }
    }

    fn stats(&self, class: Class) -> &ClassStats {
        match class {
            Class::Ham => &self.ham,
            Class::Spam => &self.spam,
        }
    }

    /// Add one document of a known class to the training set.
    pub fn add_document(&mut self, class: Class, text: &str) -> &mut Self {
        self.stats_mut(class).add(text);
        self
    }

    /// Add multiple documents of the same class from an iterator.
    pub fn add_documents_from_iter<I>(&mut self, class: Class, iter: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for text in iter {
            self.add_document(class, text.as_ref());
        }

        self
    }

    /// Add the whole file as one document.
    pub fn add_document_from_file<P: AsRef<Path>>(
        &mut self,
        class: Class,
        path: P,
    ) -> Result<&mut Self, DocumentReadError> {
        let text = read_document(path)?;
        Ok(self.add_document(class, &text))
    }

    /// Add every file below `dir` as a separate document.
    ///
    /// Stops at the first file that cannot be read; documents read before
    /// that are kept.
    pub fn add_directory<P: AsRef<Path>>(
        &mut self,
        class: Class,
        dir: P,
    ) -> Result<TrainingReport, DocumentReadError> {
        let words_before = self.stats(class).frequencies.total();
        let mut report = TrainingReport::default();

        for path in walk_files(&dir)? {
            self.add_document_from_file(class, &path)?;
            report.documents += 1;
        }

        report.words = self.stats(class).frequencies.total() - words_before;
        debug!(
            dir = %dir.as_ref().display(),
            %class,
            documents = report.documents,
            words = report.words,
            "trained on directory"
        );

        Ok(report)
    }

    /// Fold the counts of another trainer into this one.
    pub fn merge(&mut self, other: &ModelTrainer) -> &mut Self {
        self.ham.merge(&other.ham);
        self.spam.merge(&other.spam);
        self
    }

    /// Number of documents seen so far for `class`.
    pub fn document_count(&self, class: Class) -> usize {
        self.stats(class).documents
    }

    /// Build a model from all gathered statistics.
    pub fn into_model(self, min_word_freq: u64) -> VocabularyModel {
        let model = VocabularyModel::from_bags(self.ham.frequencies, self.spam.frequencies, min_word_freq);

        debug!(
            ham_documents = self.ham.documents,
            spam_documents = self.spam.documents,
            ham_total = model.ham_total(),
            spam_total = model.spam_total(),
            min_word_freq,
            "built vocabulary model"
        );

        model
    }
}
