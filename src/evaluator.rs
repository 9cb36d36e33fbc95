use std::ops::AddAssign;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::{DocumentClassifier, PriorMode};
use crate::errors::{DegenerateModelError, DocumentReadError, EvaluationError};
use crate::source::read_directory;
use crate::vocabulary::{Class, VocabularyModel};

/// Decisions made over one collection of documents.
///
/// Documents that could not be read are counted in `errored` and never in
/// either class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusTally {
    pub spam: usize,
    pub ham: usize,
    pub errored: usize,
}

impl CorpusTally {
    pub fn count(&self, class: Class) -> usize {
        match class {
            Class::Ham => self.ham,
            Class::Spam => self.spam,
        }
    }

    /// Number of documents that were classified.
    pub fn classified(&self) -> usize {
        self.spam + self.ham
    }

    pub fn total(&self) -> usize {
        self.classified() + self.errored
    }

    /// Share of classified documents decided as `expected`.
    ///
    /// `None` when nothing was classified.
    pub fn accuracy(&self, expected: Class) -> Option<f64> {
        match self.classified() {
            0 => None,
            classified => Some(self.count(expected) as f64 / classified as f64),
        }
    }

    pub fn record(&mut self, class: Class) {
        match class {
            Class::Ham => self.ham += 1,
            Class::Spam => self.spam += 1,
        }
    }

    pub fn merge(&mut self, other: &CorpusTally) -> &mut Self {
        self.spam += other.spam;
        self.ham += other.ham;
        self.errored += other.errored;
        self
    }
}

impl AddAssign for CorpusTally {
    fn add_assign(&mut self, other: CorpusTally) {
        self.merge(&other);
    }
}

/// Classifies whole collections of documents against one model.
#[derive(Debug, Clone, Copy)]
pub struct CorpusEvaluator<'m> {
    classifier: DocumentClassifier<'m>,
}

impl<'m> CorpusEvaluator<'m> {
    pub fn new(model: &'m VocabularyModel) -> Self {
        Self::from_classifier(DocumentClassifier::new(model))
    }

    pub fn with_prior_mode(model: &'m VocabularyModel, prior_mode: PriorMode) -> Self {
        Self::from_classifier(DocumentClassifier::with_prior_mode(model, prior_mode))
    }

    pub fn from_classifier(classifier: DocumentClassifier<'m>) -> Self {
        Self { classifier }
    }

    /// Classify every document and count the decisions.
    ///
    /// A degenerate model fails the whole evaluation before any document is
    /// looked at. Documents that failed to load are logged, counted as
    /// errored, and skipped.
    pub fn evaluate<I, S>(&self, documents: I) -> Result<CorpusTally, DegenerateModelError>
    where
        I: IntoIterator<Item = Result<S, DocumentReadError>>,
        S: AsRef<str>,
    {
        self.classifier.model().check()?;

        let mut tally = CorpusTally::default();
        for document in documents {
            match document {
                Ok(text) => {
                    let result = self.classifier.classify(text.as_ref())?;
                    tally.record(result.class());
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable document");
                    tally.errored += 1;
                }
            }
        }

        debug!(spam = tally.spam, ham = tally.ham, errored = tally.errored, "evaluated corpus");
        Ok(tally)
    }

    /// Classify every file below `dir`.
    ///
    /// Only a directory that cannot be listed at all is reported as an
    /// error; unreadable files end up in [`CorpusTally::errored`].
    pub fn evaluate_directory<P: AsRef<Path>>(&self, dir: P) -> Result<CorpusTally, EvaluationError> {
        self.classifier.model().check()?;
        let documents = read_directory(dir)?;
        Ok(self.evaluate(documents)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::bag::BagOfWords;
    use crate::vocabulary::MIN_WORD_FREQ;

    fn bag(entries: &[(&str, usize)]) -> BagOfWords {
        let mut bag = BagOfWords::new();
        for &(word, count) in entries {
            bag.accumulate(std::iter::repeat(word).take(count));
        }
        bag
    }

    fn model() -> VocabularyModel {
        VocabularyModel::from_bags(
            bag(&[("HELLO", 150), ("MEETING", 120), ("FREE", 5), ("MONEY", 5)]),
            bag(&[("FREE", 200), ("MONEY", 180), ("HELLO", 5), ("MEETING", 5)]),
            MIN_WORD_FREQ,
        )
    }

    fn unreadable() -> Result<&'static str, DocumentReadError> {
        Err(DocumentReadError::io("broken.txt", io::Error::new(io::ErrorKind::Other, "boom")))
    }

    #[test]
    fn test_tallies_decisions() {
        let model = model();
        let documents = vec![Ok("free money"), Ok("hello meeting"), Ok("FREE MONEY NOW")];

        let tally = CorpusEvaluator::new(&model).evaluate(documents).unwrap();
        assert_eq!(
            tally,
            CorpusTally {
                spam: 2,
                ham: 1,
                errored: 0
            }
        );
    }

    #[test]
    fn test_unreadable_documents_are_counted_separately() {
        let model = model();
        let documents = vec![Ok("free money"), unreadable(), Ok("hello meeting"), unreadable()];

        let tally = CorpusEvaluator::new(&model).evaluate(documents).unwrap();
        assert_eq!(tally.spam, 1);
        assert_eq!(tally.ham, 1);
        assert_eq!(tally.errored, 2);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_degenerate_model_fails_whole_corpus() {
        let model = VocabularyModel::from_bags(BagOfWords::new(), bag(&[("FREE", 200)]), MIN_WORD_FREQ);
        let result = CorpusEvaluator::new(&model).evaluate(vec![unreadable(), Ok("free")]);
        assert_eq!(result, Err(DegenerateModelError::EmptyClass(Class::Ham)));
    }

    #[test]
    fn test_empty_corpus() {
        let model = model();
        let tally = CorpusEvaluator::new(&model)
            .evaluate(Vec::<Result<String, DocumentReadError>>::new())
            .unwrap();
        assert_eq!(tally, CorpusTally::default());
        assert_eq!(tally.accuracy(Class::Spam), None);
    }

    #[test]
    fn test_merging_partial_tallies() {
        let model = model();
        let evaluator = CorpusEvaluator::new(&model);

        let mut left = evaluator.evaluate(vec![Ok("free money"), unreadable()]).unwrap();
        let right = evaluator.evaluate(vec![Ok("hello meeting"), Ok("money")]).unwrap();
        let whole = evaluator
            .evaluate(vec![Ok("free money"), unreadable(), Ok("hello meeting"), Ok("money")])
            .unwrap();

        left += right;
        assert_eq!(left, whole);
        assert_eq!(whole.accuracy(Class::Spam), Some(2.0 / 3.0));
    }

    #[test]
    fn test_evaluate_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "free money").unwrap();
        std::fs::write(dir.path().join("b.txt"), "hello meeting").unwrap();

        let model = model();
        let tally = CorpusEvaluator::new(&model).evaluate_directory(dir.path()).unwrap();
        assert_eq!(tally.spam, 1);
        assert_eq!(tally.ham, 1);

        let missing = CorpusEvaluator::new(&model).evaluate_directory(dir.path().join("missing"));
        assert!(matches!(missing, Err(EvaluationError::Source(_))));
    }
}
