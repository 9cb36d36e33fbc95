use serde::{Deserialize, Serialize};

use crate::bag::BagOfWords;
use crate::errors::DegenerateModelError;
use crate::vocabulary::{Class, VocabularyModel};

/// How a class prior enters its log-space score.
///
/// `Raw` adds the prior probability itself to the log-likelihood, which is
/// what trained models have always been scored with. `Log` adds `ln(prior)`
/// instead, matching `log posterior = log likelihood + log prior - log evidence`.
/// The two modes can disagree on the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorMode {
    Raw,
    Log,
}

impl Default for PriorMode {
    fn default() -> Self {
        PriorMode::Raw
    }
}

impl PriorMode {
    /// The term a class prior contributes to that class's score.
    pub fn prior_term(self, prior: f64) -> f64 {
        match self {
            PriorMode::Raw => prior,
            PriorMode::Log => prior.ln(),
        }
    }
}

/// Scores of one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub spam_score: f64,
    pub ham_score: f64,
}

impl ClassificationResult {
    /// Spam only when its score is strictly higher; ties go to ham.
    pub fn class(&self) -> Class {
        if self.is_spam() {
            Class::Spam
        } else {
            Class::Ham
        }
    }

    pub fn is_spam(&self) -> bool {
        self.spam_score > self.ham_score
    }

    /// `spam_score - ham_score`
    pub fn margin(&self) -> f64 {
        self.spam_score - self.ham_score
    }
}

/// Naive Bayes scoring of documents against a trained model.
///
/// Each distinct word of a document is considered once. Words seen fewer than
/// the model's minimum frequency times across both classes carry no evidence.
#[derive(Debug, Clone, Copy)]
pub struct DocumentClassifier<'m> {
    model: &'m VocabularyModel,
    prior_mode: PriorMode,
}

impl<'m> DocumentClassifier<'m> {
    pub fn new(model: &'m VocabularyModel) -> Self {
        Self::with_prior_mode(model, PriorMode::default())
    }

    pub fn with_prior_mode(model: &'m VocabularyModel, prior_mode: PriorMode) -> Self {
        Self { model, prior_mode }
    }

    pub fn model(&self) -> &'m VocabularyModel {
        self.model
    }

    pub fn prior_mode(&self) -> PriorMode {
        self.prior_mode
    }

    /// Tokenize `text` and score it.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, DegenerateModelError> {
        self.classify_bag(&BagOfWords::from_text(text))
    }

    pub fn classify_bag(&self, document: &BagOfWords) -> Result<ClassificationResult, DegenerateModelError> {
        self.model.check()?;

        let ham_frequencies = self.model.ham_frequencies();
        let spam_frequencies = self.model.spam_frequencies();
        let ham_total = self.model.ham_total() as f64;
        let spam_total = self.model.spam_total() as f64;
        let total_count = ham_total + spam_total;

        let prior_ham = ham_total / total_count;
        let prior_spam = spam_total / total_count;

        let mut log_evidence = 0.0;
        let mut log_likelihood_spam = 0.0;
        let mut log_likelihood_ham = 0.0;

        for word in document.words() {
            let spam_freq = spam_frequencies.get(word);
            let ham_freq = ham_frequencies.get(word);
            let total_word_freq = spam_freq + ham_freq;

            if total_word_freq < self.model.min_word_freq() {
                continue;
            }

            if spam_freq != 0 {
                log_likelihood_spam += (spam_freq as f64 / spam_total).ln();
            }

            if ham_freq != 0 {
                log_likelihood_ham += (ham_freq as f64 / ham_total).ln();
            }

            if total_word_freq != 0 {
                log_evidence += (total_word_freq as f64 / total_count).ln();
            }
        }

        Ok(ClassificationResult {
            spam_score: log_likelihood_spam + self.prior_mode.prior_term(prior_spam) - log_evidence,
            ham_score: log_likelihood_ham + self.prior_mode.prior_term(prior_ham) - log_evidence,
        })
    }
}
