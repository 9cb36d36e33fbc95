//! Spam filtering with a word-frequency Naive Bayes model.
//!
//! Documents are split on whitespace and uppercased. Training counts how often
//! each word appears in ham and in spam; words seen fewer than a minimum
//! number of times (100 by default) carry no weight. A document is then scored
//! for both classes in log space and called spam only when its spam score is
//! strictly higher.
//!
//! # Training a model
//!
//! ```
//! use bayesfilter::{Class, ModelTrainer};
//!
//! let mut trainer = ModelTrainer::new();
//! trainer.add_documents_from_iter(Class::Ham, vec!["see you at the meeting"; 100]);
//! trainer.add_documents_from_iter(Class::Spam, vec!["free money now"; 100]);
//! trainer.add_documents_from_iter(Class::Spam, vec!["meeting"; 5]);
//! trainer.add_documents_from_iter(Class::Ham, vec!["free money"; 5]);
//!
//! let model = trainer.into_model(bayesfilter::MIN_WORD_FREQ);
//! ```
//!
//! Trainers can also read whole directories, one document per file, using
//! [`ModelTrainer::add_directory`].
//!
//! # Classifying
//!
//! ```
//! # use bayesfilter::{Class, ModelTrainer};
//! # let mut trainer = ModelTrainer::new();
//! # trainer.add_documents_from_iter(Class::Ham, vec!["see you at the meeting"; 100]);
//! # trainer.add_documents_from_iter(Class::Spam, vec!["free money now"; 100]);
//! # trainer.add_documents_from_iter(Class::Spam, vec!["meeting"; 5]);
//! # trainer.add_documents_from_iter(Class::Ham, vec!["free money"; 5]);
//! # let model = trainer.into_model(bayesfilter::MIN_WORD_FREQ);
//! use bayesfilter::{CorpusEvaluator, DocumentClassifier};
//!
//! let classifier = DocumentClassifier::new(&model);
//! assert_eq!(classifier.classify("FREE MONEY!")?.class(), Class::Spam);
//!
//! let tally = CorpusEvaluator::new(&model).evaluate(vec![Ok("free money"), Ok("the meeting")])?;
//! assert_eq!((tally.spam, tally.ham), (1, 1));
//! # Ok::<(), bayesfilter::DegenerateModelError>(())
//! ```

mod bag;
mod classifier;
mod config;
mod errors;
mod evaluator;
mod source;
mod tokenizer;
mod trainer;
mod vocabulary;

pub use crate::bag::BagOfWords;
pub use crate::classifier::{ClassificationResult, DocumentClassifier, PriorMode};
pub use crate::config::ClassifierConfig;
pub use crate::errors::{ConfigError, DegenerateModelError, DocumentReadError, EvaluationError};
pub use crate::evaluator::{CorpusEvaluator, CorpusTally};
pub use crate::source::{read_directory, read_document, walk_files};
pub use crate::tokenizer::{tokenize, Token, Tokens};
pub use crate::trainer::{ModelTrainer, TrainingReport};
pub use crate::vocabulary::{total_word_count, Class, VocabularyModel, MIN_WORD_FREQ};
