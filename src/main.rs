use std::io::{stdout, Write};

use anyhow::{bail, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bayesfilter::{
    read_document, Class, ClassifierConfig, CorpusEvaluator, CorpusTally, DocumentClassifier, ModelTrainer,
    PriorMode, VocabularyModel,
};

fn training_args<'a, 'b>(command: App<'a, 'b>) -> App<'a, 'b> {
    command
        .arg(
            Arg::with_name("ham")
                .long("ham")
                .value_name("DIR")
                .help("Directory of ham training documents, one document per file. May be repeated.")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .required(true),
        )
        .arg(
            Arg::with_name("spam")
                .long("spam")
                .value_name("DIR")
                .help("Directory of spam training documents, one document per file. May be repeated.")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .required(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("JSON file with classifier settings")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("min-word-freq")
                .long("min-word-freq")
                .value_name("COUNT")
                .help("Ignore words seen fewer times than this during training")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-prior")
                .long("log-prior")
                .help("Add the logarithm of class priors to scores instead of the raw probability"),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("bayesfilter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Train a spam filter on labeled directories and classify documents with it.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            training_args(SubCommand::with_name("evaluate"))
                .about("Count how many documents of each directory are classified as spam or ham")
                .arg(
                    Arg::with_name("classify")
                        .long("classify")
                        .value_name("DIR")
                        .help("Directory of documents to classify. May be repeated.")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print the tallies as JSON"),
                ),
        )
        .subcommand(
            training_args(SubCommand::with_name("score"))
                .about("Print the spam and ham scores of individual files")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File to score")
                        .takes_value(true)
                        .multiple(true)
                        .required(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("evaluate", Some(matches)) => do_evaluate(matches),
        ("score", Some(matches)) => do_score(matches),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<ClassifierConfig> {
    let mut config = match matches.value_of("config") {
        Some(path) => ClassifierConfig::load_from_file(path).with_context(|| format!("loading config {}", path))?,
        None => ClassifierConfig::default(),
    };

    if let Some(value) = matches.value_of("min-word-freq") {
        config.min_word_freq = value
            .parse()
            .with_context(|| format!("invalid --min-word-freq {:?}", value))?;
    }

    if matches.is_present("log-prior") {
        config.prior_mode = PriorMode::Log;
    }

    Ok(config)
}

fn train(matches: &ArgMatches, config: &ClassifierConfig) -> Result<VocabularyModel> {
    let mut trainer = ModelTrainer::new();

    for &class in &[Class::Ham, Class::Spam] {
        for dir in matches.values_of(class.name()).into_iter().flatten() {
            let report = trainer
                .add_directory(class, dir)
                .with_context(|| format!("training on {} directory {}", class, dir))?;
            info!(%class, dir, documents = report.documents, "loaded training directory");
        }
    }

    let model = trainer.into_model(config.min_word_freq);
    model
        .check()
        .context("training data leaves nothing to classify with")?;

    Ok(model)
}

#[derive(Serialize)]
struct DirectoryReport<'a> {
    directory: &'a str,
    #[serde(flatten)]
    tally: CorpusTally,
}

fn do_evaluate(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let model = train(matches, &config)?;
    let evaluator = CorpusEvaluator::with_prior_mode(&model, config.prior_mode);

    let mut reports = Vec::new();
    for dir in matches.values_of("classify").into_iter().flatten() {
        let tally = evaluator
            .evaluate_directory(dir)
            .with_context(|| format!("classifying {}", dir))?;
        reports.push(DirectoryReport { directory: dir, tally });
    }

    let mut output = stdout();
    if matches.is_present("json") {
        serde_json::to_writer_pretty(&mut output, &reports)?;
        output.write_all(b"\n")?;
        return Ok(());
    }

    for report in &reports {
        writeln!(output, ">> {} <<", report.directory)?;
        writeln!(output, "spam: {}", report.tally.spam)?;
        writeln!(output, "ham: {}", report.tally.ham)?;
        if report.tally.errored > 0 {
            writeln!(output, "errored: {}", report.tally.errored)?;
        }
    }

    Ok(())
}

fn do_score(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let model = train(matches, &config)?;
    let classifier = DocumentClassifier::with_prior_mode(&model, config.prior_mode);

    let mut output = stdout();
    let mut failures = 0;
    for path in matches.values_of("input").into_iter().flatten() {
        let text = match read_document(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "skipping unreadable file");
                failures += 1;
                continue;
            }
        };

        let result = classifier.classify(&text)?;
        writeln!(
            output,
            "{}\t{}\tspam={:.6}\tham={:.6}",
            path,
            result.class(),
            result.spam_score,
            result.ham_score
        )?;
    }

    if failures > 0 {
        bail!("{} file(s) could not be read", failures);
    }

    Ok(())
}
