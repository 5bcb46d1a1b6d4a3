use anyhow::Result;
use sakhi::config::{Config, SpeechEngineKind};
use sakhi::context::LanguageContext;
use sakhi::i18n::{LanguageCode, TranslationKey, TranslationValidator};
use sakhi::preference::{FileStorage, PreferenceStore, Storage};
use sakhi::screen::{Handoff, LanguageSelectionScreen};
use sakhi::speech::{CommandEngine, RecordingEngine, SpeechAdapter, SpeechEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

enum Flow {
    Continue,
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sakhi=info".parse()?),
        )
        .init();

    info!("Starting Sakhi language session");

    let config = Config::from_env()?;

    let engine: Box<dyn SpeechEngine> = match config.speech_engine {
        SpeechEngineKind::Espeak => Box::new(CommandEngine::new(config.speech_command.clone())),
        SpeechEngineKind::Silent => Box::new(RecordingEngine::new()),
    };
    let preferences = PreferenceStore::new(FileStorage::new(&config.preferences_path));
    let speech = SpeechAdapter::new(engine, config.speech_settings());
    let mut context = LanguageContext::init(preferences, speech);
    let mut screen = LanguageSelectionScreen::new();

    print_options(&screen, &context);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Flow::Quit = run_command(line.trim(), &mut screen, &mut context).await {
                    break;
                }
            }
            Some(event) = context.next_speech_event() => {
                context.handle_speech_event(event);
            }
        }
    }

    let report = context.speech_metrics().report();
    info!("Speech metrics: {}", serde_json::to_string(&report)?);

    Ok(())
}

async fn run_command<E: SpeechEngine, S: Storage>(
    line: &str,
    screen: &mut LanguageSelectionScreen,
    context: &mut LanguageContext<E, S>,
) -> Flow {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let argument = parts.next().unwrap_or("").trim();

    match command {
        "" => {}
        "list" => print_options(screen, context),
        "hear" => match LanguageCode::from_code(argument) {
            Ok(language) => {
                screen.preview(context, language);
            }
            Err(e) => println!("{}", e),
        },
        "choose" => match LanguageCode::from_code(argument) {
            Ok(language) => {
                let Handoff::Onboarding { delay } = screen.choose(context, language);
                tokio::time::sleep(delay).await;
                let welcome = context.translations().welcome;
                println!("{} {}", language.option().flag, welcome);
                context.speak(welcome);
            }
            Err(e) => println!("{}", e),
        },
        "say" => match TranslationKey::from_name(argument) {
            Some(key) => {
                let phrase = context.translations().get(key);
                println!("{}", phrase);
                context.speak(phrase);
            }
            None => println!("Unknown phrase '{}'", argument),
        },
        "status" => {
            let report = context.speech_metrics().report();
            println!(
                "language: {}  speaking: {}  utterances: {}  fallbacks: {}  failures: {}",
                context.language(),
                context.is_speaking(),
                report.requested,
                report.fallbacks,
                report.failures
            );
        }
        "check" => {
            let report = TranslationValidator::validate_catalog();
            for error in &report.errors {
                warn!("Catalog error: {}", error);
            }
            for warning in &report.warnings {
                warn!("Catalog warning: {}", warning);
            }
            println!(
                "{} errors, {} warnings",
                report.errors.len(),
                report.warnings.len()
            );
        }
        "help" => print_help(),
        "quit" | "exit" => return Flow::Quit,
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }

    Flow::Continue
}

fn print_options<E: SpeechEngine, S: Storage>(
    screen: &LanguageSelectionScreen,
    context: &LanguageContext<E, S>,
) {
    println!("{}", context.translations().select_language);
    for option in screen.options() {
        let marker = if option.code == context.language() { "*" } else { " " };
        println!(
            "{} {} {:<10} {:<8} ({})",
            marker, option.flag, option.native_name, option.name, option.code
        );
    }
}

fn print_help() {
    println!("Commands: list | hear <code> | choose <code> | say <phrase> | status | check | quit");
}
