//! Speech engine backed by an external synthesizer program (`espeak-ng`).
//!
//! Each utterance runs as one child process; cancelling aborts the task that
//! owns the child, which kills it. Must be used from inside a tokio runtime.

use crate::speech::engine::{
    primary_subtag, EventSender, SpeechEngine, SpeechErrorKind, SpeechEvent, Utterance, Voice,
};
use regex::Regex;
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// espeak-ng speaking rate (words per minute) at rate 1.0
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// espeak-ng pitch (0-99) at pitch 1.0
const BASE_PITCH: f32 = 50.0;

static MISSING_VOICE_REGEX: OnceLock<Regex> = OnceLock::new();

pub struct CommandEngine {
    program: String,
    voices: Vec<Voice>,
    current: Option<JoinHandle<()>>,
}

impl CommandEngine {
    /// Create an engine for `program`, discovering its installed voices.
    ///
    /// A program that cannot be run yields an engine with no voices; every
    /// utterance will then fail with a synthesis error.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        let voices = match std::process::Command::new(&program)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) if output.status.success() => {
                parse_voice_list(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                warn!("{} --voices exited with {}", program, output.status);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to list voices with {}: {}", program, e);
                Vec::new()
            }
        };

        info!("Speech engine {} has {} voices", program, voices.len());

        Self {
            program,
            voices,
            current: None,
        }
    }

    fn build_command(&self, utterance: &Utterance) -> Command {
        let voice = utterance
            .voice
            .as_ref()
            .map(|voice| voice.id.clone())
            .unwrap_or_else(|| default_voice_for(&utterance.locale));

        let mut command = Command::new(&self.program);
        command
            .arg("-v")
            .arg(voice)
            .arg("-s")
            .arg(words_per_minute(utterance.rate).to_string())
            .arg("-p")
            .arg(espeak_pitch(utterance.pitch).to_string())
            .arg("--")
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl SpeechEngine for CommandEngine {
    fn list_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }

    fn speak(&mut self, utterance: Utterance, events: EventSender) {
        self.cancel();

        let mut command = self.build_command(&utterance);
        let id = utterance.id;

        self.current = Some(tokio::spawn(async move {
            let child = match command.spawn() {
                Ok(child) => child,
                Err(e) => {
                    let _ = events.send(SpeechEvent::failed(
                        id,
                        SpeechErrorKind::SynthesisFailed(e.to_string()),
                    ));
                    return;
                }
            };

            let _ = events.send(SpeechEvent::started(id));

            let event = match child.wait_with_output().await {
                Ok(output) if output.status.success() => SpeechEvent::ended(id),
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    debug!("Synthesizer exited with {}: {}", output.status, stderr.trim());
                    SpeechEvent::failed(id, classify_failure(&stderr))
                }
                Err(e) => SpeechEvent::failed(id, SpeechErrorKind::SynthesisFailed(e.to_string())),
            };
            let _ = events.send(event);
        }));
    }
}

impl Drop for CommandEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  hi              --/M      Hindi              inc/hi
/// ```
fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_priority, lang, _age_gender, name, ..] => Some(Voice::new(*lang, *name, *lang)),
                _ => None,
            }
        })
        .collect()
}

/// Map synthesizer stderr to an error kind.
///
/// Only espeak-ng's missing-voice messages count as unavailable:
/// "voice 'xx' not found", "The specified espeak-ng voice does not exist."
/// and the older "Failed to read voice 'xx'".
fn classify_failure(stderr: &str) -> SpeechErrorKind {
    let regex = MISSING_VOICE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)voice\s+\S+\s+not found|voice does not exist|failed to read voice")
            .expect("valid regex")
    });
    if regex.is_match(stderr) {
        SpeechErrorKind::LanguageUnavailable
    } else {
        SpeechErrorKind::SynthesisFailed(stderr.trim().to_string())
    }
}

fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate.clamp(0.1, 10.0)).round() as u32
}

fn espeak_pitch(pitch: f32) -> u32 {
    (BASE_PITCH * pitch.clamp(0.0, 2.0)).round().min(99.0) as u32
}

/// Voice argument for an utterance with no explicit voice.
fn default_voice_for(locale: &str) -> String {
    primary_subtag(locale).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICES_OUTPUT: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  en-us           --/M      English_(America)  gmw/en-US            (en 10)
 5  hi              --/M      Hindi              inc/hi
 5  ta              --/M      Tamil              dra/ta
";

    // ==================== Voice List Tests ====================

    #[test]
    fn test_parse_voice_list() {
        let voices = parse_voice_list(VOICES_OUTPUT);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0], Voice::new("en-us", "English_(America)", "en-us"));
        assert_eq!(voices[1].lang, "hi");
        assert!(voices[2].matches_locale("ta-IN"));
    }

    #[test]
    fn test_parse_voice_list_empty() {
        assert!(parse_voice_list("").is_empty());
        assert!(parse_voice_list("Pty Language Age/Gender VoiceName File\n").is_empty());
    }

    #[test]
    fn test_parse_voice_list_skips_short_lines() {
        let voices = parse_voice_list("header\n 5 hi\n\n 5 ta --/M Tamil dra/ta\n");
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].id, "ta");
    }

    // ==================== Failure Classification Tests ====================

    #[test]
    fn test_classify_missing_voice() {
        assert_eq!(
            classify_failure("Error: voice 'xx' not found\n"),
            SpeechErrorKind::LanguageUnavailable
        );
    }

    #[test]
    fn test_classify_missing_voice_variants() {
        for stderr in [
            "The specified espeak-ng voice does not exist.\n",
            "Failed to read voice 'ta'\n",
        ] {
            assert_eq!(
                classify_failure(stderr),
                SpeechErrorKind::LanguageUnavailable
            );
        }
    }

    #[test]
    fn test_classify_unrelated_voice_mention_is_synthesis_failure() {
        for stderr in [
            "Error: cannot open audio device for voice output",
            "language data file corrupt",
        ] {
            assert_eq!(
                classify_failure(stderr),
                SpeechErrorKind::SynthesisFailed(stderr.to_string())
            );
        }
    }

    #[test]
    fn test_classify_other_failure() {
        assert_eq!(
            classify_failure("  audio device busy \n"),
            SpeechErrorKind::SynthesisFailed("audio device busy".to_string())
        );
    }

    // ==================== Parameter Mapping Tests ====================

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute(1.0), 175);
        assert_eq!(words_per_minute(2.0), 350);
    }

    #[test]
    fn test_default_voice_for() {
        assert_eq!(default_voice_for("hi-IN"), "hi");
        assert_eq!(default_voice_for("TA_in"), "ta");
    }

    #[test]
    fn test_espeak_pitch() {
        assert_eq!(espeak_pitch(1.0), 50);
        assert_eq!(espeak_pitch(5.0), 99);
        assert_eq!(espeak_pitch(-1.0), 0);
    }

    // ==================== Process Tests ====================

    #[tokio::test]
    async fn test_missing_program_reports_failure() {
        let mut engine = CommandEngine::new("sakhi-test-no-such-synthesizer");
        assert!(engine.list_voices().is_empty());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        engine.speak(
            Utterance {
                id: crate::speech::engine::UtteranceId(1),
                text: "hello".to_string(),
                locale: "en-US".to_string(),
                voice: None,
                rate: 1.0,
                pitch: 1.0,
            },
            tx,
        );

        let event = rx.recv().await.expect("event");
        assert!(matches!(
            event.kind,
            crate::speech::engine::SpeechEventKind::Failed(SpeechErrorKind::SynthesisFailed(_))
        ));
    }
}
