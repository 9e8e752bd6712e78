//! The text-completion collaborator.
//!
//! When the rule tables have nothing to say, or the user explicitly asks for
//! a richer answer, the mentor hands a templated prompt to a [`Completer`].
//! Failures are reported to the user as text; nothing is retried.

use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

use bon::Builder;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Environment variable holding the completer command line.
pub const COMMAND_VAR: &str = "MENTOR_COMPLETER";

/// Environment variable holding the API credential for the completer.
pub const API_KEY_VAR: &str = "MENTOR_API_KEY";

/// Model requested when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Token budget requested when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// How long a completion may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

static RATE_LIMITED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b429\b|rate limit|too many requests").expect("compile rate limit regex")
});

static UNAUTHORIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b40[13]\b|unauthorized|forbidden").expect("compile unauthorized regex")
});

/// Produces free-form text for a prompt.
pub trait Completer {
    /// Complete `request`, returning the generated text.
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

impl<C: Completer + ?Sized> Completer for &C {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request)
    }
}

impl<C: Completer + ?Sized> Completer for Box<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request)
    }
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CompletionRequest {
    /// The full prompt text.
    #[builder(into)]
    pub prompt: String,

    /// The model to complete with.
    #[builder(into, default = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on the length of the completion.
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

/// Why a completion failed.
///
/// Every variant is shown to the user as a short message; none of them ends
/// the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("No API key configured. Set {variable} and try again.")]
    MissingCredential { variable: String },

    #[error("The completion service is busy (rate limited). Wait a moment and try again.")]
    RateLimited,

    #[error("The completion service rejected the API key.")]
    Unauthorized,

    #[error("The completion service took too long to answer.")]
    Timeout { after: Duration },

    #[error("Could not reach the completion service: {reason}")]
    ConnectionError { reason: String },

    #[error("The completion service failed with code {code}.")]
    UpstreamError { code: i32 },
}

impl CompletionError {
    /// Classify a failed completion from its exit code and error output.
    ///
    /// Only unambiguous markers (HTTP status codes as whole words and explicit
    /// keywords) are recognized; anything else is reported as an upstream
    /// failure.
    pub fn classify(code: Option<i32>, stderr: &str) -> Self {
        if RATE_LIMITED.is_match(stderr) {
            return Self::RateLimited;
        }
        if UNAUTHORIZED.is_match(stderr) {
            return Self::Unauthorized;
        }
        let lower = stderr.to_lowercase();
        if lower.contains("timed out") || lower.contains("timeout") {
            return Self::Timeout {
                after: Duration::ZERO,
            };
        }
        if lower.contains("connection refused") || lower.contains("could not resolve") {
            return Self::ConnectionError {
                reason: stderr.trim().to_string(),
            };
        }
        Self::UpstreamError {
            code: code.unwrap_or(-1),
        }
    }
}

/// A completer backed by an external command.
///
/// The prompt is written to the command's stdin and the completion is read
/// from its stdout. `--model <model> --max-tokens <n>` are appended to the
/// configured arguments, and the API key is passed through the environment.
#[derive(Debug, Clone, Builder)]
pub struct CommandCompleter {
    /// The program to run.
    #[builder(into)]
    program: String,

    /// Arguments passed before the model options.
    #[builder(default)]
    args: Vec<String>,

    /// Credential forwarded in [`API_KEY_VAR`].
    api_key: Option<String>,

    /// Deadline for a single completion.
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
}

impl CommandCompleter {
    /// Build a completer from a shell-style command line.
    pub fn parse(command_line: &str) -> Result<Self, CompletionError> {
        let mut words = shell_words::split(command_line)
            .map_err(|e| CompletionError::ConnectionError {
                reason: format!("invalid {COMMAND_VAR}: {e}"),
            })?
            .into_iter();
        let program = words.next().ok_or_else(|| CompletionError::ConnectionError {
            reason: format!("{COMMAND_VAR} is empty"),
        })?;
        Ok(Self::builder().program(program).args(words.collect()).build())
    }

    /// Build a completer from [`COMMAND_VAR`] and [`API_KEY_VAR`].
    ///
    /// Returns `None` when no completer command is configured.
    pub fn from_env(timeout: Duration) -> Result<Option<Self>, CompletionError> {
        let Some(command_line) = std::env::var(COMMAND_VAR).ok().filter(|s| !s.trim().is_empty())
        else {
            return Ok(None);
        };
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|s| !s.is_empty());
        let completer = Self::parse(&command_line)?;
        Ok(Some(Self {
            api_key,
            timeout,
            ..completer
        }))
    }

    fn wait(&self, child: &mut std::process::Child) -> Result<ExitStatus, CompletionError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    debug!(timeout = ?self.timeout, "completion timed out, killing process");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CompletionError::Timeout {
                        after: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    return Err(CompletionError::ConnectionError {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

impl Completer for CommandCompleter {
    #[instrument(skip_all, fields(program = %self.program, model = %request.model))]
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let Some(api_key) = &self.api_key else {
            return Err(CompletionError::MissingCredential {
                variable: API_KEY_VAR.to_string(),
            });
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(["--model", &request.model])
            .args(["--max-tokens", &request.max_tokens.to_string()])
            .env(API_KEY_VAR, api_key)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(?cmd, "spawning completer");
        let mut child = cmd.spawn().map_err(|e| CompletionError::ConnectionError {
            reason: e.to_string(),
        })?;

        // Drain both pipes on their own threads so a chatty child can't block
        // on a full pipe while we wait for it.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        // The prompt can be larger than the pipe buffer, so it is written on
        // its own thread; the deadline must hold even if the child never
        // reads it.
        if let Some(stdin) = child.stdin.take() {
            feed(stdin, request.prompt.clone());
        }

        let status = self.wait(&mut child)?;
        let stdout = stdout.map(collect).unwrap_or_default();
        let stderr = stderr.map(collect).unwrap_or_default();

        if !status.success() {
            debug!(?status, %stderr, "completer failed");
            return Err(CompletionError::classify(status.code(), &stderr));
        }
        let completion = stdout.trim();
        if completion.is_empty() {
            debug!(?status, %stderr, "completer produced no output");
            return Err(CompletionError::UpstreamError {
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(completion.to_string())
    }
}

fn feed(mut pipe: impl Write + Send + 'static, prompt: String) {
    thread::spawn(move || {
        trace!(%prompt, "writing prompt");
        // A child that exits without reading its input reports through its
        // exit status and output instead.
        let _ = pipe.write_all(prompt.as_bytes());
    });
}

fn drain(mut pipe: impl Read + Send + 'static) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = pipe.read_to_string(&mut buf);
        buf
    })
}

fn collect(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
