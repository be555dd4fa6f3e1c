//! OCR backend that shells out to the Tesseract command-line tool.
//!
//! Invocation shape is `tesseract <image> stdout -l <lang>`: recognized
//! text arrives on stdout, diagnostics on stderr. No intermediate files
//! are involved.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use slidescan_core::ocr::{OcrEngine, OcrError};

/// Poll interval while waiting for the engine process under a deadline.
const WAIT_POLL: Duration = Duration::from_millis(25);

/// OCR engine backed by the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
    timeout: Option<Duration>,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseractEngine {
    /// Engine using `tesseract` from PATH and the English model.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            timeout: None,
        }
    }

    /// Use a specific recognition language (the `-l` argument).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Kill the engine process if one image takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Invoke a specific executable instead of `tesseract` from PATH.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Arguments passed to the binary for one image.
    fn args(&self, image: &Path) -> Vec<OsString> {
        vec![
            image.as_os_str().to_os_string(),
            OsString::from("stdout"),
            OsString::from("-l"),
            OsString::from(&self.language),
        ]
    }

    fn run(&self, image: &Path) -> Result<Output, OcrError> {
        let mut command = Command::new(&self.binary);
        command
            .args(self.args(image))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match self.timeout {
            None => command
                .output()
                .map_err(|err| spawn_error(&self.binary, err)),
            Some(limit) => self.run_with_deadline(command, limit),
        }
    }

    /// Wait for the child under a deadline, draining its pipes on
    /// helper threads so a chatty process cannot block on a full pipe.
    fn run_with_deadline(&self, mut command: Command, limit: Duration) -> Result<Output, OcrError> {
        let mut child = command
            .spawn()
            .map_err(|err| spawn_error(&self.binary, err))?;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_reader = std::thread::spawn(move || read_pipe(stdout_pipe));
        let stderr_reader = std::thread::spawn(move || read_pipe(stderr_pipe));

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() >= limit {
                        let _ = child.kill();
                        let _ = child.wait();
                        // The readers are not joined: descendants of the
                        // killed child may still hold the pipe write ends
                        // open, and the threads exit once those close.
                        drop(stdout_reader);
                        drop(stderr_reader);
                        return Err(OcrError::TimedOut(limit));
                    }
                    std::thread::sleep(WAIT_POLL);
                }
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(OcrError::Failed(format!(
                        "could not wait for engine process: {err}"
                    )));
                }
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        Ok(Output {
            status,
            stdout,
            stderr,
        })
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

fn spawn_error(binary: &Path, err: std::io::Error) -> OcrError {
    if err.kind() == std::io::ErrorKind::NotFound {
        OcrError::Unavailable(format!("'{}' not found on PATH", binary.display()))
    } else {
        OcrError::Unavailable(format!("could not launch '{}': {err}", binary.display()))
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn extract_text(&self, path: &Path) -> Result<String, OcrError> {
        log::debug!("Running {} on {}", self.name(), path.display());
        let output = self.run(path)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            if detail.is_empty() {
                return Err(OcrError::Failed(format!(
                    "engine exited with {}",
                    output.status
                )));
            }
            return Err(OcrError::Failed(detail.to_string()));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.trim_end().to_string())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
