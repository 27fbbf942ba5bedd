//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;
use url::Url;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Start a command with arguments without waiting for it to exit.
    fn spawn(&self, cmd: &str, args: &[&str]) -> io::Result<()>;
}

/// Opens a reference link for the user (browser, pager, ...).
pub trait LinkOpener: Send + Sync {
    /// Open `url`. Returns once the opener command has been launched.
    fn open(&self, url: &str) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner using std::process.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn spawn(&self, cmd: &str, args: &[&str]) -> io::Result<()> {
        // detached: the browser outlives the menu prompt
        Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
    }
}

/// Opens links with a configured browser command or the platform default opener.
///
/// The URL is passed as a single argument, never through a shell. On Windows
/// this means `rundll32 url.dll,FileProtocolHandler` instead of `cmd /C start`.
pub struct SystemLinkOpener {
    browser: Option<String>,
    cmd: Arc<dyn CommandRunner>,
}

impl SystemLinkOpener {
    pub fn new(browser: Option<String>, cmd: Arc<dyn CommandRunner>) -> Self {
        Self { browser, cmd }
    }

    /// Program and full argv that open `url` on `os` (a `std::env::consts::OS` value).
    fn command_line(&self, os: &str, url: &str) -> (String, Vec<String>) {
        let (program, mut args) =
            match self.browser.as_deref().filter(|b| !b.trim().is_empty()) {
                Some(browser) => {
                    let mut parts = browser.split_whitespace().map(str::to_string);
                    let program = parts.next().unwrap_or_default();
                    (program, parts.collect())
                }
                None => match os {
                    "windows" => (
                        "rundll32".to_string(),
                        vec!["url.dll,FileProtocolHandler".to_string()],
                    ),
                    "macos" => ("open".to_string(), Vec::new()),
                    _ => ("xdg-open".to_string(), Vec::new()),
                },
            };
        args.push(url.to_string());
        (program, args)
    }
}

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to open non-http link: {url}"),
            ));
        }

        let (program, args) = self.command_line(std::env::consts::OS, parsed.as_str());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!("opening link: {} {:?}", program, args);

        self.cmd.spawn(&program, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const HISTORY: &str = "https://en.wikipedia.org/w/index.php?title=Lion&action=history";

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl CommandRunner for RecordingRunner {
        fn spawn(&self, cmd: &str, args: &[&str]) -> io::Result<()> {
            self.calls.lock().unwrap().push((
                cmd.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
            Ok(())
        }
    }

    fn default_opener() -> SystemLinkOpener {
        SystemLinkOpener::new(None, Arc::new(RecordingRunner::default()))
    }

    #[test]
    fn given_configured_browser_when_opening_then_passes_url_as_last_arg() {
        let runner = Arc::new(RecordingRunner::default());
        let opener = SystemLinkOpener::new(Some("firefox --new-tab".to_string()), runner.clone());

        opener.open("https://en.wikipedia.org/wiki/Tiger_shark").unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "firefox");
        assert_eq!(
            calls[0].1,
            vec!["--new-tab", "https://en.wikipedia.org/wiki/Tiger_shark"]
        );
    }

    #[test]
    fn given_windows_and_query_with_ampersand_when_building_command_then_no_cmd_shell() {
        let (program, args) = default_opener().command_line("windows", HISTORY);

        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", HISTORY]);
    }

    #[test]
    fn given_unix_platforms_when_building_command_then_url_is_single_arg() {
        let opener = default_opener();
        assert_eq!(
            opener.command_line("linux", HISTORY),
            ("xdg-open".to_string(), vec![HISTORY.to_string()])
        );
        assert_eq!(
            opener.command_line("macos", HISTORY),
            ("open".to_string(), vec![HISTORY.to_string()])
        );
    }

    #[test]
    fn given_query_with_ampersand_when_opening_then_url_reaches_runner_intact() {
        let runner = Arc::new(RecordingRunner::default());
        let opener = SystemLinkOpener::new(None, runner.clone());

        opener.open(HISTORY).unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].1.last().map(String::as_str), Some(HISTORY));
    }

    #[test]
    fn given_non_http_link_when_opening_then_rejected_without_running() {
        let runner = Arc::new(RecordingRunner::default());
        let opener = SystemLinkOpener::new(None, runner.clone());

        let err = opener.open("file:///etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = opener.open("not a url; rm -rf /").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(runner.calls.lock().unwrap().is_empty());
    }
}
