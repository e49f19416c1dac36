//! `wkhtmltopdf` as a rendering engine.
//!
//! The executable is looked up in this order:
//! 1. the path given in configuration
//! 2. the `MD_BINDER_WKHTMLTOPDF` environment variable
//! 3. `wkhtmltopdf` on the system `PATH`

use super::{EngineFailure, RenderEngine, RenderJob};
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

pub const ENV_EXECUTABLE: &str = "MD_BINDER_WKHTMLTOPDF";

/// How often a running engine is checked on
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct Wkhtmltopdf {
    executable: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Wkhtmltopdf {
    /// `timeout` of `None` waits for as long as the engine takes
    pub fn new(executable: Option<PathBuf>, timeout: Option<Duration>) -> Wkhtmltopdf {
        Wkhtmltopdf {
            executable,
            timeout,
        }
    }

    fn locate(&self) -> Result<PathBuf, EngineFailure> {
        if let Some(path) = &self.executable {
            return if path.is_file() {
                Ok(path.clone())
            } else {
                Err(EngineFailure::NotFound(path.display().to_string()))
            };
        }
        if let Some(path) = std::env::var_os(ENV_EXECUTABLE) {
            let path = PathBuf::from(path);
            return if path.is_file() {
                Ok(path)
            } else {
                Err(EngineFailure::NotFound(format!(
                    "{} (from {ENV_EXECUTABLE})",
                    path.display()
                )))
            };
        }
        which::which("wkhtmltopdf")
            .map_err(|e| EngineFailure::NotFound(format!("wkhtmltopdf on PATH ({e})")))
    }

    /// Command-line arguments for `job`
    pub fn arguments(job: &RenderJob<'_>) -> Vec<OsString> {
        let options = job.options;
        let page = &options.page;

        let mut args: Vec<OsString> = Vec::default();
        let mut arg = |a: &str| args.push(OsString::from(a));

        arg("--page-size");
        arg(&page.size);
        arg("--margin-top");
        arg(&page.margin_top);
        arg("--margin-right");
        arg(&page.margin_right);
        arg("--margin-bottom");
        arg(&page.margin_bottom);
        arg("--margin-left");
        arg(&page.margin_left);
        arg("--encoding");
        arg("UTF-8");
        arg("--enable-local-file-access");

        if options.numbering() {
            let footer = &options.footer;
            arg("--footer-right");
            arg(&footer.text);
            arg("--footer-font-size");
            arg(&footer.font_size.to_string());
            arg("--footer-spacing");
            arg(&footer.spacing.to_string());
            if footer.line {
                arg("--footer-line");
            }
            let offset = options.numbering_offset();
            if offset != 0 {
                arg("--page-offset");
                arg(&offset.to_string());
            }
        }

        if let Some(cover) = job.cover {
            arg("cover");
            arg(cover);
        }
        arg(job.body);
        args.push(job.output.as_os_str().to_os_string());
        args
    }
}

impl RenderEngine for Wkhtmltopdf {
    fn name(&self) -> &str {
        "wkhtmltopdf"
    }

    fn render(&self, job: &RenderJob<'_>) -> Result<(), EngineFailure> {
        let executable = self.locate()?;
        let args = Wkhtmltopdf::arguments(job);
        log::debug!("running {} {:?}", executable.display(), args);

        let mut child = Command::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(EngineFailure::Spawn)?;

        // the engine reports progress on stderr; drain it so it can't block
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = pipe.read_to_end(&mut buffer);
                String::from_utf8_lossy(&buffer).into_owned()
            })
        });

        let started = Instant::now();
        let status = loop {
            match child.try_wait().map_err(EngineFailure::Spawn)? {
                Some(status) => break status,
                None => {
                    if let Some(timeout) = self.timeout {
                        if started.elapsed() >= timeout {
                            let _ = child.kill();
                            let _ = child.wait();
                            return Err(EngineFailure::Timeout(timeout));
                        }
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        };

        let stderr = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        log::debug!("engine finished with {status} after {:?}", started.elapsed());

        if status.success() {
            Ok(())
        } else {
            Err(EngineFailure::Exit {
                status: status.to_string(),
                stderr,
            })
        }
    }
}
