//! Non-fatal build diagnostics.
//!
//! Components never print or log directly when something is wrong but
//! survivable; they hand a [`Diagnostic`] to the sink they were given. The
//! binary uses [`LogDiagnostics`], which forwards to the `log` facade, while
//! tests use [`CollectedDiagnostics`] to assert on what was reported.

use std::fmt;
use std::path::PathBuf;

/// What kind of resource could not be found
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    Metadata,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Stylesheet => write!(f, "stylesheet"),
            ResourceKind::Metadata => write!(f, "metadata file"),
            ResourceKind::Image => write!(f, "image"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A referenced resource doesn't exist on disk; the build carries on without it
    MissingResource {
        kind: ResourceKind,
        /// The reference as it was written (or configured)
        reference: String,
        /// Where we looked for it
        resolved: PathBuf,
    },
    /// A resource exists but couldn't be read
    UnreadableResource {
        kind: ResourceKind,
        path: PathBuf,
        reason: String,
    },
    /// A scratch artifact couldn't be deleted
    Cleanup { path: PathBuf, reason: String },
    /// The build stopped; nothing was written to the output
    Aborted { reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingResource {
                kind,
                reference,
                resolved,
            } => {
                if PathBuf::from(reference) == *resolved {
                    write!(f, "missing {kind}: {}", resolved.display())
                } else {
                    write!(
                        f,
                        "missing {kind}: `{reference}` (resolved to {})",
                        resolved.display()
                    )
                }
            }
            Diagnostic::UnreadableResource { kind, path, reason } => {
                write!(f, "unable to read {kind} {}: {reason}", path.display())
            }
            Diagnostic::Cleanup { path, reason } => {
                write!(
                    f,
                    "failed to remove intermediate file {}: {reason}",
                    path.display()
                )
            }
            Diagnostic::Aborted { reason } => write!(f, "build aborted: {reason}"),
        }
    }
}

/// A sink for diagnostics, injected into every pipeline stage
pub trait Diagnostics {
    fn warn(&mut self, diagnostic: Diagnostic);
    fn error(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade, keeping a tally for the summary
#[derive(Debug, Default)]
pub struct LogDiagnostics {
    pub warnings: usize,
    pub errors: usize,
}

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.warnings += 1;
        log::warn!("{diagnostic}");
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.errors += 1;
        log::error!("{diagnostic}");
    }
}

/// Records diagnostics in the order they were reported
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

#[cfg(test)]
impl Diagnostics for CollectedDiagnostics {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }
}
