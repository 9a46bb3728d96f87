//! Error types and diagnostic reporting

use super::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use thiserror::Error;

/// Packer error, with a manifest location where there is one
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("Manifest error at {span:?}: {message}")]
    Manifest { message: String, span: Span },

    #[error("Duplicate asset '{name}' at {span:?}")]
    Duplicate { name: String, span: Span, first: Span },

    #[error("Asset error at {span:?}: {message}")]
    Asset { message: String, span: Span },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn manifest(message: impl Into<String>, span: Span) -> Self {
        Self::Manifest {
            message: message.into(),
            span,
        }
    }

    pub fn duplicate(name: impl Into<String>, span: Span, first: Span) -> Self {
        Self::Duplicate {
            name: name.into(),
            span,
            first,
        }
    }

    pub fn asset(message: impl Into<String>, span: Span) -> Self {
        Self::Asset {
            message: message.into(),
            span,
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Primary manifest location, if the error has one
    pub fn span(&self) -> Option<Span> {
        match self {
            PackError::Lexer { span, .. }
            | PackError::Parser { span, .. }
            | PackError::Manifest { span, .. }
            | PackError::Duplicate { span, .. }
            | PackError::Asset { span, .. } => Some(*span),
            PackError::Layout { .. } | PackError::Io(_) => None,
        }
    }

    fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            PackError::Lexer { message, span } => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![Label::primary(file_id, *span).with_message(message)]),

            PackError::Parser { message, span } => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![Label::primary(file_id, *span).with_message(message)]),

            PackError::Manifest { message, span } => Diagnostic::error()
                .with_message("Invalid manifest")
                .with_labels(vec![Label::primary(file_id, *span).with_message(message)]),

            PackError::Duplicate { name, span, first } => Diagnostic::error()
                .with_message(format!("asset '{}' is defined more than once", name))
                .with_labels(vec![
                    Label::primary(file_id, *span).with_message("redefined here"),
                    Label::secondary(file_id, *first).with_message("first defined here"),
                ]),

            PackError::Asset { message, span } => Diagnostic::error()
                .with_message("Asset error")
                .with_labels(vec![Label::primary(file_id, *span).with_message(message)]),

            PackError::Layout { message } => {
                Diagnostic::error().with_message(format!("Layout error: {}", message))
            }

            PackError::Io(err) => Diagnostic::error().with_message(format!("IO error: {}", err)),
        }
    }
}

pub type PackResult<T> = Result<T, PackError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Print an error to stderr
    pub fn report_error(&self, file_id: usize, error: &PackError) {
        self.emit(&mut self.writer.lock(), file_id, error);
    }

    /// Render an error without colour
    pub fn render(&self, file_id: usize, error: &PackError) -> String {
        let mut out = NoColor::new(Vec::new());
        self.emit(&mut out, file_id, error);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    fn emit(&self, writer: &mut dyn WriteColor, file_id: usize, error: &PackError) {
        let diagnostic = error.to_diagnostic(file_id);
        if let Err(e) = term::emit(writer, &self.config, &self.files, &diagnostic) {
            log::error!("cannot render diagnostic: {}", e);
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
