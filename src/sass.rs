//! Stylesheet compilation.
//!
//! [`SassCompiler`] is the seam between the combiner and whatever
//! actually compiles stylesheets. [`CssCompiler`] is the built-in backend:
//! it accepts the CSS-compatible subset and handles formatting through
//! `lightningcss`. A full Sass implementation plugs in through the same
//! trait.

use lightningcss::error::Error as CssError;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use std::fmt;
use std::path::Path;

use crate::config::{OutputStyle, SassConfig};
use crate::error::{CompileError, Result};
use crate::plugin::read_source;
use crate::site::Site;

/// Options passed to every compile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SassOptions {
    pub style: OutputStyle,
    pub trace: bool,
    pub line_numbers: bool,
}

impl SassOptions {
    pub const fn from_config(config: &SassConfig) -> Self {
        Self {
            style: config.output_style,
            trace: config.trace,
            line_numbers: config.line_numbers,
        }
    }

    pub const fn for_site(site: &Site) -> Self {
        Self::from_config(&site.config.sass)
    }

    /// Options for a combined artifact: line numbers are meaningless there.
    pub const fn combined(mut self) -> Self {
        self.line_numbers = false;
        self
    }
}

pub trait SassCompiler {
    /// Compile in-memory source text.
    fn compile(&self, source: &str, options: &SassOptions) -> std::result::Result<String, CompileError>;

    /// Compile a file. Read failures surface as missing files.
    fn compile_file(&self, path: &Path, options: &SassOptions) -> Result<String> {
        let source = read_source(path)?;
        let css = self
            .compile(&source, options)
            .map_err(|e| e.with_file(path))?;
        Ok(css)
    }
}

/// Built-in backend on top of `lightningcss`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssCompiler;

impl CssCompiler {
    fn render(
        &self,
        source: &str,
        filename: &str,
        options: &SassOptions,
    ) -> std::result::Result<String, CompileError> {
        let minify = options.style == OutputStyle::Compressed;

        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: filename.to_string(),
                ..ParserOptions::default()
            },
        )
        .map_err(|e| compile_error(&e, options.trace))?;

        if minify {
            stylesheet
                .minify(MinifyOptions::default())
                .map_err(|e| compile_error(&e, options.trace))?;
        }

        let result = stylesheet
            .to_css(PrinterOptions {
                minify,
                ..PrinterOptions::default()
            })
            .map_err(|e| compile_error(&e, options.trace))?;

        Ok(result.code)
    }
}

impl SassCompiler for CssCompiler {
    fn compile(&self, source: &str, options: &SassOptions) -> std::result::Result<String, CompileError> {
        self.render(source, "stdin", options)
    }

    fn compile_file(&self, path: &Path, options: &SassOptions) -> Result<String> {
        let source = read_source(path)?;
        let filename = path.to_string_lossy();
        let css = self
            .render(&source, &filename, options)
            .map_err(|e| e.with_file(path))?;

        if options.line_numbers && options.style != OutputStyle::Compressed {
            return Ok(format!("/* line 1, {filename} */\n{css}"));
        }
        Ok(css)
    }
}

fn compile_error<T: fmt::Display + fmt::Debug>(err: &CssError<T>, trace: bool) -> CompileError {
    let message = if trace {
        format!("{} ({:?})", err.kind, err.kind)
    } else {
        err.kind.to_string()
    };
    let error = CompileError::new(message);
    match &err.loc {
        // lightningcss lines are 0-based
        Some(loc) => error.with_location(loc.line + 1, loc.column),
        None => error,
    }
}
