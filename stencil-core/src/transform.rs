//! Line filtering driven by live directives.

use miette::{NamedSource, SourceSpan};
use tracing::debug;

use crate::{
    ConditionalState, Constants, Directive, Error, IllegalTransition, Keyword, Result, Snippet,
};

/// Filter a snippet according to its live directives.
///
/// Live directive lines are removed, and content lines are kept only while
/// the active branch is enabled. Runs of blank lines in the output collapse
/// to a single blank line. Directive-shaped lines without the live marker
/// are content.
///
/// Fails without partial output on a malformed directive, an illegal
/// directive sequence, or a group left open at the end of input.
///
/// # Example
///
/// ```
/// use stencil_core::{Constants, Snippet, transform};
///
/// let template = Snippet::new(["#if X", "looks-like-directive", "#endif"]);
/// let output = transform(&template, &Constants::new()).unwrap();
/// assert_eq!(output, template);
/// ```
pub fn transform(snippet: &Snippet, constants: &Constants) -> Result<Snippet> {
    filter(snippet, constants).map_err(|failure| {
        let span = snippet_line_span(snippet, failure.line);
        failure.into_error(NamedSource::new("<snippet>", snippet.to_string()), span)
    })
}

/// Span of a 1-based line in the `\n`-joined text of `snippet`.
///
/// Counted from the lines themselves, so a line holding its own line break
/// is still labelled as a whole.
fn snippet_line_span(snippet: &Snippet, line: usize) -> Option<SourceSpan> {
    let text = snippet.lines().get(line.checked_sub(1)?)?;
    let offset: usize = snippet.iter().take(line - 1).map(|l| l.len() + 1).sum();
    Some(SourceSpan::from((offset, text.len())))
}

/// Why filtering stopped, before any source context is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub line: usize,
    pub text: String,
    pub kind: FailureKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    InvalidPattern(Keyword),
    Illegal(IllegalTransition),
    MissingEndIf,
}

impl Failure {
    pub(crate) fn into_error(
        self,
        src: NamedSource<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        let Failure { line, text, kind } = self;
        Box::new(match kind {
            FailureKind::InvalidPattern(keyword) => Error::InvalidPattern {
                line,
                text,
                keyword,
                src,
                span,
            },
            FailureKind::Illegal(IllegalTransition { directive, mode }) => {
                Error::UnexpectedDirective {
                    line,
                    text,
                    directive,
                    mode,
                    src,
                    span,
                }
            }
            FailureKind::MissingEndIf => Error::MissingEndIf {
                line,
                text,
                src,
                span,
            },
        })
    }
}

pub(crate) fn filter(
    snippet: &Snippet,
    constants: &Constants,
) -> std::result::Result<Snippet, Failure> {
    let mut state = ConditionalState::new();
    let mut output: Vec<String> = Vec::with_capacity(snippet.len());

    for (index, line) in snippet.iter().enumerate() {
        let number = index + 1;
        let fail = |kind| Failure {
            line: number,
            text: line.to_string(),
            kind,
        };

        let directive =
            Directive::parse(line).map_err(|e| fail(FailureKind::InvalidPattern(e.keyword)))?;

        if !directive.is_live() {
            if state.is_enabled() {
                push_collapsed(&mut output, line);
            }
            continue;
        }

        let transition = match directive {
            Directive::If { negate, name, .. } => state.enter_if(constants.evaluate(name, negate)),
            Directive::ElseIf { negate, name, .. } => {
                state.enter_elif(constants.evaluate(name, negate))
            }
            Directive::Else { .. } => state.enter_else(),
            Directive::EndIf { .. } => state.exit(),
            Directive::Plain => Ok(()),
        };
        transition.map_err(|illegal| fail(FailureKind::Illegal(illegal)))?;
    }

    if !state.is_closed() {
        let line = snippet.len();
        return Err(Failure {
            line,
            text: snippet.lines()[line - 1].clone(),
            kind: FailureKind::MissingEndIf,
        });
    }

    debug!(
        input = snippet.len(),
        output = output.len(),
        "filtered snippet"
    );
    Ok(Snippet::from(output))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn push_collapsed(output: &mut Vec<String>, line: &str) {
    let previous_blank = output.last().is_some_and(|last| is_blank(last));
    if is_blank(line) && previous_blank {
        return;
    }
    output.push(line.to_string());
}
