use annotate_snippets::{
	display_list::{DisplayList, FormatOptions},
	snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};
use itertools::Itertools;
use std::fmt::Display;
use std::ops::Range;

use crate::parsing::ParseError;

/// Byte range in the whole input.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalSpan(pub Range<usize>);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spanned<T> {
	pub span: GlobalSpan,
	pub inner: T,
}

impl<T> Spanned<T> {
	pub fn new(t: T, span: GlobalSpan) -> Self {
		Spanned {
			span,
			inner: t,
		}
	}
}

impl<T: Display> Spanned<T> {
	/// Error message with the spanned part of `string` underlined.
	pub fn error_snippet(&self, string: &str) -> String {
		let text = self.inner.to_string();
		render_snippet(&text, None, string, self.span.0.clone(), "")
	}
}

/// 1-based number and byte range of the line holding `position`.
fn find_line(string: &str, position: usize) -> (usize, Range<usize>) {
	let position = position.min(string.len());
	let start = string[..position].rfind('\n').map_or(0, |index| index + 1);
	let end = string[position..].find('\n').map_or(string.len(), |index| position + index);
	let line_no = string[..start].matches('\n').count() + 1;
	(line_no, start..end)
}

fn render_snippet(title: &str, footer: Option<&str>, string: &str, span: Range<usize>, label: &str) -> String {
	let (line_no, first_line) = find_line(string, span.start);
	let (_, last_line) = find_line(string, span.end);
	let source = &string[first_line.start..last_line.end];

	let chars_before = |position: usize| string[first_line.start..position.min(last_line.end)].chars().count();
	let start = chars_before(span.start);
	let end = chars_before(span.end).max(start);

	let snippet = Snippet {
		title: Some(Annotation {
			label: Some(title),
			id: None,
			annotation_type: AnnotationType::Error,
		}),
		footer: footer
			.map(|footer| Annotation {
				label: Some(footer),
				id: None,
				annotation_type: AnnotationType::Note,
			})
			.into_iter()
			.collect(),
		slices: vec![
			Slice {
				source,
				line_start: line_no,
				origin: None,
				fold: true,
				annotations: vec![
					SourceAnnotation {
						label,
						annotation_type: AnnotationType::Error,
						range: (start, end),
					},
				],
			},
		],
		opt: FormatOptions {
			color: true,
			..Default::default()
		},
	};
	DisplayList::from(snippet).to_string()
}

/// `rust-peg` error as a snippet pointing at the unexpected token.
pub fn peg_error_snippet(err: &ParseError, string: &str) -> String {
	let expected = format!("expected tokens: {}", err.expected.tokens().sorted().join(", "));
	let start = err.location.offset.min(string.len());
	let end = string[start..].chars().next().map_or(start, |ch| start + ch.len_utf8());
	render_snippet("unexpected token", Some(expected.as_str()), string, start..end, "unexpected token")
}
