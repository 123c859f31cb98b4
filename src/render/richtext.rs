//! Markdown decoration of annotated text runs.

use crate::domain::RichTextRun;

/// Compose one run into its Markdown form.
///
/// Decorations nest in a fixed order, innermost first: code span, bold,
/// italic, strikethrough, underline, highlight. A link target wraps the fully
/// decorated text last.
pub fn compose_run(run: &RichTextRun) -> String {
    let mut text = run.plain_text.clone();
    let style = &run.annotations;
    if style.code {
        text = format!("`{text}`");
    }
    if style.bold {
        text = format!("**{text}**");
    }
    if style.italic {
        text = format!("*{text}*");
    }
    if style.strikethrough {
        text = format!("~~{text}~~");
    }
    if style.underline {
        text = format!("<u>{text}</u>");
    }
    if style.is_highlight() {
        text = format!("<mark>{text}</mark>");
    }
    match &run.href {
        Some(href) => format!("[{text}]({href})"),
        None => text,
    }
}

/// Concatenate the composed runs of a block in original order, with no
/// separator between runs.
pub fn compose_runs(runs: &[RichTextRun]) -> String {
    runs.iter().map(compose_run).collect()
}
