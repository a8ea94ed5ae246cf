// Terminal rendering for diagnostics.
//
// Kept separate from the diagnostic data structures so a different host
// (an LSP server, a test harness) could swap in another presentation
// without touching `Diagnostic`/`DiagnosticEngine` themselves.

use super::Diagnostic;
use crate::source::SourceMap;
use std::io;

/// Visual column width of `line[..column - 1]`, expanding tabs to the next
/// multiple of 8, matching the original implementation's `visual_column`.
fn visual_column(line: &str, column: u32) -> usize {
    let bytes = line.as_bytes();
    let upto = ((column as usize).saturating_sub(1)).min(bytes.len());
    let mut visual = 0usize;
    for &b in &bytes[..upto] {
        if b == b'\t' {
            visual += 8 - (visual % 8);
        } else {
            visual += 1;
        }
    }
    visual
}

/// Renders one diagnostic (and recursively its notes, indented two spaces
/// further each level) to `out`.
pub fn render(
    out: &mut impl io::Write,
    source_map: &SourceMap,
    diagnostic: &Diagnostic,
    indent: usize,
) -> io::Result<()> {
    let pad = "  ".repeat(indent);
    writeln!(
        out,
        "{pad}{}:{}:{}: {}: {}",
        source_map.filename(),
        diagnostic.range.start.line,
        diagnostic.range.start.column,
        diagnostic.level.as_str(),
        diagnostic.message
    )?;

    if diagnostic.range.single_line() {
        render_single_line(out, source_map, diagnostic, &pad)?;
    } else {
        render_multi_line(out, source_map, diagnostic, &pad)?;
    }

    for note in &diagnostic.notes {
        render(out, source_map, note, indent + 1)?;
    }

    Ok(())
}

fn render_single_line(
    out: &mut impl io::Write,
    source_map: &SourceMap,
    diagnostic: &Diagnostic,
    pad: &str,
) -> io::Result<()> {
    let line = source_map.get_line(diagnostic.range.start.line);
    if line.is_empty() {
        return Ok(());
    }
    writeln!(out, "{pad}    {line}")?;

    let start_col = visual_column(line, diagnostic.range.start.column);
    let mut end_col = visual_column(line, diagnostic.range.end.column);
    if end_col <= start_col {
        end_col = start_col + 1;
    }
    let highlight_len = end_col - start_col;
    writeln!(
        out,
        "{pad}    {}^{}",
        " ".repeat(start_col),
        "~".repeat(highlight_len - 1)
    )
}

fn render_multi_line(
    out: &mut impl io::Write,
    source_map: &SourceMap,
    diagnostic: &Diagnostic,
    pad: &str,
) -> io::Result<()> {
    let first_line = source_map.get_line(diagnostic.range.start.line);
    if !first_line.is_empty() {
        writeln!(out, "{pad}    {first_line}")?;
        let start_col = visual_column(first_line, diagnostic.range.start.column);
        let rest_of_line = if first_line.len() > start_col {
            first_line.len() - start_col
        } else {
            1
        };
        writeln!(
            out,
            "{pad}    {}^{}",
            " ".repeat(start_col),
            "~".repeat(rest_of_line - 1)
        )?;
    }

    if diagnostic.range.end.line > diagnostic.range.start.line + 1 {
        writeln!(out, "{pad}    ...")?;
    }

    let last_line = source_map.get_line(diagnostic.range.end.line);
    if !last_line.is_empty() && diagnostic.range.end.line != diagnostic.range.start.line {
        writeln!(out, "{pad}    {last_line}")?;
        let end_col = visual_column(last_line, diagnostic.range.end.column);
        let tildes = end_col.saturating_sub(1);
        writeln!(out, "{pad}    {}^", "~".repeat(tildes))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Position, Range};

    fn render_to_string(source_map: &SourceMap, diagnostic: &Diagnostic) -> String {
        let mut buf = Vec::new();
        render(&mut buf, source_map, diagnostic, 0).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn single_line_excerpt_has_caret_and_tildes() {
        let map = SourceMap::new("t.life", "let x = 01;\n");
        let diagnostic = Diagnostic::error(
            "leading zero not allowed",
            Range::new(Position::new(1, 9), Position::new(1, 11)),
        );
        let out = render_to_string(&map, &diagnostic);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "t.life:1:9: error: leading zero not allowed");
        assert_eq!(lines[1], "    let x = 01;");
        // columns 9..11 cover the two digits "01" -> 8 leading spaces, caret, one tilde
        assert_eq!(lines[2], format!("    {}^~", " ".repeat(8)));
    }

    #[test]
    fn tabs_widen_to_next_multiple_of_eight() {
        let map = SourceMap::new("t.life", "\tx");
        let diagnostic = Diagnostic::error("bad", Range::new(Position::new(1, 2), Position::new(1, 3)));
        let out = render_to_string(&map, &diagnostic);
        let caret_line = out.lines().nth(2).unwrap();
        // column 2 (the 'x') sits after one tab stop, which expands to 8 columns.
        assert_eq!(caret_line, format!("    {}^", " ".repeat(8)));
    }

    #[test]
    fn notes_are_indented_two_spaces_per_level() {
        let map = SourceMap::new("t.life", "fn f() {}\n");
        let diagnostic = Diagnostic::error(
            "duplicate definition of 'f'",
            Range::new(Position::new(1, 1), Position::new(1, 3)),
        )
        .with_note(Diagnostic::note(
            "previously defined here",
            Range::new(Position::new(1, 1), Position::new(1, 3)),
        ));
        let out = render_to_string(&map, &diagnostic);
        assert!(out.contains("  t.life:1:1: note: previously defined here"));
    }

    #[test]
    fn multi_line_range_shows_ellipsis_between_far_apart_lines() {
        let map = SourceMap::new("t.life", "a\nb\nc\nd\n");
        let diagnostic = Diagnostic::error(
            "spans several lines",
            Range::new(Position::new(1, 1), Position::new(4, 2)),
        );
        let out = render_to_string(&map, &diagnostic);
        assert!(out.contains("...\n"));
    }
}
