//! Line-oriented report markup.
//!
//! Report bodies use `## ` for section headings. A bare `# ` line is the
//! report's own title, which every backend replaces with the title it is given.

/// One trimmed line of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Title(&'a str),
    Heading(&'a str),
    Body(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            Line::Blank
        } else if let Some(rest) = line.strip_prefix("## ") {
            Line::Heading(rest.trim())
        } else if let Some(rest) = line.strip_prefix("# ") {
            Line::Title(rest.trim())
        } else {
            Line::Body(line)
        }
    }

    /// Whether a backend renders this line.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Line::Heading(_) | Line::Body(_))
    }
}

/// Split `body` into tagged lines, preserving order.
pub fn tokenize(body: &str) -> Vec<Line<'_>> {
    body.lines().map(Line::parse).collect()
}

/// Only the lines a backend renders: headings and body lines, in order.
pub fn rendered_lines(body: &str) -> Vec<Line<'_>> {
    tokenize(body)
        .into_iter()
        .filter(|l| l.is_rendered())
        .collect()
}

/// Body lines grouped under the heading they follow. Lines before the first
/// heading are returned separately.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline<'a> {
    pub preamble: Vec<&'a str>,
    pub sections: Vec<(&'a str, Vec<&'a str>)>,
}

pub fn outline(body: &str) -> Outline<'_> {
    let mut out = Outline::default();
    for line in tokenize(body) {
        match line {
            Line::Heading(h) => out.sections.push((h, Vec::new())),
            Line::Body(b) => match out.sections.last_mut() {
                Some((_, lines)) => lines.push(b),
                None => out.preamble.push(b),
            },
            Line::Blank | Line::Title(_) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_kind() {
        assert_eq!(Line::parse("   "), Line::Blank);
        assert_eq!(Line::parse("# 배터리 보고서"), Line::Title("배터리 보고서"));
        assert_eq!(Line::parse("  ## 시장 규모  "), Line::Heading("시장 규모"));
        assert_eq!(Line::parse("- 성장률 12%"), Line::Body("- 성장률 12%"));
    }

    #[test]
    fn deeper_headings_are_body_text() {
        assert_eq!(Line::parse("### 세부"), Line::Body("### 세부"));
        assert_eq!(Line::parse("#hashtag"), Line::Body("#hashtag"));
    }

    #[test]
    fn rendered_lines_drop_blank_and_title() {
        let body = "# 제목\n\n## 개요\n첫 줄\n\n둘째 줄\n## 결론\n끝";
        let lines = rendered_lines(body);
        assert_eq!(
            lines,
            vec![
                Line::Heading("개요"),
                Line::Body("첫 줄"),
                Line::Body("둘째 줄"),
                Line::Heading("결론"),
                Line::Body("끝"),
            ]
        );
    }

    #[test]
    fn outline_groups_by_heading() {
        let body = "intro\n## A\na1\na2\n## B\n\n## C\nc1";
        let o = outline(body);
        assert_eq!(o.preamble, vec!["intro"]);
        assert_eq!(
            o.sections,
            vec![("A", vec!["a1", "a2"]), ("B", vec![]), ("C", vec!["c1"])]
        );
    }
}
