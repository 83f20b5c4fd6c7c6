use proptest::prelude::*;

use sectora_export::markup::{Line, outline, rendered_lines};
use sectora_export::pdf::{TextStyle, layout};

/// A single report line: heading, title, body or blank.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[가-힣a-z ]{1,20}".prop_map(|s| format!("## {s}")),
        "[가-힣a-z ]{1,20}".prop_map(|s| format!("# {s}")),
        "[가-힣a-zA-Z0-9%.,]{1,40}",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn arb_body() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..30).prop_map(|lines| lines.join("\n"))
}

// ---------------------------------------------------------------------------
// 1. Tokenizer: only blank and bare title lines are dropped
// ---------------------------------------------------------------------------
proptest! {
    #[test]
    fn rendered_lines_keep_every_heading_and_body(body in arb_body()) {
        let expected: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !(l.starts_with("# ")))
            .map(|l| l.strip_prefix("## ").map(str::trim).unwrap_or(l).to_string())
            .collect();
        let actual: Vec<String> = rendered_lines(&body)
            .into_iter()
            .map(|l| match l {
                Line::Heading(t) | Line::Body(t) => t.to_string(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

// ---------------------------------------------------------------------------
// 2. Outline: every heading becomes exactly one section, in order
// ---------------------------------------------------------------------------
proptest! {
    #[test]
    fn outline_sections_match_headings(body in arb_body()) {
        let headings: Vec<&str> = rendered_lines(&body)
            .into_iter()
            .filter_map(|l| match l {
                Line::Heading(h) => Some(h),
                _ => None,
            })
            .collect();
        let o = outline(&body);
        let titles: Vec<&str> = o.sections.iter().map(|(h, _)| *h).collect();
        prop_assert_eq!(titles, headings);
    }
}

// ---------------------------------------------------------------------------
// 3. PDF layout: heading order survives and lines never run backwards
// ---------------------------------------------------------------------------
proptest! {
    #[test]
    fn pdf_layout_preserves_heading_order(body in arb_body()) {
        let placed = layout("보고서", &body);
        prop_assert_eq!(placed[0].style, TextStyle::Title);

        let placed_headings: Vec<&str> = placed
            .iter()
            .filter(|l| l.style == TextStyle::Heading)
            .map(|l| l.text.as_str())
            .collect();
        let headings: Vec<&str> = rendered_lines(&body)
            .into_iter()
            .filter_map(|l| match l {
                Line::Heading(h) => Some(h),
                _ => None,
            })
            .collect();
        prop_assert_eq!(placed_headings, headings);

        for pair in placed.windows(2) {
            prop_assert!(
                pair[1].page > pair[0].page || pair[1].baseline > pair[0].baseline
            );
        }
    }
}
