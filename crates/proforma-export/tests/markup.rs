use proforma_export::markup::{parse_line, strip_markup, Segment};

fn seg(text: &str, bold: bool, underline: bool) -> Segment {
    Segment {
        text: text.to_string(),
        bold,
        underline,
    }
}

#[test]
fn plain_line_is_one_segment() {
    assert_eq!(parse_line("No lesion."), [seg("No lesion.", false, false)]);
}

#[test]
fn bold_and_underline_segments() {
    assert_eq!(
        parse_line("<strong>TECHNIQUE :</strong> CT, <u>contrast</u>."),
        [
            seg("TECHNIQUE :", true, false),
            seg(" CT, ", false, false),
            seg("contrast", false, true),
            seg(".", false, false),
        ]
    );
}

#[test]
fn nested_tags_combine() {
    assert_eq!(
        parse_line("<strong>a<u>b</u></strong>"),
        [seg("a", true, false), seg("b", true, true)]
    );
}

#[test]
fn unclosed_tag_runs_to_end_and_unknown_tags_are_text() {
    assert_eq!(parse_line("<u>open"), [seg("open", false, true)]);
    assert_eq!(parse_line("<em>x</em>"), [seg("<em>x</em>", false, false)]);
}

#[test]
fn non_ascii_text_survives() {
    assert_eq!(parse_line("<u>lésion</u> hépatique"), [
        seg("lésion", false, true),
        seg(" hépatique", false, false),
    ]);
}

#[test]
fn strip_keeps_blank_lines() {
    assert_eq!(
        strip_markup("\n<strong>CONCLUSION :</strong>\nFoo"),
        "\nCONCLUSION :\nFoo"
    );
}
