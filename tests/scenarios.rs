use console::strip_ansi_codes;
use mdiff::{
    diff_strings, extract_ranges, Algorithm, ChangeKind, ChangeRange, DiffConfig, Granularity,
    Palette,
};

const MARKER: &str = "\u{1b}[34m";
const RED: &str = "\u{1b}[31m";
const CYAN: &str = "\u{1b}[36m";
const RESET: &str = "\u{1b}[0m";

fn plain_tokens(actual: &str, expected: &str) -> String {
    DiffConfig::default()
        .diff_lines(actual, expected)
        .tokens()
        .iter()
        .filter(|t| !t.is_hint())
        .map(|t| t.to_string())
        .collect()
}

#[test]
fn test_identical_inputs() {
    let rendered = diff_strings("a\nb\nc\n", "a\nb\nc\n").unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m} {r} a\n{m} {r} b\n{m} {r} c\n",
            m = MARKER,
            r = RESET
        )
    );
    assert!(!rendered.contains(RED));
    assert!(!rendered.contains(CYAN));
}

#[test]
fn test_completely_different_line() {
    let rendered = diff_strings("foo\n", "bar\n").unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} {red}foo{r}\n{m}+{r} {cyan}bar{r}\n",
            m = MARKER,
            r = RESET,
            red = RED,
            cyan = CYAN
        )
    );
}

#[test]
fn test_changed_word() {
    let rendered = diff_strings("hello world\n", "hello earth\n").unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} hello {red}world{r}\n{m}+{r} hello {cyan}earth{r}\n",
            m = MARKER,
            r = RESET,
            red = RED,
            cyan = CYAN
        )
    );
}

#[test]
fn test_missing_trailing_newline() {
    assert_eq!(
        diff_strings("x", "y\n").unwrap(),
        diff_strings("x\n", "y\n").unwrap()
    );
    assert_eq!(
        diff_strings("x", "x").unwrap(),
        format!("{} {} x\n", MARKER, RESET)
    );
}

#[test]
fn test_all_replaced_after_removed_line() {
    assert_eq!(
        extract_ranges("^^^^^", true, 5).unwrap(),
        vec![ChangeRange::new(ChangeKind::Delete, 0, 5)]
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        ("a\nb", "a\nc"),
        ("", "x"),
        ("one\ntwo\nthree", "one\nthree"),
        ("same", "same"),
    ];
    for &(actual, expected) in &inputs {
        let with_newlines = (format!("{}\n", actual), format!("{}\n", expected));
        assert_eq!(
            diff_strings(actual, expected).unwrap(),
            diff_strings(&with_newlines.0, &with_newlines.1).unwrap()
        );
    }
}

#[test]
fn test_content_round_trip() {
    let cases = [
        ("a\nb\nc\n", "a\nb\nc\n"),
        ("foo\n", "bar\n"),
        ("hello world\n", "hello earth\n"),
        (
            "fn main() {\n    println!(\"hi\");\n}\n",
            "fn main() {\n    println!(\"hello\");\n    return;\n}\n",
        ),
        ("<p>a</p>\n<p>b</p>\n", "<p>b</p>\n<p>c</p>\n"),
        ("trailing \nspace\n", "trailing\nspace\n"),
        ("\r\nwindows\r\n", "\nwindows\r\n"),
        ("ünïcödé\n", "unicode\n"),
    ];
    for &(actual, expected) in &cases {
        let rendered = diff_strings(actual, expected).unwrap();
        assert_eq!(strip_ansi_codes(&rendered), plain_tokens(actual, expected));

        let plain = DiffConfig::default()
            .diff_lines(actual, expected)
            .colorize_with(&Palette::plain())
            .unwrap();
        assert_eq!(plain, plain_tokens(actual, expected));
    }
}

#[test]
fn test_every_line_has_a_leading_marker() {
    let rendered = diff_strings(
        "keep\nchange this line\ndrop\n",
        "keep\nchange that line\nnew\nmore\n",
    )
    .unwrap();
    let lines: Vec<&str> = rendered.split_inclusive('\n').collect();
    assert_eq!(lines.len(), 6);
    for line in lines {
        assert!(line.starts_with(MARKER), "{:?}", line);
        let first = line[MARKER.len()..].chars().next().unwrap();
        assert!(" +-".contains(first), "{:?}", line);
        assert!(line[MARKER.len() + first.len_utf8()..].starts_with(RESET));
    }
}

#[test]
fn test_spans_never_cover_newlines() {
    let rendered = diff_strings("abc \n", "abc\n").unwrap();
    for line in rendered.split_inclusive('\n') {
        assert!(!line.contains(&format!("\n{}", RESET)), "{:?}", line);
    }
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} abc{red} {r}\n{m}+{r} abc\n",
            m = MARKER,
            r = RESET,
            red = RED
        )
    );
}

#[test]
fn test_char_granularity() {
    let rendered = DiffConfig::default()
        .granularity(Granularity::Chars)
        .diff_lines("color\n", "colour\n")
        .colorize()
        .unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} color\n{m}+{r} colo{cyan}u{r}r\n",
            m = MARKER,
            r = RESET,
            cyan = CYAN
        )
    );
}

#[test]
fn test_without_whole_line_fallback() {
    let rendered = DiffConfig::default()
        .whole_line_fallback(false)
        .diff_lines("foo\n", "bar\n")
        .colorize()
        .unwrap();
    assert_eq!(
        rendered,
        format!("{m}-{r} foo\n{m}+{r} bar\n", m = MARKER, r = RESET)
    );
}

#[test]
fn test_insert_and_delete_only() {
    let rendered = diff_strings("a\nb\n", "a\nx\nb\n").unwrap();
    assert_eq!(
        rendered,
        format!("{m} {r} a\n{m}+{r} x\n{m} {r} b\n", m = MARKER, r = RESET)
    );
    let rendered = diff_strings("a\nx\nb\n", "a\nb\n").unwrap();
    assert_eq!(
        rendered,
        format!("{m} {r} a\n{m}-{r} x\n{m} {r} b\n", m = MARKER, r = RESET)
    );
}

#[test]
fn test_neighbours_do_not_change_a_pair() {
    let rendered = diff_strings("hello world\nfoo\nbar\n", "hello earth\nqux\nzap\n").unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} hello {red}world{r}\n{m}+{r} hello {cyan}earth{r}\n\
             {m}-{r} {red}foo{r}\n{m}-{r} {red}bar{r}\n\
             {m}+{r} {cyan}qux{r}\n{m}+{r} {cyan}zap{r}\n",
            m = MARKER,
            r = RESET,
            red = RED,
            cyan = CYAN
        )
    );

    let rendered = DiffConfig::default()
        .whole_line_fallback(false)
        .diff_lines("hello world\nfoo\nbar\n", "hello earth\nqux\nzap\n")
        .colorize()
        .unwrap();
    assert_eq!(
        rendered,
        format!(
            "{m}-{r} hello {red}world{r}\n{m}+{r} hello {cyan}earth{r}\n\
             {m}-{r} foo\n{m}-{r} bar\n{m}+{r} qux\n{m}+{r} zap\n",
            m = MARKER,
            r = RESET,
            red = RED,
            cyan = CYAN
        )
    );
}

#[test]
fn test_large_replaced_block() {
    let lines = 1000;
    let actual: String = (0..lines).map(|i| format!("actual {}\n", i)).collect();
    let expected: String = (0..lines).map(|i| format!("expected {}\n", i)).collect();

    let diff = DiffConfig::default().diff_lines(&actual, &expected);
    assert_eq!(diff.ops().len(), 1);
    assert_eq!(diff.tokens().len(), lines * 4);

    let rendered = diff.colorize().unwrap();
    assert_eq!(rendered.lines().count(), lines * 2);
    let first = format!("{}-{} {}actual{} 0", MARKER, RESET, RED, RESET);
    let last = format!("{}+{} {}expected{} 999", MARKER, RESET, CYAN, RESET);
    assert_eq!(rendered.lines().next(), Some(first.as_str()));
    assert_eq!(rendered.lines().last(), Some(last.as_str()));
}

#[test]
fn test_algorithms_render_alike() {
    let actual = "<ul>\n<li>milk</li>\n<li>eggs</li>\n</ul>\n";
    let expected = "<ul>\n<li>milk</li>\n<li>brown eggs</li>\n<li>flour</li>\n</ul>\n";
    let myers = DiffConfig::default()
        .algorithm(Algorithm::Myers)
        .diff_lines(actual, expected)
        .colorize()
        .unwrap();
    let lcs = DiffConfig::default()
        .algorithm(Algorithm::Lcs)
        .diff_lines(actual, expected)
        .colorize()
        .unwrap();
    assert_eq!(myers, lcs);
}
