use mdiff::{DiffConfig, Granularity};

fn main() {
    let actual = "<ul>\n<li>milk</li>\n<li>eggs</li>\n<li>flour</li>\n</ul>";
    let expected = "<ul>\n<li>milk</li>\n<li>brown eggs</li>\n<li>sugar</li>\n<li>flour</li>\n</ul>\n";

    for &granularity in &[Granularity::Words, Granularity::Chars] {
        let diff = DiffConfig::default()
            .granularity(granularity)
            .diff_lines(actual, expected);
        match diff.colorize() {
            Ok(rendered) => print!("{:?}:\n{}\n", granularity, rendered),
            Err(err) => eprintln!("error: {}", err),
        }
    }
}
