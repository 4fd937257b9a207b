fn render(items: &[&str]) -> String {
    let mut rv = String::from("<ul>\n");
    for item in items {
        rv.push_str(&format!("  <li>{}</li>\n", item));
    }
    rv.push_str("</ul>\n");
    rv
}

fn main() {
    let output = render(&["milk", "eggs", "flour"]);
    mdiff::assert_output_eq!(
        output,
        "<ul>\n  <li>milk</li>\n  <li>brown eggs</li>\n  <li>flour</li>\n</ul>\n",
        "shopping list"
    );
}
