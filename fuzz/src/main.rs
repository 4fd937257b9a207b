#![allow(clippy::all)]

use afl::fuzz;
use arbitrary::Arbitrary;
use mdiff::{Algorithm, DiffConfig, Granularity, Palette};

#[derive(Arbitrary, Debug)]
enum FuzzGranularity {
    Words,
    Chars,
}

#[derive(Arbitrary, Debug)]
enum FuzzAlgorithm {
    Myers,
    Lcs,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    algorithm: FuzzAlgorithm,
    granularity: FuzzGranularity,
    cutoff: u8,
    whole_line_fallback: bool,
    actual: String,
    expected: String,
}

fn main() {
    fuzz!(|data: FuzzInput| {
        let mut config = DiffConfig::default();
        config
            .algorithm(match data.algorithm {
                FuzzAlgorithm::Myers => Algorithm::Myers,
                FuzzAlgorithm::Lcs => Algorithm::Lcs,
            })
            .granularity(match data.granularity {
                FuzzGranularity::Words => Granularity::Words,
                FuzzGranularity::Chars => Granularity::Chars,
            })
            .cutoff(f32::from(data.cutoff) / 255.0)
            .whole_line_fallback(data.whole_line_fallback);

        let diff = config.diff_lines(&data.actual, &data.expected);
        let tokens = diff.tokens();
        let plain: String = tokens
            .iter()
            .filter(|token| !token.is_hint())
            .map(|token| token.to_string())
            .collect();

        let rendered = diff
            .colorize_with(&Palette::plain())
            .expect("hints produced by the differ are always valid");
        assert_eq!(rendered, plain);
        diff.colorize()
            .expect("hints produced by the differ are always valid");
    });
}
