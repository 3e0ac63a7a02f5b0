//! Default encoder argument sets.

use super::args::ArgumentSet;

/// High quality 10-bit x264 settings for 23.976 fps film sources.
pub fn x264_defaults() -> ArgumentSet {
    let mut args = ArgumentSet::from([
        ("fps", "24000/1001"),
        ("profile", "high10"),
        ("bframes", "8"),
        ("b-adapt", "2"),
        ("b-pyramid", "normal"),
        ("ref", "9"),
        ("crf", "16"),
        ("rc-lookahead", "60"),
        ("aq-mode", "2"),
        ("qcomp", "0.70"),
        ("aq-strength", "0.8"),
        ("partitions", "all"),
        ("direct", "auto"),
        ("me", "umh"),
        ("merange", "24"),
        ("subme", "10"),
        ("trellis", "2"),
        ("psy-rd", "0.6:0.1"),
    ]);
    args.insert_flag("no-fast-pskip");
    args
}

/// [`x264_defaults`] for the avs4x26x wrapper, which feeds 16-bit
/// AviSynth output to the x264 binary at `x264_location`.
pub fn avs4x26x_defaults(x264_location: &str) -> ArgumentSet {
    let mut args = x264_defaults();
    // Passed through as a generic value, so it carries its own quotes
    args.insert("x26x-binary", format!("\"{}\"", x264_location));
    args.insert("input-depth", "16");
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x264_defaults_render() {
        assert_eq!(
            x264_defaults().render(),
            " --aq-mode 2 --aq-strength 0.8 --b-adapt 2 --b-pyramid normal --bframes 8 \
             --crf 16 --direct auto --fps 24000/1001 --me umh --merange 24 --no-fast-pskip \
             --partitions all --profile high10 --psy-rd 0.6:0.1 --qcomp 0.70 \
             --rc-lookahead 60 --ref 9 --subme 10 --trellis 2"
        );
    }

    #[test]
    fn wrapper_adds_binary_and_depth() {
        let args = avs4x26x_defaults("C:\\x264.exe");
        assert_eq!(args.get("x26x-binary"), Some("\"C:\\x264.exe\""));
        assert_eq!(args.get("input-depth"), Some("16"));
        assert_eq!(args.len(), x264_defaults().len() + 2);
    }
}
