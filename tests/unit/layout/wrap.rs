use super::*;

#[test]
fn empty_text_has_no_lines() {
    for n in [1, 5, 31, 1000] {
        assert!(layout_text("", n).is_empty());
    }
}

#[test]
fn greedy_packing_is_inclusive_at_the_limit() {
    assert_eq!(
        layout_text("one two three four", 7),
        vec!["one two", "three", "four"]
    );
    // "one two" is exactly 7 characters; one less forces a break.
    assert_eq!(
        layout_text("one two three four", 6),
        vec!["one", "two", "three", "four"]
    );
}

#[test]
fn oversized_word_stays_whole() {
    assert_eq!(
        layout_text("HelloWorldThisIsOneLongWord", 5),
        vec!["HelloWorldThisIsOneLongWord"]
    );
    assert_eq!(
        layout_text("a HelloWorldThisIsOneLongWord b", 5),
        vec!["a", "HelloWorldThisIsOneLongWord", "b"]
    );
}

#[test]
fn single_line_when_everything_fits() {
    assert_eq!(layout_text("Shop Now", 31), vec!["Shop Now"]);
}

#[test]
fn counts_characters_not_bytes() {
    assert_eq!(layout_text("héllo wörld", 11), vec!["héllo wörld"]);
    assert_eq!(layout_text("héllo wörld", 10), vec!["héllo", "wörld"]);
}

#[test]
fn editor_caption_wraps_at_31() {
    let lines = layout_text("1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs", 31);
    assert_eq!(
        lines,
        vec!["1 & 2 BHK Luxury Apartments at", "just Rs.34.97 Lakhs"]
    );
}

#[test]
fn lines_fit_and_rejoin_to_the_input() {
    let texts = [
        "the quick brown fox jumps over the lazy dog",
        "a bb ccc dddd eeeee ffffff",
        "lorem ipsum dolor sit amet consectetur adipiscing elit sed do",
        "x",
    ];
    for text in texts {
        let longest = text.split(' ').map(|w| w.chars().count()).max().unwrap();
        for max in longest..longest + 12 {
            let lines = layout_text(text, max);
            assert!(
                lines.iter().all(|l| l.chars().count() <= max),
                "{text:?} at {max}: {lines:?}"
            );
            assert_eq!(lines.join(" "), text, "{text:?} at {max}");
        }
    }
}
