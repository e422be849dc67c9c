#![allow(missing_docs)]

use jsonstrip::{ScanState, StreamingStripper, StripOptions, strip};
use rstest::rstest;

const MANIFEST: &str = include_str!("fixtures/manifest.jsonc");

fn strip_in_chunks(input: &[u8], size: usize) -> (Vec<u8>, ScanState) {
    let mut stripper = StreamingStripper::new(StripOptions::default());
    let mut out = Vec::new();
    for chunk in input.chunks(size) {
        out.extend_from_slice(stripper.feed(chunk).expect("chunk failed"));
    }
    let state = stripper.finish().expect("finish failed");
    (out, state)
}

#[rstest]
fn manifest_in_chunks(#[values(1, 2, 3, 5, 7, 64, 4096)] size: usize) {
    let expected = strip(MANIFEST.as_bytes()).unwrap();
    let (out, state) = strip_in_chunks(MANIFEST.as_bytes(), size);
    assert_eq!(out, expected);
    assert_eq!(state, ScanState::Normal);
}

#[rstest]
#[case::multibyte_in_string("[\"héllo wörld 😀\"] // ✓", "[\"héllo wörld 😀\"] ")]
#[case::multibyte_in_comment("[1 /* ✓✓✓ */, 2]", "[1 , 2]")]
fn multibyte_split_everywhere(#[case] input: &str, #[case] expected: &str) {
    for size in 1..=input.len() {
        let (out, _) = strip_in_chunks(input.as_bytes(), size);
        assert_eq!(out, expected.as_bytes(), "chunk size {size}");
    }
}

#[rstest]
#[case::inside_string("{\"a\": \"unterminated", ScanState::InQuote)]
#[case::after_backslash("{\"a\": \"x\\", ScanState::Escape)]
#[case::after_slash("{\"a\": 1}/", ScanState::TestComment)]
#[case::inside_line_comment("{} // bye", ScanState::LineComment)]
#[case::inside_block_comment("{} /* bye", ScanState::BlockComment)]
#[case::after_block_star("{} /* bye *", ScanState::TestEndBlockComment)]
fn reports_final_state(#[case] input: &str, #[case] state: ScanState) {
    let (_, end) = strip_in_chunks(input.as_bytes(), 4);
    assert_eq!(end, state);
}

#[test]
fn error_index_is_global() {
    let mut stripper = StreamingStripper::default();
    stripper.feed(b"[1,\n").unwrap();
    stripper.feed(b" 2,").unwrap();
    let err = stripper.feed(b" \xFF]").unwrap_err();
    assert_eq!(err.index, 8);
    assert_eq!((err.line, err.column), (2, 5));
    assert_eq!(stripper.position(), (8, 2, 5));
}
