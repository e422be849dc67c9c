#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonstrip::{OutputMode, StreamingStripper, StripOptions, Stripped, strip_json_comments};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Comment-ish fragments spliced between values. Some are deliberately
/// unterminated or look like comments without being one.
static COMMENT_TABLE: &[&[u8]] = &[
    b"// line\n",
    b"//\n",
    b"/**/",
    b"/* block */",
    b"/* multi\nline */",
    b"/*** stars ***/",
    b"/* // inner */",
    b"// /* inner\n",
    b"/",
    b"*/",
    b"/*",
    b"\"//\"",
    b"\"\\\"/*\"",
    "/* ünïcödé ✓ */".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size {
            let limit = max_size - prefix;
            prefix += append_comment(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            prefix += append_value(&mut data[prefix..], size, limit);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append one comment fragment, but never exceed `limit`. Returns the number
/// of bytes written.
fn append_comment(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let c = COMMENT_TABLE[rng.random_range(0..COMMENT_TABLE.len())];
        if c.len() > limit {
            return 0;
        }
        buf[..c.len()].copy_from_slice(c);
        c.len()
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec_pretty(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn strip_chunked(data: &[u8], split_seed: u64) -> Result<Vec<u8>, jsonstrip::StripError> {
    let mut stripper = StreamingStripper::default();
    let mut out = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let size = (split_seed as usize % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        out.extend_from_slice(stripper.feed(head)?);
        rest = tail;
    }
    stripper.finish()?;
    Ok(out)
}

fn check(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes(data[1..5].try_into().unwrap()));
    let data = &data[HEADER..];

    let options = StripOptions {
        mode: OutputMode::Copy,
        panic_on_error: false,
    };
    let mut input = data.to_vec();
    let copied = strip_json_comments(&mut input, options).map(|r| match r {
        Stripped::Copied(out) => out,
        Stripped::InPlace { .. } => unreachable!("copy mode"),
    });
    assert_eq!(input, data, "copy mode mutated its input");

    let chunked = strip_chunked(data, split_seed);
    assert_eq!(copied, chunked, "chunking changed the result");

    let mut storage = data.to_vec();
    let in_place = strip_json_comments(&mut storage, OutputMode::InPlace);
    match (&copied, in_place) {
        (Ok(out), Ok(Stripped::InPlace { len })) => {
            assert_eq!(len, out.len());
            assert_eq!(&storage[..len], &out[..]);
            assert!(storage[len..].iter().all(|&b| b == b' '));
        }
        (Err(a), Err(b)) => {
            assert_eq!(a, &b);
            assert_eq!(storage, data, "failed in-place strip mutated its input");
        }
        (a, b) => panic!("copy and in-place disagree: {a:?} vs {b:?}"),
    }

    let Ok(out) = copied else { return };
    assert!(out.len() <= data.len());
    assert_eq!(jsonstrip::strip(&out).as_ref(), Ok(&out), "not idempotent");

    // Plain JSON has no comments to remove.
    if flags & 1 != 0 && serde_json::from_slice::<Value>(data).is_ok() {
        assert_eq!(out, data);
    }
}

fuzz_target!(|data: &[u8]| check(data));
