//! Fuzz target for text quoting.
//!
//! A quoted literal must open and close with a single quote and never
//! contain a lone quote in between, whatever the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use segfilter_core::{MariaDbQuoter, Quoter, SqlValue};

fuzz_target!(|text: String| {
    let quoted = MariaDbQuoter.quote(&SqlValue::from(text.as_str()));
    let literal = quoted.as_str();

    assert!(literal.len() >= 2);
    assert!(literal.starts_with('\'') && literal.ends_with('\''));

    let inner = &literal[1..literal.len() - 1];
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => assert_eq!(chars.next(), Some('\''), "lone quote in {literal}"),
            '\\' => assert!(chars.next().is_some(), "dangling escape in {literal}"),
            _ => {}
        }
    }
});
