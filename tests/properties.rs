//! Property-based checks for the escape guard, scanner and resolver.

use parserfn::escape::{protect, restore};
use parserfn::{scanner, Resolver};
use proptest::prelude::*;

prop_compose! {
    /// Plain text that cannot form or close a call.
    fn arb_plain()(text in "[a-z0-9 .,=:]{0,12}") -> String {
        text
    }
}

prop_compose! {
    /// A well-formed `if` call whose branches are plain words.
    fn arb_call()(
        test in "[a-z]{0,3}",
        then in "[a-z]{1,5}",
        otherwise in "[a-z]{1,5}"
    ) -> (String, String) {
        let expected = if test.is_empty() { otherwise.clone() } else { then.clone() };
        (format!("{{{{#if: {test} | {then} | {otherwise} #}}}}"), expected)
    }
}

prop_compose! {
    /// Text mixing literal spans, placeholder-like characters and calls.
    fn arb_markup()(
        parts in prop::collection::vec(
            prop_oneof![
                "[ -~]{0,10}",
                Just("%%|%%".to_string()),
                Just("<nowiki>{{#if: 1 | x #}}</nowiki>".to_string()),
                Just("<CODE lang>\n{{#\n</code>".to_string()),
                Just("\u{E000}0\u{E000}".to_string()),
                Just("{{#if: 1 | y #}}".to_string()),
            ],
            0..8,
        )
    ) -> String {
        parts.concat()
    }
}

proptest! {
    #[test]
    fn restore_inverts_protect(text in arb_markup()) {
        let (guarded, blocks) = protect(&text);
        prop_assert_eq!(restore(&guarded, &blocks), text);
    }

    #[test]
    fn restore_inverts_protect_on_arbitrary_text(text in ".*") {
        let (guarded, blocks) = protect(&text);
        prop_assert_eq!(restore(&guarded, &blocks), text);
    }

    #[test]
    fn scanner_finds_each_concatenated_call(
        pieces in prop::collection::vec((arb_plain(), arb_call()), 0..6),
        tail in arb_plain(),
    ) {
        let mut text = String::new();
        let mut calls = Vec::new();
        let mut expected = String::new();
        for (plain, (call, result)) in &pieces {
            text.push_str(plain);
            text.push_str(call);
            calls.push(call.clone());
            expected.push_str(plain);
            expected.push_str(result);
        }
        text.push_str(&tail);
        expected.push_str(&tail);

        let found: Vec<String> = scanner::spans(&text)
            .map(|span| text[span.range()].to_string())
            .collect();
        prop_assert_eq!(found, calls);

        let resolved = Resolver::new().resolve_all(&text);
        prop_assert!(!resolved.contains("{{#"));
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn nested_calls_resolve_inside_out(depth in 1usize..20, word in "[a-z]{1,6}") {
        let mut text = word.clone();
        for _ in 0..depth {
            text = format!("{{{{#if: 1 | {text} #}}}}");
        }
        prop_assert_eq!(Resolver::new().resolve_all(&text), word);
    }

    #[test]
    fn resolution_is_total_and_idempotent(text in ".{0,80}") {
        let r = Resolver::new();
        let once = r.resolve_all(&text);
        if !once.contains("{{#") {
            prop_assert_eq!(r.resolve_all(&once), once);
        }
    }

    #[test]
    fn call_free_text_is_a_fixed_point(text in "[^{#]{0,60}") {
        prop_assert_eq!(Resolver::new().resolve_all(&text), text);
    }
}
