//! Key derivation specs
//!
//! Keys are pure functions of their parts and distinct per option.

use crate::prelude::*;
use ep_core::generate_key;
use std::collections::HashSet;

#[test]
fn keys_are_deterministic_across_calls() {
    let first = option_key("12", "3", "7");
    for _ in 0..100 {
        assert_eq!(option_key("12", "3", "7"), first);
    }
    assert_eq!(generate_key(&["12", "3", "7"]), first);
}

#[test]
fn keys_are_stable_across_releases() {
    // Buttons already displayed in chats carry these keys
    assert_eq!(stage_key("1", "1"), "3mXpbvh1QUHQIUJptxvunfyjIM3FYVPAAlOOsklJ4tI");
    assert_eq!(
        option_key("1", "1", "1"),
        "seduE-K1D99o4AgjK7V1NUNpU8YwllXP4wWH05bpLhU"
    );
}

#[test]
fn empty_parts_yield_empty_key() {
    assert_eq!(generate_key::<&str>(&[]), "");
}

#[test]
fn keys_are_payload_safe() {
    let key = option_key("1", "2", TO_PREVIOUS_OPTION_ID);
    assert!(key.len() < 64);
    assert!(key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn option_keys_are_pairwise_distinct() {
    let mut seen = HashSet::new();
    for p in 0..20 {
        for s in 0..20 {
            for o in 0..20 {
                let key = option_key(&p.to_string(), &s.to_string(), &o.to_string());
                assert!(seen.insert(key), "collision at ({}, {}, {})", p, s, o);
            }
            for reserved in [TO_PREVIOUS_OPTION_ID, TO_ROOT_OPTION_ID] {
                assert!(seen.insert(option_key(&p.to_string(), &s.to_string(), reserved)));
            }
        }
    }
}

#[test]
fn part_boundaries_matter() {
    assert_ne!(option_key("1", "12", "3"), option_key("11", "2", "3"));
    assert_ne!(stage_key("1", "2"), stage_key("2", "1"));
}
