//! Textual-format and comparator behaviour over the public API.
//!
//! The accept/reject vectors mirror the reference library's scanner tests;
//! the similarity values are pinned to the scoring pipeline documented on
//! [`spamsum::compare`].

use spamsum::{Digest, ParseError, compare};

#[test]
fn scanner_vectors_accept_and_reject_as_the_reference_does() {
    let accepted = [
        "49152:dihMNzhZt62oh9+onrqMPr/KwJsvD/mMplt:Hxxpj",
        "12582912:kVxeXup8VuH8rD//4crHBrlGXm5WgYJ70A:e4XuptH8D//4crHMmUfL",
    ];
    for text in accepted {
        let digest: Digest = text.parse().unwrap_or_else(|err| {
            panic!("{text} should parse, got {err}");
        });
        assert_eq!(digest.to_string(), text);
    }

    let rejected = [
        // Block size beyond 32 bits.
        "18446744073709551616:dihMNzhZt62oh9+onrqMPr/KwJsvD/mMplt:H",
        // A dot where the second colon should be.
        "49152:dihMNzhZt62oh9+onrqMPr/KwJsvD/mMplt.Hxxpj",
        // Left half beyond the 64-character cap.
        "22:i3wkMEgPthpID7YoQDjrdAjGBwBIg8Qow0iLSAhIi3AQSItCCEiLUhBIOch1MEiJBCRIiVQkCEiJ:UxUp",
    ];
    for text in rejected {
        assert!(
            text.parse::<Digest>().is_err(),
            "{text} should fail to parse"
        );
    }
}

#[test]
fn rejected_vectors_name_the_failing_field() {
    let err = "18446744073709551616:abc:def".parse::<Digest>().unwrap_err();
    assert!(matches!(err, ParseError::BlockSize { .. }));

    let err = "49152:abc.def".parse::<Digest>().unwrap_err();
    assert!(matches!(err, ParseError::FieldCount { found: 2 }));

    let err = "49152:abc:d.f".parse::<Digest>().unwrap_err();
    assert!(matches!(err, ParseError::Alphabet { byte: b'.', .. }));
}

#[test]
fn reference_compare_vectors_score_as_pinned() {
    let a: Digest = "12582912:UVxeXup8VuH8rD//pcrHBrlG5FWgYJ70A:O4XuptH8D//pcrHmgfL"
        .parse()
        .unwrap();
    let b: Digest = "12582912:kVxeXup8VuH8rD//4crHBrlGXm5WgYJ70A:e4XuptH8D//4crHMmUfL"
        .parse()
        .unwrap();
    let c: Digest = "12582912:kVxeXup8VuH8rD//4crHBrlGXm5WGYJ70A:e4XuptH8D//4crHMMUfL"
        .parse()
        .unwrap();

    assert_eq!(compare(&a, &b), 91);
    assert_eq!(compare(&b, &c), 99);
    assert_eq!(compare(&a, &c), 88);

    assert_eq!(compare(&b, &a), 91);
    assert_eq!(compare(&c, &b), 99);

    for digest in [&a, &b, &c] {
        assert_eq!(compare(digest, digest), 100);
    }
}

#[test]
fn digests_with_short_halves_compare_to_zero() {
    // Both halves are under the seven-character screen.
    let x: Digest = "49152:abcdef:abc".parse().unwrap();
    assert_eq!(compare(&x, &x), 0);
}

#[test]
fn method_and_free_function_agree() {
    let a: Digest = "12582912:UVxeXup8VuH8rD//pcrHBrlG5FWgYJ70A:O4XuptH8D//pcrHmgfL"
        .parse()
        .unwrap();
    let b: Digest = "12582912:kVxeXup8VuH8rD//4crHBrlGXm5WgYJ70A:e4XuptH8D//4crHMmUfL"
        .parse()
        .unwrap();
    assert_eq!(a.compare(&b), compare(&a, &b));
}
