use backend_lib::auth::{verify_password, PasswordHasher};

fn hasher() -> PasswordHasher {
    PasswordHasher::with_log_n(4).unwrap()
}

#[test]
fn test_hash_is_salted_phc_string() {
    let hasher = hasher();
    let first = hasher.hash("secret").unwrap();
    let second = hasher.hash("secret").unwrap();

    assert!(first.starts_with("$scrypt$"));
    assert_ne!(first, second);
    assert!(!first.contains("secret"));
}

#[test]
fn test_verify_accepts_only_the_original() {
    let hash = hasher().hash("secret").unwrap();

    assert!(verify_password(&hash, "secret"));
    assert!(!verify_password(&hash, "Secret"));
    assert!(!verify_password(&hash, ""));
}

#[test]
fn test_hash_from_other_cost_still_verifies() {
    let hash = PasswordHasher::with_log_n(5).unwrap().hash("secret").unwrap();
    assert!(hasher().verify(&hash, "secret"));
}

#[test]
fn test_garbage_hash_never_verifies() {
    assert!(!verify_password("not-a-phc-string", "secret"));
    assert!(!verify_password("", ""));
}

#[test]
fn test_hash_secure_clears_plaintext() {
    let mut plain = String::from("secret");
    let hash = hasher().hash_secure(&mut plain).unwrap();

    assert!(plain.is_empty());
    assert!(verify_password(&hash, "secret"));
}

#[test]
fn test_invalid_cost_is_rejected() {
    assert!(PasswordHasher::with_log_n(64).is_err());
}
