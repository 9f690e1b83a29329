use super::*;

#[test]
fn test_lookup_known_targets() {
    assert_eq!(Target::lookup("amd64"), Some(Target::AMD64));
    assert_eq!(Target::lookup("386").map(|t| t.word_size), Some(4));
    assert_eq!(Target::lookup("amd64p32").map(|t| t.max_align), Some(8));
    assert_eq!(Target::lookup("z80"), None);
}

#[test]
fn test_default_is_amd64() {
    assert_eq!(Target::default().to_string(), "amd64");
}

#[test]
fn test_names_are_unique() {
    for (i, a) in Target::ALL.iter().enumerate() {
        for b in &Target::ALL[i + 1..] {
            assert_ne!(a.name, b.name);
        }
    }
}
