use super::*;

#[test]
fn test_basic_from_name_aliases() {
    assert_eq!(BasicKind::from_name("byte"), Some(BasicKind::Uint8));
    assert_eq!(BasicKind::from_name("rune"), Some(BasicKind::Int32));
    assert_eq!(BasicKind::from_name("string"), Some(BasicKind::String));
    assert_eq!(BasicKind::from_name("Time"), None);
}

#[test]
fn test_fixed_sizes() {
    assert_eq!(BasicKind::Bool.fixed_size(), Some(1));
    assert_eq!(BasicKind::Uint16.fixed_size(), Some(2));
    assert_eq!(BasicKind::Float32.fixed_size(), Some(4));
    assert_eq!(BasicKind::Complex64.fixed_size(), Some(8));
    assert_eq!(BasicKind::Complex128.fixed_size(), Some(16));
    assert_eq!(BasicKind::Int.fixed_size(), None);
    assert_eq!(BasicKind::String.fixed_size(), None);
}

#[test]
fn test_underlying_strips_nested_names() {
    let ty = Ty::named("Outer", Ty::named("Inner", Ty::Basic(BasicKind::Int64)));
    assert_eq!(ty.underlying(), &Ty::Basic(BasicKind::Int64));
    assert!(!ty.is_opaque());
}

#[test]
fn test_opaque_through_name() {
    let ty = Ty::named("Remote", Ty::Opaque("pkg.Remote".to_string()));
    assert!(ty.is_opaque());
}
