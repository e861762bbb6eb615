use anyhow::Result;
use keysmith_password::{
    generate_password, is_password_weak, normalize, PasswordClass,
    RawRequirements,
};

#[test]
fn grouping_separator_positions() -> Result<()> {
    let raw = RawRequirements::new().grouping(4, 6).separator("-");
    for _ in 0..25 {
        let password = generate_password(PasswordClass::Generic, Some(&raw))?;
        let chars: Vec<char> = password.chars().collect();
        assert_eq!(29, chars.len());
        for (index, c) in chars.iter().enumerate() {
            if [4, 9, 14, 19, 24].contains(&index) {
                assert_eq!('-', *c);
            } else {
                assert_ne!('-', *c);
            }
        }
    }
    Ok(())
}

#[test]
fn grouping_round_trip() -> Result<()> {
    let raw = RawRequirements::new().grouping(4, 6).separator("-");
    let params = normalize(PasswordClass::Generic, Some(&raw))?;
    assert_eq!(24, params.length());

    for _ in 0..25 {
        let password = generate_password(PasswordClass::Generic, Some(&raw))?;
        let stripped: Vec<char> =
            password.chars().filter(|c| *c != '-').collect();
        assert_eq!(params.length(), stripped.len());
        assert!(stripped.iter().all(|c| params.alphabet().contains(*c)));
        for set in params.required_character_sets() {
            assert!(set.intersects(&stripped));
        }
        let stripped: String = stripped.into_iter().collect();
        assert!(!is_password_weak(&stripped));
    }
    Ok(())
}

#[test]
fn grouping_custom_separator() -> Result<()> {
    let raw = RawRequirements::new()
        .length(12)
        .grouping(3, 4)
        .separator(".");
    let password = generate_password(PasswordClass::ServiceSpecific, Some(&raw))?;
    let groups: Vec<&str> = password.split('.').collect();
    assert_eq!(4, groups.len());
    assert!(groups.iter().all(|group| group.len() == 3));
    Ok(())
}

#[test]
fn grouping_strips_separator_from_alphabet() -> Result<()> {
    let raw = RawRequirements::new()
        .allowed_characters("ab-cd-EF-gh")
        .grouping(4, 2);
    let params = normalize(PasswordClass::Generic, Some(&raw))?;
    assert!(!params.alphabet().contains('-'));

    let password = generate_password(PasswordClass::Generic, Some(&raw))?;
    assert_eq!(9, password.len());
    assert_eq!(1, password.matches('-').count());
    Ok(())
}

#[test]
fn grouping_short_last_group() -> Result<()> {
    let raw = RawRequirements::new()
        .min_length(10)
        .max_length(10)
        .grouping(4, 3);
    let password = generate_password(PasswordClass::Generic, Some(&raw))?;
    let groups: Vec<&str> = password.split('-').collect();
    assert_eq!(vec![4, 4, 2], groups.iter().map(|g| g.len()).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn grouping_default_separator_stripped_from_alphabet() -> Result<()> {
    let raw = RawRequirements::new().allowed_characters("abcdefghijk-");
    let params = normalize(PasswordClass::Generic, Some(&raw))?;
    assert_eq!("abcdefghijk", params.alphabet());
    assert!(params.format().is_none());
    assert!(!params.use_default_format());

    for _ in 0..200 {
        let password = generate_password(PasswordClass::Generic, Some(&raw))?;
        assert_eq!(params.length(), password.len());
        assert!(!password.contains('-'), "{}", password);
    }
    Ok(())
}
