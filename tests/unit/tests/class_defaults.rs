use anyhow::Result;
use keysmith_password::{
    default_grouping_for, generate_password, is_password_weak, normalize,
    Grouping, PasswordClass,
};

#[test]
fn class_defaults_length_and_grouping() -> Result<()> {
    for class in PasswordClass::ALL {
        for _ in 0..25 {
            let password = generate_password(class, None)?;
            let length = class.default_length();
            match default_grouping_for(class) {
                Some(grouping) => {
                    let groups: Vec<&str> = password.split('-').collect();
                    assert_eq!(grouping.number_of_groups, groups.len());
                    for group in &groups[..groups.len() - 1] {
                        assert_eq!(grouping.group_size, group.chars().count());
                    }
                    assert_eq!(length, groups.concat().chars().count());
                }
                None => {
                    assert_eq!(length, password.chars().count());
                    assert!(!password.contains('-'));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn class_defaults_formatted_lengths() -> Result<()> {
    assert_eq!(24, generate_password(PasswordClass::Generic, None)?.len());
    assert_eq!(4, generate_password(PasswordClass::Pin, None)?.len());
    assert_eq!(14, generate_password(PasswordClass::WiFiKey, None)?.len());
    assert_eq!(
        29,
        generate_password(PasswordClass::ICloudRecoveryKey, None)?.len()
    );
    assert_eq!(
        20,
        generate_password(PasswordClass::ServiceSpecific, None)?.len()
    );
    Ok(())
}

#[test]
fn class_defaults_grouping_hints() {
    assert_eq!(
        Some(Grouping::new(4, 5)),
        default_grouping_for(PasswordClass::Generic)
    );
    assert_eq!(
        Some(Grouping::new(4, 1)),
        default_grouping_for(PasswordClass::Pin)
    );
    assert_eq!(
        Some(Grouping::new(4, 3)),
        default_grouping_for(PasswordClass::WiFiKey)
    );
    assert_eq!(
        Some(Grouping::new(4, 6)),
        default_grouping_for(PasswordClass::ICloudRecoveryKey)
    );
    assert_eq!(None, default_grouping_for(PasswordClass::ServiceSpecific));
}

#[test]
fn class_defaults_alphabet_membership() -> Result<()> {
    for class in PasswordClass::ALL {
        let alphabet = class.default_alphabet();
        for _ in 0..25 {
            let password = generate_password(class, None)?;
            let raw: String = password.chars().filter(|c| *c != '-').collect();
            assert!(raw.chars().all(|c| alphabet.contains(c)), "{}", raw);
            assert!(!is_password_weak(&raw));
        }
    }
    Ok(())
}

#[test]
fn class_defaults_required_sets() -> Result<()> {
    for class in PasswordClass::ALL {
        let params = normalize(class, None)?;
        assert!(params.use_default_format());
        for _ in 0..25 {
            let password = generate_password(class, None)?;
            let raw: Vec<char> = password.chars().filter(|c| *c != '-').collect();
            for set in params.required_character_sets() {
                assert!(set.intersects(&raw), "{} missing {}", password, set);
            }
        }
    }
    Ok(())
}

#[test]
fn pin_defaults_are_digits() -> Result<()> {
    for _ in 0..100 {
        let pin = generate_password(PasswordClass::Pin, None)?;
        assert_eq!(4, pin.len());
        assert!(pin.chars().all(|c| c.is_ascii_digit()));
        assert!(!is_password_weak(&pin));
    }
    Ok(())
}

#[test]
fn class_defaults_match_grouping_hint() -> Result<()> {
    for class in PasswordClass::ALL {
        let Some(grouping) = default_grouping_for(class) else {
            continue;
        };
        let password = generate_password(class, None)?;
        let groups: Vec<&str> = password.split('-').collect();
        assert_eq!(grouping.number_of_groups, groups.len(), "{}", password);
        assert!(groups
            .iter()
            .all(|group| group.chars().count() == grouping.group_size));
    }
    Ok(())
}
