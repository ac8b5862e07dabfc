//! Mapping and merge tests against the public domain API.

use chrono::NaiveDate;

use domain::merge;
use domain::{
    Address, AddressDto, AddressMapper, Credential, CredentialDto, CredentialMapper, Role,
    TransferMapper, User, UserDto, UserMapper, VerificationToken, VerificationTokenMapper,
};

fn alice() -> User {
    User {
        user_id: Some(1),
        first_name: Some("Alice".to_string()),
        last_name: Some("Liddell".to_string()),
        email: Some("alice@example.com".to_string()),
        credential: Some(Box::new(Credential {
            credential_id: Some(1),
            username: Some("alice".to_string()),
            password: Some("hashed".to_string()),
            role: Some(Role::User),
            is_enabled: Some(true),
            user_id: Some(1),
            ..Default::default()
        })),
        ..Default::default()
    }
}

#[test]
fn test_user_round_trip_keeps_credential_username() {
    let dto = UserMapper::to_transfer(&alice());
    let user = UserMapper::to_domain(&dto);
    let again = UserMapper::to_transfer(&user);

    assert_eq!(again.user_id, Some(1));
    assert_eq!(
        again.credential_dto.as_ref().and_then(|c| c.username.as_deref()),
        Some("alice")
    );
    assert_eq!(again, dto);
}

#[test]
fn test_domain_round_trip_preserves_fields() {
    let user = alice();
    assert_eq!(UserMapper::to_domain(&UserMapper::to_transfer(&user)), user);

    let address = Address {
        address_id: Some(3),
        full_address: Some("123 Main St".to_string()),
        city: Some("New York".to_string()),
        user_id: Some(1),
        user: Some(Box::new(alice().detached())),
        ..Default::default()
    };
    assert_eq!(
        AddressMapper::to_domain(&AddressMapper::to_transfer(&address)),
        address
    );

    let token = VerificationToken {
        verification_token_id: Some(2),
        token: Some("abc123token".to_string()),
        expire_date: NaiveDate::from_ymd_opt(2031, 3, 4),
        credential_id: Some(1),
        // the credential's own owner key is not part of the token payload
        credential: Some(Box::new(Credential {
            user_id: None,
            ..alice().credential.unwrap().detached()
        })),
    };
    assert_eq!(
        VerificationTokenMapper::to_domain(&VerificationTokenMapper::to_transfer(&token)),
        token
    );
}

#[test]
fn test_credential_round_trip_restores_back_reference() {
    let credential = CredentialMapper::to_domain(&CredentialDto {
        credential_id: Some(1),
        username: Some("alice".to_string()),
        user_dto: Some(Box::new(UserMapper::to_transfer(&alice().detached()))),
        ..Default::default()
    });

    let user = credential.user.as_deref().unwrap();
    assert_eq!(
        user.credential.as_deref().and_then(|c| c.username.as_deref()),
        Some("alice")
    );

    let dto = CredentialMapper::to_transfer(&credential);
    assert_eq!(dto.user_dto.and_then(|u| u.user_id), Some(1));
}

#[test]
fn test_absent_inputs_map_to_absent_outputs() {
    assert!(UserMapper::to_transfer_opt(None).is_none());
    assert!(UserMapper::to_domain_opt(None).is_none());
    assert!(CredentialMapper::to_transfer_opt(None).is_none());
    assert!(CredentialMapper::to_domain_opt(None).is_none());
    assert!(AddressMapper::to_transfer_opt(None).is_none());
    assert!(AddressMapper::to_domain_opt(None).is_none());
    assert!(VerificationTokenMapper::to_transfer_opt(None).is_none());
    assert!(VerificationTokenMapper::to_domain_opt(None).is_none());
}

#[test]
fn test_omitted_and_null_json_fields_are_not_supplied() {
    let omitted: AddressDto = serde_json::from_str(r#"{"postalCode": "54321"}"#).unwrap();
    let nulled: AddressDto =
        serde_json::from_str(r#"{"fullAddress": null, "city": null, "postalCode": "54321"}"#)
            .unwrap();
    assert_eq!(omitted, nulled);

    let existing = Address {
        address_id: Some(1),
        full_address: Some("123 Main St".to_string()),
        city: Some("New York".to_string()),
        ..Default::default()
    };
    let merged = merge::merge_address(&existing, &nulled);
    assert_eq!(merged.full_address.as_deref(), Some("123 Main St"));
    assert_eq!(merged.city.as_deref(), Some("New York"));
    assert_eq!(merged.postal_code.as_deref(), Some("54321"));
}

#[test]
fn test_wire_format_uses_original_property_names() {
    let dto = UserMapper::to_transfer(&alice());
    let json = serde_json::to_value(&dto).unwrap();

    assert_eq!(json["userId"], 1);
    assert_eq!(json["credential"]["username"], "alice");
    assert_eq!(json["credential"]["roleBasedAuthority"], "ROLE_USER");
    assert!(json.get("addressDtos").is_none());

    let parsed: UserDto = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, dto);
}
