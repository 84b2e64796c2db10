//! Property-based tests for token issuance and verification

use std::time::Duration;

use compra_pronta::backend::auth::{TokenIssuer, TokenSubject};
use compra_pronta::shared::Role;
use proptest::prelude::*;
use uuid::Uuid;

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Client), Just(Role::Seller)]
}

proptest! {
    #[test]
    fn test_token_roundtrip(
        bytes in any::<[u8; 16]>(),
        local in "[a-z0-9._]{1,20}",
        name in "\\PC{1,40}",
        role in role(),
    ) {
        let issuer = TokenIssuer::new(b"property-secret", Duration::from_secs(3600), "1h");
        let subject = TokenSubject {
            id: Uuid::from_bytes(bytes),
            email: format!("{local}@example.com"),
            name,
            role,
        };

        let token = issuer.issue(&subject).unwrap();
        let claims = issuer.verify(&token).unwrap();

        prop_assert_eq!(claims.subject_id().unwrap(), subject.id);
        prop_assert_eq!(&claims.email, &subject.email);
        prop_assert_eq!(&claims.name, &subject.name);
        prop_assert_eq!(claims.tipo, subject.role);
        prop_assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_other_key_never_verifies(secret in proptest::collection::vec(any::<u8>(), 1..64)) {
        prop_assume!(secret != b"property-secret");
        let issuer = TokenIssuer::new(b"property-secret", Duration::from_secs(3600), "1h");
        let other = TokenIssuer::new(&secret, Duration::from_secs(3600), "1h");
        let subject = TokenSubject {
            id: Uuid::new_v4(),
            email: "ana@x.com".to_string(),
            name: "Ana".to_string(),
            role: Role::Client,
        };

        let token = other.issue(&subject).unwrap();
        prop_assert!(issuer.verify(&token).is_err());
    }
}
