//! Property-based tests for password hashing

use compra_pronta::backend::auth::PasswordHasher;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_hash_verifies_only_the_original(
        password in "[a-zA-Z0-9!@#]{6,40}",
        other in "[a-zA-Z0-9!@#]{6,40}",
    ) {
        let hasher = PasswordHasher::new(4);
        let (hash, same, different) = runtime().block_on(async {
            let hash = hasher.hash(&password).await.unwrap();
            let same = hasher.verify(&password, &hash).await.unwrap();
            let different = hasher.verify(&other, &hash).await.unwrap();
            (hash, same, different)
        });

        prop_assert_ne!(&hash, &password);
        prop_assert!(same);
        prop_assert_eq!(different, password == other);
    }
}
