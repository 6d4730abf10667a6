//! End-to-end token lifecycle through the public crate API

use chrono::{Duration, Utc};
use pm_core::{Identity, TokenError, TokenService, TokenServiceConfig};
use pm_shared::JwtConfig;

fn service_from(jwt: &JwtConfig) -> TokenService {
    let config = TokenServiceConfig::try_from(jwt).expect("valid configuration");
    TokenService::new(config).expect("token service")
}

#[test]
fn test_login_then_request_then_expiry() {
    let service = service_from(&JwtConfig::new("lifecycle-secret-for-integration-tests"));
    let login_time = Utc::now();

    let token = service
        .issue_at(&Identity::new("alice", ["ADMIN"]), login_time)
        .unwrap();

    let claims = service.verify_at(&token, login_time + Duration::minutes(90)).unwrap();
    assert_eq!(claims.subject, "alice");
    assert!(claims.roles.contains("ADMIN"));

    assert_eq!(
        service.verify_at(&token, login_time + Duration::hours(2)),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_instances_with_different_secrets_do_not_trust_each_other() {
    let instance_a = service_from(&JwtConfig::new("first-deployment-secret"));
    let instance_b = service_from(&JwtConfig::new("second-deployment-secret"));

    let token = instance_a.issue(&Identity::new("alice", ["ADMIN"])).unwrap();

    assert_eq!(instance_b.verify(&token), Err(TokenError::InvalidSignature));
    assert!(instance_b.extract_authorities(&token).is_empty());
    assert!(!instance_b.is_valid("alice", &token));
}

#[test]
fn test_instances_sharing_a_secret_interoperate() {
    let jwt = JwtConfig::new("shared-cluster-secret").with_ttl_minutes(10);
    let issuer = service_from(&jwt);
    let verifier = service_from(&jwt);

    let token = issuer.issue(&Identity::new("bob", ["USER"])).unwrap();

    assert_eq!(verifier.subject(&token).unwrap(), "bob");
    assert!(verifier.extract_authorities(&token).contains("USER"));
}

#[test]
fn test_expired_error_is_distinguishable() {
    let service = service_from(&JwtConfig::new("lifecycle-secret-for-integration-tests"));
    let token = service
        .issue_at(&Identity::new("alice", ["USER"]), Utc::now() - Duration::days(1))
        .unwrap();

    let err = service.verify(&token).unwrap_err();
    assert!(err.is_expired());
    assert_eq!(err.error_code(), "TOKEN_EXPIRED");
}
