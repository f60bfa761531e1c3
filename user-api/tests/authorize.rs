//! Token issuance and authorization properties

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use user_api::auth::{AuthError, JwtConfig, JwtService, RoleSet, role_set};

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn service() -> JwtService {
    JwtService::new(JwtConfig::new(SECRET)).unwrap()
}

fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_767_225_600, 0).unwrap()
}

#[test]
fn alice_scenario() {
    let service = service();
    let issued = service.issue("alice", ["Admin"], t0()).unwrap();
    let lifetime = Duration::minutes(service.config().expiration_minutes);
    assert_eq!(issued.expires_at, t0() + lifetime);

    let principal = service
        .authorize(&issued.token, &role_set(["Admin"]), t0())
        .unwrap();
    assert_eq!(principal.subject(), "alice");
    assert_eq!(principal.roles(), &role_set(["Admin"]));

    assert_eq!(
        service
            .authorize(&issued.token, &role_set(["User"]), t0())
            .unwrap_err(),
        AuthError::Forbidden
    );

    assert_eq!(
        service
            .authorize(&issued.token, &role_set(["Admin"]), t0() + lifetime * 2)
            .unwrap_err(),
        AuthError::TokenExpired
    );
}

#[test]
fn multi_role_token_satisfies_either_requirement() {
    let service = service();
    let issued = service.issue("alice", ["Admin", "User"], t0()).unwrap();

    for required in [role_set(["Admin"]), role_set(["User"])] {
        let principal = service
            .authorize(&issued.token, &required, t0() + Duration::minutes(59))
            .unwrap();
        assert!(principal.has_role("Admin"));
        assert!(principal.has_role("User"));
    }
}

#[test]
fn user_without_required_role_is_forbidden() {
    let service = service();
    let issued = service.issue("bob", ["User"], t0()).unwrap();

    assert_eq!(
        service
            .authorize(&issued.token, &role_set(["Admin"]), t0())
            .unwrap_err(),
        AuthError::Forbidden
    );
    assert!(
        service
            .authorize(&issued.token, &role_set(["Admin", "User"]), t0())
            .is_ok()
    );
}

#[test]
fn any_issued_token_validates_until_expiry() {
    let service = service();
    for (subject, roles) in [
        ("alice", vec!["Admin"]),
        ("bob", vec!["User"]),
        ("carol", vec!["Admin", "User", "Auditor"]),
    ] {
        let issued = service.issue(subject, &roles, t0()).unwrap();
        for offset in [0, 1, 30 * 60, 60 * 60] {
            let principal = service
                .validate(&issued.token, t0() + Duration::seconds(offset))
                .unwrap();
            assert_eq!(principal.subject(), subject);
            assert_eq!(principal.roles(), &role_set(&roles));
        }
        assert_eq!(
            service
                .validate(&issued.token, t0() + Duration::seconds(60 * 60 + 1))
                .unwrap_err(),
            AuthError::TokenExpired
        );
    }
}

#[test]
fn empty_required_roles_always_forbidden() {
    let service = service();
    let issued = service.issue("alice", ["Admin", "User"], t0()).unwrap();
    assert_eq!(
        service
            .authorize(&issued.token, &RoleSet::new(), t0())
            .unwrap_err(),
        AuthError::Forbidden
    );
}

#[test]
fn tampered_payload_is_bad_signature() {
    let service = service();
    let issued = service.issue("bob", ["User"], t0()).unwrap();

    let parts: Vec<&str> = issued.token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
    let original: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    // 签名覆盖全部声明，改哪个字段都过不了验签
    let far_future = (t0() + Duration::days(365)).timestamp();
    for (claim, value) in [
        ("roles", serde_json::json!(["Admin"])),
        ("sub", serde_json::json!("alice")),
        ("iss", serde_json::json!("billing-api")),
        ("aud", serde_json::json!("billing-clients")),
        ("exp", serde_json::json!(far_future)),
    ] {
        let mut claims = original.clone();
        claims[claim] = value;
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            service
                .authorize(&forged, &role_set(["User"]), t0())
                .unwrap_err(),
            AuthError::BadSignature,
            "tampered claim: {}",
            claim
        );
        // 过期之后仍然报签名错误，而不是过期
        assert_eq!(
            service
                .validate(&forged, t0() + Duration::days(30))
                .unwrap_err(),
            AuthError::BadSignature,
            "tampered claim: {}",
            claim
        );
    }
}

#[test]
fn flipped_signature_byte_is_bad_signature() {
    let service = service();
    let issued = service.issue("bob", ["User"], t0()).unwrap();

    let (unsigned, signature) = issued.token.rsplit_once('.').unwrap();
    let mut sig = URL_SAFE_NO_PAD.decode(signature).unwrap();
    sig[0] ^= 0x01;
    let forged = format!("{}.{}", unsigned, URL_SAFE_NO_PAD.encode(sig));

    assert_eq!(
        service.validate(&forged, t0()).unwrap_err(),
        AuthError::BadSignature
    );
}

#[test]
fn token_from_other_deployment_is_rejected() {
    let other = JwtService::new(
        JwtConfig::new(SECRET)
            .with_issuer("billing-api")
            .with_audience("billing-clients"),
    )
    .unwrap();
    let issued = other.issue("alice", ["Admin"], t0()).unwrap();

    // 签发者先于受众检查
    assert_eq!(
        service().validate(&issued.token, t0()).unwrap_err(),
        AuthError::IssuerMismatch
    );
}

#[test]
fn clock_skew_tolerance() {
    let lenient = JwtService::new(JwtConfig::new(SECRET).with_clock_skew_seconds(120)).unwrap();
    let issued = lenient.issue("alice", ["User"], t0()).unwrap();

    let late = issued.expires_at + Duration::seconds(90);
    assert!(lenient.validate(&issued.token, late).is_ok());
    assert_eq!(
        service().validate(&issued.token, late).unwrap_err(),
        AuthError::TokenExpired
    );
}
