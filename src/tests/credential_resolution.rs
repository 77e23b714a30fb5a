// Credential resolution from the environment: defaults, overrides, and the
// all-missing-fields-reported contract. Env mutation forces #[serial].

#[cfg(test)]
mod test {
    use serial_test::serial;

    use crate::config::credentials::Credentials;
    use crate::error::RelayError;
    use crate::utils::constants::{DEFAULT_IMS_ENDPOINT, DEFAULT_SCOPES};

    const REQUIRED: [&str; 6] = [
        "AEP_ENDPOINT",
        "CLIENT_ID",
        "CLIENT_SECRET",
        "IMS_ORG",
        "FLOW_ID",
        "SANDBOX_NAME",
    ];
    const OPTIONAL: [&str; 3] = ["IMS_ENDPOINT", "SCOPES", "TECHNICAL_ACCOUNT_ID"];

    fn clear_env() {
        for name in REQUIRED.iter().chain(OPTIONAL.iter()) {
            std::env::remove_var(name);
        }
    }

    fn set_required() {
        std::env::set_var("AEP_ENDPOINT", "https://dcs.adobedc.net/collection/abc123");
        std::env::set_var("CLIENT_ID", "client-123");
        std::env::set_var("CLIENT_SECRET", "secret-xyz");
        std::env::set_var("IMS_ORG", "1234567890ABCDEF@AdobeOrg");
        std::env::set_var("FLOW_ID", "flow-42");
        std::env::set_var("SANDBOX_NAME", "prod");
    }

    #[test]
    #[serial]
    fn resolves_with_defaults_applied() {
        clear_env();
        set_required();

        let credentials = Credentials::resolve().unwrap();
        assert_eq!(credentials.aep_endpoint, "https://dcs.adobedc.net/collection/abc123");
        assert_eq!(credentials.ims_endpoint, DEFAULT_IMS_ENDPOINT);
        assert_eq!(credentials.scopes, DEFAULT_SCOPES);
        assert_eq!(credentials.technical_account_id, "");
        assert_eq!(credentials.sandbox_name, "prod");
    }

    #[test]
    #[serial]
    fn explicit_values_override_defaults() {
        clear_env();
        set_required();
        std::env::set_var("IMS_ENDPOINT", "https://ims-stage.example.com/ims/token/v2");
        std::env::set_var("SCOPES", "openid,AdobeID");
        std::env::set_var("TECHNICAL_ACCOUNT_ID", "TA@techacct.adobe.com");

        let credentials = Credentials::resolve().unwrap();
        assert_eq!(credentials.ims_endpoint, "https://ims-stage.example.com/ims/token/v2");
        assert_eq!(credentials.scopes, "openid,AdobeID");
        assert_eq!(credentials.technical_account_id, "TA@techacct.adobe.com");
    }

    #[test]
    #[serial]
    fn reports_every_missing_variable() {
        clear_env();
        std::env::set_var("AEP_ENDPOINT", "https://dcs.adobedc.net/collection/abc123");
        std::env::set_var("CLIENT_ID", "client-123");

        match Credentials::resolve() {
            Err(RelayError::Configuration { missing }) => {
                assert_eq!(
                    missing,
                    vec!["CLIENT_SECRET", "IMS_ORG", "FLOW_ID", "SANDBOX_NAME"]
                );
            }
            _ => panic!("expected configuration error"),
        }
    }

    #[test]
    #[serial]
    fn empty_value_counts_as_missing() {
        clear_env();
        set_required();
        std::env::set_var("SANDBOX_NAME", "");

        match Credentials::resolve() {
            Err(RelayError::Configuration { missing }) => {
                assert_eq!(missing, vec!["SANDBOX_NAME"]);
            }
            _ => panic!("expected configuration error"),
        }
    }
}
