use serde::Serialize;

/// Form field name carrying the MFA token on the login form.
pub const MFA_LOGIN_FIELD_NAME: &str = "mfa-token";

/// Descriptor of an input rendered on the login form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LoginField {
    pub label: &'static str,
    pub name: &'static str,
    pub placeholder: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub const MFA_LOGIN_FIELD: LoginField = LoginField {
    label: "MFA Token",
    name: MFA_LOGIN_FIELD_NAME,
    placeholder: "(optional)",
    kind: "text",
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mfa_login_field_serialization() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(MFA_LOGIN_FIELD)?,
            json!({
                "label": "MFA Token",
                "name": "mfa-token",
                "placeholder": "(optional)",
                "type": "text",
            })
        );
        Ok(())
    }
}
