use core_config::{env_required, ConfigError, FromEnv};

/// JWT verification configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret shared with the token issuer
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl FromEnv for JwtConfig {
    /// Reads the required `JWT_SECRET` environment variable
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env_required("JWT_SECRET")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().is_err());
        });
        temp_env::with_var("JWT_SECRET", Some("s3cret"), || {
            assert_eq!(JwtConfig::from_env().unwrap().secret, "s3cret");
        });
    }
}
