/// Default `config/install.toml`, published by `lci install`.
pub const DEFAULT_INSTALL_CONFIG: &str = include_str!("../../assets/install.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InstallConfig;
    use crate::domain::form::resolve_fields;

    #[test]
    fn default_config_parses_and_every_field_resolves() {
        let config = InstallConfig::parse(DEFAULT_INSTALL_CONFIG).unwrap();
        assert_eq!(config.min_php_version, "8.2.0");
        assert_eq!(config.permissions.len(), 3);
        assert_eq!(config.requirements["apache"], vec!["mod_rewrite".to_string()]);

        let (fields, malformed) = resolve_fields(&config.account.fields);
        assert!(malformed.is_empty(), "unexpected malformed fields: {malformed:?}");
        assert_eq!(fields.len(), 8);
    }
}
