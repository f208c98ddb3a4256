//! Tests for token request configuration.

use super::*;

mod repository_selector_tests {
    use super::*;

    #[test]
    fn test_parses_owner_and_name() {
        let repo: RepositorySelector = "octo/hello-world".parse().unwrap();
        assert_eq!(repo.owner(), "octo");
        assert_eq!(repo.name(), "hello-world");
        assert_eq!(repo.to_string(), "octo/hello-world");
    }

    #[test]
    fn test_rejects_value_without_slash() {
        let result = "invalid-format".parse::<RepositorySelector>();
        match result {
            Err(ValidationError::InvalidFormat { field, message }) => {
                assert_eq!(field, "repo");
                assert!(message.contains("invalid-format"));
            }
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_extra_segments() {
        assert!("octo/hello/world".parse::<RepositorySelector>().is_err());
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!("/hello-world".parse::<RepositorySelector>().is_err());
        assert!("octo/".parse::<RepositorySelector>().is_err());
        assert!("/".parse::<RepositorySelector>().is_err());
        assert!("".parse::<RepositorySelector>().is_err());
    }

    #[test]
    fn test_new_rejects_slash_in_parts() {
        assert!(RepositorySelector::new("octo/x", "repo").is_err());
        assert!(RepositorySelector::new("octo", "").is_err());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let repo: RepositorySelector = "octo/hello-world".parse().unwrap();
        assert!(repo.matches("octo", "hello-world"));
        assert!(!repo.matches("Octo", "hello-world"));
        assert!(!repo.matches("octo", "Hello-World"));
        assert!(!repo.matches("hello-world", "octo"));
    }
}

mod token_request_tests {
    use super::*;

    #[test]
    fn test_no_selectors_selects_app_jwt() {
        assert_eq!(TokenRequest::from_selectors(None, None), TokenRequest::AppJwt);
    }

    #[test]
    fn test_installation_id_selects_installation_flow() {
        let request = TokenRequest::from_selectors(Some(InstallationId::new(12345)), None);
        assert_eq!(request, TokenRequest::Installation(InstallationId::new(12345)));
    }

    #[test]
    fn test_repository_selects_repository_flow() {
        let repo: RepositorySelector = "octo/hello-world".parse().unwrap();
        let request = TokenRequest::from_selectors(None, Some(repo.clone()));
        assert_eq!(request, TokenRequest::Repository(repo));
    }

    #[test]
    fn test_installation_id_takes_precedence() {
        let repo: RepositorySelector = "octo/hello-world".parse().unwrap();
        let request = TokenRequest::from_selectors(Some(InstallationId::new(1)), Some(repo));
        assert_eq!(request, TokenRequest::Installation(InstallationId::new(1)));
    }
}

mod token_config_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenConfig::new(GitHubAppId::new(1), "/keys/app.pem").unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert_eq!(config.request, TokenRequest::AppJwt);
        assert!(!config.verbose);
    }

    #[test]
    fn test_api_base_strips_trailing_slash() {
        let config = TokenConfig::new(GitHubAppId::new(1), "/keys/app.pem")
            .unwrap()
            .with_api_url(Url::parse("https://ghe.example.com/api/v3/").unwrap());
        assert_eq!(config.api_base(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_builder_methods() {
        let config = TokenConfig::new(GitHubAppId::new(1), "/keys/app.pem")
            .unwrap()
            .with_request(TokenRequest::Installation(InstallationId::new(9)))
            .with_verbose(true);
        assert_eq!(config.request, TokenRequest::Installation(InstallationId::new(9)));
        assert!(config.verbose);
    }
}
