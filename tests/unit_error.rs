use ferrous_controller::{ControllerError, DiError};
use std::error::Error;

#[test]
fn test_di_error_messages() {
    assert_eq!(DiError::NotFound("mailer".into()).to_string(), "Service not found: mailer");
    assert_eq!(DiError::TypeMismatch("mailer".into()).to_string(), "Type mismatch for: mailer");
    assert_eq!(DiError::DepthExceeded(1024).to_string(), "Max depth 1024 exceeded");
    assert_eq!(
        DiError::Removed("mailer".into()).to_string(),
        "Service \"mailer\" was removed or inlined when the container was built"
    );
    assert_eq!(
        DiError::Config("separator must not be empty".into()).to_string(),
        "Configuration error: separator must not be empty"
    );
}

#[test]
fn test_not_found_alternatives_formatting() {
    let none = ControllerError::NotFound {
        identifier: "blog".into(),
        alternatives: vec![],
    };
    assert_eq!(none.to_string(), "Controller \"blog\" does neither exist as service nor as class.");

    let one = ControllerError::NotFound {
        identifier: "blg".into(),
        alternatives: vec!["blog".into()],
    };
    assert_eq!(
        one.to_string(),
        "Controller \"blg\" does neither exist as service nor as class. Did you mean \"blog\"?"
    );

    let many = ControllerError::NotFound {
        identifier: "blg".into(),
        alternatives: vec!["blog".into(), "bag".into()],
    };
    assert_eq!(
        many.to_string(),
        "Controller \"blg\" does neither exist as service nor as class. \
         Did you mean one of \"blog\", \"bag\"?"
    );
}

#[test]
fn test_controller_error_messages() {
    assert_eq!(
        ControllerError::InvalidIdentifier("::index".into()).to_string(),
        "Controller identifier \"::index\" is not valid."
    );
    assert_eq!(
        ControllerError::NotInvokable("blog".into()).to_string(),
        "Controller \"blog\" cannot be called without a method name."
    );
    assert_eq!(
        ControllerError::ContainerNotSet("app::Dummy".into()).to_string(),
        "\"app::Dummy\" has no container set, did you forget to define it as a service subscriber?"
    );
    assert_eq!(
        ControllerError::Removed("admin".into()).to_string(),
        "Controller \"admin\" cannot be fetched from the container because it is private. \
         Did you forget to register it as a controller service?"
    );
    assert_eq!(
        ControllerError::Action {
            controller: "blog".into(),
            action: "show".into(),
            message: "post 7 is missing".into(),
        }
        .to_string(),
        "Action \"blog::show\" failed: post 7 is missing"
    );
}

#[test]
fn test_container_errors_convert_and_chain() {
    let err: ControllerError = DiError::NotFound("mailer".into()).into();
    assert_eq!(err, ControllerError::Container(DiError::NotFound("mailer".into())));
    assert_eq!(err.to_string(), "Service not found: mailer");
    assert_eq!(
        err.source().map(|source| source.to_string()),
        Some("Service not found: mailer".to_string())
    );

    assert!(ControllerError::ContainerNotSet("x".into()).source().is_none());
}
