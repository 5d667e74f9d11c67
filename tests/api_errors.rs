// API error path tests
// These test error handling, conversions, and edge cases in the API layer

use json_core::error::{JsonError, LexerError, ParserError};
use json_core::{analyze, analyze_with_options, parse_with_options, ParseOptions};
use miette::Diagnostic;

#[test]
fn test_api_analyze_parse_error() {
    let source = r#"{ "a" 1 }"#;
    let result = analyze(source, "test.json");
    assert!(result.is_err());
    if let Err(JsonError::Parser(_)) = result {
        // Success
    } else {
        panic!("Expected parser error");
    }
}

#[test]
fn test_api_analyze_lexer_error() {
    let source = "{ invalid syntax";
    let result = analyze(source, "test.json");
    if let Err(JsonError::Lexer(LexerError::UnknownLiteral { word, .. })) = result {
        assert_eq!(word, "invalid");
    } else {
        panic!("Expected lexer error, got {result:?}");
    }
}

#[test]
fn test_api_relative_path_handling() {
    let result = analyze("{}", "relative/path/test.json");
    assert!(result.is_ok());
}

#[test]
fn test_api_empty_filename() {
    let result = analyze("{}", "");
    assert!(result.is_ok());
}

#[test]
fn test_api_file_name_carried_into_diagnostic() {
    let err = analyze("[1,]", "configs/app.json").unwrap_err();
    assert!(err.source_code().is_some());
    assert!(err.render().contains("configs/app.json"));
}

#[test]
fn test_api_to_json_success() {
    let source = r#"{ "key": "value", "num": 42 }"#;
    let result = analyze(source, "test.json").unwrap();
    let json = result.to_json();
    assert!(json.is_ok());
    assert!(json.unwrap().contains("\"key\": \"value\""));
}

#[test]
fn test_api_to_yaml_success() {
    let source = r#"{ "key": "value", "num": 42 }"#;
    let result = analyze(source, "test.json").unwrap();
    let yaml = result.to_yaml().unwrap();
    assert_eq!(yaml, "key: value\nnum: 42\n");
}

#[test]
fn test_api_depth_limit() {
    let options = ParseOptions::new().max_depth(2);
    assert!(parse_with_options("[[1]]", &options).is_ok());

    let result = analyze_with_options("[[[1]]]", "deep.json", &options);
    assert!(matches!(
        result,
        Err(JsonError::Parser(ParserError::NestingTooDeep {
            max_depth: 2,
            column: 3,
            ..
        }))
    ));
}

#[test]
fn test_api_error_codes() {
    let err = analyze("[1,]", "test.json").unwrap_err();
    assert_eq!(
        err.code().map(|code| code.to_string()),
        Some("parser::dangling_comma".to_string())
    );

    let err = analyze("[\"\\q\"]", "test.json").unwrap_err();
    assert_eq!(
        err.code().map(|code| code.to_string()),
        Some("lexer::invalid_escape".to_string())
    );
}

#[test]
fn test_api_error_offset() {
    let source = "{\"a\": [1, 2,]}";
    let err = analyze(source, "test.json").unwrap_err();
    assert_eq!(err.offset(), source.find(",]").unwrap());
}

#[test]
fn test_api_error_display() {
    for source in ["{ invalid", "", "[1 2]", "{\"a\":01}", "\"open"] {
        if let Err(err) = analyze(source, "test.json") {
            let error_string = format!("{}", err);
            assert!(!error_string.is_empty());
            assert!(error_string.contains("line "), "{error_string}");
        } else {
            panic!("{source:?} should have errored");
        }
    }
}
